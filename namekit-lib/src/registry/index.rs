use crate::{Address, NameId};
use std::collections::{BTreeMap, BTreeSet};

/// Address to name ids, kept in step with the lease table.
///
/// Sets make double insertion harmless; empty buckets are dropped so a
/// former holder leaves no trace.
#[derive(Clone, Debug, Default)]
pub struct ReverseIndex {
    entries: BTreeMap<Address, BTreeSet<NameId>>,
}

impl ReverseIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Zero addresses are never indexed.
    pub fn insert(&mut self, holder: Address, id: NameId) {
        if holder.is_zero() {
            return;
        }
        self.entries.entry(holder).or_default().insert(id);
    }

    pub fn remove(&mut self, holder: Address, id: NameId) {
        if let Some(ids) = self.entries.get_mut(&holder) {
            ids.remove(&id);
            if ids.is_empty() {
                self.entries.remove(&holder);
            }
        }
    }

    pub fn relocate(&mut self, id: NameId, from: Address, to: Address) {
        self.remove(from, id);
        self.insert(to, id);
    }

    pub fn ids(&self, holder: Address) -> impl Iterator<Item = NameId> + '_ {
        self.entries
            .get(&holder)
            .into_iter()
            .flat_map(|ids| ids.iter().copied())
    }

    pub fn contains(&self, holder: Address, id: NameId) -> bool {
        self.entries
            .get(&holder)
            .is_some_and(|ids| ids.contains(&id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_relocate_leaves_no_ghost() {
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");
        let id = NameId::from_bytes([7u8; 32]);
        let mut index = ReverseIndex::new();

        index.insert(alice, id);
        index.insert(alice, id);
        assert_eq!(index.ids(alice).count(), 1);

        index.relocate(id, alice, bob);
        assert_eq!(index.ids(alice).count(), 0);
        assert!(index.contains(bob, id));
    }

    #[test]
    fn test_zero_address_ignored() {
        let mut index = ReverseIndex::new();
        index.insert(Address::ZERO, NameId::from_bytes([1u8; 32]));
        assert_eq!(index.ids(Address::ZERO).count(), 0);
    }
}
