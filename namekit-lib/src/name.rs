//! Names and their fingerprints.
//!
//! A [`Name`] is an ordered, non-empty list of character units. Whether
//! each unit is acceptable (ASCII letter or recognized emoji) is decided by
//! the price oracle, which owns the emoji set; this module only guarantees
//! structure and identity.

use crate::{NamekitError, Result};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use sha2::{Digest, Sha256};
use std::fmt;
use std::str::FromStr;

const FINGERPRINT_TAG: &[u8] = b"namekit.name.v1";

/// Ordered sequence of character units.
///
/// # Example
///
/// ```
/// use namekit_lib::Name;
///
/// let ooga = Name::from_units(["o", "o", "g", "a"]).unwrap();
/// let agoo = Name::from_units(["a", "g", "o", "o"]).unwrap();
/// assert_eq!(ooga.len(), 4);
/// assert_ne!(ooga.id(), agoo.id());
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct Name {
    units: Vec<String>,
}

impl Name {
    /// Build a name from its units.
    ///
    /// Fails with `InvalidInput` on an empty unit list.
    pub fn from_units<I, S>(units: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let units: Vec<String> = units.into_iter().map(Into::into).collect();
        if units.is_empty() {
            return Err(NamekitError::invalid_input("name must not be empty"));
        }
        Ok(Self { units })
    }

    pub fn units(&self) -> &[String] {
        &self.units
    }

    /// Number of character units (not bytes, not chars).
    pub fn len(&self) -> usize {
        self.units.len()
    }

    /// Always false; kept for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.units.is_empty()
    }

    /// Deterministic, order-sensitive fingerprint of the unit sequence.
    ///
    /// Every unit is length-prefixed before hashing, so `["ab","c"]` and
    /// `["a","bc"]` never collide.
    pub fn id(&self) -> NameId {
        let mut hasher = Sha256::new();
        hasher.update(FINGERPRINT_TAG);
        hasher.update((self.units.len() as u64).to_be_bytes());
        for unit in &self.units {
            hasher.update((unit.len() as u64).to_be_bytes());
            hasher.update(unit.as_bytes());
        }
        NameId(hasher.finalize().into())
    }
}

impl TryFrom<Vec<String>> for Name {
    type Error = NamekitError;

    fn try_from(units: Vec<String>) -> Result<Self> {
        Self::from_units(units)
    }
}

impl From<Name> for Vec<String> {
    fn from(name: Name) -> Self {
        name.units
    }
}

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for unit in &self.units {
            f.write_str(unit)?;
        }
        Ok(())
    }
}

/// Fingerprint of a [`Name`], the key of leases and auctions.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId([u8; 32]);

impl NameId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// First 8 hex characters, for log lines.
    pub fn short(&self) -> String {
        hex::encode(&self.0[..4])
    }
}

impl fmt::Display for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{}", hex::encode(self.0))
    }
}

impl fmt::Debug for NameId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "NameId({})", self.short())
    }
}

impl FromStr for NameId {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        let hex_part = s.strip_prefix("0x").unwrap_or(s);
        let raw = hex::decode(hex_part).map_err(|e| format!("Invalid name id: {}", e))?;
        let bytes: [u8; 32] = raw
            .try_into()
            .map_err(|_| "Invalid name id: expected 32 bytes".to_string())?;
        Ok(Self(bytes))
    }
}

impl Serialize for NameId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for NameId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_name_rejected() {
        let units: Vec<String> = Vec::new();
        assert!(matches!(
            Name::from_units(units),
            Err(NamekitError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_id_is_deterministic() {
        let a = Name::from_units(["o", "o", "g", "a"]).unwrap();
        let b = Name::from_units(vec!["o".to_string(), "o".into(), "g".into(), "a".into()]).unwrap();
        assert_eq!(a.id(), b.id());
    }

    #[test]
    fn test_id_is_order_sensitive() {
        let a = Name::from_units(["a", "🐻"]).unwrap();
        let b = Name::from_units(["🐻", "a"]).unwrap();
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_id_respects_unit_boundaries() {
        let a = Name::from_units(["ab", "c"]).unwrap();
        let b = Name::from_units(["a", "bc"]).unwrap();
        assert_ne!(a.id(), b.id());
        assert_eq!(a.to_string(), b.to_string());
    }

    #[test]
    fn test_deserialize_checks_units() {
        let name: Name = serde_json::from_str(r#"["🐻","a"]"#).unwrap();
        assert_eq!(name.len(), 2);
        assert!(serde_json::from_str::<Name>("[]").is_err());
    }

    #[test]
    fn test_name_id_text_round_trip() {
        let id = Name::from_units(["x"]).unwrap().id();
        let parsed: NameId = id.to_string().parse().unwrap();
        assert_eq!(parsed, id);
        assert_eq!(id.short().len(), 8);
    }
}
