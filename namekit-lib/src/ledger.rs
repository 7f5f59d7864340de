//! Asset balances seen by the components.
//!
//! The registry and the auction house move value only through
//! [`AssetLedger`]. [`InMemoryLedger`] is the reference host: native and
//! token balances, token allowances, and recipients that refuse native
//! transfers (a contract whose receive hook reverts).

use crate::{Address, Amount, NamekitError, Result};
use std::collections::{HashMap, HashSet};

/// Value movements available to components.
///
/// The native asset is [`Address::NATIVE`]; any other address names a token.
pub trait AssetLedger {
    fn balance_of(&self, asset: Address, holder: Address) -> Amount;

    /// Move `amount` of `asset` from `from` to `to`.
    ///
    /// Fails with `PaymentInsufficient` when `from` lacks funds and with
    /// `TransferRejected` when `to` refuses native value. A failed transfer
    /// changes nothing.
    fn transfer(&mut self, asset: Address, from: Address, to: Address, amount: Amount) -> Result<()>;

    fn approve(&mut self, asset: Address, owner: Address, spender: Address, amount: Amount);

    fn allowance(&self, asset: Address, owner: Address, spender: Address) -> Amount;

    /// Token pull by `spender` against a prior approval.
    fn transfer_from(
        &mut self,
        asset: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()>;
}

/// In-memory ledger.
#[derive(Clone, Debug, Default)]
pub struct InMemoryLedger {
    balances: HashMap<(Address, Address), Amount>,
    allowances: HashMap<(Address, Address, Address), Amount>,
    rejecting: HashSet<Address>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Credit `holder` out of thin air (faucet for tests and simulations).
    pub fn mint(&mut self, asset: Address, holder: Address, amount: Amount) -> Result<()> {
        let balance = self.balance_of(asset, holder);
        let updated = balance.checked_add(&amount).ok_or(NamekitError::Overflow)?;
        self.balances.insert((asset, holder), updated);
        Ok(())
    }

    /// Make `account` refuse (or accept again) incoming native transfers.
    pub fn set_rejects_native(&mut self, account: Address, rejects: bool) {
        if rejects {
            self.rejecting.insert(account);
        } else {
            self.rejecting.remove(&account);
        }
    }

    fn debit_credit(&mut self, asset: Address, from: Address, to: Address, amount: Amount) -> Result<()> {
        if amount.is_negative() {
            return Err(NamekitError::invalid_input("negative transfer amount"));
        }
        if asset.is_zero() && self.rejecting.contains(&to) {
            return Err(NamekitError::TransferRejected { recipient: to });
        }
        let available = self.balance_of(asset, from);
        if !amount.is_within_limit(&available) {
            return Err(NamekitError::PaymentInsufficient {
                required: amount,
                provided: available,
            });
        }
        if from == to {
            return Ok(());
        }
        let from_after = available.checked_sub(&amount).ok_or(NamekitError::Overflow)?;
        let to_after = self
            .balance_of(asset, to)
            .checked_add(&amount)
            .ok_or(NamekitError::Overflow)?;
        self.balances.insert((asset, from), from_after);
        self.balances.insert((asset, to), to_after);
        Ok(())
    }
}

impl AssetLedger for InMemoryLedger {
    fn balance_of(&self, asset: Address, holder: Address) -> Amount {
        self.balances
            .get(&(asset, holder))
            .copied()
            .unwrap_or_default()
    }

    fn transfer(&mut self, asset: Address, from: Address, to: Address, amount: Amount) -> Result<()> {
        self.debit_credit(asset, from, to, amount)
    }

    fn approve(&mut self, asset: Address, owner: Address, spender: Address, amount: Amount) {
        self.allowances.insert((asset, owner, spender), amount);
    }

    fn allowance(&self, asset: Address, owner: Address, spender: Address) -> Amount {
        self.allowances
            .get(&(asset, owner, spender))
            .copied()
            .unwrap_or_default()
    }

    fn transfer_from(
        &mut self,
        asset: Address,
        spender: Address,
        from: Address,
        to: Address,
        amount: Amount,
    ) -> Result<()> {
        let allowed = self.allowance(asset, from, spender);
        if !amount.is_within_limit(&allowed) {
            return Err(NamekitError::PaymentInsufficient {
                required: amount,
                provided: allowed,
            });
        }
        self.debit_credit(asset, from, to, amount)?;
        let remaining = allowed.checked_sub(&amount).ok_or(NamekitError::Overflow)?;
        self.allowances.insert((asset, from, spender), remaining);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn setup() -> (InMemoryLedger, Address, Address, Address) {
        let mut ledger = InMemoryLedger::new();
        let alice = Address::from_label("alice");
        let bob = Address::from_label("bob");
        let token = Address::from_label("honey");
        ledger.mint(Address::NATIVE, alice, Amount::from_units(100)).unwrap();
        ledger.mint(token, alice, Amount::from_units(50)).unwrap();
        (ledger, alice, bob, token)
    }

    #[test]
    fn test_native_transfer() {
        let (mut ledger, alice, bob, _) = setup();
        ledger
            .transfer(Address::NATIVE, alice, bob, Amount::from_units(30))
            .unwrap();
        assert_eq!(ledger.balance_of(Address::NATIVE, alice), Amount::from_units(70));
        assert_eq!(ledger.balance_of(Address::NATIVE, bob), Amount::from_units(30));
    }

    #[test]
    fn test_insufficient_balance_changes_nothing() {
        let (mut ledger, alice, bob, _) = setup();
        let err = ledger
            .transfer(Address::NATIVE, alice, bob, Amount::from_units(101))
            .unwrap_err();
        assert!(matches!(err, NamekitError::PaymentInsufficient { .. }));
        assert_eq!(ledger.balance_of(Address::NATIVE, alice), Amount::from_units(100));
        assert!(ledger.balance_of(Address::NATIVE, bob).is_zero());
    }

    #[test]
    fn test_rejecting_recipient() {
        let (mut ledger, alice, bob, token) = setup();
        ledger.set_rejects_native(bob, true);
        let err = ledger
            .transfer(Address::NATIVE, alice, bob, Amount::from_units(1))
            .unwrap_err();
        assert_eq!(err, NamekitError::TransferRejected { recipient: bob });

        // tokens are unaffected by the native receive hook
        ledger.transfer(token, alice, bob, Amount::from_units(1)).unwrap();

        ledger.set_rejects_native(bob, false);
        ledger
            .transfer(Address::NATIVE, alice, bob, Amount::from_units(1))
            .unwrap();
    }

    #[test]
    fn test_transfer_from_consumes_allowance() {
        let (mut ledger, alice, bob, token) = setup();
        let spender = Address::from_label("registry");

        let err = ledger
            .transfer_from(token, spender, alice, bob, Amount::from_units(10))
            .unwrap_err();
        assert!(matches!(err, NamekitError::PaymentInsufficient { .. }));

        ledger.approve(token, alice, spender, Amount::from_units(25));
        ledger
            .transfer_from(token, spender, alice, bob, Amount::from_units(10))
            .unwrap();
        assert_eq!(ledger.allowance(token, alice, spender), Amount::from_units(15));
        assert_eq!(ledger.balance_of(token, bob), Amount::from_units(10));
    }
}
