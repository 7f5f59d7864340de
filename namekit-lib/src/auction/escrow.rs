use crate::{Address, Amount, NamekitError, Result};
use std::collections::HashMap;

/// Balances owed by the auction house whose push transfer failed.
///
/// Credits accumulate per account until the account withdraws.
#[derive(Clone, Debug, Default)]
pub struct RefundEscrow {
    owed: HashMap<Address, Amount>,
}

impl RefundEscrow {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn credit(&mut self, account: Address, amount: Amount) -> Result<()> {
        let current = self.pending(account);
        let updated = current.checked_add(&amount).ok_or(NamekitError::Overflow)?;
        self.owed.insert(account, updated);
        Ok(())
    }

    pub fn pending(&self, account: Address) -> Amount {
        self.owed.get(&account).copied().unwrap_or_default()
    }

    /// Removes and returns the whole balance of `account`.
    pub fn take(&mut self, account: Address) -> Result<Amount> {
        match self.owed.remove(&account) {
            Some(amount) if !amount.is_zero() => Ok(amount),
            _ => Err(NamekitError::NothingToWithdraw { account }),
        }
    }

    /// Total owed across all accounts.
    pub fn total(&self) -> Result<Amount> {
        self.owed
            .values()
            .try_fold(Amount::zero(), |acc, v| acc.checked_add(v))
            .ok_or(NamekitError::Overflow)
    }
}
