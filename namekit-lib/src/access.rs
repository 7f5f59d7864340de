//! Owner gate shared by every component.

use crate::{Address, NamekitError, Result};

/// Single-owner access control.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Ownable {
    owner: Address,
}

impl Ownable {
    pub fn new(owner: Address) -> Self {
        Self { owner }
    }

    pub fn owner(&self) -> Address {
        self.owner
    }

    /// Fails with `AccessDenied` unless `caller` is the owner.
    pub fn ensure_owner(&self, caller: Address) -> Result<()> {
        if caller != self.owner {
            return Err(NamekitError::AccessDenied { caller });
        }
        Ok(())
    }

    /// Hands the owner role to `new_owner`, returning the previous owner.
    pub fn transfer(&mut self, caller: Address, new_owner: Address) -> Result<Address> {
        self.ensure_owner(caller)?;
        if new_owner.is_zero() {
            return Err(NamekitError::ZeroAddress("new owner"));
        }
        let previous = self.owner;
        self.owner = new_owner;
        Ok(previous)
    }
}
