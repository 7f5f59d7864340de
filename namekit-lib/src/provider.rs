//! Addresses provider: owner-updatable pointers to the deployed components.
//!
//! Components resolve their peers through this indirection on every call,
//! so repointing a key takes effect immediately.
//!
//! # Thread Safety
//!
//! The provider is shared behind an `Arc` and uses `RwLock` internally. A
//! poisoned lock is recovered rather than propagated; the guarded data is
//! plain values that cannot be left half-written.

use crate::access::Ownable;
use crate::events::{Event, EventLog};
use crate::{Address, CallContext, NamekitError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::sync::{Mutex, RwLock};

/// Well-known slots in the provider.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AddressKey {
    Registry,
    PriceOracle,
    FundsManager,
    AuctionHouse,
    Team,
    Foundation,
    Treasury,
}

impl AddressKey {
    pub const ALL: [AddressKey; 7] = [
        Self::Registry,
        Self::PriceOracle,
        Self::FundsManager,
        Self::AuctionHouse,
        Self::Team,
        Self::Foundation,
        Self::Treasury,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registry => "REGISTRY",
            Self::PriceOracle => "PRICE_ORACLE",
            Self::FundsManager => "FUNDS_MANAGER",
            Self::AuctionHouse => "AUCTION_HOUSE",
            Self::Team => "TEAM",
            Self::Foundation => "FOUNDATION",
            Self::Treasury => "TREASURY",
        }
    }

    fn label(&self) -> &'static str {
        match self {
            Self::Registry => "registry",
            Self::PriceOracle => "price oracle",
            Self::FundsManager => "funds manager",
            Self::AuctionHouse => "auction house",
            Self::Team => "team",
            Self::Foundation => "foundation",
            Self::Treasury => "treasury",
        }
    }
}

impl fmt::Display for AddressKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Key-value store of component addresses.
pub struct AddressesProvider {
    ownable: RwLock<Ownable>,
    addresses: RwLock<HashMap<AddressKey, Address>>,
    events: Mutex<EventLog>,
}

impl AddressesProvider {
    pub fn new(owner: Address) -> Self {
        Self {
            ownable: RwLock::new(Ownable::new(owner)),
            addresses: RwLock::new(HashMap::new()),
            events: Mutex::new(EventLog::new()),
        }
    }

    pub fn owner(&self) -> Address {
        self.ownable.read().unwrap_or_else(|e| e.into_inner()).owner()
    }

    pub fn transfer_ownership(&self, ctx: &CallContext, new_owner: Address) -> Result<()> {
        let previous = self
            .ownable
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .transfer(ctx.caller, new_owner)?;
        self.emit(Event::OwnershipTransferred {
            previous,
            new: new_owner,
        });
        Ok(())
    }

    /// Points `key` at `address`. Owner only.
    pub fn set(&self, ctx: &CallContext, key: AddressKey, address: Address) -> Result<()> {
        self.ownable
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .ensure_owner(ctx.caller)?;
        self.addresses
            .write()
            .unwrap_or_else(|e| e.into_inner())
            .insert(key, address);
        tracing::debug!(%key, %address, "address updated");
        self.emit(Event::AddressUpdated {
            key: key.as_str().to_string(),
            address,
        });
        Ok(())
    }

    /// Current address for `key`, or the zero address when unset.
    pub fn get(&self, key: AddressKey) -> Address {
        self.addresses
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .get(&key)
            .copied()
            .unwrap_or(Address::ZERO)
    }

    /// Current address for `key`, failing with `ZeroAddress` when unset.
    pub fn require(&self, key: AddressKey) -> Result<Address> {
        let address = self.get(key);
        if address.is_zero() {
            return Err(NamekitError::ZeroAddress(key.label()));
        }
        Ok(address)
    }

    pub fn registry(&self) -> Address {
        self.get(AddressKey::Registry)
    }

    pub fn price_oracle(&self) -> Address {
        self.get(AddressKey::PriceOracle)
    }

    pub fn funds_manager(&self) -> Address {
        self.get(AddressKey::FundsManager)
    }

    pub fn auction_house(&self) -> Address {
        self.get(AddressKey::AuctionHouse)
    }

    /// Snapshot of every set key.
    pub fn entries(&self) -> Vec<(AddressKey, Address)> {
        let addresses = self.addresses.read().unwrap_or_else(|e| e.into_inner());
        AddressKey::ALL
            .iter()
            .filter_map(|key| addresses.get(key).map(|addr| (*key, *addr)))
            .collect()
    }

    pub fn take_events(&self) -> Vec<Event> {
        self.events.lock().unwrap_or_else(|e| e.into_inner()).take()
    }

    fn emit(&self, event: Event) {
        self.events
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .emit(event);
    }
}
