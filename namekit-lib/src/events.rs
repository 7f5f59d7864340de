//! Domain events emitted by state-changing entrypoints.

use crate::{Address, Amount, NameId};
use serde::{Deserialize, Serialize};

/// Observable record of a committed state change.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Event {
    EmojisRegistered {
        added: usize,
    },
    AssetOracleSet {
        asset: Address,
    },
    Minted {
        id: NameId,
        name: String,
        owner: Address,
        expiry: i64,
        asset: Address,
        price: Amount,
    },
    Renewed {
        id: NameId,
        expiry: i64,
        asset: Address,
        price: Amount,
    },
    Transferred {
        id: NameId,
        from: Address,
        to: Address,
    },
    WhoisUpdated {
        id: NameId,
        whois: Address,
    },
    MetadataUpdated {
        id: NameId,
        uri: String,
    },
    PauseToggled {
        paused: bool,
    },
    WhitelistToggled {
        enabled: bool,
    },
    WhitelistUpdated {
        account: Address,
        allowed: bool,
    },
    AuctionCreated {
        id: NameId,
        start: i64,
        end: i64,
        start_price: Amount,
    },
    BidPlaced {
        id: NameId,
        bidder: Address,
        amount: Amount,
    },
    RefundDeferred {
        account: Address,
        amount: Amount,
    },
    RefundWithdrawn {
        account: Address,
        amount: Amount,
    },
    Claimed {
        id: NameId,
        winner: Address,
        amount: Amount,
    },
    Reclaimed {
        id: NameId,
        owner: Address,
    },
    AddressUpdated {
        key: String,
        address: Address,
    },
    OwnershipTransferred {
        previous: Address,
        new: Address,
    },
}

impl Event {
    /// Short event name, as used in logs and the CLI.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmojisRegistered { .. } => "EmojisRegistered",
            Self::AssetOracleSet { .. } => "AssetOracleSet",
            Self::Minted { .. } => "Minted",
            Self::Renewed { .. } => "Renewed",
            Self::Transferred { .. } => "Transferred",
            Self::WhoisUpdated { .. } => "WhoisUpdated",
            Self::MetadataUpdated { .. } => "MetadataUpdated",
            Self::PauseToggled { .. } => "PauseToggled",
            Self::WhitelistToggled { .. } => "WhitelistToggled",
            Self::WhitelistUpdated { .. } => "WhitelistUpdated",
            Self::AuctionCreated { .. } => "AuctionCreated",
            Self::BidPlaced { .. } => "BidPlaced",
            Self::RefundDeferred { .. } => "RefundDeferred",
            Self::RefundWithdrawn { .. } => "RefundWithdrawn",
            Self::Claimed { .. } => "Claimed",
            Self::Reclaimed { .. } => "Reclaimed",
            Self::AddressUpdated { .. } => "AddressUpdated",
            Self::OwnershipTransferred { .. } => "OwnershipTransferred",
        }
    }
}

/// Append-only event buffer owned by a component.
#[derive(Debug, Clone, Default)]
pub struct EventLog {
    events: Vec<Event>,
}

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, event: Event) {
        tracing::trace!(kind = event.kind(), "event");
        self.events.push(event);
    }

    pub fn iter(&self) -> impl Iterator<Item = &Event> {
        self.events.iter()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Remove and return everything emitted so far.
    pub fn take(&mut self) -> Vec<Event> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_take_drains() {
        let mut log = EventLog::new();
        log.emit(Event::PauseToggled { paused: false });
        log.emit(Event::WhitelistToggled { enabled: true });
        assert_eq!(log.len(), 2);

        let drained = log.take();
        assert_eq!(drained.len(), 2);
        assert_eq!(drained[0].kind(), "PauseToggled");
        assert!(log.is_empty());
    }

    #[test]
    fn test_event_json_is_tagged() {
        let json = serde_json::to_value(Event::PauseToggled { paused: true }).unwrap();
        assert_eq!(json["type"], "PauseToggled");
        assert_eq!(json["paused"], true);
    }
}
