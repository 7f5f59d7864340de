//! Lease records and their lazily evaluated lifecycle.

use crate::{Address, Name};
use serde::{Deserialize, Serialize};

/// Lifecycle position of a name id at a given instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum LeaseState {
    /// Never minted.
    Unminted,
    /// `now <= expiry`.
    Active,
    /// `expiry < now <= expiry + grace`; only the renew path is open.
    Grace,
    /// `now > expiry + grace`; anyone may mint over the record.
    Lapsed,
}

impl LeaseState {
    /// True when a mint must fail with `AlreadyExists`.
    pub fn blocks_mint(&self) -> bool {
        matches!(self, Self::Active | Self::Grace)
    }

    /// True when a renewal is accepted.
    pub fn renewable(&self) -> bool {
        matches!(self, Self::Active | Self::Grace)
    }
}

/// Ownership record of a leased name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeaseRecord {
    pub name: Name,
    pub owner: Address,
    pub expiry: i64,
    pub metadata_uri: String,
    pub whois: Address,
}

impl LeaseRecord {
    pub fn state(&self, now: i64, grace_period_secs: i64) -> LeaseState {
        if now <= self.expiry {
            LeaseState::Active
        } else if now <= self.expiry.saturating_add(grace_period_secs) {
            LeaseState::Grace
        } else {
            LeaseState::Lapsed
        }
    }

    pub fn is_expired(&self, now: i64) -> bool {
        now > self.expiry
    }
}
