//! Namekit library.
//!
//! A registry of leased names built from ASCII letters and emoji, priced by
//! length and composition, with unsold inventory sold through an English
//! auction.
//!
//! # Components
//!
//! - **[`PriceOracle`]**: character validation, yearly USD rates, multi-year
//!   compounding and conversion into payment assets through price feeds
//! - **[`NameRegistry`]**: mint, renew, grace period, pause and whitelist
//!   gates, whois and reverse lookups
//! - **[`AuctionHouse`]**: per-name English auctions with push refunds and
//!   a pull fallback
//! - **[`AddressesProvider`]**: owner-updatable pointers the components use
//!   to find each other
//!
//! Components never hold a reference to each other. A host (see
//! [`Deployment`]) passes the collaborators and an [`AssetLedger`] into each
//! call together with a [`CallContext`].
//!
//! # Example
//!
//! ```
//! use namekit_lib::prelude::*;
//! use std::sync::Arc;
//!
//! let owner = Address::from_label("owner");
//! let alice = Address::from_label("alice");
//! let clock = Arc::new(ManualClock::new(1_700_000_000));
//! let config = NamekitConfig::default().with_start_paused(false);
//!
//! let mut deployment = Deployment::new(owner, config, clock).unwrap();
//! deployment
//!     .set_asset_oracle(owner, Address::NATIVE, Arc::new(FixedPriceFeed::one_usd()))
//!     .unwrap();
//! deployment
//!     .ledger_mut()
//!     .mint(Address::NATIVE, alice, Amount::from_units(100))
//!     .unwrap();
//!
//! let name = Name::from_units(["o", "o", "g", "a"]).unwrap();
//! let id = deployment
//!     .mint_native(alice, Amount::from_units(80), MintRequest::new(name, 1, alice))
//!     .unwrap();
//! assert_eq!(deployment.registry().owner_of(id, deployment.now()), Some(alice));
//! ```

pub mod access;
mod address;
mod amount;
pub mod auction;
pub mod clock;
pub mod config;
mod context;
pub mod deployment;
pub mod emoji;
pub mod errors;
pub mod events;
pub mod ledger;
mod name;
pub mod prelude;
pub mod pricing;
pub mod provider;
pub mod registry;

pub use address::Address;
pub use amount::Amount;
pub use auction::{Auction, AuctionHouse, AuctionStatus, Bid};
pub use config::{NamekitConfig, PricingConfig};
pub use context::CallContext;
pub use deployment::Deployment;
pub use errors::{NamekitError, NamekitErrorCode};
pub use events::Event;
pub use ledger::{AssetLedger, InMemoryLedger};
pub use name::{Name, NameId};
pub use pricing::{PriceOracle, PriceQuote};
pub use provider::{AddressKey, AddressesProvider};
pub use registry::{LeaseRecord, LeaseState, MintRequest, NameRegistry};

/// Common result alias for namekit operations.
pub type Result<T> = std::result::Result<T, NamekitError>;
