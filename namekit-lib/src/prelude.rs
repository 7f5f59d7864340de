//! Prelude module for convenient imports.
//!
//! ```rust
//! use namekit_lib::prelude::*;
//! ```

// Core types
pub use crate::{Address, Amount, CallContext, Name, NameId};

// Error handling
pub use crate::errors::{NamekitError, NamekitErrorCode};
pub use crate::Result;

// Configuration and time
pub use crate::clock::{Clock, ManualClock, SystemClock};
pub use crate::config::{NamekitConfig, PricingConfig};

// Components
pub use crate::auction::{Auction, AuctionHouse, AuctionStatus, Bid};
pub use crate::deployment::Deployment;
pub use crate::pricing::{CompositionTier, FixedPriceFeed, PriceFeed, PriceOracle, PriceQuote};
pub use crate::provider::{AddressKey, AddressesProvider};
pub use crate::registry::{LeaseRecord, LeaseState, MintRequest, NameRegistry};

// Host
pub use crate::events::Event;
pub use crate::ledger::{AssetLedger, InMemoryLedger};
