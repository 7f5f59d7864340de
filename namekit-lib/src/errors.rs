//! Error types for namekit operations.
//!
//! Every entrypoint either applies all of its effects or fails with one of
//! these variants and leaves state untouched. Variants carry the arguments a
//! client needs to explain the rejection (offending timestamp, address, id).

use crate::{Address, Amount, NameId};

/// Stable numeric error codes for clients that cannot match on the enum.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(i32)]
pub enum NamekitErrorCode {
    /// Caller is not allowed to invoke an owner-gated entrypoint
    AccessDenied = 1000,
    /// Caller does not own the lease it tries to modify
    NotOwner = 1001,
    /// Registry is paused
    Paused = 1002,
    /// Whitelist mode is on and caller is not listed
    NotWhitelisted = 1003,
    /// Name is still leased (active or in grace)
    AlreadyExists = 2000,
    /// No live lease for the name
    NoEntity = 2001,
    /// Duration below one year
    LeaseTooShort = 2002,
    /// Duration above the configured maximum
    LeaseTooLong = 2003,
    /// Name contains a rejected character unit
    InvalidCharacter = 3000,
    /// Malformed input or unsupported pricing case
    InvalidInput = 3001,
    /// No price feed registered for the asset
    UnsupportedAsset = 4000,
    /// Price feed returned an unusable answer
    InvalidPriceFeed = 4001,
    /// Attached or approved payment is too small
    PaymentInsufficient = 4002,
    /// Recipient refused a native transfer
    TransferRejected = 4003,
    /// Nothing deferred for this account
    NothingToWithdraw = 4004,
    /// No auction for the name
    AuctionNotFound = 5000,
    /// Auction window has not opened
    AuctionNotStarted = 5001,
    /// Auction window has closed
    AuctionFinished = 5002,
    /// Auction window is still open
    AuctionNotFinished = 5003,
    /// Auction already claimed or reclaimed
    AuctionSettled = 5004,
    /// A required address is the zero address
    ZeroAddress = 5005,
    /// Arithmetic overflow
    Overflow = 9000,
    /// Invalid configuration
    Config = 9001,
    /// Serialization error
    Serialization = 9002,
}

/// Error type for all registry, pricing and auction operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum NamekitError {
    #[error("access denied for {caller}")]
    AccessDenied { caller: Address },

    #[error("{caller} does not own {id}")]
    NotOwner { id: NameId, caller: Address },

    #[error("registry is paused")]
    Paused,

    #[error("{caller} is not whitelisted")]
    NotWhitelisted { caller: Address },

    #[error("{id} already exists")]
    AlreadyExists { id: NameId },

    #[error("no live lease for {id}")]
    NoEntity { id: NameId },

    #[error("lease too short: {years} years")]
    LeaseTooShort { years: u32 },

    #[error("lease too long: {years} years (max {max})")]
    LeaseTooLong { years: u32, max: u32 },

    #[error("invalid character {unit:?} at position {index}")]
    InvalidCharacter { index: usize, unit: String },

    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("unsupported asset {asset}")]
    UnsupportedAsset { asset: Address },

    #[error("invalid price feed for {asset}: {reason}")]
    InvalidPriceFeed { asset: Address, reason: String },

    #[error("payment insufficient: need {required}, got {provided}")]
    PaymentInsufficient { required: Amount, provided: Amount },

    #[error("transfer rejected by {recipient}")]
    TransferRejected { recipient: Address },

    #[error("nothing to withdraw for {account}")]
    NothingToWithdraw { account: Address },

    #[error("auction not found for {id}")]
    AuctionNotFound { id: NameId },

    #[error("auction for {id} starts at {start}, now {now}")]
    AuctionNotStarted { id: NameId, start: i64, now: i64 },

    #[error("auction for {id} finished at {end}, now {now}")]
    AuctionFinished { id: NameId, end: i64, now: i64 },

    #[error("auction for {id} runs until {end}, now {now}")]
    AuctionNotFinished { id: NameId, end: i64, now: i64 },

    #[error("auction for {id} is already settled")]
    AuctionSettled { id: NameId },

    #[error("zero address: {0}")]
    ZeroAddress(&'static str),

    #[error("arithmetic overflow")]
    Overflow,

    #[error("invalid configuration: {0}")]
    Config(String),

    #[error("serialization error: {0}")]
    Serialization(String),
}

impl NamekitError {
    /// Get the stable error code.
    pub fn code(&self) -> NamekitErrorCode {
        match self {
            Self::AccessDenied { .. } => NamekitErrorCode::AccessDenied,
            Self::NotOwner { .. } => NamekitErrorCode::NotOwner,
            Self::Paused => NamekitErrorCode::Paused,
            Self::NotWhitelisted { .. } => NamekitErrorCode::NotWhitelisted,
            Self::AlreadyExists { .. } => NamekitErrorCode::AlreadyExists,
            Self::NoEntity { .. } => NamekitErrorCode::NoEntity,
            Self::LeaseTooShort { .. } => NamekitErrorCode::LeaseTooShort,
            Self::LeaseTooLong { .. } => NamekitErrorCode::LeaseTooLong,
            Self::InvalidCharacter { .. } => NamekitErrorCode::InvalidCharacter,
            Self::InvalidInput(_) => NamekitErrorCode::InvalidInput,
            Self::UnsupportedAsset { .. } => NamekitErrorCode::UnsupportedAsset,
            Self::InvalidPriceFeed { .. } => NamekitErrorCode::InvalidPriceFeed,
            Self::PaymentInsufficient { .. } => NamekitErrorCode::PaymentInsufficient,
            Self::TransferRejected { .. } => NamekitErrorCode::TransferRejected,
            Self::NothingToWithdraw { .. } => NamekitErrorCode::NothingToWithdraw,
            Self::AuctionNotFound { .. } => NamekitErrorCode::AuctionNotFound,
            Self::AuctionNotStarted { .. } => NamekitErrorCode::AuctionNotStarted,
            Self::AuctionFinished { .. } => NamekitErrorCode::AuctionFinished,
            Self::AuctionNotFinished { .. } => NamekitErrorCode::AuctionNotFinished,
            Self::AuctionSettled { .. } => NamekitErrorCode::AuctionSettled,
            Self::ZeroAddress(_) => NamekitErrorCode::ZeroAddress,
            Self::Overflow => NamekitErrorCode::Overflow,
            Self::Config(_) => NamekitErrorCode::Config,
            Self::Serialization(_) => NamekitErrorCode::Serialization,
        }
    }

    /// Get the error message as an owned String.
    pub fn message(&self) -> String {
        self.to_string()
    }

    /// Create an invalid input error.
    pub fn invalid_input(reason: impl Into<String>) -> Self {
        Self::InvalidInput(reason.into())
    }

    /// Returns true for rejections caused by the auction timeline.
    pub fn is_auction_phase(&self) -> bool {
        matches!(
            self,
            Self::AuctionNotStarted { .. }
                | Self::AuctionFinished { .. }
                | Self::AuctionNotFinished { .. }
                | Self::AuctionSettled { .. }
        )
    }
}

impl From<serde_json::Error> for NamekitError {
    fn from(err: serde_json::Error) -> Self {
        Self::Serialization(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_codes() {
        let err = NamekitError::LeaseTooShort { years: 0 };
        assert_eq!(err.code(), NamekitErrorCode::LeaseTooShort);
        assert_eq!(err.code() as i32, 2002);
    }

    #[test]
    fn test_error_display_carries_context() {
        let err = NamekitError::PaymentInsufficient {
            required: Amount::from_units(80),
            provided: Amount::from_units(79),
        };
        let msg = err.to_string();
        assert!(msg.contains("80"));
        assert!(msg.contains("79"));

        let err = NamekitError::AuctionFinished {
            id: NameId::from_bytes([1u8; 32]),
            end: 100,
            now: 150,
        };
        assert!(err.to_string().contains("150"));
        assert!(err.is_auction_phase());
    }

    #[test]
    fn test_helper_constructors() {
        let err = NamekitError::invalid_input("end must be later than now");
        assert_eq!(err.code(), NamekitErrorCode::InvalidInput);
        assert_eq!(err.message(), "invalid input: end must be later than now");
    }
}
