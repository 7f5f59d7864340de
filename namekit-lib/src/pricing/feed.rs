//! Exchange-rate sources for payment assets.

use crate::Amount;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use std::sync::atomic::{AtomicI64, Ordering};

/// USD price of one unit of an asset, as a scaled integer.
///
/// `latest_answer() / 10^decimals()` is the USD value of one whole unit.
/// Implementations must be cheap and side-effect free; the oracle reads
/// them on every quote.
pub trait PriceFeed: Send + Sync {
    fn decimals(&self) -> u32;

    fn latest_answer(&self) -> i128;

    /// Human-readable feed description.
    fn description(&self) -> String {
        String::from("price feed")
    }
}

/// Feed with an operator-set answer.
#[derive(Debug)]
pub struct FixedPriceFeed {
    decimals: u32,
    answer: AtomicI64,
    description: String,
}

impl FixedPriceFeed {
    pub fn new(decimals: u32, answer: i64) -> Self {
        Self {
            decimals,
            answer: AtomicI64::new(answer),
            description: format!("fixed/{}", decimals),
        }
    }

    /// One USD per unit at 8 decimals.
    pub fn one_usd() -> Self {
        Self::new(8, 100_000_000)
    }

    /// Feed answering `price` USD per unit at `decimals` precision.
    ///
    /// Returns None when the scaled answer does not fit an `i64`.
    pub fn from_usd(price: Amount, decimals: u32) -> Option<Self> {
        let scale = Decimal::try_from_i128_with_scale(10i128.checked_pow(decimals)?, 0).ok()?;
        let answer = price.as_decimal().checked_mul(scale)?.trunc().to_i64()?;
        Some(Self::new(decimals, answer))
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn set_answer(&self, answer: i64) {
        self.answer.store(answer, Ordering::SeqCst);
    }
}

impl PriceFeed for FixedPriceFeed {
    fn decimals(&self) -> u32 {
        self.decimals
    }

    fn latest_answer(&self) -> i128 {
        i128::from(self.answer.load(Ordering::SeqCst))
    }

    fn description(&self) -> String {
        self.description.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_feed() {
        let feed = FixedPriceFeed::one_usd();
        assert_eq!(feed.decimals(), 8);
        assert_eq!(feed.latest_answer(), 100_000_000);

        feed.set_answer(250_000_000);
        assert_eq!(feed.latest_answer(), 250_000_000);
        assert_eq!(feed.description(), "fixed/8");
    }

    #[test]
    fn test_from_usd() {
        let feed = FixedPriceFeed::from_usd(Amount::from_str_checked("2.5").unwrap(), 8).unwrap();
        assert_eq!(feed.latest_answer(), 250_000_000);
        assert!(FixedPriceFeed::from_usd(Amount::from_units(1), 40).is_none());
    }
}
