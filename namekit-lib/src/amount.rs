//! Fixed-point money type used for USD prices and asset amounts.
//!
//! **NEVER use f64 for prices!** All arithmetic goes through `Decimal`
//! with checked operations, and amounts serialize as strings.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Amount of USD or of a payment asset, in whole units with fractional precision.
///
/// # Examples
///
/// ```rust
/// use namekit_lib::Amount;
///
/// let a = Amount::from_units(80);
/// let b = Amount::from_units(20);
/// assert_eq!(a.checked_add(&b).unwrap(), Amount::from_units(100));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Amount {
    value: Decimal,
}

impl Amount {
    /// Create from a whole number of units.
    pub fn from_units(units: i64) -> Self {
        Self {
            value: Decimal::from(units),
        }
    }

    /// Wrap a Decimal value.
    pub fn from_decimal(value: Decimal) -> Self {
        Self { value }
    }

    /// Create from decimal string (e.g., "80.5")
    ///
    /// # Errors
    ///
    /// Returns an error if the string is not a valid decimal.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use namekit_lib::Amount;
    /// let amt = Amount::from_str_checked("176.80").unwrap();
    /// assert_eq!(amt.to_string(), "176.80");
    /// ```
    pub fn from_str_checked(s: &str) -> Result<Self, String> {
        Decimal::from_str(s)
            .map(|value| Self { value })
            .map_err(|e| format!("Invalid amount: {}", e))
    }

    /// Get zero amount
    pub fn zero() -> Self {
        Self {
            value: Decimal::ZERO,
        }
    }

    /// Check if amount is zero
    pub fn is_zero(&self) -> bool {
        self.value.is_zero()
    }

    /// Check if amount is strictly negative
    pub fn is_negative(&self) -> bool {
        self.value.is_sign_negative() && !self.value.is_zero()
    }

    /// Get the internal Decimal value.
    pub fn as_decimal(&self) -> Decimal {
        self.value
    }

    /// Checked addition (returns None on overflow)
    pub fn checked_add(&self, other: &Self) -> Option<Self> {
        self.value
            .checked_add(other.value)
            .map(|value| Self { value })
    }

    /// Checked subtraction (returns None on overflow)
    ///
    /// Decimal allows negative results; callers that need a floor at zero
    /// should compare first.
    pub fn checked_sub(&self, other: &Self) -> Option<Self> {
        self.value
            .checked_sub(other.value)
            .map(|value| Self { value })
    }

    /// Checked multiplication by a decimal factor.
    pub fn checked_mul(&self, factor: Decimal) -> Option<Self> {
        self.value.checked_mul(factor).map(|value| Self { value })
    }

    /// Checked division by a decimal divisor (None on zero or overflow).
    pub fn checked_div(&self, divisor: Decimal) -> Option<Self> {
        if divisor.is_zero() {
            return None;
        }
        self.value.checked_div(divisor).map(|value| Self { value })
    }

    /// Add a percentage of this amount to itself.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use namekit_lib::Amount;
    /// use rust_decimal_macros::dec;
    ///
    /// let base = Amount::from_units(100);
    /// assert_eq!(base.with_premium(dec!(69)).unwrap(), Amount::from_units(169));
    /// ```
    pub fn with_premium(&self, percent: Decimal) -> Option<Self> {
        let factor = Decimal::ONE.checked_add(percent.checked_div(Decimal::ONE_HUNDRED)?)?;
        self.checked_mul(factor)
    }

    /// Round to `dp` decimal places (banker's rounding, as `Decimal::round_dp`).
    pub fn round_dp(&self, dp: u32) -> Self {
        Self {
            value: self.value.round_dp(dp),
        }
    }

    /// Check if this amount is less than or equal to another
    pub fn is_within_limit(&self, limit: &Self) -> bool {
        self.value <= limit.value
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.value)
    }
}

impl FromStr for Amount {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_str_checked(s)
    }
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Self::from_decimal(value)
    }
}
