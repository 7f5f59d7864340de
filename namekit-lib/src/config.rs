//! Configuration for the registry, pricing and auction components.

use crate::{NamekitError, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Number of length buckets in the base rate table (1, 2, 3, 4, 5+).
pub const LENGTH_BUCKETS: usize = 5;

/// Pricing curve parameters.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct PricingConfig {
    /// USD per year for names of length 1, 2, 3, 4 and 5 or more.
    #[serde(default = "default_base_rates")]
    pub base_rates_usd: [u64; LENGTH_BUCKETS],

    /// Premium when every unit is an emoji.
    #[serde(default = "default_all_emoji_premium")]
    pub all_emoji_premium_percent: u32,

    /// Premium when some but not all units are emoji.
    #[serde(default = "default_mixed_emoji_premium")]
    pub mixed_emoji_premium_percent: u32,

    /// Compounding surcharge applied to each year beyond the first.
    #[serde(default = "default_yearly_surcharge")]
    pub yearly_surcharge_percent: u32,

    /// Decimal places kept when converting USD into a payment asset.
    #[serde(default = "default_asset_decimals")]
    pub asset_decimals: u32,
}

fn default_base_rates() -> [u64; LENGTH_BUCKETS] {
    [420, 269, 169, 80, 25]
}

fn default_all_emoji_premium() -> u32 {
    69
}

fn default_mixed_emoji_premium() -> u32 {
    25
}

fn default_yearly_surcharge() -> u32 {
    10
}

fn default_asset_decimals() -> u32 {
    18
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            base_rates_usd: default_base_rates(),
            all_emoji_premium_percent: default_all_emoji_premium(),
            mixed_emoji_premium_percent: default_mixed_emoji_premium(),
            yearly_surcharge_percent: default_yearly_surcharge(),
            asset_decimals: default_asset_decimals(),
        }
    }
}

impl PricingConfig {
    /// Set the base rate table.
    pub fn with_base_rates(mut self, rates: [u64; LENGTH_BUCKETS]) -> Self {
        self.base_rates_usd = rates;
        self
    }

    /// Set the yearly surcharge.
    pub fn with_yearly_surcharge(mut self, percent: u32) -> Self {
        self.yearly_surcharge_percent = percent;
        self
    }

    /// Base rate for a name of `len` units.
    pub fn base_rate_for_len(&self, len: usize) -> Option<u64> {
        if len == 0 {
            return None;
        }
        let bucket = len.min(LENGTH_BUCKETS) - 1;
        Some(self.base_rates_usd[bucket])
    }

    fn validate(&self) -> Result<()> {
        if self.base_rates_usd.windows(2).any(|w| w[0] <= w[1]) {
            return Err(NamekitError::Config(
                "base rates must strictly decrease with length".into(),
            ));
        }
        if self.base_rates_usd[LENGTH_BUCKETS - 1] == 0 {
            return Err(NamekitError::Config("base rates must be positive".into()));
        }
        // rust_decimal carries 28 fractional digits at most
        if self.asset_decimals > 28 {
            return Err(NamekitError::Config(format!(
                "asset_decimals {} exceeds 28",
                self.asset_decimals
            )));
        }
        Ok(())
    }
}

/// Top-level configuration.
///
/// # Examples
///
/// ```rust
/// use namekit_lib::NamekitConfig;
///
/// let config = NamekitConfig::from_json_str(r#"{ "start_paused": false }"#).unwrap();
/// assert!(!config.start_paused);
/// assert_eq!(config.grace_period_secs, 30 * 24 * 60 * 60);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NamekitConfig {
    /// Window after expiry during which the owner may still renew.
    #[serde(default = "default_grace_period")]
    pub grace_period_secs: i64,

    /// Length of one lease year.
    #[serde(default = "default_seconds_per_year")]
    pub seconds_per_year: i64,

    /// Longest lease accepted by mint and renew.
    #[serde(default = "default_max_lease_years")]
    pub max_lease_years: u32,

    /// Shortest auction window.
    #[serde(default = "default_min_auction_window")]
    pub min_auction_window_secs: i64,

    /// Lease granted to auction inventory and to auction winners.
    #[serde(default = "default_inventory_lease_years")]
    pub inventory_lease_years: u32,

    /// Whether a new registry starts paused.
    #[serde(default = "default_start_paused")]
    pub start_paused: bool,

    #[serde(default)]
    pub pricing: PricingConfig,
}

fn default_grace_period() -> i64 {
    30 * 24 * 60 * 60
}

fn default_seconds_per_year() -> i64 {
    365 * 24 * 60 * 60
}

fn default_max_lease_years() -> u32 {
    100
}

fn default_min_auction_window() -> i64 {
    24 * 60 * 60
}

fn default_inventory_lease_years() -> u32 {
    1
}

fn default_start_paused() -> bool {
    true
}

impl Default for NamekitConfig {
    fn default() -> Self {
        Self {
            grace_period_secs: default_grace_period(),
            seconds_per_year: default_seconds_per_year(),
            max_lease_years: default_max_lease_years(),
            min_auction_window_secs: default_min_auction_window(),
            inventory_lease_years: default_inventory_lease_years(),
            start_paused: default_start_paused(),
            pricing: PricingConfig::default(),
        }
    }
}

impl NamekitConfig {
    /// Parse and validate a JSON document.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let raw = std::fs::read_to_string(path)
            .map_err(|e| NamekitError::Config(format!("{}: {}", path.display(), e)))?;
        Self::from_json_str(&raw)
    }

    /// Set the grace period.
    pub fn with_grace_period(mut self, secs: i64) -> Self {
        self.grace_period_secs = secs;
        self
    }

    /// Set whether the registry starts paused.
    pub fn with_start_paused(mut self, paused: bool) -> Self {
        self.start_paused = paused;
        self
    }

    /// Set the maximum lease length.
    pub fn with_max_lease_years(mut self, years: u32) -> Self {
        self.max_lease_years = years;
        self
    }

    /// Set the pricing parameters.
    pub fn with_pricing(mut self, pricing: PricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// Lease length in seconds for `years`, or None on overflow.
    pub fn lease_secs(&self, years: u32) -> Option<i64> {
        self.seconds_per_year.checked_mul(i64::from(years))
    }

    pub fn validate(&self) -> Result<()> {
        if self.grace_period_secs < 0 {
            return Err(NamekitError::Config("grace_period_secs must not be negative".into()));
        }
        if self.seconds_per_year <= 0 {
            return Err(NamekitError::Config("seconds_per_year must be positive".into()));
        }
        if self.max_lease_years == 0 {
            return Err(NamekitError::Config("max_lease_years must be at least 1".into()));
        }
        if self.inventory_lease_years == 0 || self.inventory_lease_years > self.max_lease_years {
            return Err(NamekitError::Config(
                "inventory_lease_years must be within 1..=max_lease_years".into(),
            ));
        }
        if self.min_auction_window_secs < 0 {
            return Err(NamekitError::Config(
                "min_auction_window_secs must not be negative".into(),
            ));
        }
        if self.lease_secs(self.max_lease_years).is_none() {
            return Err(NamekitError::Config("max_lease_years overflows".into()));
        }
        self.pricing.validate()
    }
}
