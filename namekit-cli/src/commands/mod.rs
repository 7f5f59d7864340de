//! CLI command implementations

pub mod config;
pub mod quote;
pub mod simulate;
pub mod validate;

use anyhow::{anyhow, Context, Result};
use namekit_lib::pricing::{FixedPriceFeed, PriceOracle};
use namekit_lib::{Address, Amount, Name, NamekitConfig};
use std::path::Path;
use std::sync::Arc;

/// Owner of the throwaway oracle used by offline commands
pub const CLI_OWNER_LABEL: &str = "namekit.cli";

/// Load configuration from `path`, or the defaults
pub fn load_config(path: Option<&Path>) -> Result<NamekitConfig> {
    match path {
        Some(path) => NamekitConfig::from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display())),
        None => Ok(NamekitConfig::default()),
    }
}

/// Oracle with the default emoji seed and a native feed at `usd_per_unit`
pub fn offline_oracle(config: &NamekitConfig, usd_per_unit: &str) -> Result<PriceOracle> {
    let owner = Address::from_label(CLI_OWNER_LABEL);
    let mut oracle = PriceOracle::new(owner, config);
    let feed = parse_feed(usd_per_unit)?;
    oracle.set_asset_oracle(
        &namekit_lib::CallContext::new(owner, 0),
        Address::NATIVE,
        Arc::new(feed),
    )?;
    Ok(oracle)
}

/// Parse a USD price such as "1" or "2.5" into an 8-decimal feed
pub fn parse_feed(usd_per_unit: &str) -> Result<FixedPriceFeed> {
    let price = Amount::from_str_checked(usd_per_unit).map_err(|e| anyhow!(e))?;
    FixedPriceFeed::from_usd(price, 8)
        .map(|feed| feed.with_description(format!("{} USD", usd_per_unit)))
        .ok_or_else(|| anyhow!("feed price {} out of range", usd_per_unit))
}

/// Split `text` into units with the oracle's emoji set
pub fn parse_name(oracle: &PriceOracle, text: &str) -> Result<Name> {
    oracle
        .segment(text)
        .with_context(|| format!("cannot build a name from {:?}", text))
}
