//! Quote command - price a name for a lease length

use anyhow::Result;
use namekit_lib::{Address, NamekitConfig};

use crate::ui;

pub fn run(config: &NamekitConfig, text: &str, years: u32, usd_per_unit: &str, as_json: bool) -> Result<()> {
    let oracle = super::offline_oracle(config, usd_per_unit)?;
    let name = super::parse_name(&oracle, text)?;
    let quote = oracle.quote(&name, years, Address::NATIVE)?;
    tracing::debug!(name = %name, years, "quote computed");

    if as_json {
        ui::json(&serde_json::to_value(&quote)?);
        return Ok(());
    }

    ui::header(&format!("Quote for {} ({} year{})", name, years, if years == 1 { "" } else { "s" }));
    ui::key_value("Tier", &format!("{:?}", quote.tier));
    ui::key_value("USD / year", &quote.usd_per_year.to_string());
    ui::key_value("USD total", &quote.usd_total.to_string());
    ui::key_value(
        "Native total",
        &format!("{} (at {} USD/unit)", quote.asset_amount, usd_per_unit),
    );
    Ok(())
}
