//! Validate command - check a name and show its units and id

use anyhow::Result;
use namekit_lib::pricing::CompositionTier;
use namekit_lib::NamekitConfig;
use serde_json::json;

use crate::ui;

pub fn run(config: &NamekitConfig, text: &str, as_json: bool) -> Result<()> {
    let oracle = super::offline_oracle(config, "1")?;
    let name = super::parse_name(&oracle, text)?;
    let emoji_count = oracle.validate_and_count_emoji(&name)?;
    let tier = CompositionTier::classify(emoji_count, name.len());

    if as_json {
        ui::json(&json!({
            "units": name.units(),
            "id": name.id().to_string(),
            "emoji_count": emoji_count,
            "tier": tier,
        }));
        return Ok(());
    }

    ui::header("Name");
    ui::key_value("Units", &format!("{:?}", name.units()));
    ui::key_value("Length", &name.len().to_string());
    ui::key_value("Emoji", &emoji_count.to_string());
    ui::key_value("Tier", &format!("{:?}", tier));
    ui::key_value("Id", &name.id().to_string());
    ui::success("Name is valid");
    Ok(())
}
