//! Config command - print the effective configuration

use anyhow::Result;
use namekit_lib::NamekitConfig;

use crate::ui;

pub fn run(config: &NamekitConfig) -> Result<()> {
    ui::json(&serde_json::to_value(config)?);
    Ok(())
}
