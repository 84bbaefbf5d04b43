//! TOML configuration loading for the CLI tools.
//!
//! Every section is optional and falls back to the built-in defaults. Note
//! that a `[rooms.<type>]` table replaces that whole template and a
//! `[prefabs.*]` table set replaces the whole catalog.

use std::fs;
use std::path::Path;

use anyhow::{Context, Result, bail};
use dungeon_core::DungeonConfig;

pub fn parse_config(text: &str) -> Result<DungeonConfig> {
    let config: DungeonConfig = toml::from_str(text).context("Failed to parse dungeon config TOML")?;
    if let Err(err) = config.validate() {
        bail!("Invalid dungeon config: {err:?}");
    }
    Ok(config)
}

/// Reads `path`, or returns the defaults when no path is given.
pub fn load_config(path: Option<&Path>) -> Result<DungeonConfig> {
    let Some(path) = path else {
        return Ok(DungeonConfig::default());
    };
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;
    parse_config(&text).with_context(|| format!("In config file: {}", path.display()))
}

pub fn default_config_toml() -> Result<String> {
    toml::to_string_pretty(&DungeonConfig::default()).context("Failed to render default config")
}
