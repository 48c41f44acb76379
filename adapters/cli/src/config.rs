//! Loading game configuration files.

use std::{fs, path::Path};

use anyhow::{Context, Result};
use lawn_defence_core::GameConfig;

/// Reads a TOML configuration file. Sections it omits keep their defaults.
pub(crate) fn load(path: &Path) -> Result<GameConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read configuration file {}", path.display()))?;
    parse(&text).with_context(|| format!("failed to parse configuration file {}", path.display()))
}

fn parse(text: &str) -> Result<GameConfig, toml::de::Error> {
    toml::from_str(text)
}
