//! On-disk settings, merged with command-line overrides in `main`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use byteweave_core::{ConcatConfig, Delimiter};
use serde::Deserialize;

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub prefix: String,
    pub timeout_us: u64,
    pub delimiter: Option<String>,
    pub display_format: Option<String>,
}

impl Settings {
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("byteweave").join("config.json"))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let text =
            std::fs::read_to_string(path).with_context(|| format!("reading {}", path.display()))?;
        serde_json::from_str(&text).with_context(|| format!("parsing {}", path.display()))
    }

    pub fn into_config(self) -> ConcatConfig {
        ConcatConfig {
            delimiter: self
                .delimiter
                .as_deref()
                .map(parse_delimiter)
                .unwrap_or_default(),
            timeout: Duration::from_micros(self.timeout_us),
            display_format: self
                .display_format
                .as_deref()
                .and_then(|s| s.parse().ok())
                .unwrap_or_default(),
            prefix: self.prefix,
        }
    }
}

/// Named choice, or a custom delimiter byte written as `0xNN`.
/// Malformed input falls back to the default choice.
pub fn parse_delimiter(s: &str) -> Delimiter {
    if let Some(hex_str) = s.strip_prefix("0x") {
        match hex::decode(hex_str).ok().as_deref() {
            Some([byte]) => Delimiter::Custom(*byte as char),
            _ => Delimiter::default(),
        }
    } else {
        s.parse().unwrap_or_default()
    }
}
