//! Run configuration.
//!
//! Settings are layered, later layers winning:
//!
//! 1. Stock defaults ([`FeedConfig::default`])
//! 2. A `config.toml` file: the path given with `--config`, otherwise
//!    `config.toml` inside the source directory when it exists
//! 3. Command-line flags ([`ConfigOverrides`])
//!
//! ## Configuration Options
//!
//! ```toml
//! # All options are optional except site_url, which must be set here or
//! # with --site-url.
//!
//! count = 10                 # Files published per run
//! mode = "rotate"            # "rotate" (daily window) or "random"
//! site_url = "https://owner.github.io/repo"
//!
//! [channel]
//! title = "Daily Yoto Mix"
//! description = "Rotating daily subset of my MP3s for Yoto"
//! ```
//!
//! Config files are sparse; unknown keys are rejected to catch typos early.

use crate::types::{Channel, SelectionMode};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
    #[error("Config validation error: {0}")]
    Validation(String),
}

/// Name of the config file looked up in the source directory.
pub const CONFIG_FILENAME: &str = "config.toml";

/// Run configuration loaded from `config.toml` and CLI flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FeedConfig {
    /// Number of files to publish. Zero or negative publishes none.
    pub count: i64,
    /// Selection mode.
    pub mode: SelectionMode,
    /// Base URL the output directory is served from.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub site_url: Option<String>,
    /// RSS channel metadata.
    pub channel: ChannelConfig,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            count: 10,
            mode: SelectionMode::default(),
            site_url: None,
            channel: ChannelConfig::default(),
        }
    }
}

/// Channel title and description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ChannelConfig {
    pub title: String,
    pub description: String,
}

impl Default for ChannelConfig {
    fn default() -> Self {
        Self {
            title: "Daily Yoto Mix".to_string(),
            description: "Rotating daily subset of my MP3s for Yoto".to_string(),
        }
    }
}

impl FeedConfig {
    /// Validate values that can be checked without knowing the command.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.channel.title.trim().is_empty() {
            return Err(ConfigError::Validation(
                "channel.title must not be empty".into(),
            ));
        }
        if let Some(url) = &self.site_url {
            let url = url.trim_end_matches('/');
            if url.is_empty() {
                return Err(ConfigError::Validation("site_url must not be empty".into()));
            }
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::Validation(format!(
                    "site_url must start with http:// or https://, got '{url}'"
                )));
            }
        }
        Ok(())
    }

    /// Base URL with trailing slashes stripped. Required for publishing.
    pub fn base_url(&self) -> Result<String, ConfigError> {
        self.site_url
            .as_deref()
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .ok_or_else(|| {
                ConfigError::Validation(
                    "site_url is required (set it in config.toml or pass --site-url)".into(),
                )
            })
    }

    /// Requested count as a selection size; negative counts select nothing.
    pub fn take(&self) -> usize {
        usize::try_from(self.count).unwrap_or(0)
    }

    /// Channel metadata for the feed, linking to the stripped base URL.
    pub fn channel(&self) -> Result<Channel, ConfigError> {
        Ok(Channel {
            title: self.channel.title.clone(),
            link: self.base_url()?,
            description: self.channel.description.clone(),
        })
    }
}

/// Values given on the command line. `None` leaves the lower layer untouched.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub count: Option<i64>,
    pub mode: Option<SelectionMode>,
    pub site_url: Option<String>,
    pub channel_title: Option<String>,
    pub channel_description: Option<String>,
}

impl ConfigOverrides {
    /// Apply every set override on top of `config`.
    pub fn apply(self, mut config: FeedConfig) -> FeedConfig {
        if let Some(count) = self.count {
            config.count = count;
        }
        if let Some(mode) = self.mode {
            config.mode = mode;
        }
        if let Some(url) = self.site_url {
            config.site_url = Some(url);
        }
        if let Some(title) = self.channel_title {
            config.channel.title = title;
        }
        if let Some(description) = self.channel_description {
            config.channel.description = description;
        }
        config
    }
}

// =============================================================================
// Config loading, merging, and validation
// =============================================================================

/// Returns the stock default config as a `toml::Value::Table`.
pub fn stock_defaults_value() -> Result<toml::Value, ConfigError> {
    toml::Value::try_from(FeedConfig::default())
        .map_err(|e| ConfigError::Validation(format!("default config must serialize: {e}")))
}

/// Recursively merge `overlay` on top of `base`.
///
/// - Tables are merged key-by-key (overlay keys override base keys).
/// - Non-table values in overlay replace base values entirely.
/// - Keys in base that are not in overlay are preserved.
pub fn merge_toml(base: toml::Value, overlay: toml::Value) -> toml::Value {
    match (base, overlay) {
        (toml::Value::Table(mut base_table), toml::Value::Table(overlay_table)) => {
            for (key, overlay_val) in overlay_table {
                let merged = match base_table.remove(&key) {
                    Some(base_val) => merge_toml(base_val, overlay_val),
                    None => overlay_val,
                };
                base_table.insert(key, merged);
            }
            toml::Value::Table(base_table)
        }
        (_, overlay) => overlay,
    }
}

/// Read a TOML file as a raw value.
pub fn load_raw_config(config_path: &Path) -> Result<toml::Value, ConfigError> {
    let content = fs::read_to_string(config_path)?;
    Ok(toml::from_str(&content)?)
}

/// Resolve the full configuration for a run.
///
/// `explicit` is the `--config` path and must exist when given. Without it,
/// `config.toml` in `source` is used if present.
pub fn load_config(
    source: &Path,
    explicit: Option<&Path>,
    overrides: ConfigOverrides,
) -> Result<FeedConfig, ConfigError> {
    let overlay = match explicit {
        Some(path) => Some(load_raw_config(path)?),
        None => {
            let candidate = source.join(CONFIG_FILENAME);
            if candidate.is_file() {
                Some(load_raw_config(&candidate)?)
            } else {
                None
            }
        }
    };

    let base = stock_defaults_value()?;
    let merged = match overlay {
        Some(ov) => merge_toml(base, ov),
        None => base,
    };
    let config: FeedConfig = merged.try_into()?;
    let config = overrides.apply(config);
    config.validate()?;
    Ok(config)
}

/// Returns a fully-commented stock `config.toml` with all keys and explanations.
///
/// Used by the `gen-config` CLI command.
pub fn stock_config_toml() -> &'static str {
    r##"# podmix configuration
# ====================
# Place this file in the source directory as config.toml, or pass its path
# with --config. Command-line flags override values set here.
# Unknown keys will cause an error.

# Number of files to publish per run. Capped at the number of mp3 files
# available; zero or negative publishes an empty feed.
count = 10

# Selection mode:
#   "rotate"  deterministic daily window over the sorted files, no state kept
#   "random"  a fresh random sample on every run
mode = "rotate"

# Base URL the output directory is served from (required here or via
# --site-url). Trailing slashes are stripped.
# site_url = "https://owner.github.io/repo"

# ---------------------------------------------------------------------------
# RSS channel
# ---------------------------------------------------------------------------
[channel]
title = "Daily Yoto Mix"
description = "Rotating daily subset of my MP3s for Yoto"
"##
}
