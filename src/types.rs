//! Shared types used across the scan → select → publish pipeline.

use serde::{Deserialize, Serialize};
use std::fmt;

/// How the run's subset is picked from the candidate pool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum SelectionMode {
    /// Deterministic daily window over the sorted pool.
    #[default]
    Rotate,
    /// Uniform sample without replacement, different every run.
    Random,
}

impl fmt::Display for SelectionMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionMode::Rotate => f.write_str("rotate"),
            SelectionMode::Random => f.write_str("random"),
        }
    }
}

/// One published episode in the feed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeedItem {
    /// Raw filename as found in the source directory, e.g. `My_Song-01.mp3`.
    pub filename: String,
    /// Display title derived from the filename (see [`crate::naming::derive_title`]).
    pub title: String,
    /// Size of the published copy in bytes.
    pub byte_length: u64,
    /// Public URL of the published copy: `{site_url}/{filename}`.
    pub public_url: String,
}

impl FeedItem {
    /// Build an item for `filename` hosted under `site_url` (no trailing slash).
    pub fn new(filename: &str, byte_length: u64, site_url: &str) -> Self {
        Self {
            filename: filename.to_string(),
            title: crate::naming::derive_title(filename),
            byte_length,
            public_url: format!("{site_url}/{filename}"),
        }
    }

    /// Item identifier: the public URL and raw filename joined by `#`.
    pub fn guid(&self) -> String {
        format!("{}#{}", self.public_url, self.filename)
    }
}

/// RSS channel metadata.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Channel {
    pub title: String,
    pub link: String,
    pub description: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_defaults_to_rotate() {
        assert_eq!(SelectionMode::default(), SelectionMode::Rotate);
    }

    #[test]
    fn mode_display_matches_config_spelling() {
        assert_eq!(SelectionMode::Rotate.to_string(), "rotate");
        assert_eq!(SelectionMode::Random.to_string(), "random");
    }

    #[test]
    fn feed_item_builds_url_and_title() {
        let item = FeedItem::new("My_Song-01.mp3", 42, "https://host/pod");
        assert_eq!(item.title, "My Song 01");
        assert_eq!(item.public_url, "https://host/pod/My_Song-01.mp3");
        assert_eq!(item.byte_length, 42);
    }

    #[test]
    fn guid_joins_url_and_filename() {
        let item = FeedItem::new("a.mp3", 1234, "https://host");
        assert_eq!(item.guid(), "https://host/a.mp3#a.mp3");
    }
}
