//! # podmix
//!
//! Publishes a bounded subset of a directory of MP3 files next to a podcast
//! RSS 2.0 feed. Point a podcast client (or a Yoto card) at the feed and it
//! sees a fresh handful of episodes every day, with no server-side state.
//!
//! # Architecture: Scan, Select, Publish
//!
//! ```text
//! 1. Scan      mp3/        →  CandidatePool     (sorted *.mp3 filenames)
//! 2. Select    pool        →  chosen filenames  (rotate window or random sample)
//! 3. Publish   chosen      →  public/           (copies + feed.xml)
//! ```
//!
//! Selection and rendering are pure functions: the date, the build timestamp
//! and the random number generator are all passed in, so both are testable
//! without touching the clock or the filesystem.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`scan`] | Stage 1 — lists the source directory into a [`scan::CandidatePool`] |
//! | [`select`] | Stage 2 — rotate and random selection |
//! | [`publish`] | Stage 3 — recreates the output directory, copies files, writes the feed |
//! | [`feed`] | RSS 2.0 rendering |
//! | [`naming`] | Episode titles from filenames |
//! | [`config`] | Layered `config.toml` + CLI flag configuration |
//! | [`types`] | Shared types (`SelectionMode`, `FeedItem`, `Channel`) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Stateless Rotation
//!
//! Rotate mode derives the day's window from the calendar date alone:
//! `start = (days_since_2020_01_01 * take) mod pool_size`. There is no cursor
//! file to commit back after each publish, so a scheduled CI job can rebuild
//! the feed from a clean checkout. The trade-off is that adding or removing
//! files shifts every future window.
//!
//! ## Fail Before Destroying
//!
//! The output directory is wiped and rebuilt on every run, but only after the
//! source has been scanned and the selection made. A typo in the source path
//! never costs you yesterday's feed.
//!
//! ## Escaped XML
//!
//! Titles and URLs are XML-escaped, so a file named `Rock & Roll.mp3` still
//! produces a well-formed feed.

pub mod config;
pub mod feed;
pub mod naming;
pub mod output;
pub mod publish;
pub mod scan;
pub mod select;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
