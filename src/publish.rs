//! Run orchestration: scan → select → copy → render → write.
//!
//! ## Ordering
//!
//! Everything that can fail for configuration reasons is checked before the
//! output directory is touched: the base URL, the source scan (missing
//! directory, no mp3 files) and the selection. Only then is the output
//! directory removed and recreated, so a doomed run never destroys the
//! previous publication.
//!
//! Once copying starts, I/O failures abort the run and may leave the output
//! directory partially written. Nothing is retried.
//!
//! ## Output Structure
//!
//! ```text
//! public/
//! ├── 03-bedtime.mp3       # chosen files, copied as-is
//! ├── 04-lullaby.mp3
//! └── feed.xml             # RSS 2.0 feed referencing the copies
//! ```

use crate::config::{ConfigError, FeedConfig};
use crate::feed::{self, FEED_FILENAME};
use crate::scan::{self, CandidatePool, ScanError};
use crate::select::{self, SelectError};
use crate::types::{FeedItem, SelectionMode};
use chrono::{DateTime, Local, NaiveDate, Utc};
use rand::Rng;
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, info};

#[derive(Error, Debug)]
pub enum PublishError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Scan(#[from] ScanError),
    #[error(transparent)]
    Select(#[from] SelectError),
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error(
        "Output directory {} would delete the source directory {}",
        .output.display(),
        .source_dir.display()
    )]
    OutputContainsSource { output: PathBuf, source_dir: PathBuf },
}

impl PublishError {
    /// True for errors raised before any output was written.
    pub fn is_configuration(&self) -> bool {
        match self {
            PublishError::Io(_) | PublishError::Scan(ScanError::Io(_)) => false,
            PublishError::Config(ConfigError::Io(_)) => false,
            PublishError::Scan(_)
            | PublishError::Select(_)
            | PublishError::Config(_)
            | PublishError::OutputContainsSource { .. } => true,
        }
    }
}

/// The moment a run happens, read once and passed down.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunClock {
    /// Calendar date that keys rotate mode.
    pub today: NaiveDate,
    /// Build timestamp written into the feed.
    pub now: DateTime<Utc>,
}

impl RunClock {
    /// Read the system clock. The rotation date is the local calendar date.
    pub fn system() -> Self {
        Self {
            today: Local::now().date_naive(),
            now: Utc::now(),
        }
    }

    /// Replace the rotation date, keeping the build timestamp.
    pub fn with_today(self, today: NaiveDate) -> Self {
        Self { today, ..self }
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone)]
pub struct PublishReport {
    pub mode: SelectionMode,
    /// Number of candidates found in the source directory.
    pub pool_size: usize,
    /// Published items in feed order.
    pub items: Vec<FeedItem>,
    pub feed_path: PathBuf,
}

/// Scan and select without writing anything.
pub fn plan<R: Rng + ?Sized>(
    source: &Path,
    config: &FeedConfig,
    clock: RunClock,
    rng: &mut R,
) -> Result<(CandidatePool, Vec<String>), PublishError> {
    let pool = scan::scan(source)?;
    let chosen = select::select(pool.filenames(), config.take(), config.mode, clock.today, rng)?;
    Ok((pool, chosen))
}

/// Run the full pipeline into `output`.
pub fn publish<R: Rng + ?Sized>(
    source: &Path,
    output: &Path,
    config: &FeedConfig,
    clock: RunClock,
    rng: &mut R,
) -> Result<PublishReport, PublishError> {
    let base_url = config.base_url()?;
    let channel = config.channel()?;
    let (pool, chosen) = plan(source, config, clock, rng)?;
    ensure_output_is_disjoint(pool.root(), output)?;

    recreate_dir(output)?;

    let mut items = Vec::with_capacity(chosen.len());
    for filename in &chosen {
        let src = pool.path_of(filename);
        let dst = output.join(filename);
        fs::copy(&src, &dst)?;
        let byte_length = fs::metadata(&dst)?.len();
        debug!(file = %filename, bytes = byte_length, "copied");
        items.push(FeedItem::new(filename, byte_length, &base_url));
    }

    let xml = feed::render(&items, &channel, clock.now);
    let feed_path = output.join(FEED_FILENAME);
    fs::write(&feed_path, xml)?;

    info!(
        mode = %config.mode,
        items = items.len(),
        feed = %feed_path.display(),
        "published feed"
    );

    Ok(PublishReport {
        mode: config.mode,
        pool_size: pool.len(),
        items,
        feed_path,
    })
}

/// Remove `dir` if present, then create it empty.
fn recreate_dir(dir: &Path) -> std::io::Result<()> {
    if dir.exists() {
        debug!(dir = %dir.display(), "removing previous output");
        fs::remove_dir_all(dir)?;
    }
    fs::create_dir_all(dir)
}

/// Refuse to wipe an output directory that is, or contains, the source.
fn ensure_output_is_disjoint(source: &Path, output: &Path) -> Result<(), PublishError> {
    if !output.exists() {
        return Ok(());
    }
    let source_dir = source.canonicalize()?;
    let output_dir = output.canonicalize()?;
    if source_dir.starts_with(&output_dir) {
        return Err(PublishError::OutputContainsSource {
            output: output.to_path_buf(),
            source_dir: source.to_path_buf(),
        });
    }
    Ok(())
}
