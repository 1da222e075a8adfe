//! Source directory scanning.
//!
//! Stage 1 of a run. Lists the source directory and keeps every regular file
//! whose name ends in `.mp3` (any case), sorted by filename:
//!
//! ```text
//! mp3/
//! ├── 01-intro.mp3        # candidate
//! ├── Bedtime_Story.MP3   # candidate (extension match ignores case)
//! ├── cover.jpg           # ignored
//! ├── config.toml         # ignored (read by the config layer)
//! └── old.mp3/            # ignored (directory)
//! ```
//!
//! Files whose names are not valid UTF-8 are skipped with a warning.
//!
//! The scan is the only validation that happens before the output directory
//! is destroyed, so both failure modes (missing directory, no candidates)
//! surface here.

use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, warn};

#[derive(Error, Debug)]
pub enum ScanError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("mp3 dir not found: {}", .0.display())]
    SourceMissing(PathBuf),
    #[error("No mp3 files found in {}", .0.display())]
    NoCandidates(PathBuf),
}

/// Sorted, non-empty list of candidate filenames for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidatePool {
    root: PathBuf,
    filenames: Vec<String>,
}

impl CandidatePool {
    /// Build a pool from raw filenames. Sorts them; fails on an empty list.
    pub fn new(root: impl Into<PathBuf>, mut filenames: Vec<String>) -> Result<Self, ScanError> {
        let root = root.into();
        if filenames.is_empty() {
            return Err(ScanError::NoCandidates(root));
        }
        filenames.sort();
        Ok(Self { root, filenames })
    }

    /// Directory the candidates live in.
    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn filenames(&self) -> &[String] {
        &self.filenames
    }

    pub fn len(&self) -> usize {
        self.filenames.len()
    }

    /// Always false: construction rejects empty pools.
    pub fn is_empty(&self) -> bool {
        self.filenames.is_empty()
    }

    /// Absolute path of a candidate in the source directory.
    pub fn path_of(&self, filename: &str) -> PathBuf {
        self.root.join(filename)
    }
}

pub fn scan(source: &Path) -> Result<CandidatePool, ScanError> {
    if !source.is_dir() {
        return Err(ScanError::SourceMissing(source.to_path_buf()));
    }

    let mut filenames = Vec::new();
    for entry in fs::read_dir(source)? {
        let entry = match entry {
            Ok(entry) => entry,
            Err(e) => {
                warn!(
                    source = %source.display(),
                    error = %e,
                    "skipping unreadable directory entry"
                );
                continue;
            }
        };
        if !entry.path().is_file() {
            continue;
        }
        // Names that are not UTF-8 can't be put in a URL or feed, and a lossy
        // copy would no longer point at the file on disk.
        match entry.file_name().into_string() {
            Ok(name) if is_mp3(&name) => filenames.push(name),
            Ok(_) => {}
            Err(raw) if is_mp3(&raw.to_string_lossy()) => {
                warn!(file = ?raw, "skipping mp3 with a non-UTF-8 name");
            }
            Err(_) => {}
        }
    }

    debug!(
        source = %source.display(),
        candidates = filenames.len(),
        "scanned source directory"
    );

    CandidatePool::new(source, filenames)
}

/// Case-insensitive `.mp3` suffix check on a filename.
pub fn is_mp3(name: &str) -> bool {
    name.len() >= 4
        && name
            .get(name.len() - 4..)
            .is_some_and(|ext| ext.eq_ignore_ascii_case(".mp3"))
}
