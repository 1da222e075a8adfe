//! Shared test utilities for the podmix test suite.
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_source(&["a.mp3", "b.mp3", "cover.jpg"]);
//! let pool = scan(tmp.path()).unwrap();
//! assert_eq!(pool.filenames(), names(&["a.mp3", "b.mp3"]));
//! ```

use crate::publish::RunClock;
use chrono::{NaiveDate, TimeZone, Utc};
use std::path::Path;
use tempfile::TempDir;

// =========================================================================
// Fixture setup
// =========================================================================

/// Create a temp source directory holding one small file per name.
///
/// File contents are the filename itself, so sizes differ between files.
pub fn setup_source(filenames: &[&str]) -> TempDir {
    let tmp = TempDir::new().unwrap();
    for name in filenames {
        std::fs::write(tmp.path().join(name), name.as_bytes()).unwrap();
    }
    tmp
}

/// Sorted filenames directly inside `dir`.
pub fn output_files(dir: &Path) -> Vec<String> {
    let mut files: Vec<String> = std::fs::read_dir(dir)
        .unwrap()
        .map(|e| e.unwrap().file_name().to_string_lossy().to_string())
        .collect();
    files.sort();
    files
}

// =========================================================================
// Value builders
// =========================================================================

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day)
        .unwrap_or_else(|| panic!("invalid test date {year}-{month}-{day}"))
}

/// 2020-01-02, one day after the rotation epoch, at 06:30:00 UTC.
pub fn fixed_clock() -> RunClock {
    RunClock {
        today: date(2020, 1, 2),
        now: Utc.with_ymd_and_hms(2020, 1, 2, 6, 30, 0).unwrap(),
    }
}
