//! CLI output formatting.
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.
//!
//! ## Check
//!
//! ```text
//! Pool (5 files in mp3/)
//! 001 a.mp3
//! 002 b.mp3
//! ...
//!
//! Selection (rotate, 2 of 5 for 2020-01-02)
//! 001 c
//!     Source: c.mp3
//! 002 d
//!     Source: d.mp3
//! ```
//!
//! ## Build
//!
//! ```text
//! Wrote 2 items to public/feed.xml
//! ```

use crate::naming::derive_title;
use crate::publish::PublishReport;
use crate::scan::CandidatePool;
use crate::types::SelectionMode;
use chrono::NaiveDate;

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Format an entry line: titled entries show the title, untitled ones the
/// filename in parens.
///
/// ```text
/// 001 Bedtime Story
/// 002 (---.mp3)
/// ```
fn entry_line(index: usize, filename: &str) -> String {
    let title = derive_title(filename);
    if title.is_empty() {
        format!("{} ({})", format_index(index), filename)
    } else {
        format!("{} {}", format_index(index), title)
    }
}

/// Format the `check` command output: the pool, then the selection.
pub fn format_check_output(
    pool: &CandidatePool,
    chosen: &[String],
    mode: SelectionMode,
    reference_date: NaiveDate,
) -> Vec<String> {
    let mut lines = Vec::new();

    lines.push(format!(
        "Pool ({} files in {})",
        pool.len(),
        pool.root().display()
    ));
    for (i, name) in pool.filenames().iter().enumerate() {
        lines.push(format!("{} {}", format_index(i + 1), name));
    }

    lines.push(String::new());
    let header = match mode {
        SelectionMode::Rotate => format!(
            "Selection (rotate, {} of {} for {})",
            chosen.len(),
            pool.len(),
            reference_date
        ),
        SelectionMode::Random => format!(
            "Selection (random sample, {} of {})",
            chosen.len(),
            pool.len()
        ),
    };
    lines.push(header);
    for (i, name) in chosen.iter().enumerate() {
        lines.push(entry_line(i + 1, name));
        lines.push(format!("{}Source: {}", indent(1), name));
    }

    lines
}

pub fn print_check_output(
    pool: &CandidatePool,
    chosen: &[String],
    mode: SelectionMode,
    reference_date: NaiveDate,
) {
    for line in format_check_output(pool, chosen, mode, reference_date) {
        println!("{}", line);
    }
}

/// Format the `build` completion summary.
pub fn format_publish_output(report: &PublishReport) -> Vec<String> {
    vec![format!(
        "Wrote {} items to {}",
        report.items.len(),
        report.feed_path.display()
    )]
}

pub fn print_publish_output(report: &PublishReport) {
    for line in format_publish_output(report) {
        println!("{}", line);
    }
}
