//! Picking the run's subset from the candidate pool.
//!
//! Stage 2 of a run. Two modes:
//!
//! - **rotate**: a contiguous circular window of the sorted pool whose start
//!   advances by `take` every calendar day. The window is a pure function of
//!   the pool, `take` and the reference date, so no cursor is stored between
//!   runs.
//! - **random**: `take` distinct files sampled uniformly. The RNG is passed
//!   in so callers choose between the thread RNG and a seeded one.
//!
//! ```text
//! pool  = [a b c d e]      take = 2
//! 2020-01-01  day 0  start 0  → [a b]
//! 2020-01-02  day 1  start 2  → [c d]
//! 2020-01-03  day 2  start 4  → [e a]
//! 2019-12-31  day -1 start 3  → [d e]
//! ```

use crate::types::SelectionMode;
use chrono::NaiveDate;
use rand::Rng;
use thiserror::Error;
use tracing::debug;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum SelectError {
    #[error("No mp3 files to select from")]
    EmptyPool,
}

/// Day zero of the rotation.
pub const ROTATION_EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(2020, 1, 1) {
    Some(date) => date,
    None => panic!("rotation epoch must be a valid date"),
};

/// Whole days between the rotation epoch and `date`. Negative before the epoch.
pub fn day_index(date: NaiveDate) -> i64 {
    date.signed_duration_since(ROTATION_EPOCH).num_days()
}

/// First pool index of the rotate window for `day_index`.
///
/// Uses Euclidean remainder so days before the epoch still land in `0..n`.
/// Returns `None` for an empty pool (`n == 0`).
pub fn rotation_start(day_index: i64, take: usize, n: usize) -> Option<usize> {
    let offset = i128::from(day_index) * take as i128;
    offset.checked_rem_euclid(n as i128).map(|start| start as usize)
}

/// Select up to `count` filenames from `pool`.
///
/// Returns `min(count, pool.len())` names. `reference_date` drives rotate
/// mode; `rng` drives random mode. Both are always required so the call site
/// doesn't change with the mode.
pub fn select<R: Rng + ?Sized>(
    pool: &[String],
    count: usize,
    mode: SelectionMode,
    reference_date: NaiveDate,
    rng: &mut R,
) -> Result<Vec<String>, SelectError> {
    if pool.is_empty() {
        return Err(SelectError::EmptyPool);
    }
    let take = count.min(pool.len());

    let chosen = match mode {
        SelectionMode::Rotate => rotate(pool, take, reference_date),
        SelectionMode::Random => sample(pool, take, rng),
    };

    debug!(
        %mode,
        pool = pool.len(),
        take,
        chosen = ?chosen,
        "selected files"
    );
    Ok(chosen)
}

fn rotate(pool: &[String], take: usize, reference_date: NaiveDate) -> Vec<String> {
    let n = pool.len();
    let Some(start) = rotation_start(day_index(reference_date), take, n) else {
        return Vec::new();
    };
    (0..take).map(|i| pool[(start + i) % n].clone()).collect()
}

fn sample<R: Rng + ?Sized>(pool: &[String], take: usize, rng: &mut R) -> Vec<String> {
    rand::seq::index::sample(rng, pool.len(), take)
        .into_iter()
        .map(|i| pool[i].clone())
        .collect()
}
