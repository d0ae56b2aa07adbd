// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Time-sliced slot scheduling
//!
//! A cycle of `cycle_days` is partitioned into `n` equal, contiguous,
//! non-overlapping windows, one per catalog position. [`due_index`] maps the
//! current wall-clock time to the position whose window contains it; runs are
//! triggered much more often than one window so that, combined with the
//! cursor gate, only the first trigger inside a window does work.
//!
//! The gate is a non-atomic compare-then-write against the persisted cursor,
//! not a lock: two invocations racing inside the same window before the first
//! cursor write lands may both proceed once. That duplicate processing is a
//! documented tolerance, not corruption.

use chrono::{DateTime, Duration, Utc};
use thiserror::Error;

const SECONDS_PER_DAY: f64 = 86_400.0;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum SlotError {
    #[error("cannot schedule over an empty catalog")]
    EmptyCatalog,
    #[error("cycle length must be positive, got {0} days")]
    NonPositiveCycle(f64),
}

/// The catalog position whose window contains `now`
///
/// `floor(seconds_into_cycle * len / cycle_seconds)`, clamped into
/// `[0, len)`. Pure and deterministic in `(now, len, cycle_days)`; if the
/// catalog length changes between runs, due-ness is simply recomputed from
/// scratch against the new partition.
pub fn due_index(now: DateTime<Utc>, len: usize, cycle_days: f64) -> Result<usize, SlotError> {
    let cycle_seconds = check_cycle(len, cycle_days)?;
    let seconds_into_cycle = (now.timestamp() as f64).rem_euclid(cycle_seconds);
    let index = (seconds_into_cycle * len as f64 / cycle_seconds).floor() as usize;
    Ok(index.min(len - 1))
}

/// Start of the window after the one containing `now`
///
/// Operator aid for "when does the next position get processed".
pub fn next_due_at(
    now: DateTime<Utc>,
    len: usize,
    cycle_days: f64,
) -> Result<DateTime<Utc>, SlotError> {
    let cycle_seconds = check_cycle(len, cycle_days)?;
    let index = due_index(now, len, cycle_days)?;
    let seconds_into_cycle = (now.timestamp() as f64).rem_euclid(cycle_seconds);
    let window = cycle_seconds / len as f64;
    let until_next = (index as f64 + 1.0) * window - seconds_into_cycle;
    Ok(now + Duration::milliseconds((until_next * 1000.0).ceil() as i64))
}

/// Cursor gate: proceed only if the due index differs from the last
/// persisted one
///
/// A missing cursor (first run, or an unparseable blob) always proceeds.
pub fn is_my_slot(previous: Option<usize>, due: usize) -> bool {
    previous != Some(due)
}

fn check_cycle(len: usize, cycle_days: f64) -> Result<f64, SlotError> {
    if len == 0 {
        return Err(SlotError::EmptyCatalog);
    }
    if cycle_days <= 0.0 {
        return Err(SlotError::NonPositiveCycle(cycle_days));
    }
    Ok(cycle_days * SECONDS_PER_DAY)
}

#[cfg(test)]
#[path = "slot_tests.rs"]
mod tests;
