// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-core: Core library for the bookwatch catalog-monitoring bot
//!
//! This crate provides:
//! - The edition/catalog data model with canonical ordering
//! - Deterministic slot and segment scheduling for stateless runs
//! - A bounded-retry engine with exponential backoff and jitter
//! - Reconciliation of per-run outcomes into persisted catalogs

pub mod clock;

pub mod edition;
pub mod merge;
pub mod metrics;
pub mod retry;
pub mod segment;
pub mod slot;

// Re-exports
pub use clock::{Clock, FakeClock, SystemClock};
pub use edition::{Catalog, Edition, FieldChange};
pub use merge::{merge_segment, Outcome};
pub use metrics::{MetricsSink, NoOpMetrics};
pub use retry::{
    Classify, ErrorClass, FakeSleeper, RetryError, RetryPolicy, Retryer, Sleeper, SystemSleeper,
};
pub use segment::Segment;
pub use slot::{due_index, is_my_slot, next_due_at, SlotError};
