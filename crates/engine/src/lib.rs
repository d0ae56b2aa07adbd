// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Bookwatch run engine
//!
//! One invocation of the bot is one "run": load state, decide the due work
//! unit, do the lookups, reconcile, persist. Two run shapes exist, matching
//! the two schedulers in bw-core: [`SlotRunner`] processes the single due
//! catalog position per cycle window, [`SegmentRunner`] processes a fixed
//! window of positions and advances a persisted offset.

mod error;
mod segment_run;
mod slot_run;

pub use error::RunError;
pub use segment_run::{SegmentConfig, SegmentReviewer, SegmentRunner, SegmentSummary};
pub use slot_run::{SlotConfig, SlotDecision, SlotProcessor, SlotRunner, SlotSummary};
