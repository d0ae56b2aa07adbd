// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics sink trait
//!
//! Counters are observational only: no scheduling or retry decision ever
//! depends on a metric, and emission failures are invisible to callers.

/// Fire-and-forget counter sink
pub trait MetricsSink: Clone + Send + Sync {
    /// Increment the counter `name` under `namespace`
    fn incr(&self, namespace: &str, name: &str);
}

/// Metrics sink that discards everything
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpMetrics;

impl MetricsSink for NoOpMetrics {
    fn incr(&self, _namespace: &str, _name: &str) {}
}
