// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Metrics adapters

use bw_core::MetricsSink;

/// Metrics sink emitting counters as structured trace events.
///
/// Deployments scrape these from the log stream; there is no in-process
/// aggregation.
#[derive(Clone, Copy, Debug, Default)]
pub struct TracingMetrics;

impl TracingMetrics {
    pub fn new() -> Self {
        Self
    }
}

impl MetricsSink for TracingMetrics {
    fn incr(&self, namespace: &str, name: &str) {
        tracing::info!(target: "metrics", namespace, name, "incr");
    }
}

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use fake::FakeMetrics;

#[cfg(any(test, feature = "test-support"))]
mod fake {
    use bw_core::MetricsSink;
    use std::sync::{Arc, Mutex};

    /// Fake metrics sink recording every counter increment
    #[derive(Clone, Default)]
    pub struct FakeMetrics {
        events: Arc<Mutex<Vec<(String, String)>>>,
    }

    impl FakeMetrics {
        pub fn new() -> Self {
            Self::default()
        }

        /// All recorded (namespace, name) increments, in order
        pub fn events(&self) -> Vec<(String, String)> {
            self.events
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .clone()
        }

        /// Number of increments for one counter
        pub fn count(&self, namespace: &str, name: &str) -> usize {
            self.events()
                .iter()
                .filter(|(ns, n)| ns == namespace && n == name)
                .count()
        }
    }

    impl MetricsSink for FakeMetrics {
        fn incr(&self, namespace: &str, name: &str) {
            self.events
                .lock()
                .unwrap_or_else(|e| e.into_inner())
                .push((namespace.to_string(), name.to_string()));
        }
    }
}

#[cfg(test)]
#[path = "metrics_tests.rs"]
mod tests;
