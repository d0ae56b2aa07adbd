// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! Adapters for external I/O
//!
//! Each adapter comes in three flavors: a real implementation backed by the
//! network, a no-op for disabled deployments, and a recording fake for tests
//! (behind the `test-support` feature).

pub mod lookup;
pub mod metrics;
pub mod notify;

pub use lookup::{
    HttpLookup, Lookup, LookupError, QueryKind, Record, SearchQuery, MAX_BATCH,
};
pub use metrics::TracingMetrics;
pub use notify::{NoOpNotify, NotifyError, NotifySink, WebhookNotifier};

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
pub use lookup::{FakeLookup, LookupCall};
#[cfg(any(test, feature = "test-support"))]
pub use metrics::FakeMetrics;
#[cfg(any(test, feature = "test-support"))]
pub use notify::{FakeNotify, NotifyCall};
