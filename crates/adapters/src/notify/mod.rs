// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Notification adapters
//!
//! Notifications are fire-and-forget: a failed post is logged by the caller
//! but never rolls back catalog or cursor bookkeeping.

mod noop;
mod webhook;

pub use noop::NoOpNotify;
pub use webhook::WebhookNotifier;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeNotify, NotifyCall};

use thiserror::Error;

/// Errors from notification delivery
#[derive(Debug, Error)]
pub enum NotifyError {
    #[error("webhook returned status {0}")]
    Status(u16),
    #[error("transport failure: {0}")]
    Transport(String),
}

/// Adapter for outbound notifications
pub trait NotifySink: Clone + Send + Sync + 'static {
    /// Post a routine message (new releases, price drops)
    fn post(&self, message: &str) -> Result<(), NotifyError>;

    /// Post an operator alert (lookup exhaustion, partial batches)
    fn alert(&self, message: &str) -> Result<(), NotifyError>;
}
