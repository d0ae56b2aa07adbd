// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! No-op notification adapter for when outbound posts are disabled.

use super::{NotifyError, NotifySink};

/// Notification sink that does nothing.
///
/// Used for dry runs and deployments without a webhook configured.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoOpNotify;

impl NoOpNotify {
    pub fn new() -> Self {
        Self
    }
}

impl NotifySink for NoOpNotify {
    fn post(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }

    fn alert(&self, _message: &str) -> Result<(), NotifyError> {
        Ok(())
    }
}
