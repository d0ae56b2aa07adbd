// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake notification adapter for testing

use super::{NotifyError, NotifySink};
use std::sync::{Arc, Mutex};

/// Recorded notification
#[derive(Debug, Clone, PartialEq)]
pub enum NotifyCall {
    Post(String),
    Alert(String),
}

/// Fake notification adapter for testing
#[derive(Clone, Default)]
pub struct FakeNotify {
    calls: Arc<Mutex<Vec<NotifyCall>>>,
    failing: Arc<Mutex<bool>>,
}

impl FakeNotify {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make every subsequent delivery fail
    pub fn fail(&self) {
        *self.failing.lock().unwrap_or_else(|e| e.into_inner()) = true;
    }

    /// Get all recorded notifications
    pub fn calls(&self) -> Vec<NotifyCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    /// Messages posted via [`NotifySink::post`]
    pub fn posts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                NotifyCall::Post(m) => Some(m),
                NotifyCall::Alert(_) => None,
            })
            .collect()
    }

    /// Messages posted via [`NotifySink::alert`]
    pub fn alerts(&self) -> Vec<String> {
        self.calls()
            .into_iter()
            .filter_map(|c| match c {
                NotifyCall::Alert(m) => Some(m),
                NotifyCall::Post(_) => None,
            })
            .collect()
    }

    fn record(&self, call: NotifyCall) -> Result<(), NotifyError> {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
        if *self.failing.lock().unwrap_or_else(|e| e.into_inner()) {
            return Err(NotifyError::Status(500));
        }
        Ok(())
    }
}

impl NotifySink for FakeNotify {
    fn post(&self, message: &str) -> Result<(), NotifyError> {
        self.record(NotifyCall::Post(message.to_string()))
    }

    fn alert(&self, message: &str) -> Result<(), NotifyError> {
        self.record(NotifyCall::Alert(message.to_string()))
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
