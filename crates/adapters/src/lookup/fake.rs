// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Fake lookup adapter for testing

use super::{Lookup, LookupError, Record, SearchQuery};
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

/// Recorded lookup call
#[derive(Debug, Clone, PartialEq)]
pub enum LookupCall {
    GetItems(Vec<String>),
    Search(SearchQuery),
}

/// Fake lookup adapter with scripted responses.
///
/// Responses are consumed in push order regardless of which operation is
/// called; an exhausted script returns an empty record set.
#[derive(Clone, Default)]
pub struct FakeLookup {
    responses: Arc<Mutex<VecDeque<Result<Vec<Record>, LookupError>>>>,
    calls: Arc<Mutex<Vec<LookupCall>>>,
}

impl FakeLookup {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue the next response
    pub fn push_response(&self, response: Result<Vec<Record>, LookupError>) {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push_back(response);
    }

    /// Get all recorded calls
    pub fn calls(&self) -> Vec<LookupCall> {
        self.calls.lock().unwrap_or_else(|e| e.into_inner()).clone()
    }

    fn next_response(&self) -> Result<Vec<Record>, LookupError> {
        self.responses
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .pop_front()
            .unwrap_or_else(|| Ok(Vec::new()))
    }

    fn record(&self, call: LookupCall) {
        self.calls
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .push(call);
    }
}

impl Lookup for FakeLookup {
    fn get_items(&self, asins: &[String]) -> Result<Vec<Record>, LookupError> {
        self.record(LookupCall::GetItems(asins.to_vec()));
        self.next_response()
    }

    fn search(&self, query: &SearchQuery) -> Result<Vec<Record>, LookupError> {
        self.record(LookupCall::Search(query.clone()));
        self.next_response()
    }
}

#[cfg(test)]
#[path = "fake_tests.rs"]
mod tests;
