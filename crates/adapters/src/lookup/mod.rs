// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Remote catalog lookup adapters
//!
//! The upstream catalog API accepts either a bounded batch of identifiers or
//! a search query, and is aggressively rate limited. Callers are expected to
//! wrap every call in a [`bw_core::Retryer`]; the error type here carries the
//! retryable/fatal classification that drives it.

mod http;

pub use http::HttpLookup;

// Test support - only compiled for tests or when explicitly requested
#[cfg(any(test, feature = "test-support"))]
mod fake;
#[cfg(any(test, feature = "test-support"))]
pub use fake::{FakeLookup, LookupCall};

use bw_core::{Classify, ErrorClass};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Maximum identifiers accepted per batch lookup, imposed upstream
pub const MAX_BATCH: usize = 10;

/// One record returned by the upstream catalog API
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "Binding")]
    pub binding: Option<String>,
    #[serde(rename = "ReleaseDate")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(rename = "Price")]
    pub price: Option<f64>,
    #[serde(rename = "LoyaltyPoints")]
    pub loyalty_points: Option<u64>,
    #[serde(rename = "URL")]
    pub url: String,
}

/// What a search query matches against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum QueryKind {
    Title,
    Keywords,
}

/// A search against the upstream catalog
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchQuery {
    pub kind: QueryKind,
    pub value: String,
    /// Upper price bound in the store's minor currency unit, if any
    pub max_price: Option<f64>,
}

/// Errors from lookup operations
#[derive(Debug, Clone, PartialEq, Error)]
pub enum LookupError {
    #[error("rate limited by upstream")]
    RateLimited,
    #[error("truncated response body")]
    Truncated,
    #[error("not found: {0}")]
    NotFound(String),
    #[error("malformed request: {0}")]
    MalformedRequest(String),
    #[error("unexpected response shape: {0}")]
    SchemaMismatch(String),
    #[error("transport failure: {0}")]
    Transport(String),
}

impl Classify for LookupError {
    fn class(&self) -> ErrorClass {
        match self {
            LookupError::RateLimited | LookupError::Truncated => ErrorClass::Retryable,
            LookupError::NotFound(_)
            | LookupError::MalformedRequest(_)
            | LookupError::SchemaMismatch(_)
            | LookupError::Transport(_) => ErrorClass::Fatal,
        }
    }
}

/// Adapter for remote catalog lookups
pub trait Lookup: Clone + Send + Sync + 'static {
    /// Fetch current records for a batch of identifiers.
    ///
    /// At most [`MAX_BATCH`] identifiers per call. Identifiers the upstream
    /// does not know are absent from the response rather than errors; callers
    /// compare request and response counts to detect partial batches.
    fn get_items(&self, asins: &[String]) -> Result<Vec<Record>, LookupError>;

    /// Search for records matching a query
    fn search(&self, query: &SearchQuery) -> Result<Vec<Record>, LookupError>;
}
