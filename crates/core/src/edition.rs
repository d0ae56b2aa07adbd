// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Edition and catalog data model
//!
//! An [`Edition`] is one monitored catalog entry, keyed by its ASIN. A
//! [`Catalog`] is an ordered list of editions; canonical order is release
//! date descending (undated editions last) with ties broken by title.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// One monitored catalog entry
///
/// `max_price` is the highest price ever observed for this edition; it is
/// monotonically non-decreasing across successful observations (enforced by
/// the merge step, see [`crate::merge`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Edition {
    #[serde(rename = "ASIN")]
    pub asin: String,
    #[serde(rename = "Title")]
    pub title: String,
    #[serde(rename = "ReleaseDate")]
    pub release_date: Option<DateTime<Utc>>,
    #[serde(rename = "CurrentPrice")]
    pub current_price: f64,
    #[serde(rename = "MaxPrice")]
    pub max_price: f64,
    #[serde(rename = "URL")]
    pub url: String,
}

/// A changed field on an edition, for change logging
///
/// Field comparison is enumerated explicitly so that adding a field to
/// [`Edition`] without extending [`Edition::diff_fields`] is caught in review
/// rather than silently skipped at runtime.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldChange {
    pub field: &'static str,
    pub old: String,
    pub new: String,
}

impl Edition {
    /// Enumerated field-by-field comparison against another edition
    pub fn diff_fields(&self, other: &Edition) -> Vec<FieldChange> {
        let mut changes = Vec::new();
        let mut push = |field: &'static str, old: String, new: String| {
            if old != new {
                changes.push(FieldChange { field, old, new });
            }
        };
        push("ASIN", self.asin.clone(), other.asin.clone());
        push("Title", self.title.clone(), other.title.clone());
        push(
            "ReleaseDate",
            format_date(self.release_date),
            format_date(other.release_date),
        );
        push(
            "CurrentPrice",
            format!("{}", self.current_price),
            format!("{}", other.current_price),
        );
        push(
            "MaxPrice",
            format!("{}", self.max_price),
            format!("{}", other.max_price),
        );
        push("URL", self.url.clone(), other.url.clone());
        changes
    }
}

fn format_date(date: Option<DateTime<Utc>>) -> String {
    match date {
        Some(d) => d.format("%Y-%m-%d").to_string(),
        None => "-".to_string(),
    }
}

/// An ordered, ASIN-unique list of editions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Catalog {
    editions: Vec<Edition>,
}

impl Catalog {
    pub fn new(editions: Vec<Edition>) -> Self {
        Self { editions }
    }

    pub fn len(&self) -> usize {
        self.editions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.editions.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Edition> {
        self.editions.iter()
    }

    pub fn get(&self, index: usize) -> Option<&Edition> {
        self.editions.get(index)
    }

    pub fn find(&self, asin: &str) -> Option<&Edition> {
        self.editions.iter().find(|e| e.asin == asin)
    }

    pub fn push(&mut self, edition: Edition) {
        self.editions.push(edition);
    }

    pub fn extend(&mut self, editions: impl IntoIterator<Item = Edition>) {
        self.editions.extend(editions);
    }

    /// Remove duplicate ASINs, first occurrence wins
    pub fn dedup(&self) -> Catalog {
        let mut seen = HashSet::new();
        let editions = self
            .editions
            .iter()
            .filter(|e| seen.insert(e.asin.clone()))
            .cloned()
            .collect();
        Catalog { editions }
    }

    /// Sort into canonical order: release date descending, undated editions
    /// last, ties broken by title ascending
    pub fn sort_canonical(&mut self) {
        self.editions.sort_by(|a, b| {
            let da = a.release_date.unwrap_or(DateTime::<Utc>::MIN_UTC);
            let db = b.release_date.unwrap_or(DateTime::<Utc>::MIN_UTC);
            db.cmp(&da).then_with(|| a.title.cmp(&b.title))
        });
    }

    /// Dedup then canonically sort
    pub fn normalized(&self) -> Catalog {
        let mut catalog = self.dedup();
        catalog.sort_canonical();
        catalog
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Edition;
    type IntoIter = std::slice::Iter<'a, Edition>;

    fn into_iter(self) -> Self::IntoIter {
        self.editions.iter()
    }
}

#[cfg(test)]
#[path = "edition_tests.rs"]
mod tests;
