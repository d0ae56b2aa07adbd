// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation of per-run outcomes into the authoritative catalog
//!
//! One run attempts a work unit (a [`Segment`] of the catalog) and produces
//! an [`Outcome`] per attempted ASIN. Merging folds those outcomes back:
//! everything outside the work unit is untouched, failed items stay in place
//! for the next pass, and the result is re-normalized. Callers compare the
//! result against the original and skip the write when nothing changed.

use crate::edition::{Catalog, Edition};
use crate::segment::Segment;
use std::collections::HashMap;

/// What one run learned about an attempted edition
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    /// Nothing new observed; keep the stored edition
    Unchanged,
    /// Fresh observation; substitute, preserving max-price monotonicity
    Updated(Edition),
    /// The edition leaves this catalog (e.g. moved to another list)
    Removed,
    /// Lookup or review failed; keep the stored edition and retry next pass
    Failed,
}

/// Fold `outcomes` for the attempted `segment` back into `original`
///
/// An attempted ASIN with no outcome is treated as [`Outcome::Failed`]: the
/// stored edition survives untouched. Updated editions never lower
/// `max_price` below the stored value. The result is deduplicated by ASIN
/// (first occurrence wins) and canonically sorted, so merging the same
/// outcome set twice yields the same catalog as merging it once.
pub fn merge_segment(
    original: &Catalog,
    segment: Segment,
    outcomes: &HashMap<String, Outcome>,
) -> Catalog {
    let mut merged = Vec::with_capacity(original.len());
    for (index, edition) in original.iter().enumerate() {
        if !segment.contains(index) {
            merged.push(edition.clone());
            continue;
        }
        match outcomes.get(&edition.asin) {
            None | Some(Outcome::Failed) | Some(Outcome::Unchanged) => {
                merged.push(edition.clone());
            }
            Some(Outcome::Removed) => {}
            Some(Outcome::Updated(observed)) => {
                let mut updated = observed.clone();
                updated.max_price = updated.max_price.max(edition.max_price);
                merged.push(updated);
            }
        }
    }
    Catalog::new(merged).normalized()
}

#[cfg(test)]
#[path = "merge_tests.rs"]
mod tests;
