// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Segment-scheduled runs
//!
//! Each run covers a fixed window of catalog positions starting at a
//! persisted offset. Lookups go upstream in bounded batches under the retry
//! policy; the cursor then advances by the number of items actually
//! attempted, so a failed batch keeps its items in place for the next pass.
//! Partial batch responses (fewer records than identifiers requested) are
//! alerted and the missing items kept unchanged, never silently dropped.

use crate::error::RunError;
use bw_adapters::{Lookup, NotifySink, Record, MAX_BATCH};
use bw_core::{
    merge_segment, Catalog, Edition, MetricsSink, Outcome, Retryer, Segment, Sleeper,
};
use bw_storage::{BlobStore, CatalogRepo, CursorRepo, StorageError};
use std::collections::HashMap;

/// Keys and window shape for one segment-scheduled checker
#[derive(Debug, Clone)]
pub struct SegmentConfig {
    /// Blob key of the authoritative catalog
    pub catalog_key: String,
    /// Optional blob key of a feeder list absorbed into the catalog each run
    pub upcoming_key: Option<String>,
    /// Blob key of the persisted window-offset cursor
    pub cursor_key: String,
    /// Positions attempted per run
    pub window: usize,
    /// Metrics namespace for this checker
    pub namespace: String,
}

/// Business logic applied to each looked-up edition.
///
/// `record` is the fresh upstream observation for the stored `edition`.
/// Implementations post their own routine notifications; the runner owns
/// cursor, merge, and alerting.
pub trait SegmentReviewer {
    type Error: std::error::Error;

    fn review(&self, edition: &Edition, record: &Record) -> Result<Outcome, Self::Error>;
}

/// What one segment run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SegmentSummary {
    /// Nothing to process (empty catalog)
    Skipped,
    Completed {
        segment: Segment,
        /// Items attempted before the run stopped
        processed: usize,
        /// Persisted cursor for the next run
        next_cursor: usize,
        /// Whether the authoritative catalog was rewritten
        updated: bool,
        /// Whether a batch lookup gave up mid-window
        lookup_failed: bool,
    },
}

/// Executes segment-scheduled runs against one catalog
#[derive(Clone)]
pub struct SegmentRunner<S, L, Sl, N, M>
where
    S: BlobStore,
    L: Lookup,
    Sl: Sleeper,
    N: NotifySink,
    M: MetricsSink,
{
    catalogs: CatalogRepo<S>,
    cursors: CursorRepo<S>,
    lookup: L,
    retryer: Retryer<Sl, M>,
    notify: N,
    metrics: M,
    config: SegmentConfig,
}

impl<S, L, Sl, N, M> SegmentRunner<S, L, Sl, N, M>
where
    S: BlobStore,
    L: Lookup,
    Sl: Sleeper,
    N: NotifySink,
    M: MetricsSink,
{
    pub fn new(
        store: S,
        lookup: L,
        retryer: Retryer<Sl, M>,
        notify: N,
        metrics: M,
        config: SegmentConfig,
    ) -> Self {
        Self {
            catalogs: CatalogRepo::new(store.clone()),
            cursors: CursorRepo::new(store),
            lookup,
            retryer,
            notify,
            metrics,
            config,
        }
    }

    pub fn run<R: SegmentReviewer>(&self, reviewer: &R) -> Result<SegmentSummary, RunError> {
        let source = self.catalogs.load(&self.config.catalog_key)?;
        let upcoming = self.load_upcoming()?;

        let mut combined = source.clone();
        combined.extend(upcoming.iter().cloned());
        let combined = combined.dedup();
        if combined.is_empty() {
            tracing::debug!("empty catalog, nothing to process");
            return Ok(SegmentSummary::Skipped);
        }

        let cursor = self.cursors.load(&self.config.cursor_key)?.unwrap_or(0);
        let segment = Segment::select(cursor, self.config.window, combined.len());
        tracing::info!(
            start = segment.start,
            end = segment.end,
            total = combined.len(),
            "processing segment"
        );

        let attempted: Vec<&Edition> = segment.range().filter_map(|i| combined.get(i)).collect();
        let mut outcomes: HashMap<String, Outcome> = HashMap::new();
        let mut processed = 0usize;
        let mut lookup_failed = false;

        for chunk in attempted.chunks(MAX_BATCH) {
            let asins: Vec<String> = chunk.iter().map(|e| e.asin.clone()).collect();
            let records = match self.retryer.call(|| self.lookup.get_items(&asins)) {
                Ok(records) => records,
                Err(err) => {
                    // Unattempted items keep their positions; the cursor
                    // advance below stops short of them.
                    lookup_failed = true;
                    let first = segment.start + processed;
                    self.alert(&format!(
                        "batch lookup failed for items {:03}-{:03} of {:03}: {err}",
                        first + 1,
                        first + chunk.len(),
                        combined.len()
                    ));
                    break;
                }
            };

            let by_asin: HashMap<&str, &Record> =
                records.iter().map(|r| (r.asin.as_str(), r)).collect();
            if records.len() < chunk.len() {
                let missing: Vec<String> = chunk
                    .iter()
                    .filter(|e| !by_asin.contains_key(e.asin.as_str()))
                    .map(|e| describe(e))
                    .collect();
                self.alert(&format!(
                    "partial batch: requested {}, received {}; missing:\n{}",
                    chunk.len(),
                    records.len(),
                    missing.join("\n")
                ));
            }

            for edition in chunk {
                let position = segment.start + processed;
                let outcome = match by_asin.get(edition.asin.as_str()) {
                    None => Outcome::Failed,
                    Some(record) => match reviewer.review(edition, record) {
                        Ok(outcome) => outcome,
                        Err(err) => {
                            self.alert(&format!(
                                "{:03} / {:03} {} {} review failed: {err}",
                                position + 1,
                                combined.len(),
                                edition.asin,
                                edition.url
                            ));
                            Outcome::Failed
                        }
                    },
                };
                outcomes.insert(edition.asin.clone(), outcome);
                processed += 1;
            }
        }

        // Cursor before write-back, mirroring the slot runner's claim-first
        // ordering.
        let next_cursor = segment.advanced(processed);
        self.cursors.save(&self.config.cursor_key, next_cursor)?;

        let merged = merge_segment(&combined, segment, &outcomes);
        let updated = merged != source;
        if updated {
            self.catalogs.save(&self.config.catalog_key, &merged)?;
        }
        self.clear_upcoming(&upcoming)?;

        let name = if lookup_failed {
            "segment_failure"
        } else {
            "segment_success"
        };
        self.metrics.incr(&self.config.namespace, name);
        Ok(SegmentSummary::Completed {
            segment,
            processed,
            next_cursor,
            updated,
            lookup_failed,
        })
    }

    fn load_upcoming(&self) -> Result<Catalog, RunError> {
        let Some(key) = &self.config.upcoming_key else {
            return Ok(Catalog::default());
        };
        match self.catalogs.load(key) {
            Ok(catalog) => Ok(catalog),
            Err(StorageError::NotFound(_)) => Ok(Catalog::default()),
            Err(err) => Err(err.into()),
        }
    }

    /// Empty the feeder list, but only if it still holds exactly what this
    /// run absorbed; concurrent appends survive for the next run.
    fn clear_upcoming(&self, absorbed: &Catalog) -> Result<(), RunError> {
        let Some(key) = &self.config.upcoming_key else {
            return Ok(());
        };
        if absorbed.is_empty() {
            return Ok(());
        }
        let current = match self.catalogs.load(key) {
            Ok(catalog) => catalog,
            Err(StorageError::NotFound(_)) => Catalog::default(),
            Err(err) => return Err(err.into()),
        };
        if current == *absorbed {
            self.catalogs.save(key, &Catalog::default())?;
        } else {
            tracing::warn!(key = %key, "feeder list changed during run, leaving it");
        }
        Ok(())
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.notify.alert(message) {
            tracing::warn!(%err, "alert delivery failed");
        }
    }
}

/// One line identifying an edition in an operator alert
fn describe(edition: &Edition) -> String {
    let date = edition
        .release_date
        .map_or_else(|| "-".to_string(), |d| d.format("%Y-%m-%d").to_string());
    format!("{} {} ({date}) {}", edition.asin, edition.title, edition.url)
}

#[cfg(test)]
#[path = "segment_run_tests.rs"]
mod tests;
