// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Slot-scheduled runs
//!
//! One catalog position is due per cycle window. The run claims the window
//! by persisting the fresh due index before any remote work, then hands the
//! due edition to a [`SlotProcessor`] for the actual lookup and business
//! decision. Processor failures are alerted and counted but never roll back
//! the cursor; the missed position comes around again next cycle.

use crate::error::RunError;
use bw_adapters::NotifySink;
use bw_core::{
    due_index, is_my_slot, merge_segment, Catalog, Clock, Edition, MetricsSink, Outcome, Segment,
};
use bw_storage::{BlobStore, CatalogRepo, CursorRepo, StorageError};
use std::collections::HashMap;

/// Keys and schedule shape for one slot-scheduled checker
#[derive(Debug, Clone)]
pub struct SlotConfig {
    /// Blob key of the authoritative catalog
    pub catalog_key: String,
    /// Blob key of the persisted due-index cursor
    pub cursor_key: String,
    /// Full-catalog coverage period in days
    pub cycle_days: f64,
    /// Metrics namespace for this checker
    pub namespace: String,
}

/// What a processor decided about the due edition
#[derive(Debug, Clone)]
pub struct SlotDecision {
    /// Reconciliation outcome for the due edition itself
    pub outcome: Outcome,
    /// Editions to append to other catalogs, keyed by destination blob key
    pub additions: Vec<(String, Vec<Edition>)>,
}

/// Business logic applied to the single due edition.
///
/// Implementations do their own lookups and post their own routine
/// notifications; the runner owns cursor, merge, and alerting.
pub trait SlotProcessor {
    type Error: std::error::Error;

    fn process(&self, index: usize, edition: &Edition) -> Result<SlotDecision, Self::Error>;
}

/// What one slot run did
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SlotSummary {
    /// The due index matched the persisted cursor; not our slot
    Skipped { due: usize },
    /// The due edition was processed and reconciled
    Completed {
        due: usize,
        asin: String,
        /// Whether the authoritative catalog was rewritten
        updated: bool,
    },
    /// The processor failed; cursor already advanced, catalog untouched
    Failed { due: usize, asin: String },
}

/// Executes slot-scheduled runs against one catalog
#[derive(Clone)]
pub struct SlotRunner<S: BlobStore, C: Clock, N: NotifySink, M: MetricsSink> {
    catalogs: CatalogRepo<S>,
    cursors: CursorRepo<S>,
    clock: C,
    notify: N,
    metrics: M,
    config: SlotConfig,
}

impl<S: BlobStore, C: Clock, N: NotifySink, M: MetricsSink> SlotRunner<S, C, N, M> {
    pub fn new(store: S, clock: C, notify: N, metrics: M, config: SlotConfig) -> Self {
        Self {
            catalogs: CatalogRepo::new(store.clone()),
            cursors: CursorRepo::new(store),
            clock,
            notify,
            metrics,
            config,
        }
    }

    pub fn run<P: SlotProcessor>(&self, processor: &P) -> Result<SlotSummary, RunError> {
        let catalog = self.catalogs.load(&self.config.catalog_key)?;
        let due = due_index(self.clock.now(), catalog.len(), self.config.cycle_days)?;
        let previous = self.cursors.load(&self.config.cursor_key)?;
        if !is_my_slot(previous, due) {
            tracing::debug!(due, "slot already handled");
            self.metrics.incr(&self.config.namespace, "slot_skip");
            return Ok(SlotSummary::Skipped { due });
        }

        // Claim the window before any remote work. A crash after this point
        // costs one missed position until the next cycle, never a stuck run.
        self.cursors.save(&self.config.cursor_key, due)?;

        let Some(edition) = catalog.get(due) else {
            return Ok(SlotSummary::Skipped { due });
        };
        tracing::info!(
            due,
            total = catalog.len(),
            asin = %edition.asin,
            "processing slot"
        );

        let decision = match processor.process(due, edition) {
            Ok(decision) => decision,
            Err(err) => {
                self.metrics.incr(&self.config.namespace, "slot_failure");
                self.alert(&format!(
                    "{:03} / {:03} {} {} failed: {err}",
                    due + 1,
                    catalog.len(),
                    edition.asin,
                    edition.url
                ));
                return Ok(SlotSummary::Failed {
                    due,
                    asin: edition.asin.clone(),
                });
            }
        };

        // Destination catalogs first. An interrupted run may duplicate an
        // append (dedup absorbs it next pass) but never drop an edition that
        // was already removed from the source.
        for (key, editions) in &decision.additions {
            self.append_to(key, editions)?;
        }

        let outcomes = HashMap::from([(edition.asin.clone(), decision.outcome)]);
        let asin = edition.asin.clone();
        let merged = merge_segment(
            &catalog,
            Segment {
                start: due,
                end: due + 1,
            },
            &outcomes,
        );
        let updated = merged != catalog;
        if updated {
            self.catalogs.save(&self.config.catalog_key, &merged)?;
        }
        self.metrics.incr(&self.config.namespace, "slot_success");
        Ok(SlotSummary::Completed { due, asin, updated })
    }

    fn append_to(&self, key: &str, editions: &[Edition]) -> Result<(), RunError> {
        if editions.is_empty() {
            return Ok(());
        }
        let mut destination = match self.catalogs.load(key) {
            Ok(catalog) => catalog,
            Err(StorageError::NotFound(_)) => Catalog::default(),
            Err(err) => return Err(err.into()),
        };
        destination.extend(editions.iter().cloned());
        self.catalogs.save(key, &destination.normalized())?;
        Ok(())
    }

    fn alert(&self, message: &str) {
        if let Err(err) = self.notify.alert(message) {
            tracing::warn!(%err, "alert delivery failed");
        }
    }
}

#[cfg(test)]
#[path = "slot_run_tests.rs"]
mod tests;
