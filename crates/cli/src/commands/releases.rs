// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw releases` - New-volume checker over the monitored series list
//!
//! Slot-scheduled: each series entry tracks the latest known volume, and one
//! series is due per cycle window. A search for the series title turns up
//! newer Kindle volumes; each is announced, queued on the upcoming list for
//! the sale checker, and the newest becomes the tracked volume.

use crate::adapters::Notifier;
use crate::commands::common::{base_title, is_kindle, print_slot_summary, to_edition};
use crate::config::BotConfig;
use anyhow::Result;
use bw_adapters::{
    HttpLookup, Lookup, LookupError, NotifySink, QueryKind, SearchQuery, TracingMetrics,
};
use bw_core::{
    next_due_at, due_index, Clock, Edition, MetricsSink, Outcome, RetryError, Retryer, Sleeper,
    SystemClock, SystemSleeper,
};
use bw_engine::{SlotConfig, SlotDecision, SlotProcessor, SlotRunner};
use bw_storage::{CatalogRepo, FileStore};
use chrono::{DateTime, Utc};
use clap::Args;
use std::collections::HashSet;

#[derive(Args)]
pub struct ReleasesArgs {
    /// Print which series is due and when the next window opens, then exit
    #[arg(long)]
    pub show_next: bool,
}

/// Searches for volumes newer than the tracked one
pub struct ReleaseProcessor<L, N, S, M>
where
    L: Lookup,
    N: NotifySink,
    S: Sleeper,
    M: MetricsSink,
{
    pub lookup: L,
    pub retryer: Retryer<S, M>,
    pub notify: N,
    /// Where newly found volumes are queued for the sale checker
    pub upcoming_key: Option<String>,
}

impl<L, N, S, M> SlotProcessor for ReleaseProcessor<L, N, S, M>
where
    L: Lookup,
    N: NotifySink,
    S: Sleeper,
    M: MetricsSink,
{
    type Error = RetryError<LookupError>;

    fn process(&self, _index: usize, edition: &Edition) -> Result<SlotDecision, Self::Error> {
        let query = SearchQuery {
            kind: QueryKind::Title,
            value: base_title(&edition.title),
            max_price: None,
        };
        let records = self.retryer.call(|| self.lookup.search(&query))?;

        let mut found: Vec<Edition> = records
            .iter()
            .filter(|r| is_kindle(r))
            .filter(|r| is_newer(edition.release_date, r.release_date))
            .map(to_edition)
            .collect();
        // Dedup before sorting: equal ASINs from upstream may carry different
        // dates and would not be adjacent afterwards. First occurrence wins.
        let mut seen = HashSet::new();
        found.retain(|e| seen.insert(e.asin.clone()));
        found.sort_by_key(|e| e.release_date);

        let Some(newest) = found.last().cloned() else {
            return Ok(SlotDecision {
                outcome: Outcome::Unchanged,
                additions: Vec::new(),
            });
        };

        for volume in &found {
            let message = format!(
                "New release: {} ({}) {}",
                volume.title,
                volume
                    .release_date
                    .map_or_else(|| "undated".to_string(), |d| d.format("%Y-%m-%d").to_string()),
                volume.url
            );
            if let Err(err) = self.notify.post(&message) {
                tracing::warn!(%err, "release notification failed");
            }
        }

        let additions = match &self.upcoming_key {
            Some(key) => vec![(key.clone(), found)],
            None => Vec::new(),
        };
        Ok(SlotDecision {
            outcome: Outcome::Updated(newest),
            additions,
        })
    }
}

/// True when `candidate` is dated and strictly after the tracked date.
/// An undated tracked volume accepts any dated one.
fn is_newer(known: Option<DateTime<Utc>>, candidate: Option<DateTime<Utc>>) -> bool {
    match (known, candidate) {
        (_, None) => false,
        (None, Some(_)) => true,
        (Some(known), Some(candidate)) => candidate > known,
    }
}

pub fn run(args: ReleasesArgs, config: &BotConfig) -> Result<()> {
    let store = FileStore::open(&config.store.path)?;
    if args.show_next {
        return show_next(&store, config);
    }

    let notify = Notifier::from_config(&config.notify);
    let processor = ReleaseProcessor {
        lookup: HttpLookup::new(config.lookup.endpoint.as_str()),
        retryer: Retryer::new(
            config.retry.policy(),
            SystemSleeper,
            TracingMetrics::new(),
            "releases",
        ),
        notify: notify.clone(),
        upcoming_key: config.releases.upcoming_key.clone(),
    };
    let runner = SlotRunner::new(
        store,
        SystemClock,
        notify,
        TracingMetrics::new(),
        SlotConfig {
            catalog_key: config.releases.catalog_key.clone(),
            cursor_key: config.releases.cursor_key.clone(),
            cycle_days: config.releases.cycle_days,
            namespace: "releases".to_string(),
        },
    );
    print_slot_summary("series", &runner.run(&processor)?);
    Ok(())
}

fn show_next(store: &FileStore, config: &BotConfig) -> Result<()> {
    let catalog = CatalogRepo::new(store.clone()).load(&config.releases.catalog_key)?;
    let now = SystemClock.now();
    let due = due_index(now, catalog.len(), config.releases.cycle_days)?;
    let next = next_due_at(now, catalog.len(), config.releases.cycle_days)?;
    if let Some(edition) = catalog.get(due) {
        println!(
            "Current slot: {:03} / {:03} {}",
            due + 1,
            catalog.len(),
            edition.title
        );
    }
    println!("Next slot at {}", next.format("%Y-%m-%d %H:%M:%S UTC"));
    Ok(())
}

#[cfg(test)]
#[path = "releases_tests.rs"]
mod tests;
