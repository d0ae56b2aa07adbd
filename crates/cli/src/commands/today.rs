// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw today` - Release-day notifier over the tracked lists
//!
//! Read-only: scans the sale watch list and the upcoming list for editions
//! whose release date falls on today's calendar date and announces each one,
//! deduped by ASIN. No cursor, no writes; safe to run any number of times a
//! day (each run re-announces, so schedule it once).

use crate::adapters::Notifier;
use crate::config::BotConfig;
use anyhow::{anyhow, Result};
use bw_adapters::NotifySink;
use bw_core::{Catalog, Clock, Edition, SystemClock};
use bw_storage::{CatalogRepo, FileStore, StorageError};
use chrono::{FixedOffset, NaiveDate};

pub fn run(config: &BotConfig) -> Result<()> {
    let store = FileStore::open(&config.store.path)?;
    let repo = CatalogRepo::new(store);

    let mut combined = repo.load(&config.sale.catalog_key)?;
    if let Some(key) = &config.sale.upcoming_key {
        match repo.load(key) {
            Ok(upcoming) => combined.extend(upcoming.iter().cloned()),
            Err(StorageError::NotFound(_)) => {}
            Err(err) => return Err(err.into()),
        }
    }

    let offset = FixedOffset::east_opt(config.today.utc_offset_hours * 3600)
        .ok_or_else(|| anyhow!("utc_offset_hours out of range: {}", config.today.utc_offset_hours))?;
    let today = SystemClock.now().with_timezone(&offset).date_naive();
    tracing::info!(%today, "checking for release-day editions");

    let notify = Notifier::from_config(&config.notify);
    let announced = announce_released_on(&combined, today, offset, &notify);
    if announced == 0 {
        println!("Nothing released today");
    } else {
        println!("Released today: {announced} ({} tracked)", combined.dedup().len());
    }
    Ok(())
}

/// Announce every edition released on `today`, deduped by ASIN
pub(crate) fn announce_released_on<N: NotifySink>(
    catalog: &Catalog,
    today: NaiveDate,
    offset: FixedOffset,
    notify: &N,
) -> usize {
    let unique = catalog.dedup();
    let mut announced = 0;
    for edition in &unique {
        if !released_on(edition, today, offset) {
            continue;
        }
        tracing::info!(asin = %edition.asin, title = %edition.title, "released today");
        let message = format!("Released today: {} {}", edition.title, edition.url);
        if let Err(err) = notify.post(&message) {
            tracing::warn!(%err, "release-day notification failed");
        }
        announced += 1;
    }
    announced
}

/// Calendar-date match in the configured zone; undated editions never match
fn released_on(edition: &Edition, today: NaiveDate, offset: FixedOffset) -> bool {
    edition
        .release_date
        .is_some_and(|date| date.with_timezone(&offset).date_naive() == today)
}

#[cfg(test)]
#[path = "today_tests.rs"]
mod tests;
