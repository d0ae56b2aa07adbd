// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw sale` - Price-drop checker over the sale watch list
//!
//! Segment-scheduled: each run looks up a window of the watch list. An
//! edition on sale is announced and leaves the list; otherwise the stored
//! entry is refreshed with the latest observation.

use crate::adapters::Notifier;
use crate::commands::common::to_edition;
use crate::config::BotConfig;
use anyhow::Result;
use bw_adapters::{HttpLookup, NotifySink, Record, TracingMetrics};
use bw_core::{Edition, Outcome, Retryer, SystemSleeper};
use bw_engine::{SegmentConfig, SegmentReviewer, SegmentRunner, SegmentSummary};
use bw_storage::{CatalogRepo, FileStore};
use clap::Args;
use std::convert::Infallible;

#[derive(Args)]
pub struct SaleArgs {
    /// Normalize and rewrite the watch list without any lookups
    #[arg(long)]
    pub organize: bool,
}

/// Sale predicate and notification for one looked-up edition
pub struct SaleReviewer<N: NotifySink> {
    pub notify: N,
    /// Fraction of max price at or below which the edition is on sale
    pub discount_threshold: f64,
    /// Loyalty-point percentage of the price that counts as a sale
    pub point_threshold: f64,
}

impl<N: NotifySink> SaleReviewer<N> {
    fn is_sale(&self, edition: &Edition, record: &Record) -> bool {
        let Some(price) = record.price else {
            return false;
        };
        if edition.max_price > 0.0 && price <= edition.max_price * self.discount_threshold {
            return true;
        }
        if let Some(points) = record.loyalty_points {
            if price > 0.0 && points as f64 / price * 100.0 >= self.point_threshold {
                return true;
            }
        }
        false
    }
}

impl<N: NotifySink> SegmentReviewer for SaleReviewer<N> {
    type Error = Infallible;

    fn review(&self, edition: &Edition, record: &Record) -> Result<Outcome, Infallible> {
        if self.is_sale(edition, record) {
            let price = record.price.unwrap_or(0.0);
            let message = format!(
                "SALE: {} now {:.0} (max {:.0}) {}",
                record.title, price, edition.max_price, record.url
            );
            if let Err(err) = self.notify.post(&message) {
                tracing::warn!(%err, "sale notification failed");
            }
            return Ok(Outcome::Removed);
        }

        let mut fresh = to_edition(record);
        fresh.max_price = fresh.max_price.max(edition.max_price);
        if fresh == *edition {
            Ok(Outcome::Unchanged)
        } else {
            for change in edition.diff_fields(&fresh) {
                tracing::info!(
                    asin = %edition.asin,
                    field = change.field,
                    old = %change.old,
                    new = %change.new,
                    "edition changed"
                );
            }
            Ok(Outcome::Updated(fresh))
        }
    }
}

pub fn run(args: SaleArgs, config: &BotConfig) -> Result<()> {
    let store = FileStore::open(&config.store.path)?;
    if args.organize {
        return organize(&store, config);
    }

    let notify = Notifier::from_config(&config.notify);
    let retryer = Retryer::new(
        config.retry.policy(),
        SystemSleeper,
        TracingMetrics::new(),
        "sale",
    );
    let reviewer = SaleReviewer {
        notify: notify.clone(),
        discount_threshold: config.sale.discount_threshold,
        point_threshold: config.sale.point_threshold,
    };
    let runner = SegmentRunner::new(
        store,
        HttpLookup::new(config.lookup.endpoint.as_str()),
        retryer,
        notify,
        TracingMetrics::new(),
        SegmentConfig {
            catalog_key: config.sale.catalog_key.clone(),
            upcoming_key: config.sale.upcoming_key.clone(),
            cursor_key: config.sale.cursor_key.clone(),
            window: config.sale.window_size,
            namespace: "sale".to_string(),
        },
    );

    match runner.run(&reviewer)? {
        SegmentSummary::Skipped => println!("Nothing to check"),
        SegmentSummary::Completed {
            segment,
            processed,
            next_cursor,
            updated,
            lookup_failed,
        } => {
            println!(
                "Checked {processed} of {} items [{}..{}), cursor -> {next_cursor}{}{}",
                segment.len(),
                segment.start,
                segment.end,
                if updated { ", list updated" } else { "" },
                if lookup_failed { ", lookup failed" } else { "" },
            );
        }
    }
    Ok(())
}

fn organize(store: &FileStore, config: &BotConfig) -> Result<()> {
    let repo = CatalogRepo::new(store.clone());
    let catalog = repo.load(&config.sale.catalog_key)?;
    let normalized = catalog.normalized();
    if normalized == catalog {
        println!("Already organized ({} editions)", catalog.len());
    } else {
        repo.save(&config.sale.catalog_key, &normalized)?;
        println!("Organized {} editions", normalized.len());
    }
    Ok(())
}

#[cfg(test)]
#[path = "sale_tests.rs"]
mod tests;
