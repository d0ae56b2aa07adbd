// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! `bw paper` - Kindle-availability checker over the paper editions list
//!
//! Slot-scheduled: one paper edition is due per cycle window. A title search
//! that turns up a matching Kindle edition moves the book onto the sale
//! watch list and announces it.

use crate::adapters::Notifier;
use crate::commands::common::{base_title, is_kindle, print_slot_summary, to_edition};
use crate::config::BotConfig;
use anyhow::Result;
use bw_adapters::{
    HttpLookup, Lookup, LookupError, NotifySink, QueryKind, SearchQuery, TracingMetrics,
};
use bw_core::{Edition, MetricsSink, Outcome, RetryError, Retryer, Sleeper, SystemClock, SystemSleeper};
use bw_engine::{SlotConfig, SlotDecision, SlotProcessor, SlotRunner};
use bw_storage::FileStore;

/// Searches for a Kindle counterpart of a paper edition
pub struct PaperProcessor<L, N, S, M>
where
    L: Lookup,
    N: NotifySink,
    S: Sleeper,
    M: MetricsSink,
{
    pub lookup: L,
    pub retryer: Retryer<S, M>,
    pub notify: N,
    /// Watch list that gains the Kindle edition
    pub sale_key: String,
}

impl<L, N, S, M> SlotProcessor for PaperProcessor<L, N, S, M>
where
    L: Lookup,
    N: NotifySink,
    S: Sleeper,
    M: MetricsSink,
{
    type Error = RetryError<LookupError>;

    fn process(&self, _index: usize, edition: &Edition) -> Result<SlotDecision, Self::Error> {
        let base = base_title(&edition.title);
        let query = SearchQuery {
            kind: QueryKind::Title,
            value: base.clone(),
            max_price: None,
        };
        let records = self.retryer.call(|| self.lookup.search(&query))?;

        let Some(kindle) = records
            .iter()
            .filter(|r| is_kindle(r))
            .find(|r| base_title(&r.title) == base)
        else {
            return Ok(SlotDecision {
                outcome: Outcome::Unchanged,
                additions: Vec::new(),
            });
        };

        let message = format!("Kindle edition available: {} {}", kindle.title, kindle.url);
        if let Err(err) = self.notify.post(&message) {
            tracing::warn!(%err, "availability notification failed");
        }
        Ok(SlotDecision {
            outcome: Outcome::Removed,
            additions: vec![(self.sale_key.clone(), vec![to_edition(kindle)])],
        })
    }
}

pub fn run(config: &BotConfig) -> Result<()> {
    let store = FileStore::open(&config.store.path)?;
    let notify = Notifier::from_config(&config.notify);
    let processor = PaperProcessor {
        lookup: HttpLookup::new(config.lookup.endpoint.as_str()),
        retryer: Retryer::new(
            config.retry.policy(),
            SystemSleeper,
            TracingMetrics::new(),
            "paper",
        ),
        notify: notify.clone(),
        sale_key: config.paper.sale_key.clone(),
    };
    let runner = SlotRunner::new(
        store,
        SystemClock,
        notify,
        TracingMetrics::new(),
        SlotConfig {
            catalog_key: config.paper.catalog_key.clone(),
            cursor_key: config.paper.cursor_key.clone(),
            cycle_days: config.paper.cycle_days,
            namespace: "paper".to_string(),
        },
    );
    print_slot_summary("paper edition", &runner.run(&processor)?);
    Ok(())
}

#[cfg(test)]
#[path = "paper_tests.rs"]
mod tests;
