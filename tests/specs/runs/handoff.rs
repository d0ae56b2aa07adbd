//! A paper edition whose Kindle counterpart appears is handed off to the
//! sale checker through the shared store, then announced and retired once
//! its price drops.

use crate::prelude::*;
use bw_adapters::{FakeLookup, FakeMetrics, FakeNotify, NotifySink, Record};
use bw_core::{Edition, FakeClock, FakeSleeper, Outcome, RetryPolicy, Retryer};
use bw_engine::{
    SegmentConfig, SegmentReviewer, SegmentRunner, SlotConfig, SlotDecision, SlotProcessor,
    SlotRunner, SlotSummary,
};
use bw_storage::{CursorRepo, MemoryStore};
use std::convert::Infallible;
use std::time::Duration;

/// Stand-in for the paper checker's business rule: the Kindle counterpart
/// exists, so the paper entry retires and the Kindle edition joins the
/// upcoming list.
struct MoveToUpcoming;

impl SlotProcessor for MoveToUpcoming {
    type Error = Infallible;

    fn process(&self, _index: usize, edition: &Edition) -> Result<SlotDecision, Infallible> {
        let mut kindle = edition.clone();
        kindle.asin = format!("K{}", edition.asin);
        Ok(SlotDecision {
            outcome: Outcome::Removed,
            additions: vec![("upcoming.json".to_string(), vec![kindle])],
        })
    }
}

/// Stand-in for the sale checker's business rule: half price or better is
/// announced and retired from the watch list.
struct HalfPriceReviewer {
    notify: FakeNotify,
}

impl SegmentReviewer for HalfPriceReviewer {
    type Error = Infallible;

    fn review(&self, edition: &Edition, record: &Record) -> Result<Outcome, Infallible> {
        if record.price.unwrap_or(f64::MAX) <= edition.max_price * 0.5 {
            self.notify
                .post(&format!("SALE: {} {}", record.title, record.url))
                .unwrap();
            return Ok(Outcome::Removed);
        }
        Ok(Outcome::Unchanged)
    }
}

fn paper_runner(
    store: MemoryStore,
    clock: FakeClock,
) -> SlotRunner<MemoryStore, FakeClock, FakeNotify, FakeMetrics> {
    SlotRunner::new(
        store,
        clock,
        FakeNotify::new(),
        FakeMetrics::new(),
        SlotConfig {
            catalog_key: "paper.json".to_string(),
            cursor_key: "cursors/paper".to_string(),
            cycle_days: 1.0,
            namespace: "paper".to_string(),
        },
    )
}

fn sale_runner(
    store: MemoryStore,
    lookup: FakeLookup,
    notify: FakeNotify,
) -> SegmentRunner<MemoryStore, FakeLookup, FakeSleeper, FakeNotify, FakeMetrics> {
    let retryer = Retryer::new(
        RetryPolicy::new(2, Duration::ZERO).with_jitter(Duration::ZERO),
        FakeSleeper::new(),
        FakeMetrics::new(),
        "sale",
    );
    SegmentRunner::new(
        store,
        lookup,
        retryer,
        notify,
        FakeMetrics::new(),
        SegmentConfig {
            catalog_key: "sale.json".to_string(),
            upcoming_key: Some("upcoming.json".to_string()),
            cursor_key: "cursors/sale".to_string(),
            window: 10,
            namespace: "sale".to_string(),
        },
    )
}

#[test]
fn paper_edition_flows_through_to_a_sale_announcement() {
    let store = MemoryStore::new();
    seed_catalog(
        &store,
        "paper.json",
        vec![
            edition("4001", "Some Novel", 1_000, 1200.0),
            edition("4002", "Other Novel", 500, 900.0),
        ],
    );
    seed_catalog(&store, "sale.json", Vec::new());
    let clock = FakeClock::new();

    // Paper run retires the due entry and queues its Kindle edition.
    let paper = paper_runner(store.clone(), clock.clone());
    let summary = paper.run(&MoveToUpcoming).unwrap();
    assert!(matches!(summary, SlotSummary::Completed { due: 0, .. }));
    let remaining = load_catalog(&store, "paper.json");
    assert_eq!(remaining.len(), 1);
    assert!(remaining.find("4001").is_none());
    let upcoming = load_catalog(&store, "upcoming.json");
    assert_eq!(upcoming.len(), 1);
    assert!(upcoming.find("K4001").is_some());

    // A second trigger inside the same window is gated off.
    assert_eq!(
        paper.run(&MoveToUpcoming).unwrap(),
        SlotSummary::Skipped { due: 0 }
    );

    // Sale run absorbs the queued edition; its price has halved upstream.
    let queued = upcoming.get(0).unwrap().clone();
    let lookup = FakeLookup::new();
    lookup.push_response(Ok(vec![record_for(&queued, 600.0)]));
    let notify = FakeNotify::new();
    let sale = sale_runner(store.clone(), lookup, notify.clone());
    let reviewer = HalfPriceReviewer {
        notify: notify.clone(),
    };
    sale.run(&reviewer).unwrap();

    // Announced, retired, and the feeder list emptied.
    assert_eq!(notify.posts().len(), 1);
    assert!(notify.posts()[0].starts_with("SALE:"));
    assert!(load_catalog(&store, "sale.json").is_empty());
    assert!(load_catalog(&store, "upcoming.json").is_empty());
    assert_eq!(
        CursorRepo::new(store).load("cursors/sale").unwrap(),
        Some(1)
    );
}

#[test]
fn surviving_editions_land_on_the_watch_list() {
    let store = MemoryStore::new();
    seed_catalog(&store, "sale.json", Vec::new());
    seed_catalog(
        &store,
        "upcoming.json",
        vec![edition("K5001", "Another Novel", 2_000, 800.0)],
    );
    let lookup = FakeLookup::new();
    let full_price = record_for(&edition("K5001", "Another Novel", 2_000, 800.0), 800.0);
    lookup.push_response(Ok(vec![full_price]));
    let notify = FakeNotify::new();
    let sale = sale_runner(store.clone(), lookup, notify.clone());

    sale.run(&HalfPriceReviewer {
        notify: notify.clone(),
    })
    .unwrap();

    // Not on sale yet: absorbed into the watch list and kept there.
    let watch = load_catalog(&store, "sale.json");
    assert_eq!(watch.len(), 1);
    assert!(watch.find("K5001").is_some());
    assert!(load_catalog(&store, "upcoming.json").is_empty());
    assert!(notify.posts().is_empty());
}
