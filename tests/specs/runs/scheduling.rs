//! Scheduling state lives entirely in the store: fresh runner instances
//! (one per process invocation) resume exactly where the last one stopped.

use crate::prelude::*;
use bw_adapters::{FakeLookup, FakeMetrics, FakeNotify, Record};
use bw_core::{Edition, FakeClock, FakeSleeper, Outcome, RetryPolicy, Retryer};
use bw_engine::{
    SegmentConfig, SegmentReviewer, SegmentRunner, SegmentSummary, SlotConfig, SlotDecision,
    SlotProcessor, SlotRunner, SlotSummary,
};
use bw_storage::{CursorRepo, MemoryStore};
use std::convert::Infallible;
use std::time::Duration;

struct KeepEverything;

impl SlotProcessor for KeepEverything {
    type Error = Infallible;

    fn process(&self, _index: usize, _edition: &Edition) -> Result<SlotDecision, Infallible> {
        Ok(SlotDecision {
            outcome: Outcome::Unchanged,
            additions: Vec::new(),
        })
    }
}

impl SegmentReviewer for KeepEverything {
    type Error = Infallible;

    fn review(&self, _edition: &Edition, _record: &Record) -> Result<Outcome, Infallible> {
        Ok(Outcome::Unchanged)
    }
}

fn slot_runner(
    store: MemoryStore,
    clock: FakeClock,
) -> SlotRunner<MemoryStore, FakeClock, FakeNotify, FakeMetrics> {
    SlotRunner::new(
        store,
        clock,
        FakeNotify::new(),
        FakeMetrics::new(),
        SlotConfig {
            catalog_key: "releases.json".to_string(),
            cursor_key: "cursors/releases".to_string(),
            cycle_days: 1.0,
            namespace: "releases".to_string(),
        },
    )
}

fn segment_runner(
    store: MemoryStore,
    lookup: FakeLookup,
) -> SegmentRunner<MemoryStore, FakeLookup, FakeSleeper, FakeNotify, FakeMetrics> {
    let retryer = Retryer::new(
        RetryPolicy::new(1, Duration::ZERO).with_jitter(Duration::ZERO),
        FakeSleeper::new(),
        FakeMetrics::new(),
        "sale",
    );
    SegmentRunner::new(
        store,
        lookup,
        retryer,
        FakeNotify::new(),
        FakeMetrics::new(),
        SegmentConfig {
            catalog_key: "sale.json".to_string(),
            upcoming_key: None,
            cursor_key: "cursors/sale".to_string(),
            window: 10,
            namespace: "sale".to_string(),
        },
    )
}

#[test]
fn each_window_of_the_cycle_processes_the_next_position() {
    let store = MemoryStore::new();
    // Three series, one day: each position owns an eight-hour window.
    seed_catalog(
        &store,
        "releases.json",
        vec![
            edition("B001", "Series A", 3_000, 660.0),
            edition("B002", "Series B", 2_000, 660.0),
            edition("B003", "Series C", 1_000, 660.0),
        ],
    );
    let clock = FakeClock::new();

    let mut handled = Vec::new();
    // Trigger far more often than the window width, as cron would.
    for _ in 0..12 {
        // A fresh runner each time: nothing carries over in memory.
        let runner = slot_runner(store.clone(), clock.clone());
        if let SlotSummary::Completed { due, .. } = runner.run(&KeepEverything).unwrap() {
            handled.push(due);
        }
        clock.advance(chrono::Duration::hours(2));
    }

    // One pass over every position, in order, exactly once.
    assert_eq!(handled, vec![0, 1, 2]);
}

#[test]
fn segment_cursor_walks_the_catalog_and_wraps() {
    let store = MemoryStore::new();
    let editions: Vec<Edition> = (0..25)
        .map(|i| edition(&format!("B{i:03}"), &format!("Series {i:03}"), 1_000, 660.0))
        .collect();
    seed_catalog(&store, "sale.json", editions.clone());
    CursorRepo::new(store.clone()).save("cursors/sale", 20).unwrap();

    let lookup = FakeLookup::new();
    lookup.push_response(Ok(editions[20..25].iter().map(|e| record_for(e, 660.0)).collect()));
    let runner = segment_runner(store.clone(), lookup);
    let summary = runner.run(&KeepEverything).unwrap();
    match summary {
        SegmentSummary::Completed {
            segment,
            processed,
            next_cursor,
            ..
        } => {
            // Tail window is short: [20, 25).
            assert_eq!((segment.start, segment.end), (20, 25));
            assert_eq!(processed, 5);
            assert_eq!(next_cursor, 25);
        }
        other => panic!("expected completion, got {other:?}"),
    }

    // Next invocation starts over from the top.
    let lookup = FakeLookup::new();
    lookup.push_response(Ok(editions[0..10].iter().map(|e| record_for(e, 660.0)).collect()));
    let runner = segment_runner(store.clone(), lookup);
    match runner.run(&KeepEverything).unwrap() {
        SegmentSummary::Completed { segment, .. } => {
            assert_eq!((segment.start, segment.end), (0, 10));
        }
        other => panic!("expected completion, got {other:?}"),
    }
}
