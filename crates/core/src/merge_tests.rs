// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

use super::*;
use chrono::{TimeZone, Utc};

fn dated(asin: &str, title: &str, y: i32) -> Edition {
    Edition {
        asin: asin.to_string(),
        title: title.to_string(),
        release_date: Some(Utc.with_ymd_and_hms(y, 1, 1, 0, 0, 0).unwrap()),
        current_price: 500.0,
        max_price: 500.0,
        url: format!("https://example.com/dp/{}", asin),
    }
}

fn catalog() -> Catalog {
    // Canonical order: newest first.
    Catalog::new(vec![
        dated("A1", "Newest", 2026),
        dated("A2", "Middle", 2025),
        dated("A3", "Oldest", 2024),
    ])
}

#[test]
fn items_outside_work_unit_are_untouched() {
    let original = catalog();
    let segment = Segment::select(1, 1, 3);
    let outcomes = HashMap::from([("A2".to_string(), Outcome::Removed)]);

    let merged = merge_segment(&original, segment, &outcomes);

    assert_eq!(merged.len(), 2);
    assert!(merged.find("A1").is_some());
    assert!(merged.find("A3").is_some());
}

#[test]
fn failed_and_missing_outcomes_keep_originals() {
    let original = catalog();
    let segment = Segment::select(0, 3, 3);
    // A1 failed explicitly, A2 has no outcome at all, A3 unchanged.
    let outcomes = HashMap::from([
        ("A1".to_string(), Outcome::Failed),
        ("A3".to_string(), Outcome::Unchanged),
    ]);

    let merged = merge_segment(&original, segment, &outcomes);
    assert_eq!(merged, original);
}

#[test]
fn updated_substitutes_and_keeps_max_price_monotonic() {
    let mut original = catalog();
    original = Catalog::new(
        original
            .iter()
            .cloned()
            .map(|mut e| {
                if e.asin == "A2" {
                    e.max_price = 900.0;
                }
                e
            })
            .collect(),
    );
    let segment = Segment::select(0, 3, 3);

    let mut observed = dated("A2", "Middle", 2025);
    observed.current_price = 400.0;
    observed.max_price = 400.0;
    let outcomes = HashMap::from([("A2".to_string(), Outcome::Updated(observed))]);

    let merged = merge_segment(&original, segment, &outcomes);
    let updated = merged.find("A2").unwrap();
    assert_eq!(updated.current_price, 400.0);
    // Stored maximum survives a lower observation.
    assert_eq!(updated.max_price, 900.0);
}

#[test]
fn updated_raises_max_price_on_higher_observation() {
    let original = catalog();
    let segment = Segment::select(0, 3, 3);

    let mut observed = dated("A1", "Newest", 2026);
    observed.current_price = 800.0;
    observed.max_price = 800.0;
    let outcomes = HashMap::from([("A1".to_string(), Outcome::Updated(observed))]);

    let merged = merge_segment(&original, segment, &outcomes);
    assert_eq!(merged.find("A1").unwrap().max_price, 800.0);
}

#[test]
fn merge_is_idempotent() {
    let original = catalog();
    let segment = Segment::select(0, 3, 3);
    let mut observed = dated("A2", "Middle", 2025);
    observed.current_price = 350.0;
    let outcomes = HashMap::from([
        ("A1".to_string(), Outcome::Removed),
        ("A2".to_string(), Outcome::Updated(observed)),
        ("A3".to_string(), Outcome::Unchanged),
    ]);

    let once = merge_segment(&original, segment, &outcomes);
    let twice = merge_segment(&once, Segment::select(0, 3, once.len()), &outcomes);

    assert_eq!(once, twice);
}

#[test]
fn result_is_canonically_sorted() {
    let original = catalog();
    let segment = Segment::select(0, 3, 3);
    // Move A3 to 2027, which should re-sort it to the front.
    let outcomes = HashMap::from([("A3".to_string(), Outcome::Updated(dated("A3", "Oldest", 2027)))]);

    let merged = merge_segment(&original, segment, &outcomes);
    assert_eq!(merged.get(0).unwrap().asin, "A3");
}

#[test]
fn unchanged_run_merges_to_equal_catalog() {
    // Basis for skip-if-unchanged: no outcome differs, result is equal.
    let original = catalog().normalized();
    let segment = Segment::select(0, 3, 3);
    let outcomes = HashMap::from([
        ("A1".to_string(), Outcome::Unchanged),
        ("A2".to_string(), Outcome::Unchanged),
        ("A3".to_string(), Outcome::Unchanged),
    ]);

    let merged = merge_segment(&original, segment, &outcomes);
    assert_eq!(merged, original);
}
