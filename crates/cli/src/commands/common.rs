// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Shared helpers for the checkers

use bw_adapters::Record;
use bw_core::Edition;
use bw_engine::SlotSummary;

pub(crate) const KINDLE_BINDING: &str = "Kindle Edition";

/// Convert an upstream record into a stored edition.
///
/// A record without a price maps to 0, meaning "not currently purchasable";
/// the merge step keeps the historical max price either way.
pub(crate) fn to_edition(record: &Record) -> Edition {
    let price = record.price.unwrap_or(0.0);
    Edition {
        asin: record.asin.clone(),
        title: record.title.clone(),
        release_date: record.release_date,
        current_price: price,
        max_price: price,
        url: record.url.clone(),
    }
}

pub(crate) fn is_kindle(record: &Record) -> bool {
    record.binding.as_deref() == Some(KINDLE_BINDING)
}

/// Series title without a trailing volume marker, for search queries.
///
/// Handles the catalog's two common shapes: a parenthesized volume
/// ("Series (12)") and a bare trailing number ("Series 12").
pub(crate) fn base_title(title: &str) -> String {
    let mut base = title.trim();
    if base.ends_with(')') {
        if let Some(open) = base.rfind('(') {
            base = base[..open].trim_end();
        }
    }
    base.trim_end_matches(|c: char| c.is_ascii_digit())
        .trim_end()
        .to_string()
}

/// One-line human summary of a slot run, `noun` naming what the catalog
/// holds
pub(crate) fn print_slot_summary(noun: &str, summary: &SlotSummary) {
    match summary {
        SlotSummary::Skipped { due } => {
            println!("Not my slot (position {})", due + 1);
        }
        SlotSummary::Completed { due, asin, updated } => {
            println!(
                "Checked {noun} at position {} ({asin}){}",
                due + 1,
                if *updated { ", list updated" } else { "" }
            );
        }
        SlotSummary::Failed { due, asin } => {
            println!("Check failed at position {} ({asin}), see alerts", due + 1);
        }
    }
}

#[cfg(test)]
#[path = "common_tests.rs"]
mod tests;
