//! Shared helpers for the behavioral specs

#![allow(dead_code)]

use bw_adapters::Record;
use bw_core::{Catalog, Edition};
use bw_storage::{CatalogRepo, MemoryStore};
use chrono::DateTime;

pub fn edition(asin: &str, title: &str, date_secs: i64, price: f64) -> Edition {
    Edition {
        asin: asin.to_string(),
        title: title.to_string(),
        release_date: DateTime::from_timestamp(date_secs, 0),
        current_price: price,
        max_price: price,
        url: format!("https://example.com/dp/{asin}"),
    }
}

pub fn record_for(e: &Edition, price: f64) -> Record {
    Record {
        asin: e.asin.clone(),
        title: e.title.clone(),
        binding: Some("Kindle Edition".to_string()),
        release_date: e.release_date,
        price: Some(price),
        loyalty_points: None,
        url: e.url.clone(),
    }
}

pub fn seed_catalog(store: &MemoryStore, key: &str, editions: Vec<Edition>) {
    CatalogRepo::new(store.clone())
        .save(key, &Catalog::new(editions).normalized())
        .unwrap();
}

pub fn load_catalog(store: &MemoryStore, key: &str) -> Catalog {
    CatalogRepo::new(store.clone()).load(key).unwrap()
}
