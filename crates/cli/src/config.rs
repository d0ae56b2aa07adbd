// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Bot configuration
//!
//! Read once at startup from a TOML file and passed into the checkers as
//! plain values; nothing below this layer re-reads configuration.

use anyhow::{Context, Result};
use bw_core::RetryPolicy;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

#[derive(Debug, Clone, Deserialize)]
pub struct BotConfig {
    pub store: StoreConfig,
    pub lookup: LookupConfig,
    #[serde(default)]
    pub notify: NotifyConfig,
    #[serde(default)]
    pub retry: RetryConfig,
    pub sale: SaleConfig,
    pub releases: ReleasesConfig,
    pub paper: PaperConfig,
    #[serde(default)]
    pub today: TodayConfig,
}

impl BotConfig {
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: BotConfig = toml::from_str(&text)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Root directory of the file blob store
    pub path: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LookupConfig {
    /// Base URL of the catalog lookup API
    pub endpoint: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct NotifyConfig {
    /// Webhook for routine messages; omit to run silently
    pub webhook_url: Option<String>,
    /// Webhook for operator alerts; defaults to `webhook_url`
    pub alert_url: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct RetryConfig {
    pub max_attempts: u32,
    #[serde(with = "humantime_serde")]
    pub initial_backoff: Duration,
    /// Delay after each successful lookup, to stay under the rate limit
    #[serde(with = "humantime_serde")]
    pub pace: Option<Duration>,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            initial_backoff: Duration::from_secs(2),
            pace: Some(Duration::from_secs(2)),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        let mut policy = RetryPolicy::new(self.max_attempts, self.initial_backoff);
        if let Some(pace) = self.pace {
            policy = policy.with_pace(pace);
        }
        policy
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaleConfig {
    pub catalog_key: String,
    /// Feeder list absorbed into the watch list each run
    #[serde(default)]
    pub upcoming_key: Option<String>,
    pub cursor_key: String,
    #[serde(default = "default_window")]
    pub window_size: usize,
    /// Fraction of the recorded max price at or below which an edition
    /// counts as on sale
    #[serde(default = "default_discount")]
    pub discount_threshold: f64,
    /// Loyalty-point percentage of the price that counts as a sale
    #[serde(default = "default_points")]
    pub point_threshold: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ReleasesConfig {
    pub catalog_key: String,
    pub cursor_key: String,
    /// Where newly found volumes are queued for the sale checker
    #[serde(default)]
    pub upcoming_key: Option<String>,
    #[serde(default = "default_release_cycle")]
    pub cycle_days: f64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PaperConfig {
    pub catalog_key: String,
    pub cursor_key: String,
    /// Watch list that gains the Kindle edition when one appears
    pub sale_key: String,
    #[serde(default = "default_paper_cycle")]
    pub cycle_days: f64,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TodayConfig {
    /// Hours east of UTC for the calendar deciding what "today" means
    pub utc_offset_hours: i32,
}

fn default_window() -> usize {
    10
}

fn default_discount() -> f64 {
    0.5
}

fn default_points() -> f64 {
    20.0
}

fn default_release_cycle() -> f64 {
    1.0
}

fn default_paper_cycle() -> f64 {
    7.0
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
