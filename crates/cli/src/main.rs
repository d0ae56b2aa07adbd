// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw - Bookwatch CLI
//!
//! Each subcommand is one stateless run of a checker; scheduling across runs
//! lives in the persisted cursors, not in this process. Invoke from cron or
//! a timer at a period much shorter than the configured cycle windows.

mod adapters;
mod commands;
mod config;

use anyhow::Result;
use clap::{Parser, Subcommand};
use commands::{paper, releases, sale, today};
use config::BotConfig;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "bw", version, about = "Bookwatch - Kindle catalog monitoring bot")]
struct Cli {
    /// Path to the bot configuration file
    #[arg(long, global = true, default_value = "bookwatch.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Check a window of the sale watch list for price drops
    Sale(sale::SaleArgs),
    /// Check the due monitored series for new volumes
    Releases(releases::ReleasesArgs),
    /// Check the due paper edition for Kindle availability
    Paper,
    /// Announce tracked editions released today
    Today,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let config = BotConfig::load(&cli.config)?;

    match cli.command {
        Commands::Sale(args) => sale::run(args, &config),
        Commands::Releases(args) => releases::run(args, &config),
        Commands::Paper => paper::run(&config),
        Commands::Today => today::run(&config),
    }
}
