//! Behavioral specifications for the bookwatch bot.
//!
//! CLI specs are black-box: they invoke the `bw` binary and verify stdout,
//! stderr, and exit codes. Run specs drive the engine against in-memory
//! fakes to pin down cross-checker behavior.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

#[path = "specs/prelude.rs"]
mod prelude;

// cli/
#[path = "specs/cli/errors.rs"]
mod cli_errors;
#[path = "specs/cli/help.rs"]
mod cli_help;

// runs/
#[path = "specs/runs/handoff.rs"]
mod runs_handoff;
#[path = "specs/runs/scheduling.rs"]
mod runs_scheduling;
