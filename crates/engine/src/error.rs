// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Error types for runs

use bw_core::SlotError;
use bw_storage::StorageError;
use thiserror::Error;

/// Errors that abort a run before its cursor and catalog writes are committed
#[derive(Debug, Error)]
pub enum RunError {
    #[error("storage error: {0}")]
    Storage(#[from] StorageError),
    #[error("scheduling error: {0}")]
    Slot(#[from] SlotError),
}
