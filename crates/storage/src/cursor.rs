// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Cursor persistence
//!
//! The cursor is a single small integer stored as a numeric string blob:
//! "last work unit started". Reads are lenient: a missing blob or one that
//! does not parse means "no cursor", and the scheduler treats that as a
//! fresh start rather than an error.

use crate::blob::{BlobStore, StorageError};

/// Load/save scheduling cursors over a blob store
#[derive(Clone)]
pub struct CursorRepo<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> CursorRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn load(&self, key: &str) -> Result<Option<usize>, StorageError> {
        let Some(bytes) = self.store.get(key)? else {
            return Ok(None);
        };
        let parsed = std::str::from_utf8(&bytes)
            .ok()
            .and_then(|s| s.trim().parse().ok());
        if parsed.is_none() {
            tracing::warn!(key, "unparseable cursor blob, treating as absent");
        }
        Ok(parsed)
    }

    pub fn save(&self, key: &str, value: usize) -> Result<(), StorageError> {
        self.store.put(key, value.to_string().as_bytes())
    }
}

#[cfg(test)]
#[path = "cursor_tests.rs"]
mod tests;
