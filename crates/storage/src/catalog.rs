// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

//! Typed catalog persistence
//!
//! Catalogs serialize to pretty-printed JSON with a trailing newline. The
//! byte form is stable across a serialize, deserialize, serialize cycle, so
//! skip-if-unchanged decisions can compare in-memory catalogs instead of
//! stored bytes.

use crate::blob::{BlobStore, StorageError};
use bw_core::Catalog;

/// Load/save catalogs over a blob store
#[derive(Clone)]
pub struct CatalogRepo<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> CatalogRepo<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    /// Load the catalog at `key`; a missing key is an error, since every
    /// monitored list is seeded by the operator
    pub fn load(&self, key: &str) -> Result<Catalog, StorageError> {
        let bytes = self
            .store
            .get(key)?
            .ok_or_else(|| StorageError::NotFound(key.to_string()))?;
        Ok(serde_json::from_slice(&bytes)?)
    }

    /// Replace the catalog at `key`
    pub fn save(&self, key: &str, catalog: &Catalog) -> Result<(), StorageError> {
        self.store.put(key, &to_canonical_bytes(catalog)?)
    }
}

/// Canonical serialized form of a catalog
pub fn to_canonical_bytes(catalog: &Catalog) -> Result<Vec<u8>, StorageError> {
    let mut json = serde_json::to_string_pretty(catalog)?;
    json.push('\n');
    Ok(json.into_bytes())
}

#[cfg(test)]
#[path = "catalog_tests.rs"]
mod tests;
