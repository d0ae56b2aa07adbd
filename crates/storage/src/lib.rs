// SPDX-License-Identifier: BUSL-1.1
// Copyright (c) 2026 Alfred Jean LLC

// Allow panic!/unwrap/expect in test code
#![cfg_attr(test, allow(clippy::panic))]
#![cfg_attr(test, allow(clippy::unwrap_used))]
#![cfg_attr(test, allow(clippy::expect_used))]

//! bw-storage: Blob persistence for catalogs and cursors
//!
//! Collections and cursors live as independent blobs behind [`BlobStore`];
//! there are no multi-key transactions. A run takes a read-whole /
//! replace-whole view of each catalog and never writes partially.

pub mod blob;
pub mod catalog;
pub mod cursor;

pub use blob::{BlobStore, FileStore, MemoryStore, StorageError};
pub use catalog::CatalogRepo;
pub use cursor::CursorRepo;
