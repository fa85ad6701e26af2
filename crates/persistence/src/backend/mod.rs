// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Storage backends for the record store.
//!
//! A backend moves raw JSON payloads in and out of storage; it knows nothing
//! about document shapes. Backend dispatch happens exclusively in the
//! `DocumentStore` adapter.
//!
//! ## Backend Support
//!
//! - `memory` — process-local map (default for unit tests)
//! - `file` — one JSON file per collection in a data directory

pub mod file;
pub mod memory;

use crate::collection::Collection;
use crate::error::StoreError;
use file::FileDirBackend;
use memory::MemoryBackend;

/// The storage backend a `DocumentStore` was constructed with.
#[derive(Debug)]
pub enum Backend {
    /// Process-local storage; contents are lost on drop.
    Memory(MemoryBackend),
    /// One JSON file per collection under a data directory.
    FileDir(FileDirBackend),
}

impl Backend {
    /// Reads the raw payload of a collection, `None` when absent.
    ///
    /// Backends never surface read failures; an unreadable payload is
    /// reported as absent after logging.
    #[must_use]
    pub fn read(&self, collection: Collection) -> Option<String> {
        match self {
            Self::Memory(backend) => backend.read(collection),
            Self::FileDir(backend) => backend.read(collection),
        }
    }

    /// Writes the raw payload of a collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the payload cannot be stored.
    pub fn write(&mut self, collection: Collection, payload: &str) -> Result<(), StoreError> {
        match self {
            Self::Memory(backend) => {
                backend.write(collection, payload);
                Ok(())
            }
            Self::FileDir(backend) => backend.write(collection, payload),
        }
    }

    /// Removes a collection's payload entirely.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored payload cannot be removed.
    pub fn remove(&mut self, collection: Collection) -> Result<(), StoreError> {
        match self {
            Self::Memory(backend) => {
                backend.remove(collection);
                Ok(())
            }
            Self::FileDir(backend) => backend.remove(collection),
        }
    }
}
