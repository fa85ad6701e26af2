// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collection::Collection;
use std::collections::HashMap;

/// Process-local backend holding each collection's payload in a map.
///
/// Used for unit tests and ephemeral deployments. Every store gets its own
/// map, so tests are isolated without any shared infrastructure.
#[derive(Debug, Default)]
pub struct MemoryBackend {
    documents: HashMap<Collection, String>,
}

impl MemoryBackend {
    /// Creates an empty backend.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Reads a collection's payload, `None` when absent.
    #[must_use]
    pub fn read(&self, collection: Collection) -> Option<String> {
        self.documents.get(&collection).cloned()
    }

    /// Writes a collection's payload.
    pub fn write(&mut self, collection: Collection, payload: &str) {
        self.documents.insert(collection, payload.to_string());
    }

    /// Removes a collection's payload.
    pub fn remove(&mut self, collection: Collection) {
        self.documents.remove(&collection);
    }
}
