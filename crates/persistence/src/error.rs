// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use thiserror::Error;

/// Errors that can occur while writing to the record store.
///
/// Reads never fail: an unreadable or corrupted document is recovered as an
/// empty collection so one bad record cannot take the system down.
#[derive(Debug, Error)]
pub enum StoreError {
    /// Writing a document to the backing storage failed.
    #[error("I/O error on collection '{collection}': {source}")]
    Io {
        /// The collection key being written.
        collection: &'static str,
        /// The underlying I/O error.
        #[source]
        source: std::io::Error,
    },
    /// A document could not be encoded as JSON.
    #[error("failed to encode collection '{collection}': {source}")]
    Serialization {
        /// The collection key being encoded.
        collection: &'static str,
        /// The underlying serializer error.
        #[source]
        source: serde_json::Error,
    },
    /// A targeted update referenced a record that is not in the collection.
    #[error("no record with id {id} in collection '{collection}'")]
    MissingRecord {
        /// The collection key.
        collection: &'static str,
        /// The id that was not found.
        id: i64,
    },
}
