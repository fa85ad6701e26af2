// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collection::Collection;
use crate::error::StoreError;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Backend storing one JSON file per collection under a data directory.
///
/// Writes go through a temporary file and rename so a crash mid-write never
/// leaves a truncated document behind.
#[derive(Debug)]
pub struct FileDirBackend {
    dir: PathBuf,
}

impl FileDirBackend {
    /// Opens a backend over `dir`, creating the directory if needed.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new(dir: &Path) -> Result<Self, StoreError> {
        fs::create_dir_all(dir).map_err(|source| StoreError::Io {
            collection: "data directory",
            source,
        })?;
        Ok(Self {
            dir: dir.to_path_buf(),
        })
    }

    fn document_path(&self, collection: Collection) -> PathBuf {
        self.dir.join(format!("{}.json", collection.key()))
    }

    /// Reads a collection's payload, `None` when the file is absent or
    /// unreadable. Read failures other than absence are logged and
    /// recovered as absent.
    #[must_use]
    pub fn read(&self, collection: Collection) -> Option<String> {
        match fs::read_to_string(self.document_path(collection)) {
            Ok(payload) => Some(payload),
            Err(err) if err.kind() == ErrorKind::NotFound => None,
            Err(err) => {
                tracing::warn!(
                    collection = collection.key(),
                    error = %err,
                    "unreadable collection file, recovering as empty"
                );
                None
            }
        }
    }

    /// Writes a collection's payload atomically.
    ///
    /// # Errors
    ///
    /// Returns an error if the temporary file cannot be written or renamed
    /// into place.
    pub fn write(&mut self, collection: Collection, payload: &str) -> Result<(), StoreError> {
        let target: PathBuf = self.document_path(collection);
        let staging: PathBuf = self.dir.join(format!("{}.json.tmp", collection.key()));
        fs::write(&staging, payload).map_err(|source| StoreError::Io {
            collection: collection.key(),
            source,
        })?;
        fs::rename(&staging, &target).map_err(|source| StoreError::Io {
            collection: collection.key(),
            source,
        })
    }

    /// Removes a collection's file. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be removed.
    pub fn remove(&mut self, collection: Collection) -> Result<(), StoreError> {
        match fs::remove_file(self.document_path(collection)) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StoreError::Io {
                collection: collection.key(),
                source,
            }),
        }
    }
}
