// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record store for the Helpdesk System.
//!
//! The store holds one JSON document per named collection (`users`,
//! `tickets`, `notifications`, `categories`, plus the singular `session`
//! document) and exposes both whole-collection replacement and the targeted
//! per-record primitives the operations layer prefers, so one lifecycle
//! operation rewrites one record instead of the whole collection.
//!
//! ## Backend Support
//!
//! - **`Memory`** (default for tests) — process-local, isolated per store
//! - **`FileDir`** — one JSON file per collection under a data directory,
//!   written atomically via rename
//!
//! The backend is selected at construction (`DocumentStore::new_in_memory`
//! or `DocumentStore::new_with_dir`); everything above the backend is
//! backend-agnostic.
//!
//! ## Failure Philosophy
//!
//! Reads never fail. An absent, unreadable, or corrupted document is
//! recovered as an empty collection after a warning, so a single bad record
//! cannot take the system down. Writes return [`StoreError`].
//!
//! ## Change Signal
//!
//! Every successful write emits exactly one change on the store's
//! [`ChangeBus`], carrying the touched [`Collection`] key. The server layer
//! bridges the bus onto its WebSocket broadcast for other contexts.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

pub mod backend;
mod change;
mod collection;
mod error;

#[cfg(test)]
mod tests;

use backend::Backend;
use backend::file::FileDirBackend;
use backend::memory::MemoryBackend;
use helpdesk_domain::{Category, Notification, Role, Ticket, User};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::path::Path;

pub use change::ChangeBus;
pub use collection::Collection;
pub use error::StoreError;

/// The current logged-in session, stored as the singular `session` document.
///
/// Carries only what the operations layer needs to build an acting context;
/// the full user record stays in the `users` collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionRecord {
    /// The logged-in user's id.
    pub user_id: i64,
    /// The logged-in user's display name.
    pub name: String,
    /// The logged-in user's role.
    pub role: Role,
}

/// The storage contract consumers depend on.
///
/// Operations code takes a `RecordStore` rather than constructing a
/// [`DocumentStore`] so tests can substitute an in-memory store and no
/// caller reaches for ambient storage.
pub trait RecordStore {
    /// Reads the user collection; empty when absent or corrupted.
    fn read_users(&self) -> Vec<User>;
    /// Reads the ticket collection; empty when absent or corrupted.
    fn read_tickets(&self) -> Vec<Ticket>;
    /// Reads the notification collection; empty when absent or corrupted.
    fn read_notifications(&self) -> Vec<Notification>;
    /// Reads the category set; empty when absent or corrupted.
    fn read_categories(&self) -> Vec<Category>;
    /// Reads the session document; `None` when logged out or corrupted.
    fn read_session(&self) -> Option<SessionRecord>;

    /// Replaces the whole user collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn write_users(&mut self, users: &[User]) -> Result<(), StoreError>;
    /// Replaces the whole ticket collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn write_tickets(&mut self, tickets: &[Ticket]) -> Result<(), StoreError>;
    /// Replaces the whole notification collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn write_notifications(&mut self, notifications: &[Notification]) -> Result<(), StoreError>;
    /// Replaces the category set.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn write_categories(&mut self, categories: &[Category]) -> Result<(), StoreError>;

    /// Writes the session document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document cannot be encoded or stored.
    fn write_session(&mut self, session: &SessionRecord) -> Result<(), StoreError>;
    /// Removes the session document. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the stored document cannot be removed.
    fn clear_session(&mut self) -> Result<(), StoreError>;

    /// Inserts or replaces one ticket by id, keeping collection order for
    /// existing records and appending new ones.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn upsert_ticket(&mut self, ticket: &Ticket) -> Result<(), StoreError>;
    /// Removes one ticket by id. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn remove_ticket(&mut self, ticket_id: i64) -> Result<(), StoreError>;

    /// Appends one user record.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn append_user(&mut self, user: &User) -> Result<(), StoreError>;
    /// Replaces one user record by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the user is not in the collection or the
    /// collection cannot be stored.
    fn update_user(&mut self, user: &User) -> Result<(), StoreError>;
    /// Removes one user record by id. Absence is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn remove_user(&mut self, user_id: i64) -> Result<(), StoreError>;

    /// Appends a fan-out batch to the notification collection.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn append_notifications(&mut self, batch: &[Notification]) -> Result<(), StoreError>;
    /// Replaces one notification record by id (the read flag flip).
    ///
    /// # Errors
    ///
    /// Returns an error if the record is not in the collection or the
    /// collection cannot be stored.
    fn set_notification_read(&mut self, updated: &Notification) -> Result<(), StoreError>;
    /// Replaces several notification records by id in one write.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn mark_notifications_read(&mut self, updated: &[Notification]) -> Result<(), StoreError>;
    /// Empties the notification collection (system reset).
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn clear_notifications(&mut self) -> Result<(), StoreError>;

    /// Appends one category to the set.
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn append_category(&mut self, category: &Category) -> Result<(), StoreError>;
    /// Replaces the category set (seeding and system reset).
    ///
    /// # Errors
    ///
    /// Returns an error if the collection cannot be encoded or stored.
    fn replace_categories(&mut self, categories: &[Category]) -> Result<(), StoreError>;
}

/// The record store adapter over a storage backend and a change bus.
#[derive(Debug)]
pub struct DocumentStore {
    backend: Backend,
    bus: ChangeBus,
}

impl DocumentStore {
    /// Creates a store over a fresh in-memory backend.
    #[must_use]
    pub fn new_in_memory() -> Self {
        Self {
            backend: Backend::Memory(MemoryBackend::new()),
            bus: ChangeBus::new(),
        }
    }

    /// Creates a store over a data directory, one JSON file per collection.
    ///
    /// # Arguments
    ///
    /// * `dir` - The data directory; created if it does not exist
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be created.
    pub fn new_with_dir(dir: &Path) -> Result<Self, StoreError> {
        Ok(Self {
            backend: Backend::FileDir(FileDirBackend::new(dir)?),
            bus: ChangeBus::new(),
        })
    }

    /// Registers a listener for every subsequent write.
    pub fn subscribe(&mut self, listener: impl Fn(Collection) + Send + 'static) {
        self.bus.subscribe(listener);
    }

    /// Reads and decodes a collection, recovering corruption as empty.
    fn read_documents<T: DeserializeOwned>(&self, collection: Collection) -> Vec<T> {
        let Some(payload) = self.backend.read(collection) else {
            return Vec::new();
        };
        match serde_json::from_str(&payload) {
            Ok(documents) => documents,
            Err(err) => {
                tracing::warn!(
                    collection = collection.key(),
                    error = %err,
                    "corrupted collection document, recovering as empty"
                );
                Vec::new()
            }
        }
    }

    /// Encodes and writes a collection, then emits the change.
    fn write_documents<T: Serialize>(
        &mut self,
        collection: Collection,
        documents: &[T],
    ) -> Result<(), StoreError> {
        let payload: String =
            serde_json::to_string_pretty(documents).map_err(|source| StoreError::Serialization {
                collection: collection.key(),
                source,
            })?;
        self.backend.write(collection, &payload)?;
        self.bus.emit(collection);
        Ok(())
    }
}

impl RecordStore for DocumentStore {
    fn read_users(&self) -> Vec<User> {
        self.read_documents(Collection::Users)
    }

    fn read_tickets(&self) -> Vec<Ticket> {
        self.read_documents(Collection::Tickets)
    }

    fn read_notifications(&self) -> Vec<Notification> {
        self.read_documents(Collection::Notifications)
    }

    fn read_categories(&self) -> Vec<Category> {
        self.read_documents(Collection::Categories)
    }

    fn read_session(&self) -> Option<SessionRecord> {
        let payload: String = self.backend.read(Collection::Session)?;
        match serde_json::from_str(&payload) {
            Ok(session) => Some(session),
            Err(err) => {
                tracing::warn!(
                    collection = Collection::Session.key(),
                    error = %err,
                    "corrupted session document, recovering as logged out"
                );
                None
            }
        }
    }

    fn write_users(&mut self, users: &[User]) -> Result<(), StoreError> {
        self.write_documents(Collection::Users, users)
    }

    fn write_tickets(&mut self, tickets: &[Ticket]) -> Result<(), StoreError> {
        self.write_documents(Collection::Tickets, tickets)
    }

    fn write_notifications(&mut self, notifications: &[Notification]) -> Result<(), StoreError> {
        self.write_documents(Collection::Notifications, notifications)
    }

    fn write_categories(&mut self, categories: &[Category]) -> Result<(), StoreError> {
        self.write_documents(Collection::Categories, categories)
    }

    fn write_session(&mut self, session: &SessionRecord) -> Result<(), StoreError> {
        let payload: String =
            serde_json::to_string_pretty(session).map_err(|source| StoreError::Serialization {
                collection: Collection::Session.key(),
                source,
            })?;
        self.backend.write(Collection::Session, &payload)?;
        self.bus.emit(Collection::Session);
        Ok(())
    }

    fn clear_session(&mut self) -> Result<(), StoreError> {
        self.backend.remove(Collection::Session)?;
        self.bus.emit(Collection::Session);
        Ok(())
    }

    fn upsert_ticket(&mut self, ticket: &Ticket) -> Result<(), StoreError> {
        let mut tickets: Vec<Ticket> = self.read_tickets();
        match tickets.iter_mut().find(|existing| existing.id == ticket.id) {
            Some(existing) => *existing = ticket.clone(),
            None => tickets.push(ticket.clone()),
        }
        self.write_documents(Collection::Tickets, &tickets)
    }

    fn remove_ticket(&mut self, ticket_id: i64) -> Result<(), StoreError> {
        let mut tickets: Vec<Ticket> = self.read_tickets();
        tickets.retain(|ticket| ticket.id != ticket_id);
        self.write_documents(Collection::Tickets, &tickets)
    }

    fn append_user(&mut self, user: &User) -> Result<(), StoreError> {
        let mut users: Vec<User> = self.read_users();
        users.push(user.clone());
        self.write_documents(Collection::Users, &users)
    }

    fn update_user(&mut self, user: &User) -> Result<(), StoreError> {
        let mut users: Vec<User> = self.read_users();
        let Some(existing) = users.iter_mut().find(|existing| existing.id == user.id) else {
            return Err(StoreError::MissingRecord {
                collection: Collection::Users.key(),
                id: user.id,
            });
        };
        *existing = user.clone();
        self.write_documents(Collection::Users, &users)
    }

    fn remove_user(&mut self, user_id: i64) -> Result<(), StoreError> {
        let mut users: Vec<User> = self.read_users();
        users.retain(|user| user.id != user_id);
        self.write_documents(Collection::Users, &users)
    }

    fn append_notifications(&mut self, batch: &[Notification]) -> Result<(), StoreError> {
        if batch.is_empty() {
            return Ok(());
        }
        let mut notifications: Vec<Notification> = self.read_notifications();
        notifications.extend_from_slice(batch);
        self.write_documents(Collection::Notifications, &notifications)
    }

    fn set_notification_read(&mut self, updated: &Notification) -> Result<(), StoreError> {
        let mut notifications: Vec<Notification> = self.read_notifications();
        let Some(existing) = notifications
            .iter_mut()
            .find(|existing| existing.id == updated.id)
        else {
            return Err(StoreError::MissingRecord {
                collection: Collection::Notifications.key(),
                id: updated.id,
            });
        };
        *existing = updated.clone();
        self.write_documents(Collection::Notifications, &notifications)
    }

    fn mark_notifications_read(&mut self, updated: &[Notification]) -> Result<(), StoreError> {
        if updated.is_empty() {
            return Ok(());
        }
        let mut notifications: Vec<Notification> = self.read_notifications();
        for notification in &mut notifications {
            if let Some(replacement) = updated.iter().find(|u| u.id == notification.id) {
                *notification = replacement.clone();
            }
        }
        self.write_documents(Collection::Notifications, &notifications)
    }

    fn clear_notifications(&mut self) -> Result<(), StoreError> {
        self.write_documents::<Notification>(Collection::Notifications, &[])
    }

    fn append_category(&mut self, category: &Category) -> Result<(), StoreError> {
        let mut categories: Vec<Category> = self.read_categories();
        categories.push(category.clone());
        self.write_documents(Collection::Categories, &categories)
    }

    fn replace_categories(&mut self, categories: &[Category]) -> Result<(), StoreError> {
        self.write_documents(Collection::Categories, categories)
    }
}
