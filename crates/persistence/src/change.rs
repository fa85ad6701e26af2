// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::collection::Collection;

/// In-process change signal for the record store.
///
/// Every successful write emits exactly one change carrying the touched
/// collection key. Listeners are synchronous callbacks; the server layer
/// bridges them onto its broadcast channel for cross-context delivery.
/// A write that produced the change reports it to every listener, including
/// any listener registered by the writer itself.
pub struct ChangeBus {
    listeners: Vec<Box<dyn Fn(Collection) + Send>>,
}

impl ChangeBus {
    /// Creates a bus with no listeners.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for every subsequent change.
    pub fn subscribe(&mut self, listener: impl Fn(Collection) + Send + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Reports a change to every listener.
    pub fn emit(&self, collection: Collection) {
        for listener in &self.listeners {
            listener(collection);
        }
    }

    /// Returns the number of registered listeners.
    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.listeners.len()
    }
}

impl Default for ChangeBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for ChangeBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChangeBus")
            .field("listeners", &self.listeners.len())
            .finish()
    }
}
