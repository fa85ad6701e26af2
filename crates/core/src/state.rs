// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{Category, Notification, Ticket, User};
use helpdesk_events::TicketEvent;

/// The complete record-store state a transition is evaluated against.
///
/// `apply` reads every collection but mutates none of them; the result
/// describes the single-document change for the persistence layer to
/// carry out.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct State {
    /// All registered users.
    pub users: Vec<User>,
    /// All tickets.
    pub tickets: Vec<Ticket>,
    /// All notification records.
    pub notifications: Vec<Notification>,
    /// The category set.
    pub categories: Vec<Category>,
}

impl State {
    /// Creates a new empty state.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            users: Vec::new(),
            tickets: Vec::new(),
            notifications: Vec::new(),
            categories: Vec::new(),
        }
    }
}

/// The single-ticket change a successful transition produces.
///
/// Expressed per document rather than as a whole-collection replacement so
/// the persistence layer can upsert or remove exactly one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketChange {
    /// The ticket was created or modified; persist this version.
    Upserted(Ticket),
    /// The ticket was deleted; remove it by id.
    Removed(i64),
}

impl TicketChange {
    /// Returns the id of the ticket this change concerns.
    #[must_use]
    pub const fn ticket_id(&self) -> i64 {
        match self {
            Self::Upserted(ticket) => ticket.id,
            Self::Removed(id) => *id,
        }
    }
}

/// The result of a successful lifecycle transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. The notification records are already fanned out and carry
/// final ids; the caller appends them as-is.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The ticket change to persist.
    pub change: TicketChange,
    /// The event recording this transition. `None` for deletions, which
    /// have no observers.
    pub event: Option<TicketEvent>,
    /// The notification records produced by fan-out, in recipient order.
    pub notifications: Vec<Notification>,
}
