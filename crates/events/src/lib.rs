// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use helpdesk_domain::{Role, TicketStatus};

/// The entity performing a lifecycle operation.
///
/// An actor is an explicit session context carrying the acting user's
/// identity and role. Lifecycle guards consume this context directly
/// instead of re-deriving the acting user from ambient state.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Actor {
    /// The acting user's id.
    pub id: i64,
    /// The acting user's display name.
    pub name: String,
    /// The acting user's role.
    pub role: Role,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The acting user's id
    /// * `name` - The acting user's display name
    /// * `role` - The acting user's role
    #[must_use]
    pub const fn new(id: i64, name: String, role: Role) -> Self {
        Self { id, name, role }
    }
}

/// An immutable domain event produced by a successful lifecycle transition.
///
/// Every successful state change that has observers produces exactly one
/// event. Events are facts about what happened; the fan-out engine derives
/// notification records from them, and the server layer derives live
/// change signals. Events never carry directives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TicketEvent {
    /// A ticket was created.
    TicketCreated {
        /// The new ticket's id.
        ticket_id: i64,
        /// The new ticket's title.
        title: String,
        /// The owner, who is also the actor for creation.
        owner: Actor,
    },
    /// A ticket's status was changed.
    StatusChanged {
        /// The ticket's id.
        ticket_id: i64,
        /// The ticket's title.
        title: String,
        /// The ticket owner's user id.
        owner_id: i64,
        /// The status the ticket moved to.
        new_status: TicketStatus,
        /// The actor who changed the status.
        actor: Actor,
    },
    /// A public reply was added to a ticket.
    CommentAdded {
        /// The ticket's id.
        ticket_id: i64,
        /// The ticket's title.
        title: String,
        /// The ticket owner's user id.
        owner_id: i64,
        /// The actor who wrote the reply.
        actor: Actor,
    },
    /// An internal note was added to a ticket.
    NoteAdded {
        /// The ticket's id.
        ticket_id: i64,
        /// The ticket's title.
        title: String,
        /// The ticket owner's user id.
        owner_id: i64,
        /// The assigned agent who wrote the note.
        actor: Actor,
    },
}

impl TicketEvent {
    /// Returns the id of the ticket this event concerns.
    #[must_use]
    pub const fn ticket_id(&self) -> i64 {
        match self {
            Self::TicketCreated { ticket_id, .. }
            | Self::StatusChanged { ticket_id, .. }
            | Self::CommentAdded { ticket_id, .. }
            | Self::NoteAdded { ticket_id, .. } => *ticket_id,
        }
    }

    /// Returns the id of the user who triggered this event.
    #[must_use]
    pub const fn actor_id(&self) -> i64 {
        match self {
            Self::TicketCreated { owner, .. } => owner.id,
            Self::StatusChanged { actor, .. }
            | Self::CommentAdded { actor, .. }
            | Self::NoteAdded { actor, .. } => actor.id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_actor() -> Actor {
        Actor::new(3, String::from("Sari"), Role::Agent)
    }

    #[test]
    fn test_actor_creation_requires_all_fields() {
        let actor: Actor = create_test_actor();

        assert_eq!(actor.id, 3);
        assert_eq!(actor.name, "Sari");
        assert_eq!(actor.role, Role::Agent);
    }

    #[test]
    fn test_event_reports_ticket_id() {
        let event = TicketEvent::StatusChanged {
            ticket_id: 7,
            title: String::from("Printer down"),
            owner_id: 1,
            new_status: TicketStatus::Closed,
            actor: create_test_actor(),
        };

        assert_eq!(event.ticket_id(), 7);
        assert_eq!(event.actor_id(), 3);
    }

    #[test]
    fn test_created_event_actor_is_the_owner() {
        let owner = Actor::new(1, String::from("Budi"), Role::Client);
        let event = TicketEvent::TicketCreated {
            ticket_id: 1,
            title: String::from("Cannot log in"),
            owner: owner.clone(),
        };

        assert_eq!(event.actor_id(), owner.id);
    }

    #[test]
    fn test_events_are_comparable_facts() {
        let a = TicketEvent::CommentAdded {
            ticket_id: 2,
            title: String::from("Billing question"),
            owner_id: 1,
            actor: create_test_actor(),
        };
        let b = a.clone();

        assert_eq!(a, b);
    }
}
