// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

/// Errors that can occur during domain validation and lifecycle guards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// Ticket title is empty.
    EmptyTitle,
    /// Ticket description is empty.
    EmptyDescription,
    /// Comment or note text is empty.
    EmptyText,
    /// User name is empty or invalid.
    InvalidName(String),
    /// User email is empty or invalid.
    InvalidEmail(String),
    /// A user with this email already exists.
    DuplicateEmail(String),
    /// Role string is not recognized.
    InvalidRole(String),
    /// Status string is not recognized.
    InvalidStatus(String),
    /// Priority string is not recognized.
    InvalidPriority(String),
    /// Category is not in the category set.
    UnknownCategory(String),
    /// A category with this name already exists.
    DuplicateCategory(String),
    /// Ticket does not exist.
    TicketNotFound(i64),
    /// User does not exist.
    UserNotFound(i64),
    /// Notification does not exist.
    NotificationNotFound(i64),
    /// The actor's role does not permit the action.
    ActionNotPermitted {
        /// The action that was attempted.
        action: String,
        /// The actor's role.
        role: String,
    },
    /// An agent attempted a guarded transition on a ticket assigned to
    /// someone else.
    NotAssignedAgent {
        /// The ticket in question.
        ticket_id: i64,
        /// The currently assigned agent, if any.
        assigned_agent_id: Option<i64>,
        /// The acting agent.
        actor_id: i64,
    },
    /// A non-owner attempted an owner-only action.
    NotTicketOwner {
        /// The ticket in question.
        ticket_id: i64,
        /// The ticket owner.
        owner_id: i64,
        /// The acting user.
        actor_id: i64,
    },
    /// Deletion was attempted on a ticket that is not closed.
    TicketNotClosed {
        /// The ticket in question.
        ticket_id: i64,
        /// The ticket's current status.
        status: String,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyTitle => write!(f, "Ticket title cannot be empty"),
            Self::EmptyDescription => write!(f, "Ticket description cannot be empty"),
            Self::EmptyText => write!(f, "Text cannot be empty"),
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "A user with email '{email}' already exists")
            }
            Self::InvalidRole(s) => write!(f, "Unknown role: {s}"),
            Self::InvalidStatus(s) => write!(f, "Unknown ticket status: {s}"),
            Self::InvalidPriority(s) => write!(f, "Unknown priority: {s}"),
            Self::UnknownCategory(name) => {
                write!(f, "Category '{name}' is not in the category set")
            }
            Self::DuplicateCategory(name) => {
                write!(f, "Category '{name}' already exists")
            }
            Self::TicketNotFound(id) => write!(f, "Ticket {id} not found"),
            Self::UserNotFound(id) => write!(f, "User {id} not found"),
            Self::NotificationNotFound(id) => write!(f, "Notification {id} not found"),
            Self::ActionNotPermitted { action, role } => {
                write!(f, "Role '{role}' is not permitted to {action}")
            }
            Self::NotAssignedAgent {
                ticket_id,
                assigned_agent_id,
                actor_id,
            } => match assigned_agent_id {
                Some(assigned) => write!(
                    f,
                    "Ticket {ticket_id} is assigned to agent {assigned}; agent {actor_id} may not modify it"
                ),
                None => write!(
                    f,
                    "Ticket {ticket_id} has no assigned agent; agent {actor_id} may not write notes on it"
                ),
            },
            Self::NotTicketOwner {
                ticket_id,
                owner_id,
                actor_id,
            } => {
                write!(
                    f,
                    "Ticket {ticket_id} is owned by user {owner_id}; user {actor_id} may not delete it"
                )
            }
            Self::TicketNotClosed { ticket_id, status } => {
                write!(
                    f,
                    "Ticket {ticket_id} has status '{status}'; only closed tickets can be deleted"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
