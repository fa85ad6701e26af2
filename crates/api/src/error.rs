// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the operations boundary.

use helpdesk::CoreError;
use helpdesk_domain::DomainError;
use helpdesk_persistence::StoreError;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API
/// contract. Store corruption never surfaces here; reads recover as empty
/// collections below this layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Authentication failed.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// Authorization failed; the actor does not have permission.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// Who is allowed to perform the action.
        required_role: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A requested resource was not found.
    ResourceNotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::ResourceNotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        Self::Internal {
            message: format!("Record store failure: {err}"),
        }
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked
/// directly.
#[must_use]
#[allow(clippy::too_many_lines)]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match err {
        DomainError::EmptyTitle => ApiError::InvalidInput {
            field: String::from("title"),
            message: String::from("Ticket title cannot be empty"),
        },
        DomainError::EmptyDescription => ApiError::InvalidInput {
            field: String::from("description"),
            message: String::from("Ticket description cannot be empty"),
        },
        DomainError::EmptyText => ApiError::InvalidInput {
            field: String::from("text"),
            message: String::from("Text cannot be empty"),
        },
        DomainError::InvalidName(msg) => ApiError::InvalidInput {
            field: String::from("name"),
            message: msg,
        },
        DomainError::InvalidEmail(msg) => ApiError::InvalidInput {
            field: String::from("email"),
            message: msg,
        },
        DomainError::DuplicateEmail(email) => ApiError::DomainRuleViolation {
            rule: String::from("unique_email"),
            message: format!("A user with email '{email}' already exists"),
        },
        DomainError::InvalidRole(value) => ApiError::InvalidInput {
            field: String::from("role"),
            message: format!("Unknown role: {value}"),
        },
        DomainError::InvalidStatus(value) => ApiError::InvalidInput {
            field: String::from("status"),
            message: format!("Unknown ticket status: {value}"),
        },
        DomainError::InvalidPriority(value) => ApiError::InvalidInput {
            field: String::from("priority"),
            message: format!("Unknown priority: {value}"),
        },
        DomainError::UnknownCategory(name) => ApiError::InvalidInput {
            field: String::from("category"),
            message: format!("Category '{name}' is not in the category set"),
        },
        DomainError::DuplicateCategory(name) => ApiError::DomainRuleViolation {
            rule: String::from("unique_category"),
            message: format!("Category '{name}' already exists"),
        },
        DomainError::TicketNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Ticket"),
            message: format!("Ticket {id} does not exist"),
        },
        DomainError::UserNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("User"),
            message: format!("User {id} does not exist"),
        },
        DomainError::NotificationNotFound(id) => ApiError::ResourceNotFound {
            resource_type: String::from("Notification"),
            message: format!("Notification {id} does not exist"),
        },
        DomainError::ActionNotPermitted { action, role } => ApiError::Unauthorized {
            action,
            required_role: format!("a role other than '{role}'"),
        },
        DomainError::NotAssignedAgent {
            ticket_id,
            assigned_agent_id,
            ..
        } => ApiError::Unauthorized {
            action: format!("modify ticket {ticket_id}"),
            required_role: format!("the assigned agent ({assigned_agent_id:?})"),
        },
        DomainError::NotTicketOwner { ticket_id, .. } => ApiError::Unauthorized {
            action: format!("delete ticket {ticket_id}"),
            required_role: String::from("the ticket owner"),
        },
        DomainError::TicketNotClosed { ticket_id, status } => ApiError::DomainRuleViolation {
            rule: String::from("closed_only_deletion"),
            message: format!(
                "Ticket {ticket_id} has status '{status}'; only closed tickets can be deleted"
            ),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked
/// directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
    }
}
