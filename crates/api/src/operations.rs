// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Ticket, notification, category, and user administration operations.
//!
//! Each operation follows the same shape: read the current records, let the
//! core decide, persist the resulting change through targeted primitives,
//! and return a DTO. A rejected command writes nothing.

use crate::auth::{AuthenticationService, SessionContext};
use crate::error::{ApiError, translate_core_error, translate_domain_error};
use crate::request_response::{
    CreateTicketRequest, NotificationInfo, TicketInfo, UpdateProfileRequest, UserInfo,
};
use helpdesk::{
    Command, State, TicketChange, TransitionResult, apply, mark_all_read, mark_read,
    notification_visible_to,
};
use helpdesk_domain::{
    Category, DomainError, Notification, Priority, Role, Ticket, TicketStatus, User,
};
use helpdesk_persistence::RecordStore;
use time::OffsetDateTime;

/// Upper bound on a profile image data URL, in bytes.
const MAX_PROFILE_IMAGE_BYTES: usize = 2 * 1024 * 1024;

fn load_state(store: &dyn RecordStore) -> State {
    State {
        users: store.read_users(),
        tickets: store.read_tickets(),
        notifications: store.read_notifications(),
        categories: store.read_categories(),
    }
}

/// Persists a transition: one ticket write plus the fan-out batch.
fn persist_transition(
    store: &mut dyn RecordStore,
    result: &TransitionResult,
) -> Result<(), ApiError> {
    match &result.change {
        TicketChange::Upserted(ticket) => store.upsert_ticket(ticket)?,
        TicketChange::Removed(ticket_id) => store.remove_ticket(*ticket_id)?,
    }
    store.append_notifications(&result.notifications)?;
    Ok(())
}

fn require(allowed: bool, action: &str, required_role: &str) -> Result<(), ApiError> {
    if allowed {
        return Ok(());
    }
    Err(ApiError::Unauthorized {
        action: action.to_string(),
        required_role: required_role.to_string(),
    })
}

// ============================================================================
// Ticket Operations
// ============================================================================

/// Opens a new ticket on behalf of the session user.
///
/// # Errors
///
/// Returns an error if a field is invalid, the category is unknown, the
/// session role may not create tickets, or the store write fails.
pub fn create_ticket(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    request: &CreateTicketRequest,
    now: OffsetDateTime,
) -> Result<TicketInfo, ApiError> {
    let priority: Priority = request.priority.parse().map_err(translate_domain_error)?;
    let state: State = load_state(store);
    let command: Command = Command::CreateTicket {
        title: request.title.clone(),
        description: request.description.clone(),
        category: request.category.clone(),
        priority,
    };

    let result: TransitionResult =
        apply(&state, &session.to_actor(), command, now).map_err(translate_core_error)?;
    persist_transition(store, &result)?;

    let TicketChange::Upserted(ticket) = &result.change else {
        return Err(ApiError::Internal {
            message: String::from("Ticket creation produced no record"),
        });
    };
    Ok(TicketInfo::from_ticket(
        ticket,
        session.user_id,
        session.role,
        now,
    ))
}

/// Moves a ticket to a new lifecycle status.
///
/// # Errors
///
/// Returns an error if the ticket does not exist, the status string is
/// unknown, the session role may not change statuses, the assignee guard
/// rejects, or the store write fails.
pub fn change_status(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    ticket_id: i64,
    new_status: &str,
    now: OffsetDateTime,
) -> Result<TicketInfo, ApiError> {
    let new_status: TicketStatus = new_status.parse().map_err(translate_domain_error)?;
    let state: State = load_state(store);
    let command: Command = Command::ChangeStatus {
        ticket_id,
        new_status,
    };

    let result: TransitionResult =
        apply(&state, &session.to_actor(), command, now).map_err(translate_core_error)?;
    persist_transition(store, &result)?;

    let TicketChange::Upserted(ticket) = &result.change else {
        return Err(ApiError::Internal {
            message: String::from("Status change produced no record"),
        });
    };
    Ok(TicketInfo::from_ticket(
        ticket,
        session.user_id,
        session.role,
        now,
    ))
}

/// Adds a public reply to a ticket.
///
/// # Errors
///
/// Returns an error if the ticket does not exist, the text is empty, the
/// session role may not reply, or the store write fails.
pub fn add_comment(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    ticket_id: i64,
    text: &str,
    now: OffsetDateTime,
) -> Result<TicketInfo, ApiError> {
    let state: State = load_state(store);
    let command: Command = Command::AddComment {
        ticket_id,
        text: text.to_string(),
    };

    let result: TransitionResult =
        apply(&state, &session.to_actor(), command, now).map_err(translate_core_error)?;
    persist_transition(store, &result)?;

    let TicketChange::Upserted(ticket) = &result.change else {
        return Err(ApiError::Internal {
            message: String::from("Reply produced no record"),
        });
    };
    Ok(TicketInfo::from_ticket(
        ticket,
        session.user_id,
        session.role,
        now,
    ))
}

/// Adds an internal note to a ticket. Assigned agent only.
///
/// # Errors
///
/// Returns an error if the ticket does not exist, the text is empty, the
/// session is not the assigned agent, or the store write fails.
pub fn add_note(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    ticket_id: i64,
    text: &str,
    now: OffsetDateTime,
) -> Result<TicketInfo, ApiError> {
    let state: State = load_state(store);
    let command: Command = Command::AddNote {
        ticket_id,
        text: text.to_string(),
    };

    let result: TransitionResult =
        apply(&state, &session.to_actor(), command, now).map_err(translate_core_error)?;
    persist_transition(store, &result)?;

    let TicketChange::Upserted(ticket) = &result.change else {
        return Err(ApiError::Internal {
            message: String::from("Note produced no record"),
        });
    };
    Ok(TicketInfo::from_ticket(
        ticket,
        session.user_id,
        session.role,
        now,
    ))
}

/// Deletes a closed ticket. Owner only.
///
/// # Errors
///
/// Returns an error if the ticket does not exist, the session is not the
/// owner, the ticket is not closed, or the store write fails.
pub fn delete_ticket(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    ticket_id: i64,
    now: OffsetDateTime,
) -> Result<(), ApiError> {
    let state: State = load_state(store);
    let command: Command = Command::DeleteTicket { ticket_id };

    let result: TransitionResult =
        apply(&state, &session.to_actor(), command, now).map_err(translate_core_error)?;
    persist_transition(store, &result)?;
    Ok(())
}

/// Lists the tickets the session user may see.
///
/// Clients see their own tickets; agents and management see the whole
/// collection. Internal notes are filtered per ticket.
#[must_use]
pub fn list_tickets(
    store: &dyn RecordStore,
    session: &SessionContext,
    now: OffsetDateTime,
) -> Vec<TicketInfo> {
    let tickets: Vec<Ticket> = store.read_tickets();
    tickets
        .iter()
        .filter(|ticket| session.role != Role::Client || ticket.user_id == session.user_id)
        .map(|ticket| TicketInfo::from_ticket(ticket, session.user_id, session.role, now))
        .collect()
}

/// Fetches a single ticket by id.
///
/// # Errors
///
/// Returns `ResourceNotFound` if the ticket does not exist.
pub fn get_ticket(
    store: &dyn RecordStore,
    session: &SessionContext,
    ticket_id: i64,
    now: OffsetDateTime,
) -> Result<TicketInfo, ApiError> {
    let tickets: Vec<Ticket> = store.read_tickets();
    let ticket: &Ticket = tickets
        .iter()
        .find(|ticket| ticket.id == ticket_id)
        .ok_or_else(|| translate_domain_error(DomainError::TicketNotFound(ticket_id)))?;
    Ok(TicketInfo::from_ticket(
        ticket,
        session.user_id,
        session.role,
        now,
    ))
}

// ============================================================================
// Notification Operations
// ============================================================================

/// Lists the notifications visible to the session user, newest first.
#[must_use]
pub fn list_notifications(
    store: &dyn RecordStore,
    session: &SessionContext,
) -> Vec<NotificationInfo> {
    let mut visible: Vec<Notification> = store
        .read_notifications()
        .into_iter()
        .filter(|notification| {
            notification_visible_to(notification, session.user_id, session.role)
        })
        .collect();
    visible.sort_by(|a, b| b.id.cmp(&a.id));
    visible.iter().map(NotificationInfo::from_notification).collect()
}

/// Marks one notification read.
///
/// A record that is invisible to the session or already read is left
/// untouched; the operation is idempotent.
///
/// # Errors
///
/// Returns `ResourceNotFound` if no record has the id, or an error if the
/// store write fails.
pub fn mark_notification_read(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    notification_id: i64,
) -> Result<(), ApiError> {
    let notifications: Vec<Notification> = store.read_notifications();
    if !notifications.iter().any(|n| n.id == notification_id) {
        return Err(translate_domain_error(DomainError::NotificationNotFound(
            notification_id,
        )));
    }
    if let Some(updated) = mark_read(&notifications, notification_id, session.user_id, session.role)
    {
        store.set_notification_read(&updated)?;
    }
    Ok(())
}

/// Marks every notification visible to the session user as read.
///
/// # Errors
///
/// Returns an error if the store write fails.
pub fn mark_all_notifications_read(
    store: &mut dyn RecordStore,
    session: &SessionContext,
) -> Result<(), ApiError> {
    let notifications: Vec<Notification> = store.read_notifications();
    let updated: Vec<Notification> =
        mark_all_read(&notifications, session.user_id, session.role);
    store.mark_notifications_read(&updated)?;
    Ok(())
}

// ============================================================================
// Category Operations
// ============================================================================

/// Lists the category names in set order.
#[must_use]
pub fn list_categories(store: &dyn RecordStore) -> Vec<String> {
    store
        .read_categories()
        .into_iter()
        .map(|category| category.name)
        .collect()
}

/// Adds a category to the set. Management only.
///
/// # Errors
///
/// Returns an error if the session may not manage categories, the name is
/// empty or already taken, or the store write fails.
pub fn add_category(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    name: &str,
) -> Result<(), ApiError> {
    require(
        session.role.capabilities().can_manage_categories.is_allowed(),
        "add a category",
        "admin or superadmin",
    )?;
    let name: &str = name.trim();
    if name.is_empty() {
        return Err(ApiError::InvalidInput {
            field: String::from("category"),
            message: String::from("Category name cannot be empty"),
        });
    }
    let categories: Vec<Category> = store.read_categories();
    if categories
        .iter()
        .any(|category| category.name.eq_ignore_ascii_case(name))
    {
        return Err(translate_domain_error(DomainError::DuplicateCategory(
            name.to_string(),
        )));
    }
    store.append_category(&Category::new(name))?;
    Ok(())
}

/// Seeds the default category set when the collection is empty.
///
/// Idempotent: a populated set is left untouched.
///
/// # Errors
///
/// Returns an error if the store write fails.
pub fn seed_categories(store: &mut dyn RecordStore) -> Result<(), ApiError> {
    if store.read_categories().is_empty() {
        store.replace_categories(&Category::defaults())?;
    }
    Ok(())
}

// ============================================================================
// User Administration
// ============================================================================

/// Lists every user. Management only.
///
/// # Errors
///
/// Returns an error if the session may not manage users.
pub fn list_users(
    store: &dyn RecordStore,
    session: &SessionContext,
) -> Result<Vec<UserInfo>, ApiError> {
    require(
        session.role.capabilities().can_manage_users.is_allowed(),
        "list users",
        "admin or superadmin",
    )?;
    Ok(store.read_users().iter().map(UserInfo::from_user).collect())
}

/// Changes a user's role. Management only.
///
/// # Errors
///
/// Returns an error if the session may not manage users, the role string
/// is unknown, the user does not exist, or the store write fails.
pub fn change_user_role(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    user_id: i64,
    new_role: &str,
) -> Result<UserInfo, ApiError> {
    require(
        session.role.capabilities().can_manage_users.is_allowed(),
        "change a user's role",
        "admin or superadmin",
    )?;
    let role: Role = new_role.parse().map_err(translate_domain_error)?;
    let users: Vec<User> = store.read_users();
    let user: &User = users
        .iter()
        .find(|user| user.id == user_id)
        .ok_or_else(|| translate_domain_error(DomainError::UserNotFound(user_id)))?;

    let mut updated: User = user.clone();
    updated.role = role;
    store.update_user(&updated)?;
    Ok(UserInfo::from_user(&updated))
}

/// Deletes a user record. Management only.
///
/// # Errors
///
/// Returns an error if the session may not manage users, the user does not
/// exist, or the store write fails.
pub fn delete_user(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    user_id: i64,
) -> Result<(), ApiError> {
    require(
        session.role.capabilities().can_manage_users.is_allowed(),
        "delete a user",
        "admin or superadmin",
    )?;
    let users: Vec<User> = store.read_users();
    if !users.iter().any(|user| user.id == user_id) {
        return Err(translate_domain_error(DomainError::UserNotFound(user_id)));
    }
    store.remove_user(user_id)?;
    Ok(())
}

/// Updates the session user's own profile.
///
/// A password change requires the current password. Profile images travel
/// as data URLs and are validated for type and size here, at the boundary.
///
/// # Errors
///
/// Returns an error if the current password is wrong, a field is invalid,
/// or the store write fails.
pub fn update_profile(
    store: &mut dyn RecordStore,
    session: &SessionContext,
    request: &UpdateProfileRequest,
) -> Result<UserInfo, ApiError> {
    let users: Vec<User> = store.read_users();
    let user: &User = users
        .iter()
        .find(|user| user.id == session.user_id)
        .ok_or_else(|| translate_domain_error(DomainError::UserNotFound(session.user_id)))?;
    let mut updated: User = user.clone();

    if let Some(name) = &request.name {
        if name.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("name"),
                message: String::from("Name cannot be empty"),
            });
        }
        updated.name = name.clone();
    }

    if let Some(new_password) = &request.new_password {
        let current: &str = request.current_password.as_deref().unwrap_or("");
        let verified: bool = bcrypt::verify(current, &user.password_hash).unwrap_or(false);
        if !verified {
            return Err(ApiError::AuthenticationFailed {
                reason: String::from("Current password is incorrect"),
            });
        }
        if new_password.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("new_password"),
                message: String::from("Password cannot be empty"),
            });
        }
        updated.password_hash = bcrypt::hash(new_password, bcrypt::DEFAULT_COST).map_err(|err| {
            ApiError::Internal {
                message: format!("Password hashing failed: {err}"),
            }
        })?;
    }

    if let Some(image) = &request.profile_image {
        if !image.starts_with("data:image/") {
            return Err(ApiError::InvalidInput {
                field: String::from("profile_image"),
                message: String::from("Profile image must be an image data URL"),
            });
        }
        if image.len() > MAX_PROFILE_IMAGE_BYTES {
            return Err(ApiError::InvalidInput {
                field: String::from("profile_image"),
                message: String::from("Profile image exceeds the 2 MiB limit"),
            });
        }
        updated.profile_image = Some(image.clone());
    }

    store.update_user(&updated)?;

    if updated.name != session.name {
        let refreshed: SessionContext = SessionContext {
            user_id: session.user_id,
            name: updated.name.clone(),
            role: session.role,
        };
        AuthenticationService::refresh_session(store, &refreshed)?;
    }

    Ok(UserInfo::from_user(&updated))
}

// ============================================================================
// System Control
// ============================================================================

/// Clears every notification and reseeds the category defaults.
/// Management only.
///
/// # Errors
///
/// Returns an error if the session may not manage users or a store write
/// fails.
pub fn system_reset(
    store: &mut dyn RecordStore,
    session: &SessionContext,
) -> Result<(), ApiError> {
    require(
        session.role.capabilities().can_manage_users.is_allowed(),
        "reset system data",
        "admin or superadmin",
    )?;
    store.clear_notifications()?;
    store.replace_categories(&Category::defaults())?;
    tracing::info!(user_id = session.user_id, "system data reset");
    Ok(())
}
