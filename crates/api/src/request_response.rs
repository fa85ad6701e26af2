// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.
//!
//! DTOs are distinct from domain types and represent the API contract.
//! Enumerated fields cross the boundary as their wire strings and are
//! parsed explicitly, so a bad value surfaces as `InvalidInput` rather
//! than a deserialization failure deep in a handler.

use helpdesk_domain::{Comment, Note, Notification, Role, Ticket, User, is_overdue};
use time::OffsetDateTime;

/// API request to register a new user.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct RegisterRequest {
    /// The new user's display name.
    pub name: String,
    /// The new user's email (unique, used for login).
    pub email: String,
    /// The new user's password (plaintext on the wire, hashed at rest).
    pub password: String,
    /// The requested role, as its wire string.
    pub role: String,
    /// Organizational sub-division, for agent registrations.
    #[serde(default)]
    pub unit: Option<String>,
}

/// A user record as exposed by the API. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct UserInfo {
    /// The user's id.
    pub id: i64,
    /// The user's display name.
    pub name: String,
    /// The user's email.
    pub email: String,
    /// The user's role, as its wire string.
    pub role: String,
    /// Organizational sub-division, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Category specialization, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Profile image data URL, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl UserInfo {
    /// Builds the API view of a user record.
    #[must_use]
    pub fn from_user(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role.as_str().to_string(),
            unit: user.unit.clone(),
            category: user.category.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

/// API request to open a new ticket.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct CreateTicketRequest {
    /// The ticket title.
    pub title: String,
    /// The problem description.
    pub description: String,
    /// The category name.
    pub category: String,
    /// The priority, as its wire string.
    pub priority: String,
}

/// API request to update the logged-in user's own profile.
#[derive(Debug, Clone, PartialEq, Eq, serde::Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name, when changing it.
    #[serde(default)]
    pub name: Option<String>,
    /// The current password; required when changing the password.
    #[serde(default)]
    pub current_password: Option<String>,
    /// New password, when changing it.
    #[serde(default)]
    pub new_password: Option<String>,
    /// New profile image as a data URL, when changing it.
    #[serde(default)]
    pub profile_image: Option<String>,
}

/// A public reply as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CommentInfo {
    /// Identifier within the ticket's comment list.
    pub id: i64,
    /// The author's user id.
    pub user_id: i64,
    /// The reply text.
    pub text: String,
    /// When the reply was written.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl CommentInfo {
    fn from_comment(comment: &Comment) -> Self {
        Self {
            id: comment.id,
            user_id: comment.user_id,
            text: comment.text.clone(),
            created_at: comment.created_at,
        }
    }
}

/// An internal note as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NoteInfo {
    /// Identifier within the ticket's note list.
    pub id: i64,
    /// The author's user id.
    pub user_id: i64,
    /// The note text.
    pub text: String,
    /// When the note was written.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl NoteInfo {
    fn from_note(note: &Note) -> Self {
        Self {
            id: note.id,
            user_id: note.user_id,
            text: note.text.clone(),
            created_at: note.created_at,
        }
    }
}

/// A ticket as exposed by the API.
///
/// Internal notes are included only when the requesting user may see them;
/// the `overdue` flag is derived from the SLA policy at assembly time.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct TicketInfo {
    /// The ticket id.
    pub id: i64,
    /// The ticket title.
    pub title: String,
    /// The problem description.
    pub description: String,
    /// The lifecycle status, as its wire string.
    pub status: String,
    /// The priority, as its wire string.
    pub priority: String,
    /// The category name.
    pub category: String,
    /// The owner's user id.
    pub user_id: i64,
    /// The assigned agent, when set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub agent_id: Option<i64>,
    /// When the ticket was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the ticket was last mutated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Whether the ticket has exceeded its SLA budget.
    pub overdue: bool,
    /// Public replies, in insertion order.
    pub comments: Vec<CommentInfo>,
    /// Internal notes, in insertion order; empty when hidden.
    pub notes: Vec<NoteInfo>,
}

impl TicketInfo {
    /// Builds the API view of a ticket for a requesting user.
    ///
    /// # Arguments
    ///
    /// * `ticket` - The ticket record
    /// * `viewer_id` - The requesting user's id
    /// * `viewer_role` - The requesting user's role
    /// * `now` - The current time, for the overdue flag
    #[must_use]
    pub fn from_ticket(ticket: &Ticket, viewer_id: i64, viewer_role: Role, now: OffsetDateTime) -> Self {
        let notes: Vec<NoteInfo> = if ticket.notes_visible_to(viewer_id, viewer_role) {
            ticket.notes.iter().map(NoteInfo::from_note).collect()
        } else {
            Vec::new()
        };
        Self {
            id: ticket.id,
            title: ticket.title.clone(),
            description: ticket.description.clone(),
            status: ticket.status.as_str().to_string(),
            priority: ticket.priority.as_str().to_string(),
            category: ticket.category.clone(),
            user_id: ticket.user_id,
            agent_id: ticket.agent_id,
            created_at: ticket.created_at,
            updated_at: ticket.updated_at,
            overdue: is_overdue(ticket, now),
            comments: ticket.comments.iter().map(CommentInfo::from_comment).collect(),
            notes,
        }
    }
}

/// A notification record as exposed by the API.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct NotificationInfo {
    /// The notification id.
    pub id: i64,
    /// The notification kind, as its wire string.
    #[serde(rename = "type")]
    pub kind: String,
    /// Human-readable message.
    pub message: String,
    /// Application link the notification points at.
    pub link: String,
    /// Whether the recipient has read the notification.
    pub is_read: bool,
    /// When the notification was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl NotificationInfo {
    /// Builds the API view of a notification record.
    #[must_use]
    pub fn from_notification(notification: &Notification) -> Self {
        let kind: &str = match notification.kind {
            helpdesk_domain::NotificationKind::General => "general",
            helpdesk_domain::NotificationKind::Ticket => "ticket",
            helpdesk_domain::NotificationKind::Management => "management",
            helpdesk_domain::NotificationKind::Note => "note",
        };
        Self {
            id: notification.id,
            kind: kind.to_string(),
            message: notification.message.clone(),
            link: notification.link.clone(),
            is_read: notification.is_read,
            created_at: notification.created_at,
        }
    }
}
