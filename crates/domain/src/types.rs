// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Represents the role of a registered user.
///
/// Roles determine which lifecycle operations a user may trigger and which
/// notifications are visible to them. The authorization rule lives in a
/// single place (the capability set); views and guards both consult it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Role {
    /// Ticket owner: reports issues and follows up on their own tickets.
    #[serde(rename = "client")]
    Client,
    /// Resolver: picks up tickets from the queue and works them.
    #[serde(rename = "agent")]
    Agent,
    /// Management: administers users, categories, and reporting.
    #[serde(rename = "admin")]
    Admin,
    /// Management with structural authority (system reset, role changes).
    #[serde(rename = "superadmin")]
    SuperAdmin,
    /// Executive: read-only reporting ("pimpinan").
    #[serde(rename = "pimpinan")]
    Executive,
}

impl Role {
    /// Converts this role to its wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Client => "client",
            Self::Agent => "agent",
            Self::Admin => "admin",
            Self::SuperAdmin => "superadmin",
            Self::Executive => "pimpinan",
        }
    }

    /// Returns whether this role is a management role.
    ///
    /// Management roles receive role-scoped broadcast notifications in
    /// addition to notifications addressed to their user id.
    #[must_use]
    pub const fn is_management(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin | Self::Executive)
    }

    /// Returns whether this role receives management-kind notifications
    /// when tickets are created or change status.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        matches!(self, Self::Admin | Self::SuperAdmin)
    }
}

impl FromStr for Role {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "client" => Ok(Self::Client),
            "agent" => Ok(Self::Agent),
            "admin" => Ok(Self::Admin),
            "superadmin" => Ok(Self::SuperAdmin),
            "pimpinan" => Ok(Self::Executive),
            _ => Err(DomainError::InvalidRole(s.to_string())),
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A registered user of the helpdesk.
///
/// `id` is the canonical identifier, assigned as the current maximum id in
/// the collection plus one. Emails are unique across the collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Canonical identifier (unique, monotonically assigned).
    pub id: i64,
    /// The user's display name.
    pub name: String,
    /// The user's email (unique, used for login).
    pub email: String,
    /// Bcrypt hash of the user's password. Never the plaintext.
    pub password_hash: String,
    /// The user's role.
    pub role: Role,
    /// Optional profile image (data URL).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
    /// Organizational sub-division. Set for agents only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Optional category specialization.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
}

/// Represents the lifecycle state of a ticket.
///
/// Transitions are not forward-only: any status may be set from any other
/// by an authorized actor (an agent may move a ticket back to `Open` to
/// un-claim work). `Closed` is terminal only in the sense that owners may
/// delete their own closed tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TicketStatus {
    /// Initial state after creation.
    #[default]
    Open,
    /// An agent is working the ticket.
    #[serde(rename = "In Progress")]
    InProgress,
    /// The ticket has been resolved.
    Closed,
}

impl TicketStatus {
    /// Converts this status to its wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Open => "Open",
            Self::InProgress => "In Progress",
            Self::Closed => "Closed",
        }
    }

    /// Returns whether a ticket in this status still counts against its
    /// SLA budget.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        matches!(self, Self::Open | Self::InProgress)
    }
}

impl FromStr for TicketStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Open" => Ok(Self::Open),
            "In Progress" => Ok(Self::InProgress),
            "Closed" => Ok(Self::Closed),
            _ => Err(DomainError::InvalidStatus(s.to_string())),
        }
    }
}

impl std::fmt::Display for TicketStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Represents the priority of a ticket.
///
/// Priority determines the SLA resolution budget. Higher priority means a
/// longer budget in this system; the magnitudes are policy data, not derived.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Priority {
    /// Low priority: 15 minute resolution budget.
    Low,
    /// Medium priority: 30 minute resolution budget.
    Medium,
    /// High priority: 1 hour resolution budget.
    High,
}

impl Priority {
    /// Converts this priority to its wire string representation.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }
}

impl FromStr for Priority {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Low" => Ok(Self::Low),
            "Medium" => Ok(Self::Medium),
            "High" => Ok(Self::High),
            _ => Err(DomainError::InvalidPriority(s.to_string())),
        }
    }
}

impl std::fmt::Display for Priority {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A public reply on a ticket, visible to everyone who can see the ticket.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    /// Identifier unique within the ticket's comment list.
    pub id: i64,
    /// The author's user id.
    pub user_id: i64,
    /// The comment text.
    pub text: String,
    /// When the comment was written.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// An internal note on a ticket.
///
/// Notes are visible only to the assigned agent, the ticket owner, and
/// management; only the assigned agent may write them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Identifier unique within the ticket's note list.
    pub id: i64,
    /// The author's user id.
    pub user_id: i64,
    /// The note text.
    pub text: String,
    /// When the note was written.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

/// A unit of reported work with a lifecycle status, priority, owner, and
/// optional assigned agent.
///
/// # Invariants
///
/// - `status` transitions only through the lifecycle state machine.
/// - `user_id` (the owner) is immutable after creation.
/// - `agent_id`, once set, is not reassigned by non-privileged actors
///   (assignment is sticky: the first agent to touch the ticket keeps it).
/// - `updated_at` is refreshed on every mutation.
/// - `category` is validated against the category set at creation time only
///   and is immutable thereafter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Ticket {
    /// Canonical identifier (unique, monotonically assigned).
    pub id: i64,
    /// The ticket title.
    pub title: String,
    /// The problem description.
    pub description: String,
    /// The current lifecycle status.
    pub status: TicketStatus,
    /// The ticket priority, fixed at creation.
    pub priority: Priority,
    /// The ticket category, validated against the category set at creation.
    pub category: String,
    /// The owner's user id. Immutable.
    pub user_id: i64,
    /// The assigned agent, set on first agent interaction. Sticky once set.
    #[serde(default)]
    pub agent_id: Option<i64>,
    /// When the ticket was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the ticket was last mutated.
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
    /// Public replies, in insertion order.
    #[serde(default)]
    pub comments: Vec<Comment>,
    /// Internal notes, in insertion order.
    #[serde(default)]
    pub notes: Vec<Note>,
}

impl Ticket {
    /// Returns whether `user` may see this ticket's internal notes.
    ///
    /// Notes are visible to the assigned agent, the owner, and management.
    #[must_use]
    pub fn notes_visible_to(&self, user_id: i64, role: Role) -> bool {
        role.is_admin() || self.user_id == user_id || self.agent_id == Some(user_id)
    }
}

/// Classifies a notification for display filtering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    /// Confirmation to the acting user (e.g. "ticket created").
    General,
    /// Ticket activity addressed to an owner or agent.
    Ticket,
    /// Management broadcast about ticket flow.
    Management,
    /// Internal note activity.
    Note,
}

/// A notification record produced by the fan-out engine.
///
/// Created only as a side effect of a ticket lifecycle event. After
/// creation the only permitted mutation is flipping `is_read`; records are
/// never deleted individually (bulk-cleared by system reset only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    /// Canonical identifier; batch-assigned from a single shared counter.
    pub id: i64,
    /// The recipient's user id.
    pub user_id: i64,
    /// Optional role-addressed broadcast target. When set, every user
    /// holding the role sees the record (management roles only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_role: Option<Role>,
    /// The notification kind.
    #[serde(rename = "type")]
    pub kind: NotificationKind,
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

/// A ticket category.
///
/// Names are unique within the set. The set seeds with
/// `Teknis`, `Tagihan`, and `Umum`; tickets may only be created against a
/// known category.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category {
    /// The category name.
    pub name: String,
}

impl Category {
    /// The default categories the system seeds with.
    pub const DEFAULTS: [&'static str; 3] = ["Teknis", "Tagihan", "Umum"];

    /// Creates a new `Category`.
    #[must_use]
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
        }
    }

    /// Returns the seeded default category set.
    #[must_use]
    pub fn defaults() -> Vec<Self> {
        Self::DEFAULTS.iter().map(|name| Self::new(name)).collect()
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name)
    }
}

/// Computes the next id for a collection of identified records.
///
/// Ids are the current maximum plus one; they are never reused. Gaps are
/// only guaranteed absent under the single-writer assumption.
#[must_use]
pub fn next_id(existing: impl Iterator<Item = i64>) -> i64 {
    existing.max().unwrap_or(0) + 1
}
