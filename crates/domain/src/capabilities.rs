// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware gating.
//!
//! The role → capability mapping is defined once here and consumed by both
//! the lifecycle guards and any view layer, so the authorization rule is
//! never re-implemented per screen. Capabilities cover role-level checks
//! only; per-ticket checks (assignee, ownership) live in the lifecycle.

use crate::types::Role;

/// Whether an action is permitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Converts a boolean into a capability.
    #[must_use]
    pub const fn from_bool(allowed: bool) -> Self {
        if allowed { Self::Allowed } else { Self::Denied }
    }

    /// Returns whether this capability permits the action.
    #[must_use]
    pub const fn is_allowed(&self) -> bool {
        matches!(self, Self::Allowed)
    }
}

/// The full capability set for a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    /// May open new tickets.
    pub can_create_ticket: Capability,
    /// May change ticket status (subject to the assignee guard).
    pub can_change_status: Capability,
    /// May reply publicly on tickets.
    pub can_comment: Capability,
    /// May write internal notes (subject to the assignee guard).
    pub can_add_note: Capability,
    /// May delete their own closed tickets.
    pub can_delete_own_closed_ticket: Capability,
    /// May create categories and reset category data.
    pub can_manage_categories: Capability,
    /// May change user roles and delete users.
    pub can_manage_users: Capability,
    /// May read aggregate reports.
    pub can_view_reports: Capability,
}

impl Role {
    /// Returns the capability set for this role.
    ///
    /// This is the single source of the authorization rule; lifecycle
    /// guards and views both consult it.
    #[must_use]
    pub const fn capabilities(self) -> CapabilitySet {
        match self {
            Self::Client => CapabilitySet {
                can_create_ticket: Capability::Allowed,
                can_change_status: Capability::Denied,
                can_comment: Capability::Allowed,
                can_add_note: Capability::Denied,
                can_delete_own_closed_ticket: Capability::Allowed,
                can_manage_categories: Capability::Denied,
                can_manage_users: Capability::Denied,
                can_view_reports: Capability::Denied,
            },
            Self::Agent => CapabilitySet {
                can_create_ticket: Capability::Denied,
                can_change_status: Capability::Allowed,
                can_comment: Capability::Allowed,
                can_add_note: Capability::Allowed,
                can_delete_own_closed_ticket: Capability::Denied,
                can_manage_categories: Capability::Denied,
                can_manage_users: Capability::Denied,
                can_view_reports: Capability::Denied,
            },
            Self::Admin | Self::SuperAdmin => CapabilitySet {
                can_create_ticket: Capability::Denied,
                can_change_status: Capability::Allowed,
                can_comment: Capability::Allowed,
                can_add_note: Capability::Denied,
                can_delete_own_closed_ticket: Capability::Denied,
                can_manage_categories: Capability::Allowed,
                can_manage_users: Capability::Allowed,
                can_view_reports: Capability::Allowed,
            },
            Self::Executive => CapabilitySet {
                can_create_ticket: Capability::Denied,
                can_change_status: Capability::Denied,
                can_comment: Capability::Denied,
                can_add_note: Capability::Denied,
                can_delete_own_closed_ticket: Capability::Denied,
                can_manage_categories: Capability::Denied,
                can_manage_users: Capability::Denied,
                can_view_reports: Capability::Allowed,
            },
        }
    }
}
