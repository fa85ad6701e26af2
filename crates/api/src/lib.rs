// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Operations boundary for the Helpdesk System.
//!
//! This crate is the only layer that wires the pure lifecycle engine and
//! the record store together. Every operation reads the current records,
//! delegates the decision to `helpdesk` (the core), persists the resulting
//! change through the targeted store primitives, and returns a DTO.
//! Operations are all-or-nothing: a rejected command writes nothing.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

mod auth;
mod error;
mod operations;
mod reports;
mod request_response;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, SessionContext};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use operations::{
    add_category, add_comment, add_note, change_status, change_user_role, create_ticket,
    delete_ticket, delete_user, get_ticket, list_categories, list_notifications, list_tickets,
    list_users, mark_all_notifications_read, mark_notification_read, seed_categories, system_reset,
    update_profile,
};
pub use reports::{
    AgentWorkloadInfo, CategoryCountInfo, DailyVolumeInfo, MonthlyVolumeInfo, OverdueReport,
    ResolutionReport, StatusReport, VolumeReport, agent_workload_report, category_report,
    overdue_report, resolution_report, status_report, volume_report,
};
pub use request_response::{
    CommentInfo, CreateTicketRequest, NoteInfo, NotificationInfo, RegisterRequest, TicketInfo,
    UpdateProfileRequest, UserInfo,
};
