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
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod capabilities;
mod error;
mod sla;
mod types;
mod validation;

#[cfg(test)]
mod tests;

pub use capabilities::{Capability, CapabilitySet};
pub use error::DomainError;
pub use sla::{average_resolution_time, is_overdue, resolution_budget, resolution_duration};
pub use types::{
    Category, Comment, Note, Notification, NotificationKind, Priority, Role, Ticket, TicketStatus,
    User, next_id,
};
pub use validation::{
    validate_category_known, validate_comment_text, validate_email_unique, validate_ticket_fields,
    validate_user_fields,
};
