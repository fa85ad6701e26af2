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

mod apply;
mod command;
mod error;
mod fanout;
mod projections;
mod state;

#[cfg(test)]
mod tests;

use helpdesk_domain::{DomainError, Ticket};

// Re-export public types and functions
pub use apply::apply;
pub use command::Command;
pub use error::CoreError;
pub use fanout::{fan_out, mark_all_read, mark_read, notification_visible_to};
pub use projections::{
    AgentWorkload, CategoryCount, StatusCounts, agent_workloads, category_counts, daily_volume,
    monthly_volume, overdue_count, status_counts,
};
pub use state::{State, TicketChange, TransitionResult};

/// Validates that a ticket exists in the collection.
///
/// This is a read-only validation that does not produce an event.
///
/// # Arguments
///
/// * `tickets` - The ticket collection to check
/// * `ticket_id` - The ticket id to validate
///
/// # Returns
///
/// * `Ok(&Ticket)` if the ticket exists
/// * `Err(DomainError::TicketNotFound)` if the ticket does not exist
///
/// # Errors
///
/// Returns an error if no ticket with `ticket_id` is in the collection.
pub fn validate_ticket_exists(tickets: &[Ticket], ticket_id: i64) -> Result<&Ticket, DomainError> {
    tickets
        .iter()
        .find(|ticket| ticket.id == ticket_id)
        .ok_or(DomainError::TicketNotFound(ticket_id))
}
