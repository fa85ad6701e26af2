// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! SLA policy: resolution budgets derived from priority, and overdue
//! status derived from elapsed time.
//!
//! The budget magnitudes are fixed policy data. A closed ticket is never
//! "overdue" by this definition even if it was resolved late;
//! lateness-at-closure only surfaces as the derived resolution duration.

use crate::types::{Priority, Ticket, TicketStatus};
use time::{Duration, OffsetDateTime};

/// Returns the resolution-time budget for a priority.
///
/// High → 1 hour, Medium → 30 minutes, Low → 15 minutes.
#[must_use]
pub const fn resolution_budget(priority: Priority) -> Duration {
    match priority {
        Priority::High => Duration::hours(1),
        Priority::Medium => Duration::minutes(30),
        Priority::Low => Duration::minutes(15),
    }
}

/// Returns whether a ticket has exceeded its SLA budget at `now`.
///
/// True iff the ticket is still active (`Open` or `In Progress`) and `now`
/// is past `created_at + resolution_budget(priority)`. Monotonic in elapsed
/// time: once true, it stays true until a status change closes the ticket.
#[must_use]
pub fn is_overdue(ticket: &Ticket, now: OffsetDateTime) -> bool {
    ticket.status.is_active() && now > ticket.created_at + resolution_budget(ticket.priority)
}

/// Returns how long a closed ticket took to resolve.
///
/// `None` for tickets that are not closed, or whose timestamps are
/// inconsistent (`updated_at` before `created_at`).
#[must_use]
pub fn resolution_duration(ticket: &Ticket) -> Option<Duration> {
    if ticket.status != TicketStatus::Closed {
        return None;
    }
    let elapsed: Duration = ticket.updated_at - ticket.created_at;
    if elapsed < Duration::ZERO {
        return None;
    }
    Some(elapsed)
}

/// Returns the mean resolution duration over closed tickets.
///
/// Tickets without a valid resolution duration are skipped. Zero if no
/// closed ticket qualifies.
#[must_use]
pub fn average_resolution_time(tickets: &[Ticket]) -> Duration {
    let durations: Vec<Duration> = tickets.iter().filter_map(resolution_duration).collect();
    if durations.is_empty() {
        return Duration::ZERO;
    }
    let total: Duration = durations.iter().copied().sum();
    #[allow(clippy::cast_possible_wrap, clippy::cast_possible_truncation)]
    let count: i32 = durations.len() as i32;
    total / count
}
