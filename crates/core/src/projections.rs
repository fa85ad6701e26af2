// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read projections over the ticket and user collections.
//!
//! Projections are pure scans, recomputable at any time from the source
//! collections alone. Nothing here is persisted.

use helpdesk_domain::{Role, Ticket, TicketStatus, User, is_overdue};
use std::collections::BTreeMap;
use time::{Date, OffsetDateTime};

/// Ticket counts by lifecycle status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct StatusCounts {
    /// Tickets in `Open`.
    pub open: usize,
    /// Tickets in `In Progress`.
    pub in_progress: usize,
    /// Tickets in `Closed`.
    pub closed: usize,
}

impl StatusCounts {
    /// Returns the total ticket count across all statuses.
    #[must_use]
    pub const fn total(&self) -> usize {
        self.open + self.in_progress + self.closed
    }
}

/// Per-agent ticket workload.
#[derive(Debug, Clone, PartialEq)]
pub struct AgentWorkload {
    /// The agent's user id.
    pub agent_id: i64,
    /// The agent's display name.
    pub agent_name: String,
    /// Assigned tickets in `Open`.
    pub open: usize,
    /// Assigned tickets in `In Progress`.
    pub in_progress: usize,
    /// Assigned tickets in `Closed`.
    pub closed: usize,
    /// All assigned tickets.
    pub total: usize,
    /// Closed over total, in `[0.0, 1.0]`. Zero when nothing is assigned.
    pub completion_rate: f64,
}

/// Ticket count for one category.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryCount {
    /// The category name.
    pub category: String,
    /// Tickets filed under the category.
    pub count: usize,
}

/// Counts tickets by lifecycle status.
#[must_use]
pub fn status_counts(tickets: &[Ticket]) -> StatusCounts {
    let mut counts: StatusCounts = StatusCounts::default();
    for ticket in tickets {
        match ticket.status {
            TicketStatus::Open => counts.open += 1,
            TicketStatus::InProgress => counts.in_progress += 1,
            TicketStatus::Closed => counts.closed += 1,
        }
    }
    counts
}

/// Computes the workload of every agent in the user collection.
///
/// Agents with no assigned tickets appear with zero counts, so the
/// monitoring view always lists the full roster.
#[must_use]
pub fn agent_workloads(tickets: &[Ticket], users: &[User]) -> Vec<AgentWorkload> {
    users
        .iter()
        .filter(|user| user.role == Role::Agent)
        .map(|agent| {
            let assigned: Vec<&Ticket> = tickets
                .iter()
                .filter(|ticket| ticket.agent_id == Some(agent.id))
                .collect();
            let closed: usize = assigned
                .iter()
                .filter(|ticket| ticket.status == TicketStatus::Closed)
                .count();
            let in_progress: usize = assigned
                .iter()
                .filter(|ticket| ticket.status == TicketStatus::InProgress)
                .count();
            let total: usize = assigned.len();
            #[allow(clippy::cast_precision_loss)]
            let completion_rate: f64 = if total == 0 {
                0.0
            } else {
                closed as f64 / total as f64
            };
            AgentWorkload {
                agent_id: agent.id,
                agent_name: agent.name.clone(),
                open: total - in_progress - closed,
                in_progress,
                closed,
                total,
                completion_rate,
            }
        })
        .collect()
}

/// Counts tickets by category name, ordered by name.
#[must_use]
pub fn category_counts(tickets: &[Ticket]) -> Vec<CategoryCount> {
    let mut counts: BTreeMap<&str, usize> = BTreeMap::new();
    for ticket in tickets {
        *counts.entry(ticket.category.as_str()).or_insert(0) += 1;
    }
    counts
        .into_iter()
        .map(|(category, count)| CategoryCount {
            category: category.to_string(),
            count,
        })
        .collect()
}

/// Counts tickets created per calendar day, ordered by date.
#[must_use]
pub fn daily_volume(tickets: &[Ticket]) -> BTreeMap<Date, usize> {
    let mut counts: BTreeMap<Date, usize> = BTreeMap::new();
    for ticket in tickets {
        *counts.entry(ticket.created_at.date()).or_insert(0) += 1;
    }
    counts
}

/// Counts tickets created per calendar month, keyed by `(year, month)`.
#[must_use]
pub fn monthly_volume(tickets: &[Ticket]) -> BTreeMap<(i32, u8), usize> {
    let mut counts: BTreeMap<(i32, u8), usize> = BTreeMap::new();
    for ticket in tickets {
        let date: Date = ticket.created_at.date();
        *counts.entry((date.year(), u8::from(date.month()))).or_insert(0) += 1;
    }
    counts
}

/// Counts the tickets that have exceeded their SLA budget at `now`.
#[must_use]
pub fn overdue_count(tickets: &[Ticket], now: OffsetDateTime) -> usize {
    tickets.iter().filter(|ticket| is_overdue(ticket, now)).count()
}
