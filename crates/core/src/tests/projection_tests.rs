// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    AGENT_ID, CLIENT_ID, OTHER_AGENT_ID, T0, create_test_state, create_test_ticket,
};
use crate::projections::{
    agent_workloads, category_counts, daily_volume, monthly_volume, overdue_count, status_counts,
};
use helpdesk_domain::{Priority, Ticket, TicketStatus};
use time::Duration;

fn sample_tickets() -> Vec<Ticket> {
    vec![
        create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None),
        create_test_ticket(2, CLIENT_ID, TicketStatus::InProgress, Some(AGENT_ID)),
        create_test_ticket(3, CLIENT_ID, TicketStatus::Closed, Some(AGENT_ID)),
        create_test_ticket(4, CLIENT_ID, TicketStatus::Closed, Some(AGENT_ID)),
    ]
}

#[test]
fn test_status_counts_cover_every_ticket() {
    let counts = status_counts(&sample_tickets());

    assert_eq!(counts.open, 1);
    assert_eq!(counts.in_progress, 1);
    assert_eq!(counts.closed, 2);
    assert_eq!(counts.total(), 4);
}

#[test]
fn test_agent_workloads_include_idle_agents() {
    let state = create_test_state();
    let workloads = agent_workloads(&sample_tickets(), &state.users);

    assert_eq!(workloads.len(), 2);

    let busy = workloads
        .iter()
        .find(|w| w.agent_id == AGENT_ID)
        .expect("agent is in the roster");
    assert_eq!(busy.total, 3);
    assert_eq!(busy.in_progress, 1);
    assert_eq!(busy.closed, 2);
    assert!((busy.completion_rate - 2.0 / 3.0).abs() < f64::EPSILON);

    let idle = workloads
        .iter()
        .find(|w| w.agent_id == OTHER_AGENT_ID)
        .expect("agent is in the roster");
    assert_eq!(idle.total, 0);
    assert!((idle.completion_rate - 0.0).abs() < f64::EPSILON);
}

#[test]
fn test_category_counts_group_by_name() {
    let mut tickets = sample_tickets();
    tickets[0].category = String::from("Tagihan");

    let counts = category_counts(&tickets);

    assert_eq!(counts.len(), 2);
    assert_eq!(counts[0].category, "Tagihan");
    assert_eq!(counts[0].count, 1);
    assert_eq!(counts[1].category, "Teknis");
    assert_eq!(counts[1].count, 3);
}

#[test]
fn test_volume_projections_bucket_by_creation_time() {
    let mut tickets = sample_tickets();
    tickets[0].created_at = T0 + Duration::days(40);

    let daily = daily_volume(&tickets);
    assert_eq!(daily.len(), 2);
    assert_eq!(daily.get(&T0.date()), Some(&3));

    let monthly = monthly_volume(&tickets);
    assert_eq!(monthly.get(&(2026, 3)), Some(&3));
    assert_eq!(monthly.get(&(2026, 4)), Some(&1));
}

#[test]
fn test_overdue_count_honors_status_and_budget() {
    // Medium priority carries a 30 minute budget; only active tickets count.
    let tickets = sample_tickets();

    assert_eq!(overdue_count(&tickets, T0 + Duration::minutes(29)), 0);
    assert_eq!(overdue_count(&tickets, T0 + Duration::minutes(31)), 2);
}

#[test]
fn test_high_priority_budget_is_an_hour() {
    let mut ticket = create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None);
    ticket.priority = Priority::High;
    let tickets = vec![ticket];

    assert_eq!(overdue_count(&tickets, T0 + Duration::minutes(59)), 0);
    assert_eq!(overdue_count(&tickets, T0 + Duration::minutes(61)), 1);
}
