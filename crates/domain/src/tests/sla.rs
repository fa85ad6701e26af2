// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{T0, create_test_ticket};
use crate::sla::{average_resolution_time, is_overdue, resolution_budget, resolution_duration};
use crate::types::{Priority, TicketStatus};
use time::Duration;

// ============================================================================
// Resolution Budget Tests
// ============================================================================

#[test]
fn test_resolution_budget_high_is_one_hour() {
    assert_eq!(resolution_budget(Priority::High), Duration::hours(1));
}

#[test]
fn test_resolution_budget_medium_is_thirty_minutes() {
    assert_eq!(resolution_budget(Priority::Medium), Duration::minutes(30));
}

#[test]
fn test_resolution_budget_low_is_fifteen_minutes() {
    assert_eq!(resolution_budget(Priority::Low), Duration::minutes(15));
}

// ============================================================================
// Overdue Tests
// ============================================================================

#[test]
fn test_open_ticket_within_budget_is_not_overdue() {
    let ticket = create_test_ticket(1, Priority::High);

    assert!(!is_overdue(&ticket, T0 + Duration::minutes(59)));
}

#[test]
fn test_open_ticket_past_budget_is_overdue() {
    let ticket = create_test_ticket(1, Priority::High);

    assert!(is_overdue(&ticket, T0 + Duration::minutes(61)));
}

#[test]
fn test_overdue_is_monotonic_in_elapsed_time() {
    let ticket = create_test_ticket(1, Priority::Low);

    let mut was_overdue = false;
    for minutes in 0..120 {
        let overdue = is_overdue(&ticket, T0 + Duration::minutes(minutes));
        assert!(
            !(was_overdue && !overdue),
            "overdue flipped back to false at minute {minutes}"
        );
        was_overdue = overdue;
    }
    assert!(was_overdue);
}

#[test]
fn test_in_progress_ticket_can_be_overdue() {
    let mut ticket = create_test_ticket(1, Priority::Medium);
    ticket.status = TicketStatus::InProgress;

    assert!(is_overdue(&ticket, T0 + Duration::minutes(31)));
}

#[test]
fn test_closed_ticket_is_never_overdue() {
    let mut ticket = create_test_ticket(1, Priority::High);
    ticket.status = TicketStatus::Closed;
    ticket.updated_at = T0 + Duration::minutes(61);

    // Closed late, but lateness-at-closure is not "overdue".
    assert!(!is_overdue(&ticket, T0 + Duration::hours(10)));
}

#[test]
fn test_scenario_high_priority_overdue_then_closed() {
    let mut ticket = create_test_ticket(1, Priority::High);
    let t_61 = T0 + Duration::minutes(61);

    assert!(is_overdue(&ticket, t_61));

    ticket.status = TicketStatus::Closed;
    ticket.updated_at = t_61;

    assert!(!is_overdue(&ticket, t_61 + Duration::minutes(1)));
    assert!(!is_overdue(&ticket, t_61 + Duration::days(30)));
}

// ============================================================================
// Resolution Duration Tests
// ============================================================================

#[test]
fn test_resolution_duration_only_for_closed_tickets() {
    let mut ticket = create_test_ticket(1, Priority::Low);
    ticket.updated_at = T0 + Duration::minutes(20);

    assert_eq!(resolution_duration(&ticket), None);

    ticket.status = TicketStatus::Closed;
    assert_eq!(resolution_duration(&ticket), Some(Duration::minutes(20)));
}

#[test]
fn test_resolution_duration_rejects_inconsistent_timestamps() {
    let mut ticket = create_test_ticket(1, Priority::Low);
    ticket.status = TicketStatus::Closed;
    ticket.updated_at = T0 - Duration::minutes(5);

    assert_eq!(resolution_duration(&ticket), None);
}

#[test]
fn test_average_resolution_time_empty_is_zero() {
    assert_eq!(average_resolution_time(&[]), Duration::ZERO);
}

#[test]
fn test_average_resolution_time_skips_open_tickets() {
    let open = create_test_ticket(1, Priority::Low);
    let mut closed = create_test_ticket(2, Priority::Low);
    closed.status = TicketStatus::Closed;
    closed.updated_at = T0 + Duration::minutes(30);

    let avg = average_resolution_time(&[open, closed]);
    assert_eq!(avg, Duration::minutes(30));
}

#[test]
fn test_average_resolution_time_is_the_mean() {
    let mut a = create_test_ticket(1, Priority::Low);
    a.status = TicketStatus::Closed;
    a.updated_at = T0 + Duration::minutes(10);

    let mut b = create_test_ticket(2, Priority::High);
    b.status = TicketStatus::Closed;
    b.updated_at = T0 + Duration::minutes(30);

    let avg = average_resolution_time(&[a, b]);
    assert_eq!(avg, Duration::minutes(20));
}
