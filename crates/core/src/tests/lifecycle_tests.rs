// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{
    ADMIN_ID, AGENT_ID, CLIENT_ID, OTHER_AGENT_ID, OTHER_CLIENT_ID, T0, actor_for,
    create_test_state, create_test_ticket,
};
use crate::command::Command;
use crate::error::CoreError;
use crate::state::{State, TicketChange, TransitionResult};
use crate::{apply, validate_ticket_exists};
use helpdesk_domain::{DomainError, NotificationKind, Priority, TicketStatus};
use helpdesk_events::TicketEvent;
use time::Duration;

fn create_command() -> Command {
    Command::CreateTicket {
        title: String::from("Printer down"),
        description: String::from("Shows error E5 on every job"),
        category: String::from("Teknis"),
        priority: Priority::High,
    }
}

// ============================================================================
// Creation Tests
// ============================================================================

#[test]
fn test_create_ticket_starts_open_and_unassigned() {
    let state: State = create_test_state();

    let result: TransitionResult =
        apply(&state, &actor_for(&state, CLIENT_ID), create_command(), T0).unwrap();

    let TicketChange::Upserted(ticket) = result.change else {
        panic!("creation must upsert a ticket");
    };
    assert_eq!(ticket.id, 1);
    assert_eq!(ticket.status, TicketStatus::Open);
    assert_eq!(ticket.agent_id, None);
    assert_eq!(ticket.user_id, CLIENT_ID);
    assert_eq!(ticket.created_at, T0);
    assert_eq!(ticket.updated_at, T0);
}

#[test]
fn test_create_ticket_ids_are_max_plus_one() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(7, CLIENT_ID, TicketStatus::Open, None));

    let result: TransitionResult =
        apply(&state, &actor_for(&state, CLIENT_ID), create_command(), T0).unwrap();

    assert_eq!(result.change.ticket_id(), 8);
}

#[test]
fn test_create_ticket_notifies_owner_agents_and_admins() {
    let state: State = create_test_state();

    let result: TransitionResult =
        apply(&state, &actor_for(&state, CLIENT_ID), create_command(), T0).unwrap();

    // One confirmation, one per agent (2), one per admin/superadmin (2).
    assert_eq!(result.notifications.len(), 5);
    assert_eq!(result.notifications[0].user_id, CLIENT_ID);
    assert_eq!(result.notifications[0].kind, NotificationKind::General);
    assert!(
        result
            .notifications
            .iter()
            .filter(|n| n.kind == NotificationKind::Ticket)
            .all(|n| n.link == "/queue")
    );
    assert_eq!(
        result
            .notifications
            .iter()
            .filter(|n| n.kind == NotificationKind::Management)
            .count(),
        2
    );
}

#[test]
fn test_create_ticket_rejects_unknown_category() {
    let state: State = create_test_state();
    let command: Command = Command::CreateTicket {
        title: String::from("Printer down"),
        description: String::from("Shows error E5"),
        category: String::from("Jaringan"),
        priority: Priority::Low,
    };

    let result = apply(&state, &actor_for(&state, CLIENT_ID), command, T0);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::UnknownCategory(_)))
    ));
}

#[test]
fn test_create_ticket_rejects_non_client_roles() {
    let state: State = create_test_state();

    for actor_id in [AGENT_ID, ADMIN_ID] {
        let result = apply(&state, &actor_for(&state, actor_id), create_command(), T0);

        assert!(matches!(
            result,
            Err(CoreError::DomainViolation(
                DomainError::ActionNotPermitted { .. }
            ))
        ));
    }
}

// ============================================================================
// Status Change Tests
// ============================================================================

#[test]
fn test_first_agent_to_touch_becomes_assignee() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));
    let command: Command = Command::ChangeStatus {
        ticket_id: 1,
        new_status: TicketStatus::InProgress,
    };

    let result: TransitionResult =
        apply(&state, &actor_for(&state, AGENT_ID), command, T0).unwrap();

    let TicketChange::Upserted(ticket) = result.change else {
        panic!("status change must upsert");
    };
    assert_eq!(ticket.agent_id, Some(AGENT_ID));
    assert_eq!(ticket.status, TicketStatus::InProgress);
}

#[test]
fn test_non_assignee_agent_is_rejected_and_assignment_survives() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::InProgress,
        Some(AGENT_ID),
    ));
    let command: Command = Command::ChangeStatus {
        ticket_id: 1,
        new_status: TicketStatus::Closed,
    };

    let result = apply(&state, &actor_for(&state, OTHER_AGENT_ID), command, T0);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotAssignedAgent {
            ticket_id: 1,
            assigned_agent_id: Some(AGENT_ID),
            actor_id: OTHER_AGENT_ID,
        }))
    ));
    // The rejected transition left the collection untouched.
    assert_eq!(
        validate_ticket_exists(&state.tickets, 1).unwrap().agent_id,
        Some(AGENT_ID)
    );
}

#[test]
fn test_admin_bypasses_the_assignee_guard() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::InProgress,
        Some(AGENT_ID),
    ));
    let command: Command = Command::ChangeStatus {
        ticket_id: 1,
        new_status: TicketStatus::Closed,
    };

    let result: TransitionResult =
        apply(&state, &actor_for(&state, ADMIN_ID), command, T0).unwrap();

    let TicketChange::Upserted(ticket) = result.change else {
        panic!("status change must upsert");
    };
    assert_eq!(ticket.status, TicketStatus::Closed);
    // An admin touching the ticket does not steal the assignment.
    assert_eq!(ticket.agent_id, Some(AGENT_ID));
}

#[test]
fn test_status_may_move_backwards() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::Closed,
        Some(AGENT_ID),
    ));
    let command: Command = Command::ChangeStatus {
        ticket_id: 1,
        new_status: TicketStatus::Open,
    };

    let result: TransitionResult =
        apply(&state, &actor_for(&state, AGENT_ID), command, T0).unwrap();

    let TicketChange::Upserted(ticket) = result.change else {
        panic!("status change must upsert");
    };
    assert_eq!(ticket.status, TicketStatus::Open);
}

#[test]
fn test_status_change_refreshes_updated_at() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));
    let later = T0 + Duration::minutes(10);
    let command: Command = Command::ChangeStatus {
        ticket_id: 1,
        new_status: TicketStatus::InProgress,
    };

    let result: TransitionResult =
        apply(&state, &actor_for(&state, AGENT_ID), command, later).unwrap();

    let TicketChange::Upserted(ticket) = result.change else {
        panic!("status change must upsert");
    };
    assert_eq!(ticket.updated_at, later);
    assert_eq!(ticket.created_at, T0);
}

#[test]
fn test_status_change_rejects_missing_ticket() {
    let state: State = create_test_state();
    let command: Command = Command::ChangeStatus {
        ticket_id: 42,
        new_status: TicketStatus::Closed,
    };

    let result = apply(&state, &actor_for(&state, AGENT_ID), command, T0);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::TicketNotFound(42)))
    ));
}

#[test]
fn test_clients_cannot_change_status() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));
    let command: Command = Command::ChangeStatus {
        ticket_id: 1,
        new_status: TicketStatus::Closed,
    };

    let result = apply(&state, &actor_for(&state, CLIENT_ID), command, T0);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ActionNotPermitted { .. }
        ))
    ));
}

// ============================================================================
// Comment and Note Tests
// ============================================================================

#[test]
fn test_agent_reply_claims_unassigned_ticket() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));
    let command: Command = Command::AddComment {
        ticket_id: 1,
        text: String::from("Looking into it."),
    };

    let result: TransitionResult =
        apply(&state, &actor_for(&state, AGENT_ID), command, T0).unwrap();

    let TicketChange::Upserted(ticket) = result.change else {
        panic!("comment must upsert");
    };
    assert_eq!(ticket.agent_id, Some(AGENT_ID));
    assert_eq!(ticket.comments.len(), 1);
    assert_eq!(ticket.comments[0].id, 1);
    assert_eq!(ticket.comments[0].user_id, AGENT_ID);
}

#[test]
fn test_owner_reply_does_not_notify_the_owner() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::InProgress,
        Some(AGENT_ID),
    ));
    let command: Command = Command::AddComment {
        ticket_id: 1,
        text: String::from("Any update?"),
    };

    let result: TransitionResult =
        apply(&state, &actor_for(&state, CLIENT_ID), command, T0).unwrap();

    assert!(result.notifications.is_empty());
}

#[test]
fn test_comment_rejects_empty_text() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));
    let command: Command = Command::AddComment {
        ticket_id: 1,
        text: String::from("   "),
    };

    let result = apply(&state, &actor_for(&state, CLIENT_ID), command, T0);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::EmptyText))
    ));
}

#[test]
fn test_note_requires_the_assigned_agent() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::InProgress,
        Some(AGENT_ID),
    ));
    let command: Command = Command::AddNote {
        ticket_id: 1,
        text: String::from("Customer called twice."),
    };

    let rejected = apply(
        &state,
        &actor_for(&state, OTHER_AGENT_ID),
        command.clone(),
        T0,
    );
    assert!(matches!(
        rejected,
        Err(CoreError::DomainViolation(
            DomainError::NotAssignedAgent { .. }
        ))
    ));

    let result: TransitionResult =
        apply(&state, &actor_for(&state, AGENT_ID), command, T0).unwrap();
    let TicketChange::Upserted(ticket) = result.change else {
        panic!("note must upsert");
    };
    assert_eq!(ticket.notes.len(), 1);
    assert!(matches!(
        result.event,
        Some(TicketEvent::NoteAdded { .. })
    ));
}

#[test]
fn test_note_on_an_unassigned_ticket_is_rejected() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));
    let command: Command = Command::AddNote {
        ticket_id: 1,
        text: String::from("Customer called twice."),
    };

    let result = apply(&state, &actor_for(&state, AGENT_ID), command, T0);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotAssignedAgent {
            ticket_id: 1,
            assigned_agent_id: None,
            actor_id: AGENT_ID,
        }))
    ));
    // Unlike a reply, a rejected note never claims the ticket.
    assert_eq!(
        validate_ticket_exists(&state.tickets, 1).unwrap().agent_id,
        None
    );
}

#[test]
fn test_clients_cannot_write_notes() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));
    let command: Command = Command::AddNote {
        ticket_id: 1,
        text: String::from("sneaky"),
    };

    let result = apply(&state, &actor_for(&state, CLIENT_ID), command, T0);

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ActionNotPermitted { .. }
        ))
    ));
}

// ============================================================================
// Deletion Tests
// ============================================================================

#[test]
fn test_owner_deletes_own_closed_ticket() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::Closed,
        Some(AGENT_ID),
    ));

    let result: TransitionResult = apply(
        &state,
        &actor_for(&state, CLIENT_ID),
        Command::DeleteTicket { ticket_id: 1 },
        T0,
    )
    .unwrap();

    assert_eq!(result.change, TicketChange::Removed(1));
    assert_eq!(result.event, None);
    assert!(result.notifications.is_empty());
}

#[test]
fn test_deletion_rejects_non_owner() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::Closed,
        None,
    ));

    let result = apply(
        &state,
        &actor_for(&state, OTHER_CLIENT_ID),
        Command::DeleteTicket { ticket_id: 1 },
        T0,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(DomainError::NotTicketOwner {
            ticket_id: 1,
            owner_id: CLIENT_ID,
            actor_id: OTHER_CLIENT_ID,
        }))
    ));
}

#[test]
fn test_deletion_rejects_open_ticket() {
    let mut state: State = create_test_state();
    state
        .tickets
        .push(create_test_ticket(1, CLIENT_ID, TicketStatus::Open, None));

    let result = apply(
        &state,
        &actor_for(&state, CLIENT_ID),
        Command::DeleteTicket { ticket_id: 1 },
        T0,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::TicketNotClosed { .. }
        ))
    ));
}

#[test]
fn test_deletion_rejects_admin_even_for_closed_tickets() {
    let mut state: State = create_test_state();
    state.tickets.push(create_test_ticket(
        1,
        CLIENT_ID,
        TicketStatus::Closed,
        None,
    ));

    let result = apply(
        &state,
        &actor_for(&state, ADMIN_ID),
        Command::DeleteTicket { ticket_id: 1 },
        T0,
    );

    assert!(matches!(
        result,
        Err(CoreError::DomainViolation(
            DomainError::ActionNotPermitted { .. }
        ))
    ));
}
