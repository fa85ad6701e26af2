// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{T0, create_request, seeded_store};
use crate::error::ApiError;
use crate::operations::{
    add_comment, add_note, change_status, create_ticket, delete_ticket, get_ticket, list_tickets,
};
use helpdesk_persistence::RecordStore;
use time::Duration;

#[test]
fn test_create_ticket_persists_the_record_and_the_fan_out() {
    let (mut store, client, ..) = seeded_store();

    let info = create_ticket(&mut store, &client, &create_request(), T0).unwrap();

    assert_eq!(info.status, "Open");
    assert_eq!(store.read_tickets().len(), 1);
    // Owner confirmation, two agents, admin and superadmin.
    assert_eq!(store.read_notifications().len(), 5);
}

#[test]
fn test_rejected_creation_writes_nothing() {
    let (mut store, client, ..) = seeded_store();
    let mut request = create_request();
    request.category = String::from("Jaringan");

    let result = create_ticket(&mut store, &client, &request, T0);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
    assert!(store.read_tickets().is_empty());
    assert!(store.read_notifications().is_empty());
}

#[test]
fn test_unknown_priority_string_is_invalid_input() {
    let (mut store, client, ..) = seeded_store();
    let mut request = create_request();
    request.priority = String::from("Urgent");

    let result = create_ticket(&mut store, &client, &request, T0);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_status_change_assigns_and_persists() {
    let (mut store, client, agent, ..) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();

    let info = change_status(&mut store, &agent, 1, "In Progress", T0).unwrap();

    assert_eq!(info.status, "In Progress");
    assert_eq!(info.agent_id, Some(agent.user_id));
    assert_eq!(store.read_tickets()[0].agent_id, Some(agent.user_id));
}

#[test]
fn test_non_assignee_agent_is_rejected_without_a_write() {
    let (mut store, client, agent, second_agent, _) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();
    change_status(&mut store, &agent, 1, "In Progress", T0).unwrap();
    let before = store.read_tickets();

    let result = change_status(&mut store, &second_agent, 1, "Closed", T0);

    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
    assert_eq!(store.read_tickets(), before);
}

#[test]
fn test_reply_and_note_round_trip() {
    let (mut store, client, agent, ..) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();

    add_comment(&mut store, &agent, 1, "Looking into it.", T0).unwrap();
    let info = add_note(
        &mut store,
        &agent,
        1,
        "Customer called twice.",
        T0 + Duration::minutes(1),
    )
    .unwrap();

    assert_eq!(info.comments.len(), 1);
    assert_eq!(info.notes.len(), 1);
    assert_eq!(store.read_tickets()[0].notes.len(), 1);
}

#[test]
fn test_notes_are_hidden_from_non_assigned_agents() {
    let (mut store, client, agent, second_agent, _) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();
    // The reply claims the ticket for `agent`; only then may they note it.
    add_comment(&mut store, &agent, 1, "On it.", T0).unwrap();
    add_note(&mut store, &agent, 1, "internal", T0).unwrap();

    let for_assignee = get_ticket(&store, &agent, 1, T0).unwrap();
    let for_other = get_ticket(&store, &second_agent, 1, T0).unwrap();
    let for_owner = get_ticket(&store, &client, 1, T0).unwrap();

    assert_eq!(for_assignee.notes.len(), 1);
    assert!(for_other.notes.is_empty());
    assert_eq!(for_owner.notes.len(), 1);
}

#[test]
fn test_owner_deletes_own_closed_ticket() {
    let (mut store, client, agent, ..) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();
    change_status(&mut store, &agent, 1, "Closed", T0).unwrap();

    delete_ticket(&mut store, &client, 1, T0).unwrap();

    assert!(store.read_tickets().is_empty());
}

#[test]
fn test_open_ticket_deletion_is_a_domain_rule_violation() {
    let (mut store, client, ..) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();

    let result = delete_ticket(&mut store, &client, 1, T0);

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
    assert_eq!(store.read_tickets().len(), 1);
}

#[test]
fn test_missing_ticket_is_resource_not_found() {
    let (store, client, ..) = seeded_store();

    let result = get_ticket(&store, &client, 42, T0);

    assert!(matches!(result, Err(ApiError::ResourceNotFound { .. })));
}

#[test]
fn test_clients_list_only_their_own_tickets() {
    let (mut store, client, agent, _, admin) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();

    assert_eq!(list_tickets(&store, &client, T0).len(), 1);
    assert_eq!(list_tickets(&store, &agent, T0).len(), 1);
    assert_eq!(list_tickets(&store, &admin, T0).len(), 1);

    let other_owner = list_tickets(
        &store,
        &crate::auth::SessionContext {
            user_id: 99,
            name: String::from("Other"),
            role: helpdesk_domain::Role::Client,
        },
        T0,
    );
    assert!(other_owner.is_empty());
}

#[test]
fn test_overdue_flag_is_derived_at_read_time() {
    let (mut store, client, ..) = seeded_store();
    create_ticket(&mut store, &client, &create_request(), T0).unwrap();

    // High priority carries a one hour budget.
    let fresh = get_ticket(&store, &client, 1, T0 + Duration::minutes(59)).unwrap();
    let late = get_ticket(&store, &client, 1, T0 + Duration::minutes(61)).unwrap();

    assert!(!fresh.overdue);
    assert!(late.overdue);
}
