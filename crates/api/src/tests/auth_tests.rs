// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::{PASSWORD, seed_user, seeded_store};
use crate::auth::AuthenticationService;
use crate::error::ApiError;
use crate::request_response::RegisterRequest;
use helpdesk_domain::Role;
use helpdesk_persistence::{DocumentStore, RecordStore};

fn register_request(name: &str, role: &str) -> RegisterRequest {
    RegisterRequest {
        name: name.to_string(),
        email: format!("{}@example.test", name.to_lowercase()),
        password: String::from("s3cret pass"),
        role: role.to_string(),
        unit: None,
    }
}

// ============================================================================
// Registration Tests
// ============================================================================

#[test]
fn test_first_registration_may_bootstrap_a_superadmin() {
    let mut store: DocumentStore = DocumentStore::new_in_memory();

    let info = AuthenticationService::register(
        &mut store,
        &register_request("Rina", "superadmin"),
        None,
    )
    .unwrap();

    assert_eq!(info.id, 1);
    assert_eq!(info.role, "superadmin");
}

#[test]
fn test_privileged_registration_requires_a_managing_session() {
    let (mut store, client, ..) = seeded_store();

    let anonymous =
        AuthenticationService::register(&mut store, &register_request("Eko", "agent"), None);
    assert!(matches!(anonymous, Err(ApiError::Unauthorized { .. })));

    let as_client = AuthenticationService::register(
        &mut store,
        &register_request("Eko", "agent"),
        Some(&client),
    );
    assert!(matches!(as_client, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_admin_may_register_an_agent_with_a_unit() {
    let (mut store, _, _, _, admin) = seeded_store();
    let mut request = register_request("Eko", "agent");
    request.unit = Some(String::from("Network Ops"));

    let info = AuthenticationService::register(&mut store, &request, Some(&admin)).unwrap();

    assert_eq!(info.role, "agent");
    assert_eq!(info.unit.as_deref(), Some("Network Ops"));
}

#[test]
fn test_client_self_registration_is_open() {
    let (mut store, ..) = seeded_store();

    let info =
        AuthenticationService::register(&mut store, &register_request("Citra", "client"), None)
            .unwrap();

    assert_eq!(info.role, "client");
}

#[test]
fn test_duplicate_email_is_rejected() {
    let (mut store, ..) = seeded_store();

    let result =
        AuthenticationService::register(&mut store, &register_request("Budi", "client"), None);

    assert!(matches!(result, Err(ApiError::DomainRuleViolation { .. })));
}

#[test]
fn test_unknown_role_string_is_invalid_input() {
    let mut store: DocumentStore = DocumentStore::new_in_memory();

    let result =
        AuthenticationService::register(&mut store, &register_request("Budi", "wizard"), None);

    assert!(matches!(result, Err(ApiError::InvalidInput { .. })));
}

#[test]
fn test_passwords_are_stored_hashed() {
    let mut store: DocumentStore = DocumentStore::new_in_memory();
    let request = register_request("Budi", "client");

    AuthenticationService::register(&mut store, &request, None).unwrap();

    let stored = &store.read_users()[0].password_hash;
    assert_ne!(stored, &request.password);
    assert!(stored.starts_with("$2"));
}

// ============================================================================
// Login and Session Tests
// ============================================================================

#[test]
fn test_login_writes_the_session_document() {
    let (mut store, client, ..) = seeded_store();

    let session =
        AuthenticationService::login(&mut store, "budi@example.test", PASSWORD).unwrap();

    assert_eq!(session, client);
    assert_eq!(
        AuthenticationService::current_session(&store),
        Some(session)
    );
}

#[test]
fn test_login_email_is_case_insensitive() {
    let (mut store, ..) = seeded_store();

    assert!(AuthenticationService::login(&mut store, "BUDI@example.test", PASSWORD).is_ok());
}

#[test]
fn test_login_failure_does_not_say_which_part_was_wrong() {
    let (mut store, ..) = seeded_store();

    let bad_password = AuthenticationService::login(&mut store, "budi@example.test", "nope");
    let bad_email = AuthenticationService::login(&mut store, "ghost@example.test", PASSWORD);

    assert_eq!(
        bad_password.unwrap_err(),
        bad_email.unwrap_err(),
    );
}

#[test]
fn test_failed_login_leaves_no_session() {
    let (mut store, ..) = seeded_store();

    let _ = AuthenticationService::login(&mut store, "budi@example.test", "nope");

    assert!(AuthenticationService::current_session(&store).is_none());
}

#[test]
fn test_logout_clears_the_session() {
    let (mut store, ..) = seeded_store();
    AuthenticationService::login(&mut store, "budi@example.test", PASSWORD).unwrap();

    AuthenticationService::logout(&mut store).unwrap();

    assert!(AuthenticationService::current_session(&store).is_none());
}

#[test]
fn test_last_login_wins_the_session_document() {
    let (mut store, ..) = seeded_store();
    let mut agent_store = store;
    seed_user(&mut agent_store, "Extra", Role::Client);

    AuthenticationService::login(&mut agent_store, "budi@example.test", PASSWORD).unwrap();
    AuthenticationService::login(&mut agent_store, "sari@example.test", PASSWORD).unwrap();

    let current = AuthenticationService::current_session(&agent_store).unwrap();
    assert_eq!(current.name, "Sari");
}
