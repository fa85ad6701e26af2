// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::State;
use helpdesk_domain::{Category, Priority, Role, Ticket, TicketStatus, User};
use helpdesk_events::Actor;
use time::OffsetDateTime;
use time::macros::datetime;

pub(crate) const T0: OffsetDateTime = datetime!(2026-03-01 09:00:00 UTC);

pub(crate) const CLIENT_ID: i64 = 1;
pub(crate) const OTHER_CLIENT_ID: i64 = 2;
pub(crate) const AGENT_ID: i64 = 3;
pub(crate) const OTHER_AGENT_ID: i64 = 4;
pub(crate) const ADMIN_ID: i64 = 5;
pub(crate) const SUPERADMIN_ID: i64 = 6;
pub(crate) const EXECUTIVE_ID: i64 = 7;

pub(crate) fn create_test_user(id: i64, name: &str, role: Role) -> User {
    User {
        id,
        name: name.to_string(),
        email: format!("{}@example.test", name.to_lowercase()),
        password_hash: String::from("$2b$12$testhash"),
        role,
        profile_image: None,
        unit: None,
        category: None,
    }
}

/// A roster with two clients, two agents, one admin, one superadmin, and
/// one executive, plus the default category set.
pub(crate) fn create_test_state() -> State {
    State {
        users: vec![
            create_test_user(CLIENT_ID, "Budi", Role::Client),
            create_test_user(OTHER_CLIENT_ID, "Citra", Role::Client),
            create_test_user(AGENT_ID, "Sari", Role::Agent),
            create_test_user(OTHER_AGENT_ID, "Dewi", Role::Agent),
            create_test_user(ADMIN_ID, "Agus", Role::Admin),
            create_test_user(SUPERADMIN_ID, "Rina", Role::SuperAdmin),
            create_test_user(EXECUTIVE_ID, "Joko", Role::Executive),
        ],
        tickets: Vec::new(),
        notifications: Vec::new(),
        categories: Category::defaults(),
    }
}

pub(crate) fn actor_for(state: &State, user_id: i64) -> Actor {
    let user: &User = state
        .users
        .iter()
        .find(|user| user.id == user_id)
        .expect("test roster contains the user");
    Actor::new(user.id, user.name.clone(), user.role)
}

pub(crate) fn create_test_ticket(
    id: i64,
    owner_id: i64,
    status: TicketStatus,
    agent_id: Option<i64>,
) -> Ticket {
    Ticket {
        id,
        title: format!("Ticket {id}"),
        description: String::from("Something is broken"),
        status,
        priority: Priority::Medium,
        category: String::from("Teknis"),
        user_id: owner_id,
        agent_id,
        created_at: T0,
        updated_at: T0,
        comments: Vec::new(),
        notes: Vec::new(),
    }
}
