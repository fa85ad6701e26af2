// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::auth::SessionContext;
use crate::request_response::CreateTicketRequest;
use helpdesk_domain::{Category, Role, User, next_id};
use helpdesk_persistence::{DocumentStore, RecordStore};
use time::OffsetDateTime;
use time::macros::datetime;

pub(crate) const T0: OffsetDateTime = datetime!(2026-03-01 09:00:00 UTC);

pub(crate) const PASSWORD: &str = "correct horse";

/// Low-cost hash so the suite stays fast; verification does not care.
pub(crate) fn hash_password(password: &str) -> String {
    bcrypt::hash(password, 4).expect("bcrypt hash")
}

pub(crate) fn seed_user(store: &mut DocumentStore, name: &str, role: Role) -> SessionContext {
    let users: Vec<User> = store.read_users();
    let user: User = User {
        id: next_id(users.iter().map(|user| user.id)),
        name: name.to_string(),
        email: format!("{}@example.test", name.to_lowercase()),
        password_hash: hash_password(PASSWORD),
        role,
        profile_image: None,
        unit: None,
        category: None,
    };
    store.append_user(&user).expect("seed user");
    SessionContext {
        user_id: user.id,
        name: user.name,
        role: user.role,
    }
}

/// A store with the default categories and a small roster: one client, two
/// agents, one admin, one superadmin, one executive.
pub(crate) fn seeded_store() -> (
    DocumentStore,
    SessionContext, // client
    SessionContext, // agent
    SessionContext, // second agent
    SessionContext, // admin
) {
    let mut store: DocumentStore = DocumentStore::new_in_memory();
    store
        .replace_categories(&Category::defaults())
        .expect("seed categories");
    let client = seed_user(&mut store, "Budi", Role::Client);
    let agent = seed_user(&mut store, "Sari", Role::Agent);
    let second_agent = seed_user(&mut store, "Dewi", Role::Agent);
    let admin = seed_user(&mut store, "Agus", Role::Admin);
    seed_user(&mut store, "Rina", Role::SuperAdmin);
    seed_user(&mut store, "Joko", Role::Executive);
    (store, client, agent, second_agent, admin)
}

pub(crate) fn create_request() -> CreateTicketRequest {
    CreateTicketRequest {
        title: String::from("Printer down"),
        description: String::from("Shows error E5 on every job"),
        category: String::from("Teknis"),
        priority: String::from("High"),
    }
}
