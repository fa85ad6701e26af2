// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod file_backend_tests;

use helpdesk_domain::{Notification, NotificationKind, Priority, Role, Ticket, TicketStatus, User};
use time::OffsetDateTime;
use time::macros::datetime;

pub(crate) const T0: OffsetDateTime = datetime!(2026-03-01 09:00:00 UTC);

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

pub(crate) fn create_test_ticket(id: i64) -> Ticket {
    Ticket {
        id,
        title: format!("Ticket {id}"),
        description: String::from("Something is broken"),
        status: TicketStatus::Open,
        priority: Priority::Medium,
        category: String::from("Teknis"),
        user_id: 1,
        agent_id: None,
        created_at: T0,
        updated_at: T0,
        comments: Vec::new(),
        notes: Vec::new(),
    }
}

pub(crate) fn create_test_notification(id: i64, user_id: i64) -> Notification {
    Notification {
        id,
        user_id,
        target_role: None,
        kind: NotificationKind::Ticket,
        message: String::from("test"),
        link: String::from("/ticket/1"),
        is_read: false,
        created_at: T0,
    }
}
