// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![allow(clippy::expect_used, clippy::unwrap_used)]

mod sla;

use crate::types::{Priority, Ticket, TicketStatus};
use time::OffsetDateTime;
use time::macros::datetime;

/// A fixed reference instant for deterministic tests.
pub(crate) const T0: OffsetDateTime = datetime!(2026-03-01 09:00:00 UTC);

/// Creates a minimal open ticket owned by user 1.
pub(crate) fn create_test_ticket(id: i64, priority: Priority) -> Ticket {
    Ticket {
        id,
        title: format!("Ticket {id}"),
        description: String::from("Something is broken"),
        status: TicketStatus::Open,
        priority,
        category: String::from("Teknis"),
        user_id: 1,
        agent_id: None,
        created_at: T0,
        updated_at: T0,
        comments: Vec::new(),
        notes: Vec::new(),
    }
}
