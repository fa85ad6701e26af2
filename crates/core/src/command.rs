// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use helpdesk_domain::{Priority, TicketStatus};

/// A command represents user intent as data only.
///
/// Commands are the only way to request ticket state changes. Each variant
/// carries exactly the inputs of the operation; the acting user arrives
/// separately as the session context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Open a new ticket.
    CreateTicket {
        /// The ticket title.
        title: String,
        /// The problem description.
        description: String,
        /// The category name; must exist in the category set.
        category: String,
        /// The ticket priority.
        priority: Priority,
    },
    /// Move a ticket to a new lifecycle status.
    ChangeStatus {
        /// The ticket to change.
        ticket_id: i64,
        /// The status to move to.
        new_status: TicketStatus,
    },
    /// Add a public reply to a ticket.
    AddComment {
        /// The ticket to reply on.
        ticket_id: i64,
        /// The reply text.
        text: String,
    },
    /// Add an internal note to a ticket.
    AddNote {
        /// The ticket to annotate.
        ticket_id: i64,
        /// The note text.
        text: String,
    },
    /// Delete a closed ticket.
    DeleteTicket {
        /// The ticket to delete.
        ticket_id: i64,
    },
}
