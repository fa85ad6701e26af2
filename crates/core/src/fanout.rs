// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Notification fan-out: resolving a ticket event to recipient audiences
//! and materializing one notification record per recipient.
//!
//! Fan-out is the only producer of notification records. Ids within a
//! batch come from a single incrementing counter so records from one event
//! never collide, even when several audiences overlap.

use helpdesk_domain::{Notification, NotificationKind, Role, TicketStatus, User};
use helpdesk_events::TicketEvent;
use time::OffsetDateTime;

/// Builds one notification record and advances the batch counter.
fn push(
    batch: &mut Vec<Notification>,
    next_id: &mut i64,
    user_id: i64,
    kind: NotificationKind,
    message: String,
    link: String,
    now: OffsetDateTime,
) {
    batch.push(Notification {
        id: *next_id,
        user_id,
        target_role: None,
        kind,
        message,
        link,
        is_read: false,
        created_at: now,
    });
    *next_id += 1;
}

/// Resolves an event to its recipient audiences and materializes the
/// notification records.
///
/// Audiences:
/// - `TicketCreated`: the owner (confirmation), every agent (queue alert),
///   every admin and superadmin (management alert).
/// - `StatusChanged`: the owner; admins and superadmins additionally when
///   the new status is `In Progress` or `Closed`.
/// - `CommentAdded`: the owner, unless the actor is the owner.
/// - `NoteAdded`: the owner, unless the actor is the owner.
///
/// # Arguments
///
/// * `event` - The event to fan out
/// * `users` - The full user collection, used to resolve role audiences
/// * `first_id` - The first free notification id; the batch counts up from it
/// * `now` - The creation timestamp for every record in the batch
#[must_use]
pub fn fan_out(
    event: &TicketEvent,
    users: &[User],
    first_id: i64,
    now: OffsetDateTime,
) -> Vec<Notification> {
    let mut batch: Vec<Notification> = Vec::new();
    let mut next_id: i64 = first_id;

    match event {
        TicketEvent::TicketCreated {
            ticket_id,
            title,
            owner,
        } => {
            let ticket_link: String = format!("/ticket/{ticket_id}");
            push(
                &mut batch,
                &mut next_id,
                owner.id,
                NotificationKind::General,
                format!("Your ticket \"{title}\" was created"),
                ticket_link.clone(),
                now,
            );
            for agent in users.iter().filter(|user| user.role == Role::Agent) {
                push(
                    &mut batch,
                    &mut next_id,
                    agent.id,
                    NotificationKind::Ticket,
                    format!("New ticket available: \"{title}\""),
                    String::from("/queue"),
                    now,
                );
            }
            for admin in users.iter().filter(|user| user.role.is_admin()) {
                push(
                    &mut batch,
                    &mut next_id,
                    admin.id,
                    NotificationKind::Management,
                    format!("New ticket created: \"{title}\""),
                    ticket_link.clone(),
                    now,
                );
            }
        }
        TicketEvent::StatusChanged {
            ticket_id,
            title,
            owner_id,
            new_status,
            ..
        } => {
            let ticket_link: String = format!("/ticket/{ticket_id}");
            push(
                &mut batch,
                &mut next_id,
                *owner_id,
                NotificationKind::Ticket,
                format!("Your ticket \"{title}\" is now {new_status}"),
                ticket_link.clone(),
                now,
            );
            if matches!(new_status, TicketStatus::InProgress | TicketStatus::Closed) {
                for admin in users.iter().filter(|user| user.role.is_admin()) {
                    push(
                        &mut batch,
                        &mut next_id,
                        admin.id,
                        NotificationKind::Management,
                        format!("Ticket \"{title}\" moved to {new_status}"),
                        ticket_link.clone(),
                        now,
                    );
                }
            }
        }
        TicketEvent::CommentAdded {
            ticket_id,
            title,
            owner_id,
            actor,
        } => {
            if actor.id != *owner_id {
                push(
                    &mut batch,
                    &mut next_id,
                    *owner_id,
                    NotificationKind::Ticket,
                    format!("New reply on \"{title}\""),
                    format!("/ticket/{ticket_id}"),
                    now,
                );
            }
        }
        TicketEvent::NoteAdded {
            ticket_id,
            title,
            owner_id,
            actor,
        } => {
            if actor.id != *owner_id {
                push(
                    &mut batch,
                    &mut next_id,
                    *owner_id,
                    NotificationKind::Note,
                    format!("New internal note on \"{title}\""),
                    format!("/ticket/{ticket_id}"),
                    now,
                );
            }
        }
    }

    batch
}

/// Returns whether a notification record is visible to a user.
///
/// Management roles (admin, superadmin, executive) see records addressed to
/// their user id or to their role, restricted to the general and management
/// kinds. Agents and clients see exactly the records addressed to their
/// user id.
///
/// Display filtering, `mark_read`, and `mark_all_read` all share this rule.
#[must_use]
pub fn notification_visible_to(notification: &Notification, user_id: i64, role: Role) -> bool {
    if role.is_management() {
        let addressed: bool =
            notification.user_id == user_id || notification.target_role == Some(role);
        let kind_allowed: bool = matches!(
            notification.kind,
            NotificationKind::General | NotificationKind::Management
        );
        return addressed && kind_allowed;
    }
    notification.user_id == user_id
}

/// Marks a single notification read on behalf of a user.
///
/// Returns the updated record when the notification exists, is visible to
/// the user, and was unread. Returns `None` otherwise, which makes the
/// operation idempotent: marking an already-read record changes nothing.
#[must_use]
pub fn mark_read(
    notifications: &[Notification],
    notification_id: i64,
    user_id: i64,
    role: Role,
) -> Option<Notification> {
    notifications
        .iter()
        .find(|notification| notification.id == notification_id)
        .filter(|notification| {
            notification_visible_to(notification, user_id, role) && !notification.is_read
        })
        .map(|notification| Notification {
            is_read: true,
            ..notification.clone()
        })
}

/// Marks every notification visible to a user as read.
///
/// Returns only the records that actually changed; repeated application
/// returns an empty batch.
#[must_use]
pub fn mark_all_read(notifications: &[Notification], user_id: i64, role: Role) -> Vec<Notification> {
    notifications
        .iter()
        .filter(|notification| {
            notification_visible_to(notification, user_id, role) && !notification.is_read
        })
        .map(|notification| Notification {
            is_read: true,
            ..notification.clone()
        })
        .collect()
}
