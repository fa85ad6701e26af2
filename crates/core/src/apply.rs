// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::command::Command;
use crate::error::CoreError;
use crate::fanout::fan_out;
use crate::state::{State, TicketChange, TransitionResult};
use helpdesk_domain::{
    Capability, Comment, DomainError, Note, Notification, Role, Ticket, TicketStatus, next_id,
    validate_category_known, validate_comment_text, validate_ticket_fields,
};
use helpdesk_events::{Actor, TicketEvent};
use time::OffsetDateTime;

/// Checks a role-level capability, rejecting with the action name.
fn require(capability: Capability, action: &str, role: Role) -> Result<(), CoreError> {
    if capability.is_allowed() {
        return Ok(());
    }
    Err(CoreError::DomainViolation(DomainError::ActionNotPermitted {
        action: action.to_string(),
        role: role.as_str().to_string(),
    }))
}

/// Rejects agents acting on a ticket that is assigned to someone else.
///
/// Assignment is sticky: once a ticket has an assignee, only that agent may
/// work it. Management roles are not subject to this guard.
fn guard_assignee(ticket: &Ticket, actor: &Actor) -> Result<(), CoreError> {
    if actor.role != Role::Agent {
        return Ok(());
    }
    match ticket.agent_id {
        Some(assigned) if assigned != actor.id => {
            Err(CoreError::DomainViolation(DomainError::NotAssignedAgent {
                ticket_id: ticket.id,
                assigned_agent_id: Some(assigned),
                actor_id: actor.id,
            }))
        }
        _ => Ok(()),
    }
}

/// Assigns the ticket to the actor if it is unassigned and the actor is an
/// agent. The first agent to reply or move a ticket becomes its assignee.
fn claim_if_unassigned(ticket: &mut Ticket, actor: &Actor) {
    if actor.role == Role::Agent && ticket.agent_id.is_none() {
        ticket.agent_id = Some(actor.id);
    }
}

/// Computes the first free notification id for a fan-out batch.
fn next_notification_id(state: &State) -> i64 {
    next_id(state.notifications.iter().map(|notification| notification.id))
}

/// Applies a command to the current state, producing a ticket change, an
/// event, and the fanned-out notification records.
///
/// The function is pure: it reads `state` and returns the change to make,
/// leaving persistence to the caller. Guard failures reject the whole
/// operation; nothing is partially applied.
///
/// # Arguments
///
/// * `state` - The current record-store state (immutable)
/// * `actor` - The acting session context
/// * `command` - The command to apply
/// * `now` - The current time, injected for determinism
///
/// # Returns
///
/// * `Ok(TransitionResult)` containing the change, event, and notifications
/// * `Err(CoreError)` if a validation rule or lifecycle guard rejects
///
/// # Errors
///
/// Returns an error if:
/// - The actor's role lacks the capability for the command
/// - A referenced ticket or category does not exist
/// - A per-ticket guard (assignee, ownership, closed-only deletion) rejects
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    actor: &Actor,
    command: Command,
    now: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    match command {
        Command::CreateTicket {
            title,
            description,
            category,
            priority,
        } => {
            require(
                actor.role.capabilities().can_create_ticket,
                "create tickets",
                actor.role,
            )?;
            validate_ticket_fields(&title, &description)?;
            validate_category_known(&category, &state.categories)?;

            let ticket_id: i64 = next_id(state.tickets.iter().map(|ticket| ticket.id));
            let ticket: Ticket = Ticket {
                id: ticket_id,
                title: title.clone(),
                description,
                status: TicketStatus::Open,
                priority,
                category,
                user_id: actor.id,
                agent_id: None,
                created_at: now,
                updated_at: now,
                comments: Vec::new(),
                notes: Vec::new(),
            };

            let event: TicketEvent = TicketEvent::TicketCreated {
                ticket_id,
                title,
                owner: actor.clone(),
            };
            let notifications: Vec<Notification> =
                fan_out(&event, &state.users, next_notification_id(state), now);

            Ok(TransitionResult {
                change: TicketChange::Upserted(ticket),
                event: Some(event),
                notifications,
            })
        }
        Command::ChangeStatus {
            ticket_id,
            new_status,
        } => {
            require(
                actor.role.capabilities().can_change_status,
                "change ticket status",
                actor.role,
            )?;
            let ticket: &Ticket = crate::validate_ticket_exists(&state.tickets, ticket_id)?;
            guard_assignee(ticket, actor)?;

            // Any status may be set from any other; there is no forward-only
            // ordering in this lifecycle.
            let mut new_ticket: Ticket = ticket.clone();
            claim_if_unassigned(&mut new_ticket, actor);
            new_ticket.status = new_status;
            new_ticket.updated_at = now;

            let event: TicketEvent = TicketEvent::StatusChanged {
                ticket_id,
                title: new_ticket.title.clone(),
                owner_id: new_ticket.user_id,
                new_status,
                actor: actor.clone(),
            };
            let notifications: Vec<Notification> =
                fan_out(&event, &state.users, next_notification_id(state), now);

            Ok(TransitionResult {
                change: TicketChange::Upserted(new_ticket),
                event: Some(event),
                notifications,
            })
        }
        Command::AddComment { ticket_id, text } => {
            require(
                actor.role.capabilities().can_comment,
                "reply on tickets",
                actor.role,
            )?;
            validate_comment_text(&text)?;
            let ticket: &Ticket = crate::validate_ticket_exists(&state.tickets, ticket_id)?;

            let mut new_ticket: Ticket = ticket.clone();
            claim_if_unassigned(&mut new_ticket, actor);
            let comment: Comment = Comment {
                id: next_id(new_ticket.comments.iter().map(|comment| comment.id)),
                user_id: actor.id,
                text,
                created_at: now,
            };
            new_ticket.comments.push(comment);
            new_ticket.updated_at = now;

            let event: TicketEvent = TicketEvent::CommentAdded {
                ticket_id,
                title: new_ticket.title.clone(),
                owner_id: new_ticket.user_id,
                actor: actor.clone(),
            };
            let notifications: Vec<Notification> =
                fan_out(&event, &state.users, next_notification_id(state), now);

            Ok(TransitionResult {
                change: TicketChange::Upserted(new_ticket),
                event: Some(event),
                notifications,
            })
        }
        Command::AddNote { ticket_id, text } => {
            require(
                actor.role.capabilities().can_add_note,
                "write internal notes",
                actor.role,
            )?;
            validate_comment_text(&text)?;
            let ticket: &Ticket = crate::validate_ticket_exists(&state.tickets, ticket_id)?;
            // Notes are strictly assignee-only; unlike replies and status
            // changes, writing one never claims an unassigned ticket.
            if ticket.agent_id != Some(actor.id) {
                return Err(CoreError::DomainViolation(DomainError::NotAssignedAgent {
                    ticket_id: ticket.id,
                    assigned_agent_id: ticket.agent_id,
                    actor_id: actor.id,
                }));
            }

            let mut new_ticket: Ticket = ticket.clone();
            let note: Note = Note {
                id: next_id(new_ticket.notes.iter().map(|note| note.id)),
                user_id: actor.id,
                text,
                created_at: now,
            };
            new_ticket.notes.push(note);
            new_ticket.updated_at = now;

            let event: TicketEvent = TicketEvent::NoteAdded {
                ticket_id,
                title: new_ticket.title.clone(),
                owner_id: new_ticket.user_id,
                actor: actor.clone(),
            };
            let notifications: Vec<Notification> =
                fan_out(&event, &state.users, next_notification_id(state), now);

            Ok(TransitionResult {
                change: TicketChange::Upserted(new_ticket),
                event: Some(event),
                notifications,
            })
        }
        Command::DeleteTicket { ticket_id } => {
            require(
                actor.role.capabilities().can_delete_own_closed_ticket,
                "delete tickets",
                actor.role,
            )?;
            let ticket: &Ticket = crate::validate_ticket_exists(&state.tickets, ticket_id)?;
            if ticket.user_id != actor.id {
                return Err(CoreError::DomainViolation(DomainError::NotTicketOwner {
                    ticket_id,
                    owner_id: ticket.user_id,
                    actor_id: actor.id,
                }));
            }
            if ticket.status != TicketStatus::Closed {
                return Err(CoreError::DomainViolation(DomainError::TicketNotClosed {
                    ticket_id,
                    status: ticket.status.as_str().to_string(),
                }));
            }

            // Deletion has no observers; no event and no fan-out.
            Ok(TransitionResult {
                change: TicketChange::Removed(ticket_id),
                event: None,
                notifications: Vec::new(),
            })
        }
    }
}
