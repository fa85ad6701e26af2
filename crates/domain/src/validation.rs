// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::types::{Category, User};

/// Validates the user-supplied fields of a new ticket.
///
/// Title and description must be non-empty after trimming.
///
/// # Errors
///
/// Returns `DomainError::EmptyTitle` or `DomainError::EmptyDescription`.
pub fn validate_ticket_fields(title: &str, description: &str) -> Result<(), DomainError> {
    if title.trim().is_empty() {
        return Err(DomainError::EmptyTitle);
    }
    if description.trim().is_empty() {
        return Err(DomainError::EmptyDescription);
    }
    Ok(())
}

/// Validates that a category is present in the category set.
///
/// Tickets may only be created against a known category; creating a ticket
/// against an unknown category is disallowed.
///
/// # Errors
///
/// Returns `DomainError::UnknownCategory` if the category is not in the set.
pub fn validate_category_known(category: &str, categories: &[Category]) -> Result<(), DomainError> {
    if categories.iter().any(|c| c.name == category) {
        Ok(())
    } else {
        Err(DomainError::UnknownCategory(category.to_string()))
    }
}

/// Validates comment or note text.
///
/// # Errors
///
/// Returns `DomainError::EmptyText` if the text is empty after trimming.
pub fn validate_comment_text(text: &str) -> Result<(), DomainError> {
    if text.trim().is_empty() {
        return Err(DomainError::EmptyText);
    }
    Ok(())
}

/// Validates the user-supplied fields of a registration.
///
/// Name and email must be non-empty after trimming.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` or `DomainError::InvalidEmail`.
pub fn validate_user_fields(name: &str, email: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName(String::from(
            "Name cannot be empty",
        )));
    }
    if email.trim().is_empty() || !email.contains('@') {
        return Err(DomainError::InvalidEmail(String::from(
            "Email must be non-empty and contain '@'",
        )));
    }
    Ok(())
}

/// Validates that an email is unique across the user collection.
///
/// # Errors
///
/// Returns `DomainError::DuplicateEmail` if another user holds the email.
pub fn validate_email_unique(email: &str, users: &[User]) -> Result<(), DomainError> {
    if users.iter().any(|u| u.email.eq_ignore_ascii_case(email)) {
        return Err(DomainError::DuplicateEmail(email.to_string()));
    }
    Ok(())
}
