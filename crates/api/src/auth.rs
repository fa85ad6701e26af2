// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session-based authentication over the record store.
//!
//! Passwords are bcrypt-hashed at registration and verified at login; the
//! plaintext never reaches the store. The logged-in user is held as the
//! singular session document, and every lifecycle operation receives the
//! session as an explicit acting context rather than reading ambient state.

use crate::error::{ApiError, translate_domain_error};
use crate::request_response::{RegisterRequest, UserInfo};
use helpdesk_domain::{Role, User, next_id, validate_email_unique, validate_user_fields};
use helpdesk_events::Actor;
use helpdesk_persistence::{RecordStore, SessionRecord};

/// The logged-in user's acting context.
///
/// Produced by login, consumed by every operation. Carries identity and
/// role only; the full user record stays in the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionContext {
    /// The logged-in user's id.
    pub user_id: i64,
    /// The logged-in user's display name.
    pub name: String,
    /// The logged-in user's role.
    pub role: Role,
}

impl SessionContext {
    /// Converts this session into the lifecycle actor context.
    #[must_use]
    pub fn to_actor(&self) -> Actor {
        Actor::new(self.user_id, self.name.clone(), self.role)
    }

    fn to_record(&self) -> SessionRecord {
        SessionRecord {
            user_id: self.user_id,
            name: self.name.clone(),
            role: self.role,
        }
    }
}

impl From<SessionRecord> for SessionContext {
    fn from(record: SessionRecord) -> Self {
        Self {
            user_id: record.user_id,
            name: record.name,
            role: record.role,
        }
    }
}

/// Registration, login, and session management.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Registers a new user.
    ///
    /// The first registration may take any role so a fresh system can
    /// bootstrap its superadmin. After that, client self-registration is
    /// open and privileged roles require an acting session that manages
    /// users.
    ///
    /// # Arguments
    ///
    /// * `store` - The record store
    /// * `request` - The registration request
    /// * `acting` - The acting session, when registration happens from an
    ///   admin screen rather than the public form
    ///
    /// # Errors
    ///
    /// Returns an error if a field is invalid, the email is taken, the
    /// requested role is not permitted for the acting session, or the
    /// store write fails.
    pub fn register(
        store: &mut dyn RecordStore,
        request: &RegisterRequest,
        acting: Option<&SessionContext>,
    ) -> Result<UserInfo, ApiError> {
        let role: Role = request.role.parse().map_err(translate_domain_error)?;
        validate_user_fields(&request.name, &request.email).map_err(translate_domain_error)?;
        if request.password.trim().is_empty() {
            return Err(ApiError::InvalidInput {
                field: String::from("password"),
                message: String::from("Password cannot be empty"),
            });
        }

        let users: Vec<User> = store.read_users();
        validate_email_unique(&request.email, &users).map_err(translate_domain_error)?;

        let bootstrap: bool = users.is_empty();
        let privileged: bool = role != Role::Client;
        if privileged && !bootstrap {
            let permitted: bool = acting
                .is_some_and(|session| session.role.capabilities().can_manage_users.is_allowed());
            if !permitted {
                return Err(ApiError::Unauthorized {
                    action: format!("register a user with role '{role}'"),
                    required_role: String::from("admin or superadmin"),
                });
            }
        }

        let password_hash: String = bcrypt::hash(&request.password, bcrypt::DEFAULT_COST)
            .map_err(|err| ApiError::Internal {
                message: format!("Password hashing failed: {err}"),
            })?;

        let user: User = User {
            id: next_id(users.iter().map(|user| user.id)),
            name: request.name.clone(),
            email: request.email.clone(),
            password_hash,
            role,
            profile_image: None,
            unit: request.unit.clone(),
            category: None,
        };
        store.append_user(&user)?;
        tracing::info!(user_id = user.id, role = %role, "registered user");

        Ok(UserInfo::from_user(&user))
    }

    /// Logs a user in by email and password, writing the session document.
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for an unknown email or a wrong
    /// password; the reason does not distinguish the two.
    pub fn login(
        store: &mut dyn RecordStore,
        email: &str,
        password: &str,
    ) -> Result<SessionContext, ApiError> {
        let failed = || ApiError::AuthenticationFailed {
            reason: String::from("Invalid email or password"),
        };

        let users: Vec<User> = store.read_users();
        let user: &User = users
            .iter()
            .find(|user| user.email.eq_ignore_ascii_case(email))
            .ok_or_else(failed)?;

        let verified: bool = bcrypt::verify(password, &user.password_hash).unwrap_or(false);
        if !verified {
            return Err(failed());
        }

        let session: SessionContext = SessionContext {
            user_id: user.id,
            name: user.name.clone(),
            role: user.role,
        };
        store.write_session(&session.to_record())?;
        tracing::info!(user_id = user.id, "logged in");

        Ok(session)
    }

    /// Logs the current user out by clearing the session document.
    ///
    /// # Errors
    ///
    /// Returns an error if the session document cannot be removed.
    pub fn logout(store: &mut dyn RecordStore) -> Result<(), ApiError> {
        store.clear_session()?;
        Ok(())
    }

    /// Returns the current session, `None` when logged out.
    #[must_use]
    pub fn current_session(store: &dyn RecordStore) -> Option<SessionContext> {
        store.read_session().map(SessionContext::from)
    }

    /// Rewrites the session document after a profile change, keeping the
    /// session's display name in step with the user record.
    pub(crate) fn refresh_session(
        store: &mut dyn RecordStore,
        session: &SessionContext,
    ) -> Result<(), ApiError> {
        store.write_session(&session.to_record())?;
        Ok(())
    }
}
