// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides an Axum extractor that reads the session document
//! from the record store and enforces authentication at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Response},
};
use helpdesk_api::{AuthenticationService, SessionContext};
use tracing::debug;

use crate::AppState;

/// Extractor for the logged-in user.
///
/// The store keeps a single session document, written on login and removed
/// on logout. This extractor reads it and rejects the request when it is
/// absent.
///
/// # Usage
///
/// ```ignore
/// async fn my_handler(
///     SessionUser(session): SessionUser,
/// ) -> Result<Json<Response>, HttpError> {
///     // session: SessionContext
///     Ok(Json(Response { ... }))
/// }
/// ```
///
/// # Errors
///
/// Returns HTTP 401 Unauthorized if no session document exists.
pub struct SessionUser(pub SessionContext);

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        _parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let store = state.store.lock().await;
        let session: SessionContext =
            AuthenticationService::current_session(&*store).ok_or_else(|| {
                debug!("No active session");
                SessionError::NotLoggedIn
            })?;
        drop(store);

        debug!(
            user_id = session.user_id,
            role = ?session.role,
            "Session resolved"
        );

        Ok(Self(session))
    }
}

/// Session extraction errors.
///
/// Returned when no session document exists; automatically converted to an
/// HTTP response.
#[derive(Debug)]
pub enum SessionError {
    /// No session document exists.
    NotLoggedIn,
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        match self {
            Self::NotLoggedIn => (StatusCode::UNAUTHORIZED, "No active session").into_response(),
        }
    }
}
