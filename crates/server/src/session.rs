// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Session extraction for the server.
//!
//! This module provides Axum extractors for validating session tokens
//! and enforcing authentication at the server boundary.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};
use rentdesk::Session;
use rentdesk_api::AuthenticationService;
use tracing::{debug, warn};

use crate::AppState;

/// Extractor for signed-in users.
///
/// Validates the session token from the `Authorization: Bearer <token>`
/// header and yields the caller's session along with the token itself.
///
/// # Errors
///
/// Rejects with HTTP 401 if the header is missing or malformed, or the
/// token is unknown or expired.
pub struct SessionUser {
    /// The caller's session.
    pub session: Session,
    /// The bearer token presented.
    pub token: String,
}

/// Extractor for routes open to anonymous callers.
///
/// Yields `None` when no `Authorization` header is sent. A header that is
/// sent must carry a valid session.
pub struct MaybeSessionUser(pub Option<Session>);

fn bearer_token(parts: &Parts) -> Result<Option<String>, SessionError> {
    let Some(header) = parts.headers.get(AUTHORIZATION) else {
        return Ok(None);
    };
    let value: &str = header.to_str().map_err(|_| {
        warn!("Invalid Authorization header encoding");
        SessionError::InvalidAuthorizationHeader
    })?;
    let token: &str = value.strip_prefix("Bearer ").ok_or_else(|| {
        warn!("Authorization header does not start with 'Bearer '");
        SessionError::InvalidAuthorizationHeader
    })?;
    Ok(Some(token.to_string()))
}

async fn validate(state: &AppState, token: &str) -> Result<Session, SessionError> {
    let mut store = state.store.lock().await;
    let session: Session =
        AuthenticationService::validate_session(&mut store, token).map_err(|e| {
            warn!(error = %e, "Session validation failed");
            SessionError::InvalidSession(e.to_string())
        })?;
    debug!(user_id = %session.user_id, role = %session.role, "Session validated");
    Ok(session)
}

impl FromRequestParts<AppState> for SessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        let token: String = bearer_token(parts)?.ok_or_else(|| {
            debug!("Missing Authorization header");
            SessionError::MissingAuthorizationHeader
        })?;
        let session: Session = validate(state, &token).await?;
        Ok(Self { session, token })
    }
}

impl FromRequestParts<AppState> for MaybeSessionUser {
    type Rejection = SessionError;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &AppState,
    ) -> Result<Self, Self::Rejection> {
        match bearer_token(parts)? {
            Some(token) => Ok(Self(Some(validate(state, &token).await?))),
            None => Ok(Self(None)),
        }
    }
}

/// Session extraction errors.
///
/// These errors are returned when session validation fails and are
/// automatically converted to HTTP responses.
#[derive(Debug)]
pub enum SessionError {
    /// Authorization header is missing.
    MissingAuthorizationHeader,
    /// Authorization header format is invalid.
    InvalidAuthorizationHeader,
    /// Session validation failed.
    InvalidSession(String),
}

impl IntoResponse for SessionError {
    fn into_response(self) -> Response {
        let message: String = match self {
            Self::MissingAuthorizationHeader => String::from("Missing Authorization header"),
            Self::InvalidAuthorizationHeader => String::from(
                "Invalid Authorization header format. Expected: 'Bearer <token>'",
            ),
            Self::InvalidSession(reason) => format!("Session validation failed: {reason}"),
        };

        crate::HttpError {
            status: StatusCode::UNAUTHORIZED,
            error: "unauthorized",
            message,
        }
        .into_response()
    }
}
