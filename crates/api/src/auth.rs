// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Authentication: password login and session validation.

use rentdesk::Session;
use rentdesk_domain::{User, normalize_email};
use rentdesk_persistence::{PersistenceError, SessionData};
use std::time::{SystemTime, UNIX_EPOCH};
use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};

use crate::error::ApiError;
use crate::store::Store;

/// A successful login.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginOutcome {
    /// The opaque bearer token.
    pub session_token: String,
    /// The signed-in user's session.
    pub session: Session,
    /// When the token stops being accepted.
    pub expires_at: OffsetDateTime,
}

/// Authentication service for password login and session tokens.
pub struct AuthenticationService;

impl AuthenticationService {
    /// Default session lifetime (24 hours).
    pub const DEFAULT_SESSION_TTL: Duration = Duration::hours(24);

    /// Authenticates a user and creates a session.
    ///
    /// # Arguments
    ///
    /// * `store` - The record store
    /// * `email` - The login email, in any case
    /// * `password` - The plain-text password
    /// * `ttl` - How long the new session lasts
    ///
    /// # Errors
    ///
    /// Returns `AuthenticationFailed` for an unknown email or wrong
    /// password. The two cases are not distinguished.
    pub fn login(
        store: &mut Store,
        email: &str,
        password: &str,
        ttl: Duration,
    ) -> Result<LoginOutcome, ApiError> {
        let email: String = normalize_email(email);
        let user_id: String = store
            .persistence()
            .verify_credentials(&email, password)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| {
                warn!("Login rejected");
                ApiError::AuthenticationFailed {
                    reason: String::from("Invalid email or password"),
                }
            })?;

        let session: Session =
            store
                .session_for(&user_id)
                .ok_or_else(|| ApiError::AuthenticationFailed {
                    reason: String::from("Invalid email or password"),
                })?;

        let session_token: String = Self::generate_session_token();
        let now: OffsetDateTime = OffsetDateTime::now_utc();
        let expires_at: OffsetDateTime = now + ttl;

        store
            .persistence()
            .create_session(&session_token, session.user_id, now, expires_at)
            .map_err(Self::map_persistence_error)?;

        info!(user_id = %session.user_id, role = %session.role.as_str(), "Login succeeded");
        Ok(LoginOutcome {
            session_token,
            session,
            expires_at,
        })
    }

    /// Validates a session token and returns the caller's session.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the token is unknown or expired, or the
    /// user no longer exists.
    pub fn validate_session(store: &mut Store, session_token: &str) -> Result<Session, ApiError> {
        let stored: SessionData = store
            .persistence()
            .get_session_by_token(session_token)
            .map_err(Self::map_persistence_error)?
            .ok_or_else(|| ApiError::Unauthorized {
                reason: String::from("Invalid session token"),
            })?;

        let now: OffsetDateTime = OffsetDateTime::now_utc();
        if now >= stored.expires_at {
            store
                .persistence()
                .delete_session(session_token)
                .map_err(Self::map_persistence_error)?;
            return Err(ApiError::Unauthorized {
                reason: String::from("Session expired"),
            });
        }

        let session: Session =
            store
                .session_for(&stored.user_id)
                .ok_or_else(|| ApiError::Unauthorized {
                    reason: String::from("User no longer exists"),
                })?;

        store
            .persistence()
            .update_session_activity(stored.session_id, now)
            .map_err(Self::map_persistence_error)?;

        debug!(user_id = %session.user_id, "Session validated");
        Ok(session)
    }

    /// Logs out by deleting the session.
    ///
    /// # Errors
    ///
    /// Returns an error if the session cannot be deleted.
    pub fn logout(store: &mut Store, session_token: &str) -> Result<(), ApiError> {
        store
            .persistence()
            .delete_session(session_token)
            .map_err(Self::map_persistence_error)
    }

    /// Returns the signed-in user's record.
    ///
    /// # Errors
    ///
    /// Returns `Unauthorized` if the user was deleted.
    pub fn current_user(store: &Store, session: &Session) -> Result<User, ApiError> {
        store
            .state()
            .user(session.user_id)
            .cloned()
            .map_err(|_| ApiError::Unauthorized {
                reason: String::from("User no longer exists"),
            })
    }

    /// Generates an opaque session token.
    fn generate_session_token() -> String {
        let timestamp: u128 = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map_or(0, |elapsed| elapsed.as_nanos());
        format!("session_{timestamp}_{}", rand::random::<u64>())
    }

    /// Maps persistence errors to authentication errors.
    fn map_persistence_error(err: PersistenceError) -> ApiError {
        warn!(error = %err, "Credential store failure");
        ApiError::Internal {
            message: format!("Credential store failure: {err}"),
        }
    }
}
