// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Password and session mutations.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rentdesk_domain::UserId;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::backend::sqlite::last_insert_rowid;
use crate::diesel_schema::{sessions, users};
use crate::error::PersistenceError;

/// Hashes and stores a user's password.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `user_id` - The user whose password is set
/// * `password` - The plain-text password (will be hashed)
///
/// # Errors
///
/// Returns an error if the password cannot be hashed, the user does not
/// exist, or the update fails.
pub fn set_password(
    conn: &mut SqliteConnection,
    user_id: UserId,
    password: &str,
) -> Result<(), PersistenceError> {
    let password_hash: String = bcrypt::hash(password, bcrypt::DEFAULT_COST)?;

    let rows_affected: usize = diesel::update(users::table)
        .filter(users::id.eq(user_id.to_string()))
        .set(users::password_hash.eq(Some(password_hash)))
        .execute(conn)?;

    if rows_affected == 0 {
        return Err(PersistenceError::NotFound(format!("user {user_id}")));
    }

    info!(%user_id, "Password set");
    Ok(())
}

/// Creates a new session for a user.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `session_token` - The unique session token
/// * `user_id` - The signed-in user
/// * `now` - The creation time
/// * `expires_at` - When the session stops being valid
///
/// # Errors
///
/// Returns an error if the session cannot be created.
pub fn create_session(
    conn: &mut SqliteConnection,
    session_token: &str,
    user_id: UserId,
    now: OffsetDateTime,
    expires_at: OffsetDateTime,
) -> Result<i64, PersistenceError> {
    diesel::insert_into(sessions::table)
        .values((
            sessions::session_token.eq(session_token),
            sessions::user_id.eq(user_id.to_string()),
            sessions::created_at.eq(now.unix_timestamp()),
            sessions::last_activity_at.eq(now.unix_timestamp()),
            sessions::expires_at.eq(expires_at.unix_timestamp()),
        ))
        .execute(conn)?;

    let session_id: i64 = last_insert_rowid(conn)?;

    debug!(session_id, %user_id, "Session created");
    Ok(session_id)
}

/// Records activity on a session.
///
/// # Errors
///
/// Returns an error if the database update fails.
pub fn update_session_activity(
    conn: &mut SqliteConnection,
    session_id: i64,
    now: OffsetDateTime,
) -> Result<(), PersistenceError> {
    diesel::update(sessions::table)
        .filter(sessions::session_id.eq(session_id))
        .set(sessions::last_activity_at.eq(now.unix_timestamp()))
        .execute(conn)?;
    Ok(())
}

/// Deletes a session by token. Used for logout.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_session(
    conn: &mut SqliteConnection,
    session_token: &str,
) -> Result<(), PersistenceError> {
    debug!("Deleting session by token");

    diesel::delete(sessions::table)
        .filter(sessions::session_token.eq(session_token))
        .execute(conn)?;

    Ok(())
}

/// Deletes every session that expired before `now`.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_expired_sessions(
    conn: &mut SqliteConnection,
    now: OffsetDateTime,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::expires_at.le(now.unix_timestamp()))
        .execute(conn)?;

    info!("Deleted {} expired sessions", rows_affected);
    Ok(rows_affected)
}

/// Deletes all sessions of a user, e.g. after a password change.
///
/// # Errors
///
/// Returns an error if the database delete fails.
pub fn delete_sessions_for_user(
    conn: &mut SqliteConnection,
    user_id: UserId,
) -> Result<usize, PersistenceError> {
    let rows_affected: usize = diesel::delete(sessions::table)
        .filter(sessions::user_id.eq(user_id.to_string()))
        .execute(conn)?;

    info!(%user_id, "Deleted {} sessions", rows_affected);
    Ok(rows_affected)
}
