// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Persistence layer for the rental desk.
//!
//! This crate stores the record store (users, apartments, bookings,
//! payments and payout accounts), the audit log, password hashes and
//! login sessions in `SQLite` through Diesel.
//!
//! ## Write Model
//!
//! Core transitions describe their effect as an ordered list of record
//! changes. [`Persistence::persist_transition`] writes those changes and
//! the transition's audit event in one database transaction, so the stored
//! records never reflect half an operation.
//!
//! ## Read Model
//!
//! [`Persistence::load_state`] rebuilds the in-memory store from the record
//! tables at startup. Rows are read in insertion order.
//!
//! ## Integrity
//!
//! The schema backs the store's own rules with constraints: unique emails,
//! at most one confirmed booking per apartment, at most one default payout
//! account per admin, and foreign keys between every record. Foreign key
//! enforcement is checked when the connection is opened.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(clippy::multiple_crate_versions)]

use crate::backend::sqlite::Storage;
use diesel::SqliteConnection;
use rentdesk::{State, TransitionResult};
use rentdesk_audit::AuditEvent;
use rentdesk_domain::UserId;
use std::path::Path;
use std::sync::atomic::{AtomicU64, Ordering};
use time::OffsetDateTime;

/// Atomic counter for generating unique in-memory database names.
///
/// Each call to `new_in_memory()` receives a unique sequential ID.
static DB_COUNTER: AtomicU64 = AtomicU64::new(0);

mod backend;
mod data_models;
mod diesel_schema;
mod error;
mod mutations;
mod queries;

#[cfg(test)]
mod tests;

pub use data_models::SessionData;
pub use error::PersistenceError;

/// Persistence adapter for records, audit events, credentials and sessions.
pub struct Persistence {
    conn: SqliteConnection,
}

impl Persistence {
    /// Creates a new persistence adapter with an in-memory `SQLite` database.
    ///
    /// Each call receives a unique shared in-memory database, so separate
    /// instances never see each other's data.
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be initialized.
    pub fn new_in_memory() -> Result<Self, PersistenceError> {
        let db_id: u64 = DB_COUNTER.fetch_add(1, Ordering::SeqCst);
        let db_name: String = format!("rentdesk_mem_{db_id}");
        let conn: SqliteConnection = backend::sqlite::open(Storage::Memory(&db_name))?;
        Ok(Self { conn })
    }

    /// Creates a new persistence adapter with a file-based `SQLite` database.
    ///
    /// # Arguments
    ///
    /// * `path` - The path to the `SQLite` database file
    ///
    /// # Errors
    ///
    /// Returns an error if the database cannot be opened or initialized.
    pub fn new_with_file<P: AsRef<Path>>(path: P) -> Result<Self, PersistenceError> {
        let path_str: &str = path.as_ref().to_str().ok_or_else(|| {
            PersistenceError::InitializationError(String::from("Database path is not UTF-8"))
        })?;
        let conn: SqliteConnection = backend::sqlite::open(Storage::File(path_str))?;
        Ok(Self { conn })
    }

    /// Verifies that foreign key enforcement is enabled.
    ///
    /// # Errors
    ///
    /// Returns an error if foreign key enforcement is not enabled.
    pub fn verify_foreign_key_enforcement(&mut self) -> Result<(), PersistenceError> {
        backend::sqlite::verify_foreign_key_enforcement(&mut self.conn)
    }

    // ========================================================================
    // Transitions
    // ========================================================================

    /// Persists a transition result: its record changes and audit event.
    ///
    /// # Returns
    ///
    /// The event ID assigned to the audit event.
    ///
    /// # Errors
    ///
    /// Returns an error if any write fails. Nothing is stored in that case.
    pub fn persist_transition(&mut self, result: &TransitionResult) -> Result<i64, PersistenceError> {
        mutations::persist_transition(&mut self.conn, result)
    }

    /// Persists a registration together with the new user's password.
    ///
    /// # Arguments
    ///
    /// * `result` - The registration transition
    /// * `user_id` - The user the transition creates
    /// * `password` - The plain-text password (will be hashed)
    ///
    /// # Errors
    ///
    /// Returns an error if the transition does not create `user_id` or any
    /// write fails.
    pub fn persist_registration(
        &mut self,
        result: &TransitionResult,
        user_id: UserId,
        password: &str,
    ) -> Result<i64, PersistenceError> {
        mutations::persist_registration(&mut self.conn, result, user_id, password)
    }

    /// Loads the full record store.
    ///
    /// # Errors
    ///
    /// Returns an error if a query fails or a stored row is corrupt.
    pub fn load_state(&mut self) -> Result<State, PersistenceError> {
        queries::load_state(&mut self.conn)
    }

    // ========================================================================
    // Audit Log
    // ========================================================================

    /// Retrieves an audit event by ID.
    ///
    /// # Errors
    ///
    /// Returns an error if the event is not found or cannot be decoded.
    pub fn get_audit_event(&mut self, event_id: i64) -> Result<AuditEvent, PersistenceError> {
        queries::get_audit_event(&mut self.conn, event_id)
    }

    /// Lists the most recent audit events, newest first.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events(&mut self, limit: i64) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::list_audit_events(&mut self.conn, None, limit)
    }

    /// Lists the most recent audit events about one record, newest first.
    ///
    /// # Arguments
    ///
    /// * `kind` - The subject kind, e.g. `booking`
    /// * `id` - The record's identifier
    /// * `limit` - Maximum number of events
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn list_audit_events_for(
        &mut self,
        kind: &str,
        id: &str,
        limit: i64,
    ) -> Result<Vec<AuditEvent>, PersistenceError> {
        queries::list_audit_events(&mut self.conn, Some((kind, id)), limit)
    }

    // ========================================================================
    // Credentials
    // ========================================================================

    /// Replaces a user's password.
    ///
    /// # Errors
    ///
    /// Returns an error if the user does not exist or hashing fails.
    pub fn set_password(&mut self, user_id: UserId, password: &str) -> Result<(), PersistenceError> {
        mutations::set_password(&mut self.conn, user_id, password)
    }

    /// Checks an email and password.
    ///
    /// # Returns
    ///
    /// The user's ID (as stored) when the password matches, `None` when the
    /// email is unknown, no password is set, or the password is wrong.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails or the stored hash is malformed.
    pub fn verify_credentials(
        &mut self,
        email: &str,
        password: &str,
    ) -> Result<Option<String>, PersistenceError> {
        let Some((user_id, hash)) = queries::get_credentials_by_email(&mut self.conn, email)?
        else {
            return Ok(None);
        };
        if queries::verify_password(password, &hash)? {
            Ok(Some(user_id))
        } else {
            Ok(None)
        }
    }

    // ========================================================================
    // Sessions
    // ========================================================================

    /// Creates a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the insert fails.
    pub fn create_session(
        &mut self,
        session_token: &str,
        user_id: UserId,
        now: OffsetDateTime,
        expires_at: OffsetDateTime,
    ) -> Result<i64, PersistenceError> {
        mutations::create_session(&mut self.conn, session_token, user_id, now, expires_at)
    }

    /// Retrieves a session by token.
    ///
    /// # Errors
    ///
    /// Returns an error if the query fails.
    pub fn get_session_by_token(
        &mut self,
        session_token: &str,
    ) -> Result<Option<SessionData>, PersistenceError> {
        queries::get_session_by_token(&mut self.conn, session_token)
    }

    /// Records activity on a session.
    ///
    /// # Errors
    ///
    /// Returns an error if the update fails.
    pub fn update_session_activity(
        &mut self,
        session_id: i64,
        now: OffsetDateTime,
    ) -> Result<(), PersistenceError> {
        mutations::update_session_activity(&mut self.conn, session_id, now)
    }

    /// Deletes a session (logout).
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_session(&mut self, session_token: &str) -> Result<(), PersistenceError> {
        mutations::delete_session(&mut self.conn, session_token)
    }

    /// Deletes sessions that expired at or before `now`.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_expired_sessions(&mut self, now: OffsetDateTime) -> Result<usize, PersistenceError> {
        mutations::delete_expired_sessions(&mut self.conn, now)
    }

    /// Deletes every session of a user.
    ///
    /// # Errors
    ///
    /// Returns an error if the delete fails.
    pub fn delete_sessions_for_user(&mut self, user_id: UserId) -> Result<usize, PersistenceError> {
        mutations::delete_sessions_for_user(&mut self.conn, user_id)
    }
}
