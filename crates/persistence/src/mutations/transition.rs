// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Atomic persistence of transition results.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rentdesk::{Change, TransitionResult};
use rentdesk_domain::UserId;
use tracing::{debug, info};

use crate::error::PersistenceError;
use crate::mutations::audit::persist_audit_event;
use crate::mutations::credentials::set_password;
use crate::mutations::records::apply_change;

fn write_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    for change in &result.changes {
        apply_change(conn, change)?;
    }
    let event_id: i64 = persist_audit_event(conn, &result.audit_event)?;
    debug!(event_id, changes = result.changes.len(), "Persisted audit event");
    Ok(event_id)
}

/// Persists a transition: every change, in order, plus its audit event.
///
/// Runs in one transaction. If any write fails, nothing is stored.
///
/// # Returns
///
/// The audit event ID.
///
/// # Errors
///
/// Returns an error if any write fails.
pub fn persist_transition(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
) -> Result<i64, PersistenceError> {
    let event_id: i64 = conn.transaction(|conn| write_transition(conn, result))?;
    info!(
        event_id,
        action = %result.audit_event.action.name,
        "Transition persisted"
    );
    Ok(event_id)
}

/// Persists a registration and the new user's password together.
///
/// # Errors
///
/// Returns an error if the transition does not create `user_id`, or any
/// write fails.
pub fn persist_registration(
    conn: &mut SqliteConnection,
    result: &TransitionResult,
    user_id: UserId,
    password: &str,
) -> Result<i64, PersistenceError> {
    let creates_user: bool = result
        .changes
        .iter()
        .any(|change| matches!(change, Change::PutUser(user) if user.id == user_id));
    if !creates_user {
        return Err(PersistenceError::NotFound(format!(
            "registration does not create user {user_id}"
        )));
    }

    let event_id: i64 = conn.transaction(|conn| {
        let event_id: i64 = write_transition(conn, result)?;
        set_password(conn, user_id, password)?;
        Ok::<i64, PersistenceError>(event_id)
    })?;
    info!(event_id, %user_id, "Registration persisted");
    Ok(event_id)
}
