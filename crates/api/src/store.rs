// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The committed record store.
//!
//! A [`Store`] pairs the database with the in-memory state that mirrors it.
//! Every write goes through [`Store::execute`] or [`Store::register`]: the
//! command is applied to a copy of the state, the resulting changes are
//! committed in one database transaction, and only then does the in-memory
//! state move forward. A failed commit leaves both sides untouched.

use rentdesk::{
    Command, Registration, Session, State, TransitionResult, apply, apply_registration,
};
use rentdesk_audit::{AuditEvent, Cause};
use rentdesk_domain::{Role, UserId};
use rentdesk_persistence::Persistence;
use time::OffsetDateTime;
use tracing::{debug, info};

use crate::error::{ApiError, translate_core_error};

/// The result of a committed command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Committed {
    /// The audit event ID assigned by the database.
    pub event_id: i64,
    /// The audit event describing the change.
    pub audit_event: AuditEvent,
}

/// Persistence plus the in-memory state it backs.
pub struct Store {
    persistence: Persistence,
    state: State,
}

impl Store {
    /// Opens a store, loading every record from the database.
    ///
    /// # Errors
    ///
    /// Returns an error if the records cannot be loaded.
    pub fn open(mut persistence: Persistence) -> Result<Self, ApiError> {
        let state: State = persistence.load_state()?;
        info!(
            users = state.users().len(),
            apartments = state.apartments().len(),
            "Store opened"
        );
        Ok(Self { persistence, state })
    }

    /// The current committed state.
    #[must_use]
    pub const fn state(&self) -> &State {
        &self.state
    }

    /// Direct access to the database, for credentials, sessions and the
    /// audit log.
    pub const fn persistence(&mut self) -> &mut Persistence {
        &mut self.persistence
    }

    /// Resolves a stored user id into a session, if the user still exists.
    #[must_use]
    pub fn session_for(&self, user_id: &str) -> Option<Session> {
        let user_id: UserId = user_id.parse().ok()?;
        let user = self.state.user(user_id).ok()?;
        Some(Session::new(user.id, user.role))
    }

    fn commit(&mut self, result: TransitionResult) -> Result<Committed, ApiError> {
        let event_id: i64 = self.persistence.persist_transition(&result)?;
        self.state = result.new_state;
        Ok(Committed {
            event_id,
            audit_event: result.audit_event,
        })
    }

    /// Applies a command and commits it.
    ///
    /// # Errors
    ///
    /// Returns the translated core error if the command is refused, or a
    /// persistence error if the commit fails. In both cases nothing changes.
    pub fn execute(
        &mut self,
        session: &Session,
        command: Command,
        cause: Cause,
    ) -> Result<Committed, ApiError> {
        let at: OffsetDateTime = OffsetDateTime::now_utc();
        let result: TransitionResult =
            apply(&self.state, command, session, cause, at).map_err(translate_core_error)?;
        let committed: Committed = self.commit(result)?;
        debug!(
            event_id = committed.event_id,
            action = %committed.audit_event.action.name,
            "Command committed"
        );
        Ok(committed)
    }

    /// Registers a user and stores their password in the same transaction.
    ///
    /// # Errors
    ///
    /// Returns the translated core error if registration is refused, or a
    /// persistence error if the commit fails.
    pub fn register(
        &mut self,
        registration: Registration,
        password: &str,
        requester: Option<&Session>,
        cause: Cause,
    ) -> Result<Committed, ApiError> {
        let at: OffsetDateTime = OffsetDateTime::now_utc();
        let user_id: UserId = registration.user_id;
        let role: Role = registration.role;
        let result: TransitionResult =
            apply_registration(&self.state, registration, requester, cause, at)
                .map_err(translate_core_error)?;
        let event_id: i64 = self
            .persistence
            .persist_registration(&result, user_id, password)?;
        self.state = result.new_state;
        info!(event_id, %user_id, role = %role.as_str(), "User registered");
        Ok(Committed {
            event_id,
            audit_event: result.audit_event,
        })
    }
}
