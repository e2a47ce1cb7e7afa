// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all
)]

use rentdesk_domain::{Role, UserId};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Represents the entity performing an action.
///
/// An actor is a signed-in user or the system itself (bootstrap,
/// maintenance).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    /// The unique identifier for this actor.
    pub id: String,
    /// The type of actor (`admin`, `tenant` or `system`).
    pub actor_type: String,
}

impl Actor {
    /// Creates a new Actor.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this actor
    /// * `actor_type` - The type of actor
    #[must_use]
    pub const fn new(id: String, actor_type: String) -> Self {
        Self { id, actor_type }
    }

    /// Creates an actor for a signed-in user.
    #[must_use]
    pub fn user(user_id: UserId, role: Role) -> Self {
        Self::new(user_id.to_string(), role.as_str().to_string())
    }

    /// The actor used for bootstrap and other unattended changes.
    #[must_use]
    pub fn system() -> Self {
        Self::new(String::from("system"), String::from("system"))
    }
}

/// Represents the reason or trigger for an action.
///
/// A cause describes why a state change was initiated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Cause {
    /// A unique identifier for this cause (e.g., request ID).
    pub id: String,
    /// A description of the cause.
    pub description: String,
}

impl Cause {
    /// Creates a new Cause.
    ///
    /// # Arguments
    ///
    /// * `id` - The unique identifier for this cause
    /// * `description` - A description of what triggered this action
    #[must_use]
    pub const fn new(id: String, description: String) -> Self {
        Self { id, description }
    }
}

/// Represents the specific action performed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Action {
    /// The snake_case name of the action (e.g., "`approve_booking`").
    pub name: String,
    /// Optional additional details about the action.
    pub details: Option<String>,
}

impl Action {
    /// Creates a new Action.
    ///
    /// # Arguments
    ///
    /// * `name` - The name of the action
    /// * `details` - Optional additional details
    #[must_use]
    pub const fn new(name: String, details: Option<String>) -> Self {
        Self { name, details }
    }
}

/// The record an action was performed on.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    /// The entity kind (`user`, `apartment`, `booking`, `payment`,
    /// `payout_account`, `payment_method`, `contact`).
    pub kind: String,
    /// The record's identifier.
    pub id: String,
}

impl Subject {
    /// Creates a new Subject.
    #[must_use]
    pub fn new(kind: &str, id: impl ToString) -> Self {
        Self {
            kind: kind.to_string(),
            id: id.to_string(),
        }
    }
}

/// An immutable audit event representing a state transition.
///
/// Every successful state change produces exactly one audit event,
/// persisted in the same transaction as the change itself. An event
/// captures:
/// - Who performed the action (actor)
/// - Why it was performed (cause)
/// - What action was performed (action)
/// - Which record it concerned (subject)
/// - When it happened (`occurred_at`)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuditEvent {
    /// Database id, present once persisted.
    pub event_id: Option<i64>,
    /// The actor who initiated this state change.
    pub actor: Actor,
    /// The cause or reason for this state change.
    pub cause: Cause,
    /// The action that was performed.
    pub action: Action,
    /// The primary record affected.
    pub subject: Subject,
    /// When the change was applied.
    #[serde(with = "time::serde::rfc3339")]
    pub occurred_at: OffsetDateTime,
}

impl AuditEvent {
    /// Creates a new, not yet persisted, `AuditEvent`.
    ///
    /// # Arguments
    ///
    /// * `actor` - The actor who initiated the change
    /// * `cause` - The reason for the change
    /// * `action` - The action that was performed
    /// * `subject` - The record affected
    /// * `occurred_at` - When the change was applied
    #[must_use]
    pub const fn new(
        actor: Actor,
        cause: Cause,
        action: Action,
        subject: Subject,
        occurred_at: OffsetDateTime,
    ) -> Self {
        Self {
            event_id: None,
            actor,
            cause,
            action,
            subject,
            occurred_at,
        }
    }

    /// Returns a copy carrying the database id.
    #[must_use]
    pub fn with_event_id(self, event_id: i64) -> Self {
        Self {
            event_id: Some(event_id),
            ..self
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::macros::datetime;

    fn create_test_event() -> AuditEvent {
        AuditEvent::new(
            Actor::new(String::from("admin-1"), String::from("admin")),
            Cause::new(String::from("req-456"), String::from("Booking review")),
            Action::new(String::from("approve_booking"), None),
            Subject::new("booking", "b-1"),
            datetime!(2026-03-01 10:00 UTC),
        )
    }

    #[test]
    fn test_user_actor_carries_role() {
        let user_id: UserId = UserId::generate();
        let actor: Actor = Actor::user(user_id, Role::Tenant);
        assert_eq!(actor.id, user_id.to_string());
        assert_eq!(actor.actor_type, "tenant");
    }

    #[test]
    fn test_system_actor() {
        let actor: Actor = Actor::system();
        assert_eq!(actor.id, "system");
        assert_eq!(actor.actor_type, "system");
    }

    #[test]
    fn test_new_event_is_unpersisted() {
        let event: AuditEvent = create_test_event();
        assert_eq!(event.event_id, None);
        assert_eq!(event.subject.kind, "booking");

        let stored: AuditEvent = event.clone().with_event_id(7);
        assert_eq!(stored.event_id, Some(7));
        assert_eq!(stored.action, event.action);
    }

    #[test]
    fn test_audit_event_json_round_trip() {
        let event: AuditEvent = create_test_event();
        let json: String = serde_json::to_string(&event).unwrap_or_default();
        assert!(json.contains("\"occurred_at\":\"2026-03-01T10:00:00Z\""));
        let back: Result<AuditEvent, _> = serde_json::from_str(&json);
        assert_eq!(back.ok(), Some(event));
    }
}
