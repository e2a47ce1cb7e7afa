// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Audit log queries.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rentdesk_audit::{Action, Actor, AuditEvent, Cause, Subject};
use time::OffsetDateTime;
use time::format_description::well_known::Rfc3339;

use crate::data_models::{ActionData, ActorData, CauseData};
use crate::diesel_schema::audit_events;
use crate::error::PersistenceError;

#[derive(Queryable, Selectable)]
#[diesel(table_name = audit_events)]
struct AuditEventRow {
    event_id: i64,
    actor_json: String,
    cause_json: String,
    action_json: String,
    subject_kind: String,
    subject_id: String,
    occurred_at: String,
}

fn decode(row: AuditEventRow) -> Result<AuditEvent, PersistenceError> {
    let actor_data: ActorData = serde_json::from_str(&row.actor_json)?;
    let cause_data: CauseData = serde_json::from_str(&row.cause_json)?;
    let action_data: ActionData = serde_json::from_str(&row.action_json)?;
    let occurred_at: OffsetDateTime = OffsetDateTime::parse(&row.occurred_at, &Rfc3339)
        .map_err(|e| PersistenceError::corrupt("audit_events", e))?;

    Ok(AuditEvent::new(
        Actor::new(actor_data.id, actor_data.actor_type),
        Cause::new(cause_data.id, cause_data.description),
        Action::new(action_data.name, action_data.details),
        Subject::new(&row.subject_kind, row.subject_id),
        occurred_at,
    )
    .with_event_id(row.event_id))
}

/// Retrieves a single audit event.
///
/// # Errors
///
/// Returns `NotFound` if no event has the id.
pub fn get_audit_event(
    conn: &mut SqliteConnection,
    event_id: i64,
) -> Result<AuditEvent, PersistenceError> {
    let row: AuditEventRow = audit_events::table
        .filter(audit_events::event_id.eq(event_id))
        .select(AuditEventRow::as_select())
        .first(conn)
        .map_err(|e| match e {
            diesel::result::Error::NotFound => {
                PersistenceError::NotFound(format!("audit event {event_id}"))
            }
            other => PersistenceError::from(other),
        })?;
    decode(row)
}

/// Lists audit events, newest first.
///
/// # Arguments
///
/// * `conn` - The database connection
/// * `subject` - When set, only events about this `(kind, id)` subject
/// * `limit` - Maximum number of events returned
///
/// # Errors
///
/// Returns an error if the query fails or a row does not decode.
pub fn list_audit_events(
    conn: &mut SqliteConnection,
    subject: Option<(&str, &str)>,
    limit: i64,
) -> Result<Vec<AuditEvent>, PersistenceError> {
    let mut query = audit_events::table
        .select(AuditEventRow::as_select())
        .order_by(audit_events::event_id.desc())
        .limit(limit)
        .into_boxed();

    if let Some((kind, id)) = subject {
        query = query
            .filter(audit_events::subject_kind.eq(kind.to_string()))
            .filter(audit_events::subject_id.eq(id.to_string()));
    }

    query
        .load::<AuditEventRow>(conn)?
        .into_iter()
        .map(decode)
        .collect()
}
