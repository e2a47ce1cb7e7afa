// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::Harness;
use crate::{PersistenceError, SessionData};
use rentdesk::{Command, Session};
use rentdesk_domain::UserId;
use time::OffsetDateTime;
use time::macros::datetime;

#[test]
fn test_registration_stores_a_verifiable_password() {
    let mut harness = Harness::new();

    let user_id: Option<String> = harness
        .persistence
        .verify_credentials("person1@example.com", "admin-password")
        .unwrap();

    assert_eq!(user_id, Some(harness.admin.user_id.to_string()));
}

#[test]
fn test_wrong_password_and_unknown_email_do_not_verify() {
    let mut harness = Harness::new();

    assert_eq!(
        harness
            .persistence
            .verify_credentials("person1@example.com", "not-the-password")
            .unwrap(),
        None
    );
    assert_eq!(
        harness
            .persistence
            .verify_credentials("nobody@example.com", "admin-password")
            .unwrap(),
        None
    );
}

#[test]
fn test_set_password_replaces_the_old_one() {
    let mut harness = Harness::new();
    let admin_id: UserId = harness.admin.user_id;

    harness
        .persistence
        .set_password(admin_id, "rotated-password")
        .unwrap();

    assert_eq!(
        harness
            .persistence
            .verify_credentials("person1@example.com", "admin-password")
            .unwrap(),
        None
    );
    assert!(
        harness
            .persistence
            .verify_credentials("person1@example.com", "rotated-password")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_set_password_for_unknown_user_fails() {
    let mut harness = Harness::new();

    let result = harness
        .persistence
        .set_password(UserId::generate(), "whatever-password");

    assert!(matches!(result, Err(PersistenceError::NotFound(_))));
}

#[test]
fn test_session_lifecycle() {
    let mut harness = Harness::new();
    let admin_id: UserId = harness.admin.user_id;
    let now: OffsetDateTime = datetime!(2026-03-02 10:00 UTC);
    let expires_at: OffsetDateTime = datetime!(2026-03-03 10:00 UTC);

    let session_id: i64 = harness
        .persistence
        .create_session("session_abc", admin_id, now, expires_at)
        .unwrap();

    let session: SessionData = harness
        .persistence
        .get_session_by_token("session_abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.session_id, session_id);
    assert_eq!(session.user_id, admin_id.to_string());
    assert_eq!(session.expires_at, expires_at);

    let later: OffsetDateTime = datetime!(2026-03-02 11:30 UTC);
    harness
        .persistence
        .update_session_activity(session_id, later)
        .unwrap();
    let session: SessionData = harness
        .persistence
        .get_session_by_token("session_abc")
        .unwrap()
        .unwrap();
    assert_eq!(session.last_activity_at, later);

    harness.persistence.delete_session("session_abc").unwrap();
    assert!(
        harness
            .persistence
            .get_session_by_token("session_abc")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_expired_sessions_are_purged() {
    let mut harness = Harness::new();
    let admin_id: UserId = harness.admin.user_id;
    let created: OffsetDateTime = datetime!(2026-03-01 10:00 UTC);

    harness
        .persistence
        .create_session(
            "session_old",
            admin_id,
            created,
            datetime!(2026-03-02 10:00 UTC),
        )
        .unwrap();
    harness
        .persistence
        .create_session(
            "session_new",
            admin_id,
            created,
            datetime!(2026-03-05 10:00 UTC),
        )
        .unwrap();

    let removed: usize = harness
        .persistence
        .delete_expired_sessions(datetime!(2026-03-02 10:00 UTC))
        .unwrap();

    assert_eq!(removed, 1);
    assert!(
        harness
            .persistence
            .get_session_by_token("session_new")
            .unwrap()
            .is_some()
    );
}

#[test]
fn test_deleting_a_user_removes_their_sessions() {
    let mut harness = Harness::new();
    let tenant: Session = harness.register_tenant();
    harness
        .persistence
        .create_session(
            "session_tenant",
            tenant.user_id,
            datetime!(2026-03-02 10:00 UTC),
            datetime!(2026-03-03 10:00 UTC),
        )
        .unwrap();

    let admin: Session = harness.admin;
    harness.run(
        &admin,
        Command::DeleteUser {
            user_id: tenant.user_id,
        },
    );

    assert!(
        harness
            .persistence
            .get_session_by_token("session_tenant")
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_sessions_for_user_are_revoked_together() {
    let mut harness = Harness::new();
    let admin_id: UserId = harness.admin.user_id;
    for token in ["session_a", "session_b"] {
        harness
            .persistence
            .create_session(
                token,
                admin_id,
                datetime!(2026-03-02 10:00 UTC),
                datetime!(2026-03-03 10:00 UTC),
            )
            .unwrap();
    }

    assert_eq!(
        harness.persistence.delete_sessions_for_user(admin_id).unwrap(),
        2
    );
}
