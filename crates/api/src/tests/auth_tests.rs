// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Login, session validation and password change tests.

use rentdesk::Session;
use rentdesk_domain::Role;
use time::Duration;

use super::helpers::{
    ADMIN_EMAIL, ADMIN_PASSWORD, TENANT_PASSWORD, create_test_cause, register_admin,
    register_tenant, setup_store,
};
use crate::{
    ApiError, AuthenticationService, ChangePasswordRequest, LoginRequest, LoginResponse,
    change_password, delete_user, login, logout, whoami,
};

fn login_request(email: &str, password: &str) -> LoginRequest {
    LoginRequest {
        email: email.to_string(),
        password: password.to_string(),
    }
}

#[test]
fn test_login_returns_token_and_capabilities() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);

    let response: LoginResponse = login(
        &mut store,
        &login_request(ADMIN_EMAIL, ADMIN_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    assert!(response.session_token.starts_with("session_"));
    assert_eq!(response.user.id, admin.user_id);
    assert_eq!(response.user.role, Role::Admin);
    assert!(response.capabilities.can_manage_apartments.is_allowed());
    assert!(!response.capabilities.can_request_bookings.is_allowed());
}

#[test]
fn test_login_ignores_email_case() {
    let mut store = setup_store();
    register_admin(&mut store);

    let result = login(
        &mut store,
        &login_request("  ADMIN@Example.COM ", ADMIN_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    );

    assert!(result.is_ok());
}

#[test]
fn test_login_rejects_wrong_password_and_unknown_email_alike() {
    let mut store = setup_store();
    register_admin(&mut store);

    let wrong_password = login(
        &mut store,
        &login_request(ADMIN_EMAIL, "not-the-password"),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap_err();
    let unknown_email = login(
        &mut store,
        &login_request("nobody@example.com", ADMIN_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap_err();

    assert_eq!(wrong_password, unknown_email);
    assert!(matches!(
        wrong_password,
        ApiError::AuthenticationFailed { .. }
    ));
}

#[test]
fn test_validate_session_resolves_caller() {
    let mut store = setup_store();
    register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");

    let response: LoginResponse = login(
        &mut store,
        &login_request("tenant@example.com", TENANT_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    let session: Session =
        AuthenticationService::validate_session(&mut store, &response.session_token).unwrap();
    assert_eq!(session, tenant);

    let me = whoami(&store, &session).unwrap();
    assert_eq!(me.user.email, "tenant@example.com");
    assert!(me.capabilities.can_request_bookings.is_allowed());
}

#[test]
fn test_expired_session_is_rejected_and_removed() {
    let mut store = setup_store();
    register_admin(&mut store);

    let response: LoginResponse = login(
        &mut store,
        &login_request(ADMIN_EMAIL, ADMIN_PASSWORD),
        Duration::seconds(-1),
    )
    .unwrap();

    let first = AuthenticationService::validate_session(&mut store, &response.session_token);
    assert_eq!(
        first,
        Err(ApiError::Unauthorized {
            reason: String::from("Session expired")
        })
    );

    let second = AuthenticationService::validate_session(&mut store, &response.session_token);
    assert_eq!(
        second,
        Err(ApiError::Unauthorized {
            reason: String::from("Invalid session token")
        })
    );
}

#[test]
fn test_logout_invalidates_token() {
    let mut store = setup_store();
    register_admin(&mut store);
    let response: LoginResponse = login(
        &mut store,
        &login_request(ADMIN_EMAIL, ADMIN_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    logout(&mut store, &response.session_token).unwrap();

    assert!(
        AuthenticationService::validate_session(&mut store, &response.session_token).is_err()
    );
}

#[test]
fn test_deleted_user_sessions_stop_working() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let response: LoginResponse = login(
        &mut store,
        &login_request("tenant@example.com", TENANT_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    delete_user(&mut store, &admin, tenant.user_id, create_test_cause()).unwrap();

    let result = AuthenticationService::validate_session(&mut store, &response.session_token);
    assert!(matches!(result, Err(ApiError::Unauthorized { .. })));
}

#[test]
fn test_change_password_requires_current_password() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);

    let result = change_password(
        &mut store,
        &admin,
        &ChangePasswordRequest {
            current_password: String::from("guess-work"),
            new_password: String::from("new-secret"),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::AuthenticationFailed { .. })
    ));
}

#[test]
fn test_change_password_enforces_policy() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);

    let result = change_password(
        &mut store,
        &admin,
        &ChangePasswordRequest {
            current_password: String::from(ADMIN_PASSWORD),
            new_password: String::from("short"),
        },
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "password"
    ));
}

#[test]
fn test_change_password_revokes_sessions() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let response: LoginResponse = login(
        &mut store,
        &login_request(ADMIN_EMAIL, ADMIN_PASSWORD),
        AuthenticationService::DEFAULT_SESSION_TTL,
    )
    .unwrap();

    change_password(
        &mut store,
        &admin,
        &ChangePasswordRequest {
            current_password: String::from(ADMIN_PASSWORD),
            new_password: String::from("brand-new-secret"),
        },
    )
    .unwrap();

    assert!(
        AuthenticationService::validate_session(&mut store, &response.session_token).is_err()
    );
    assert!(
        login(
            &mut store,
            &login_request(ADMIN_EMAIL, ADMIN_PASSWORD),
            AuthenticationService::DEFAULT_SESSION_TTL,
        )
        .is_err()
    );
    assert!(
        login(
            &mut store,
            &login_request(ADMIN_EMAIL, "brand-new-secret"),
            AuthenticationService::DEFAULT_SESSION_TTL,
        )
        .is_ok()
    );
}
