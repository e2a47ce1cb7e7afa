// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error translation tests.

use rentdesk::CoreError;
use rentdesk_domain::{ApartmentId, ApartmentStatus, Decimal, DomainError};
use rentdesk_persistence::PersistenceError;

use crate::{ApiError, PasswordPolicyError, translate_core_error, translate_domain_error};

#[test]
fn test_invalid_transition_keeps_its_details() {
    let err = translate_core_error(CoreError::InvalidTransition {
        entity: "booking",
        id: String::from("b-1"),
        from: String::from("confirmed"),
        to: String::from("cancelled"),
    });

    assert_eq!(
        err,
        ApiError::InvalidTransition {
            entity: String::from("booking"),
            id: String::from("b-1"),
            from: String::from("confirmed"),
            to: String::from("cancelled"),
        }
    );
    assert_eq!(
        err.to_string(),
        "Cannot move booking b-1 from 'confirmed' to 'cancelled'"
    );
}

#[test]
fn test_not_found_names_the_entity() {
    let err = translate_core_error(CoreError::NotFound {
        entity: "apartment",
        id: String::from("a-9"),
    });

    assert_eq!(
        err,
        ApiError::NotFound {
            resource_type: String::from("apartment"),
            message: String::from("apartment a-9 does not exist"),
        }
    );
}

#[test]
fn test_apartment_unavailable_carries_status() {
    let apartment_id: ApartmentId = ApartmentId::generate();
    let err = translate_core_error(CoreError::ApartmentUnavailable {
        apartment_id,
        status: ApartmentStatus::Occupied,
    });

    assert_eq!(
        err,
        ApiError::ApartmentUnavailable {
            apartment_id: apartment_id.to_string(),
            status: ApartmentStatus::Occupied,
        }
    );
}

#[test]
fn test_domain_errors_name_fields() {
    assert!(matches!(
        translate_domain_error(DomainError::InvalidPhone(String::from("x"))),
        ApiError::InvalidInput { ref field, .. } if field == "phone"
    ));
    assert!(matches!(
        translate_domain_error(DomainError::DuplicateEmail(String::from("a@b.co"))),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        translate_domain_error(DomainError::AmountMismatch {
            expected: Decimal::new(1200, 0),
            actual: Decimal::new(1000, 0),
        }),
        ApiError::DomainRuleViolation { ref rule, .. } if rule == "rent_amount"
    ));
}

#[test]
fn test_persistence_errors_map_by_kind() {
    assert!(matches!(
        ApiError::from(PersistenceError::ConstraintViolation(String::from("unique"))),
        ApiError::Conflict { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::NotFound(String::from("user"))),
        ApiError::NotFound { .. }
    ));
    assert!(matches!(
        ApiError::from(PersistenceError::QueryFailed(String::from("boom"))),
        ApiError::Internal { .. }
    ));
}

#[test]
fn test_password_policy_error_is_invalid_password_input() {
    let err = ApiError::from(PasswordPolicyError::Blank);

    assert_eq!(
        err,
        ApiError::InvalidInput {
            field: String::from("password"),
            message: String::from("Password must not be blank"),
        }
    );
}
