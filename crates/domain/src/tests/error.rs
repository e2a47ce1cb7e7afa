// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{Decimal, DomainError};

#[test]
fn test_domain_error_display() {
    let err: DomainError = DomainError::InvalidEmail(String::from("email cannot be empty"));
    assert_eq!(format!("{err}"), "Invalid email: email cannot be empty");

    let err: DomainError = DomainError::DuplicateEmail(String::from("jane@example.com"));
    assert_eq!(
        format!("{err}"),
        "Email 'jane@example.com' is already registered"
    );

    let err: DomainError = DomainError::InvalidPrice(Decimal::ZERO);
    assert_eq!(
        format!("{err}"),
        "Invalid price 0: price must be greater than zero"
    );

    let err: DomainError = DomainError::InvalidPeriodMonth(String::from("2026-13"));
    assert_eq!(
        format!("{err}"),
        "Invalid rent period '2026-13': expected YYYY-MM"
    );
}

#[test]
fn test_amount_mismatch_display_names_both_amounts() {
    let err: DomainError = DomainError::AmountMismatch {
        expected: Decimal::new(1200, 0),
        actual: Decimal::new(1150, 0),
    };
    assert_eq!(
        format!("{err}"),
        "Payment amount 1150 does not match the booking rent 1200"
    );
}

#[test]
fn test_domain_error_is_std_error() {
    let err: Box<dyn std::error::Error> =
        Box::new(DomainError::InvalidRole(String::from("landlord")));
    assert_eq!(err.to_string(), "Invalid role: landlord");
}
