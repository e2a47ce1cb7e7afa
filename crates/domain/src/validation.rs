// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use rust_decimal::Decimal;

/// Country prefix for mobile-money numbers.
const MOBILE_MONEY_PREFIX: &str = "254";

/// Digits following the country prefix.
const MOBILE_MONEY_SUBSCRIBER_DIGITS: usize = 9;

/// Accepted card number lengths.
const CARD_NUMBER_DIGITS: std::ops::RangeInclusive<usize> = 13..=19;

/// Returns the canonical (trimmed, lower-cased) form of an email address.
#[must_use]
pub fn normalize_email(email: &str) -> String {
    email.trim().to_lowercase()
}

/// Validates an email address.
///
/// The address must have exactly one `@`, a non-empty local part, and a
/// domain containing a dot that neither starts nor ends the domain.
///
/// # Errors
///
/// Returns `DomainError::InvalidEmail` if the address is malformed.
pub fn validate_email(email: &str) -> Result<(), DomainError> {
    let email: &str = email.trim();
    if email.is_empty() {
        return Err(DomainError::InvalidEmail(
            "email cannot be empty".to_string(),
        ));
    }
    if email.chars().any(char::is_whitespace) {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' contains whitespace"
        )));
    }

    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' must contain exactly one '@'"
        )));
    };

    if local.is_empty() {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' has an empty local part"
        )));
    }
    if !domain.contains('.') || domain.starts_with('.') || domain.ends_with('.') {
        return Err(DomainError::InvalidEmail(format!(
            "'{email}' has an invalid domain"
        )));
    }
    Ok(())
}

/// Validates a person's full name.
///
/// # Errors
///
/// Returns `DomainError::InvalidName` if the name is blank.
pub fn validate_full_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidName("name cannot be empty".to_string()));
    }
    Ok(())
}

/// Validates an apartment listing name.
///
/// # Errors
///
/// Returns `DomainError::InvalidApartmentName` if the name is blank.
pub fn validate_apartment_name(name: &str) -> Result<(), DomainError> {
    if name.trim().is_empty() {
        return Err(DomainError::InvalidApartmentName(
            "apartment name cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates an apartment address.
///
/// # Errors
///
/// Returns `DomainError::InvalidAddress` if the address is blank.
pub fn validate_address(address: &str) -> Result<(), DomainError> {
    if address.trim().is_empty() {
        return Err(DomainError::InvalidAddress(
            "address cannot be empty".to_string(),
        ));
    }
    Ok(())
}

/// Validates a monthly price.
///
/// # Errors
///
/// Returns `DomainError::InvalidPrice` unless the price is positive.
pub fn validate_price(price: Decimal) -> Result<(), DomainError> {
    if price <= Decimal::ZERO {
        return Err(DomainError::InvalidPrice(price));
    }
    Ok(())
}

/// Validates bedroom and bathroom counts.
///
/// Studios have zero bedrooms; every listing needs a bathroom.
///
/// # Errors
///
/// Returns `DomainError::InvalidRoomCount` if there are no bathrooms.
pub fn validate_room_counts(bedrooms: u8, bathrooms: u8) -> Result<(), DomainError> {
    if bathrooms == 0 {
        return Err(DomainError::InvalidRoomCount(format!(
            "{bedrooms} bedroom listing must have at least one bathroom"
        )));
    }
    Ok(())
}

/// Normalises a mobile-money phone number to `254XXXXXXXXX` form.
///
/// Spaces, dashes and plus signs are stripped. A leading `0` is replaced by
/// the country prefix, and the prefix is added if missing.
///
/// # Arguments
///
/// * `raw` - The phone number as entered
///
/// # Returns
///
/// The normalised number.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhone` if the result is not the country
/// prefix followed by exactly nine digits.
pub fn normalize_mobile_money_phone(raw: &str) -> Result<String, DomainError> {
    let stripped: String = raw
        .chars()
        .filter(|c| !matches!(c, ' ' | '-' | '+'))
        .collect();

    let normalized: String = if let Some(rest) = stripped.strip_prefix('0') {
        format!("{MOBILE_MONEY_PREFIX}{rest}")
    } else if stripped.starts_with(MOBILE_MONEY_PREFIX) {
        stripped
    } else {
        format!("{MOBILE_MONEY_PREFIX}{stripped}")
    };

    let subscriber: &str = &normalized[MOBILE_MONEY_PREFIX.len()..];
    if subscriber.len() != MOBILE_MONEY_SUBSCRIBER_DIGITS
        || !subscriber.chars().all(|c| c.is_ascii_digit())
    {
        return Err(DomainError::InvalidPhone(format!(
            "'{raw}' is not a valid mobile-money number"
        )));
    }
    Ok(normalized)
}

/// Validates bank payout details.
///
/// # Errors
///
/// Returns `DomainError::InvalidBankDetails` naming the first missing field.
pub fn validate_bank_details(
    bank_name: &str,
    account_number: &str,
    account_name: &str,
) -> Result<(), DomainError> {
    for (field, value) in [
        ("bank name", bank_name),
        ("account number", account_number),
        ("account name", account_name),
    ] {
        if value.trim().is_empty() {
            return Err(DomainError::InvalidBankDetails(format!("{field} is required")));
        }
    }
    Ok(())
}

/// Strips whitespace from a card number and checks its length.
///
/// # Returns
///
/// The card number as bare digits.
///
/// # Errors
///
/// Returns `DomainError::InvalidCardNumber` unless the number is 13 to 19
/// digits once whitespace is removed.
pub fn normalize_card_number(raw: &str) -> Result<String, DomainError> {
    let digits: String = raw.chars().filter(|c| !c.is_whitespace()).collect();
    if !digits.chars().all(|c| c.is_ascii_digit()) {
        return Err(DomainError::InvalidCardNumber(String::from(
            "card number may only contain digits",
        )));
    }
    if !CARD_NUMBER_DIGITS.contains(&digits.len()) {
        return Err(DomainError::InvalidCardNumber(format!(
            "expected 13 to 19 digits, got {}",
            digits.len()
        )));
    }
    Ok(digits)
}

/// Validates a card expiry in `MM/YY` form and returns it trimmed.
///
/// # Errors
///
/// Returns `DomainError::InvalidCardExpiry` if the month is not `01` to
/// `12` or either part is not two digits.
pub fn validate_card_expiry(raw: &str) -> Result<String, DomainError> {
    let expiry: &str = raw.trim();
    let invalid = || DomainError::InvalidCardExpiry(expiry.to_string());

    let (month, year) = expiry.split_once('/').ok_or_else(invalid)?;
    let two_digits = |part: &str| part.len() == 2 && part.bytes().all(|b| b.is_ascii_digit());
    if !two_digits(month) || !two_digits(year) {
        return Err(invalid());
    }
    let month: u8 = month.parse().map_err(|_| invalid())?;
    if !(1..=12).contains(&month) {
        return Err(invalid());
    }
    Ok(expiry.to_string())
}
