// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rust_decimal::Decimal;

/// Errors that can occur during domain validation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier could not be parsed.
    InvalidId {
        /// The kind of identifier (e.g. `BookingId`).
        kind: &'static str,
        /// The rejected input.
        value: String,
    },
    /// Email address is empty or malformed.
    InvalidEmail(String),
    /// Email address is already registered to another user.
    DuplicateEmail(String),
    /// A person's name is empty or invalid.
    InvalidName(String),
    /// Apartment name is empty or invalid.
    InvalidApartmentName(String),
    /// Apartment address is empty or invalid.
    InvalidAddress(String),
    /// Phone number cannot be normalised to a mobile-money number.
    InvalidPhone(String),
    /// Bank payout details are incomplete.
    InvalidBankDetails(String),
    /// Price is zero or negative.
    InvalidPrice(Decimal),
    /// Bedroom or bathroom count is out of range.
    InvalidRoomCount(String),
    /// Rent period is not a valid `YYYY-MM` month.
    InvalidPeriodMonth(String),
    /// Role string is not recognised.
    InvalidRole(String),
    /// Apartment status string is not recognised.
    InvalidApartmentStatus {
        /// The rejected status.
        status: String,
    },
    /// Booking status string is not recognised.
    InvalidBookingStatus {
        /// The rejected status.
        status: String,
    },
    /// Payment status string is not recognised.
    InvalidPaymentStatus {
        /// The rejected status.
        status: String,
    },
    /// Payment method string is not recognised.
    InvalidPaymentMethod(String),
    /// Payout account type string is not recognised.
    InvalidAccountType(String),
    /// Card number is not 13 to 19 digits.
    InvalidCardNumber(String),
    /// Card expiry is not a `MM/YY` month.
    InvalidCardExpiry(String),
    /// Card brand string is not recognised.
    InvalidCardBrand(String),
    /// A contact setting is missing or malformed.
    InvalidContactInfo(String),
    /// A status change is not permitted by the lifecycle rules.
    InvalidStatusTransition {
        /// The current status.
        from: String,
        /// The requested status.
        to: String,
        /// Why the transition is refused.
        reason: String,
    },
    /// Payment amount differs from the booking's locked-in rent.
    AmountMismatch {
        /// The booking's monthly rent.
        expected: Decimal,
        /// The amount offered.
        actual: Decimal,
    },
}

impl std::fmt::Display for DomainError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId { kind, value } => write!(f, "Invalid {kind}: '{value}'"),
            Self::InvalidEmail(msg) => write!(f, "Invalid email: {msg}"),
            Self::DuplicateEmail(email) => {
                write!(f, "Email '{email}' is already registered")
            }
            Self::InvalidName(msg) => write!(f, "Invalid name: {msg}"),
            Self::InvalidApartmentName(msg) => write!(f, "Invalid apartment name: {msg}"),
            Self::InvalidAddress(msg) => write!(f, "Invalid address: {msg}"),
            Self::InvalidPhone(msg) => write!(f, "Invalid phone number: {msg}"),
            Self::InvalidBankDetails(msg) => write!(f, "Invalid bank details: {msg}"),
            Self::InvalidPrice(price) => {
                write!(f, "Invalid price {price}: price must be greater than zero")
            }
            Self::InvalidRoomCount(msg) => write!(f, "Invalid room count: {msg}"),
            Self::InvalidPeriodMonth(value) => {
                write!(f, "Invalid rent period '{value}': expected YYYY-MM")
            }
            Self::InvalidRole(role) => write!(f, "Invalid role: {role}"),
            Self::InvalidApartmentStatus { status } => {
                write!(f, "Invalid apartment status: {status}")
            }
            Self::InvalidBookingStatus { status } => write!(f, "Invalid booking status: {status}"),
            Self::InvalidPaymentStatus { status } => write!(f, "Invalid payment status: {status}"),
            Self::InvalidPaymentMethod(method) => write!(f, "Invalid payment method: {method}"),
            Self::InvalidAccountType(kind) => write!(f, "Invalid payout account type: {kind}"),
            Self::InvalidCardNumber(msg) => write!(f, "Invalid card number: {msg}"),
            Self::InvalidCardExpiry(expiry) => {
                write!(f, "Invalid card expiry '{expiry}': expected MM/YY")
            }
            Self::InvalidCardBrand(brand) => write!(f, "Invalid card brand: {brand}"),
            Self::InvalidContactInfo(msg) => write!(f, "Invalid contact settings: {msg}"),
            Self::InvalidStatusTransition { from, to, reason } => {
                write!(f, "Cannot transition from {from} to {to}: {reason}")
            }
            Self::AmountMismatch { expected, actual } => {
                write!(
                    f,
                    "Payment amount {actual} does not match the booking rent {expected}"
                )
            }
        }
    }
}

impl std::error::Error for DomainError {}
