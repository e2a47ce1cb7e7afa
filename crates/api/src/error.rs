// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use crate::password_policy::PasswordPolicyError;
use rentdesk::CoreError;
use rentdesk_domain::{ApartmentStatus, DomainError};
use rentdesk_persistence::PersistenceError;
use tracing::error;

/// API-level errors.
///
/// These are distinct from domain/core errors and represent the API contract.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    /// Credentials were rejected.
    AuthenticationFailed {
        /// The reason authentication failed.
        reason: String,
    },
    /// The request carries no valid session.
    Unauthorized {
        /// Why the session was rejected.
        reason: String,
    },
    /// The caller's role or ownership does not permit the action.
    Forbidden {
        /// A human-readable description of the refusal.
        message: String,
    },
    /// A record is not in a status that allows the requested change.
    InvalidTransition {
        /// The kind of record.
        entity: String,
        /// The record's identifier.
        id: String,
        /// The record's current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// The change would break a store-wide rule.
    Conflict {
        /// A human-readable description of the conflict.
        message: String,
    },
    /// A requested resource was not found.
    NotFound {
        /// The type of resource that was not found.
        resource_type: String,
        /// A human-readable description of what was not found.
        message: String,
    },
    /// The apartment is not open for booking requests.
    ApartmentUnavailable {
        /// The apartment requested.
        apartment_id: String,
        /// Its current status.
        status: ApartmentStatus,
    },
    /// No admin has configured an account to receive payments.
    NoPayoutAccountConfigured,
    /// The payment provider declined, failed or timed out.
    PaymentProviderError {
        /// The provider's reason.
        reason: String,
    },
    /// Invalid input was provided.
    InvalidInput {
        /// The field that was invalid.
        field: String,
        /// A human-readable description of the error.
        message: String,
    },
    /// A domain rule was violated.
    DomainRuleViolation {
        /// The rule that was violated.
        rule: String,
        /// A human-readable description of the violation.
        message: String,
    },
    /// An internal error occurred.
    Internal {
        /// A description of the internal error.
        message: String,
    },
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::AuthenticationFailed { reason } => {
                write!(f, "Authentication failed: {reason}")
            }
            Self::Unauthorized { reason } => write!(f, "Unauthorized: {reason}"),
            Self::Forbidden { message } => write!(f, "Forbidden: {message}"),
            Self::InvalidTransition {
                entity,
                id,
                from,
                to,
            } => write!(f, "Cannot move {entity} {id} from '{from}' to '{to}'"),
            Self::Conflict { message } => write!(f, "Conflict: {message}"),
            Self::NotFound {
                resource_type,
                message,
            } => {
                write!(f, "{resource_type} not found: {message}")
            }
            Self::ApartmentUnavailable {
                apartment_id,
                status,
            } => write!(
                f,
                "Apartment {apartment_id} is not available for booking (status: {status})"
            ),
            Self::NoPayoutAccountConfigured => {
                write!(f, "No payout account is configured to receive payments")
            }
            Self::PaymentProviderError { reason } => {
                write!(f, "Payment provider error: {reason}")
            }
            Self::InvalidInput { field, message } => {
                write!(f, "Invalid input for field '{field}': {message}")
            }
            Self::DomainRuleViolation { rule, message } => {
                write!(f, "Domain rule violation ({rule}): {message}")
            }
            Self::Internal { message } => {
                write!(f, "Internal error: {message}")
            }
        }
    }
}

impl std::error::Error for ApiError {}

impl From<PasswordPolicyError> for ApiError {
    fn from(err: PasswordPolicyError) -> Self {
        Self::InvalidInput {
            field: String::from("password"),
            message: err.to_string(),
        }
    }
}

impl From<PersistenceError> for ApiError {
    fn from(err: PersistenceError) -> Self {
        match err {
            PersistenceError::ConstraintViolation(message) => Self::Conflict { message },
            PersistenceError::NotFound(message) => Self::NotFound {
                resource_type: String::from("Record"),
                message,
            },
            other => {
                error!(error = %other, "Persistence failure");
                Self::Internal {
                    message: other.to_string(),
                }
            }
        }
    }
}

fn invalid_input(field: &str, err: &DomainError) -> ApiError {
    ApiError::InvalidInput {
        field: field.to_string(),
        message: err.to_string(),
    }
}

/// Translates a domain error into an API error.
///
/// This translation is explicit and ensures domain errors are not leaked directly.
#[must_use]
pub fn translate_domain_error(err: DomainError) -> ApiError {
    match &err {
        DomainError::InvalidId { kind, .. } => invalid_input(kind, &err),
        DomainError::InvalidEmail(_) => invalid_input("email", &err),
        DomainError::DuplicateEmail(_) => ApiError::Conflict {
            message: err.to_string(),
        },
        DomainError::InvalidName(_) => invalid_input("full_name", &err),
        DomainError::InvalidApartmentName(_) => invalid_input("name", &err),
        DomainError::InvalidAddress(_) => invalid_input("address", &err),
        DomainError::InvalidPhone(_) => invalid_input("phone", &err),
        DomainError::InvalidBankDetails(_) => invalid_input("bank_details", &err),
        DomainError::InvalidPrice(_) => invalid_input("price", &err),
        DomainError::InvalidRoomCount(_) => invalid_input("rooms", &err),
        DomainError::InvalidPeriodMonth(_) => invalid_input("period_month", &err),
        DomainError::InvalidRole(_) => invalid_input("role", &err),
        DomainError::InvalidApartmentStatus { .. }
        | DomainError::InvalidBookingStatus { .. }
        | DomainError::InvalidPaymentStatus { .. } => invalid_input("status", &err),
        DomainError::InvalidPaymentMethod(_) => invalid_input("method", &err),
        DomainError::InvalidAccountType(_) => invalid_input("type", &err),
        DomainError::InvalidCardNumber(_) => invalid_input("number", &err),
        DomainError::InvalidCardExpiry(_) => invalid_input("expiry", &err),
        DomainError::InvalidCardBrand(_) => invalid_input("brand", &err),
        DomainError::InvalidContactInfo(_) => invalid_input("contact", &err),
        DomainError::InvalidStatusTransition { from, to, .. } => ApiError::InvalidTransition {
            entity: String::from("record"),
            id: String::new(),
            from: from.clone(),
            to: to.clone(),
        },
        DomainError::AmountMismatch { .. } => ApiError::DomainRuleViolation {
            rule: String::from("rent_amount"),
            message: err.to_string(),
        },
    }
}

/// Translates a core error into an API error.
///
/// This translation is explicit and ensures core errors are not leaked directly.
#[must_use]
pub fn translate_core_error(err: CoreError) -> ApiError {
    match err {
        CoreError::DomainViolation(domain_err) => translate_domain_error(domain_err),
        CoreError::InvalidTransition {
            entity,
            id,
            from,
            to,
        } => ApiError::InvalidTransition {
            entity: entity.to_string(),
            id,
            from,
            to,
        },
        CoreError::Forbidden(message) => ApiError::Forbidden { message },
        CoreError::Conflict(message) => ApiError::Conflict { message },
        CoreError::NotFound { entity, id } => ApiError::NotFound {
            resource_type: entity.to_string(),
            message: format!("{entity} {id} does not exist"),
        },
        CoreError::ApartmentUnavailable {
            apartment_id,
            status,
        } => ApiError::ApartmentUnavailable {
            apartment_id: apartment_id.to_string(),
            status,
        },
        CoreError::NoPayoutAccountConfigured => ApiError::NoPayoutAccountConfigured,
    }
}
