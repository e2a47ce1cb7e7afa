// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rentdesk_domain::{ApartmentId, ApartmentStatus, DomainError};

/// Errors that can occur during state transitions.
///
/// Every error leaves the prior state untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoreError {
    /// A domain rule was violated.
    DomainViolation(DomainError),
    /// An illegal status change was attempted.
    InvalidTransition {
        /// The kind of record (`booking`, `payment`, `apartment`).
        entity: &'static str,
        /// The record's identifier.
        id: String,
        /// The record's current status.
        from: String,
        /// The requested status.
        to: String,
    },
    /// A role or ownership check failed.
    Forbidden(String),
    /// The change would violate a store-wide invariant.
    Conflict(String),
    /// A referenced record does not exist.
    NotFound {
        /// The kind of record.
        entity: &'static str,
        /// The missing identifier.
        id: String,
    },
    /// The apartment is not open for booking requests.
    ApartmentUnavailable {
        /// The apartment requested.
        apartment_id: ApartmentId,
        /// Its current status.
        status: ApartmentStatus,
    },
    /// No admin has a payout account to receive payments.
    NoPayoutAccountConfigured,
}

impl CoreError {
    /// Builds a `NotFound` error.
    pub(crate) fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        Self::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    /// Maps a status-transition failure from the domain onto `InvalidTransition`.
    ///
    /// Other domain errors pass through as `DomainViolation`.
    pub(crate) fn from_transition(
        entity: &'static str,
        id: impl std::fmt::Display,
        err: DomainError,
    ) -> Self {
        match err {
            DomainError::InvalidStatusTransition { from, to, .. } => Self::InvalidTransition {
                entity,
                id: id.to_string(),
                from,
                to,
            },
            other => Self::DomainViolation(other),
        }
    }
}

impl std::fmt::Display for CoreError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::DomainViolation(err) => write!(f, "Domain violation: {err}"),
            Self::InvalidTransition {
                entity,
                id,
                from,
                to,
            } => write!(f, "Invalid {entity} transition for {id}: {from} -> {to}"),
            Self::Forbidden(msg) => write!(f, "Forbidden: {msg}"),
            Self::Conflict(msg) => write!(f, "Conflict: {msg}"),
            Self::NotFound { entity, id } => write!(f, "{entity} {id} not found"),
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
        }
    }
}

impl std::error::Error for CoreError {}

impl From<DomainError> for CoreError {
    fn from(err: DomainError) -> Self {
        Self::DomainViolation(err)
    }
}
