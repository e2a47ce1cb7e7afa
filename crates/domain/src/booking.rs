// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking status tracking and transition logic.
//!
//! A booking moves from `pending_approval` through admin review to
//! `pending_payment`, and is confirmed only by a settled payment. Rejected,
//! cancelled and confirmed bookings never change status again; the only
//! thing that can happen to a rejected or cancelled booking is deletion.

use crate::error::DomainError;
use crate::ids::{ApartmentId, BookingId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::{Date, OffsetDateTime};

time::serde::format_description!(lease_date, Date, "[year]-[month]-[day]");

/// Booking lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BookingStatus {
    /// Submitted by a tenant, awaiting admin review.
    PendingApproval,
    /// Approved by an admin, awaiting rent payment.
    PendingPayment,
    /// Paid; the apartment is leased to this tenant.
    Confirmed,
    /// Refused by an admin or displaced by a competing settlement.
    Rejected,
    /// Withdrawn by the tenant.
    Cancelled,
}

impl BookingStatus {
    /// Returns the string representation of the status.
    ///
    /// This is used for persistence and API serialization.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::PendingApproval => "pending_approval",
            Self::PendingPayment => "pending_payment",
            Self::Confirmed => "confirmed",
            Self::Rejected => "rejected",
            Self::Cancelled => "cancelled",
        }
    }

    /// Parses a status from its string representation.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidBookingStatus` if the string is not a valid status.
    fn parse_str(s: &str) -> Result<Self, DomainError> {
        match s {
            "pending_approval" => Ok(Self::PendingApproval),
            "pending_payment" => Ok(Self::PendingPayment),
            "confirmed" => Ok(Self::Confirmed),
            "rejected" => Ok(Self::Rejected),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(DomainError::InvalidBookingStatus {
                status: s.to_string(),
            }),
        }
    }

    /// Returns true if this status is terminal (cannot transition to another state).
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Confirmed | Self::Rejected | Self::Cancelled)
    }

    /// Returns true while the booking still competes for its apartment.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(self, Self::PendingApproval | Self::PendingPayment)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error if the transition is not allowed.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "cannot transition from terminal state".to_string(),
            });
        }

        let valid = match self {
            Self::PendingApproval => {
                matches!(new_status, Self::PendingPayment | Self::Rejected)
            }
            Self::PendingPayment => matches!(new_status, Self::Confirmed | Self::Rejected),
            Self::Confirmed | Self::Rejected | Self::Cancelled => false,
        };

        if valid {
            Ok(())
        } else {
            Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "transition not permitted by booking lifecycle rules".to_string(),
            })
        }
    }
}

impl FromStr for BookingStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse_str(s)
    }
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A tenant's request to lease an apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Booking {
    /// The booking's identifier.
    pub id: BookingId,
    /// The requested apartment.
    pub apartment_id: ApartmentId,
    /// The requesting tenant.
    pub tenant_id: UserId,
    /// Current lifecycle status.
    pub status: BookingStatus,
    /// Requested lease start date.
    #[serde(with = "lease_date")]
    pub lease_start: Date,
    /// Apartment price at submission time. Never updated afterwards.
    pub monthly_rent: Decimal,
    /// When the booking was submitted.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When an admin approved the booking.
    #[serde(with = "time::serde::rfc3339::option")]
    pub approved_at: Option<OffsetDateTime>,
    /// The approving admin.
    pub approved_by: Option<UserId>,
}

impl Booking {
    /// Returns a copy of this booking in a new status.
    ///
    /// # Errors
    ///
    /// Returns an error if the lifecycle forbids the change.
    pub fn transition_to(&self, status: BookingStatus) -> Result<Self, DomainError> {
        self.status.validate_transition(status)?;
        Ok(Self {
            status,
            ..self.clone()
        })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_status_parse_matches_as_str() {
        let statuses = [
            BookingStatus::PendingApproval,
            BookingStatus::PendingPayment,
            BookingStatus::Confirmed,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ];

        for status in statuses {
            let parsed: BookingStatus = status.as_str().parse().unwrap();
            assert_eq!(parsed, status);
        }
    }

    #[test]
    fn test_unknown_status_is_rejected() {
        let result: Result<BookingStatus, DomainError> = "approved".parse();
        assert!(matches!(
            result,
            Err(DomainError::InvalidBookingStatus { status }) if status == "approved"
        ));
    }

    #[test]
    fn test_terminal_and_open_states_are_disjoint() {
        for status in [
            BookingStatus::PendingApproval,
            BookingStatus::PendingPayment,
            BookingStatus::Confirmed,
            BookingStatus::Rejected,
            BookingStatus::Cancelled,
        ] {
            assert_ne!(status.is_terminal(), status.is_open());
        }
    }

    #[test]
    fn test_pending_approval_transitions() {
        let from = BookingStatus::PendingApproval;
        assert!(from.validate_transition(BookingStatus::PendingPayment).is_ok());
        assert!(from.validate_transition(BookingStatus::Rejected).is_ok());
        assert!(from.validate_transition(BookingStatus::Confirmed).is_err());
        assert!(from.validate_transition(BookingStatus::Cancelled).is_err());
    }

    #[test]
    fn test_pending_payment_transitions() {
        let from = BookingStatus::PendingPayment;
        assert!(from.validate_transition(BookingStatus::Confirmed).is_ok());
        assert!(from.validate_transition(BookingStatus::Rejected).is_ok());
        assert!(from.validate_transition(BookingStatus::PendingApproval).is_err());
    }

    #[test]
    fn test_confirmed_is_terminal() {
        let err = BookingStatus::Confirmed
            .validate_transition(BookingStatus::Rejected)
            .unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cannot transition from confirmed to rejected: cannot transition from terminal state"
        );
    }

    #[test]
    fn test_lease_start_serializes_as_calendar_date() {
        let booking = Booking {
            id: BookingId::generate(),
            apartment_id: ApartmentId::generate(),
            tenant_id: UserId::generate(),
            status: BookingStatus::PendingApproval,
            lease_start: time::macros::date!(2026 - 03 - 01),
            monthly_rent: Decimal::new(1200, 0),
            created_at: time::macros::datetime!(2026-02-10 09:30 UTC),
            approved_at: None,
            approved_by: None,
        };

        let json = serde_json::to_value(&booking).unwrap();
        assert_eq!(json["lease_start"], "2026-03-01");
        assert_eq!(json["status"], "pending_approval");
        assert_eq!(json["monthly_rent"], "1200");

        let back: Booking = serde_json::from_value(json).unwrap();
        assert_eq!(back, booking);
    }
}
