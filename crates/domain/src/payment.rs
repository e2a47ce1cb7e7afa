// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rent payment records.
//!
//! A payment starts `pending` when the tenant initiates it and ends either
//! `completed` or `failed`. Both outcomes are final: a failed attempt is
//! retried by recording a new payment, never by reviving the old one.

use crate::error::DomainError;
use crate::ids::{BookingId, PaymentId, PayoutAccountId, UserId};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// How the tenant pays.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentMethod {
    /// Mobile-money push to the tenant's phone.
    MobileMoney,
    /// Card charge.
    Card,
}

impl PaymentMethod {
    /// Returns the string representation of the method.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MobileMoney => "mobile_money",
            Self::Card => "card",
        }
    }
}

impl FromStr for PaymentMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile_money" => Ok(Self::MobileMoney),
            "card" => Ok(Self::Card),
            _ => Err(DomainError::InvalidPaymentMethod(s.to_string())),
        }
    }
}

/// Payment lifecycle states.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PaymentStatus {
    /// Initiated; the provider has not reported an outcome yet.
    Pending,
    /// Funds received.
    Completed,
    /// Declined, timed out, or refused at settlement.
    Failed,
}

impl PaymentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }

    /// Returns true if this status is terminal.
    #[must_use]
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }

    /// Validates if a transition from this status to another is permitted.
    ///
    /// # Errors
    ///
    /// Returns an error unless moving from `pending` to an outcome.
    pub fn validate_transition(&self, new_status: Self) -> Result<(), DomainError> {
        if self.is_terminal() {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "payment outcome is immutable".to_string(),
            });
        }
        if new_status == Self::Pending {
            return Err(DomainError::InvalidStatusTransition {
                from: self.as_str().to_string(),
                to: new_status.as_str().to_string(),
                reason: "payment is already pending".to_string(),
            });
        }
        Ok(())
    }
}

impl FromStr for PaymentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "completed" => Ok(Self::Completed),
            "failed" => Ok(Self::Failed),
            _ => Err(DomainError::InvalidPaymentStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The calendar month a rent payment covers, written `YYYY-MM`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PeriodMonth {
    year: i32,
    month: u8,
}

impl PeriodMonth {
    /// Creates a period from a year and month number.
    ///
    /// # Errors
    ///
    /// Returns an error if `month` is outside `1..=12` or the year is
    /// not a four digit year.
    pub fn new(year: i32, month: u8) -> Result<Self, DomainError> {
        if !(1..=12).contains(&month) || !(1000..=9999).contains(&year) {
            return Err(DomainError::InvalidPeriodMonth(format!("{year}-{month:02}")));
        }
        Ok(Self { year, month })
    }

    /// The period containing the given instant.
    #[must_use]
    pub fn containing(at: OffsetDateTime) -> Self {
        Self {
            year: at.year(),
            month: u8::from(at.month()),
        }
    }

    /// Returns the year.
    #[must_use]
    pub const fn year(&self) -> i32 {
        self.year
    }

    /// Returns the month number (1-12).
    #[must_use]
    pub const fn month(&self) -> u8 {
        self.month
    }
}

impl FromStr for PeriodMonth {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || DomainError::InvalidPeriodMonth(s.to_string());
        let (year, month) = s.split_once('-').ok_or_else(invalid)?;
        let all_digits = |part: &str| part.bytes().all(|b| b.is_ascii_digit());
        if year.len() != 4 || month.len() != 2 || !all_digits(year) || !all_digits(month) {
            return Err(invalid());
        }
        let year: i32 = year.parse().map_err(|_| invalid())?;
        let month: u8 = month.parse().map_err(|_| invalid())?;
        Self::new(year, month).map_err(|_| invalid())
    }
}

impl TryFrom<String> for PeriodMonth {
    type Error = DomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<PeriodMonth> for String {
    fn from(period: PeriodMonth) -> Self {
        period.to_string()
    }
}

impl std::fmt::Display for PeriodMonth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}", self.year, self.month)
    }
}

/// A single rent payment attempt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Payment {
    /// The payment's identifier.
    pub id: PaymentId,
    /// The booking being paid for.
    pub booking_id: BookingId,
    /// The paying tenant.
    pub tenant_id: UserId,
    /// Amount charged; always the booking's locked-in rent.
    pub amount: Decimal,
    /// Payment method.
    pub method: PaymentMethod,
    /// Current status.
    pub status: PaymentStatus,
    /// The rent month covered.
    pub period_month: PeriodMonth,
    /// Provider transaction reference, once known.
    pub transaction_id: Option<String>,
    /// Provider receipt, once known.
    pub receipt: Option<String>,
    /// Why the attempt failed.
    pub failure_reason: Option<String>,
    /// The payout account credited.
    pub admin_account_id: PayoutAccountId,
    /// When the attempt was recorded.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    /// When the payment completed.
    #[serde(with = "time::serde::rfc3339::option")]
    pub paid_at: Option<OffsetDateTime>,
}
