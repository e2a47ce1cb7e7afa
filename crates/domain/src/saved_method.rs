// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tenants' saved payment methods.
//!
//! Full card numbers are never kept: a saved card is its brand, last four
//! digits and expiry.

use crate::error::DomainError;
use crate::ids::{PaymentMethodId, UserId};
use crate::payment::PaymentMethod;
use crate::validation::{normalize_card_number, normalize_mobile_money_phone, validate_card_expiry};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Card network, detected from the first digit of the number.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    /// Numbers starting with 4.
    Visa,
    /// Numbers starting with 5.
    Mastercard,
    /// Numbers starting with 3.
    Amex,
    /// Anything else.
    Unknown,
}

impl CardBrand {
    /// Detects the brand of a digits-only card number.
    #[must_use]
    pub fn detect(number: &str) -> Self {
        match number.as_bytes().first() {
            Some(b'4') => Self::Visa,
            Some(b'5') => Self::Mastercard,
            Some(b'3') => Self::Amex,
            _ => Self::Unknown,
        }
    }

    /// Returns the string representation of the brand.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Visa => "visa",
            Self::Mastercard => "mastercard",
            Self::Amex => "amex",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for CardBrand {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for CardBrand {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "visa" => Ok(Self::Visa),
            "mastercard" => Ok(Self::Mastercard),
            "amex" => Ok(Self::Amex),
            "unknown" => Ok(Self::Unknown),
            _ => Err(DomainError::InvalidCardBrand(s.to_string())),
        }
    }
}

/// What a tenant submits to save a payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NewPaymentMethod {
    /// A mobile-money wallet.
    MobileMoney {
        /// The wallet's phone number as entered.
        phone: String,
    },
    /// A payment card.
    Card {
        /// The full card number; spaces are allowed.
        number: String,
        /// Expiry as `MM/YY`.
        expiry: String,
    },
}

impl NewPaymentMethod {
    /// Validates the input and reduces it to what is stored.
    ///
    /// # Errors
    ///
    /// Returns `InvalidPhone` for a number that is not `254` followed by
    /// nine digits once normalised, `InvalidCardNumber` for a card number
    /// outside 13 to 19 digits, and `InvalidCardExpiry` for a bad expiry.
    pub fn into_details(self) -> Result<MethodDetails, DomainError> {
        match self {
            Self::MobileMoney { phone } => Ok(MethodDetails::MobileMoney {
                phone: normalize_mobile_money_phone(&phone)?,
            }),
            Self::Card { number, expiry } => {
                let digits: String = normalize_card_number(&number)?;
                let expiry: String = validate_card_expiry(&expiry)?;
                let last4: String = digits[digits.len() - 4..].to_string();
                Ok(MethodDetails::Card {
                    brand: CardBrand::detect(&digits),
                    last4,
                    expiry,
                })
            }
        }
    }
}

/// A saved method as stored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MethodDetails {
    /// A mobile-money wallet.
    MobileMoney {
        /// Phone number in `254XXXXXXXXX` form.
        phone: String,
    },
    /// A payment card.
    Card {
        /// Card network.
        brand: CardBrand,
        /// The last four digits of the number.
        last4: String,
        /// Expiry as `MM/YY`.
        expiry: String,
    },
}

impl MethodDetails {
    /// The payment method this saved method pays with.
    #[must_use]
    pub const fn method(&self) -> PaymentMethod {
        match self {
            Self::MobileMoney { .. } => PaymentMethod::MobileMoney,
            Self::Card { .. } => PaymentMethod::Card,
        }
    }

    /// The payer reference handed to a payment provider.
    #[must_use]
    pub fn payer(&self) -> String {
        match self {
            Self::MobileMoney { phone } => phone.clone(),
            Self::Card { brand, last4, .. } => format!("{brand} ****{last4}"),
        }
    }
}

/// A payment method a tenant has saved for paying rent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SavedPaymentMethod {
    /// The method's identifier.
    pub id: PaymentMethodId,
    /// The owning tenant.
    pub tenant_id: UserId,
    /// What was saved.
    pub details: MethodDetails,
    /// Whether this is the tenant's default method.
    pub is_default: bool,
    /// When the method was saved.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
