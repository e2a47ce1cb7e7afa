// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::{PayoutAccountId, UserId};
use crate::validation::{normalize_mobile_money_phone, validate_bank_details};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Kind of payout destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccountType {
    /// A mobile-money wallet.
    MobileMoney,
    /// A bank account.
    Bank,
}

impl AccountType {
    /// Returns the string representation of the type.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::MobileMoney => "mobile_money",
            Self::Bank => "bank",
        }
    }
}

impl FromStr for AccountType {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mobile_money" => Ok(Self::MobileMoney),
            "bank" => Ok(Self::Bank),
            _ => Err(DomainError::InvalidAccountType(s.to_string())),
        }
    }
}

/// Where a payout account sends money.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum AccountDetails {
    /// A mobile-money wallet, identified by its normalised phone number.
    MobileMoney {
        /// Phone number in `254XXXXXXXXX` form.
        phone: String,
    },
    /// A bank account.
    Bank {
        /// The bank's name.
        bank_name: String,
        /// The account number.
        account_number: String,
        /// The account holder's name.
        account_name: String,
    },
}

impl AccountDetails {
    /// Returns the account type.
    #[must_use]
    pub const fn account_type(&self) -> AccountType {
        match self {
            Self::MobileMoney { .. } => AccountType::MobileMoney,
            Self::Bank { .. } => AccountType::Bank,
        }
    }

    /// Validates the details and returns them in canonical form.
    ///
    /// Mobile-money numbers are normalised; bank fields are trimmed.
    ///
    /// # Errors
    ///
    /// Returns an error if a phone number cannot be normalised or a bank
    /// field is missing.
    pub fn normalized(self) -> Result<Self, DomainError> {
        match self {
            Self::MobileMoney { phone } => Ok(Self::MobileMoney {
                phone: normalize_mobile_money_phone(&phone)?,
            }),
            Self::Bank {
                bank_name,
                account_number,
                account_name,
            } => {
                validate_bank_details(&bank_name, &account_number, &account_name)?;
                Ok(Self::Bank {
                    bank_name: bank_name.trim().to_string(),
                    account_number: account_number.trim().to_string(),
                    account_name: account_name.trim().to_string(),
                })
            }
        }
    }
}

/// An admin-owned destination for tenant rent payments.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutAccount {
    /// The account's identifier.
    pub id: PayoutAccountId,
    /// The owning admin.
    pub admin_id: UserId,
    /// Destination details.
    pub details: AccountDetails,
    /// Whether this is the admin's default receiving account.
    pub is_default: bool,
    /// When the account was added.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
