// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::validation::validate_email;
use serde::{Deserialize, Serialize};

/// Opening hours shown on the public contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessHours {
    /// Weekday hours.
    pub monday_friday: String,
    /// Saturday hours.
    pub saturday: String,
    /// Sunday hours.
    pub sunday: String,
}

/// The organisation's public contact details.
///
/// There is exactly one set. Until an admin saves it, the defaults below
/// are served.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactInfo {
    /// Support phone number, free-form.
    pub phone: String,
    /// Support email address.
    pub email: String,
    /// Street address.
    pub address: String,
    /// City and country.
    pub city: String,
    /// Postal code.
    pub postal_code: String,
    /// Facebook page URL.
    pub facebook: String,
    /// Instagram profile URL.
    pub instagram: String,
    /// Opening hours.
    pub hours: BusinessHours,
}

impl Default for ContactInfo {
    fn default() -> Self {
        Self {
            phone: String::from("+254 712 345 678"),
            email: String::from("support@rento.com"),
            address: String::from("123 Rental Street"),
            city: String::from("Nairobi, Kenya"),
            postal_code: String::from("00100"),
            facebook: String::from("https://facebook.com/rentohomes"),
            instagram: String::from("https://instagram.com/rento_homes"),
            hours: BusinessHours {
                monday_friday: String::from("9:00 AM - 6:00 PM"),
                saturday: String::from("10:00 AM - 4:00 PM"),
                sunday: String::from("Closed"),
            },
        }
    }
}

fn trimmed(value: &str) -> String {
    value.trim().to_string()
}

impl ContactInfo {
    /// Validates the settings and returns them with every field trimmed.
    ///
    /// Phone, email, address and city are required; the rest may be blank.
    ///
    /// # Errors
    ///
    /// Returns `InvalidContactInfo` naming the first blank required field,
    /// or `InvalidEmail` for a malformed address.
    pub fn normalized(self) -> Result<Self, DomainError> {
        for (field, value) in [
            ("phone", &self.phone),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
        ] {
            if value.trim().is_empty() {
                return Err(DomainError::InvalidContactInfo(format!("{field} is required")));
            }
        }
        validate_email(&self.email)?;

        Ok(Self {
            phone: trimmed(&self.phone),
            email: trimmed(&self.email),
            address: trimmed(&self.address),
            city: trimmed(&self.city),
            postal_code: trimmed(&self.postal_code),
            facebook: trimmed(&self.facebook),
            instagram: trimmed(&self.instagram),
            hours: BusinessHours {
                monday_friday: trimmed(&self.hours.monday_friday),
                saturday: trimmed(&self.hours.saturday),
                sunday: trimmed(&self.hours.sunday),
            },
        })
    }
}
