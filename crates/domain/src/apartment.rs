// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::error::DomainError;
use crate::ids::ApartmentId;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::OffsetDateTime;

/// Occupancy status of an apartment.
///
/// `Occupied` is only ever reached through a confirmed booking. Admins may
/// move an apartment between `Available` and `Maintenance` directly.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApartmentStatus {
    /// Open for booking requests.
    Available,
    /// Leased through a confirmed booking.
    Occupied,
    /// Temporarily withdrawn by an admin.
    Maintenance,
}

impl ApartmentStatus {
    /// Returns the string representation of the status.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Available => "available",
            Self::Occupied => "occupied",
            Self::Maintenance => "maintenance",
        }
    }

    /// Returns true if the apartment accepts new booking requests.
    #[must_use]
    pub const fn accepts_bookings(&self) -> bool {
        matches!(self, Self::Available)
    }
}

impl FromStr for ApartmentStatus {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "available" => Ok(Self::Available),
            "occupied" => Ok(Self::Occupied),
            "maintenance" => Ok(Self::Maintenance),
            _ => Err(DomainError::InvalidApartmentStatus {
                status: s.to_string(),
            }),
        }
    }
}

impl std::fmt::Display for ApartmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A rentable apartment listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Apartment {
    /// The apartment's identifier.
    pub id: ApartmentId,
    /// Listing name.
    pub name: String,
    /// Free-form description.
    pub description: String,
    /// Street address.
    pub address: String,
    /// Number of bedrooms.
    pub bedrooms: u8,
    /// Number of bathrooms.
    pub bathrooms: u8,
    /// Current monthly price. Existing bookings keep the price they were
    /// submitted at.
    pub price: Decimal,
    /// Occupancy status.
    pub status: ApartmentStatus,
    /// Opaque reference to a listing image.
    pub image_url: Option<String>,
    /// When the listing was created.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}
