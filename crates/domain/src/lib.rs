// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod apartment;
mod booking;
mod contact;
mod error;
mod ids;
mod payment;
mod payout;
mod saved_method;
mod user;
mod validation;

#[cfg(test)]
mod tests;

pub use apartment::{Apartment, ApartmentStatus};
pub use booking::{Booking, BookingStatus};
pub use contact::{BusinessHours, ContactInfo};
pub use error::DomainError;
pub use ids::{ApartmentId, BookingId, PaymentId, PaymentMethodId, PayoutAccountId, UserId};
pub use payment::{Payment, PaymentMethod, PaymentStatus, PeriodMonth};
pub use payout::{AccountDetails, AccountType, PayoutAccount};
pub use saved_method::{CardBrand, MethodDetails, NewPaymentMethod, SavedPaymentMethod};
pub use user::{Role, User};
pub use validation::{
    normalize_card_number, normalize_email, normalize_mobile_money_phone, validate_address,
    validate_apartment_name, validate_bank_details, validate_card_expiry, validate_email,
    validate_full_name, validate_price, validate_room_counts,
};

// Downstream crates share the money type.
pub use rust_decimal::Decimal;
