// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Row shapes and their conversion to and from domain records.
//!
//! Identifiers, money and timestamps are stored as text: ids in hyphenated
//! UUID form, amounts in their exact decimal form, and timestamps as
//! RFC 3339.

use diesel::prelude::*;
use num_traits::ToPrimitive;
use rentdesk_domain::{
    AccountDetails, Apartment, ApartmentStatus, Booking, BookingStatus, BusinessHours, CardBrand,
    ContactInfo, Decimal, MethodDetails, Payment, PaymentMethod, PaymentStatus, PayoutAccount,
    PeriodMonth, Role, SavedPaymentMethod, User,
};
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use time::format_description::BorrowedFormatItem;
use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};

use crate::diesel_schema::{
    apartments, bookings, contact_info, payments, payout_accounts, saved_payment_methods, users,
};
use crate::error::PersistenceError;

const LEASE_DATE_FORMAT: &[BorrowedFormatItem<'static>] =
    format_description!("[year]-[month]-[day]");

/// Serializable representation of an Actor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActorData {
    pub id: String,
    pub actor_type: String,
}

/// Serializable representation of a Cause.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CauseData {
    pub id: String,
    pub description: String,
}

/// Serializable representation of an Action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActionData {
    pub name: String,
    pub details: Option<String>,
}

/// A stored login session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionData {
    pub session_id: i64,
    pub session_token: String,
    pub user_id: String,
    pub created_at: OffsetDateTime,
    pub last_activity_at: OffsetDateTime,
    pub expires_at: OffsetDateTime,
}

pub(crate) fn format_timestamp(at: OffsetDateTime) -> Result<String, PersistenceError> {
    at.format(&Rfc3339)
        .map_err(|e| PersistenceError::SerializationError(e.to_string()))
}

fn parse_timestamp(table: &'static str, value: &str) -> Result<OffsetDateTime, PersistenceError> {
    OffsetDateTime::parse(value, &Rfc3339).map_err(|e| PersistenceError::corrupt(table, e))
}

fn parse_optional_timestamp(
    table: &'static str,
    value: Option<&str>,
) -> Result<Option<OffsetDateTime>, PersistenceError> {
    value.map(|v| parse_timestamp(table, v)).transpose()
}

fn format_optional_timestamp(
    at: Option<OffsetDateTime>,
) -> Result<Option<String>, PersistenceError> {
    at.map(format_timestamp).transpose()
}

fn parse_field<T>(table: &'static str, value: &str) -> Result<T, PersistenceError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    value
        .parse::<T>()
        .map_err(|e| PersistenceError::corrupt(table, e))
}

fn parse_room_count(table: &'static str, value: i32) -> Result<u8, PersistenceError> {
    value
        .to_u8()
        .ok_or_else(|| PersistenceError::corrupt(table, format!("room count {value} out of range")))
}

// ============================================================================
// Users
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = users)]
pub(crate) struct UserRow {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = users, treat_none_as_null = true)]
pub(crate) struct NewUser {
    pub id: String,
    pub email: String,
    pub full_name: String,
    pub phone: Option<String>,
    pub role: String,
    pub created_at: String,
}

impl TryFrom<UserRow> for User {
    type Error = PersistenceError;

    fn try_from(row: UserRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_field("users", &row.id)?,
            email: row.email,
            full_name: row.full_name,
            phone: row.phone,
            role: parse_field::<Role>("users", &row.role)?,
            created_at: parse_timestamp("users", &row.created_at)?,
        })
    }
}

impl TryFrom<&User> for NewUser {
    type Error = PersistenceError;

    fn try_from(user: &User) -> Result<Self, Self::Error> {
        Ok(Self {
            id: user.id.to_string(),
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            role: user.role.as_str().to_string(),
            created_at: format_timestamp(user.created_at)?,
        })
    }
}

// ============================================================================
// Apartments
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = apartments)]
pub(crate) struct ApartmentRow {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: String,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = apartments, treat_none_as_null = true)]
pub(crate) struct NewApartment {
    pub id: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub bedrooms: i32,
    pub bathrooms: i32,
    pub price: String,
    pub status: String,
    pub image_url: Option<String>,
    pub created_at: String,
}

impl TryFrom<ApartmentRow> for Apartment {
    type Error = PersistenceError;

    fn try_from(row: ApartmentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_field("apartments", &row.id)?,
            name: row.name,
            description: row.description,
            address: row.address,
            bedrooms: parse_room_count("apartments", row.bedrooms)?,
            bathrooms: parse_room_count("apartments", row.bathrooms)?,
            price: parse_field::<Decimal>("apartments", &row.price)?,
            status: parse_field::<ApartmentStatus>("apartments", &row.status)?,
            image_url: row.image_url,
            created_at: parse_timestamp("apartments", &row.created_at)?,
        })
    }
}

impl TryFrom<&Apartment> for NewApartment {
    type Error = PersistenceError;

    fn try_from(apartment: &Apartment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: apartment.id.to_string(),
            name: apartment.name.clone(),
            description: apartment.description.clone(),
            address: apartment.address.clone(),
            bedrooms: i32::from(apartment.bedrooms),
            bathrooms: i32::from(apartment.bathrooms),
            price: apartment.price.to_string(),
            status: apartment.status.as_str().to_string(),
            image_url: apartment.image_url.clone(),
            created_at: format_timestamp(apartment.created_at)?,
        })
    }
}

// ============================================================================
// Bookings
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = bookings)]
pub(crate) struct BookingRow {
    pub id: String,
    pub apartment_id: String,
    pub tenant_id: String,
    pub status: String,
    pub lease_start: String,
    pub monthly_rent: String,
    pub created_at: String,
    pub approved_at: Option<String>,
    pub approved_by: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = bookings, treat_none_as_null = true)]
pub(crate) struct NewBooking {
    pub id: String,
    pub apartment_id: String,
    pub tenant_id: String,
    pub status: String,
    pub lease_start: String,
    pub monthly_rent: String,
    pub created_at: String,
    pub approved_at: Option<String>,
    pub approved_by: Option<String>,
}

impl TryFrom<BookingRow> for Booking {
    type Error = PersistenceError;

    fn try_from(row: BookingRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_field("bookings", &row.id)?,
            apartment_id: parse_field("bookings", &row.apartment_id)?,
            tenant_id: parse_field("bookings", &row.tenant_id)?,
            status: parse_field::<BookingStatus>("bookings", &row.status)?,
            lease_start: Date::parse(&row.lease_start, LEASE_DATE_FORMAT)
                .map_err(|e| PersistenceError::corrupt("bookings", e))?,
            monthly_rent: parse_field::<Decimal>("bookings", &row.monthly_rent)?,
            created_at: parse_timestamp("bookings", &row.created_at)?,
            approved_at: parse_optional_timestamp("bookings", row.approved_at.as_deref())?,
            approved_by: row
                .approved_by
                .as_deref()
                .map(|id| parse_field("bookings", id))
                .transpose()?,
        })
    }
}

impl TryFrom<&Booking> for NewBooking {
    type Error = PersistenceError;

    fn try_from(booking: &Booking) -> Result<Self, Self::Error> {
        Ok(Self {
            id: booking.id.to_string(),
            apartment_id: booking.apartment_id.to_string(),
            tenant_id: booking.tenant_id.to_string(),
            status: booking.status.as_str().to_string(),
            lease_start: booking
                .lease_start
                .format(LEASE_DATE_FORMAT)
                .map_err(|e| PersistenceError::SerializationError(e.to_string()))?,
            monthly_rent: booking.monthly_rent.to_string(),
            created_at: format_timestamp(booking.created_at)?,
            approved_at: format_optional_timestamp(booking.approved_at)?,
            approved_by: booking.approved_by.map(|id| id.to_string()),
        })
    }
}

// ============================================================================
// Payments
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = payments)]
pub(crate) struct PaymentRow {
    pub id: String,
    pub booking_id: String,
    pub tenant_id: String,
    pub amount: String,
    pub method: String,
    pub status: String,
    pub period_month: String,
    pub transaction_id: Option<String>,
    pub receipt: Option<String>,
    pub failure_reason: Option<String>,
    pub admin_account_id: String,
    pub created_at: String,
    pub paid_at: Option<String>,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = payments, treat_none_as_null = true)]
pub(crate) struct NewPayment {
    pub id: String,
    pub booking_id: String,
    pub tenant_id: String,
    pub amount: String,
    pub method: String,
    pub status: String,
    pub period_month: String,
    pub transaction_id: Option<String>,
    pub receipt: Option<String>,
    pub failure_reason: Option<String>,
    pub admin_account_id: String,
    pub created_at: String,
    pub paid_at: Option<String>,
}

impl TryFrom<PaymentRow> for Payment {
    type Error = PersistenceError;

    fn try_from(row: PaymentRow) -> Result<Self, Self::Error> {
        Ok(Self {
            id: parse_field("payments", &row.id)?,
            booking_id: parse_field("payments", &row.booking_id)?,
            tenant_id: parse_field("payments", &row.tenant_id)?,
            amount: parse_field::<Decimal>("payments", &row.amount)?,
            method: parse_field::<PaymentMethod>("payments", &row.method)?,
            status: parse_field::<PaymentStatus>("payments", &row.status)?,
            period_month: parse_field::<PeriodMonth>("payments", &row.period_month)?,
            transaction_id: row.transaction_id,
            receipt: row.receipt,
            failure_reason: row.failure_reason,
            admin_account_id: parse_field("payments", &row.admin_account_id)?,
            created_at: parse_timestamp("payments", &row.created_at)?,
            paid_at: parse_optional_timestamp("payments", row.paid_at.as_deref())?,
        })
    }
}

impl TryFrom<&Payment> for NewPayment {
    type Error = PersistenceError;

    fn try_from(payment: &Payment) -> Result<Self, Self::Error> {
        Ok(Self {
            id: payment.id.to_string(),
            booking_id: payment.booking_id.to_string(),
            tenant_id: payment.tenant_id.to_string(),
            amount: payment.amount.to_string(),
            method: payment.method.as_str().to_string(),
            status: payment.status.as_str().to_string(),
            period_month: payment.period_month.to_string(),
            transaction_id: payment.transaction_id.clone(),
            receipt: payment.receipt.clone(),
            failure_reason: payment.failure_reason.clone(),
            admin_account_id: payment.admin_account_id.to_string(),
            created_at: format_timestamp(payment.created_at)?,
            paid_at: format_optional_timestamp(payment.paid_at)?,
        })
    }
}

// ============================================================================
// Payout accounts
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = payout_accounts)]
pub(crate) struct PayoutAccountRow {
    pub id: String,
    pub admin_id: String,
    pub account_type: String,
    pub phone: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub is_default: i32,
    pub created_at: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = payout_accounts, treat_none_as_null = true)]
pub(crate) struct NewPayoutAccount {
    pub id: String,
    pub admin_id: String,
    pub account_type: String,
    pub phone: Option<String>,
    pub bank_name: Option<String>,
    pub account_number: Option<String>,
    pub account_name: Option<String>,
    pub is_default: i32,
    pub created_at: String,
}

fn required(
    table: &'static str,
    field: &'static str,
    value: Option<String>,
) -> Result<String, PersistenceError> {
    value.ok_or_else(|| PersistenceError::corrupt(table, format!("{field} is missing")))
}

impl TryFrom<PayoutAccountRow> for PayoutAccount {
    type Error = PersistenceError;

    fn try_from(row: PayoutAccountRow) -> Result<Self, Self::Error> {
        let details: AccountDetails = match row.account_type.as_str() {
            "mobile_money" => AccountDetails::MobileMoney {
                phone: required("payout_accounts", "phone", row.phone)?,
            },
            "bank" => AccountDetails::Bank {
                bank_name: required("payout_accounts", "bank_name", row.bank_name)?,
                account_number: required("payout_accounts", "account_number", row.account_number)?,
                account_name: required("payout_accounts", "account_name", row.account_name)?,
            },
            other => {
                return Err(PersistenceError::corrupt(
                    "payout_accounts",
                    format!("unknown account type '{other}'"),
                ));
            }
        };

        Ok(Self {
            id: parse_field("payout_accounts", &row.id)?,
            admin_id: parse_field("payout_accounts", &row.admin_id)?,
            details,
            is_default: row.is_default != 0,
            created_at: parse_timestamp("payout_accounts", &row.created_at)?,
        })
    }
}

impl TryFrom<&PayoutAccount> for NewPayoutAccount {
    type Error = PersistenceError;

    fn try_from(account: &PayoutAccount) -> Result<Self, Self::Error> {
        let (phone, bank_name, account_number, account_name) = match &account.details {
            AccountDetails::MobileMoney { phone } => (Some(phone.clone()), None, None, None),
            AccountDetails::Bank {
                bank_name,
                account_number,
                account_name,
            } => (
                None,
                Some(bank_name.clone()),
                Some(account_number.clone()),
                Some(account_name.clone()),
            ),
        };

        Ok(Self {
            id: account.id.to_string(),
            admin_id: account.admin_id.to_string(),
            account_type: account.details.account_type().as_str().to_string(),
            phone,
            bank_name,
            account_number,
            account_name,
            is_default: i32::from(account.is_default),
            created_at: format_timestamp(account.created_at)?,
        })
    }
}

// ============================================================================
// Saved payment methods
// ============================================================================

#[derive(Queryable, Selectable)]
#[diesel(table_name = saved_payment_methods)]
pub(crate) struct SavedMethodRow {
    pub id: String,
    pub tenant_id: String,
    pub method_type: String,
    pub phone: Option<String>,
    pub card_brand: Option<String>,
    pub card_last4: Option<String>,
    pub card_expiry: Option<String>,
    pub is_default: i32,
    pub created_at: String,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = saved_payment_methods, treat_none_as_null = true)]
pub(crate) struct NewSavedMethod {
    pub id: String,
    pub tenant_id: String,
    pub method_type: String,
    pub phone: Option<String>,
    pub card_brand: Option<String>,
    pub card_last4: Option<String>,
    pub card_expiry: Option<String>,
    pub is_default: i32,
    pub created_at: String,
}

impl TryFrom<SavedMethodRow> for SavedPaymentMethod {
    type Error = PersistenceError;

    fn try_from(row: SavedMethodRow) -> Result<Self, Self::Error> {
        const TABLE: &str = "saved_payment_methods";
        let details: MethodDetails = match parse_field::<PaymentMethod>(TABLE, &row.method_type)? {
            PaymentMethod::MobileMoney => MethodDetails::MobileMoney {
                phone: required(TABLE, "phone", row.phone)?,
            },
            PaymentMethod::Card => MethodDetails::Card {
                brand: parse_field::<CardBrand>(
                    TABLE,
                    &required(TABLE, "card_brand", row.card_brand)?,
                )?,
                last4: required(TABLE, "card_last4", row.card_last4)?,
                expiry: required(TABLE, "card_expiry", row.card_expiry)?,
            },
        };

        Ok(Self {
            id: parse_field(TABLE, &row.id)?,
            tenant_id: parse_field(TABLE, &row.tenant_id)?,
            details,
            is_default: row.is_default != 0,
            created_at: parse_timestamp(TABLE, &row.created_at)?,
        })
    }
}

impl TryFrom<&SavedPaymentMethod> for NewSavedMethod {
    type Error = PersistenceError;

    fn try_from(method: &SavedPaymentMethod) -> Result<Self, Self::Error> {
        let (phone, card_brand, card_last4, card_expiry) = match &method.details {
            MethodDetails::MobileMoney { phone } => (Some(phone.clone()), None, None, None),
            MethodDetails::Card {
                brand,
                last4,
                expiry,
            } => (
                None,
                Some(brand.as_str().to_string()),
                Some(last4.clone()),
                Some(expiry.clone()),
            ),
        };

        Ok(Self {
            id: method.id.to_string(),
            tenant_id: method.tenant_id.to_string(),
            method_type: method.details.method().as_str().to_string(),
            phone,
            card_brand,
            card_last4,
            card_expiry,
            is_default: i32::from(method.is_default),
            created_at: format_timestamp(method.created_at)?,
        })
    }
}

// ============================================================================
// Contact details
// ============================================================================

/// The only row id `contact_info` allows.
pub(crate) const CONTACT_ROW_ID: i32 = 1;

#[derive(Queryable, Selectable, Insertable)]
#[diesel(table_name = contact_info)]
pub(crate) struct ContactRow {
    pub id: i32,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub facebook: String,
    pub instagram: String,
    pub hours_monday_friday: String,
    pub hours_saturday: String,
    pub hours_sunday: String,
}

impl From<ContactRow> for ContactInfo {
    fn from(row: ContactRow) -> Self {
        Self {
            phone: row.phone,
            email: row.email,
            address: row.address,
            city: row.city,
            postal_code: row.postal_code,
            facebook: row.facebook,
            instagram: row.instagram,
            hours: BusinessHours {
                monday_friday: row.hours_monday_friday,
                saturday: row.hours_saturday,
                sunday: row.hours_sunday,
            },
        }
    }
}

impl From<&ContactInfo> for ContactRow {
    fn from(contact: &ContactInfo) -> Self {
        Self {
            id: CONTACT_ROW_ID,
            phone: contact.phone.clone(),
            email: contact.email.clone(),
            address: contact.address.clone(),
            city: contact.city.clone(),
            postal_code: contact.postal_code.clone(),
            facebook: contact.facebook.clone(),
            instagram: contact.instagram.clone(),
            hours_monday_friday: contact.hours.monday_friday.clone(),
            hours_saturday: contact.hours.saturday.clone(),
            hours_sunday: contact.hours.sunday.clone(),
        }
    }
}
