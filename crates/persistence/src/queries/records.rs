// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record loading.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rentdesk::State;
use rentdesk_domain::{
    Apartment, Booking, ContactInfo, Payment, PayoutAccount, SavedPaymentMethod, User,
};
use tracing::info;

use crate::data_models::{
    ApartmentRow, BookingRow, ContactRow, PaymentRow, PayoutAccountRow, SavedMethodRow, UserRow,
};
use crate::diesel_schema::{
    apartments, bookings, contact_info, payments, payout_accounts, saved_payment_methods, users,
};
use crate::error::PersistenceError;

/// Loads every record and rebuilds the in-memory store.
///
/// Rows are read in insertion order so the store's per-owner lists come
/// back in the order they were built.
///
/// # Errors
///
/// Returns an error if a query fails or a stored value does not decode.
pub fn load_state(conn: &mut SqliteConnection) -> Result<State, PersistenceError> {
    let users: Vec<User> = users::table
        .order_by(users::seq.asc())
        .select(UserRow::as_select())
        .load(conn)?
        .into_iter()
        .map(User::try_from)
        .collect::<Result<_, _>>()?;

    let apartments: Vec<Apartment> = apartments::table
        .order_by(apartments::seq.asc())
        .select(ApartmentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Apartment::try_from)
        .collect::<Result<_, _>>()?;

    let bookings: Vec<Booking> = bookings::table
        .order_by(bookings::seq.asc())
        .select(BookingRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Booking::try_from)
        .collect::<Result<_, _>>()?;

    let payments: Vec<Payment> = payments::table
        .order_by(payments::seq.asc())
        .select(PaymentRow::as_select())
        .load(conn)?
        .into_iter()
        .map(Payment::try_from)
        .collect::<Result<_, _>>()?;

    let payout_accounts: Vec<PayoutAccount> = payout_accounts::table
        .order_by(payout_accounts::seq.asc())
        .select(PayoutAccountRow::as_select())
        .load(conn)?
        .into_iter()
        .map(PayoutAccount::try_from)
        .collect::<Result<_, _>>()?;

    let saved_methods: Vec<SavedPaymentMethod> = saved_payment_methods::table
        .order_by(saved_payment_methods::seq.asc())
        .select(SavedMethodRow::as_select())
        .load(conn)?
        .into_iter()
        .map(SavedPaymentMethod::try_from)
        .collect::<Result<_, _>>()?;

    let contact: Option<ContactInfo> = contact_info::table
        .select(ContactRow::as_select())
        .first::<ContactRow>(conn)
        .optional()?
        .map(ContactInfo::from);

    info!(
        users = users.len(),
        apartments = apartments.len(),
        bookings = bookings.len(),
        payments = payments.len(),
        payout_accounts = payout_accounts.len(),
        saved_methods = saved_methods.len(),
        contact_saved = contact.is_some(),
        "Loaded records"
    );

    Ok(State::from_records(
        users,
        apartments,
        bookings,
        payments,
        payout_accounts,
        saved_methods,
        contact,
    ))
}
