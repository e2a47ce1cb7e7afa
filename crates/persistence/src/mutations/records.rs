// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Record writes.
//!
//! Each `Change` becomes one statement: puts are upserts keyed on the
//! record id, deletes remove by id. Upserts leave the row's insertion
//! sequence untouched, so stored order survives updates. Contact details
//! replace their single row.

use diesel::SqliteConnection;
use diesel::prelude::*;
use rentdesk::Change;
use tracing::debug;

use crate::data_models::{
    ContactRow, NewApartment, NewBooking, NewPayment, NewPayoutAccount, NewSavedMethod, NewUser,
};
use crate::diesel_schema::{
    apartments, bookings, contact_info, payments, payout_accounts, saved_payment_methods, users,
};
use crate::error::PersistenceError;

/// Writes one change.
///
/// # Errors
///
/// Returns an error if the row cannot be encoded or the database rejects
/// the write.
pub fn apply_change(conn: &mut SqliteConnection, change: &Change) -> Result<(), PersistenceError> {
    match change {
        Change::PutUser(user) => {
            let row: NewUser = NewUser::try_from(user)?;
            diesel::insert_into(users::table)
                .values(&row)
                .on_conflict(users::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            debug!(user_id = %user.id, "Stored user");
        }
        Change::DeleteUser(id) => {
            diesel::delete(users::table.filter(users::id.eq(id.to_string()))).execute(conn)?;
            debug!(user_id = %id, "Deleted user");
        }
        Change::PutApartment(apartment) => {
            let row: NewApartment = NewApartment::try_from(apartment)?;
            diesel::insert_into(apartments::table)
                .values(&row)
                .on_conflict(apartments::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            debug!(apartment_id = %apartment.id, "Stored apartment");
        }
        Change::DeleteApartment(id) => {
            diesel::delete(apartments::table.filter(apartments::id.eq(id.to_string())))
                .execute(conn)?;
            debug!(apartment_id = %id, "Deleted apartment");
        }
        Change::PutBooking(booking) => {
            let row: NewBooking = NewBooking::try_from(booking)?;
            diesel::insert_into(bookings::table)
                .values(&row)
                .on_conflict(bookings::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            debug!(booking_id = %booking.id, status = %booking.status, "Stored booking");
        }
        Change::DeleteBooking(id) => {
            diesel::delete(bookings::table.filter(bookings::id.eq(id.to_string())))
                .execute(conn)?;
            debug!(booking_id = %id, "Deleted booking");
        }
        Change::PutPayment(payment) => {
            let row: NewPayment = NewPayment::try_from(payment)?;
            diesel::insert_into(payments::table)
                .values(&row)
                .on_conflict(payments::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            debug!(payment_id = %payment.id, status = %payment.status, "Stored payment");
        }
        Change::DeletePayment(id) => {
            diesel::delete(payments::table.filter(payments::id.eq(id.to_string())))
                .execute(conn)?;
            debug!(payment_id = %id, "Deleted payment");
        }
        Change::PutPayoutAccount(account) => {
            let row: NewPayoutAccount = NewPayoutAccount::try_from(account)?;
            diesel::insert_into(payout_accounts::table)
                .values(&row)
                .on_conflict(payout_accounts::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            debug!(account_id = %account.id, is_default = account.is_default, "Stored payout account");
        }
        Change::DeletePayoutAccount(id) => {
            diesel::delete(payout_accounts::table.filter(payout_accounts::id.eq(id.to_string())))
                .execute(conn)?;
            debug!(account_id = %id, "Deleted payout account");
        }
        Change::PutSavedMethod(method) => {
            let row: NewSavedMethod = NewSavedMethod::try_from(method)?;
            diesel::insert_into(saved_payment_methods::table)
                .values(&row)
                .on_conflict(saved_payment_methods::id)
                .do_update()
                .set(&row)
                .execute(conn)?;
            debug!(method_id = %method.id, is_default = method.is_default, "Stored payment method");
        }
        Change::DeleteSavedMethod(id) => {
            diesel::delete(
                saved_payment_methods::table.filter(saved_payment_methods::id.eq(id.to_string())),
            )
            .execute(conn)?;
            debug!(method_id = %id, "Deleted payment method");
        }
        Change::PutContactInfo(contact) => {
            diesel::replace_into(contact_info::table)
                .values(&ContactRow::from(contact))
                .execute(conn)?;
            debug!("Stored contact details");
        }
    }
    Ok(())
}
