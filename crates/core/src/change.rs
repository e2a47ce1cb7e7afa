// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rentdesk_domain::{
    Apartment, ApartmentId, Booking, BookingId, ContactInfo, Payment, PaymentId,
    PaymentMethodId, PayoutAccount, PayoutAccountId, SavedPaymentMethod, User, UserId,
};

/// A single record write produced by a command.
///
/// A command yields an ordered list of changes. The list is applied in
/// order, both to the in-memory store and inside one database transaction,
/// so its order must respect uniqueness constraints: a previous default
/// payout account or saved method is unmarked before the new one is marked,
/// and payments are deleted before the bookings they reference.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Change {
    /// Insert or replace a user.
    PutUser(User),
    /// Remove a user.
    DeleteUser(UserId),
    /// Insert or replace an apartment.
    PutApartment(Apartment),
    /// Remove an apartment.
    DeleteApartment(ApartmentId),
    /// Insert or replace a booking.
    PutBooking(Booking),
    /// Remove a booking.
    DeleteBooking(BookingId),
    /// Insert or replace a payment.
    PutPayment(Payment),
    /// Remove a payment.
    DeletePayment(PaymentId),
    /// Insert or replace a payout account.
    PutPayoutAccount(PayoutAccount),
    /// Remove a payout account.
    DeletePayoutAccount(PayoutAccountId),
    /// Insert or replace a tenant's saved payment method.
    PutSavedMethod(SavedPaymentMethod),
    /// Remove a saved payment method.
    DeleteSavedMethod(PaymentMethodId),
    /// Replace the organisation's contact details.
    PutContactInfo(ContactInfo),
}
