// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rentdesk_domain::{
    AccountDetails, ApartmentId, ApartmentStatus, BookingId, BookingStatus, ContactInfo, Decimal,
    NewPaymentMethod, PaymentId, PaymentMethod, PaymentMethodId, PayoutAccountId, PeriodMonth,
    Role, UserId,
};
use time::Date;

/// Editable fields of an apartment listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApartmentListing {
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
    /// Monthly price.
    pub price: Decimal,
    /// Opaque image reference.
    pub image_url: Option<String>,
}

/// A request to create a user account.
///
/// Registration is separate from `Command` because it may run without a
/// session: the very first admin bootstraps the store, and tenants sign
/// themselves up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    /// Identifier for the new user.
    pub user_id: UserId,
    /// Email address.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Optional contact number.
    pub phone: Option<String>,
    /// Requested role.
    pub role: Role,
}

/// How an admin resolves a payment left pending.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reconciliation {
    /// The provider confirmed the funds.
    Completed {
        /// Provider receipt.
        receipt: Option<String>,
        /// Provider transaction reference.
        transaction_id: String,
    },
    /// The provider reported no funds.
    Failed {
        /// Why the payment failed.
        reason: String,
    },
}

/// A command represents user intent as data only.
///
/// Commands are the only way to request state changes. Identifiers for
/// records a command creates are chosen by the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace a user's display name and phone number.
    UpdateProfile {
        /// The user to update.
        user_id: UserId,
        /// New display name.
        full_name: String,
        /// New phone number.
        phone: Option<String>,
    },
    /// Delete an admin or tenant.
    DeleteUser {
        /// The user to delete.
        user_id: UserId,
    },
    /// List a new apartment.
    CreateApartment {
        /// Identifier for the new apartment.
        apartment_id: ApartmentId,
        /// Listing fields.
        listing: ApartmentListing,
    },
    /// Edit an apartment's listing fields.
    UpdateApartment {
        /// The apartment to edit.
        apartment_id: ApartmentId,
        /// Replacement listing fields.
        listing: ApartmentListing,
    },
    /// Move an apartment between `available` and `maintenance`.
    SetApartmentStatus {
        /// The apartment to change.
        apartment_id: ApartmentId,
        /// The requested status.
        status: ApartmentStatus,
    },
    /// Remove an apartment listing.
    DeleteApartment {
        /// The apartment to delete.
        apartment_id: ApartmentId,
    },
    /// Request to lease an apartment.
    SubmitBooking {
        /// Identifier for the new booking.
        booking_id: BookingId,
        /// The apartment requested.
        apartment_id: ApartmentId,
        /// Requested lease start.
        lease_start: Date,
    },
    /// Approve a booking request.
    ApproveBooking {
        /// The booking to approve.
        booking_id: BookingId,
    },
    /// Reject a booking request.
    RejectBooking {
        /// The booking to reject.
        booking_id: BookingId,
    },
    /// Withdraw one's own booking request.
    CancelBooking {
        /// The booking to cancel.
        booking_id: BookingId,
    },
    /// Remove a booking that is not a confirmed lease.
    DeleteBooking {
        /// The booking to delete.
        booking_id: BookingId,
    },
    /// Remove every booking in any of the given statuses.
    PurgeBookings {
        /// The statuses to purge.
        statuses: Vec<BookingStatus>,
    },
    /// Record a rent payment attempt.
    RecordPaymentAttempt {
        /// Identifier for the new payment.
        payment_id: PaymentId,
        /// The booking being paid for.
        booking_id: BookingId,
        /// The amount offered.
        amount: Decimal,
        /// The payment method.
        method: PaymentMethod,
        /// The rent month covered.
        period_month: PeriodMonth,
    },
    /// Mark a pending payment completed and confirm its booking.
    SettlePayment {
        /// The payment to settle.
        payment_id: PaymentId,
        /// Provider receipt.
        receipt: Option<String>,
        /// Provider transaction reference.
        transaction_id: String,
    },
    /// Mark a pending payment failed.
    FailPayment {
        /// The payment that failed.
        payment_id: PaymentId,
        /// Why it failed.
        reason: String,
    },
    /// Resolve a pending payment by hand.
    ReconcilePayment {
        /// The pending payment.
        payment_id: PaymentId,
        /// The outcome reported by the provider.
        outcome: Reconciliation,
    },
    /// Add a payout account for the acting admin.
    AddPayoutAccount {
        /// Identifier for the new account.
        account_id: PayoutAccountId,
        /// Destination details.
        details: AccountDetails,
    },
    /// Make one of the acting admin's accounts the default.
    SetDefaultPayoutAccount {
        /// The account to mark default.
        account_id: PayoutAccountId,
    },
    /// Remove one of the acting admin's accounts.
    RemovePayoutAccount {
        /// The account to remove.
        account_id: PayoutAccountId,
    },
    /// Save a payment method for the acting tenant.
    AddPaymentMethod {
        /// Identifier for the new method.
        method_id: PaymentMethodId,
        /// The method as entered.
        method: NewPaymentMethod,
    },
    /// Make one of the acting tenant's methods the default.
    SetDefaultPaymentMethod {
        /// The method to mark default.
        method_id: PaymentMethodId,
    },
    /// Remove one of the acting tenant's methods.
    RemovePaymentMethod {
        /// The method to remove.
        method_id: PaymentMethodId,
    },
    /// Replace the organisation's public contact details.
    UpdateContactInfo {
        /// The new details.
        contact: ContactInfo,
    },
}
