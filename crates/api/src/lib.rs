// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API boundary for the RentDesk rental manager.
//!
//! This crate sits between a transport (the HTTP server) and the core. It
//! owns authentication, password policy, capability computation and the
//! payment provider flow, and translates core and persistence errors into
//! [`ApiError`].

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
#![allow(clippy::multiple_crate_versions)]

mod auth;
mod capabilities;
mod error;
mod handlers;
mod password_policy;
mod payment;
mod request_response;
mod store;

#[cfg(test)]
mod tests;

pub use auth::{AuthenticationService, LoginOutcome};
pub use capabilities::{
    compute_booking_capabilities, compute_global_capabilities, compute_user_capabilities,
};
pub use error::{ApiError, translate_core_error, translate_domain_error};
pub use handlers::{
    add_payment_method, add_payout_account, approve_booking, cancel_booking, change_password,
    create_apartment, dashboard, delete_apartment, delete_booking, delete_user, get_contact,
    list_apartments, list_audit_events, list_bookings, list_payment_methods, list_payments,
    list_payout_accounts, list_users, login, logout, purge_bookings, reconcile_payment,
    register_user, reject_booking, remove_payment_method, remove_payout_account,
    set_apartment_status, set_default_payment_method, set_default_payout_account,
    submit_booking, update_apartment, update_contact, update_profile, whoami,
};
pub use password_policy::{PasswordPolicy, PasswordPolicyError};
pub use payment::{
    PaymentProvider, PaymentRequest, ProviderError, ProviderReceipt, pay_rent,
    record_payment_attempt,
};
pub use request_response::{
    ApartmentRequest, ApartmentResponse, BookingCapabilities, BookingInfo, BookingResponse,
    Capability, ChangePasswordRequest, ContactResponse, CreateBookingRequest, DashboardResponse,
    GlobalCapabilities, ListApartmentsRequest, ListAuditEventsRequest, LoginRequest,
    LoginResponse, PayRentRequest, PaymentMethodResponse, PaymentResponse, PayoutAccountResponse,
    PurgeBookingsRequest, PurgeBookingsResponse, ReconcilePaymentRequest, RegisterUserRequest,
    RegisterUserResponse, SetApartmentStatusRequest, UpdateProfileRequest, UserCapabilities,
    UserInfo, UserListEntry, WhoAmIResponse, WriteResponse,
};
pub use store::{Committed, Store};
