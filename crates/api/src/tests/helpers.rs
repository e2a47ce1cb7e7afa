// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Test helper functions and fixtures.

use rentdesk::Session;
use rentdesk_audit::Cause;
use rentdesk_domain::{AccountDetails, ApartmentId, BookingId, Decimal, Role};
use rentdesk_persistence::Persistence;
use time::macros::date;

use crate::{
    ApartmentRequest, CreateBookingRequest, RegisterUserRequest, RegisterUserResponse, Store,
    add_payout_account, approve_booking, create_apartment, register_user, submit_booking,
};

pub const ADMIN_EMAIL: &str = "admin@example.com";
pub const ADMIN_PASSWORD: &str = "admin-password";
pub const TENANT_PASSWORD: &str = "tenant-password";

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("api-req-456"), String::from("API request"))
}

pub fn setup_store() -> Store {
    let persistence: Persistence =
        Persistence::new_in_memory().expect("Failed to create in-memory persistence");
    Store::open(persistence).expect("Failed to open store")
}

pub fn registration(email: &str, password: &str, role: Option<Role>) -> RegisterUserRequest {
    RegisterUserRequest {
        email: email.to_string(),
        password: password.to_string(),
        full_name: String::from("Test Person"),
        phone: Some(String::from("0712345678")),
        role,
    }
}

/// Registers the first admin of an empty store.
pub fn register_admin(store: &mut Store) -> Session {
    let response: RegisterUserResponse = register_user(
        store,
        None,
        registration(ADMIN_EMAIL, ADMIN_PASSWORD, Some(Role::Admin)),
        create_test_cause(),
    )
    .expect("Failed to register admin");
    Session::new(response.user.id, Role::Admin)
}

/// Self-registers a tenant.
pub fn register_tenant(store: &mut Store, email: &str) -> Session {
    let response: RegisterUserResponse = register_user(
        store,
        None,
        registration(email, TENANT_PASSWORD, None),
        create_test_cause(),
    )
    .expect("Failed to register tenant");
    Session::new(response.user.id, Role::Tenant)
}

pub fn apartment_request(price: i64) -> ApartmentRequest {
    ApartmentRequest {
        name: String::from("Garden Flat"),
        description: String::from("Two bedroom flat near the park"),
        address: String::from("12 Ngong Road, Nairobi"),
        bedrooms: 2,
        bathrooms: 1,
        price: Decimal::new(price, 0),
        image_url: None,
    }
}

pub fn create_test_apartment(store: &mut Store, admin: &Session, price: i64) -> ApartmentId {
    create_apartment(store, admin, apartment_request(price), create_test_cause())
        .expect("Failed to create apartment")
        .apartment
        .id
}

pub fn add_test_payout_account(store: &mut Store, admin: &Session) {
    add_payout_account(
        store,
        admin,
        AccountDetails::MobileMoney {
            phone: String::from("0700111222"),
        },
        create_test_cause(),
    )
    .expect("Failed to add payout account");
}

pub fn submit_test_booking(
    store: &mut Store,
    tenant: &Session,
    apartment_id: ApartmentId,
) -> BookingId {
    submit_booking(
        store,
        tenant,
        CreateBookingRequest {
            apartment_id,
            lease_start: date!(2026 - 11 - 01),
        },
        create_test_cause(),
    )
    .expect("Failed to submit booking")
    .booking
    .booking
    .id
}

/// Submits and approves a booking so it is payable.
pub fn approved_booking(
    store: &mut Store,
    admin: &Session,
    tenant: &Session,
    apartment_id: ApartmentId,
) -> BookingId {
    let booking_id: BookingId = submit_test_booking(store, tenant, apartment_id);
    approve_booking(store, admin, booking_id, create_test_cause())
        .expect("Failed to approve booking");
    booking_id
}
