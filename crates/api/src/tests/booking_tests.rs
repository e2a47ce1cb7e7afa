// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Apartment and booking handler tests.

use rentdesk::Session;
use rentdesk_domain::{
    ApartmentId, ApartmentStatus, BookingId, BookingStatus, Decimal,
};
use time::macros::date;

use super::helpers::{
    apartment_request, approved_booking, create_test_apartment, create_test_cause,
    register_admin, register_tenant, setup_store, submit_test_booking,
};
use crate::{
    ApiError, CreateBookingRequest, ListApartmentsRequest, PurgeBookingsRequest,
    SetApartmentStatusRequest, approve_booking, cancel_booking, create_apartment,
    delete_apartment, delete_booking, list_apartments, list_bookings, purge_bookings,
    reject_booking, set_apartment_status, submit_booking, update_apartment,
};

#[test]
fn test_tenant_cannot_create_apartment() {
    let mut store = setup_store();
    register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");

    let result = create_apartment(
        &mut store,
        &tenant,
        apartment_request(1200),
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Forbidden { .. })));
    assert!(store.state().apartments().is_empty());
}

#[test]
fn test_invalid_price_names_the_field() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);

    let result = create_apartment(
        &mut store,
        &admin,
        apartment_request(0),
        create_test_cause(),
    );

    assert!(matches!(
        result,
        Err(ApiError::InvalidInput { ref field, .. }) if field == "price"
    ));
}

#[test]
fn test_list_apartments_filters() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let small: ApartmentId = create_test_apartment(&mut store, &admin, 900);
    let mut large_request = apartment_request(2500);
    large_request.bedrooms = 4;
    let large: ApartmentId = create_apartment(&mut store, &admin, large_request, create_test_cause())
        .unwrap()
        .apartment
        .id;
    set_apartment_status(
        &mut store,
        &admin,
        small,
        SetApartmentStatusRequest {
            status: ApartmentStatus::Maintenance,
        },
        create_test_cause(),
    )
    .unwrap();

    let all = list_apartments(&store, ListApartmentsRequest::default());
    assert_eq!(all.len(), 2);

    let available = list_apartments(
        &store,
        ListApartmentsRequest {
            available: Some(true),
            min_bedrooms: None,
        },
    );
    assert_eq!(available.len(), 1);
    assert_eq!(available[0].id, large);

    let roomy = list_apartments(
        &store,
        ListApartmentsRequest {
            available: None,
            min_bedrooms: Some(3),
        },
    );
    assert_eq!(roomy.len(), 1);
    assert_eq!(roomy[0].id, large);
}

#[test]
fn test_booking_locks_rent_at_submission() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let booking_id: BookingId = submit_test_booking(&mut store, &tenant, apartment_id);

    update_apartment(
        &mut store,
        &admin,
        apartment_id,
        apartment_request(1500),
        create_test_cause(),
    )
    .unwrap();

    let booking = store.state().booking(booking_id).unwrap();
    assert_eq!(booking.monthly_rent, Decimal::new(1200, 0));
    assert_eq!(
        store.state().apartment(apartment_id).unwrap().price,
        Decimal::new(1500, 0)
    );
}

#[test]
fn test_booking_on_unavailable_apartment_is_refused() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    set_apartment_status(
        &mut store,
        &admin,
        apartment_id,
        SetApartmentStatusRequest {
            status: ApartmentStatus::Maintenance,
        },
        create_test_cause(),
    )
    .unwrap();

    let result = submit_booking(
        &mut store,
        &tenant,
        CreateBookingRequest {
            apartment_id,
            lease_start: date!(2026 - 11 - 01),
        },
        create_test_cause(),
    );

    assert_eq!(
        result.unwrap_err(),
        ApiError::ApartmentUnavailable {
            apartment_id: apartment_id.to_string(),
            status: ApartmentStatus::Maintenance,
        }
    );
}

#[test]
fn test_duplicate_open_booking_is_a_conflict() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    submit_test_booking(&mut store, &tenant, apartment_id);

    let result = submit_booking(
        &mut store,
        &tenant,
        CreateBookingRequest {
            apartment_id,
            lease_start: date!(2026 - 12 - 01),
        },
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::Conflict { .. })));
}

#[test]
fn test_tenants_see_only_their_own_bookings() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let first: Session = register_tenant(&mut store, "first@example.com");
    let second: Session = register_tenant(&mut store, "second@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let first_booking: BookingId = submit_test_booking(&mut store, &first, apartment_id);
    submit_test_booking(&mut store, &second, apartment_id);

    let mine = list_bookings(&store, &first);
    assert_eq!(mine.len(), 1);
    assert_eq!(mine[0].booking.id, first_booking);
    assert_eq!(mine[0].apartment_name, "Garden Flat");
    assert!(mine[0].capabilities.can_cancel.is_allowed());
    assert!(!mine[0].capabilities.can_approve.is_allowed());

    let everything = list_bookings(&store, &admin);
    assert_eq!(everything.len(), 2);
    assert!(everything[0].capabilities.can_approve.is_allowed());
}

#[test]
fn test_only_admins_review_bookings() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let booking_id: BookingId = submit_test_booking(&mut store, &tenant, apartment_id);

    let result = approve_booking(&mut store, &tenant, booking_id, create_test_cause());
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    let approved = approve_booking(&mut store, &admin, booking_id, create_test_cause()).unwrap();
    assert_eq!(approved.booking.booking.status, BookingStatus::PendingPayment);
    assert_eq!(approved.booking.booking.approved_by, Some(admin.user_id));

    let again = reject_booking(&mut store, &admin, booking_id, create_test_cause());
    assert!(matches!(again, Err(ApiError::InvalidTransition { .. })));
}

#[test]
fn test_cancel_removes_own_booking() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let other: Session = register_tenant(&mut store, "other@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let booking_id: BookingId = approved_booking(&mut store, &admin, &tenant, apartment_id);

    let result = cancel_booking(&mut store, &other, booking_id, create_test_cause());
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    cancel_booking(&mut store, &tenant, booking_id, create_test_cause()).unwrap();
    assert!(store.state().booking(booking_id).is_err());
}

#[test]
fn test_purge_reports_removed_bookings() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let first: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let second: ApartmentId = create_test_apartment(&mut store, &admin, 1300);
    let rejected: BookingId = submit_test_booking(&mut store, &tenant, first);
    reject_booking(&mut store, &admin, rejected, create_test_cause()).unwrap();
    let waiting: BookingId = submit_test_booking(&mut store, &tenant, second);

    let response = purge_bookings(
        &mut store,
        &admin,
        PurgeBookingsRequest {
            statuses: vec![BookingStatus::Rejected],
        },
        create_test_cause(),
    )
    .unwrap();

    assert_eq!(response.removed, vec![rejected]);
    assert!(store.state().booking(waiting).is_ok());
}

#[test]
fn test_purge_refuses_confirmed() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);

    let result = purge_bookings(
        &mut store,
        &admin,
        PurgeBookingsRequest {
            statuses: vec![BookingStatus::Confirmed],
        },
        create_test_cause(),
    );

    assert!(matches!(result, Err(ApiError::InvalidTransition { .. })));
}

#[test]
fn test_delete_apartment_removes_open_bookings() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let booking_id: BookingId = submit_test_booking(&mut store, &tenant, apartment_id);

    delete_apartment(&mut store, &admin, apartment_id, create_test_cause()).unwrap();

    assert!(store.state().apartment(apartment_id).is_err());
    assert!(store.state().booking(booking_id).is_err());
}

#[test]
fn test_delete_booking_is_admin_only() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let booking_id: BookingId = submit_test_booking(&mut store, &tenant, apartment_id);

    let result = delete_booking(&mut store, &tenant, booking_id, create_test_cause());
    assert!(matches!(result, Err(ApiError::Forbidden { .. })));

    let response = delete_booking(&mut store, &admin, booking_id, create_test_cause()).unwrap();
    assert!(response.event_id > 0);
    assert!(store.state().booking(booking_id).is_err());
}

#[test]
fn test_unknown_booking_is_not_found() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);

    let result = approve_booking(&mut store, &admin, BookingId::generate(), create_test_cause());

    assert!(matches!(
        result,
        Err(ApiError::NotFound { ref resource_type, .. }) if resource_type == "booking"
    ));
}
