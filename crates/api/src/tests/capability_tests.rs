// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation tests.

use rentdesk::Session;
use rentdesk_domain::{ApartmentId, BookingId, Role};

use super::helpers::{
    add_test_payout_account, approved_booking, create_test_apartment, create_test_cause,
    register_admin, register_tenant, registration, setup_store, submit_test_booking,
};
use crate::{
    Capability, PayRentRequest, compute_booking_capabilities, compute_global_capabilities,
    compute_user_capabilities, record_payment_attempt, register_user,
};

#[test]
fn test_capability_serializes_as_bool() {
    assert_eq!(serde_json::to_string(&Capability::Allowed).unwrap(), "true");
    assert_eq!(serde_json::to_string(&Capability::Denied).unwrap(), "false");
    assert_eq!(
        serde_json::from_str::<Capability>("true").unwrap(),
        Capability::Allowed
    );
}

#[test]
fn test_global_capabilities_follow_role() {
    let admin = compute_global_capabilities(&Session::new(
        rentdesk_domain::UserId::generate(),
        Role::Admin,
    ));
    let tenant = compute_global_capabilities(&Session::new(
        rentdesk_domain::UserId::generate(),
        Role::Tenant,
    ));

    assert!(admin.can_review_bookings.is_allowed());
    assert!(admin.can_manage_payout_accounts.is_allowed());
    assert!(!tenant.can_review_bookings.is_allowed());
    assert!(!tenant.can_view_dashboard.is_allowed());
    assert!(tenant.can_request_bookings.is_allowed());
    assert!(tenant.can_save_payment_methods.is_allowed());
    assert!(!tenant.can_edit_contact.is_allowed());
    assert!(admin.can_edit_contact.is_allowed());
}

#[test]
fn test_sole_admin_cannot_be_deleted() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let admin_user = store.state().user(admin.user_id).unwrap().clone();

    let capabilities = compute_user_capabilities(&admin, &admin_user, store.state());

    assert!(capabilities.can_edit.is_allowed());
    assert!(!capabilities.can_delete.is_allowed());
}

#[test]
fn test_admin_can_delete_other_admin_when_two_exist() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let second = register_user(
        &mut store,
        Some(&admin),
        registration("second@example.com", "admin-secret", Some(Role::Admin)),
        create_test_cause(),
    )
    .unwrap();
    let second_user = store.state().user(second.user.id).unwrap().clone();

    let capabilities = compute_user_capabilities(&admin, &second_user, store.state());

    assert!(capabilities.can_delete.is_allowed());
}

#[test]
fn test_tenant_with_pending_payment_is_protected() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    add_test_payout_account(&mut store, &admin);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let booking_id: BookingId = approved_booking(&mut store, &admin, &tenant, apartment_id);
    let tenant_user = store.state().user(tenant.user_id).unwrap().clone();

    assert!(
        compute_user_capabilities(&admin, &tenant_user, store.state())
            .can_delete
            .is_allowed()
    );

    record_payment_attempt(
        &mut store,
        &tenant,
        PayRentRequest {
            booking_id,
            method: rentdesk_domain::PaymentMethod::Card,
            amount: None,
            period_month: None,
        },
        create_test_cause(),
    )
    .unwrap();

    assert!(
        !compute_user_capabilities(&admin, &tenant_user, store.state())
            .can_delete
            .is_allowed()
    );
    let booking = store.state().booking(booking_id).unwrap().clone();
    let booking_capabilities = compute_booking_capabilities(&tenant, &booking, store.state());
    assert!(!booking_capabilities.can_pay.is_allowed());
    assert!(!booking_capabilities.can_cancel.is_allowed());
}

#[test]
fn test_booking_capabilities_by_status() {
    let mut store = setup_store();
    let admin: Session = register_admin(&mut store);
    let tenant: Session = register_tenant(&mut store, "tenant@example.com");
    let apartment_id: ApartmentId = create_test_apartment(&mut store, &admin, 1200);
    let booking_id: BookingId = submit_test_booking(&mut store, &tenant, apartment_id);

    let submitted = store.state().booking(booking_id).unwrap().clone();
    let for_tenant = compute_booking_capabilities(&tenant, &submitted, store.state());
    assert!(!for_tenant.can_pay.is_allowed());
    assert!(for_tenant.can_cancel.is_allowed());
    assert!(!for_tenant.can_approve.is_allowed());

    crate::approve_booking(&mut store, &admin, booking_id, create_test_cause()).unwrap();
    let approved = store.state().booking(booking_id).unwrap().clone();
    let for_tenant = compute_booking_capabilities(&tenant, &approved, store.state());
    let for_admin = compute_booking_capabilities(&admin, &approved, store.state());
    assert!(for_tenant.can_pay.is_allowed());
    assert!(!for_admin.can_pay.is_allowed());
    assert!(!for_admin.can_approve.is_allowed());
    assert!(for_admin.can_delete.is_allowed());
}
