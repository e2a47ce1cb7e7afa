// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::{Harness, create_test_cause, create_test_listing};
use crate::PersistenceError;
use rentdesk::{Change, Command, Session, State, TransitionResult};
use rentdesk_audit::{Action, AuditEvent, Subject};
use rentdesk_domain::{
    AccountDetails, ApartmentId, ApartmentStatus, Booking, BookingId, BookingStatus, CardBrand,
    ContactInfo, MethodDetails, NewPaymentMethod, PaymentId, PaymentMethod, PaymentMethodId,
    PaymentStatus, PayoutAccountId, PeriodMonth, SavedPaymentMethod, UserId,
};
use time::macros::{date, datetime};

fn add_account(harness: &mut Harness, details: AccountDetails) -> PayoutAccountId {
    let account_id = PayoutAccountId::generate();
    let admin: Session = harness.admin;
    harness.run(
        &admin,
        Command::AddPayoutAccount {
            account_id,
            details,
        },
    );
    account_id
}

fn create_apartment(harness: &mut Harness) -> ApartmentId {
    let apartment_id = ApartmentId::generate();
    let admin: Session = harness.admin;
    harness.run(
        &admin,
        Command::CreateApartment {
            apartment_id,
            listing: create_test_listing(),
        },
    );
    apartment_id
}

fn approved_booking(harness: &mut Harness, tenant: &Session, apartment_id: ApartmentId) -> BookingId {
    let booking_id = BookingId::generate();
    harness.run(
        tenant,
        Command::SubmitBooking {
            booking_id,
            apartment_id,
            lease_start: date!(2026 - 04 - 01),
        },
    );
    let admin: Session = harness.admin;
    harness.run(&admin, Command::ApproveBooking { booking_id });
    booking_id
}

fn record_attempt(harness: &mut Harness, tenant: &Session, booking_id: BookingId) -> PaymentId {
    let payment_id = PaymentId::generate();
    let amount = harness.state.booking(booking_id).unwrap().monthly_rent;
    harness.run(
        tenant,
        Command::RecordPaymentAttempt {
            payment_id,
            booking_id,
            amount,
            method: PaymentMethod::MobileMoney,
            period_month: PeriodMonth::new(2026, 4).unwrap(),
        },
    );
    payment_id
}

#[test]
fn test_reload_reproduces_a_full_booking_cycle() {
    let mut harness = Harness::new();
    add_account(
        &mut harness,
        AccountDetails::MobileMoney {
            phone: String::from("+254 712 345 678"),
        },
    );
    add_account(
        &mut harness,
        AccountDetails::Bank {
            bank_name: String::from("Equity Bank"),
            account_number: String::from("0123456789"),
            account_name: String::from("RentDesk Ltd"),
        },
    );
    let apartment_id: ApartmentId = create_apartment(&mut harness);
    let tenant: Session = harness.register_tenant();
    let rival: Session = harness.register_tenant();
    let booking_id: BookingId = approved_booking(&mut harness, &tenant, apartment_id);
    let rival_booking: BookingId = approved_booking(&mut harness, &rival, apartment_id);
    let payment_id: PaymentId = record_attempt(&mut harness, &tenant, booking_id);
    harness.run(
        &tenant,
        Command::SettlePayment {
            payment_id,
            receipt: Some(String::from("QJH7X2K9PL")),
            transaction_id: String::from("txn-001"),
        },
    );

    let loaded: State = harness.persistence.load_state().unwrap();

    assert_eq!(loaded, harness.state);
    assert_eq!(
        loaded.booking(booking_id).unwrap().status,
        BookingStatus::Confirmed
    );
    assert_eq!(
        loaded.booking(rival_booking).unwrap().status,
        BookingStatus::Rejected
    );
    assert_eq!(
        loaded.apartment(apartment_id).unwrap().status,
        ApartmentStatus::Occupied
    );
    let payment = loaded.payment(payment_id).unwrap();
    assert_eq!(payment.status, PaymentStatus::Completed);
    assert_eq!(payment.amount.to_string(), "1250.50");
    assert_eq!(payment.paid_at, Some(datetime!(2026-03-02 08:12 UTC)));
}

#[test]
fn test_reload_keeps_payout_account_order() {
    let mut harness = Harness::new();
    let first: PayoutAccountId = add_account(
        &mut harness,
        AccountDetails::MobileMoney {
            phone: String::from("0712345678"),
        },
    );
    let second: PayoutAccountId = add_account(
        &mut harness,
        AccountDetails::MobileMoney {
            phone: String::from("0722000111"),
        },
    );
    let third: PayoutAccountId = add_account(
        &mut harness,
        AccountDetails::MobileMoney {
            phone: String::from("0733000222"),
        },
    );
    let admin: Session = harness.admin;
    harness.run(&admin, Command::SetDefaultPayoutAccount { account_id: third });
    harness.run(&admin, Command::RemovePayoutAccount { account_id: third });

    let mut loaded: State = harness.persistence.load_state().unwrap();
    let ids: Vec<PayoutAccountId> = loaded
        .accounts_for_admin(admin.user_id)
        .map(|account| account.id)
        .collect();
    assert_eq!(ids, vec![first, second]);
    assert_eq!(loaded.default_account(admin.user_id).unwrap().id, first);

    // The reloaded store keeps promoting in the same order.
    loaded = rentdesk::apply(
        &loaded,
        Command::RemovePayoutAccount { account_id: first },
        &admin,
        create_test_cause(),
        datetime!(2026-03-03 08:00 UTC),
    )
    .unwrap()
    .new_state;
    assert_eq!(loaded.default_account(admin.user_id).unwrap().id, second);
}

#[test]
fn test_deletions_are_persisted() {
    let mut harness = Harness::new();
    add_account(
        &mut harness,
        AccountDetails::MobileMoney {
            phone: String::from("0712345678"),
        },
    );
    let apartment_id: ApartmentId = create_apartment(&mut harness);
    let tenant: Session = harness.register_tenant();
    let booking_id: BookingId = approved_booking(&mut harness, &tenant, apartment_id);
    let payment_id: PaymentId = record_attempt(&mut harness, &tenant, booking_id);
    harness.run(
        &tenant,
        Command::FailPayment {
            payment_id,
            reason: String::from("insufficient funds"),
        },
    );

    let admin: Session = harness.admin;
    harness.run(
        &admin,
        Command::DeleteUser {
            user_id: tenant.user_id,
        },
    );

    let loaded: State = harness.persistence.load_state().unwrap();
    assert_eq!(loaded, harness.state);
    assert!(loaded.user(tenant.user_id).is_err());
    assert!(loaded.booking(booking_id).is_err());
    assert!(loaded.payment(payment_id).is_err());
    assert!(loaded.apartment(apartment_id).is_ok());
}

#[test]
fn test_failed_transition_leaves_database_unchanged() {
    let mut harness = Harness::new();
    let apartment_id: ApartmentId = create_apartment(&mut harness);
    let before: State = harness.persistence.load_state().unwrap();

    // A valid apartment update followed by a booking for a tenant that
    // does not exist. The foreign key rejects the second write.
    let mut apartment = harness.state.apartment(apartment_id).unwrap().clone();
    apartment.status = ApartmentStatus::Maintenance;
    let orphan = Booking {
        id: BookingId::generate(),
        apartment_id,
        tenant_id: UserId::generate(),
        status: BookingStatus::PendingApproval,
        lease_start: date!(2026 - 04 - 01),
        monthly_rent: apartment.price,
        created_at: datetime!(2026-03-02 09:00 UTC),
        approved_at: None,
        approved_by: None,
    };
    let result = TransitionResult {
        new_state: harness.state.clone(),
        changes: vec![Change::PutApartment(apartment), Change::PutBooking(orphan)],
        audit_event: AuditEvent::new(
            harness.admin.actor(),
            create_test_cause(),
            Action::new(String::from("submit_booking"), None),
            Subject::new("booking", "orphan"),
            datetime!(2026-03-02 09:00 UTC),
        ),
    };

    let outcome = harness.persistence.persist_transition(&result);

    assert!(matches!(
        outcome,
        Err(PersistenceError::ConstraintViolation(_))
    ));
    assert_eq!(harness.persistence.load_state().unwrap(), before);
    assert_eq!(harness.persistence.list_audit_events(100).unwrap().len(), 2);
}

#[test]
fn test_second_confirmed_booking_is_rejected_by_schema() {
    let mut harness = Harness::new();
    add_account(
        &mut harness,
        AccountDetails::MobileMoney {
            phone: String::from("0712345678"),
        },
    );
    let apartment_id: ApartmentId = create_apartment(&mut harness);
    let tenant: Session = harness.register_tenant();
    let booking_id: BookingId = approved_booking(&mut harness, &tenant, apartment_id);
    let payment_id: PaymentId = record_attempt(&mut harness, &tenant, booking_id);
    harness.run(
        &tenant,
        Command::SettlePayment {
            payment_id,
            receipt: None,
            transaction_id: String::from("txn-002"),
        },
    );

    let mut duplicate = harness.state.booking(booking_id).unwrap().clone();
    duplicate.id = BookingId::generate();
    let result = TransitionResult {
        new_state: harness.state.clone(),
        changes: vec![Change::PutBooking(duplicate)],
        audit_event: AuditEvent::new(
            harness.admin.actor(),
            create_test_cause(),
            Action::new(String::from("settle_payment"), None),
            Subject::new("booking", "duplicate"),
            datetime!(2026-03-02 09:00 UTC),
        ),
    };

    let outcome = harness.persistence.persist_transition(&result);
    assert!(matches!(
        outcome,
        Err(PersistenceError::ConstraintViolation(_))
    ));
}

fn save_method(harness: &mut Harness, tenant: &Session, method: NewPaymentMethod) -> PaymentMethodId {
    let method_id = PaymentMethodId::generate();
    harness.run(tenant, Command::AddPaymentMethod { method_id, method });
    method_id
}

#[test]
fn test_reload_keeps_saved_payment_methods() {
    let mut harness = Harness::new();
    let tenant: Session = harness.register_tenant();
    let wallet: PaymentMethodId = save_method(
        &mut harness,
        &tenant,
        NewPaymentMethod::MobileMoney {
            phone: String::from("254712345678"),
        },
    );
    let card: PaymentMethodId = save_method(
        &mut harness,
        &tenant,
        NewPaymentMethod::Card {
            number: String::from("5555 5555 5555 4444"),
            expiry: String::from("03/30"),
        },
    );
    harness.run(&tenant, Command::SetDefaultPaymentMethod { method_id: card });

    let loaded: State = harness.persistence.load_state().unwrap();
    assert_eq!(loaded, harness.state);
    let ids: Vec<PaymentMethodId> = loaded
        .methods_for_tenant(tenant.user_id)
        .map(|method| method.id)
        .collect();
    assert_eq!(ids, vec![wallet, card]);
    let default: &SavedPaymentMethod = loaded.default_method(tenant.user_id).unwrap();
    assert_eq!(
        default.details,
        MethodDetails::Card {
            brand: CardBrand::Mastercard,
            last4: String::from("4444"),
            expiry: String::from("03/30"),
        }
    );
}

#[test]
fn test_second_default_method_is_rejected_by_schema() {
    let mut harness = Harness::new();
    let tenant: Session = harness.register_tenant();
    let method_id: PaymentMethodId = save_method(
        &mut harness,
        &tenant,
        NewPaymentMethod::MobileMoney {
            phone: String::from("254712345678"),
        },
    );

    let mut duplicate = harness.state.saved_method(method_id).unwrap().clone();
    duplicate.id = PaymentMethodId::generate();
    assert!(duplicate.is_default);
    let result = TransitionResult {
        new_state: harness.state.clone(),
        changes: vec![Change::PutSavedMethod(duplicate)],
        audit_event: AuditEvent::new(
            tenant.actor(),
            create_test_cause(),
            Action::new(String::from("add_payment_method"), None),
            Subject::new("payment_method", "duplicate"),
            datetime!(2026-03-02 09:00 UTC),
        ),
    };

    let outcome = harness.persistence.persist_transition(&result);
    assert!(matches!(
        outcome,
        Err(PersistenceError::ConstraintViolation(_))
    ));
}

#[test]
fn test_contact_details_survive_reload() {
    let mut harness = Harness::new();
    assert_eq!(
        harness.persistence.load_state().unwrap().contact(),
        &ContactInfo::default()
    );

    let contact = ContactInfo {
        city: String::from("Kisumu, Kenya"),
        ..ContactInfo::default()
    };
    let admin: Session = harness.admin;
    harness.run(
        &admin,
        Command::UpdateContactInfo {
            contact: contact.clone(),
        },
    );
    let second = ContactInfo {
        phone: String::from("+254 733 000 222"),
        ..contact
    };
    harness.run(
        &admin,
        Command::UpdateContactInfo {
            contact: second.clone(),
        },
    );

    let loaded: State = harness.persistence.load_state().unwrap();
    assert_eq!(loaded.contact(), &second);
    assert_eq!(loaded, harness.state);
}
