// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Shape of transition results: purity, change lists and audit events.

use super::helpers::{Fixture, create_test_cause, create_test_listing};
use crate::{Change, Command, Session, State, apply, dashboard_stats};
use rentdesk_domain::{ApartmentId, Decimal};
use time::macros::datetime;

#[test]
fn test_apply_leaves_input_state_untouched() {
    let fx = Fixture::new();
    let before: State = fx.state.clone();

    let result = apply(
        &fx.state,
        Command::CreateApartment {
            apartment_id: ApartmentId::generate(),
            listing: create_test_listing(1000),
        },
        &fx.admin,
        create_test_cause(),
        datetime!(2026-01-06 10:00 UTC),
    )
    .unwrap();

    assert_eq!(fx.state, before);
    assert_eq!(result.new_state.apartments().len(), 1);
    assert_eq!(result.changes.len(), 1);
}

#[test]
fn test_failed_command_yields_no_result() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();
    let before: State = fx.state.clone();

    let result = fx.run(
        &tenant,
        Command::CreateApartment {
            apartment_id: ApartmentId::generate(),
            listing: create_test_listing(1000),
        },
    );

    assert!(result.is_err());
    assert_eq!(fx.state, before);
}

#[test]
fn test_audit_event_records_actor_cause_and_subject() {
    let fx = Fixture::new();
    let apartment_id = ApartmentId::generate();
    let at = datetime!(2026-01-06 10:00 UTC);

    let result = apply(
        &fx.state,
        Command::CreateApartment {
            apartment_id,
            listing: create_test_listing(1000),
        },
        &fx.admin,
        create_test_cause(),
        at,
    )
    .unwrap();

    let event = result.audit_event;
    assert_eq!(event.event_id, None);
    assert_eq!(event.actor.id, fx.admin.user_id.to_string());
    assert_eq!(event.actor.actor_type, "admin");
    assert_eq!(event.cause.id, "req-456");
    assert_eq!(event.action.name, "create_apartment");
    assert_eq!(
        event.action.details.as_deref(),
        Some("Listed 'Garden View 2B' at 1000")
    );
    assert_eq!(event.subject.kind, "apartment");
    assert_eq!(event.subject.id, apartment_id.to_string());
    assert_eq!(event.occurred_at, at);
}

#[test]
fn test_new_state_equals_changes_replayed() {
    let mut fx = Fixture::new();
    let admin: Session = fx.admin;
    fx.add_payout_account(&admin);
    let tenant: Session = fx.register_tenant();
    let apartment_id = fx.create_apartment(1000);
    let booking_id = fx.approved_booking(&tenant, apartment_id);
    let payment_id = fx.record_attempt(&tenant, booking_id);
    let before: State = fx.state.clone();

    let result = fx.run(&tenant, Fixture::settle_command(payment_id)).unwrap();

    let mut replayed: State = before;
    replayed.apply_changes(&result.changes);
    assert_eq!(replayed, result.new_state);
    assert!(
        result
            .changes
            .iter()
            .all(|c| !matches!(c, Change::DeleteBooking(_) | Change::DeletePayment(_)))
    );
}

#[test]
fn test_dashboard_stats() {
    let mut fx = Fixture::new();
    let admin: Session = fx.admin;
    fx.add_payout_account(&admin);
    let tenant: Session = fx.register_tenant();
    let waiting: Session = fx.register_tenant();
    let leased = fx.create_apartment(1200);
    let open = fx.create_apartment(800);
    let booking_id = fx.approved_booking(&tenant, leased);
    fx.pay(&tenant, booking_id);
    fx.submit(&waiting, open);

    let stats = dashboard_stats(&fx.state);

    assert_eq!(stats.total_apartments, 2);
    assert_eq!(stats.occupied_apartments, 1);
    assert_eq!(stats.available_apartments, 1);
    assert_eq!(stats.active_tenants, 1);
    assert_eq!(stats.pending_approvals, 1);
    assert_eq!(stats.revenue, Decimal::new(1200, 0));
}
