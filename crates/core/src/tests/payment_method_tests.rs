// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use super::helpers::Fixture;
use crate::{Change, Command, CoreError, Session};
use rentdesk_domain::{
    CardBrand, DomainError, MethodDetails, NewPaymentMethod, PaymentMethod, PaymentMethodId,
};

fn mpesa(phone: &str) -> NewPaymentMethod {
    NewPaymentMethod::MobileMoney {
        phone: phone.to_string(),
    }
}

fn visa() -> NewPaymentMethod {
    NewPaymentMethod::Card {
        number: String::from("4111 1111 1111 1111"),
        expiry: String::from("12/28"),
    }
}

fn save(fx: &mut Fixture, tenant: &Session, method: NewPaymentMethod) -> PaymentMethodId {
    let method_id = PaymentMethodId::generate();
    fx.run(tenant, Command::AddPaymentMethod { method_id, method })
        .unwrap();
    method_id
}

fn default_ids(fx: &Fixture, tenant: &Session) -> Vec<PaymentMethodId> {
    fx.state
        .methods_for_tenant(tenant.user_id)
        .filter(|m| m.is_default)
        .map(|m| m.id)
        .collect()
}

#[test]
fn test_first_method_becomes_default() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();

    let first = save(&mut fx, &tenant, mpesa("254712345678"));
    let second = save(&mut fx, &tenant, visa());

    assert_eq!(default_ids(&fx, &tenant), vec![first]);
    assert_eq!(
        fx.state.saved_method(second).unwrap().details,
        MethodDetails::Card {
            brand: CardBrand::Visa,
            last4: String::from("1111"),
            expiry: String::from("12/28"),
        }
    );
}

#[test]
fn test_set_default_switches_the_default() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();
    let first = save(&mut fx, &tenant, mpesa("254712345678"));
    let second = save(&mut fx, &tenant, visa());

    let result = fx
        .run(
            &tenant,
            Command::SetDefaultPaymentMethod { method_id: second },
        )
        .unwrap();

    // The old default is cleared before the new one is set.
    assert!(matches!(
        result.changes.as_slice(),
        [Change::PutSavedMethod(old), Change::PutSavedMethod(new)]
            if old.id == first && !old.is_default && new.id == second && new.is_default
    ));
    assert_eq!(default_ids(&fx, &tenant), vec![second]);
}

#[test]
fn test_set_default_on_current_default_changes_nothing() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();
    let first = save(&mut fx, &tenant, mpesa("254712345678"));

    let result = fx
        .run(&tenant, Command::SetDefaultPaymentMethod { method_id: first })
        .unwrap();

    assert!(result.changes.is_empty());
    assert_eq!(result.audit_event.action.name, "set_default_payment_method");
}

#[test]
fn test_removing_default_promotes_first_remaining() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();
    let first = save(&mut fx, &tenant, mpesa("254712345678"));
    let second = save(&mut fx, &tenant, visa());
    let third = save(&mut fx, &tenant, mpesa("254700000001"));

    fx.run(&tenant, Command::RemovePaymentMethod { method_id: first })
        .unwrap();

    assert_eq!(default_ids(&fx, &tenant), vec![second]);
    assert!(fx.state.saved_method(first).is_err());

    fx.run(&tenant, Command::RemovePaymentMethod { method_id: second })
        .unwrap();
    fx.run(&tenant, Command::RemovePaymentMethod { method_id: third })
        .unwrap();
    assert!(fx.state.default_method(tenant.user_id).is_none());
}

#[test]
fn test_removing_non_default_keeps_default() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();
    let first = save(&mut fx, &tenant, mpesa("254712345678"));
    let second = save(&mut fx, &tenant, visa());

    let result = fx
        .run(&tenant, Command::RemovePaymentMethod { method_id: second })
        .unwrap();

    assert_eq!(result.changes, vec![Change::DeleteSavedMethod(second)]);
    assert_eq!(default_ids(&fx, &tenant), vec![first]);
}

#[test]
fn test_invalid_phone_and_card_are_rejected() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();

    let phone = fx.run(
        &tenant,
        Command::AddPaymentMethod {
            method_id: PaymentMethodId::generate(),
            method: mpesa("12345"),
        },
    );
    assert!(matches!(
        phone,
        Err(CoreError::DomainViolation(DomainError::InvalidPhone(_)))
    ));

    let card = fx.run(
        &tenant,
        Command::AddPaymentMethod {
            method_id: PaymentMethodId::generate(),
            method: NewPaymentMethod::Card {
                number: String::from("4111 1111 111"),
                expiry: String::from("12/28"),
            },
        },
    );
    assert!(matches!(
        card,
        Err(CoreError::DomainViolation(DomainError::InvalidCardNumber(_)))
    ));
    assert!(fx.state.methods_for_tenant(tenant.user_id).next().is_none());
}

#[test]
fn test_methods_are_private_to_their_tenant() {
    let mut fx = Fixture::new();
    let owner: Session = fx.register_tenant();
    let other: Session = fx.register_tenant();
    let method_id = save(&mut fx, &owner, visa());

    let result = fx.run(&other, Command::RemovePaymentMethod { method_id });
    assert!(matches!(
        result,
        Err(CoreError::NotFound {
            entity: "payment method",
            ..
        })
    ));

    let admin: Session = fx.admin;
    let by_admin = fx.run(
        &admin,
        Command::AddPaymentMethod {
            method_id: PaymentMethodId::generate(),
            method: visa(),
        },
    );
    assert!(matches!(by_admin, Err(CoreError::Forbidden(_))));
}

#[test]
fn test_preferred_method_follows_requested_kind() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();
    let card = save(&mut fx, &tenant, visa());
    let wallet = save(&mut fx, &tenant, mpesa("0712 345 678"));

    let preferred = |kind| fx.state.preferred_method(tenant.user_id, kind).map(|m| m.id);
    assert_eq!(preferred(PaymentMethod::Card), Some(card));
    assert_eq!(preferred(PaymentMethod::MobileMoney), Some(wallet));
}

#[test]
fn test_deleting_tenant_removes_saved_methods() {
    let mut fx = Fixture::new();
    let tenant: Session = fx.register_tenant();
    let method_id = save(&mut fx, &tenant, visa());
    let admin: Session = fx.admin;

    fx.run(
        &admin,
        Command::DeleteUser {
            user_id: tenant.user_id,
        },
    )
    .unwrap();

    assert!(fx.state.saved_method(method_id).is_err());
    assert!(fx.state.saved_methods().is_empty());
}
