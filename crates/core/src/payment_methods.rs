// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Tenants' saved payment methods.
//!
//! Like payout accounts, each tenant's methods form an ordered list with
//! exactly one default whenever the list is non-empty.

use crate::access::require_tenant;
use crate::change::Change;
use crate::error::CoreError;
use crate::session::Session;
use crate::state::State;
use rentdesk_domain::{MethodDetails, NewPaymentMethod, PaymentMethodId, SavedPaymentMethod};
use time::OffsetDateTime;

/// Saves a payment method for the acting tenant.
///
/// The tenant's first method becomes the default. Card numbers are reduced
/// to brand and last four digits before anything is stored.
///
/// # Errors
///
/// Returns `Forbidden` for admins and `DomainViolation` if the phone, card
/// number or expiry does not validate.
pub(crate) fn add(
    state: &State,
    session: &Session,
    method_id: PaymentMethodId,
    method: NewPaymentMethod,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    require_tenant(session)?;
    state.user(session.user_id)?;

    let details: MethodDetails = method.into_details()?;
    let is_default: bool = state.methods_for_tenant(session.user_id).next().is_none();

    Ok(vec![Change::PutSavedMethod(SavedPaymentMethod {
        id: method_id,
        tenant_id: session.user_id,
        details,
        is_default,
        created_at: at,
    })])
}

fn owned_method<'a>(
    state: &'a State,
    session: &Session,
    method_id: PaymentMethodId,
) -> Result<&'a SavedPaymentMethod, CoreError> {
    require_tenant(session)?;
    match state.saved_method(method_id) {
        Ok(method) if method.tenant_id == session.user_id => Ok(method),
        _ => Err(CoreError::not_found("payment method", method_id)),
    }
}

/// Makes a saved method the acting tenant's default.
///
/// # Errors
///
/// Returns `NotFound` if the method does not belong to the tenant.
pub(crate) fn set_default(
    state: &State,
    session: &Session,
    method_id: PaymentMethodId,
) -> Result<Vec<Change>, CoreError> {
    let method: &SavedPaymentMethod = owned_method(state, session, method_id)?;
    if method.is_default {
        return Ok(Vec::new());
    }

    let mut changes: Vec<Change> = state
        .methods_for_tenant(session.user_id)
        .filter(|other| other.is_default)
        .map(|other| {
            Change::PutSavedMethod(SavedPaymentMethod {
                is_default: false,
                ..other.clone()
            })
        })
        .collect();
    changes.push(Change::PutSavedMethod(SavedPaymentMethod {
        is_default: true,
        ..method.clone()
    }));
    Ok(changes)
}

/// Removes one of the acting tenant's methods.
///
/// Removing the default promotes the first remaining method.
///
/// # Errors
///
/// Returns `NotFound` if the method does not belong to the tenant.
pub(crate) fn remove(
    state: &State,
    session: &Session,
    method_id: PaymentMethodId,
) -> Result<Vec<Change>, CoreError> {
    let method: &SavedPaymentMethod = owned_method(state, session, method_id)?;
    let mut changes: Vec<Change> = vec![Change::DeleteSavedMethod(method_id)];

    if method.is_default
        && let Some(successor) = state
            .methods_for_tenant(method.tenant_id)
            .find(|other| other.id != method_id)
    {
        changes.push(Change::PutSavedMethod(SavedPaymentMethod {
            is_default: true,
            ..successor.clone()
        }));
    }
    Ok(changes)
}
