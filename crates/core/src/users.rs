// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::access::{can_delete_admin, can_delete_tenant, require_admin, require_self_or_admin};
use crate::change::Change;
use crate::command::Registration;
use crate::error::CoreError;
use crate::session::Session;
use crate::state::State;
use rentdesk_domain::{
    DomainError, Role, User, UserId, normalize_email, validate_email, validate_full_name,
};
use time::OffsetDateTime;

/// Trims an optional phone number, treating blanks as absent.
fn clean_phone(phone: Option<String>) -> Option<String> {
    phone
        .map(|p| p.trim().to_string())
        .filter(|p| !p.is_empty())
}

/// Creates a user account.
///
/// Without a session, only two registrations are accepted: the first admin
/// of an empty store, and tenant self-registration once an admin exists.
/// Admins may register users of either role; tenants may not register
/// anyone.
///
/// # Errors
///
/// Returns `Forbidden` when the requester may not create the role,
/// `Conflict` for a tenant registering before any admin, and
/// `DomainViolation` for invalid fields or a duplicate email.
pub(crate) fn register(
    state: &State,
    requester: Option<&Session>,
    registration: Registration,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    match (requester, registration.role) {
        (Some(session), _) => require_admin(session)?,
        (None, Role::Tenant) => {
            if state.admin_count() == 0 {
                return Err(CoreError::Conflict(String::from(
                    "the first account must be an admin",
                )));
            }
        }
        (None, Role::Admin) => {
            if state.admin_count() > 0 {
                return Err(CoreError::Forbidden(String::from(
                    "only an admin can create another admin",
                )));
            }
        }
    }

    validate_email(&registration.email)?;
    validate_full_name(&registration.full_name)?;

    let email: String = normalize_email(&registration.email);
    if state.find_user_by_email(&email).is_some() {
        return Err(CoreError::DomainViolation(DomainError::DuplicateEmail(
            email,
        )));
    }

    Ok(vec![Change::PutUser(User {
        id: registration.user_id,
        email,
        full_name: registration.full_name.trim().to_string(),
        phone: clean_phone(registration.phone),
        role: registration.role,
        created_at: at,
    })])
}

/// Replaces a user's display name and phone number.
///
/// # Errors
///
/// Returns `Forbidden` unless acting on oneself or as an admin.
pub(crate) fn update_profile(
    state: &State,
    session: &Session,
    user_id: UserId,
    full_name: &str,
    phone: Option<String>,
) -> Result<Vec<Change>, CoreError> {
    require_self_or_admin(session, user_id)?;
    let user: &User = state.user(user_id)?;
    validate_full_name(full_name)?;

    Ok(vec![Change::PutUser(User {
        full_name: full_name.trim().to_string(),
        phone: clean_phone(phone),
        ..user.clone()
    })])
}

/// Deletes a user.
///
/// Deleting an admin also removes their payout accounts. Deleting a tenant
/// also removes their bookings and the failed payment attempts on them.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins or self-deletion, and `Conflict` for
/// the last admin or a tenant with an active lease.
pub(crate) fn delete(
    state: &State,
    session: &Session,
    user_id: UserId,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    let target: &User = state.user(user_id)?;
    let mut changes: Vec<Change> = Vec::new();

    match target.role {
        Role::Admin => {
            can_delete_admin(session.user_id, user_id, state.admin_count())?;
            changes.extend(
                state
                    .accounts_for_admin(user_id)
                    .map(|account| Change::DeletePayoutAccount(account.id)),
            );
        }
        Role::Tenant => {
            can_delete_tenant(state, user_id)?;
            changes.extend(
                state
                    .methods_for_tenant(user_id)
                    .map(|method| Change::DeleteSavedMethod(method.id)),
            );
            for booking in state.bookings_for_tenant(user_id) {
                changes.extend(
                    state
                        .payments_for_booking(booking.id)
                        .map(|payment| Change::DeletePayment(payment.id)),
                );
                changes.push(Change::DeleteBooking(booking.id));
            }
        }
    }

    changes.push(Change::DeleteUser(user_id));
    Ok(changes)
}
