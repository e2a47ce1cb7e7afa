// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Role and ownership checks.
//!
//! Every authorization decision in the core goes through this module.

use crate::error::CoreError;
use crate::session::Session;
use crate::state::State;
use rentdesk_domain::{BookingStatus, UserId};

/// Requires the session to belong to an admin.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if the session's role is not admin.
pub fn require_admin(session: &Session) -> Result<(), CoreError> {
    if session.is_admin() {
        Ok(())
    } else {
        Err(CoreError::Forbidden(String::from(
            "this operation requires the admin role",
        )))
    }
}

/// Requires the session to belong to a tenant.
pub(crate) fn require_tenant(session: &Session) -> Result<(), CoreError> {
    if session.is_admin() {
        Err(CoreError::Forbidden(String::from(
            "this operation is only available to tenants",
        )))
    } else {
        Ok(())
    }
}

/// Requires the session to act on its own record, unless it is an admin.
///
/// # Errors
///
/// Returns `CoreError::Forbidden` if a non-admin targets another user.
pub fn require_self_or_admin(session: &Session, user_id: UserId) -> Result<(), CoreError> {
    if session.is_admin() || session.user_id == user_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(String::from(
            "users may only act on their own records",
        )))
    }
}

/// Requires the session to be the given record owner.
pub(crate) fn require_owner(
    session: &Session,
    owner_id: UserId,
    what: &str,
) -> Result<(), CoreError> {
    if session.user_id == owner_id {
        Ok(())
    } else {
        Err(CoreError::Forbidden(format!(
            "only the owner may act on this {what}"
        )))
    }
}

/// Checks whether an admin account may be deleted.
///
/// Both rules always apply: an admin can never delete themselves, and the
/// last admin can never be deleted.
///
/// # Arguments
///
/// * `actor` - The admin performing the deletion
/// * `target` - The admin to be deleted
/// * `admin_count` - Current number of admins, including the target
///
/// # Errors
///
/// Returns `CoreError::Forbidden` for self-deletion and
/// `CoreError::Conflict` when the target is the last admin.
pub fn can_delete_admin(
    actor: UserId,
    target: UserId,
    admin_count: usize,
) -> Result<(), CoreError> {
    if actor == target {
        return Err(CoreError::Forbidden(String::from(
            "admins cannot delete their own account",
        )));
    }
    if admin_count <= 1 {
        return Err(CoreError::Conflict(String::from(
            "cannot delete the last remaining admin",
        )));
    }
    Ok(())
}

/// Checks whether a tenant may be deleted.
///
/// A tenant holding a confirmed lease is protected, as is a tenant with a
/// payment still awaiting its outcome.
///
/// # Errors
///
/// Returns `CoreError::Conflict` if the tenant has a confirmed booking or a
/// pending payment.
pub fn can_delete_tenant(state: &State, tenant_id: UserId) -> Result<(), CoreError> {
    for booking in state.bookings_for_tenant(tenant_id) {
        if booking.status == BookingStatus::Confirmed {
            return Err(CoreError::Conflict(format!(
                "tenant {tenant_id} holds confirmed booking {}",
                booking.id
            )));
        }
        if state.has_pending_payment(booking.id) {
            return Err(CoreError::Conflict(format!(
                "tenant {tenant_id} has a pending payment on booking {}",
                booking.id
            )));
        }
    }
    Ok(())
}
