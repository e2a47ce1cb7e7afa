// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Capability computation for authorization-aware UI gating.
//!
//! Capabilities expose what actions a user is permitted to perform
//! without leaking domain internals. They are advisory only and do not
//! replace the checks made when a command is applied.

use crate::request_response::{
    BookingCapabilities, Capability, GlobalCapabilities, UserCapabilities,
};
use rentdesk::{Session, State, can_delete_admin, can_delete_tenant, require_self_or_admin};
use rentdesk_domain::{Booking, BookingStatus, Role, User};

/// Computes global capabilities for a signed-in user.
///
/// Global capabilities depend only on the user's role.
#[must_use]
pub const fn compute_global_capabilities(session: &Session) -> GlobalCapabilities {
    match session.role {
        Role::Admin => GlobalCapabilities {
            can_manage_apartments: Capability::Allowed,
            can_review_bookings: Capability::Allowed,
            can_manage_users: Capability::Allowed,
            can_manage_payout_accounts: Capability::Allowed,
            can_view_dashboard: Capability::Allowed,
            can_edit_contact: Capability::Allowed,
            can_request_bookings: Capability::Denied,
            can_save_payment_methods: Capability::Denied,
        },
        Role::Tenant => GlobalCapabilities {
            can_manage_apartments: Capability::Denied,
            can_review_bookings: Capability::Denied,
            can_manage_users: Capability::Denied,
            can_manage_payout_accounts: Capability::Denied,
            can_view_dashboard: Capability::Denied,
            can_edit_contact: Capability::Denied,
            can_request_bookings: Capability::Allowed,
            can_save_payment_methods: Capability::Allowed,
        },
    }
}

/// Computes what a signed-in user may do to another user.
///
/// Deletion mirrors the rules applied on delete: admins cannot delete
/// themselves or the last admin, and tenants holding a lease or a payment
/// in flight are protected.
#[must_use]
pub fn compute_user_capabilities(
    session: &Session,
    target: &User,
    state: &State,
) -> UserCapabilities {
    let can_edit: bool = require_self_or_admin(session, target.id).is_ok();

    let can_delete: bool = session.is_admin()
        && match target.role {
            Role::Admin => {
                can_delete_admin(session.user_id, target.id, state.admin_count()).is_ok()
            }
            Role::Tenant => can_delete_tenant(state, target.id).is_ok(),
        };

    UserCapabilities {
        can_edit: Capability::from_bool(can_edit),
        can_delete: Capability::from_bool(can_delete),
    }
}

/// Computes what a signed-in user may do to a booking.
#[must_use]
pub fn compute_booking_capabilities(
    session: &Session,
    booking: &Booking,
    state: &State,
) -> BookingCapabilities {
    let is_owner: bool = session.user_id == booking.tenant_id;
    let awaiting_review: bool = booking.status == BookingStatus::PendingApproval;
    let payment_in_flight: bool = state.has_pending_payment(booking.id);

    let can_review: bool = session.is_admin() && awaiting_review;
    let can_cancel: bool = is_owner && booking.status.is_open() && !payment_in_flight;
    let can_pay: bool =
        is_owner && booking.status == BookingStatus::PendingPayment && !payment_in_flight;
    let can_delete: bool =
        session.is_admin() && booking.status != BookingStatus::Confirmed && !payment_in_flight;

    BookingCapabilities {
        can_approve: Capability::from_bool(can_review),
        can_reject: Capability::from_bool(can_review),
        can_cancel: Capability::from_bool(can_cancel),
        can_pay: Capability::from_bool(can_pay),
        can_delete: Capability::from_bool(can_delete),
    }
}
