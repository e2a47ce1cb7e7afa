// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Booking lifecycle.
//!
//! ```text
//! pending_approval --approve--> pending_payment --settle--> confirmed
//!        |                            |
//!        +--reject--> rejected <------+ (competing booking settled)
//! ```
//!
//! Cancellation and deletion remove the record; there is no way out of
//! `confirmed`.

use crate::access::{require_admin, require_owner, require_tenant};
use crate::change::Change;
use crate::error::CoreError;
use crate::session::Session;
use crate::state::State;
use rentdesk_domain::{
    Apartment, ApartmentId, ApartmentStatus, Booking, BookingId, BookingStatus, PaymentStatus,
};
use time::{Date, OffsetDateTime};

/// Submits a booking request for an available apartment.
///
/// The booking's rent is the apartment's price at this moment and does not
/// follow later price edits. The apartment's status is not changed.
///
/// # Errors
///
/// Returns an error if:
/// - The session is not a tenant
/// - The apartment does not exist or is not `available`
/// - The tenant already has an open booking for the apartment
pub(crate) fn submit(
    state: &State,
    session: &Session,
    booking_id: BookingId,
    apartment_id: ApartmentId,
    lease_start: Date,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    require_tenant(session)?;
    state.user(session.user_id)?;
    let apartment: &Apartment = state.apartment(apartment_id)?;

    if !apartment.status.accepts_bookings() {
        return Err(CoreError::ApartmentUnavailable {
            apartment_id,
            status: apartment.status,
        });
    }

    let duplicate: bool = state
        .bookings_for_tenant(session.user_id)
        .any(|b| b.apartment_id == apartment_id && b.status.is_open());
    if duplicate {
        return Err(CoreError::Conflict(format!(
            "tenant already has an open booking for apartment {apartment_id}"
        )));
    }

    let booking: Booking = Booking {
        id: booking_id,
        apartment_id,
        tenant_id: session.user_id,
        status: BookingStatus::PendingApproval,
        lease_start,
        monthly_rent: apartment.price,
        created_at: at,
        approved_at: None,
        approved_by: None,
    };
    Ok(vec![Change::PutBooking(booking)])
}

/// Approves a booking awaiting review.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidTransition` unless the
/// booking is `pending_approval`.
pub(crate) fn approve(
    state: &State,
    session: &Session,
    booking_id: BookingId,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    let booking: &Booking = state.booking(booking_id)?;

    let mut approved: Booking = booking
        .transition_to(BookingStatus::PendingPayment)
        .map_err(|e| CoreError::from_transition("booking", booking_id, e))?;
    approved.approved_at = Some(at);
    approved.approved_by = Some(session.user_id);

    Ok(vec![Change::PutBooking(approved)])
}

/// Rejects a booking awaiting review.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidTransition` unless the
/// booking is `pending_approval`.
pub(crate) fn reject(
    state: &State,
    session: &Session,
    booking_id: BookingId,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    let booking: &Booking = state.booking(booking_id)?;

    if booking.status != BookingStatus::PendingApproval {
        return Err(CoreError::InvalidTransition {
            entity: "booking",
            id: booking_id.to_string(),
            from: booking.status.as_str().to_string(),
            to: BookingStatus::Rejected.as_str().to_string(),
        });
    }
    let rejected: Booking = booking
        .transition_to(BookingStatus::Rejected)
        .map_err(|e| CoreError::from_transition("booking", booking_id, e))?;

    Ok(vec![Change::PutBooking(rejected)])
}

/// Confirms a paid booking.
///
/// The booking becomes `confirmed`, its apartment becomes `occupied`, and
/// every other open booking on that apartment is rejected. The returned
/// changes must be committed together.
///
/// # Errors
///
/// Returns `InvalidTransition` unless the booking is `pending_payment`, and
/// `Conflict` if the apartment already has a confirmed lease.
pub(crate) fn settle_booking(
    state: &State,
    booking_id: BookingId,
) -> Result<Vec<Change>, CoreError> {
    let booking: &Booking = state.booking(booking_id)?;
    let confirmed: Booking = booking
        .transition_to(BookingStatus::Confirmed)
        .map_err(|e| CoreError::from_transition("booking", booking_id, e))?;

    let apartment: &Apartment = state.apartment(booking.apartment_id)?;
    if let Some(holder) = state
        .bookings_for_apartment(apartment.id)
        .find(|b| b.status == BookingStatus::Confirmed)
    {
        return Err(CoreError::Conflict(format!(
            "apartment {} is already leased under booking {}",
            apartment.id, holder.id
        )));
    }

    let mut changes: Vec<Change> = vec![
        Change::PutBooking(confirmed),
        Change::PutApartment(Apartment {
            status: ApartmentStatus::Occupied,
            ..apartment.clone()
        }),
    ];

    for competitor in state
        .bookings_for_apartment(apartment.id)
        .filter(|b| b.id != booking_id && b.status.is_open())
    {
        let rejected: Booking = competitor
            .transition_to(BookingStatus::Rejected)
            .map_err(|e| CoreError::from_transition("booking", competitor.id, e))?;
        changes.push(Change::PutBooking(rejected));
    }

    Ok(changes)
}

/// Deletes the payment attempts of a booking about to be removed.
///
/// # Errors
///
/// Returns `Conflict` if an attempt is still pending or completed.
fn release_payments(state: &State, booking: &Booking) -> Result<Vec<Change>, CoreError> {
    let mut changes: Vec<Change> = Vec::new();
    for payment in state.payments_for_booking(booking.id) {
        if payment.status != PaymentStatus::Failed {
            return Err(CoreError::Conflict(format!(
                "booking {} has a {} payment {}",
                booking.id, payment.status, payment.id
            )));
        }
        changes.push(Change::DeletePayment(payment.id));
    }
    Ok(changes)
}

/// Cancels one's own open booking. Cancellation removes the record.
///
/// # Errors
///
/// Returns an error if:
/// - The session is not the booking's tenant (`Forbidden`)
/// - The booking is not open (`InvalidTransition`)
/// - A payment for the booking is awaiting its outcome (`Conflict`)
pub(crate) fn cancel(
    state: &State,
    session: &Session,
    booking_id: BookingId,
) -> Result<Vec<Change>, CoreError> {
    let booking: &Booking = state.booking(booking_id)?;
    require_owner(session, booking.tenant_id, "booking")?;

    if !booking.status.is_open() {
        return Err(CoreError::InvalidTransition {
            entity: "booking",
            id: booking_id.to_string(),
            from: booking.status.as_str().to_string(),
            to: BookingStatus::Cancelled.as_str().to_string(),
        });
    }

    let mut changes: Vec<Change> = release_payments(state, booking)?;
    changes.push(Change::DeleteBooking(booking_id));
    Ok(changes)
}

/// Deletes any booking that is not a confirmed lease.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `InvalidTransition` for confirmed
/// bookings, and `Conflict` while a payment is pending.
pub(crate) fn delete(
    state: &State,
    session: &Session,
    booking_id: BookingId,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    let booking: &Booking = state.booking(booking_id)?;

    if booking.status == BookingStatus::Confirmed {
        return Err(CoreError::InvalidTransition {
            entity: "booking",
            id: booking_id.to_string(),
            from: booking.status.as_str().to_string(),
            to: String::from("deleted"),
        });
    }

    let mut changes: Vec<Change> = release_payments(state, booking)?;
    changes.push(Change::DeleteBooking(booking_id));
    Ok(changes)
}

/// Deletes every booking in one of `statuses`.
///
/// Bookings with a payment awaiting its outcome are left in place.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidTransition` if
/// `confirmed` is among the statuses.
pub(crate) fn purge_by_status(
    state: &State,
    session: &Session,
    statuses: &[BookingStatus],
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    if statuses.contains(&BookingStatus::Confirmed) {
        return Err(CoreError::InvalidTransition {
            entity: "booking",
            id: String::from("*"),
            from: BookingStatus::Confirmed.as_str().to_string(),
            to: String::from("deleted"),
        });
    }

    let mut changes: Vec<Change> = Vec::new();
    for booking in state
        .bookings()
        .into_iter()
        .filter(|b| statuses.contains(&b.status))
    {
        if let Ok(released) = release_payments(state, booking) {
            changes.extend(released);
            changes.push(Change::DeleteBooking(booking.id));
        }
    }
    Ok(changes)
}
