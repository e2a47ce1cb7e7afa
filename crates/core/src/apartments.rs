// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::access::require_admin;
use crate::change::Change;
use crate::command::ApartmentListing;
use crate::error::CoreError;
use crate::session::Session;
use crate::state::State;
use rentdesk_domain::{
    Apartment, ApartmentId, ApartmentStatus, BookingStatus, validate_address,
    validate_apartment_name, validate_price, validate_room_counts,
};
use time::OffsetDateTime;

fn validate_listing(listing: &ApartmentListing) -> Result<(), CoreError> {
    validate_apartment_name(&listing.name)?;
    validate_address(&listing.address)?;
    validate_room_counts(listing.bedrooms, listing.bathrooms)?;
    validate_price(listing.price)?;
    Ok(())
}

fn has_confirmed_booking(state: &State, apartment_id: ApartmentId) -> bool {
    state
        .bookings_for_apartment(apartment_id)
        .any(|b| b.status == BookingStatus::Confirmed)
}

/// Lists a new apartment as `available`.
pub(crate) fn create(
    state: &State,
    session: &Session,
    apartment_id: ApartmentId,
    listing: ApartmentListing,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    validate_listing(&listing)?;
    if state.apartment(apartment_id).is_ok() {
        return Err(CoreError::Conflict(format!(
            "apartment {apartment_id} already exists"
        )));
    }

    Ok(vec![Change::PutApartment(Apartment {
        id: apartment_id,
        name: listing.name.trim().to_string(),
        description: listing.description,
        address: listing.address.trim().to_string(),
        bedrooms: listing.bedrooms,
        bathrooms: listing.bathrooms,
        price: listing.price,
        status: ApartmentStatus::Available,
        image_url: listing.image_url,
        created_at: at,
    })])
}

/// Replaces an apartment's listing fields.
///
/// Status is untouched, and existing bookings keep their rent.
pub(crate) fn update(
    state: &State,
    session: &Session,
    apartment_id: ApartmentId,
    listing: ApartmentListing,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    let apartment: &Apartment = state.apartment(apartment_id)?;
    validate_listing(&listing)?;

    Ok(vec![Change::PutApartment(Apartment {
        name: listing.name.trim().to_string(),
        description: listing.description,
        address: listing.address.trim().to_string(),
        bedrooms: listing.bedrooms,
        bathrooms: listing.bathrooms,
        price: listing.price,
        image_url: listing.image_url,
        ..apartment.clone()
    })])
}

/// Moves an apartment between `available` and `maintenance`.
///
/// `occupied` is reached only through a confirmed booking, and a leased
/// apartment keeps that status.
pub(crate) fn set_status(
    state: &State,
    session: &Session,
    apartment_id: ApartmentId,
    status: ApartmentStatus,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    let apartment: &Apartment = state.apartment(apartment_id)?;

    if status == ApartmentStatus::Occupied {
        return Err(CoreError::InvalidTransition {
            entity: "apartment",
            id: apartment_id.to_string(),
            from: apartment.status.as_str().to_string(),
            to: status.as_str().to_string(),
        });
    }
    if has_confirmed_booking(state, apartment_id) {
        return Err(CoreError::Conflict(format!(
            "apartment {apartment_id} is leased under a confirmed booking"
        )));
    }

    Ok(vec![Change::PutApartment(Apartment {
        status,
        ..apartment.clone()
    })])
}

/// Deletes an apartment together with its bookings.
///
/// Refused while the apartment is leased or a payment on it is pending.
pub(crate) fn delete(
    state: &State,
    session: &Session,
    apartment_id: ApartmentId,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    state.apartment(apartment_id)?;

    if has_confirmed_booking(state, apartment_id) {
        return Err(CoreError::Conflict(format!(
            "apartment {apartment_id} is leased under a confirmed booking"
        )));
    }

    let mut changes: Vec<Change> = Vec::new();
    for booking in state.bookings_for_apartment(apartment_id) {
        if state.has_pending_payment(booking.id) {
            return Err(CoreError::Conflict(format!(
                "booking {} on apartment {apartment_id} has a pending payment",
                booking.id
            )));
        }
        changes.extend(
            state
                .payments_for_booking(booking.id)
                .map(|payment| Change::DeletePayment(payment.id)),
        );
        changes.push(Change::DeleteBooking(booking.id));
    }
    changes.push(Change::DeleteApartment(apartment_id));
    Ok(changes)
}

/// Apartments open for booking, optionally with at least `min_bedrooms`.
#[must_use]
pub fn list_available(state: &State, min_bedrooms: Option<u8>) -> Vec<&Apartment> {
    state
        .apartments()
        .into_iter()
        .filter(|a| a.status.accepts_bookings())
        .filter(|a| min_bedrooms.is_none_or(|min| a.bedrooms >= min))
        .collect()
}
