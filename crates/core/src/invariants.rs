// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Store-wide consistency checks.
//!
//! Every command preserves these; the checker exists so tests and the
//! startup load can confirm it.

use crate::state::State;
use rentdesk_domain::{
    ApartmentId, ApartmentStatus, BookingId, BookingStatus, PaymentId, PaymentStatus, UserId,
};
use std::collections::BTreeMap;

/// A broken store-wide invariant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InvariantViolation {
    /// A confirmed booking's apartment is not occupied.
    ConfirmedBookingNotOccupied {
        /// The booking.
        booking_id: BookingId,
        /// The apartment's actual status.
        status: ApartmentStatus,
    },
    /// An apartment has more than one confirmed booking.
    MultipleConfirmedBookings {
        /// The apartment.
        apartment_id: ApartmentId,
        /// How many confirmed bookings it has.
        count: usize,
    },
    /// An admin with payout accounts does not have exactly one default.
    DefaultAccountCount {
        /// The admin.
        admin_id: UserId,
        /// How many defaults they have.
        defaults: usize,
    },
    /// A tenant with saved payment methods does not have exactly one default.
    DefaultMethodCount {
        /// The tenant.
        tenant_id: UserId,
        /// How many defaults they have.
        defaults: usize,
    },
    /// A completed payment's booking is not confirmed.
    CompletedPaymentUnconfirmed {
        /// The payment.
        payment_id: PaymentId,
    },
    /// Users exist but none of them is an admin.
    NoAdmin,
}

impl std::fmt::Display for InvariantViolation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::ConfirmedBookingNotOccupied { booking_id, status } => write!(
                f,
                "booking {booking_id} is confirmed but its apartment is {status}"
            ),
            Self::MultipleConfirmedBookings {
                apartment_id,
                count,
            } => write!(
                f,
                "apartment {apartment_id} has {count} confirmed bookings"
            ),
            Self::DefaultAccountCount { admin_id, defaults } => write!(
                f,
                "admin {admin_id} has {defaults} default payout accounts"
            ),
            Self::DefaultMethodCount { tenant_id, defaults } => write!(
                f,
                "tenant {tenant_id} has {defaults} default payment methods"
            ),
            Self::CompletedPaymentUnconfirmed { payment_id } => write!(
                f,
                "payment {payment_id} is completed but its booking is not confirmed"
            ),
            Self::NoAdmin => write!(f, "no admin user exists"),
        }
    }
}

impl std::error::Error for InvariantViolation {}

/// Verifies every store-wide invariant.
///
/// # Errors
///
/// Returns the first violation found.
pub fn verify_invariants(state: &State) -> Result<(), InvariantViolation> {
    let mut confirmed_per_apartment: BTreeMap<ApartmentId, usize> = BTreeMap::new();
    for booking in state.bookings() {
        if booking.status != BookingStatus::Confirmed {
            continue;
        }
        *confirmed_per_apartment
            .entry(booking.apartment_id)
            .or_default() += 1;

        if let Ok(apartment) = state.apartment(booking.apartment_id)
            && apartment.status != ApartmentStatus::Occupied
        {
            return Err(InvariantViolation::ConfirmedBookingNotOccupied {
                booking_id: booking.id,
                status: apartment.status,
            });
        }
    }

    if let Some((apartment_id, count)) = confirmed_per_apartment
        .into_iter()
        .find(|(_, count)| *count > 1)
    {
        return Err(InvariantViolation::MultipleConfirmedBookings {
            apartment_id,
            count,
        });
    }

    for user in state.users() {
        let accounts: usize = state.accounts_for_admin(user.id).count();
        let defaults: usize = state
            .accounts_for_admin(user.id)
            .filter(|a| a.is_default)
            .count();
        let expected: usize = usize::from(accounts > 0);
        if defaults != expected {
            return Err(InvariantViolation::DefaultAccountCount {
                admin_id: user.id,
                defaults,
            });
        }

        let methods: usize = state.methods_for_tenant(user.id).count();
        let defaults: usize = state
            .methods_for_tenant(user.id)
            .filter(|m| m.is_default)
            .count();
        if defaults != usize::from(methods > 0) {
            return Err(InvariantViolation::DefaultMethodCount {
                tenant_id: user.id,
                defaults,
            });
        }
    }

    for payment in state.payments() {
        if payment.status != PaymentStatus::Completed {
            continue;
        }
        let confirmed: bool = state
            .booking(payment.booking_id)
            .is_ok_and(|b| b.status == BookingStatus::Confirmed);
        if !confirmed {
            return Err(InvariantViolation::CompletedPaymentUnconfirmed {
                payment_id: payment.id,
            });
        }
    }

    if !state.users().is_empty() && state.admin_count() == 0 {
        return Err(InvariantViolation::NoAdmin);
    }

    Ok(())
}
