// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::state::State;
use rentdesk_domain::{ApartmentStatus, BookingStatus, Decimal, PaymentStatus, UserId};
use std::collections::BTreeSet;

/// Summary figures for the admin dashboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DashboardStats {
    /// Number of listed apartments.
    pub total_apartments: usize,
    /// Apartments under a confirmed lease.
    pub occupied_apartments: usize,
    /// Apartments open for booking.
    pub available_apartments: usize,
    /// Distinct tenants holding a confirmed booking.
    pub active_tenants: usize,
    /// Bookings awaiting admin review.
    pub pending_approvals: usize,
    /// Sum of completed payments.
    pub revenue: Decimal,
}

/// Computes dashboard figures from the current state.
#[must_use]
pub fn dashboard_stats(state: &State) -> DashboardStats {
    let apartments = state.apartments();
    let count_status = |status: ApartmentStatus| -> usize {
        apartments.iter().filter(|a| a.status == status).count()
    };

    let bookings = state.bookings();
    let active_tenants: BTreeSet<UserId> = bookings
        .iter()
        .filter(|b| b.status == BookingStatus::Confirmed)
        .map(|b| b.tenant_id)
        .collect();

    DashboardStats {
        total_apartments: apartments.len(),
        occupied_apartments: count_status(ApartmentStatus::Occupied),
        available_apartments: count_status(ApartmentStatus::Available),
        active_tenants: active_tenants.len(),
        pending_approvals: bookings
            .iter()
            .filter(|b| b.status == BookingStatus::PendingApproval)
            .count(),
        revenue: state
            .payments()
            .into_iter()
            .filter(|p| p.status == PaymentStatus::Completed)
            .map(|p| p.amount)
            .sum(),
    }
}
