// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

#![deny(
    clippy::pedantic,
    clippy::cargo,
    clippy::nursery,
    clippy::style,
    clippy::correctness,
    clippy::all,
    clippy::suspicious,
    clippy::complexity,
    clippy::perf,
    clippy::unwrap_used,
    clippy::expect_used
)]

mod access;
mod apartments;
mod apply;
mod change;
mod command;
mod contact;
mod error;
mod invariants;
mod ledger;
mod lifecycle;
mod payment_methods;
mod payouts;
mod session;
mod state;
mod stats;
mod users;

#[cfg(test)]
mod tests;

// Re-export public types and functions
pub use access::{
    can_delete_admin, can_delete_tenant, require_admin, require_self_or_admin,
};
pub use apartments::list_available;
pub use apply::{apply, apply_registration};
pub use change::Change;
pub use command::{ApartmentListing, Command, Reconciliation, Registration};
pub use error::CoreError;
pub use invariants::{InvariantViolation, verify_invariants};
pub use payouts::receiving_account;
pub use session::Session;
pub use state::{State, TransitionResult};
pub use stats::{DashboardStats, dashboard_stats};
