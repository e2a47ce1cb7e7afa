// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Read-only queries for the persistence layer.
//!
//! ## Module Organization
//!
//! - `records`: Loading the record store
//! - `audit`: Audit log queries
//! - `credentials`: Password hash and session lookups

pub mod audit;
pub mod credentials;
pub mod records;

pub use audit::{get_audit_event, list_audit_events};
pub use credentials::{get_credentials_by_email, get_session_by_token, verify_password};
pub use records::load_state;
