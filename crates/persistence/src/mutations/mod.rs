// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! State-changing operations for the persistence layer.
//!
//! ## Module Organization
//!
//! - `records`: Upserts and deletes for the five record tables
//! - `audit`: Audit event persistence
//! - `credentials`: Password hashes and sessions
//! - `transition`: Atomic persistence of a transition result

pub mod audit;
pub mod credentials;
pub mod records;
pub mod transition;

pub use credentials::{
    create_session, delete_expired_sessions, delete_session, delete_sessions_for_user,
    set_password, update_session_activity,
};
pub use transition::{persist_registration, persist_transition};
