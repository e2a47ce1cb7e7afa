// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use rentdesk_audit::Actor;
use rentdesk_domain::{Role, UserId};

/// The identity on whose behalf an operation runs.
///
/// Passed explicitly to every operation that needs an actor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Session {
    /// The signed-in user.
    pub user_id: UserId,
    /// The user's role at sign-in.
    pub role: Role,
}

impl Session {
    /// Creates a new session.
    #[must_use]
    pub const fn new(user_id: UserId, role: Role) -> Self {
        Self { user_id, role }
    }

    /// Returns true if the session belongs to an admin.
    #[must_use]
    pub const fn is_admin(&self) -> bool {
        self.role.is_admin()
    }

    /// The audit actor for this session.
    #[must_use]
    pub fn actor(&self) -> Actor {
        Actor::user(self.user_id, self.role)
    }
}
