// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

mod credential_tests;
mod record_tests;

use crate::Persistence;
use rentdesk::{
    ApartmentListing, Command, Registration, Session, State, TransitionResult, apply,
    apply_registration,
};
use rentdesk_audit::Cause;
use rentdesk_domain::{Decimal, Role, UserId};
use time::{Duration, OffsetDateTime};
use time::macros::datetime;

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("test-cause"), String::from("Test operation"))
}

pub fn create_test_listing() -> ApartmentListing {
    ApartmentListing {
        name: String::from("Riverside 4A"),
        description: String::from("Corner unit with balcony"),
        address: String::from("7 Riverside Drive, Nairobi"),
        bedrooms: 3,
        bathrooms: 2,
        price: Decimal::new(125_050, 2),
        image_url: Some(String::from("riverside-4a.jpg")),
    }
}

/// Applies commands to an in-memory store and writes every transition
/// through a fresh database.
pub struct Harness {
    pub persistence: Persistence,
    pub state: State,
    pub admin: Session,
    minutes: i64,
    registered: usize,
}

impl Harness {
    pub fn new() -> Self {
        let mut harness = Self {
            persistence: Persistence::new_in_memory().unwrap(),
            state: State::new(),
            admin: Session::new(UserId::generate(), Role::Admin),
            minutes: 0,
            registered: 0,
        };
        let admin_id: UserId = harness.admin.user_id;
        harness.register(admin_id, Role::Admin, "admin-password");
        harness
    }

    pub fn tick(&mut self) -> OffsetDateTime {
        self.minutes += 1;
        datetime!(2026-03-02 08:00 UTC) + Duration::minutes(self.minutes)
    }

    pub fn register(&mut self, user_id: UserId, role: Role, password: &str) -> i64 {
        self.registered += 1;
        let registration = Registration {
            user_id,
            email: format!("person{}@example.com", self.registered),
            full_name: format!("Person {}", self.registered),
            phone: Some(String::from("0711000000")),
            role,
        };
        let requester: Option<Session> = (role == Role::Admin && self.state.admin_count() > 0)
            .then_some(self.admin);
        let at: OffsetDateTime = self.tick();
        let result: TransitionResult = apply_registration(
            &self.state,
            registration,
            requester.as_ref(),
            create_test_cause(),
            at,
        )
        .unwrap();
        let event_id: i64 = self
            .persistence
            .persist_registration(&result, user_id, password)
            .unwrap();
        self.state = result.new_state;
        event_id
    }

    pub fn register_tenant(&mut self) -> Session {
        let session = Session::new(UserId::generate(), Role::Tenant);
        self.register(session.user_id, Role::Tenant, "tenant-password");
        session
    }

    /// Applies and persists a command, returning the transition and its
    /// audit event id.
    pub fn run(&mut self, session: &Session, command: Command) -> (TransitionResult, i64) {
        let at: OffsetDateTime = self.tick();
        let result: TransitionResult =
            apply(&self.state, command, session, create_test_cause(), at).unwrap();
        let event_id: i64 = self.persistence.persist_transition(&result).unwrap();
        self.state = result.new_state.clone();
        (result, event_id)
    }
}
