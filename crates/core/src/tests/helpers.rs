// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::{
    ApartmentListing, Command, CoreError, Registration, Session, State, TransitionResult, apply,
    apply_registration, verify_invariants,
};
use rentdesk_audit::Cause;
use rentdesk_domain::{
    AccountDetails, ApartmentId, BookingId, Decimal, PaymentId, PaymentMethod, PayoutAccountId,
    PeriodMonth, Role, UserId,
};
use time::macros::{date, datetime};
use time::{Duration, OffsetDateTime};

pub fn create_test_cause() -> Cause {
    Cause::new(String::from("req-456"), String::from("Test request"))
}

pub fn create_test_listing(price: i64) -> ApartmentListing {
    ApartmentListing {
        name: String::from("Garden View 2B"),
        description: String::from("Two bedroom flat near the park"),
        address: String::from("12 Ngong Road, Nairobi"),
        bedrooms: 2,
        bathrooms: 1,
        price: Decimal::new(price, 0),
        image_url: None,
    }
}

pub fn create_mobile_money_details() -> AccountDetails {
    AccountDetails::MobileMoney {
        phone: String::from("0712345678"),
    }
}

/// Drives the store through commands the way a request handler would,
/// checking every invariant after each successful command.
pub struct Fixture {
    pub state: State,
    pub admin: Session,
    minutes: i64,
    registered: usize,
}

impl Fixture {
    /// A store with one admin and nothing else.
    pub fn new() -> Self {
        let mut fixture = Self {
            state: State::new(),
            admin: Session::new(UserId::generate(), Role::Admin),
            minutes: 0,
            registered: 0,
        };
        let admin_id: UserId = fixture.admin.user_id;
        fixture.register(None, admin_id, Role::Admin);
        fixture
    }

    /// Advances the clock one minute and returns the new time.
    pub fn tick(&mut self) -> OffsetDateTime {
        self.minutes += 1;
        datetime!(2026-01-05 09:00 UTC) + Duration::minutes(self.minutes)
    }

    fn register(&mut self, requester: Option<Session>, user_id: UserId, role: Role) {
        self.registered += 1;
        let registration = Registration {
            user_id,
            email: format!("user{}@example.com", self.registered),
            full_name: format!("User {}", self.registered),
            phone: None,
            role,
        };
        let at: OffsetDateTime = self.tick();
        let result: TransitionResult = apply_registration(
            &self.state,
            registration,
            requester.as_ref(),
            create_test_cause(),
            at,
        )
        .unwrap();
        verify_invariants(&result.new_state).unwrap();
        self.state = result.new_state;
    }

    /// Applies a command; on success the fixture moves to the new state.
    pub fn run(
        &mut self,
        session: &Session,
        command: Command,
    ) -> Result<TransitionResult, CoreError> {
        let at: OffsetDateTime = self.tick();
        let result: TransitionResult =
            apply(&self.state, command, session, create_test_cause(), at)?;
        verify_invariants(&result.new_state).unwrap();
        self.state = result.new_state.clone();
        Ok(result)
    }

    pub fn register_tenant(&mut self) -> Session {
        let session = Session::new(UserId::generate(), Role::Tenant);
        self.register(None, session.user_id, Role::Tenant);
        session
    }

    pub fn register_admin(&mut self) -> Session {
        let session = Session::new(UserId::generate(), Role::Admin);
        let admin: Session = self.admin;
        self.register(Some(admin), session.user_id, Role::Admin);
        session
    }

    pub fn create_apartment(&mut self, price: i64) -> ApartmentId {
        let apartment_id = ApartmentId::generate();
        let admin: Session = self.admin;
        self.run(
            &admin,
            Command::CreateApartment {
                apartment_id,
                listing: create_test_listing(price),
            },
        )
        .unwrap();
        apartment_id
    }

    pub fn add_payout_account(&mut self, admin: &Session) -> PayoutAccountId {
        let account_id = PayoutAccountId::generate();
        self.run(
            admin,
            Command::AddPayoutAccount {
                account_id,
                details: create_mobile_money_details(),
            },
        )
        .unwrap();
        account_id
    }

    pub fn submit(&mut self, tenant: &Session, apartment_id: ApartmentId) -> BookingId {
        let booking_id = BookingId::generate();
        self.run(
            tenant,
            Command::SubmitBooking {
                booking_id,
                apartment_id,
                lease_start: date!(2026 - 02 - 01),
            },
        )
        .unwrap();
        booking_id
    }

    pub fn approve(&mut self, booking_id: BookingId) {
        let admin: Session = self.admin;
        self.run(&admin, Command::ApproveBooking { booking_id })
            .unwrap();
    }

    /// Submits and approves a booking, leaving it `pending_payment`.
    pub fn approved_booking(&mut self, tenant: &Session, apartment_id: ApartmentId) -> BookingId {
        let booking_id: BookingId = self.submit(tenant, apartment_id);
        self.approve(booking_id);
        booking_id
    }

    pub fn attempt_command(&self, payment_id: PaymentId, booking_id: BookingId) -> Command {
        let amount: Decimal = self.state.booking(booking_id).unwrap().monthly_rent;
        Command::RecordPaymentAttempt {
            payment_id,
            booking_id,
            amount,
            method: PaymentMethod::MobileMoney,
            period_month: PeriodMonth::new(2026, 2).unwrap(),
        }
    }

    pub fn record_attempt(&mut self, tenant: &Session, booking_id: BookingId) -> PaymentId {
        let payment_id = PaymentId::generate();
        let command: Command = self.attempt_command(payment_id, booking_id);
        self.run(tenant, command).unwrap();
        payment_id
    }

    pub fn settle_command(payment_id: PaymentId) -> Command {
        Command::SettlePayment {
            payment_id,
            receipt: Some(String::from("QJH7X2K9PL")),
            transaction_id: format!("txn-{payment_id}"),
        }
    }

    /// Pays and settles a booking, returning the payment.
    pub fn pay(&mut self, tenant: &Session, booking_id: BookingId) -> PaymentId {
        let payment_id: PaymentId = self.record_attempt(tenant, booking_id);
        self.run(tenant, Self::settle_command(payment_id)).unwrap();
        payment_id
    }
}
