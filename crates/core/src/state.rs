// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! The in-memory record store.
//!
//! Records are owned by the store and reached only by id. Secondary indices
//! keep bookings per apartment and per tenant, payments per booking, payout
//! accounts per admin and saved payment methods per tenant, each in
//! insertion order.

use crate::change::Change;
use crate::error::CoreError;
use rentdesk_audit::AuditEvent;
use rentdesk_domain::{
    Apartment, ApartmentId, Booking, BookingId, ContactInfo, Payment, PaymentId, PaymentMethod,
    PaymentMethodId, PaymentStatus, PayoutAccount, PayoutAccountId, SavedPaymentMethod, User,
    UserId, normalize_email,
};
use std::collections::BTreeMap;

/// The complete set of records.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct State {
    users: BTreeMap<UserId, User>,
    apartments: BTreeMap<ApartmentId, Apartment>,
    bookings: BTreeMap<BookingId, Booking>,
    payments: BTreeMap<PaymentId, Payment>,
    payout_accounts: BTreeMap<PayoutAccountId, PayoutAccount>,
    saved_methods: BTreeMap<PaymentMethodId, SavedPaymentMethod>,
    contact: ContactInfo,
    bookings_by_apartment: BTreeMap<ApartmentId, Vec<BookingId>>,
    bookings_by_tenant: BTreeMap<UserId, Vec<BookingId>>,
    payments_by_booking: BTreeMap<BookingId, Vec<PaymentId>>,
    accounts_by_admin: BTreeMap<UserId, Vec<PayoutAccountId>>,
    methods_by_tenant: BTreeMap<UserId, Vec<PaymentMethodId>>,
}

/// Removes `id` from the index list under `key`, dropping empty lists.
fn unindex<K: Ord, V: PartialEq>(index: &mut BTreeMap<K, Vec<V>>, key: &K, id: &V) {
    if let Some(ids) = index.get_mut(key) {
        ids.retain(|existing| existing != id);
        if ids.is_empty() {
            index.remove(key);
        }
    }
}

/// Sorts records by creation time, then id, for stable listings.
fn by_creation<'a, T: 'a, K: Ord>(
    records: impl Iterator<Item = &'a T>,
    key: impl Fn(&T) -> K,
) -> Vec<&'a T> {
    let mut sorted: Vec<&T> = records.collect();
    sorted.sort_by_key(|record| key(record));
    sorted
}

impl State {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuilds a store from records in stored order.
    ///
    /// Index order follows the order records are supplied in, so callers
    /// loading from persistence must pass them in insertion order. Missing
    /// contact details fall back to the defaults.
    #[must_use]
    pub fn from_records(
        users: Vec<User>,
        apartments: Vec<Apartment>,
        bookings: Vec<Booking>,
        payments: Vec<Payment>,
        payout_accounts: Vec<PayoutAccount>,
        saved_methods: Vec<SavedPaymentMethod>,
        contact: Option<ContactInfo>,
    ) -> Self {
        let mut state: Self = Self::new();
        let changes = users
            .into_iter()
            .map(Change::PutUser)
            .chain(apartments.into_iter().map(Change::PutApartment))
            .chain(bookings.into_iter().map(Change::PutBooking))
            .chain(payments.into_iter().map(Change::PutPayment))
            .chain(payout_accounts.into_iter().map(Change::PutPayoutAccount))
            .chain(saved_methods.into_iter().map(Change::PutSavedMethod))
            .chain(contact.into_iter().map(Change::PutContactInfo));
        for change in changes {
            state.apply_change(change);
        }
        state
    }

    /// Applies an ordered list of changes.
    pub fn apply_changes(&mut self, changes: &[Change]) {
        for change in changes {
            self.apply_change(change.clone());
        }
    }

    fn apply_change(&mut self, change: Change) {
        match change {
            Change::PutUser(user) => {
                self.users.insert(user.id, user);
            }
            Change::DeleteUser(id) => {
                self.users.remove(&id);
            }
            Change::PutApartment(apartment) => {
                self.apartments.insert(apartment.id, apartment);
            }
            Change::DeleteApartment(id) => {
                self.apartments.remove(&id);
            }
            Change::PutBooking(booking) => {
                if !self.bookings.contains_key(&booking.id) {
                    self.bookings_by_apartment
                        .entry(booking.apartment_id)
                        .or_default()
                        .push(booking.id);
                    self.bookings_by_tenant
                        .entry(booking.tenant_id)
                        .or_default()
                        .push(booking.id);
                }
                self.bookings.insert(booking.id, booking);
            }
            Change::DeleteBooking(id) => {
                if let Some(booking) = self.bookings.remove(&id) {
                    unindex(&mut self.bookings_by_apartment, &booking.apartment_id, &id);
                    unindex(&mut self.bookings_by_tenant, &booking.tenant_id, &id);
                    self.payments_by_booking.remove(&id);
                }
            }
            Change::PutPayment(payment) => {
                if !self.payments.contains_key(&payment.id) {
                    self.payments_by_booking
                        .entry(payment.booking_id)
                        .or_default()
                        .push(payment.id);
                }
                self.payments.insert(payment.id, payment);
            }
            Change::DeletePayment(id) => {
                if let Some(payment) = self.payments.remove(&id) {
                    unindex(&mut self.payments_by_booking, &payment.booking_id, &id);
                }
            }
            Change::PutPayoutAccount(account) => {
                if !self.payout_accounts.contains_key(&account.id) {
                    self.accounts_by_admin
                        .entry(account.admin_id)
                        .or_default()
                        .push(account.id);
                }
                self.payout_accounts.insert(account.id, account);
            }
            Change::DeletePayoutAccount(id) => {
                if let Some(account) = self.payout_accounts.remove(&id) {
                    unindex(&mut self.accounts_by_admin, &account.admin_id, &id);
                }
            }
            Change::PutSavedMethod(method) => {
                if !self.saved_methods.contains_key(&method.id) {
                    self.methods_by_tenant
                        .entry(method.tenant_id)
                        .or_default()
                        .push(method.id);
                }
                self.saved_methods.insert(method.id, method);
            }
            Change::DeleteSavedMethod(id) => {
                if let Some(method) = self.saved_methods.remove(&id) {
                    unindex(&mut self.methods_by_tenant, &method.tenant_id, &id);
                }
            }
            Change::PutContactInfo(contact) => {
                self.contact = contact;
            }
        }
    }

    // ========================================================================
    // Lookups
    // ========================================================================

    /// Looks up a user.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the user does not exist.
    pub fn user(&self, id: UserId) -> Result<&User, CoreError> {
        self.users
            .get(&id)
            .ok_or_else(|| CoreError::not_found("user", id))
    }

    /// Looks up an apartment.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the apartment does not exist.
    pub fn apartment(&self, id: ApartmentId) -> Result<&Apartment, CoreError> {
        self.apartments
            .get(&id)
            .ok_or_else(|| CoreError::not_found("apartment", id))
    }

    /// Looks up a booking.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the booking does not exist.
    pub fn booking(&self, id: BookingId) -> Result<&Booking, CoreError> {
        self.bookings
            .get(&id)
            .ok_or_else(|| CoreError::not_found("booking", id))
    }

    /// Looks up a payment.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the payment does not exist.
    pub fn payment(&self, id: PaymentId) -> Result<&Payment, CoreError> {
        self.payments
            .get(&id)
            .ok_or_else(|| CoreError::not_found("payment", id))
    }

    /// Looks up a payout account.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the account does not exist.
    pub fn payout_account(&self, id: PayoutAccountId) -> Result<&PayoutAccount, CoreError> {
        self.payout_accounts
            .get(&id)
            .ok_or_else(|| CoreError::not_found("payout account", id))
    }

    /// Looks up a saved payment method.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::NotFound` if the method does not exist.
    pub fn saved_method(&self, id: PaymentMethodId) -> Result<&SavedPaymentMethod, CoreError> {
        self.saved_methods
            .get(&id)
            .ok_or_else(|| CoreError::not_found("payment method", id))
    }

    /// The organisation's contact details.
    #[must_use]
    pub const fn contact(&self) -> &ContactInfo {
        &self.contact
    }

    /// Finds a user by email, ignoring case and surrounding whitespace.
    #[must_use]
    pub fn find_user_by_email(&self, email: &str) -> Option<&User> {
        let email: String = normalize_email(email);
        self.users.values().find(|user| user.email == email)
    }

    // ========================================================================
    // Indexed access
    // ========================================================================

    /// Bookings for an apartment, in submission order.
    pub fn bookings_for_apartment(
        &self,
        apartment_id: ApartmentId,
    ) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings_by_apartment
            .get(&apartment_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.bookings.get(id))
    }

    /// Bookings made by a tenant, in submission order.
    pub fn bookings_for_tenant(&self, tenant_id: UserId) -> impl Iterator<Item = &Booking> + '_ {
        self.bookings_by_tenant
            .get(&tenant_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.bookings.get(id))
    }

    /// Payments recorded against a booking, in attempt order.
    pub fn payments_for_booking(
        &self,
        booking_id: BookingId,
    ) -> impl Iterator<Item = &Payment> + '_ {
        self.payments_by_booking
            .get(&booking_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.payments.get(id))
    }

    /// Returns true if a payment for the booking is still awaiting an outcome.
    #[must_use]
    pub fn has_pending_payment(&self, booking_id: BookingId) -> bool {
        self.payments_for_booking(booking_id)
            .any(|payment| payment.status == PaymentStatus::Pending)
    }

    /// An admin's payout accounts, in stored order.
    pub fn accounts_for_admin(
        &self,
        admin_id: UserId,
    ) -> impl Iterator<Item = &PayoutAccount> + '_ {
        self.accounts_by_admin
            .get(&admin_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.payout_accounts.get(id))
    }

    /// An admin's default payout account, if any.
    #[must_use]
    pub fn default_account(&self, admin_id: UserId) -> Option<&PayoutAccount> {
        self.accounts_for_admin(admin_id)
            .find(|account| account.is_default)
    }

    /// A tenant's saved payment methods, in stored order.
    pub fn methods_for_tenant(
        &self,
        tenant_id: UserId,
    ) -> impl Iterator<Item = &SavedPaymentMethod> + '_ {
        self.methods_by_tenant
            .get(&tenant_id)
            .into_iter()
            .flatten()
            .filter_map(|id| self.saved_methods.get(id))
    }

    /// A tenant's default saved payment method, if any.
    #[must_use]
    pub fn default_method(&self, tenant_id: UserId) -> Option<&SavedPaymentMethod> {
        self.methods_for_tenant(tenant_id)
            .find(|method| method.is_default)
    }

    /// The saved method to pay with: the default if it is of the requested
    /// kind, otherwise the first saved method of that kind.
    #[must_use]
    pub fn preferred_method(
        &self,
        tenant_id: UserId,
        kind: PaymentMethod,
    ) -> Option<&SavedPaymentMethod> {
        self.default_method(tenant_id)
            .filter(|method| method.details.method() == kind)
            .or_else(|| {
                self.methods_for_tenant(tenant_id)
                    .find(|method| method.details.method() == kind)
            })
    }

    /// Number of admin users.
    #[must_use]
    pub fn admin_count(&self) -> usize {
        self.users.values().filter(|user| user.is_admin()).count()
    }

    // ========================================================================
    // Listings
    // ========================================================================

    /// All users, oldest first.
    #[must_use]
    pub fn users(&self) -> Vec<&User> {
        by_creation(self.users.values(), |u| (u.created_at, u.id))
    }

    /// All apartments, oldest first.
    #[must_use]
    pub fn apartments(&self) -> Vec<&Apartment> {
        by_creation(self.apartments.values(), |a| (a.created_at, a.id))
    }

    /// All bookings, oldest first.
    #[must_use]
    pub fn bookings(&self) -> Vec<&Booking> {
        by_creation(self.bookings.values(), |b| (b.created_at, b.id))
    }

    /// All payments, oldest first.
    #[must_use]
    pub fn payments(&self) -> Vec<&Payment> {
        by_creation(self.payments.values(), |p| (p.created_at, p.id))
    }

    /// All saved payment methods grouped by tenant, each group in stored
    /// order.
    #[must_use]
    pub fn saved_methods(&self) -> Vec<&SavedPaymentMethod> {
        self.methods_by_tenant
            .values()
            .flatten()
            .filter_map(|id| self.saved_methods.get(id))
            .collect()
    }

    /// All payout accounts grouped by admin, each group in stored order.
    #[must_use]
    pub fn payout_accounts(&self) -> Vec<&PayoutAccount> {
        self.accounts_by_admin
            .values()
            .flatten()
            .filter_map(|id| self.payout_accounts.get(id))
            .collect()
    }
}

/// The result of a successful state transition.
///
/// Transitions are atomic: they either succeed completely or fail without
/// side effects. `changes` is what `new_state` differs from the input by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionResult {
    /// The new state after the transition.
    pub new_state: State,
    /// The record writes, in application order.
    pub changes: Vec<Change>,
    /// The audit event recording this transition.
    pub audit_event: AuditEvent,
}
