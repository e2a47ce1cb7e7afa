// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::change::Change;
use crate::command::{Command, Reconciliation, Registration};
use crate::error::CoreError;
use crate::ledger::{self, Attempt};
use crate::session::Session;
use crate::state::{State, TransitionResult};
use crate::{apartments, contact, lifecycle, payment_methods, payouts, users};
use rentdesk_audit::{Action, Actor, AuditEvent, Cause, Subject};
use rentdesk_domain::BookingStatus;
use time::OffsetDateTime;

/// Builds the transition result for a validated change list.
fn commit(
    state: &State,
    changes: Vec<Change>,
    actor: Actor,
    cause: Cause,
    action: Action,
    subject: Subject,
    at: OffsetDateTime,
) -> TransitionResult {
    let mut new_state: State = state.clone();
    new_state.apply_changes(&changes);
    TransitionResult {
        new_state,
        changes,
        audit_event: AuditEvent::new(actor, cause, action, subject, at),
    }
}

/// Applies a registration, producing the new state and audit event.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `registration` - The account to create
/// * `requester` - The signed-in admin, or `None` for self-registration
/// * `cause` - The cause or reason for this action
/// * `at` - The time the registration is applied
///
/// # Errors
///
/// Returns an error if the requester may not create the role or a field is
/// invalid.
pub fn apply_registration(
    state: &State,
    registration: Registration,
    requester: Option<&Session>,
    cause: Cause,
    at: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let user_id = registration.user_id;
    let role = registration.role;
    let actor: Actor = requester.map_or_else(Actor::system, Session::actor);

    let changes: Vec<Change> = users::register(state, requester, registration, at)?;
    let action: Action = Action::new(
        String::from("register_user"),
        Some(format!("Registered {role} {user_id}")),
    );
    Ok(commit(
        state,
        changes,
        actor,
        cause,
        action,
        Subject::new("user", user_id),
        at,
    ))
}

/// Applies a command to the current state.
///
/// This is a pure function: the input state is never mutated. On success
/// the result carries the new state, the record writes that produced it,
/// and exactly one audit event. On failure nothing changes.
///
/// # Arguments
///
/// * `state` - The current state (immutable)
/// * `command` - The command to apply
/// * `session` - The identity performing the command
/// * `cause` - The cause or reason for this action
/// * `at` - The time the command is applied
///
/// # Errors
///
/// Returns an error if the command violates a lifecycle, access or domain
/// rule.
#[allow(clippy::too_many_lines)]
pub fn apply(
    state: &State,
    command: Command,
    session: &Session,
    cause: Cause,
    at: OffsetDateTime,
) -> Result<TransitionResult, CoreError> {
    let (changes, name, subject, details): (Vec<Change>, &str, Subject, Option<String>) =
        match command {
            Command::UpdateProfile {
                user_id,
                full_name,
                phone,
            } => (
                users::update_profile(state, session, user_id, &full_name, phone)?,
                "update_profile",
                Subject::new("user", user_id),
                None,
            ),
            Command::DeleteUser { user_id } => {
                let role = state.user(user_id)?.role;
                (
                    users::delete(state, session, user_id)?,
                    "delete_user",
                    Subject::new("user", user_id),
                    Some(format!("Deleted {role} {user_id}")),
                )
            }
            Command::CreateApartment {
                apartment_id,
                listing,
            } => {
                let details: String = format!("Listed '{}' at {}", listing.name, listing.price);
                (
                    apartments::create(state, session, apartment_id, listing, at)?,
                    "create_apartment",
                    Subject::new("apartment", apartment_id),
                    Some(details),
                )
            }
            Command::UpdateApartment {
                apartment_id,
                listing,
            } => (
                apartments::update(state, session, apartment_id, listing)?,
                "update_apartment",
                Subject::new("apartment", apartment_id),
                None,
            ),
            Command::SetApartmentStatus {
                apartment_id,
                status,
            } => (
                apartments::set_status(state, session, apartment_id, status)?,
                "set_apartment_status",
                Subject::new("apartment", apartment_id),
                Some(format!("Status set to {status}")),
            ),
            Command::DeleteApartment { apartment_id } => (
                apartments::delete(state, session, apartment_id)?,
                "delete_apartment",
                Subject::new("apartment", apartment_id),
                None,
            ),
            Command::SubmitBooking {
                booking_id,
                apartment_id,
                lease_start,
            } => (
                lifecycle::submit(state, session, booking_id, apartment_id, lease_start, at)?,
                "submit_booking",
                Subject::new("booking", booking_id),
                Some(format!("Requested apartment {apartment_id} from {lease_start}")),
            ),
            Command::ApproveBooking { booking_id } => (
                lifecycle::approve(state, session, booking_id, at)?,
                "approve_booking",
                Subject::new("booking", booking_id),
                None,
            ),
            Command::RejectBooking { booking_id } => (
                lifecycle::reject(state, session, booking_id)?,
                "reject_booking",
                Subject::new("booking", booking_id),
                None,
            ),
            Command::CancelBooking { booking_id } => (
                lifecycle::cancel(state, session, booking_id)?,
                "cancel_booking",
                Subject::new("booking", booking_id),
                None,
            ),
            Command::DeleteBooking { booking_id } => (
                lifecycle::delete(state, session, booking_id)?,
                "delete_booking",
                Subject::new("booking", booking_id),
                None,
            ),
            Command::PurgeBookings { statuses } => {
                let changes: Vec<Change> = lifecycle::purge_by_status(state, session, &statuses)?;
                let removed: usize = changes
                    .iter()
                    .filter(|c| matches!(c, Change::DeleteBooking(_)))
                    .count();
                let names: Vec<&str> = statuses.iter().map(BookingStatus::as_str).collect();
                (
                    changes,
                    "purge_bookings",
                    Subject::new("booking", "*"),
                    Some(format!("Removed {removed} bookings ({})", names.join(", "))),
                )
            }
            Command::RecordPaymentAttempt {
                payment_id,
                booking_id,
                amount,
                method,
                period_month,
            } => {
                let attempt: Attempt = Attempt {
                    payment_id,
                    booking_id,
                    amount,
                    method,
                    period_month,
                };
                (
                    ledger::record_attempt(state, session, attempt, at)?,
                    "record_payment_attempt",
                    Subject::new("payment", payment_id),
                    Some(format!(
                        "{amount} by {} for {period_month} on booking {booking_id}",
                        method.as_str()
                    )),
                )
            }
            Command::SettlePayment {
                payment_id,
                receipt,
                transaction_id,
            } => {
                let details: String = format!("Transaction {transaction_id}");
                (
                    ledger::settle(state, session, payment_id, receipt, transaction_id, at)?,
                    "settle_payment",
                    Subject::new("payment", payment_id),
                    Some(details),
                )
            }
            Command::FailPayment { payment_id, reason } => {
                let details: String = reason.clone();
                (
                    ledger::fail(state, session, payment_id, reason)?,
                    "fail_payment",
                    Subject::new("payment", payment_id),
                    Some(details),
                )
            }
            Command::ReconcilePayment {
                payment_id,
                outcome,
            } => {
                let details: String = match &outcome {
                    Reconciliation::Completed { transaction_id, .. } => {
                        format!("Completed with transaction {transaction_id}")
                    }
                    Reconciliation::Failed { reason } => format!("Failed: {reason}"),
                };
                (
                    ledger::reconcile(state, session, payment_id, outcome, at)?,
                    "reconcile_payment",
                    Subject::new("payment", payment_id),
                    Some(details),
                )
            }
            Command::AddPayoutAccount {
                account_id,
                details,
            } => {
                let kind: &str = details.account_type().as_str();
                (
                    payouts::add(state, session, account_id, details, at)?,
                    "add_payout_account",
                    Subject::new("payout_account", account_id),
                    Some(format!("Added {kind} account")),
                )
            }
            Command::SetDefaultPayoutAccount { account_id } => (
                payouts::set_default(state, session, account_id)?,
                "set_default_payout_account",
                Subject::new("payout_account", account_id),
                None,
            ),
            Command::RemovePayoutAccount { account_id } => (
                payouts::remove(state, session, account_id)?,
                "remove_payout_account",
                Subject::new("payout_account", account_id),
                None,
            ),
            Command::AddPaymentMethod { method_id, method } => {
                let changes: Vec<Change> =
                    payment_methods::add(state, session, method_id, method, at)?;
                let details: Option<String> = match changes.first() {
                    Some(Change::PutSavedMethod(saved)) => {
                        Some(format!("Saved {}", saved.details.payer()))
                    }
                    _ => None,
                };
                (
                    changes,
                    "add_payment_method",
                    Subject::new("payment_method", method_id),
                    details,
                )
            }
            Command::SetDefaultPaymentMethod { method_id } => (
                payment_methods::set_default(state, session, method_id)?,
                "set_default_payment_method",
                Subject::new("payment_method", method_id),
                None,
            ),
            Command::RemovePaymentMethod { method_id } => (
                payment_methods::remove(state, session, method_id)?,
                "remove_payment_method",
                Subject::new("payment_method", method_id),
                None,
            ),
            Command::UpdateContactInfo { contact: info } => (
                contact::update(session, info)?,
                "update_contact_info",
                Subject::new("contact", "organisation"),
                None,
            ),
        };

    let action: Action = Action::new(name.to_string(), details);
    Ok(commit(
        state,
        changes,
        session.actor(),
        cause,
        action,
        subject,
        at,
    ))
}
