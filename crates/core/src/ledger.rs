// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payment ledger.
//!
//! Records payment attempts and their outcomes. A completed payment and the
//! confirmation of its booking are one change list, so no reader ever sees
//! one without the other.

use crate::access::{require_admin, require_owner};
use crate::change::Change;
use crate::command::Reconciliation;
use crate::error::CoreError;
use crate::lifecycle::settle_booking;
use crate::payouts::receiving_account;
use crate::session::Session;
use crate::state::State;
use rentdesk_domain::{
    Booking, BookingId, BookingStatus, Decimal, DomainError, Payment, PaymentId, PaymentMethod,
    PaymentStatus, PayoutAccount, PeriodMonth,
};
use time::OffsetDateTime;

/// Arguments of a payment attempt.
pub(crate) struct Attempt {
    pub payment_id: PaymentId,
    pub booking_id: BookingId,
    pub amount: Decimal,
    pub method: PaymentMethod,
    pub period_month: PeriodMonth,
}

/// Records a pending payment against an approved booking.
///
/// # Errors
///
/// Returns an error if:
/// - The session is not the booking's tenant (`Forbidden`)
/// - The booking is not `pending_payment` (`InvalidTransition`)
/// - The amount differs from the booking's rent (`DomainViolation`)
/// - Another attempt for the booking is still pending (`Conflict`)
/// - No payout account can receive the payment (`NoPayoutAccountConfigured`)
pub(crate) fn record_attempt(
    state: &State,
    session: &Session,
    attempt: Attempt,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    let booking: &Booking = state.booking(attempt.booking_id)?;
    require_owner(session, booking.tenant_id, "booking")?;

    if booking.status != BookingStatus::PendingPayment {
        return Err(CoreError::InvalidTransition {
            entity: "booking",
            id: booking.id.to_string(),
            from: booking.status.as_str().to_string(),
            to: BookingStatus::Confirmed.as_str().to_string(),
        });
    }

    if attempt.amount != booking.monthly_rent {
        return Err(CoreError::DomainViolation(DomainError::AmountMismatch {
            expected: booking.monthly_rent,
            actual: attempt.amount,
        }));
    }

    if state.has_pending_payment(booking.id) {
        return Err(CoreError::Conflict(format!(
            "booking {} already has a payment awaiting its outcome",
            booking.id
        )));
    }

    let account: &PayoutAccount =
        receiving_account(state).ok_or(CoreError::NoPayoutAccountConfigured)?;

    let payment: Payment = Payment {
        id: attempt.payment_id,
        booking_id: booking.id,
        tenant_id: booking.tenant_id,
        amount: booking.monthly_rent,
        method: attempt.method,
        status: PaymentStatus::Pending,
        period_month: attempt.period_month,
        transaction_id: None,
        receipt: None,
        failure_reason: None,
        admin_account_id: account.id,
        created_at: at,
        paid_at: None,
    };
    Ok(vec![Change::PutPayment(payment)])
}

/// Only admins and the paying tenant may report a payment's outcome.
fn require_payment_party(session: &Session, payment: &Payment) -> Result<(), CoreError> {
    if session.is_admin() {
        return Ok(());
    }
    require_owner(session, payment.tenant_id, "payment")
}

/// Completes a pending payment and confirms its booking.
///
/// # Errors
///
/// Returns `InvalidTransition` if the payment is not pending or its booking
/// is no longer `pending_payment`; nothing is changed in either case.
pub(crate) fn settle(
    state: &State,
    session: &Session,
    payment_id: PaymentId,
    receipt: Option<String>,
    transaction_id: String,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    let payment: &Payment = state.payment(payment_id)?;
    require_payment_party(session, payment)?;
    payment
        .status
        .validate_transition(PaymentStatus::Completed)
        .map_err(|e| CoreError::from_transition("payment", payment_id, e))?;

    let completed: Payment = Payment {
        status: PaymentStatus::Completed,
        receipt,
        transaction_id: Some(transaction_id),
        paid_at: Some(at),
        ..payment.clone()
    };

    let mut changes: Vec<Change> = vec![Change::PutPayment(completed)];
    changes.extend(settle_booking(state, payment.booking_id)?);
    Ok(changes)
}

/// Marks a pending payment failed. The booking stays payable.
///
/// # Errors
///
/// Returns `InvalidTransition` if the payment is not pending.
pub(crate) fn fail(
    state: &State,
    session: &Session,
    payment_id: PaymentId,
    reason: String,
) -> Result<Vec<Change>, CoreError> {
    let payment: &Payment = state.payment(payment_id)?;
    require_payment_party(session, payment)?;
    payment
        .status
        .validate_transition(PaymentStatus::Failed)
        .map_err(|e| CoreError::from_transition("payment", payment_id, e))?;

    Ok(vec![Change::PutPayment(Payment {
        status: PaymentStatus::Failed,
        failure_reason: Some(reason),
        ..payment.clone()
    })])
}

/// Resolves a pending payment on the provider's reported outcome.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, plus any error of `settle` or `fail`.
pub(crate) fn reconcile(
    state: &State,
    session: &Session,
    payment_id: PaymentId,
    outcome: Reconciliation,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    match outcome {
        Reconciliation::Completed {
            receipt,
            transaction_id,
        } => settle(state, session, payment_id, receipt, transaction_id, at),
        Reconciliation::Failed { reason } => fail(state, session, payment_id, reason),
    }
}
