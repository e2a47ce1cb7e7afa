// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Rent payment through an external payment provider.
//!
//! A payment runs in three steps:
//!
//! 1. The attempt is recorded as `pending` and committed.
//! 2. The provider is called with the store lock released, bounded by a
//!    timeout.
//! 3. The outcome is applied as a new command against whatever the state is
//!    by then: success settles the payment, anything else fails it.
//!
//! If the caller's future is dropped during step 2 the payment stays
//! `pending` until an admin reconciles it.

use async_trait::async_trait;
use rentdesk::{Command, Session, State};
use rentdesk_audit::Cause;
use rentdesk_domain::{
    Booking, BookingId, Decimal, Payment, PaymentId, PaymentMethod, PeriodMonth, User,
};
use std::time::Duration;
use thiserror::Error;
use time::OffsetDateTime;
use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::error::{ApiError, translate_core_error};
use crate::request_response::{PayRentRequest, PaymentResponse};
use crate::store::{Committed, Store};

/// What is sent to the provider to collect a payment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentRequest {
    /// Who pays: the tenant's saved method of the requested kind if they
    /// have one, else their profile phone for mobile money, else their email.
    pub payer: String,
    /// The amount to collect.
    pub amount: Decimal,
    /// Our payment id, echoed back by the provider.
    pub reference: String,
}

/// The provider's confirmation of collected funds.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderReceipt {
    /// The provider's transaction reference.
    pub transaction_id: String,
    /// Receipt text or number, if the provider issues one.
    pub receipt: Option<String>,
}

/// Payment provider failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// The provider refused the payment.
    #[error("payment declined: {0}")]
    Declined(String),

    /// The provider could not be reached or failed internally.
    #[error("payment provider unavailable: {0}")]
    Unavailable(String),

    /// The payer reference was not accepted.
    #[error("invalid payer: {0}")]
    InvalidPayer(String),
}

/// A gateway able to collect rent.
#[async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Collects a payment.
    ///
    /// # Errors
    ///
    /// Returns a `ProviderError` if the funds were not collected.
    async fn initiate_payment(
        &self,
        request: &PaymentRequest,
    ) -> Result<ProviderReceipt, ProviderError>;
}

fn payment_response(
    store: &Store,
    payment_id: PaymentId,
    committed: &Committed,
    message: String,
) -> Result<PaymentResponse, ApiError> {
    let payment: &Payment = store
        .state()
        .payment(payment_id)
        .map_err(translate_core_error)?;
    Ok(PaymentResponse {
        payment: payment.clone(),
        event_id: committed.event_id,
        message,
    })
}

/// Records a `pending` payment attempt without calling any provider.
///
/// The amount defaults to the booking's rent and the period to the current
/// month. An admin later settles or fails the attempt through
/// reconciliation.
///
/// # Errors
///
/// Returns `Forbidden` unless the caller owns the booking,
/// `InvalidTransition` unless it is approved, `DomainRuleViolation` for a
/// wrong amount, `Conflict` if an attempt is already pending, and
/// `NoPayoutAccountConfigured` if nobody can receive the money.
pub fn record_payment_attempt(
    store: &mut Store,
    session: &Session,
    request: PayRentRequest,
    cause: Cause,
) -> Result<PaymentResponse, ApiError> {
    let booking_id: BookingId = request.booking_id;
    let amount: Decimal = match request.amount {
        Some(amount) => amount,
        None => {
            store
                .state()
                .booking(booking_id)
                .map_err(translate_core_error)?
                .monthly_rent
        }
    };
    let period_month: PeriodMonth = request
        .period_month
        .unwrap_or_else(|| PeriodMonth::containing(OffsetDateTime::now_utc()));

    let payment_id: PaymentId = PaymentId::generate();
    let committed: Committed = store.execute(
        session,
        Command::RecordPaymentAttempt {
            payment_id,
            booking_id,
            amount,
            method: request.method,
            period_month,
        },
        cause,
    )?;
    info!(%payment_id, %booking_id, %amount, "Payment attempt recorded");

    payment_response(
        store,
        payment_id,
        &committed,
        format!("Payment {payment_id} is awaiting its outcome"),
    )
}

fn payer_for(state: &State, user: &User, method: PaymentMethod) -> String {
    if let Some(saved) = state.preferred_method(user.id, method) {
        return saved.details.payer();
    }
    match (method, &user.phone) {
        (PaymentMethod::MobileMoney, Some(phone)) => phone.clone(),
        _ => user.email.clone(),
    }
}

/// Pays rent on an approved booking through a provider.
///
/// The store lock is held only while recording and resolving the attempt,
/// never across the provider call.
///
/// # Arguments
///
/// * `store` - The shared record store
/// * `provider` - The payment gateway
/// * `session` - The paying tenant
/// * `request` - What to pay for
/// * `cause` - Why the payment is made
/// * `timeout` - How long to wait for the provider
///
/// # Errors
///
/// Returns any error of [`record_payment_attempt`]; `PaymentProviderError`
/// if the provider declines, fails or times out (the payment is then
/// `failed`); and `InvalidTransition` if the funds arrived after another
/// booking leased the apartment (the payment is then `failed` with a refund
/// note).
pub async fn pay_rent<P>(
    store: &Mutex<Store>,
    provider: &P,
    session: &Session,
    request: PayRentRequest,
    cause: Cause,
    timeout: Duration,
) -> Result<PaymentResponse, ApiError>
where
    P: PaymentProvider + ?Sized,
{
    let method: PaymentMethod = request.method;
    let (payment_id, provider_request): (PaymentId, PaymentRequest) = {
        let mut guard = store.lock().await;
        let recorded: PaymentResponse =
            record_payment_attempt(&mut guard, session, request, cause.clone())?;
        let payer: &User = guard
            .state()
            .user(recorded.payment.tenant_id)
            .map_err(translate_core_error)?;
        (
            recorded.payment.id,
            PaymentRequest {
                payer: payer_for(guard.state(), payer, method),
                amount: recorded.payment.amount,
                reference: recorded.payment.id.to_string(),
            },
        )
    };

    let outcome: Result<ProviderReceipt, String> =
        match tokio::time::timeout(timeout, provider.initiate_payment(&provider_request)).await {
            Ok(Ok(receipt)) => Ok(receipt),
            Ok(Err(provider_error)) => Err(provider_error.to_string()),
            Err(_) => Err(String::from("payment provider timed out")),
        };

    let mut guard = store.lock().await;
    match outcome {
        Ok(receipt) => settle_or_refund(&mut guard, session, payment_id, receipt, cause),
        Err(reason) => {
            warn!(%payment_id, %reason, "Payment provider failed");
            guard.execute(
                session,
                Command::FailPayment {
                    payment_id,
                    reason: reason.clone(),
                },
                cause,
            )?;
            Err(ApiError::PaymentProviderError { reason })
        }
    }
}

/// Settles a payment the provider collected, or fails it with a refund note
/// if the booking can no longer be confirmed.
fn settle_or_refund(
    store: &mut Store,
    session: &Session,
    payment_id: PaymentId,
    receipt: ProviderReceipt,
    cause: Cause,
) -> Result<PaymentResponse, ApiError> {
    let settled: Result<Committed, ApiError> = store.execute(
        session,
        Command::SettlePayment {
            payment_id,
            receipt: receipt.receipt,
            transaction_id: receipt.transaction_id,
        },
        cause.clone(),
    );

    match settled {
        Ok(committed) => {
            let booking_id: BookingId = store
                .state()
                .payment(payment_id)
                .map_err(translate_core_error)?
                .booking_id;
            let booking: &Booking = store
                .state()
                .booking(booking_id)
                .map_err(translate_core_error)?;
            info!(%payment_id, %booking_id, status = %booking.status, "Payment settled");
            payment_response(
                store,
                payment_id,
                &committed,
                format!("Payment {payment_id} completed; booking {booking_id} confirmed"),
            )
        }
        Err(refusal) => {
            let reason: String = format!("settlement refused: {refusal}; refund required");
            warn!(%payment_id, %reason, "Collected payment could not be settled");
            store.execute(session, Command::FailPayment { payment_id, reason }, cause)?;
            Err(refusal)
        }
    }
}
