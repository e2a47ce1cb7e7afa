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
#![allow(clippy::multiple_crate_versions)]

mod session;

use axum::{
    Json, Router,
    extract::{Path, Query, State as AxumState},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{delete, get, patch, post, put},
};
use clap::Parser;
use rentdesk_api::{
    ApartmentRequest, ApartmentResponse, ApiError, BookingInfo, BookingResponse,
    ChangePasswordRequest, ContactResponse, CreateBookingRequest, DashboardResponse,
    ListApartmentsRequest, ListAuditEventsRequest, LoginRequest, LoginResponse, PayRentRequest,
    PaymentMethodResponse, PaymentProvider, PaymentResponse, PayoutAccountResponse, PurgeBookingsRequest, PurgeBookingsResponse,
    ReconcilePaymentRequest, RegisterUserRequest, RegisterUserResponse,
    SetApartmentStatusRequest, Store, UpdateProfileRequest, UserInfo, UserListEntry,
    WhoAmIResponse, WriteResponse,
};
use rentdesk_audit::{AuditEvent, Cause};
use rentdesk_domain::{
    AccountDetails, Apartment, ApartmentId, BookingId, ContactInfo, Decimal, NewPaymentMethod,
    Payment, PaymentId, PaymentMethod, PaymentMethodId, PayoutAccount, PayoutAccountId,
    PeriodMonth, SavedPaymentMethod, UserId,
};
use rentdesk_persistence::Persistence;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::session::{MaybeSessionUser, SessionUser};

/// How often expired sessions are purged.
const SESSION_SWEEP_INTERVAL: std::time::Duration = std::time::Duration::from_secs(15 * 60);

/// RentDesk Server - HTTP server for the RentDesk rental manager
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Path to the `SQLite` database file. If not provided, uses in-memory database.
    #[arg(short, long, env = "RENTDESK_DATABASE")]
    database: Option<String>,

    /// Port to bind the server to
    #[arg(short, long, env = "RENTDESK_PORT", default_value_t = 3000)]
    port: u16,

    /// Address to bind the server to
    #[arg(short, long, env = "RENTDESK_BIND", default_value = "127.0.0.1")]
    bind: String,

    /// Session lifetime in hours
    #[arg(long, env = "RENTDESK_SESSION_TTL_HOURS", default_value_t = 24)]
    session_ttl_hours: i64,

    /// How long to wait for the payment provider, in seconds
    #[arg(long, env = "RENTDESK_PAYMENT_TIMEOUT_SECS", default_value_t = 30)]
    payment_timeout_secs: u64,
}

/// Application state shared across handlers.
///
/// The store is wrapped in a Mutex so every command sees and replaces a
/// consistent state.
#[derive(Clone)]
pub struct AppState {
    /// Persistence plus the in-memory state it backs.
    store: Arc<Mutex<Store>>,
    /// Lifetime of new sessions.
    session_ttl: time::Duration,
    /// The payment gateway. Without one, payments are recorded as pending
    /// and reconciled by an admin.
    payment_provider: Option<Arc<dyn PaymentProvider>>,
    /// How long to wait for the payment gateway.
    payment_timeout: std::time::Duration,
}

/// Error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct ErrorResponse {
    /// Machine-readable error kind.
    error: String,
    /// Error message.
    message: String,
}

/// HTTP error wrapper that implements `IntoResponse`.
pub struct HttpError {
    /// The HTTP status code.
    status: StatusCode,
    /// Machine-readable error kind.
    error: &'static str,
    /// The error message.
    message: String,
}

impl IntoResponse for HttpError {
    fn into_response(self) -> Response {
        let body: Json<ErrorResponse> = Json(ErrorResponse {
            error: self.error.to_string(),
            message: self.message,
        });
        (self.status, body).into_response()
    }
}

impl From<ApiError> for HttpError {
    fn from(err: ApiError) -> Self {
        let (status, error): (StatusCode, &'static str) = match &err {
            ApiError::AuthenticationFailed { .. } => {
                (StatusCode::UNAUTHORIZED, "authentication_failed")
            }
            ApiError::Unauthorized { .. } => (StatusCode::UNAUTHORIZED, "unauthorized"),
            ApiError::Forbidden { .. } => (StatusCode::FORBIDDEN, "forbidden"),
            ApiError::NotFound { .. } => (StatusCode::NOT_FOUND, "not_found"),
            ApiError::InvalidTransition { .. } => (StatusCode::CONFLICT, "invalid_transition"),
            ApiError::Conflict { .. } => (StatusCode::CONFLICT, "conflict"),
            ApiError::ApartmentUnavailable { .. } => {
                (StatusCode::CONFLICT, "apartment_unavailable")
            }
            ApiError::NoPayoutAccountConfigured => (
                StatusCode::UNPROCESSABLE_ENTITY,
                "no_payout_account_configured",
            ),
            ApiError::PaymentProviderError { .. } => {
                (StatusCode::BAD_GATEWAY, "payment_provider_error")
            }
            ApiError::InvalidInput { .. } => (StatusCode::BAD_REQUEST, "invalid_input"),
            ApiError::DomainRuleViolation { .. } => {
                (StatusCode::BAD_REQUEST, "domain_rule_violation")
            }
            ApiError::Internal { .. } => {
                error!(error = %err, "Internal error");
                (StatusCode::INTERNAL_SERVER_ERROR, "internal")
            }
        };
        Self {
            status,
            error,
            message: err.to_string(),
        }
    }
}

/// A fresh audit cause for one HTTP request.
fn request_cause(description: &str) -> Cause {
    Cause::new(uuid::Uuid::new_v4().to_string(), description.to_string())
}

/// Liveness response.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct HealthResponse {
    /// Always `ok`.
    status: String,
}

/// Body of `POST /bookings/{id}/pay`.
#[derive(Debug, Clone, Serialize, Deserialize)]
struct PayBookingBody {
    /// The payment method.
    method: PaymentMethod,
    /// The amount offered; the booking's rent when omitted.
    #[serde(default)]
    amount: Option<Decimal>,
    /// The rent month covered; the current month when omitted.
    #[serde(default)]
    period_month: Option<PeriodMonth>,
}

// ============================================================================
// Authentication
// ============================================================================

#[allow(clippy::unused_async)]
async fn handle_health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: String::from("ok"),
    })
}

async fn handle_login(
    AxumState(app_state): AxumState<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: LoginResponse = rentdesk_api::login(&mut store, &req, app_state.session_ttl)?;
    Ok(Json(response))
}

async fn handle_logout(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Result<StatusCode, HttpError> {
    let mut store = app_state.store.lock().await;
    rentdesk_api::logout(&mut store, &caller.token)?;
    info!(user_id = %caller.session.user_id, "Logged out");
    Ok(StatusCode::NO_CONTENT)
}

async fn handle_whoami(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Result<Json<WhoAmIResponse>, HttpError> {
    let store = app_state.store.lock().await;
    Ok(Json(rentdesk_api::whoami(&store, &caller.session)?))
}

async fn handle_change_password(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Json(req): Json<ChangePasswordRequest>,
) -> Result<StatusCode, HttpError> {
    let mut store = app_state.store.lock().await;
    rentdesk_api::change_password(&mut store, &caller.session, &req)?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// Users
// ============================================================================

async fn handle_register_user(
    AxumState(app_state): AxumState<AppState>,
    MaybeSessionUser(requester): MaybeSessionUser,
    Json(req): Json<RegisterUserRequest>,
) -> Result<Json<RegisterUserResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: RegisterUserResponse = rentdesk_api::register_user(
        &mut store,
        requester.as_ref(),
        req,
        request_cause("User registration"),
    )?;
    Ok(Json(response))
}

async fn handle_list_users(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Result<Json<Vec<UserListEntry>>, HttpError> {
    let store = app_state.store.lock().await;
    Ok(Json(rentdesk_api::list_users(&store, &caller.session)?))
}

async fn handle_update_profile(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(user_id): Path<UserId>,
    Json(req): Json<UpdateProfileRequest>,
) -> Result<Json<UserInfo>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: UserInfo = rentdesk_api::update_profile(
        &mut store,
        &caller.session,
        user_id,
        req,
        request_cause("Profile update"),
    )?;
    Ok(Json(response))
}

async fn handle_delete_user(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(user_id): Path<UserId>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: WriteResponse = rentdesk_api::delete_user(
        &mut store,
        &caller.session,
        user_id,
        request_cause("User deletion"),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Apartments
// ============================================================================

async fn handle_list_apartments(
    AxumState(app_state): AxumState<AppState>,
    Query(query): Query<ListApartmentsRequest>,
) -> Json<Vec<Apartment>> {
    let store = app_state.store.lock().await;
    Json(rentdesk_api::list_apartments(&store, query))
}

async fn handle_create_apartment(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Json(req): Json<ApartmentRequest>,
) -> Result<Json<ApartmentResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: ApartmentResponse = rentdesk_api::create_apartment(
        &mut store,
        &caller.session,
        req,
        request_cause("Apartment listing"),
    )?;
    Ok(Json(response))
}

async fn handle_update_apartment(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(apartment_id): Path<ApartmentId>,
    Json(req): Json<ApartmentRequest>,
) -> Result<Json<ApartmentResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: ApartmentResponse = rentdesk_api::update_apartment(
        &mut store,
        &caller.session,
        apartment_id,
        req,
        request_cause("Apartment edit"),
    )?;
    Ok(Json(response))
}

async fn handle_set_apartment_status(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(apartment_id): Path<ApartmentId>,
    Json(req): Json<SetApartmentStatusRequest>,
) -> Result<Json<ApartmentResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: ApartmentResponse = rentdesk_api::set_apartment_status(
        &mut store,
        &caller.session,
        apartment_id,
        req,
        request_cause("Apartment status change"),
    )?;
    Ok(Json(response))
}

async fn handle_delete_apartment(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(apartment_id): Path<ApartmentId>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: WriteResponse = rentdesk_api::delete_apartment(
        &mut store,
        &caller.session,
        apartment_id,
        request_cause("Apartment deletion"),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Bookings
// ============================================================================

async fn handle_submit_booking(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Json(req): Json<CreateBookingRequest>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = rentdesk_api::submit_booking(
        &mut store,
        &caller.session,
        req,
        request_cause("Booking request"),
    )?;
    Ok(Json(response))
}

async fn handle_list_bookings(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Json<Vec<BookingInfo>> {
    let store = app_state.store.lock().await;
    Json(rentdesk_api::list_bookings(&store, &caller.session))
}

async fn handle_approve_booking(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = rentdesk_api::approve_booking(
        &mut store,
        &caller.session,
        booking_id,
        request_cause("Booking approval"),
    )?;
    Ok(Json(response))
}

async fn handle_reject_booking(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<BookingResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: BookingResponse = rentdesk_api::reject_booking(
        &mut store,
        &caller.session,
        booking_id,
        request_cause("Booking rejection"),
    )?;
    Ok(Json(response))
}

async fn handle_cancel_booking(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: WriteResponse = rentdesk_api::cancel_booking(
        &mut store,
        &caller.session,
        booking_id,
        request_cause("Booking cancellation"),
    )?;
    Ok(Json(response))
}

async fn handle_delete_booking(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(booking_id): Path<BookingId>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: WriteResponse = rentdesk_api::delete_booking(
        &mut store,
        &caller.session,
        booking_id,
        request_cause("Booking deletion"),
    )?;
    Ok(Json(response))
}

async fn handle_purge_bookings(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Json(req): Json<PurgeBookingsRequest>,
) -> Result<Json<PurgeBookingsResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: PurgeBookingsResponse = rentdesk_api::purge_bookings(
        &mut store,
        &caller.session,
        req,
        request_cause("Booking purge"),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Payments
// ============================================================================

async fn handle_pay_booking(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(booking_id): Path<BookingId>,
    Json(body): Json<PayBookingBody>,
) -> Result<Json<PaymentResponse>, HttpError> {
    let request: PayRentRequest = PayRentRequest {
        booking_id,
        method: body.method,
        amount: body.amount,
        period_month: body.period_month,
    };
    let cause: Cause = request_cause("Rent payment");

    let response: PaymentResponse = match &app_state.payment_provider {
        Some(provider) => {
            rentdesk_api::pay_rent(
                &app_state.store,
                provider.as_ref(),
                &caller.session,
                request,
                cause,
                app_state.payment_timeout,
            )
            .await?
        }
        None => {
            let mut store = app_state.store.lock().await;
            rentdesk_api::record_payment_attempt(&mut store, &caller.session, request, cause)?
        }
    };
    Ok(Json(response))
}

async fn handle_list_payments(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Json<Vec<Payment>> {
    let store = app_state.store.lock().await;
    Json(rentdesk_api::list_payments(&store, &caller.session))
}

async fn handle_reconcile_payment(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(payment_id): Path<PaymentId>,
    Json(req): Json<ReconcilePaymentRequest>,
) -> Result<Json<PaymentResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: PaymentResponse = rentdesk_api::reconcile_payment(
        &mut store,
        &caller.session,
        payment_id,
        req,
        request_cause("Payment reconciliation"),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Payout Accounts
// ============================================================================

async fn handle_list_payout_accounts(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Result<Json<Vec<PayoutAccount>>, HttpError> {
    let store = app_state.store.lock().await;
    Ok(Json(rentdesk_api::list_payout_accounts(
        &store,
        &caller.session,
    )?))
}

async fn handle_add_payout_account(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Json(details): Json<AccountDetails>,
) -> Result<Json<PayoutAccountResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: PayoutAccountResponse = rentdesk_api::add_payout_account(
        &mut store,
        &caller.session,
        details,
        request_cause("Payout account added"),
    )?;
    Ok(Json(response))
}

async fn handle_set_default_payout_account(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(account_id): Path<PayoutAccountId>,
) -> Result<Json<PayoutAccountResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: PayoutAccountResponse = rentdesk_api::set_default_payout_account(
        &mut store,
        &caller.session,
        account_id,
        request_cause("Default payout account change"),
    )?;
    Ok(Json(response))
}

async fn handle_remove_payout_account(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(account_id): Path<PayoutAccountId>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: WriteResponse = rentdesk_api::remove_payout_account(
        &mut store,
        &caller.session,
        account_id,
        request_cause("Payout account removed"),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Saved Payment Methods
// ============================================================================

async fn handle_list_payment_methods(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Result<Json<Vec<SavedPaymentMethod>>, HttpError> {
    let store = app_state.store.lock().await;
    Ok(Json(rentdesk_api::list_payment_methods(
        &store,
        &caller.session,
    )?))
}

async fn handle_add_payment_method(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Json(method): Json<NewPaymentMethod>,
) -> Result<Json<PaymentMethodResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: PaymentMethodResponse = rentdesk_api::add_payment_method(
        &mut store,
        &caller.session,
        method,
        request_cause("Payment method saved"),
    )?;
    Ok(Json(response))
}

async fn handle_set_default_payment_method(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(method_id): Path<PaymentMethodId>,
) -> Result<Json<PaymentMethodResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: PaymentMethodResponse = rentdesk_api::set_default_payment_method(
        &mut store,
        &caller.session,
        method_id,
        request_cause("Default payment method change"),
    )?;
    Ok(Json(response))
}

async fn handle_remove_payment_method(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Path(method_id): Path<PaymentMethodId>,
) -> Result<Json<WriteResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: WriteResponse = rentdesk_api::remove_payment_method(
        &mut store,
        &caller.session,
        method_id,
        request_cause("Payment method removed"),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Contact
// ============================================================================

async fn handle_get_contact(AxumState(app_state): AxumState<AppState>) -> Json<ContactInfo> {
    let store = app_state.store.lock().await;
    Json(rentdesk_api::get_contact(&store))
}

async fn handle_update_contact(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Json(contact): Json<ContactInfo>,
) -> Result<Json<ContactResponse>, HttpError> {
    let mut store = app_state.store.lock().await;
    let response: ContactResponse = rentdesk_api::update_contact(
        &mut store,
        &caller.session,
        contact,
        request_cause("Contact details updated"),
    )?;
    Ok(Json(response))
}

// ============================================================================
// Dashboard & Audit
// ============================================================================

async fn handle_dashboard(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
) -> Result<Json<DashboardResponse>, HttpError> {
    let store = app_state.store.lock().await;
    Ok(Json(rentdesk_api::dashboard(&store, &caller.session)?))
}

async fn handle_list_audit_events(
    AxumState(app_state): AxumState<AppState>,
    caller: SessionUser,
    Query(query): Query<ListAuditEventsRequest>,
) -> Result<Json<Vec<AuditEvent>>, HttpError> {
    let mut store = app_state.store.lock().await;
    Ok(Json(rentdesk_api::list_audit_events(
        &mut store,
        &caller.session,
        &query,
    )?))
}

/// Builds the application router with all endpoints.
fn build_router(app_state: AppState) -> Router {
    Router::new()
        .route("/health", get(handle_health))
        .route("/auth/login", post(handle_login))
        .route("/auth/logout", post(handle_logout))
        .route("/auth/me", get(handle_whoami))
        .route("/auth/password", post(handle_change_password))
        .route("/users", get(handle_list_users))
        .route("/users/register", post(handle_register_user))
        .route(
            "/users/{id}",
            patch(handle_update_profile).delete(handle_delete_user),
        )
        .route(
            "/apartments",
            get(handle_list_apartments).post(handle_create_apartment),
        )
        .route(
            "/apartments/{id}",
            put(handle_update_apartment).delete(handle_delete_apartment),
        )
        .route("/apartments/{id}/status", put(handle_set_apartment_status))
        .route(
            "/bookings",
            get(handle_list_bookings).post(handle_submit_booking),
        )
        .route("/bookings/purge", post(handle_purge_bookings))
        .route("/bookings/{id}", delete(handle_delete_booking))
        .route("/bookings/{id}/approve", post(handle_approve_booking))
        .route("/bookings/{id}/reject", post(handle_reject_booking))
        .route("/bookings/{id}/cancel", post(handle_cancel_booking))
        .route("/bookings/{id}/pay", post(handle_pay_booking))
        .route("/payments", get(handle_list_payments))
        .route("/payments/{id}/reconcile", post(handle_reconcile_payment))
        .route(
            "/payout-accounts",
            get(handle_list_payout_accounts).post(handle_add_payout_account),
        )
        .route(
            "/payout-accounts/{id}",
            delete(handle_remove_payout_account),
        )
        .route(
            "/payout-accounts/{id}/default",
            post(handle_set_default_payout_account),
        )
        .route(
            "/payment-methods",
            get(handle_list_payment_methods).post(handle_add_payment_method),
        )
        .route(
            "/payment-methods/{id}",
            delete(handle_remove_payment_method),
        )
        .route(
            "/payment-methods/{id}/default",
            post(handle_set_default_payment_method),
        )
        .route(
            "/contact",
            get(handle_get_contact).put(handle_update_contact),
        )
        .route("/dashboard", get(handle_dashboard))
        .route("/audit", get(handle_list_audit_events))
        .with_state(app_state)
}

/// Periodically deletes expired sessions.
fn spawn_session_sweeper(store: Arc<Mutex<Store>>) {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(SESSION_SWEEP_INTERVAL);
        loop {
            interval.tick().await;
            let mut store = store.lock().await;
            match store
                .persistence()
                .delete_expired_sessions(time::OffsetDateTime::now_utc())
            {
                Ok(0) => {}
                Ok(removed) => info!(removed, "Expired sessions purged"),
                Err(e) => warn!(error = %e, "Failed to purge expired sessions"),
            }
        }
    });
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Parse command-line arguments
    let args: Args = Args::parse();

    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    info!("Initializing RentDesk Server");

    // Initialize persistence (in-memory or file-based based on CLI argument)
    let persistence: Persistence = if let Some(db_path) = &args.database {
        info!("Using file-based database at: {}", db_path);
        Persistence::new_with_file(db_path)?
    } else {
        info!("Using in-memory database");
        Persistence::new_in_memory()?
    };

    let store: Arc<Mutex<Store>> = Arc::new(Mutex::new(Store::open(persistence)?));
    spawn_session_sweeper(Arc::clone(&store));

    info!("No payment provider configured; payments are reconciled by an admin");
    let app_state: AppState = AppState {
        store,
        session_ttl: time::Duration::hours(args.session_ttl_hours),
        payment_provider: None,
        payment_timeout: std::time::Duration::from_secs(args.payment_timeout_secs),
    };

    // Build router
    let app: Router = build_router(app_state);

    // Bind to address
    let addr: std::net::SocketAddr = format!("{}:{}", args.bind, args.port).parse()?;
    info!("Server listening on {}", addr);

    // Run server
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
