// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request handlers.
//!
//! Each handler takes the store, the caller's session and a request, and
//! returns a response or an [`ApiError`]. Writes are applied as core
//! commands through [`Store::execute`]; reads look at the committed state.

use rentdesk::{
    ApartmentListing, Command, Reconciliation, Registration, Session, State, dashboard_stats,
    list_available, require_admin,
};
use rentdesk_audit::{AuditEvent, Cause};
use rentdesk_domain::{
    AccountDetails, Apartment, ApartmentId, Booking, BookingId, ContactInfo, NewPaymentMethod,
    Payment, PaymentId, PaymentMethodId, PayoutAccount, PayoutAccountId, Role, SavedPaymentMethod,
    User, UserId,
};
use tracing::{debug, info};

use crate::auth::{AuthenticationService, LoginOutcome};
use crate::capabilities::{
    compute_booking_capabilities, compute_global_capabilities, compute_user_capabilities,
};
use crate::error::{ApiError, translate_core_error};
use crate::password_policy::PasswordPolicy;
use crate::request_response::{
    ApartmentRequest, ApartmentResponse, BookingInfo, BookingResponse, ChangePasswordRequest,
    ContactResponse, CreateBookingRequest, DashboardResponse, ListApartmentsRequest,
    ListAuditEventsRequest, LoginRequest, LoginResponse, PaymentMethodResponse, PaymentResponse,
    PayoutAccountResponse, PurgeBookingsRequest,
    PurgeBookingsResponse, ReconcilePaymentRequest, RegisterUserRequest, RegisterUserResponse,
    SetApartmentStatusRequest, UpdateProfileRequest, UserInfo, UserListEntry, WhoAmIResponse,
    WriteResponse,
};
use crate::store::{Committed, Store};

/// Default number of audit events returned when no limit is given.
const DEFAULT_AUDIT_LIMIT: i64 = 100;

fn admin_only(session: &Session) -> Result<(), ApiError> {
    require_admin(session).map_err(translate_core_error)
}

fn booking_info(state: &State, session: &Session, booking: &Booking) -> BookingInfo {
    let apartment_name: String = state
        .apartment(booking.apartment_id)
        .map(|apartment| apartment.name.clone())
        .unwrap_or_default();
    BookingInfo {
        booking: booking.clone(),
        apartment_name,
        capabilities: compute_booking_capabilities(session, booking, state),
    }
}

fn booking_response(
    store: &Store,
    session: &Session,
    booking_id: BookingId,
    committed: &Committed,
) -> Result<BookingResponse, ApiError> {
    let state: &State = store.state();
    let booking: &Booking = state.booking(booking_id).map_err(translate_core_error)?;
    Ok(BookingResponse {
        booking: booking_info(state, session, booking),
        event_id: committed.event_id,
    })
}

fn write_response(committed: &Committed, message: String) -> WriteResponse {
    WriteResponse {
        event_id: committed.event_id,
        message,
    }
}

// ============================================================================
// Authentication
// ============================================================================

/// Authenticates a user and opens a session.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the credentials are rejected.
pub fn login(
    store: &mut Store,
    request: &LoginRequest,
    ttl: time::Duration,
) -> Result<LoginResponse, ApiError> {
    let outcome: LoginOutcome =
        AuthenticationService::login(store, &request.email, &request.password, ttl)?;
    let user: User = AuthenticationService::current_user(store, &outcome.session)?;

    Ok(LoginResponse {
        session_token: outcome.session_token,
        expires_at: outcome.expires_at,
        user: UserInfo::from(&user),
        capabilities: compute_global_capabilities(&outcome.session),
    })
}

/// Ends a session.
///
/// # Errors
///
/// Returns an error if the session cannot be deleted.
pub fn logout(store: &mut Store, session_token: &str) -> Result<(), ApiError> {
    AuthenticationService::logout(store, session_token)
}

/// Describes the signed-in user.
///
/// # Errors
///
/// Returns `Unauthorized` if the user no longer exists.
pub fn whoami(store: &Store, session: &Session) -> Result<WhoAmIResponse, ApiError> {
    let user: User = AuthenticationService::current_user(store, session)?;
    Ok(WhoAmIResponse {
        user: UserInfo::from(&user),
        capabilities: compute_global_capabilities(session),
    })
}

// ============================================================================
// Users
// ============================================================================

/// Registers a user.
///
/// Without a session this is self-registration: a tenant account once an
/// admin exists, or the first admin of an empty store. Admins register
/// further admins.
///
/// # Arguments
///
/// * `store` - The record store
/// * `requester` - The signed-in caller, if any
/// * `request` - The registration details and initial password
/// * `cause` - Why the user is being registered
///
/// # Errors
///
/// Returns `InvalidInput` for a password or field that fails validation,
/// `Conflict` for a duplicate email, and `Forbidden` if the caller may not
/// create the requested role.
pub fn register_user(
    store: &mut Store,
    requester: Option<&Session>,
    request: RegisterUserRequest,
    cause: Cause,
) -> Result<RegisterUserResponse, ApiError> {
    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(&request.password, &request.email)?;

    let user_id: UserId = UserId::generate();
    let registration: Registration = Registration {
        user_id,
        email: request.email,
        full_name: request.full_name,
        phone: request.phone,
        role: request.role.unwrap_or(Role::Tenant),
    };

    let committed: Committed = store.register(registration, &request.password, requester, cause)?;
    let user: &User = store.state().user(user_id).map_err(translate_core_error)?;

    Ok(RegisterUserResponse {
        user: UserInfo::from(user),
        event_id: committed.event_id,
        message: format!("Registered {} as {}", user.email, user.role),
    })
}

/// Updates a user's name and phone.
///
/// # Errors
///
/// Returns `Forbidden` unless acting on oneself or as an admin.
pub fn update_profile(
    store: &mut Store,
    session: &Session,
    user_id: UserId,
    request: UpdateProfileRequest,
    cause: Cause,
) -> Result<UserInfo, ApiError> {
    store.execute(
        session,
        Command::UpdateProfile {
            user_id,
            full_name: request.full_name,
            phone: request.phone,
        },
        cause,
    )?;
    let user: &User = store.state().user(user_id).map_err(translate_core_error)?;
    Ok(UserInfo::from(user))
}

/// Changes the caller's own password and revokes all of their sessions.
///
/// # Errors
///
/// Returns `AuthenticationFailed` if the current password is wrong and
/// `InvalidInput` if the new password fails the policy.
pub fn change_password(
    store: &mut Store,
    session: &Session,
    request: &ChangePasswordRequest,
) -> Result<(), ApiError> {
    let user: User = AuthenticationService::current_user(store, session)?;

    let verified: Option<String> = store
        .persistence()
        .verify_credentials(&user.email, &request.current_password)?;
    if verified.is_none() {
        return Err(ApiError::AuthenticationFailed {
            reason: String::from("Current password is incorrect"),
        });
    }

    let policy: PasswordPolicy = PasswordPolicy::default();
    policy.validate(&request.new_password, &user.email)?;

    store
        .persistence()
        .set_password(user.id, &request.new_password)?;
    let revoked: usize = store.persistence().delete_sessions_for_user(user.id)?;
    info!(user_id = %user.id, revoked, "Password changed");
    Ok(())
}

/// Deletes a user.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins or self-deletion, and `Conflict` for
/// the last admin or a tenant with a lease or payment in flight.
pub fn delete_user(
    store: &mut Store,
    session: &Session,
    user_id: UserId,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let committed: Committed = store.execute(session, Command::DeleteUser { user_id }, cause)?;
    info!(%user_id, deleted_by = %session.user_id, "User deleted");
    Ok(write_response(&committed, format!("Deleted user {user_id}")))
}

/// Lists every user with the caller's capabilities on each.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins.
pub fn list_users(store: &Store, session: &Session) -> Result<Vec<UserListEntry>, ApiError> {
    admin_only(session)?;
    let state: &State = store.state();
    Ok(state
        .users()
        .into_iter()
        .map(|user| UserListEntry {
            user: UserInfo::from(user),
            capabilities: compute_user_capabilities(session, user, state),
        })
        .collect())
}

// ============================================================================
// Apartments
// ============================================================================

fn listing_from(request: ApartmentRequest) -> ApartmentListing {
    ApartmentListing {
        name: request.name,
        description: request.description,
        address: request.address,
        bedrooms: request.bedrooms,
        bathrooms: request.bathrooms,
        price: request.price,
        image_url: request.image_url,
    }
}

fn apartment_response(
    store: &Store,
    apartment_id: ApartmentId,
    committed: &Committed,
) -> Result<ApartmentResponse, ApiError> {
    let apartment: &Apartment = store
        .state()
        .apartment(apartment_id)
        .map_err(translate_core_error)?;
    Ok(ApartmentResponse {
        apartment: apartment.clone(),
        event_id: committed.event_id,
    })
}

/// Lists apartments, optionally only those open for booking.
#[must_use]
pub fn list_apartments(store: &Store, request: ListApartmentsRequest) -> Vec<Apartment> {
    let state: &State = store.state();
    if request.available.unwrap_or(false) {
        list_available(state, request.min_bedrooms)
            .into_iter()
            .cloned()
            .collect()
    } else {
        state
            .apartments()
            .into_iter()
            .filter(|apartment| {
                request
                    .min_bedrooms
                    .is_none_or(|min| apartment.bedrooms >= min)
            })
            .cloned()
            .collect()
    }
}

/// Creates an apartment listing.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidInput` for a bad field.
pub fn create_apartment(
    store: &mut Store,
    session: &Session,
    request: ApartmentRequest,
    cause: Cause,
) -> Result<ApartmentResponse, ApiError> {
    let apartment_id: ApartmentId = ApartmentId::generate();
    let committed: Committed = store.execute(
        session,
        Command::CreateApartment {
            apartment_id,
            listing: listing_from(request),
        },
        cause,
    )?;
    info!(%apartment_id, "Apartment created");
    apartment_response(store, apartment_id, &committed)
}

/// Edits an apartment listing. Existing bookings keep their rent.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `NotFound` for an unknown apartment
/// and `InvalidInput` for a bad field.
pub fn update_apartment(
    store: &mut Store,
    session: &Session,
    apartment_id: ApartmentId,
    request: ApartmentRequest,
    cause: Cause,
) -> Result<ApartmentResponse, ApiError> {
    let committed: Committed = store.execute(
        session,
        Command::UpdateApartment {
            apartment_id,
            listing: listing_from(request),
        },
        cause,
    )?;
    apartment_response(store, apartment_id, &committed)
}

/// Changes an apartment's availability.
///
/// # Errors
///
/// Returns `InvalidTransition` for a move to `occupied` and `Conflict`
/// while the apartment is leased.
pub fn set_apartment_status(
    store: &mut Store,
    session: &Session,
    apartment_id: ApartmentId,
    request: SetApartmentStatusRequest,
    cause: Cause,
) -> Result<ApartmentResponse, ApiError> {
    let committed: Committed = store.execute(
        session,
        Command::SetApartmentStatus {
            apartment_id,
            status: request.status,
        },
        cause,
    )?;
    apartment_response(store, apartment_id, &committed)
}

/// Deletes an apartment and its unleased bookings.
///
/// # Errors
///
/// Returns `Conflict` if the apartment is leased or a payment is in flight.
pub fn delete_apartment(
    store: &mut Store,
    session: &Session,
    apartment_id: ApartmentId,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let committed: Committed =
        store.execute(session, Command::DeleteApartment { apartment_id }, cause)?;
    info!(%apartment_id, "Apartment deleted");
    Ok(write_response(
        &committed,
        format!("Deleted apartment {apartment_id}"),
    ))
}

// ============================================================================
// Bookings
// ============================================================================

/// Submits a booking request for the caller.
///
/// # Errors
///
/// Returns `Forbidden` for admins, `ApartmentUnavailable` unless the
/// apartment is open for booking, and `Conflict` for a duplicate request.
pub fn submit_booking(
    store: &mut Store,
    session: &Session,
    request: CreateBookingRequest,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let booking_id: BookingId = BookingId::generate();
    let committed: Committed = store.execute(
        session,
        Command::SubmitBooking {
            booking_id,
            apartment_id: request.apartment_id,
            lease_start: request.lease_start,
        },
        cause,
    )?;
    info!(%booking_id, apartment_id = %request.apartment_id, tenant_id = %session.user_id, "Booking submitted");
    booking_response(store, session, booking_id, &committed)
}

/// Lists bookings: all of them for admins, one's own for tenants.
#[must_use]
pub fn list_bookings(store: &Store, session: &Session) -> Vec<BookingInfo> {
    let state: &State = store.state();
    state
        .bookings()
        .into_iter()
        .filter(|booking| session.is_admin() || booking.tenant_id == session.user_id)
        .map(|booking| booking_info(state, session, booking))
        .collect()
}

/// Approves a booking request, making it payable.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidTransition` unless the
/// booking awaits approval.
pub fn approve_booking(
    store: &mut Store,
    session: &Session,
    booking_id: BookingId,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let committed: Committed =
        store.execute(session, Command::ApproveBooking { booking_id }, cause)?;
    info!(%booking_id, approved_by = %session.user_id, "Booking approved");
    booking_response(store, session, booking_id, &committed)
}

/// Rejects a booking request.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidTransition` unless the
/// booking awaits approval.
pub fn reject_booking(
    store: &mut Store,
    session: &Session,
    booking_id: BookingId,
    cause: Cause,
) -> Result<BookingResponse, ApiError> {
    let committed: Committed =
        store.execute(session, Command::RejectBooking { booking_id }, cause)?;
    booking_response(store, session, booking_id, &committed)
}

/// Withdraws the caller's own open booking.
///
/// # Errors
///
/// Returns `Forbidden` for another tenant's booking, `InvalidTransition`
/// once the booking is settled, and `Conflict` while a payment is pending.
pub fn cancel_booking(
    store: &mut Store,
    session: &Session,
    booking_id: BookingId,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let committed: Committed =
        store.execute(session, Command::CancelBooking { booking_id }, cause)?;
    Ok(write_response(
        &committed,
        format!("Cancelled booking {booking_id}"),
    ))
}

/// Deletes a booking that holds no lease.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, `InvalidTransition` for a confirmed
/// booking, and `Conflict` while a payment is pending.
pub fn delete_booking(
    store: &mut Store,
    session: &Session,
    booking_id: BookingId,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let committed: Committed =
        store.execute(session, Command::DeleteBooking { booking_id }, cause)?;
    Ok(write_response(
        &committed,
        format!("Deleted booking {booking_id}"),
    ))
}

/// Deletes every booking in the given statuses, skipping any with a
/// pending payment.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidTransition` if
/// `confirmed` is requested.
pub fn purge_bookings(
    store: &mut Store,
    session: &Session,
    request: PurgeBookingsRequest,
    cause: Cause,
) -> Result<PurgeBookingsResponse, ApiError> {
    let candidates: Vec<BookingId> = store
        .state()
        .bookings()
        .into_iter()
        .filter(|booking| request.statuses.contains(&booking.status))
        .map(|booking| booking.id)
        .collect();

    let committed: Committed = store.execute(
        session,
        Command::PurgeBookings {
            statuses: request.statuses,
        },
        cause,
    )?;

    let removed: Vec<BookingId> = candidates
        .into_iter()
        .filter(|id| store.state().booking(*id).is_err())
        .collect();
    info!(removed = removed.len(), "Bookings purged");

    Ok(PurgeBookingsResponse {
        removed,
        event_id: committed.event_id,
    })
}

// ============================================================================
// Payments
// ============================================================================

/// Lists payments: all of them for admins, one's own for tenants.
#[must_use]
pub fn list_payments(store: &Store, session: &Session) -> Vec<Payment> {
    store
        .state()
        .payments()
        .into_iter()
        .filter(|payment| session.is_admin() || payment.tenant_id == session.user_id)
        .cloned()
        .collect()
}

/// Resolves a payment left pending by settling or failing it.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidTransition` if the payment
/// is no longer pending or its booking can no longer be confirmed.
pub fn reconcile_payment(
    store: &mut Store,
    session: &Session,
    payment_id: PaymentId,
    request: ReconcilePaymentRequest,
    cause: Cause,
) -> Result<PaymentResponse, ApiError> {
    let outcome: Reconciliation = match request {
        ReconcilePaymentRequest::Completed {
            receipt,
            transaction_id,
        } => Reconciliation::Completed {
            receipt,
            transaction_id,
        },
        ReconcilePaymentRequest::Failed { reason } => Reconciliation::Failed { reason },
    };

    let committed: Committed = store.execute(
        session,
        Command::ReconcilePayment {
            payment_id,
            outcome,
        },
        cause,
    )?;
    let payment: &Payment = store
        .state()
        .payment(payment_id)
        .map_err(translate_core_error)?;
    info!(%payment_id, status = %payment.status, "Payment reconciled");

    Ok(PaymentResponse {
        payment: payment.clone(),
        event_id: committed.event_id,
        message: format!("Payment {payment_id} is {}", payment.status),
    })
}

// ============================================================================
// Payout Accounts
// ============================================================================

/// Lists the caller's payout accounts in stored order.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins.
pub fn list_payout_accounts(
    store: &Store,
    session: &Session,
) -> Result<Vec<PayoutAccount>, ApiError> {
    admin_only(session)?;
    Ok(store
        .state()
        .accounts_for_admin(session.user_id)
        .cloned()
        .collect())
}

fn payout_account_response(
    store: &Store,
    account_id: PayoutAccountId,
    committed: &Committed,
) -> Result<PayoutAccountResponse, ApiError> {
    let account: &PayoutAccount = store
        .state()
        .payout_account(account_id)
        .map_err(translate_core_error)?;
    Ok(PayoutAccountResponse {
        account: account.clone(),
        event_id: committed.event_id,
    })
}

/// Adds a payout account for the caller. An admin's first account becomes
/// their default.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidInput` for bad details.
pub fn add_payout_account(
    store: &mut Store,
    session: &Session,
    details: AccountDetails,
    cause: Cause,
) -> Result<PayoutAccountResponse, ApiError> {
    let account_id: PayoutAccountId = PayoutAccountId::generate();
    let committed: Committed = store.execute(
        session,
        Command::AddPayoutAccount {
            account_id,
            details,
        },
        cause,
    )?;
    info!(%account_id, admin_id = %session.user_id, "Payout account added");
    payout_account_response(store, account_id, &committed)
}

/// Makes one of the caller's accounts their default.
///
/// # Errors
///
/// Returns `NotFound` unless the account belongs to the caller.
pub fn set_default_payout_account(
    store: &mut Store,
    session: &Session,
    account_id: PayoutAccountId,
    cause: Cause,
) -> Result<PayoutAccountResponse, ApiError> {
    let committed: Committed = store.execute(
        session,
        Command::SetDefaultPayoutAccount { account_id },
        cause,
    )?;
    payout_account_response(store, account_id, &committed)
}

/// Removes one of the caller's accounts, promoting another if it was the
/// default.
///
/// # Errors
///
/// Returns `NotFound` unless the account belongs to the caller.
pub fn remove_payout_account(
    store: &mut Store,
    session: &Session,
    account_id: PayoutAccountId,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let committed: Committed = store.execute(
        session,
        Command::RemovePayoutAccount { account_id },
        cause,
    )?;
    Ok(write_response(
        &committed,
        format!("Removed payout account {account_id}"),
    ))
}

// ============================================================================
// Saved Payment Methods
// ============================================================================

/// Lists the caller's saved payment methods in stored order.
///
/// # Errors
///
/// Returns `Forbidden` for admins.
pub fn list_payment_methods(
    store: &Store,
    session: &Session,
) -> Result<Vec<SavedPaymentMethod>, ApiError> {
    if session.is_admin() {
        return Err(ApiError::Forbidden {
            message: String::from("saved payment methods belong to tenants"),
        });
    }
    Ok(store
        .state()
        .methods_for_tenant(session.user_id)
        .cloned()
        .collect())
}

fn payment_method_response(
    store: &Store,
    method_id: PaymentMethodId,
    committed: &Committed,
) -> Result<PaymentMethodResponse, ApiError> {
    let method: &SavedPaymentMethod = store
        .state()
        .saved_method(method_id)
        .map_err(translate_core_error)?;
    Ok(PaymentMethodResponse {
        method: method.clone(),
        event_id: committed.event_id,
    })
}

/// Saves a payment method for the caller. A tenant's first method becomes
/// their default.
///
/// # Errors
///
/// Returns `Forbidden` for admins and `InvalidInput` for a bad phone, card
/// number or expiry.
pub fn add_payment_method(
    store: &mut Store,
    session: &Session,
    method: NewPaymentMethod,
    cause: Cause,
) -> Result<PaymentMethodResponse, ApiError> {
    let method_id: PaymentMethodId = PaymentMethodId::generate();
    let committed: Committed = store.execute(
        session,
        Command::AddPaymentMethod { method_id, method },
        cause,
    )?;
    info!(%method_id, tenant_id = %session.user_id, "Payment method saved");
    payment_method_response(store, method_id, &committed)
}

/// Makes one of the caller's methods their default.
///
/// # Errors
///
/// Returns `NotFound` unless the method belongs to the caller.
pub fn set_default_payment_method(
    store: &mut Store,
    session: &Session,
    method_id: PaymentMethodId,
    cause: Cause,
) -> Result<PaymentMethodResponse, ApiError> {
    let committed: Committed = store.execute(
        session,
        Command::SetDefaultPaymentMethod { method_id },
        cause,
    )?;
    payment_method_response(store, method_id, &committed)
}

/// Removes one of the caller's methods, promoting another if it was the
/// default.
///
/// # Errors
///
/// Returns `NotFound` unless the method belongs to the caller.
pub fn remove_payment_method(
    store: &mut Store,
    session: &Session,
    method_id: PaymentMethodId,
    cause: Cause,
) -> Result<WriteResponse, ApiError> {
    let committed: Committed = store.execute(
        session,
        Command::RemovePaymentMethod { method_id },
        cause,
    )?;
    Ok(write_response(
        &committed,
        format!("Removed payment method {method_id}"),
    ))
}

// ============================================================================
// Contact
// ============================================================================

/// Returns the public contact details. Anyone may read them.
#[must_use]
pub fn get_contact(store: &Store) -> ContactInfo {
    store.state().contact().clone()
}

/// Replaces the public contact details.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `InvalidInput` if a required
/// field is blank or the email is malformed.
pub fn update_contact(
    store: &mut Store,
    session: &Session,
    contact: ContactInfo,
    cause: Cause,
) -> Result<ContactResponse, ApiError> {
    let committed: Committed =
        store.execute(session, Command::UpdateContactInfo { contact }, cause)?;
    info!(admin_id = %session.user_id, "Contact details updated");
    Ok(ContactResponse {
        contact: store.state().contact().clone(),
        event_id: committed.event_id,
    })
}

// ============================================================================
// Dashboard & Audit
// ============================================================================

/// Returns the dashboard figures.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins.
pub fn dashboard(store: &Store, session: &Session) -> Result<DashboardResponse, ApiError> {
    admin_only(session)?;
    Ok(DashboardResponse::from(dashboard_stats(store.state())))
}

/// Reads the audit log, newest first.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins, and `InvalidInput` for a half-given
/// subject filter or a non-positive limit.
pub fn list_audit_events(
    store: &mut Store,
    session: &Session,
    request: &ListAuditEventsRequest,
) -> Result<Vec<AuditEvent>, ApiError> {
    admin_only(session)?;

    let limit: i64 = request.limit.unwrap_or(DEFAULT_AUDIT_LIMIT);
    if limit <= 0 {
        return Err(ApiError::InvalidInput {
            field: String::from("limit"),
            message: String::from("limit must be positive"),
        });
    }

    let events: Vec<AuditEvent> = match (&request.subject_kind, &request.subject_id) {
        (Some(kind), Some(id)) => store
            .persistence()
            .list_audit_events_for(kind, id, limit)?,
        (None, None) => store.persistence().list_audit_events(limit)?,
        _ => {
            return Err(ApiError::InvalidInput {
                field: String::from("subject"),
                message: String::from("subject_kind and subject_id must be given together"),
            });
        }
    };
    debug!(count = events.len(), "Audit events listed");
    Ok(events)
}
