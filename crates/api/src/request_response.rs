// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! API request and response data transfer objects.

use rentdesk::DashboardStats;
use rentdesk_domain::{
    Apartment, ApartmentId, ApartmentStatus, Booking, BookingId, BookingStatus, ContactInfo,
    Decimal, Payment, PaymentMethod, PayoutAccount, PeriodMonth, Role, SavedPaymentMethod, User,
    UserId,
};
use serde::{Deserialize, Serialize};
use time::{Date, OffsetDateTime};

time::serde::format_description!(iso_date, Date, "[year]-[month]-[day]");

// ============================================================================
// Capabilities
// ============================================================================

/// Represents whether a specific action is permitted.
///
/// This enum provides better type safety than raw booleans and serializes
/// to JSON as true/false for API compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// The action is permitted.
    Allowed,
    /// The action is not permitted.
    Denied,
}

impl Capability {
    /// Returns true if the capability is allowed.
    #[must_use]
    pub const fn is_allowed(self) -> bool {
        matches!(self, Self::Allowed)
    }

    /// Creates a capability from a boolean value.
    #[must_use]
    pub const fn from_bool(value: bool) -> Self {
        if value { Self::Allowed } else { Self::Denied }
    }
}

impl Serialize for Capability {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_bool(self.is_allowed())
    }
}

impl<'de> Deserialize<'de> for Capability {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        Ok(Self::from_bool(bool::deserialize(deserializer)?))
    }
}

/// What the signed-in user may do in general.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct GlobalCapabilities {
    /// Create, edit and delete apartment listings.
    pub can_manage_apartments: Capability,
    /// Approve or reject booking requests.
    pub can_review_bookings: Capability,
    /// Create admins and delete users.
    pub can_manage_users: Capability,
    /// Maintain one's own payout accounts.
    pub can_manage_payout_accounts: Capability,
    /// View dashboard figures and the audit log.
    pub can_view_dashboard: Capability,
    /// Edit the public contact details.
    pub can_edit_contact: Capability,
    /// Submit booking requests.
    pub can_request_bookings: Capability,
    /// Maintain one's own saved payment methods.
    pub can_save_payment_methods: Capability,
}

/// What the signed-in user may do to another user.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserCapabilities {
    /// Edit the profile.
    pub can_edit: Capability,
    /// Delete the user.
    pub can_delete: Capability,
}

/// What the signed-in user may do to a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingCapabilities {
    /// Approve the request.
    pub can_approve: Capability,
    /// Reject the request.
    pub can_reject: Capability,
    /// Withdraw the request.
    pub can_cancel: Capability,
    /// Pay the first month's rent.
    pub can_pay: Capability,
    /// Delete the booking.
    pub can_delete: Capability,
}

// ============================================================================
// Authentication
// ============================================================================

/// API request to log in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginRequest {
    /// The login email.
    pub email: String,
    /// The plain-text password.
    pub password: String,
}

/// API response for a successful login.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginResponse {
    /// The bearer token for subsequent requests.
    pub session_token: String,
    /// When the token expires.
    #[serde(with = "time::serde::rfc3339")]
    pub expires_at: OffsetDateTime,
    /// The signed-in user.
    pub user: UserInfo,
    /// What the user may do.
    pub capabilities: GlobalCapabilities,
}

/// API response describing the signed-in user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhoAmIResponse {
    /// The signed-in user.
    pub user: UserInfo,
    /// What the user may do.
    pub capabilities: GlobalCapabilities,
}

// ============================================================================
// Users
// ============================================================================

/// User information returned by the API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserInfo {
    /// The user's identifier.
    pub id: UserId,
    /// The user's email.
    pub email: String,
    /// Display name.
    pub full_name: String,
    /// Contact number.
    pub phone: Option<String>,
    /// The user's role.
    pub role: Role,
    /// When the user registered.
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
}

impl From<&User> for UserInfo {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            full_name: user.full_name.clone(),
            phone: user.phone.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// A user as listed for an admin, with per-user capabilities.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserListEntry {
    /// The user.
    #[serde(flatten)]
    pub user: UserInfo,
    /// What the caller may do to this user.
    pub capabilities: UserCapabilities,
}

/// API request to register a user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserRequest {
    /// The login email.
    pub email: String,
    /// The initial password.
    pub password: String,
    /// Display name.
    pub full_name: String,
    /// Optional contact number.
    #[serde(default)]
    pub phone: Option<String>,
    /// Requested role; tenant when omitted.
    #[serde(default)]
    pub role: Option<Role>,
}

/// API response for a successful registration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegisterUserResponse {
    /// The new user.
    pub user: UserInfo,
    /// The audit event ID.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// API request to update a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateProfileRequest {
    /// New display name.
    pub full_name: String,
    /// New contact number; `None` clears it.
    #[serde(default)]
    pub phone: Option<String>,
}

/// API request to change one's own password.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangePasswordRequest {
    /// The current password.
    pub current_password: String,
    /// The replacement password.
    pub new_password: String,
}

// ============================================================================
// Apartments
// ============================================================================

/// API request to create or edit an apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentRequest {
    /// Listing name.
    pub name: String,
    /// Free-form description.
    #[serde(default)]
    pub description: String,
    /// Street address.
    pub address: String,
    /// Number of bedrooms.
    pub bedrooms: u8,
    /// Number of bathrooms.
    pub bathrooms: u8,
    /// Monthly price.
    pub price: Decimal,
    /// Opaque image reference.
    #[serde(default)]
    pub image_url: Option<String>,
}

/// API response for a created or edited apartment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ApartmentResponse {
    /// The apartment as stored.
    pub apartment: Apartment,
    /// The audit event ID.
    pub event_id: i64,
}

/// API request to change an apartment's status.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetApartmentStatusRequest {
    /// The requested status.
    pub status: ApartmentStatus,
}

/// Filters for listing apartments.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListApartmentsRequest {
    /// Only apartments open for booking.
    #[serde(default)]
    pub available: Option<bool>,
    /// Minimum number of bedrooms.
    #[serde(default)]
    pub min_bedrooms: Option<u8>,
}

// ============================================================================
// Bookings
// ============================================================================

/// API request to submit a booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreateBookingRequest {
    /// The apartment requested.
    pub apartment_id: ApartmentId,
    /// Requested lease start.
    #[serde(with = "iso_date")]
    pub lease_start: Date,
}

/// A booking with the caller's capabilities on it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingInfo {
    /// The booking.
    #[serde(flatten)]
    pub booking: Booking,
    /// The apartment's name.
    pub apartment_name: String,
    /// What the caller may do to this booking.
    pub capabilities: BookingCapabilities,
}

/// API response for a submitted or reviewed booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BookingResponse {
    /// The booking as stored.
    pub booking: BookingInfo,
    /// The audit event ID.
    pub event_id: i64,
}

/// API request to purge bookings by status.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeBookingsRequest {
    /// The statuses to purge.
    pub statuses: Vec<BookingStatus>,
}

/// API response for a purge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PurgeBookingsResponse {
    /// The bookings removed.
    pub removed: Vec<BookingId>,
    /// The audit event ID.
    pub event_id: i64,
}

// ============================================================================
// Payments
// ============================================================================

/// API request to pay rent on an approved booking.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayRentRequest {
    /// The booking being paid for.
    pub booking_id: BookingId,
    /// The payment method.
    pub method: PaymentMethod,
    /// The amount offered; the booking's rent when omitted.
    #[serde(default)]
    pub amount: Option<Decimal>,
    /// The rent month covered; the current month when omitted.
    #[serde(default)]
    pub period_month: Option<PeriodMonth>,
}

/// API response for a payment write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentResponse {
    /// The payment as stored.
    pub payment: Payment,
    /// The audit event ID of the last write.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}

/// How an admin resolved a pending payment.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum ReconcilePaymentRequest {
    /// The provider confirmed the funds.
    Completed {
        /// Provider receipt.
        #[serde(default)]
        receipt: Option<String>,
        /// Provider transaction reference.
        transaction_id: String,
    },
    /// The provider reported no funds.
    Failed {
        /// Why the payment failed.
        reason: String,
    },
}

// ============================================================================
// Payout Accounts
// ============================================================================

/// API response for an added or promoted payout account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PayoutAccountResponse {
    /// The account as stored.
    pub account: PayoutAccount,
    /// The audit event ID.
    pub event_id: i64,
}

// ============================================================================
// Saved Payment Methods & Contact
// ============================================================================

/// API response for a saved or promoted payment method.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PaymentMethodResponse {
    /// The method as stored.
    pub method: SavedPaymentMethod,
    /// The audit event ID.
    pub event_id: i64,
}

/// API response for saved contact details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContactResponse {
    /// The details as stored.
    pub contact: ContactInfo,
    /// The audit event ID.
    pub event_id: i64,
}

// ============================================================================
// Dashboard & Writes
// ============================================================================

/// Dashboard figures.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DashboardResponse {
    /// Number of listed apartments.
    pub total_apartments: usize,
    /// Apartments under a confirmed lease.
    pub occupied_apartments: usize,
    /// Apartments open for booking.
    pub available_apartments: usize,
    /// Distinct tenants holding a confirmed booking.
    pub active_tenants: usize,
    /// Bookings awaiting review.
    pub pending_approvals: usize,
    /// Sum of completed payments.
    pub revenue: Decimal,
}

impl From<DashboardStats> for DashboardResponse {
    fn from(stats: DashboardStats) -> Self {
        Self {
            total_apartments: stats.total_apartments,
            occupied_apartments: stats.occupied_apartments,
            available_apartments: stats.available_apartments,
            active_tenants: stats.active_tenants,
            pending_approvals: stats.pending_approvals,
            revenue: stats.revenue,
        }
    }
}

/// Filters for reading the audit log.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ListAuditEventsRequest {
    /// Only events about this kind of record; requires `subject_id`.
    #[serde(default)]
    pub subject_kind: Option<String>,
    /// Only events about this record; requires `subject_kind`.
    #[serde(default)]
    pub subject_id: Option<String>,
    /// Maximum number of events, newest first.
    #[serde(default)]
    pub limit: Option<i64>,
}

/// Generic response for a committed write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WriteResponse {
    /// The audit event ID.
    pub event_id: i64,
    /// A success message.
    pub message: String,
}
