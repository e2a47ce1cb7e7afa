// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Payout account registry.
//!
//! Each admin owns an ordered list of accounts. Whenever the list is
//! non-empty exactly one of them is the default.

use crate::access::require_admin;
use crate::change::Change;
use crate::error::CoreError;
use crate::session::Session;
use crate::state::State;
use rentdesk_domain::{AccountDetails, PayoutAccount, PayoutAccountId, User};
use time::OffsetDateTime;

/// Adds a payout account for the acting admin.
///
/// The admin's first account becomes the default.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `DomainViolation` if the details
/// do not validate.
pub(crate) fn add(
    state: &State,
    session: &Session,
    account_id: PayoutAccountId,
    details: AccountDetails,
    at: OffsetDateTime,
) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    state.user(session.user_id)?;

    let details: AccountDetails = details.normalized()?;
    let is_default: bool = state.accounts_for_admin(session.user_id).next().is_none();

    Ok(vec![Change::PutPayoutAccount(PayoutAccount {
        id: account_id,
        admin_id: session.user_id,
        details,
        is_default,
        created_at: at,
    })])
}

/// Looks up an account owned by the acting admin.
///
/// Accounts of other admins are reported as missing.
fn owned_account<'a>(
    state: &'a State,
    session: &Session,
    account_id: PayoutAccountId,
) -> Result<&'a PayoutAccount, CoreError> {
    require_admin(session)?;
    match state.payout_account(account_id) {
        Ok(account) if account.admin_id == session.user_id => Ok(account),
        _ => Err(CoreError::not_found("payout account", account_id)),
    }
}

/// Makes an account the acting admin's default.
///
/// The previous default is unmarked first.
///
/// # Errors
///
/// Returns `NotFound` if the account does not belong to the admin.
pub(crate) fn set_default(
    state: &State,
    session: &Session,
    account_id: PayoutAccountId,
) -> Result<Vec<Change>, CoreError> {
    let account: &PayoutAccount = owned_account(state, session, account_id)?;
    if account.is_default {
        return Ok(Vec::new());
    }

    let mut changes: Vec<Change> = state
        .accounts_for_admin(session.user_id)
        .filter(|other| other.is_default)
        .map(|other| {
            Change::PutPayoutAccount(PayoutAccount {
                is_default: false,
                ..other.clone()
            })
        })
        .collect();
    changes.push(Change::PutPayoutAccount(PayoutAccount {
        is_default: true,
        ..account.clone()
    }));
    Ok(changes)
}

/// Removes one of the acting admin's accounts.
///
/// Removing the default promotes the first remaining account in stored
/// order.
///
/// # Errors
///
/// Returns `NotFound` if the account does not belong to the admin.
pub(crate) fn remove(
    state: &State,
    session: &Session,
    account_id: PayoutAccountId,
) -> Result<Vec<Change>, CoreError> {
    let account: &PayoutAccount = owned_account(state, session, account_id)?;
    let mut changes: Vec<Change> = vec![Change::DeletePayoutAccount(account_id)];

    if account.is_default
        && let Some(successor) = state
            .accounts_for_admin(account.admin_id)
            .find(|other| other.id != account_id)
    {
        changes.push(Change::PutPayoutAccount(PayoutAccount {
            is_default: true,
            ..successor.clone()
        }));
    }
    Ok(changes)
}

/// The account that receives tenant payments.
///
/// Payments go to the default account of the longest-standing admin that
/// has configured one.
#[must_use]
pub fn receiving_account(state: &State) -> Option<&PayoutAccount> {
    state
        .users()
        .into_iter()
        .filter(|user: &&User| user.is_admin())
        .find_map(|admin| state.default_account(admin.id))
}
