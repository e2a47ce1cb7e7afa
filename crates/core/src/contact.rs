// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

use crate::access::require_admin;
use crate::change::Change;
use crate::error::CoreError;
use crate::session::Session;
use rentdesk_domain::ContactInfo;

/// Replaces the organisation's contact details.
///
/// # Errors
///
/// Returns `Forbidden` for non-admins and `DomainViolation` if a required
/// field is blank or the email is malformed.
pub(crate) fn update(session: &Session, contact: ContactInfo) -> Result<Vec<Change>, CoreError> {
    require_admin(session)?;
    Ok(vec![Change::PutContactInfo(contact.normalized()?)])
}
