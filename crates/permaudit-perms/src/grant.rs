//! Grant resolution.
//!
//! Given a permission and the applications that request it, find the
//! applications that actually hold it.

use std::sync::Arc;

use permaudit_core::PermissionId;

use crate::app::AppRecord;

/// Whether `app` both requests `id` and holds a granted record for it.
pub fn holds_grant<A: AppRecord + ?Sized>(app: &A, id: &PermissionId) -> bool {
    if !app.requests_permission(id) {
        return false;
    }

    app.get_permission(id)
        .map(|grant| grant.is_granted())
        .unwrap_or(false)
}

/// Filter `requesting` down to the applications currently granted `id`.
///
/// The request is re-checked for every candidate, so callers may pass a
/// broader list than the true requesters. Input order is preserved.
/// Applications without a grant record, or whose record is not granted,
/// are left out.
pub fn resolve_granting<A: AppRecord + ?Sized>(
    id: &PermissionId,
    requesting: &[Arc<A>],
) -> Vec<Arc<A>> {
    requesting
        .iter()
        .filter(|app| holds_grant::<A>(app, id))
        .cloned()
        .collect()
}
