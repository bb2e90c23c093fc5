//! The application record contract.
//!
//! Installed applications are owned by whatever enumerated them. This crate
//! only needs to ask two questions of an application, captured by
//! [`AppRecord`].

use serde::{Deserialize, Serialize};

use permaudit_core::PermissionId;

/// Runtime grant state an application holds for one permission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PermissionGrant {
    /// Whether the permission is currently granted.
    pub granted: bool,
}

impl PermissionGrant {
    /// A grant record in the granted state.
    pub const fn granted() -> Self {
        Self { granted: true }
    }

    /// A grant record in the denied state.
    pub const fn denied() -> Self {
        Self { granted: false }
    }

    pub const fn is_granted(&self) -> bool {
        self.granted
    }
}

impl From<bool> for PermissionGrant {
    fn from(granted: bool) -> Self {
        Self { granted }
    }
}

/// What the permission model needs to know about an installed application.
///
/// Implementations are read-only views. Nothing in this crate mutates an
/// application or its grant state.
pub trait AppRecord: Send + Sync {
    /// Whether the application lists `id` among the permissions it wants.
    fn requests_permission(&self, id: &PermissionId) -> bool;

    /// The application's grant record for `id`, if it has one.
    ///
    /// `None` means the application holds no grant state for the
    /// permission at all, which is treated the same as not granted.
    fn get_permission(&self, id: &PermissionId) -> Option<PermissionGrant>;
}
