//! Declared permissions.
//!
//! A [`DeclaredPermission`] is one permission some installed application
//! defines, together with the applications that request and declare it.
//! Protection metadata and the set of granting applications are derived
//! from those inputs on demand and cached.

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, OnceLock};

use permaudit_core::{PermissionId, ProtectionFlags, ProtectionType, RawPermissionInfo};

use crate::app::AppRecord;
use crate::grant::resolve_granting;

/// A declared permission and the applications related to it.
///
/// Equality and hashing look only at the permission identity. Label,
/// description and the application lists are ignored, so entities can be
/// deduplicated or used as map keys before their lists are filled in.
///
/// `protection_flags` and `granting_pkgs` are computed on first access and
/// then fixed for the life of the value. Grant state is read once; to see
/// fresh grant state, build a new entity from a fresh inventory.
pub struct DeclaredPermission<A: AppRecord + ?Sized = dyn AppRecord> {
    /// Identity, derived from `info.name`.
    id: PermissionId,

    /// Raw protection info as reported by the platform.
    info: RawPermissionInfo,

    /// Human-readable label, if one resolved.
    label: Option<String>,

    /// Human-readable description, if one resolved.
    description: Option<String>,

    /// Applications requesting this permission, in inventory order.
    requesting_pkgs: Vec<Arc<A>>,

    /// Applications declaring this permission.
    declaring_pkgs: Vec<Arc<A>>,

    /// Classified at construction.
    protection_type: ProtectionType,

    protection_flags: OnceLock<ProtectionFlags>,

    granting_pkgs: OnceLock<Vec<Arc<A>>>,
}

impl<A: AppRecord + ?Sized> DeclaredPermission<A> {
    /// Create a declared permission with no metadata and no related apps.
    pub fn new(info: RawPermissionInfo) -> Self {
        Self {
            id: info.id(),
            protection_type: info.protection_type(),
            info,
            label: None,
            description: None,
            requesting_pkgs: Vec::new(),
            declaring_pkgs: Vec::new(),
            protection_flags: OnceLock::new(),
            granting_pkgs: OnceLock::new(),
        }
    }

    /// Create a declared permission from all of its inputs at once.
    pub fn from_parts(
        info: RawPermissionInfo,
        label: Option<String>,
        description: Option<String>,
        requesting_pkgs: Vec<Arc<A>>,
        declaring_pkgs: Vec<Arc<A>>,
    ) -> Self {
        let mut permission = Self::new(info);
        permission.label = label;
        permission.description = description;
        permission.requesting_pkgs = requesting_pkgs;
        permission.declaring_pkgs = declaring_pkgs;
        permission
    }

    /// Set the label.
    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Set the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Set the requesting applications.
    ///
    /// Drops any granting set already resolved from the previous list.
    pub fn with_requesting(mut self, apps: Vec<Arc<A>>) -> Self {
        self.requesting_pkgs = apps;
        self.granting_pkgs = OnceLock::new();
        self
    }

    /// Set the declaring applications.
    pub fn with_declaring(mut self, apps: Vec<Arc<A>>) -> Self {
        self.declaring_pkgs = apps;
        self
    }

    pub fn id(&self) -> &PermissionId {
        &self.id
    }

    pub fn info(&self) -> &RawPermissionInfo {
        &self.info
    }

    pub fn label(&self) -> Option<&str> {
        self.label.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }

    pub fn requesting_pkgs(&self) -> &[Arc<A>] {
        &self.requesting_pkgs
    }

    pub fn declaring_pkgs(&self) -> &[Arc<A>] {
        &self.declaring_pkgs
    }

    pub fn protection_type(&self) -> ProtectionType {
        self.protection_type
    }

    /// Decoded protection flags. Computed once.
    pub fn protection_flags(&self) -> &ProtectionFlags {
        self.protection_flags
            .get_or_init(|| self.info.protection_flags())
    }

    /// Requesting applications that currently hold this permission,
    /// in requesting order. Computed once.
    pub fn granting_pkgs(&self) -> &[Arc<A>] {
        self.granting_pkgs
            .get_or_init(|| resolve_granting(&self.id, &self.requesting_pkgs))
    }

    pub fn granting_count(&self) -> usize {
        self.granting_pkgs().len()
    }
}

impl<A: AppRecord + ?Sized> PartialEq for DeclaredPermission<A> {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl<A: AppRecord + ?Sized> Eq for DeclaredPermission<A> {}

impl<A: AppRecord + ?Sized> Hash for DeclaredPermission<A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl<A: AppRecord + ?Sized> fmt::Display for DeclaredPermission<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "DeclaredPermission({})", self.id)
    }
}

impl<A: AppRecord + ?Sized> fmt::Debug for DeclaredPermission<A> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeclaredPermission")
            .field("id", &self.id)
            .field("protection_type", &self.protection_type)
            .field("protection_flags", &self.info.protection_flags)
            .field("requesting", &self.requesting_pkgs.len())
            .field("declaring", &self.declaring_pkgs.len())
            .finish()
    }
}
