//! Serializable reports over a catalog.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::{Deserialize, Serialize};

use permaudit_core::{PermissionId, ProtectionFlags, ProtectionType};

use crate::catalog::CatalogPermission;
use crate::error::Result;
use crate::inventory::InstalledApp;

fn package_names(apps: &[Arc<InstalledApp>]) -> Vec<String> {
    apps.iter().map(|app| app.package_name.clone()).collect()
}

/// What is known about one declared permission, with apps named by package.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PermissionReport {
    pub id: PermissionId,
    pub protection_type: ProtectionType,
    pub protection_flags: ProtectionFlags,
    pub label: Option<String>,
    pub description: Option<String>,
    pub requesting: Vec<String>,
    pub declaring: Vec<String>,
    pub granting: Vec<String>,
}

impl PermissionReport {
    pub fn from_permission(permission: &CatalogPermission) -> Self {
        Self {
            id: permission.id().clone(),
            protection_type: permission.protection_type(),
            protection_flags: *permission.protection_flags(),
            label: permission.label().map(str::to_string),
            description: permission.description().map(str::to_string),
            requesting: package_names(permission.requesting_pkgs()),
            declaring: package_names(permission.declaring_pkgs()),
            granting: package_names(permission.granting_pkgs()),
        }
    }
}

/// Counts over a catalog.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogSummary {
    /// Apps in the snapshot.
    pub apps: usize,
    /// Declared permissions in the catalog.
    pub total: usize,
    /// Declared permissions per protection type. Types with no members are absent.
    pub by_type: BTreeMap<ProtectionType, usize>,
    /// Requested names no app declares.
    pub undeclared: usize,
    /// Sum over permissions of granting apps.
    pub granted_pairs: usize,
}

/// Summary plus per-permission detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatalogReport {
    pub summary: CatalogSummary,
    pub permissions: Vec<PermissionReport>,
    pub undeclared: Vec<PermissionId>,
}

impl CatalogReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
