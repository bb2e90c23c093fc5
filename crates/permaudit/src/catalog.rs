//! The permission catalog: one declared permission per distinct name,
//! cross-referenced against an inventory snapshot.

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use permaudit_core::{PermissionId, ProtectionFlag, ProtectionType, RawPermissionInfo};
use permaudit_perms::{AppRecord, DeclaredPermission};

use crate::error::Result;
use crate::inventory::{InstalledApp, InventorySnapshot};
use crate::report::{CatalogReport, CatalogSummary, PermissionReport};

/// A declared permission whose apps come from an inventory snapshot.
pub type CatalogPermission = DeclaredPermission<InstalledApp>;

/// Configuration for catalog assembly.
#[derive(Debug, Clone)]
pub struct AuditConfig {
    /// Log declarations whose flag mask carries bits no known flag matches.
    pub report_unrecognized_flag_bits: bool,
    /// Keep declared permissions that no app requests.
    pub include_unrequested: bool,
    /// Keep only permissions in the platform namespace.
    pub platform_only: bool,
}

impl Default for AuditConfig {
    fn default() -> Self {
        Self {
            report_unrecognized_flag_bits: true,
            include_unrequested: true,
            platform_only: false,
        }
    }
}

/// The first declaration seen for a name, plus everyone who declares it.
struct PendingDeclaration {
    info: RawPermissionInfo,
    label: Option<String>,
    description: Option<String>,
    declaring: Vec<Arc<InstalledApp>>,
}

/// Every declared permission in a snapshot, keyed by identity.
///
/// The catalog reflects the snapshot it was built from. Grant state is
/// resolved lazily per permission and never refreshed; build a new catalog
/// from a new snapshot to observe changes.
#[derive(Debug)]
pub struct PermissionCatalog {
    /// Apps in snapshot order.
    apps: Vec<Arc<InstalledApp>>,
    /// Declared permissions, sorted by identity.
    permissions: BTreeMap<PermissionId, CatalogPermission>,
    /// Requested names no app in the snapshot declares.
    undeclared: BTreeSet<PermissionId>,
}

impl PermissionCatalog {
    /// Build a catalog from a snapshot.
    ///
    /// The first app (in snapshot order) declaring a name supplies its
    /// protection info, label and description. Later declarations of the
    /// same name only add to the declaring list.
    pub fn build(snapshot: InventorySnapshot, config: &AuditConfig) -> Result<Self> {
        snapshot.validate()?;

        tracing::debug!("building permission catalog from {} apps", snapshot.apps.len());

        let apps: Vec<Arc<InstalledApp>> = snapshot.apps.into_iter().map(Arc::new).collect();

        let mut pending: BTreeMap<PermissionId, PendingDeclaration> = BTreeMap::new();
        for app in &apps {
            for declared in &app.declared {
                let id = declared.info.id();

                if config.report_unrecognized_flag_bits {
                    let unknown = declared.info.unrecognized_flag_bits();
                    if unknown != 0 {
                        tracing::warn!(
                            "{} declares {} with unrecognized protection flag bits {:#x}",
                            app.package_name,
                            id,
                            unknown
                        );
                    }
                }

                match pending.get_mut(&id) {
                    Some(existing) => {
                        if existing.declaring.iter().any(|d| Arc::ptr_eq(d, app)) {
                            tracing::debug!("{} declares {} more than once", app.package_name, id);
                            continue;
                        }
                        if existing.info != declared.info {
                            tracing::debug!(
                                "{} redeclares {} with different protection info; keeping the first",
                                app.package_name,
                                id
                            );
                        }
                        existing.declaring.push(Arc::clone(app));
                    }
                    None => {
                        pending.insert(
                            id,
                            PendingDeclaration {
                                info: declared.info.clone(),
                                label: declared.label.clone(),
                                description: declared.description.clone(),
                                declaring: vec![Arc::clone(app)],
                            },
                        );
                    }
                }
            }
        }

        let mut undeclared = BTreeSet::new();
        for app in &apps {
            for requested in &app.requested {
                let id = PermissionId::new(requested.name.as_str());
                if pending.contains_key(&id) {
                    continue;
                }
                if config.platform_only && !id.is_platform() {
                    continue;
                }
                if undeclared.insert(id) {
                    tracing::debug!("{} is requested but declared by no app", requested.name);
                }
            }
        }

        let mut permissions = BTreeMap::new();
        for (id, declaration) in pending {
            if config.platform_only && !id.is_platform() {
                continue;
            }

            let requesting: Vec<Arc<InstalledApp>> = apps
                .iter()
                .filter(|app| app.requests_permission(&id))
                .cloned()
                .collect();

            if requesting.is_empty() && !config.include_unrequested {
                continue;
            }

            let permission = DeclaredPermission::from_parts(
                declaration.info,
                declaration.label,
                declaration.description,
                requesting,
                declaration.declaring,
            );
            permissions.insert(id, permission);
        }

        tracing::debug!(
            "permission catalog built: {} declared, {} undeclared",
            permissions.len(),
            undeclared.len()
        );

        Ok(Self {
            apps,
            permissions,
            undeclared,
        })
    }

    /// Build with the default configuration.
    pub fn from_snapshot(snapshot: InventorySnapshot) -> Result<Self> {
        Self::build(snapshot, &AuditConfig::default())
    }

    /// Look up a declared permission by name.
    pub fn get(&self, name: &str) -> Option<&CatalogPermission> {
        self.permissions.get(name)
    }

    /// All declared permissions, sorted by identity.
    pub fn iter(&self) -> impl Iterator<Item = &CatalogPermission> {
        self.permissions.values()
    }

    pub fn len(&self) -> usize {
        self.permissions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.permissions.is_empty()
    }

    /// Apps in snapshot order.
    pub fn apps(&self) -> &[Arc<InstalledApp>] {
        &self.apps
    }

    /// Requested names that no app declares.
    pub fn undeclared(&self) -> impl Iterator<Item = &PermissionId> {
        self.undeclared.iter()
    }

    /// Declared permissions of one protection type.
    pub fn by_type(&self, protection_type: ProtectionType) -> Vec<&CatalogPermission> {
        self.iter()
            .filter(|p| p.protection_type() == protection_type)
            .collect()
    }

    /// Declared permissions carrying a protection flag.
    pub fn with_flag(&self, flag: ProtectionFlag) -> Vec<&CatalogPermission> {
        self.iter()
            .filter(|p| p.protection_flags().has(flag))
            .collect()
    }

    /// Declared permissions currently granted to a package.
    pub fn granted_to(&self, package_name: &str) -> Vec<&CatalogPermission> {
        self.iter()
            .filter(|p| {
                p.granting_pkgs()
                    .iter()
                    .any(|app| app.package_name == package_name)
            })
            .collect()
    }

    /// Counts over the whole catalog.
    pub fn summary(&self) -> CatalogSummary {
        let mut by_type = BTreeMap::new();
        let mut granted_pairs = 0;
        for permission in self.iter() {
            *by_type.entry(permission.protection_type()).or_insert(0) += 1;
            granted_pairs += permission.granting_count();
        }

        CatalogSummary {
            apps: self.apps.len(),
            total: self.permissions.len(),
            by_type,
            undeclared: self.undeclared.len(),
            granted_pairs,
        }
    }

    /// Full per-permission report.
    pub fn report(&self) -> CatalogReport {
        CatalogReport {
            summary: self.summary(),
            permissions: self.iter().map(PermissionReport::from_permission).collect(),
            undeclared: self.undeclared.iter().cloned().collect(),
        }
    }
}
