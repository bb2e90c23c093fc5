//! Inventory snapshots.
//!
//! An [`InventorySnapshot`] is the already-materialized list of installed
//! applications handed over by whatever enumerated them. Each
//! [`InstalledApp`] carries the permissions it requests (with runtime grant
//! state, where it has any) and the permissions it declares.

use std::collections::HashSet;
use std::io::Read;

use serde::{Deserialize, Serialize};

use permaudit_core::{PermissionId, RawPermissionInfo};
use permaudit_perms::{AppRecord, PermissionGrant};

use crate::error::{AuditError, Result};

/// A permission an app asks for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RequestedPermission {
    /// Canonical permission name.
    pub name: String,

    /// Runtime grant state. `None` if the app holds no grant record.
    #[serde(default)]
    pub granted: Option<bool>,
}

/// A permission an app defines, with whatever text resolved for it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeclaredPermissionInfo {
    #[serde(flatten)]
    pub info: RawPermissionInfo,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub description: Option<String>,
}

impl DeclaredPermissionInfo {
    pub fn new(info: RawPermissionInfo) -> Self {
        Self {
            info,
            label: None,
            description: None,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// One installed application as seen in a snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstalledApp {
    /// Package name, unique within a snapshot.
    pub package_name: String,

    #[serde(default)]
    pub label: Option<String>,

    #[serde(default)]
    pub requested: Vec<RequestedPermission>,

    #[serde(default)]
    pub declared: Vec<DeclaredPermissionInfo>,
}

impl InstalledApp {
    /// Create an app with nothing requested or declared.
    pub fn new(package_name: impl Into<String>) -> Self {
        Self {
            package_name: package_name.into(),
            label: None,
            requested: Vec::new(),
            declared: Vec::new(),
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    /// Add a requested permission with the given grant state.
    pub fn requesting(mut self, name: impl Into<String>, granted: Option<bool>) -> Self {
        self.requested.push(RequestedPermission {
            name: name.into(),
            granted,
        });
        self
    }

    /// Add a declared permission.
    pub fn declaring(mut self, declared: DeclaredPermissionInfo) -> Self {
        self.declared.push(declared);
        self
    }

    fn requested_entry(&self, id: &PermissionId) -> Option<&RequestedPermission> {
        self.requested.iter().find(|r| r.name == id.as_str())
    }
}

impl AppRecord for InstalledApp {
    fn requests_permission(&self, id: &PermissionId) -> bool {
        self.requested_entry(id).is_some()
    }

    fn get_permission(&self, id: &PermissionId) -> Option<PermissionGrant> {
        self.requested_entry(id)
            .and_then(|r| r.granted)
            .map(PermissionGrant::from)
    }
}

/// All installed applications at one point in time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InventorySnapshot {
    pub apps: Vec<InstalledApp>,
}

impl InventorySnapshot {
    pub fn new(apps: Vec<InstalledApp>) -> Self {
        Self { apps }
    }

    /// Parse a snapshot from JSON and validate it.
    pub fn from_json(json: &str) -> Result<Self> {
        let snapshot: Self = serde_json::from_str(json)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    /// Read a snapshot from a JSON stream and validate it.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self> {
        let snapshot: Self = serde_json::from_reader(reader)?;
        snapshot.validate()?;
        Ok(snapshot)
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Check package names are present and unique and permission names
    /// are neither blank nor padded.
    pub fn validate(&self) -> Result<()> {
        let mut seen = HashSet::new();
        for app in &self.apps {
            if app.package_name.trim().is_empty() {
                return Err(AuditError::EmptyPackageName);
            }
            if !seen.insert(app.package_name.as_str()) {
                return Err(AuditError::DuplicatePackage(app.package_name.clone()));
            }
            let requested = app.requested.iter().map(|r| r.name.as_str());
            let declared = app.declared.iter().map(|d| d.info.name.as_str());
            for name in requested.chain(declared) {
                check_permission_name(name)?;
            }
        }
        Ok(())
    }
}

/// Identities are built from names verbatim, so a name must already be in
/// the form `PermissionId::parse` would produce.
fn check_permission_name(name: &str) -> Result<()> {
    let id = PermissionId::parse(name)?;
    if id.as_str() != name {
        return Err(AuditError::PaddedPermissionName(name.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use permaudit_core::CoreError;

    #[test]
    fn test_app_record_capabilities() {
        let app = InstalledApp::new("com.example.camera")
            .requesting("android.permission.CAMERA", Some(true))
            .requesting("android.permission.RECORD_AUDIO", Some(false))
            .requesting("android.permission.INTERNET", None);

        let camera = PermissionId::new("android.permission.CAMERA");
        let audio = PermissionId::new("android.permission.RECORD_AUDIO");
        let internet = PermissionId::new("android.permission.INTERNET");
        let sms = PermissionId::new("android.permission.SEND_SMS");

        assert!(app.requests_permission(&camera));
        assert_eq!(app.get_permission(&camera), Some(PermissionGrant::granted()));
        assert_eq!(app.get_permission(&audio), Some(PermissionGrant::denied()));
        assert!(app.requests_permission(&internet));
        assert_eq!(app.get_permission(&internet), None);
        assert!(!app.requests_permission(&sms));
        assert_eq!(app.get_permission(&sms), None);
    }

    #[test]
    fn test_snapshot_from_json() {
        let json = r#"{
            "apps": [
                {
                    "package_name": "android",
                    "declared": [
                        { "name": "android.permission.CAMERA", "protection": 1, "label": "take pictures" }
                    ]
                },
                {
                    "package_name": "com.example.camera",
                    "requested": [ { "name": "android.permission.CAMERA", "granted": true } ]
                }
            ]
        }"#;

        let snapshot = InventorySnapshot::from_json(json).unwrap();
        assert_eq!(snapshot.apps.len(), 2);

        let declared = &snapshot.apps[0].declared[0];
        assert_eq!(declared.info.protection, 1);
        assert_eq!(declared.info.protection_flags, 0);
        assert_eq!(declared.label.as_deref(), Some("take pictures"));
        assert_eq!(snapshot.apps[1].requested[0].granted, Some(true));
    }

    #[test]
    fn test_snapshot_json_roundtrip_is_stable() {
        let snapshot = InventorySnapshot::new(vec![InstalledApp::new("android").declaring(
            DeclaredPermissionInfo::new(RawPermissionInfo::new("android.permission.CAMERA", 1, 0)),
        )]);

        let json = snapshot.to_json().unwrap();
        assert_eq!(InventorySnapshot::from_json(&json).unwrap(), snapshot);
    }

    #[test]
    fn test_duplicate_package_rejected() {
        let snapshot = InventorySnapshot::new(vec![
            InstalledApp::new("com.example.a"),
            InstalledApp::new("com.example.a"),
        ]);

        assert!(matches!(
            snapshot.validate(),
            Err(AuditError::DuplicatePackage(name)) if name == "com.example.a"
        ));
    }

    #[test]
    fn test_blank_names_rejected() {
        let snapshot = InventorySnapshot::new(vec![InstalledApp::new("  ")]);
        assert!(matches!(snapshot.validate(), Err(AuditError::EmptyPackageName)));

        let snapshot = InventorySnapshot::new(vec![InstalledApp::new("a").requesting("", None)]);
        assert!(matches!(
            snapshot.validate(),
            Err(AuditError::Core(CoreError::EmptyPermissionName))
        ));
    }

    #[test]
    fn test_padded_names_rejected() {
        let snapshot = InventorySnapshot::new(vec![InstalledApp::new("android").declaring(
            DeclaredPermissionInfo::new(RawPermissionInfo::new("android.permission.CAMERA ", 1, 0)),
        )]);
        assert!(matches!(
            snapshot.validate(),
            Err(AuditError::PaddedPermissionName(name)) if name == "android.permission.CAMERA "
        ));

        let snapshot = InventorySnapshot::new(vec![
            InstalledApp::new("a").requesting("\tandroid.permission.CAMERA", Some(true)),
        ]);
        assert!(matches!(snapshot.validate(), Err(AuditError::PaddedPermissionName(_))));
    }

    #[test]
    fn test_malformed_json() {
        assert!(matches!(
            InventorySnapshot::from_json("{ not json"),
            Err(AuditError::Json(_))
        ));
    }
}
