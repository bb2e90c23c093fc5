//! Test fixtures and helpers.
//!
//! Common setup code for integration tests.

use std::collections::HashMap;
use std::sync::Arc;

use permaudit::{DeclaredPermissionInfo, InstalledApp, InventorySnapshot, RawPermissionInfo};
use permaudit_core::PermissionId;
use permaudit_perms::{AppRecord, PermissionGrant};

/// A minimal app record with per-permission grant state.
#[derive(Debug, Clone, Default)]
pub struct TestApp {
    pub name: String,
    /// Requested permissions and their grant record, if any.
    pub requested: HashMap<PermissionId, Option<bool>>,
}

impl TestApp {
    /// Create an app that requests nothing.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            requested: HashMap::new(),
        }
    }

    /// Request a permission and mark it granted.
    pub fn granted(self, permission: &str) -> Self {
        self.request(permission, Some(true))
    }

    /// Request a permission and mark it denied.
    pub fn denied(self, permission: &str) -> Self {
        self.request(permission, Some(false))
    }

    /// Request a permission with no grant record.
    pub fn unrecorded(self, permission: &str) -> Self {
        self.request(permission, None)
    }

    /// Request a permission with an explicit grant record.
    pub fn request(mut self, permission: &str, grant: Option<bool>) -> Self {
        self.requested.insert(PermissionId::new(permission), grant);
        self
    }

    pub fn into_arc(self) -> Arc<Self> {
        Arc::new(self)
    }
}

impl AppRecord for TestApp {
    fn requests_permission(&self, id: &PermissionId) -> bool {
        self.requested.contains_key(id)
    }

    fn get_permission(&self, id: &PermissionId) -> Option<PermissionGrant> {
        self.requested
            .get(id)
            .copied()
            .flatten()
            .map(PermissionGrant::from)
    }
}

/// The platform package, declaring a handful of real permissions.
pub fn platform_app() -> InstalledApp {
    InstalledApp::new("android")
        .with_label("Android System")
        .declaring(
            DeclaredPermissionInfo::new(RawPermissionInfo::new("android.permission.CAMERA", 1, 0))
                .with_label("take pictures and videos")
                .with_description("This app can take pictures and record videos using the camera."),
        )
        .declaring(
            DeclaredPermissionInfo::new(RawPermissionInfo::new(
                "android.permission.RECORD_AUDIO",
                1,
                0,
            ))
            .with_label("record audio"),
        )
        .declaring(
            DeclaredPermissionInfo::new(RawPermissionInfo::new("android.permission.INTERNET", 0, 0))
                .with_label("have full network access"),
        )
        .declaring(DeclaredPermissionInfo::new(RawPermissionInfo::from_protection_level(
            "android.permission.INSTALL_PACKAGES",
            0x12,
        )))
        .declaring(DeclaredPermissionInfo::new(RawPermissionInfo::from_protection_level(
            "android.permission.SYSTEM_ALERT_WINDOW",
            0x9e2,
        )))
}

/// A small but realistic device: the platform plus three user apps.
pub fn sample_snapshot() -> InventorySnapshot {
    InventorySnapshot::new(vec![
        platform_app(),
        InstalledApp::new("com.example.camera")
            .with_label("Camera")
            .requesting("android.permission.CAMERA", Some(true))
            .requesting("android.permission.RECORD_AUDIO", Some(true))
            .requesting("android.permission.INTERNET", None),
        InstalledApp::new("com.example.chat")
            .with_label("Chat")
            .requesting("android.permission.CAMERA", Some(false))
            .requesting("android.permission.RECORD_AUDIO", Some(true))
            .requesting("android.permission.INTERNET", None)
            .requesting("com.example.chat.permission.C2D_MESSAGE", None)
            .declaring(DeclaredPermissionInfo::new(RawPermissionInfo::new(
                "com.example.chat.permission.C2D_MESSAGE",
                2,
                0,
            ))),
        InstalledApp::new("com.example.bubbles")
            .with_label("Bubbles")
            .requesting("android.permission.SYSTEM_ALERT_WINDOW", Some(true))
            .requesting("com.vendor.permission.UNDECLARED", None),
    ])
}
