//! # Permaudit
//!
//! The unified API for Permaudit: permission classification and
//! cross-referencing over a snapshot of installed applications.
//!
//! ## Overview
//!
//! Given an [`InventorySnapshot`] of installed apps, each listing the
//! permissions it requests and declares, Permaudit builds a
//! [`PermissionCatalog`] with one entry per declared permission:
//!
//! - **Protection type**: decoded from the raw base code
//! - **Protection flags**: decoded from the raw flag mask
//! - **Requesting apps**: apps that ask for the permission
//! - **Declaring apps**: apps that define it
//! - **Granting apps**: requesting apps that currently hold it
//!
//! Permaudit only reads. It never changes grant state or decides whether
//! anything may be installed.
//!
//! ## Usage
//!
//! ```rust
//! use permaudit::{AuditConfig, InventorySnapshot, PermissionCatalog, ProtectionType};
//!
//! let snapshot = InventorySnapshot::from_json(r#"{
//!     "apps": [
//!         { "package_name": "android",
//!           "declared": [ { "name": "android.permission.CAMERA", "protection": 1 } ] },
//!         { "package_name": "com.example.camera",
//!           "requested": [ { "name": "android.permission.CAMERA", "granted": true } ] }
//!     ]
//! }"#).unwrap();
//!
//! let catalog = PermissionCatalog::build(snapshot, &AuditConfig::default()).unwrap();
//! let camera = catalog.get("android.permission.CAMERA").unwrap();
//!
//! assert_eq!(camera.protection_type(), ProtectionType::Dangerous);
//! assert_eq!(camera.granting_pkgs()[0].package_name, "com.example.camera");
//! ```
//!
//! ## Re-exports
//!
//! This crate re-exports the component crates for convenience:
//!
//! - `permaudit::core` - Identity and protection classification
//! - `permaudit::perms` - App record contract, declared permissions, grant resolution

pub mod catalog;
pub mod error;
pub mod inventory;
pub mod report;

// Re-export component crates
pub use permaudit_core as core;
pub use permaudit_perms as perms;

// Re-export main types for convenience
pub use catalog::{AuditConfig, CatalogPermission, PermissionCatalog};
pub use error::{AuditError, Result};
pub use inventory::{DeclaredPermissionInfo, InstalledApp, InventorySnapshot, RequestedPermission};
pub use report::{CatalogReport, CatalogSummary, PermissionReport};

// Re-export commonly used component types
pub use permaudit_core::{
    classify_flags, classify_type, PermissionId, ProtectionFlag, ProtectionFlags, ProtectionType,
    RawPermissionInfo,
};
pub use permaudit_perms::{AppRecord, DeclaredPermission, PermissionGrant};
