//! # Permaudit Permissions
//!
//! Declared permissions and grant resolution.
//!
//! ## Overview
//!
//! Installed applications are supplied from outside through the
//! [`AppRecord`] contract. For every permission some application declares,
//! a [`DeclaredPermission`] ties together its classification, the
//! applications that request it, the applications that declare it, and the
//! requesting applications that actually hold it.
//!
//! ## Key Concepts
//!
//! - **Requesting app**: lists the permission as one it wants
//! - **Declaring app**: defines the permission
//! - **Granting app**: a requesting app whose grant record is granted
//!
//! Nothing here fails. A missing grant record means "not granted", an
//! unknown protection code means [`ProtectionType::Unknown`], and unknown
//! flag bits are dropped.
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use permaudit_perms::{AppRecord, DeclaredPermission, PermissionGrant};
//! use permaudit_core::{PermissionId, ProtectionType, RawPermissionInfo};
//!
//! struct Camera;
//!
//! impl AppRecord for Camera {
//!     fn requests_permission(&self, id: &PermissionId) -> bool {
//!         id.as_str() == "android.permission.CAMERA"
//!     }
//!
//!     fn get_permission(&self, _id: &PermissionId) -> Option<PermissionGrant> {
//!         Some(PermissionGrant::granted())
//!     }
//! }
//!
//! let perm = DeclaredPermission::new(RawPermissionInfo::new("android.permission.CAMERA", 1, 0))
//!     .with_requesting(vec![Arc::new(Camera)]);
//!
//! assert_eq!(perm.protection_type(), ProtectionType::Dangerous);
//! assert_eq!(perm.granting_pkgs().len(), 1);
//! ```
//!
//! [`ProtectionType::Unknown`]: permaudit_core::ProtectionType::Unknown

pub mod app;
pub mod declared;
pub mod grant;

pub use app::{AppRecord, PermissionGrant};
pub use declared::DeclaredPermission;
pub use grant::{holds_grant, resolve_granting};
