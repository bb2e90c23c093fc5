//! Error types for Permaudit.

use permaudit_core::CoreError;
use thiserror::Error;

/// Errors that can occur while loading an inventory or building a catalog.
///
/// Classification and grant resolution never fail; every error here comes
/// from malformed input.
#[derive(Debug, Error)]
pub enum AuditError {
    /// Core error.
    #[error("core error: {0}")]
    Core(#[from] CoreError),

    /// JSON error.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// Two apps in one snapshot share a package name.
    #[error("duplicate package in inventory: {0}")]
    DuplicatePackage(String),

    /// An app has a blank package name.
    #[error("package name is empty")]
    EmptyPackageName,

    /// A permission name carries leading or trailing whitespace.
    #[error("permission name has surrounding whitespace: {0:?}")]
    PaddedPermissionName(String),
}

/// Result type for Permaudit operations.
pub type Result<T> = std::result::Result<T, AuditError>;
