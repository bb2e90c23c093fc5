//! Error types for Permaudit Core.
//!
//! Classifying raw platform values never fails. These errors only come out
//! of parsing human-written names back into typed values.

use thiserror::Error;

/// Core errors that can occur while parsing permission metadata.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    #[error("permission name is empty")]
    EmptyPermissionName,

    #[error("unknown protection type: {0}")]
    UnknownProtectionType(String),

    #[error("unknown protection flag: {0}")]
    UnknownProtectionFlag(String),
}

/// Result type for core operations.
pub type Result<T> = std::result::Result<T, CoreError>;
