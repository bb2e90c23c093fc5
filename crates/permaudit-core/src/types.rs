//! Strong type definitions for Permaudit.
//!
//! Permission names are wrapped in a newtype so they cannot be confused with
//! package names or labels at compile time.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

use crate::error::{CoreError, Result};

/// Namespace prefix shared by permissions the platform itself declares.
pub const PLATFORM_NAMESPACE: &str = "android.permission.";

/// The canonical name of a permission, e.g. `android.permission.CAMERA`.
///
/// This is the identity of a permission. Two permissions with the same
/// name are the same permission, whatever else is known about them.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PermissionId(String);

impl PermissionId {
    /// Create a new PermissionId from a raw permission name.
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// Create a PermissionId, rejecting blank names.
    pub fn parse(name: &str) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(CoreError::EmptyPermissionName);
        }
        Ok(Self(name.to_string()))
    }

    /// Get the canonical name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Whether this permission lives in the platform namespace.
    pub fn is_platform(&self) -> bool {
        self.0.starts_with(PLATFORM_NAMESPACE)
    }

    /// The last dotted segment, e.g. `CAMERA` for `android.permission.CAMERA`.
    pub fn short_name(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or(&self.0)
    }

    /// Consume into the owned name.
    pub fn into_inner(self) -> String {
        self.0
    }
}

impl fmt::Debug for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "PermissionId({})", self.0)
    }
}

impl fmt::Display for PermissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for PermissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl Borrow<str> for PermissionId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for PermissionId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

impl From<String> for PermissionId {
    fn from(name: String) -> Self {
        Self(name)
    }
}
