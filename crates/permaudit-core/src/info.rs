//! Raw permission info records.
//!
//! A [`RawPermissionInfo`] is what the platform reports for a declared
//! permission before any interpretation: a name, a base protection code,
//! and a flag mask.

use serde::{Deserialize, Serialize};

use crate::protection::{
    classify_flags, classify_type, unrecognized_bits, ProtectionFlags, ProtectionType,
    PROTECTION_MASK_BASE,
};
use crate::types::PermissionId;

/// Uninterpreted protection info for one declared permission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawPermissionInfo {
    /// Canonical permission name.
    pub name: String,

    /// Base protection code.
    pub protection: i32,

    /// Protection flag mask.
    #[serde(default)]
    pub protection_flags: i32,
}

impl RawPermissionInfo {
    /// Create from an already split code and mask.
    pub fn new(name: impl Into<String>, protection: i32, protection_flags: i32) -> Self {
        Self {
            name: name.into(),
            protection,
            protection_flags,
        }
    }

    /// Create from a combined `protectionLevel` value, splitting off the
    /// base code the same way the platform does.
    pub fn from_protection_level(name: impl Into<String>, level: i32) -> Self {
        Self::new(
            name,
            level & PROTECTION_MASK_BASE,
            level & !PROTECTION_MASK_BASE,
        )
    }

    /// The combined `protectionLevel` value.
    pub fn protection_level(&self) -> i32 {
        (self.protection & PROTECTION_MASK_BASE) | (self.protection_flags & !PROTECTION_MASK_BASE)
    }

    /// Identity of the permission this record describes.
    pub fn id(&self) -> PermissionId {
        PermissionId::new(self.name.as_str())
    }

    pub fn protection_type(&self) -> ProtectionType {
        classify_type(self.protection)
    }

    pub fn protection_flags(&self) -> ProtectionFlags {
        classify_flags(self.protection_flags)
    }

    /// Mask bits that decode to no known flag.
    pub fn unrecognized_flag_bits(&self) -> i32 {
        unrecognized_bits(self.protection_flags)
    }
}
