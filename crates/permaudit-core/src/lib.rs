//! # Permaudit Core
//!
//! Pure primitives for Permaudit: permission identity and protection
//! classification.
//!
//! This crate contains no I/O. It turns the raw integers the platform
//! reports for a permission into typed values.
//!
//! ## Key Types
//!
//! - [`PermissionId`] - Canonical permission name, the identity of a permission
//! - [`ProtectionType`] - Base protection category decoded from a raw code
//! - [`ProtectionFlag`] / [`ProtectionFlags`] - Modifier bits decoded from a raw mask
//! - [`RawPermissionInfo`] - The uninterpreted record the platform reports
//!
//! ## Classification
//!
//! ```rust
//! use permaudit_core::{classify_flags, classify_type, ProtectionFlag, ProtectionType};
//!
//! assert_eq!(classify_type(1), ProtectionType::Dangerous);
//! assert_eq!(classify_type(99), ProtectionType::Unknown);
//!
//! let flags = classify_flags(0x10 | 0x1000);
//! assert!(flags.has(ProtectionFlag::System));
//! assert!(flags.has(ProtectionFlag::Instant));
//! ```

pub mod error;
pub mod info;
pub mod protection;
pub mod types;

pub use error::{CoreError, Result};
pub use info::RawPermissionInfo;
pub use protection::{
    classify_flags, classify_type, unrecognized_bits, ProtectionFlag, ProtectionFlags,
    ProtectionType, PROTECTION_MASK_BASE,
};
pub use types::{PermissionId, PLATFORM_NAMESPACE};
