//! Golden classification vectors.
//!
//! Combined `protectionLevel` values in the shape the platform reports them,
//! with the type and flags every implementation must decode them to.

use permaudit_core::{ProtectionFlag, ProtectionType, RawPermissionInfo};

/// A golden test vector.
#[derive(Debug, Clone)]
pub struct GoldenVector {
    /// Permission name.
    pub name: &'static str,
    /// Combined protection level as the platform reports it.
    pub protection_level: i32,
    /// Expected protection type.
    pub expected_type: ProtectionType,
    /// Expected flags, in bit order.
    pub expected_flags: &'static [ProtectionFlag],
    /// Expected unrecognized flag bits.
    pub expected_unrecognized: i32,
}

impl GoldenVector {
    pub fn info(&self) -> RawPermissionInfo {
        RawPermissionInfo::from_protection_level(self.name, self.protection_level)
    }
}

/// Get all golden vectors.
pub fn all_vectors() -> Vec<GoldenVector> {
    use ProtectionFlag::*;

    vec![
        GoldenVector {
            name: "android.permission.INTERNET",
            protection_level: 0x0,
            expected_type: ProtectionType::Normal,
            expected_flags: &[],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "android.permission.CAMERA",
            protection_level: 0x1,
            expected_type: ProtectionType::Dangerous,
            expected_flags: &[],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "com.example.permission.SIGNATURE_PRIVILEGED",
            protection_level: 0x12, // signature|privileged
            expected_type: ProtectionType::Signature,
            expected_flags: &[System],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "android.permission.WRITE_SECURE_SETTINGS",
            protection_level: 0x32, // signature|privileged|development
            expected_type: ProtectionType::Signature,
            expected_flags: &[System, Development],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "android.permission.SYSTEM_ALERT_WINDOW",
            protection_level: 0x9e2, // signature|setup|appop|installer|pre23|development
            expected_type: ProtectionType::Signature,
            expected_flags: &[Development, Appop, Pre23, Installer, Setup],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "android.permission.PACKAGE_USAGE_STATS",
            protection_level: 0x1000072, // signature|privileged|development|appop|retailDemo
            expected_type: ProtectionType::Signature,
            expected_flags: &[System, Development, Appop, RetailDemo],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "com.example.permission.ROLE_HOLDER",
            protection_level: 0x4000012, // signature|privileged|role
            expected_type: ProtectionType::Signature,
            expected_flags: &[System, Role],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "com.example.permission.LEGACY_SYSTEM",
            protection_level: 0x3, // signatureOrSystem
            expected_type: ProtectionType::SignatureOrSystem,
            expected_flags: &[],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "com.example.permission.RUNTIME_INTERNAL",
            protection_level: 0x2004, // internal|runtimeOnly
            expected_type: ProtectionType::Internal,
            expected_flags: &[RuntimeOnly],
            expected_unrecognized: 0,
        },
        GoldenVector {
            name: "com.example.permission.FUTURE_FLAG",
            protection_level: 0x10000212, // signature|privileged|verifier|unassigned high bit
            expected_type: ProtectionType::Signature,
            expected_flags: &[System, Verifier],
            expected_unrecognized: 0x10000000,
        },
        GoldenVector {
            name: "com.example.permission.BROKEN",
            protection_level: 0x42000f, // unknown base code, wellbeing and module bits
            expected_type: ProtectionType::Unknown,
            expected_flags: &[],
            expected_unrecognized: 0x420000,
        },
    ]
}

/// Check every vector against the classifier.
///
/// Returns `(name, matches)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool)> {
    all_vectors()
        .iter()
        .map(|v| {
            let info = v.info();
            let flags: Vec<_> = info.protection_flags().flags().collect();
            let matches = info.protection_type() == v.expected_type
                && flags == v.expected_flags
                && info.unrecognized_flag_bits() == v.expected_unrecognized;
            (v.name.to_string(), matches)
        })
        .collect()
}
