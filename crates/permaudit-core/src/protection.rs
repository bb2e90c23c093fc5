//! Protection classification.
//!
//! The platform describes how a permission may be granted with two raw
//! integers: a base protection code and a mask of protection flag bits.
//! This module decodes both into typed values.
//!
//! Decoding is total. An unrecognized base code becomes
//! [`ProtectionType::Unknown`], while mask bits that match no known
//! [`ProtectionFlag`] are dropped from the decoded set. Use
//! [`unrecognized_bits`] to see what was dropped.

use bitflags::{bitflags, Flags};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::CoreError;

/// Bits of a combined protection level that hold the base protection code.
pub const PROTECTION_MASK_BASE: i32 = 0xf;

// ─────────────────────────────────────────────────────────────────────────────
// Protection Type
// ─────────────────────────────────────────────────────────────────────────────

/// How a permission may be granted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtectionType {
    /// Granted automatically at install time.
    Normal,
    /// Requires explicit user consent at runtime.
    Dangerous,
    /// Granted only to apps signed with the declaring app's certificate.
    Signature,
    /// Signature, or installed on the system image.
    SignatureOrSystem,
    /// Granted only through the flags that accompany it.
    Internal,
    /// Any code the platform tables do not define.
    Unknown,
}

impl ProtectionType {
    /// All variants, in code order.
    pub const ALL: [ProtectionType; 6] = [
        ProtectionType::Normal,
        ProtectionType::Dangerous,
        ProtectionType::Signature,
        ProtectionType::SignatureOrSystem,
        ProtectionType::Internal,
        ProtectionType::Unknown,
    ];

    /// Classify a raw base protection code.
    pub const fn from_code(code: i32) -> Self {
        match code {
            0 => ProtectionType::Normal,
            1 => ProtectionType::Dangerous,
            2 => ProtectionType::Signature,
            3 => ProtectionType::SignatureOrSystem,
            4 => ProtectionType::Internal,
            _ => ProtectionType::Unknown,
        }
    }

    /// The platform code for this type. `Unknown` has none.
    pub const fn code(&self) -> Option<i32> {
        match self {
            ProtectionType::Normal => Some(0),
            ProtectionType::Dangerous => Some(1),
            ProtectionType::Signature => Some(2),
            ProtectionType::SignatureOrSystem => Some(3),
            ProtectionType::Internal => Some(4),
            ProtectionType::Unknown => None,
        }
    }

    /// Whether the grant is decided by the user at runtime rather than at install.
    pub const fn is_runtime(&self) -> bool {
        matches!(self, ProtectionType::Dangerous)
    }

    /// Stable upper-case name.
    pub const fn as_str(&self) -> &'static str {
        match self {
            ProtectionType::Normal => "NORMAL",
            ProtectionType::Dangerous => "DANGEROUS",
            ProtectionType::Signature => "SIGNATURE",
            ProtectionType::SignatureOrSystem => "SIGNATURE_OR_SYSTEM",
            ProtectionType::Internal => "INTERNAL",
            ProtectionType::Unknown => "UNKNOWN",
        }
    }
}

impl fmt::Display for ProtectionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtectionType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim();
        ProtectionType::ALL
            .into_iter()
            .find(|t| t.as_str().eq_ignore_ascii_case(wanted))
            .ok_or_else(|| CoreError::UnknownProtectionType(s.to_string()))
    }
}

/// Classify a raw protection code. Never fails.
pub const fn classify_type(code: i32) -> ProtectionType {
    ProtectionType::from_code(code)
}

// ─────────────────────────────────────────────────────────────────────────────
// Protection Flags
// ─────────────────────────────────────────────────────────────────────────────

bitflags! {
    /// A decoded set of protection flags.
    ///
    /// | Constant | Bit | Constant | Bit |
    /// |----------|-----|----------|-----|
    /// | `SYSTEM` (`PRIVILEGED`) | `0x10` | `SYSTEM_TEXT_CLASSIFIER` | `0x10000` |
    /// | `DEVELOPMENT` | `0x20` | `DOCUMENTER` | `0x40000` |
    /// | `APPOP` | `0x40` | `CONFIGURATOR` | `0x80000` |
    /// | `PRE23` | `0x80` | `INCIDENT_REPORT_APPROVER` | `0x100000` |
    /// | `INSTALLER` | `0x100` | `APP_PREDICTOR` | `0x200000` |
    /// | `VERIFIER` | `0x200` | `COMPANION` | `0x800000` |
    /// | `PREINSTALLED` | `0x400` | `RETAIL_DEMO` | `0x1000000` |
    /// | `SETUP` | `0x800` | `RECENTS` | `0x2000000` |
    /// | `INSTANT` | `0x1000` | `ROLE` | `0x4000000` |
    /// | `RUNTIME_ONLY` | `0x2000` | `KNOWN_SIGNER` | `0x8000000` |
    /// | `OEM` | `0x4000` | | |
    /// | `VENDOR_PRIVILEGED` | `0x8000` | | |
    ///
    /// Bits up to `RUNTIME_ONLY` are the platform's public flags; the rest
    /// are reserved values used by OEM and system components. Two sets
    /// decoded from masks that differ only in unknown bits are equal.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(transparent)]
    pub struct ProtectionFlags: i32 {
        const SYSTEM = 0x10;
        const DEVELOPMENT = 0x20;
        const APPOP = 0x40;
        const PRE23 = 0x80;
        const INSTALLER = 0x100;
        const VERIFIER = 0x200;
        const PREINSTALLED = 0x400;
        const SETUP = 0x800;
        const INSTANT = 0x1000;
        const RUNTIME_ONLY = 0x2000;
        const OEM = 0x4000;
        const VENDOR_PRIVILEGED = 0x8000;
        const SYSTEM_TEXT_CLASSIFIER = 0x10000;
        const DOCUMENTER = 0x40000;
        const CONFIGURATOR = 0x80000;
        const INCIDENT_REPORT_APPROVER = 0x100000;
        const APP_PREDICTOR = 0x200000;
        const COMPANION = 0x800000;
        const RETAIL_DEMO = 0x1000000;
        const RECENTS = 0x2000000;
        const ROLE = 0x4000000;
        const KNOWN_SIGNER = 0x8000000;
    }
}

impl ProtectionFlags {
    /// The platform names the `SYSTEM` bit `PRIVILEGED` as well.
    pub const PRIVILEGED: ProtectionFlags = ProtectionFlags::SYSTEM;

    /// Whether `flag` is a member.
    pub const fn has(&self, flag: ProtectionFlag) -> bool {
        self.contains(flag.as_flags())
    }

    /// Number of flags in the set.
    pub const fn len(&self) -> usize {
        self.bits().count_ones() as usize
    }

    /// Members as [`ProtectionFlag`] values, in bit order.
    pub fn flags(&self) -> impl Iterator<Item = ProtectionFlag> + '_ {
        self.iter().filter_map(|single| ProtectionFlag::from_bit(single.bits()))
    }
}

impl From<ProtectionFlag> for ProtectionFlags {
    fn from(flag: ProtectionFlag) -> Self {
        flag.as_flags()
    }
}

impl FromIterator<ProtectionFlag> for ProtectionFlags {
    fn from_iter<I: IntoIterator<Item = ProtectionFlag>>(iter: I) -> Self {
        iter.into_iter()
            .fold(ProtectionFlags::empty(), |set, flag| set | flag.as_flags())
    }
}

impl fmt::Display for ProtectionFlags {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        bitflags::parser::to_writer(self, f)
    }
}

/// A single modifier bit describing special circumstances under which a
/// permission may be granted.
///
/// Each discriminant is the matching [`ProtectionFlags`] constant, so the
/// enum and the set agree on every bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(i32)]
pub enum ProtectionFlag {
    System = ProtectionFlags::SYSTEM.bits(),
    Development = ProtectionFlags::DEVELOPMENT.bits(),
    Appop = ProtectionFlags::APPOP.bits(),
    Pre23 = ProtectionFlags::PRE23.bits(),
    Installer = ProtectionFlags::INSTALLER.bits(),
    Verifier = ProtectionFlags::VERIFIER.bits(),
    Preinstalled = ProtectionFlags::PREINSTALLED.bits(),
    Setup = ProtectionFlags::SETUP.bits(),
    Instant = ProtectionFlags::INSTANT.bits(),
    RuntimeOnly = ProtectionFlags::RUNTIME_ONLY.bits(),
    Oem = ProtectionFlags::OEM.bits(),
    VendorPrivileged = ProtectionFlags::VENDOR_PRIVILEGED.bits(),
    SystemTextClassifier = ProtectionFlags::SYSTEM_TEXT_CLASSIFIER.bits(),
    Documenter = ProtectionFlags::DOCUMENTER.bits(),
    Configurator = ProtectionFlags::CONFIGURATOR.bits(),
    IncidentReportApprover = ProtectionFlags::INCIDENT_REPORT_APPROVER.bits(),
    AppPredictor = ProtectionFlags::APP_PREDICTOR.bits(),
    Companion = ProtectionFlags::COMPANION.bits(),
    RetailDemo = ProtectionFlags::RETAIL_DEMO.bits(),
    Recents = ProtectionFlags::RECENTS.bits(),
    Role = ProtectionFlags::ROLE.bits(),
    KnownSigner = ProtectionFlags::KNOWN_SIGNER.bits(),
}

impl ProtectionFlag {
    /// Alias of [`ProtectionFlag::System`].
    pub const PRIVILEGED: ProtectionFlag = ProtectionFlag::System;

    /// Every known flag, in bit order.
    pub const ALL: [ProtectionFlag; 22] = [
        ProtectionFlag::System,
        ProtectionFlag::Development,
        ProtectionFlag::Appop,
        ProtectionFlag::Pre23,
        ProtectionFlag::Installer,
        ProtectionFlag::Verifier,
        ProtectionFlag::Preinstalled,
        ProtectionFlag::Setup,
        ProtectionFlag::Instant,
        ProtectionFlag::RuntimeOnly,
        ProtectionFlag::Oem,
        ProtectionFlag::VendorPrivileged,
        ProtectionFlag::SystemTextClassifier,
        ProtectionFlag::Documenter,
        ProtectionFlag::Configurator,
        ProtectionFlag::IncidentReportApprover,
        ProtectionFlag::AppPredictor,
        ProtectionFlag::Companion,
        ProtectionFlag::RetailDemo,
        ProtectionFlag::Recents,
        ProtectionFlag::Role,
        ProtectionFlag::KnownSigner,
    ];

    /// Union of every known flag bit.
    pub const KNOWN_MASK: i32 = ProtectionFlags::all().bits();

    /// The bit this flag occupies in a raw mask.
    pub const fn bit(&self) -> i32 {
        *self as i32
    }

    /// This flag as a single-member set.
    pub const fn as_flags(&self) -> ProtectionFlags {
        ProtectionFlags::from_bits_retain(self.bit())
    }

    /// The flag occupying exactly `bit`, if any.
    pub fn from_bit(bit: i32) -> Option<Self> {
        ProtectionFlag::ALL.into_iter().find(|flag| flag.bit() == bit)
    }

    /// Whether this flag's bit is set in `mask`.
    pub const fn is_set_in(&self, mask: i32) -> bool {
        self.bit() & mask != 0
    }

    /// Stable upper-case name, as declared on [`ProtectionFlags`].
    pub fn as_str(&self) -> &'static str {
        ProtectionFlags::FLAGS
            .iter()
            .find(|named| named.value().bits() == self.bit())
            .map(|named| named.name())
            .unwrap_or_default()
    }
}

impl fmt::Display for ProtectionFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProtectionFlag {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_uppercase();
        if wanted == "PRIVILEGED" {
            return Ok(ProtectionFlag::PRIVILEGED);
        }
        ProtectionFlags::from_name(&wanted)
            .and_then(|single| ProtectionFlag::from_bit(single.bits()))
            .ok_or_else(|| CoreError::UnknownProtectionFlag(s.to_string()))
    }
}

/// Decode a raw protection flag mask. Never fails; unknown bits are dropped.
pub const fn classify_flags(mask: i32) -> ProtectionFlags {
    ProtectionFlags::from_bits_truncate(mask)
}

/// Flag bits in `mask` that no known flag accounts for.
///
/// The base protection nibble is not counted, so a combined protection
/// level can be passed as-is.
pub const fn unrecognized_bits(mask: i32) -> i32 {
    mask & !PROTECTION_MASK_BASE & !ProtectionFlags::all().bits()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_known_codes() {
        assert_eq!(classify_type(0), ProtectionType::Normal);
        assert_eq!(classify_type(1), ProtectionType::Dangerous);
        assert_eq!(classify_type(2), ProtectionType::Signature);
        assert_eq!(classify_type(3), ProtectionType::SignatureOrSystem);
        assert_eq!(classify_type(4), ProtectionType::Internal);
    }

    #[test]
    fn test_unknown_codes() {
        for code in [-1, 5, 15, 0x10, i32::MIN, i32::MAX] {
            assert_eq!(classify_type(code), ProtectionType::Unknown, "code {}", code);
        }
    }

    #[test]
    fn test_type_code_roundtrip() {
        for t in ProtectionType::ALL {
            match t.code() {
                Some(code) => assert_eq!(ProtectionType::from_code(code), t),
                None => assert_eq!(t, ProtectionType::Unknown),
            }
        }
    }

    #[test]
    fn test_only_dangerous_is_runtime() {
        let runtime: Vec<_> = ProtectionType::ALL
            .into_iter()
            .filter(|t| t.is_runtime())
            .collect();
        assert_eq!(runtime, vec![ProtectionType::Dangerous]);
    }

    #[test]
    fn test_type_from_str() {
        assert_eq!(
            "signature_or_system".parse::<ProtectionType>().unwrap(),
            ProtectionType::SignatureOrSystem
        );
        assert_eq!(
            "bogus".parse::<ProtectionType>(),
            Err(CoreError::UnknownProtectionType("bogus".into()))
        );
    }

    #[test]
    fn test_flag_bits_do_not_overlap() {
        let mut seen = 0;
        for flag in ProtectionFlag::ALL {
            assert_eq!(flag.bit().count_ones(), 1, "{} is not a single bit", flag);
            assert_eq!(seen & flag.bit(), 0, "{} overlaps another flag", flag);
            seen |= flag.bit();
        }
        assert_eq!(seen, ProtectionFlag::KNOWN_MASK);
        assert_eq!(seen & PROTECTION_MASK_BASE, 0);
    }

    #[test]
    fn test_enum_matches_named_constants() {
        assert_eq!(ProtectionFlags::FLAGS.len(), ProtectionFlag::ALL.len());
        for (named, flag) in ProtectionFlags::FLAGS.iter().zip(ProtectionFlag::ALL) {
            assert_eq!(named.value().bits(), flag.bit());
            assert_eq!(named.name(), flag.as_str());
            assert_eq!(named.name().parse::<ProtectionFlag>().unwrap(), flag);
        }
        assert_eq!(ProtectionFlags::all().len(), 22);
    }

    #[test]
    fn test_mask_zero_is_empty() {
        assert!(classify_flags(0).is_empty());
    }

    #[test]
    fn test_system_instant_and_unknown_high_bit() {
        let mask = ProtectionFlag::System.bit() | ProtectionFlag::Instant.bit() | 0x2000_0000;
        let flags = classify_flags(mask);

        let expected: ProtectionFlags = [ProtectionFlag::System, ProtectionFlag::Instant]
            .into_iter()
            .collect();
        assert_eq!(flags, expected);
        assert_eq!(unrecognized_bits(mask), 0x2000_0000);
    }

    #[test]
    fn test_gap_bits_are_unrecognized() {
        // 0x20000 and 0x400000 sit between known flags but name nothing.
        assert!(classify_flags(0x20000 | 0x400000).is_empty());
        assert_eq!(unrecognized_bits(0x20000 | 0x400000), 0x20000 | 0x400000);
    }

    #[test]
    fn test_base_nibble_is_not_a_flag() {
        // A combined level of SIGNATURE | PRIVILEGED.
        let level = 0x2 | 0x10;
        assert_eq!(classify_flags(level).flags().collect::<Vec<_>>(), vec![ProtectionFlag::System]);
        assert_eq!(unrecognized_bits(level), 0);
    }

    #[test]
    fn test_privileged_alias() {
        assert_eq!(ProtectionFlag::PRIVILEGED, ProtectionFlag::System);
        assert_eq!("privileged".parse::<ProtectionFlag>().unwrap(), ProtectionFlag::System);
        assert_eq!("RUNTIME_ONLY".parse::<ProtectionFlag>().unwrap(), ProtectionFlag::RuntimeOnly);
        assert!("WELLBEING".parse::<ProtectionFlag>().is_err());
        assert_eq!(ProtectionFlags::PRIVILEGED, ProtectionFlags::SYSTEM);
    }

    #[test]
    fn test_flags_display() {
        let flags = classify_flags(0x10 | 0x1000);
        assert_eq!(flags.to_string(), "SYSTEM | INSTANT");
        assert_eq!(classify_flags(0).to_string(), "");
    }

    #[test]
    fn test_flags_serde_names() {
        let flags = classify_flags(ProtectionFlag::RuntimeOnly.bit() | ProtectionFlag::Pre23.bit());
        let json = serde_json::to_string(&flags).unwrap();
        assert_eq!(json, r#""PRE23 | RUNTIME_ONLY""#);
        assert_eq!(serde_json::from_str::<ProtectionFlags>(&json).unwrap(), flags);

        let json = serde_json::to_string(&ProtectionType::SignatureOrSystem).unwrap();
        assert_eq!(json, r#""SIGNATURE_OR_SYSTEM""#);
    }

    proptest! {
        #[test]
        fn test_classify_type_is_total(code: i32) {
            let t = classify_type(code);
            if (0..=4).contains(&code) {
                prop_assert_eq!(t.code(), Some(code));
            } else {
                prop_assert_eq!(t, ProtectionType::Unknown);
            }
        }

        #[test]
        fn test_flags_are_exactly_the_set_bits(mask: i32) {
            let flags = classify_flags(mask);
            for flag in ProtectionFlag::ALL {
                prop_assert_eq!(flags.has(flag), flag.bit() & mask != 0);
            }
            prop_assert_eq!(flags.bits(), mask & ProtectionFlag::KNOWN_MASK);
            prop_assert_eq!(flags.len(), flags.flags().count());
        }

        #[test]
        fn test_unknown_bits_do_not_change_flags(mask: i32, noise: i32) {
            let noise = noise & !ProtectionFlag::KNOWN_MASK;
            prop_assert_eq!(classify_flags(mask), classify_flags(mask | noise));
        }

        #[test]
        fn test_classification_is_deterministic(code: i32, mask: i32) {
            prop_assert_eq!(classify_type(code), classify_type(code));
            prop_assert_eq!(classify_flags(mask), classify_flags(mask));
        }
    }
}
