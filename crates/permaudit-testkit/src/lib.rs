//! # Permaudit Testkit
//!
//! Testing utilities for Permaudit.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Protection levels with their expected classification
//! - **Generators**: Proptest strategies for property-based testing
//! - **Fixtures**: A minimal [`TestApp`] record and a sample inventory
//!
//! ## Golden Vectors
//!
//! ```rust
//! use permaudit_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches) in verify_all_vectors() {
//!     assert!(matches, "{} misclassified", name);
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use permaudit_testkit::generators::{flag_mask, protection_code};
//!
//! proptest! {
//!     #[test]
//!     fn classification_is_total(code in protection_code(), mask in flag_mask()) {
//!         let _ = permaudit_core::classify_type(code);
//!         let _ = permaudit_core::classify_flags(mask);
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use permaudit_testkit::fixtures::TestApp;
//!
//! let app = TestApp::new("com.example.camera").granted("android.permission.CAMERA");
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{platform_app, sample_snapshot, TestApp};
pub use generators::{test_app_from_params, TestAppParams};
pub use vectors::{all_vectors, verify_all_vectors, GoldenVector};
