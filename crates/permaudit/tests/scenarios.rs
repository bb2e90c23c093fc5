//! End-to-end scenarios: classification, grant resolution and catalog
//! assembly driven through the public API.

use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};
use std::sync::{Arc, Once};

use proptest::prelude::*;

use permaudit::{
    AuditConfig, DeclaredPermission, PermissionCatalog, ProtectionFlag, ProtectionType,
    RawPermissionInfo,
};
use permaudit_testkit::generators::{flag_mask, permission_name, protection_code};
use permaudit_testkit::{sample_snapshot, test_app_from_params, TestApp, TestAppParams};

static TRACING: Once = Once::new();

fn init_tracing() {
    TRACING.call_once(|| {
        let _ = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init();
    });
}

fn hash_of<T: Hash>(value: &T) -> u64 {
    let mut hasher = DefaultHasher::new();
    value.hash(&mut hasher);
    hasher.finish()
}

const CAMERA: &str = "android.permission.CAMERA";

#[test]
fn test_camera_is_dangerous_with_no_flags() {
    let perm: DeclaredPermission<TestApp> =
        DeclaredPermission::new(RawPermissionInfo::new(CAMERA, 1, 0));

    assert_eq!(perm.protection_type(), ProtectionType::Dangerous);
    assert!(perm.protection_flags().is_empty());
}

#[test]
fn test_granting_keeps_only_requesting_and_granted() {
    let a = TestApp::new("a").granted(CAMERA).into_arc();
    let b = TestApp::new("b").denied(CAMERA).into_arc();
    let c = TestApp::new("c").granted("android.permission.INTERNET").into_arc();

    let perm = DeclaredPermission::new(RawPermissionInfo::new(CAMERA, 1, 0))
        .with_requesting(vec![a, b, c]);

    let names: Vec<_> = perm.granting_pkgs().iter().map(|app| app.name.as_str()).collect();
    assert_eq!(names, vec!["a"]);
}

#[test]
fn test_system_and_instant_with_unknown_high_bit() {
    let mask = ProtectionFlag::System.bit() | ProtectionFlag::Instant.bit() | 0x4000_0000;
    let perm: DeclaredPermission<TestApp> =
        DeclaredPermission::new(RawPermissionInfo::new("com.example.permission.X", 2, mask));

    let flags: Vec<_> = perm.protection_flags().flags().collect();
    assert_eq!(flags, vec![ProtectionFlag::System, ProtectionFlag::Instant]);
}

#[test]
fn test_empty_requesting_yields_empty_granting() {
    let perm: DeclaredPermission<TestApp> =
        DeclaredPermission::new(RawPermissionInfo::new(CAMERA, 1, 0)).with_requesting(Vec::new());

    assert!(perm.granting_pkgs().is_empty());
}

#[test]
fn test_sample_inventory_catalog() {
    init_tracing();

    let catalog = PermissionCatalog::build(sample_snapshot(), &AuditConfig::default()).unwrap();

    let camera = catalog.get(CAMERA).unwrap();
    let granting: Vec<_> = camera
        .granting_pkgs()
        .iter()
        .map(|app| app.package_name.as_str())
        .collect();
    assert_eq!(granting, vec!["com.example.camera"]);

    let audio = catalog.get("android.permission.RECORD_AUDIO").unwrap();
    assert_eq!(audio.granting_count(), 2);

    let c2d = catalog.get("com.example.chat.permission.C2D_MESSAGE").unwrap();
    assert_eq!(c2d.protection_type(), ProtectionType::Signature);
    assert_eq!(c2d.declaring_pkgs()[0].package_name, "com.example.chat");
    assert!(c2d.granting_pkgs().is_empty());

    let alert = catalog.get("android.permission.SYSTEM_ALERT_WINDOW").unwrap();
    assert!(alert.protection_flags().has(ProtectionFlag::Appop));
    assert_eq!(alert.granting_count(), 1);

    let undeclared: Vec<_> = catalog.undeclared().map(|id| id.as_str()).collect();
    assert_eq!(undeclared, vec!["com.vendor.permission.UNDECLARED"]);

    let summary = catalog.summary();
    assert_eq!(summary.apps, 4);
    assert_eq!(summary.total, 6);
    assert_eq!(summary.by_type.get(&ProtectionType::Dangerous), Some(&2));
    assert_eq!(summary.granted_pairs, 4);
}

#[test]
fn test_sample_inventory_report_json() {
    init_tracing();

    let catalog = PermissionCatalog::build(sample_snapshot(), &AuditConfig::default()).unwrap();
    let json = catalog.report().to_json().unwrap();

    assert!(json.contains("\"android.permission.CAMERA\""));
    assert!(json.contains("\"DANGEROUS\""));
    assert!(json.contains("\"com.vendor.permission.UNDECLARED\""));
}

proptest! {
    #[test]
    fn test_granting_is_always_a_subset_of_requesting(
        name in permission_name(),
        apps in prop::collection::vec(any::<TestAppParams>(), 0..16),
    ) {
        let requesting: Vec<Arc<TestApp>> = apps
            .iter()
            .map(|params| Arc::new(test_app_from_params(params, &name)))
            .collect();

        let perm = DeclaredPermission::new(RawPermissionInfo::new(name.as_str(), 1, 0))
            .with_requesting(requesting);

        for granted in perm.granting_pkgs() {
            prop_assert!(perm.requesting_pkgs().iter().any(|r| Arc::ptr_eq(r, granted)));
        }

        let expected = apps.iter().filter(|p| p.requests && p.grant == Some(true)).count();
        prop_assert_eq!(perm.granting_count(), expected);
    }

    #[test]
    fn test_identity_decides_equality(
        name in permission_name(),
        other in permission_name(),
        code in protection_code(),
        mask in flag_mask(),
    ) {
        let a: DeclaredPermission<TestApp> =
            DeclaredPermission::new(RawPermissionInfo::new(name.as_str(), code, mask))
                .with_label("first");
        let b: DeclaredPermission<TestApp> =
            DeclaredPermission::new(RawPermissionInfo::new(name.as_str(), 0, 0))
                .with_description("second");
        let c: DeclaredPermission<TestApp> =
            DeclaredPermission::new(RawPermissionInfo::new(other.as_str(), code, mask));

        prop_assert!(a == b);
        prop_assert_eq!(hash_of(&a), hash_of(&b));
        prop_assert_eq!(a == c, name == other);
    }

    #[test]
    fn test_derived_fields_are_idempotent(code in protection_code(), mask in flag_mask()) {
        let perm: DeclaredPermission<TestApp> =
            DeclaredPermission::new(RawPermissionInfo::new(CAMERA, code, mask));

        prop_assert_eq!(perm.protection_type(), perm.protection_type());
        prop_assert_eq!(perm.protection_flags(), perm.protection_flags());
        prop_assert_eq!(perm.granting_pkgs().len(), perm.granting_pkgs().len());
    }
}
