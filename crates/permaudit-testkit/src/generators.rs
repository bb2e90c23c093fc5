//! Proptest generators for property-based testing.

use proptest::prelude::*;

use permaudit_core::{PermissionId, ProtectionFlag, RawPermissionInfo};

use crate::fixtures::TestApp;

/// Generate a permission name in the platform or an app namespace.
pub fn permission_name() -> impl Strategy<Value = String> {
    prop_oneof![
        "[A-Z][A-Z_]{0,23}".prop_map(|s| format!("android.permission.{}", s)),
        "[a-z]{1,8}\\.[a-z]{1,8}\\.permission\\.[A-Z_]{1,16}".prop_map(String::from),
    ]
}

/// Generate a PermissionId.
pub fn permission_id() -> impl Strategy<Value = PermissionId> {
    permission_name().prop_map(PermissionId::new)
}

/// Generate a base protection code, biased towards the known ones.
pub fn protection_code() -> impl Strategy<Value = i32> {
    prop_oneof![
        4 => 0i32..=4,
        1 => any::<i32>(),
    ]
}

/// Generate a mask made only of known flag bits.
pub fn known_flag_mask() -> impl Strategy<Value = i32> {
    prop::sample::subsequence(ProtectionFlag::ALL.to_vec(), 0..=ProtectionFlag::ALL.len())
        .prop_map(|flags| flags.into_iter().fold(0, |mask, f| mask | f.bit()))
}

/// Generate any flag mask, known bits or not.
pub fn flag_mask() -> impl Strategy<Value = i32> {
    prop_oneof![
        known_flag_mask(),
        any::<i32>(),
    ]
}

/// Generate raw protection info.
pub fn raw_permission_info() -> impl Strategy<Value = RawPermissionInfo> {
    (permission_name(), protection_code(), flag_mask())
        .prop_map(|(name, code, mask)| RawPermissionInfo::new(name, code, mask))
}

/// Generate a grant record: absent, denied, or granted.
pub fn grant_record() -> impl Strategy<Value = Option<bool>> {
    any::<Option<bool>>()
}

/// Parameters for generating a test app relative to one permission.
#[derive(Debug, Clone)]
pub struct TestAppParams {
    pub name: String,
    pub requests: bool,
    pub grant: Option<bool>,
}

impl Arbitrary for TestAppParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        ("[a-z]{1,8}(\\.[a-z]{1,8}){1,2}", any::<bool>(), grant_record())
            .prop_map(|(name, requests, grant)| TestAppParams {
                name,
                requests,
                grant,
            })
            .boxed()
    }
}

/// Build a test app from parameters.
///
/// An app that does not request `permission` still carries its grant state
/// under an unrelated name, so stale grant records are exercised too.
pub fn test_app_from_params(params: &TestAppParams, permission: &str) -> TestApp {
    let app = TestApp::new(params.name.clone());
    if params.requests {
        app.request(permission, params.grant)
    } else {
        app.request("unrelated.permission.OTHER", params.grant)
    }
}
