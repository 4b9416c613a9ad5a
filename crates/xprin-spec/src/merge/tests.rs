// crates/xprin-spec/src/merge/tests.rs
// ============================================================================
// Module: Common Inheritance Unit Tests
// Description: Unit coverage for per-field override-or-inherit rules.
// Purpose: Pin override priority, inheritance, isolation, and gating.
// Dependencies: xprin-spec
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based checks for clarity."
)]

use std::collections::BTreeMap;

use super::InheritedField;
use super::resolve;
use super::resolve_traced;
use crate::model::AssertionGoldenFile;
use crate::model::AssertionType;
use crate::model::AssertionXprin;
use crate::model::Common;
use crate::model::ConnectionSecret;
use crate::model::Hook;
use crate::model::TestCase;

// ============================================================================
// SECTION: Fixtures
// ============================================================================

fn path(value: &str) -> Option<String> {
    Some(value.to_string())
}

fn golden(name: &str) -> AssertionGoldenFile {
    AssertionGoldenFile {
        name: name.to_string(),
        expected: format!("{name}.yaml"),
        resource: None,
    }
}

fn count_assertion(name: &str) -> AssertionXprin {
    AssertionXprin {
        name: name.to_string(),
        kind: AssertionType::Count,
        resource: None,
        field: None,
        operator: None,
        value: Some(serde_json::json!(3)),
    }
}

fn full_common() -> Common {
    let mut common = Common::default();
    common.inputs.xr = path("common-xr.yaml");
    common.inputs.claim = path("common-claim.yaml");
    common.inputs.composition = path("common-comp.yaml");
    common.inputs.functions = path("common-fn.yaml");
    common.inputs.crds = vec!["common-crd.yaml".to_string()];
    common.inputs.context_files = BTreeMap::from([("a".to_string(), "a.json".to_string())]);
    common.inputs.context_values = BTreeMap::from([("b".to_string(), "1".to_string())]);
    common.inputs.observed_resources = path("observed.yaml");
    common.inputs.extra_resources = path("extra.yaml");
    common.inputs.function_credentials = path("creds.yaml");
    common.patches.xrd = path("xrd.yaml");
    common.patches.connection_secret = ConnectionSecret::Enabled;
    common.patches.connection_secret_name = path("common-secret");
    common.patches.connection_secret_namespace = path("common-ns");
    common.hooks.pre_test = vec![Hook::new("common pre 1"), Hook::new("common pre 2")];
    common.hooks.post_test = vec![Hook::new("common post")];
    common.assertions.xprin = vec![count_assertion("common count")];
    common.assertions.diff = vec![golden("common-diff")];
    common.assertions.dyff = vec![golden("common-dyff")];
    common
}

// ============================================================================
// SECTION: Scalars
// ============================================================================

#[test]
fn case_scalars_override_common() {
    let common = full_common();
    let mut case = TestCase::named("override");
    case.inputs.xr = path("case-xr.yaml");
    case.inputs.composition = path("case-comp.yaml");
    case.inputs.functions = path("case-fn.yaml");
    case.inputs.observed_resources = path("case-observed.yaml");
    case.inputs.extra_resources = path("case-extra.yaml");
    case.inputs.function_credentials = path("case-creds.yaml");

    let resolved = resolve(&case, &common);
    assert_eq!(resolved.inputs.xr, path("case-xr.yaml"));
    assert_eq!(resolved.inputs.composition, path("case-comp.yaml"));
    assert_eq!(resolved.inputs.functions, path("case-fn.yaml"));
    assert_eq!(resolved.inputs.observed_resources, path("case-observed.yaml"));
    assert_eq!(resolved.inputs.extra_resources, path("case-extra.yaml"));
    assert_eq!(resolved.inputs.function_credentials, path("case-creds.yaml"));
}

#[test]
fn unset_scalars_inherit_from_common() {
    let common = full_common();
    let resolved = resolve(&TestCase::named("inherit"), &common);
    assert_eq!(resolved.inputs.xr, common.inputs.xr);
    assert_eq!(resolved.inputs.claim, common.inputs.claim);
    assert_eq!(resolved.inputs.composition, common.inputs.composition);
    assert_eq!(resolved.inputs.functions, common.inputs.functions);
    assert_eq!(resolved.inputs.observed_resources, common.inputs.observed_resources);
    assert_eq!(resolved.inputs.extra_resources, common.inputs.extra_resources);
    assert_eq!(resolved.inputs.function_credentials, common.inputs.function_credentials);
}

#[test]
fn empty_string_scalar_is_overridden_by_common() {
    let mut common = Common::default();
    common.inputs.composition = path("comp.yaml");
    let mut case = TestCase::named("empty");
    case.inputs.composition = Some(String::new());
    assert_eq!(resolve(&case, &common).inputs.composition, path("comp.yaml"));
}

#[test]
fn name_and_id_are_never_inherited() {
    let common = full_common();
    let mut case = TestCase::named("");
    case.id = None;
    let resolved = resolve(&case, &common);
    assert_eq!(resolved.name, "");
    assert!(resolved.id.is_none());
}

// ============================================================================
// SECTION: Collections
// ============================================================================

#[test]
fn non_empty_case_collections_win() {
    let common = full_common();
    let mut case = TestCase::named("collections");
    case.inputs.crds = vec!["case-crd.yaml".to_string()];
    case.inputs.context_files = BTreeMap::from([("c".to_string(), "c.json".to_string())]);

    let resolved = resolve(&case, &common);
    assert_eq!(resolved.inputs.crds, vec!["case-crd.yaml".to_string()]);
    assert_eq!(resolved.inputs.context_files.len(), 1);
    assert!(resolved.inputs.context_files.contains_key("c"));
    assert_eq!(resolved.inputs.context_values, common.inputs.context_values);
}

#[test]
fn inherited_collections_are_copies() {
    let common = full_common();
    let original = common.clone();
    let mut resolved = resolve(&TestCase::named("isolated"), &common);

    resolved.inputs.crds.push("mutated.yaml".to_string());
    resolved.inputs.context_files.insert("z".to_string(), "z.json".to_string());
    resolved.hooks.pre_test.push(Hook::new("mutated"));
    resolved.assertions.diff.clear();

    assert_eq!(common, original);
    assert_eq!(common.inputs.crds, vec!["common-crd.yaml".to_string()]);
}

#[test]
fn resolve_leaves_case_untouched() {
    let common = full_common();
    let case = TestCase::named("pure");
    let before = case.clone();
    let _resolved = resolve(&case, &common);
    assert_eq!(case, before);
}

// ============================================================================
// SECTION: Patches
// ============================================================================

#[test]
fn patches_inherit_field_by_field() {
    let common = full_common();
    let mut case = TestCase::named("patches");
    case.patches.connection_secret_name = path("case-secret");

    let resolved = resolve(&case, &common);
    assert_eq!(resolved.patches.xrd, path("xrd.yaml"));
    assert_eq!(resolved.patches.connection_secret, ConnectionSecret::Enabled);
    assert_eq!(resolved.patches.connection_secret_name, path("case-secret"));
    assert_eq!(resolved.patches.connection_secret_namespace, path("common-ns"));
}

#[test]
fn explicit_case_toggle_is_kept() {
    let common = full_common();
    let mut case = TestCase::named("disabled");
    case.patches.connection_secret = ConnectionSecret::Disabled;
    let resolved = resolve(&case, &common);
    assert_eq!(resolved.patches.connection_secret, ConnectionSecret::Disabled);
}

#[test]
fn patches_are_skipped_when_common_has_only_disabled_toggle() {
    let mut common = Common::default();
    common.patches.connection_secret = ConnectionSecret::Disabled;
    let resolved = resolve(&TestCase::named("gated"), &common);
    assert_eq!(resolved.patches.connection_secret, ConnectionSecret::Unset);
}

#[test]
fn disabled_toggle_is_inherited_when_common_has_other_patches() {
    let mut common = Common::default();
    common.patches.xrd = path("xrd.yaml");
    common.patches.connection_secret = ConnectionSecret::Disabled;
    let resolved = resolve(&TestCase::named("inherits-disabled"), &common);
    assert_eq!(resolved.patches.connection_secret, ConnectionSecret::Disabled);
    assert_eq!(resolved.patches.xrd, path("xrd.yaml"));
}

// ============================================================================
// SECTION: Hooks
// ============================================================================

#[test]
fn case_pre_test_hooks_replace_common_list() {
    let common = full_common();
    let mut case = TestCase::named("hooks");
    case.hooks.pre_test = vec![Hook::new("case pre")];

    let resolved = resolve(&case, &common);
    assert_eq!(resolved.hooks.pre_test, vec![Hook::new("case pre")]);
    assert_eq!(resolved.hooks.post_test, common.hooks.post_test);
}

#[test]
fn hooks_inherit_whole_lists() {
    let common = full_common();
    let resolved = resolve(&TestCase::named("hooks"), &common);
    assert_eq!(resolved.hooks.pre_test.len(), 2);
    assert_eq!(resolved.hooks, common.hooks);
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

#[test]
fn assertions_are_merged_per_engine() {
    let common = full_common();
    let mut case = TestCase::named("assertions");
    case.assertions.diff = vec![golden("case-diff")];

    let resolved = resolve(&case, &common);
    assert_eq!(resolved.assertions.diff, vec![golden("case-diff")]);
    assert_eq!(resolved.assertions.dyff, common.assertions.dyff);
    assert_eq!(resolved.assertions.xprin, common.assertions.xprin);
}

#[test]
fn empty_common_engine_leaves_case_engine_empty() {
    let mut common = Common::default();
    common.assertions.xprin = vec![count_assertion("only xprin")];
    let resolved = resolve(&TestCase::named("assertions"), &common);
    assert_eq!(resolved.assertions.xprin.len(), 1);
    assert!(resolved.assertions.diff.is_empty());
    assert!(resolved.assertions.dyff.is_empty());
}

// ============================================================================
// SECTION: Tracing
// ============================================================================

#[test]
fn traced_merge_lists_inherited_fields_in_order() {
    let mut common = Common::default();
    common.inputs.composition = path("comp.yaml");
    common.inputs.functions = path("fn.yaml");
    common.hooks.post_test = vec![Hook::new("cleanup")];
    common.assertions.dyff = vec![golden("dyff")];
    let mut case = TestCase::named("traced");
    case.inputs.xr = path("xr.yaml");
    case.inputs.functions = path("case-fn.yaml");

    let resolution = resolve_traced(&case, &common);
    assert_eq!(
        resolution.inherited,
        vec![
            InheritedField::Composition,
            InheritedField::PostTestHooks,
            InheritedField::DyffAssertions,
        ]
    );
    assert_eq!(resolution.case, resolve(&case, &common));
}

#[test]
fn nothing_is_inherited_from_empty_common() {
    let mut case = TestCase::named("alone");
    case.inputs.claim = path("claim.yaml");
    let resolution = resolve_traced(&case, &Common::default());
    assert!(resolution.inherited.is_empty());
    assert_eq!(resolution.case, case);
}

#[test]
fn inherited_field_paths_use_document_keys() {
    assert_eq!(InheritedField::ContextFiles.as_str(), "inputs.context-files");
    assert_eq!(InheritedField::ConnectionSecretNamespace.as_str(), "patches.connection-secret-namespace");
    assert_eq!(InheritedField::PreTestHooks.as_str(), "hooks.pre-test");
    let rendered = serde_json::to_string(&InheritedField::XprinAssertions).unwrap();
    assert_eq!(rendered, "\"assertions.xprin\"");
}
