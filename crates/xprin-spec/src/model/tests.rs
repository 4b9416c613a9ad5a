// crates/xprin-spec/src/model/tests.rs
// ============================================================================
// Module: Test Suite Model Unit Tests
// Description: Unit coverage for serialized names and null handling.
// Purpose: Keep `as_str` names, serde names, and the schema in agreement.
// Dependencies: xprin-spec, serde_json
// ============================================================================

#![allow(
    clippy::panic,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::missing_docs_in_private_items,
    reason = "Test-only assertions use panic-based checks for clarity."
)]

use serde_json::Value;

use super::AssertionOperator;
use super::AssertionType;
use super::ConnectionSecret;
use super::TestCaseId;
use super::TestSuiteSpec;

// ============================================================================
// SECTION: Enumerations
// ============================================================================

#[test]
fn assertion_types_serialize_as_their_names() {
    for kind in AssertionType::ALL {
        let encoded = serde_json::to_value(kind).unwrap();
        assert_eq!(encoded, Value::String(kind.as_str().to_string()));
        let decoded: AssertionType = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, kind);
    }
}

#[test]
fn assertion_operators_serialize_as_their_symbols() {
    for operator in AssertionOperator::ALL {
        let encoded = serde_json::to_value(operator).unwrap();
        assert_eq!(encoded, Value::String(operator.as_str().to_string()));
        let decoded: AssertionOperator = serde_json::from_value(encoded).unwrap();
        assert_eq!(decoded, operator);
    }
}

#[test]
fn connection_secret_serializes_as_optional_bool() {
    assert_eq!(serde_json::to_value(ConnectionSecret::Unset).unwrap(), Value::Null);
    assert_eq!(serde_json::to_value(ConnectionSecret::Enabled).unwrap(), Value::Bool(true));
    assert_eq!(serde_json::to_value(ConnectionSecret::Disabled).unwrap(), Value::Bool(false));
    let decoded: ConnectionSecret = serde_json::from_value(Value::Bool(false)).unwrap();
    assert_eq!(decoded, ConnectionSecret::Disabled);
}

#[test]
fn test_case_id_charset() {
    assert!(TestCaseId::new("valid_ID-1").is_well_formed());
    assert!(!TestCaseId::new("bad id!").is_well_formed());
    assert!(!TestCaseId::new("").is_well_formed());
}

// ============================================================================
// SECTION: Documents
// ============================================================================

#[test]
fn yaml_assertions_use_serialized_names() {
    let spec = TestSuiteSpec::from_yaml_str(
        "tests:\n  - name: t\n    assertions:\n      xprin:\n        - name: region\n          \
         type: FieldValue\n          resource: Bucket/one\n          field: spec.region\n          \
         operator: \"==\"\n          value: eu-west-1\n",
    )
    .unwrap();
    let assertion = &spec.tests[0].assertions.xprin[0];
    assert_eq!(assertion.kind, AssertionType::FieldValue);
    assert_eq!(assertion.operator, Some(AssertionOperator::Equals));
    assert_eq!(assertion.value, Some(Value::String("eu-west-1".to_string())));
}

#[test]
fn yaml_rejects_unknown_assertion_type() {
    let err = TestSuiteSpec::from_yaml_str(
        "tests:\n  - name: t\n    assertions:\n      xprin:\n        - name: a\n          type: \
         Bogus\n",
    )
    .unwrap_err();
    assert!(err.to_string().contains("testsuite parse error"));
}

#[test]
fn explicit_null_lists_are_empty() {
    let spec = TestSuiteSpec::from_yaml_str(
        "tests:\n  - name: t\n    inputs:\n      crds: ~\n      context-files: ~\n    hooks:\n      \
         pre-test: ~\n    assertions:\n      dyff: ~\n",
    )
    .unwrap();
    let case = &spec.tests[0];
    assert!(case.inputs.crds.is_empty());
    assert!(case.inputs.context_files.is_empty());
    assert!(case.hooks.pre_test.is_empty());
    assert!(case.assertions.dyff.is_empty());
}

#[test]
fn explicit_null_sections_are_empty() {
    let spec = TestSuiteSpec::from_yaml_str("common: ~\ntests:\n  - name: t\n    patches: ~\n").unwrap();
    assert!(!spec.has_common());
    assert!(!spec.tests[0].has_patches());
    assert!(TestSuiteSpec::from_yaml_str("tests: ~\n").unwrap().tests.is_empty());
}
