//! End-to-end resolution tests for xprin-spec.
// crates/xprin-spec/tests/end_to_end.rs
// ============================================================================
// Module: End-to-End Resolution Tests
// Description: Parse, merge, and validate complete suite documents.
// Purpose: Ensure executors only receive fully resolved, valid cases.
// ============================================================================

#![allow(clippy::use_debug, reason = "Failure messages print violation lists.")]

mod common;

use common::MISSING_INPUTS_SUITE;
use common::PASSING_SUITE;
use common::TestResult;
use common::expect_contains;
use common::parse;
use common::resolve_err;
use common::resolve_ok;
use xprin_spec::ConnectionSecret;
use xprin_spec::ValidationScope;
use xprin_spec::Violation;

// ============================================================================
// SECTION: Passing Suites
// ============================================================================

#[test]
fn passing_suite_inherits_common_block() -> TestResult {
    let resolved = resolve_ok(PASSING_SUITE)?;
    if resolved.len() != 2 {
        return Err(format!("expected 2 cases, got {}", resolved.len()));
    }
    for case in &resolved {
        if case.inputs.composition.as_deref() != Some("comp.yaml") {
            return Err(format!("{} did not inherit composition", case.name));
        }
        if case.hooks.pre_test.len() != 1 || case.assertions.xprin.len() != 1 {
            return Err(format!("{} did not inherit hooks and assertions", case.name));
        }
    }
    Ok(())
}

#[test]
fn passing_suite_keeps_case_overrides() -> TestResult {
    let resolved = resolve_ok(PASSING_SUITE)?;
    let second = resolved.find_by_id("second").ok_or("missing case 'second'")?;
    if second.inputs.claim.as_deref() != Some("claim.yaml") || second.inputs.xr.is_some() {
        return Err("case 'second' should keep its claim and no xr".to_string());
    }
    if second.patches.connection_secret != ConnectionSecret::Enabled {
        return Err("connection secret toggle was lost".to_string());
    }
    if second.assertions.diff.len() != 1 {
        return Err("case diff assertions were lost".to_string());
    }
    Ok(())
}

#[test]
fn resolving_twice_gives_same_result() -> TestResult {
    let first = resolve_ok(PASSING_SUITE)?;
    let second = resolve_ok(PASSING_SUITE)?;
    if first != second {
        return Err("resolution is not deterministic".to_string());
    }
    Ok(())
}

#[test]
fn resolved_suite_serializes_with_document_keys() -> TestResult {
    let resolved = resolve_ok(PASSING_SUITE)?;
    let value = serde_json::to_value(&resolved).map_err(|err| err.to_string())?;
    let secret = value
        .pointer("/tests/1/patches/connection-secret")
        .ok_or("missing connection-secret key")?;
    if secret != &serde_json::Value::Bool(true) {
        return Err(format!("unexpected connection-secret: {secret}"));
    }
    if value.pointer("/tests/0/hooks/pre-test/0/run").is_none() {
        return Err("missing inherited pre-test hook".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Failing Suites
// ============================================================================

#[test]
fn missing_inputs_report_both_fields() -> TestResult {
    let failure = resolve_err(MISSING_INPUTS_SUITE)?;
    let violations: Vec<&Violation> = failure.violations().collect();
    if violations != vec![&Violation::MissingComposition, &Violation::MissingFunctions] {
        return Err(format!("unexpected violations: {violations:?}"));
    }
    let rendered = failure.to_string();
    expect_contains(&rendered, "invalid test case #1 't1':")?;
    expect_contains(&rendered, "missing mandatory field: composition")?;
    expect_contains(&rendered, "missing mandatory field: functions")?;
    Ok(())
}

#[test]
fn duplicate_and_malformed_ids_fail_suite_pass() -> TestResult {
    let yaml = r"
common:
  inputs:
    xr: xr.yaml
    composition: comp.yaml
    functions: fn.yaml
tests:
  - name: a
    id: same
  - name: b
    id: same
  - name: c
    id: not valid
";
    let failure = resolve_err(yaml)?;
    let suite = failure.reports().first().ok_or("missing suite report")?;
    if suite.scope != ValidationScope::Suite || suite.violations.len() != 2 {
        return Err(format!("unexpected suite report: {suite}"));
    }
    if failure.reports().len() != 1 {
        return Err("cases should all pass after merge".to_string());
    }
    Ok(())
}

#[test]
fn common_claim_and_case_xr_conflict() -> TestResult {
    let yaml = r"
common:
  inputs:
    claim: claim.yaml
    composition: comp.yaml
    functions: fn.yaml
tests:
  - name: both
    inputs:
      xr: xr.yaml
";
    let failure = resolve_err(yaml)?;
    let violations: Vec<&Violation> = failure.violations().collect();
    if violations != vec![&Violation::ConflictingResource] {
        return Err(format!("unexpected violations: {violations:?}"));
    }
    Ok(())
}

#[test]
fn inherited_secret_name_requires_toggle() -> TestResult {
    let yaml = r"
common:
  inputs:
    xr: xr.yaml
    composition: comp.yaml
    functions: fn.yaml
  patches:
    connection-secret-name: creds
tests:
  - name: unset
  - name: enabled
    patches:
      connection-secret: true
  - name: disabled
    patches:
      connection-secret: false
";
    let failure = resolve_err(yaml)?;
    if failure.reports().len() != 1 {
        return Err(format!("expected only the unset case to fail:\n{failure}"));
    }
    expect_contains(&failure.to_string(), "invalid test case #1 'unset':")?;
    expect_contains(&failure.to_string(), "connection-secret must be set to true")?;
    Ok(())
}

// ============================================================================
// SECTION: Parsing
// ============================================================================

#[test]
fn unknown_fields_are_rejected() -> TestResult {
    let yaml = "tests:\n  - name: t1\n    inputz:\n      xr: xr.yaml\n";
    match parse(yaml) {
        Err(message) => expect_contains(&message, "testsuite parse error"),
        Ok(_) => Err("unknown field was accepted".to_string()),
    }
}

#[test]
fn null_connection_secret_is_unset() -> TestResult {
    let spec = parse("tests:\n  - name: t1\n    patches:\n      connection-secret: null\n")?;
    let case = spec.tests.first().ok_or("missing case")?;
    if case.patches.connection_secret != ConnectionSecret::Unset {
        return Err("null toggle should be unset".to_string());
    }
    Ok(())
}

#[test]
fn json_documents_are_accepted() -> TestResult {
    let spec = parse(r#"{"tests": [{"name": "t1", "id": "j-1"}]}"#)?;
    if spec.tests.len() != 1 || spec.has_common() {
        return Err("unexpected json parse result".to_string());
    }
    Ok(())
}

// ============================================================================
// SECTION: Reference Examples
// ============================================================================

#[test]
fn common_inputs_reach_xr_and_claim_cases() -> TestResult {
    let yaml = r"
common:
  inputs:
    composition: comp.yaml
    functions: fn.yaml
tests:
  - name: t1
    inputs:
      xr: xr1.yaml
  - name: t2
    inputs:
      claim: c2.yaml
";
    let resolved = resolve_ok(yaml)?;
    for case in &resolved {
        if case.inputs.composition.as_deref() != Some("comp.yaml")
            || case.inputs.functions.as_deref() != Some("fn.yaml")
        {
            return Err(format!("{} did not inherit composition and functions", case.name));
        }
    }
    Ok(())
}

#[test]
fn unnamed_case_with_claim_and_xr_reports_name_conflict_and_missing_fields() -> TestResult {
    let yaml = r#"
tests:
  - name: ""
    inputs:
      xr: x
      claim: c
"#;
    let failure = resolve_err(yaml)?;
    let violations: Vec<&Violation> = failure.violations().collect();
    if violations.first() != Some(&&Violation::EmptyName { index: 0 }) {
        return Err(format!("suite pass should report the empty name first: {violations:?}"));
    }
    let case_violations = [
        &Violation::ConflictingResource,
        &Violation::MissingComposition,
        &Violation::MissingFunctions,
    ];
    if violations[1 ..] != case_violations {
        return Err(format!("case pass should report conflict and missing fields: {violations:?}"));
    }
    let rendered = failure.to_string();
    expect_contains(&rendered, "invalid testsuite file:\n- test case has empty name")?;
    expect_contains(&rendered, "- conflicting fields: both 'claim' and 'xr' are specified")?;
    Ok(())
}
