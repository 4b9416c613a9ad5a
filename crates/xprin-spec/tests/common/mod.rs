// crates/xprin-spec/tests/common/mod.rs
// ============================================================================
// Module: Common Test Utilities
// Description: Shared fixtures for xprin-spec integration tests.
// Purpose: Provide reusable suite documents and result helpers.
// Dependencies: xprin-spec
// ============================================================================

//! ## Overview
//! Provides YAML fixtures and helpers shared by the integration tests.

#![allow(
    dead_code,
    clippy::use_debug,
    reason = "Each test binary uses a subset of the shared helpers."
)]

use xprin_spec::ResolvedSuite;
use xprin_spec::SpecError;
use xprin_spec::TestSuiteSpec;
use xprin_spec::ValidationFailure;

/// Result type used by integration tests.
pub type TestResult = Result<(), String>;

/// A suite where every case resolves cleanly through common inputs.
pub const PASSING_SUITE: &str = r"
common:
  inputs:
    composition: comp.yaml
    functions: fn.yaml
  hooks:
    pre-test:
      - name: setup
        run: ./setup.sh
  assertions:
    xprin:
      - name: two resources
        type: Count
        value: 2
tests:
  - name: t1
    id: first
    inputs:
      xr: xr1.yaml
  - name: t2
    id: second
    inputs:
      claim: claim.yaml
    patches:
      xrd: xrd.yaml
      connection-secret: true
      connection-secret-name: creds
    assertions:
      diff:
        - name: golden
          expected: golden.yaml
";

/// A suite with an empty common block and a case missing two mandatory fields.
pub const MISSING_INPUTS_SUITE: &str = r"
tests:
  - name: t1
    inputs:
      xr: xr1.yaml
";

/// Parses a YAML document into a suite.
pub fn parse(yaml: &str) -> Result<TestSuiteSpec, String> {
    TestSuiteSpec::from_yaml_str(yaml).map_err(|err| err.to_string())
}

/// Parses and resolves a YAML document that is expected to pass.
pub fn resolve_ok(yaml: &str) -> Result<ResolvedSuite, String> {
    parse(yaml)?.resolve().map_err(|err| format!("unexpected failure:\n{err}"))
}

/// Parses and resolves a YAML document that is expected to fail.
pub fn resolve_err(yaml: &str) -> Result<ValidationFailure, String> {
    match parse(yaml)?.resolve() {
        Err(SpecError::Validation(failure)) => Ok(failure),
        Ok(suite) => Err(format!("expected failure, resolved {} cases", suite.len())),
    }
}

/// Fails unless `haystack` contains `needle`.
pub fn expect_contains(haystack: &str, needle: &str) -> TestResult {
    if haystack.contains(needle) {
        Ok(())
    } else {
        Err(format!("{haystack:?} did not contain {needle:?}"))
    }
}
