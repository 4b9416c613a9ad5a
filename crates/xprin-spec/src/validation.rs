// crates/xprin-spec/src/validation.rs
// ============================================================================
// Module: Suite Validation
// Description: Structural and semantic checks for suites and resolved cases.
// Purpose: Report every violation in a scope instead of stopping at the first.
// Dependencies: crate::{model, presence}, serde, thiserror
// ============================================================================

//! ## Overview
//! Validation runs in two independent passes:
//! - the suite pass checks names and identifiers across all cases;
//! - the case pass checks mandatory fields and connection secret consistency
//!   of a single case after it was merged with the common block.
//!
//! Each pass returns a [`ValidationReport`] holding every [`Violation`] found.
//! Reports render as human-readable text, one violation per line.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::HashSet;
use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::model::Patches;
use crate::model::TestCase;
use crate::model::TestCaseId;
use crate::model::TestSuiteSpec;

// ============================================================================
// SECTION: Violations
// ============================================================================

/// Violation category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ViolationCategory {
    /// A mandatory field is absent.
    Structural,
    /// A value uses a disallowed format.
    Format,
    /// Values are individually well formed but inconsistent.
    Semantic,
}

/// A single validation violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Violation {
    /// The case at `index` has an empty name.
    #[error("test case has empty name")]
    EmptyName {
        /// Zero-based case position.
        index: usize,
    },
    /// The identifier uses characters outside `[A-Za-z0-9_-]`.
    #[error(
        "test case ID '{id}' contains invalid characters (allowed: alphanumeric, underscore, \
         hyphen)"
    )]
    InvalidId {
        /// Offending identifier.
        id: TestCaseId,
    },
    /// The identifier was already used by an earlier case.
    #[error("duplicate test case ID '{id}' found")]
    DuplicateId {
        /// Repeated identifier.
        id: TestCaseId,
    },
    /// Both claim and XR are set.
    #[error("conflicting fields: both 'claim' and 'xr' are specified, but only one is allowed")]
    ConflictingResource,
    /// Neither claim nor XR is set.
    #[error(
        "missing mandatory field: either 'claim' or 'xr' must be specified (it can be specified \
         either in the test case or in the common inputs)"
    )]
    MissingResource,
    /// Composition is not set.
    #[error(
        "missing mandatory field: composition (it can be specified either in the test case or in \
         the common inputs)"
    )]
    MissingComposition,
    /// Functions is not set.
    #[error(
        "missing mandatory field: functions (it can be specified either in the test case or in \
         the common inputs)"
    )]
    MissingFunctions,
    /// Secret name or namespace is set while the toggle was never configured.
    #[error(
        "connection-secret must be set to true when using connection-secret-name or \
         connection-secret-namespace"
    )]
    ConnectionSecretUnset,
}

impl Violation {
    /// Returns the violation category.
    #[must_use]
    pub const fn category(&self) -> ViolationCategory {
        match self {
            Self::EmptyName {
                ..
            }
            | Self::MissingResource
            | Self::MissingComposition
            | Self::MissingFunctions => ViolationCategory::Structural,
            Self::InvalidId {
                ..
            } => ViolationCategory::Format,
            Self::DuplicateId {
                ..
            }
            | Self::ConflictingResource
            | Self::ConnectionSecretUnset => ViolationCategory::Semantic,
        }
    }
}

// ============================================================================
// SECTION: Reports
// ============================================================================

/// Scope a report was produced for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "scope", rename_all = "snake_case")]
pub enum ValidationScope {
    /// The whole suite (names and identifiers).
    Suite,
    /// A single resolved case.
    Case {
        /// Zero-based case position, when known.
        index: Option<usize>,
        /// Case display name.
        name: String,
    },
}

impl fmt::Display for ValidationScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Suite => f.write_str("invalid testsuite file"),
            Self::Case {
                index: Some(index),
                name,
            } => write!(f, "invalid test case #{} '{name}'", index + 1),
            Self::Case {
                index: None,
                name,
            } => write!(f, "invalid test case '{name}'"),
        }
    }
}

/// All violations found in one scope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    /// Scope that was checked.
    pub scope: ValidationScope,
    /// Violations in discovery order.
    pub violations: Vec<Violation>,
}

impl ValidationReport {
    /// Creates an empty report for `scope`.
    #[must_use]
    pub const fn new(scope: ValidationScope) -> Self {
        Self {
            scope,
            violations: Vec::new(),
        }
    }

    /// Returns true when no violations were found.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.violations.is_empty()
    }

    /// Converts the report into a result.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Validation`] when the report has violations.
    pub fn into_result(self) -> Result<(), SpecError> {
        ValidationFailure::from_reports(vec![self]).map_or(Ok(()), |failure| Err(failure.into()))
    }
}

impl fmt::Display for ValidationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:", self.scope)?;
        for violation in &self.violations {
            write!(f, "\n- {violation}")?;
        }
        Ok(())
    }
}

/// One or more reports that contain violations.
///
/// # Invariants
/// - Never empty; every held report has at least one violation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationFailure {
    /// Failing reports in check order.
    reports: Vec<ValidationReport>,
}

impl ValidationFailure {
    /// Keeps the failing reports; returns `None` when all are clean.
    #[must_use]
    pub fn from_reports(reports: Vec<ValidationReport>) -> Option<Self> {
        let reports: Vec<ValidationReport> =
            reports.into_iter().filter(|report| !report.is_clean()).collect();
        if reports.is_empty() {
            None
        } else {
            Some(Self {
                reports,
            })
        }
    }

    /// Returns the failing reports.
    #[must_use]
    pub fn reports(&self) -> &[ValidationReport] {
        &self.reports
    }

    /// Returns every violation across all reports.
    pub fn violations(&self) -> impl Iterator<Item = &Violation> {
        self.reports.iter().flat_map(|report| report.violations.iter())
    }
}

impl fmt::Display for ValidationFailure {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (position, report) in self.reports.iter().enumerate() {
            if position > 0 {
                f.write_str("\n")?;
            }
            report.fmt(f)?;
        }
        Ok(())
    }
}

/// Validation errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SpecError {
    /// One or more scopes failed validation.
    #[error("{0}")]
    Validation(ValidationFailure),
}

impl From<ValidationFailure> for SpecError {
    fn from(value: ValidationFailure) -> Self {
        Self::Validation(value)
    }
}

// ============================================================================
// SECTION: Suite Pass
// ============================================================================

/// Checks names and identifiers across all cases.
///
/// Cases without an ID are exempt from format and uniqueness checks.
#[must_use]
pub fn validate_suite(spec: &TestSuiteSpec) -> ValidationReport {
    let mut report = ValidationReport::new(ValidationScope::Suite);
    let mut seen: HashSet<&str> = HashSet::new();
    for (index, case) in spec.tests.iter().enumerate() {
        if case.name.is_empty() {
            report.violations.push(Violation::EmptyName {
                index,
            });
        }
        let Some(id) = case.id() else {
            continue;
        };
        if !id.is_well_formed() {
            report.violations.push(Violation::InvalidId {
                id: id.clone(),
            });
        }
        if !seen.insert(id.as_str()) {
            report.violations.push(Violation::DuplicateId {
                id: id.clone(),
            });
        }
    }
    report
}

impl TestSuiteSpec {
    /// Runs the suite pass.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Validation`] listing every name and ID violation.
    pub fn check_valid(&self) -> Result<(), SpecError> {
        validate_suite(self).into_result()
    }
}

// ============================================================================
// SECTION: Case Pass
// ============================================================================

/// Checks a resolved case: mandatory fields and connection secret consistency.
#[must_use]
pub fn validate_case(case: &TestCase) -> ValidationReport {
    case_report(None, case)
}

/// Checks a resolved case at a known suite position.
pub(crate) fn validate_case_at(index: usize, case: &TestCase) -> ValidationReport {
    case_report(Some(index), case)
}

/// Builds the case report for an optional position.
fn case_report(index: Option<usize>, case: &TestCase) -> ValidationReport {
    let mut report = ValidationReport::new(ValidationScope::Case {
        index,
        name: case.name.clone(),
    });
    report.violations.extend(mandatory_field_violations(case));
    report.violations.extend(connection_secret_violation(&case.patches));
    report
}

/// Collects mandatory field violations of a resolved case.
fn mandatory_field_violations(case: &TestCase) -> Vec<Violation> {
    let presence = case.inputs.presence();
    let mut violations = Vec::new();
    match (presence.claim, presence.xr) {
        (true, true) => violations.push(Violation::ConflictingResource),
        (false, false) => violations.push(Violation::MissingResource),
        _ => {}
    }
    if !presence.composition {
        violations.push(Violation::MissingComposition);
    }
    if !presence.functions {
        violations.push(Violation::MissingFunctions);
    }
    violations
}

/// Returns the connection secret violation, if any.
///
/// An explicit toggle, enabled or disabled, accepts a configured secret name
/// or namespace; a disabled toggle silently disables the secret.
#[must_use]
pub fn connection_secret_violation(patches: &Patches) -> Option<Violation> {
    let presence = patches.presence();
    (presence.names_secret() && patches.connection_secret.is_unset())
        .then_some(Violation::ConnectionSecretUnset)
}

impl TestCase {
    /// Checks the mandatory fields of a resolved case.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Validation`] listing every missing or conflicting field.
    pub fn check_mandatory_fields(&self) -> Result<(), SpecError> {
        let mut report = ValidationReport::new(ValidationScope::Case {
            index: None,
            name: self.name.clone(),
        });
        report.violations = mandatory_field_violations(self);
        report.into_result()
    }
}

impl Patches {
    /// Checks connection secret consistency.
    ///
    /// # Errors
    ///
    /// Returns [`Violation::ConnectionSecretUnset`] when a secret name or
    /// namespace is set but the toggle was never configured.
    pub fn check_connection_secret(&self) -> Result<(), Violation> {
        connection_secret_violation(self).map_or(Ok(()), Err)
    }
}
