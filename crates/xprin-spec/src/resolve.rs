// crates/xprin-spec/src/resolve.rs
// ============================================================================
// Module: Suite Resolution
// Description: Drives suite validation, case merge, and case validation.
// Purpose: Hand executors only suites that resolved and validated cleanly.
// Dependencies: crate::{audit, merge, model, validation}, serde
// ============================================================================

//! ## Overview
//! [`Resolver`] runs the suite pass, merges every case with the common block,
//! and runs the case pass on each result. Suite-level violations do not stop
//! case resolution, so a single failure lists every scope. Whether checking
//! continues after the first failing case is controlled by
//! [`CaseFailurePolicy`].
//!
//! A [`ResolvedSuite`] can only be built here, which gives executors the
//! guarantee that each case has a name, a unique or absent ID, exactly one of
//! claim or XR, and a composition and functions path.

// ============================================================================
// SECTION: Imports
// ============================================================================

use serde::Serialize;

use crate::audit::NoopAuditSink;
use crate::audit::ResolutionAuditEvent;
use crate::audit::ResolutionAuditSink;
use crate::merge::Resolution;
use crate::merge::resolve_traced;
use crate::model::TestCase;
use crate::model::TestSuiteSpec;
use crate::validation::SpecError;
use crate::validation::ValidationFailure;
use crate::validation::validate_case_at;
use crate::validation::validate_suite;

// ============================================================================
// SECTION: Options
// ============================================================================

/// Behavior after a case fails validation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseFailurePolicy {
    /// Check every case and report all failures.
    #[default]
    CollectAll,
    /// Stop after the first failing case.
    StopAtFirst,
}

/// Resolver options.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Behavior after a case fails validation.
    pub case_failure: CaseFailurePolicy,
}

// ============================================================================
// SECTION: Resolved Suite
// ============================================================================

/// A suite whose cases are all merged and valid.
///
/// # Invariants
/// - Only constructed by [`Resolver::resolve`] after both passes succeeded.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ResolvedSuite {
    /// Resolved cases in suite order.
    tests: Vec<TestCase>,
}

impl ResolvedSuite {
    /// Returns the resolved cases.
    #[must_use]
    pub fn cases(&self) -> &[TestCase] {
        &self.tests
    }

    /// Returns the number of cases.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tests.len()
    }

    /// Returns true when the suite has no cases.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tests.is_empty()
    }

    /// Iterates over the resolved cases.
    pub fn iter(&self) -> std::slice::Iter<'_, TestCase> {
        self.tests.iter()
    }

    /// Finds a case by identifier.
    #[must_use]
    pub fn find_by_id(&self, id: &str) -> Option<&TestCase> {
        self.tests.iter().find(|case| case.id().is_some_and(|case_id| case_id.as_str() == id))
    }

    /// Consumes the suite and returns the resolved cases.
    #[must_use]
    pub fn into_cases(self) -> Vec<TestCase> {
        self.tests
    }
}

impl<'a> IntoIterator for &'a ResolvedSuite {
    type IntoIter = std::slice::Iter<'a, TestCase>;
    type Item = &'a TestCase;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

// ============================================================================
// SECTION: Resolver
// ============================================================================

/// Resolves and validates test suites.
pub struct Resolver<'a> {
    /// Resolution options.
    options: ResolveOptions,
    /// Sink receiving audit events.
    audit: &'a dyn ResolutionAuditSink,
}

impl<'a> Resolver<'a> {
    /// Creates a resolver with default options.
    #[must_use]
    pub fn new(audit: &'a dyn ResolutionAuditSink) -> Self {
        Self {
            options: ResolveOptions::default(),
            audit,
        }
    }

    /// Replaces the resolver options.
    #[must_use]
    pub const fn with_options(mut self, options: ResolveOptions) -> Self {
        self.options = options;
        self
    }

    /// Validates the suite, merges each case, and validates each result.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Validation`] holding the suite report and every
    /// failing case report that was checked.
    pub fn resolve(&self, spec: &TestSuiteSpec) -> Result<ResolvedSuite, SpecError> {
        let suite_report = validate_suite(spec);
        self.audit.record(&ResolutionAuditEvent::suite_validated(spec.tests.len(), &suite_report));

        let mut reports = vec![suite_report];
        let mut tests = Vec::with_capacity(spec.tests.len());
        for (index, case) in spec.tests.iter().enumerate() {
            let Resolution {
                case: resolved,
                inherited,
            } = resolve_traced(case, &spec.common);
            let report = validate_case_at(index, &resolved);
            if report.is_clean() {
                self.audit.record(&ResolutionAuditEvent::case_resolved(index, &resolved, &inherited));
                tests.push(resolved);
                continue;
            }
            self.audit.record(&ResolutionAuditEvent::case_rejected(
                index, &resolved, &inherited, &report,
            ));
            reports.push(report);
            if self.options.case_failure == CaseFailurePolicy::StopAtFirst {
                break;
            }
        }

        if let Some(failure) = ValidationFailure::from_reports(reports) {
            return Err(failure.into());
        }
        Ok(ResolvedSuite {
            tests,
        })
    }
}

impl TestSuiteSpec {
    /// Resolves the suite with default options and no audit output.
    ///
    /// # Errors
    ///
    /// Returns [`SpecError::Validation`] when any scope fails validation.
    pub fn resolve(&self) -> Result<ResolvedSuite, SpecError> {
        Resolver::new(&NoopAuditSink).resolve(self)
    }
}
