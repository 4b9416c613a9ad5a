// crates/xprin-spec/src/lib.rs
// ============================================================================
// Module: xprin Test Suite Library
// Description: Canonical test suite model, inheritance, and validation.
// Purpose: Single source of truth for xprin.yaml semantics.
// Dependencies: serde, serde_json, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! `xprin-spec` defines the test suite model of the xprin testing tool and the
//! rules that turn a raw suite into executable cases: each case inherits unset
//! fields from the common block, then suite-level and case-level validation
//! collect every violation. Only a [`ResolvedSuite`] is handed to executors.
//!
//! ```
//! use xprin_spec::TestSuiteSpec;
//!
//! let suite = TestSuiteSpec::from_yaml_str(
//!     "common:\n  inputs:\n    composition: comp.yaml\n    functions: fn.yaml\n\
//!      tests:\n  - name: t1\n    inputs:\n      xr: xr1.yaml\n",
//! )?;
//! let resolved = suite.resolve()?;
//! assert_eq!(resolved.cases()[0].inputs.composition.as_deref(), Some("comp.yaml"));
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// ============================================================================
// SECTION: Modules
// ============================================================================

pub mod audit;
pub mod load;
pub mod merge;
pub mod model;
pub mod presence;
pub mod resolve;
pub mod schema;
pub mod validation;

// ============================================================================
// SECTION: Re-Exports
// ============================================================================

pub use audit::FileAuditSink;
pub use audit::MemoryAuditSink;
pub use audit::NoopAuditSink;
pub use audit::ResolutionAuditEvent;
pub use audit::ResolutionAuditSink;
pub use audit::StderrAuditSink;
pub use load::LoadError;
pub use load::load_suite;
pub use merge::InheritedField;
pub use merge::resolve;
pub use model::*;
pub use presence::AssertionsPresence;
pub use presence::CommonPresence;
pub use presence::HooksPresence;
pub use presence::InputsPresence;
pub use presence::PatchesPresence;
pub use resolve::CaseFailurePolicy;
pub use resolve::ResolveOptions;
pub use resolve::ResolvedSuite;
pub use resolve::Resolver;
pub use schema::testsuite_schema;
pub use validation::SpecError;
pub use validation::ValidationFailure;
pub use validation::ValidationReport;
pub use validation::ValidationScope;
pub use validation::Violation;
pub use validation::ViolationCategory;
pub use validation::validate_case;
pub use validation::validate_suite;
