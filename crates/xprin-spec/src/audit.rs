// crates/xprin-spec/src/audit.rs
// ============================================================================
// Module: Resolution Audit Logging
// Description: Structured audit events for suite resolution.
// Purpose: Emit JSON-line logs of merge and validation outcomes.
// Dependencies: crate::{merge, model, validation}, serde, serde_json
// ============================================================================

//! ## Overview
//! The resolver reports what it did through a [`ResolutionAuditSink`]. Events
//! record which fields each case inherited from the common block and which
//! violations were found. Sinks write one JSON object per line so the output
//! can be routed to any logging pipeline.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::fs::OpenOptions;
use std::io;
use std::io::Write;
use std::path::Path;
use std::sync::Mutex;
use std::time::SystemTime;
use std::time::UNIX_EPOCH;

use serde::Serialize;

use crate::merge::InheritedField;
use crate::model::TestCase;
use crate::validation::ValidationReport;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Outcome recorded by an audit event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ResolutionOutcome {
    /// The scope passed validation.
    Ok,
    /// The scope has violations.
    Invalid,
}

/// Resolution audit event payload.
#[derive(Debug, Clone, Serialize)]
pub struct ResolutionAuditEvent {
    /// Event identifier.
    pub event: &'static str,
    /// Event timestamp (milliseconds since epoch).
    pub timestamp_ms: u128,
    /// Number of cases in the suite for suite events.
    pub test_count: Option<usize>,
    /// Zero-based case position for case events.
    pub case_index: Option<usize>,
    /// Case display name for case events.
    pub case_name: Option<String>,
    /// Case identifier when present.
    pub case_id: Option<String>,
    /// Outcome of the scope.
    pub outcome: ResolutionOutcome,
    /// Fields inherited from the common block.
    pub inherited: Vec<InheritedField>,
    /// Rendered violations.
    pub violations: Vec<String>,
}

impl ResolutionAuditEvent {
    /// Creates an event for the suite-level pass.
    #[must_use]
    pub fn suite_validated(test_count: usize, report: &ValidationReport) -> Self {
        Self {
            event: "suite_validated",
            timestamp_ms: now_ms(),
            test_count: Some(test_count),
            case_index: None,
            case_name: None,
            case_id: None,
            outcome: outcome_of(report),
            inherited: Vec::new(),
            violations: render_violations(report),
        }
    }

    /// Creates an event for a case that was merged and passed validation.
    #[must_use]
    pub fn case_resolved(index: usize, case: &TestCase, inherited: &[InheritedField]) -> Self {
        Self {
            event: "case_resolved",
            timestamp_ms: now_ms(),
            test_count: None,
            case_index: Some(index),
            case_name: Some(case.name.clone()),
            case_id: case.id().map(ToString::to_string),
            outcome: ResolutionOutcome::Ok,
            inherited: inherited.to_vec(),
            violations: Vec::new(),
        }
    }

    /// Creates an event for a case that failed validation after merge.
    #[must_use]
    pub fn case_rejected(
        index: usize,
        case: &TestCase,
        inherited: &[InheritedField],
        report: &ValidationReport,
    ) -> Self {
        Self {
            event: "case_rejected",
            timestamp_ms: now_ms(),
            test_count: None,
            case_index: Some(index),
            case_name: Some(case.name.clone()),
            case_id: case.id().map(ToString::to_string),
            outcome: ResolutionOutcome::Invalid,
            inherited: inherited.to_vec(),
            violations: render_violations(report),
        }
    }
}

// ============================================================================
// SECTION: Trait
// ============================================================================

/// Audit sink for resolution events.
pub trait ResolutionAuditSink: Send + Sync {
    /// Record an audit event.
    fn record(&self, event: &ResolutionAuditEvent);
}

/// Audit sink that logs JSON lines to stderr.
pub struct StderrAuditSink;

impl ResolutionAuditSink for StderrAuditSink {
    fn record(&self, event: &ResolutionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event) {
            let _ = writeln!(std::io::stderr(), "{payload}");
        }
    }
}

/// Audit sink that logs JSON lines to a file.
pub struct FileAuditSink {
    /// File handle used for append-only logging.
    file: Mutex<std::fs::File>,
}

impl FileAuditSink {
    /// Opens the audit log file in append mode.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be opened.
    pub fn new(path: &Path) -> io::Result<Self> {
        let file = OpenOptions::new().create(true).append(true).open(path)?;
        Ok(Self {
            file: Mutex::new(file),
        })
    }
}

impl ResolutionAuditSink for FileAuditSink {
    fn record(&self, event: &ResolutionAuditEvent) {
        if let Ok(payload) = serde_json::to_string(event)
            && let Ok(mut file) = self.file.lock()
        {
            let _ = writeln!(file, "{payload}");
            let _ = file.flush();
        }
    }
}

/// Audit sink that keeps events in memory.
#[derive(Default)]
pub struct MemoryAuditSink {
    /// Recorded events in order.
    events: Mutex<Vec<ResolutionAuditEvent>>,
}

impl MemoryAuditSink {
    /// Returns a copy of the recorded events.
    #[must_use]
    pub fn events(&self) -> Vec<ResolutionAuditEvent> {
        self.events.lock().map(|events| events.clone()).unwrap_or_default()
    }
}

impl ResolutionAuditSink for MemoryAuditSink {
    fn record(&self, event: &ResolutionAuditEvent) {
        if let Ok(mut events) = self.events.lock() {
            events.push(event.clone());
        }
    }
}

/// No-op audit sink.
pub struct NoopAuditSink;

impl ResolutionAuditSink for NoopAuditSink {
    fn record(&self, _event: &ResolutionAuditEvent) {}
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Milliseconds since the Unix epoch.
fn now_ms() -> u128 {
    SystemTime::now().duration_since(UNIX_EPOCH).unwrap_or_default().as_millis()
}

/// Maps a report to an outcome.
fn outcome_of(report: &ValidationReport) -> ResolutionOutcome {
    if report.is_clean() { ResolutionOutcome::Ok } else { ResolutionOutcome::Invalid }
}

/// Renders each violation of a report.
fn render_violations(report: &ValidationReport) -> Vec<String> {
    report.violations.iter().map(ToString::to_string).collect()
}
