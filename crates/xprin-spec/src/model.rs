// crates/xprin-spec/src/model.rs
// ============================================================================
// Module: Test Suite Model
// Description: Canonical data model for xprin test suite documents.
// Purpose: Single source of truth for field names, optionality, and enumerations.
// Dependencies: serde, serde_json
// ============================================================================

//! ## Overview
//! A test suite document holds one [`Common`] block of shared defaults and an
//! ordered list of [`TestCase`] entries. The types in this module carry no
//! behavior beyond structure; presence queries live in [`crate::presence`],
//! inheritance in [`crate::merge`], and checks in [`crate::validation`].
//!
//! Serialized keys are kebab-case. Optional scalar fields treat an empty
//! string the same as an absent value, and an explicit `null` section or list
//! deserializes as empty.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;
use std::fmt;

use serde::Deserialize;
use serde::Deserializer;
use serde::Serialize;
use serde_json::Value;

// ============================================================================
// SECTION: Test Suite
// ============================================================================

/// Root of a test suite document.
///
/// # Invariants
/// - `tests` may be empty; each case must validate independently after merge.
/// - `common` is read-only once the suite is loaded.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestSuiteSpec {
    /// Shared defaults inherited by every test case.
    #[serde(default, deserialize_with = "null_as_default")]
    pub common: Common,
    /// Ordered test cases.
    #[serde(default, deserialize_with = "null_as_default")]
    pub tests: Vec<TestCase>,
}

/// Shared defaults applied to every test case that does not override them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Common {
    /// Default inputs.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Inputs,
    /// Default XR patching configuration.
    #[serde(default, deserialize_with = "null_as_default")]
    pub patches: Patches,
    /// Default lifecycle hooks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hooks: Hooks,
    /// Default assertions, grouped by engine.
    #[serde(default, deserialize_with = "null_as_default")]
    pub assertions: Assertions,
}

// ============================================================================
// SECTION: Test Case
// ============================================================================

/// A single unit of testable behavior.
///
/// # Invariants
/// - After validation `name` is non-empty and `id`, when present, is unique
///   across the suite and well formed.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TestCase {
    /// Display name.
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    /// Optional opaque identifier.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<TestCaseId>,
    /// Resource selection for the case.
    #[serde(default, deserialize_with = "null_as_default")]
    pub inputs: Inputs,
    /// XR patching configuration.
    #[serde(default, deserialize_with = "null_as_default")]
    pub patches: Patches,
    /// Lifecycle hooks.
    #[serde(default, deserialize_with = "null_as_default")]
    pub hooks: Hooks,
    /// Assertions, grouped by engine.
    #[serde(default, deserialize_with = "null_as_default")]
    pub assertions: Assertions,
}

impl TestCase {
    /// Creates an empty test case with the given display name.
    #[must_use]
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Returns the identifier when one is present and non-empty.
    #[must_use]
    pub fn id(&self) -> Option<&TestCaseId> {
        self.id.as_ref().filter(|id| !id.as_str().is_empty())
    }

    /// Returns a label for reports: the ID when present, else the name.
    #[must_use]
    pub fn label(&self) -> &str {
        self.id().map_or(self.name.as_str(), TestCaseId::as_str)
    }
}

/// Test case identifier.
///
/// # Invariants
/// - Opaque UTF-8 string; construction applies no validation. Use
///   [`TestCaseId::is_well_formed`] to check the allowed charset.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TestCaseId(String);

impl TestCaseId {
    /// Creates a new test case identifier.
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Returns true when the identifier is non-empty and only contains ASCII
    /// letters, digits, underscores, and hyphens.
    #[must_use]
    pub fn is_well_formed(&self) -> bool {
        !self.0.is_empty()
            && self.0.chars().all(|ch| ch.is_ascii_alphanumeric() || ch == '_' || ch == '-')
    }
}

impl fmt::Display for TestCaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl From<&str> for TestCaseId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for TestCaseId {
    fn from(value: String) -> Self {
        Self::new(value)
    }
}

// ============================================================================
// SECTION: Inputs
// ============================================================================

/// Inputs of a test case or of the common block.
///
/// Exactly one of `claim` or `xr` must be set after merge; `composition` and
/// `functions` are mandatory after merge.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Inputs {
    /// Path to the claim file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub claim: Option<String>,
    /// Path to the XR file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xr: Option<String>,
    /// Path to the composition file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub composition: Option<String>,
    /// Path to the functions file or directory.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub functions: Option<String>,
    /// Paths to CRD files.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub crds: Vec<String>,
    /// Context keys mapped to file paths.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub context_files: BTreeMap<String, String>,
    /// Context keys mapped to inline values.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "BTreeMap::is_empty"
    )]
    pub context_values: BTreeMap<String, String>,
    /// Path to the observed resources file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub observed_resources: Option<String>,
    /// Path to the extra resources file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_resources: Option<String>,
    /// Path to the function credentials file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub function_credentials: Option<String>,
}

// ============================================================================
// SECTION: Patches
// ============================================================================

/// Post-render XR patching configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Patches {
    /// Path to the XR's or claim's XRD.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub xrd: Option<String>,
    /// Connection secret toggle.
    #[serde(default, skip_serializing_if = "ConnectionSecret::is_unset")]
    pub connection_secret: ConnectionSecret,
    /// Name of the connection secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_secret_name: Option<String>,
    /// Namespace of the connection secret.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub connection_secret_namespace: Option<String>,
}

/// Tri-state connection secret toggle.
///
/// Serialized as an optional boolean: absent or `null` is [`Self::Unset`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "Option<bool>", into = "Option<bool>")]
pub enum ConnectionSecret {
    /// Never configured.
    #[default]
    Unset,
    /// Explicitly `true`.
    Enabled,
    /// Explicitly `false`.
    Disabled,
}

impl ConnectionSecret {
    /// Returns true when the toggle was never configured.
    #[must_use]
    pub const fn is_unset(&self) -> bool {
        matches!(self, Self::Unset)
    }

    /// Returns true when the toggle is explicitly enabled.
    #[must_use]
    pub const fn is_enabled(&self) -> bool {
        matches!(self, Self::Enabled)
    }
}

impl From<Option<bool>> for ConnectionSecret {
    fn from(value: Option<bool>) -> Self {
        match value {
            None => Self::Unset,
            Some(true) => Self::Enabled,
            Some(false) => Self::Disabled,
        }
    }
}

impl From<ConnectionSecret> for Option<bool> {
    fn from(value: ConnectionSecret) -> Self {
        match value {
            ConnectionSecret::Unset => None,
            ConnectionSecret::Enabled => Some(true),
            ConnectionSecret::Disabled => Some(false),
        }
    }
}

// ============================================================================
// SECTION: Hooks
// ============================================================================

/// Lifecycle hooks executed around a test case.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields, rename_all = "kebab-case")]
pub struct Hooks {
    /// Hooks executed in order before the case.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub pre_test: Vec<Hook>,
    /// Hooks executed in order after the case.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub post_test: Vec<Hook>,
}

/// A single externally executed command.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Hook {
    /// Descriptive name.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    /// Command to run.
    pub run: String,
}

impl Hook {
    /// Creates a hook running `run`, without a name.
    #[must_use]
    pub fn new(run: impl Into<String>) -> Self {
        Self {
            name: None,
            run: run.into(),
        }
    }
}

// ============================================================================
// SECTION: Assertions
// ============================================================================

/// Assertions grouped by execution engine.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Assertions {
    /// In-process structured assertions.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub xprin: Vec<AssertionXprin>,
    /// Byte-exact golden file comparisons.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub diff: Vec<AssertionGoldenFile>,
    /// Semantic golden file comparisons.
    #[serde(
        default,
        deserialize_with = "null_as_default",
        skip_serializing_if = "Vec::is_empty"
    )]
    pub dyff: Vec<AssertionGoldenFile>,
}

/// Assertion engine identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AssertionEngine {
    /// In-process structured assertions.
    Xprin,
    /// Byte-exact golden file comparison.
    Diff,
    /// Semantic golden file comparison.
    Dyff,
}

impl AssertionEngine {
    /// All engines in document order.
    pub const ALL: [Self; 3] = [Self::Xprin, Self::Diff, Self::Dyff];

    /// Returns the document key of the engine.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xprin => "xprin",
            Self::Diff => "diff",
            Self::Dyff => "dyff",
        }
    }
}

/// A structured assertion evaluated by the xprin engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssertionXprin {
    /// Descriptive name.
    pub name: String,
    /// Kind of assertion.
    #[serde(rename = "type")]
    pub kind: AssertionType,
    /// Resource selector (`Kind/Name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
    /// Field path (e.g. `metadata.name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
    /// Comparison operator for field value assertions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub operator: Option<AssertionOperator>,
    /// Expected value.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

/// Kinds of xprin assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssertionType {
    /// Number of rendered resources.
    Count,
    /// Resource exists.
    Exists,
    /// Resource does not exist.
    NotExists,
    /// Field has a given type.
    FieldType,
    /// Field exists.
    FieldExists,
    /// Field does not exist.
    FieldNotExists,
    /// Field has a given value.
    FieldValue,
}

impl AssertionType {
    /// All assertion types in canonical order.
    pub const ALL: [Self; 7] = [
        Self::Count,
        Self::Exists,
        Self::NotExists,
        Self::FieldType,
        Self::FieldExists,
        Self::FieldNotExists,
        Self::FieldValue,
    ];

    /// Returns the serialized name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Count => "Count",
            Self::Exists => "Exists",
            Self::NotExists => "NotExists",
            Self::FieldType => "FieldType",
            Self::FieldExists => "FieldExists",
            Self::FieldNotExists => "FieldNotExists",
            Self::FieldValue => "FieldValue",
        }
    }
}

/// Comparison operators for field value assertions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AssertionOperator {
    /// Value equality (`==`).
    #[serde(rename = "==")]
    Equals,
    /// Type or identity check (`is`).
    #[serde(rename = "is")]
    Is,
}

impl AssertionOperator {
    /// All operators in canonical order.
    pub const ALL: [Self; 2] = [Self::Equals, Self::Is];

    /// Returns the serialized operator.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Equals => "==",
            Self::Is => "is",
        }
    }
}

/// A golden file assertion used by the diff and dyff engines.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssertionGoldenFile {
    /// Descriptive name.
    pub name: String,
    /// Path to the golden file.
    pub expected: String,
    /// Resource selector (`Kind/Name`).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resource: Option<String>,
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Deserializes an explicit `null` as the type's default value.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
mod tests;
