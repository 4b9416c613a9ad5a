// crates/xprin-spec/src/merge.rs
// ============================================================================
// Module: Common Inheritance
// Description: Field-level override-or-inherit rules from common into cases.
// Purpose: Produce fully resolved test cases without mutating the inputs.
// Dependencies: crate::{model, presence}
// ============================================================================

//! ## Overview
//! [`resolve`] combines one test case with the suite's [`Common`] block and
//! returns a new case. Merge is total and has no failure mode: anything left
//! unset after merge is reported by [`crate::validation`].
//!
//! Rules, applied per field:
//! - scalar inputs keep the case value when set, else take common's;
//! - collection inputs keep the case value when non-empty, else clone common's;
//! - patches are only merged when common configures any patch, and the
//!   connection secret toggle is only inherited when the case left it unset;
//! - pre-test and post-test hooks are inherited whole, never blended;
//! - assertions are inherited whole per engine, never blended.
//!
//! `name` and `id` are never inherited.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::collections::BTreeMap;

use serde::Serialize;

use crate::model::AssertionEngine;
use crate::model::Common;
use crate::model::ConnectionSecret;
use crate::model::TestCase;
use crate::presence::is_set;

// ============================================================================
// SECTION: Types
// ============================================================================

/// Field copied from the common block during merge.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(into = "&'static str")]
pub enum InheritedField {
    /// `inputs.xr`
    Xr,
    /// `inputs.claim`
    Claim,
    /// `inputs.composition`
    Composition,
    /// `inputs.functions`
    Functions,
    /// `inputs.crds`
    Crds,
    /// `inputs.context-files`
    ContextFiles,
    /// `inputs.context-values`
    ContextValues,
    /// `inputs.observed-resources`
    ObservedResources,
    /// `inputs.extra-resources`
    ExtraResources,
    /// `inputs.function-credentials`
    FunctionCredentials,
    /// `patches.xrd`
    Xrd,
    /// `patches.connection-secret`
    ConnectionSecret,
    /// `patches.connection-secret-name`
    ConnectionSecretName,
    /// `patches.connection-secret-namespace`
    ConnectionSecretNamespace,
    /// `hooks.pre-test`
    PreTestHooks,
    /// `hooks.post-test`
    PostTestHooks,
    /// `assertions.xprin`
    XprinAssertions,
    /// `assertions.diff`
    DiffAssertions,
    /// `assertions.dyff`
    DyffAssertions,
}

impl InheritedField {
    /// Returns the dotted document path of the field.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Xr => "inputs.xr",
            Self::Claim => "inputs.claim",
            Self::Composition => "inputs.composition",
            Self::Functions => "inputs.functions",
            Self::Crds => "inputs.crds",
            Self::ContextFiles => "inputs.context-files",
            Self::ContextValues => "inputs.context-values",
            Self::ObservedResources => "inputs.observed-resources",
            Self::ExtraResources => "inputs.extra-resources",
            Self::FunctionCredentials => "inputs.function-credentials",
            Self::Xrd => "patches.xrd",
            Self::ConnectionSecret => "patches.connection-secret",
            Self::ConnectionSecretName => "patches.connection-secret-name",
            Self::ConnectionSecretNamespace => "patches.connection-secret-namespace",
            Self::PreTestHooks => "hooks.pre-test",
            Self::PostTestHooks => "hooks.post-test",
            Self::XprinAssertions => "assertions.xprin",
            Self::DiffAssertions => "assertions.diff",
            Self::DyffAssertions => "assertions.dyff",
        }
    }

    /// Returns the inherited field for an assertion engine.
    #[must_use]
    pub const fn assertions(engine: AssertionEngine) -> Self {
        match engine {
            AssertionEngine::Xprin => Self::XprinAssertions,
            AssertionEngine::Diff => Self::DiffAssertions,
            AssertionEngine::Dyff => Self::DyffAssertions,
        }
    }
}

impl From<InheritedField> for &'static str {
    fn from(value: InheritedField) -> Self {
        value.as_str()
    }
}

/// Result of a traced merge.
#[derive(Debug, Clone, PartialEq)]
pub struct Resolution {
    /// Fully resolved test case.
    pub case: TestCase,
    /// Fields copied from common, in merge order.
    pub inherited: Vec<InheritedField>,
}

// ============================================================================
// SECTION: Merge
// ============================================================================

/// Resolves a test case against the common block.
///
/// Neither argument is modified; inherited collections are cloned.
#[must_use]
pub fn resolve(case: &TestCase, common: &Common) -> TestCase {
    resolve_traced(case, common).case
}

/// Resolves a test case and records which fields came from common.
#[must_use]
pub fn resolve_traced(case: &TestCase, common: &Common) -> Resolution {
    let mut resolved = case.clone();
    let mut inherited = Vec::new();
    let presence = common.presence();

    let inputs = &mut resolved.inputs;
    let defaults = &common.inputs;
    inherit_scalar(&mut inputs.xr, defaults.xr.as_ref(), InheritedField::Xr, &mut inherited);
    inherit_scalar(&mut inputs.claim, defaults.claim.as_ref(), InheritedField::Claim, &mut inherited);
    inherit_scalar(
        &mut inputs.composition,
        defaults.composition.as_ref(),
        InheritedField::Composition,
        &mut inherited,
    );
    inherit_scalar(
        &mut inputs.functions,
        defaults.functions.as_ref(),
        InheritedField::Functions,
        &mut inherited,
    );
    inherit_list(&mut inputs.crds, &defaults.crds, InheritedField::Crds, &mut inherited);
    inherit_map(
        &mut inputs.context_files,
        &defaults.context_files,
        InheritedField::ContextFiles,
        &mut inherited,
    );
    inherit_map(
        &mut inputs.context_values,
        &defaults.context_values,
        InheritedField::ContextValues,
        &mut inherited,
    );
    inherit_scalar(
        &mut inputs.observed_resources,
        defaults.observed_resources.as_ref(),
        InheritedField::ObservedResources,
        &mut inherited,
    );
    inherit_scalar(
        &mut inputs.extra_resources,
        defaults.extra_resources.as_ref(),
        InheritedField::ExtraResources,
        &mut inherited,
    );
    inherit_scalar(
        &mut inputs.function_credentials,
        defaults.function_credentials.as_ref(),
        InheritedField::FunctionCredentials,
        &mut inherited,
    );

    if presence.patches.any() {
        let patches = &mut resolved.patches;
        let defaults = &common.patches;
        inherit_scalar(&mut patches.xrd, defaults.xrd.as_ref(), InheritedField::Xrd, &mut inherited);
        inherit_toggle(&mut patches.connection_secret, defaults.connection_secret, &mut inherited);
        inherit_scalar(
            &mut patches.connection_secret_name,
            defaults.connection_secret_name.as_ref(),
            InheritedField::ConnectionSecretName,
            &mut inherited,
        );
        inherit_scalar(
            &mut patches.connection_secret_namespace,
            defaults.connection_secret_namespace.as_ref(),
            InheritedField::ConnectionSecretNamespace,
            &mut inherited,
        );
    }

    if presence.hooks.any() {
        inherit_list(
            &mut resolved.hooks.pre_test,
            &common.hooks.pre_test,
            InheritedField::PreTestHooks,
            &mut inherited,
        );
        inherit_list(
            &mut resolved.hooks.post_test,
            &common.hooks.post_test,
            InheritedField::PostTestHooks,
            &mut inherited,
        );
    }

    for engine in AssertionEngine::ALL {
        if !presence.assertions.has(engine) {
            continue;
        }
        let field = InheritedField::assertions(engine);
        let assertions = &mut resolved.assertions;
        let defaults = &common.assertions;
        match engine {
            AssertionEngine::Xprin => {
                inherit_list(&mut assertions.xprin, &defaults.xprin, field, &mut inherited);
            }
            AssertionEngine::Diff => {
                inherit_list(&mut assertions.diff, &defaults.diff, field, &mut inherited);
            }
            AssertionEngine::Dyff => {
                inherit_list(&mut assertions.dyff, &defaults.dyff, field, &mut inherited);
            }
        }
    }

    Resolution {
        case: resolved,
        inherited,
    }
}

impl TestCase {
    /// Returns this case resolved against `common`.
    #[must_use]
    pub fn merged_with(&self, common: &Common) -> Self {
        resolve(self, common)
    }
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Copies `default` into `target` when the target is unset.
fn inherit_scalar(
    target: &mut Option<String>,
    default: Option<&String>,
    field: InheritedField,
    inherited: &mut Vec<InheritedField>,
) {
    if is_set(target.as_ref()) || !is_set(default) {
        return;
    }
    *target = default.cloned();
    inherited.push(field);
}

/// Clones `default` into `target` when the target is empty.
fn inherit_list<T: Clone>(
    target: &mut Vec<T>,
    default: &[T],
    field: InheritedField,
    inherited: &mut Vec<InheritedField>,
) {
    if !target.is_empty() || default.is_empty() {
        return;
    }
    *target = default.to_vec();
    inherited.push(field);
}

/// Clones `default` into `target` when the target is empty.
fn inherit_map(
    target: &mut BTreeMap<String, String>,
    default: &BTreeMap<String, String>,
    field: InheritedField,
    inherited: &mut Vec<InheritedField>,
) {
    if !target.is_empty() || default.is_empty() {
        return;
    }
    target.clone_from(default);
    inherited.push(field);
}

/// Copies the toggle only when the case never configured it.
fn inherit_toggle(
    target: &mut ConnectionSecret,
    default: ConnectionSecret,
    inherited: &mut Vec<InheritedField>,
) {
    if !target.is_unset() || default.is_unset() {
        return;
    }
    *target = default;
    inherited.push(InheritedField::ConnectionSecret);
}

#[cfg(test)]
mod tests;
