// crates/xprin-spec/src/presence.rs
// ============================================================================
// Module: Presence Summaries
// Description: Read-only "is this configured" queries over the suite model.
// Purpose: Share one definition of emptiness between merge and validation.
// Dependencies: crate::model
// ============================================================================

//! ## Overview
//! Each configurable group computes a small presence summary once. The merge
//! engine gates inheritance on these summaries and the validation engine
//! checks mandatory fields with them, so both stages agree on what counts as
//! set. A connection secret toggle that is explicitly disabled is not the
//! same state as one that was never configured.

// ============================================================================
// SECTION: Imports
// ============================================================================

use crate::model::AssertionEngine;
use crate::model::Assertions;
use crate::model::Common;
use crate::model::Hooks;
use crate::model::Inputs;
use crate::model::Patches;
use crate::model::TestCase;
use crate::model::TestSuiteSpec;

/// Returns true when an optional scalar holds a non-empty value.
pub(crate) fn is_set(value: Option<&String>) -> bool {
    value.is_some_and(|value| !value.is_empty())
}

// ============================================================================
// SECTION: Summaries
// ============================================================================

/// Presence summary for [`Inputs`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct InputsPresence {
    /// Claim path set.
    pub claim: bool,
    /// XR path set.
    pub xr: bool,
    /// Composition path set.
    pub composition: bool,
    /// Functions path set.
    pub functions: bool,
    /// At least one CRD path.
    pub crds: bool,
    /// At least one context file.
    pub context_files: bool,
    /// At least one inline context value.
    pub context_values: bool,
    /// Observed resources path set.
    pub observed_resources: bool,
    /// Extra resources path set.
    pub extra_resources: bool,
    /// Function credentials path set.
    pub function_credentials: bool,
}

impl InputsPresence {
    /// Returns true when any input is configured.
    #[must_use]
    pub const fn any(self) -> bool {
        self.claim
            || self.xr
            || self.composition
            || self.functions
            || self.crds
            || self.context_files
            || self.context_values
            || self.observed_resources
            || self.extra_resources
            || self.function_credentials
    }
}

/// Presence summary for [`Patches`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PatchesPresence {
    /// XRD path set.
    pub xrd: bool,
    /// Connection secret explicitly enabled.
    pub connection_secret_enabled: bool,
    /// Connection secret name set.
    pub connection_secret_name: bool,
    /// Connection secret namespace set.
    pub connection_secret_namespace: bool,
}

impl PatchesPresence {
    /// Returns true when any patch configuration is set.
    ///
    /// An explicitly disabled toggle on its own does not count.
    #[must_use]
    pub const fn any(self) -> bool {
        self.xrd
            || self.connection_secret_enabled
            || self.connection_secret_name
            || self.connection_secret_namespace
    }

    /// Returns true when a secret name or namespace is configured.
    #[must_use]
    pub const fn names_secret(self) -> bool {
        self.connection_secret_name || self.connection_secret_namespace
    }
}

/// Presence summary for [`Hooks`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HooksPresence {
    /// At least one pre-test hook.
    pub pre_test: bool,
    /// At least one post-test hook.
    pub post_test: bool,
}

impl HooksPresence {
    /// Returns true when any hook is configured.
    #[must_use]
    pub const fn any(self) -> bool {
        self.pre_test || self.post_test
    }
}

/// Presence summary for [`Assertions`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssertionsPresence {
    /// At least one xprin assertion.
    pub xprin: bool,
    /// At least one diff assertion.
    pub diff: bool,
    /// At least one dyff assertion.
    pub dyff: bool,
}

impl AssertionsPresence {
    /// Returns true when the given engine has assertions.
    #[must_use]
    pub const fn has(self, engine: AssertionEngine) -> bool {
        match engine {
            AssertionEngine::Xprin => self.xprin,
            AssertionEngine::Diff => self.diff,
            AssertionEngine::Dyff => self.dyff,
        }
    }

    /// Returns true when any engine has assertions.
    #[must_use]
    pub const fn any(self) -> bool {
        self.xprin || self.diff || self.dyff
    }
}

/// Presence summary for [`Common`].
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CommonPresence {
    /// Input defaults.
    pub inputs: InputsPresence,
    /// Patch defaults.
    pub patches: PatchesPresence,
    /// Hook defaults.
    pub hooks: HooksPresence,
    /// Assertion defaults.
    pub assertions: AssertionsPresence,
}

impl CommonPresence {
    /// Returns true when the common block configures anything at all.
    #[must_use]
    pub const fn any(self) -> bool {
        self.inputs.any() || self.patches.any() || self.hooks.any() || self.assertions.any()
    }
}

// ============================================================================
// SECTION: Model Queries
// ============================================================================

impl Inputs {
    /// Computes the presence summary.
    #[must_use]
    pub fn presence(&self) -> InputsPresence {
        InputsPresence {
            claim: self.has_claim(),
            xr: self.has_xr(),
            composition: self.has_composition(),
            functions: self.has_functions(),
            crds: !self.crds.is_empty(),
            context_files: !self.context_files.is_empty(),
            context_values: !self.context_values.is_empty(),
            observed_resources: is_set(self.observed_resources.as_ref()),
            extra_resources: is_set(self.extra_resources.as_ref()),
            function_credentials: is_set(self.function_credentials.as_ref()),
        }
    }

    /// Returns true when a claim path is set.
    #[must_use]
    pub fn has_claim(&self) -> bool {
        is_set(self.claim.as_ref())
    }

    /// Returns true when an XR path is set.
    #[must_use]
    pub fn has_xr(&self) -> bool {
        is_set(self.xr.as_ref())
    }

    /// Returns true when a composition path is set.
    #[must_use]
    pub fn has_composition(&self) -> bool {
        is_set(self.composition.as_ref())
    }

    /// Returns true when a functions path is set.
    #[must_use]
    pub fn has_functions(&self) -> bool {
        is_set(self.functions.as_ref())
    }
}

impl Patches {
    /// Computes the presence summary.
    #[must_use]
    pub fn presence(&self) -> PatchesPresence {
        PatchesPresence {
            xrd: is_set(self.xrd.as_ref()),
            connection_secret_enabled: self.connection_secret.is_enabled(),
            connection_secret_name: is_set(self.connection_secret_name.as_ref()),
            connection_secret_namespace: is_set(self.connection_secret_namespace.as_ref()),
        }
    }

    /// Returns true when any patch configuration is set.
    #[must_use]
    pub fn has_patches(&self) -> bool {
        self.presence().any()
    }
}

impl Hooks {
    /// Computes the presence summary.
    #[must_use]
    pub fn presence(&self) -> HooksPresence {
        HooksPresence {
            pre_test: !self.pre_test.is_empty(),
            post_test: !self.post_test.is_empty(),
        }
    }
}

impl Assertions {
    /// Computes the presence summary.
    #[must_use]
    pub fn presence(&self) -> AssertionsPresence {
        AssertionsPresence {
            xprin: !self.xprin.is_empty(),
            diff: !self.diff.is_empty(),
            dyff: !self.dyff.is_empty(),
        }
    }
}

impl Common {
    /// Computes the presence summary for every group.
    #[must_use]
    pub fn presence(&self) -> CommonPresence {
        CommonPresence {
            inputs: self.inputs.presence(),
            patches: self.patches.presence(),
            hooks: self.hooks.presence(),
            assertions: self.assertions.presence(),
        }
    }
}

impl TestSuiteSpec {
    /// Returns true when the common block configures anything.
    #[must_use]
    pub fn has_common(&self) -> bool {
        self.common.presence().any()
    }
}

impl TestCase {
    /// Returns true when an XR path is set.
    #[must_use]
    pub fn has_xr(&self) -> bool {
        self.inputs.has_xr()
    }

    /// Returns true when a claim path is set.
    #[must_use]
    pub fn has_claim(&self) -> bool {
        self.inputs.has_claim()
    }

    /// Returns true when any patch configuration is set.
    #[must_use]
    pub fn has_patches(&self) -> bool {
        self.patches.has_patches()
    }

    /// Returns true when pre-test hooks are set.
    #[must_use]
    pub fn has_pre_test_hooks(&self) -> bool {
        self.hooks.presence().pre_test
    }

    /// Returns true when post-test hooks are set.
    #[must_use]
    pub fn has_post_test_hooks(&self) -> bool {
        self.hooks.presence().post_test
    }

    /// Returns true when any hooks are set.
    #[must_use]
    pub fn has_hooks(&self) -> bool {
        self.hooks.presence().any()
    }

    /// Returns true when xprin assertions are set.
    #[must_use]
    pub fn has_assertions_xprin(&self) -> bool {
        self.assertions.presence().xprin
    }

    /// Returns true when diff assertions are set.
    #[must_use]
    pub fn has_assertions_diff(&self) -> bool {
        self.assertions.presence().diff
    }

    /// Returns true when dyff assertions are set.
    #[must_use]
    pub fn has_assertions_dyff(&self) -> bool {
        self.assertions.presence().dyff
    }

    /// Returns true when any assertions are set.
    #[must_use]
    pub fn has_assertions(&self) -> bool {
        self.assertions.presence().any()
    }
}
