// crates/xprin-spec/src/load.rs
// ============================================================================
// Module: Test Suite Loading
// Description: Reads test suite documents from disk with hard limits.
// Purpose: Hand a deserialized suite to resolution without judging its content.
// Dependencies: crate::model, serde_yaml, thiserror
// ============================================================================

//! ## Overview
//! Suite files are YAML (JSON documents parse too). The path is checked for
//! length limits, the file for size and UTF-8 encoding, and the document is
//! then deserialized with `serde_yaml`. Loading never runs validation; call
//! [`crate::resolve::Resolver`] on the result.

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::env;
use std::fs;
use std::path::Path;
use std::path::PathBuf;

use thiserror::Error;

use crate::model::TestSuiteSpec;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// Default suite filename when no path is specified.
pub const DEFAULT_SUITE_NAME: &str = "xprin.yaml";
/// Filename suffix of named suite files.
pub const SUITE_FILE_SUFFIX: &str = "_xprin.yaml";
/// Environment variable used to override the suite path.
pub const SUITE_ENV_VAR: &str = "XPRIN_TESTSUITE";
/// Maximum suite file size in bytes.
pub const MAX_SUITE_FILE_SIZE: usize = 1024 * 1024;
/// Maximum length of a single path component.
pub(crate) const MAX_PATH_COMPONENT_LENGTH: usize = 255;
/// Maximum total path length.
pub(crate) const MAX_TOTAL_PATH_LENGTH: usize = 4096;

// ============================================================================
// SECTION: Errors
// ============================================================================

/// Suite loading errors.
#[derive(Debug, Error)]
pub enum LoadError {
    /// I/O failure while reading the suite.
    #[error("testsuite io error: {0}")]
    Io(String),
    /// YAML parsing error.
    #[error("testsuite parse error: {0}")]
    Parse(String),
    /// Input rejected before parsing.
    #[error("invalid testsuite input: {0}")]
    Invalid(String),
}

// ============================================================================
// SECTION: Loading
// ============================================================================

impl TestSuiteSpec {
    /// Loads a suite from disk using the default resolution rules.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError`] when the file cannot be read or parsed.
    pub fn load(path: Option<&Path>) -> Result<Self, LoadError> {
        load_suite(path)
    }

    /// Parses a suite from a YAML string.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::Parse`] when the document does not match the model.
    pub fn from_yaml_str(content: &str) -> Result<Self, LoadError> {
        serde_yaml::from_str(content).map_err(|err| LoadError::Parse(err.to_string()))
    }
}

/// Loads a suite from `path`, the environment override, or `xprin.yaml`.
///
/// # Errors
///
/// Returns [`LoadError`] when path limits, size limits, encoding, or parsing fail.
pub fn load_suite(path: Option<&Path>) -> Result<TestSuiteSpec, LoadError> {
    let resolved = resolve_suite_path(path)?;
    validate_path(&resolved)?;
    let bytes = fs::read(&resolved).map_err(|err| LoadError::Io(err.to_string()))?;
    if bytes.len() > MAX_SUITE_FILE_SIZE {
        return Err(LoadError::Invalid("testsuite file exceeds size limit".to_string()));
    }
    let content = std::str::from_utf8(&bytes)
        .map_err(|_| LoadError::Invalid("testsuite file must be utf-8".to_string()))?;
    TestSuiteSpec::from_yaml_str(content)
}

/// Resolves the suite path from an explicit path, `XPRIN_TESTSUITE`, or the
/// default file name.
///
/// # Errors
///
/// Returns [`LoadError::Invalid`] when the environment path is too long.
pub fn resolve_suite_path(path: Option<&Path>) -> Result<PathBuf, LoadError> {
    if let Some(path) = path {
        return Ok(path.to_path_buf());
    }
    if let Ok(env_path) = env::var(SUITE_ENV_VAR) {
        if env_path.len() > MAX_TOTAL_PATH_LENGTH {
            return Err(LoadError::Invalid("testsuite path exceeds max length".to_string()));
        }
        return Ok(PathBuf::from(env_path));
    }
    Ok(PathBuf::from(DEFAULT_SUITE_NAME))
}

/// Returns true when the file name is `xprin.yaml` or ends in `_xprin.yaml`.
#[must_use]
pub fn is_suite_file(path: &Path) -> bool {
    path.file_name()
        .and_then(|name| name.to_str())
        .is_some_and(|name| name == DEFAULT_SUITE_NAME || name.ends_with(SUITE_FILE_SUFFIX))
}

/// Lists suite files directly inside `dir`, sorted by path.
///
/// # Errors
///
/// Returns [`LoadError`] when the directory cannot be read.
pub fn discover_suite_files(dir: &Path) -> Result<Vec<PathBuf>, LoadError> {
    validate_path(dir)?;
    let entries = fs::read_dir(dir).map_err(|err| LoadError::Io(err.to_string()))?;
    let mut files = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|err| LoadError::Io(err.to_string()))?;
        let path = entry.path();
        if path.is_file() && is_suite_file(&path) {
            files.push(path);
        }
    }
    files.sort();
    Ok(files)
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Validates the resolved path against length limits.
fn validate_path(path: &Path) -> Result<(), LoadError> {
    let text = path.to_string_lossy();
    if text.len() > MAX_TOTAL_PATH_LENGTH {
        return Err(LoadError::Invalid("testsuite path exceeds max length".to_string()));
    }
    for component in path.components() {
        let value = component.as_os_str().to_string_lossy();
        if value.len() > MAX_PATH_COMPONENT_LENGTH {
            return Err(LoadError::Invalid("testsuite path component too long".to_string()));
        }
    }
    Ok(())
}
