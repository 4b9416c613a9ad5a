// crates/xprin-spec/src/schema.rs
// ============================================================================
// Module: Test Suite Schema
// Description: JSON schema builder for xprin test suite documents.
// Purpose: Provide a machine-readable shape derived from the canonical model.
// Dependencies: crate::model, serde_json
// ============================================================================

//! ## Overview
//! This module defines the JSON Schema for test suite files. Assertion type
//! and operator enumerations are read from the model so the schema cannot
//! drift from what deserialization accepts. Writing the schema to disk is
//! left to callers.

use serde_json::Value;
use serde_json::json;

use crate::model::AssertionOperator;
use crate::model::AssertionType;

/// Returns the JSON schema for test suite files.
#[must_use]
pub fn testsuite_schema() -> Value {
    json!({
        "$schema": "https://json-schema.org/draft/2020-12/schema",
        "$id": "xprin://schemas/testsuite.schema.json",
        "title": "xprin",
        "description": "xprin test suite files (xprin.yaml or *_xprin.yaml)",
        "type": "object",
        "properties": {
            "common": common_schema(),
            "tests": {
                "type": "array",
                "items": test_case_schema(),
                "description": "List of test cases."
            }
        },
        "required": ["tests"],
        "additionalProperties": false,
        "$defs": {
            "inputs": inputs_schema(),
            "patches": patches_schema(),
            "hooks": hooks_schema(),
            "hook": hook_schema(),
            "assertions": assertions_schema(),
            "assertionXprin": assertion_xprin_schema(),
            "assertionGoldenFile": assertion_golden_file_schema()
        }
    })
}

// ============================================================================
// SECTION: Suite Sections
// ============================================================================

/// Schema for the common block.
fn common_schema() -> Value {
    json!({
        "type": "object",
        "description": "Common configuration inherited by every test case.",
        "properties": {
            "inputs": definition_ref("inputs"),
            "patches": definition_ref("patches"),
            "hooks": definition_ref("hooks"),
            "assertions": definition_ref("assertions")
        },
        "additionalProperties": false
    })
}

/// Schema for a single test case.
fn test_case_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": {
                "type": "string",
                "description": "Descriptive name for the test case."
            },
            "id": {
                "type": "string",
                "pattern": "^[A-Za-z0-9_-]*$",
                "description": "Unique identifier for the test case."
            },
            "inputs": definition_ref("inputs"),
            "patches": definition_ref("patches"),
            "hooks": definition_ref("hooks"),
            "assertions": definition_ref("assertions")
        },
        "required": ["name"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Shared Definitions
// ============================================================================

/// Schema for inputs.
fn inputs_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "claim": path_schema("Path to the claim file (one of claim or xr is required)."),
            "xr": path_schema("Path to the XR file (one of claim or xr is required)."),
            "composition": path_schema("Path to the composition file."),
            "functions": path_schema("Path to the functions file or directory."),
            "crds": {
                "type": "array",
                "items": { "type": "string" },
                "description": "Paths to CRD files."
            },
            "context-files": string_map_schema("Context keys mapped to file paths."),
            "context-values": string_map_schema("Context keys mapped to inline values."),
            "observed-resources": path_schema("Path to the observed resources file."),
            "extra-resources": path_schema("Path to the extra resources file."),
            "function-credentials": path_schema("Path to the function credentials file.")
        },
        "additionalProperties": false
    })
}

/// Schema for XR patching.
fn patches_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "xrd": path_schema("Path to the XR's or claim's XRD."),
            "connection-secret": {
                "type": ["boolean", "null"],
                "description": "Create a connection secret for the XR."
            },
            "connection-secret-name": path_schema("Name of the connection secret."),
            "connection-secret-namespace": path_schema("Namespace of the connection secret.")
        },
        "additionalProperties": false
    })
}

/// Schema for hooks.
fn hooks_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "pre-test": {
                "type": "array",
                "items": definition_ref("hook"),
                "description": "Hooks executed before the test case."
            },
            "post-test": {
                "type": "array",
                "items": definition_ref("hook"),
                "description": "Hooks executed after the test case."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for a single hook.
fn hook_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Descriptive name for the hook." },
            "run": { "type": "string", "description": "Command to run." }
        },
        "required": ["run"],
        "additionalProperties": false
    })
}

/// Schema for assertions grouped by engine.
fn assertions_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "xprin": {
                "type": "array",
                "items": definition_ref("assertionXprin"),
                "description": "In-process structured assertions."
            },
            "diff": {
                "type": "array",
                "items": definition_ref("assertionGoldenFile"),
                "description": "Byte-exact comparisons against golden files."
            },
            "dyff": {
                "type": "array",
                "items": definition_ref("assertionGoldenFile"),
                "description": "Semantic comparisons against golden files."
            }
        },
        "additionalProperties": false
    })
}

/// Schema for an xprin assertion.
fn assertion_xprin_schema() -> Value {
    let types: Vec<&str> = AssertionType::ALL.iter().map(|kind| kind.as_str()).collect();
    let operators: Vec<&str> =
        AssertionOperator::ALL.iter().map(|operator| operator.as_str()).collect();
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Descriptive name for the assertion." },
            "type": {
                "type": "string",
                "enum": types,
                "description": "Type of assertion."
            },
            "resource": {
                "type": "string",
                "description": "Resource identifier (Kind/Name)."
            },
            "field": { "type": "string", "description": "Field path (e.g. metadata.name)." },
            "operator": {
                "type": "string",
                "enum": operators,
                "description": "Operator for field value assertions."
            },
            "value": { "description": "Expected value for the assertion." }
        },
        "required": ["name", "type"],
        "additionalProperties": false
    })
}

/// Schema for a golden file assertion.
fn assertion_golden_file_schema() -> Value {
    json!({
        "type": "object",
        "properties": {
            "name": { "type": "string", "description": "Descriptive name for the assertion." },
            "expected": { "type": "string", "description": "Path to the golden file." },
            "resource": {
                "type": "string",
                "description": "Resource identifier (Kind/Name)."
            }
        },
        "required": ["name", "expected"],
        "additionalProperties": false
    })
}

// ============================================================================
// SECTION: Helpers
// ============================================================================

/// Reference to a shared definition.
fn definition_ref(name: &str) -> Value {
    json!({ "$ref": format!("#/$defs/{name}") })
}

/// Schema for an optional path or name string.
fn path_schema(description: &str) -> Value {
    json!({
        "type": "string",
        "description": description
    })
}

/// Schema for a string-to-string map.
fn string_map_schema(description: &str) -> Value {
    json!({
        "type": "object",
        "additionalProperties": { "type": "string" },
        "description": description
    })
}
