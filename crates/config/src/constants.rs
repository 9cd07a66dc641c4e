//! Centralized constants for the function descriptor.
//!
//! File names, permissions and the fixed pieces of user-facing messages live
//! here so the loader, the validators and the report renderer agree on them.

// =============================================================================
// Descriptor File
// =============================================================================

/// Name of the descriptor file inside a function's root directory.
pub const CONFIG_FILE: &str = "func.yaml";

/// Permissions applied to the descriptor file on save (Unix only).
pub const CONFIG_FILE_MODE: u32 = 0o644;

// =============================================================================
// Error Reporting
// =============================================================================

/// First line of every rejected-descriptor report.
pub const ERROR_HEADER: &str = "'func.yaml' config file is not valid:";

/// Indentation applied to each entry of a report.
pub const ERROR_INDENT: &str = "  ";

// =============================================================================
// Reference Expressions
// =============================================================================

/// Token opening a reference expression inside an env value.
pub const REFERENCE_OPEN: &str = "{{";

/// Token closing a reference expression.
pub const REFERENCE_CLOSE: &str = "}}";

/// Forms accepted for an env entry without a name.
pub const WHOLE_STORE_FORMS: &str = "'{{ secret.secretName }}' or '{{ configMap.configMapName }}'";

/// Forms accepted for a named env entry whose value is a reference.
pub const KEYED_FORMS: &str =
    "'{{ env.MY_ENV }}', '{{ secret.secretName.key }}' or '{{ configMap.configMapName.key }}'";
