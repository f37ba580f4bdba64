use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

/// Unified error type for all vex operations.
///
/// Field-level variants carry the full external field path of the offending
/// key (e.g. `android.compile_sdk`), as spelled in the source document.
#[derive(Debug, Error, Diagnostic)]
pub enum VexError {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The manifest text is not well-formed YAML, or its root is not a mapping.
    #[error("Malformed manifest: {message}")]
    #[diagnostic(help("Check your vex.yml for syntax errors"))]
    MalformedDocument { message: String },

    /// A required field is absent (or blank where a value is mandatory).
    #[error("Missing required field `{field}`")]
    MissingField { field: String },

    /// A field's value cannot convert to its declared type.
    #[error("Type mismatch for `{field}`: expected {expected}, found {found}")]
    TypeMismatch {
        field: String,
        expected: &'static str,
        found: String,
    },

    /// The declared minimum SDK level exceeds the compile SDK level.
    #[error("Invalid SDK range: min_sdk {min_sdk} is greater than compile_sdk {compile_sdk}")]
    #[diagnostic(help("Lower android.min_sdk or raise android.compile_sdk"))]
    InvalidSdkRange { min_sdk: u32, compile_sdk: u32 },

    /// The extension version string does not match the accepted format.
    #[error("Invalid version format `{value}`")]
    #[diagnostic(help("Use dotted numeric segments, e.g. 1.0 or 2.3.1-rc1"))]
    InvalidVersionFormat { value: String },

    /// Two block declarations share the same identity (kind + name).
    #[error("Duplicate block declaration `{name}`")]
    DuplicateBlock { name: String },

    /// No manifest file was found walking up from the starting directory.
    #[error("No vex.yml found in `{}` or any parent directory", .start.display())]
    ManifestNotFound { start: PathBuf },
}

/// Convenience alias for `miette::Result<T>`.
pub type VexResult<T> = miette::Result<T>;
