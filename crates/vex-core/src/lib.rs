//! Core data types for the vex extension build tool.
//!
//! This crate defines the types that represent a vex project: the `vex.yml`
//! manifest with its external-key mapping table and validation, runtime
//! dependency coordinates, and the block descriptor registry consumed by
//! the code generation stage.
//!
//! This crate is intentionally free of async code and network I/O.

/// File name of the project manifest.
pub const MANIFEST_FILENAME: &str = "vex.yml";

/// Kotlin version applied when a manifest enables Kotlin without pinning one.
pub const DEFAULT_KOTLIN_VERSION: &str = "latest-stable";

pub mod blocks;
pub mod dependency;
pub mod manifest;
pub mod schema;
