//! Shared utilities for the vex extension build tool.
//!
//! This crate provides the cross-cutting concerns used by the other vex
//! crates: the unified error type and filesystem helpers.

pub mod errors;
pub mod fs;
