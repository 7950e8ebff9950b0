//! # hc-core
//!
//! Core error definitions for holidaycalc.
//!
//! This crate provides the foundational building blocks shared across all
//! other crates in the workspace: the error hierarchy and the `ensure!` /
//! `fail!` macros.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Public modules ───────────────────────────────────────────────────────────

/// Error types and the `ensure!` / `fail!` macros.
pub mod errors;

// ── Primitive type aliases ────────────────────────────────────────────────────

/// Calendar year as supplied by callers.
pub type Year = i32;

// ── Re-exports for convenience ────────────────────────────────────────────────

pub use errors::{Error, Result};
