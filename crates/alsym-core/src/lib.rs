//! # alsym-core
//!
//! Core types and utilities shared across all alsym crates.
//!
//! This crate provides:
//! - AppVersion and VersionRange types for symbol-package versioning
//! - PackageId for symbol-package identity and feed lookup keys
//! - AlsymError enum for unified error handling
//! - Filename sanitization helpers for the on-disk cache
//!
//! ## Architecture
//!
//! The crate is organized into modules:
//! - `types`: Core data types (AppVersion, VersionRange, PackageId)
//! - `error`: Error types and result aliases
//! - `utils`: Utility functions and helpers

pub mod error;
pub mod types;
pub mod utils;

// Re-export commonly used types
pub use error::{AlsymError, CoreResult};
pub use types::{AppVersion, PackageId, Requirement, VersionRange};
