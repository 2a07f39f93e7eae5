//! Configuration loading for alsym
//!
//! This crate handles loading and validation of the app.json root manifest
//! and the layered feed settings (CLI flags, environment, alsym.toml),
//! providing a validated configuration surface to the resolver.

pub mod manifest;
pub mod settings;

// Re-export main types
pub use manifest::{AppManifest, ManifestDependency};
pub use settings::{resolve_feeds, AlsymToml, FeedsSection, FEEDS_ENV_VAR};

use alsym_core::AlsymError;

/// Result type for configuration operations
pub type ConfigResult<T> = Result<T, AlsymError>;
