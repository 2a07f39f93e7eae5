//! Worklist dependency resolver for symbol packages
//!
//! Given a validated root manifest, this crate computes the transitive
//! closure of required symbol packages, picks a concrete version for each,
//! downloads and caches their payloads, rewrites the lock-file, and reports
//! every version conflict together with the chain of packages that raised
//! the conflicting minimum.

pub mod report;
pub mod session;

// Re-export main types
pub use report::{Conflict, Raise, Resolution};
pub use session::Resolver;

use alsym_core::AlsymError;

/// Result type for resolver operations
pub type ResolverResult<T> = Result<T, AlsymError>;
