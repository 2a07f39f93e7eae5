//! Symbol feed client for alsym
//!
//! This crate provides HTTP client functionality for listing available
//! versions of a symbol package and downloading version archives from one or
//! more feeds, with retry logic, per-request timeouts, and a per-run
//! metadata cache.

pub mod api;
pub mod cache;
pub mod client;

// Re-export main types
pub use api::{PackageMetadata, VersionIndex};
pub use cache::MetadataCache;
pub use client::{FeedClient, RetryConfig};

use alsym_core::AlsymError;

/// Result type for feed operations
pub type FeedResult<T> = Result<T, AlsymError>;
