//! Symbol cache for alsym
//!
//! This crate owns the on-disk cache: the per-app cache directory layout,
//! the `symbols.lock.json` lock-file recording the last successful
//! resolution, and inspection of downloaded symbol archives (payload
//! extraction plus embedded-manifest parsing).

pub mod archive;
pub mod layout;
pub mod lockfile;

// Re-export main types
pub use archive::{inspect_archive, ArchiveManifest, SymbolArchive};
pub use layout::{cache_root, AppCacheDir};
pub use lockfile::{Lockfile, LOCK_FILE};

use alsym_core::AlsymError;

/// Result type for cache operations
pub type CacheResult<T> = Result<T, AlsymError>;
