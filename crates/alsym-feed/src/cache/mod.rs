//! Per-run package metadata cache.
//!
//! Feed metadata is fetched at most once per package per resolution run.
//! The cache is keyed by the lowercased feed key so identifiers that differ
//! only in casing share an entry.

use dashmap::DashMap;

use alsym_core::types::PackageId;

use crate::api::PackageMetadata;

/// In-memory metadata cache for one resolution run
#[derive(Debug, Default)]
pub struct MetadataCache {
    cache: DashMap<String, PackageMetadata>,
}

impl MetadataCache {
    /// Create a new empty metadata cache
    pub fn new() -> Self {
        Self {
            cache: DashMap::new(),
        }
    }

    /// Get cached metadata for a package
    pub fn get(&self, package: &PackageId) -> Option<PackageMetadata> {
        self.cache.get(&package.feed_key()).map(|e| e.clone())
    }

    /// Store metadata for a package
    pub fn insert(&self, package: &PackageId, metadata: PackageMetadata) {
        self.cache.insert(package.feed_key(), metadata);
    }

    /// Check if metadata is already cached
    pub fn contains(&self, package: &PackageId) -> bool {
        self.cache.contains_key(&package.feed_key())
    }

    /// Number of packages with cached metadata
    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }

    /// Clear all cached entries
    pub fn clear(&self) {
        self.cache.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::VersionIndex;

    fn sample_metadata() -> PackageMetadata {
        PackageMetadata::new(
            VersionIndex {
                versions: vec!["1.0".to_string()],
            },
            "https://feed.example.com".to_string(),
        )
    }

    #[test]
    fn test_insert_and_get() {
        let cache = MetadataCache::new();
        let package = PackageId::for_dependency("Acme", "Lib", "y");

        assert!(!cache.contains(&package));
        cache.insert(&package, sample_metadata());
        assert!(cache.contains(&package));
        assert_eq!(cache.len(), 1);

        let metadata = cache.get(&package).unwrap();
        assert_eq!(metadata.feed_url, "https://feed.example.com");
    }

    #[test]
    fn test_case_insensitive_key() {
        let cache = MetadataCache::new();
        let declared = PackageId::for_dependency("Acme", "Lib", "y");
        let lowered = PackageId::from_name("acme.lib.symbols.y");

        cache.insert(&declared, sample_metadata());
        assert!(cache.contains(&lowered));
    }

    #[test]
    fn test_clear() {
        let cache = MetadataCache::new();
        let package = PackageId::for_dependency("Acme", "Lib", "y");
        cache.insert(&package, sample_metadata());

        cache.clear();
        assert!(cache.is_empty());
    }
}
