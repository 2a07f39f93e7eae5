//! Feed API response types and per-package metadata.

use alsym_core::types::AppVersion;
use serde::{Deserialize, Serialize};

/// Version index response from a feed
///
/// `GET {feed}/{package-key}/index.json`
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct VersionIndex {
    /// All version strings the feed has for this package
    pub versions: Vec<String>,
}

/// Everything known about a package on the feed that served it.
///
/// Fetched at most once per package per run; the highest available version
/// is the ceiling used in conflict reports.
#[derive(Debug, Clone)]
pub struct PackageMetadata {
    /// All versions available on the winning feed
    pub versions: Vec<AppVersion>,
    /// The feed that returned a non-empty version list
    pub feed_url: String,
}

impl PackageMetadata {
    pub fn new(index: VersionIndex, feed_url: String) -> Self {
        Self {
            versions: index
                .versions
                .iter()
                .map(|v| AppVersion::parse(v))
                .collect(),
            feed_url,
        }
    }

    /// The single highest version on the feed
    pub fn best_available(&self) -> Option<&AppVersion> {
        self.versions.iter().max()
    }

    /// The highest version satisfying the minimum, if any
    pub fn highest_satisfying(&self, minimum: Option<&AppVersion>) -> Option<&AppVersion> {
        match minimum {
            Some(min) => self.versions.iter().filter(|v| *v >= min).max(),
            None => self.best_available(),
        }
    }
}
