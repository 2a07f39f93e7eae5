//! The symbols lock-file.
//!
//! `symbols.lock.json` records the packages resolved by the most recent
//! successful run, keyed by the root manifest's `application`/`platform`
//! baseline. If the baseline changes, every cached resolution is stale. The
//! file also records each package's discovered minimum-version requirements
//! so a later run can reuse a cached package without re-downloading its
//! archive just to learn its dependency list.
//!
//! A missing or corrupt lock-file reads as empty. Writes go through a
//! temp-file rename so a crashed run never leaves a half-written lock-file.

use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use tracing::warn;

use alsym_core::error::AlsymError;
use alsym_core::types::{AppVersion, PackageId, Requirement};

use crate::CacheResult;

/// Lock-file name inside an app cache directory
pub const LOCK_FILE: &str = "symbols.lock.json";

/// Persisted record of the last successful resolution
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Lockfile {
    /// Root manifest `application` baseline the packages were resolved against
    pub application: Option<String>,
    /// Root manifest `platform` baseline
    pub platform: Option<String>,
    #[serde(rename = "appId", default)]
    pub app_id: String,
    #[serde(rename = "appName", default)]
    pub app_name: String,
    #[serde(default)]
    pub publisher: String,
    /// Resolved package versions, insertion-ordered
    #[serde(default)]
    pub packages: IndexMap<String, String>,
    /// Each resolved package's discovered minimum-version requirements
    /// (child package -> minimum, null for "any version")
    #[serde(default)]
    pub dependencies: IndexMap<String, IndexMap<String, Option<String>>>,
    /// Feed URLs the run resolved against
    #[serde(default)]
    pub feeds: Vec<String>,
    /// When the lock-file was written
    pub updated: Option<DateTime<Utc>>,
}

impl Lockfile {
    /// Read a lock-file; absent or corrupt files yield an empty lock-file
    pub fn load(path: &Path) -> Self {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(_) => return Self::default(),
        };

        match serde_json::from_str(&contents) {
            Ok(lockfile) => lockfile,
            Err(e) => {
                warn!(path = %path.display(), error = %e, "Ignoring corrupt lock-file");
                Self::default()
            },
        }
    }

    /// Write the lock-file atomically (temp file + rename)
    pub fn store(&self, path: &Path) -> CacheResult<()> {
        let contents = serde_json::to_string_pretty(self).map_err(|e| {
            AlsymError::io(
                "Failed to serialize lock-file".to_string(),
                std::io::Error::new(std::io::ErrorKind::InvalidData, e),
            )
        })?;

        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, contents)
            .map_err(|e| AlsymError::io(format!("Failed to write {}", tmp.display()), e))?;
        fs::rename(&tmp, path)
            .map_err(|e| AlsymError::io(format!("Failed to replace {}", path.display()), e))?;

        Ok(())
    }

    /// Whether this lock-file was resolved against the given baseline.
    ///
    /// Any change to `application` or `platform` voids every cached
    /// resolution in the file.
    pub fn matches_baseline(
        &self,
        application: Option<&AppVersion>,
        platform: Option<&AppVersion>,
    ) -> bool {
        baseline_eq(self.application.as_deref(), application)
            && baseline_eq(self.platform.as_deref(), platform)
    }

    /// Version this package was locked at, if present
    pub fn cached_version(&self, package: &PackageId) -> Option<AppVersion> {
        self.packages
            .iter()
            .find(|(key, _)| PackageId::from_name(key.as_str()) == *package)
            .map(|(_, version)| AppVersion::parse(version))
    }

    /// Recorded requirements the package's archive declared, if present
    pub fn cached_dependencies(&self, package: &PackageId) -> Option<Vec<Requirement>> {
        self.dependencies
            .iter()
            .find(|(key, _)| PackageId::from_name(key.as_str()) == *package)
            .map(|(_, deps)| {
                deps.iter()
                    .map(|(child, minimum)| {
                        Requirement::new(
                            PackageId::from_name(child.as_str()),
                            minimum.as_deref().map(AppVersion::parse),
                        )
                    })
                    .collect()
            })
    }
}

fn baseline_eq(recorded: Option<&str>, current: Option<&AppVersion>) -> bool {
    match (recorded, current) {
        (None, None) => true,
        (Some(r), Some(c)) => AppVersion::parse(r) == *c,
        _ => false,
    }
}
