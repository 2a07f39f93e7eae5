//! Per-app cache directory layout.
//!
//! Each root app gets one directory under the cache root, addressed by its
//! sanitized `(publisher, name, id)` triple:
//! `<cacheRoot>/<publisher>/<name>/<id>/`. It holds the lock-file plus at
//! most one payload file per logical package name. Stale payloads for a
//! package are purged before a fresh version is written, so downstream
//! consumers never see two payloads for the same package.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use alsym_core::error::AlsymError;
use alsym_core::types::{AppVersion, PackageId};
use alsym_core::utils::sanitize_name;

use crate::CacheResult;

/// Default user-scoped cache root (`<user cache dir>/alsym`)
pub fn cache_root() -> Option<PathBuf> {
    dirs::cache_dir().map(|d| d.join("alsym"))
}

/// The cache directory of one root app
#[derive(Debug, Clone)]
pub struct AppCacheDir {
    dir: PathBuf,
}

impl AppCacheDir {
    /// Resolve (and create) the cache directory for an app identity
    pub fn for_app(root: &Path, publisher: &str, name: &str, id: &str) -> CacheResult<Self> {
        let dir = root
            .join(sanitize_name(publisher))
            .join(sanitize_name(name))
            .join(sanitize_name(id));

        fs::create_dir_all(&dir)
            .map_err(|e| AlsymError::io(format!("Failed to create cache dir {}", dir.display()), e))?;

        Ok(Self { dir })
    }

    /// Wrap an existing directory (used by tests and the clean command)
    pub fn at(dir: PathBuf) -> Self {
        Self { dir }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the lock-file inside this cache directory
    pub fn lock_path(&self) -> PathBuf {
        self.dir.join(crate::lockfile::LOCK_FILE)
    }

    /// Path of a concrete package version's payload file
    pub fn payload_path(&self, package: &PackageId, version: &AppVersion) -> PathBuf {
        self.dir.join(package.payload_file_name(version))
    }

    /// Whether the payload for this package version is present on disk
    pub fn has_payload(&self, package: &PackageId, version: &AppVersion) -> bool {
        self.payload_path(package, version).is_file()
    }

    /// Remove every payload file belonging to this package, at any version.
    ///
    /// Returns the number of files removed.
    pub fn purge_payloads(&self, package: &PackageId) -> CacheResult<usize> {
        let prefix = format!("{}.", package.clean_name());
        let suffix = format!(".{}", alsym_core::types::package::PAYLOAD_EXTENSION);
        let mut removed = 0;

        let entries = fs::read_dir(&self.dir)
            .map_err(|e| AlsymError::io(format!("Failed to read cache dir {}", self.dir.display()), e))?;

        for entry in entries {
            let entry = entry
                .map_err(|e| AlsymError::io("Failed to read cache dir entry".to_string(), e))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();

            if file_name.starts_with(&prefix) && file_name.ends_with(&suffix) {
                debug!(file = %file_name, "Purging stale payload");
                fs::remove_file(entry.path()).map_err(|e| {
                    AlsymError::io(format!("Failed to remove stale payload {}", file_name), e)
                })?;
                removed += 1;
            }
        }

        Ok(removed)
    }

    /// Write a freshly extracted payload, purging stale versions first so
    /// only one payload per package name exists at a time
    pub fn write_payload(
        &self,
        package: &PackageId,
        version: &AppVersion,
        payload: &[u8],
    ) -> CacheResult<PathBuf> {
        self.purge_payloads(package)?;

        let path = self.payload_path(package, version);
        fs::write(&path, payload).map_err(|e| {
            AlsymError::io(format!("Failed to write payload {}", path.display()), e)
        })?;

        Ok(path)
    }

    /// Remove the whole app cache directory (payloads and lock-file)
    pub fn remove_all(&self) -> CacheResult<()> {
        if self.dir.exists() {
            fs::remove_dir_all(&self.dir).map_err(|e| {
                AlsymError::io(format!("Failed to remove cache dir {}", self.dir.display()), e)
            })?;
        }
        Ok(())
    }
}
