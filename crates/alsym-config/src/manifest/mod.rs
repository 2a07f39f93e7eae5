//! app.json root-manifest loading and validation.
//!
//! The raw JSON shape is tolerant: only `id`, `publisher` and `name` are
//! required, and dependency entries missing any of their four fields are
//! skipped rather than failing the load. Validation happens once here so the
//! resolver never has to re-check field presence.

use alsym_core::error::AlsymError;
use alsym_core::types::{AppVersion, PackageId};
use camino::Utf8Path;
use serde::Deserialize;
use tracing::warn;

use crate::ConfigResult;

/// Manifest filename inside an app directory
pub const MANIFEST_FILE: &str = "app.json";

/// Raw app.json shape before validation
#[derive(Debug, Deserialize)]
struct RawManifest {
    id: Option<String>,
    publisher: Option<String>,
    name: Option<String>,
    application: Option<String>,
    platform: Option<String>,
    #[serde(default)]
    dependencies: Vec<RawDependency>,
}

/// Raw dependency entry; all four fields are required for the entry to count
#[derive(Debug, Deserialize)]
struct RawDependency {
    id: Option<String>,
    publisher: Option<String>,
    name: Option<String>,
    version: Option<String>,
}

/// Validated root manifest
#[derive(Debug, Clone)]
pub struct AppManifest {
    pub id: String,
    pub publisher: String,
    pub name: String,
    /// Baseline application version; seeds the platform symbols requirement
    pub application: Option<AppVersion>,
    /// Baseline platform version; part of the lock-file invalidation key
    pub platform: Option<AppVersion>,
    pub dependencies: Vec<ManifestDependency>,
}

/// A declared dependency with its derived symbol-package identity
#[derive(Debug, Clone)]
pub struct ManifestDependency {
    pub package: PackageId,
    pub minimum: AppVersion,
}

impl AppManifest {
    /// Load and validate `app.json` from an app directory
    pub async fn load(app_dir: &Utf8Path) -> ConfigResult<Self> {
        let path = app_dir.join(MANIFEST_FILE);
        let contents = tokio::fs::read_to_string(&path).await.map_err(|e| {
            AlsymError::io(format!("Failed to read {}", path), e)
        })?;
        Self::from_json(&contents)
    }

    /// Parse and validate manifest JSON
    pub fn from_json(contents: &str) -> ConfigResult<Self> {
        // app.json files written by the AL tooling often carry a UTF-8 BOM
        let contents = contents.trim_start_matches('\u{feff}');

        let raw: RawManifest =
            serde_json::from_str(contents).map_err(|e| AlsymError::ManifestParse {
                message: e.to_string(),
            })?;

        let id = required_field(raw.id, "id")?;
        let publisher = required_field(raw.publisher, "publisher")?;
        let name = required_field(raw.name, "name")?;

        let mut dependencies = Vec::new();
        for dep in raw.dependencies {
            match (dep.publisher, dep.name, dep.id, dep.version) {
                (Some(publisher), Some(dep_name), Some(dep_id), Some(version))
                    if !publisher.is_empty()
                        && !dep_name.is_empty()
                        && !dep_id.is_empty()
                        && !version.is_empty() =>
                {
                    dependencies.push(ManifestDependency {
                        package: PackageId::for_dependency(&publisher, &dep_name, &dep_id),
                        minimum: AppVersion::parse(&version),
                    });
                },
                _ => {
                    warn!("Skipping dependency entry with missing fields in app.json");
                },
            }
        }

        Ok(Self {
            id,
            publisher,
            name,
            application: raw.application.as_deref().map(AppVersion::parse),
            platform: raw.platform.as_deref().map(AppVersion::parse),
            dependencies,
        })
    }
}

fn required_field(value: Option<String>, field: &str) -> ConfigResult<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Ok(v),
        _ => Err(AlsymError::ConfigValidation {
            field: field.to_string(),
            reason: "required in app.json".to_string(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_manifest() {
        let manifest = AppManifest::from_json(
            r#"{
                "id": "x",
                "publisher": "Acme",
                "name": "App",
                "application": "22.0",
                "dependencies": [
                    {"publisher": "Acme", "name": "Lib", "id": "y", "version": "1.0"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.id, "x");
        assert_eq!(manifest.application, Some(AppVersion::parse("22.0")));
        assert_eq!(manifest.dependencies.len(), 1);
        assert_eq!(
            manifest.dependencies[0].package.as_str(),
            "Acme.Lib.symbols.y"
        );
        assert_eq!(manifest.dependencies[0].minimum, AppVersion::parse("1.0"));
    }

    #[test]
    fn test_missing_required_field_is_fatal() {
        let result = AppManifest::from_json(r#"{"id": "x", "publisher": "Acme"}"#);
        match result {
            Err(AlsymError::ConfigValidation { field, .. }) => assert_eq!(field, "name"),
            other => panic!("expected ConfigValidation, got {:?}", other),
        }
    }

    #[test]
    fn test_incomplete_dependency_is_skipped() {
        let manifest = AppManifest::from_json(
            r#"{
                "id": "x",
                "publisher": "Acme",
                "name": "App",
                "dependencies": [
                    {"publisher": "Acme", "name": "Lib", "id": "y", "version": "1.0"},
                    {"publisher": "Acme", "name": "Broken"}
                ]
            }"#,
        )
        .unwrap();

        assert_eq!(manifest.dependencies.len(), 1);
    }

    #[test]
    fn test_bom_is_tolerated() {
        let manifest = AppManifest::from_json(
            "\u{feff}{\"id\": \"x\", \"publisher\": \"Acme\", \"name\": \"App\"}",
        )
        .unwrap();
        assert_eq!(manifest.name, "App");
        assert!(manifest.application.is_none());
        assert!(manifest.dependencies.is_empty());
    }

    #[tokio::test]
    async fn test_load_from_directory() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(MANIFEST_FILE);
        std::fs::write(
            &path,
            r#"{"id": "x", "publisher": "Acme", "name": "App"}"#,
        )
        .unwrap();

        let utf8_dir = camino::Utf8Path::from_path(dir.path()).unwrap();
        let manifest = AppManifest::load(utf8_dir).await.unwrap();
        assert_eq!(manifest.publisher, "Acme");
    }

    #[tokio::test]
    async fn test_load_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let utf8_dir = camino::Utf8Path::from_path(dir.path()).unwrap();
        assert!(AppManifest::load(utf8_dir).await.is_err());
    }
}
