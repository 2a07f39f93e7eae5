//! Symbol-archive inspection.
//!
//! A downloaded symbol archive is a gzipped tarball carrying exactly one
//! `.app` binary payload plus an embedded `manifest.json` declaring the
//! package's own dependencies as version ranges. Inspection pulls both out
//! in one pass; an archive with zero or multiple payloads, or an unreadable
//! manifest, is fatal for that package.

use std::io::Read;

use flate2::read::GzDecoder;
use serde::Deserialize;
use tar::Archive;
use tracing::debug;

use alsym_core::error::AlsymError;
use alsym_core::types::package::PAYLOAD_EXTENSION;
use alsym_core::types::{PackageId, Requirement, VersionRange};

use crate::CacheResult;

/// Embedded manifest filename inside a symbol archive
pub const ARCHIVE_MANIFEST: &str = "manifest.json";

/// Contents of one inspected symbol archive
#[derive(Debug)]
pub struct SymbolArchive {
    /// Name of the single payload entry inside the archive
    pub payload_name: String,
    /// The extracted binary payload
    pub payload: Vec<u8>,
    /// The archive's embedded manifest
    pub manifest: ArchiveManifest,
}

/// Embedded manifest shape
#[derive(Debug, Default, Deserialize)]
pub struct ArchiveManifest {
    #[serde(default)]
    pub dependencies: Vec<ArchiveDependency>,
}

/// One declared dependency inside an archive manifest; entries missing any
/// field are tolerated and skipped
#[derive(Debug, Deserialize)]
pub struct ArchiveDependency {
    pub id: Option<String>,
    pub publisher: Option<String>,
    pub name: Option<String>,
    /// Version-range string; its lower bound becomes the minimum
    pub version: Option<VersionRange>,
}

impl SymbolArchive {
    /// The archive's declared requirements, deduplicated by package with the
    /// highest minimum kept
    pub fn requirements(&self) -> Vec<Requirement> {
        let mut requirements: Vec<Requirement> = Vec::new();

        for dep in &self.manifest.dependencies {
            let (Some(publisher), Some(name), Some(id)) = (&dep.publisher, &dep.name, &dep.id)
            else {
                debug!("Skipping archive dependency entry with missing fields");
                continue;
            };

            let package = PackageId::for_dependency(publisher, name, id);
            let minimum = dep.version.as_ref().and_then(VersionRange::floor);

            match requirements.iter_mut().find(|r| r.package == package) {
                Some(existing) => {
                    // same package declared twice, keep the higher floor
                    if minimum > existing.minimum {
                        existing.minimum = minimum;
                    }
                },
                None => requirements.push(Requirement::new(package, minimum)),
            }
        }

        requirements
    }
}

/// Open a downloaded archive, extract its single payload, and parse the
/// embedded manifest
pub fn inspect_archive(bytes: &[u8], package: &PackageId) -> CacheResult<SymbolArchive> {
    let decoder = GzDecoder::new(bytes);
    let mut archive = Archive::new(decoder);

    let mut payload: Option<(String, Vec<u8>)> = None;
    let mut manifest: Option<ArchiveManifest> = None;

    let entries = archive.entries().map_err(|e| AlsymError::Archive {
        package: package.as_str().to_string(),
        reason: format!("not a readable archive: {}", e),
    })?;

    for entry in entries {
        let mut entry = entry.map_err(|e| AlsymError::Archive {
            package: package.as_str().to_string(),
            reason: format!("corrupt archive entry: {}", e),
        })?;

        if entry.header().entry_type() != tar::EntryType::Regular {
            continue;
        }

        let name = entry
            .path()
            .ok()
            .and_then(|p| p.file_name().map(|n| n.to_string_lossy().into_owned()))
            .unwrap_or_default();

        if name.ends_with(&format!(".{}", PAYLOAD_EXTENSION)) {
            if payload.is_some() {
                return Err(AlsymError::Archive {
                    package: package.as_str().to_string(),
                    reason: "archive contains more than one payload".to_string(),
                });
            }
            let mut bytes = Vec::new();
            entry.read_to_end(&mut bytes).map_err(|e| AlsymError::Archive {
                package: package.as_str().to_string(),
                reason: format!("failed to read payload '{}': {}", name, e),
            })?;
            payload = Some((name, bytes));
        } else if name == ARCHIVE_MANIFEST {
            let mut contents = String::new();
            entry
                .read_to_string(&mut contents)
                .map_err(|e| AlsymError::Archive {
                    package: package.as_str().to_string(),
                    reason: format!("failed to read embedded manifest: {}", e),
                })?;
            let parsed = serde_json::from_str(contents.trim_start_matches('\u{feff}')).map_err(
                |e| AlsymError::Archive {
                    package: package.as_str().to_string(),
                    reason: format!("unparseable embedded manifest: {}", e),
                },
            )?;
            manifest = Some(parsed);
        }
    }

    let (payload_name, payload) = payload.ok_or_else(|| AlsymError::Archive {
        package: package.as_str().to_string(),
        reason: "archive contains no payload".to_string(),
    })?;

    let manifest = manifest.ok_or_else(|| AlsymError::Archive {
        package: package.as_str().to_string(),
        reason: "archive is missing its embedded manifest".to_string(),
    })?;

    Ok(SymbolArchive {
        payload_name,
        payload,
        manifest,
    })
}
