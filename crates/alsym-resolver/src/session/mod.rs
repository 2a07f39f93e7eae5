//! The resolution session: a fixed-point worklist over a monotonically
//! non-decreasing minimum-version map.
//!
//! Each package's effective minimum only ever rises, bounded by the highest
//! version on the feeds, and a package is only re-processed when its minimum
//! strictly increases, so the loop terminates. Raising a minimum can
//! invalidate an already-resolved package, which is then re-enqueued.

use std::collections::{HashMap, HashSet, VecDeque};
use std::sync::Arc;

use chrono::Utc;
use indexmap::IndexMap;
use tracing::{debug, info, warn};

use alsym_cache::{inspect_archive, AppCacheDir, Lockfile};
use alsym_config::AppManifest;
use alsym_core::error::AlsymError;
use alsym_core::types::{AppVersion, PackageId, Requirement};
use alsym_feed::{FeedClient, MetadataCache};

use crate::report::{Conflict, Raise, Resolution};
use crate::ResolverResult;


/// Symbol-package resolver
pub struct Resolver {
    client: Arc<FeedClient>,
    metadata: Arc<MetadataCache>,
}

impl Resolver {
    pub fn new(client: Arc<FeedClient>, metadata: Arc<MetadataCache>) -> Self {
        Self { client, metadata }
    }

    /// Resolve the full transitive closure of the manifest's symbol
    /// packages, download payloads into the cache directory, and rewrite
    /// the lock-file.
    ///
    /// Version conflicts are returned in the resolution, never as errors. A
    /// fatal error aborts the run before the lock-file is touched.
    pub async fn resolve(
        &self,
        manifest: &AppManifest,
        cache: &AppCacheDir,
        feeds: &[String],
    ) -> ResolverResult<Resolution> {
        if feeds.is_empty() {
            return Err(AlsymError::ConfigValidation {
                field: "feeds".to_string(),
                reason: "at least one feed URL is required".to_string(),
            });
        }

        let previous = Lockfile::load(&cache.lock_path());
        let lock_valid =
            previous.matches_baseline(manifest.application.as_ref(), manifest.platform.as_ref());
        if !lock_valid && previous.updated.is_some() {
            info!("Application/platform baseline changed, ignoring cached resolutions");
        }

        let mut session = ResolverSession {
            client: &self.client,
            metadata: &self.metadata,
            feeds,
            cache,
            previous,
            lock_valid,
            queue: VecDeque::new(),
            enqueued: HashSet::new(),
            minimums: HashMap::new(),
            resolved: IndexMap::new(),
            dependencies: HashMap::new(),
            raises: Vec::new(),
        };

        // Seed from the root manifest
        for dep in &manifest.dependencies {
            session.merge_requirement(None, dep.package.clone(), Some(dep.minimum.clone()));
        }
        if let Some(application) = &manifest.application {
            session.merge_requirement(None, PackageId::platform(), Some(application.clone()));
        }

        session.run().await?;

        let resolution = session.into_resolution();
        write_lockfile(manifest, cache, feeds, &resolution)?;

        info!(
            packages = resolution.packages.len(),
            conflicts = resolution.conflicts.len(),
            "Symbol resolution complete"
        );

        Ok(resolution)
    }
}

/// All mutable state of one resolution run
struct ResolverSession<'a> {
    client: &'a FeedClient,
    metadata: &'a MetadataCache,
    feeds: &'a [String],
    cache: &'a AppCacheDir,
    /// Lock-file from the previous successful run
    previous: Lockfile,
    /// Whether the previous lock-file's baseline matches the manifest
    lock_valid: bool,
    /// FIFO worklist of packages pending resolution
    queue: VecDeque<PackageId>,
    /// Dedup guard: packages currently sitting in the queue
    enqueued: HashSet<PackageId>,
    /// Effective minimum per package; only ever raised
    minimums: HashMap<PackageId, Option<AppVersion>>,
    /// Versions resolved so far this run, in resolution order
    resolved: IndexMap<PackageId, AppVersion>,
    /// Discovered dependency list per resolved package
    dependencies: HashMap<PackageId, Vec<Requirement>>,
    /// Provenance edges where a merge actually raised a minimum
    raises: Vec<Raise>,
}

impl ResolverSession<'_> {
    async fn run(&mut self) -> ResolverResult<()> {
        while let Some(package) = self.queue.pop_front() {
            self.enqueued.remove(&package);
            self.step(package).await?;
        }
        Ok(())
    }

    /// Resolve one dequeued package
    async fn step(&mut self, package: PackageId) -> ResolverResult<()> {
        let minimum = self.minimums.get(&package).cloned().flatten();

        // Already resolved this run at a version that still satisfies
        if let Some(version) = self.resolved.get(&package).cloned() {
            if minimum.as_ref().map_or(true, |m| version >= *m) {
                return Ok(());
            }
            self.resolved.shift_remove(&package);
        }

        // Lock-file hit: baseline unchanged, cached version satisfies, the
        // payload is still on disk, and the recorded dependency list makes
        // network discovery unnecessary
        if self.lock_valid {
            if let (Some(version), Some(deps)) = (
                self.previous.cached_version(&package),
                self.previous.cached_dependencies(&package),
            ) {
                if minimum.as_ref().map_or(true, |m| version >= *m)
                    && self.cache.has_payload(&package, &version)
                {
                    debug!(package = %package, version = %version, "Reusing locked resolution");
                    self.finish(package, version, deps);
                    return Ok(());
                }
            }
        }

        // Feed metadata, fetched at most once per package per run
        let metadata = match self.metadata.get(&package) {
            Some(metadata) => metadata,
            None => {
                let metadata = self.client.fetch_metadata(self.feeds, &package).await?;
                self.metadata.insert(&package, metadata.clone());
                metadata
            },
        };

        // Highest version meeting the minimum; fall back to the feed's best
        // (a conflict, surfaced in the report, not a failure)
        let chosen = metadata
            .highest_satisfying(minimum.as_ref())
            .or_else(|| metadata.best_available())
            .cloned()
            .ok_or_else(|| AlsymError::PackageNotFound {
                package: package.as_str().to_string(),
            })?;

        if let Some(min) = &minimum {
            if chosen < *min {
                warn!(package = %package, requested = %min, resolved = %chosen,
                    "No feed version satisfies the requested minimum, continuing best-effort");
            }
        }

        let bytes = self
            .client
            .download(&metadata.feed_url, &package, chosen.as_str())
            .await?;
        let archive = inspect_archive(&bytes, &package)?;
        self.cache.write_payload(&package, &chosen, &archive.payload)?;

        let requirements = archive.requirements();
        debug!(package = %package, version = %chosen, deps = requirements.len(),
            "Downloaded and inspected archive");
        self.finish(package, chosen, requirements);
        Ok(())
    }

    /// Record a resolution and merge its discovered requirements
    fn finish(&mut self, package: PackageId, version: AppVersion, requirements: Vec<Requirement>) {
        self.resolved.insert(package.clone(), version);
        self.dependencies
            .insert(package.clone(), requirements.clone());

        for req in requirements {
            self.merge_requirement(Some(&package), req.package, req.minimum);
        }
    }

    /// Merge a requirement into the effective-minimum map (maximum wins) and
    /// enqueue the package if it still needs resolving.
    ///
    /// A merge that raises (or introduces) a concrete minimum records a
    /// provenance edge when it came from another package; a raise past an
    /// existing resolution invalidates that resolution.
    fn merge_requirement(
        &mut self,
        parent: Option<&PackageId>,
        child: PackageId,
        minimum: Option<AppVersion>,
    ) {
        let raised = match self.minimums.get_mut(&child) {
            Some(stored) => {
                if minimum > *stored {
                    *stored = minimum.clone();
                    true
                } else {
                    false
                }
            },
            None => {
                self.minimums.insert(child.clone(), minimum.clone());
                true
            },
        };

        // A merge that did not raise the stored minimum requires no new
        // work: the package is already queued, resolved at a satisfying
        // version, or sitting in a conflict that re-declaring the same
        // minimum cannot change. Re-enqueueing here would re-process a
        // package whose minimum did not strictly increase, and a cyclic
        // dependency stuck below an unsatisfiable minimum would then loop
        // forever.
        if !raised {
            return;
        }

        if let (Some(parent), Some(new_minimum)) = (parent, &minimum) {
            self.raises.push(Raise {
                parent: parent.clone(),
                child: child.clone(),
                minimum: new_minimum.clone(),
            });
        }

        let needs_work = match self.resolved.get(&child) {
            None => true,
            Some(version) => {
                // Invalidate a resolution that fell below a raised minimum
                let effective = self.minimums.get(&child).cloned().flatten();
                match effective {
                    Some(min) if *version < min => {
                        debug!(package = %child, resolved = %version, minimum = %min,
                            "Raised minimum invalidates earlier resolution");
                        self.resolved.shift_remove(&child);
                        true
                    },
                    _ => false,
                }
            },
        };

        if needs_work && self.enqueued.insert(child.clone()) {
            self.queue.push_back(child);
        }
    }

    /// Turn the finished session into a resolution result
    fn into_resolution(self) -> Resolution {
        let mut conflicts = Vec::new();

        for (package, version) in &self.resolved {
            if let Some(Some(minimum)) = self.minimums.get(package) {
                if version < minimum {
                    conflicts.push(Conflict {
                        package: package.clone(),
                        requested: minimum.clone(),
                        resolved: version.clone(),
                        best_available: self
                            .metadata
                            .get(package)
                            .and_then(|m| m.best_available().cloned()),
                    });
                }
            }
        }

        Resolution {
            packages: self.resolved,
            conflicts,
            raises: self.raises,
            dependencies: self.dependencies,
        }
    }
}

/// Overwrite the lock-file with this run's outcome
fn write_lockfile(
    manifest: &AppManifest,
    cache: &AppCacheDir,
    feeds: &[String],
    resolution: &Resolution,
) -> ResolverResult<()> {
    let mut packages = IndexMap::new();
    for (package, version) in &resolution.packages {
        packages.insert(package.as_str().to_string(), version.as_str().to_string());
    }

    let mut dependencies = IndexMap::new();
    for package in resolution.packages.keys() {
        let deps = resolution
            .dependencies
            .get(package)
            .map(|reqs| {
                reqs.iter()
                    .map(|r| {
                        (
                            r.package.as_str().to_string(),
                            r.minimum.as_ref().map(|v| v.as_str().to_string()),
                        )
                    })
                    .collect()
            })
            .unwrap_or_default();
        dependencies.insert(package.as_str().to_string(), deps);
    }

    let lockfile = Lockfile {
        application: manifest.application.as_ref().map(|v| v.as_str().to_string()),
        platform: manifest.platform.as_ref().map(|v| v.as_str().to_string()),
        app_id: manifest.id.clone(),
        app_name: manifest.name.clone(),
        publisher: manifest.publisher.clone(),
        packages,
        dependencies,
        feeds: feeds.to_vec(),
        updated: Some(Utc::now()),
    };

    lockfile.store(&cache.lock_path())
}
