//! `alsym download` command implementation.
//!
//! Loads app.json, resolves the feed list, runs the resolver over the
//! transitive dependency closure, and reports the outcome. Version
//! conflicts are printed as warnings; the command still succeeds.

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Instant;

use alsym_config::{resolve_feeds, AppManifest};
use alsym_core::error::CoreResult;
use alsym_feed::{FeedClient, MetadataCache};
use alsym_resolver::Resolver;

use super::{app_cache_dir, effective_cache_root, CommandContext};

/// Execute the `alsym download` command
pub async fn execute(
    app_dir: Option<PathBuf>,
    cli_feeds: Vec<String>,
    cache_dir: Option<PathBuf>,
    ctx: &CommandContext,
) -> CoreResult<()> {
    let start_time = Instant::now();

    let app_dir = ctx.app_dir(app_dir)?;
    let manifest = AppManifest::load(&app_dir).await?;
    ctx.output.step(
        "📦",
        &format!(
            "Downloading symbols for {}.{} ({} direct dependencies)",
            manifest.publisher,
            manifest.name,
            manifest.dependencies.len()
        ),
    );

    let feeds = resolve_feeds(&cli_feeds, &app_dir).await?;
    for feed in &feeds {
        ctx.output.info(&format!("Feed: {}", feed));
    }

    let cache_root = effective_cache_root(cache_dir)?;
    let cache = app_cache_dir(&cache_root, &manifest)?;

    let client = Arc::new(FeedClient::new()?);
    let metadata_cache = Arc::new(MetadataCache::new());
    let resolver = Resolver::new(client, metadata_cache);

    let resolution = resolver.resolve(&manifest, &cache, &feeds).await?;

    for (package, version) in &resolution.packages {
        ctx.output.info(&format!("  {} {}", package, version));
    }

    if resolution.has_conflicts() {
        ctx.output.warn("Version conflicts detected:");
        for line in resolution.render_conflicts().lines() {
            ctx.output.warn(line);
        }
    }

    let duration = start_time.elapsed();
    ctx.output.success(&format!(
        "{} symbol packages ready in {:.2}s",
        resolution.packages.len(),
        duration.as_secs_f64()
    ));

    Ok(())
}
