//! `alsym show-lock` command implementation.

use std::path::PathBuf;

use alsym_cache::Lockfile;
use alsym_config::AppManifest;
use alsym_core::error::CoreResult;

use super::{app_cache_dir, effective_cache_root, CommandContext};

/// Execute the `alsym show-lock` command
pub async fn execute(
    app_dir: Option<PathBuf>,
    cache_dir: Option<PathBuf>,
    ctx: &CommandContext,
) -> CoreResult<()> {
    let app_dir = ctx.app_dir(app_dir)?;
    let manifest = AppManifest::load(&app_dir).await?;

    let cache_root = effective_cache_root(cache_dir)?;
    let cache = app_cache_dir(&cache_root, &manifest)?;

    let lock_path = cache.lock_path();
    if !lock_path.is_file() {
        ctx.output.info(&format!(
            "No lock-file for {}.{}; run 'alsym download' first",
            manifest.publisher, manifest.name
        ));
        return Ok(());
    }

    let lock = Lockfile::load(&lock_path);
    ctx.output
        .step("🔒", &format!("Lock-file at {}", lock_path.display()));

    if let Some(application) = &lock.application {
        ctx.output.info(&format!("Application baseline: {}", application));
    }
    if let Some(platform) = &lock.platform {
        ctx.output.info(&format!("Platform baseline: {}", platform));
    }
    if let Some(updated) = &lock.updated {
        ctx.output.info(&format!("Last updated: {}", updated));
    }

    for (package, version) in &lock.packages {
        let present = cache.has_payload(
            &alsym_core::types::PackageId::from_name(package.as_str()),
            &alsym_core::types::AppVersion::parse(version),
        );
        let marker = if present { "✓" } else { "missing" };
        ctx.output
            .info(&format!("  {} {} [{}]", package, version, marker));
    }

    Ok(())
}
