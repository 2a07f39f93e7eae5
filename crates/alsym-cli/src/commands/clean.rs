//! `alsym clean` command implementation.

use std::path::PathBuf;

use alsym_config::AppManifest;
use alsym_core::error::{AlsymError, CoreResult};

use super::{app_cache_dir, effective_cache_root, CommandContext};

/// Execute the `alsym clean` command
pub async fn execute(
    app_dir: Option<PathBuf>,
    all: bool,
    cache_dir: Option<PathBuf>,
    ctx: &CommandContext,
) -> CoreResult<()> {
    let cache_root = effective_cache_root(cache_dir)?;

    if all {
        if cache_root.exists() {
            std::fs::remove_dir_all(&cache_root).map_err(|e| {
                AlsymError::io(
                    format!("Failed to remove cache root {}", cache_root.display()),
                    e,
                )
            })?;
        }
        ctx.output
            .success(&format!("Removed cache root {}", cache_root.display()));
        return Ok(());
    }

    let app_dir = ctx.app_dir(app_dir)?;
    let manifest = AppManifest::load(&app_dir).await?;
    let cache = app_cache_dir(&cache_root, &manifest)?;

    cache.remove_all()?;
    ctx.output.success(&format!(
        "Removed cached symbols for {}.{}",
        manifest.publisher, manifest.name
    ));

    Ok(())
}
