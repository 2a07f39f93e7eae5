//! Command implementations and dispatch logic.
//!
//! Each command is an async function taking a CommandContext. Shared
//! plumbing for locating the app directory and its cache directory lives
//! here.

use std::path::{Path, PathBuf};

use camino::Utf8PathBuf;
use tracing::info;

use alsym_cache::{cache_root, AppCacheDir};
use alsym_config::AppManifest;
use alsym_core::error::{AlsymError, CoreResult};

pub mod clean;
pub mod download;
pub mod show_lock;

#[cfg(test)]
mod tests;

use crate::{output::OutputHandler, Commands};

/// Shared context for all commands
pub struct CommandContext {
    pub cwd: PathBuf,
    pub output: OutputHandler,
}

impl CommandContext {
    pub fn new() -> CoreResult<Self> {
        let cwd = std::env::current_dir().map_err(|e| {
            AlsymError::io("Failed to get current directory".to_string(), e)
        })?;

        Ok(Self {
            cwd,
            output: OutputHandler::new(),
        })
    }

    /// Resolve the app directory argument against the working directory
    pub fn app_dir(&self, arg: Option<PathBuf>) -> CoreResult<Utf8PathBuf> {
        let dir = match arg {
            Some(dir) if dir.is_absolute() => dir,
            Some(dir) => self.cwd.join(dir),
            None => self.cwd.clone(),
        };
        Utf8PathBuf::from_path_buf(dir).map_err(|dir| AlsymError::ConfigValidation {
            field: "app-dir".to_string(),
            reason: format!("Path is not valid UTF-8: {}", dir.display()),
        })
    }
}

/// Dispatch a command to its handler
pub async fn dispatch_command(command: Commands, ctx: &CommandContext) -> CoreResult<()> {
    match command {
        Commands::Download {
            app_dir,
            feeds,
            cache_dir,
        } => {
            info!("Downloading symbol packages");
            download::execute(app_dir, feeds, cache_dir, ctx).await
        },
        Commands::ShowLock { app_dir, cache_dir } => {
            info!("Showing lock-file");
            show_lock::execute(app_dir, cache_dir, ctx).await
        },
        Commands::Clean {
            app_dir,
            all,
            cache_dir,
        } => {
            info!("Cleaning symbol cache (all: {})", all);
            clean::execute(app_dir, all, cache_dir, ctx).await
        },
    }
}

/// The cache root, honoring the --cache-dir override
pub fn effective_cache_root(override_dir: Option<PathBuf>) -> CoreResult<PathBuf> {
    match override_dir {
        Some(dir) => Ok(dir),
        None => cache_root().ok_or_else(|| AlsymError::ConfigValidation {
            field: "cache-dir".to_string(),
            reason: "No cache directory available; pass --cache-dir".to_string(),
        }),
    }
}

/// Cache directory of the app described by this manifest
pub fn app_cache_dir(root: &Path, manifest: &AppManifest) -> CoreResult<AppCacheDir> {
    AppCacheDir::for_app(root, &manifest.publisher, &manifest.name, &manifest.id)
}
