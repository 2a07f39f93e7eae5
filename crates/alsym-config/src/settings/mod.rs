//! Feed-settings layering.
//!
//! Feed URLs can come from three places, highest priority first: explicit
//! `--feed` CLI flags, the `ALSYM_FEEDS` environment variable (semicolon
//! separated), and a `[feeds]` section in an `alsym.toml` next to the app
//! manifest. Layers do not merge; the first non-empty layer wins, matching
//! the feed-priority behavior of resolution itself.

use camino::Utf8Path;
use serde::Deserialize;
use tracing::debug;

use crate::ConfigResult;

/// Environment variable holding a semicolon-separated feed list
pub const FEEDS_ENV_VAR: &str = "ALSYM_FEEDS";

/// Settings filename next to app.json
pub const SETTINGS_FILE: &str = "alsym.toml";

/// Parsed alsym.toml settings file
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AlsymToml {
    pub feeds: Option<FeedsSection>,
}

/// `[feeds]` section of alsym.toml
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FeedsSection {
    #[serde(default)]
    pub urls: Vec<String>,
}

impl AlsymToml {
    /// Load alsym.toml from an app directory; a missing file is an empty config
    pub async fn load(app_dir: &Utf8Path) -> ConfigResult<Self> {
        let path = app_dir.join(SETTINGS_FILE);
        let contents = match tokio::fs::read_to_string(&path).await {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Ok(Self::default());
            },
            Err(e) => {
                return Err(alsym_core::AlsymError::io(
                    format!("Failed to read {}", path),
                    e,
                ));
            },
        };

        toml::from_str(&contents).map_err(|e| alsym_core::AlsymError::ConfigValidation {
            field: SETTINGS_FILE.to_string(),
            reason: e.to_string(),
        })
    }
}

/// Resolve the effective feed list for a run.
///
/// CLI flags beat the environment, which beats alsym.toml. An empty result
/// is possible; the resolver treats it as a fatal configuration error.
pub async fn resolve_feeds(cli_feeds: &[String], app_dir: &Utf8Path) -> ConfigResult<Vec<String>> {
    if !cli_feeds.is_empty() {
        debug!(count = cli_feeds.len(), "Using feeds from CLI flags");
        return Ok(cli_feeds.to_vec());
    }

    if let Ok(raw) = std::env::var(FEEDS_ENV_VAR) {
        let feeds: Vec<String> = raw
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
            .collect();
        if !feeds.is_empty() {
            debug!(count = feeds.len(), "Using feeds from {}", FEEDS_ENV_VAR);
            return Ok(feeds);
        }
    }

    let settings = AlsymToml::load(app_dir).await?;
    let feeds = settings.feeds.map(|f| f.urls).unwrap_or_default();
    if !feeds.is_empty() {
        debug!(count = feeds.len(), "Using feeds from {}", SETTINGS_FILE);
    }
    Ok(feeds)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_settings_file() {
        let settings: AlsymToml = toml::from_str(
            r#"
            [feeds]
            urls = ["https://feed.example.com/v1", "https://mirror.example.com/v1"]
            "#,
        )
        .unwrap();

        let urls = settings.feeds.unwrap().urls;
        assert_eq!(urls.len(), 2);
        assert_eq!(urls[0], "https://feed.example.com/v1");
    }

    #[test]
    fn test_empty_settings() {
        let settings: AlsymToml = toml::from_str("").unwrap();
        assert!(settings.feeds.is_none());
    }

    #[tokio::test]
    async fn test_cli_flags_win() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "[feeds]\nurls = [\"https://from-toml.example.com\"]\n",
        )
        .unwrap();

        let utf8_dir = camino::Utf8Path::from_path(dir.path()).unwrap();
        let cli = vec!["https://from-cli.example.com".to_string()];
        let feeds = resolve_feeds(&cli, utf8_dir).await.unwrap();
        assert_eq!(feeds, cli);
    }

    #[tokio::test]
    async fn test_toml_fallback() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(SETTINGS_FILE),
            "[feeds]\nurls = [\"https://from-toml.example.com\"]\n",
        )
        .unwrap();

        let utf8_dir = camino::Utf8Path::from_path(dir.path()).unwrap();
        let feeds = resolve_feeds(&[], utf8_dir).await.unwrap();
        assert_eq!(feeds, vec!["https://from-toml.example.com".to_string()]);
    }

    #[tokio::test]
    async fn test_missing_settings_file() {
        let dir = tempfile::tempdir().unwrap();
        let utf8_dir = camino::Utf8Path::from_path(dir.path()).unwrap();
        let feeds = resolve_feeds(&[], utf8_dir).await.unwrap();
        assert!(feeds.is_empty());
    }
}
