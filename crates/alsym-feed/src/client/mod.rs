//! HTTP feed client with connection pooling and retry logic.
//!
//! A feed serves two endpoints per package: a version index
//! (`{feed}/{key}/index.json`) and an archive download
//! (`{feed}/{key}/{version}/content`). Lookup keys are the lowercased
//! package identifier. When several feeds are configured, the first feed
//! that returns a non-empty version list wins; version lists are never
//! merged across feeds.

use std::time::Duration;

use reqwest::{Client, ClientBuilder};
use tracing::{debug, warn};
use url::Url;

use alsym_core::error::AlsymError;
use alsym_core::types::PackageId;

use crate::api::{PackageMetadata, VersionIndex};
use crate::FeedResult;

/// Configuration for exponential backoff retry logic
#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Maximum number of retry attempts
    pub max_retries: u32,
    /// Initial delay before first retry
    pub initial_delay: Duration,
    /// Maximum delay between retries
    pub max_delay: Duration,
    /// Multiplier for exponential backoff
    pub multiplier: f64,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_retries: 3,
            initial_delay: Duration::from_millis(100),
            max_delay: Duration::from_secs(10),
            multiplier: 2.0,
        }
    }
}

/// HTTP client for symbol feed operations
#[derive(Debug, Clone)]
pub struct FeedClient {
    /// Underlying HTTP client with connection pooling
    client: Client,
    /// Retry configuration
    retry_config: RetryConfig,
}

impl FeedClient {
    /// Create a new feed client with default retry behavior
    pub fn new() -> FeedResult<Self> {
        Self::with_config(RetryConfig::default())
    }

    /// Create a feed client with custom retry configuration
    pub fn with_config(retry_config: RetryConfig) -> FeedResult<Self> {
        let client = ClientBuilder::new()
            .pool_max_idle_per_host(50)
            .pool_idle_timeout(Duration::from_secs(90))
            .timeout(Duration::from_secs(30))
            .gzip(true)
            .user_agent(concat!("alsym/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| AlsymError::network("Failed to create HTTP client".to_string(), e))?;

        Ok(Self {
            client,
            retry_config,
        })
    }

    /// Execute an HTTP operation with exponential backoff retry logic
    async fn with_retry<F, Fut, T>(&self, operation: F) -> FeedResult<T>
    where
        F: Fn() -> Fut,
        Fut: std::future::Future<Output = FeedResult<T>>,
    {
        let mut delay = self.retry_config.initial_delay;
        let mut last_error = None;

        for attempt in 0..=self.retry_config.max_retries {
            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    // A definitive 404 will not change on retry
                    let retryable = error.is_recoverable();
                    last_error = Some(error);

                    if attempt == self.retry_config.max_retries || !retryable {
                        break;
                    }

                    tokio::time::sleep(delay).await;

                    delay = std::cmp::min(
                        Duration::from_millis(
                            (delay.as_millis() as f64 * self.retry_config.multiplier) as u64,
                        ),
                        self.retry_config.max_delay,
                    );
                },
            }
        }

        Err(last_error.unwrap_or_else(|| AlsymError::Network {
            message: "Retry operation failed without error".to_string(),
            source: None,
        }))
    }

    /// List available versions of a package on one feed.
    ///
    /// A 404 maps to `PackageNotFound` so callers can distinguish "this feed
    /// does not carry the package" from a transport failure.
    pub async fn list_versions(&self, feed: &str, package: &PackageId) -> FeedResult<VersionIndex> {
        let url = endpoint(feed, &format!("{}/index.json", package.feed_key()))?;

        self.with_retry(|| async {
            let response = self.client.get(url.clone()).send().await.map_err(|e| {
                AlsymError::network(format!("Failed to query feed {}", feed), e)
            })?;

            match response.status() {
                reqwest::StatusCode::OK => {
                    response.json::<VersionIndex>().await.map_err(|e| {
                        AlsymError::network(
                            format!("Failed to parse version index from {}", feed),
                            e,
                        )
                    })
                },
                reqwest::StatusCode::NOT_FOUND => Err(AlsymError::PackageNotFound {
                    package: package.as_str().to_string(),
                }),
                status => Err(AlsymError::Network {
                    message: format!("Feed {} returned status {}", feed, status),
                    source: None,
                }),
            }
        })
        .await
    }

    /// Download the archive for a concrete package version
    pub async fn download(
        &self,
        feed: &str,
        package: &PackageId,
        version: &str,
    ) -> FeedResult<Vec<u8>> {
        let url = endpoint(feed, &format!("{}/{}/content", package.feed_key(), version))?;

        self.with_retry(|| async {
            let response = self.client.get(url.clone()).send().await.map_err(|e| {
                AlsymError::network(format!("Failed to download {} from {}", package, feed), e)
            })?;

            if !response.status().is_success() {
                return Err(AlsymError::Network {
                    message: format!(
                        "Feed {} returned status {} for {}@{}",
                        feed,
                        response.status(),
                        package,
                        version
                    ),
                    source: None,
                });
            }

            let bytes = response.bytes().await.map_err(|e| {
                AlsymError::network(format!("Failed to read archive for {}", package), e)
            })?;

            Ok(bytes.to_vec())
        })
        .await
    }

    /// Query the configured feeds, in order, for a package's version list.
    ///
    /// A feed that does not carry the package is skipped silently; any other
    /// failure is logged as a warning before the next feed is tried. Only
    /// when every feed has been exhausted is the package reported missing.
    pub async fn fetch_metadata(
        &self,
        feeds: &[String],
        package: &PackageId,
    ) -> FeedResult<PackageMetadata> {
        for feed in feeds {
            match self.list_versions(feed, package).await {
                Ok(index) if !index.versions.is_empty() => {
                    debug!(package = %package, feed = %feed, count = index.versions.len(),
                        "Found package versions");
                    return Ok(PackageMetadata::new(index, feed.clone()));
                },
                Ok(_) => {
                    debug!(package = %package, feed = %feed, "Feed has no versions for package");
                },
                Err(AlsymError::PackageNotFound { .. }) => {
                    debug!(package = %package, feed = %feed, "Package not on feed");
                },
                Err(e) => {
                    warn!(package = %package, feed = %feed, error = %e,
                        "Feed query failed, trying next feed");
                },
            }
        }

        Err(AlsymError::PackageNotFound {
            package: package.as_str().to_string(),
        })
    }
}

/// Build a feed endpoint URL, validating the base URL
fn endpoint(feed: &str, path: &str) -> FeedResult<Url> {
    let raw = format!("{}/{}", feed.trim_end_matches('/'), path);
    Url::parse(&raw).map_err(|e| {
        AlsymError::network(format!("Invalid feed URL '{}'", feed), e)
    })
}
