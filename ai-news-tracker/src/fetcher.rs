use backoff::{backoff::Backoff, exponential::ExponentialBackoff};
use reqwest::{Client, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use url::Url;

use crate::types::{FetchConfig, Result, TrackerError};

const BYTES_PER_MB: usize = 1024 * 1024;

/// Body of a successfully fetched feed document.
#[derive(Debug, Clone)]
pub struct FetchedDocument {
    pub url: String,
    pub content: String,
    pub http_status: u16,
    pub response_time_ms: u64,
}

pub struct Fetcher {
    client: Client,
    config: FetchConfig,
    last_request: Arc<Mutex<HashMap<String, Instant>>>,
}

impl Fetcher {
    pub fn new(config: FetchConfig) -> Result<Self> {
        let client = Client::builder()
            .user_agent(&config.user_agent)
            .timeout(Duration::from_secs(config.timeout_seconds))
            .gzip(true)
            .deflate(true)
            .brotli(true)
            .redirect(reqwest::redirect::Policy::limited(config.max_redirects))
            .build()?;

        Ok(Self {
            client,
            config,
            last_request: Arc::new(Mutex::new(HashMap::new())),
        })
    }

    /// GET the feed at `url`, retrying transient failures with exponential
    /// delays. Client errors (4xx) are not retried.
    pub async fn fetch_feed(&self, url: &str) -> Result<FetchedDocument> {
        let start_time = Instant::now();
        self.apply_rate_limit(url).await?;

        let mut backoff: ExponentialBackoff<backoff::SystemClock> = ExponentialBackoff {
            current_interval: Duration::from_secs(self.config.retry_delay_seconds),
            initial_interval: Duration::from_secs(self.config.retry_delay_seconds),
            max_interval: Duration::from_secs(self.config.retry_delay_seconds * 8),
            multiplier: 2.0,
            max_elapsed_time: None,
            ..Default::default()
        };

        let mut last_error = None;

        for attempt in 0..=self.config.max_retries {
            debug!("Fetching feed {} (attempt {})", url, attempt + 1);

            match self.fetch_once(url).await {
                Ok((status, content)) => {
                    let response_time_ms = start_time.elapsed().as_millis() as u64;
                    info!(
                        "Fetched feed {} ({} bytes, {}ms)",
                        url,
                        content.len(),
                        response_time_ms
                    );
                    return Ok(FetchedDocument {
                        url: url.to_string(),
                        content,
                        http_status: status.as_u16(),
                        response_time_ms,
                    });
                }
                Err(e) => {
                    let retryable = is_retryable(&e);
                    last_error = Some(e);
                    if !retryable || attempt == self.config.max_retries {
                        break;
                    }
                    if let Some(delay) = backoff.next_backoff() {
                        warn!(
                            "Attempt {} failed for {}, retrying in {:?}",
                            attempt + 1,
                            url,
                            delay
                        );
                        tokio::time::sleep(delay).await;
                    }
                }
            }
        }

        let reason = last_error
            .map(|e| e.to_string())
            .unwrap_or_else(|| "unknown error".to_string());
        Err(TrackerError::FeedUnavailable {
            url: url.to_string(),
            reason,
        })
    }

    async fn fetch_once(&self, url: &str) -> Result<(StatusCode, String)> {
        let mut response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            return Err(TrackerError::FeedUnavailable {
                url: url.to_string(),
                reason: format!("HTTP {}", status),
            });
        }

        let limit = self.config.max_feed_size_mb * BYTES_PER_MB;
        if let Some(content_length) = response.content_length() {
            if content_length as usize > limit {
                return Err(TrackerError::FeedTooLarge {
                    limit_mb: self.config.max_feed_size_mb,
                });
            }
        }

        // Content-Length may be missing or wrong, so count what actually arrives.
        let mut body = Vec::new();
        while let Some(chunk) = response.chunk().await? {
            body.extend_from_slice(&chunk);
            if body.len() > limit {
                debug!("Aborting download of {} after {} bytes", url, body.len());
                return Err(TrackerError::FeedTooLarge {
                    limit_mb: self.config.max_feed_size_mb,
                });
            }
        }

        Ok((status, String::from_utf8_lossy(&body).into_owned()))
    }

    /// Keeps requests to the same host at least `min_host_interval_ms` apart.
    async fn apply_rate_limit(&self, url: &str) -> Result<()> {
        let host = Url::parse(url)?.host_str().unwrap_or("").to_string();
        let min_interval = Duration::from_millis(self.config.min_host_interval_ms);

        let wait = {
            let mut last_request = self.last_request.lock().await;
            let now = Instant::now();
            let slot = match last_request.get(&host) {
                Some(previous) if *previous + min_interval > now => *previous + min_interval,
                _ => now,
            };
            last_request.insert(host.clone(), slot);
            slot.saturating_duration_since(now)
        };

        if !wait.is_zero() {
            debug!("Rate limiting {}: waiting {:?}", host, wait);
            tokio::time::sleep(wait).await;
        }
        Ok(())
    }
}

fn is_retryable(error: &TrackerError) -> bool {
    match error {
        TrackerError::Http(e) => {
            e.is_timeout() || e.is_connect() || e.status().is_some_and(|s| s.is_server_error())
        }
        TrackerError::FeedUnavailable { reason, .. } => reason.starts_with("HTTP 5"),
        _ => false,
    }
}
