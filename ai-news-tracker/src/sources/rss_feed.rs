use async_trait::async_trait;
use tracing::debug;

use crate::fetcher::Fetcher;
use crate::parser::FeedParser;
use crate::traits::FeedSource;
use crate::types::{FetchConfig, ParsedFeed, Result};

/// Fetches feeds over HTTP and parses them with `feed_rs`.
pub struct RssFeedSource {
    fetcher: Fetcher,
}

impl RssFeedSource {
    pub fn new(fetch_config: FetchConfig) -> Result<Self> {
        Ok(Self {
            fetcher: Fetcher::new(fetch_config)?,
        })
    }
}

#[async_trait]
impl FeedSource for RssFeedSource {
    async fn fetch_feed(&self, url: &str) -> Result<ParsedFeed> {
        let document = self.fetcher.fetch_feed(url).await?;
        debug!(
            "HTTP {} from {} in {}ms",
            document.http_status, document.url, document.response_time_ms
        );
        FeedParser::parse_feed(&document.content)
    }

    fn source_kind(&self) -> &'static str {
        "rss"
    }
}
