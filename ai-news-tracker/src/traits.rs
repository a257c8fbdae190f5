use async_trait::async_trait;

use crate::types::{ParsedFeed, Result};

/// Anything that can turn a feed URL into parsed entries.
///
/// The walker only talks to feeds through this trait, so the HTTP source
/// can be swapped for fixtures.
#[async_trait]
pub trait FeedSource: Send + Sync {
    /// Retrieve and parse the feed at `url`.
    async fn fetch_feed(&self, url: &str) -> Result<ParsedFeed>;

    /// Short label for log lines.
    fn source_kind(&self) -> &'static str {
        "feed"
    }
}
