#![allow(dead_code)]

use ai_news_tracker::{
    Article, FeedParser, FeedSource, ParsedEntry, ParsedFeed, RelevanceScore, Result, SourceTier,
    TrackerError,
};
use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use std::collections::HashMap;
use std::sync::Once;

static INIT: Once = Once::new();

pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_test_writer()
            .try_init()
            .ok();
    });
}

pub enum Fixture {
    Feed(ParsedFeed),
    Xml(String),
    Fail(String),
    Delayed(std::time::Duration, ParsedFeed),
}

/// In-memory feed source keyed by URL.
#[derive(Default)]
pub struct StaticFeedSource {
    feeds: HashMap<String, Fixture>,
}

impl StaticFeedSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, url: &str, fixture: Fixture) -> Self {
        self.feeds.insert(url.to_string(), fixture);
        self
    }
}

#[async_trait]
impl FeedSource for StaticFeedSource {
    async fn fetch_feed(&self, url: &str) -> Result<ParsedFeed> {
        match self.feeds.get(url) {
            Some(Fixture::Feed(feed)) => Ok(feed.clone()),
            Some(Fixture::Xml(xml)) => FeedParser::parse_feed(xml),
            Some(Fixture::Fail(reason)) => Err(TrackerError::FeedUnavailable {
                url: url.to_string(),
                reason: reason.clone(),
            }),
            Some(Fixture::Delayed(delay, feed)) => {
                tokio::time::sleep(*delay).await;
                Ok(feed.clone())
            }
            None => Err(TrackerError::FeedUnavailable {
                url: url.to_string(),
                reason: "no fixture".to_string(),
            }),
        }
    }

    fn source_kind(&self) -> &'static str {
        "static"
    }
}

pub fn feed(title: &str, entries: Vec<ParsedEntry>) -> ParsedFeed {
    ParsedFeed {
        title: Some(title.to_string()),
        entries,
    }
}

pub fn entry(title: &str, link: &str, published_at: Option<DateTime<Utc>>) -> ParsedEntry {
    ParsedEntry {
        link: Some(link.to_string()),
        title: Some(title.to_string()),
        summary: Some(String::new()),
        published_at,
        ..Default::default()
    }
}

pub fn days_ago(days: i64) -> DateTime<Utc> {
    Utc::now() - Duration::days(days)
}

pub fn article(title: &str, score: u8, published_date: Option<DateTime<Utc>>) -> Article {
    Article {
        title: title.to_string(),
        link: format!("https://example.com/{}", title.to_lowercase().replace(' ', "-")),
        published_date,
        summary: String::new(),
        author: None,
        tags: Vec::new(),
        source_name: "Example News".to_string(),
        source_url: "https://example.com/feed".to_string(),
        source_tier: SourceTier::unknown(),
        base_score: RelevanceScore::new(score as u64),
        ai_relevance_score: RelevanceScore::new(score as u64),
        companies_mentioned: Vec::new(),
    }
}

pub fn rss_document(channel_title: &str, items: &[(&str, &str, &str, DateTime<Utc>)]) -> String {
    let mut xml = String::from("<?xml version=\"1.0\" encoding=\"UTF-8\"?>\n<rss version=\"2.0\">\n<channel>\n");
    xml.push_str(&format!("<title>{}</title>\n", channel_title));
    xml.push_str("<link>https://news.example.com/</link>\n<description>Test feed</description>\n");
    for (title, link, description, published) in items {
        xml.push_str("<item>\n");
        xml.push_str(&format!("<title>{}</title>\n", title));
        xml.push_str(&format!("<link>{}</link>\n", link));
        xml.push_str(&format!("<guid>{}</guid>\n", link));
        xml.push_str(&format!("<description>{}</description>\n", description));
        xml.push_str(&format!("<pubDate>{}</pubDate>\n", published.to_rfc2822()));
        xml.push_str("</item>\n");
    }
    xml.push_str("</channel>\n</rss>\n");
    xml
}
