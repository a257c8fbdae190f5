use chrono::Utc;
use feed_rs::parser;
use tracing::{debug, info};

use crate::types::{ParsedEntry, ParsedFeed, Result, TrackerError};

/// Thin adapter over `feed_rs` that keeps only the fields the tracker uses.
pub struct FeedParser;

impl FeedParser {
    pub fn parse_feed(content: &str) -> Result<ParsedFeed> {
        let content = Self::normalize(content)?;
        debug!("Parsing feed content ({} bytes)", content.len());

        let feed = parser::parse(content.as_bytes())
            .map_err(|e| TrackerError::Parse(format!("Failed to parse feed: {}", e)))?;

        let title = feed.title.map(|t| t.content);
        let entries: Vec<ParsedEntry> = feed.entries.into_iter().map(Self::parse_entry).collect();

        info!(
            "Parsed feed '{}' with {} entries",
            title.as_deref().unwrap_or("untitled"),
            entries.len()
        );

        Ok(ParsedFeed {
            title,
            entries,
        })
    }

    fn parse_entry(entry: feed_rs::model::Entry) -> ParsedEntry {
        // Prefer the summary; fall back to the content body.
        let summary = entry
            .summary
            .map(|s| s.content)
            .or_else(|| entry.content.and_then(|c| c.body));

        ParsedEntry {
            link: Self::article_link(&entry.links),
            title: entry.title.map(|t| t.content),
            summary,
            author: entry.authors.first().map(|a| a.name.clone()),
            published_at: entry.published.map(|dt| dt.with_timezone(&Utc)),
            updated_at: entry.updated.map(|dt| dt.with_timezone(&Utc)),
            tags: entry.categories.into_iter().map(|c| c.term).collect(),
        }
    }

    /// The article page: `rel="alternate"` or no `rel` at all, then whatever
    /// link comes first.
    fn article_link(links: &[feed_rs::model::Link]) -> Option<String> {
        links
            .iter()
            .find(|l| l.rel.as_deref().map_or(true, |rel| rel == "alternate"))
            .or_else(|| links.first())
            .map(|l| l.href.clone())
    }

    /// Rough check that `content` looks like RSS or Atom at all.
    pub fn is_valid_feed_content(content: &str) -> bool {
        let lowered = content.to_lowercase();
        lowered.contains("<rss")
            || lowered.contains("<feed")
            || lowered.contains("<rdf")
            || lowered.contains("<channel")
    }

    fn normalize(content: &str) -> Result<String> {
        let normalized = content
            .trim_start_matches('\u{feff}')
            .replace("\r\n", "\n")
            .trim()
            .to_string();

        if normalized.is_empty() {
            return Err(TrackerError::Parse("Empty feed document".to_string()));
        }
        if !Self::is_valid_feed_content(&normalized) {
            return Err(TrackerError::Parse(
                "Document does not look like RSS or Atom".to_string(),
            ));
        }
        Ok(normalized)
    }
}
