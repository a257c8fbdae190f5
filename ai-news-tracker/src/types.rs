use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::time::Duration;

use crate::credibility::SourceTier;

/// Relevance of an article to AI topics, always within `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct RelevanceScore(u8);

impl RelevanceScore {
    pub const MAX: u8 = 100;

    /// Builds a score, clamping anything above 100.
    pub fn new(value: u64) -> Self {
        Self(value.min(Self::MAX as u64) as u8)
    }

    pub fn value(self) -> u8 {
        self.0
    }
}

impl TryFrom<u8> for RelevanceScore {
    type Error = String;

    fn try_from(value: u8) -> std::result::Result<Self, Self::Error> {
        if value > Self::MAX {
            return Err(format!("relevance score {} is above {}", value, Self::MAX));
        }
        Ok(Self(value))
    }
}

impl From<RelevanceScore> for u8 {
    fn from(score: RelevanceScore) -> Self {
        score.0
    }
}

impl fmt::Display for RelevanceScore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A scored feed entry that survived the date window.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub link: String,
    pub published_date: Option<DateTime<Utc>>,
    pub summary: String,
    pub author: Option<String>,
    pub tags: Vec<String>,
    pub source_name: String,
    pub source_url: String,
    pub source_tier: SourceTier,
    pub base_score: RelevanceScore,
    pub ai_relevance_score: RelevanceScore,
    pub companies_mentioned: Vec<String>,
}

impl Article {
    pub fn companies_joined(&self) -> String {
        self.companies_mentioned.join(", ")
    }

    pub fn published_label(&self) -> String {
        self.published_date
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "undated".to_string())
    }
}

#[derive(Debug, Clone)]
pub struct FetchConfig {
    pub user_agent: String,
    pub timeout_seconds: u64,
    pub max_retries: u32,
    pub retry_delay_seconds: u64,
    pub max_feed_size_mb: usize,
    pub max_redirects: usize,
    pub min_host_interval_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            user_agent: "AI-News-Tracker/1.0".to_string(),
            timeout_seconds: 15,
            max_retries: 2,
            retry_delay_seconds: 2,
            max_feed_size_mb: 10,
            max_redirects: 5,
            min_host_interval_ms: 500,
        }
    }
}

#[derive(Debug, Clone)]
pub struct ParsedFeed {
    pub title: Option<String>,
    pub entries: Vec<ParsedEntry>,
}

#[derive(Debug, Clone, Default)]
pub struct ParsedEntry {
    pub link: Option<String>,
    pub title: Option<String>,
    pub summary: Option<String>,
    pub author: Option<String>,
    pub published_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    pub tags: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WarningKind {
    FeedUnavailable,
    MalformedEntry,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WarningKind::FeedUnavailable => write!(f, "feed unavailable"),
            WarningKind::MalformedEntry => write!(f, "malformed entry"),
        }
    }
}

/// A non-fatal problem met during a run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunWarning {
    pub kind: WarningKind,
    pub source: String,
    pub message: String,
}

impl RunWarning {
    pub fn feed_unavailable(source: impl Into<String>, error: &TrackerError) -> Self {
        Self {
            kind: WarningKind::FeedUnavailable,
            source: source.into(),
            message: error.to_string(),
        }
    }

    pub fn malformed_entry(source: impl Into<String>, error: &TrackerError) -> Self {
        Self {
            kind: WarningKind::MalformedEntry,
            source: source.into(),
            message: error.to_string(),
        }
    }
}

impl fmt::Display for RunWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}: {}", self.kind, self.source, self.message)
    }
}

#[derive(Debug, thiserror::Error)]
pub enum TrackerError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Feed parse error: {0}")]
    Parse(String),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("Feed unavailable at {url}: {reason}")]
    FeedUnavailable { url: String, reason: String },

    #[error("Feed {url} timed out after {timeout:?}")]
    Timeout { url: String, timeout: Duration },

    #[error("Feed exceeds the {limit_mb}MB size limit")]
    FeedTooLarge { limit_mb: usize },

    #[error("Malformed entry in {source_name}: {reason}")]
    MalformedEntry { source_name: String, reason: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Invalid lexicon pattern: {0}")]
    Pattern(#[from] regex::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TrackerError>;
