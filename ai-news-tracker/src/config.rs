use std::fs;
use std::path::Path;
use tracing::{debug, warn};

use crate::lexicon::Lexicon;
use crate::rss_utils::url;
use crate::types::{Result, TrackerError};

pub const DEFAULT_FEEDS_FILE: &str = "ai_news_feeds.txt";
pub const DEFAULT_DAYS_BACK: u32 = 7;
pub const DEFAULT_MIN_SCORE: u8 = 30;
pub const DEFAULT_TOP_N: usize = 10;

/// Read the feed list. A missing file or one with no usable URL is fatal.
pub fn load_feed_urls(path: &Path) -> Result<Vec<String>> {
    let content = fs::read_to_string(path).map_err(|e| {
        TrackerError::Configuration(format!("cannot read feed list {}: {}", path.display(), e))
    })?;

    let urls = parse_feed_list(&content);
    if urls.is_empty() {
        return Err(TrackerError::Configuration(format!(
            "no feed URLs found in {}",
            path.display()
        )));
    }

    debug!("Loaded {} feed URLs from {}", urls.len(), path.display());
    Ok(urls)
}

/// One URL per line; blank lines and `#` comments are ignored, lines that
/// are not http(s) URLs are skipped.
pub fn parse_feed_list(content: &str) -> Vec<String> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter(|line| {
            let valid = url::is_valid_feed_url(line);
            if !valid {
                warn!("Ignoring invalid feed URL: {}", line);
            }
            valid
        })
        .map(str::to_string)
        .collect()
}

pub fn load_lexicon(path: Option<&Path>) -> Result<Lexicon> {
    match path {
        Some(path) => Lexicon::from_json_file(path),
        None => Ok(Lexicon::builtin()),
    }
}
