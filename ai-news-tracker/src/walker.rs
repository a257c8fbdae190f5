use chrono::{DateTime, Duration as ChronoDuration, Utc};
use futures::stream::{self, StreamExt};
use std::collections::HashSet;
use std::time::Duration;
use tokio::time::timeout;
use tracing::{debug, info, warn};

use crate::companies::CompanyExtractor;
use crate::credibility::SourceTier;
use crate::rss_utils::{text, url};
use crate::scorer::Scorer;
use crate::traits::FeedSource;
use crate::types::{Article, ParsedEntry, ParsedFeed, Result, RunWarning, TrackerError};

#[derive(Debug, Clone)]
pub struct WalkOptions {
    /// Upper bound on fetching and parsing one feed, retries included.
    pub feed_timeout: Duration,
    /// Feeds fetched at once. Output order never depends on this.
    pub concurrency: usize,
    /// Keep entries that carry neither a published nor an updated date.
    pub include_undated: bool,
    /// Multiply scores by the source's credibility tier.
    pub weight_sources: bool,
    /// Skip feeds whose tier number is above this.
    pub max_tier: Option<u8>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self {
            feed_timeout: Duration::from_secs(15),
            concurrency: 4,
            include_undated: true,
            weight_sources: false,
            max_tier: None,
        }
    }
}

/// Everything one pass over the feed list produced.
#[derive(Debug, Default)]
pub struct WalkOutcome {
    pub articles: Vec<Article>,
    pub warnings: Vec<RunWarning>,
    pub entries_seen: usize,
    pub feeds_processed: usize,
    pub feeds_failed: usize,
}

struct FeedContext<'a> {
    feed_url: &'a str,
    source_name: String,
    tier: SourceTier,
    cutoff: DateTime<Utc>,
}

pub struct FeedWalker<S> {
    source: S,
    scorer: Scorer,
    extractor: CompanyExtractor,
    options: WalkOptions,
}

impl<S: FeedSource> FeedWalker<S> {
    pub fn new(source: S, scorer: Scorer, extractor: CompanyExtractor, options: WalkOptions) -> Self {
        Self {
            source,
            scorer,
            extractor,
            options,
        }
    }

    pub async fn collect(&self, feed_urls: &[String], days_back: u32) -> WalkOutcome {
        self.collect_at(feed_urls, days_back, Utc::now()).await
    }

    /// Same as [`collect`](Self::collect) with an explicit clock.
    pub async fn collect_at(
        &self,
        feed_urls: &[String],
        days_back: u32,
        now: DateTime<Utc>,
    ) -> WalkOutcome {
        let cutoff = now - ChronoDuration::days(days_back as i64);
        info!(
            "Scanning {} feeds via {} source for articles since {}",
            feed_urls.len(),
            self.source.source_kind(),
            cutoff.format("%Y-%m-%d %H:%M")
        );

        // buffered() yields in input order regardless of completion order
        let fetched: Vec<(&String, Result<ParsedFeed>)> = stream::iter(feed_urls)
            .map(|feed_url| async move { (feed_url, self.fetch_with_timeout(feed_url).await) })
            .buffered(self.options.concurrency.max(1))
            .collect()
            .await;

        let mut outcome = WalkOutcome::default();
        let mut seen_links = HashSet::new();

        for (feed_url, result) in fetched {
            match result {
                Ok(feed) => self.walk_feed(feed_url, feed, cutoff, &mut seen_links, &mut outcome),
                Err(e) => {
                    warn!("Skipping feed {}: {}", feed_url, e);
                    outcome.feeds_failed += 1;
                    outcome.warnings.push(RunWarning::feed_unavailable(feed_url.as_str(), &e));
                }
            }
        }

        info!(
            "Collected {} articles from {} entries ({} feeds ok, {} failed, {} warnings)",
            outcome.articles.len(),
            outcome.entries_seen,
            outcome.feeds_processed,
            outcome.feeds_failed,
            outcome.warnings.len()
        );
        outcome
    }

    async fn fetch_with_timeout(&self, feed_url: &str) -> Result<ParsedFeed> {
        match timeout(self.options.feed_timeout, self.source.fetch_feed(feed_url)).await {
            Ok(result) => result,
            Err(_) => Err(TrackerError::Timeout {
                url: feed_url.to_string(),
                timeout: self.options.feed_timeout,
            }),
        }
    }

    fn walk_feed(
        &self,
        feed_url: &str,
        feed: ParsedFeed,
        cutoff: DateTime<Utc>,
        seen_links: &mut HashSet<String>,
        outcome: &mut WalkOutcome,
    ) {
        let source_name = url::source_name(feed.title.as_deref(), feed_url);
        let tier = SourceTier::classify(&source_name);

        if let Some(max_tier) = self.options.max_tier {
            if tier.tier > max_tier {
                info!("Skipping {} (tier {} is above {})", source_name, tier.tier, max_tier);
                return;
            }
        }

        info!(
            "Processing {} [tier {}, {}] with {} entries",
            source_name,
            tier.tier,
            tier.credibility(),
            feed.entries.len()
        );
        outcome.feeds_processed += 1;

        let context = FeedContext {
            feed_url,
            source_name,
            tier,
            cutoff,
        };

        for entry in feed.entries {
            outcome.entries_seen += 1;
            match self.build_article(entry, &context) {
                Ok(Some(article)) => {
                    if seen_links.insert(article.link.clone()) {
                        outcome.articles.push(article);
                    } else {
                        debug!("Dropping duplicate link {}", article.link);
                    }
                }
                Ok(None) => {}
                Err(e) => {
                    warn!("{}", e);
                    outcome
                        .warnings
                        .push(RunWarning::malformed_entry(context.source_name.as_str(), &e));
                }
            }
        }
    }

    /// `Ok(None)` means the entry is valid but outside the date window.
    fn build_article(&self, entry: ParsedEntry, context: &FeedContext<'_>) -> Result<Option<Article>> {
        let malformed = |reason: &str| TrackerError::MalformedEntry {
            source_name: context.source_name.clone(),
            reason: reason.to_string(),
        };

        let link = entry
            .link
            .map(|l| l.trim().to_string())
            .filter(|l| !l.is_empty())
            .ok_or_else(|| malformed("entry has no link"))?;

        let title = entry
            .title
            .map(|t| text::extract_text_from_html(&t))
            .filter(|t| !t.is_empty())
            .ok_or_else(|| malformed(&format!("entry {} has no title", link)))?;

        let published_date = entry.published_at.or(entry.updated_at);
        match published_date {
            Some(date) if date < context.cutoff => {
                debug!("Outside window ({}): {}", date, title);
                return Ok(None);
            }
            None if !self.options.include_undated => {
                debug!("Undated, excluded: {}", title);
                return Ok(None);
            }
            _ => {}
        }

        let summary = entry
            .summary
            .map(|s| text::extract_text_from_html(&s))
            .unwrap_or_default();

        let base_score = self.scorer.score(&title, &summary);
        let ai_relevance_score = if self.options.weight_sources {
            context.tier.weigh(base_score)
        } else {
            base_score
        };
        let companies_mentioned = self.extractor.extract_companies(&title, &summary);

        debug!("Scored {} -> {} ({:?})", title, ai_relevance_score, companies_mentioned);

        Ok(Some(Article {
            title,
            link,
            published_date,
            summary,
            author: entry.author,
            tags: entry.tags,
            source_name: context.source_name.clone(),
            source_url: context.feed_url.to_string(),
            source_tier: context.tier.clone(),
            base_score,
            ai_relevance_score,
            companies_mentioned,
        }))
    }
}
