use ai_news_tracker::config::{self, DEFAULT_DAYS_BACK, DEFAULT_FEEDS_FILE, DEFAULT_MIN_SCORE, DEFAULT_TOP_N};
use ai_news_tracker::render::{self, console};
use ai_news_tracker::{
    report, CompanyExtractor, FeedWalker, FetchConfig, OutputFormat, RssFeedSource, ScalingPolicy,
    Scorer, WalkOptions,
};
use anyhow::{Context, Result};
use chrono::Utc;
use clap::Parser;
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Duration;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Track AI news from RSS feeds
#[derive(Debug, Parser)]
#[command(name = "ai-news-tracker", version, about)]
struct Cli {
    /// File containing RSS feed URLs, one per line
    #[arg(short = 'f', long, default_value = DEFAULT_FEEDS_FILE)]
    feeds_file: PathBuf,

    /// Number of days back to search
    #[arg(short = 'd', long = "days", default_value_t = DEFAULT_DAYS_BACK)]
    days: u32,

    /// Minimum AI relevance score (0-100)
    #[arg(short = 's', long = "score", default_value_t = DEFAULT_MIN_SCORE,
          value_parser = clap::value_parser!(u8).range(0..=100))]
    score: u8,

    /// Export format
    #[arg(short = 'o', long = "output", value_enum, default_value_t = OutputFormat::All)]
    output: OutputFormat,

    /// Directory the export files are written to
    #[arg(long, default_value = ".")]
    output_dir: PathBuf,

    /// Number of articles shown in the console summary
    #[arg(long, default_value_t = DEFAULT_TOP_N)]
    top: usize,

    /// JSON lexicon replacing the built-in keywords and companies
    #[arg(long)]
    lexicon: Option<PathBuf>,

    /// Weight scores by source credibility tier
    #[arg(long)]
    weight_sources: bool,

    /// Only include sources of this tier or better (1-6)
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    max_tier: Option<u8>,

    /// Drop entries without a publication date
    #[arg(long)]
    exclude_undated: bool,

    /// Per-feed timeout in seconds, retries included
    #[arg(long, default_value_t = 15)]
    timeout: u64,

    /// HTTP retries per feed
    #[arg(long, default_value_t = 2)]
    retries: u32,

    /// Feeds fetched concurrently
    #[arg(long, default_value_t = 4)]
    concurrency: usize,

    /// Debug logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    fn fetch_config(&self) -> FetchConfig {
        // no single request may outlive the whole-feed budget
        FetchConfig {
            timeout_seconds: self.timeout.max(1),
            max_retries: self.retries,
            ..FetchConfig::default()
        }
    }

    fn walk_options(&self) -> WalkOptions {
        WalkOptions {
            feed_timeout: Duration::from_secs(self.timeout.max(1)),
            concurrency: self.concurrency.max(1),
            include_undated: !self.exclude_undated,
            weight_sources: self.weight_sources,
            max_tier: self.max_tier,
        }
    }
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> Result<()> {
    let feed_urls = config::load_feed_urls(&cli.feeds_file).context("Failed to load feed list")?;
    let lexicon = config::load_lexicon(cli.lexicon.as_deref()).context("Failed to load lexicon")?;

    let scorer = Scorer::new(&lexicon, ScalingPolicy::default()).context("Failed to build scorer")?;
    let extractor = CompanyExtractor::new(&lexicon).context("Failed to build company extractor")?;
    let source = RssFeedSource::new(cli.fetch_config()).context("Failed to create HTTP client")?;

    info!(
        "Looking for articles from the last {} days with score >= {}",
        cli.days, cli.score
    );

    let walker = FeedWalker::new(source, scorer, extractor, cli.walk_options());
    let outcome = walker.collect(&feed_urls, cli.days).await;
    let report = report(&outcome.articles, cli.score);

    print!("{}", console::render(&report, &outcome, cli.top));

    let written = render::write_exports(&report, cli.output, &cli.output_dir, Utc::now())
        .context("Failed to write exports")?;
    for path in written {
        println!("Exported {}", path.display());
    }

    Ok(())
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{:#}", e);
            eprintln!("Error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}
