pub mod aggregator;
pub mod companies;
pub mod config;
pub mod credibility;
pub mod fetcher;
pub mod lexicon;
pub mod parser;
pub mod render;
pub mod rss_utils;
pub mod scorer;
pub mod sources;
pub mod traits;
pub mod types;
pub mod walker;

pub use aggregator::{report, Report};
pub use companies::CompanyExtractor;
pub use credibility::SourceTier;
pub use fetcher::Fetcher;
pub use lexicon::Lexicon;
pub use parser::FeedParser;
pub use render::OutputFormat;
pub use scorer::{ScalingPolicy, Scorer};
pub use sources::RssFeedSource;
pub use traits::FeedSource;
pub use types::*;
pub use walker::{FeedWalker, WalkOptions, WalkOutcome};
