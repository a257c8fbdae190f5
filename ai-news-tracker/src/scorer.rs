use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::lexicon::{whole_word_matcher, Lexicon};
use crate::types::{RelevanceScore, Result, TrackerError};

/// Maps the raw weighted keyword count onto `0..=100`.
///
/// The map is linear up to `saturation_point` and flat after it, so a few
/// strong matches reach the top of the range while very dense text cannot
/// push past it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScalingPolicy {
    /// How many times a title match counts relative to a summary match.
    pub title_multiplier: u64,
    /// Raw value at which the score reaches 100.
    pub saturation_point: u64,
}

impl Default for ScalingPolicy {
    fn default() -> Self {
        Self {
            title_multiplier: 2,
            saturation_point: 40,
        }
    }
}

impl ScalingPolicy {
    pub fn normalize(&self, raw: u64) -> RelevanceScore {
        RelevanceScore::new(raw.saturating_mul(100) / self.saturation_point)
    }
}

struct KeywordMatcher {
    pattern: Regex,
    weight: u64,
}

pub struct Scorer {
    matchers: Vec<KeywordMatcher>,
    policy: ScalingPolicy,
}

impl Scorer {
    pub fn new(lexicon: &Lexicon, policy: ScalingPolicy) -> Result<Self> {
        if policy.saturation_point == 0 {
            return Err(TrackerError::Configuration(
                "saturation point must be positive".to_string(),
            ));
        }

        let matchers = lexicon
            .keywords
            .iter()
            .map(|k| {
                Ok(KeywordMatcher {
                    pattern: whole_word_matcher(&k.term, true)?,
                    weight: k.weight as u64,
                })
            })
            .collect::<Result<Vec<_>>>()?;

        Ok(Self { matchers, policy })
    }

    pub fn with_builtin_lexicon() -> Result<Self> {
        Self::new(&Lexicon::builtin(), ScalingPolicy::default())
    }

    /// Weighted keyword total before normalization.
    pub fn raw_score(&self, title: &str, summary: &str) -> u64 {
        self.matchers.iter().fold(0u64, |total, matcher| {
            let in_title = matcher.pattern.find_iter(title).count() as u64;
            let in_summary = matcher.pattern.find_iter(summary).count() as u64;
            let hits = in_title
                .saturating_mul(self.policy.title_multiplier)
                .saturating_add(in_summary);
            total.saturating_add(hits.saturating_mul(matcher.weight))
        })
    }

    pub fn score(&self, title: &str, summary: &str) -> RelevanceScore {
        self.policy.normalize(self.raw_score(title, summary))
    }
}
