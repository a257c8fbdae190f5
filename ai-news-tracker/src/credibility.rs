//! Source credibility tiers.
//!
//! Tier 1 is the most authoritative. Sources not listed fall into tier 6.
//! When source weighting is enabled the base score is multiplied by the
//! tier's percentage and clamped back into range.

use serde::{Deserialize, Serialize};

use crate::types::RelevanceScore;

pub const UNKNOWN_TIER: u8 = 6;

/// Name fragment, tier, multiplier in percent, source type.
const SOURCE_TIERS: &[(&str, u8, u32, &str)] = &[
    ("MIT Technology Review", 1, 150, "Academic"),
    ("Nature", 1, 150, "Academic"),
    ("Science Magazine", 1, 150, "Academic"),
    ("Stanford HAI", 1, 150, "Academic"),
    ("Berkeley AI Research", 1, 150, "Academic"),
    ("OpenAI Blog", 2, 140, "Primary Source"),
    ("DeepMind Blog", 2, 140, "Primary Source"),
    ("Anthropic News", 2, 140, "Primary Source"),
    ("Google AI Blog", 2, 140, "Primary Source"),
    ("Meta AI", 2, 140, "Primary Source"),
    ("Microsoft Research", 2, 140, "Primary Source"),
    ("The Verge", 3, 130, "Tech Journalism"),
    ("Ars Technica", 3, 130, "Tech Journalism"),
    ("Wired", 3, 130, "Tech Journalism"),
    ("IEEE Spectrum", 3, 130, "Tech Journalism"),
    ("TechCrunch", 4, 120, "Business News"),
    ("VentureBeat", 4, 120, "Business News"),
    ("Reuters Technology", 4, 120, "Business News"),
    ("Bloomberg Technology", 4, 120, "Business News"),
    ("Wall Street Journal Tech", 4, 120, "Business News"),
    ("Financial Times Tech", 4, 120, "Business News"),
    ("Hacker News", 5, 100, "Aggregator"),
    ("AI News", 5, 100, "General"),
    ("Machine Learning Mastery", 5, 100, "Educational"),
    ("Towards Data Science", 5, 100, "Community"),
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SourceTier {
    pub tier: u8,
    pub multiplier_pct: u32,
    pub source_type: String,
}

impl SourceTier {
    pub fn unknown() -> Self {
        Self {
            tier: UNKNOWN_TIER,
            multiplier_pct: 90,
            source_type: "Unknown".to_string(),
        }
    }

    /// Looks up the first table row whose name appears in `source_name`.
    pub fn classify(source_name: &str) -> Self {
        let lowered = source_name.to_lowercase();
        SOURCE_TIERS
            .iter()
            .find(|(fragment, ..)| lowered.contains(&fragment.to_lowercase()))
            .map(|(_, tier, multiplier_pct, source_type)| Self {
                tier: *tier,
                multiplier_pct: *multiplier_pct,
                source_type: source_type.to_string(),
            })
            .unwrap_or_else(Self::unknown)
    }

    pub fn credibility(&self) -> &'static str {
        match self.tier {
            1..=2 => "High",
            3..=4 => "Medium",
            _ => "Standard",
        }
    }

    pub fn weigh(&self, base: RelevanceScore) -> RelevanceScore {
        RelevanceScore::new(base.value() as u64 * self.multiplier_pct as u64 / 100)
    }
}

impl Default for SourceTier {
    fn default() -> Self {
        Self::unknown()
    }
}
