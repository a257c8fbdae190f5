//! Weighted AI vocabulary and the list of tracked companies.
//!
//! The built-in tables below are plain data. Add a row to extend the
//! vocabulary; nothing in the scorer needs to change. A lexicon can also be
//! loaded from a JSON file with the same shape as [`Lexicon`].

use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use tracing::{debug, info};

use crate::types::{Result, TrackerError};

/// Term and weight. Multi-word phrases and specific product names weigh
/// more than generic words.
const BUILTIN_KEYWORDS: &[(&str, u32)] = &[
    ("artificial intelligence", 10),
    ("generative ai", 10),
    ("large language model", 10),
    ("chatgpt", 10),
    ("openai", 10),
    ("anthropic", 10),
    ("machine learning", 8),
    ("deep learning", 8),
    ("neural network", 8),
    ("natural language processing", 8),
    ("foundation model", 8),
    ("llm", 8),
    ("gpt", 8),
    ("deepmind", 8),
    ("claude", 6),
    ("midjourney", 6),
    ("stable diffusion", 6),
    ("dall-e", 6),
    ("diffusion model", 6),
    ("computer vision", 6),
    ("reinforcement learning", 6),
    ("agi", 6),
    ("ai model", 6),
    ("nlp", 6),
    ("gemini", 5),
    ("copilot", 5),
    ("chatbot", 5),
    ("supervised learning", 5),
    ("unsupervised learning", 5),
    ("ai startup", 5),
    ("ai funding", 5),
    ("ai regulation", 5),
    ("ai ethics", 5),
    ("ai chip", 5),
    ("ai training", 5),
    ("ai", 5),
    ("transformer", 4),
    ("ml", 4),
    ("robotics", 2),
    ("automation", 2),
    ("autonomous", 2),
    ("gpu", 2),
];

const BUILTIN_COMPANIES: &[&str] = &[
    "OpenAI",
    "Anthropic",
    "Google",
    "DeepMind",
    "Microsoft",
    "Meta",
    "Amazon",
    "Apple",
    "Tesla",
    "NVIDIA",
    "Stability AI",
    "Midjourney",
    "Cohere",
    "Hugging Face",
    "Scale AI",
    "Character.AI",
    "Inflection AI",
    "Adept",
    "AI21 Labs",
    "Jasper",
    "Runway",
    "Replicate",
    "Together AI",
    "Mistral AI",
    "xAI",
    "Databricks",
    "Snowflake",
    "C3.ai",
    "UiPath",
    "Palantir",
];

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightedTerm {
    pub term: String,
    pub weight: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Lexicon {
    pub keywords: Vec<WeightedTerm>,
    pub companies: Vec<String>,
}

impl Lexicon {
    pub fn builtin() -> Self {
        Self {
            keywords: BUILTIN_KEYWORDS
                .iter()
                .map(|(term, weight)| WeightedTerm {
                    term: term.to_string(),
                    weight: *weight,
                })
                .collect(),
            companies: BUILTIN_COMPANIES.iter().map(|c| c.to_string()).collect(),
        }
    }

    pub fn from_json_str(content: &str) -> Result<Self> {
        let lexicon: Lexicon = serde_json::from_str(content)?;
        lexicon.validate()?;
        Ok(lexicon)
    }

    pub fn from_json_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| {
            TrackerError::Configuration(format!(
                "cannot read lexicon file {}: {}",
                path.display(),
                e
            ))
        })?;
        let lexicon = Self::from_json_str(&content)?;
        info!(
            "Loaded lexicon from {} ({} keywords, {} companies)",
            path.display(),
            lexicon.keywords.len(),
            lexicon.companies.len()
        );
        Ok(lexicon)
    }

    pub fn validate(&self) -> Result<()> {
        for keyword in &self.keywords {
            if keyword.term.trim().is_empty() {
                return Err(TrackerError::Configuration(
                    "lexicon contains a blank keyword".to_string(),
                ));
            }
            if keyword.weight == 0 {
                return Err(TrackerError::Configuration(format!(
                    "keyword '{}' must have a positive weight",
                    keyword.term
                )));
            }
        }
        if self.companies.iter().any(|c| c.trim().is_empty()) {
            return Err(TrackerError::Configuration(
                "lexicon contains a blank company name".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for Lexicon {
    fn default() -> Self {
        Self::builtin()
    }
}

/// Builds a case-insensitive matcher for `term` that only matches whole
/// words. A `\b` is placed only on sides where the term starts or ends with
/// a word character, so names such as "C3.ai" still anchor correctly.
pub(crate) fn whole_word_matcher(term: &str, allow_plural: bool) -> Result<Regex> {
    let term = term.trim();
    let starts_word = term.chars().next().is_some_and(is_word_char);
    let ends_word = term.chars().last().is_some_and(is_word_char);

    let mut pattern = String::from("(?i)");
    if starts_word {
        pattern.push_str(r"\b");
    }
    pattern.push_str(&regex::escape(term));
    if allow_plural && ends_word {
        pattern.push_str("s?");
    }
    if ends_word {
        pattern.push_str(r"\b");
    }

    debug!("Compiled matcher for '{}': {}", term, pattern);
    Ok(Regex::new(&pattern)?)
}

fn is_word_char(c: char) -> bool {
    c.is_alphanumeric() || c == '_'
}
