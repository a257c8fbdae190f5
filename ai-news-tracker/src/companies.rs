use regex::Regex;

use crate::lexicon::{whole_word_matcher, Lexicon};
use crate::types::Result;

/// Finds which tracked companies an article mentions.
pub struct CompanyExtractor {
    matchers: Vec<(String, Regex)>,
}

impl CompanyExtractor {
    pub fn new(lexicon: &Lexicon) -> Result<Self> {
        let matchers = lexicon
            .companies
            .iter()
            .map(|name| Ok((name.clone(), whole_word_matcher(name, false)?)))
            .collect::<Result<Vec<_>>>()?;
        Ok(Self { matchers })
    }

    pub fn with_builtin_lexicon() -> Result<Self> {
        Self::new(&Lexicon::builtin())
    }

    /// Companies mentioned in either text, each once, in lexicon order.
    pub fn extract_companies(&self, title: &str, summary: &str) -> Vec<String> {
        self.matchers
            .iter()
            .filter(|(_, pattern)| pattern.is_match(title) || pattern.is_match(summary))
            .map(|(name, _)| name.clone())
            .collect()
    }
}
