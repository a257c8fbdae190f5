use serde::Serialize;
use std::cmp::Ordering;
use std::collections::BTreeMap;
use tracing::info;

use crate::types::Article;

/// Ranked, filtered articles plus the two tallies every renderer shows.
#[derive(Debug, Clone, Default, Serialize)]
pub struct Report {
    pub ranked_articles: Vec<Article>,
    /// Distinct articles mentioning each company.
    pub company_counts: BTreeMap<String, usize>,
    /// Articles per source name.
    pub source_counts: BTreeMap<String, usize>,
}

impl Report {
    pub fn total_articles(&self) -> usize {
        self.ranked_articles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ranked_articles.is_empty()
    }

    /// Companies by count descending, ties alphabetical.
    pub fn companies_by_count(&self) -> Vec<(&str, usize)> {
        sorted_by_count(&self.company_counts)
    }

    pub fn sources_by_count(&self) -> Vec<(&str, usize)> {
        sorted_by_count(&self.source_counts)
    }
}

pub fn report(articles: &[Article], min_score: u8) -> Report {
    let mut ranked_articles: Vec<Article> = articles
        .iter()
        .filter(|a| a.ai_relevance_score.value() >= min_score)
        .cloned()
        .collect();

    // stable sort keeps input order for full ties
    ranked_articles.sort_by(rank_order);

    let mut company_counts = BTreeMap::new();
    let mut source_counts = BTreeMap::new();
    for article in &ranked_articles {
        for company in &article.companies_mentioned {
            *company_counts.entry(company.clone()).or_insert(0) += 1;
        }
        *source_counts.entry(article.source_name.clone()).or_insert(0) += 1;
    }

    info!(
        "{} of {} articles scored at least {}",
        ranked_articles.len(),
        articles.len(),
        min_score
    );

    Report {
        ranked_articles,
        company_counts,
        source_counts,
    }
}

/// Score descending, then newest first, undated last.
fn rank_order(a: &Article, b: &Article) -> Ordering {
    b.ai_relevance_score
        .cmp(&a.ai_relevance_score)
        .then_with(|| match (a.published_date, b.published_date) {
            (Some(da), Some(db)) => db.cmp(&da),
            (Some(_), None) => Ordering::Less,
            (None, Some(_)) => Ordering::Greater,
            (None, None) => Ordering::Equal,
        })
}

fn sorted_by_count(counts: &BTreeMap<String, usize>) -> Vec<(&str, usize)> {
    let mut entries: Vec<(&str, usize)> = counts.iter().map(|(k, v)| (k.as_str(), *v)).collect();
    entries.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(b.0)));
    entries
}
