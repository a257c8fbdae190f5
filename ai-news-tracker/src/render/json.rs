use chrono::{DateTime, Utc};
use serde::Serialize;
use std::collections::BTreeMap;

use crate::aggregator::Report;
use crate::types::{Article, Result};

#[derive(Debug, Serialize)]
pub struct JsonArticle<'a> {
    pub title: &'a str,
    pub link: &'a str,
    pub published_date: Option<DateTime<Utc>>,
    pub ai_relevance_score: u8,
    pub companies_mentioned: String,
    pub summary: &'a str,
    pub source_name: &'a str,
    pub source_tier: u8,
    pub author: Option<&'a str>,
}

impl<'a> From<&'a Article> for JsonArticle<'a> {
    fn from(article: &'a Article) -> Self {
        Self {
            title: &article.title,
            link: &article.link,
            published_date: article.published_date,
            ai_relevance_score: article.ai_relevance_score.value(),
            companies_mentioned: article.companies_joined(),
            summary: &article.summary,
            source_name: &article.source_name,
            source_tier: article.source_tier.tier,
            author: article.author.as_deref(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct JsonExport<'a> {
    pub generated_at: DateTime<Utc>,
    pub total_articles: usize,
    pub articles: Vec<JsonArticle<'a>>,
    pub company_counts: &'a BTreeMap<String, usize>,
    pub source_counts: &'a BTreeMap<String, usize>,
}

pub fn render(report: &Report, generated_at: DateTime<Utc>) -> Result<String> {
    let export = JsonExport {
        generated_at,
        total_articles: report.total_articles(),
        articles: report.ranked_articles.iter().map(JsonArticle::from).collect(),
        company_counts: &report.company_counts,
        source_counts: &report.source_counts,
    };
    Ok(serde_json::to_string_pretty(&export)?)
}
