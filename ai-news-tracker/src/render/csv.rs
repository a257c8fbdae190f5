use crate::aggregator::Report;
use crate::types::Article;

const HEADER: &[&str] = &[
    "title",
    "link",
    "published_date",
    "ai_relevance_score",
    "companies_mentioned",
    "summary",
    "source_name",
    "source_tier",
    "author",
];

/// One header row, then one row per ranked article. Lines end with CRLF.
pub fn render(report: &Report) -> String {
    let mut out = String::new();
    push_row(&mut out, HEADER.iter().map(|h| h.to_string()));
    for article in &report.ranked_articles {
        push_row(&mut out, row(article).into_iter());
    }
    out
}

fn row(article: &Article) -> Vec<String> {
    vec![
        article.title.clone(),
        article.link.clone(),
        article
            .published_date
            .map(|d| d.to_rfc3339())
            .unwrap_or_default(),
        article.ai_relevance_score.to_string(),
        article.companies_joined(),
        article.summary.clone(),
        article.source_name.clone(),
        article.source_tier.tier.to_string(),
        article.author.clone().unwrap_or_default(),
    ]
}

fn push_row(out: &mut String, fields: impl Iterator<Item = String>) {
    let line: Vec<String> = fields.map(|f| escape_field(&f)).collect();
    out.push_str(&line.join(","));
    out.push_str("\r\n");
}

/// Quote a field when it holds a comma, quote or line break.
pub fn escape_field(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
