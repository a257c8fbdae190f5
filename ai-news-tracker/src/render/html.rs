use chrono::{DateTime, Utc};

use crate::aggregator::Report;
use crate::rss_utils::text;
use crate::types::Article;

const MAX_ARTICLES: usize = 50;
const MAX_SUMMARY_CHARS: usize = 500;

const STYLE: &str = r#"    body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Arial, sans-serif; max-width: 1200px; margin: 0 auto; padding: 20px; background: #f5f5f5; }
    h1 { color: #2563eb; border-bottom: 3px solid #2563eb; padding-bottom: 10px; }
    .article { background: white; padding: 20px; margin: 15px 0; border-radius: 8px; box-shadow: 0 2px 4px rgba(0,0,0,0.1); }
    .article h2 { margin-top: 0; color: #1f2937; }
    .article a { color: #2563eb; text-decoration: none; }
    .meta { color: #6b7280; font-size: 0.9em; margin: 10px 0; }
    .score { display: inline-block; background: #10b981; color: white; padding: 4px 12px; border-radius: 20px; font-size: 0.85em; font-weight: bold; }
    .companies { background: #eff6ff; padding: 8px 12px; border-left: 3px solid #2563eb; margin: 10px 0; font-size: 0.9em; }
    .summary { color: #4b5563; line-height: 1.6; }
    table { border-collapse: collapse; background: white; margin: 10px 0 20px; }
    th, td { padding: 6px 14px; border-bottom: 1px solid #e5e7eb; text-align: left; }
"#;

pub fn render(report: &Report, generated_at: DateTime<Utc>) -> String {
    let mut html = String::new();

    html.push_str("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("  <meta charset=\"UTF-8\">\n");
    html.push_str(&format!(
        "  <title>AI News Report - {}</title>\n",
        generated_at.format("%Y-%m-%d")
    ));
    html.push_str("  <style>\n");
    html.push_str(STYLE);
    html.push_str("  </style>\n</head>\n<body>\n");

    html.push_str("  <h1>AI News Report</h1>\n");
    html.push_str(&format!(
        "  <p><strong>Generated:</strong> {}</p>\n",
        generated_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));
    html.push_str(&format!(
        "  <p><strong>Total AI Articles:</strong> {}</p>\n",
        report.total_articles()
    ));

    push_count_table(&mut html, "Most Mentioned Companies", "Company", &report.companies_by_count());
    push_count_table(&mut html, "Articles by Source", "Source", &report.sources_by_count());

    html.push_str("  <hr>\n");
    for article in report.ranked_articles.iter().take(MAX_ARTICLES) {
        push_article(&mut html, article);
    }

    html.push_str("</body>\n</html>\n");
    html
}

fn push_article(html: &mut String, article: &Article) {
    html.push_str("  <div class=\"article\">\n");
    html.push_str(&format!(
        "    <h2><a href=\"{}\" target=\"_blank\">{}</a></h2>\n",
        escape_html(&article.link),
        escape_html(&article.title)
    ));
    html.push_str("    <div class=\"meta\">\n");
    html.push_str(&format!(
        "      <span class=\"score\">Relevance: {}/100</span>\n",
        article.ai_relevance_score
    ));
    html.push_str(&format!(
        "      {} | {}",
        article.published_label(),
        escape_html(&article.source_name)
    ));
    if let Some(author) = &article.author {
        html.push_str(&format!(" | {}", escape_html(author)));
    }
    html.push_str("\n    </div>\n");

    if !article.companies_mentioned.is_empty() {
        html.push_str(&format!(
            "    <div class=\"companies\">Companies: {}</div>\n",
            escape_html(&article.companies_joined())
        ));
    }
    html.push_str(&format!(
        "    <div class=\"summary\">{}</div>\n",
        escape_html(&text::truncate(&article.summary, MAX_SUMMARY_CHARS))
    ));
    html.push_str("  </div>\n");
}

fn push_count_table(html: &mut String, heading: &str, label: &str, rows: &[(&str, usize)]) {
    if rows.is_empty() {
        return;
    }
    html.push_str(&format!("  <h3>{}</h3>\n  <table>\n", heading));
    html.push_str(&format!("    <tr><th>{}</th><th>Articles</th></tr>\n", label));
    for (name, count) in rows {
        html.push_str(&format!(
            "    <tr><td>{}</td><td>{}</td></tr>\n",
            escape_html(name),
            count
        ));
    }
    html.push_str("  </table>\n");
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}
