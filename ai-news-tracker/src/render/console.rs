use crate::aggregator::Report;
use crate::walker::WalkOutcome;

const RULE_WIDTH: usize = 80;
const MAX_COMPANY_ROWS: usize = 10;

/// Plain-text summary: top articles, the two tallies, then run warnings.
pub fn render(report: &Report, outcome: &WalkOutcome, top_n: usize) -> String {
    let rule = "=".repeat(RULE_WIDTH);
    let mut out = String::new();

    out.push_str(&format!("\n{}\nAI NEWS SUMMARY\n{}\n", rule, rule));
    out.push_str(&format!(
        "Found {} AI-related articles (out of {} collected, {} entries scanned in {} feeds)\n",
        report.total_articles(),
        outcome.articles.len(),
        outcome.entries_seen,
        outcome.feeds_processed
    ));

    if report.is_empty() {
        out.push_str("\nNo AI articles found\n");
    } else {
        let shown = top_n.min(report.total_articles());
        out.push_str(&format!("\nTop {} AI articles (by relevance):\n\n", shown));
        for (i, article) in report.ranked_articles.iter().take(top_n).enumerate() {
            out.push_str(&format!(
                "{}. [{}/100] {}\n",
                i + 1,
                article.ai_relevance_score,
                article.title
            ));
            out.push_str(&format!(
                "   {} | {} (tier {})\n",
                article.published_label(),
                article.source_name,
                article.source_tier.tier
            ));
            out.push_str(&format!("   {}\n", article.link));
            if !article.companies_mentioned.is_empty() {
                out.push_str(&format!("   Companies: {}\n", article.companies_joined()));
            }
            out.push('\n');
        }

        out.push_str(&format!("{}\nSTATISTICS\n{}\n", rule, rule));

        let companies = report.companies_by_count();
        if !companies.is_empty() {
            out.push_str("\nMost mentioned companies:\n");
            for (company, count) in companies.iter().take(MAX_COMPANY_ROWS) {
                out.push_str(&format!("   {}: {} articles\n", company, count));
            }
        }

        out.push_str("\nArticles by source:\n");
        for (source, count) in report.sources_by_count() {
            out.push_str(&format!("   {}: {} articles\n", source, count));
        }
    }

    if !outcome.warnings.is_empty() {
        out.push_str(&format!("\nWarnings ({}):\n", outcome.warnings.len()));
        for warning in &outcome.warnings {
            out.push_str(&format!("   {}\n", warning));
        }
    }

    out.push_str(&format!("\n{}\n", rule));
    out
}
