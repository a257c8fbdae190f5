use ai_news_tracker::render::{self, console, csv, html, json, OutputFormat};
use ai_news_tracker::{report, Article, RelevanceScore, RunWarning, TrackerError, WalkOutcome};
use chrono::{TimeZone, Utc};

mod common;

use common::{article, days_ago};

#[test]
fn test_min_score_filter() {
    common::init_tracing();

    let articles = vec![
        article("Low", 10, Some(days_ago(1))),
        article("High", 90, Some(days_ago(1))),
        article("Edge", 50, Some(days_ago(1))),
        article("Mid", 49, Some(days_ago(1))),
    ];

    let strict = report(&articles, 50);
    assert_eq!(strict.total_articles(), 2);
    assert!(strict.ranked_articles.iter().all(|a| a.ai_relevance_score.value() >= 50));

    let everything = report(&articles, 0);
    assert_eq!(everything.total_articles(), articles.len());
}

#[test]
fn test_ranking_by_score() {
    let articles = vec![
        article("Ten", 10, Some(days_ago(1))),
        article("Ninety", 90, Some(days_ago(1))),
        article("Fifty", 50, Some(days_ago(1))),
    ];

    let ranked: Vec<u8> = report(&articles, 0)
        .ranked_articles
        .iter()
        .map(|a| a.ai_relevance_score.value())
        .collect();
    assert_eq!(ranked, vec![90, 50, 10]);
}

#[test]
fn test_ties_break_on_recency_with_undated_last() {
    let articles = vec![
        article("Undated", 70, None),
        article("Older", 70, Some(days_ago(5))),
        article("Newer", 70, Some(days_ago(1))),
    ];

    let titles: Vec<String> = report(&articles, 0)
        .ranked_articles
        .into_iter()
        .map(|a| a.title)
        .collect();
    assert_eq!(titles, vec!["Newer", "Older", "Undated"]);
}

#[test]
fn test_counts_are_per_article() {
    let mut first = article("First", 80, Some(days_ago(1)));
    first.companies_mentioned = vec!["OpenAI".to_string(), "Microsoft".to_string()];
    first.source_name = "TechCrunch".to_string();

    let mut second = article("Second", 60, Some(days_ago(1)));
    second.companies_mentioned = vec!["OpenAI".to_string()];
    second.source_name = "TechCrunch".to_string();

    let mut third = article("Third", 40, Some(days_ago(1)));
    third.companies_mentioned = vec!["NVIDIA".to_string()];
    third.source_name = "The Verge".to_string();

    let mut filtered_out = article("Ignored", 5, Some(days_ago(1)));
    filtered_out.companies_mentioned = vec!["NVIDIA".to_string()];

    let report = report(&[first, second, third, filtered_out], 30);

    assert_eq!(report.company_counts.get("OpenAI"), Some(&2));
    assert_eq!(report.company_counts.get("Microsoft"), Some(&1));
    assert_eq!(report.company_counts.get("NVIDIA"), Some(&1));
    assert_eq!(report.companies_by_count()[0], ("OpenAI", 2));

    assert_eq!(report.source_counts.get("TechCrunch"), Some(&2));
    assert_eq!(report.sources_by_count(), vec![("TechCrunch", 2), ("The Verge", 1)]);
}

#[test]
fn test_json_export_shape() {
    let mut a = article("GPT news", 85, Some(Utc.with_ymd_and_hms(2026, 10, 18, 9, 30, 0).unwrap()));
    a.companies_mentioned = vec!["OpenAI".to_string(), "Microsoft".to_string()];
    a.summary = "Summary text".to_string();
    let report = report(&[a], 30);
    let generated_at = Utc.with_ymd_and_hms(2026, 10, 19, 12, 0, 0).unwrap();

    let rendered = json::render(&report, generated_at).unwrap();
    let value: serde_json::Value = serde_json::from_str(&rendered).unwrap();

    assert_eq!(value["total_articles"], 1);
    assert!(value["generated_at"].as_str().unwrap().starts_with("2026-10-19T12:00:00"));
    let first = &value["articles"][0];
    assert_eq!(first["title"], "GPT news");
    assert_eq!(first["ai_relevance_score"], 85);
    assert_eq!(first["companies_mentioned"], "OpenAI, Microsoft");
    assert_eq!(first["summary"], "Summary text");
    assert!(first["published_date"].as_str().unwrap().starts_with("2026-10-18T09:30:00"));
    assert_eq!(value["company_counts"]["OpenAI"], 1);
}

#[test]
fn test_deserialized_scores_stay_in_range() {
    let a = article("Stored story", 85, Some(days_ago(1)));
    let mut value = serde_json::to_value(&a).unwrap();
    assert_eq!(value["ai_relevance_score"], 85);

    let restored: Article = serde_json::from_value(value.clone()).unwrap();
    assert_eq!(restored.ai_relevance_score.value(), 85);

    value["ai_relevance_score"] = serde_json::json!(250);
    assert!(serde_json::from_value::<Article>(value).is_err());

    assert!(serde_json::from_str::<RelevanceScore>("100").is_ok());
    assert!(serde_json::from_str::<RelevanceScore>("101").is_err());
}

#[test]
fn test_csv_has_header_even_when_empty() {
    let empty = report(&[], 30);
    let rendered = csv::render(&empty);
    assert_eq!(rendered.lines().count(), 1);
    assert!(rendered.starts_with("title,link,published_date,ai_relevance_score,companies_mentioned,summary"));
}

#[test]
fn test_csv_quotes_special_fields() {
    let mut a = article("Comma, \"quoted\" title", 70, None);
    a.companies_mentioned = vec!["OpenAI".to_string(), "Anthropic".to_string()];
    let rendered = csv::render(&report(&[a], 0));

    let row = rendered.lines().nth(1).unwrap();
    assert!(row.starts_with("\"Comma, \"\"quoted\"\" title\","));
    assert!(row.contains("\"OpenAI, Anthropic\""));
    assert_eq!(csv::escape_field("plain"), "plain");
    assert_eq!(csv::escape_field("two\nlines"), "\"two\nlines\"");
}

#[test]
fn test_html_escapes_and_lists_tables() {
    let mut a = article("<script>alert('x')</script> & AI", 75, Some(days_ago(1)));
    a.companies_mentioned = vec!["NVIDIA".to_string()];
    a.summary = "word ".repeat(300);
    let report = report(&[a], 30);

    let page = html::render(&report, Utc::now());
    assert!(page.starts_with("<!DOCTYPE html>"));
    assert!(!page.contains("<script>"));
    assert!(page.contains("&lt;script&gt;"));
    assert!(page.contains("Most Mentioned Companies"));
    assert!(page.contains("Articles by Source"));
    assert!(page.contains("Relevance: 75/100"));
    assert!(page.contains("..."));
}

#[test]
fn test_console_lists_top_articles_and_warnings() {
    let articles: Vec<_> = (0..15)
        .map(|i| article(&format!("Story {}", i), 40 + i as u8, Some(days_ago(1))))
        .collect();
    let report = report(&articles, 30);

    let outcome = WalkOutcome {
        articles: articles.clone(),
        warnings: vec![RunWarning::feed_unavailable(
            "https://down.example/feed",
            &TrackerError::FeedUnavailable {
                url: "https://down.example/feed".to_string(),
                reason: "HTTP 503".to_string(),
            },
        )],
        entries_seen: 15,
        feeds_processed: 1,
        feeds_failed: 1,
    };

    let text = console::render(&report, &outcome, 10);
    assert!(text.contains("Top 10 AI articles"));
    assert!(text.contains("1. [54/100] Story 14"));
    assert!(text.contains("10. [45/100] Story 5"));
    assert!(!text.contains("11. "));
    assert!(text.contains("Warnings (1)"));
    assert!(text.contains("https://down.example/feed"));
}

#[test]
fn test_console_handles_empty_report() {
    let text = console::render(&report(&[], 30), &WalkOutcome::default(), 10);
    assert!(text.contains("No AI articles found"));
}

#[test]
fn test_write_exports_overwrites_files() {
    common::init_tracing();

    let dir = tempfile::tempdir().unwrap();
    let first = report(&[article("First run", 90, Some(days_ago(1)))], 30);
    let second = report(&[], 30);

    let written = render::write_exports(&first, OutputFormat::All, dir.path(), Utc::now()).unwrap();
    assert_eq!(written.len(), 3);
    assert!(dir.path().join(render::JSON_FILENAME).exists());
    assert!(dir.path().join(render::CSV_FILENAME).exists());
    assert!(dir.path().join(render::HTML_FILENAME).exists());

    render::write_exports(&second, OutputFormat::Json, dir.path(), Utc::now()).unwrap();
    let content = std::fs::read_to_string(dir.path().join(render::JSON_FILENAME)).unwrap();
    let value: serde_json::Value = serde_json::from_str(&content).unwrap();
    assert_eq!(value["total_articles"], 0);
}

#[test]
fn test_write_exports_reports_unwritable_directory() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, "file in the way").unwrap();

    let result = render::write_exports(&report(&[], 0), OutputFormat::Csv, &blocker, Utc::now());
    assert!(matches!(result, Err(TrackerError::Configuration(_))));
}
