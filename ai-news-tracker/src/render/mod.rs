//! Output renderers. Each one is a pure projection of a [`Report`].

pub mod console;
pub mod csv;
pub mod html;
pub mod json;

use chrono::{DateTime, Utc};
use clap::ValueEnum;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::aggregator::Report;
use crate::types::{Result, TrackerError};

pub const JSON_FILENAME: &str = "ai_news.json";
pub const CSV_FILENAME: &str = "ai_news.csv";
pub const HTML_FILENAME: &str = "ai_news_report.html";

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Json,
    Csv,
    Html,
    All,
}

impl OutputFormat {
    pub fn includes_json(self) -> bool {
        matches!(self, OutputFormat::Json | OutputFormat::All)
    }

    pub fn includes_csv(self) -> bool {
        matches!(self, OutputFormat::Csv | OutputFormat::All)
    }

    pub fn includes_html(self) -> bool {
        matches!(self, OutputFormat::Html | OutputFormat::All)
    }
}

/// Write the selected exports into `output_dir`, replacing earlier files.
pub fn write_exports(
    report: &Report,
    format: OutputFormat,
    output_dir: &Path,
    generated_at: DateTime<Utc>,
) -> Result<Vec<PathBuf>> {
    fs::create_dir_all(output_dir).map_err(|e| {
        TrackerError::Configuration(format!(
            "cannot create output directory {}: {}",
            output_dir.display(),
            e
        ))
    })?;

    let mut written = Vec::new();
    if format.includes_json() {
        let content = json::render(report, generated_at)?;
        written.push(write_file(output_dir, JSON_FILENAME, &content)?);
    }
    if format.includes_csv() {
        written.push(write_file(output_dir, CSV_FILENAME, &csv::render(report))?);
    }
    if format.includes_html() {
        let content = html::render(report, generated_at);
        written.push(write_file(output_dir, HTML_FILENAME, &content)?);
    }
    Ok(written)
}

fn write_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let path = dir.join(filename);
    fs::write(&path, content).map_err(|e| {
        TrackerError::Configuration(format!("cannot write {}: {}", path.display(), e))
    })?;
    info!("Wrote {} ({} bytes)", path.display(), content.len());
    Ok(path)
}
