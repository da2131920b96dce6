//! Report export — filename derivation and markdown/JSON serialization to disk.

use std::path::{Path, PathBuf};

use bytes::Bytes;
use chrono::{DateTime, TimeZone};
use tracing::debug;

use crate::errors::AppError;
use crate::models::interview::AssessmentResult;

pub mod markdown;

pub use markdown::render_markdown;

pub const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";
const FILENAME_TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExportFormat {
    Markdown,
    Json,
    Pdf,
}

impl ExportFormat {
    pub fn parse(raw: &str) -> Result<Self, AppError> {
        match raw {
            "markdown" => Ok(Self::Markdown),
            "json" => Ok(Self::Json),
            "pdf" => Ok(Self::Pdf),
            other => Err(AppError::InvalidFormat(format!(
                "Invalid format '{other}'; expected one of: markdown, json, pdf"
            ))),
        }
    }
}

/// A report written to disk, ready to stream back.
#[derive(Debug)]
pub struct ReportFile {
    pub path: PathBuf,
    pub download_name: String,
    pub content_type: &'static str,
    pub body: Bytes,
}

/// `Interview_Assessment_{name}_{position}_{yyyyMMdd_HHmmss}`.
pub fn report_filename<Tz>(candidate_name: &str, position: &str, created_at: &DateTime<Tz>) -> String
where
    Tz: TimeZone,
    Tz::Offset: std::fmt::Display,
{
    format!(
        "Interview_Assessment_{}_{}_{}",
        filename_component(candidate_name),
        filename_component(position),
        created_at.format(FILENAME_TIMESTAMP_FORMAT)
    )
}

/// Spaces become underscores; so does anything that could escape the reports
/// directory or is rejected by common filesystems.
fn filename_component(raw: &str) -> String {
    raw.trim()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' | ':' | '*' | '?' | '"' | '<' | '>' | '|' => '_',
            c if c.is_control() => '_',
            c => c,
        })
        .collect::<String>()
        .replace("..", "_")
}

/// Serializes `result` in `format`, writes it under `dir`, and returns the bytes.
pub async fn export_report(
    dir: &Path,
    result: &AssessmentResult,
    format: ExportFormat,
) -> Result<ReportFile, AppError> {
    let (extension, content_type, body) = match format {
        ExportFormat::Markdown => (
            "md",
            "text/markdown; charset=utf-8",
            render_markdown(result).into_bytes(),
        ),
        ExportFormat::Json => (
            "json",
            "application/json",
            serde_json::to_vec_pretty(result).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to serialize assessment: {e}"))
            })?,
        ),
        ExportFormat::Pdf => {
            return Err(AppError::NotImplemented(
                "PDF export is not available; download markdown or json instead".to_string(),
            ))
        }
    };

    tokio::fs::create_dir_all(dir).await?;

    let download_name = format!("{}.{extension}", result.filename);
    let path = dir.join(&download_name);
    tokio::fs::write(&path, &body).await?;
    debug!("Wrote {} bytes to {}", body.len(), path.display());

    Ok(ReportFile {
        path,
        download_name,
        content_type,
        body: Bytes::from(body),
    })
}
