pub mod filter;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub use filter::{LogFilter, UserFilter};

/// File name used when the export endpoint does not suggest one
pub const DEFAULT_EXPORT_FILENAME: &str = "meams_logs.csv";

/// Activity log row as returned by `GET /api/logs`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogEntry {
    #[serde(default)]
    pub id: Option<i64>,
    pub timestamp: String,
    #[serde(default)]
    pub username: String,
    #[serde(default, alias = "action")]
    pub remarks: String,
}

/// Query parameters of `GET /api/logs`; unset fields are left out of the query string
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LogsQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_from: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub date_to: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogsResponse {
    pub success: bool,
    #[serde(default)]
    pub data: Vec<LogEntry>,
    #[serde(default)]
    pub usernames: Option<Vec<String>>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Body of `POST /api/logs/export`; unset fields are sent as `null`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportLogsRequest {
    pub date_from: Option<NaiveDate>,
    pub date_to: Option<NaiveDate>,
    pub username: Option<String>,
    pub search: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportLogsResponse {
    pub success: bool,
    #[serde(default)]
    pub csv_data: String,
    #[serde(default)]
    pub filename: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

impl ExportLogsResponse {
    pub fn download_name(&self) -> &str {
        match self.filename.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name,
            _ => DEFAULT_EXPORT_FILENAME,
        }
    }
}
