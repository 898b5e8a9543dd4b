use std::path::PathBuf;
use thiserror::Error;

/// The main error type for ppe-audit operations.
///
/// Only the outer surface (files, provider payloads, configuration) can
/// fail. Parsing, matching and aggregation over well-typed values are total.
#[derive(Debug, Error)]
pub enum PpeAuditError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Failed to parse detection document {path}: {source}")]
    DetectionParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("Failed to parse config {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("Invalid config: {0}")]
    InvalidConfig(String),

    #[error("Failed to serialize report: {0}")]
    ReportWrite(#[source] serde_json::Error),

    #[error("Unsupported output: {0}")]
    UnsupportedOutput(String),
}
