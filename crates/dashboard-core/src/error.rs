use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the consumption dashboard.
#[derive(Error, Debug)]
pub enum DashboardError {
    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// A daily record violates the data contract (duplicate date, duplicate
    /// model within a day, blank model name).
    #[error("Invalid record: {0}")]
    InvalidRecord(String),

    /// A plan multiplier is negative or not a finite number.
    #[error("Invalid multiplier for {key}: {value}")]
    InvalidMultiplier { key: String, value: f64 },

    /// The export action was requested for an empty selection.
    #[error("No data to export for the selected period")]
    NothingToExport,

    /// The export artifact could not be written.
    #[error("Failed to write export {path}: {source}")]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

/// Convenience alias used throughout the dashboard crates.
pub type Result<T> = std::result::Result<T, DashboardError>;
