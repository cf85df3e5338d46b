use std::path::PathBuf;
use thiserror::Error;

/// All errors produced by the energy pipeline.
#[derive(Error, Debug)]
pub enum EnergyError {
    /// A discovered source vanished before it could be read.
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    /// A source's content could not be read as tabular data at all.
    #[error("Failed to read source {path}: {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A required column is absent, so the whole source is rejected.
    #[error("Source {path} is missing required column \"{column}\"")]
    SchemaMissingColumn { path: PathBuf, column: &'static str },

    /// A timestamp string did not match any recognised layout.
    #[error("Invalid timestamp: {0}")]
    TimestampParse(String),

    /// The source root is absent, empty, or every source was rejected.
    #[error("No usable meter data found in {0}")]
    NoDataAvailable(PathBuf),

    /// Dashboard chart rendering failed.
    #[error("Dashboard rendering failed: {0}")]
    Chart(String),

    /// Pass-through for raw I/O errors that do not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Pass-through for CSV errors raised while writing exports.
    #[error(transparent)]
    Csv(#[from] csv::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the workspace.
pub type Result<T> = std::result::Result<T, EnergyError>;
