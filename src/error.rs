//! Error types for card_portfolio

use std::path::PathBuf;
use thiserror::Error;

/// Unified error type for portfolio operations
#[derive(Debug, Error)]
pub enum PortfolioError {
    /// Input file or directory does not exist
    #[error("{} does not exist", .path.display())]
    MissingFile { path: PathBuf },

    /// Reading or writing an existing path failed
    #[error("I/O error on {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File could not be read as CSV
    #[error("Error reading {}: {source}", .path.display())]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// A CSV record has more fields than the header
    #[error("Error reading {}: line {line} has {found} fields, header has {expected}", .path.display())]
    TooManyFields {
        path: PathBuf,
        line: u64,
        found: usize,
        expected: usize,
    },

    /// Portfolio CSV could not be written
    #[error("Error writing {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// File could not be parsed as a catalog document
    #[error("Error parsing {}: {source}", .path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Required columns are absent from a loaded table
    #[error("Missing required columns in {}: {}", .path.display(), .columns.join(", "))]
    MissingColumns { path: PathBuf, columns: Vec<String> },

    /// The same card id appears in more than one catalog record
    #[error("Duplicate card id in catalog: {id}")]
    DuplicateCatalogId { id: String },
}

impl PortfolioError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PortfolioError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn csv(path: impl Into<PathBuf>, source: csv::Error) -> Self {
        PortfolioError::Csv {
            path: path.into(),
            source,
        }
    }

    /// True for malformed CSV or JSON content
    pub fn is_parse_error(&self) -> bool {
        matches!(
            self,
            PortfolioError::Csv { .. }
                | PortfolioError::Json { .. }
                | PortfolioError::TooManyFields { .. }
        )
    }

    /// True when the data is readable but structurally unusable
    pub fn is_schema_error(&self) -> bool {
        matches!(
            self,
            PortfolioError::MissingColumns { .. } | PortfolioError::DuplicateCatalogId { .. }
        )
    }
}

/// Result alias for card_portfolio operations
pub type Result<T> = std::result::Result<T, PortfolioError>;
