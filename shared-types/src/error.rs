use std::path::PathBuf;

/// Errors raised while validating inputs or writing the output table
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    #[error("Invalid accession: {0}")]
    InvalidAccession(String),

    #[error("Invalid standard type: {0}")]
    InvalidStandardType(String),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Failed to write {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
