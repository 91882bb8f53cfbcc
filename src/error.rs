use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while loading inputs or writing output.
///
/// Parsing itself never fails: a malformed line is reported as "not an entry"
/// and a malformed citation simply ends the citation list.
#[derive(Debug, Error)]
pub enum ScanError {
    #[error("failed to read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write {path:?}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse YAML document {path:?}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },

    #[error("failed to serialize page {page}: {source}")]
    Json {
        page: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("abbreviation record {heading:?} has no spellings")]
    EmptyRecord { heading: String },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ScanError>;
