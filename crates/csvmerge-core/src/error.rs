//! Error types for csvmerge-core

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using our Error type
pub type Result<T> = std::result::Result<T, Error>;

/// Fatal errors that abort a merge run.
///
/// Non-fatal conditions (unexpected columns, excluded columns, duplicate
/// values) are never errors; they are collected as messages and reports.
#[derive(Debug, Error)]
pub enum Error {
    /// Config file does not exist
    #[error("config file not found: '{0}'")]
    ConfigNotFound(PathBuf),

    /// Config file exists but could not be read
    #[error("failed to read config '{path}': {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid JSON or has the wrong shape
    #[error("invalid config '{path}': {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Config parsed but violates a column rule
    #[error("invalid config: {0}")]
    ConfigInvalid(String),

    /// Filename has no `_` separator to take a provenance prefix from
    #[error("invalid filename format '{0}': expected '<prefix>_<name>.csv'")]
    InvalidFilenameFormat(String),

    /// Filename prefix is not in the provenance table
    #[error("unknown provenance prefix '{prefix}' in filename '{filename}' (known prefixes: {known})")]
    UnknownProvenancePrefix {
        filename: String,
        prefix: String,
        /// Comma-separated prefixes the table does know
        known: String,
    },

    /// Source file does not exist
    #[error("source file not found: '{0}'")]
    SourceNotFound(PathBuf),

    /// Source file exists but could not be opened
    #[error("failed to read source file '{path}': {source}")]
    SourceUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Source file content is not well-formed CSV
    #[error("malformed CSV in '{path}': {source}")]
    SourceMalformed {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Source file has no header row
    #[error("no columns found in '{0}'")]
    EmptyHeader(PathBuf),

    /// Input directory missing or not traversable
    #[error("failed to read input directory '{path}': {source}")]
    InputDirectory {
        path: PathBuf,
        #[source]
        source: walkdir::Error,
    },

    /// Input directory holds no CSV files
    #[error("no CSV files found in '{0}'")]
    NoInputFiles(PathBuf),

    /// Merge called with an empty file list
    #[error("no input files to merge")]
    EmptyFileList,

    /// Writing the merged output failed
    #[error("failed to write output '{path}': {source}")]
    OutputWrite {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Output directory could not be created
    #[error("failed to create output directory '{path}': {source}")]
    OutputDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    /// True for errors raised while loading configuration, before any
    /// source file is touched.
    pub fn is_config_error(&self) -> bool {
        matches!(
            self,
            Error::ConfigNotFound(_)
                | Error::ConfigRead { .. }
                | Error::ConfigParse { .. }
                | Error::ConfigInvalid(_)
        )
    }
}
