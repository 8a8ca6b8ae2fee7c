//! Centralized error handling for RuSARInfo
//!
//! This module provides the structured error type shared by every reader,
//! walker and reporter in the crate, so that callers can tell a missing input
//! apart from an unreadable container or a file without a declared type.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for RuSARInfo operations
#[derive(Debug, Error)]
pub enum InfoError {
    /// Input path does not exist or is not a regular file
    #[error("input file does not exists: {}", path.display())]
    InputNotFound { path: PathBuf },

    /// Container could not be opened or its header could not be parsed
    #[error("cannot open {}: {source}", path.display())]
    OpenError {
        path: PathBuf,
        #[source]
        source: hdf5::Error,
    },

    /// HDF5 operation errors after the container was opened
    #[error("HDF5 error: {0}")]
    Hdf5Error(#[from] hdf5::Error),

    /// I/O operation errors
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// ISCE sidecar parsing errors
    #[error("XML error: {0}")]
    XmlError(#[from] quick_xml::Error),

    /// The metadata has no `FILE_TYPE` entry
    #[error("FILE_TYPE not found in metadata")]
    MissingTypeError,

    /// Dataset not found in container
    #[error("Dataset '{name}' not found in {}", path.display())]
    DatasetNotFound { path: PathBuf, name: String },

    /// Date string that is neither YYYYMMDD nor YYMMDD
    #[error("Invalid date '{value}': expected YYYYMMDD or YYMMDD")]
    InvalidDate { value: String },

    /// Malformed, inconsistent or missing metadata
    #[error("Invalid metadata in {}: {message}", path.display())]
    MetadataError { path: PathBuf, message: String },

    /// Generic error
    #[error("{0}")]
    Generic(String),
}

impl From<String> for InfoError {
    fn from(error: String) -> Self {
        InfoError::Generic(error)
    }
}

impl From<&str> for InfoError {
    fn from(error: &str) -> Self {
        InfoError::Generic(error.to_string())
    }
}

/// Result type alias for RuSARInfo operations
pub type Result<T> = std::result::Result<T, InfoError>;
