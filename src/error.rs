//! Error types for the load / filter / aggregate pipeline.
//!
//! Only unrecoverable conditions live here. A city file that lacks an optional
//! column, or a filter that leaves no rows, is reported through
//! [`Stat`](crate::analyzers::types::Stat) instead.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures for a single analysis run.
#[derive(Debug, Error)]
pub enum BikeshareError {
    #[error("unknown city '{0}' (expected one of: chicago, new york city, washington)")]
    UnknownCity(String),

    #[error("failed to read source file {}", .path.display())]
    SourceRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("row {row}: invalid '{column}' value: {message}")]
    Parse {
        row: usize,
        column: &'static str,
        message: String,
    },

    #[error("source is missing required column '{0}'")]
    MissingRequiredColumn(&'static str),

    #[error("malformed CSV")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, BikeshareError>;
