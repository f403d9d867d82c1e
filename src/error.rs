//! Error taxonomy for the run-and-plot pipeline.

use std::path::PathBuf;
use std::time::Duration;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, UqError>;

#[derive(Debug, Error)]
pub enum UqError {
    #[error("case number must be in 1..=7, got {0}")]
    InvalidCase(i64),

    #[error("failed to spawn shell for `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("simulation exited with {status}: `{command}`")]
    SimulationFailed { command: String, status: String },

    #[error("simulation did not finish within {limit:?}: `{command}`")]
    Timeout { command: String, limit: Duration },

    #[error("cannot read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed table '{}' at line {line}: {reason}", .path.display())]
    MalformedTable {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("table '{}' contains no data rows", .path.display())]
    EmptyTable { path: PathBuf },

    #[error("time table '{}' must be a single row or column, got {rows}x{cols}", .path.display())]
    NotAVector {
        path: PathBuf,
        rows: usize,
        cols: usize,
    },

    #[error("'{name}' is {rows}x{cols} but the time vector has {steps} steps")]
    ShapeMismatch {
        name: String,
        rows: usize,
        cols: usize,
        steps: usize,
    },

    #[error("failed to render '{}': {message}", .path.display())]
    Plot { path: PathBuf, message: String },

    #[error("failed to open viewer `{viewer}`: {source}")]
    Viewer {
        viewer: String,
        #[source]
        source: std::io::Error,
    },

    #[error("unsupported image format '{0}' (expected png or svg)")]
    InvalidFormat(String),
}

impl UqError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
