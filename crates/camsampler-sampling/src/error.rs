//! Error types for the sampling crate.
//!
//! Every failure is fatal for the sampling call that raised it; there is no
//! partial-result recovery.

use std::io;
use std::path::{Path, PathBuf};
use std::process::ExitStatus;
use thiserror::Error;

/// Errors that can occur while exchanging data with the external sampler.
#[derive(Error, Debug)]
pub enum SamplingError {
    /// An exchange file could not be created, read or written.
    #[error("I/O error on {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A result line could not be parsed.
    #[error("Parse error in {path:?} line {line}: {reason}")]
    Parse {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    /// A result file ended before every requested point had a value.
    #[error("Missing samples in {path:?}: expected {expected}, found {found}")]
    MissingSample {
        path: PathBuf,
        expected: usize,
        found: usize,
    },

    /// A resample request does not fit the chunks it refers to.
    #[error("Invalid resample request #{index}: {reason}")]
    InvalidRequest { index: usize, reason: String },

    /// The sampler process could not be started.
    #[error("Failed to start sampler {program:?}: {source}")]
    Spawn {
        program: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The sampler process exited unsuccessfully.
    #[error("Sampler script {script} failed: {status}")]
    ProcessFailed { script: String, status: ExitStatus },

    /// The operation is not usable for sampling.
    #[error(transparent)]
    Operation(#[from] camsampler_core::Error),
}

impl SamplingError {
    pub fn io(path: &Path, source: io::Error) -> Self {
        Self::Io {
            path: path.to_path_buf(),
            source,
        }
    }

    pub fn parse(path: &Path, line: usize, reason: impl Into<String>) -> Self {
        Self::Parse {
            path: path.to_path_buf(),
            line,
            reason: reason.into(),
        }
    }
}

/// Result type alias for sampling operations.
pub type SamplingResult<T> = Result<T, SamplingError>;
