//! Error types for engine setup and control-surface input.
//!
//! Nothing on the audio path returns an error; these come from `prepare`,
//! string-keyed writes and config loading.

use std::path::PathBuf;

use ambit_core::SpecProblem;
use thiserror::Error;

/// Errors from engine setup and external parameter input.
#[derive(Debug, Error)]
pub enum EngineError {
    /// `prepare` was given a sample rate, block size or channel count it cannot run.
    #[error("invalid process spec: {0}")]
    InvalidSpec(#[from] SpecProblem),

    /// A string key that names no parameter.
    #[error("unknown parameter: {0}")]
    UnknownParameter(String),

    /// A value string that cannot be read for its parameter.
    #[error("invalid value '{value}' for parameter {key}")]
    InvalidValue {
        /// Parameter key.
        key: &'static str,
        /// The rejected input.
        value: String,
    },

    /// Failed to read a config file.
    #[error("failed to read config '{path}': {source}")]
    ReadConfig {
        /// Path of the file that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for [`EngineConfig`](crate::EngineConfig).
    #[error("failed to parse config: {0}")]
    ParseConfig(#[from] toml::de::Error),
}

impl EngineError {
    /// Create a read-config error.
    pub fn read_config(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        EngineError::ReadConfig {
            path: path.into(),
            source,
        }
    }
}

/// Result alias for engine operations.
pub type Result<T> = std::result::Result<T, EngineError>;
