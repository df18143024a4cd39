// src/errors.rs

//! Crate-wide error type and the mapping from errors to process exit codes.

use std::io;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum JobguardError {
    #[error("Configuration error: {0}")]
    ConfigError(String),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// The capture sink could not be created, read or wired to the child.
    #[error("Capture error: {context}: {source}")]
    Capture {
        context: String,
        #[source]
        source: io::Error,
    },

    #[error("Failed to spawn job '{job}': {source}")]
    Spawn {
        job: String,
        #[source]
        source: io::Error,
    },

    /// A termination signal arrived while the child was running.
    #[error("Interrupted by signal {0}")]
    Interrupted(i32),

    #[error("Notification error: {0}")]
    NotifyError(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl JobguardError {
    /// Process exit code to use when the supervisor itself fails.
    ///
    /// Follows shell conventions: 127 for a missing program, 126 for one
    /// that cannot be executed, `128 + N` for signal N.
    pub fn exit_code(&self) -> i32 {
        match self {
            JobguardError::Spawn { source, .. } => match source.kind() {
                io::ErrorKind::NotFound => 127,
                io::ErrorKind::PermissionDenied => 126,
                _ => 1,
            },
            JobguardError::Interrupted(signal) => 128 + signal,
            _ => 1,
        }
    }
}

pub use anyhow::Error;
pub type Result<T> = std::result::Result<T, JobguardError>;
