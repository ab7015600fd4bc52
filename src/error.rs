//! Error types for depsupply operations.
//!
//! This module defines [`SupplyError`], the primary error type used throughout
//! the crate, and a [`Result`] type alias for convenience.
//!
//! # Error Handling Strategy
//!
//! - I/O failures while walking the build dir are fatal and carry the offending path
//! - A package manager that exits non-zero is [`SupplyError::CommandFailed`]
//! - A package manager that cannot be started at all is [`SupplyError::Spawn`]
//! - Use `anyhow::Error` (via `SupplyError::Other`) for unexpected errors

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for depsupply operations.
#[derive(Debug, Error)]
pub enum SupplyError {
    /// Configuration file not found at expected location.
    #[error("Configuration not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// Failed to parse configuration file.
    #[error("Failed to parse config at {path}: {message}")]
    ConfigParseError { path: PathBuf, message: String },

    /// Reading an entry of the build dir failed mid-walk.
    #[error("Failed to read {path}: {source}")]
    Traversal {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Package manager ran but exited unsuccessfully.
    #[error("Command failed with exit code {code:?}: {command}")]
    CommandFailed { command: String, code: Option<i32> },

    /// Package manager could not be started.
    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Generic wrapped error for anyhow interop.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl SupplyError {
    /// Wrap an I/O error with the path that produced it.
    pub fn traversal(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Traversal {
            path: path.into(),
            source,
        }
    }
}

/// Result type alias for depsupply operations.
pub type Result<T> = std::result::Result<T, SupplyError>;
