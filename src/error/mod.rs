// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//! anyhow::Result  (propagation + context)
//!        |
//!        +-- PipelineError   UnsupportedPlatform, MissingArguments,
//!        |                   BuildToolUnavailable, ToolFailed,
//!        |                   AssetCopyFailure, MissingNativeLibrary,
//!        |                   RelocationFailure, Interrupted
//!        +-- ConfigError     ParseError, InvalidValue
//!        +-- ProcessError    ExecutableNotFound, SpawnFailed, NonZeroExit
//! ```
//!
//! Callers that need to branch on the failure kind use
//! [`anyhow::Error::downcast_ref`]; context layers do not hide the root error.

use std::path::PathBuf;

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Failures of the release pipeline, one per stage that can fail.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// The requested platform is not in the catalog.
    #[error("the platform [{identifier}] is either non-existent or unsupported")]
    UnsupportedPlatform { identifier: String },

    /// The CLI was invoked without both positional arguments.
    #[error("two arguments required: --[PLATFORM] and --[OUTPUT_DIRECTORY]")]
    MissingArguments,

    /// The external build tool could not be located or started.
    #[error("build tool '{tool}' is unavailable: {message}")]
    BuildToolUnavailable { tool: String, message: String },

    /// An external tool ran but reported failure.
    #[error("{tool} exited with code {code}")]
    ToolFailed { tool: String, code: i32 },

    /// An asset directory could not be copied into the staging tree.
    #[error("failed to copy assets from '{}': {message}", source_dir.display())]
    AssetCopyFailure { source_dir: PathBuf, message: String },

    /// A native library selected for the target is missing on disk.
    #[error("native library not found: {}", path.display())]
    MissingNativeLibrary { path: PathBuf },

    /// The staged tree could not be moved into the output root.
    #[error(
        "could not move the export to '{}': {message}; make sure the directory is valid and exists",
        destination.display()
    )]
    RelocationFailure {
        destination: PathBuf,
        message: String,
    },

    /// The run was interrupted by the user.
    #[error("interrupted during {stage}")]
    Interrupted { stage: String },
}

impl PipelineError {
    /// Returns true for errors caused by how the tool was invoked.
    #[must_use]
    pub const fn is_usage_error(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedPlatform { .. } | Self::MissingArguments
        )
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration.
    #[error("failed to parse config '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Process Errors ---

/// Process execution errors.
#[derive(Debug, Error)]
pub enum ProcessError {
    /// Executable not found in PATH.
    #[error("executable not found: '{name}' (not in PATH)")]
    ExecutableNotFound { name: String },

    /// Failed to spawn process.
    #[error("failed to spawn process '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited with a status outside its success set.
    #[error("process '{command}' exited with code {code}")]
    NonZeroExit { command: String, code: i32 },
}

/// Returns the [`PipelineError`] at the root of `err`, if any.
#[must_use]
pub fn pipeline_error(err: &anyhow::Error) -> Option<&PipelineError> {
    err.downcast_ref::<PipelineError>()
}

#[cfg(test)]
mod tests;
