// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! External tools driven by the pipeline.
//!
//! ```text
//! Stage --> ToolContext --> ToolCommand --> dotnet / glslc
//!                                   |
//!                                   v
//!                   ToolOutcome { exit_code, stderr }
//!                                   |
//!            fail_on_tool_error ----+---- keep going
//!                   v                          v
//!         PipelineError::ToolFailed       warn + continue
//! ```
//!
//! All tools support graceful cancellation via `CancellationToken`.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use futures_util::future::BoxFuture;
use tokio_util::sync::CancellationToken;
use tracing::warn;

use crate::config::Config;
use crate::core::process::{Capture, ToolCommand};
use crate::error::{PipelineError, ProcessError, Result};

pub mod dotnet;
pub mod glslc;

/// Context provided to tools during execution.
#[derive(Clone)]
pub struct ToolContext {
    /// Handed to every `ToolCommand::run`.
    cancel_token: CancellationToken,

    /// When true, tools log what they would do without running anything.
    dry_run: bool,

    config: Arc<Config>,
}

impl ToolContext {
    #[must_use]
    pub const fn new(config: Arc<Config>, cancel_token: CancellationToken, dry_run: bool) -> Self {
        Self {
            cancel_token,
            dry_run,
            config,
        }
    }

    #[must_use]
    pub const fn config(&self) -> &Arc<Config> {
        &self.config
    }

    #[must_use]
    pub const fn cancel_token(&self) -> &CancellationToken {
        &self.cancel_token
    }

    #[must_use]
    pub const fn is_dry_run(&self) -> bool {
        self.dry_run
    }

    #[must_use]
    pub fn is_cancelled(&self) -> bool {
        self.cancel_token.is_cancelled()
    }

    /// Resolves a project-relative path against `project.root`.
    #[must_use]
    pub fn project_path(&self, relative: &Path) -> PathBuf {
        self.config.project.root.join(relative)
    }
}

/// Result of running an external tool to completion.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolOutcome {
    exit_code: i32,
    stderr: String,
}

impl ToolOutcome {
    #[must_use]
    pub const fn new(exit_code: i32, stderr: String) -> Self {
        Self { exit_code, stderr }
    }

    /// Outcome of a tool that did not run (dry run).
    #[must_use]
    pub const fn skipped() -> Self {
        Self::new(0, String::new())
    }

    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }

    /// Applies the `pipeline.fail_on_tool_error` policy.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::ToolFailed` for a non-zero exit when the policy
    /// is strict.
    pub fn enforce(self, tool: &str, ctx: &ToolContext) -> Result<Self> {
        if self.success() {
            return Ok(self);
        }
        if ctx.config().pipeline.fail_on_tool_error {
            return Err(PipelineError::ToolFailed {
                tool: tool.to_string(),
                code: self.exit_code,
            }
            .into());
        }
        warn!(
            tool = %tool,
            exit_code = self.exit_code,
            stderr = %self.stderr,
            "tool failed, continuing"
        );
        Ok(self)
    }
}

/// Trait for tools that execute external processes.
///
/// Implementations run through [`execute`] and respect
/// `ctx.is_dry_run()` by only logging.
pub trait Tool: Send + Sync {
    /// Returns the name of this tool (e.g., "dotnet", "glslc").
    fn name(&self) -> &str;

    /// Runs the tool, applying the tool failure policy to its exit status.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<ToolOutcome>>;
}

/// Runs a tool process and turns its exit into a [`ToolOutcome`].
///
/// A process that cannot be started maps to `BuildToolUnavailable`, a
/// cancelled one to `Interrupted`. A run killed after `tools.timeout_secs`
/// reports exit code `-1`. The failure policy is not applied here.
pub(crate) async fn execute(
    tool: &str,
    command: ToolCommand,
    ctx: &ToolContext,
) -> Result<ToolOutcome> {
    let mut command = command
        .label(tool)
        .accept_any_exit()
        .stderr(Capture::LOG | Capture::KEEP);
    if let Some(limit) = ctx.config().tools.timeout() {
        command = command.timeout(limit);
    }

    let output = command
        .run(ctx.cancel_token().clone())
        .await
        .map_err(|e| match e.downcast::<ProcessError>() {
            Ok(ProcessError::SpawnFailed { source, .. }) => {
                PipelineError::BuildToolUnavailable {
                    tool: tool.to_string(),
                    message: source.to_string(),
                }
                .into()
            }
            Ok(other) => anyhow::Error::from(other),
            Err(e) => e,
        })?;

    if output.is_interrupted() {
        return Err(PipelineError::Interrupted {
            stage: tool.to_string(),
        }
        .into());
    }

    Ok(ToolOutcome::new(
        output.exit_code(),
        output.stderr().to_string(),
    ))
}

#[cfg(test)]
pub(crate) mod test_utils;
#[cfg(test)]
mod tests;
