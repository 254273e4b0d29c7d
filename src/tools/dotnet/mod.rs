// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `dotnet publish` wrapper producing the single-file application binary.
//!
//! ```text
//! dotnet publish <project> -r <platform> --configuration <C>
//!   --no-self-contained --output <staging>
//!   /property:PublishSingleFile=True
//!   /property:IncludeNativeLibrariesForSelfExtract=True
//!   /property:SelfContained=False
//!   /property:ReadyToRun=True
//! ```

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext, ToolOutcome, execute};
use crate::config::types::BuildConfiguration;
use crate::core::process::ToolCommand;
use crate::core::process::locate::require_executable;
use crate::error::{PipelineError, Result};

/// MSBuild properties passed to every publish.
const PUBLISH_PROPERTIES: &[&str] = &[
    "/property:PublishSingleFile=True",
    "/property:IncludeNativeLibrariesForSelfExtract=True",
    "/property:SelfContained=False",
    "/property:ReadyToRun=True",
];

/// Publishes the project for one runtime identifier.
///
/// # Example
///
/// ```ignore
/// let tool = PublishTool::new()
///     .project_file("/work/SierraEngine/SierraEngine.csproj")
///     .platform("win-x64")
///     .configuration(BuildConfiguration::Release)
///     .output_dir("/work/SierraEngine/bin/Release/net6.0/win-x64/publish");
/// tool.run(&ctx).await?;
/// ```
#[derive(Debug, Clone, Default)]
pub struct PublishTool {
    project_file: Option<PathBuf>,
    platform: Option<String>,
    configuration: BuildConfiguration,
    output_dir: Option<PathBuf>,
    dotnet_binary: Option<PathBuf>,
}

impl PublishTool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn project_file(mut self, path: impl AsRef<Path>) -> Self {
        self.project_file = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn platform(mut self, platform: impl Into<String>) -> Self {
        self.platform = Some(platform.into());
        self
    }

    #[must_use]
    pub const fn configuration(mut self, configuration: BuildConfiguration) -> Self {
        self.configuration = configuration;
        self
    }

    #[must_use]
    pub fn output_dir(mut self, path: impl AsRef<Path>) -> Self {
        self.output_dir = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn dotnet_binary(mut self, path: impl AsRef<Path>) -> Self {
        self.dotnet_binary = Some(path.as_ref().to_path_buf());
        self
    }

    /// Arguments passed after the `dotnet` executable.
    ///
    /// # Errors
    ///
    /// Returns an error if the project file, platform or output directory is unset.
    pub fn arguments(&self) -> Result<Vec<String>> {
        let project = self
            .project_file
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("PublishTool: project_file is required"))?;
        let platform = self
            .platform
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("PublishTool: platform is required"))?;
        let output = self
            .output_dir
            .as_ref()
            .ok_or_else(|| anyhow::anyhow!("PublishTool: output_dir is required"))?;

        let mut args = vec![
            "publish".to_string(),
            project.display().to_string(),
            "-r".to_string(),
            platform.clone(),
            "--configuration".to_string(),
            self.configuration.to_string(),
            "--no-self-contained".to_string(),
            "--output".to_string(),
            output.display().to_string(),
        ];
        args.extend(PUBLISH_PROPERTIES.iter().map(|p| (*p).to_string()));
        Ok(args)
    }

    /// Locates the dotnet executable: explicit binary, then `tools.dotnet`
    /// (project-relative when it has a directory part), then PATH.
    fn get_dotnet_binary(&self, ctx: &ToolContext) -> Result<PathBuf> {
        if let Some(ref binary) = self.dotnet_binary {
            return Ok(binary.clone());
        }

        let configured = &ctx.config().tools.dotnet;
        let is_bare_name = configured.components().count() == 1 && !configured.is_absolute();

        let unavailable = |message: String| PipelineError::BuildToolUnavailable {
            tool: "dotnet".to_string(),
            message,
        };

        if is_bare_name {
            return require_executable(&configured.to_string_lossy())
                .map_err(|e| unavailable(e.to_string()).into());
        }

        let candidate = if configured.is_absolute() {
            configured.clone()
        } else {
            ctx.project_path(configured)
        };
        if candidate.is_file() {
            Ok(candidate)
        } else {
            Err(unavailable(format!("'{}' was not found", candidate.display())).into())
        }
    }
}

impl Tool for PublishTool {
    fn name(&self) -> &'static str {
        "dotnet"
    }

    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<ToolOutcome>> {
        Box::pin(async move {
            let args = self.arguments()?;

            if ctx.is_dry_run() {
                info!(args = %args.join(" "), "[dry-run] would run dotnet");
                return Ok(ToolOutcome::skipped());
            }

            let dotnet = self.get_dotnet_binary(ctx)?;
            debug!(dotnet = %dotnet.display(), "publishing");

            let command = ToolCommand::new(&dotnet).args(&args);

            let outcome = execute(self.name(), command, ctx).await?;
            let outcome = outcome.enforce(self.name(), ctx)?;

            if outcome.success() {
                info!(platform = ?self.platform, "publish finished");
            }
            Ok(outcome)
        })
    }
}

#[cfg(test)]
mod tests;
