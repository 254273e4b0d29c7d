// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Shader compilation with the bundled `glslc`.
//!
//! ```text
//! <source_dir>/shader.vert --glslc--> <dest>/Shaders/shader.vert.spv
//! <source_dir>/shader.frag --glslc--> <dest>/Shaders/shader.frag.spv
//!
//! Windows host: `\`-joined paths, compiler gets `.exe`
//! other hosts:  `/`-joined paths
//! ```

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};

use super::{BoxFuture, Tool, ToolContext, ToolOutcome, execute};
use crate::core::process::ToolCommand;
use crate::error::Result;
use crate::platform::OsFamily;

/// Directory under the staging tree receiving compiled shaders.
pub const SHADERS_DIR: &str = "Shaders";

/// One compiler call, rendered for a host OS.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderInvocation {
    program: String,
    source: String,
    output: String,
}

impl ShaderInvocation {
    /// Builds the call compiling `source` into `<destination_root>/Shaders/<file>.spv`.
    #[must_use]
    pub fn new(host: OsFamily, compiler: &Path, source: &Path, destination_root: &Path) -> Self {
        let file_name = source
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let output = destination_root
            .join(SHADERS_DIR)
            .join(format!("{file_name}.spv"));

        let mut program = render(host, compiler);
        if host == OsFamily::Windows
            && !Path::new(&program)
                .extension()
                .is_some_and(|ext| ext.eq_ignore_ascii_case("exe"))
        {
            program.push_str(".exe");
        }

        Self {
            program,
            source: render(host, source),
            output: render(host, &output),
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn output(&self) -> &str {
        &self.output
    }

    /// Arguments after the compiler: `<source> -o <output>`.
    #[must_use]
    pub fn arguments(&self) -> [&str; 3] {
        [self.source.as_str(), "-o", self.output.as_str()]
    }

    /// The full invocation string.
    #[must_use]
    pub fn command_line(&self) -> String {
        format!("{} {} -o {}", self.program, self.source, self.output)
    }
}

fn render(host: OsFamily, path: &Path) -> String {
    let text = path.display().to_string();
    match host {
        OsFamily::Windows => text.replace('/', "\\"),
        OsFamily::MacOs | OsFamily::Linux => text,
    }
}

/// Compiles every configured shader source into the staging tree.
///
/// # Example
///
/// ```ignore
/// let tool = ShaderCompilerTool::new()
///     .compiler("Core/Rendering/Shading/Compilers/glslc")
///     .add_source("Core/Rendering/Shading/Shaders/shader.vert")
///     .destination_root("bin/Release/net6.0/osx-x64/publish");
/// tool.run(&ctx).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ShaderCompilerTool {
    compiler: Option<PathBuf>,
    sources: Vec<PathBuf>,
    destination_root: Option<PathBuf>,
    host: OsFamily,
}

impl Default for ShaderCompilerTool {
    fn default() -> Self {
        Self::new()
    }
}

impl ShaderCompilerTool {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            compiler: None,
            sources: Vec::new(),
            destination_root: None,
            host: OsFamily::host(),
        }
    }

    #[must_use]
    pub fn compiler(mut self, path: impl AsRef<Path>) -> Self {
        self.compiler = Some(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn add_source(mut self, path: impl AsRef<Path>) -> Self {
        self.sources.push(path.as_ref().to_path_buf());
        self
    }

    #[must_use]
    pub fn sources(mut self, paths: impl IntoIterator<Item = impl AsRef<Path>>) -> Self {
        self.sources = paths
            .into_iter()
            .map(|p| p.as_ref().to_path_buf())
            .collect();
        self
    }

    #[must_use]
    pub fn destination_root(mut self, path: impl AsRef<Path>) -> Self {
        self.destination_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Overrides the OS whose invocation syntax is used.
    #[must_use]
    pub const fn host(mut self, host: OsFamily) -> Self {
        self.host = host;
        self
    }

    /// One invocation per source, in source order.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler or destination root is unset.
    pub fn invocations(&self) -> Result<Vec<ShaderInvocation>> {
        let compiler = self
            .compiler
            .as_ref()
            .context("ShaderCompilerTool: compiler is required")?;
        let destination = self
            .destination_root
            .as_ref()
            .context("ShaderCompilerTool: destination_root is required")?;

        Ok(self
            .sources
            .iter()
            .map(|source| ShaderInvocation::new(self.host, compiler, source, destination))
            .collect())
    }

    /// Runs every invocation, applying the failure policy to each.
    ///
    /// # Errors
    ///
    /// Returns an error if the compiler cannot be started, the run is
    /// interrupted, or a compilation fails under the strict policy.
    pub async fn compile(&self, ctx: &ToolContext) -> Result<Vec<ToolOutcome>> {
        let invocations = self.invocations()?;
        let destination = self
            .destination_root
            .as_ref()
            .context("ShaderCompilerTool: destination_root is required")?
            .join(SHADERS_DIR);

        if ctx.is_dry_run() {
            info!(dir = %destination.display(), "[dry-run] would create shader directory");
            for invocation in &invocations {
                info!(cmd = %invocation.command_line(), "[dry-run] would compile shader");
            }
            return Ok(invocations.iter().map(|_| ToolOutcome::skipped()).collect());
        }

        tokio::fs::create_dir_all(&destination)
            .await
            .with_context(|| format!("failed to create directory {}", destination.display()))?;

        let mut outcomes = Vec::with_capacity(invocations.len());
        for invocation in &invocations {
            debug!(cmd = %invocation.command_line(), "compiling shader");
            let command = ToolCommand::new(invocation.program()).args(invocation.arguments());
            let outcome = execute(self.name(), command, ctx)
                .await?
                .enforce(self.name(), ctx)?;
            if outcome.success() {
                info!(output = %invocation.output(), "shader compiled");
            }
            outcomes.push(outcome);
        }
        Ok(outcomes)
    }
}

impl Tool for ShaderCompilerTool {
    fn name(&self) -> &'static str {
        "glslc"
    }

    /// Folds the per-shader outcomes: the first failing exit code and all
    /// stderr text.
    fn run<'a>(&'a self, ctx: &'a ToolContext) -> BoxFuture<'a, Result<ToolOutcome>> {
        Box::pin(async move {
            let outcomes = self.compile(ctx).await?;
            let exit_code = outcomes
                .iter()
                .map(ToolOutcome::exit_code)
                .find(|code| *code != 0)
                .unwrap_or(0);
            let stderr = outcomes
                .iter()
                .map(ToolOutcome::stderr)
                .filter(|s| !s.is_empty())
                .collect::<Vec<_>>()
                .join("\n");
            Ok(ToolOutcome::new(exit_code, stderr))
        })
    }
}

#[cfg(test)]
mod tests;
