// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Release assembly: the state machine driving one export.
//!
//! ```text
//! Idle -> Validating -> Cleaning -> Building -> Staging -> CompilingShaders
//!      -> ResolvingNatives -> Pruning -> Finalizing -> Done
//!
//! any stage --error/Ctrl-C--> Aborted   (partial tree stays on disk,
//!                                        the next Cleaning removes it)
//! ```
//!
//! Each stage runs inside `info_span!("stage")`. With a dry-run context every
//! stage only logs `[dry-run]` actions.

pub mod assets;
pub mod launcher;
pub mod natives;
pub mod prune;


use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{Instrument, error, info, info_span, warn};

use crate::config::Config;
use crate::config::paths::ReleasePaths;
use crate::error::{PipelineError, Result};
use crate::platform::{OsFamily, PlatformCatalog, PlatformIdentifier};
use crate::tools::dotnet::PublishTool;
use crate::tools::glslc::ShaderCompilerTool;
use crate::tools::{Tool, ToolContext};
use crate::utility::fs::relocate::move_dir;
use crate::utility::fs::remove::remove_dir_if_exists;

use assets::StageReport;
use natives::NativesReport;

/// What to export and where.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleaseRequest {
    /// Platform identifier, without leading dashes.
    pub platform: String,
    /// Existing directory receiving the final folder.
    pub output_root: PathBuf,
}

impl ReleaseRequest {
    pub fn new(platform: impl Into<String>, output_root: impl Into<PathBuf>) -> Self {
        Self {
            platform: platform.into(),
            output_root: output_root.into(),
        }
    }
}

/// Pipeline states, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Validating,
    Cleaning,
    Building,
    Staging,
    CompilingShaders,
    ResolvingNatives,
    Pruning,
    Finalizing,
    Done,
    Aborted,
}

impl fmt::Display for PipelineState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::Cleaning => "cleaning",
            Self::Building => "building",
            Self::Staging => "staging",
            Self::CompilingShaders => "compiling-shaders",
            Self::ResolvingNatives => "resolving-natives",
            Self::Pruning => "pruning",
            Self::Finalizing => "finalizing",
            Self::Done => "done",
            Self::Aborted => "aborted",
        };
        f.write_str(name)
    }
}

/// Summary of a finished export.
#[derive(Debug)]
pub struct ReleaseReport {
    pub platform: PlatformIdentifier,
    pub final_dir: PathBuf,
    pub assets: StageReport,
    /// `None` on a dry run.
    pub natives: Option<NativesReport>,
    pub pruned: Vec<PathBuf>,
    pub launcher: Option<PathBuf>,
    pub dry_run: bool,
}

/// Drives one export from validation to the final folder.
pub struct ReleaseAssembler {
    ctx: ToolContext,
    catalog: PlatformCatalog,
    state: PipelineState,
    transitions: Vec<PipelineState>,
}

impl ReleaseAssembler {
    #[must_use]
    pub const fn new(ctx: ToolContext, catalog: PlatformCatalog) -> Self {
        Self {
            ctx,
            catalog,
            state: PipelineState::Idle,
            transitions: Vec::new(),
        }
    }

    #[must_use]
    pub const fn state(&self) -> PipelineState {
        self.state
    }

    /// States entered so far, in order.
    #[must_use]
    pub fn transitions(&self) -> &[PipelineState] {
        &self.transitions
    }

    fn config(&self) -> &Config {
        self.ctx.config()
    }

    fn dry_run(&self) -> bool {
        self.ctx.is_dry_run()
    }

    fn enter(&mut self, state: PipelineState) -> Result<()> {
        if state != PipelineState::Aborted && self.ctx.is_cancelled() {
            return Err(PipelineError::Interrupted {
                stage: state.to_string(),
            }
            .into());
        }
        self.state = state;
        self.transitions.push(state);
        Ok(())
    }

    /// Runs every stage for `request`.
    ///
    /// # Errors
    ///
    /// Returns the `PipelineError` (wrapped in `anyhow`) of the stage that
    /// aborted the run; the assembler is then in `Aborted`.
    pub async fn run(&mut self, request: &ReleaseRequest) -> Result<ReleaseReport> {
        match self.run_stages(request).await {
            Ok(report) => {
                self.state = PipelineState::Done;
                self.transitions.push(PipelineState::Done);
                info!(
                    final_dir = %report.final_dir.display(),
                    dry_run = report.dry_run,
                    "release assembled"
                );
                Ok(report)
            }
            Err(e) => {
                let failed_in = self.state;
                self.state = PipelineState::Aborted;
                self.transitions.push(PipelineState::Aborted);
                error!(stage = %failed_in, error = %format!("{e:#}"), "release aborted");
                Err(e)
            }
        }
    }

    async fn run_stages(&mut self, request: &ReleaseRequest) -> Result<ReleaseReport> {
        self.enter(PipelineState::Validating)?;
        let platform = self.catalog.validate(&request.platform)?;
        let paths = ReleasePaths::new(&self.config().project, &platform, &request.output_root);
        info!(
            platform = %platform,
            os = %platform.os(),
            width = %platform.width(),
            "platform validated"
        );

        self.enter(PipelineState::Cleaning)?;
        self.clean(&paths)
            .instrument(info_span!("stage", name = "cleaning"))
            .await;

        self.enter(PipelineState::Building)?;
        self.build(&platform, &paths)
            .instrument(info_span!("stage", name = "building"))
            .await?;

        self.enter(PipelineState::Staging)?;
        let assets = self
            .stage_assets(&paths)
            .instrument(info_span!("stage", name = "staging"))
            .await?;

        self.enter(PipelineState::CompilingShaders)?;
        self.compile_shaders(&paths)
            .instrument(info_span!("stage", name = "compiling-shaders"))
            .await?;

        self.enter(PipelineState::ResolvingNatives)?;
        let natives = self
            .resolve_natives(&platform, &paths)
            .instrument(info_span!("stage", name = "resolving-natives"))
            .await?;

        self.enter(PipelineState::Pruning)?;
        let pruned = self
            .prune(&paths)
            .instrument(info_span!("stage", name = "pruning"))
            .await?;

        self.enter(PipelineState::Finalizing)?;
        let launcher = self
            .finalize(&platform, &paths, &request.output_root)
            .instrument(info_span!("stage", name = "finalizing"))
            .await?;

        Ok(ReleaseReport {
            platform,
            final_dir: paths.final_dir().to_path_buf(),
            assets,
            natives,
            pruned,
            launcher,
            dry_run: self.dry_run(),
        })
    }

    /// Removes leftovers of earlier runs. Failures are logged, never fatal.
    async fn clean(&self, paths: &ReleasePaths) {
        for dir in [paths.intermediate(), paths.relocated(), paths.final_dir()] {
            if self.dry_run() {
                if dir.exists() {
                    info!(dir = %dir.display(), "[dry-run] would remove");
                }
                continue;
            }
            match remove_dir_if_exists(dir).await {
                Ok(true) => info!(dir = %dir.display(), "removed"),
                Ok(false) => {}
                Err(e) => warn!(dir = %dir.display(), error = %format!("{e:#}"), "cleanup failed"),
            }
        }
    }

    async fn build(&self, platform: &PlatformIdentifier, paths: &ReleasePaths) -> Result<()> {
        let project = &self.config().project;
        PublishTool::new()
            .project_file(paths.project_path(&project.project_file))
            .platform(platform.as_str())
            .configuration(project.configuration)
            .output_dir(paths.staging())
            .run(&self.ctx)
            .await?;
        Ok(())
    }

    async fn stage_assets(&self, paths: &ReleasePaths) -> Result<StageReport> {
        let manifest = &self.config().assets;
        if self.dry_run() {
            assets::stage_dry_run(manifest, paths.project_root(), paths.staging());
            return Ok(StageReport::default());
        }
        assets::stage(manifest, paths.project_root(), paths.staging()).await
    }

    async fn compile_shaders(&self, paths: &ReleasePaths) -> Result<()> {
        let config = self.config();
        let source_dir = paths.project_path(&config.shaders.source_dir);
        ShaderCompilerTool::new()
            .compiler(paths.project_path(&config.tools.shader_compiler))
            .sources(config.shaders.sources.iter().map(|s| source_dir.join(s)))
            .destination_root(paths.staging())
            .run(&self.ctx)
            .await?;
        Ok(())
    }

    async fn resolve_natives(
        &self,
        platform: &PlatformIdentifier,
        paths: &ReleasePaths,
    ) -> Result<Option<NativesReport>> {
        let config = &self.config().natives;
        let selection = natives::resolve(platform.os(), platform.width(), config);

        if self.dry_run() {
            for file in &selection.files {
                info!(bundle = %selection.bundle, file = %file.display(), "[dry-run] would copy native library");
            }
            return Ok(None);
        }

        let report =
            natives::copy_selection(&selection, &paths.project_path(&config.root), paths.staging())
                .await?;
        Ok(Some(report))
    }

    async fn prune(&self, paths: &ReleasePaths) -> Result<Vec<PathBuf>> {
        let set = prune::compile_patterns(&self.config().prune.patterns)?;
        if self.dry_run() {
            let matching = set.matching_files(paths.staging()).await?;
            for path in &matching {
                info!(path = %path.display(), "[dry-run] would prune");
            }
            return Ok(Vec::new());
        }
        set.prune(paths.staging()).await
    }

    /// Writes the launcher, moves the staged tree into the output root under
    /// its final name and drops the intermediate directory.
    async fn finalize(
        &self,
        platform: &PlatformIdentifier,
        paths: &ReleasePaths,
        output_root: &Path,
    ) -> Result<Option<PathBuf>> {
        let config = self.config();

        if !output_root.is_dir() {
            return Err(PipelineError::RelocationFailure {
                destination: output_root.to_path_buf(),
                message: "not an existing directory".to_string(),
            }
            .into());
        }

        let wants_launcher = platform.os() == OsFamily::Windows && config.launcher.enabled;

        if self.dry_run() {
            if wants_launcher {
                info!(file = %config.launcher.file_name, "[dry-run] would write launcher");
            }
            info!(
                from = %paths.staging().display(),
                to = %paths.final_dir().display(),
                "[dry-run] would move release"
            );
            return Ok(None);
        }

        let launcher = if wants_launcher {
            let path = launcher::write_launcher(
                paths.staging(),
                &config.launcher.file_name,
                &config.project.binary_name,
            )
            .await?;
            info!(path = %path.display(), "launcher written");
            Some(path)
        } else {
            None
        };

        relocate(paths.staging(), paths.relocated()).await?;
        relocate(paths.relocated(), paths.final_dir()).await?;

        if let Err(e) = remove_dir_if_exists(paths.intermediate()).await {
            warn!(
                dir = %paths.intermediate().display(),
                error = %format!("{e:#}"),
                "could not remove intermediate build directory"
            );
        }

        Ok(launcher.map(|path| {
            path.file_name()
                .map_or_else(|| path.clone(), |name| paths.final_dir().join(name))
        }))
    }
}

async fn relocate(from: &Path, to: &Path) -> Result<()> {
    move_dir(from, to)
        .await
        .map_err(|e| PipelineError::RelocationFailure {
            destination: to.to_path_buf(),
            message: format!("{e:#}"),
        })?;
    Ok(())
}
