// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for sierra-export.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. sierra-export.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. CLI overrides
//! ```
//!
//! # Example
//!
//! ```toml
//! [project]
//! root = ".."
//! base_name = "Sierra Engine Game"
//!
//! [[assets]]
//! source = "Core/Rendering/Textures"
//! destination = "Textures"
//!
//! [[platforms]]
//! id = "win-x64"
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::Result;
use crate::platform::PlatformCatalog;

use loader::ConfigLoader;
use types::{
    AssetEntry, GlobalConfig, LauncherConfig, NativesConfig, PipelineConfig, PlatformEntry,
    ProjectConfig, PruneConfig, ShadersConfig, ToolsConfig, default_assets,
};

/// Complete application configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// The project being packaged.
    pub project: ProjectConfig,
    /// External tools.
    pub tools: ToolsConfig,
    /// Shader sources.
    pub shaders: ShadersConfig,
    /// Asset manifest.
    pub assets: Vec<AssetEntry>,
    /// Native library bundles.
    pub natives: NativesConfig,
    /// Files stripped before relocation.
    pub prune: PruneConfig,
    /// Windows launcher script.
    pub launcher: LauncherConfig,
    /// Pipeline policy.
    pub pipeline: PipelineConfig,
    /// Platform table; empty means the built-in table.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub platforms: Vec<PlatformEntry>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            global: GlobalConfig::default(),
            project: ProjectConfig::default(),
            tools: ToolsConfig::default(),
            shaders: ShadersConfig::default(),
            assets: default_assets(),
            natives: NativesConfig::default(),
            prune: PruneConfig::default(),
            launcher: LauncherConfig::default(),
            pipeline: PipelineConfig::default(),
            platforms: Vec::new(),
        }
    }
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use sierra_export::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file("export.toml")
    ///     .add_toml_file_optional("sierra-export.toml")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Builds the platform catalog from `[[platforms]]`, falling back to the
    /// built-in table.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` for empty or duplicate platform ids.
    pub fn catalog(&self) -> Result<PlatformCatalog> {
        if self.platforms.is_empty() {
            return Ok(PlatformCatalog::builtin());
        }
        Ok(PlatformCatalog::from_entries(&self.platforms)?)
    }

    /// Validates the parts of the config that serde cannot.
    ///
    /// # Errors
    ///
    /// Returns an error if the platform table or the prune patterns are invalid.
    pub fn validate(&self) -> Result<()> {
        self.catalog()?;
        crate::pipeline::prune::compile_patterns(&self.prune.patterns)?;
        Ok(())
    }

    /// Format configuration options for display, one `key = value` per line.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        let path = |p: &Path| p.display().to_string();
        let paths = |ps: &[std::path::PathBuf]| {
            ps.iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };

        options.insert("global.dry".to_string(), self.global.dry.to_string());
        options.insert(
            "global.output_log_level".to_string(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".to_string(),
            self.global.file_log_level.as_u8().to_string(),
        );

        options.insert("project.root".to_string(), path(&self.project.root));
        options.insert(
            "project.project_file".to_string(),
            path(&self.project.project_file),
        );
        options.insert(
            "project.binary_name".to_string(),
            self.project.binary_name.clone(),
        );
        options.insert(
            "project.base_name".to_string(),
            self.project.base_name.clone(),
        );
        options.insert(
            "project.framework".to_string(),
            self.project.framework.clone(),
        );
        options.insert(
            "project.configuration".to_string(),
            self.project.configuration.to_string(),
        );

        options.insert("tools.dotnet".to_string(), path(&self.tools.dotnet));
        options.insert(
            "tools.shader_compiler".to_string(),
            path(&self.tools.shader_compiler),
        );
        options.insert(
            "tools.timeout_secs".to_string(),
            self.tools
                .timeout()
                .map_or_else(|| "none".to_string(), |t| t.as_secs().to_string()),
        );

        options.insert(
            "shaders.source_dir".to_string(),
            path(&self.shaders.source_dir),
        );
        options.insert("shaders.sources".to_string(), self.shaders.sources.join(", "));

        for (i, entry) in self.assets.iter().enumerate() {
            options.insert(
                format!("assets.{i}"),
                format!(
                    "{} -> {}",
                    entry.source.display(),
                    entry.destination.display()
                ),
            );
        }

        options.insert("natives.root".to_string(), path(&self.natives.root));
        options.insert("natives.shared".to_string(), paths(&self.natives.shared));
        options.insert(
            "natives.windows_x64".to_string(),
            paths(&self.natives.windows_x64),
        );
        options.insert(
            "natives.windows_other".to_string(),
            paths(&self.natives.windows_other),
        );
        options.insert("natives.macos".to_string(), paths(&self.natives.macos));
        options.insert("natives.linux".to_string(), paths(&self.natives.linux));

        options.insert("prune.patterns".to_string(), self.prune.patterns.join(", "));
        options.insert(
            "launcher.enabled".to_string(),
            self.launcher.enabled.to_string(),
        );
        options.insert(
            "launcher.file_name".to_string(),
            self.launcher.file_name.clone(),
        );
        options.insert(
            "pipeline.fail_on_tool_error".to_string(),
            self.pipeline.fail_on_tool_error.to_string(),
        );
        options.insert(
            "platforms".to_string(),
            if self.platforms.is_empty() {
                "[built-in]".to_string()
            } else {
                self.platforms.len().to_string()
            },
        );

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
