// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration types for sierra-export.
//!
//! # Config Structure
//!
//! ```text
//! Config: GlobalConfig, ProjectConfig, ToolsConfig, ShadersConfig,
//!         [AssetEntry], NativesConfig, PruneConfig, LauncherConfig,
//!         PipelineConfig, [PlatformEntry]
//! ```
//!
//! # Build Configuration
//!
//! ```text
//! BuildConfiguration: Debug | Release (default)
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::ConfigError;
use crate::logging::LogLevel;
use crate::platform::{ArchWidth, OsFamily};

/// Build configuration passed to the publish tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum BuildConfiguration {
    Debug,
    #[default]
    Release,
}

impl std::fmt::Display for BuildConfiguration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Debug => write!(f, "Debug"),
            Self::Release => write!(f, "Release"),
        }
    }
}

impl std::str::FromStr for BuildConfiguration {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "release" => Ok(Self::Release),
            _ => Err(ConfigError::InvalidValue {
                section: "project".to_string(),
                key: "configuration".to_string(),
                message: format!("expected 'Debug' or 'Release', got '{s}'"),
            }),
        }
    }
}

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log what would happen without touching the filesystem or running tools.
    pub dry: bool,
    /// Log level for stdout output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            dry: false,
            output_log_level: LogLevel::Info,
            file_log_level: LogLevel::Trace,
        }
    }
}

/// The application project being packaged.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ProjectConfig {
    /// Project root; every relative path in the config resolves against it.
    pub root: PathBuf,
    /// Project file handed to the publish tool.
    pub project_file: PathBuf,
    /// Name of the published executable, without extension.
    pub binary_name: String,
    /// Base of the final folder name, `<base_name> (<platform>)`.
    pub base_name: String,
    /// Target framework moniker, part of the intermediate build path.
    pub framework: String,
    /// Build configuration.
    pub configuration: BuildConfiguration,
}

impl Default for ProjectConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("."),
            project_file: PathBuf::from("SierraEngine.csproj"),
            binary_name: "SierraEngine".to_string(),
            base_name: "Sierra Engine Game".to_string(),
            framework: "net6.0".to_string(),
            configuration: BuildConfiguration::Release,
        }
    }
}

/// External tool locations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ToolsConfig {
    /// Build/publish tool. A bare name is looked up in PATH.
    pub dotnet: PathBuf,
    /// Shader compiler, relative to the project root, without `.exe`.
    pub shader_compiler: PathBuf,
    /// Seconds any single tool run may take before it is killed; unset or 0
    /// means no limit.
    pub timeout_secs: Option<u64>,
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            dotnet: PathBuf::from("dotnet"),
            shader_compiler: PathBuf::from("Core/Rendering/Shading/Compilers/glslc"),
            timeout_secs: None,
        }
    }
}

impl ToolsConfig {
    #[must_use]
    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs
            .filter(|secs| *secs > 0)
            .map(Duration::from_secs)
    }
}

/// Shader sources compiled into `Shaders/`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct ShadersConfig {
    /// Directory holding the shader sources, relative to the project root.
    pub source_dir: PathBuf,
    /// Shader file names, compiled in order.
    pub sources: Vec<String>,
}

impl Default for ShadersConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("Core/Rendering/Shading/Shaders"),
            sources: vec!["shader.vert".to_string(), "shader.frag".to_string()],
        }
    }
}

/// One entry of the asset manifest.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct AssetEntry {
    /// Source directory, relative to the project root.
    pub source: PathBuf,
    /// Destination subdirectory inside the staged tree.
    pub destination: PathBuf,
}

impl AssetEntry {
    pub fn new(source: impl Into<PathBuf>, destination: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            destination: destination.into(),
        }
    }
}

/// Default asset manifest: textures, models, fonts.
#[must_use]
pub fn default_assets() -> Vec<AssetEntry> {
    vec![
        AssetEntry::new("Core/Rendering/Textures", "Textures"),
        AssetEntry::new("Core/Rendering/Models", "Models"),
        AssetEntry::new("Core/Rendering/Fonts", "Fonts"),
    ]
}

/// Native library bundles, as paths relative to `root`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct NativesConfig {
    /// Directory holding all bundles, relative to the project root.
    pub root: PathBuf,
    /// Windowing library copied for every platform.
    pub shared: Vec<PathBuf>,
    /// Windows, 64-bit.
    pub windows_x64: Vec<PathBuf>,
    /// Windows, any other architecture.
    pub windows_other: Vec<PathBuf>,
    /// macOS.
    pub macos: Vec<PathBuf>,
    /// Linux and everything else.
    pub linux: Vec<PathBuf>,
}

impl Default for NativesConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("Core/Dynamic Link Libraries"),
            shared: vec![PathBuf::from("Shared/glfw-sharp.dll")],
            windows_x64: vec![
                PathBuf::from("Windows/x64/glfw3.dll"),
                PathBuf::from("Windows/x64/Assimp64.dll"),
                PathBuf::from("Windows/x64/cimgui.dll"),
            ],
            windows_other: vec![
                PathBuf::from("Windows/x86/glfw3.dll"),
                PathBuf::from("Windows/x86/Assimp32.dll"),
                PathBuf::from("Windows/x86/cimgui.dll"),
            ],
            macos: vec![
                PathBuf::from("MacOS/libglfw.3.dylib"),
                PathBuf::from("MacOS/libcimgui.dylib"),
            ],
            linux: vec![
                PathBuf::from("Linux/libglfw.so.3"),
                PathBuf::from("Linux/libassimp.so"),
            ],
        }
    }
}

/// Files removed from the staged tree before relocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PruneConfig {
    /// Glob patterns matched against top-level file names.
    pub patterns: Vec<String>,
}

impl Default for PruneConfig {
    fn default() -> Self {
        Self {
            patterns: vec!["*.pdb".to_string(), "glfw-sharp.dll.config".to_string()],
        }
    }
}

/// Launcher script written for Windows targets.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct LauncherConfig {
    pub enabled: bool,
    pub file_name: String,
}

impl Default for LauncherConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            file_name: "Launch.bat".to_string(),
        }
    }
}

/// Pipeline policy.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Abort when the publish tool or shader compiler exits non-zero.
    pub fail_on_tool_error: bool,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            fail_on_tool_error: true,
        }
    }
}

/// One row of the platform table.
///
/// `os` and `width` override the classification derived from the id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PlatformEntry {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub os: Option<OsFamily>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub width: Option<ArchWidth>,
}

impl PlatformEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            os: None,
            width: None,
        }
    }
}
