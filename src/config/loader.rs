// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Layered configuration loading.
//!
//! ```text
//! ConfigLoader::new()
//!   .add_toml_file_optional("sierra-export.toml")   skipped when absent
//!   .add_toml_file(path)                            one per --config
//!   .set("project.root", "..")                      flags and --set
//!        |
//!        v
//!   build() --> Config, checked by Config::validate
//! ```
//!
//! Every layer is recorded as a [`ConfigSource`] so `--show-config` can
//! tell where the values came from.

use std::fmt;
use std::path::{Path, PathBuf};

use config::builder::DefaultState;
use config::{ConfigBuilder, File, FileFormat};

use super::Config;
use crate::error::{ConfigError, Result};

/// One layer of the merged configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// A file that must exist.
    File(PathBuf),
    /// An optional file that was present when it was added.
    OptionalFile(PathBuf),
    /// TOML passed as a string.
    Inline,
    /// A single key set from the command line.
    Override { key: String, value: String },
}

impl fmt::Display for ConfigSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::File(path) => write!(f, "file {}", path.display()),
            Self::OptionalFile(path) => write!(f, "optional file {}", path.display()),
            Self::Inline => write!(f, "inline TOML"),
            Self::Override { key, value } => write!(f, "override {key} = {value}"),
        }
    }
}

/// Collects configuration layers; later layers win.
pub struct ConfigLoader {
    builder: ConfigBuilder<DefaultState>,
    sources: Vec<ConfigSource>,
}

impl ConfigLoader {
    #[must_use]
    pub fn new() -> Self {
        Self {
            builder: config::Config::builder(),
            sources: Vec::new(),
        }
    }

    fn toml_file(mut self, path: &Path, required: bool) -> Self {
        self.builder = self
            .builder
            .add_source(File::from(path).format(FileFormat::Toml).required(required));
        self
    }

    /// Adds a TOML file. A missing or malformed file makes `build()` fail.
    #[must_use]
    pub fn add_toml_file<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.toml_file(path, true);
        loader.sources.push(ConfigSource::File(path.to_path_buf()));
        loader
    }

    /// Adds a TOML file that is silently skipped when it does not exist.
    #[must_use]
    pub fn add_toml_file_optional<P: AsRef<Path>>(self, path: P) -> Self {
        let path = path.as_ref();
        let mut loader = self.toml_file(path, false);
        if path.is_file() {
            loader
                .sources
                .push(ConfigSource::OptionalFile(path.to_path_buf()));
        }
        loader
    }

    #[must_use]
    pub fn add_toml_str(mut self, content: &str) -> Self {
        self.builder = self
            .builder
            .add_source(File::from_str(content, FileFormat::Toml));
        self.sources.push(ConfigSource::Inline);
        self
    }

    /// Overrides a single dotted key, e.g. `project.base_name`.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` if the key cannot be parsed.
    pub fn set<T: Into<config::Value>>(mut self, key: &str, value: T) -> Result<Self> {
        let value: config::Value = value.into();
        let shown = value.to_string();
        self.builder = self
            .builder
            .set_override(key, value)
            .map_err(|e| ConfigError::InvalidValue {
                section: "cli".to_string(),
                key: key.to_string(),
                message: e.to_string(),
            })?;
        self.sources.push(ConfigSource::Override {
            key: key.to_string(),
            value: shown,
        });
        Ok(self)
    }

    /// Merges every layer into a validated [`Config`].
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::ParseError` if a required file is missing, a
    /// file is not valid TOML, or the merged values do not fit `Config`.
    /// Returns the validation error for a bad platform table or prune pattern.
    pub fn build(self) -> Result<Config> {
        let origin = self.origin();
        let config: Config = self
            .builder
            .build()
            .and_then(|merged| merged.try_deserialize::<Config>())
            .map_err(|e| ConfigError::ParseError {
                path: origin,
                message: e.to_string(),
            })?;
        config.validate()?;
        Ok(config)
    }

    /// Files taking part in the merge, for error messages.
    fn origin(&self) -> String {
        let files: Vec<String> = self
            .sources
            .iter()
            .filter_map(|source| match source {
                ConfigSource::File(path) | ConfigSource::OptionalFile(path) => {
                    Some(path.display().to_string())
                }
                _ => None,
            })
            .collect();
        if files.is_empty() {
            "<defaults>".to_string()
        } else {
            files.join(", ")
        }
    }

    #[must_use]
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }

    /// Numbered source list, lowest precedence first.
    #[must_use]
    pub fn describe_sources(&self) -> Vec<String> {
        self.sources
            .iter()
            .enumerate()
            .map(|(i, source)| format!("{}. {source}", i + 1))
            .collect()
    }
}

impl Default for ConfigLoader {
    fn default() -> Self {
        Self::new()
    }
}
