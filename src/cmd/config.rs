// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config loading and the config-related commands.

use crate::cli::global::GlobalOptions;
use crate::config::Config;
use crate::config::loader::ConfigLoader;
use crate::error::{ConfigError, Result};

/// Config file picked up from the working directory when present.
pub const DEFAULT_CONFIG_FILE: &str = "sierra-export.toml";

/// Builds the loader: `sierra-export.toml`, each `--config`, then CLI overrides.
///
/// # Errors
///
/// Returns an error if a `--set` entry is malformed or an override key is invalid.
pub fn build_config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(DEFAULT_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }

    let overrides = global
        .to_config_overrides()
        .map_err(|option| ConfigError::InvalidValue {
            section: "cli".to_string(),
            key: "set".to_string(),
            message: format!("expected KEY=VALUE, got '{option}'"),
        })?;
    for (key, value) in overrides {
        loader = loader.set(&key, value)?;
    }
    Ok(loader)
}

/// Loads and validates the effective configuration.
///
/// # Errors
///
/// Returns an error if any source fails to load or the result is invalid.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    build_config_loader(global)?.build()
}

/// Display current configuration options.
pub fn run_show_config_command(config: &Config, sources: &[String]) {
    if sources.is_empty() {
        println!("# no configuration layers, built-in defaults");
    } else {
        for line in sources {
            println!("# {line}");
        }
    }
    for line in config.format_options() {
        println!("{line}");
    }
}

/// Prints every platform of the catalog with its classification.
///
/// # Errors
///
/// Returns an error if the platform table is invalid.
pub fn run_list_platforms_command(config: &Config) -> Result<()> {
    let catalog = config.catalog()?;
    let width = catalog.iter().map(|(id, _)| id.len()).max().unwrap_or(0);
    for (id, classification) in catalog.iter() {
        println!(
            "{id:<width$}  {:<7}  {}",
            classification.os, classification.width
        );
    }
    Ok(())
}
