// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Global CLI options.
//!
//! # Option Precedence
//!
//! ```text
//! --config FILE      ← Additional config files (can repeat)
//! --set KEY=VAL      ← Direct config override, e.g. project.base_name=Demo
//! --project-root DIR ← project.root override
//! --dry              ← Log actions, touch nothing
//! --keep-going       ← pipeline.fail_on_tool_error=false
//! --log-level N      ← Console verbosity (0-6)
//! --file-log-level   ← File verbosity (defaults to --log-level)
//!
//! Precedence: CLI flags > --set > --config > sierra-export.toml > defaults
//! ```

use clap::Args;
use std::path::PathBuf;

/// Global options.
#[derive(Debug, Clone, Default, Args)]
pub struct GlobalOptions {
    /// Path to additional TOML configuration file(s).
    /// Can be specified multiple times.
    #[arg(short = 'c', long = "config", value_name = "FILE", action = clap::ArgAction::Append)]
    pub configs: Vec<PathBuf>,

    /// Logs every action without running tools or touching the filesystem.
    #[arg(long)]
    pub dry: bool,

    /// Console log level (0=silent, 1=errors, 2=warnings, 3=info, 4=debug, 5=trace, 6=dump).
    #[arg(short = 'l', long = "log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub log_level: Option<u8>,

    /// File log level, overrides --log-level for the log file.
    #[arg(long = "file-log-level", value_name = "LEVEL", value_parser = clap::value_parser!(u8).range(0..=6)
    )]
    pub file_log_level: Option<u8>,

    /// Path to log file.
    #[arg(long = "log-file", value_name = "FILE")]
    pub log_file: Option<PathBuf>,

    /// Writes the log file as JSON lines.
    #[arg(long = "log-json", requires = "log_file")]
    pub log_json: bool,

    /// Root of the engine project (holds the project file and assets).
    #[arg(long = "project-root", value_name = "DIR")]
    pub project_root: Option<PathBuf>,

    /// Warns about failing external tools instead of aborting.
    #[arg(long = "keep-going")]
    pub keep_going: bool,

    /// Sets an option, such as 'project.base_name=Demo'.
    /// Can be specified multiple times.
    #[arg(short = 's', long = "set", value_name = "OPTION", action = clap::ArgAction::Append)]
    pub options: Vec<String>,

    /// Prints the supported platforms and exits.
    #[arg(long = "list-platforms")]
    pub list_platforms: bool,

    /// Prints the effective configuration and the files it came from, then exits.
    #[arg(long = "show-config")]
    pub show_config: bool,
}

impl GlobalOptions {
    /// Converts command-line options to `(key, value)` configuration overrides,
    /// `--set` entries first so that dedicated flags win.
    ///
    /// # Errors
    ///
    /// Returns the offending entry if a `--set` value has no `=`.
    pub fn to_config_overrides(&self) -> Result<Vec<(String, String)>, String> {
        let mut overrides = Vec::new();

        for option in &self.options {
            let (key, value) = option.split_once('=').ok_or_else(|| option.clone())?;
            overrides.push((key.trim().to_string(), value.trim().to_string()));
        }

        if let Some(level) = self.log_level {
            overrides.push(("global.output_log_level".to_string(), level.to_string()));
        }

        if let Some(level) = self.file_log_level.or(self.log_level) {
            overrides.push(("global.file_log_level".to_string(), level.to_string()));
        }

        if self.dry {
            overrides.push(("global.dry".to_string(), "true".to_string()));
        }

        if let Some(ref root) = self.project_root {
            overrides.push(("project.root".to_string(), root.display().to_string()));
        }

        if self.keep_going {
            overrides.push((
                "pipeline.fail_on_tool_error".to_string(),
                "false".to_string(),
            ));
        }

        Ok(overrides)
    }
}
