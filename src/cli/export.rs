// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Positional export arguments.
//!
//! Both are optional for clap so that a missing one is reported by the
//! export command itself with the usual message.

use clap::Args;

/// `--<PLATFORM> --<OUTPUT_DIRECTORY>`
#[derive(Debug, Clone, Default, Args)]
pub struct ExportArgs {
    /// Target runtime identifier, e.g. `--win-x64` or `win-x64`.
    #[arg(value_name = "PLATFORM", allow_hyphen_values = true)]
    pub platform: Option<String>,

    /// Existing directory receiving the release, e.g. `--/srv/releases`.
    #[arg(value_name = "OUTPUT_DIRECTORY", allow_hyphen_values = true)]
    pub output_dir: Option<String>,
}

/// Strips one leading `--` from a positional value.
#[must_use]
pub fn strip_dashes(value: &str) -> &str {
    value.strip_prefix("--").unwrap_or(value)
}

impl ExportArgs {
    /// Both positionals with their leading `--` removed, if both were given.
    #[must_use]
    pub fn values(&self) -> Option<(&str, &str)> {
        match (&self.platform, &self.output_dir) {
            (Some(platform), Some(output)) => Some((strip_dashes(platform), strip_dashes(output))),
            _ => None,
        }
    }
}
