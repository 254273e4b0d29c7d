// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for sierra-export using clap derive.
//!
//! # Invocation
//!
//! ```text
//! sierra-export [global options] --<PLATFORM> --<OUTPUT_DIRECTORY>
//! sierra-export --list-platforms
//! sierra-export --show-config
//! ```

pub mod export;
pub mod global;


use crate::cli::export::ExportArgs;
use crate::cli::global::GlobalOptions;
use clap::Parser;

/// Sierra Engine Release Packager
///
/// Builds a self-contained release folder of the engine for one platform.
#[derive(Debug, Parser)]
#[command(
    name = "sierra-export",
    author,
    version,
    about = "Sierra Engine Release Packager",
    long_about = "sierra-export Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Publishes the engine for one runtime identifier, adds assets,\n\
                  compiled shaders and native libraries, and moves the result to\n\
                  `<OUTPUT_DIRECTORY>/Sierra Engine Game (<PLATFORM>)`.\n\n\
                  Invoke as `sierra-export --win-x64 --/path/to/releases`.",
    after_help = "CONFIG FILES:\n\n\
                  sierra-export reads `sierra-export.toml` from the current\n\
                  directory if it exists. Additional files can be given with\n\
                  --config; later files override earlier ones, and --set and the\n\
                  other flags override every file."
)]
pub struct Cli {
    /// Global options
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Export target
    #[command(flatten)]
    pub export: ExportArgs,
}

/// Parses the process arguments, exiting with a usage message on error.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}
