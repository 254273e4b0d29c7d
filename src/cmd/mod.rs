// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::config  load_config, --list-platforms, --show-config
//!          --> cmd::export  run_export_command
//! ```

pub mod config;
pub mod export;
