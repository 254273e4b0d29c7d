// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for CLI parsing.
//!
//! Tests the CLI module with realistic command-line argument patterns.

use clap::Parser;
use sierra_export::cli::Cli;
use sierra_export::cmd::config::{build_config_loader, load_config};
use sierra_export::cmd::export::release_request;
use sierra_export::error::PipelineError;
use std::io::Write;
use std::path::Path;

// =============================================================================
// Export invocation
// =============================================================================

#[test]
fn cli_export_with_leading_options() {
    let cli = Cli::try_parse_from([
        "sierra-export",
        "--dry",
        "-l",
        "4",
        "--win10-x64",
        "--/srv/releases",
    ])
    .unwrap();

    assert!(cli.global.dry);
    assert_eq!(cli.global.log_level, Some(4));

    let request = release_request(&cli.export).unwrap();
    assert_eq!(request.platform, "win10-x64");
    assert_eq!(request.output_root, Path::new("/srv/releases"));
}

#[test]
fn cli_export_with_trailing_options() {
    let cli =
        Cli::try_parse_from(["sierra-export", "--osx-x64", "--out", "--keep-going"]).unwrap();

    assert!(cli.global.keep_going);
    let request = release_request(&cli.export).unwrap();
    assert_eq!(request.platform, "osx-x64");
    assert_eq!(request.output_root, Path::new("out"));
}

#[test]
fn cli_export_single_positional_is_missing_arguments() {
    let cli = Cli::try_parse_from(["sierra-export", "--linux-x64"]).unwrap();
    let err = release_request(&cli.export).unwrap_err();
    assert!(matches!(err, PipelineError::MissingArguments));
    assert!(err.is_usage_error());
}

#[test]
fn cli_too_many_positionals_rejected() {
    assert!(Cli::try_parse_from(["sierra-export", "--win-x64", "--a", "--b"]).is_err());
}

#[test]
fn cli_help_and_version() {
    let help = Cli::try_parse_from(["sierra-export", "--help"]).unwrap_err();
    assert_eq!(help.kind(), clap::error::ErrorKind::DisplayHelp);

    let version = Cli::try_parse_from(["sierra-export", "--version"]).unwrap_err();
    assert_eq!(version.kind(), clap::error::ErrorKind::DisplayVersion);
}

// =============================================================================
// CLI -> Config
// =============================================================================

#[test]
fn cli_flags_override_config_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(
        file,
        r#"
[project]
base_name = "From File"
framework = "net7.0"

[pipeline]
fail_on_tool_error = true
"#
    )
    .unwrap();
    let path = file.path().display().to_string();

    let cli = Cli::try_parse_from([
        "sierra-export",
        "-c",
        path.as_str(),
        "--set",
        "project.base_name=From Set",
        "--keep-going",
        "--project-root",
        "/work/sierra",
        "-l",
        "2",
    ])
    .unwrap();

    let config = load_config(&cli.global).unwrap();
    assert_eq!(config.project.base_name, "From Set");
    assert_eq!(config.project.framework, "net7.0");
    assert_eq!(config.project.root, Path::new("/work/sierra"));
    assert!(!config.pipeline.fail_on_tool_error);
    assert_eq!(config.global.output_log_level.as_u8(), 2);
    assert_eq!(config.global.file_log_level.as_u8(), 2);
}

#[test]
fn cli_config_files_are_tracked() {
    let file = tempfile::NamedTempFile::new().unwrap();
    let path = file.path().display().to_string();
    let cli = Cli::try_parse_from(["sierra-export", "--config", path.as_str()]).unwrap();

    let loader = build_config_loader(&cli.global).unwrap();
    let files = loader.describe_sources();
    assert!(
        files.iter().any(|line| line.ends_with(&path)),
        "config file not tracked: {files:?}"
    );
}

#[test]
fn cli_missing_config_file_fails() {
    let cli = Cli::try_parse_from(["sierra-export", "-c", "/nonexistent/sierra.toml"]).unwrap();
    assert!(load_config(&cli.global).is_err());
}

#[test]
fn cli_malformed_set_fails() {
    let cli = Cli::try_parse_from(["sierra-export", "-s", "no-equals-sign"]).unwrap();
    let err = build_config_loader(&cli.global).err().unwrap();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'set' in section '[cli]': expected KEY=VALUE, got 'no-equals-sign'");
}
