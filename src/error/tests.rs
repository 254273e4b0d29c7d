// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ConfigError, PipelineError, pipeline_error};
use anyhow::Context;
use std::path::PathBuf;

#[test]
fn test_config_error_display() {
    let err = ConfigError::InvalidValue {
        section: "platforms".to_string(),
        key: "id".to_string(),
        message: "duplicate platform 'win-x64'".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"invalid value for 'id' in section '[platforms]': duplicate platform 'win-x64'"
    );
}

#[test]
fn test_unsupported_platform_display() {
    let err = PipelineError::UnsupportedPlatform {
        identifier: "amiga-68k".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"the platform [amiga-68k] is either non-existent or unsupported"
    );
}

#[test]
fn test_relocation_failure_mentions_destination() {
    let err = PipelineError::RelocationFailure {
        destination: PathBuf::from("/nowhere"),
        message: "not a directory".to_string(),
    };
    let msg = err.to_string();
    assert!(msg.contains("/nowhere"), "got: {msg}");
    assert!(msg.contains("valid and exists"), "got: {msg}");
}

#[test]
fn test_pipeline_error_survives_context() {
    let err: anyhow::Error = Err::<(), _>(PipelineError::MissingArguments)
        .context("parsing arguments")
        .unwrap_err();

    assert!(matches!(
        pipeline_error(&err),
        Some(PipelineError::MissingArguments)
    ));
}

#[test]
fn test_usage_error_classification() {
    assert!(PipelineError::MissingArguments.is_usage_error());
    assert!(
        PipelineError::UnsupportedPlatform {
            identifier: "x".to_string()
        }
        .is_usage_error()
    );
    assert!(
        !PipelineError::ToolFailed {
            tool: "glslc".to_string(),
            code: 1
        }
        .is_usage_error()
    );
}
