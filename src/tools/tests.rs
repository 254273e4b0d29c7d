// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::test_utils::context;
use super::{ToolContext, ToolOutcome};
use crate::config::Config;
use crate::error::{PipelineError, pipeline_error};
use std::path::Path;
use std::sync::Arc;
use tokio_util::sync::CancellationToken;

#[test]
fn test_tool_context_cancellation() {
    let token = CancellationToken::new();
    let ctx = ToolContext::new(Arc::new(Config::default()), token.clone(), false);

    assert!(!ctx.is_cancelled());
    assert!(!ctx.is_dry_run());
    token.cancel();
    assert!(ctx.is_cancelled());
}

#[test]
fn test_tool_context_project_path() {
    let mut config = Config::default();
    config.project.root = "/work/SierraEngine".into();
    let ctx = context(config, true);

    assert!(ctx.is_dry_run());
    assert_eq!(
        ctx.project_path(Path::new("SierraEngine.csproj")),
        Path::new("/work/SierraEngine/SierraEngine.csproj")
    );
}

#[test]
fn test_outcome_success_passes_policy() {
    let ctx = context(Config::default(), false);
    let outcome = ToolOutcome::new(0, String::new()).enforce("dotnet", &ctx).unwrap();
    assert!(outcome.success());
    assert!(ToolOutcome::skipped().success());
}

#[test]
fn test_outcome_failure_is_fatal_by_default() {
    let ctx = context(Config::default(), false);
    let err = ToolOutcome::new(1, "error CS1002".to_string())
        .enforce("glslc", &ctx)
        .unwrap_err();

    assert!(matches!(
        pipeline_error(&err),
        Some(PipelineError::ToolFailed { tool, code: 1 }) if tool == "glslc"
    ));
}

#[test]
fn test_outcome_failure_tolerated_when_keep_going() {
    let mut config = Config::default();
    config.pipeline.fail_on_tool_error = false;
    let ctx = context(config, false);

    let outcome = ToolOutcome::new(2, "boom".to_string())
        .enforce("glslc", &ctx)
        .unwrap();
    assert_eq!(outcome.exit_code(), 2);
    assert_eq!(outcome.stderr(), "boom");
}
