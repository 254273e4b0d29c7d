// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::PublishTool;
use crate::config::types::BuildConfiguration;
use crate::error::{PipelineError, pipeline_error};
use crate::tools::Tool;
use crate::tools::test_utils::{config_at, context, run_with_logs};

fn publish_tool() -> PublishTool {
    PublishTool::new()
        .project_file("game/SierraEngine.csproj")
        .platform("win-x64")
        .output_dir("game/bin/Release/net6.0/win-x64/publish")
}

#[test]
fn test_publish_arguments() {
    let args = publish_tool().arguments().unwrap();

    insta::assert_snapshot!(args.join("\n"), @r"
    publish
    game/SierraEngine.csproj
    -r
    win-x64
    --configuration
    Release
    --no-self-contained
    --output
    game/bin/Release/net6.0/win-x64/publish
    /property:PublishSingleFile=True
    /property:IncludeNativeLibrariesForSelfExtract=True
    /property:SelfContained=False
    /property:ReadyToRun=True
    ");
}

#[test]
fn test_publish_arguments_debug_configuration() {
    let args = publish_tool()
        .configuration(BuildConfiguration::Debug)
        .arguments()
        .unwrap();
    assert_eq!(args[5], "Debug");
}

#[test]
fn test_publish_arguments_require_platform() {
    let tool = PublishTool::new()
        .project_file("SierraEngine.csproj")
        .output_dir("out");
    assert!(tool.arguments().is_err());
}

#[test]
fn test_publish_tool_name() {
    assert_eq!(PublishTool::new().name(), "dotnet");
}

#[tokio::test]
async fn test_publish_dry_run_logs_only() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = config_at(temp.path());
    config.tools.dotnet = "/nonexistent/dotnet".into();
    let ctx = context(config, true);
    let tool = publish_tool();

    let (result, logs) = run_with_logs(|| tool.run(&ctx)).await;

    assert!(result.unwrap().success());
    assert!(logs.contains("[dry-run] would run dotnet"));
    assert!(logs.contains("--no-self-contained"));
}

#[tokio::test]
async fn test_publish_missing_dotnet_is_unavailable() {
    let temp = tempfile::tempdir().unwrap();
    let mut config = config_at(temp.path());
    config.tools.dotnet = "tools/dotnet".into();
    let ctx = context(config, false);

    let err = publish_tool().run(&ctx).await.unwrap_err();

    assert!(matches!(
        pipeline_error(&err),
        Some(PipelineError::BuildToolUnavailable { tool, .. }) if tool == "dotnet"
    ));
}

#[cfg(unix)]
mod unix {
    use super::*;
    use crate::tools::test_utils::write_script;

    #[tokio::test]
    async fn test_publish_runs_fake_dotnet() {
        let temp = tempfile::tempdir().unwrap();
        let dotnet = temp.path().join("fake-dotnet");
        let record = temp.path().join("args.txt");
        write_script(&dotnet, &format!("echo \"$@\" > '{}'", record.display()));

        let ctx = context(config_at(temp.path()), false);
        let outcome = publish_tool().dotnet_binary(&dotnet).run(&ctx).await.unwrap();

        assert!(outcome.success());
        let recorded = std::fs::read_to_string(&record).unwrap();
        assert!(recorded.starts_with("publish game/SierraEngine.csproj -r win-x64"));
    }

    #[tokio::test]
    async fn test_publish_failure_policy() {
        let temp = tempfile::tempdir().unwrap();
        let dotnet = temp.path().join("fake-dotnet");
        write_script(&dotnet, "echo 'error NETSDK1083' >&2\nexit 1");

        let strict = context(config_at(temp.path()), false);
        let err = publish_tool()
            .dotnet_binary(&dotnet)
            .run(&strict)
            .await
            .unwrap_err();
        assert!(matches!(
            pipeline_error(&err),
            Some(PipelineError::ToolFailed { code: 1, .. })
        ));

        let mut lenient_config = config_at(temp.path());
        lenient_config.pipeline.fail_on_tool_error = false;
        let lenient = context(lenient_config, false);
        let outcome = publish_tool()
            .dotnet_binary(&dotnet)
            .run(&lenient)
            .await
            .unwrap();
        assert_eq!(outcome.exit_code(), 1);
        assert!(outcome.stderr().contains("NETSDK1083"));
    }

    #[tokio::test]
    async fn test_publish_timeout_kills_build_workers() {
        let temp = tempfile::tempdir().unwrap();
        let dotnet = temp.path().join("fake-dotnet");
        write_script(&dotnet, "sleep 30 &\nsleep 30");

        let mut config = config_at(temp.path());
        config.tools.timeout_secs = Some(1);
        let ctx = context(config, false);

        let started = std::time::Instant::now();
        let err = publish_tool()
            .dotnet_binary(&dotnet)
            .run(&ctx)
            .await
            .unwrap_err();

        assert!(matches!(
            pipeline_error(&err),
            Some(PipelineError::ToolFailed { code: -1, .. })
        ));
        assert!(started.elapsed() < std::time::Duration::from_secs(10));
    }
}
