// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{ShaderCompilerTool, ShaderInvocation};
use crate::error::{PipelineError, pipeline_error};
use crate::platform::OsFamily;
use crate::tools::Tool;
use crate::tools::test_utils::{config_at, context, run_with_logs};
use std::path::Path;

#[test]
fn test_windows_invocation() {
    let invocation = ShaderInvocation::new(
        OsFamily::Windows,
        Path::new("../Core/Rendering/Shading/Compilers/glslc"),
        Path::new("../Core/Rendering/Shading/Shaders/shader.vert"),
        Path::new("../bin/Release/net6.0/win-x64/publish"),
    );

    insta::assert_snapshot!(
        invocation.command_line(),
        @r"..\Core\Rendering\Shading\Compilers\glslc.exe ..\Core\Rendering\Shading\Shaders\shader.vert -o ..\bin\Release\net6.0\win-x64\publish\Shaders\shader.vert.spv"
    );
}

#[test]
fn test_windows_invocation_keeps_existing_exe() {
    let invocation = ShaderInvocation::new(
        OsFamily::Windows,
        Path::new("tools/glslc.exe"),
        Path::new("shader.frag"),
        Path::new("out"),
    );
    assert_eq!(invocation.program(), "tools\\glslc.exe");
}

#[cfg(unix)]
#[test]
fn test_unix_invocation() {
    let invocation = ShaderInvocation::new(
        OsFamily::MacOs,
        Path::new("../Core/Rendering/Shading/Compilers/glslc"),
        Path::new("../Core/Rendering/Shading/Shaders/shader.frag"),
        Path::new("../bin/Release/net6.0/osx-x64/publish"),
    );

    insta::assert_snapshot!(
        invocation.command_line(),
        @"../Core/Rendering/Shading/Compilers/glslc ../Core/Rendering/Shading/Shaders/shader.frag -o ../bin/Release/net6.0/osx-x64/publish/Shaders/shader.frag.spv"
    );
    assert_eq!(invocation.arguments()[1], "-o");
}

#[test]
fn test_invocations_follow_source_order() {
    let tool = ShaderCompilerTool::new()
        .host(OsFamily::Linux)
        .compiler("glslc")
        .sources(["s/shader.vert", "s/shader.frag"])
        .destination_root("publish");

    let outputs: Vec<String> = tool
        .invocations()
        .unwrap()
        .iter()
        .map(|i| i.output().to_string())
        .collect();
    assert_eq!(outputs.len(), 2);
    assert!(outputs[0].ends_with("shader.vert.spv"));
    assert!(outputs[1].ends_with("shader.frag.spv"));
}

#[test]
fn test_invocations_require_compiler() {
    let tool = ShaderCompilerTool::new().destination_root("publish");
    assert!(tool.invocations().is_err());
}

#[tokio::test]
async fn test_dry_run_creates_nothing() {
    let temp = tempfile::tempdir().unwrap();
    let destination = temp.path().join("publish");
    let ctx = context(config_at(temp.path()), true);
    let tool = ShaderCompilerTool::new()
        .compiler("glslc")
        .add_source("shader.vert")
        .destination_root(&destination);

    let (result, logs) = run_with_logs(|| tool.run(&ctx)).await;

    assert!(result.unwrap().success());
    assert!(!destination.exists());
    assert!(logs.contains("[dry-run] would compile shader"));
}

#[tokio::test]
async fn test_missing_compiler_is_unavailable() {
    let temp = tempfile::tempdir().unwrap();
    let ctx = context(config_at(temp.path()), false);
    let tool = ShaderCompilerTool::new()
        .compiler(temp.path().join("missing/glslc"))
        .add_source("shader.vert")
        .destination_root(temp.path().join("publish"));

    let err = tool.run(&ctx).await.unwrap_err();
    assert!(matches!(
        pipeline_error(&err),
        Some(PipelineError::BuildToolUnavailable { tool, .. }) if tool == "glslc"
    ));
    assert!(temp.path().join("publish/Shaders").is_dir());
}

#[cfg(unix)]
mod unix {
    use super::*;
    use crate::tools::test_utils::write_script;

    // Fake compiler: copies the source to the `-o` target.
    const FAKE_GLSLC: &str = "cp \"$1\" \"$3\"";

    #[tokio::test]
    async fn test_compile_writes_spv_files() {
        let temp = tempfile::tempdir().unwrap();
        let glslc = temp.path().join("glslc");
        write_script(&glslc, FAKE_GLSLC);
        std::fs::write(temp.path().join("shader.vert"), "vert").unwrap();
        std::fs::write(temp.path().join("shader.frag"), "frag").unwrap();

        let ctx = context(config_at(temp.path()), false);
        let destination = temp.path().join("publish");
        let tool = ShaderCompilerTool::new()
            .compiler(&glslc)
            .add_source(temp.path().join("shader.vert"))
            .add_source(temp.path().join("shader.frag"))
            .destination_root(&destination);

        let outcomes = tool.compile(&ctx).await.unwrap();

        assert_eq!(outcomes.len(), 2);
        assert_eq!(
            std::fs::read_to_string(destination.join("Shaders/shader.frag.spv")).unwrap(),
            "frag"
        );
    }

    #[tokio::test]
    async fn test_compile_failure_continues_when_lenient() {
        let temp = tempfile::tempdir().unwrap();
        let glslc = temp.path().join("glslc");
        write_script(&glslc, "echo \"$1: syntax error\" >&2\nexit 2");

        let mut config = config_at(temp.path());
        config.pipeline.fail_on_tool_error = false;
        let ctx = context(config, false);
        let tool = ShaderCompilerTool::new()
            .compiler(&glslc)
            .add_source("a.vert")
            .add_source("b.frag")
            .destination_root(temp.path().join("publish"));

        let outcome = tool.run(&ctx).await.unwrap();
        assert_eq!(outcome.exit_code(), 2);
        insta::assert_snapshot!(outcome.stderr(), @r"
        a.vert: syntax error
        b.frag: syntax error
        ");
    }
}
