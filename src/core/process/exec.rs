// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Spawning a [`ToolCommand`] and waiting for it.

use std::process::Stdio;
use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;
use tracing::{debug, trace, warn};

use super::command::{Capture, ToolCommand};
use super::tree::{self, ProcessTree};
use crate::error::{ProcessError, Result};

/// How long output readers may keep going after the child is gone.
/// Descendants that inherited the pipes can hold them open indefinitely.
const DRAIN_GRACE: Duration = Duration::from_secs(2);

/// Result of a finished or interrupted child.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ProcessOutput {
    exit_code: i32,
    stdout: String,
    stderr: String,
    interrupted: bool,
}

impl ProcessOutput {
    fn interrupted() -> Self {
        Self {
            exit_code: -1,
            interrupted: true,
            ..Self::default()
        }
    }

    /// Exit code; `-1` when the child was killed or ended by a signal.
    #[must_use]
    pub const fn exit_code(&self) -> i32 {
        self.exit_code
    }

    /// Lines kept from stdout, joined by `\n`.
    #[must_use]
    pub fn stdout(&self) -> &str {
        &self.stdout
    }

    /// Lines kept from stderr, joined by `\n`.
    #[must_use]
    pub fn stderr(&self) -> &str {
        &self.stderr
    }

    #[must_use]
    pub const fn is_interrupted(&self) -> bool {
        self.interrupted
    }

    #[must_use]
    pub const fn success(&self) -> bool {
        self.exit_code == 0
    }
}

/// How the wait for the child ended.
enum Ending {
    Exited(i32),
    Cancelled,
    TimedOut,
}

impl ToolCommand {
    /// Runs the command to completion.
    ///
    /// Cancelling `token` kills the child; the output then comes back with
    /// `is_interrupted()` set and the exit check is skipped. A cancelled token
    /// never spawns anything.
    ///
    /// # Errors
    ///
    /// Returns `ProcessError::SpawnFailed` if the child cannot be started and
    /// `ProcessError::NonZeroExit` for a rejected exit code.
    pub async fn run(self, token: CancellationToken) -> Result<ProcessOutput> {
        if token.is_cancelled() {
            return Ok(ProcessOutput::interrupted());
        }

        let name = self.display_name();
        let command_line = self.command_line();
        debug!(cmd = %command_line, "exec");

        let mut child = self
            .to_command()
            .spawn()
            .map_err(|source| ProcessError::SpawnFailed {
                command: command_line,
                source,
            })?;
        let tree = ProcessTree::attach(&child);
        trace!(process = %name, pid = ?child.id(), "spawned");

        let stdout = pump(child.stdout.take(), self.stdout, &name, "stdout");
        let stderr = pump(child.stderr.take(), self.stderr, &name, "stderr");

        let ending = self.wait(&mut child, &tree, &name, &token).await?;
        let (stdout, stderr) = tokio::join!(collect(stdout, &name), collect(stderr, &name));

        let (exit_code, interrupted) = match ending {
            Ending::Exited(code) => (code, false),
            Ending::Cancelled => (-1, true),
            Ending::TimedOut => (-1, false),
        };

        if !interrupted && !self.accepts(exit_code) {
            if !stderr.is_empty() {
                warn!(process = %name, stderr = %stderr, "process failed");
            }
            return Err(ProcessError::NonZeroExit {
                command: name,
                code: exit_code,
            }
            .into());
        }

        trace!(process = %name, exit_code, interrupted, "finished");
        Ok(ProcessOutput {
            exit_code,
            stdout,
            stderr,
            interrupted,
        })
    }

    fn to_command(&self) -> Command {
        let mut command = Command::new(&self.program);
        command
            .args(&self.args)
            .stdin(Stdio::null())
            .stdout(stdio(self.stdout))
            .stderr(stdio(self.stderr))
            .kill_on_drop(true);
        tree::isolate(&mut command);
        command
    }

    async fn wait(
        &self,
        child: &mut Child,
        tree: &ProcessTree,
        name: &str,
        token: &CancellationToken,
    ) -> Result<Ending> {
        let deadline = async {
            match self.timeout {
                Some(limit) => tokio::time::sleep(limit).await,
                None => std::future::pending().await,
            }
        };

        let ending = tokio::select! {
            status = child.wait() => {
                let status = status.with_context(|| format!("failed waiting for {name}"))?;
                return Ok(Ending::Exited(status.code().unwrap_or(-1)));
            }
            () = token.cancelled() => {
                warn!(process = %name, "cancellation requested, killing process");
                Ending::Cancelled
            }
            () = deadline => {
                warn!(process = %name, timeout = ?self.timeout, "process timed out, killing it");
                Ending::TimedOut
            }
        };

        tree.kill();
        if let Err(e) = child.kill().await {
            debug!(process = %name, error = %e, "child already gone");
        }
        Ok(ending)
    }
}

fn stdio(capture: Capture) -> Stdio {
    if capture.is_empty() {
        Stdio::null()
    } else {
        Stdio::piped()
    }
}

/// A stream reader task and the lines it has kept so far.
struct Pump {
    task: JoinHandle<()>,
    kept: Arc<Mutex<Vec<String>>>,
}

/// Reads one stream line by line on its own task.
fn pump<R>(
    stream: Option<R>,
    capture: Capture,
    process: &str,
    stream_name: &'static str,
) -> Option<Pump>
where
    R: AsyncRead + Unpin + Send + 'static,
{
    let stream = stream?;
    let process = process.to_string();
    let kept = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&kept);
    let task = tokio::spawn(async move {
        let mut lines = BufReader::new(stream).lines();
        loop {
            match lines.next_line().await {
                Ok(Some(line)) => {
                    if capture.contains(Capture::LOG) {
                        trace!(process = %process, stream = stream_name, "{line}");
                    }
                    if capture.contains(Capture::KEEP) {
                        sink.lock().unwrap_or_else(PoisonError::into_inner).push(line);
                    }
                }
                Ok(None) => break,
                Err(e) => {
                    warn!(process = %process, stream = stream_name, error = %e, "error reading output");
                    break;
                }
            }
        }
    });
    Some(Pump { task, kept })
}

/// Waits up to [`DRAIN_GRACE`] for the reader to hit end of stream, then
/// detaches it and returns what was read.
async fn collect(pump: Option<Pump>, process: &str) -> String {
    let Some(Pump { mut task, kept }) = pump else {
        return String::new();
    };
    if tokio::time::timeout(DRAIN_GRACE, &mut task).await.is_err() {
        debug!(process = %process, "output still open after exit, detaching reader");
        task.abort();
    }
    let lines = std::mem::take(&mut *kept.lock().unwrap_or_else(PoisonError::into_inner));
    lines.join("\n")
}
