// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Description of one external command, before it runs.

use bitflags::bitflags;
use std::ffi::OsStr;
use std::path::{Path, PathBuf};
use std::time::Duration;

bitflags! {
    /// What happens to the lines a child writes on one stream.
    ///
    /// No flag set means the stream goes to the null device.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct Capture: u8 {
        /// Forward every line to the log at TRACE level.
        const LOG = 0b01;
        /// Keep the lines for [`ProcessOutput`](super::ProcessOutput).
        const KEEP = 0b10;
    }
}

/// An external command with its arguments and stream handling.
#[derive(Debug, Clone)]
pub struct ToolCommand {
    pub(super) program: PathBuf,
    pub(super) args: Vec<String>,
    pub(super) label: Option<String>,
    pub(super) stdout: Capture,
    pub(super) stderr: Capture,
    /// When false the caller inspects the exit code itself.
    pub(super) check_exit: bool,
    pub(super) timeout: Option<Duration>,
}

impl ToolCommand {
    /// A bare program name is resolved through PATH when the child spawns.
    pub fn new(program: impl AsRef<Path>) -> Self {
        Self {
            program: program.as_ref().to_path_buf(),
            args: Vec::new(),
            label: None,
            stdout: Capture::LOG,
            stderr: Capture::LOG,
            check_exit: true,
            timeout: None,
        }
    }

    #[must_use]
    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_string_lossy().into_owned());
        self
    }

    #[must_use]
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|a| a.as_ref().to_string_lossy().into_owned()));
        self
    }

    /// Name used in log lines and errors instead of the program stem.
    #[must_use]
    pub fn label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    #[must_use]
    pub const fn stdout(mut self, capture: Capture) -> Self {
        self.stdout = capture;
        self
    }

    #[must_use]
    pub const fn stderr(mut self, capture: Capture) -> Self {
        self.stderr = capture;
        self
    }

    /// Never fail on the exit code.
    #[must_use]
    pub fn accept_any_exit(mut self) -> Self {
        self.check_exit = false;
        self
    }

    /// Kill the child if it runs longer than `limit`.
    #[must_use]
    pub const fn timeout(mut self, limit: Duration) -> Self {
        self.timeout = Some(limit);
        self
    }

    #[must_use]
    pub fn program(&self) -> &Path {
        &self.program
    }

    #[must_use]
    pub fn arguments(&self) -> &[String] {
        &self.args
    }

    /// The label, or the program's file stem.
    #[must_use]
    pub fn display_name(&self) -> String {
        if let Some(label) = &self.label {
            return label.clone();
        }
        self.program
            .file_stem()
            .map_or_else(|| "process".to_string(), |s| s.to_string_lossy().into_owned())
    }

    /// Program and arguments on one line; parts with spaces are quoted.
    #[must_use]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.display().to_string())
            .chain(self.args.iter().cloned())
            .map(|part| {
                if part.contains(' ') {
                    format!("\"{part}\"")
                } else {
                    part
                }
            })
            .collect::<Vec<_>>()
            .join(" ")
    }

    pub(super) const fn accepts(&self, code: i32) -> bool {
        !self.check_exit || code == 0
    }
}
