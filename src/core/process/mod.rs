// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Running external tools.
//!
//! ```text
//! locate::find_executable("dotnet")          PATH lookup, cached
//!
//! ToolCommand::new(program)
//!   .args(..) .label("glslc") .stderr(Capture::LOG | Capture::KEEP)
//!   .accept_any_exit()
//!   .run(token).await
//!       |  spawn ----fail----> ProcessError::SpawnFailed
//!       |  own process group (unix) / Job Object (windows)
//!       |  pump stdout/stderr, wait | cancel (kill tree) | timeout (kill tree)
//!       |  readers drained for at most 2s after the child is gone
//!       |  exit check ---fail-> ProcessError::NonZeroExit
//!       v
//!   ProcessOutput { exit_code, stdout, stderr, interrupted }
//! ```

mod command;
mod exec;
pub mod locate;
mod tree;

pub use command::{Capture, ToolCommand};
pub use exec::ProcessOutput;
