// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Batch launcher written next to Windows binaries.

use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;

use crate::error::Result;

/// Script body: runs `<binary_name>.exe` and keeps the console open.
#[must_use]
pub fn launcher_script(binary_name: &str) -> String {
    format!("@echo off\r\n\"{binary_name}.exe\"\r\npause\r\n")
}

/// Writes `<dir>/<file_name>` atomically and returns its path.
///
/// # Errors
///
/// Returns an error if the temporary file cannot be created, written or
/// renamed into place.
pub async fn write_launcher(dir: &Path, file_name: &str, binary_name: &str) -> Result<PathBuf> {
    let dir = dir.to_path_buf();
    let target = dir.join(file_name);
    let script = launcher_script(binary_name);

    tokio::task::spawn_blocking(move || -> Result<PathBuf> {
        let mut file = NamedTempFile::new_in(&dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        file.write_all(script.as_bytes())
            .context("failed to write launcher script")?;
        file.persist(&target)
            .with_context(|| format!("failed to write {}", target.display()))?;
        Ok(target)
    })
    .await
    .context("launcher writer task failed")?
}
