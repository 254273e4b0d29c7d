// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::io;
use std::path::Path;
use tokio::fs;

/// Removes a directory tree if it exists.
///
/// Returns `Ok(false)` when there was nothing to remove.
///
/// # Errors
///
/// Returns an error if the directory exists but cannot be removed.
pub async fn remove_dir_if_exists(path: &Path) -> Result<bool> {
    if !fs::try_exists(path).await.unwrap_or(false) {
        return Ok(false);
    }
    match fs::remove_dir_all(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}

/// Removes a file if it exists.
///
/// # Errors
///
/// Returns an error if the file exists but cannot be removed.
pub async fn remove_file_if_exists(path: &Path) -> Result<bool> {
    match fs::remove_file(path).await {
        Ok(()) => Ok(true),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(e).with_context(|| format!("failed to remove {}", path.display())),
    }
}
