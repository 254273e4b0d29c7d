// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::io;
use std::path::Path;
use tokio::fs;
use tracing::debug;

use super::copy::copy_tree;

/// Moves the directory `from` to `to`.
///
/// `to` must not exist. A plain rename is tried first; when `from` and `to`
/// live on different filesystems the tree is copied and the source removed.
///
/// # Errors
///
/// Returns an error if `to` already exists, or if neither the rename nor the
/// copy fallback succeeds.
pub async fn move_dir(from: &Path, to: &Path) -> Result<()> {
    if fs::try_exists(to).await.unwrap_or(false) {
        anyhow::bail!("destination already exists: {}", to.display());
    }

    match fs::rename(from, to).await {
        Ok(()) => Ok(()),
        Err(e) if e.kind() == io::ErrorKind::CrossesDevices => {
            debug!(from = %from.display(), to = %to.display(), "rename crosses devices, copying");
            copy_tree(from, to).await?;
            fs::remove_dir_all(from)
                .await
                .with_context(|| format!("failed to remove {}", from.display()))?;
            Ok(())
        }
        Err(e) => Err(e).with_context(|| {
            format!("failed to move {} to {}", from.display(), to.display())
        }),
    }
}
