// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;

/// Merges the tree under `src` into `dst` and returns the number of files
/// written.
///
/// Directories are created as needed, files already in `dst` are
/// overwritten and files only in `dst` stay, so copying twice gives the
/// same tree as copying once.
///
/// ```no_run
/// use sierra_export::utility::fs::copy::copy_tree;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// let files = copy_tree(Path::new("Core/Rendering/Textures"), Path::new("publish/Textures")).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns an error if `src` cannot be read or any directory or file cannot
/// be written.
pub async fn copy_tree(src: &Path, dst: &Path) -> Result<usize> {
    let mut pending: Vec<(PathBuf, PathBuf)> = vec![(src.to_path_buf(), dst.to_path_buf())];
    let mut files = 0;

    while let Some((from_dir, to_dir)) = pending.pop() {
        fs::create_dir_all(&to_dir)
            .await
            .with_context(|| format!("failed to create directory {}", to_dir.display()))?;

        let mut entries = fs::read_dir(&from_dir)
            .await
            .with_context(|| format!("failed to read directory {}", from_dir.display()))?;

        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("failed to list {}", from_dir.display()))?
        {
            let from = entry.path();
            let to = to_dir.join(entry.file_name());
            let file_type = entry
                .file_type()
                .await
                .with_context(|| format!("failed to stat {}", from.display()))?;
            if file_type.is_dir() {
                pending.push((from, to));
            } else {
                fs::copy(&from, &to).await.with_context(|| {
                    format!("failed to copy {} to {}", from.display(), to.display())
                })?;
                files += 1;
            }
        }
    }

    Ok(files)
}

/// Copies one file, creating the destination's parent first.
///
/// # Errors
///
/// Returns an error if the parent cannot be created or the copy fails.
pub async fn copy_file(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .await
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}
