// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Asset staging: merges each manifest directory into the staged tree.

use std::path::Path;

use tracing::{debug, info};

use crate::config::types::AssetEntry;
use crate::error::{PipelineError, Result};
use crate::utility::fs::copy::copy_tree;

/// What a staging pass copied.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StageReport {
    pub entries: usize,
    pub files: usize,
}

/// Copies every `project_root/<source>` into `destination_root/<destination>`.
///
/// Existing files are overwritten, nothing is deleted first, so running it
/// twice yields the same tree. Entries copied before a failure stay on disk.
///
/// # Errors
///
/// Returns `PipelineError::AssetCopyFailure` for the first entry whose source
/// is missing or cannot be copied.
pub async fn stage(
    manifest: &[AssetEntry],
    project_root: &Path,
    destination_root: &Path,
) -> Result<StageReport> {
    let mut report = StageReport::default();

    for entry in manifest {
        let source = project_root.join(&entry.source);
        let destination = destination_root.join(&entry.destination);

        if !source.is_dir() {
            return Err(PipelineError::AssetCopyFailure {
                source_dir: source,
                message: "source directory does not exist".to_string(),
            }
            .into());
        }

        debug!(from = %source.display(), to = %destination.display(), "copying assets");
        let files = copy_tree(&source, &destination)
            .await
            .map_err(|e| PipelineError::AssetCopyFailure {
                source_dir: source.clone(),
                message: format!("{e:#}"),
            })?;

        info!(assets = %entry.destination.display(), files, "assets staged");
        report.entries += 1;
        report.files += files;
    }

    Ok(report)
}

/// Logs what [`stage`] would copy.
pub fn stage_dry_run(manifest: &[AssetEntry], project_root: &Path, destination_root: &Path) {
    for entry in manifest {
        info!(
            from = %project_root.join(&entry.source).display(),
            to = %destination_root.join(&entry.destination).display(),
            "[dry-run] would copy assets"
        );
    }
}
