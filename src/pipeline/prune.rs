// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Removal of build by-products (debug symbols, binding configs) from the
//! top level of the staged tree.

use std::path::{Path, PathBuf};

use anyhow::Context;
use tracing::{debug, info};
use wax::{Glob, Program};

use crate::error::{ConfigError, Result};
use crate::utility::fs::remove::remove_file_if_exists;

/// Compiled `[prune] patterns`.
#[derive(Debug, Clone)]
pub struct PruneSet {
    globs: Vec<Glob<'static>>,
}

/// Compiles the configured patterns.
///
/// # Errors
///
/// Returns `ConfigError::InvalidValue` for a pattern that is not a valid glob.
pub fn compile_patterns(patterns: &[String]) -> Result<PruneSet> {
    let globs = patterns
        .iter()
        .map(|pattern| {
            Glob::new(pattern)
                .map(Glob::into_owned)
                .map_err(|e| ConfigError::InvalidValue {
                    section: "prune".to_string(),
                    key: "patterns".to_string(),
                    message: format!("invalid glob pattern '{pattern}': {e}"),
                })
        })
        .collect::<std::result::Result<Vec<_>, _>>()?;
    Ok(PruneSet { globs })
}

impl PruneSet {
    /// Whether a top-level file name matches any pattern.
    #[must_use]
    pub fn matches(&self, file_name: &str) -> bool {
        self.globs.iter().any(|glob| glob.is_match(file_name))
    }

    /// Top-level files of `dir` that would be pruned, sorted.
    ///
    /// # Errors
    ///
    /// Returns an error if `dir` exists but cannot be read.
    pub async fn matching_files(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        if !dir.is_dir() {
            return Ok(Vec::new());
        }

        let mut entries = tokio::fs::read_dir(dir)
            .await
            .with_context(|| format!("failed to read directory {}", dir.display()))?;

        let mut found = Vec::new();
        while let Some(entry) = entries
            .next_entry()
            .await
            .with_context(|| format!("failed to read entry from {}", dir.display()))?
        {
            let path = entry.path();
            if path.is_file() && self.matches(&entry.file_name().to_string_lossy()) {
                found.push(path);
            }
        }
        found.sort();
        Ok(found)
    }

    /// Removes matching top-level files. A missing file or directory is not
    /// an error. Returns the removed paths.
    ///
    /// # Errors
    ///
    /// Returns an error if a matching file exists but cannot be removed.
    pub async fn prune(&self, dir: &Path) -> Result<Vec<PathBuf>> {
        let mut removed = Vec::new();
        for path in self.matching_files(dir).await? {
            if remove_file_if_exists(&path).await? {
                debug!(path = %path.display(), "pruned");
                removed.push(path);
            }
        }
        info!(count = removed.len(), "pruned build by-products");
        Ok(removed)
    }
}
