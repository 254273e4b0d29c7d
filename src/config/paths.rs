// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Path layout of one release run.
//!
//! ```text
//! <root>/bin/<Configuration>/<framework>/<platform>/   intermediate
//!                                         publish/     staging tree
//! <output_root>/publish/                               relocated tree
//! <output_root>/<base_name> (<platform>)/              final folder
//! ```

use std::path::{Path, PathBuf};

use super::types::ProjectConfig;
use crate::platform::PlatformIdentifier;

/// Every path a release run touches, derived once from the config.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReleasePaths {
    project_root: PathBuf,
    intermediate: PathBuf,
    staging: PathBuf,
    relocated: PathBuf,
    final_dir: PathBuf,
}

impl ReleasePaths {
    #[must_use]
    pub fn new(project: &ProjectConfig, platform: &PlatformIdentifier, output_root: &Path) -> Self {
        let intermediate = project
            .root
            .join("bin")
            .join(project.configuration.to_string())
            .join(&project.framework)
            .join(platform.as_str());
        let staging = intermediate.join("publish");

        Self {
            project_root: project.root.clone(),
            intermediate,
            staging,
            relocated: output_root.join("publish"),
            final_dir: output_root.join(final_folder_name(&project.base_name, platform)),
        }
    }

    /// Resolves a config path against the project root.
    #[must_use]
    pub fn project_path(&self, relative: &Path) -> PathBuf {
        self.project_root.join(relative)
    }

    #[must_use]
    pub fn project_root(&self) -> &Path {
        &self.project_root
    }

    /// Intermediate build directory, removed after a successful run.
    #[must_use]
    pub fn intermediate(&self) -> &Path {
        &self.intermediate
    }

    /// Staging tree the publish tool writes into.
    #[must_use]
    pub fn staging(&self) -> &Path {
        &self.staging
    }

    /// Where the staging tree lands before its final rename.
    #[must_use]
    pub fn relocated(&self) -> &Path {
        &self.relocated
    }

    #[must_use]
    pub fn final_dir(&self) -> &Path {
        &self.final_dir
    }
}

/// Final folder name, `<base_name> (<platform>)`.
#[must_use]
pub fn final_folder_name(base_name: &str, platform: &PlatformIdentifier) -> String {
    format!("{base_name} ({})", platform.as_str())
}
