// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Native library selection and copy.
//!
//! ```text
//! (Windows, Bits64) -> windows_x64
//! (Windows, Other)  -> windows_other
//! (MacOs,   _)      -> macos
//! (Linux,   _)      -> linux
//!                      + shared, always
//! ```

use std::fmt;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::config::types::NativesConfig;
use crate::error::{PipelineError, Result};
use crate::platform::{ArchWidth, OsFamily};
use crate::utility::fs::copy::copy_file;

/// Which bundle of `[natives]` a target uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NativeBundle {
    WindowsX64,
    WindowsOther,
    MacOs,
    Linux,
}

impl fmt::Display for NativeBundle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::WindowsX64 => write!(f, "windows_x64"),
            Self::WindowsOther => write!(f, "windows_other"),
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

/// Libraries to ship for one target, relative to `natives.root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NativeLibrarySelection {
    pub bundle: NativeBundle,
    pub files: Vec<PathBuf>,
}

/// Picks the bundle for `(os, width)`. Depends on nothing else.
#[must_use]
pub fn resolve(os: OsFamily, width: ArchWidth, natives: &NativesConfig) -> NativeLibrarySelection {
    let (bundle, files) = match (os, width) {
        (OsFamily::Windows, ArchWidth::Bits64) => (NativeBundle::WindowsX64, &natives.windows_x64),
        (OsFamily::Windows, ArchWidth::Other) => {
            (NativeBundle::WindowsOther, &natives.windows_other)
        }
        (OsFamily::MacOs, _) => (NativeBundle::MacOs, &natives.macos),
        (OsFamily::Linux, _) => (NativeBundle::Linux, &natives.linux),
    };

    NativeLibrarySelection {
        bundle,
        files: files.iter().chain(&natives.shared).cloned().collect(),
    }
}

/// Outcome of copying a selection; missing files do not fail the run.
#[derive(Debug, Default)]
pub struct NativesReport {
    pub copied: Vec<PathBuf>,
    pub missing: Vec<PipelineError>,
}

impl NativesReport {
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

/// Copies each selected file flat into `destination`.
///
/// # Errors
///
/// Returns an error only if an existing library cannot be written to the
/// destination. Missing sources are collected in the report.
pub async fn copy_selection(
    selection: &NativeLibrarySelection,
    source_root: &Path,
    destination: &Path,
) -> Result<NativesReport> {
    let mut report = NativesReport::default();

    for file in &selection.files {
        let source = source_root.join(file);
        if !source.is_file() {
            warn!(path = %source.display(), "native library not found, skipping");
            report
                .missing
                .push(PipelineError::MissingNativeLibrary { path: source });
            continue;
        }

        let Some(name) = source.file_name() else {
            continue;
        };
        let target = destination.join(name);
        debug!(from = %source.display(), to = %target.display(), "copying native library");
        copy_file(&source, &target).await?;
        report.copied.push(target);
    }

    info!(
        bundle = %selection.bundle,
        copied = report.copied.len(),
        missing = report.missing.len(),
        "native libraries staged"
    );
    Ok(report)
}
