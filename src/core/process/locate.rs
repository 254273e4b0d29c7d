// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! PATH lookup for external tools, cached for the life of the process.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::{LazyLock, PoisonError, RwLock};

use crate::error::ProcessError;

static FOUND: LazyLock<RwLock<HashMap<String, PathBuf>>> =
    LazyLock::new(|| RwLock::new(HashMap::new()));

/// Full path of `program` if it is on PATH.
///
/// Only hits are cached, so a tool installed mid-run is still found.
#[must_use]
pub fn find_executable(program: &str) -> Option<PathBuf> {
    if let Some(path) = FOUND
        .read()
        .unwrap_or_else(PoisonError::into_inner)
        .get(program)
    {
        return Some(path.clone());
    }

    let path = which::which(program).ok()?;
    FOUND
        .write()
        .unwrap_or_else(PoisonError::into_inner)
        .insert(program.to_string(), path.clone());
    Some(path)
}

/// Like [`find_executable`], but a miss is an error.
///
/// # Errors
///
/// Returns `ProcessError::ExecutableNotFound` if `program` is not on PATH.
pub fn require_executable(program: &str) -> Result<PathBuf, ProcessError> {
    find_executable(program).ok_or_else(|| ProcessError::ExecutableNotFound {
        name: program.to_string(),
    })
}
