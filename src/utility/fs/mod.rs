// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Async filesystem helpers on `tokio::fs`.
//!
//! ```text
//! copy:     copy_tree()              merge copy, counts files
//!           copy_file()              single file, creates parent
//! remove:   remove_dir_if_exists()   Ok(false) when absent
//!           remove_file_if_exists()
//! relocate: move_dir()               rename, falls back to copy + remove
//! ```

pub mod copy;
pub mod relocate;
pub mod remove;

#[cfg(test)]
mod tests;
