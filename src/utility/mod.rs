// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! fs
//!   copy:     copy_tree(), copy_file()
//!   remove:   remove_dir_if_exists(), remove_file_if_exists()
//!   relocate: move_dir()  rename, cross-device copy + remove
//! ```

pub mod fs;
