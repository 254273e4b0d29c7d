// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Core modules for process management.
//!
//! ```text
//!     core
//!      |
//!   process
//!      |
//!   Builder --> tokio::process --> Output
//! ```

pub mod process;
