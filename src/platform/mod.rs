// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Platform catalog: validation and classification of runtime identifiers.
//!
//! ```text
//! "win10-x64" --validate--> PlatformIdentifier
//!             --classify--> { os: Windows, width: Bits64 }
//!
//! os:    "win" -> Windows   "osx" -> MacOs   else -> Linux
//! width: "x64" | "arm64" -> Bits64           else -> Other
//! ```

use std::collections::BTreeMap;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::config::types::PlatformEntry;
use crate::error::{ConfigError, PipelineError};

/// Runtime identifiers the publish tool accepts.
pub const BUILTIN_PLATFORMS: &[&str] = &[
    "win-x64",
    "win-x86",
    "win-arm",
    "win-arm64",
    "win7-x64",
    "win7-x86",
    "win81-x64",
    "win81-x86",
    "win81-arm",
    "win10-x64",
    "win10-x86",
    "win10-arm",
    "win10-arm64",
    "osx-x64",
    "osx.10.10-x64",
    "osx.10.11-x64",
    "osx.10.12-x64",
    "osx.10.13-x64",
    "osx.10.14-x64",
    "osx.10.15-x64",
    "osx.11.0-x64",
    "osx.11.0-arm64",
    "osx.12-x64",
    "osx.12-arm64",
    "linux-x64",
    "linux-musl-x64",
    "linux-arm",
    "linux-arm64",
    "rhel-x64",
    "rhel.6-x64",
    "tizen",
    "tizen.4.0.0",
    "tizen.5.0.0",
];

/// Operating system family of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OsFamily {
    Windows,
    #[serde(alias = "osx")]
    MacOs,
    Linux,
}

impl OsFamily {
    /// Family of the machine this binary runs on.
    #[must_use]
    pub const fn host() -> Self {
        if cfg!(windows) {
            Self::Windows
        } else if cfg!(target_os = "macos") {
            Self::MacOs
        } else {
            Self::Linux
        }
    }
}

impl fmt::Display for OsFamily {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Windows => write!(f, "windows"),
            Self::MacOs => write!(f, "macos"),
            Self::Linux => write!(f, "linux"),
        }
    }
}

/// Architecture width of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArchWidth {
    Bits64,
    Other,
}

impl fmt::Display for ArchWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Bits64 => write!(f, "64-bit"),
            Self::Other => write!(f, "other"),
        }
    }
}

/// OS family and architecture width of a platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Classification {
    pub os: OsFamily,
    pub width: ArchWidth,
}

/// Derives the classification of an identifier from its tokens.
#[must_use]
pub fn classify(identifier: &str) -> Classification {
    let id = identifier.to_ascii_lowercase();

    let os = if id.contains("win") {
        OsFamily::Windows
    } else if id.contains("osx") {
        OsFamily::MacOs
    } else {
        OsFamily::Linux
    };

    let width = if id.contains("x64") || id.contains("arm64") {
        ArchWidth::Bits64
    } else {
        ArchWidth::Other
    };

    Classification { os, width }
}

/// A platform identifier that passed catalog validation.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PlatformIdentifier {
    id: String,
    classification: Classification,
}

impl PlatformIdentifier {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.id
    }

    #[must_use]
    pub const fn classification(&self) -> Classification {
        self.classification
    }

    #[must_use]
    pub const fn os(&self) -> OsFamily {
        self.classification.os
    }

    #[must_use]
    pub const fn width(&self) -> ArchWidth {
        self.classification.width
    }
}

impl fmt::Display for PlatformIdentifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.id)
    }
}

/// The closed set of supported platforms.
#[derive(Debug, Clone)]
pub struct PlatformCatalog {
    entries: BTreeMap<String, Classification>,
    order: Vec<String>,
}

impl PlatformCatalog {
    /// Catalog of [`BUILTIN_PLATFORMS`], classified by token.
    #[must_use]
    pub fn builtin() -> Self {
        let order: Vec<String> = BUILTIN_PLATFORMS.iter().map(|s| (*s).to_string()).collect();
        let entries = order.iter().map(|id| (id.clone(), classify(id))).collect();
        Self { entries, order }
    }

    /// Builds a catalog from config rows.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty or duplicate id.
    pub fn from_entries(rows: &[PlatformEntry]) -> Result<Self, ConfigError> {
        let mut entries = BTreeMap::new();
        let mut order = Vec::with_capacity(rows.len());

        for row in rows {
            let id = row.id.trim();
            if id.is_empty() {
                return Err(invalid_platform("platform id must not be empty".to_string()));
            }

            let derived = classify(id);
            let classification = Classification {
                os: row.os.unwrap_or(derived.os),
                width: row.width.unwrap_or(derived.width),
            };

            if entries.insert(id.to_string(), classification).is_some() {
                return Err(invalid_platform(format!("duplicate platform '{id}'")));
            }
            order.push(id.to_string());
        }

        Ok(Self { entries, order })
    }

    /// Validates an identifier against the catalog.
    ///
    /// # Errors
    ///
    /// Returns `PipelineError::UnsupportedPlatform` if the identifier is unknown.
    pub fn validate(&self, identifier: &str) -> Result<PlatformIdentifier, PipelineError> {
        self.entries.get(identifier).map_or_else(
            || {
                Err(PipelineError::UnsupportedPlatform {
                    identifier: identifier.to_string(),
                })
            },
            |classification| {
                Ok(PlatformIdentifier {
                    id: identifier.to_string(),
                    classification: *classification,
                })
            },
        )
    }

    #[must_use]
    pub fn contains(&self, identifier: &str) -> bool {
        self.entries.contains_key(identifier)
    }

    /// Identifiers with their classification, in table order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, Classification)> {
        self.order
            .iter()
            .filter_map(|id| self.entries.get(id).map(|c| (id.as_str(), *c)))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }
}

fn invalid_platform(message: String) -> ConfigError {
    ConfigError::InvalidValue {
        section: "platforms".to_string(),
        key: "id".to_string(),
        message,
    }
}
