// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{LogConfig, LogFormat, LogLevel};
use crate::config::types::GlobalConfig;
use std::path::{Path, PathBuf};

#[test]
fn test_log_level_directives() {
    let directives: Vec<_> = (0..=6)
        .filter_map(LogLevel::from_u8)
        .map(LogLevel::directive)
        .collect();

    insta::assert_snapshot!(directives.join(" "), @"off sierra_export=error sierra_export=warn sierra_export=info sierra_export=debug sierra_export=trace trace");
}

#[test]
fn test_log_level_numeric_round_trip() {
    for level in 0..=6u8 {
        let parsed = LogLevel::try_from(level).unwrap();
        assert_eq!(u8::from(parsed), level);
        assert_eq!(parsed.to_string(), level.to_string());
    }
    assert!(LogLevel::Debug > LogLevel::Info);
}

#[test]
fn test_log_level_out_of_range() {
    assert!(LogLevel::from_u8(7).is_none());
    let err = LogLevel::new(9).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid value for 'log_level' in section '[global]': log level must be 0-6, got 9");
}

#[test]
fn test_log_level_deserializes_from_number() {
    let level: LogLevel = serde_json::from_str("5").unwrap();
    assert_eq!(level, LogLevel::Trace);
    assert!(serde_json::from_str::<LogLevel>("12").is_err());
    assert_eq!(serde_json::to_string(&LogLevel::Warn).unwrap(), "2");
}

#[test]
fn test_log_config_defaults() {
    let config = LogConfig::default();
    assert_eq!(config.console_level(), LogLevel::Info);
    assert_eq!(config.file_level(), LogLevel::Trace);
    assert!(config.log_file().is_none());
    assert_eq!(config.file_format(), LogFormat::Text);
    assert!(!config.show_target());
}

#[test]
fn test_log_config_builder() {
    let config = LogConfig::builder()
        .with_console_level(LogLevel::Warn)
        .with_log_file("out/export.log")
        .with_file_format(LogFormat::Json)
        .build();

    assert_eq!(config.console_level(), LogLevel::Warn);
    assert_eq!(config.log_file(), Some(Path::new("out/export.log")));
    assert_eq!(config.file_format(), LogFormat::Json);
}

#[test]
fn test_log_config_from_global() {
    let global = GlobalConfig {
        dry: false,
        output_log_level: LogLevel::Error,
        file_log_level: LogLevel::Debug,
    };
    let config = LogConfig::from_global(&global, Some(PathBuf::from("x.log")), LogFormat::Text);

    assert_eq!(config.console_level(), LogLevel::Error);
    assert_eq!(config.file_level(), LogLevel::Debug);
    assert_eq!(config.log_file(), Some(Path::new("x.log")));
}
