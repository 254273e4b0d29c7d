// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Dispatch
//!                                          --list-platforms | --show-config | export
//!
//! exit: 0 success, 2 usage error, 1 anything else
//! ```

use std::process::ExitCode;

use sierra_export::cli::{self, Cli};
use sierra_export::cmd::config::{
    build_config_loader, run_list_platforms_command, run_show_config_command,
};
use sierra_export::cmd::export::{release_request, run_export_command, success_message};
use sierra_export::config::Config;
use sierra_export::error::{Result, pipeline_error};
use sierra_export::logging::{LogConfig, LogFormat, init_logging};
use tokio_util::sync::CancellationToken;

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

const EXIT_USAGE: u8 = 2;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let cli = cli::parse();

    // Logging levels live in the config, so it is loaded before any logger exists.
    let (config, sources) = match load(&cli) {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Error: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let file_format = if cli.global.log_json {
        LogFormat::Json
    } else {
        LogFormat::Text
    };
    let log_config = LogConfig::from_global(&config.global, cli.global.log_file.clone(), file_format);
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e:#}");
            return ExitCode::FAILURE;
        }
    };
    for source in &sources {
        tracing::debug!(source = %source, "config layer");
    }

    match dispatch(&cli, config, &sources).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            if pipeline_error(&e).is_some_and(|kind| kind.is_usage_error()) {
                ExitCode::from(EXIT_USAGE)
            } else {
                ExitCode::FAILURE
            }
        }
    }
}

fn load(cli: &Cli) -> Result<(Config, Vec<String>)> {
    let loader = build_config_loader(&cli.global)?;
    let sources = loader.describe_sources();
    Ok((loader.build()?, sources))
}

async fn dispatch(cli: &Cli, config: Config, sources: &[String]) -> Result<()> {
    if cli.global.list_platforms {
        return run_list_platforms_command(&config);
    }
    if cli.global.show_config {
        run_show_config_command(&config, sources);
        return Ok(());
    }

    let request = release_request(&cli.export)?;

    let cancel_token = CancellationToken::new();
    let signal_token = cancel_token.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            tracing::warn!("received Ctrl+C, interrupting export");
            signal_token.cancel();
        }
    });

    let report = run_export_command(&request, config, cancel_token).await?;
    println!("{}", success_message(&report));
    Ok(())
}
