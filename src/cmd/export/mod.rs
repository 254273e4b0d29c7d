// sierra-export: Sierra Engine Release Packager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Export command: turns the positionals into a [`ReleaseRequest`] and runs
//! the assembler.
//!
//! ```text
//! --win-x64 --/out
//!     |  strip leading "--", require both   (else MissingArguments)
//!     v
//! ReleaseRequest { platform, output_root }
//!     |
//!     v
//! ReleaseAssembler::run --> ReleaseReport --> "Success!"
//! ```

use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::cli::export::ExportArgs;
use crate::config::Config;
use crate::error::{PipelineError, Result};
use crate::pipeline::{ReleaseAssembler, ReleaseReport, ReleaseRequest};
use crate::tools::ToolContext;

/// Builds the request from the positionals.
///
/// # Errors
///
/// Returns `PipelineError::MissingArguments` unless both were given.
pub fn release_request(args: &ExportArgs) -> std::result::Result<ReleaseRequest, PipelineError> {
    let (platform, output) = args.values().ok_or(PipelineError::MissingArguments)?;
    Ok(ReleaseRequest::new(platform, output))
}

/// Main handler for the export command.
///
/// # Errors
///
/// Returns the error of the stage that aborted the run.
pub async fn run_export_command(
    request: &ReleaseRequest,
    config: Config,
    cancel_token: CancellationToken,
) -> Result<ReleaseReport> {
    let catalog = config.catalog()?;
    let dry_run = config.global.dry;
    let ctx = ToolContext::new(Arc::new(config), cancel_token, dry_run);

    info!(
        platform = %request.platform,
        output = %request.output_root.display(),
        dry_run,
        "exporting"
    );

    let mut assembler = ReleaseAssembler::new(ctx, catalog);
    assembler.run(request).await
}

/// Success message printed after an export.
#[must_use]
pub fn success_message(report: &ReleaseReport) -> String {
    if report.dry_run {
        format!(
            "\nDry run finished, nothing was written. The release would be at {}",
            report.final_dir.display()
        )
    } else {
        format!("\nSuccess! The release is at {}", report.final_dir.display())
    }
}
