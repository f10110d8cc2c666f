pub mod outcome;
pub mod upload;

use anyhow::{Context, Result};
use indicatif::{ProgressBar, ProgressStyle};
use log::info;

use crate::config::{Credentials, UploaderConfig};
use crate::manifest::{self, InputRow, OutputRow};
use crate::platform::{AccessToken, VideoPlatform};
use outcome::RunSummary;

/// Full upload pipeline: credentials -> token -> per-row upload -> report.
///
/// Only the credential stage and reading/writing the CSV files can fail the
/// run. Per-file problems are logged and show up as blank ids in the report.
pub fn run<P: VideoPlatform + ?Sized>(
    platform: &P,
    credentials: &Credentials,
    cfg: &UploaderConfig,
) -> Result<RunSummary> {
    // Step 1: Authenticate
    info!("requesting access token");
    let token = platform
        .obtain_access_token(&credentials.client_id, &credentials.client_secret)
        .context("failed to obtain access token")?;

    // Step 2: Read input metadata
    info!("reading input rows from {}", cfg.input_csv.display());
    let rows = manifest::read_input_rows(&cfg.input_csv)?;
    info!("{} input rows for course {}", rows.len(), cfg.course_id);

    // Step 3: Upload, one row at a time
    let (report, summary) = upload_rows(platform, cfg, &token, &rows)?;

    // Step 4: Write the report
    info!("writing report: {}", cfg.output_csv.display());
    manifest::write_report(&cfg.output_csv, &report)?;

    info!(
        "done: {} uploaded, {} failed, {} skipped ({} transcripts uploaded, {} failed)",
        summary.uploaded,
        summary.failed,
        summary.skipped,
        summary.transcripts_uploaded,
        summary.transcripts_failed
    );
    Ok(summary)
}

/// Upload every row in order and collect the report rows.
pub fn upload_rows<P: VideoPlatform + ?Sized>(
    platform: &P,
    cfg: &UploaderConfig,
    token: &AccessToken,
    rows: &[InputRow],
) -> Result<(Vec<OutputRow>, RunSummary)> {
    let progress = ProgressBar::new(rows.len() as u64);
    progress.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} videos {msg}")?
            .progress_chars("##-"),
    );

    let mut report = Vec::with_capacity(rows.len());
    let mut summary = RunSummary::default();

    for row in rows {
        progress.set_message(row.relative_file_path.clone());
        let outcome = upload::upload_row(platform, cfg, token, row);
        summary.record(&outcome);
        if let Some(id) = outcome.report_id() {
            report.push(OutputRow::from_input(row, id));
        }
        progress.inc(1);
    }

    progress.finish_with_message("upload complete");
    Ok((report, summary))
}
