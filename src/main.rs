use std::path::PathBuf;

use anyhow::Result;
use clap::Parser;
use log::info;

use video_upload::config::{
    timeout_from_secs, DEFAULT_OUTPUT_CSV, DEFAULT_TIMEOUT_SECS, DEFAULT_TOKEN_URL,
    DEFAULT_TRANSCRIPT_URL, DEFAULT_UPLOAD_LINK_BASE_URL,
};
use video_upload::{pipeline, Credentials, Endpoints, HttpPlatform, UploaderConfig};

/// Upload course videos and transcripts to the course platform and write a
/// CSV report of the assigned video ids.
///
/// Reads OAuth2 client credentials from CC2OLX_CLIENT and CC2OLX_SECRET.
#[derive(Parser, Debug, PartialEq)]
#[command(name = "video_upload", version, about)]
struct Cli {
    /// Target course id, e.g. course-v1:Org+Num+Run
    course_id: String,

    /// Directory the input CSV's relative file paths resolve against
    directory: PathBuf,

    /// Input metadata CSV
    input_csv: PathBuf,

    /// Where to write the report
    #[arg(long, default_value = DEFAULT_OUTPUT_CSV)]
    output_csv: PathBuf,

    /// OAuth2 token endpoint
    #[arg(long, default_value = DEFAULT_TOKEN_URL)]
    token_url: String,

    /// Upload-link endpoint; the course id is appended to it
    #[arg(long, default_value = DEFAULT_UPLOAD_LINK_BASE_URL)]
    upload_link_url: String,

    /// Transcript upload endpoint
    #[arg(long, default_value = DEFAULT_TRANSCRIPT_URL)]
    transcript_url: String,

    /// Per-request timeout in seconds, 0 for none
    #[arg(long, default_value_t = DEFAULT_TIMEOUT_SECS)]
    timeout_secs: u64,
}

impl Cli {
    fn into_config(self) -> UploaderConfig {
        UploaderConfig {
            course_id: self.course_id,
            directory: self.directory,
            input_csv: self.input_csv,
            output_csv: self.output_csv,
            endpoints: Endpoints {
                token_url: self.token_url,
                upload_link_base_url: self.upload_link_url,
                transcript_url: self.transcript_url,
            },
            timeout: timeout_from_secs(self.timeout_secs),
        }
    }
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cfg = Cli::parse().into_config();
    let credentials = Credentials::from_env()?;

    let platform = HttpPlatform::new(cfg.endpoints.clone(), cfg.timeout)?;
    info!("token endpoint: {}", platform.endpoints().token_url);

    let summary = pipeline::run(&platform, &credentials, &cfg)?;
    info!(
        "report {} has {} rows",
        cfg.output_csv.display(),
        summary.reported()
    );

    Ok(())
}
