use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{bail, Context, Result};

// Remote endpoints
pub const DEFAULT_TOKEN_URL: &str = "https://api.edx.org/oauth2/v1/access_token";
pub const DEFAULT_UPLOAD_LINK_BASE_URL: &str = "https://studio.edx.org/generate_video_upload_link/";
pub const DEFAULT_TRANSCRIPT_URL: &str = "https://studio.edx.org/transcript_upload/";

// Credentials
pub const CLIENT_ID_ENV: &str = "CC2OLX_CLIENT";
pub const CLIENT_SECRET_ENV: &str = "CC2OLX_SECRET";

pub const DEFAULT_OUTPUT_CSV: &str = "video_upload_output.csv";

// Generous enough for a single PUT of a long lecture recording.
pub const DEFAULT_TIMEOUT_SECS: u64 = 3600;

// Report columns, in output order.
pub const COL_EDX_ID: &str = "Edx Id";
pub const COL_RELATIVE_FILE_PATH: &str = "Relative File Path";
pub const COL_ADDITIONAL_NOTES: &str = "Additional Notes";
pub const COL_YOUTUBE_ID: &str = "Youtube ID";
pub const COL_EXTERNAL_VIDEO_LINK: &str = "External Video Link";
pub const COL_LANGUAGES: &str = "Languages";

// Input-only columns.
pub const COL_TRANSCRIPT_FILE: &str = "Transcript File";
pub const COL_TRANSCRIPT_LANGUAGE: &str = "Transcript Language";

pub const REPORT_HEADER: [&str; 6] = [
    COL_EDX_ID,
    COL_RELATIVE_FILE_PATH,
    COL_ADDITIONAL_NOTES,
    COL_YOUTUBE_ID,
    COL_EXTERNAL_VIDEO_LINK,
    COL_LANGUAGES,
];

/// OAuth2 client credentials for the client-credentials grant.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub client_id: String,
    pub client_secret: String,
}

impl Credentials {
    pub fn new(client_id: impl Into<String>, client_secret: impl Into<String>) -> Self {
        Self {
            client_id: client_id.into(),
            client_secret: client_secret.into(),
        }
    }

    /// Load credentials from `CC2OLX_CLIENT` / `CC2OLX_SECRET`.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(
            required_env(CLIENT_ID_ENV)?,
            required_env(CLIENT_SECRET_ENV)?,
        ))
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"<redacted>")
            .finish()
    }
}

fn required_env(name: &str) -> Result<String> {
    let value = std::env::var(name)
        .with_context(|| format!("{name} environment variable is not set"))?;
    if value.trim().is_empty() {
        bail!("{name} environment variable is empty");
    }
    Ok(value)
}

/// Remote endpoints the uploader talks to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    pub token_url: String,
    /// The course id is appended verbatim to this base.
    pub upload_link_base_url: String,
    pub transcript_url: String,
}

impl Endpoints {
    pub fn upload_link_url(&self, course_id: &str) -> String {
        format!("{}{}", self.upload_link_base_url, course_id)
    }
}

impl Default for Endpoints {
    fn default() -> Self {
        Self {
            token_url: DEFAULT_TOKEN_URL.to_string(),
            upload_link_base_url: DEFAULT_UPLOAD_LINK_BASE_URL.to_string(),
            transcript_url: DEFAULT_TRANSCRIPT_URL.to_string(),
        }
    }
}

/// Runtime configuration for one upload batch.
#[derive(Debug, Clone)]
pub struct UploaderConfig {
    pub course_id: String,
    pub directory: PathBuf,
    pub input_csv: PathBuf,
    pub output_csv: PathBuf,
    pub endpoints: Endpoints,
    /// `None` disables the per-request timeout.
    pub timeout: Option<Duration>,
}

impl UploaderConfig {
    pub fn new(
        course_id: impl Into<String>,
        directory: impl Into<PathBuf>,
        input_csv: impl Into<PathBuf>,
    ) -> Self {
        Self {
            course_id: course_id.into(),
            directory: directory.into(),
            input_csv: input_csv.into(),
            output_csv: PathBuf::from(DEFAULT_OUTPUT_CSV),
            endpoints: Endpoints::default(),
            timeout: timeout_from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

/// Map a CLI timeout in seconds to a request timeout; `0` means none.
pub fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}
