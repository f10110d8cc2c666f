pub mod http;

use std::collections::HashMap;
use std::path::Path;

use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub use http::HttpPlatform;

#[derive(Error, Debug)]
pub enum PlatformError {
    #[error("cannot build HTTP client: {0}")]
    Client(#[source] reqwest::Error),
    #[error("request to {url} failed: {source}")]
    Transport {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned {status}: {body}")]
    Status {
        url: String,
        status: StatusCode,
        body: String,
    },
    #[error("malformed response from {url}: {reason}")]
    Malformed { url: String, reason: String },
    #[error("cannot read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Bearer token from the client-credentials grant. Held in memory only.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn secret(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("AccessToken(<redacted>)")
    }
}

/// One file to register with the platform.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UploadRequest {
    pub file_name: String,
    pub content_type: String,
}

/// The platform's answer for one [`UploadRequest`].
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct UploadLink {
    #[serde(default)]
    pub edx_video_id: String,
    #[serde(default)]
    pub upload_url: String,
}

/// Upload-link results keyed by requested file name. Files the platform
/// gave no usable link for are absent.
pub type UploadLinks = HashMap<String, UploadLink>;

/// The remote course platform.
///
/// The pipeline only talks to the platform through this trait, so tests can
/// drive it with an in-memory implementation.
pub trait VideoPlatform {
    /// Exchange client credentials for an access token.
    fn obtain_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, PlatformError>;

    /// Ask for a signed upload URL and video id for each file in `files`.
    fn request_upload_links(
        &self,
        course_id: &str,
        files: &[UploadRequest],
        token: &AccessToken,
    ) -> Result<UploadLinks, PlatformError>;

    /// PUT `data` to a signed upload URL and return the response status.
    fn upload_video(
        &self,
        upload_url: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StatusCode, PlatformError>;

    /// POST a transcript for `edx_video_id` in `language_code` and return
    /// the response status. Empty ids or codes are sent as-is; the platform
    /// answers those with 400.
    fn upload_transcript(
        &self,
        transcript: &Path,
        edx_video_id: &str,
        language_code: &str,
        token: &AccessToken,
    ) -> Result<StatusCode, PlatformError>;
}

/// Pair the `files` entries of an upload-link response with the requested
/// names, by position. Entries with an empty id or URL are dropped.
pub(crate) fn pair_upload_links(requested: &[UploadRequest], links: Vec<UploadLink>) -> UploadLinks {
    requested
        .iter()
        .zip(links)
        .filter(|(_, link)| !link.edx_video_id.is_empty() && !link.upload_url.is_empty())
        .map(|(req, link)| (req.file_name.clone(), link))
        .collect()
}
