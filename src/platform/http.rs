use std::path::Path;
use std::time::Duration;

use log::debug;
use reqwest::blocking::{multipart, Client, RequestBuilder, Response};
use reqwest::header::CONTENT_TYPE;
use reqwest::StatusCode;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use super::{
    pair_upload_links, AccessToken, PlatformError, UploadLink, UploadLinks, UploadRequest,
    VideoPlatform,
};
use crate::config::Endpoints;

#[derive(Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Serialize)]
struct UploadLinkRequestBody<'a> {
    files: &'a [UploadRequest],
}

#[derive(Deserialize)]
struct UploadLinkResponseBody {
    #[serde(default)]
    files: Vec<UploadLink>,
}

/// [`VideoPlatform`] over blocking HTTP.
pub struct HttpPlatform {
    client: Client,
    endpoints: Endpoints,
}

impl HttpPlatform {
    pub fn new(endpoints: Endpoints, timeout: Option<Duration>) -> Result<Self, PlatformError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("video_upload/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(PlatformError::Client)?;
        Ok(Self { client, endpoints })
    }

    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

fn send(url: &str, request: RequestBuilder) -> Result<Response, PlatformError> {
    debug!("sending request to {url}");
    request.send().map_err(|source| PlatformError::Transport {
        url: url.to_string(),
        source,
    })
}

/// Fail on a non-2xx status, otherwise decode the JSON body.
fn decode_json<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, PlatformError> {
    let status = response.status();
    let body = response.text().map_err(|source| PlatformError::Transport {
        url: url.to_string(),
        source,
    })?;
    if !status.is_success() {
        return Err(PlatformError::Status {
            url: url.to_string(),
            status,
            body,
        });
    }
    serde_json::from_str(&body).map_err(|e| PlatformError::Malformed {
        url: url.to_string(),
        reason: e.to_string(),
    })
}

impl VideoPlatform for HttpPlatform {
    fn obtain_access_token(
        &self,
        client_id: &str,
        client_secret: &str,
    ) -> Result<AccessToken, PlatformError> {
        let url = &self.endpoints.token_url;
        let request = self.client.post(url).form(&[
            ("grant_type", "client_credentials"),
            ("client_id", client_id),
            ("client_secret", client_secret),
        ]);
        let token: TokenResponse = decode_json(url, send(url, request)?)?;
        if token.access_token.is_empty() {
            return Err(PlatformError::Malformed {
                url: url.clone(),
                reason: "empty access_token".to_string(),
            });
        }
        Ok(AccessToken::new(token.access_token))
    }

    fn request_upload_links(
        &self,
        course_id: &str,
        files: &[UploadRequest],
        token: &AccessToken,
    ) -> Result<UploadLinks, PlatformError> {
        let url = self.endpoints.upload_link_url(course_id);
        let request = self
            .client
            .post(&url)
            .bearer_auth(token.secret())
            .json(&UploadLinkRequestBody { files });
        let body: UploadLinkResponseBody = decode_json(&url, send(&url, request)?)?;
        Ok(pair_upload_links(files, body.files))
    }

    fn upload_video(
        &self,
        upload_url: &str,
        data: Vec<u8>,
        content_type: &str,
    ) -> Result<StatusCode, PlatformError> {
        let request = self
            .client
            .put(upload_url)
            .header(CONTENT_TYPE, content_type)
            .body(data);
        Ok(send(upload_url, request)?.status())
    }

    fn upload_transcript(
        &self,
        transcript: &Path,
        edx_video_id: &str,
        language_code: &str,
        token: &AccessToken,
    ) -> Result<StatusCode, PlatformError> {
        let url = &self.endpoints.transcript_url;
        let form = multipart::Form::new()
            .text("edx_video_id", edx_video_id.to_string())
            .text("language_code", language_code.to_string())
            .file("file", transcript)
            .map_err(|source| PlatformError::Io {
                path: transcript.display().to_string(),
                source,
            })?;
        let request = self
            .client
            .post(url)
            .bearer_auth(token.secret())
            .multipart(form);
        Ok(send(url, request)?.status())
    }
}
