use std::path::Path;

use log::{info, warn};
use reqwest::StatusCode;

use super::outcome::{FileOutcome, TranscriptOutcome};
use crate::config::UploaderConfig;
use crate::manifest::InputRow;
use crate::media;
use crate::platform::{AccessToken, UploadRequest, VideoPlatform};

/// Upload one row's video, then its transcript if it names one.
/// Every failure is folded into the returned outcome.
pub fn upload_row<P: VideoPlatform + ?Sized>(
    platform: &P,
    cfg: &UploaderConfig,
    token: &AccessToken,
    row: &InputRow,
) -> FileOutcome {
    let video_path = cfg.directory.join(&row.relative_file_path);
    if !video_path.is_file() {
        let reason = format!("{} not found", video_path.display());
        warn!("skipping {}: {reason}", row.relative_file_path);
        return FileOutcome::Skipped { reason };
    }

    let edx_video_id = match upload_video_file(platform, cfg, token, &video_path) {
        Ok(id) => id,
        Err(reason) => {
            warn!("upload of {} failed: {reason}", row.relative_file_path);
            return FileOutcome::Failed { reason };
        }
    };
    info!("uploaded {} as {edx_video_id}", row.relative_file_path);

    let transcript = match &row.transcript_file {
        Some(relative) => upload_transcript_file(
            platform,
            &cfg.directory.join(relative),
            &edx_video_id,
            &row.transcript_language_code().unwrap_or_default(),
            token,
        ),
        None => TranscriptOutcome::NotRequested,
    };

    FileOutcome::Uploaded {
        edx_video_id,
        transcript,
    }
}

/// Negotiate an upload link for `path` and PUT its bytes there.
/// Returns the platform's video id.
fn upload_video_file<P: VideoPlatform + ?Sized>(
    platform: &P,
    cfg: &UploaderConfig,
    token: &AccessToken,
    path: &Path,
) -> Result<String, String> {
    let content_type = media::content_type_for(path).map_err(|e| e.to_string())?;
    let file_name = media::upload_file_name(path).map_err(|e| e.to_string())?;

    let request = UploadRequest {
        file_name: file_name.clone(),
        content_type: content_type.to_string(),
    };
    let mut links = platform
        .request_upload_links(&cfg.course_id, std::slice::from_ref(&request), token)
        .map_err(|e| format!("upload link request failed: {e}"))?;
    let link = links
        .remove(&file_name)
        .ok_or_else(|| format!("no upload link returned for {file_name:?}"))?;

    let data = std::fs::read(path).map_err(|e| format!("cannot read {}: {e}", path.display()))?;
    let status = platform
        .upload_video(&link.upload_url, data, content_type)
        .map_err(|e| e.to_string())?;
    if status != StatusCode::OK {
        return Err(format!("video upload returned {status}"));
    }

    Ok(link.edx_video_id)
}

fn upload_transcript_file<P: VideoPlatform + ?Sized>(
    platform: &P,
    path: &Path,
    edx_video_id: &str,
    language_code: &str,
    token: &AccessToken,
) -> TranscriptOutcome {
    let failed = |reason: String| {
        warn!("transcript {} for {edx_video_id} failed: {reason}", path.display());
        TranscriptOutcome::Failed { reason }
    };

    match platform.upload_transcript(path, edx_video_id, language_code, token) {
        Ok(status) if status == StatusCode::CREATED => {
            info!("uploaded transcript {} ({language_code}) for {edx_video_id}", path.display());
            TranscriptOutcome::Uploaded
        }
        Ok(status) => failed(format!("transcript upload returned {status}")),
        Err(e) => failed(e.to_string()),
    }
}
