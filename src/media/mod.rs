use std::path::Path;

use thiserror::Error;

#[derive(Error, Debug, PartialEq, Eq)]
pub enum MediaError {
    #[error("unsupported video extension: {0:?}")]
    UnsupportedExtension(String),
    #[error("path has no usable file name: {0}")]
    NoFileName(String),
}

/// Video extensions the platform accepts, lowercase, without the dot.
const VIDEO_CONTENT_TYPES: [(&str, &str); 2] = [("mp4", "video/mp4"), ("mov", "video/quicktime")];

/// Select the `Content-Type` for a video by its extension (case-insensitive).
pub fn content_type_for(path: &Path) -> Result<&'static str, MediaError> {
    let ext = path
        .extension()
        .and_then(|e| e.to_str())
        .map(str::to_ascii_lowercase)
        .unwrap_or_default();

    VIDEO_CONTENT_TYPES
        .iter()
        .find(|(known, _)| *known == ext)
        .map(|(_, content_type)| *content_type)
        .ok_or(MediaError::UnsupportedExtension(ext))
}

/// The name a file is registered under on the platform: its final path component.
pub fn upload_file_name(path: &Path) -> Result<String, MediaError> {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(str::to_string)
        .ok_or_else(|| MediaError::NoFileName(path.display().to_string()))
}
