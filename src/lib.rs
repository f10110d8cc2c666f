pub mod config;
pub mod manifest;
pub mod media;
pub mod pipeline;
pub mod platform;

pub use config::{Credentials, Endpoints, UploaderConfig};
pub use pipeline::outcome::{FileOutcome, RunSummary, TranscriptOutcome};
pub use pipeline::run;
pub use platform::{AccessToken, HttpPlatform, PlatformError, VideoPlatform};
