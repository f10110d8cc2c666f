/// What happened to one input row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The video is stored on the platform under `edx_video_id`.
    Uploaded {
        edx_video_id: String,
        transcript: TranscriptOutcome,
    },
    /// The file exists locally but did not make it to the platform.
    /// Still reported, with a blank id.
    Failed { reason: String },
    /// The local file does not exist. Not reported.
    Skipped { reason: String },
}

impl FileOutcome {
    /// The id to put in the report, or `None` if the row is not reported.
    pub fn report_id(&self) -> Option<&str> {
        match self {
            FileOutcome::Uploaded { edx_video_id, .. } => Some(edx_video_id.as_str()),
            FileOutcome::Failed { .. } => Some(""),
            FileOutcome::Skipped { .. } => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptOutcome {
    NotRequested,
    Uploaded,
    Failed { reason: String },
}

/// Totals for a finished run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunSummary {
    pub uploaded: usize,
    pub failed: usize,
    pub skipped: usize,
    pub transcripts_uploaded: usize,
    pub transcripts_failed: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &FileOutcome) {
        match outcome {
            FileOutcome::Uploaded { transcript, .. } => {
                self.uploaded += 1;
                match transcript {
                    TranscriptOutcome::NotRequested => {}
                    TranscriptOutcome::Uploaded => self.transcripts_uploaded += 1,
                    TranscriptOutcome::Failed { .. } => self.transcripts_failed += 1,
                }
            }
            FileOutcome::Failed { .. } => self.failed += 1,
            FileOutcome::Skipped { .. } => self.skipped += 1,
        }
    }

    /// Rows written to the report.
    pub fn reported(&self) -> usize {
        self.uploaded + self.failed
    }
}
