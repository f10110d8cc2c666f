use std::collections::HashMap;
use std::io::{Read, Write};
use std::path::Path;

use anyhow::{bail, Context, Result};
use log::warn;

use crate::config::{
    COL_ADDITIONAL_NOTES, COL_EXTERNAL_VIDEO_LINK, COL_LANGUAGES, COL_RELATIVE_FILE_PATH,
    COL_TRANSCRIPT_FILE, COL_TRANSCRIPT_LANGUAGE, COL_YOUTUBE_ID, REPORT_HEADER,
};

/// One record of the input metadata CSV.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputRow {
    pub relative_file_path: String,
    pub youtube_id: String,
    pub external_video_link: String,
    /// Comma- or dash-joined language codes, kept verbatim for the report.
    pub languages: String,
    pub additional_notes: String,
    pub transcript_file: Option<String>,
    pub transcript_language: Option<String>,
}

impl InputRow {
    /// Language to tag the transcript with: the explicit column, else the
    /// first entry of `languages`.
    pub fn transcript_language_code(&self) -> Option<String> {
        if let Some(lang) = &self.transcript_language {
            return Some(lang.clone());
        }
        self.languages
            .split([',', '-'])
            .map(str::trim)
            .find(|code| !code.is_empty())
            .map(str::to_string)
    }
}

/// One record of the generated report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OutputRow {
    pub edx_id: String,
    pub relative_file_path: String,
    pub additional_notes: String,
    pub youtube_id: String,
    pub external_video_link: String,
    pub languages: String,
}

impl OutputRow {
    /// Combine an input row's metadata with the identifier the platform
    /// assigned (empty when the upload failed).
    pub fn from_input(row: &InputRow, edx_id: impl Into<String>) -> Self {
        Self {
            edx_id: edx_id.into(),
            relative_file_path: row.relative_file_path.clone(),
            additional_notes: row.additional_notes.clone(),
            youtube_id: row.youtube_id.clone(),
            external_video_link: row.external_video_link.clone(),
            languages: row.languages.clone(),
        }
    }

    fn fields(&self) -> [&str; 6] {
        [
            self.edx_id.as_str(),
            self.relative_file_path.as_str(),
            self.additional_notes.as_str(),
            self.youtube_id.as_str(),
            self.external_video_link.as_str(),
            self.languages.as_str(),
        ]
    }
}

/// Read every input row from the CSV at `path`.
pub fn read_input_rows(path: &Path) -> Result<Vec<InputRow>> {
    let file = std::fs::File::open(path)
        .with_context(|| format!("cannot open input csv {}", path.display()))?;
    parse_input_rows(file).with_context(|| format!("cannot parse input csv {}", path.display()))
}

/// Parse headed input CSV data. Rows with a blank file path are dropped.
pub fn parse_input_rows<R: Read>(reader: R) -> Result<Vec<InputRow>> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::Headers)
        .flexible(true)
        .from_reader(reader);

    let columns: HashMap<String, usize> = csv_reader
        .headers()?
        .iter()
        .enumerate()
        .map(|(i, name)| (name.to_string(), i))
        .collect();

    if !columns.contains_key(COL_RELATIVE_FILE_PATH) {
        bail!("missing required column {COL_RELATIVE_FILE_PATH:?}");
    }

    let mut rows = Vec::new();
    for (line, record) in csv_reader.records().enumerate() {
        let record = record?;
        let field = |name: &str| -> String {
            columns
                .get(name)
                .and_then(|&i| record.get(i))
                .unwrap_or_default()
                .to_string()
        };
        let optional = |name: &str| -> Option<String> {
            Some(field(name).trim().to_string()).filter(|v| !v.is_empty())
        };

        let relative_file_path = field(COL_RELATIVE_FILE_PATH);
        if relative_file_path.trim().is_empty() {
            // +2: one for the header, one for 1-based numbering
            warn!("input row {} has no {COL_RELATIVE_FILE_PATH:?}, skipping", line + 2);
            continue;
        }

        rows.push(InputRow {
            relative_file_path,
            youtube_id: field(COL_YOUTUBE_ID),
            external_video_link: field(COL_EXTERNAL_VIDEO_LINK),
            languages: field(COL_LANGUAGES),
            additional_notes: field(COL_ADDITIONAL_NOTES),
            transcript_file: optional(COL_TRANSCRIPT_FILE),
            transcript_language: optional(COL_TRANSCRIPT_LANGUAGE),
        });
    }

    Ok(rows)
}

/// Write the report to `path`: header first, then `rows` in order.
pub fn write_report(path: &Path, rows: &[OutputRow]) -> Result<()> {
    let file = std::fs::File::create(path)
        .with_context(|| format!("cannot create report {}", path.display()))?;
    write_report_to(file, rows).with_context(|| format!("cannot write report {}", path.display()))
}

pub fn write_report_to<W: Write>(writer: W, rows: &[OutputRow]) -> Result<()> {
    let mut csv_writer = csv::Writer::from_writer(writer);
    csv_writer.write_record(REPORT_HEADER)?;
    for row in rows {
        csv_writer.write_record(row.fields())?;
    }
    csv_writer.flush()?;
    Ok(())
}
