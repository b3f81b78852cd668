use serde_json::Value;
use std::path::Path;

use super::error::RecordFileError;
use super::record::{session_pid, TrialRecord};

/// The layout a session log was stored in
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
    /// One JSON array holding every record
    Document,
    /// One JSON array per line, as written by the multi-line session export
    MultiLine,
}

/// A fully loaded experiment session log.
///
/// Session logs are small, so the whole file is read and parsed at once.
#[derive(Debug, Clone)]
pub struct RecordFile {
    records: Vec<TrialRecord>,
    format: LogFormat,
}

impl RecordFile {
    /// Open and parse the session log at path
    pub fn new(path: &Path) -> Result<Self, RecordFileError> {
        if !path.exists() {
            return Err(RecordFileError::BadFilePath(path.to_path_buf()));
        }
        let content = std::fs::read_to_string(path)?;
        let (records, format) = parse_records(path, &content)?;
        Ok(Self {
            records,
            format,
        })
    }

    pub fn get_records(&self) -> &[TrialRecord] {
        &self.records
    }

    pub fn get_format(&self) -> LogFormat {
        self.format
    }

    /// Participant ID from the first record
    pub fn get_pid(&self) -> String {
        session_pid(&self.records)
    }
}

/// Convert a parsed array into records, rejecting any other JSON document
fn into_records(path: &Path, value: Value) -> Result<Vec<TrialRecord>, RecordFileError> {
    match value {
        Value::Array(items) => Ok(items.into_iter().map(TrialRecord::from).collect()),
        _ => Err(RecordFileError::NotAnArray(path.to_path_buf())),
    }
}

/// Parse log content, first as a single JSON document and then, if that fails,
/// as one JSON array per line.
///
/// Path is only used for error reporting.
pub fn parse_records(
    path: &Path,
    content: &str,
) -> Result<(Vec<TrialRecord>, LogFormat), RecordFileError> {
    if let Ok(document) = serde_json::from_str::<Value>(content) {
        return Ok((into_records(path, document)?, LogFormat::Document));
    }

    let mut records = Vec::new();
    for (idx, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let value = serde_json::from_str::<Value>(line).map_err(|source| {
            RecordFileError::ParsingError {
                path: path.to_path_buf(),
                line: idx + 1,
                source,
            }
        })?;
        records.extend(into_records(path, value)?);
    }
    Ok((records, LogFormat::MultiLine))
}
