use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RecordFileError {
    #[error("Could not open record file because file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Record file failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Record file {path:?} is not valid JSON, and line {line} failed the multi-line format: {source}")]
    ParsingError {
        path: PathBuf,
        line: usize,
        source: serde_json::Error,
    },
    #[error("Record file {0:?} does not contain an array of trial records")]
    NotAnArray(PathBuf),
}

#[derive(Debug, Error)]
pub enum LogStackError {
    #[error("LogStack could not open input directory {0:?} because it does not exist")]
    BadDirectory(PathBuf),
    #[error("LogStack failed to walk the input directory: {0}")]
    WalkError(#[from] walkdir::Error),
    #[error("LogStack did not find any .{1} files in {0:?}")]
    NoMatchingFiles(PathBuf, String),
}

#[derive(Debug, Error)]
pub enum TableWriterError {
    #[error("TableWriter failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("TableWriter failed to write CSV: {0}")]
    CsvError(#[from] csv::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to load configuration as file {0:?} does not exist")]
    BadFilePath(PathBuf),
    #[error("Config failed due to IO error: {0}")]
    IOError(#[from] std::io::Error),
    #[error("Config failed to parse YAML: {0}")]
    ParsingError(#[from] serde_yaml::Error),
}

#[derive(Debug, Error)]
pub enum ProcessorError {
    #[error("Processor failed due to RecordFile error: {0}")]
    RecordError(#[from] RecordFileError),
    #[error("Processor failed due to LogStack error: {0}")]
    StackError(#[from] LogStackError),
    #[error("Processor failed due to TableWriter error: {0}")]
    WriterError(#[from] TableWriterError),
    #[error("Processor failed due to Config error: {0}")]
    ConfigError(#[from] ConfigError),
    #[error("Processor failed due to IO error: {0}")]
    IoError(#[from] std::io::Error),
}
