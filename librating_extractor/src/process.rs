use fxhash::FxHashSet;
use std::path::{Path, PathBuf};

use super::batch_status::BatchStatus;
use super::config::{default_dial_ratings_path, default_ratings_path, Config};
use super::error::ProcessorError;
use super::extractor::{DialTable, TrialExtractor};
use super::log_stack::LogStack;
use super::record_file::{LogFormat, RecordFile};
use super::row::RatingRow;
use super::table_writer::TableWriter;

/// Open a session log, noting in the log if it needed the multi-line fallback
fn open_record_file(path: &Path) -> Result<RecordFile, ProcessorError> {
    let file = RecordFile::new(path)?;
    if file.get_format() == LogFormat::MultiLine {
        log::info!(
            "Parsed {} as multi-line format, {} entries",
            path.display(),
            file.get_records().len()
        );
    }
    if file.get_records().is_empty() {
        log::warn!("{} contains no trial records", path.display());
    }
    Ok(file)
}

/// Extract the discrete ratings of a single session log to a CSV file.
///
/// If no output path is given, the table is written next to the input as `<name>_ratings.csv`.
/// Returns the path of the written table.
pub fn process_ratings_file(
    input_path: &Path,
    output_path: Option<&Path>,
) -> Result<PathBuf, ProcessorError> {
    let output_path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_ratings_path(input_path));
    let file = open_record_file(input_path)?;
    let pid = file.get_pid();

    let rows = TrialExtractor::new(&pid, file.get_records()).extract_ratings();
    TableWriter::create(&output_path)?.write_ratings(&rows)?;

    log::info!("Extracted {} trials for PID {}", rows.len(), pid);
    log::info!("CSV saved to: {}", output_path.display());
    Ok(output_path)
}

/// Extract the dial ratings of a single session log to a CSV file.
///
/// If no output path is given, the table is written next to the input as `<name>_dial_ratings.csv`.
/// Returns the path of the written table.
pub fn process_dial_ratings_file(
    input_path: &Path,
    output_path: Option<&Path>,
) -> Result<PathBuf, ProcessorError> {
    let output_path = output_path
        .map(Path::to_path_buf)
        .unwrap_or_else(|| default_dial_ratings_path(input_path));
    let file = open_record_file(input_path)?;
    let pid = file.get_pid();

    let table = TrialExtractor::new(&pid, file.get_records()).extract_dial_ratings();
    TableWriter::create(&output_path)?.write_dial_ratings(&table)?;

    log::info!("Extracted {} video trials for PID {}", table.rows.len(), pid);
    log::info!("Max samples per video: {}", table.max_samples);
    log::info!("CSV saved to: {}", output_path.display());
    Ok(output_path)
}

/// The combined tables of every participant in a batch
#[derive(Debug, Clone, Default)]
pub struct BatchTables {
    pub ratings: Vec<RatingRow>,
    pub dial: DialTable,
    /// Participants in the order their logs were processed
    pub participants: Vec<String>,
    /// Logs skipped because their participant was already seen
    pub skipped_files: Vec<PathBuf>,
}

/// What a batch run did
#[derive(Debug, Clone)]
pub struct BatchSummary {
    pub files_found: usize,
    pub files_skipped: usize,
    /// Sorted participant IDs
    pub participants: Vec<String>,
    pub rating_rows: usize,
    pub dial_rows: usize,
    pub max_samples: usize,
    pub ratings_path: PathBuf,
    pub dial_ratings_path: PathBuf,
}

/// Extract and combine the tables of every log in the stack.
///
/// The first log of each participant wins; later logs with the same participant ID are skipped.
/// Any log that cannot be parsed aborts the whole batch.
pub fn collect_batch<F: FnMut(BatchStatus)>(
    mut stack: LogStack,
    mut on_status: F,
) -> Result<BatchTables, ProcessorError> {
    let files_total = stack.len();
    let mut tables = BatchTables::default();
    let mut seen_pids: FxHashSet<String> = FxHashSet::default();
    let mut files_done = 0;

    while let Some(path) = stack.pop_next_file() {
        log::info!("Processing: {}", path.display());
        let file = open_record_file(&path)?;
        let pid = file.get_pid();
        files_done += 1;

        if !seen_pids.insert(pid.clone()) {
            log::warn!("Duplicate PID {}, skipping {}", pid, path.display());
            tables.skipped_files.push(path.clone());
            on_status(BatchStatus::new(files_done, files_total, path));
            continue;
        }

        let extractor = TrialExtractor::new(&pid, file.get_records());
        let ratings = extractor.extract_ratings();
        log::info!("PID {}: {} discrete rating trials", pid, ratings.len());
        tables.ratings.extend(ratings);

        let dial = extractor.extract_dial_ratings();
        log::info!(
            "PID {}: {} dial rating trials (max {} samples)",
            pid,
            dial.rows.len(),
            dial.max_samples
        );
        tables.dial.append(dial);
        tables.participants.push(pid);

        on_status(BatchStatus::new(files_done, files_total, path));
    }

    Ok(tables)
}

/// The batch loop of rating_extractor.
///
/// Finds every session log under the configured input directory, extracts and combines their
/// tables, and writes the two combined tables to the output directory. Nothing is written
/// unless every log was processed. The status callback is invoked once per log.
pub fn process_batch<F: FnMut(BatchStatus)>(
    config: &Config,
    on_status: F,
) -> Result<BatchSummary, ProcessorError> {
    let stack = LogStack::new(&config.input_path, &config.input_extension)?;
    let files_found = stack.len();
    log::info!(
        "Found {} .{} files in {} (total size: {})",
        files_found,
        config.input_extension,
        config.input_path.display(),
        human_bytes::human_bytes(stack.total_stack_size_bytes as f64)
    );

    let tables = collect_batch(stack, on_status)?;

    std::fs::create_dir_all(&config.output_path)?;
    let ratings_path = config.get_ratings_file_name();
    TableWriter::create(&ratings_path)?.write_ratings(&tables.ratings)?;
    log::info!("Wrote {} rows to {}", tables.ratings.len(), ratings_path.display());

    let dial_ratings_path = config.get_dial_ratings_file_name();
    TableWriter::create(&dial_ratings_path)?.write_dial_ratings(&tables.dial)?;
    log::info!(
        "Wrote {} rows to {}",
        tables.dial.rows.len(),
        dial_ratings_path.display()
    );

    let mut participants = tables.participants;
    participants.sort();
    log::info!("Participants: {:?}", participants);
    log::info!("Max dial samples: {}", tables.dial.max_samples);

    Ok(BatchSummary {
        files_found,
        files_skipped: tables.skipped_files.len(),
        participants,
        rating_rows: tables.ratings.len(),
        dial_rows: tables.dial.rows.len(),
        max_samples: tables.dial.max_samples,
        ratings_path,
        dial_ratings_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::{LogStackError, RecordFileError};
    use serde_json::{json, Value};

    fn session(pid: &str, n_samples: usize) -> Value {
        session_with_practice(pid, n_samples, "naturalpractice.mp4")
    }

    fn session_with_practice(pid: &str, n_samples: usize, practice: &str) -> Value {
        let samples: Vec<Value> = (0..n_samples).map(|v| json!({"value": v})).collect();
        json!([
            {"participant_pid": pid, "trial_index": 0, "task": "practice_video", "stimulus": [format!("v/{practice}")]},
            {"trial_index": 1, "task": "rating", "rating_type": "pleasure", "rating": 2},
            {
                "trial_index": 2,
                "trial_type": "video-dial-rating",
                "task": "main_video",
                "stimulus": ["v/clip1.mp4"],
                "baseline_rating": 50,
                "mean_rating": 50,
                "ratings": samples
            },
            {"trial_index": 3, "task": "rating", "rating_type": "arousal", "rating": 6}
        ])
    }

    fn write_session(dir: &Path, name: &str, content: &Value) {
        let path = dir.join(name);
        std::fs::create_dir_all(path.parent().unwrap()).unwrap();
        std::fs::write(path, content.to_string()).unwrap();
    }

    #[test]
    fn test_single_file_ratings() {
        let dir = tempfile::tempdir().unwrap();
        write_session(dir.path(), "p1.json", &session("P1", 2));
        let input = dir.path().join("p1.json");

        let output = process_ratings_file(&input, None).unwrap();
        assert_eq!(output, dir.path().join("p1_ratings.csv"));
        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[1], "P1,1,0,1,neutral,practice,naturalpractice.mp4,,2,,");
        assert_eq!(lines[2], "P1,2,2,1,neutral,main,clip1.mp4,6,,,");
    }

    #[test]
    fn test_single_file_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        write_session(dir.path(), "p1.json", &session("P1", 3));
        let input = dir.path().join("p1.json");
        let first = dir.path().join("first.csv");
        let second = dir.path().join("second.csv");
        process_ratings_file(&input, Some(&first)).unwrap();
        process_ratings_file(&input, Some(&second)).unwrap();
        assert_eq!(std::fs::read(first).unwrap(), std::fs::read(second).unwrap());
    }

    #[test]
    fn test_single_file_dial() {
        let dir = tempfile::tempdir().unwrap();
        write_session(dir.path(), "p1.json", &session("P1", 3));
        let output = process_dial_ratings_file(&dir.path().join("p1.json"), None).unwrap();
        assert_eq!(output, dir.path().join("p1_dial_ratings.csv"));
        let text = std::fs::read_to_string(&output).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with("baseline,mean,ts_1,ts_2,ts_3"));
        assert_eq!(lines[1], "P1,1,2,1,neutral,main,clip1.mp4,50,50,0,1,2");
    }

    #[test]
    fn test_batch_combines_and_pads() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results");
        write_session(&input, "a/p2.json", &session("P2", 2));
        write_session(&input, "b/p1.json", &session("P1", 5));
        let config = Config::new(&input, &dir.path().join("out"));

        let mut statuses = Vec::new();
        let summary = process_batch(&config, |status| {
            statuses.push((status.files_done, status.files_total, status.current_file))
        })
        .unwrap();
        assert_eq!(
            statuses,
            vec![(1, 2, input.join("a/p2.json")), (2, 2, input.join("b/p1.json"))]
        );
        assert_eq!(summary.files_found, 2);
        assert_eq!(summary.participants, vec!["P1", "P2"]);
        assert_eq!(summary.rating_rows, 4);
        assert_eq!(summary.dial_rows, 2);
        assert_eq!(summary.max_samples, 5);

        let text = std::fs::read_to_string(&summary.dial_ratings_path).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert!(lines[0].ends_with("ts_5"));
        // P2 comes first by path, padded to the global width
        assert_eq!(lines[1], "P2,1,2,1,neutral,main,clip1.mp4,50,50,0,1,,,");
        assert_eq!(lines[2], "P1,1,2,1,neutral,main,clip1.mp4,50,50,0,1,2,3,4");
    }

    #[test]
    fn test_batch_skips_duplicate_participant() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results");
        write_session(&input, "1_first.json", &session("P1", 1));
        write_session(&input, "2_retake.json", &session("P1", 4));
        let config = Config::new(&input, dir.path());

        let tables = collect_batch(LogStack::new(&input, "json").unwrap(), |_| ()).unwrap();
        assert_eq!(tables.skipped_files, vec![input.join("2_retake.json")]);

        let summary = process_batch(&config, |_| ()).unwrap();
        assert_eq!(summary.files_skipped, 1);
        assert_eq!(summary.participants, vec!["P1"]);
        assert_eq!(summary.rating_rows, 2);
        // Only the first-seen log contributes
        assert_eq!(summary.max_samples, 1);
    }

    #[test]
    fn test_duplicate_keeps_first_full_path() {
        // As strings "p1.json" < "p1/x.json", although "p1" < "p1.json" as path components
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results");
        write_session(&input, "p1.json", &session_with_practice("P1", 2, "observepractice.mp4"));
        write_session(&input, "p1/x.json", &session_with_practice("P1", 3, "naturalpractice.mp4"));

        let tables = collect_batch(LogStack::new(&input, "json").unwrap(), |_| ()).unwrap();
        assert_eq!(tables.participants, vec!["P1"]);
        assert_eq!(tables.skipped_files, vec![input.join("p1/x.json")]);
        assert_eq!(tables.ratings.len(), 2);
        assert!(tables
            .ratings
            .iter()
            .all(|row| row.info.block_type == "observatory"));
        assert_eq!(tables.dial.max_samples, 2);
    }

    #[test]
    fn test_batch_multi_line_log() {
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results");
        let records = session("P3", 2);
        let records = records.as_array().unwrap();
        let content = format!(
            "{}\n{}\n",
            Value::Array(records[..2].to_vec()),
            Value::Array(records[2..].to_vec())
        );
        std::fs::create_dir_all(&input).unwrap();
        std::fs::write(input.join("jatos.json"), content).unwrap();

        let tables = collect_batch(LogStack::new(&input, "json").unwrap(), |_| ()).unwrap();
        assert_eq!(tables.participants, vec!["P3"]);
        assert_eq!(tables.ratings.len(), 2);
        assert_eq!(tables.ratings[1].ratings.arousal, "6");
    }

    #[test]
    fn test_batch_aborts_on_corrupt_file() {
        // A corrupt log fails the whole batch rather than being skipped
        let dir = tempfile::tempdir().unwrap();
        let input = dir.path().join("results");
        let output = dir.path().join("out");
        write_session(&input, "a.json", &session("P1", 1));
        std::fs::write(input.join("b.json"), "[{\"participant_pid\": ").unwrap();
        let config = Config::new(&input, &output);

        match process_batch(&config, |_| ()) {
            Err(ProcessorError::RecordError(RecordFileError::ParsingError { .. })) => (),
            other => panic!("unexpected result {other:?}"),
        }
        assert!(!output.exists());
    }

    #[test]
    fn test_batch_without_logs() {
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("out");
        let config = Config::new(dir.path(), &output);
        assert!(matches!(
            process_batch(&config, |_| ()),
            Err(ProcessorError::StackError(LogStackError::NoMatchingFiles(_, _)))
        ));
        assert!(!output.exists());
    }
}
