use super::block::BlockTracker;
use super::constants::*;
use super::record::{render_cell, TrialRecord};
use super::row::{DialRow, RatingKind, RatingRow, Ratings, TrialInfo, TrialKind};

/// Kind of a dial-video record
fn dial_video_kind(record: &TrialRecord) -> TrialKind {
    if record.is_nature_video() {
        TrialKind::Nature
    } else {
        TrialKind::Main
    }
}

/// Collect the discrete ratings that follow a video trial.
///
/// Searches at most `LOOKAHEAD_WINDOW` records starting at `start`, and stops early at the
/// next video trial so that ratings are never attributed across trials. If a rating
/// type appears more than once, the last one wins.
pub fn collect_ratings(records: &[TrialRecord], start: usize) -> Ratings {
    let mut ratings = Ratings::default();
    let window = records
        .iter()
        .skip(start)
        .take(LOOKAHEAD_WINDOW);
    for record in window {
        if record.is_rating() {
            let kind = record
                .get_str(FIELD_RATING_TYPE)
                .and_then(|s| s.parse::<RatingKind>().ok());
            if let Some(kind) = kind {
                ratings.set(kind, render_cell(record.get(FIELD_RATING)));
            }
        } else if record.is_trial_boundary() {
            break;
        }
    }
    ratings
}

/// The dial table of a session (or several), along with the longest time series in it
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DialTable {
    pub rows: Vec<DialRow>,
    pub max_samples: usize,
}

impl DialTable {
    /// Append another table, widening to the longer of the two time series
    pub fn append(&mut self, mut other: DialTable) {
        self.rows.append(&mut other.rows);
        self.max_samples = self.max_samples.max(other.max_samples);
    }
}

/// TrialExtractor flattens the trial records of one session into table rows.
#[derive(Debug, Clone)]
pub struct TrialExtractor<'a> {
    pid: &'a str,
    records: &'a [TrialRecord],
}

impl<'a> TrialExtractor<'a> {
    pub fn new(pid: &'a str, records: &'a [TrialRecord]) -> Self {
        Self { pid, records }
    }

    fn make_info(
        &self,
        tracker: &mut BlockTracker,
        record: &TrialRecord,
        kind: TrialKind,
        video: String,
    ) -> TrialInfo {
        let (block, block_type) = tracker.block_of(kind);
        TrialInfo {
            pid: self.pid.to_string(),
            trial_number: tracker.next_trial(),
            trial_index: record.trial_index(),
            block,
            block_type,
            kind,
            video,
        }
    }

    /// Extract one row per video trial (practice, main and nature) with its four discrete ratings
    pub fn extract_ratings(&self) -> Vec<RatingRow> {
        let mut tracker = BlockTracker::new();
        let mut rows = Vec::new();
        for (idx, record) in self.records.iter().enumerate() {
            let kind = if record.is_dial_video() {
                dial_video_kind(record)
            } else if record.is_practice_video() {
                tracker.start_block(&record.video());
                TrialKind::Practice
            } else {
                continue;
            };

            let info = self.make_info(&mut tracker, record, kind, record.video());
            rows.push(RatingRow {
                info,
                ratings: collect_ratings(self.records, idx + 1),
            });
        }
        rows
    }

    /// Extract one row per dial video with its baseline, mean and sampled time series
    pub fn extract_dial_ratings(&self) -> DialTable {
        let mut tracker = BlockTracker::new();
        let mut table = DialTable::default();
        for record in self.records.iter() {
            if record.is_practice_video() {
                tracker.start_block(&record.video());
            }
            if !record.is_dial_video() {
                continue;
            }

            let kind = dial_video_kind(record);
            let info = self.make_info(&mut tracker, record, kind, record.video());
            let values = record.dial_values();
            table.max_samples = table.max_samples.max(values.len());
            table.rows.push(DialRow {
                info,
                baseline: render_cell(record.get(FIELD_BASELINE_RATING)),
                mean: render_cell(record.get(FIELD_MEAN_RATING)),
                values,
            });
        }
        table
    }
}
