use std::fmt::Display;
use std::str::FromStr;

use super::constants::{DIAL_HEADER, RATINGS_HEADER, SAMPLE_COLUMN_PREFIX};

/// The kind of video a trial presented
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrialKind {
    Practice,
    Main,
    Nature,
}

impl Display for TrialKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Practice => write!(f, "practice"),
            Self::Main => write!(f, "main"),
            Self::Nature => write!(f, "nature"),
        }
    }
}

/// The affect dimensions asked after each video
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RatingKind {
    Arousal,
    Pleasure,
    Distraction,
    Immersion,
}

impl FromStr for RatingKind {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "arousal" => Ok(Self::Arousal),
            "pleasure" => Ok(Self::Pleasure),
            "distraction" => Ok(Self::Distraction),
            "immersion" => Ok(Self::Immersion),
            _ => Err(s.to_string()),
        }
    }
}

/// The four discrete ratings of a trial. Ratings that were never given stay empty.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Ratings {
    pub arousal: String,
    pub pleasure: String,
    pub distraction: String,
    pub immersion: String,
}

impl Ratings {
    pub fn set(&mut self, kind: RatingKind, value: String) {
        match kind {
            RatingKind::Arousal => self.arousal = value,
            RatingKind::Pleasure => self.pleasure = value,
            RatingKind::Distraction => self.distraction = value,
            RatingKind::Immersion => self.immersion = value,
        }
    }
}

/// Fields shared by every output row
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TrialInfo {
    pub pid: String,
    pub trial_number: usize,
    pub trial_index: String,
    pub block: usize,
    pub block_type: String,
    pub kind: TrialKind,
    pub video: String,
}

impl TrialInfo {
    fn to_cells(&self) -> Vec<String> {
        vec![
            self.pid.clone(),
            self.trial_number.to_string(),
            self.trial_index.clone(),
            self.block.to_string(),
            self.block_type.clone(),
            self.kind.to_string(),
            self.video.clone(),
        ]
    }
}

/// One row of the discrete ratings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RatingRow {
    pub info: TrialInfo,
    pub ratings: Ratings,
}

impl RatingRow {
    pub fn to_record(&self) -> Vec<String> {
        let mut record = self.info.to_cells();
        record.extend([
            self.ratings.arousal.clone(),
            self.ratings.pleasure.clone(),
            self.ratings.distraction.clone(),
            self.ratings.immersion.clone(),
        ]);
        record
    }

    pub fn header() -> Vec<String> {
        RATINGS_HEADER.iter().map(|s| s.to_string()).collect()
    }
}

/// One row of the dial ratings table
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DialRow {
    pub info: TrialInfo,
    pub baseline: String,
    pub mean: String,
    pub values: Vec<String>,
}

impl DialRow {
    /// Build the CSV record, right padded with empty cells up to n_samples time series columns
    pub fn to_record(&self, n_samples: usize) -> Vec<String> {
        let mut record = self.info.to_cells();
        record.push(self.baseline.clone());
        record.push(self.mean.clone());
        record.extend(self.values.iter().cloned());
        record.resize(DIAL_HEADER.len() + n_samples.max(self.values.len()), String::new());
        record
    }

    /// Header with n_samples time series columns (ts_1..ts_n)
    pub fn header(n_samples: usize) -> Vec<String> {
        DIAL_HEADER
            .iter()
            .map(|s| s.to_string())
            .chain((1..=n_samples).map(sample_column))
            .collect()
    }
}

fn sample_column(n: usize) -> String {
    format!("{SAMPLE_COLUMN_PREFIX}{n}")
}
