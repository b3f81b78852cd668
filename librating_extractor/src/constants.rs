// Record field names as written by the experiment runner
pub const FIELD_PARTICIPANT_PID: &str = "participant_pid";
pub const FIELD_TRIAL_INDEX: &str = "trial_index";
pub const FIELD_TRIAL_TYPE: &str = "trial_type";
pub const FIELD_TASK: &str = "task";
pub const FIELD_STIMULUS: &str = "stimulus";
pub const FIELD_RATING_TYPE: &str = "rating_type";
pub const FIELD_RATING: &str = "rating";
pub const FIELD_BASELINE_RATING: &str = "baseline_rating";
pub const FIELD_MEAN_RATING: &str = "mean_rating";
pub const FIELD_RATINGS: &str = "ratings";
pub const FIELD_VALUE: &str = "value";

// Tag values
pub const TRIAL_TYPE_DIAL_VIDEO: &str = "video-dial-rating";
pub const TASK_NATURE_VIDEO: &str = "nature_video_dial";
pub const TASK_PRACTICE_VIDEO: &str = "practice_video";
pub const TASK_RATING: &str = "rating";

pub const UNKNOWN_PID: &str = "unknown";
pub const UNKNOWN_VIDEO: &str = "?";

/// Number of records after a video trial that are searched for its ratings
pub const LOOKAHEAD_WINDOW: usize = 9;

/// Practice video file name -> block type of the block it introduces
pub const PRACTICE_BLOCK_TYPES: [(&str, &str); 3] = [
    ("naturalpractice.mp4", "neutral"),
    ("observepractice.mp4", "observatory"),
    ("participatepractice.mp4", "participatory"),
];

pub const RATINGS_HEADER: [&str; 11] = [
    "PID",
    "trial_number",
    "trial_index",
    "block",
    "block_type",
    "trial_type",
    "video",
    "arousal",
    "pleasure",
    "distraction",
    "immersion",
];

pub const DIAL_HEADER: [&str; 9] = [
    "PID",
    "trial_number",
    "trial_index",
    "block",
    "block_type",
    "trial_type",
    "video",
    "baseline",
    "mean",
];

/// Prefix of the dial time series columns (ts_1, ts_2, ...)
pub const SAMPLE_COLUMN_PREFIX: &str = "ts_";

pub const RATINGS_FILE_SUFFIX: &str = "_ratings.csv";
pub const DIAL_RATINGS_FILE_SUFFIX: &str = "_dial_ratings.csv";
pub const DEFAULT_RATINGS_FILE_NAME: &str = "all_ratings.csv";
pub const DEFAULT_DIAL_RATINGS_FILE_NAME: &str = "all_dial_ratings.csv";
pub const DEFAULT_INPUT_EXTENSION: &str = "json";
