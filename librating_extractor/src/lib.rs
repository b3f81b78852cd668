//! # rating_extractor
//!
//! rating_extractor flattens the session logs of the video rating experiment into CSV
//! tables for statistical analysis. Each session log is the list of trial records
//! written by the web experiment runner; rating_extractor finds the video trials in it
//! and produces two tables:
//!
//! - a discrete ratings table, with one row per video (practice, main, and nature) and
//!   the arousal, pleasure, distraction, and immersion ratings given after it
//! - a dial ratings table, with one row per dial video and the baseline, mean, and
//!   full time series of the dial
//!
//! ## Building & Install
//!
//! To build and install the CLI use `cargo install --path ./rating_extractor_cli` from the
//! top level rating_extractor repository.
//!
//! ## Use
//!
//! ```bash
//! rating_extractor_cli ratings results/p01.json
//! rating_extractor_cli dial results/p01.json p01_dial.csv
//! rating_extractor_cli all results output
//! rating_extractor_cli all --config batch.yml
//! rating_extractor_cli new --path batch.yml
//! ```
//!
//! ## Configuration
//!
//! Batch runs can be configured with a YAML file. The `new` subcommand writes a template:
//!
//! ```yml
//! input_path: results
//! output_path: .
//! ratings_file_name: all_ratings.csv
//! dial_ratings_file_name: all_dial_ratings.csv
//! input_extension: json
//! ```
//!
//! The input directory is searched recursively. Logs are processed in order of their full
//! path, and if two logs belong to the same participant only the first is used.
//!
//! ## Input
//!
//! A session log is either a single JSON array of trial records, or the multi-line export
//! format where every line is its own JSON array. Both are read the same way.
//!
//! ## Output
//!
//! ```text
//! PID,trial_number,trial_index,block,block_type,trial_type,video,arousal,pleasure,distraction,immersion
//! PID,trial_number,trial_index,block,block_type,trial_type,video,baseline,mean,ts_1,...,ts_N
//! ```
//!
//! Blocks are opened by practice videos, whose file name determines the block type
//! (neutral, observatory, or participatory). Nature videos are not part of a block and
//! always have block 0. The dial table has as many `ts_` columns as the longest time
//! series; shorter series are padded with empty cells.
pub mod batch_status;
pub mod block;
pub mod config;
pub mod constants;
pub mod error;
pub mod extractor;
pub mod log_stack;
pub mod process;
pub mod record;
pub mod record_file;
pub mod row;
pub mod table_writer;
