use std::path::PathBuf;

/// Progress of a batch run, reported once per session log
#[derive(Debug, Clone, Default)]
pub struct BatchStatus {
    pub files_done: usize,
    pub files_total: usize,
    pub current_file: PathBuf,
}

impl BatchStatus {
    pub fn new(files_done: usize, files_total: usize, current_file: PathBuf) -> Self {
        Self {
            files_done,
            files_total,
            current_file,
        }
    }
}
