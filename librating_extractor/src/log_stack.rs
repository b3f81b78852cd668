use std::collections::VecDeque;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::error::LogStackError;

/// LogStack is the collection of every session log found under an input directory.
///
/// Logs can be nested arbitrarily deep (i.e. one subdirectory per recruitment wave). The
/// stack is ordered by full path so that which duplicate of a participant is kept does
/// not depend on the filesystem.
#[derive(Debug)]
pub struct LogStack {
    pub file_stack: VecDeque<PathBuf>,
    pub total_stack_size_bytes: u64,
}

impl LogStack {
    /// Create a new LogStack of all files with the given extension under path
    pub fn new(path: &Path, extension: &str) -> Result<Self, LogStackError> {
        if !path.is_dir() {
            return Err(LogStackError::BadDirectory(path.to_path_buf()));
        }
        let (stack, bytes) = Self::get_file_stack(path, extension)?;
        Ok(Self {
            file_stack: stack,
            total_stack_size_bytes: bytes,
        })
    }

    /// Walk the directory tree and collect the matching files, sorted
    fn get_file_stack(
        parent_path: &Path,
        extension: &str,
    ) -> Result<(VecDeque<PathBuf>, u64), LogStackError> {
        let mut file_list: Vec<PathBuf> = Vec::new();
        let mut total_stack_size_bytes = 0;
        for entry in WalkDir::new(parent_path) {
            let entry = entry?;
            if !entry.file_type().is_file() {
                continue;
            }
            if entry.path().extension().and_then(|ext| ext.to_str()) == Some(extension) {
                total_stack_size_bytes += entry.metadata()?.len();
                file_list.push(entry.into_path());
            }
        }

        if file_list.is_empty() {
            return Err(LogStackError::NoMatchingFiles(
                parent_path.to_path_buf(),
                extension.to_string(),
            ));
        }

        // Compare whole paths as strings, so p1.json sorts before p1/x.json
        file_list.sort_by(|a, b| a.as_os_str().cmp(b.as_os_str()));
        Ok((file_list.into(), total_stack_size_bytes))
    }

    pub fn len(&self) -> usize {
        self.file_stack.len()
    }

    pub fn is_empty(&self) -> bool {
        self.file_stack.is_empty()
    }

    /// Take the next file off of the stack
    pub fn pop_next_file(&mut self) -> Option<PathBuf> {
        self.file_stack.pop_front()
    }
}
