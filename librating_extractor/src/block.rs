use super::constants::PRACTICE_BLOCK_TYPES;
use super::row::TrialKind;

/// Look up the block type introduced by a practice video.
///
/// Unknown practice videos yield an empty block type.
pub fn practice_block_type(video: &str) -> &'static str {
    PRACTICE_BLOCK_TYPES
        .iter()
        .find(|(name, _)| *name == video)
        .map(|(_, block_type)| *block_type)
        .unwrap_or("")
}

/// BlockTracker carries the running trial and block state through a scan of a session.
///
/// A practice video opens a new block and sets the block type, which then sticks
/// to every following trial until the next practice video.
#[derive(Debug, Clone, Default)]
pub struct BlockTracker {
    trial_number: usize,
    block_number: usize,
    block_type: &'static str,
}

impl BlockTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// A practice video was seen; start the next block
    pub fn start_block(&mut self, practice_video: &str) {
        self.block_type = practice_block_type(practice_video);
        self.block_number += 1;
    }

    /// Count a video trial, returning its 1-based trial number
    pub fn next_trial(&mut self) -> usize {
        self.trial_number += 1;
        self.trial_number
    }

    /// Block number and type for a trial of the given kind. Nature trials are outside of any block.
    pub fn block_of(&self, kind: TrialKind) -> (usize, String) {
        match kind {
            TrialKind::Nature => (0, String::new()),
            _ => (self.block_number, self.block_type.to_string()),
        }
    }
}
