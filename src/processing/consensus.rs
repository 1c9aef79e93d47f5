// Voting over repeated OCR reads of the same document

use log::debug;
use std::collections::VecDeque;

/// Accepts a read once the same text has been seen `required` times among
/// the last `window` reads. The decoder itself stays stateless; this sits on
/// the OCR side of the boundary.
#[derive(Debug, Clone)]
pub struct ScanConsensus {
    window: usize,
    required: usize,
    recent: VecDeque<String>,
}

impl ScanConsensus {
    pub fn new(window: usize, required: usize) -> Self {
        let window = window.max(1);
        ScanConsensus {
            window,
            required: required.clamp(1, window),
            recent: VecDeque::with_capacity(window),
        }
    }

    /// Records a read. Returns the agreed text when this read completes a vote.
    pub fn observe(&mut self, text: &str) -> Option<String> {
        if self.recent.len() == self.window {
            self.recent.pop_front();
        }
        self.recent.push_back(text.to_string());

        let votes = self.recent.iter().filter(|read| *read == text).count();
        debug!("Consensus: {}/{} votes", votes, self.required);
        if votes >= self.required {
            self.recent.clear();
            Some(text.to_string())
        } else {
            None
        }
    }

    pub fn reset(&mut self) {
        self.recent.clear();
    }
}

impl Default for ScanConsensus {
    fn default() -> Self {
        ScanConsensus::new(5, 3)
    }
}
