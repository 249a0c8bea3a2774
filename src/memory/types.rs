/*!
 * Memory Types
 * Common types for the instruction arena
 */

use crate::core::types::LineIndex;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Arena operation result
pub type ArenaResult<T> = Result<T, ArenaError>;

/// Arena errors
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ArenaError {
    #[error("Out of instruction lines: requested {requested} lines, available {available} lines ({used} used / {capacity} total)")]
    OutOfLines {
        requested: usize,
        available: usize,
        used: usize,
        capacity: usize,
    },

    #[error("Invalid line range: {len} lines at {start} exceed capacity {capacity}")]
    InvalidRange {
        start: LineIndex,
        len: usize,
        capacity: usize,
    },

    #[error("Invalid line index: {0}")]
    InvalidIndex(LineIndex),
}

/// Arena statistics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArenaStats {
    pub capacity: usize,
    /// Bump cursor: every allocated range lies below it
    pub next_free: LineIndex,
    pub live_lines: usize,
    /// Released lines below the cursor that cannot be handed out again
    pub fragmented_lines: usize,
    pub available_lines: usize,
}

impl ArenaStats {
    pub fn usage_percentage(&self) -> f64 {
        if self.capacity == 0 {
            return 100.0;
        }
        (self.next_free as f64 / self.capacity as f64) * 100.0
    }
}
