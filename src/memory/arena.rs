/*!
 * Instruction Arena
 *
 * Fixed-capacity store of script lines shared by every loaded process.
 *
 * ## Allocation
 *
 * Pure bump allocation over a single `next_free` cursor:
 * - `allocate(n)` always extends at the cursor and never searches for gaps
 * - `release(start, n)` blanks the range and rewinds the cursor only when the
 *   range ends exactly at the cursor (the most recent block)
 *
 * Releasing any other block leaves a gap below the cursor that stays
 * unusable until `reset()`. The gap is reported as `fragmented_lines`.
 */

use super::types::{ArenaError, ArenaResult, ArenaStats};
use crate::core::limits::{ARENA_CAPACITY, MAX_LINE_WIDTH};
use crate::core::types::{InlineString, LineIndex};
use parking_lot::RwLock;
use std::sync::Arc;
use tracing::{debug, warn};

#[derive(Debug)]
struct LineTable {
    lines: Vec<InlineString>,
    next_free: LineIndex,
    live: usize,
}

/// Shared instruction arena
///
/// Cloning yields another handle to the same lines.
#[derive(Debug, Clone)]
pub struct InstructionArena {
    table: Arc<RwLock<LineTable>>,
    capacity: usize,
}

impl InstructionArena {
    pub fn new() -> Self {
        Self::with_capacity(ARENA_CAPACITY)
    }

    /// Create arena with custom capacity (useful for testing)
    pub fn with_capacity(capacity: usize) -> Self {
        debug!(capacity, "Instruction arena initialized");
        Self {
            table: Arc::new(RwLock::new(LineTable {
                lines: vec![InlineString::new(); capacity],
                next_free: 0,
                live: 0,
            })),
            capacity,
        }
    }

    /// Reserve `n` contiguous lines at the cursor
    pub fn allocate(&self, n: usize) -> ArenaResult<LineIndex> {
        let mut table = self.table.write();
        let used = table.next_free;

        if !matches!(used.checked_add(n), Some(end) if end <= self.capacity) {
            let available = self.capacity - used;
            warn!(
                requested = n,
                available,
                used,
                capacity = self.capacity,
                "Instruction arena exhausted"
            );
            return Err(ArenaError::OutOfLines {
                requested: n,
                available,
                used,
                capacity: self.capacity,
            });
        }

        table.next_free += n;
        table.live += n;
        debug!(start = used, lines = n, next_free = table.next_free, "Allocated lines");
        Ok(used)
    }

    /// Blank `n` lines from `start`, rewinding the cursor if they were the tail block
    pub fn release(&self, start: LineIndex, n: usize) -> ArenaResult<()> {
        let end = match start.checked_add(n) {
            Some(end) if end <= self.capacity => end,
            _ => {
                return Err(ArenaError::InvalidRange {
                    start,
                    len: n,
                    capacity: self.capacity,
                })
            }
        };

        let mut table = self.table.write();
        for line in &mut table.lines[start..end] {
            line.clear();
        }
        table.live = table.live.saturating_sub(n);

        if end == table.next_free {
            table.next_free = start;
            debug!(start, lines = n, next_free = start, "Released tail block");
        } else {
            debug!(start, lines = n, next_free = table.next_free, "Released inner block, gap left behind");
        }
        Ok(())
    }

    /// Store one line of text, clipped to the line width
    pub fn write(&self, index: LineIndex, text: &str) -> ArenaResult<()> {
        if index >= self.capacity {
            return Err(ArenaError::InvalidIndex(index));
        }
        self.table.write().lines[index] = clip(text).into();
        Ok(())
    }

    /// Copy of the text at `index`; released lines read back empty
    pub fn fetch(&self, index: LineIndex) -> Option<String> {
        self.table
            .read()
            .lines
            .get(index)
            .map(|line| line.to_string())
    }

    /// Blank every line and rewind the cursor to zero
    pub fn reset(&self) {
        let mut table = self.table.write();
        for line in &mut table.lines {
            line.clear();
        }
        table.next_free = 0;
        table.live = 0;
        debug!("Instruction arena reset");
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn next_free(&self) -> LineIndex {
        self.table.read().next_free
    }

    pub fn available(&self) -> usize {
        self.capacity - self.next_free()
    }

    pub fn stats(&self) -> ArenaStats {
        let table = self.table.read();
        ArenaStats {
            capacity: self.capacity,
            next_free: table.next_free,
            live_lines: table.live,
            fragmented_lines: table.next_free.saturating_sub(table.live),
            available_lines: self.capacity - table.next_free,
        }
    }
}

impl Default for InstructionArena {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest prefix of `text` that fits on one line without splitting a char
pub(crate) fn clip(text: &str) -> &str {
    if text.len() <= MAX_LINE_WIDTH {
        return text;
    }
    let mut end = MAX_LINE_WIDTH;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    &text[..end]
}
