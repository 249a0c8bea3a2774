/*!
 * Process Control Block
 * Execution position and scheduling metadata of one loaded script
 */

use crate::core::types::{LineIndex, Pid, Score};

/// Process descriptor
///
/// Not `Clone`: a descriptor has exactly one owner at a time (loader, queue or
/// the running policy) and is dropped once, when its last line has run.
#[derive(Debug, PartialEq, Eq)]
pub struct ProcessControlBlock {
    pid: Pid,
    start: LineIndex,
    length: usize,
    program_counter: usize,
    remaining_score: Score,
    priority: bool,
}

impl ProcessControlBlock {
    pub fn new(pid: Pid, start: LineIndex, length: usize) -> Self {
        Self {
            pid,
            start,
            length,
            program_counter: 0,
            remaining_score: length,
            priority: false,
        }
    }

    /// Mark as the background continuation that runs before anything else
    pub fn with_priority(mut self) -> Self {
        self.priority = true;
        self
    }

    #[inline]
    pub fn pid(&self) -> Pid {
        self.pid
    }

    #[inline]
    pub fn start(&self) -> LineIndex {
        self.start
    }

    #[inline]
    pub fn length(&self) -> usize {
        self.length
    }

    #[inline]
    pub fn program_counter(&self) -> usize {
        self.program_counter
    }

    #[inline]
    pub fn remaining_score(&self) -> Score {
        self.remaining_score
    }

    #[inline]
    pub fn is_priority(&self) -> bool {
        self.priority
    }

    #[inline]
    pub fn is_finished(&self) -> bool {
        self.program_counter >= self.length
    }

    /// Arena index of the next instruction, if any remain
    pub fn current_line(&self) -> Option<LineIndex> {
        (!self.is_finished()).then(|| self.start + self.program_counter)
    }

    pub(crate) fn advance(&mut self) {
        if !self.is_finished() {
            self.program_counter += 1;
        }
    }

    /// Lower the job length score by one, floored at zero
    pub(crate) fn age(&mut self) {
        self.remaining_score = self.remaining_score.saturating_sub(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_descriptor() {
        let pcb = ProcessControlBlock::new(7, 10, 4);
        assert_eq!(pcb.pid(), 7);
        assert_eq!(pcb.start(), 10);
        assert_eq!(pcb.length(), 4);
        assert_eq!(pcb.program_counter(), 0);
        assert_eq!(pcb.remaining_score(), 4);
        assert!(!pcb.is_priority());
        assert_eq!(pcb.current_line(), Some(10));
    }

    #[test]
    fn test_advance_stops_at_length() {
        let mut pcb = ProcessControlBlock::new(1, 5, 2);
        pcb.advance();
        assert_eq!(pcb.current_line(), Some(6));
        pcb.advance();
        assert!(pcb.is_finished());
        assert_eq!(pcb.current_line(), None);
        pcb.advance();
        assert_eq!(pcb.program_counter(), 2);
    }

    #[test]
    fn test_age_floors_at_zero() {
        let mut pcb = ProcessControlBlock::new(1, 0, 1);
        pcb.age();
        pcb.age();
        assert_eq!(pcb.remaining_score(), 0);
    }

    #[test]
    fn test_empty_script_is_finished() {
        let pcb = ProcessControlBlock::new(3, 0, 0).with_priority();
        assert!(pcb.is_finished());
        assert!(pcb.is_priority());
    }
}
