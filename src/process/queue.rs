/*!
 * Ready Queue
 * Ordered container of process descriptors awaiting the CPU
 */

use super::pcb::ProcessControlBlock;
use crate::core::types::Pid;
use std::collections::VecDeque;

/// Ready queue
///
/// Backed by a `VecDeque` so head and tail operations are O(1); the sorted
/// insertion used by the aging policy is a linear scan.
#[derive(Debug, Default)]
pub struct ReadyQueue {
    entries: VecDeque<ProcessControlBlock>,
}

impl ReadyQueue {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append at the tail
    pub fn enqueue(&mut self, pcb: ProcessControlBlock) {
        self.entries.push_back(pcb);
    }

    /// Remove from the head
    pub fn dequeue(&mut self) -> Option<ProcessControlBlock> {
        self.entries.pop_front()
    }

    /// Insert at the head
    pub fn enqueue_front(&mut self, pcb: ProcessControlBlock) {
        self.entries.push_front(pcb);
    }

    /// Insert before the first descriptor with a strictly larger score
    ///
    /// Keeps the queue ascending by `remaining_score`; an equal score goes
    /// behind the descriptors already holding it.
    pub fn enqueue_by_score(&mut self, pcb: ProcessControlBlock) {
        let score = pcb.remaining_score();
        match self
            .entries
            .iter()
            .position(|queued| queued.remaining_score() > score)
        {
            Some(index) => self.entries.insert(index, pcb),
            None => self.entries.push_back(pcb),
        }
    }

    /// Detach the first descriptor matching `predicate`
    pub fn remove_matching<F>(&mut self, predicate: F) -> Option<ProcessControlBlock>
    where
        F: Fn(&ProcessControlBlock) -> bool,
    {
        let index = self.entries.iter().position(predicate)?;
        self.entries.remove(index)
    }

    /// Stable sort ascending by total script length
    pub fn sort_by_length(&mut self) {
        self.entries
            .make_contiguous()
            .sort_by_key(ProcessControlBlock::length);
    }

    /// Age every queued descriptor by one
    pub fn age_all(&mut self) {
        for pcb in self.entries.iter_mut() {
            pcb.age();
        }
    }

    pub fn head(&self) -> Option<&ProcessControlBlock> {
        self.entries.front()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ProcessControlBlock> {
        self.entries.iter()
    }

    /// Queued pids, head first
    pub fn pids(&self) -> Vec<Pid> {
        self.entries.iter().map(ProcessControlBlock::pid).collect()
    }

    pub fn priority_count(&self) -> usize {
        self.entries.iter().filter(|pcb| pcb.is_priority()).count()
    }

    /// Remove every descriptor, head first
    pub fn drain(&mut self) -> impl Iterator<Item = ProcessControlBlock> + '_ {
        self.entries.drain(..)
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<ProcessControlBlock> for ReadyQueue {
    fn from_iter<I: IntoIterator<Item = ProcessControlBlock>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pcb(pid: Pid, length: usize) -> ProcessControlBlock {
        ProcessControlBlock::new(pid, 0, length)
    }

    #[test]
    fn test_fifo_order() {
        let mut queue = ReadyQueue::new();
        queue.enqueue(pcb(1, 3));
        queue.enqueue(pcb(2, 1));
        queue.enqueue(pcb(3, 2));

        assert_eq!(queue.len(), 3);
        assert_eq!(queue.dequeue().map(|p| p.pid()), Some(1));
        assert_eq!(queue.dequeue().map(|p| p.pid()), Some(2));
        assert_eq!(queue.dequeue().map(|p| p.pid()), Some(3));
        assert!(queue.dequeue().is_none());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_enqueue_front() {
        let mut queue = ReadyQueue::new();
        queue.enqueue(pcb(1, 1));
        queue.enqueue_front(pcb(2, 1));
        assert_eq!(queue.pids(), vec![2, 1]);

        let mut empty = ReadyQueue::new();
        empty.enqueue_front(pcb(9, 1));
        assert_eq!(empty.head().map(|p| p.pid()), Some(9));
        assert_eq!(empty.len(), 1);
    }

    #[test]
    fn test_enqueue_by_score_after_equal_scores() {
        let mut queue = ReadyQueue::new();
        queue.enqueue_by_score(pcb(1, 2));
        queue.enqueue_by_score(pcb(2, 5));
        queue.enqueue_by_score(pcb(3, 2));
        queue.enqueue_by_score(pcb(4, 1));
        queue.enqueue_by_score(pcb(5, 9));
        assert_eq!(queue.pids(), vec![4, 1, 3, 2, 5]);
    }

    #[test]
    fn test_sort_by_length_is_stable() {
        let mut queue: ReadyQueue = [pcb(1, 3), pcb(2, 1), pcb(3, 3), pcb(4, 1)]
            .into_iter()
            .collect();
        queue.sort_by_length();
        assert_eq!(queue.pids(), vec![2, 4, 1, 3]);
    }

    #[test]
    fn test_remove_matching_priority() {
        let mut queue = ReadyQueue::new();
        queue.enqueue(pcb(1, 1));
        queue.enqueue(pcb(2, 1).with_priority());
        assert_eq!(queue.priority_count(), 1);

        let detached = queue.remove_matching(ProcessControlBlock::is_priority);
        assert_eq!(detached.map(|p| p.pid()), Some(2));
        assert_eq!(queue.priority_count(), 0);
        assert!(queue.remove_matching(ProcessControlBlock::is_priority).is_none());
    }

    #[test]
    fn test_age_all() {
        let mut queue: ReadyQueue = [pcb(1, 0), pcb(2, 3)].into_iter().collect();
        queue.age_all();
        let scores: Vec<_> = queue.iter().map(|p| p.remaining_score()).collect();
        assert_eq!(scores, vec![0, 2]);
    }
}
