/*!
 * CPU Scheduler
 * Drains a ready queue under one of four policies, one instruction at a time
 */

mod atomic_stats;
mod policies;
pub mod stats;
pub mod traits;
pub mod types;

pub use stats::{EpisodeReport, SchedulerStats};
pub use traits::{ExecStatus, InstructionExecutor};
pub use types::{Quantum, SchedulingPolicy};

use crate::core::errors::SchedulerError;
use crate::core::types::SchedulerResult;
use crate::memory::InstructionArena;
use crate::process::ReadyQueue;
use atomic_stats::AtomicSchedulerStats;
use std::cmp::Reverse;
use std::sync::Arc;
use tracing::{error, info, instrument, warn};

/// CPU Scheduler
///
/// Holds no queue of its own: every entry point takes exclusive use of the
/// queue it is given and returns with that queue empty, each descriptor's
/// arena lines released.
pub struct Scheduler {
    arena: InstructionArena,
    stats: Arc<AtomicSchedulerStats>,
}

impl Scheduler {
    pub fn new(arena: InstructionArena) -> Self {
        Self {
            arena,
            stats: Arc::new(AtomicSchedulerStats::new()),
        }
    }

    pub fn arena(&self) -> &InstructionArena {
        &self.arena
    }

    /// Cumulative statistics over every episode run by this scheduler
    pub fn stats(&self) -> SchedulerStats {
        self.stats.snapshot()
    }

    /// Run one episode under `policy`
    #[instrument(skip_all, fields(policy = %policy, queued = queue.len()))]
    pub fn run<E>(
        &self,
        policy: SchedulingPolicy,
        queue: &mut ReadyQueue,
        executor: &mut E,
    ) -> SchedulerResult<EpisodeReport>
    where
        E: InstructionExecutor + ?Sized,
    {
        match (policy, policy.quantum()) {
            (_, Some(quantum)) => self.round_robin(queue, quantum, executor),
            (SchedulingPolicy::Sjf, None) => self.sjf(queue, executor),
            (SchedulingPolicy::Aging, None) => self.aging(queue, executor),
            _ => self.fcfs(queue, executor),
        }
    }

    /// Check that at most one priority descriptor is queued and that it is at the head
    ///
    /// A queue failing the check is abandoned: drained and its lines released
    /// newest first, so the arena cursor rewinds past all of them.
    fn admit(&self, queue: &mut ReadyQueue) -> SchedulerResult<()> {
        let priority = queue.priority_count();
        let reason = if priority > 1 {
            Some(format!("{} priority processes queued", priority))
        } else if priority == 1 && !queue.head().is_some_and(|pcb| pcb.is_priority()) {
            Some("priority process is not at the head".to_string())
        } else {
            None
        };

        let Some(reason) = reason else {
            return Ok(());
        };

        error!(reason = %reason, queued = queue.len(), "Abandoning scheduling episode");
        let mut abandoned: Vec<_> = queue.drain().collect();
        abandoned.sort_by_key(|pcb| Reverse(pcb.start()));
        for pcb in abandoned {
            if let Err(err) = self.arena.release(pcb.start(), pcb.length()) {
                warn!(pid = pcb.pid(), error = %err, "Failed to release lines");
            }
        }
        self.stats.inc_abandoned();
        Err(SchedulerError::InvalidQueue(reason.into()))
    }

    fn finish(&self, report: EpisodeReport) -> EpisodeReport {
        self.stats.record_episode(&report);
        info!(
            policy = %report.policy,
            quantum = report.quantum.map(|q| q.get()),
            instructions = report.instructions_executed,
            failed = report.failed_instructions,
            context_switches = report.context_switches,
            preemptions = report.preemptions,
            completed = report.completed.len(),
            "Scheduling episode complete"
        );
        report
    }
}

impl Clone for Scheduler {
    fn clone(&self) -> Self {
        Self {
            arena: self.arena.clone(),
            stats: Arc::clone(&self.stats),
        }
    }
}

impl Default for Scheduler {
    fn default() -> Self {
        Self::new(InstructionArena::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::{Loader, ProcessControlBlock};

    struct Recorder(Vec<String>);

    impl InstructionExecutor for Recorder {
        fn execute_line(&mut self, line: &str) -> ExecStatus {
            self.0.push(line.to_string());
            ExecStatus::Completed
        }
    }

    fn program(tag: &str, len: usize) -> Vec<String> {
        (0..len).map(|i| format!("{}{}", tag, i)).collect()
    }

    #[test]
    fn test_empty_queue() {
        let scheduler = Scheduler::new(InstructionArena::with_capacity(4));
        let mut queue = ReadyQueue::new();
        for policy in SchedulingPolicy::ALL {
            let report = scheduler.run(policy, &mut queue, &mut Recorder(Vec::new())).unwrap();
            assert_eq!(report.instructions_executed, 0);
        }
        assert_eq!(scheduler.stats().episodes, 5);
    }

    #[test]
    fn test_two_priority_processes_are_rejected() {
        let arena = InstructionArena::with_capacity(10);
        let loader = Loader::new(arena.clone());
        let scheduler = Scheduler::new(arena.clone());

        let mut queue = ReadyQueue::new();
        queue.enqueue(loader.spawn(&program("a", 2)).unwrap().with_priority());
        queue.enqueue(loader.spawn(&program("b", 2)).unwrap().with_priority());

        let mut recorder = Recorder(Vec::new());
        let err = scheduler
            .run(SchedulingPolicy::Fcfs, &mut queue, &mut recorder)
            .unwrap_err();
        assert!(matches!(err, SchedulerError::InvalidQueue(_)));
        assert!(queue.is_empty());
        assert!(recorder.0.is_empty());
        assert_eq!(arena.next_free(), 0);
        assert_eq!(scheduler.stats().abandoned_episodes, 1);
    }

    #[test]
    fn test_priority_process_behind_head_is_rejected() {
        let scheduler = Scheduler::new(InstructionArena::with_capacity(10));
        let mut queue = ReadyQueue::new();
        queue.enqueue(ProcessControlBlock::new(1, 0, 0));
        queue.enqueue(ProcessControlBlock::new(2, 0, 0).with_priority());

        let result = scheduler.run(SchedulingPolicy::Sjf, &mut queue, &mut Recorder(Vec::new()));
        assert!(result.is_err());
        assert!(queue.is_empty());
    }

    #[test]
    fn test_stats_accumulate() {
        let arena = InstructionArena::with_capacity(10);
        let loader = Loader::new(arena.clone());
        let scheduler = Scheduler::new(arena);

        let mut queue: ReadyQueue = loader
            .spawn_batch(&[program("a", 3), program("b", 3)])
            .unwrap()
            .into_iter()
            .collect();
        scheduler
            .run(SchedulingPolicy::RoundRobin, &mut queue, &mut Recorder(Vec::new()))
            .unwrap();

        let stats = scheduler.stats();
        assert_eq!(stats.episodes, 1);
        assert_eq!(stats.instructions_executed, 6);
        assert_eq!(stats.completed_processes, 2);
        assert_eq!(stats.last_policy, Some(SchedulingPolicy::RoundRobin));
    }
}
