/*!
 * Scheduling Policies
 * FCFS, SJF, round-robin and aging entry points
 */

use super::stats::EpisodeReport;
use super::traits::InstructionExecutor;
use super::types::{Quantum, SchedulingPolicy};
use super::Scheduler;
use crate::core::types::SchedulerResult;
use crate::process::{ProcessControlBlock, ReadyQueue};
use tracing::{error, trace, warn};

impl Scheduler {
    /// First come, first served: every process runs to completion in queue order
    pub fn fcfs<E>(&self, queue: &mut ReadyQueue, executor: &mut E) -> SchedulerResult<EpisodeReport>
    where
        E: InstructionExecutor + ?Sized,
    {
        self.admit(queue)?;
        let mut report = EpisodeReport::new(SchedulingPolicy::Fcfs);
        self.run_to_completion(queue, executor, &mut report);
        Ok(self.finish(report))
    }

    /// Shortest job first: reorder by script length, then run as FCFS
    ///
    /// A priority process at the head keeps its place.
    pub fn sjf<E>(&self, queue: &mut ReadyQueue, executor: &mut E) -> SchedulerResult<EpisodeReport>
    where
        E: InstructionExecutor + ?Sized,
    {
        self.admit(queue)?;
        order_by_length(queue);
        let mut report = EpisodeReport::new(SchedulingPolicy::Sjf);
        self.run_to_completion(queue, executor, &mut report);
        Ok(self.finish(report))
    }

    /// Round-robin: at most `quantum` instructions per turn, unfinished work to the tail
    ///
    /// The report is labelled `RR30` for a quantum of 30 and `RR` otherwise;
    /// its `quantum` field carries the budget actually used.
    pub fn round_robin<E>(
        &self,
        queue: &mut ReadyQueue,
        quantum: Quantum,
        executor: &mut E,
    ) -> SchedulerResult<EpisodeReport>
    where
        E: InstructionExecutor + ?Sized,
    {
        self.admit(queue)?;
        let policy = if quantum == Quantum::RR30 {
            SchedulingPolicy::RoundRobin30
        } else {
            SchedulingPolicy::RoundRobin
        };
        let mut report = EpisodeReport::new(policy);
        report.quantum = Some(quantum);

        while let Some(mut pcb) = queue.dequeue() {
            report.dispatch(pcb.pid());
            trace!(pid = pcb.pid(), pc = pcb.program_counter(), "Dispatched");

            let mut budget = quantum.get();
            while budget > 0 && !pcb.is_finished() {
                self.step(&mut pcb, executor, &mut report);
                budget -= 1;
            }

            if pcb.is_finished() {
                self.retire(pcb, &mut report);
            } else {
                report.preempted();
                queue.enqueue(pcb);
            }
        }

        Ok(self.finish(report))
    }

    /// Aging: shortest remaining score first, one instruction per turn
    ///
    /// Every process left waiting during a turn has its score lowered by one;
    /// the process that just ran keeps its score and is reinserted by it.
    pub fn aging<E>(&self, queue: &mut ReadyQueue, executor: &mut E) -> SchedulerResult<EpisodeReport>
    where
        E: InstructionExecutor + ?Sized,
    {
        self.admit(queue)?;
        order_by_length(queue);
        let mut report = EpisodeReport::new(SchedulingPolicy::Aging);

        while let Some(mut pcb) = queue.dequeue() {
            report.dispatch(pcb.pid());
            trace!(pid = pcb.pid(), score = pcb.remaining_score(), "Dispatched");

            if !pcb.is_finished() {
                self.step(&mut pcb, executor, &mut report);
            }

            if !queue.is_empty() {
                queue.age_all();
            }

            if pcb.is_finished() {
                self.retire(pcb, &mut report);
            } else {
                report.preempted();
                queue.enqueue_by_score(pcb);
            }
        }

        Ok(self.finish(report))
    }

    fn run_to_completion<E>(&self, queue: &mut ReadyQueue, executor: &mut E, report: &mut EpisodeReport)
    where
        E: InstructionExecutor + ?Sized,
    {
        while let Some(mut pcb) = queue.dequeue() {
            report.dispatch(pcb.pid());
            trace!(pid = pcb.pid(), lines = pcb.length(), "Dispatched");

            while !pcb.is_finished() {
                self.step(&mut pcb, executor, report);
            }
            self.retire(pcb, report);
        }
    }

    /// Execute the next instruction of `pcb` and advance its program counter
    ///
    /// The lock on the arena is dropped before the executor runs, so the
    /// executor may itself load programs and run nested episodes.
    fn step<E>(&self, pcb: &mut ProcessControlBlock, executor: &mut E, report: &mut EpisodeReport)
    where
        E: InstructionExecutor + ?Sized,
    {
        let Some(index) = pcb.current_line() else {
            return;
        };

        let line = self.arena.fetch(index).unwrap_or_else(|| {
            error!(pid = pcb.pid(), index, "Instruction outside the arena");
            String::new()
        });

        let status = executor.execute_line(&line);
        if status.is_failure() {
            trace!(pid = pcb.pid(), line = %line, ?status, "Instruction failed");
        }
        pcb.advance();
        report.record(status);
    }

    /// Release a finished process's lines; the descriptor is dropped here
    fn retire(&self, pcb: ProcessControlBlock, report: &mut EpisodeReport) {
        if let Err(err) = self.arena.release(pcb.start(), pcb.length()) {
            warn!(pid = pcb.pid(), error = %err, "Failed to release lines");
        }
        trace!(pid = pcb.pid(), "Retired");
        report.retired(pcb.pid());
    }
}

/// Stable sort by length with the priority process (admitted only at the head) held in place
fn order_by_length(queue: &mut ReadyQueue) {
    let priority = queue.remove_matching(ProcessControlBlock::is_priority);

    queue.sort_by_length();

    if let Some(pcb) = priority {
        queue.enqueue_front(pcb);
    }
}
