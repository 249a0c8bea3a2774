/*!
 * Scheduler Statistics
 * Per-episode reports and cumulative counters
 */

use super::traits::ExecStatus;
use super::types::{Quantum, SchedulingPolicy};
use crate::core::types::Pid;
use serde::{Deserialize, Serialize};

/// Outcome of one scheduling episode (one call to a policy entry point)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EpisodeReport {
    pub policy: SchedulingPolicy,
    /// Instructions per turn, for round-robin episodes
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quantum: Option<Quantum>,
    pub instructions_executed: u64,
    pub failed_instructions: u64,
    /// Dispatches of a different pid than the one dispatched just before
    pub context_switches: u64,
    /// Unfinished descriptors put back on the queue
    pub preemptions: u64,
    /// Pids in the order they finished
    pub completed: Vec<Pid>,
    #[serde(skip)]
    last_dispatched: Option<Pid>,
}

impl EpisodeReport {
    pub(super) fn new(policy: SchedulingPolicy) -> Self {
        Self {
            policy,
            quantum: policy.quantum(),
            instructions_executed: 0,
            failed_instructions: 0,
            context_switches: 0,
            preemptions: 0,
            completed: Vec::new(),
            last_dispatched: None,
        }
    }

    pub(super) fn dispatch(&mut self, pid: Pid) {
        if self.last_dispatched.is_some_and(|last| last != pid) {
            self.context_switches += 1;
        }
        self.last_dispatched = Some(pid);
    }

    pub(super) fn record(&mut self, status: ExecStatus) {
        self.instructions_executed += 1;
        if status.is_failure() {
            self.failed_instructions += 1;
        }
    }

    pub(super) fn preempted(&mut self) {
        self.preemptions += 1;
    }

    pub(super) fn retired(&mut self, pid: Pid) {
        self.completed.push(pid);
    }
}

/// Cumulative scheduler statistics snapshot
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchedulerStats {
    pub episodes: u64,
    pub abandoned_episodes: u64,
    pub instructions_executed: u64,
    pub context_switches: u64,
    pub preemptions: u64,
    pub completed_processes: u64,
    pub last_policy: Option<SchedulingPolicy>,
}
