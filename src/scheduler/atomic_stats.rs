/*!
 * Lock-Free Scheduler Statistics
 * Atomic counters accumulated across scheduling episodes
 */

use super::stats::{EpisodeReport, SchedulerStats};
use super::types::SchedulingPolicy;
use std::sync::atomic::{AtomicU64, Ordering};

/// Atomic scheduler statistics for lock-free updates
///
/// # Performance
/// - Cache-line aligned to prevent false sharing
/// - All operations use relaxed ordering; a snapshot may mix episodes
#[repr(C, align(64))]
pub struct AtomicSchedulerStats {
    episodes: AtomicU64,
    abandoned_episodes: AtomicU64,
    instructions_executed: AtomicU64,
    context_switches: AtomicU64,
    preemptions: AtomicU64,
    completed_processes: AtomicU64,
    // Changes once per episode
    last_policy: parking_lot::RwLock<Option<SchedulingPolicy>>,
}

impl AtomicSchedulerStats {
    #[inline]
    pub fn new() -> Self {
        Self {
            episodes: AtomicU64::new(0),
            abandoned_episodes: AtomicU64::new(0),
            instructions_executed: AtomicU64::new(0),
            context_switches: AtomicU64::new(0),
            preemptions: AtomicU64::new(0),
            completed_processes: AtomicU64::new(0),
            last_policy: parking_lot::RwLock::new(None),
        }
    }

    /// Fold a finished episode into the totals
    pub fn record_episode(&self, report: &EpisodeReport) {
        self.episodes.fetch_add(1, Ordering::Relaxed);
        self.instructions_executed
            .fetch_add(report.instructions_executed, Ordering::Relaxed);
        self.context_switches
            .fetch_add(report.context_switches, Ordering::Relaxed);
        self.preemptions
            .fetch_add(report.preemptions, Ordering::Relaxed);
        self.completed_processes
            .fetch_add(report.completed.len() as u64, Ordering::Relaxed);
        *self.last_policy.write() = Some(report.policy);
    }

    /// Count an episode rejected before it started
    #[inline(always)]
    pub fn inc_abandoned(&self) {
        self.abandoned_episodes.fetch_add(1, Ordering::Relaxed);
    }

    #[inline]
    pub fn snapshot(&self) -> SchedulerStats {
        SchedulerStats {
            episodes: self.episodes.load(Ordering::Relaxed),
            abandoned_episodes: self.abandoned_episodes.load(Ordering::Relaxed),
            instructions_executed: self.instructions_executed.load(Ordering::Relaxed),
            context_switches: self.context_switches.load(Ordering::Relaxed),
            preemptions: self.preemptions.load(Ordering::Relaxed),
            completed_processes: self.completed_processes.load(Ordering::Relaxed),
            last_policy: *self.last_policy.read(),
        }
    }
}

impl Default for AtomicSchedulerStats {
    fn default() -> Self {
        Self::new()
    }
}
