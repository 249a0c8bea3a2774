/*!
 * Scheduler Shell Library
 * An interactive shell that loads scripts into a shared instruction arena
 * and runs them under a choice of CPU scheduling policies
 */

pub mod core;
pub mod memory;
pub mod monitoring;
pub mod process;
pub mod scheduler;
pub mod shell;

// Re-exports
pub use crate::core::errors::*;
pub use crate::core::limits;
pub use crate::core::types::*;
pub use memory::{ArenaStats, InstructionArena};
pub use monitoring::init_tracing;
pub use process::{Loader, ProcessControlBlock, ReadyQueue};
pub use scheduler::{
    EpisodeReport, ExecStatus, InstructionExecutor, Quantum, Scheduler, SchedulerStats,
    SchedulingPolicy,
};
pub use shell::{Shell, ShellConfig};
