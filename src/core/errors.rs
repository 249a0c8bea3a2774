/*!
 * Error Types
 * Centralized error handling with thiserror, miette, and serde support
 */

use super::types::InlineString;
use miette::Diagnostic;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// Re-export ArenaError from memory module
pub use crate::memory::ArenaError;

/// Descriptor creation and loading errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum ProcessError {
    #[error("error: not enough memory for script")]
    #[diagnostic(
        code(process::out_of_memory),
        help("The instruction arena cannot hold this script. Load fewer or shorter scripts.")
    )]
    OutOfMemory { requested: usize, available: usize },

    #[error("Failed to create process: {0}")]
    #[diagnostic(
        code(process::creation_failed),
        help("The script could not be copied into the instruction arena.")
    )]
    CreationFailed(InlineString),
}

// Allow conversion from ArenaError to ProcessError
impl From<ArenaError> for ProcessError {
    fn from(err: ArenaError) -> Self {
        match err {
            ArenaError::OutOfLines {
                requested,
                available,
                ..
            } => ProcessError::OutOfMemory {
                requested,
                available,
            },
            other => ProcessError::CreationFailed(other.to_string().into()),
        }
    }
}

/// Scheduler-related errors with serialization support
#[derive(Error, Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Diagnostic)]
#[serde(tag = "error_type", content = "details", rename_all = "snake_case")]
pub enum SchedulerError {
    #[error("Invalid ready queue: {0}")]
    #[diagnostic(
        code(scheduler::invalid_queue),
        help("At most one priority process may be queued and it must sit at the head.")
    )]
    InvalidQueue(InlineString),

    #[error("Invalid quantum: {0} must be at least 1 instruction")]
    #[diagnostic(
        code(scheduler::invalid_quantum),
        help("Round-robin needs a positive instruction budget per turn.")
    )]
    InvalidQuantum(usize),

    #[error("Bad command: wrong scheduling policy, error!")]
    #[diagnostic(
        code(scheduler::invalid_policy),
        help("Use FCFS, SJF, RR, RR30 or AGING.")
    )]
    InvalidPolicy(InlineString),
}

/// Shell front-end errors with miette diagnostics
///
/// The `Display` text of each variant is the exact message the shell prints.
#[derive(Error, Debug, Diagnostic)]
pub enum ShellError {
    #[error("Unknown Command")]
    #[diagnostic(code(shell::unknown_command), help("Type `help` to list commands."))]
    UnknownCommand,

    #[error("Bad command: File not found")]
    #[diagnostic(code(shell::file_not_found))]
    FileNotFound(InlineString),

    #[error("Bad command: my_mkdir")]
    #[diagnostic(
        code(shell::bad_mkdir),
        help("Directory names must be alphanumeric or a `$VAR` holding one.")
    )]
    BadMkdir,

    #[error("Bad command: my_touch")]
    #[diagnostic(code(shell::bad_touch), help("The file could not be opened for appending."))]
    BadTouch,

    #[error("Bad command: my_cd")]
    #[diagnostic(code(shell::bad_cd))]
    BadCd,

    #[error("Error! 2 exec arguments are identical")]
    #[diagnostic(code(shell::duplicate_program))]
    DuplicateProgram(InlineString),

    #[error("Failed to run {program}: {reason}")]
    #[diagnostic(code(shell::run_failed))]
    RunFailed {
        program: InlineString,
        reason: InlineString,
    },

    #[error(transparent)]
    #[diagnostic(transparent)]
    Process(#[from] ProcessError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Scheduler(#[from] SchedulerError),

    #[error("I/O error: {0}")]
    #[diagnostic(
        code(shell::io_error),
        help("Reading input or writing output failed.")
    )]
    Io(InlineString),
}

impl ShellError {
    /// Numeric status reported for a failed command
    pub fn code(&self) -> i32 {
        match self {
            ShellError::FileNotFound(_) => 3,
            ShellError::BadMkdir => 4,
            ShellError::BadCd => 5,
            _ => 1,
        }
    }
}

// Implement conversion from std::io::Error
impl From<std::io::Error> for ShellError {
    fn from(err: std::io::Error) -> Self {
        ShellError::Io(err.to_string().into())
    }
}
