/*!
 * Core Types
 * Common types used across the shell and scheduler
 */

use smartstring::{LazyCompact, SmartString};

/// Process ID type
pub type Pid = u32;

/// Index of a line in the instruction arena
pub type LineIndex = usize;

/// Job length score used by the aging policy
pub type Score = usize;

/// Small-string optimized text for error payloads and variable names
pub type InlineString = SmartString<LazyCompact>;

/// Result type for descriptor creation and loading
pub type ProcessResult<T> = Result<T, super::errors::ProcessError>;

/// Result type for scheduling episodes
pub type SchedulerResult<T> = Result<T, super::errors::SchedulerError>;

/// Result type for shell commands
pub type ShellResult<T> = Result<T, super::errors::ShellError>;
