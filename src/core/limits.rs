/*!
 * System Limits and Constants
 *
 * Fixed configuration values for the instruction arena, the scheduler and the
 * shell front-end. None of these are tunable at runtime.
 */

use super::types::Pid;

// =============================================================================
// INSTRUCTION ARENA
// =============================================================================

/// Number of lines the shared instruction arena can hold
pub const ARENA_CAPACITY: usize = 1000;

/// Width of one arena line including the terminator slot
pub const LINE_BUFFER_SIZE: usize = 100;

/// Longest text stored on a single arena line (bytes)
/// Longer script lines are split across consecutive lines when read
pub const MAX_LINE_WIDTH: usize = LINE_BUFFER_SIZE - 1;

// =============================================================================
// SCHEDULER
// =============================================================================

/// Instructions per turn under the `RR` policy
pub const RR_QUANTUM: usize = 2;

/// Instructions per turn under the `RR30` policy
pub const RR30_QUANTUM: usize = 30;

/// First pid handed out by the loader
pub const FIRST_PID: Pid = 1;

// =============================================================================
// SHELL
// =============================================================================

/// Maximum number of shell variables
pub const VARIABLE_CAPACITY: usize = 1000;

/// Maximum number of programs one `exec` may load
pub const MAX_EXEC_PROGRAMS: usize = 3;

/// Marker that requests background mode for `exec`
pub const BACKGROUND_MARKER: &str = "#";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_width_leaves_terminator_slot() {
        assert_eq!(MAX_LINE_WIDTH + 1, LINE_BUFFER_SIZE);
    }

    #[test]
    fn test_quanta_are_ordered() {
        assert!(RR_QUANTUM > 0);
        assert!(RR30_QUANTUM > RR_QUANTUM);
    }
}
