/*!
 * Scheduler Traits
 * Interface between the policy loops and whatever interprets instructions
 */

/// Outcome of one instruction, advisory only
///
/// Policies count every outcome as one executed step and never stop early.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExecStatus {
    Completed,
    /// The instruction ran and reported an error with this status code
    Failed(i32),
    /// The interpreter declined to run the instruction
    Skipped,
}

impl ExecStatus {
    #[inline]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Executes one instruction line at a time
pub trait InstructionExecutor {
    fn execute_line(&mut self, line: &str) -> ExecStatus;
}
