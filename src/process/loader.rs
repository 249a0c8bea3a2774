/*!
 * Program Loader
 * Places script text in the instruction arena and builds descriptors
 */

use super::pcb::ProcessControlBlock;
use crate::core::limits::{ARENA_CAPACITY, FIRST_PID, MAX_LINE_WIDTH};
use crate::core::types::{LineIndex, Pid, ProcessResult};
use crate::memory::InstructionArena;
use std::io::{self, BufRead};
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::Arc;
use tracing::{debug, warn};

/// Loader
///
/// Owns the pid source. Cloning shares both the arena and the pid counter.
#[derive(Debug, Clone)]
pub struct Loader {
    arena: InstructionArena,
    next_pid: Arc<AtomicU32>,
}

impl Loader {
    pub fn new(arena: InstructionArena) -> Self {
        Self {
            arena,
            next_pid: Arc::new(AtomicU32::new(FIRST_PID)),
        }
    }

    pub fn arena(&self) -> &InstructionArena {
        &self.arena
    }

    /// Issue the next process id
    pub fn next_pid(&self) -> Pid {
        self.next_pid.fetch_add(1, Ordering::Relaxed)
    }

    /// Load one script and create its descriptor
    pub fn spawn<S: AsRef<str>>(&self, program: &[S]) -> ProcessResult<ProcessControlBlock> {
        let start = self.place(program)?;
        let pcb = ProcessControlBlock::new(self.next_pid(), start, program.len());
        debug!(pid = pcb.pid(), start, lines = pcb.length(), "Process loaded");
        Ok(pcb)
    }

    /// Load every script or none of them
    ///
    /// If the arena runs out part way, ranges already placed for earlier
    /// scripts are released newest first so the cursor rewinds completely.
    pub fn spawn_batch<S: AsRef<str>>(
        &self,
        programs: &[Vec<S>],
    ) -> ProcessResult<Vec<ProcessControlBlock>> {
        let mut placed: Vec<(LineIndex, usize)> = Vec::with_capacity(programs.len());

        for program in programs {
            match self.place(program) {
                Ok(start) => placed.push((start, program.len())),
                Err(err) => {
                    warn!(
                        loaded = placed.len(),
                        requested = programs.len(),
                        "Batch load failed, rolling back"
                    );
                    for &(start, len) in placed.iter().rev() {
                        self.release(start, len);
                    }
                    return Err(err);
                }
            }
        }

        Ok(placed
            .into_iter()
            .map(|(start, len)| ProcessControlBlock::new(self.next_pid(), start, len))
            .collect())
    }

    /// Load the background continuation of the shell's own input
    ///
    /// Returns `None` when nothing is left to run.
    pub fn spawn_priority<S: AsRef<str>>(
        &self,
        program: &[S],
    ) -> ProcessResult<Option<ProcessControlBlock>> {
        if program.is_empty() {
            return Ok(None);
        }
        Ok(Some(self.spawn(program)?.with_priority()))
    }

    /// Release descriptors that will never be scheduled, newest first
    pub fn discard(&self, mut descriptors: Vec<ProcessControlBlock>) {
        descriptors.sort_by_key(|pcb| std::cmp::Reverse(pcb.start()));
        for pcb in descriptors {
            self.release(pcb.start(), pcb.length());
        }
    }

    fn place<S: AsRef<str>>(&self, program: &[S]) -> ProcessResult<LineIndex> {
        let start = self.arena.allocate(program.len())?;
        for (offset, line) in program.iter().enumerate() {
            if let Err(err) = self.arena.write(start + offset, line.as_ref()) {
                self.release(start, program.len());
                return Err(err.into());
            }
        }
        Ok(start)
    }

    fn release(&self, start: LineIndex, len: usize) {
        if let Err(err) = self.arena.release(start, len) {
            warn!(start, len, error = %err, "Failed to release lines");
        }
    }
}

/// Read script text the way the shell stores it
///
/// Each line is cut at its first `\r` or `\n`; text wider than an arena line
/// continues on the next line. Reading stops at the arena capacity.
pub fn read_program<R: BufRead>(mut reader: R) -> io::Result<Vec<String>> {
    let mut lines = Vec::new();
    let mut buf = String::new();

    while lines.len() < ARENA_CAPACITY {
        buf.clear();
        if reader.read_line(&mut buf)? == 0 {
            break;
        }
        let end = buf.find(['\r', '\n']).unwrap_or(buf.len());
        let mut rest = &buf[..end];

        loop {
            let chunk = crate::memory::arena::clip(rest);
            lines.push(chunk.to_string());
            rest = &rest[chunk.len()..];
            if rest.is_empty() || lines.len() >= ARENA_CAPACITY {
                break;
            }
        }
    }

    debug!(lines = lines.len(), width = MAX_LINE_WIDTH, "Program read");
    Ok(lines)
}
