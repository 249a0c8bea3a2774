/*!
 * Script Execution
 * `source` and `exec`: load scripts into the arena and schedule them
 */

use super::parser::ExecRequest;
use super::Shell;
use crate::core::errors::ShellError;
use crate::core::types::ShellResult;
use crate::process::{read_program, ReadyQueue};
use crate::scheduler::SchedulingPolicy;
use std::fs::File;
use std::io::{BufRead, BufReader, Write};
use tracing::{debug, info};

impl<R: BufRead, W: Write> Shell<R, W> {
    /// Load one script and run it to completion under FCFS
    pub(super) fn source(&mut self, path: &str) -> ShellResult<()> {
        let program = read_script(path)?;
        let pcb = self.loader.spawn(&program)?;
        debug!(path, pid = pcb.pid(), lines = pcb.length(), "Loaded script");

        let mut queue = ReadyQueue::new();
        queue.enqueue(pcb);
        self.schedule(SchedulingPolicy::Fcfs, queue)
    }

    /// Load up to three scripts and run them together under the requested policy
    ///
    /// In background mode the rest of the shell's input becomes a priority
    /// process placed ahead of the scripts.
    pub(super) fn exec(&mut self, request: ExecRequest) -> ShellResult<()> {
        let programs = request
            .programs
            .iter()
            .map(|path| read_script(path))
            .collect::<ShellResult<Vec<_>>>()?;
        let descriptors = self.loader.spawn_batch(&programs)?;

        let mut queue: ReadyQueue = descriptors.into_iter().collect();
        if request.background {
            if let Err(err) = self.spawn_background(&mut queue) {
                self.loader.discard(queue.drain().collect());
                return Err(err);
            }
        }

        info!(
            policy = %request.policy,
            programs = request.programs.len(),
            background = request.background,
            "Executing scripts"
        );
        self.schedule(request.policy, queue)
    }

    fn spawn_background(&mut self, queue: &mut ReadyQueue) -> ShellResult<()> {
        let rest = read_program(&mut self.input)?;
        if let Some(pcb) = self.loader.spawn_priority(&rest)? {
            debug!(pid = pcb.pid(), lines = pcb.length(), "Loaded background input");
            queue.enqueue_front(pcb);
        }
        Ok(())
    }

    /// Run one episode with this shell as the executor
    fn schedule(&mut self, policy: SchedulingPolicy, mut queue: ReadyQueue) -> ShellResult<()> {
        let scheduler = self.scheduler.clone();
        let report = scheduler.run(policy, &mut queue, self)?;
        debug!(?report, "Episode report");
        Ok(())
    }
}

fn read_script(path: &str) -> ShellResult<Vec<String>> {
    let file = File::open(path).map_err(|err| {
        debug!(path, error = %err, "Cannot open script");
        ShellError::FileNotFound(path.into())
    })?;
    Ok(read_program(BufReader::new(file))?)
}
