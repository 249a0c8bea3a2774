/*!
 * Shell Front-End
 * Reads commands, dispatches built-ins and feeds scripts to the scheduler
 *
 * Every instruction the scheduler runs is a shell command line, so the shell
 * is also the scheduler's instruction executor.
 */

mod builtins;
pub mod config;
pub mod parser;
mod programs;
pub mod variables;

pub use config::ShellConfig;
pub use parser::{split_commands, Command, ExecRequest};
pub use variables::VariableStore;

use crate::core::errors::ShellError;
use crate::core::types::ShellResult;
use crate::memory::InstructionArena;
use crate::monitoring::span_command;
use crate::process::Loader;
use crate::scheduler::{ExecStatus, InstructionExecutor, Scheduler};
use std::io::{BufRead, Write};
use tracing::{debug, info, trace};

pub struct Shell<R, W> {
    input: R,
    output: W,
    config: ShellConfig,
    variables: VariableStore,
    loader: Loader,
    scheduler: Scheduler,
    quit_requested: bool,
}

impl<R: BufRead, W: Write> Shell<R, W> {
    pub fn new(input: R, output: W, config: ShellConfig) -> Self {
        Self::with_arena(input, output, config, InstructionArena::new())
    }

    /// Build a shell whose loader and scheduler share `arena`
    pub fn with_arena(input: R, output: W, config: ShellConfig, arena: InstructionArena) -> Self {
        Self {
            input,
            output,
            config,
            variables: VariableStore::new(),
            loader: Loader::new(arena.clone()),
            scheduler: Scheduler::new(arena),
            quit_requested: false,
        }
    }

    /// Read and execute lines until `quit` or end of input
    pub fn run(&mut self) -> ShellResult<()> {
        info!(interactive = self.config.interactive, "Shell started");
        let mut line = String::new();

        while !self.quit_requested {
            if self.config.interactive {
                write!(self.output, "$ ")?;
                self.output.flush()?;
            }

            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                debug!("End of input");
                break;
            }
            self.execute_input(&line);
            self.output.flush()?;
        }

        self.output.flush()?;
        Ok(())
    }

    /// Execute every `;` separated command on one line
    ///
    /// Returns the status of the last command run.
    pub fn execute_input(&mut self, input: &str) -> ExecStatus {
        let mut status = ExecStatus::Completed;
        for words in split_commands(input) {
            if self.quit_requested {
                return ExecStatus::Skipped;
            }
            status = self.execute_words(&words);
        }
        status
    }

    fn execute_words(&mut self, words: &[&str]) -> ExecStatus {
        let span = span_command(words.first().copied().unwrap_or_default());
        let _entered = span.enter();
        trace!(?words, "Executing command");

        match Command::parse(words).and_then(|command| self.dispatch(command)) {
            Ok(()) => {
                span.record_status(0);
                ExecStatus::Completed
            }
            Err(err) => {
                self.report(&err);
                span.record_status(err.code());
                ExecStatus::Failed(err.code())
            }
        }
    }

    pub fn dispatch(&mut self, command: Command) -> ShellResult<()> {
        match command {
            Command::Help => self.help(),
            Command::Quit => self.quit(),
            Command::Set { name, value } => self.set(&name, &value),
            Command::Print { name } => self.print(&name),
            Command::Echo { token } => self.echo(&token),
            Command::Ls => self.list_directory(),
            Command::Mkdir { name } => self.make_directory(&name),
            Command::Touch { path } => self.touch(&path),
            Command::Cd { path } => self.change_directory(&path),
            Command::Source { path } => self.source(&path),
            Command::Run { program, args } => self.run_external(&program, &args),
            Command::Exec(request) => self.exec(request),
        }
    }

    fn report(&mut self, err: &ShellError) {
        debug!(error = ?err, "Command failed");
        if let Err(io_err) = writeln!(self.output, "{}", err) {
            debug!(error = %io_err, "Failed to write error message");
        }
    }

    pub fn variables(&self) -> &VariableStore {
        &self.variables
    }

    pub fn scheduler(&self) -> &Scheduler {
        &self.scheduler
    }

    pub fn arena(&self) -> &InstructionArena {
        self.loader.arena()
    }

    pub fn quit_requested(&self) -> bool {
        self.quit_requested
    }

    pub fn output(&self) -> &W {
        &self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }
}

impl<R: BufRead, W: Write> InstructionExecutor for Shell<R, W> {
    /// Lines after a `quit` are skipped, not executed
    fn execute_line(&mut self, line: &str) -> ExecStatus {
        if self.quit_requested {
            return ExecStatus::Skipped;
        }
        self.execute_input(line)
    }
}
