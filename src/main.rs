/*!
 * mysh - Main Entry Point
 *
 * Reads commands from stdin. With a terminal attached the shell prompts
 * with `$ `; with redirected input it runs in batch mode until end of input.
 */

use sched_shell::{init_tracing, Shell, ShellConfig};
use std::io;
use tracing::info;

fn main() -> miette::Result<()> {
    let config = ShellConfig::from_env();
    init_tracing(&config);

    info!(interactive = config.interactive, "mysh starting");

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut shell = Shell::new(stdin.lock(), stdout.lock(), config);
    shell.run()?;

    let stats = shell.scheduler().stats();
    info!(
        episodes = stats.episodes,
        instructions = stats.instructions_executed,
        "mysh exiting"
    );
    Ok(())
}
