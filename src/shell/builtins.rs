/*!
 * Built-in Commands
 * Variables, output and filesystem commands handled inside the shell
 */

use super::Shell;
use crate::core::errors::ShellError;
use crate::core::types::ShellResult;
use std::cmp::Ordering;
use std::fs;
use std::io::{BufRead, Write};
use tracing::{debug, warn};

const HELP: &str = "COMMAND\t\t\tDESCRIPTION
 help\t\t\tDisplays all the commands
 quit\t\t\tExits / terminates the shell with “Bye!”
 set VAR STRING\t\tAssigns a value to shell memory
 print VAR\t\tDisplays the STRING assigned to VAR
 source SCRIPT.TXT\t\tExecutes the file SCRIPT.TXT
 ";

impl<R: BufRead, W: Write> Shell<R, W> {
    pub(super) fn help(&mut self) -> ShellResult<()> {
        writeln!(self.output, "{}", HELP)?;
        Ok(())
    }

    pub(super) fn quit(&mut self) -> ShellResult<()> {
        writeln!(self.output, "Bye!")?;
        self.quit_requested = true;
        Ok(())
    }

    pub(super) fn set(&mut self, name: &str, value: &str) -> ShellResult<()> {
        self.variables.set(name, value);
        Ok(())
    }

    pub(super) fn print(&mut self, name: &str) -> ShellResult<()> {
        match self.variables.get(name) {
            Some(value) => writeln!(self.output, "{}", value)?,
            None => writeln!(self.output, "Variable does not exist")?,
        }
        Ok(())
    }

    /// Print the token, or the value of `$VAR` (an empty line when unset)
    pub(super) fn echo(&mut self, token: &str) -> ShellResult<()> {
        let text = self.variables.expand(token).unwrap_or_default();
        writeln!(self.output, "{}", text)?;
        Ok(())
    }

    pub(super) fn list_directory(&mut self) -> ShellResult<()> {
        let entries = match fs::read_dir(".") {
            Ok(entries) => entries,
            Err(err) => {
                warn!(error = %err, "my_ls couldn't scan the directory");
                return Ok(());
            }
        };

        let mut names = vec![".".to_string(), "..".to_string()];
        for entry in entries.flatten() {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }
        names.sort_by(|a, b| listing_order(a, b));

        for name in names {
            writeln!(self.output, "{}", name)?;
        }
        Ok(())
    }

    pub(super) fn make_directory(&mut self, token: &str) -> ShellResult<()> {
        let name = self
            .variables
            .expand(token)
            .filter(|name| is_alphanumeric(name))
            .ok_or(ShellError::BadMkdir)?;

        if let Err(err) = fs::create_dir(name) {
            warn!(name, error = %err, "Something went wrong in my_mkdir");
        }
        Ok(())
    }

    pub(super) fn touch(&mut self, path: &str) -> ShellResult<()> {
        fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(path)
            .map_err(|err| {
                debug!(path, error = %err, "my_touch failed");
                ShellError::BadTouch
            })?;
        Ok(())
    }

    pub(super) fn change_directory(&mut self, path: &str) -> ShellResult<()> {
        std::env::set_current_dir(path).map_err(|err| {
            debug!(path, error = %err, "my_cd failed");
            ShellError::BadCd
        })
    }

    /// Run an external program in the foreground and wait for it
    pub(super) fn run_external(&mut self, program: &str, args: &[String]) -> ShellResult<()> {
        self.output.flush()?;
        let status = std::process::Command::new(program)
            .args(args)
            .status()
            .map_err(|err| ShellError::RunFailed {
                program: program.into(),
                reason: err.to_string().into(),
            })?;
        debug!(program, %status, "External program exited");
        Ok(())
    }
}

fn is_alphanumeric(name: &str) -> bool {
    name.bytes().all(|b| b.is_ascii_alphanumeric())
}

/// `my_ls` ordering: digits before letters, letters case-insensitively with
/// uppercase first on ties, a shorter prefix before the longer name
pub(crate) fn listing_order(a: &str, b: &str) -> Ordering {
    let (a, b) = (a.as_bytes(), b.as_bytes());
    let len = a.len().max(b.len());
    for i in 0..len {
        let ord = compare_byte(
            a.get(i).copied().unwrap_or(0),
            b.get(i).copied().unwrap_or(0),
        );
        if ord != Ordering::Equal {
            return ord;
        }
    }
    Ordering::Equal
}

fn compare_byte(a: u8, b: u8) -> Ordering {
    if a.is_ascii_digit() && b.is_ascii_digit() {
        return a.cmp(&b);
    }
    if a.is_ascii_digit() {
        return Ordering::Less;
    }
    let (lower_a, lower_b) = (a.to_ascii_lowercase(), b.to_ascii_lowercase());
    if lower_a == lower_b {
        a.cmp(&b)
    } else {
        lower_a.cmp(&lower_b)
    }
}
