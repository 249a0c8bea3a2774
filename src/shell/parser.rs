/*!
 * Command Parser
 * Tokenizes shell input and validates command arity
 */

use crate::core::errors::ShellError;
use crate::core::limits::{BACKGROUND_MARKER, MAX_EXEC_PROGRAMS};
use crate::core::types::ShellResult;
use crate::scheduler::SchedulingPolicy;

/// Split one input line into commands (`;` separated) of whitespace separated words
pub fn split_commands(input: &str) -> impl Iterator<Item = Vec<&str>> {
    input
        .split(';')
        .map(|command| command.split_whitespace().collect::<Vec<_>>())
        .filter(|words| !words.is_empty())
}

/// Parsed shell command
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Quit,
    Set { name: String, value: String },
    Print { name: String },
    Echo { token: String },
    Ls,
    Mkdir { name: String },
    Touch { path: String },
    Cd { path: String },
    Source { path: String },
    Run { program: String, args: Vec<String> },
    Exec(ExecRequest),
}

/// Arguments of `exec P1 [P2 [P3]] POLICY [#]`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecRequest {
    pub programs: Vec<String>,
    pub policy: SchedulingPolicy,
    pub background: bool,
}

impl Command {
    pub fn parse(words: &[&str]) -> ShellResult<Self> {
        let Some((&name, args)) = words.split_first() else {
            return Err(ShellError::UnknownCommand);
        };

        let command = match (name, args) {
            ("help", []) => Command::Help,
            ("quit", []) => Command::Quit,
            ("set", [var, value]) => Command::Set {
                name: var.to_string(),
                value: value.to_string(),
            },
            ("print", [var]) => Command::Print {
                name: var.to_string(),
            },
            ("echo", [token]) => Command::Echo {
                token: token.to_string(),
            },
            ("my_ls", []) => Command::Ls,
            ("my_mkdir", [dir]) => Command::Mkdir {
                name: dir.to_string(),
            },
            ("my_touch", [path]) => Command::Touch {
                path: path.to_string(),
            },
            ("my_cd", [path]) => Command::Cd {
                path: path.to_string(),
            },
            ("source", [path]) => Command::Source {
                path: path.to_string(),
            },
            ("run", [program, rest @ ..]) => Command::Run {
                program: program.to_string(),
                args: rest.iter().map(|arg| arg.to_string()).collect(),
            },
            ("exec", args) => Command::Exec(ExecRequest::parse(args)?),
            _ => return Err(ShellError::UnknownCommand),
        };
        Ok(command)
    }
}

impl ExecRequest {
    fn parse(args: &[&str]) -> ShellResult<Self> {
        if args.len() < 2 || args.len() > MAX_EXEC_PROGRAMS + 2 {
            return Err(ShellError::UnknownCommand);
        }

        let (background, args) = match args.split_last() {
            Some((&last, rest)) if last == BACKGROUND_MARKER => (true, rest),
            _ => (false, args),
        };

        let Some((&policy, programs)) = args.split_last() else {
            return Err(ShellError::UnknownCommand);
        };
        let policy: SchedulingPolicy = policy.parse()?;

        if programs.len() > MAX_EXEC_PROGRAMS {
            return Err(ShellError::UnknownCommand);
        }

        for (i, program) in programs.iter().enumerate() {
            if programs[i + 1..].contains(program) {
                return Err(ShellError::DuplicateProgram((*program).into()));
            }
        }

        Ok(Self {
            programs: programs.iter().map(|p| p.to_string()).collect(),
            policy,
            background,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::errors::SchedulerError;

    fn parse(input: &str) -> ShellResult<Command> {
        let words: Vec<&str> = input.split_whitespace().collect();
        Command::parse(&words)
    }

    #[test]
    fn test_split_commands() {
        let commands: Vec<_> = split_commands("set x 1; print x ;; echo  hi ").collect();
        assert_eq!(
            commands,
            vec![vec!["set", "x", "1"], vec!["print", "x"], vec!["echo", "hi"]]
        );
        assert_eq!(split_commands("   ").count(), 0);
    }

    #[test]
    fn test_arity() {
        assert_eq!(parse("help").unwrap(), Command::Help);
        assert!(matches!(parse("help me"), Err(ShellError::UnknownCommand)));
        assert!(matches!(parse("set x"), Err(ShellError::UnknownCommand)));
        assert!(matches!(parse("set x 1 2"), Err(ShellError::UnknownCommand)));
        assert!(matches!(parse("run"), Err(ShellError::UnknownCommand)));
        assert!(matches!(parse("frobnicate"), Err(ShellError::UnknownCommand)));
        assert_eq!(
            parse("run ls -l").unwrap(),
            Command::Run {
                program: "ls".into(),
                args: vec!["-l".into()]
            }
        );
    }

    #[test]
    fn test_exec_parsing() {
        assert_eq!(
            parse("exec p1 p2 RR #").unwrap(),
            Command::Exec(ExecRequest {
                programs: vec!["p1".into(), "p2".into()],
                policy: SchedulingPolicy::RoundRobin,
                background: true,
            })
        );
        assert_eq!(
            parse("exec p1 AGING").unwrap(),
            Command::Exec(ExecRequest {
                programs: vec!["p1".into()],
                policy: SchedulingPolicy::Aging,
                background: false,
            })
        );
    }

    #[test]
    fn test_exec_errors() {
        assert!(matches!(parse("exec p1"), Err(ShellError::UnknownCommand)));
        assert!(matches!(
            parse("exec p1 p2 p3 p4 FCFS"),
            Err(ShellError::UnknownCommand)
        ));
        assert!(matches!(
            parse("exec p1 LOTTERY"),
            Err(ShellError::Scheduler(SchedulerError::InvalidPolicy(_)))
        ));
        assert!(matches!(
            parse("exec p1 p2 p1 SJF"),
            Err(ShellError::DuplicateProgram(_))
        ));
    }
}
