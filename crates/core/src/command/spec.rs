use std::path::{Path, PathBuf};
use std::process::Command;

/// Program label reported for an empty argument list
pub const EMPTY_COMMAND: &str = "<empty command line>";

/// How the command is handed to the operating system
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandLine {
    /// A single string interpreted by the platform shell
    Shell(String),
    /// Program followed by its arguments, no shell involved
    Argv(Vec<String>),
}

/// Whether the caller waits for the process to finish
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RunMode {
    #[default]
    Wait,
    Detach,
}

#[derive(Debug, Clone)]
pub struct CommandSpec {
    pub line: CommandLine,
    pub working_dir: Option<PathBuf>,
    pub mode: RunMode,
    /// Text written to the child's standard input (blocking mode only)
    pub input: Option<String>,
}

impl CommandSpec {
    pub fn new(args: Vec<String>) -> Self {
        Self {
            line: CommandLine::Argv(args),
            working_dir: None,
            mode: RunMode::Wait,
            input: None,
        }
    }

    pub fn new_shell(command: impl Into<String>) -> Self {
        Self {
            line: CommandLine::Shell(command.into()),
            working_dir: None,
            mode: RunMode::Wait,
            input: None,
        }
    }

    pub fn with_working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = Some(input.into());
        self
    }

    pub fn detached(mut self) -> Self {
        self.mode = RunMode::Detach;
        self
    }

    pub fn is_shell(&self) -> bool {
        matches!(self.line, CommandLine::Shell(_))
    }

    /// Name of the executable that will actually be spawned
    pub fn program(&self) -> String {
        match &self.line {
            CommandLine::Shell(_) => shell_program().to_string(),
            CommandLine::Argv(args) => args
                .first()
                .cloned()
                .unwrap_or_else(|| EMPTY_COMMAND.to_string()),
        }
    }

    pub fn working_dir(&self) -> Option<&Path> {
        self.working_dir.as_deref()
    }

    /// Render the command the way a user would type it
    pub fn display(&self) -> String {
        match &self.line {
            CommandLine::Shell(command) => command.clone(),
            CommandLine::Argv(args) => {
                let mut cmd = String::new();
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        cmd.push(' ');
                    }
                    if arg.is_empty() || arg.contains(' ') {
                        cmd.push_str(&format!("'{arg}'"));
                    } else {
                        cmd.push_str(arg);
                    }
                }
                cmd
            }
        }
    }

    /// Build the `std::process::Command` without configuring stdio.
    ///
    /// Returns `None` for an empty argument list.
    pub(crate) fn to_process_command(&self) -> Option<Command> {
        let mut command = match &self.line {
            CommandLine::Shell(line) => {
                let mut command = Command::new(shell_program());
                command.arg(shell_flag()).arg(line);
                command
            }
            CommandLine::Argv(args) => {
                let (program, rest) = args.split_first()?;
                let mut command = Command::new(program);
                command.args(rest);
                command
            }
        };

        if let Some(ref dir) = self.working_dir {
            command.current_dir(dir);
        }

        Some(command)
    }
}

#[cfg(windows)]
fn shell_program() -> &'static str {
    "cmd"
}

#[cfg(windows)]
fn shell_flag() -> &'static str {
    "/C"
}

#[cfg(not(windows))]
fn shell_program() -> &'static str {
    "sh"
}

#[cfg(not(windows))]
fn shell_flag() -> &'static str {
    "-c"
}
