//! Process execution with a normalised two-field result

use super::spec::{CommandSpec, RunMode};
use crate::error::{Error, Result};
use serde::Serialize;
use std::io::{self, Write};
use std::process::Stdio;
use std::thread;
use tracing::{debug, info, warn};

/// Outcome of running an external command.
///
/// `succeeded == true` always comes with `output`. A failed blocking run has
/// no `output` but keeps whatever the process wrote to stderr. A detached run
/// is always reported as `(false, None)`: nothing is known about it yet.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommandResult {
    pub succeeded: bool,
    pub output: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stderr: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exit_code: Option<i32>,
}

impl CommandResult {
    pub fn success(output: impl Into<String>) -> Self {
        Self {
            succeeded: true,
            output: Some(output.into()),
            stderr: None,
            exit_code: Some(0),
        }
    }

    pub fn failure(exit_code: Option<i32>, stderr: impl Into<String>) -> Self {
        Self {
            succeeded: false,
            output: None,
            stderr: Some(stderr.into()),
            exit_code,
        }
    }

    /// Fixed result of a detached run
    pub fn placeholder() -> Self {
        Self {
            succeeded: false,
            output: None,
            stderr: None,
            exit_code: None,
        }
    }

    /// Convert into the payload, or a [`Error::CommandFailed`] naming `command`
    pub fn into_output(self, command: &str) -> Result<String> {
        match self.output {
            Some(output) if self.succeeded => Ok(output),
            _ => Err(Error::CommandFailed {
                command: command.to_string(),
                code: self.exit_code,
                stderr: self.stderr.unwrap_or_default(),
            }),
        }
    }
}

/// Something that can run a [`CommandSpec`]
pub trait CommandExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult>;
}

/// Executor backed by real operating system processes
#[derive(Debug, Default, Clone, Copy)]
pub struct ProcessExecutor;

impl ProcessExecutor {
    pub fn new() -> Self {
        Self
    }
}

impl CommandExecutor for ProcessExecutor {
    fn execute(&self, spec: &CommandSpec) -> Result<CommandResult> {
        run_command(spec)
    }
}

/// Run `spec` and report its outcome.
///
/// Failing to start the process at all is an error ([`Error::ProcessSpawn`]);
/// a process that starts and exits non-zero is a normal failed result.
pub fn run_command(spec: &CommandSpec) -> Result<CommandResult> {
    let rendered = spec.display();
    let mut command = spec.to_process_command().ok_or_else(|| Error::ProcessSpawn {
        program: spec.program(),
        source: io::Error::new(io::ErrorKind::InvalidInput, "no program to run"),
    })?;

    info!("Running: {}", rendered);
    if let Some(dir) = spec.working_dir() {
        info!("Working directory: {}", dir.display());
    }

    let spawn_error = |source: io::Error| Error::ProcessSpawn {
        program: spec.program(),
        source,
    };

    if spec.mode == RunMode::Detach {
        let child = command.spawn().map_err(spawn_error)?;
        debug!("Detached process {} for: {}", child.id(), rendered);
        return Ok(CommandResult::placeholder());
    }

    command.stdout(Stdio::piped()).stderr(Stdio::piped());
    command.stdin(if spec.input.is_some() {
        Stdio::piped()
    } else {
        Stdio::null()
    });

    let mut child = command.spawn().map_err(spawn_error)?;

    // Feed stdin from a separate thread so a chatty child cannot fill its
    // stdout pipe while we are still blocked writing.
    let writer = match (spec.input.as_ref(), child.stdin.take()) {
        (Some(input), Some(mut stdin)) => {
            let bytes = input.as_bytes().to_vec();
            Some(thread::spawn(move || stdin.write_all(&bytes)))
        }
        _ => None,
    };

    let output = child.wait_with_output()?;

    if let Some(writer) = writer {
        match writer.join() {
            Ok(Err(e)) if e.kind() != io::ErrorKind::BrokenPipe => {
                warn!("Failed to write stdin of `{}`: {}", rendered, e);
            }
            Err(_) => warn!("Stdin writer for `{}` panicked", rendered),
            _ => {}
        }
    }

    let code = output.status.code();
    debug!(
        "`{}` exited with {:?} ({} bytes stdout, {} bytes stderr)",
        rendered,
        code,
        output.stdout.len(),
        output.stderr.len()
    );

    if output.status.success() {
        Ok(CommandResult::success(
            String::from_utf8_lossy(&output.stdout).into_owned(),
        ))
    } else {
        let stderr = String::from_utf8_lossy(&output.stderr).into_owned();
        warn!("`{}` failed with {:?}: {}", rendered, code, stderr.trim());
        Ok(CommandResult::failure(code, stderr))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_result_invariants() {
        let ok = CommandResult::success("");
        assert!(ok.succeeded);
        assert_eq!(ok.output.as_deref(), Some(""));

        let failed = CommandResult::failure(Some(1), "boom");
        assert!(!failed.succeeded);
        assert!(failed.output.is_none());

        let detached = CommandResult::placeholder();
        assert!(!detached.succeeded);
        assert!(detached.output.is_none());
        assert!(detached.stderr.is_none());
    }

    #[test]
    fn test_into_output() {
        assert_eq!(
            CommandResult::success("code").into_output("bxc").unwrap(),
            "code"
        );
        let err = CommandResult::failure(Some(3), "nope\n")
            .into_output("bxc generate:include")
            .unwrap_err();
        assert_eq!(err.to_string(), "`bxc generate:include` failed: nope");
    }

    #[test]
    fn test_missing_binary_is_spawn_error() {
        let spec = CommandSpec::new(vec!["bxtools-definitely-missing-binary".to_string()]);
        match run_command(&spec) {
            Err(Error::ProcessSpawn { program, .. }) => {
                assert_eq!(program, "bxtools-definitely-missing-binary")
            }
            other => panic!("expected ProcessSpawn, got {other:?}"),
        }
    }

    #[test]
    fn test_empty_command_is_spawn_error() {
        let spec = CommandSpec::new(Vec::new());
        let err = run_command(&spec).unwrap_err();
        assert!(matches!(err, Error::ProcessSpawn { .. }));
        assert_eq!(
            err.to_string(),
            "`<empty command line>` is not installed or not runnable: no program to run"
        );
    }

    #[cfg(unix)]
    #[test]
    fn test_killed_by_signal_is_failure() {
        let spec = CommandSpec::new_shell("echo partial; kill -9 $$");
        let result = run_command(&spec).unwrap();
        assert!(!result.succeeded);
        assert!(result.output.is_none());
        assert_eq!(result.exit_code, None);

        let err = result.into_output("sh").unwrap_err();
        assert_eq!(err.to_string(), "`sh` failed (terminated by signal)");
    }

    #[cfg(unix)]
    #[test]
    fn test_success_captures_utf8() {
        let spec = CommandSpec::new_shell("printf 'компонент ✓'");
        let result = run_command(&spec).unwrap();
        assert_eq!(result, CommandResult::success("компонент ✓"));
    }

    #[cfg(unix)]
    #[test]
    fn test_failure_discards_stdout_keeps_stderr() {
        let spec = CommandSpec::new_shell("echo partial; echo broken >&2; exit 1");
        let result = run_command(&spec).unwrap();
        assert!(!result.succeeded);
        assert!(result.output.is_none());
        assert_eq!(result.stderr.as_deref(), Some("broken\n"));
        assert_eq!(result.exit_code, Some(1));
    }

    #[cfg(unix)]
    #[test]
    fn test_input_is_piped() {
        let spec = CommandSpec::new(vec!["cat".to_string()]).with_input("ä\nb\n");
        let result = run_command(&spec).unwrap();
        assert_eq!(result.output.as_deref(), Some("ä\nb\n"));
    }

    #[cfg(unix)]
    #[test]
    fn test_working_dir_is_used() {
        let temp_dir = tempfile::TempDir::new().unwrap();
        let spec = CommandSpec::new(vec!["pwd".to_string()]).with_working_dir(temp_dir.path());
        let output = run_command(&spec).unwrap().output.unwrap();
        let reported = std::fs::canonicalize(output.trim()).unwrap();
        assert_eq!(reported, std::fs::canonicalize(temp_dir.path()).unwrap());
    }
}
