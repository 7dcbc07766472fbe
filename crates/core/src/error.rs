use std::io;
use std::path::PathBuf;

/// Errors that can occur during bxtools operations
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("You are not in a bitrix web root! (searched upward from {})", .start.display())]
    RootNotFound { start: PathBuf },

    #[error("`{command}` failed{}", describe_failure(.code, .stderr))]
    CommandFailed {
        command: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("`{program}` is not installed or not runnable: {source}")]
    ProcessSpawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{0}")]
    NoMatch(String),

    #[error("Template file not found: {}", .0.display())]
    TemplateNotFound(PathBuf),

    #[error("IO error: {0}")]
    IoError(#[from] io::Error),

    #[error("Configuration error: {0}")]
    ConfigError(String),
}

fn describe_failure(code: &Option<i32>, stderr: &str) -> String {
    let stderr = stderr.trim();
    match (*code, stderr.is_empty()) {
        (Some(code), true) => format!(" with exit code {code}"),
        (None, true) => " (terminated by signal)".to_string(),
        (_, false) => format!(": {stderr}"),
    }
}

/// Result type alias for bxtools operations
pub type Result<T> = std::result::Result<T, Error>;
