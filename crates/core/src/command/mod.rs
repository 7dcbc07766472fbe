//! External command description and execution

pub mod runner;
pub mod spec;

// Re-export commonly used types
pub use runner::{CommandExecutor, CommandResult, ProcessExecutor, run_command};
pub use spec::{CommandLine, CommandSpec, RunMode};
