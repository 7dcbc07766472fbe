//! bitrix-tools - editor helpers for Bitrix components
//!
//! This crate provides functionality to:
//! - Locate the Bitrix site root enclosing a file
//! - Run the `bxc` console tool inside that root and collect its output
//! - Recognise component references and `IncludeComponent` calls under the cursor
//! - Drive the editor actions (expand a component, pick a template, open a template)
pub mod bxc;
pub mod command;
pub mod completion;
pub mod config;
pub mod context;
pub mod error;
pub mod extract;
pub mod flow;
pub mod root;

// Re-export commonly used types and traits
pub use error::{Error, Result};

// Re-export main API components
pub use bxc::BxcTool;
pub use command::{
    CommandExecutor, CommandLine, CommandResult, CommandSpec, ProcessExecutor, RunMode, run_command,
};
pub use config::Config;
pub use context::{EditingContext, Position, Selection};
pub use flow::{Flow, FlowEnv, Outcome, PendingSelection, run_flow};
pub use root::{ProjectRoot, RootLocator, SentinelRootLocator, find_project_root};
