use anyhow::Result;
use bitrix_tools_core::Flow;
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::commands::{FlowOptions, complete_command, flow_command, init_command, root_command};

#[derive(Parser, Debug)]
#[command(name = "bxtools")]
#[command(version, about, long_about = None)]
#[command(after_help = "ENVIRONMENT:\n    RUST_LOG=debug    Enable debug logging")]
pub struct Runner {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human readable output
    #[default]
    Text,
    /// One JSON document, for editor integrations
    Json,
}

#[derive(Args, Debug)]
pub struct FlowArgs {
    /// Path to the PHP file with optional cursor (e.g., index.php:12:5)
    pub location: String,

    /// Read the buffer text from stdin instead of the file on disk
    #[arg(long)]
    pub stdin: bool,

    /// Answer the selection menu with this index (negative = cancelled)
    #[arg(long, allow_hyphen_values = true)]
    pub choose: Option<i64>,

    #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
    pub format: OutputFormat,
}

impl FlowArgs {
    fn options(self) -> FlowOptions {
        FlowOptions {
            location: self.location,
            stdin: self.stdin,
            choose: self.choose,
            format: self.format,
        }
    }
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the Bitrix site root enclosing a file
    Root {
        /// Any path inside the site
        filepath: String,
    },
    /// Expand the component reference under the cursor, or pick a component to insert
    #[command(visible_alias = "e")]
    Expand(FlowArgs),
    /// Pick a template for the IncludeComponent call under the cursor
    #[command(visible_alias = "t")]
    SelectTemplate(FlowArgs),
    /// Open template.php of the IncludeComponent call under the cursor
    #[command(visible_alias = "o")]
    OpenTemplate(FlowArgs),
    /// Complete information block field names after $arItem[" or $arResult["
    Complete {
        /// Path to the PHP file with cursor (e.g., template.php:8:20)
        location: String,

        /// Read the buffer text from stdin instead of the file on disk
        #[arg(long)]
        stdin: bool,

        #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
    /// Write a default .bxtools.json into the site root
    Init {
        /// Specify the current working directory
        #[arg(long)]
        cwd: Option<String>,

        /// Force overwrite existing configuration
        #[arg(short, long)]
        force: bool,
    },
}

impl Commands {
    /// Execute the command
    pub fn execute(self) -> Result<()> {
        match self {
            Commands::Root { filepath } => root_command(&filepath),
            Commands::Expand(args) => flow_command(Flow::ExpandComponent, args.options()),
            Commands::SelectTemplate(args) => flow_command(Flow::SelectTemplate, args.options()),
            Commands::OpenTemplate(args) => flow_command(Flow::OpenTemplate, args.options()),
            Commands::Complete {
                location,
                stdin,
                format,
            } => complete_command(&location, stdin, format),
            Commands::Init { cwd, force } => init_command(cwd.as_deref(), force),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_flow_args() {
        let runner = Runner::try_parse_from([
            "bxtools",
            "open-template",
            "index.php:3:10",
            "--choose",
            "-1",
            "--format",
            "json",
        ])
        .unwrap();
        match runner.command {
            Commands::OpenTemplate(args) => {
                assert_eq!(args.location, "index.php:3:10");
                assert_eq!(args.choose, Some(-1));
                assert_eq!(args.format, OutputFormat::Json);
                assert!(!args.stdin);
            }
            other => panic!("unexpected command {other:?}"),
        }
    }

    #[test]
    fn test_alias() {
        let runner = Runner::try_parse_from(["bxtools", "e", "index.php", "--stdin"]).unwrap();
        assert!(matches!(runner.command, Commands::Expand(FlowArgs { stdin: true, .. })));
    }
}
