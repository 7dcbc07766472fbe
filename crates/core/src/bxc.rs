//! Invocations of the `bxc` console tool and parsing of its output

use crate::command::CommandSpec;
use crate::config::ToolConfig;
use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;

/// File every component template directory contains
pub const TEMPLATE_FILE: &str = "template.php";

static TEMPLATE_ANNOTATION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(.+\)$").expect("valid template annotation regex"));

/// Builder for `bxc` command lines
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BxcTool {
    program: String,
    extra_args: Vec<String>,
}

impl Default for BxcTool {
    fn default() -> Self {
        Self::from_config(&ToolConfig::default())
    }
}

impl BxcTool {
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
            extra_args: Vec::new(),
        }
    }

    pub fn from_config(config: &ToolConfig) -> Self {
        Self {
            program: config.program.clone(),
            extra_args: config.extra_args.clone(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    /// `bxc generate:include --no-ansi --component=<component>`
    pub fn generate_include(&self, component: &str) -> CommandSpec {
        self.command("generate:include", &[], &[format!("--component={component}")])
    }

    /// `bxc component:list --no-ansi`
    pub fn list_components(&self) -> CommandSpec {
        self.command("component:list", &[], &[])
    }

    /// `bxc templates:list -s --no-ansi <component> [--full-path]`
    pub fn list_templates(&self, component: &str, full_path: bool) -> CommandSpec {
        let mut trailing = vec![component.to_string()];
        if full_path {
            trailing.push("--full-path".to_string());
        }
        self.command("templates:list", &["-s"], &trailing)
    }

    fn command(&self, subcommand: &str, flags: &[&str], trailing: &[String]) -> CommandSpec {
        let mut args = vec![self.program.clone(), subcommand.to_string()];
        args.extend(flags.iter().map(|f| f.to_string()));
        args.push("--no-ansi".to_string());
        args.extend(self.extra_args.iter().cloned());
        args.extend(trailing.iter().cloned());
        CommandSpec::new(args)
    }
}

/// Split list output into menu entries, one per non-empty line.
///
/// Trailing whitespace is dropped so entries can be used as paths verbatim.
pub fn split_list(output: &str) -> Vec<String> {
    output
        .lines()
        .map(str::trim_end)
        .filter(|line| !line.is_empty())
        .map(str::to_string)
        .collect()
}

/// Drop a trailing `(…)` note from a template list entry
pub fn strip_template_annotation(label: &str) -> String {
    TEMPLATE_ANNOTATION.replace(label, "").into_owned()
}

/// Path of the `template.php` inside a template directory
pub fn template_file(template_dir: &Path) -> PathBuf {
    template_dir.join(TEMPLATE_FILE)
}
