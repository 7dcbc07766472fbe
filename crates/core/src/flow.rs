//! Editor actions built on root discovery and `bxc`
//!
//! Every action is one call to [`run_flow`]. Actions that need the user to
//! pick from a list stop at [`Outcome::Select`]; the caller shows the menu and
//! feeds the answer back through [`PendingSelection::resolve`].

use crate::bxc::{self, BxcTool};
use crate::command::{CommandExecutor, CommandSpec};
use crate::context::EditingContext;
use crate::error::{Error, Result};
use crate::extract;
use crate::root::{ProjectRoot, RootLocator};
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

pub const NOT_IN_ROOT: &str = "You are not in a bitrix web root!";
pub const NOT_ON_INCLUDE_CALL: &str = "Cursor is not on an IncludeComponent call.";
pub const CANNOT_NAVIGATE: &str = "It's not IncludeComponent call. Can't figure out where to go.";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    /// Turn `ns:name` under the cursor into an include call, or pick a component
    ExpandComponent,
    /// Pick a template of the component included on the cursor line
    SelectTemplate,
    /// Open `template.php` of the template included on the cursor line
    OpenTemplate,
}

/// Collaborators a flow runs against
pub struct FlowEnv<'a> {
    pub locator: &'a dyn RootLocator,
    pub executor: &'a dyn CommandExecutor,
    pub tool: BxcTool,
}

impl<'a> FlowEnv<'a> {
    pub fn new(
        locator: &'a dyn RootLocator,
        executor: &'a dyn CommandExecutor,
        tool: BxcTool,
    ) -> Self {
        Self {
            locator,
            executor,
            tool,
        }
    }

    /// Run a `bxc` command in the project root and return its stdout
    fn run_tool(&self, root: &ProjectRoot, spec: CommandSpec) -> Result<String> {
        let spec = spec.with_working_dir(root.path());
        let result = self.executor.execute(&spec)?;
        result.into_output(&spec.display())
    }

    fn list(&self, root: &ProjectRoot, spec: CommandSpec) -> Result<Vec<String>> {
        let output = self.run_tool(root, spec)?;
        Ok(bxc::split_list(&output))
    }
}

/// What the editor should do next
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum Outcome {
    Replace {
        start: usize,
        end: usize,
        text: String,
    },
    Insert {
        at: usize,
        text: String,
    },
    Open {
        path: PathBuf,
    },
    Select(PendingSelection),
    Status {
        message: String,
    },
    Nothing,
}

impl Outcome {
    pub fn status(message: impl Into<String>) -> Self {
        Outcome::Status {
            message: message.into(),
        }
    }

    fn insert(at: usize, text: String) -> Self {
        if text.is_empty() {
            Outcome::Nothing
        } else {
            Outcome::Insert { at, text }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Purpose {
    Component,
    TemplateName,
    TemplateDir,
}

/// A menu waiting for the user's choice
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PendingSelection {
    pub items: Vec<String>,
    #[serde(skip)]
    purpose: Purpose,
    #[serde(skip)]
    root: ProjectRoot,
    #[serde(skip)]
    insert_at: usize,
}

impl PendingSelection {
    /// Finish the flow with the chosen index, or `None` when the menu was cancelled
    pub fn resolve(self, choice: Option<usize>, env: &FlowEnv<'_>) -> Outcome {
        let Some(item) = choice.and_then(|index| self.items.get(index)) else {
            debug!("Selection cancelled or out of range: {:?}", choice);
            return Outcome::Nothing;
        };
        debug!("Selected {:?} for {:?}", item, self.purpose);

        let outcome = match self.purpose {
            Purpose::Component => env
                .run_tool(&self.root, env.tool.generate_include(item))
                .map(|code| Outcome::insert(self.insert_at, code)),
            Purpose::TemplateName => Ok(Outcome::insert(
                self.insert_at,
                bxc::strip_template_annotation(item),
            )),
            Purpose::TemplateDir => open_template(Path::new(item)),
        };
        outcome.unwrap_or_else(|e| Outcome::status(e.to_string()))
    }
}

/// Run `flow` for the given editing context
pub fn run_flow(flow: Flow, ctx: &EditingContext, env: &FlowEnv<'_>) -> Outcome {
    let Some(root) = env.locator.locate(ctx.file_path()) else {
        info!("No project root above {}", ctx.file_path().display());
        return Outcome::status(NOT_IN_ROOT);
    };
    debug!("Running {:?} in {}", flow, root);

    let outcome = match flow {
        Flow::ExpandComponent => expand_component(ctx, env, root),
        Flow::SelectTemplate => select_template(ctx, env, root),
        Flow::OpenTemplate => open_component_template(ctx, env, root),
    };
    outcome.unwrap_or_else(|e| Outcome::status(e.to_string()))
}

fn expand_component(ctx: &EditingContext, env: &FlowEnv<'_>, root: ProjectRoot) -> Result<Outcome> {
    let line = ctx.cursor_line();
    let column = ctx.selection.end.saturating_sub(line.offset);

    if let Some(reference) = extract::component_reference(line.text, column) {
        info!("Expanding component {}", reference.name);
        let code = env.run_tool(&root, env.tool.generate_include(&reference.name))?;
        if code.is_empty() {
            return Ok(Outcome::Nothing);
        }
        return Ok(Outcome::Replace {
            start: line.offset + reference.span.start,
            end: line.offset + reference.span.end,
            text: code,
        });
    }

    let components = env.list(&root, env.tool.list_components())?;
    Ok(select(components, Purpose::Component, root, ctx.insertion_point()))
}

fn select_template(ctx: &EditingContext, env: &FlowEnv<'_>, root: ProjectRoot) -> Result<Outcome> {
    let component = extract::include_component_name(ctx.cursor_line().text)
        .ok_or_else(|| Error::NoMatch(NOT_ON_INCLUDE_CALL.to_string()))?;

    let templates = env.list(&root, env.tool.list_templates(&component, false))?;
    Ok(select(templates, Purpose::TemplateName, root, ctx.insertion_point()))
}

fn open_component_template(
    ctx: &EditingContext,
    env: &FlowEnv<'_>,
    root: ProjectRoot,
) -> Result<Outcome> {
    let call = extract::include_component_call(ctx.cursor_line().text)
        .ok_or_else(|| Error::NoMatch(CANNOT_NAVIGATE.to_string()))?;

    let mut candidates = env.list(&root, env.tool.list_templates(&call.component, true))?;
    candidates.retain(|dir| names_template(dir, &call.template));
    debug!("Template directories for {:?}: {:?}", call, candidates);

    match candidates.len() {
        0 => Ok(Outcome::status(format!(
            "Template \"{}\" of {} not found.",
            call.template, call.component
        ))),
        1 => open_template(Path::new(&candidates[0])),
        _ => Ok(select(candidates, Purpose::TemplateDir, root, ctx.insertion_point())),
    }
}

fn select(items: Vec<String>, purpose: Purpose, root: ProjectRoot, insert_at: usize) -> Outcome {
    if items.is_empty() {
        return Outcome::Nothing;
    }
    Outcome::Select(PendingSelection {
        items,
        purpose,
        root,
        insert_at,
    })
}

/// Whether the template directory `dir` belongs to the template named `template`
fn names_template(dir: &str, template: &str) -> bool {
    Path::new(dir)
        .file_name()
        .is_some_and(|name| name == template)
}

fn open_template(template_dir: &Path) -> Result<Outcome> {
    let file = bxc::template_file(template_dir);
    if file.is_file() {
        info!("Opening {}", file.display());
        Ok(Outcome::Open { path: file })
    } else {
        Err(Error::TemplateNotFound(file))
    }
}
