use anyhow::Result;
use bitrix_tools_core::{
    BxcTool, Config, EditingContext, Flow, FlowEnv, Outcome, ProcessExecutor, RootLocator,
    SentinelRootLocator, run_flow,
};
use tracing::{debug, info};

use crate::cli::OutputFormat;
use crate::display::print_outcome;
use crate::utils::{parse_location, read_buffer};

#[derive(Debug, Clone)]
pub struct FlowOptions {
    pub location: String,
    pub stdin: bool,
    pub choose: Option<i64>,
    pub format: OutputFormat,
}

pub fn flow_command(flow: Flow, options: FlowOptions) -> Result<()> {
    let (filepath, position) = parse_location(&options.location);
    let (path, text) = read_buffer(&filepath, options.stdin)?;
    debug!("Running {:?} on {} at {:?}", flow, path.display(), position);

    let mut ctx = EditingContext::new(path, text);
    if let Some(position) = position {
        ctx = ctx.with_position(position);
    }

    let locator = SentinelRootLocator::new();
    let config = match locator.locate(ctx.file_path()) {
        Some(root) => Config::discover(root.path())?,
        None => Config::default(),
    };
    let executor = ProcessExecutor::new();
    let env = FlowEnv::new(&locator, &executor, BxcTool::from_config(&config.tool));

    let outcome = match (run_flow(flow, &ctx, &env), options.choose) {
        (Outcome::Select(pending), Some(index)) => {
            // The menu convention reports cancellation as a negative index
            let choice = usize::try_from(index).ok();
            info!("Resolving selection with {:?}", choice);
            pending.resolve(choice, &env)
        }
        (outcome, _) => outcome,
    };

    print_outcome(&outcome, options.format)
}
