use anyhow::Result;
use bitrix_tools_core::EditingContext;
use bitrix_tools_core::completion::iblock_completions;

use crate::cli::OutputFormat;
use crate::utils::{parse_location, read_buffer};

pub fn complete_command(location: &str, stdin: bool, format: OutputFormat) -> Result<()> {
    let (filepath, position) = parse_location(location);
    let (path, text) = read_buffer(&filepath, stdin)?;

    let ctx = EditingContext::new(path, text);
    let ctx = match position {
        Some(position) => ctx.with_position(position),
        None => {
            let end = ctx.text.len();
            ctx.with_cursor(end)
        }
    };

    let completions = iblock_completions(&ctx);
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(&completions)?),
        OutputFormat::Text => {
            for field in completions {
                println!("{field}");
            }
        }
    }
    Ok(())
}
