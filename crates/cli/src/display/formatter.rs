use anyhow::Result;
use bitrix_tools_core::Outcome;

use crate::cli::OutputFormat;

/// Render an outcome for people reading a terminal
pub fn format_outcome(outcome: &Outcome) -> String {
    match outcome {
        Outcome::Replace { start, end, text } => {
            format!("✏️  Replace bytes {start}..{end} with:\n{text}")
        }
        Outcome::Insert { at, text } => format!("➕ Insert at byte {at}:\n{text}"),
        Outcome::Open { path } => format!("📂 Open {}", path.display()),
        Outcome::Select(pending) => {
            let mut out = String::from("📋 Choose one (rerun with --choose <index>):");
            for (index, item) in pending.items.iter().enumerate() {
                out.push_str(&format!("\n  {index:>3}  {item}"));
            }
            out
        }
        Outcome::Status { message } => format!("ℹ️  {message}"),
        Outcome::Nothing => "Nothing to do".to_string(),
    }
}

pub fn print_outcome(outcome: &Outcome, format: OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => println!("{}", serde_json::to_string(outcome)?),
        OutputFormat::Text => println!("{}", format_outcome(outcome)),
    }
    Ok(())
}
