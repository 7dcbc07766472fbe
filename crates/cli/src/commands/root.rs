use anyhow::{Context, Result};
use bitrix_tools_core::root::require_project_root;
use tracing::debug;

pub fn root_command(filepath: &str) -> Result<()> {
    let path = std::path::absolute(filepath)
        .with_context(|| format!("Failed to resolve path {filepath}"))?;
    debug!("Locating site root for {}", path.display());

    let root = require_project_root(&path)?;
    println!("{root}");
    Ok(())
}
