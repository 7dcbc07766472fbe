use anyhow::{Context, Result};
use bitrix_tools_core::config::CONFIG_FILE_NAME;
use bitrix_tools_core::{Config, find_project_root};
use std::{env, path::PathBuf};
use tracing::info;

pub fn init_command(cwd: Option<&str>, force: bool) -> Result<()> {
    let start = if let Some(cwd) = cwd {
        PathBuf::from(cwd)
    } else {
        env::current_dir().context("Failed to get current directory")?
    };

    let start = start
        .canonicalize()
        .with_context(|| format!("Failed to canonicalize {}", start.display()))?;

    // A site root is recognised from any path inside it, the directory itself included
    let root = find_project_root(&start.join(CONFIG_FILE_NAME))
        .map(|root| root.into_path_buf())
        .unwrap_or_else(|| {
            info!("No site root above {}, using it as is", start.display());
            start.clone()
        });

    let config_path = root.join(CONFIG_FILE_NAME);
    if config_path.exists() && !force {
        println!("❌ Config already exists at: {}", config_path.display());
        println!("   Use --force to overwrite");
        return Ok(());
    }

    Config::default()
        .save_to_file(&config_path)
        .with_context(|| format!("Failed to write config to {}", config_path.display()))?;

    println!("✅ Created config: {}", config_path.display());
    Ok(())
}
