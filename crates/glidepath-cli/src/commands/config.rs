use std::path::Path;

use anyhow::{bail, Result};

use glidepath_core::AppConfig;

pub fn run(config: &AppConfig, config_path: &Path, init: bool) -> Result<()> {
    if init {
        if config_path.exists() {
            bail!("Config file already exists: {}", config_path.display());
        }
        AppConfig::default().save_to(config_path)?;
        println!("Wrote default configuration to {}", config_path.display());
        return Ok(());
    }

    let status = if config_path.exists() { "" } else { " (not found, using defaults)" };
    println!("# {}{}", config_path.display(), status);
    println!("{}", config.to_toml()?);
    Ok(())
}
