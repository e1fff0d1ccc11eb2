use crate::config::AppConfig;
use crate::io;
use anyhow::{Context, Result};
use std::path::Path;

const HEADER: &str = "# AI Maturity Index configuration
#
# Every section is optional; missing keys take the values shown here.
# Weights must each lie in [0, 1] and sum to 1.0.

";

/// Write a configuration file holding every default.
pub fn init_config(path: &Path, force: bool) -> Result<()> {
    if path.exists() && !force {
        anyhow::bail!(
            "Configuration file {} already exists. Use --force to overwrite.",
            path.display()
        );
    }

    io::write_file(path, &default_config_toml()?)?;
    println!("Created {} configuration file", path.display());
    Ok(())
}

pub fn default_config_toml() -> Result<String> {
    let body = toml::to_string_pretty(&AppConfig::default())
        .context("Failed to serialize the default configuration")?;
    Ok(format!("{HEADER}{body}"))
}
