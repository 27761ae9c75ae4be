use crate::config::{GradingConfig, CONFIG_FILE_NAME};
use crate::io;
use anyhow::Result;
use std::path::{Path, PathBuf};

pub fn init_config(force: bool) -> Result<()> {
    let config_path = PathBuf::from(CONFIG_FILE_NAME);
    write_default_config(&config_path, force)?;
    println!("Created {CONFIG_FILE_NAME} configuration file");
    Ok(())
}

pub fn write_default_config(config_path: &Path, force: bool) -> Result<()> {
    if config_path.exists() && !force {
        anyhow::bail!("Configuration file already exists. Use --force to overwrite.");
    }

    let body = toml::to_string_pretty(&GradingConfig::with_defaults())?;
    let contents = format!(
        "# Autograde Configuration\n#\n# Impact per outcome is added to the score; negative weights are penalties.\n# The total is clamped to [0, sum of max_score of enabled categories].\n\n{body}"
    );
    io::write_file(config_path, &contents)?;
    Ok(())
}
