//! Show or initialize the configuration.

use std::path::PathBuf;

use anyhow::Context;
use chacha_common::config::AppConfig;

pub fn run(config: &AppConfig, path: Option<PathBuf>, init: bool) -> anyhow::Result<()> {
    if init {
        let written = match path {
            Some(path) => {
                config
                    .save_to(&path)
                    .with_context(|| format!("Failed to write {}", path.display()))?;
                path
            }
            None => config.save().context("Failed to write config")?,
        };
        println!("Config written: {}", written.display());
        return Ok(());
    }

    println!("{}", serde_json::to_string_pretty(config)?);
    Ok(())
}
