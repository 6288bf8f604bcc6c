use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;

use crate::config::AppConfig;

const CONFIG_DIR: &str = "listing-form";
const CONFIG_FILE: &str = "config.toml";

pub fn config_dir() -> Option<PathBuf> {
    dirs::config_dir().map(|p| p.join(CONFIG_DIR))
}

pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|p| p.join(CONFIG_FILE))
}

/// Load the config from `path`, or from the default location when `None`.
///
/// A missing default config yields the defaults; a missing explicit path is
/// an error.
pub fn load(path: Option<&Path>) -> color_eyre::Result<AppConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match config_path() {
            Some(p) if p.exists() => p,
            Some(p) => {
                tracing::debug!("Config file not found at {:?}, using defaults", p);
                return Ok(AppConfig::default());
            }
            None => {
                tracing::debug!("No config directory found, using defaults");
                return Ok(AppConfig::default());
            }
        },
    };

    let content = fs::read_to_string(&path)
        .wrap_err_with(|| format!("failed to read config {}", path.display()))?;
    let config = parse(&content).wrap_err_with(|| format!("invalid config {}", path.display()))?;
    tracing::debug!("Loaded config from {:?}", path);
    Ok(config)
}

pub fn parse(content: &str) -> color_eyre::Result<AppConfig> {
    let config: AppConfig = toml::from_str(content)?;
    config.timing.validate()?;
    Ok(config)
}
