use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone)]
pub struct Config {
    pub db: DbConfig,
    #[serde(default)]
    pub materialize: MaterializeConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct DbConfig {
    pub path: PathBuf,
}

#[derive(Debug, Deserialize, Clone)]
pub struct MaterializeConfig {
    /// Exit with an error when any schedule record fails validation, after
    /// all valid rows have been written.
    #[serde(default)]
    pub fail_on_violations: bool,
    /// Progress line every N emitted rows during the write. 0 disables.
    #[serde(default = "default_progress_every")]
    pub progress_every: usize,
}

impl Default for MaterializeConfig {
    fn default() -> Self {
        Self {
            fail_on_violations: false,
            progress_every: default_progress_every(),
        }
    }
}

fn default_progress_every() -> usize {
    500
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    if config.db.path.as_os_str().is_empty() {
        anyhow::bail!("db.path must not be empty");
    }

    Ok(config)
}
