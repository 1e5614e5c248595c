use anyhow::{Context, Result};
use serde::Deserialize;
use std::path::{Path, PathBuf};

#[derive(Debug, Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub trash: Option<TrashConfig>,
    #[serde(default)]
    pub removal: RemovalConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct TrashConfig {
    pub dir: PathBuf,
}

#[derive(Debug, Deserialize, Clone, Default)]
pub struct RemovalConfig {
    /// Hard-delete a file when moving it to the trash fails.
    #[serde(default)]
    pub delete_on_fail: bool,
}

pub fn load_config(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    let config: Config = toml::from_str(&content).with_context(|| "Failed to parse config file")?;

    // Validate trash
    if let Some(trash) = &config.trash {
        if !trash.dir.is_absolute() {
            anyhow::bail!(
                "trash.dir must be an absolute path, got '{}'",
                trash.dir.display()
            );
        }
    }

    Ok(config)
}
