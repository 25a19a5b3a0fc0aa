use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use crate::report::Thresholds;

#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct ShopConfig {
    pub database: Option<String>,
    pub large_company_threshold: Option<usize>,
    pub multi_store_threshold: Option<usize>,
}

impl ShopConfig {
    /// Config written by `shopdb init`
    pub fn starter() -> Self {
        let defaults = Thresholds::default();
        Self {
            database: Some(default_database_path().to_string_lossy().into_owned()),
            large_company_threshold: Some(defaults.large_company),
            multi_store_threshold: Some(defaults.multi_store),
        }
    }

    pub fn thresholds(&self) -> Thresholds {
        let defaults = Thresholds::default();
        Thresholds {
            large_company: self.large_company_threshold.unwrap_or(defaults.large_company),
            multi_store: self.multi_store_threshold.unwrap_or(defaults.multi_store),
        }
    }

    /// Database path: explicit override, then config, then the default
    pub fn database_path(&self, cli_override: Option<&Path>) -> PathBuf {
        cli_override
            .map(Path::to_path_buf)
            .or_else(|| self.database.as_ref().map(PathBuf::from))
            .unwrap_or_else(default_database_path)
    }
}

pub fn default_config_path() -> PathBuf {
    PathBuf::from("shopdb.toml")
}

pub fn default_database_path() -> PathBuf {
    PathBuf::from("shopdb.db")
}

pub fn load_config(path: Option<&Path>) -> anyhow::Result<Option<ShopConfig>> {
    let path = path.map(Path::to_path_buf).unwrap_or_else(default_config_path);
    if !path.exists() {
        return Ok(None);
    }

    let contents = std::fs::read_to_string(&path)?;
    let config: ShopConfig = toml::from_str(&contents)?;
    Ok(Some(config))
}

pub fn write_config(path: &Path, config: &ShopConfig, force: bool) -> anyhow::Result<()> {
    if path.exists() && !force {
        anyhow::bail!("config already exists at {} (use --force to overwrite)", path.display());
    }

    let contents = toml::to_string_pretty(config)?;
    std::fs::write(path, contents)?;
    Ok(())
}

pub fn ensure_db_dir(db_path: &Path) -> anyhow::Result<()> {
    if let Some(parent) = db_path.parent() {
        if !parent.as_os_str().is_empty() && !parent.exists() {
            std::fs::create_dir_all(parent)?;
        }
    }
    Ok(())
}
