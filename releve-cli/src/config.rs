use anyhow::{Context, Result};
use releve_ingest::ParserConfig;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::state::releve_home;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub parser: ParserConfig,
}

pub fn config_path() -> Result<PathBuf> {
    Ok(releve_home()?.join("config.toml"))
}

/// Defaults when there is no config file (or no HOME to look in).
pub fn load_config() -> Result<Config> {
    match config_path() {
        Ok(p) => load_config_from(&p),
        Err(_) => Ok(Config::default()),
    }
}

pub fn load_config_from(p: &Path) -> Result<Config> {
    if !p.exists() {
        return Ok(Config::default());
    }
    let s = fs::read_to_string(p).with_context(|| format!("read {}", p.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", p.display()))
}
