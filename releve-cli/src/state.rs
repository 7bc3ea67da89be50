use anyhow::{Context, Result};
use std::path::PathBuf;

pub fn releve_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".releve"))
}
