// silhouette_cli/src/config.rs
#![forbid(unsafe_code)]

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

/// Optional TOML defaults. Every field a CLI flag can also set; explicit
/// flags win.
#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    pub primary_block: Option<String>,
    pub platform_block: Option<String>,
    pub blocks_x: Option<usize>,
    pub coverage: Option<f64>,
    pub difficulty: Option<String>,
    pub out_dir: Option<PathBuf>,
}

pub fn load(path: &Path) -> Result<FileConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("failed to parse {}", path.display()))?;
    Ok(config)
}
