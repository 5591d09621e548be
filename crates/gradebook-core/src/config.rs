//! Gradebook configuration.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level gradebook configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GradebookConfig {
    /// Gradebook file used when `--file` is not given.
    #[serde(default = "default_gradebook_path")]
    pub gradebook_path: PathBuf,
    /// Default `tracing` filter directive; `RUST_LOG` takes precedence.
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
    /// Write the gradebook back after commands that change it.
    #[serde(default = "default_true")]
    pub autosave: bool,
}

fn default_gradebook_path() -> PathBuf {
    PathBuf::from("gradebook.txt")
}
fn default_log_filter() -> String {
    "gradebook=warn".to_string()
}
fn default_true() -> bool {
    true
}

impl Default for GradebookConfig {
    fn default() -> Self {
        Self {
            gradebook_path: default_gradebook_path(),
            log_filter: default_log_filter(),
            autosave: true,
        }
    }
}

/// Load config from an explicit path, or search the default locations.
///
/// Search order without an explicit path:
/// 1. `gradebook.toml` in the current directory
/// 2. `~/.config/gradebook/config.toml`
///
/// `GRADEBOOK_FILE` overrides `gradebook_path`.
pub fn load_config_from(path: Option<&Path>) -> Result<GradebookConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("gradebook.toml");
        if local.exists() {
            Some(local)
        } else {
            dirs_path()
                .map(|home| home.join("config.toml"))
                .filter(|global| global.exists())
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            parse_config(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GradebookConfig::default(),
    };

    if let Ok(file) = std::env::var("GRADEBOOK_FILE") {
        if !file.is_empty() {
            config.gradebook_path = PathBuf::from(file);
        }
    }

    Ok(config)
}

/// Parse a TOML config document.
pub fn parse_config(content: &str) -> Result<GradebookConfig> {
    Ok(toml::from_str(content)?)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("gradebook"))
}
