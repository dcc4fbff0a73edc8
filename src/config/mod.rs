//! Configuration loading.
//!
//! A single optional TOML file under the project root tunes the orchestration
//! limits and the generator endpoint. CLI flags override whatever is loaded.

use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

/// Config file names probed under the project root, in order.
const CONFIG_CANDIDATES: &[&str] = &["repo-edit.toml", ".repo-edit.toml"];

#[derive(Debug, Clone, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// BFS depth used for candidate expansion.
    pub hops: usize,
    /// Result cap passed to the relevance expander.
    pub related_limit: usize,
    /// Hard cap on the candidate set, entry file included.
    pub candidate_cap: usize,
    /// Per-request cap on files the plan may select (hard ceiling 12).
    pub max_plan_files: usize,
    /// Byte cap applied to each candidate's content in the shared context block.
    pub context_file_cap: usize,
    /// Generator model name; `OPENAI_MODEL` takes precedence.
    pub model: Option<String>,
    /// Generator base URL; `OPENAI_BASE_URL` takes precedence.
    pub base_url: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hops: 2,
            related_limit: 20,
            candidate_cap: 30,
            max_plan_files: crate::edit::DEFAULT_PLAN_FILE_LIMIT,
            context_file_cap: 16 * 1024,
            model: None,
            base_url: None,
        }
    }
}

/// Load config for a project root.
///
/// An explicitly provided path must parse; an auto-discovered file that fails
/// to parse logs a warning and falls back to defaults, so a stray config never
/// blocks an edit.
pub fn load_config(root: &Path, config_path: Option<&Path>) -> Result<Config> {
    let provided = config_path.is_some();
    let discovered = match config_path {
        Some(path) => Some(path.to_path_buf()),
        None => discover_config(root),
    };

    let Some(config_file) = discovered else {
        return Ok(Config::default());
    };

    let content = fs::read_to_string(&config_file)
        .with_context(|| format!("Failed reading config file: {}", config_file.display()))?;

    match toml::from_str::<Config>(&content)
        .with_context(|| format!("Invalid TOML config: {}", config_file.display()))
    {
        Ok(config) => Ok(config),
        Err(err) if provided => Err(err),
        Err(err) => {
            tracing::warn!(
                "Failed to parse auto-discovered config {}: {err}",
                config_file.display()
            );
            Ok(Config::default())
        }
    }
}

fn discover_config(root: &Path) -> Option<PathBuf> {
    CONFIG_CANDIDATES
        .iter()
        .map(|name| root.join(name))
        .find(|path| path.is_file())
}
