//! `pumpkin.toml` configuration.
//!
//! Resolution order: an explicit path, then `<project>/pumpkin.toml`, then
//! `<config_dir>/pumpkin/config.toml`, then built-in defaults. The first file
//! found wins; files are not merged.

use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{PumpkinError, Result};
use crate::graph::Backend;
use crate::ic::CachePolicy;

pub const PROJECT_CONFIG_FILE: &str = "pumpkin.toml";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PumpkinConfig {
    #[serde(default)]
    pub graph: GraphConfig,
    #[serde(default)]
    pub cache: CacheConfig,
    #[serde(default)]
    pub search: SearchConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphConfig {
    #[serde(default = "default_root")]
    pub root: String,
    #[serde(default)]
    pub backend: Backend,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            root: default_root(),
            backend: Backend::default(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CacheKind {
    #[default]
    Unbounded,
    Lru,
    Disabled,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default)]
    pub policy: CacheKind,
    #[serde(default = "default_cache_capacity")]
    pub capacity: usize,
    #[serde(default)]
    pub precompute_micas: bool,
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            policy: CacheKind::default(),
            capacity: default_cache_capacity(),
            precompute_micas: false,
        }
    }
}

impl CacheConfig {
    /// The runtime policy. An LRU bound of zero disables caching.
    #[must_use]
    pub fn policy(&self) -> CachePolicy {
        match self.policy {
            CacheKind::Unbounded => CachePolicy::Unbounded,
            CacheKind::Lru => {
                NonZeroUsize::new(self.capacity).map_or(CachePolicy::Disabled, CachePolicy::Lru)
            }
            CacheKind::Disabled => CachePolicy::Disabled,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchConfig {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default = "default_rank_method")]
    pub rank_method: String,
    #[serde(default = "default_negative_weight")]
    pub negative_weight: f64,
    #[serde(default)]
    pub limit: Option<usize>,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            method: default_method(),
            rank_method: default_rank_method(),
            negative_weight: default_negative_weight(),
            limit: None,
        }
    }
}

fn default_root() -> String {
    "HP:0000118".to_string()
}

const fn default_cache_capacity() -> usize {
    100_000
}

fn default_method() -> String {
    "phenodigm".to_string()
}

fn default_rank_method() -> String {
    "avg".to_string()
}

const fn default_negative_weight() -> f64 {
    0.1
}

/// Parse one config file.
///
/// # Errors
///
/// Returns [`PumpkinError::Io`] when the file cannot be read and
/// [`PumpkinError::Config`] when it is not valid TOML for this schema.
pub fn load_config_file(path: &Path) -> Result<PumpkinConfig> {
    let content = std::fs::read_to_string(path).map_err(|source| PumpkinError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    toml::from_str::<PumpkinConfig>(&content).map_err(|err| PumpkinError::Config {
        path: path.to_path_buf(),
        message: err.message().to_string(),
    })
}

/// `<project_root>/pumpkin.toml`, if present.
///
/// # Errors
///
/// See [`load_config_file`].
pub fn load_project_config(project_root: &Path) -> Result<Option<PumpkinConfig>> {
    let path = project_root.join(PROJECT_CONFIG_FILE);
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

/// `<config_dir>/pumpkin/config.toml`, if present.
///
/// # Errors
///
/// See [`load_config_file`].
pub fn load_user_config() -> Result<Option<PumpkinConfig>> {
    let Some(path) = user_config_path() else {
        return Ok(None);
    };
    if !path.exists() {
        return Ok(None);
    }
    load_config_file(&path).map(Some)
}

#[must_use]
pub fn user_config_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join("pumpkin").join("config.toml"))
}

/// Resolve the effective configuration.
///
/// # Errors
///
/// See [`load_config_file`]. An explicit path that does not exist is an
/// error; missing project and user files are not.
pub fn resolve_config(project_root: &Path, explicit: Option<&Path>) -> Result<PumpkinConfig> {
    if let Some(path) = explicit {
        return load_config_file(path);
    }
    if let Some(config) = load_project_config(project_root)? {
        return Ok(config);
    }
    Ok(load_user_config()?.unwrap_or_default())
}
