//! courtboard configuration
//!
//! Read from `~/.config/courtboard/config.toml` (or an explicit path). A
//! missing file means defaults; CLI flags override individual fields.
//!
//! ```toml
//! log_level = "info"
//! cache_dir = "/var/cache/courtboard"
//!
//! [source]
//! url = "https://api.example.edu/tennis"
//! timeout_secs = 5
//! ```

use crate::error::CoreError;
use crate::source::{DocumentSource, HttpSource, JsonDirSource};
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

/// Where documents come from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceConfig {
    /// Directory of `<collection>.json` exports
    pub dir: Option<PathBuf>,

    /// HTTP endpoint serving `<url>/<collection>`
    pub url: Option<String>,

    pub timeout_secs: u64,
}

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            dir: None,
            url: None,
            timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CourtboardConfig {
    pub source: SourceConfig,

    /// Logo cache directory (default: `<user cache dir>/courtboard`)
    pub cache_dir: Option<PathBuf>,

    /// `tracing` filter directive used when `RUST_LOG` is unset
    pub log_level: String,
}

impl Default for CourtboardConfig {
    fn default() -> Self {
        Self {
            source: SourceConfig::default(),
            cache_dir: None,
            log_level: "warn".to_string(),
        }
    }
}

impl CourtboardConfig {
    /// `~/.config/courtboard/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("courtboard").join("config.toml"))
    }

    /// Load from `path`; a missing file yields defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = match std::fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "No config file, using defaults");
                return Ok(Self::default());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("Failed to read config: {}", path.display()))
            }
        };

        toml::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))
    }

    pub fn resolve_cache_dir(&self) -> Result<PathBuf, CoreError> {
        self.cache_dir
            .clone()
            .or_else(|| dirs::cache_dir().map(|dir| dir.join("courtboard")))
            .ok_or(CoreError::CacheDirNotFound)
    }

    /// Build the configured document source (defaults to `./data`)
    pub fn build_source(&self) -> Result<Arc<dyn DocumentSource>, CoreError> {
        match (&self.source.dir, &self.source.url) {
            (Some(_), Some(_)) => Err(CoreError::InvalidConfig {
                message: "source.dir and source.url are mutually exclusive".to_string(),
            }),
            (None, Some(url)) => {
                let timeout = Duration::from_secs(self.source.timeout_secs.max(1));
                Ok(Arc::new(HttpSource::new(url.clone(), timeout)?))
            }
            (Some(dir), None) => Ok(Arc::new(JsonDirSource::new(dir.clone()))),
            (None, None) => Ok(Arc::new(JsonDirSource::new("data"))),
        }
    }
}
