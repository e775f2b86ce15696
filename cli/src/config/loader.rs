//! Simple CLI configuration loader for diarisk
//!
//! Implements single-source priority loading with flag overrides:
//! 1. --config file/dir (highest priority)
//! 2. Current working directory: ./diarisk.json or ./.diarisk/config.json
//! 3. Git repository root: <repo_root>/.diarisk/config.json
//! 4. User config dir: <config_dir>/diarisk/config.json
//! 5. Built-in defaults (local service on 127.0.0.1:8000)
//!
//! `--base-url` and `--timeout-secs` (or their environment variables) are
//! applied on top of whichever source was found.

use anyhow::{anyhow, Context, Result};
use diarisk_core::config::DEFAULT_BASE_URL;
use diarisk_core::ServiceConfig;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// Raw configuration file format (simple single-file schema)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RawConfig {
    /// Base URL of the prediction service
    pub base_url: Option<String>,
    /// Request timeout in seconds (optional, no timeout when absent)
    pub timeout_secs: Option<u64>,
    /// Additional headers (optional)
    #[serde(default)]
    pub headers: HashMap<String, String>,
}

/// CLI configuration loader
#[derive(Debug, Clone, Default)]
pub struct CliConfigLoader {
    /// Override config file/directory path
    config_override: Option<PathBuf>,
    /// Flag overrides
    base_url_override: Option<String>,
    timeout_override: Option<u64>,
    /// Directory searched first; the process working directory when unset
    search_root: Option<PathBuf>,
}

impl CliConfigLoader {
    /// Create a new loader
    pub fn new() -> Self {
        Self::default()
    }

    /// Set config file/directory override
    pub fn with_config_override(mut self, path: PathBuf) -> Self {
        self.config_override = Some(path);
        self
    }

    /// Set base URL override
    pub fn with_base_url_override(mut self, base_url: String) -> Self {
        self.base_url_override = Some(base_url);
        self
    }

    /// Set timeout override
    pub fn with_timeout_override(mut self, timeout_secs: u64) -> Self {
        self.timeout_override = Some(timeout_secs);
        self
    }

    /// Search for config files starting from `root` instead of the working directory
    pub fn with_search_root(mut self, root: PathBuf) -> Self {
        self.search_root = Some(root);
        self
    }

    /// Load and resolve configuration
    pub async fn load(&self) -> Result<ServiceConfig> {
        // Step 1: Find and load base configuration
        let mut config = if let Some(override_path) = &self.config_override {
            let expanded = expand_path(override_path);
            self.load_from_path(&expanded).await.with_context(|| {
                format!(
                    "Failed to load config from override path: {}",
                    expanded.display()
                )
            })?
        } else {
            self.search_and_load().await?
        };

        // Step 2: Apply flag overrides
        if let Some(base_url) = &self.base_url_override {
            config.base_url = Some(base_url.clone());
        }
        if let Some(timeout) = self.timeout_override {
            config.timeout_secs = Some(timeout);
        }

        // Step 3: Resolve to final service config
        resolve_config(config)
    }

    /// Search for config in priority order
    async fn search_and_load(&self) -> Result<RawConfig> {
        let root = match &self.search_root {
            Some(root) => root.clone(),
            None => std::env::current_dir()?,
        };

        if let Some(config) = self.try_load_dir(&root).await? {
            return Ok(config);
        }

        if let Some(git_root) = find_git_root(&root) {
            let config_path = git_root.join(".diarisk").join("config.json");
            if config_path.exists() {
                return Ok(self.load_file(&config_path).await?);
            }
        }

        if let Some(config_dir) = dirs::config_dir() {
            let config_path = config_dir.join("diarisk").join("config.json");
            if config_path.exists() {
                return Ok(self.load_file(&config_path).await?);
            }
        }

        debug!("No config file found, using built-in defaults");
        Ok(RawConfig::default())
    }

    /// Try ./diarisk.json then ./.diarisk/config.json under `dir`
    async fn try_load_dir(&self, dir: &Path) -> Result<Option<RawConfig>> {
        let direct = dir.join("diarisk.json");
        if direct.exists() {
            return Ok(Some(self.load_file(&direct).await?));
        }

        let nested = dir.join(".diarisk").join("config.json");
        if nested.exists() {
            return Ok(Some(self.load_file(&nested).await?));
        }

        Ok(None)
    }

    /// Load configuration from a specific path (file or directory)
    async fn load_from_path(&self, path: &Path) -> Result<RawConfig> {
        if path.is_file() {
            self.load_file(path).await
        } else if path.is_dir() {
            let config_file = path.join("config.json");
            if config_file.exists() {
                self.load_file(&config_file).await
            } else {
                Err(anyhow!(
                    "No config.json found in directory: {}",
                    path.display()
                ))
            }
        } else {
            Err(anyhow!("Config path does not exist: {}", path.display()))
        }
    }

    /// Load a single config file
    async fn load_file(&self, path: &Path) -> Result<RawConfig> {
        debug!("Loading config from {}", path.display());
        let content = tokio::fs::read_to_string(path)
            .await
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse config file: {}", path.display()))
    }
}

/// Expand `~` and environment variables in a user-supplied path
fn expand_path(path: &Path) -> PathBuf {
    let raw = path.to_string_lossy();
    match shellexpand::full(&raw) {
        Ok(expanded) => PathBuf::from(expanded.as_ref()),
        Err(_) => path.to_path_buf(),
    }
}

/// Walk up from `start` looking for a `.git` directory
fn find_git_root(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();
    loop {
        if current.join(".git").exists() {
            return Some(current);
        }
        if !current.pop() {
            return None;
        }
    }
}

/// Resolve raw config to ServiceConfig
fn resolve_config(config: RawConfig) -> Result<ServiceConfig> {
    let base_url = config
        .base_url
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    let mut resolved = ServiceConfig::new(base_url).with_headers(config.headers);
    if let Some(secs) = config.timeout_secs {
        resolved = resolved.with_timeout(Duration::from_secs(secs));
    }

    resolved
        .validate()
        .map_err(|e| anyhow!("Configuration validation failed: {}", e))?;

    Ok(resolved)
}
