//! Client configuration.

use std::path::{Path, PathBuf};
use std::time::Duration;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::http::HttpScoringClient;

/// Where to find the scoring service and how long to wait for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    /// Base URL of the scoring service.
    #[serde(default = "default_server_url")]
    pub server_url: String,
    /// Per-request timeout in seconds.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

fn default_server_url() -> String {
    "http://localhost:8000".to_string()
}
fn default_request_timeout() -> u64 {
    30
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            server_url: default_server_url(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

impl GameConfig {
    /// Build a scoring client from this configuration.
    pub fn client(&self) -> HttpScoringClient {
        HttpScoringClient::with_timeout(
            &self.server_url,
            Duration::from_secs(self.request_timeout_secs),
        )
    }
}

/// Resolve environment variable references like `${VAR_NAME}` in a string.
fn resolve_env_vars(s: &str) -> String {
    let mut result = s.to_string();
    while let Some(start) = result.find("${") {
        if let Some(end) = result[start..].find('}') {
            let var_name = &result[start + 2..start + end];
            let value = std::env::var(var_name).unwrap_or_default();
            result = format!(
                "{}{}{}",
                &result[..start],
                value,
                &result[start + end + 1..]
            );
        } else {
            break;
        }
    }
    result
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `kmapgame.toml` in the current directory
/// 2. `~/.config/kmapgame/config.toml`
///
/// `KMAPGAME_SERVER_URL` overrides the server URL from either source.
pub fn load_config() -> Result<GameConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<GameConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("kmapgame.toml");
        if local.exists() {
            Some(local)
        } else if let Some(home) = dirs_path() {
            let global = home.join("config.toml");
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<GameConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => GameConfig::default(),
    };

    if let Ok(url) = std::env::var("KMAPGAME_SERVER_URL") {
        config.server_url = url;
    }
    config.server_url = resolve_env_vars(&config.server_url);

    Ok(config)
}

fn dirs_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("kmapgame"))
}
