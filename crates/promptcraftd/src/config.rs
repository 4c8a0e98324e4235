//! Configuration management for promptcraftd.
//!
//! Loads settings from `$PROMPTCRAFTD_CONFIG`, /etc/promptcraft/gateway.toml
//! or /var/lib/promptcraft/gateway.toml, falling back to defaults.

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Environment override for the config path
pub const CONFIG_ENV: &str = "PROMPTCRAFTD_CONFIG";

/// Config file path
pub const CONFIG_PATH: &str = "/etc/promptcraft/gateway.toml";

/// Fallback config file path
pub const DEFAULT_CONFIG_PATH: &str = "/var/lib/promptcraft/gateway.toml";

/// Which upstream request shape to send
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Variant {
    /// Auto-routing model restricted to a provider allow-list
    #[default]
    Auto,
    /// Pinned free-tier model with capped output and fixed temperature
    Pinned,
}

impl Variant {
    pub fn as_str(&self) -> &'static str {
        match self {
            Variant::Auto => "auto",
            Variant::Pinned => "pinned",
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AutoConfig {
    #[serde(default = "default_auto_model")]
    pub model: String,

    /// Provider allow-list, tried in order
    #[serde(default = "default_providers")]
    pub providers: Vec<String>,
}

fn default_auto_model() -> String {
    "openrouter/auto".to_string()
}

fn default_providers() -> Vec<String> {
    vec![
        "HuggingFace".to_string(),
        "Together".to_string(),
        "DeepInfra".to_string(),
    ]
}

impl Default for AutoConfig {
    fn default() -> Self {
        Self {
            model: default_auto_model(),
            providers: default_providers(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PinnedConfig {
    #[serde(default = "default_pinned_model")]
    pub model: String,

    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f32,
}

fn default_pinned_model() -> String {
    "meta-llama/llama-3.2-3b-instruct:free".to_string()
}

fn default_max_tokens() -> u32 {
    1000
}

fn default_temperature() -> f32 {
    0.7
}

impl Default for PinnedConfig {
    fn default() -> Self {
        Self {
            model: default_pinned_model(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
pub struct GatewayConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: String,

    #[serde(default = "default_upstream_url")]
    pub upstream_url: String,

    #[serde(default)]
    pub variant: Variant,

    /// Sent as HTTP-Referer
    #[serde(default = "default_referer")]
    pub referer: String,

    /// Sent as X-Title
    #[serde(default = "default_title")]
    pub title: String,

    /// Server-held credential; overrides the caller's key when set
    #[serde(default)]
    pub api_key: Option<String>,

    #[serde(default)]
    pub auto: AutoConfig,

    #[serde(default)]
    pub pinned: PinnedConfig,
}

fn default_bind_addr() -> String {
    "127.0.0.1:3001".to_string()
}

fn default_upstream_url() -> String {
    "https://openrouter.ai/api/v1/chat/completions".to_string()
}

fn default_referer() -> String {
    "http://localhost:5173".to_string()
}

fn default_title() -> String {
    "PromptCraft Trainer".to_string()
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            upstream_url: default_upstream_url(),
            variant: Variant::default(),
            referer: default_referer(),
            title: default_title(),
            api_key: None,
            auto: AutoConfig::default(),
            pinned: PinnedConfig::default(),
        }
    }
}

// Keeps the credential out of debug logs
impl std::fmt::Debug for GatewayConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GatewayConfig")
            .field("bind_addr", &self.bind_addr)
            .field("upstream_url", &self.upstream_url)
            .field("variant", &self.variant)
            .field("referer", &self.referer)
            .field("title", &self.title)
            .field("api_key", &self.api_key.as_ref().map(|_| "<set>"))
            .field("auto", &self.auto)
            .field("pinned", &self.pinned)
            .finish()
    }
}

impl GatewayConfig {
    /// Load from the first config file found, or defaults.
    pub fn load() -> Self {
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Ok(path) = std::env::var(CONFIG_ENV) {
            candidates.push(PathBuf::from(path));
        }
        candidates.push(PathBuf::from(CONFIG_PATH));
        candidates.push(PathBuf::from(DEFAULT_CONFIG_PATH));

        for path in candidates.iter().filter(|p| p.exists()) {
            match Self::load_from_path(path) {
                Ok(config) => {
                    info!("Loaded config from {}", path.display());
                    return config;
                }
                Err(e) => warn!("Ignoring {}: {:#}", path.display(), e),
            }
        }

        info!("No config file found, using defaults");
        Self::default()
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        let mut config: GatewayConfig = toml::from_str(content).context("Invalid gateway config")?;
        if config.api_key.as_deref().map(str::trim) == Some("") {
            config.api_key = None;
        }
        Ok(config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_defaults() {
        let config = GatewayConfig::default();
        assert_eq!(config.bind_addr, "127.0.0.1:3001");
        assert_eq!(config.variant, Variant::Auto);
        assert_eq!(config.auto.model, "openrouter/auto");
        assert_eq!(config.auto.providers.len(), 3);
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let config = GatewayConfig::from_toml(
            r#"
            variant = "pinned"

            [pinned]
            max_tokens = 256
            "#,
        )
        .unwrap();

        assert_eq!(config.variant, Variant::Pinned);
        assert_eq!(config.pinned.max_tokens, 256);
        assert_eq!(config.pinned.model, "meta-llama/llama-3.2-3b-instruct:free");
        assert_eq!(config.upstream_url, "https://openrouter.ai/api/v1/chat/completions");
    }

    #[test]
    fn test_blank_api_key_is_unset() {
        let config = GatewayConfig::from_toml("api_key = \"  \"").unwrap();
        assert!(config.api_key.is_none());
    }

    #[test]
    fn test_load_from_path() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("gateway.toml");
        fs::write(&path, "bind_addr = \"0.0.0.0:8080\"\napi_key = \"sk-or-server\"\n").unwrap();

        let config = GatewayConfig::load_from_path(&path).unwrap();
        assert_eq!(config.bind_addr, "0.0.0.0:8080");
        assert_eq!(config.api_key.as_deref(), Some("sk-or-server"));
        assert!(!format!("{:?}", config).contains("sk-or-server"));
    }

    #[test]
    fn test_invalid_file_is_error() {
        assert!(GatewayConfig::from_toml("variant = \"turbo\"").is_err());
    }
}
