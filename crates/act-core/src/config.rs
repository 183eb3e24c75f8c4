//! Configuration models.
//!
//! `AppConfig` maps to `config.toml`, `SecretConfig` to `secret.json`. Loading
//! lives in `act-infrastructure`.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_HISTORY_LIMIT: usize = 50;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub generation: GenerationConfig,
    #[serde(default)]
    pub catalog: CatalogConfig,
    #[serde(default)]
    pub store: StoreConfig,
}

/// Settings for calls to the generative service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationConfig {
    #[serde(default = "default_model")]
    pub model: String,
    /// Overrides the per-path reply limit when set.
    #[serde(default)]
    pub max_tokens: Option<u32>,
    /// Overrides the per-path temperature when set.
    #[serde(default)]
    pub temperature: Option<f32>,
    /// Transport timeout for one call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            model: default_model(),
            max_tokens: None,
            temperature: None,
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

fn default_model() -> String {
    DEFAULT_OPENAI_MODEL.to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CatalogConfig {
    /// TOML file replacing the seeded catalog.
    #[serde(default)]
    pub path: Option<PathBuf>,
}

/// What the store does with a response whose request has been superseded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StalePolicy {
    /// Apply every response as it resolves, in resolution order.
    #[default]
    LastResponseWins,
    /// Drop responses from requests that are no longer the newest.
    DiscardStale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoreConfig {
    #[serde(default)]
    pub stale_policy: StalePolicy,
    #[serde(default = "default_history_limit")]
    pub history_limit: usize,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            stale_policy: StalePolicy::default(),
            history_limit: DEFAULT_HISTORY_LIMIT,
        }
    }
}

fn default_history_limit() -> usize {
    DEFAULT_HISTORY_LIMIT
}

impl StoreConfig {
    /// `history_limit` clamped to `1..=DEFAULT_HISTORY_LIMIT`.
    pub fn effective_history_limit(&self) -> usize {
        self.history_limit.clamp(1, DEFAULT_HISTORY_LIMIT)
    }
}

/// Contents of `secret.json`.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SecretConfig {
    #[serde(default)]
    pub openai: Option<OpenAIConfig>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OpenAIConfig {
    pub api_key: String,
    #[serde(default)]
    pub model_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_toml_yields_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.generation.model, "gpt-4o");
        assert_eq!(config.store.history_limit, 50);
        assert_eq!(config.store.stale_policy, StalePolicy::LastResponseWins);
    }

    #[test]
    fn test_partial_toml_overrides() {
        let config: AppConfig = toml::from_str(
            r#"
            [generation]
            model = "gpt-4o-mini"
            temperature = 0.5

            [store]
            stale_policy = "discard_stale"
            "#,
        )
        .unwrap();
        assert_eq!(config.generation.model, "gpt-4o-mini");
        assert_eq!(config.generation.temperature, Some(0.5));
        assert_eq!(config.generation.timeout_secs, 30);
        assert_eq!(config.store.stale_policy, StalePolicy::DiscardStale);
        assert_eq!(config.store.history_limit, 50);
    }

    #[test]
    fn test_history_limit_is_clamped() {
        let config: StoreConfig = toml::from_str("history_limit = 200").unwrap();
        assert_eq!(config.history_limit, 200);
        assert_eq!(config.effective_history_limit(), 50);

        let config: StoreConfig = toml::from_str("history_limit = 0").unwrap();
        assert_eq!(config.effective_history_limit(), 1);

        let config: StoreConfig = toml::from_str("history_limit = 20").unwrap();
        assert_eq!(config.effective_history_limit(), 20);
    }
}
