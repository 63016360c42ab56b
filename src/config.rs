use config::{Config, ConfigError, Environment, File};
use serde::Deserialize;
use std::collections::HashMap;

use crate::model::MAX_CATEGORIES_PER_RECIPE;

/// Main configuration structure
#[derive(Debug, Deserialize, Clone)]
pub struct StandardizerConfig {
    /// Maximum number of categories kept per recipe
    #[serde(default = "default_max_categories")]
    pub max_categories: usize,
    /// Default provider to use when not specified
    #[serde(default = "default_provider")]
    pub default_provider: String,
    /// Map of provider name to provider configuration
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
    /// Fallback configuration for automatic provider switching
    #[serde(default)]
    pub fallback: FallbackConfig,
    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout: u64,
}

impl Default for StandardizerConfig {
    fn default() -> Self {
        Self {
            max_categories: default_max_categories(),
            default_provider: default_provider(),
            providers: HashMap::new(),
            fallback: FallbackConfig::default(),
            timeout: default_timeout(),
        }
    }
}

/// Configuration for a specific AI provider
#[derive(Debug, Deserialize, Clone)]
pub struct ProviderConfig {
    /// Whether this provider is enabled
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    /// Model identifier (e.g., "gpt-4o-mini", "claude-3-5-haiku-latest")
    pub model: String,
    /// Temperature for generation (0.0-1.0)
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    /// Maximum tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// API key for authentication (can also be set via environment variable)
    pub api_key: Option<String>,
    /// Base URL for API endpoint (for custom or proxy endpoints)
    pub base_url: Option<String>,
}

impl ProviderConfig {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            enabled: true,
            model: model.into(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            api_key: None,
            base_url: None,
        }
    }
}

/// Configuration for provider fallback and retry behavior
#[derive(Debug, Deserialize, Clone)]
pub struct FallbackConfig {
    /// Whether fallback is enabled
    #[serde(default)]
    pub enabled: bool,
    /// Order of providers to try (first to last)
    #[serde(default)]
    pub order: Vec<String>,
    /// Number of retry attempts per provider before fallback
    #[serde(default = "default_retry_attempts")]
    pub retry_attempts: u32,
    /// Delay between retries in milliseconds, multiplied by the attempt number
    #[serde(default = "default_retry_delay_ms")]
    pub retry_delay_ms: u64,
}

impl Default for FallbackConfig {
    fn default() -> Self {
        Self {
            enabled: false,
            order: Vec::new(),
            retry_attempts: default_retry_attempts(),
            retry_delay_ms: default_retry_delay_ms(),
        }
    }
}

// Default value functions
fn default_max_categories() -> usize {
    MAX_CATEGORIES_PER_RECIPE
}

fn default_provider() -> String {
    "openai".to_string()
}

fn default_enabled() -> bool {
    true
}

fn default_temperature() -> f32 {
    0.2
}

fn default_max_tokens() -> u32 {
    2000
}

fn default_retry_attempts() -> u32 {
    3
}

fn default_retry_delay_ms() -> u64 {
    1000
}

fn default_timeout() -> u64 {
    30
}

impl StandardizerConfig {
    /// Load configuration from file and environment variables
    ///
    /// Configuration is loaded with the following priority (highest to lowest):
    /// 1. Environment variables with RECIPES__ prefix
    /// 2. recipe-standardizer.toml file in current directory
    /// 3. Default values
    ///
    /// Environment variable format: RECIPES__PROVIDERS__OPENAI__API_KEY
    pub fn load() -> Result<Self, ConfigError> {
        load_config()
    }
}

/// Load configuration from file and environment variables
///
/// See [`StandardizerConfig::load`] for the precedence rules.
pub fn load_config() -> Result<StandardizerConfig, ConfigError> {
    let settings = Config::builder()
        // Optional config file (can be missing)
        .add_source(File::with_name("recipe-standardizer").required(false))
        // Use double underscore for nested: RECIPES__PROVIDERS__OPENAI__API_KEY
        .add_source(
            Environment::with_prefix("RECIPES")
                .prefix_separator("__")
                .separator("__")
                .try_parsing(true),
        )
        .build()?;

    settings.try_deserialize()
}

#[cfg(test)]
mod tests {
    use super::*;
    use config::FileFormat;

    #[test]
    fn test_default_values() {
        assert_eq!(default_max_categories(), 6);
        assert_eq!(default_provider(), "openai");
        assert_eq!(default_temperature(), 0.2);
        assert_eq!(default_max_tokens(), 2000);
        assert_eq!(default_retry_attempts(), 3);
        assert_eq!(default_retry_delay_ms(), 1000);
        assert_eq!(default_timeout(), 30);
    }

    #[test]
    fn test_fallback_config_default() {
        let fallback = FallbackConfig::default();
        assert!(!fallback.enabled);
        assert!(fallback.order.is_empty());
        assert_eq!(fallback.retry_attempts, 3);
        assert_eq!(fallback.retry_delay_ms, 1000);
    }

    #[test]
    fn test_deserialize_from_toml() {
        let toml = r#"
            max_categories = 4
            default_provider = "anthropic"

            [providers.anthropic]
            model = "claude-3-5-haiku-latest"
            api_key = "test-key"

            [providers.openai]
            enabled = false
            model = "gpt-4o-mini"
            temperature = 0.5

            [fallback]
            enabled = true
            order = ["anthropic", "openai"]
        "#;

        let config: StandardizerConfig = Config::builder()
            .add_source(File::from_str(toml, FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.max_categories, 4);
        assert_eq!(config.default_provider, "anthropic");
        assert_eq!(config.providers.len(), 2);

        let anthropic = &config.providers["anthropic"];
        assert!(anthropic.enabled);
        assert_eq!(anthropic.max_tokens, 2000);
        assert_eq!(anthropic.api_key.as_deref(), Some("test-key"));

        let openai = &config.providers["openai"];
        assert!(!openai.enabled);
        assert_eq!(openai.temperature, 0.5);

        assert!(config.fallback.enabled);
        assert_eq!(config.fallback.order, vec!["anthropic", "openai"]);
        assert_eq!(config.fallback.retry_attempts, 3);
        assert_eq!(config.timeout, 30);
    }

    #[test]
    fn test_empty_source_uses_defaults() {
        let config: StandardizerConfig = Config::builder()
            .add_source(File::from_str("", FileFormat::Toml))
            .build()
            .unwrap()
            .try_deserialize()
            .unwrap();

        assert_eq!(config.max_categories, MAX_CATEGORIES_PER_RECIPE);
        assert!(config.providers.is_empty());
        assert!(!config.fallback.enabled);
    }

    #[test]
    fn test_provider_config_new() {
        let config = ProviderConfig::new("gpt-4o-mini");
        assert!(config.enabled);
        assert_eq!(config.model, "gpt-4o-mini");
        assert!(config.api_key.is_none());
        assert!(config.base_url.is_none());
    }
}
