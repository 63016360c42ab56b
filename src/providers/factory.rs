use crate::config::{ProviderConfig, StandardizerConfig};
use crate::providers::{
    build_standardize_prompt, AnthropicProvider, LlmProvider, OpenAIProvider, ProviderResult,
};

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
    ) -> ProviderResult<Box<dyn LlmProvider>> {
        Self::create_with_prompt(provider_name, config, build_standardize_prompt(None))
    }

    /// Create a provider instance that sends a custom system prompt
    pub fn create_with_prompt(
        provider_name: &str,
        config: &ProviderConfig,
        system_prompt: String,
    ) -> ProviderResult<Box<dyn LlmProvider>> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )
            .into());
        }

        match provider_name {
            "openai" => Ok(Box::new(
                OpenAIProvider::new(config)?.with_system_prompt(system_prompt),
            )),
            "anthropic" => Ok(Box::new(
                AnthropicProvider::new(config)?.with_system_prompt(system_prompt),
            )),
            _ => Err(format!("Unknown provider: {}", provider_name).into()),
        }
    }

    /// Get the default provider from configuration
    pub fn get_default_provider(
        config: &StandardizerConfig,
    ) -> ProviderResult<Box<dyn LlmProvider>> {
        let provider_name = &config.default_provider;
        let provider_config = config.providers.get(provider_name).ok_or_else(|| {
            format!(
                "Default provider '{}' not found in configuration",
                provider_name
            )
        })?;

        Self::create_with_prompt(
            provider_name,
            provider_config,
            build_standardize_prompt(Some(config.max_categories)),
        )
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["openai", "anthropic"]
    }
}
