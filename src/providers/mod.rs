mod anthropic;
mod factory;
mod fallback;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use fallback::FallbackProvider;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_standardize_prompt, STANDARDIZE_PROMPT};

use async_trait::async_trait;
use std::error::Error;

pub type ProviderResult<T> = Result<T, Box<dyn Error + Send + Sync>>;

/// Unified trait for all LLM providers
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Rewrite free-form recipe text as the JSON the recipe parser reads
    async fn standardize(&self, text: &str) -> ProviderResult<String>;
}
