use std::time::Duration;

use log::{debug, info};

use crate::config::{ProviderConfig, StandardizerConfig};
use crate::parser::RecipeParser;
use crate::providers::{build_standardize_prompt, FallbackProvider, LlmProvider, ProviderFactory};
use crate::{ParsedRecipe, StandardizeError};

/// Which LLM service standardizes the text before parsing
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Provider {
    OpenAI,
    Anthropic,
}

impl Provider {
    /// Convert to provider name string used by the factory
    fn as_str(&self) -> &str {
        match self {
            Provider::OpenAI => "openai",
            Provider::Anthropic => "anthropic",
        }
    }

    fn default_model(&self) -> &str {
        match self {
            Provider::OpenAI => "gpt-4o-mini",
            Provider::Anthropic => "claude-3-5-haiku-latest",
        }
    }
}

/// Whether to run the AI step before parsing
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Mode {
    /// Ask an LLM to standardize the text, then parse its answer (default)
    #[default]
    Standardize,
    /// Parse the text as-is without any network call
    ParseOnly,
}

/// Builder for configuring and executing recipe standardization
#[derive(Debug, Default)]
pub struct RecipeStandardizerBuilder {
    text: Option<String>,
    mode: Mode,
    provider: Option<Provider>,
    api_key: Option<String>,
    model: Option<String>,
    base_url: Option<String>,
    max_categories: Option<usize>,
    timeout: Option<Duration>,
    config: Option<StandardizerConfig>,
}

impl RecipeStandardizerBuilder {
    /// Set the recipe text to standardize
    ///
    /// # Example
    /// ```
    /// use recipe_standardizer::RecipeStandardizer;
    ///
    /// let builder = RecipeStandardizer::builder()
    ///     .text("Pancakes: mix 2 eggs with a cup of flour and fry.");
    /// ```
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Skip the AI step and only run the deterministic parser
    ///
    /// # Example
    /// ```
    /// # use recipe_standardizer::RecipeStandardizer;
    /// # #[tokio::main]
    /// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let recipe = RecipeStandardizer::builder()
    ///     .text("# Toast\n## Ingredients\n- bread")
    ///     .parse_only()
    ///     .build()
    ///     .await?;
    /// assert_eq!(recipe.ingredients, vec!["bread"]);
    /// # Ok(())
    /// # }
    /// ```
    pub fn parse_only(mut self) -> Self {
        self.mode = Mode::ParseOnly;
        self
    }

    /// Set the LLM provider
    pub fn provider(mut self, provider: Provider) -> Self {
        self.provider = Some(provider);
        self
    }

    /// Set the API key for the LLM provider
    ///
    /// This allows passing the API key directly instead of relying on
    /// environment variables or config files.
    pub fn api_key(mut self, key: impl Into<String>) -> Self {
        self.api_key = Some(key.into());
        self
    }

    /// Set the model name for the LLM provider
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Point the provider at a proxy or compatible endpoint
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = Some(url.into());
        self
    }

    /// Override the maximum number of categories kept
    pub fn max_categories(mut self, limit: usize) -> Self {
        self.max_categories = Some(limit);
        self
    }

    /// Set a timeout for the whole AI step
    pub fn timeout(mut self, duration: Duration) -> Self {
        self.timeout = Some(duration);
        self
    }

    /// Use an explicit configuration instead of loading one from disk
    pub fn config(mut self, config: StandardizerConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Build and execute the standardization
    ///
    /// # Errors
    /// Returns `StandardizeError` if:
    /// - No text was specified, or it is blank
    /// - Configuration cannot be loaded or names no usable provider
    /// - The provider request fails or times out
    pub async fn build(self) -> Result<ParsedRecipe, StandardizeError> {
        let text = self.text.as_deref().ok_or_else(|| {
            StandardizeError::BuilderError("No input text specified. Use .text()".to_string())
        })?;
        if text.trim().is_empty() {
            return Err(StandardizeError::InvalidInput(
                "Recipe text cannot be empty".to_string(),
            ));
        }

        if self.mode == Mode::ParseOnly {
            let limit = self
                .max_categories
                .or_else(|| self.config.as_ref().map(|c| c.max_categories))
                .unwrap_or(crate::MAX_CATEGORIES_PER_RECIPE);
            return Ok(RecipeParser::new(limit).parse(text));
        }

        let config = match self.config.clone() {
            Some(config) => config,
            None => StandardizerConfig::load()?,
        };
        let limit = self.max_categories.unwrap_or(config.max_categories);
        let timeout = self
            .timeout
            .unwrap_or_else(|| Duration::from_secs(config.timeout));

        let provider = self.create_provider(&config, limit)?;
        debug!("Standardizing recipe with {}", provider.provider_name());

        let standardized = tokio::time::timeout(timeout, provider.standardize(text))
            .await
            .map_err(|_| {
                StandardizeError::ProviderError(format!(
                    "Provider did not answer within {:?}",
                    timeout
                ))
            })?
            .map_err(provider_error)?;

        let recipe = RecipeParser::new(limit).parse(&standardized);
        info!(
            "Standardized '{}' ({} ingredients, {} categories)",
            recipe.title,
            recipe.ingredients.len(),
            recipe.categories.len()
        );
        Ok(recipe)
    }

    fn create_provider(
        &self,
        config: &StandardizerConfig,
        limit: usize,
    ) -> Result<Box<dyn LlmProvider>, StandardizeError> {
        let explicit = self.api_key.is_some() || self.model.is_some() || self.base_url.is_some();

        let result = match (self.provider, explicit) {
            // Explicit overrides: build a one-off provider config
            (provider, true) => {
                let provider = provider.unwrap_or(Provider::OpenAI);
                let mut provider_config = config
                    .providers
                    .get(provider.as_str())
                    .cloned()
                    .unwrap_or_else(|| ProviderConfig::new(provider.default_model()));
                provider_config.enabled = true;
                if let Some(key) = &self.api_key {
                    provider_config.api_key = Some(key.clone());
                }
                if let Some(model) = &self.model {
                    provider_config.model = model.clone();
                }
                if let Some(url) = &self.base_url {
                    provider_config.base_url = Some(url.clone());
                }
                ProviderFactory::create_with_prompt(
                    provider.as_str(),
                    &provider_config,
                    build_standardize_prompt(Some(limit)),
                )
            }
            (Some(provider), false) => {
                let provider_config = config
                    .providers
                    .get(provider.as_str())
                    .cloned()
                    .unwrap_or_else(|| ProviderConfig::new(provider.default_model()));
                ProviderFactory::create_with_prompt(
                    provider.as_str(),
                    &provider_config,
                    build_standardize_prompt(Some(limit)),
                )
            }
            (None, false) => {
                let mut config = config.clone();
                config.max_categories = limit;
                FallbackProvider::new(&config).map(|p| Box::new(p) as Box<dyn LlmProvider>)
            }
        };

        result.map_err(|e| StandardizeError::BuilderError(e.to_string()))
    }
}

/// Keep HTTP failures as `RequestError`; everything else the provider
/// reports becomes a `ProviderError`.
fn provider_error(err: Box<dyn std::error::Error + Send + Sync>) -> StandardizeError {
    match err.downcast::<reqwest::Error>() {
        Ok(err) => StandardizeError::RequestError(*err),
        Err(err) => StandardizeError::ProviderError(err.to_string()),
    }
}

/// Main entry point for the builder API
pub struct RecipeStandardizer;

impl RecipeStandardizer {
    /// Creates a new builder for standardizing recipes
    ///
    /// # Example
    /// ```
    /// use recipe_standardizer::RecipeStandardizer;
    ///
    /// let builder = RecipeStandardizer::builder();
    /// ```
    pub fn builder() -> RecipeStandardizerBuilder {
        RecipeStandardizerBuilder::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_text() {
        let result = RecipeStandardizer::builder().parse_only().build().await;
        assert!(matches!(result, Err(StandardizeError::BuilderError(_))));
    }

    #[tokio::test]
    async fn test_blank_text() {
        let result = RecipeStandardizer::builder().text("   ").build().await;
        assert!(matches!(result, Err(StandardizeError::InvalidInput(_))));
    }

    #[tokio::test]
    async fn test_parse_only_respects_limit() {
        let recipe = RecipeStandardizer::builder()
            .text(r#"{"title": "T", "tags": ["Course: Main", "Vegan", "Quick"]}"#)
            .parse_only()
            .max_categories(2)
            .build()
            .await
            .unwrap();

        assert_eq!(recipe.title, "T");
        assert_eq!(recipe.categories, vec!["Course: Main", "Quick"]);
    }

    #[tokio::test]
    async fn test_parse_only_uses_config_limit() {
        let config = StandardizerConfig {
            max_categories: 1,
            ..Default::default()
        };
        let recipe = RecipeStandardizer::builder()
            .text(r#"{"tags": ["Vegan", "Course: Main"]}"#)
            .parse_only()
            .config(config)
            .build()
            .await
            .unwrap();

        assert_eq!(recipe.categories, vec!["Course: Main"]);
    }

    #[tokio::test]
    async fn test_unknown_default_provider_is_builder_error() {
        let result = RecipeStandardizer::builder()
            .text("some recipe")
            .config(StandardizerConfig::default())
            .build()
            .await;

        assert!(matches!(result, Err(StandardizeError::BuilderError(_))));
    }

    #[test]
    fn test_provider_error_keeps_message() {
        let err = provider_error("All providers failed:\nopenai: down".into());
        match err {
            StandardizeError::ProviderError(message) => {
                assert!(message.starts_with("All providers failed"))
            }
            other => panic!("expected a provider error, got {:?}", other),
        }
    }

    #[test]
    fn test_provider_names() {
        assert_eq!(Provider::OpenAI.as_str(), "openai");
        assert_eq!(Provider::Anthropic.as_str(), "anthropic");
    }
}
