//! UniFFI bindings for recipe-standardizer
//!
//! FFI-compatible types and functions for iOS and Android. The async
//! standardization API is wrapped in a synchronous function that manages
//! its own tokio runtime; parsing and normalization are synchronous already.

use std::fmt;

use crate::{ParsedRecipe, StandardizeError};

#[cfg(feature = "uniffi")]
uniffi::setup_scaffolding!();

/// FFI-compatible parsed recipe
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiParsedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    pub notes: String,
    pub setup: Vec<String>,
    pub categories: Vec<String>,
}

impl From<ParsedRecipe> for FfiParsedRecipe {
    fn from(recipe: ParsedRecipe) -> Self {
        FfiParsedRecipe {
            title: recipe.title,
            ingredients: recipe.ingredients,
            instructions: recipe.instructions,
            notes: recipe.notes,
            setup: recipe.setup,
            categories: recipe.categories,
        }
    }
}

/// FFI-compatible LLM provider enum
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Enum))]
pub enum FfiProvider {
    OpenAI,
    Anthropic,
}

impl From<FfiProvider> for crate::Provider {
    fn from(provider: FfiProvider) -> Self {
        match provider {
            FfiProvider::OpenAI => crate::Provider::OpenAI,
            FfiProvider::Anthropic => crate::Provider::Anthropic,
        }
    }
}

/// Options for the AI standardization step
#[derive(Debug, Clone, Default)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Record))]
pub struct FfiStandardizeConfig {
    /// Optional LLM provider (uses configuration if not specified)
    pub provider: Option<FfiProvider>,
    /// Optional API key (uses environment variable if not specified)
    pub api_key: Option<String>,
    /// Optional model name (uses provider default if not specified)
    pub model: Option<String>,
    /// Optional category limit (defaults to 6)
    pub max_categories: Option<u32>,
    /// Optional timeout in seconds
    pub timeout_seconds: Option<u64>,
}

/// FFI-compatible error type
#[derive(Debug, Clone)]
#[cfg_attr(feature = "uniffi", derive(uniffi::Error))]
pub enum FfiStandardizeError {
    /// Network request failed
    RequestError { message: String },
    /// The provider did not return usable content
    ProviderError { message: String },
    /// Invalid input provided
    InvalidInput { message: String },
    /// Builder configuration error
    BuilderError { message: String },
    /// Configuration error
    ConfigError { message: String },
    /// Runtime error (tokio)
    RuntimeError { message: String },
}

impl fmt::Display for FfiStandardizeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FfiStandardizeError::RequestError { message } => write!(f, "Request error: {}", message),
            FfiStandardizeError::ProviderError { message } => {
                write!(f, "Provider error: {}", message)
            }
            FfiStandardizeError::InvalidInput { message } => write!(f, "Invalid input: {}", message),
            FfiStandardizeError::BuilderError { message } => write!(f, "Builder error: {}", message),
            FfiStandardizeError::ConfigError { message } => write!(f, "Config error: {}", message),
            FfiStandardizeError::RuntimeError { message } => write!(f, "Runtime error: {}", message),
        }
    }
}

impl std::error::Error for FfiStandardizeError {}

impl From<StandardizeError> for FfiStandardizeError {
    fn from(err: StandardizeError) -> Self {
        match err {
            StandardizeError::RequestError(e) => FfiStandardizeError::RequestError {
                message: e.to_string(),
            },
            StandardizeError::ProviderError(message) => {
                FfiStandardizeError::ProviderError { message }
            }
            StandardizeError::InvalidInput(message) => FfiStandardizeError::InvalidInput { message },
            StandardizeError::BuilderError(message) => FfiStandardizeError::BuilderError { message },
            StandardizeError::ConfigError(e) => FfiStandardizeError::ConfigError {
                message: e.to_string(),
            },
        }
    }
}

/// Parse recipe text without any network call
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn parse_recipe(text: String, max_categories: Option<u32>) -> FfiParsedRecipe {
    let limit = max_categories
        .map(|limit| limit as usize)
        .unwrap_or(crate::MAX_CATEGORIES_PER_RECIPE);
    crate::parse_recipe_with_limit(&text, limit).into()
}

/// Normalize a list of category strings
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn normalize_category_list(categories: Vec<String>, max_categories: Option<u32>) -> Vec<String> {
    let limit = max_categories
        .map(|limit| limit as usize)
        .unwrap_or(crate::MAX_CATEGORIES_PER_RECIPE);
    crate::normalize_categories_with_limit(categories, limit)
}

/// Create a new tokio runtime for FFI calls
fn create_runtime() -> Result<tokio::runtime::Runtime, FfiStandardizeError> {
    tokio::runtime::Runtime::new().map_err(|e| FfiStandardizeError::RuntimeError {
        message: format!("Failed to create async runtime: {}", e),
    })
}

/// Standardize recipe text with an LLM, then parse it
#[cfg_attr(feature = "uniffi", uniffi::export)]
pub fn standardize_recipe_text(
    text: String,
    config: Option<FfiStandardizeConfig>,
) -> Result<FfiParsedRecipe, FfiStandardizeError> {
    let rt = create_runtime()?;
    rt.block_on(async { standardize_async(text, config.unwrap_or_default()).await })
}

async fn standardize_async(
    text: String,
    config: FfiStandardizeConfig,
) -> Result<FfiParsedRecipe, FfiStandardizeError> {
    let mut builder = crate::RecipeStandardizer::builder().text(text);

    if let Some(provider) = config.provider {
        builder = builder.provider(provider.into());
    }
    if let Some(api_key) = config.api_key {
        builder = builder.api_key(api_key);
    }
    if let Some(model) = config.model {
        builder = builder.model(model);
    }
    if let Some(limit) = config.max_categories {
        builder = builder.max_categories(limit as usize);
    }
    if let Some(seconds) = config.timeout_seconds {
        builder = builder.timeout(std::time::Duration::from_secs(seconds));
    }

    Ok(builder.build().await?.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_recipe() {
        let recipe = parse_recipe("# Eggs\n## Ingredients\n- 2 eggs".to_string(), None);
        assert_eq!(recipe.title, "Eggs");
        assert_eq!(recipe.ingredients, vec!["2 eggs"]);
    }

    #[test]
    fn test_normalize_category_list() {
        let categories = normalize_category_list(
            vec!["vegan".to_string(), "course: main".to_string()],
            Some(1),
        );
        assert_eq!(categories, vec!["Course: Main"]);
    }

    #[test]
    fn test_standardize_blank_text() {
        let result = standardize_recipe_text("  ".to_string(), None);
        assert!(matches!(
            result,
            Err(FfiStandardizeError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_error_conversion() {
        let err: FfiStandardizeError =
            StandardizeError::BuilderError("bad".to_string()).into();
        assert_eq!(err.to_string(), "Builder error: bad");
    }
}
