//! Turn free-form recipe text into structured recipes.
//!
//! The core is deterministic and never fails: [`parse_recipe_from_text`]
//! reads JSON, Markdown or prose, and [`normalize_categories`] turns any
//! category input into a canonical, sorted list. An optional AI step
//! ([`RecipeStandardizer`]) rewrites messy text before it is parsed.

pub mod builder;
pub mod categories;
pub mod config;
pub mod error;
pub mod model;
pub mod parser;
pub mod providers;
pub mod uniffi_bindings;

pub use builder::{Mode, Provider, RecipeStandardizer, RecipeStandardizerBuilder};
pub use categories::{
    format_category, normalize_categories, normalize_categories_with_limit,
    normalize_categories_with_report, normalize_category_sources, parse_category,
    sort_categories, unique_valid_categories, validate_category, CategoryReport,
};
pub use config::StandardizerConfig;
pub use error::StandardizeError;
pub use model::{
    CategoryInput, NamespaceValues, ParsedCategory, ParsedRecipe, MAX_CATEGORIES_PER_RECIPE,
};
pub use parser::{parse_recipe_from_text, parse_recipe_with_limit, RecipeParser};

/// Standardize recipe text with the configured providers, then parse it.
pub async fn standardize_text(text: &str) -> Result<ParsedRecipe, StandardizeError> {
    RecipeStandardizer::builder().text(text).build().await
}

/// Standardize recipe text with an explicit provider, API key and model.
///
/// Omitted values fall back to configuration and environment variables.
pub async fn standardize_text_with_config(
    text: &str,
    provider: Option<Provider>,
    api_key: Option<String>,
    model: Option<String>,
) -> Result<ParsedRecipe, StandardizeError> {
    let mut builder = RecipeStandardizer::builder().text(text);
    if let Some(provider) = provider {
        builder = builder.provider(provider);
    }
    if let Some(api_key) = api_key {
        builder = builder.api_key(api_key);
    }
    if let Some(model) = model {
        builder = builder.model(model);
    }
    builder.build().await
}
