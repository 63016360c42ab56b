use thiserror::Error;

/// Errors that can occur while standardizing a recipe with an AI provider.
///
/// The deterministic parser and category normalizer never fail; these only
/// cover configuration, network and provider problems around them.
#[derive(Error, Debug)]
pub enum StandardizeError {
    /// HTTP request to a provider failed
    #[error("Request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    /// The provider answered, but not with usable content
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// Invalid recipe text provided
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Builder configuration error
    #[error("Builder error: {0}")]
    BuilderError(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(#[from] config::ConfigError),
}
