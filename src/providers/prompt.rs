/// The system prompt used for standardizing free-form recipe text.
///
/// It asks the model for the JSON shape that
/// [`parse_recipe_from_text`](crate::parse_recipe_from_text) reads, so the
/// model output can be fed straight into the deterministic parser.
///
/// The prompt is loaded from `prompt.txt` at compile time using the
/// `include_str!` macro.
pub const STANDARDIZE_PROMPT: &str = include_str!("prompt.txt");

/// Build the system prompt, optionally asking for a category limit other
/// than the default six.
pub fn build_standardize_prompt(max_categories: Option<usize>) -> String {
    match max_categories {
        Some(limit) if limit != crate::MAX_CATEGORIES_PER_RECIPE => STANDARDIZE_PROMPT.replace(
            "Use at most 6 categories",
            &format!("Use at most {} categories", limit),
        ),
        _ => STANDARDIZE_PROMPT.to_string(),
    }
}
