//! Structural extraction of recipes from free-form text.
//!
//! Input is JSON (bare, fenced, or embedded in chatter), Markdown, or plain
//! prose. The parser never fails: anything it cannot understand leaves the
//! corresponding [`ParsedRecipe`] field empty.

mod json;
mod lexer;
mod markdown;

use html_escape::decode_html_entities;
use log::debug;
use serde_json::{Map, Value};

use crate::model::{ParsedRecipe, MAX_CATEGORIES_PER_RECIPE};

/// Recipe text parser with a configurable category limit.
#[derive(Debug, Clone, Copy)]
pub struct RecipeParser {
    max_categories: usize,
}

impl Default for RecipeParser {
    fn default() -> Self {
        Self {
            max_categories: MAX_CATEGORIES_PER_RECIPE,
        }
    }
}

impl RecipeParser {
    pub fn new(max_categories: usize) -> Self {
        Self { max_categories }
    }

    pub fn max_categories(&self) -> usize {
        self.max_categories
    }

    /// Parse recipe text into a [`ParsedRecipe`].
    pub fn parse(&self, text: &str) -> ParsedRecipe {
        let text = text.trim();
        if text.is_empty() {
            return ParsedRecipe::default();
        }

        match detect_json(text) {
            Some(object) => {
                debug!("Parsing recipe as JSON ({} fields)", object.len());
                json::parse_json_recipe(&object, self.max_categories)
            }
            None => {
                debug!("Parsing recipe as Markdown/plain text");
                markdown::parse_markdown(text, self.max_categories)
            }
        }
    }
}

/// Parse recipe text with the default category limit.
///
/// # Example
/// ```
/// use recipe_standardizer::parse_recipe_from_text;
///
/// let recipe = parse_recipe_from_text(
///     r#"{"title":"T","ingredients":["a"],"instructions":"i","categories":["Course: Main"]}"#,
/// );
/// assert_eq!(recipe.title, "T");
/// assert_eq!(recipe.categories, vec!["Course: Main"]);
/// ```
pub fn parse_recipe_from_text(text: &str) -> ParsedRecipe {
    RecipeParser::default().parse(text)
}

pub fn parse_recipe_with_limit(text: &str, max_categories: usize) -> ParsedRecipe {
    RecipeParser::new(max_categories).parse(text)
}

/// Locate a JSON object: fenced block first, then the whole text, then the
/// outermost braces.
fn detect_json(text: &str) -> Option<Map<String, Value>> {
    if let Some(inner) = fenced_block(text) {
        match parse_object(inner) {
            Some(object) => return Some(object),
            None => debug!("Fenced block is not a JSON object, falling back"),
        }
    }

    if let Some(object) = parse_object(text) {
        return Some(object);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if start < end {
        parse_object(&text[start..=end])
    } else {
        None
    }
}

/// Interior of the first ```` ``` ```` block, skipping any language tag.
fn fenced_block(text: &str) -> Option<&str> {
    let open = text.find("```")?;
    let after_open = &text[open + 3..];
    let body_start = after_open.find('\n')? + 1;
    let body = &after_open[body_start..];
    let close = body.find("```")?;
    Some(body[..close].trim())
}

fn parse_object(candidate: &str) -> Option<Map<String, Value>> {
    match serde_json::from_str::<Value>(candidate.trim()) {
        Ok(Value::Object(mut object)) => {
            // {"recipe": {...}} wrappers are common in model output.
            if object.len() == 1 && object.get("recipe").is_some_and(Value::is_object) {
                if let Some(Value::Object(inner)) = object.remove("recipe") {
                    return Some(inner);
                }
            }
            Some(object)
        }
        Ok(_) => None,
        Err(e) => {
            debug!("Not JSON: {}", e);
            None
        }
    }
}

/// Decode HTML entities left behind by scraped or generated text.
pub(crate) fn decode(text: &str) -> String {
    decode_html_entities(text.trim()).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert_eq!(parse_recipe_from_text(""), ParsedRecipe::default());
        assert_eq!(parse_recipe_from_text("  \n\t "), ParsedRecipe::default());
    }

    #[test]
    fn test_bare_json() {
        let recipe = parse_recipe_from_text(
            r#"{"title":"T","ingredients":["a"],"instructions":"i","categories":["Course: Main"]}"#,
        );
        assert_eq!(
            recipe,
            ParsedRecipe {
                title: "T".to_string(),
                ingredients: vec!["a".to_string()],
                instructions: "i".to_string(),
                categories: vec!["Course: Main".to_string()],
                ..Default::default()
            }
        );
    }

    #[test]
    fn test_fenced_json() {
        let text = "Here you go:\n```json\n{\"title\": \"Fenced\", \"ingredients\": [\"x\"]}\n```\nEnjoy!";
        let recipe = parse_recipe_from_text(text);
        assert_eq!(recipe.title, "Fenced");
        assert_eq!(recipe.ingredients, vec!["x"]);
    }

    #[test]
    fn test_unlabelled_fence() {
        let text = "```\n{\"name\": \"Plain Fence\"}\n```";
        assert_eq!(parse_recipe_from_text(text).title, "Plain Fence");
    }

    #[test]
    fn test_malformed_fenced_json_falls_back_to_markdown() {
        let text = "```json\n{\"title\": \"Broken\", \"ingredients\": [\n```\n# Real Title\n## Ingredients\n- egg";
        let recipe = parse_recipe_from_text(text);
        assert_eq!(recipe.title, "Real Title");
        assert_eq!(recipe.ingredients, vec!["egg"]);
    }

    #[test]
    fn test_json_embedded_in_chatter() {
        let text = "Sure! {\"title\": \"Chatty\", \"instructions\": \"Go.\"} Let me know.";
        let recipe = parse_recipe_from_text(text);
        assert_eq!(recipe.title, "Chatty");
        assert_eq!(recipe.instructions, "Go.");
    }

    #[test]
    fn test_recipe_wrapper_is_unwrapped() {
        let recipe = parse_recipe_from_text(r#"{"recipe": {"title": "Wrapped"}}"#);
        assert_eq!(recipe.title, "Wrapped");
    }

    #[test]
    fn test_non_object_json_is_prose() {
        let recipe = parse_recipe_from_text("42");
        assert_eq!(recipe.title, "42");
        assert_eq!(recipe.instructions, "42");
    }

    #[test]
    fn test_custom_limit() {
        let recipe = parse_recipe_with_limit(
            r#"{"categories": ["Course: Main", "Cuisine: Thai", "Vegan"]}"#,
            2,
        );
        assert_eq!(recipe.categories, vec!["Course: Main", "Cuisine: Thai"]);
        assert_eq!(RecipeParser::new(2).max_categories(), 2);
    }
}
