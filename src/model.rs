use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Default cap on the number of categories attached to a recipe.
pub const MAX_CATEGORIES_PER_RECIPE: usize = 6;

/// Maximum length of a single category string, in characters.
pub const MAX_CATEGORY_LENGTH: usize = 50;

/// Structured recipe recovered from free-form text.
///
/// Every field may be empty: the parser never fails, so callers decide
/// whether enough was recovered by looking at the fields themselves.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ParsedRecipe {
    pub title: String,
    pub ingredients: Vec<String>,
    pub instructions: String,
    #[serde(default)]
    pub notes: String,
    #[serde(default)]
    pub setup: Vec<String>,
    #[serde(default)]
    pub categories: Vec<String>,
}

impl ParsedRecipe {
    /// True when neither a title, ingredients nor instructions were recovered.
    pub fn is_empty(&self) -> bool {
        self.title.is_empty() && self.ingredients.is_empty() && self.instructions.is_empty()
    }
}

/// A category split on its first colon.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedCategory {
    pub namespace: Option<String>,
    pub value: String,
}

/// Values attached to one namespace key of a map-shaped category input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NamespaceValues {
    One(String),
    Many(Vec<String>),
    /// Anything that is neither a string nor a list (numbers, objects, null).
    Invalid,
}

/// Every shape category input can arrive in.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub enum CategoryInput {
    #[default]
    Empty,
    /// Comma-delimited string.
    Text(String),
    List(Vec<String>),
    /// Namespace key to values, in encounter order.
    Map(Vec<(String, NamespaceValues)>),
}

impl CategoryInput {
    pub fn is_empty(&self) -> bool {
        match self {
            CategoryInput::Empty => true,
            CategoryInput::Text(text) => text.trim().is_empty(),
            CategoryInput::List(items) => items.is_empty(),
            CategoryInput::Map(entries) => entries.is_empty(),
        }
    }
}

impl From<&str> for CategoryInput {
    fn from(text: &str) -> Self {
        CategoryInput::Text(text.to_string())
    }
}

impl From<String> for CategoryInput {
    fn from(text: String) -> Self {
        CategoryInput::Text(text)
    }
}

impl From<Vec<String>> for CategoryInput {
    fn from(items: Vec<String>) -> Self {
        CategoryInput::List(items)
    }
}

impl From<Vec<&str>> for CategoryInput {
    fn from(items: Vec<&str>) -> Self {
        CategoryInput::List(items.into_iter().map(String::from).collect())
    }
}

impl From<&[&str]> for CategoryInput {
    fn from(items: &[&str]) -> Self {
        CategoryInput::List(items.iter().map(|s| s.to_string()).collect())
    }
}

impl<T: Into<CategoryInput>> From<Option<T>> for CategoryInput {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

impl From<&Value> for CategoryInput {
    fn from(value: &Value) -> Self {
        match value {
            Value::String(text) => CategoryInput::Text(text.clone()),
            Value::Array(items) => CategoryInput::List(string_elements(items)),
            Value::Object(map) => CategoryInput::Map(
                map.iter()
                    .map(|(key, value)| {
                        let values = match value {
                            Value::String(text) => NamespaceValues::One(text.clone()),
                            Value::Array(items) => NamespaceValues::Many(string_elements(items)),
                            _ => NamespaceValues::Invalid,
                        };
                        (key.clone(), values)
                    })
                    .collect(),
            ),
            Value::Null | Value::Bool(_) | Value::Number(_) => CategoryInput::Empty,
        }
    }
}

impl From<Value> for CategoryInput {
    fn from(value: Value) -> Self {
        CategoryInput::from(&value)
    }
}

fn string_elements(items: &[Value]) -> Vec<String> {
    items
        .iter()
        .filter_map(|item| item.as_str().map(String::from))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_json_array_drops_non_strings() {
        let input = CategoryInput::from(&json!(["Course: Main", 12, null, true, "Vegan"]));
        assert_eq!(
            input,
            CategoryInput::List(vec!["Course: Main".to_string(), "Vegan".to_string()])
        );
    }

    #[test]
    fn test_json_object_becomes_map() {
        let input = CategoryInput::from(&json!({
            "course": ["Main", 3],
            "cuisine": "Italian",
            "difficulty": 5
        }));

        let CategoryInput::Map(entries) = input else {
            panic!("expected map input");
        };
        assert_eq!(entries.len(), 3);
        assert!(entries.contains(&(
            "course".to_string(),
            NamespaceValues::Many(vec!["Main".to_string()])
        )));
        assert!(entries.contains(&(
            "cuisine".to_string(),
            NamespaceValues::One("Italian".to_string())
        )));
        assert!(entries.contains(&("difficulty".to_string(), NamespaceValues::Invalid)));
    }

    #[test]
    fn test_scalars_are_empty() {
        assert_eq!(CategoryInput::from(&json!(123)), CategoryInput::Empty);
        assert_eq!(CategoryInput::from(&json!(null)), CategoryInput::Empty);
        assert_eq!(CategoryInput::from(None::<String>), CategoryInput::Empty);
    }

    #[test]
    fn test_category_input_is_empty() {
        assert!(CategoryInput::Empty.is_empty());
        assert!(CategoryInput::from("   ").is_empty());
        assert!(CategoryInput::from(&json!([1, 2])).is_empty());
        assert!(CategoryInput::from(&json!({})).is_empty());
        assert!(!CategoryInput::from("Vegan").is_empty());
        assert!(!CategoryInput::from(&json!({"course": 5})).is_empty());
    }

    #[test]
    fn test_parsed_recipe_is_empty() {
        assert!(ParsedRecipe::default().is_empty());

        let recipe = ParsedRecipe {
            title: "Soup".to_string(),
            ..Default::default()
        };
        assert!(!recipe.is_empty());
    }

    #[test]
    fn test_parsed_recipe_deserializes_without_optional_fields() {
        let recipe: ParsedRecipe = serde_json::from_str(
            r#"{"title":"T","ingredients":["a"],"instructions":"i"}"#,
        )
        .unwrap();
        assert!(recipe.notes.is_empty());
        assert!(recipe.setup.is_empty());
        assert!(recipe.categories.is_empty());
    }
}
