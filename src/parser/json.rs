use serde_json::{Map, Value};

use super::decode;
use super::lexer::strip_list_marker;
use crate::categories::{format_category, normalize_category_sources};
use crate::model::{CategoryInput, ParsedRecipe};

const TITLE_FIELDS: &[&str] = &["title", "name", "recipe_name", "recipeName"];
const INGREDIENT_FIELDS: &[&str] = &["ingredients", "recipeIngredient", "ingredient_list"];
const INSTRUCTION_FIELDS: &[&str] = &[
    "instructions",
    "directions",
    "steps",
    "method",
    "recipeInstructions",
];
const NOTE_FIELDS: &[&str] = &["notes", "note", "tips"];
const SETUP_FIELDS: &[&str] = &["setup", "prep_ahead", "prepAhead", "setup_steps"];

/// Fields holding whole category collections, unioned in this order.
const CATEGORY_FIELDS: &[&str] = &["categories", "tags", "labels", "classification"];

/// Single-value fields that imply a namespace.
const NAMESPACED_FIELDS: &[(&str, &str)] = &[
    ("course", "Course"),
    ("meal", "Meal"),
    ("type", "Course"),
    ("category", "Course"),
    ("recipeCategory", "Course"),
    ("cuisine", "Cuisine"),
    ("recipeCuisine", "Cuisine"),
    ("diet", "Dietary"),
    ("dietary", "Dietary"),
    ("occasion", "Occasion"),
    ("difficulty", "Difficulty"),
];

/// Build a recipe from a JSON object, reading each field by precedence.
pub(crate) fn parse_json_recipe(object: &Map<String, Value>, max_categories: usize) -> ParsedRecipe {
    let title = TITLE_FIELDS
        .iter()
        .filter_map(|field| object.get(*field))
        .find_map(|value| value.as_str().map(decode).filter(|t| !t.is_empty()))
        .unwrap_or_default();

    let ingredients = first_non_empty(object, INGREDIENT_FIELDS, |value| {
        string_list(value, ingredient_from_object)
    });
    let instructions = first_non_empty(object, INSTRUCTION_FIELDS, text_block);
    let notes = first_non_empty(object, NOTE_FIELDS, text_block);
    let setup = first_non_empty(object, SETUP_FIELDS, |value| {
        string_list(value, |_| None)
    });

    ParsedRecipe {
        title,
        ingredients,
        instructions,
        notes,
        setup,
        categories: normalize_category_sources(category_sources(object), max_categories),
    }
}

fn first_non_empty<T, F>(object: &Map<String, Value>, fields: &[&str], read: F) -> T
where
    T: Default + IsEmpty,
    F: Fn(&Value) -> T,
{
    fields
        .iter()
        .filter_map(|field| object.get(*field))
        .map(read)
        .find(|value| !value.is_empty())
        .unwrap_or_default()
}

trait IsEmpty {
    fn is_empty(&self) -> bool;
}

impl IsEmpty for String {
    fn is_empty(&self) -> bool {
        String::is_empty(self)
    }
}

impl IsEmpty for Vec<String> {
    fn is_empty(&self) -> bool {
        Vec::is_empty(self)
    }
}

/// A list of lines: arrays of strings (or objects), or a newline-split string.
fn string_list(value: &Value, from_object: fn(&Map<String, Value>) -> Option<String>) -> Vec<String> {
    match value {
        Value::String(text) => text
            .lines()
            .map(|line| strip_list_marker(line).unwrap_or(line))
            .map(decode)
            .filter(|line| !line.is_empty())
            .collect(),
        Value::Array(items) => items
            .iter()
            .filter_map(|item| match item {
                Value::String(text) => Some(decode(text)),
                Value::Object(object) => from_object(object).map(|text| decode(&text)),
                _ => None,
            })
            .filter(|line| !line.is_empty())
            .collect(),
        _ => Vec::new(),
    }
}

/// `{"quantity": 2, "unit": "cups", "name": "flour"}` -> `2 cups flour`
fn ingredient_from_object(object: &Map<String, Value>) -> Option<String> {
    let name = first_scalar(object, &["name", "item", "ingredient", "text"])?;
    let pieces: Vec<String> = [
        first_scalar(object, &["quantity", "amount"]),
        first_scalar(object, &["unit"]),
        Some(name),
    ]
    .into_iter()
    .flatten()
    .filter(|piece| !piece.is_empty())
    .collect();

    Some(pieces.join(" "))
}

fn first_scalar(object: &Map<String, Value>, fields: &[&str]) -> Option<String> {
    fields
        .iter()
        .filter_map(|field| object.get(*field))
        .find_map(scalar_text)
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text.trim().to_string()),
        Value::Number(number) => Some(number.to_string()),
        _ => None,
    }
}

/// A block of prose: a string, or list entries joined with newlines.
fn text_block(value: &Value) -> String {
    match value {
        Value::String(text) => decode(text),
        Value::Array(_) => string_list(value, step_from_object).join("\n"),
        Value::Object(object) => step_from_object(object)
            .map(|text| decode(&text))
            .unwrap_or_default(),
        _ => String::new(),
    }
}

fn step_from_object(object: &Map<String, Value>) -> Option<String> {
    ["text", "step", "description", "instruction"]
        .iter()
        .filter_map(|field| object.get(*field))
        .find_map(|value| value.as_str().map(String::from))
}

fn category_sources(object: &Map<String, Value>) -> Vec<CategoryInput> {
    let mut sources: Vec<CategoryInput> = CATEGORY_FIELDS
        .iter()
        .filter_map(|field| object.get(*field))
        .map(CategoryInput::from)
        .filter(|source| !source.is_empty())
        .collect();

    for (field, namespace) in NAMESPACED_FIELDS {
        let Some(value) = object.get(*field) else {
            continue;
        };
        let values: Vec<&str> = match value {
            Value::String(text) => text.split(',').collect(),
            Value::Array(items) => items.iter().filter_map(Value::as_str).collect(),
            _ => continue,
        };
        let namespaced = values
            .into_iter()
            .map(str::trim)
            .filter(|value| !value.is_empty())
            .map(|value| {
                if value.contains(':') {
                    value.to_string()
                } else {
                    format_category(namespace, value)
                }
            })
            .collect::<Vec<_>>();
        let source = CategoryInput::List(namespaced);
        if !source.is_empty() {
            sources.push(source);
        }
    }

    sources
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MAX_CATEGORIES_PER_RECIPE;
    use serde_json::json;

    fn parse(value: Value) -> ParsedRecipe {
        let Value::Object(object) = value else {
            panic!("test input must be an object");
        };
        parse_json_recipe(&object, MAX_CATEGORIES_PER_RECIPE)
    }

    #[test]
    fn test_basic_fields() {
        let recipe = parse(json!({
            "title": "T",
            "ingredients": ["a"],
            "instructions": "i",
            "categories": ["Course: Main"]
        }));

        assert_eq!(recipe.title, "T");
        assert_eq!(recipe.ingredients, vec!["a"]);
        assert_eq!(recipe.instructions, "i");
        assert_eq!(recipe.categories, vec!["Course: Main"]);
        assert!(recipe.notes.is_empty());
        assert!(recipe.setup.is_empty());
    }

    #[test]
    fn test_alternate_field_names() {
        let recipe = parse(json!({
            "name": "Chili",
            "recipeIngredient": "- beans\n- 1 onion\n\n",
            "steps": [{"text": "Brown the onion"}, "Add beans", 4],
            "tips": ["Better the next day"],
            "prep_ahead": "Soak beans overnight"
        }));

        assert_eq!(recipe.title, "Chili");
        assert_eq!(recipe.ingredients, vec!["beans", "1 onion"]);
        assert_eq!(recipe.instructions, "Brown the onion\nAdd beans");
        assert_eq!(recipe.notes, "Better the next day");
        assert_eq!(recipe.setup, vec!["Soak beans overnight"]);
    }

    #[test]
    fn test_empty_preferred_field_falls_through() {
        let recipe = parse(json!({
            "title": "",
            "name": "Fallback Name",
            "instructions": "",
            "directions": "Stir."
        }));
        assert_eq!(recipe.title, "Fallback Name");
        assert_eq!(recipe.instructions, "Stir.");
    }

    #[test]
    fn test_structured_ingredients() {
        let recipe = parse(json!({
            "ingredients": [
                {"quantity": 2, "unit": "cups", "name": "flour"},
                {"item": "salt"},
                {"unit": "g"}
            ]
        }));
        assert_eq!(recipe.ingredients, vec!["2 cups flour", "salt"]);
    }

    #[test]
    fn test_categories_union_across_fields() {
        let recipe = parse(json!({
            "categories": ["Course: Main"],
            "tags": "quick, Course: main",
            "labels": {"dietary": ["vegan"]},
            "cuisine": "Italian",
            "type": "Dinner Party"
        }));

        assert_eq!(
            recipe.categories,
            vec![
                "Course: Dinner Party",
                "Course: Main",
                "Cuisine: Italian",
                "Dietary: Vegan",
                "Quick",
            ]
        );
    }

    #[test]
    fn test_empty_category_fields_are_not_sources() {
        let Value::Object(object) = json!({
            "categories": "  ",
            "tags": [],
            "labels": {},
            "cuisine": " , ",
            "course": ["Main"]
        }) else {
            panic!("test input must be an object");
        };

        let sources = category_sources(&object);
        assert_eq!(
            sources,
            vec![CategoryInput::List(vec!["Course: Main".to_string()])]
        );
    }

    #[test]
    fn test_wrong_typed_fields_are_absent() {
        let recipe = parse(json!({
            "title": 42,
            "ingredients": {"not": "a list"},
            "instructions": null,
            "categories": 123
        }));
        assert_eq!(recipe, ParsedRecipe::default());
    }

    #[test]
    fn test_categories_are_capped() {
        let recipe = parse(json!({
            "categories": [
                "A1", "B1", "C1", "D1", "E1", "F1", "G1", "H1", "Course: Main", "Cuisine: Thai"
            ]
        }));
        assert_eq!(recipe.categories.len(), 6);
        assert_eq!(recipe.categories[0], "Course: Main");
        assert_eq!(recipe.categories[1], "Cuisine: Thai");
    }
}
