use crate::model::ParsedCategory;

/// Split a category on its first colon, trimming both halves.
///
/// `"Course: Main"` becomes namespace `Course` and value `Main`; a string
/// without a colon only has a value. Blank input yields an empty value.
pub fn parse_category(category: &str) -> ParsedCategory {
    let category = category.trim();
    if category.is_empty() {
        return ParsedCategory::default();
    }

    match category.split_once(':') {
        Some((namespace, value)) => ParsedCategory {
            namespace: Some(namespace.trim().to_string()),
            value: value.trim().to_string(),
        },
        None => ParsedCategory {
            namespace: None,
            value: category.to_string(),
        },
    }
}

/// Join a namespace and value as `"Namespace: Value"`.
///
/// If either side is blank only the other side is returned.
pub fn format_category(namespace: &str, value: &str) -> String {
    let namespace = namespace.trim();
    let value = value.trim();

    match (namespace.is_empty(), value.is_empty()) {
        (false, false) => format!("{}: {}", namespace, value),
        (false, true) => namespace.to_string(),
        (true, false) => value.to_string(),
        (true, true) => String::new(),
    }
}

/// Inverse of [`parse_category`].
pub fn format_parsed(parsed: &ParsedCategory) -> String {
    format_category(parsed.namespace.as_deref().unwrap_or_default(), &parsed.value)
}

/// Capitalize the first letter of every word.
///
/// Underscores and hyphens act as word separators and become single
/// spaces. The remaining letters keep their casing.
pub fn title_case(text: &str) -> String {
    text.split(|c: char| c.is_whitespace() || c == '_' || c == '-')
        .filter(|word| !word.is_empty())
        .map(capitalize)
        .collect::<Vec<_>>()
        .join(" ")
}

fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Title-case namespace and value independently and re-join them.
pub(crate) fn canonical_form(candidate: &str) -> String {
    let parsed = parse_category(candidate);
    match parsed.namespace.as_deref() {
        Some(namespace) => namespaced_form(namespace, &parsed.value),
        None => title_case(&parsed.value),
    }
}

/// Title-case both sides of a category that is known to carry a namespace.
pub(crate) fn namespaced_form(namespace: &str, value: &str) -> String {
    let namespace = title_case(namespace);
    let value = title_case(value);

    if namespace.is_empty() || value.is_empty() {
        // "Course:" or ": Main" must stay invalid rather than collapse into
        // a simple category.
        return format!("{}:{}", namespace, value);
    }
    format_category(&namespace, &value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_namespaced() {
        let parsed = parse_category("  Course :  Main ");
        assert_eq!(parsed.namespace.as_deref(), Some("Course"));
        assert_eq!(parsed.value, "Main");
    }

    #[test]
    fn test_parse_simple_and_blank() {
        assert_eq!(
            parse_category("Vegan"),
            ParsedCategory {
                namespace: None,
                value: "Vegan".to_string()
            }
        );
        assert_eq!(parse_category("   "), ParsedCategory::default());
        assert_eq!(parse_category(""), ParsedCategory::default());
    }

    #[test]
    fn test_parse_splits_on_first_colon_only() {
        let parsed = parse_category("a: b: c");
        assert_eq!(parsed.namespace.as_deref(), Some("a"));
        assert_eq!(parsed.value, "b: c");
    }

    #[test]
    fn test_format_category() {
        assert_eq!(format_category("Course", "Main"), "Course: Main");
        assert_eq!(format_category(" Course ", "  "), "Course");
        assert_eq!(format_category("", "Main"), "Main");
        assert_eq!(format_category(" ", " "), "");
    }

    #[test]
    fn test_format_parse_round_trip() {
        for category in ["Course: Main", "Cuisine: Italian", "Vegan", "Dietary: Gluten Free"] {
            assert_eq!(format_parsed(&parse_category(category)), category);
        }
    }

    #[test]
    fn test_title_case() {
        assert_eq!(title_case("main_course"), "Main Course");
        assert_eq!(title_case("gluten-free"), "Gluten Free");
        assert_eq!(title_case("  slow   cooker "), "Slow Cooker");
        assert_eq!(title_case("BBQ"), "BBQ");
        assert_eq!(title_case(""), "");
    }

    #[test]
    fn test_namespaced_form_keeps_blank_sides_invalid() {
        assert_eq!(namespaced_form("course", "main dish"), "Course: Main Dish");
        assert_eq!(namespaced_form("course", "  "), "Course:");
        assert_eq!(namespaced_form("cuisine", "-"), "Cuisine:");
        assert_eq!(namespaced_form("_", "Side"), ":Side");
    }

    #[test]
    fn test_canonical_form() {
        assert_eq!(canonical_form("course: main"), "Course: Main");
        assert_eq!(canonical_form("meal_type:quick-dinner"), "Meal Type: Quick Dinner");
        assert_eq!(canonical_form("vegan"), "Vegan");
        assert_eq!(canonical_form("Course:"), "Course:");
    }
}
