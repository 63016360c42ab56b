use crate::model::MAX_CATEGORY_LENGTH;

/// Check a category against the canonical shape.
///
/// Rejects blank strings, anything longer than 50 characters, more than
/// one colon, a colon with an empty side, and characters other than
/// letters, digits, spaces, hyphens and commas.
pub fn validate_category(category: &str) -> bool {
    let trimmed = category.trim();
    if trimmed.is_empty() || trimmed.chars().count() > MAX_CATEGORY_LENGTH {
        return false;
    }

    let allowed = |c: char| c.is_alphanumeric() || c == ' ' || c == '-' || c == ',' || c == ':';
    if !trimmed.chars().all(allowed) {
        return false;
    }

    match trimmed.matches(':').count() {
        0 => true,
        1 => trimmed
            .split_once(':')
            .is_some_and(|(namespace, value)| {
                !namespace.trim().is_empty() && !value.trim().is_empty()
            }),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_canonical_categories() {
        assert!(validate_category("Course: Main"));
        assert!(validate_category("Vegan"));
        assert!(validate_category("Dietary: Gluten-Free"));
        assert!(validate_category("Cuisine: Crème, Brûlée"));
        assert!(validate_category("Occasion: 4th Of July"));
    }

    #[test]
    fn test_rejects_blank() {
        assert!(!validate_category(""));
        assert!(!validate_category("   "));
    }

    #[test]
    fn test_rejects_too_long() {
        let at_limit = "a".repeat(50);
        let over_limit = "a".repeat(51);
        assert!(validate_category(&at_limit));
        assert!(!validate_category(&over_limit));
    }

    #[test]
    fn test_rejects_colon_problems() {
        assert!(!validate_category("a:b:c"));
        assert!(!validate_category("Course:"));
        assert!(!validate_category(": Main"));
        assert!(!validate_category(" : "));
    }

    #[test]
    fn test_rejects_disallowed_characters() {
        assert!(!validate_category("chef@home"));
        assert!(!validate_category("Course: Main!"));
        assert!(!validate_category("Fish & Chips"));
        assert!(!validate_category("Tab\tSeparated"));
    }
}
