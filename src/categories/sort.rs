use std::cmp::Ordering;

use super::format::parse_category;

const PRIORITY_NAMESPACE: &str = "course";

/// Sort categories into display order.
///
/// Namespaced categories come before simple ones. Among namespaced
/// categories `Course` comes first, then the rest by namespace and value.
/// Simple categories are ordered alphabetically. The sort is stable.
pub fn sort_categories(mut categories: Vec<String>) -> Vec<String> {
    categories.sort_by(|a, b| compare_categories(a, b));
    categories
}

pub(crate) fn compare_categories(a: &str, b: &str) -> Ordering {
    let a_parsed = parse_category(a);
    let b_parsed = parse_category(b);

    match (a_parsed.namespace.as_deref(), b_parsed.namespace.as_deref()) {
        (Some(a_ns), Some(b_ns)) => {
            let a_course = a_ns.eq_ignore_ascii_case(PRIORITY_NAMESPACE);
            let b_course = b_ns.eq_ignore_ascii_case(PRIORITY_NAMESPACE);
            // `true` sorts after `false`, so compare b against a.
            b_course
                .cmp(&a_course)
                .then_with(|| alphabetical(a_ns, b_ns))
                .then_with(|| alphabetical(&a_parsed.value, &b_parsed.value))
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => alphabetical(a.trim(), b.trim()),
    }
}

fn alphabetical(a: &str, b: &str) -> Ordering {
    a.to_lowercase()
        .cmp(&b.to_lowercase())
        .then_with(|| a.cmp(b))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_course_first_then_namespaces_then_simple() {
        let sorted = sort_categories(strings(&[
            "Vegan",
            "Cuisine: Italian",
            "Course: Main",
            "Dietary: Gluten Free",
            "Comfort Food",
            "Course: Appetizer",
        ]));

        assert_eq!(
            sorted,
            strings(&[
                "Course: Appetizer",
                "Course: Main",
                "Cuisine: Italian",
                "Dietary: Gluten Free",
                "Comfort Food",
                "Vegan",
            ])
        );
    }

    #[test]
    fn test_course_beats_alphabetically_earlier_namespace() {
        let sorted = sort_categories(strings(&["Appliance: Oven", "Course: Side"]));
        assert_eq!(sorted, strings(&["Course: Side", "Appliance: Oven"]));
    }

    #[test]
    fn test_alphabetical_is_case_insensitive() {
        let sorted = sort_categories(strings(&["zucchini", "Apple", "banana"]));
        assert_eq!(sorted, strings(&["Apple", "banana", "zucchini"]));
    }

    #[test]
    fn test_empty_input() {
        assert!(sort_categories(Vec::new()).is_empty());
    }
}
