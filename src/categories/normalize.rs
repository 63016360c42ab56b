use std::collections::HashSet;

use log::debug;

use super::format::{canonical_form, namespaced_form};
use super::sort::sort_categories;
use super::validate::validate_category;
use crate::model::{CategoryInput, NamespaceValues, MAX_CATEGORIES_PER_RECIPE};

/// Result of normalizing category input, including what was thrown away.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryReport {
    /// Canonical, deduplicated, sorted and truncated categories.
    pub categories: Vec<String>,
    /// Candidates that failed validation, in their formatted form.
    pub rejected: Vec<String>,
    /// Valid categories cut off by the limit.
    pub truncated: Vec<String>,
}

/// Trim, validate and deduplicate categories, keeping their relative order.
///
/// Duplicates are detected case-insensitively; the first spelling seen is
/// the one kept.
pub fn unique_valid_categories<S: AsRef<str>>(categories: &[S]) -> Vec<String> {
    let mut seen = HashSet::new();
    let mut unique = Vec::new();

    for category in categories {
        let category = category.as_ref().trim();
        if !validate_category(category) {
            continue;
        }
        if seen.insert(category.to_lowercase()) {
            unique.push(category.to_string());
        }
    }

    unique
}

/// Normalize any category input into at most
/// [`MAX_CATEGORIES_PER_RECIPE`] canonical categories.
///
/// # Example
/// ```
/// use recipe_standardizer::normalize_categories;
///
/// let categories = normalize_categories(vec!["Course: Main", "course: main", "Cuisine: Italian"]);
/// assert_eq!(categories, vec!["Course: Main", "Cuisine: Italian"]);
/// ```
pub fn normalize_categories(input: impl Into<CategoryInput>) -> Vec<String> {
    normalize_categories_with_limit(input, MAX_CATEGORIES_PER_RECIPE)
}

/// Like [`normalize_categories`] with a caller-chosen limit.
pub fn normalize_categories_with_limit(input: impl Into<CategoryInput>, limit: usize) -> Vec<String> {
    normalize_categories_with_report(input, limit).categories
}

/// Union several inputs, in order, before normalizing.
///
/// Earlier sources win when the same category appears with different
/// casing in several of them.
pub fn normalize_category_sources<I>(sources: I, limit: usize) -> Vec<String>
where
    I: IntoIterator<Item = CategoryInput>,
{
    let mut candidates = Vec::new();
    for source in sources {
        collect_candidates(&source, &mut candidates);
    }
    finish(candidates, limit).categories
}

/// Normalize and report which candidates were dropped along the way.
pub fn normalize_categories_with_report(
    input: impl Into<CategoryInput>,
    limit: usize,
) -> CategoryReport {
    let mut candidates = Vec::new();
    collect_candidates(&input.into(), &mut candidates);
    finish(candidates, limit)
}

fn collect_candidates(input: &CategoryInput, out: &mut Vec<String>) {
    match input {
        CategoryInput::Empty => {}
        CategoryInput::Text(text) => {
            out.extend(split_delimited(text).map(canonical_form));
        }
        CategoryInput::List(items) => {
            out.extend(items.iter().map(|item| canonical_form(item)));
        }
        CategoryInput::Map(entries) => {
            for (key, values) in entries {
                match values {
                    NamespaceValues::One(text) => out.extend(
                        split_delimited(text).map(|value| namespaced_form(key, value)),
                    ),
                    NamespaceValues::Many(items) => {
                        out.extend(items.iter().map(|value| namespaced_form(key, value)))
                    }
                    NamespaceValues::Invalid => {
                        debug!("Dropping category namespace '{}' with unusable values", key);
                    }
                }
            }
        }
    }
}

fn split_delimited(text: &str) -> impl Iterator<Item = &str> {
    text.split(',').map(str::trim).filter(|piece| !piece.is_empty())
}

fn finish(candidates: Vec<String>, limit: usize) -> CategoryReport {
    let mut rejected = Vec::new();
    for candidate in &candidates {
        if !validate_category(candidate) {
            debug!("Dropping invalid category '{}'", candidate);
            rejected.push(candidate.clone());
        }
    }

    let mut categories = sort_categories(unique_valid_categories(&candidates));
    let truncated = if categories.len() > limit {
        let cut = categories.split_off(limit);
        debug!("Dropping {} categories over the limit of {}", cut.len(), limit);
        cut
    } else {
        Vec::new()
    };

    CategoryReport {
        categories,
        rejected,
        truncated,
    }
}
