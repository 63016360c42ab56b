//! Category normalization.
//!
//! Categories are either namespaced (`"Course: Main"`) or simple
//! (`"Vegan"`). Input arrives as delimited strings, lists or namespace
//! maps; everything here degrades to a partial result instead of failing.

mod format;
mod normalize;
mod sort;
mod validate;

pub use format::{format_category, format_parsed, parse_category, title_case};
pub use normalize::{
    normalize_categories, normalize_categories_with_limit, normalize_categories_with_report,
    normalize_category_sources, unique_valid_categories, CategoryReport,
};
pub use sort::sort_categories;
pub use validate::validate_category;
