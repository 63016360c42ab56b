use log::debug;

use super::lexer::{classify, clean_inline, Line};
use crate::categories::{format_category, normalize_category_sources, title_case};
use crate::model::{CategoryInput, ParsedRecipe};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Section {
    Preamble,
    Ingredients,
    Instructions,
    Setup,
    Notes,
    /// A heading we do not recognize; its content is ignored.
    Other,
}

impl Section {
    fn from_heading(heading: &str) -> Option<Self> {
        let heading = heading.trim().trim_end_matches(':').to_lowercase();
        let starts = |keyword: &str| {
            heading == keyword
                || heading
                    .strip_prefix(keyword)
                    .is_some_and(|rest| !rest.starts_with(char::is_alphanumeric))
        };

        if starts("ingredients") {
            Some(Section::Ingredients)
        } else if starts("instructions") || starts("directions") {
            Some(Section::Instructions)
        } else if starts("setup") || starts("prep ahead") {
            Some(Section::Setup)
        } else if starts("notes") {
            Some(Section::Notes)
        } else {
            None
        }
    }

    /// Like [`Section::from_heading`], but a metadata key must be exactly
    /// the keyword: "Setup time" or "Notes on sourcing" are ordinary
    /// metadata.
    fn from_key(key: &str) -> Option<Self> {
        let key = key.trim().to_lowercase();
        match key.as_str() {
            "ingredients" => Some(Section::Ingredients),
            "instructions" | "directions" => Some(Section::Instructions),
            "setup" | "prep ahead" => Some(Section::Setup),
            "notes" => Some(Section::Notes),
            _ => None,
        }
    }
}

/// Lines whose whole value is a category list.
const CATEGORY_LINE_KEYS: &[&str] = &["categories", "category", "tags", "labels", "type", "cuisine"];

/// Namespaces recognized in metadata lines and inline in body text.
const KNOWN_NAMESPACES: &[&str] = &[
    "Course",
    "Cuisine",
    "Diet",
    "Dietary",
    "Meal",
    "Occasion",
    "Difficulty",
];

/// Only trusted as `Key: Value` lines before the first section; inline
/// they match ordinary prose ("Method: stir...").
const PREAMBLE_ONLY_NAMESPACES: &[&str] = &["Season", "Method"];

const MAX_INLINE_VALUE_WORDS: usize = 3;

#[derive(Debug, Default)]
struct Collected {
    title: Option<String>,
    first_line: Option<String>,
    ingredients: Vec<String>,
    instructions: Vec<String>,
    setup: Vec<String>,
    notes: Vec<String>,
    /// Preamble and unrecognized-section content, used when no section exists.
    loose: Vec<String>,
    categories: Vec<String>,
    saw_section: bool,
    consumed_any: bool,
}

/// Parse Markdown or plain prose into a recipe.
pub(crate) fn parse_markdown(text: &str, max_categories: usize) -> ParsedRecipe {
    let trimmed = text.trim();
    let mut collected = Collected::default();
    let mut section = Section::Preamble;
    let mut section_level = 0;

    for raw in trimmed.lines() {
        match classify(raw) {
            Line::Blank | Line::Fence => {}
            Line::Heading { level, text } => {
                collected.first_line.get_or_insert_with(|| text.clone());

                if let Some(found) = Section::from_heading(&text) {
                    section = found;
                    section_level = level;
                    collected.saw_section = true;
                } else if level == 1 && collected.title.is_none() {
                    collected.title = Some(text);
                    collected.consumed_any = true;
                } else if matches!(section, Section::Preamble | Section::Other)
                    || level <= section_level
                {
                    section = Section::Other;
                    section_level = level;
                }
            }
            Line::Metadata { key, value, text } => {
                collected.first_line.get_or_insert_with(|| text.clone());

                if let Some(found) = Section::from_key(&key) {
                    // "Notes: serve warm" opens the section and carries content.
                    section = found;
                    section_level = 2;
                    collected.saw_section = true;
                    collected.push(section, value);
                    continue;
                }
                if collected.take_category_line(&key, &value) {
                    continue;
                }
                if section == Section::Preamble && is_known_namespace(&key) {
                    collected.categories.extend(
                        split_values(&value).map(|v| format_category(&title_case(&key), v)),
                    );
                    collected.consumed_any = true;
                    continue;
                }
                collected.categories.extend(inline_categories(&text));
                collected.push(section, text);
            }
            Line::ListItem(text) | Line::Prose(text) => {
                collected.first_line.get_or_insert_with(|| text.clone());
                collected.categories.extend(inline_categories(&text));
                collected.push(section, text);
            }
        }
    }

    collected.into_recipe(trimmed, max_categories)
}

impl Collected {
    fn push(&mut self, section: Section, text: String) {
        if text.is_empty() {
            return;
        }
        match section {
            Section::Ingredients => self.ingredients.push(text),
            Section::Instructions => self.instructions.push(text),
            Section::Setup => self.setup.push(text),
            Section::Notes => self.notes.push(text),
            Section::Preamble | Section::Other => self.loose.push(text),
        }
    }

    /// Handle `Tags: a, b` style lines; returns whether the line was consumed.
    fn take_category_line(&mut self, key: &str, value: &str) -> bool {
        let key = key.to_lowercase();
        if !CATEGORY_LINE_KEYS.contains(&key.as_str()) {
            return false;
        }

        let namespace = match key.as_str() {
            "type" => Some("Course"),
            "cuisine" => Some("Cuisine"),
            _ => None,
        };
        for piece in split_values(value) {
            let category = match namespace {
                Some(namespace) if !piece.contains(':') => format_category(namespace, piece),
                _ => piece.to_string(),
            };
            self.categories.push(category);
        }
        self.consumed_any = true;
        true
    }

    fn into_recipe(self, text: &str, max_categories: usize) -> ParsedRecipe {
        let title = self
            .title
            .or(self.first_line)
            .map(|title| super::decode(&strip_heading_marks(&title)))
            .unwrap_or_default();

        let categories = normalize_category_sources(
            [CategoryInput::List(self.categories)],
            max_categories,
        );

        if !self.saw_section {
            debug!("No recipe sections found, using body text as instructions");
            let instructions = if self.consumed_any {
                self.loose.join("\n")
            } else {
                text.to_string()
            };
            return ParsedRecipe {
                title,
                instructions: super::decode(&instructions),
                categories,
                ..Default::default()
            };
        }

        ParsedRecipe {
            title,
            ingredients: self.ingredients.iter().map(|i| super::decode(i)).collect(),
            instructions: super::decode(&self.instructions.join("\n")),
            notes: super::decode(&self.notes.join("\n")),
            setup: self.setup.iter().map(|s| super::decode(s)).collect(),
            categories,
        }
    }
}

fn split_values(value: &str) -> impl Iterator<Item = &str> {
    value.split(',').map(str::trim).filter(|v| !v.is_empty())
}

fn is_known_namespace(key: &str) -> bool {
    KNOWN_NAMESPACES
        .iter()
        .chain(PREAMBLE_ONLY_NAMESPACES)
        .any(|namespace| namespace.eq_ignore_ascii_case(key.trim()))
}

fn strip_heading_marks(text: &str) -> String {
    clean_inline(text.trim_start_matches('#'))
}

/// Find `Namespace: Value` fragments of a known namespace inside a line.
fn inline_categories(text: &str) -> Vec<String> {
    let lowered = text.to_ascii_lowercase();
    let mut found = Vec::new();

    for namespace in KNOWN_NAMESPACES {
        let needle = namespace.to_ascii_lowercase();
        for (start, _) in lowered.match_indices(&needle) {
            let at_word_start = lowered[..start]
                .chars()
                .next_back()
                .map_or(true, |c| !c.is_alphanumeric());
            if !at_word_start {
                continue;
            }

            let rest = text[start + needle.len()..].trim_start();
            let Some(after_colon) = rest.strip_prefix(':') else {
                continue;
            };
            let value: String = after_colon
                .trim_start()
                .chars()
                .take_while(|c| c.is_alphanumeric() || *c == ' ' || *c == '-')
                .collect();
            let value = value
                .split_whitespace()
                .take(MAX_INLINE_VALUE_WORDS)
                .collect::<Vec<_>>()
                .join(" ");

            if !value.is_empty() {
                found.push(format_category(namespace, &value));
            }
        }
    }

    found
}
