//! Line classification for Markdown and plain-text recipes.

/// What a single line of recipe text looks like.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum Line {
    Blank,
    /// A ```` ``` ```` marker, with or without a language tag.
    Fence,
    Heading { level: usize, text: String },
    ListItem(String),
    /// `Key: Value` with a short alphabetic key. `text` is the whole line.
    Metadata {
        key: String,
        value: String,
        text: String,
    },
    Prose(String),
}

const MAX_HEADING_LEVEL: usize = 6;
const MAX_METADATA_KEY_LEN: usize = 30;
const MAX_METADATA_KEY_WORDS: usize = 3;

/// Words that open a recipe section even without a `#` marker.
const SECTION_KEYWORDS: &[&str] = &[
    "ingredients",
    "instructions",
    "directions",
    "setup",
    "prep ahead",
    "notes",
];

pub(crate) fn classify(raw: &str) -> Line {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Line::Blank;
    }
    if trimmed.starts_with("```") {
        return Line::Fence;
    }
    if let Some(line) = atx_heading(trimmed) {
        return line;
    }
    if let Some(line) = bare_section_heading(trimmed) {
        return line;
    }
    if let Some(item) = strip_list_marker(trimmed) {
        return Line::ListItem(clean_inline(item));
    }

    let text = clean_inline(trimmed);
    if let Some((key, value)) = metadata_pair(&text) {
        return Line::Metadata { key, value, text };
    }
    Line::Prose(text)
}

fn atx_heading(line: &str) -> Option<Line> {
    let level = line.chars().take_while(|&c| c == '#').count();
    if level == 0 || level > MAX_HEADING_LEVEL {
        return None;
    }

    let rest = &line[level..];
    if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
        return None;
    }

    let text = clean_inline(rest.trim().trim_end_matches('#'));
    Some(Line::Heading { level, text })
}

/// `Ingredients`, `Ingredients:`, `**Directions**` or `Notes (optional)`.
fn bare_section_heading(line: &str) -> Option<Line> {
    let text = clean_inline(line);
    let text = text.trim_end_matches(':').trim();
    let lowered = text.to_lowercase();

    let matches = SECTION_KEYWORDS.iter().any(|keyword| {
        lowered == *keyword
            || lowered
                .strip_prefix(keyword)
                .map(str::trim_start)
                .is_some_and(|rest| rest.starts_with('(') && rest.ends_with(')'))
    });

    matches.then(|| Line::Heading {
        level: 2,
        text: text.to_string(),
    })
}

/// Return the item text if the line starts with a bullet or a number.
pub(crate) fn strip_list_marker(line: &str) -> Option<&str> {
    let line = line.trim_start();

    for bullet in ['-', '*', '+', '•'] {
        if let Some(rest) = line.strip_prefix(bullet) {
            if rest.starts_with(char::is_whitespace) {
                return Some(strip_checkbox(rest.trim()));
            }
            return None;
        }
    }

    let digits = line.chars().take_while(char::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    let rest = &line[digits..];
    let rest = rest.strip_prefix('.').or_else(|| rest.strip_prefix(')'))?;
    if rest.starts_with(char::is_whitespace) {
        Some(rest.trim())
    } else {
        None
    }
}

fn strip_checkbox(item: &str) -> &str {
    ["[ ]", "[x]", "[X]"]
        .iter()
        .find_map(|box_| item.strip_prefix(box_))
        .map(str::trim_start)
        .unwrap_or(item)
}

fn metadata_pair(text: &str) -> Option<(String, String)> {
    let (key, value) = text.split_once(':')?;
    let key = key.trim();
    let value = value.trim();

    if key.is_empty() || value.is_empty() || key.len() > MAX_METADATA_KEY_LEN {
        return None;
    }
    if !key.starts_with(char::is_alphabetic) {
        return None;
    }
    if !key
        .chars()
        .all(|c| c.is_alphabetic() || c == ' ' || c == '_' || c == '-')
    {
        return None;
    }
    if key.split_whitespace().count() > MAX_METADATA_KEY_WORDS {
        return None;
    }

    Some((key.to_string(), value.to_string()))
}

/// Drop emphasis markers and surrounding whitespace.
pub(crate) fn clean_inline(text: &str) -> String {
    text.replace("**", "")
        .replace("__", "")
        .trim()
        .to_string()
}
