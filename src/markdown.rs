//! Front-matter parsing and markdown rendering.
//!
//! Posts are markdown files with an optional YAML front-matter block:
//!
//! ```text
//! ---
//! title: Two Sum
//! date: 2024-03-01
//! excerpt: Hash map in one pass
//! category: leetcode
//! tags: [array, hash-table]
//! ---
//! Body in **markdown**.
//! ```
//!
//! Missing metadata never fails a document. Absent keys fall back to empty
//! strings, `general`, and no tags; values of the wrong shape are logged and
//! replaced by the same defaults.

use crate::types::Category;
use gray_matter::Matter;
use gray_matter::engine::YAML;
use pulldown_cmark::{Options, Parser, html as md_html};
use serde_json::Value;

/// Metadata block of a post after defaults have been applied.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct FrontMatter {
    pub title: String,
    pub date: String,
    pub excerpt: String,
    pub category: Category,
    pub tags: Vec<String>,
}

/// A source file split into metadata and markdown body.
#[derive(Debug, Clone, PartialEq)]
pub struct Document {
    pub front_matter: FrontMatter,
    pub body: String,
}

/// Split `source` into front-matter and body.
pub fn parse_document(source: &str) -> Document {
    let matter = Matter::<YAML>::new();
    let parsed = matter.parse(source);

    let front_matter = match parsed.data.map(|data| data.deserialize::<Value>()) {
        None => FrontMatter::default(),
        Some(Ok(value)) => front_matter_from_value(&value),
        Some(Err(e)) => {
            tracing::warn!("unreadable front-matter, using defaults: {e}");
            FrontMatter::default()
        }
    };

    Document {
        front_matter,
        body: parsed.content,
    }
}

fn front_matter_from_value(value: &Value) -> FrontMatter {
    let Some(map) = value.as_object() else {
        if !value.is_null() {
            tracing::warn!("front-matter is not a mapping, using defaults");
        }
        return FrontMatter::default();
    };

    let text = |key: &str| map.get(key).and_then(scalar_text).unwrap_or_default();

    let category = match map.get("category").and_then(scalar_text) {
        None => Category::default(),
        Some(name) => Category::parse(name.trim().to_lowercase().as_str()).unwrap_or_else(|| {
            tracing::warn!("unknown category '{name}', filing under general");
            Category::default()
        }),
    };

    FrontMatter {
        title: text("title"),
        date: text("date"),
        excerpt: text("excerpt"),
        category,
        tags: map.get("tags").map(tags_from_value).unwrap_or_default(),
    }
}

/// Strings pass through; numbers and booleans use their literal spelling.
fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        _ => None,
    }
}

/// Accepts a YAML sequence or a comma-separated string.
fn tags_from_value(value: &Value) -> Vec<String> {
    match value {
        Value::Array(items) => items
            .iter()
            .filter_map(scalar_text)
            .map(|t| t.trim().to_string())
            .filter(|t| !t.is_empty())
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|t| !t.is_empty())
            .map(str::to_string)
            .collect(),
        _ => Vec::new(),
    }
}

/// Render a markdown body to HTML.
///
/// pulldown-cmark accepts any input; malformed constructs come out as text.
pub fn render_html(body: &str) -> String {
    let mut options = Options::empty();
    options.insert(Options::ENABLE_TABLES);
    options.insert(Options::ENABLE_FOOTNOTES);
    options.insert(Options::ENABLE_STRIKETHROUGH);
    options.insert(Options::ENABLE_TASKLISTS);

    let parser = Parser::new_ext(body, options);
    let mut html = String::with_capacity(body.len() * 3 / 2);
    md_html::push_html(&mut html, parser);
    html
}

/// Minutes needed to read `body`: `ceil(words / words_per_minute)`.
///
/// Zero for a body without words, at least one otherwise.
pub fn reading_time(body: &str, words_per_minute: u32) -> u32 {
    let words = body.split_whitespace().count() as u32;
    words.div_ceil(words_per_minute.max(1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_front_matter() {
        let doc = parse_document(
            "---\ntitle: Two Sum\ndate: 2024-03-01\nexcerpt: One pass\ncategory: leetcode\ntags: [array, hash-table]\n---\nBody text",
        );
        assert_eq!(doc.front_matter.title, "Two Sum");
        assert_eq!(doc.front_matter.date, "2024-03-01");
        assert_eq!(doc.front_matter.excerpt, "One pass");
        assert_eq!(doc.front_matter.category, Category::Leetcode);
        assert_eq!(doc.front_matter.tags, vec!["array", "hash-table"]);
        assert_eq!(doc.body.trim(), "Body text");
    }

    #[test]
    fn missing_fields_use_defaults() {
        let doc = parse_document("---\ntitle: Only a title\n---\nBody");
        assert_eq!(doc.front_matter.title, "Only a title");
        assert_eq!(doc.front_matter.date, "");
        assert_eq!(doc.front_matter.excerpt, "");
        assert_eq!(doc.front_matter.category, Category::General);
        assert!(doc.front_matter.tags.is_empty());
    }

    #[test]
    fn no_front_matter_is_not_an_error() {
        let doc = parse_document("# Just markdown\n\nNo metadata here.");
        assert_eq!(doc.front_matter, FrontMatter::default());
        assert!(doc.body.contains("Just markdown"));
    }

    #[test]
    fn unknown_category_falls_back_to_general() {
        let doc = parse_document("---\ncategory: rust\n---\nx");
        assert_eq!(doc.front_matter.category, Category::General);
    }

    #[test]
    fn category_is_case_insensitive() {
        let doc = parse_document("---\ncategory: React\n---\nx");
        assert_eq!(doc.front_matter.category, Category::React);
    }

    #[test]
    fn comma_separated_tags() {
        let doc = parse_document("---\ntags: \"node, express , \"\n---\nx");
        assert_eq!(doc.front_matter.tags, vec!["node", "express"]);
    }

    #[test]
    fn wrong_shapes_degrade_to_defaults() {
        let doc = parse_document("---\ntitle: [a, b]\ntags: 3\n---\nx");
        assert_eq!(doc.front_matter.title, "");
        assert!(doc.front_matter.tags.is_empty());
    }

    #[test]
    fn render_html_converts_markdown() {
        let html = render_html("This is **bold** and *italic*.");
        assert!(html.contains("<strong>bold</strong>"));
        assert!(html.contains("<em>italic</em>"));
    }

    #[test]
    fn render_html_supports_tables() {
        let html = render_html("| a | b |\n|---|---|\n| 1 | 2 |\n");
        assert!(html.contains("<table>"));
    }

    #[test]
    fn render_html_tolerates_malformed_input() {
        let html = render_html("**unclosed [link](\n```\nunterminated fence");
        assert!(!html.is_empty());
    }

    #[test]
    fn reading_time_rounds_up() {
        assert_eq!(reading_time("word", 200), 1);
        assert_eq!(reading_time(&"w ".repeat(200), 200), 1);
        assert_eq!(reading_time(&"w ".repeat(201), 200), 2);
        assert_eq!(reading_time(&"w\n".repeat(450), 200), 3);
    }

    #[test]
    fn reading_time_empty_body_is_zero() {
        assert_eq!(reading_time("", 200), 0);
        assert_eq!(reading_time("   \n\t ", 200), 0);
    }
}
