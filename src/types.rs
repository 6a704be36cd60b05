//! Shared types passed between the content pipeline, the commit aggregator,
//! and the page generator.
//!
//! Everything here is plain data: immutable once produced and recomputed from
//! its source (a markdown file or the event feed) on every build.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Blog post category.
///
/// The set is closed: every lookup keyed by category (labels, icons, route
/// segments) is an exhaustive `match`, so adding a variant fails to compile
/// until each of them handles it.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Leetcode,
    Typescript,
    React,
    Nodejs,
    #[default]
    General,
}

impl Category {
    /// All categories in display order.
    pub const ALL: [Category; 5] = [
        Category::Leetcode,
        Category::Typescript,
        Category::React,
        Category::Nodejs,
        Category::General,
    ];

    /// Route segment and front-matter spelling.
    pub fn as_str(self) -> &'static str {
        match self {
            Category::Leetcode => "leetcode",
            Category::Typescript => "typescript",
            Category::React => "react",
            Category::Nodejs => "nodejs",
            Category::General => "general",
        }
    }

    /// Exact, case-sensitive lookup. Unknown names are `None`.
    pub fn parse(name: &str) -> Option<Category> {
        Category::ALL.into_iter().find(|c| c.as_str() == name)
    }

    /// Display name.
    pub fn label(self) -> &'static str {
        match self {
            Category::Leetcode => "LeetCode",
            Category::Typescript => "TypeScript",
            Category::React => "React",
            Category::Nodejs => "Node.js",
            Category::General => "General",
        }
    }

    /// Single glyph shown next to the category name.
    pub fn icon(self) -> &'static str {
        match self {
            Category::Leetcode => "⚡",
            Category::Typescript => "⌨",
            Category::React => "⚛",
            Category::Nodejs => "⬢",
            Category::General => "📖",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Metadata for one post, as listed on index pages.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostMeta {
    /// Filename stem; unique within the content store.
    pub slug: String,
    pub title: String,
    /// Date string exactly as written in front-matter (ISO-8601 expected).
    pub date: String,
    pub excerpt: String,
    pub category: Category,
    pub tags: Vec<String>,
    /// Minutes, derived from the body word count.
    pub reading_time: u32,
}

/// A fully rendered post.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Post {
    #[serde(flatten)]
    pub meta: PostMeta,
    /// Rendered HTML body.
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitAuthor {
    pub name: String,
    pub email: String,
    /// Authored timestamp (RFC 3339).
    pub date: String,
}

/// One commit taken from a push event in the public activity feed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommitRecord {
    pub sha: String,
    pub message: String,
    pub author: CommitAuthor,
    pub url: String,
}

/// Commits authored on a single UTC calendar day.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommitActivity {
    /// `YYYY-MM-DD`
    pub date: String,
    pub count: usize,
    pub commits: Vec<CommitRecord>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct CommitStats {
    pub total_commits: usize,
    pub unique_days: usize,
    /// `(label, count)`, descending by count, at most five entries.
    pub languages: Vec<(String, usize)>,
}
