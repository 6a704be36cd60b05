//! CLI output formatting for every command.
//!
//! # Information-First Display
//!
//! Output is **information-centric, not file-centric**. Each post leads with
//! its positional index and title; slug, date and category follow as
//! indented context lines. Generated pages are summarized per locale rather
//! than listed one per line.
//!
//! # Output Format
//!
//! ## Posts
//!
//! ```text
//! Posts
//! 001 LeetCode 1: Two Sum
//!     Slug: two-sum
//!     2024-03-01 · leetcode · 1 min
//!     Tags: array, hash-table
//! 002 (notes)
//!     Slug: notes
//!     undated · general · 1 min
//!
//! 2 posts (leetcode 1, general 1)
//! ```
//!
//! ## Commits
//!
//! ```text
//! Commits
//! 2024-05-02 (2)
//!     a1b2c3d fix typescript bug
//!     d4e5f6a update react component
//!
//! Tech stack
//!     TypeScript 1
//!     React 1
//!
//! 2 commits over 1 day
//! ```
//!
//! ## Generate
//!
//! ```text
//! zh → zh/ (12 pages)
//! en → en/ (12 pages)
//! Skipped broken-post
//!
//! Generated 26 pages for 2 locales, 4 posts, 1 asset
//! ```
//!
//! # Architecture
//!
//! Each command has a `format_*` function (returns `Vec<String>`) for
//! testability and a `print_*` wrapper that writes to stdout. Format
//! functions are pure: no I/O, no side effects.

use crate::commits;
use crate::generate::GenerateReport;
use crate::posts;
use crate::types::{CommitRecord, CommitStats, PostMeta};

/// Longest commit subject shown before truncation.
const SUBJECT_WIDTH: usize = 60;

// ============================================================================
// Shared helpers
// ============================================================================

/// Format a 1-based positional index as 3-digit zero-padded.
fn format_index(pos: usize) -> String {
    format!("{:0>3}", pos)
}

/// Return indentation string: 4 spaces per depth level.
fn indent(depth: usize) -> String {
    "    ".repeat(depth)
}

/// Untitled posts show their slug in parens; the slug is their identity.
fn post_line(index: usize, post: &PostMeta) -> String {
    if post.title.is_empty() {
        format!("{} ({})", format_index(index), post.slug)
    } else {
        format!("{} {}", format_index(index), post.title)
    }
}

/// Truncate text to `max` characters, appending `...` if truncated.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        text.to_string()
    } else {
        let head: String = text.chars().take(max).collect();
        format!("{head}...")
    }
}

fn plural(n: usize, word: &str) -> String {
    if n == 1 {
        format!("{n} {word}")
    } else {
        format!("{n} {word}s")
    }
}

// ============================================================================
// Posts
// ============================================================================

/// Format a post listing, in the order given.
pub fn format_posts_output(posts: &[PostMeta]) -> Vec<String> {
    let mut lines = vec!["Posts".to_string()];

    for (i, post) in posts.iter().enumerate() {
        lines.push(post_line(i + 1, post));
        lines.push(format!("{}Slug: {}", indent(1), post.slug));
        let date = if post.date.is_empty() {
            "undated"
        } else {
            post.date.as_str()
        };
        lines.push(format!(
            "{}{} · {} · {} min",
            indent(1),
            date,
            post.category,
            post.reading_time
        ));
        if !post.tags.is_empty() {
            lines.push(format!("{}Tags: {}", indent(1), post.tags.join(", ")));
        }
    }

    let breakdown: Vec<String> = posts::count_by_category(posts)
        .into_iter()
        .filter(|(_, n)| *n > 0)
        .map(|(c, n)| format!("{c} {n}"))
        .collect();
    lines.push(String::new());
    if breakdown.is_empty() {
        lines.push(plural(posts.len(), "post"));
    } else {
        lines.push(format!(
            "{} ({})",
            plural(posts.len(), "post"),
            breakdown.join(", ")
        ));
    }
    lines
}

pub fn print_posts_output(posts: &[PostMeta]) {
    for line in format_posts_output(posts) {
        println!("{}", line);
    }
}

// ============================================================================
// Commits
// ============================================================================

/// Format commits grouped by day, followed by the tech stack summary.
pub fn format_commits_output(records: &[CommitRecord], stats: &CommitStats) -> Vec<String> {
    if records.is_empty() {
        return vec!["No commits available".to_string()];
    }

    let mut lines = vec!["Commits".to_string()];
    for day in commits::group_by_date(records) {
        let label = if day.date.is_empty() {
            "undated"
        } else {
            day.date.as_str()
        };
        lines.push(format!("{} ({})", label, day.count));
        for commit in &day.commits {
            let sha: String = commit.sha.chars().take(7).collect();
            let subject = commit.message.lines().next().unwrap_or_default();
            lines.push(format!(
                "{}{} {}",
                indent(1),
                sha,
                truncate(subject, SUBJECT_WIDTH)
            ));
        }
    }

    if !stats.languages.is_empty() {
        lines.push(String::new());
        lines.push("Tech stack".to_string());
        for (label, count) in &stats.languages {
            lines.push(format!("{}{} {}", indent(1), label, count));
        }
    }

    lines.push(String::new());
    lines.push(format!(
        "{} over {}",
        plural(stats.total_commits, "commit"),
        plural(stats.unique_days, "day")
    ));
    lines
}

pub fn print_commits_output(records: &[CommitRecord], stats: &CommitStats) {
    for line in format_commits_output(records, stats) {
        println!("{}", line);
    }
}

// ============================================================================
// Generate
// ============================================================================

/// Format the build summary: pages per locale, skipped posts, totals.
pub fn format_generate_output(report: &GenerateReport) -> Vec<String> {
    let mut lines = Vec::new();

    for locale in &report.locales {
        let prefix = format!("{}/", locale.code());
        let count = report
            .pages
            .iter()
            .filter(|p| p.starts_with(locale.code()))
            .count();
        lines.push(format!(
            "{} \u{2192} {} ({})",
            locale.code(),
            prefix,
            plural(count, "page")
        ));
    }

    for slug in &report.skipped {
        lines.push(format!("Skipped {}", slug));
    }

    lines.push(String::new());
    lines.push(format!(
        "Generated {} for {}, {}, {}",
        plural(report.pages.len(), "page"),
        plural(report.locales.len(), "locale"),
        plural(report.posts.len(), "post"),
        plural(report.assets, "asset")
    ));
    lines
}

pub fn print_generate_output(report: &GenerateReport) {
    for line in format_generate_output(report) {
        println!("{}", line);
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::i18n::Locale;
    use crate::test_helpers::*;
    use crate::types::Category;
    use std::path::PathBuf;

    fn meta(slug: &str, title: &str, date: &str, category: Category) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: title.to_string(),
            date: date.to_string(),
            excerpt: String::new(),
            category,
            tags: Vec::new(),
            reading_time: 1,
        }
    }

    // =========================================================================
    // Helper tests
    // =========================================================================

    #[test]
    fn format_index_pads() {
        assert_eq!(format_index(1), "001");
        assert_eq!(format_index(42), "042");
        assert_eq!(format_index(100), "100");
    }

    #[test]
    fn truncate_counts_characters() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("修复类型错误", 2), "修复...");
    }

    #[test]
    fn plural_forms() {
        assert_eq!(plural(1, "post"), "1 post");
        assert_eq!(plural(0, "post"), "0 posts");
    }

    // =========================================================================
    // Posts
    // =========================================================================

    #[test]
    fn posts_output_lists_in_order_with_context() {
        let mut post = meta("two-sum", "Two Sum", "2024-03-01", Category::Leetcode);
        post.tags = vec!["array".to_string(), "hash-table".to_string()];
        let lines = format_posts_output(&[post, meta("notes", "", "", Category::General)]);
        assert_eq!(
            lines,
            vec![
                "Posts",
                "001 Two Sum",
                "    Slug: two-sum",
                "    2024-03-01 · leetcode · 1 min",
                "    Tags: array, hash-table",
                "002 (notes)",
                "    Slug: notes",
                "    undated · general · 1 min",
                "",
                "2 posts (leetcode 1, general 1)",
            ]
        );
    }

    #[test]
    fn posts_output_empty() {
        assert_eq!(format_posts_output(&[]), vec!["Posts", "", "0 posts"]);
    }

    // =========================================================================
    // Commits
    // =========================================================================

    #[test]
    fn commits_output_groups_by_day() {
        let records = vec![
            commit("a1b2c3d4", "fix typescript bug", "2024-05-02T10:00:00Z"),
            commit("d4e5f6a7", "update react component\n\nbody", "2024-05-02T09:00:00Z"),
            commit("0000000", "initial", "2024-05-01T09:00:00Z"),
        ];
        let stats = commits::compute_stats(&records);
        let lines = format_commits_output(&records, &stats);
        assert_eq!(lines[0], "Commits");
        assert_eq!(lines[1], "2024-05-02 (2)");
        assert_eq!(lines[2], "    a1b2c3d fix typescript bug");
        assert_eq!(lines[3], "    d4e5f6a update react component");
        assert_eq!(lines[4], "2024-05-01 (1)");
        assert!(lines.contains(&"    TypeScript 1".to_string()));
        assert_eq!(lines.last().unwrap(), "3 commits over 2 days");
    }

    #[test]
    fn commits_output_empty_feed() {
        let lines = format_commits_output(&[], &CommitStats::default());
        assert_eq!(lines, vec!["No commits available"]);
    }

    // =========================================================================
    // Generate
    // =========================================================================

    #[test]
    fn generate_output_summarizes_locales() {
        let report = GenerateReport {
            pages: vec![
                PathBuf::from("index.html"),
                PathBuf::from("zh/index.html"),
                PathBuf::from("zh/blog/index.html"),
                PathBuf::from("en/index.html"),
            ],
            posts: vec![meta("a", "A", "2024-01-01", Category::React)],
            skipped: vec!["broken".to_string()],
            assets: 1,
            commits: 0,
            locales: vec![Locale::Zh, Locale::En],
        };
        let lines = format_generate_output(&report);
        assert_eq!(lines[0], "zh \u{2192} zh/ (2 pages)");
        assert_eq!(lines[1], "en \u{2192} en/ (1 page)");
        assert_eq!(lines[2], "Skipped broken");
        assert_eq!(
            lines.last().unwrap(),
            "Generated 4 pages for 2 locales, 1 post, 1 asset"
        );
    }
}
