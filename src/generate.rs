//! HTML site generation.
//!
//! Turns the post repository and the commit feed into a static, localized
//! site. Every supported locale gets its own tree; the root only holds the
//! shared stylesheet, copied assets, a redirect and the 404 page.
//!
//! ## Output Structure
//!
//! ```text
//! dist/
//! ├── index.html                      # Redirect to the default locale
//! ├── 404.html                        # Not-found page (default locale)
//! ├── style.css                       # Color variables + static styles
//! ├── favicon.svg                     # Content assets (copied)
//! ├── zh/
//! │   ├── index.html                  # Home
//! │   ├── blog/
//! │   │   ├── index.html              # All posts + category filter
//! │   │   ├── category/react/index.html
//! │   │   └── two-sum/index.html      # Post
//! │   └── commits/index.html          # Feed stats and contribution graph
//! └── en/
//!     └── ...
//! ```
//!
//! ## Theme
//!
//! `static/theme.js` is inlined into every `<head>` so the stored theme is
//! applied before first paint. The build-time theme becomes the default the
//! script falls back to when the visitor has stored nothing; an explicit
//! build-time choice is also written as `data-theme` so pages render in it
//! without JavaScript.
//!
//! ## HTML Generation
//!
//! Uses [maud](https://maud.lambda.xyz/) for compile-time HTML templating.
//! Templates are type-safe Rust code with automatic XSS escaping. Post pages
//! are rendered in parallel on the rayon pool.

use crate::commits::{self, CalendarDay};
use crate::config::{self, ConfigError, SiteConfig};
use crate::content::{ContentError, ContentStore};
use crate::i18n::{self, Locale, Messages};
use crate::posts::{self, PostRepository};
use crate::preferences::Theme;
use crate::types::{Category, CommitRecord, CommitStats, Post, PostMeta};
use chrono::{Datelike, NaiveDate};
use maud::{DOCTYPE, Markup, PreEscaped, html};
use rayon::prelude::*;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;
use walkdir::WalkDir;

#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
    #[error("content error: {0}")]
    Content(#[from] ContentError),
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
}

const CSS_STATIC: &str = include_str!("../static/style.css");
const THEME_JS: &str = include_str!("../static/theme.js");

/// Commits listed on the commits page.
const RECENT_COMMITS: usize = 20;
/// Cells in the contribution graph.
const CALENDAR_DAYS: usize = 365;
/// Tags shown on a post card before collapsing into `+N`.
const CARD_TAGS: usize = 3;

/// Everything a build reads.
#[derive(Debug)]
pub struct SiteInputs<'a> {
    pub config: &'a SiteConfig,
    /// Content root holding the posts and assets directories.
    pub source: &'a Path,
    pub commits: &'a [CommitRecord],
    /// Initial theme for visitors with no stored preference.
    pub theme: Theme,
    /// Last day of the contribution graph.
    pub today: NaiveDate,
}

/// What a build wrote.
#[derive(Debug, Default)]
pub struct GenerateReport {
    /// Pages relative to the output directory, in write order.
    pub pages: Vec<PathBuf>,
    /// Published posts, newest first.
    pub posts: Vec<PostMeta>,
    /// Slugs that failed to load and got no page.
    pub skipped: Vec<String>,
    pub assets: usize,
    pub commits: usize,
    pub locales: Vec<Locale>,
}

/// Build-wide values shared by every page.
struct Site<'a> {
    config: &'a SiteConfig,
    theme: Theme,
    today: NaiveDate,
}

/// One page being rendered: the locale and its own route.
struct PageContext<'a> {
    site: &'a Site<'a>,
    locale: Locale,
    /// Root-relative URL of the page, e.g. `/en/blog/`.
    route: String,
}

impl PageContext<'_> {
    fn t(&self) -> &'static Messages {
        self.locale.messages()
    }

    fn href(&self, rest: &str) -> String {
        locale_href(self.locale, rest)
    }
}

pub fn generate(
    inputs: &SiteInputs<'_>,
    output_dir: &Path,
) -> Result<GenerateReport, GenerateError> {
    let config = inputs.config;
    config.validate()?;

    let repo = PostRepository::new(
        ContentStore::new(inputs.source.join(&config.content.posts_dir)),
        config.content.words_per_minute,
    );
    let (loaded, skipped) = load_posts(&repo)?;
    let mut listing: Vec<PostMeta> = loaded.iter().map(|p| p.meta.clone()).collect();
    posts::sort_newest_first(&mut listing);
    let counts = posts::count_by_category(&listing);

    let stats = commits::compute_stats(inputs.commits);
    let activity = commits::group_by_date(inputs.commits);
    let calendar = commits::contribution_calendar(&activity, inputs.today, CALENDAR_DAYS);

    fs::create_dir_all(output_dir)?;
    let mut report = GenerateReport {
        skipped,
        commits: inputs.commits.len(),
        locales: config.site.locales.clone(),
        ..Default::default()
    };

    let css = format!("{}\n\n{}", config::generate_color_css(&config.colors), CSS_STATIC);
    fs::write(output_dir.join("style.css"), css)?;
    report.assets = copy_assets(&inputs.source.join(&config.content.assets_dir), output_dir)?;

    let site = Site {
        config,
        theme: inputs.theme,
        today: inputs.today,
    };
    let site = &site;
    let default_locale = config.site.default_locale;

    write_page(
        output_dir,
        "/",
        render_redirect(&locale_href(default_locale, "")),
        &mut report,
    )?;
    let ctx = PageContext {
        site,
        locale: default_locale,
        route: locale_href(default_locale, ""),
    };
    write_page(output_dir, "/404.html", render_not_found(&ctx), &mut report)?;

    for &locale in &config.site.locales {
        let page = |rest: &str| PageContext {
            site,
            locale,
            route: locale_href(locale, rest),
        };

        let ctx = page("");
        write_page(
            output_dir,
            &ctx.route,
            render_home(&ctx, &listing, &stats),
            &mut report,
        )?;

        let ctx = page("blog/");
        write_page(
            output_dir,
            &ctx.route,
            render_blog_index(&ctx, &listing, &counts, None),
            &mut report,
        )?;

        for &(category, _) in &counts {
            let ctx = page(&category_rest(category));
            let filtered: Vec<PostMeta> = listing
                .iter()
                .filter(|p| p.category == category)
                .cloned()
                .collect();
            write_page(
                output_dir,
                &ctx.route,
                render_blog_index(&ctx, &filtered, &counts, Some(category)),
                &mut report,
            )?;
        }

        let ctx = page("commits/");
        write_page(
            output_dir,
            &ctx.route,
            render_commits(&ctx, inputs.commits, &stats, &calendar),
            &mut report,
        )?;
    }

    let listing_ref = &listing;
    let rendered: Vec<(String, Markup)> = loaded
        .par_iter()
        .flat_map_iter(|post| {
            let (newer, older) = posts::adjacent_in(listing_ref, &post.meta.slug);
            config.site.locales.iter().map(move |&locale| {
                let ctx = PageContext {
                    site,
                    locale,
                    route: locale_href(locale, &post_rest(&post.meta.slug)),
                };
                let markup = render_post(&ctx, post, newer.as_ref(), older.as_ref());
                (ctx.route, markup)
            })
        })
        .collect();
    for (route, markup) in rendered {
        write_page(output_dir, &route, markup, &mut report)?;
    }

    report.posts = listing;
    Ok(report)
}

/// Load every post in parallel. A post that fails to load is logged and
/// skipped; only an unreadable content directory fails the build.
fn load_posts(repo: &PostRepository) -> Result<(Vec<Post>, Vec<String>), ContentError> {
    let slugs: Vec<String> = repo.list_slugs()?.into_iter().collect();
    let results: Vec<(String, Result<Post, ContentError>)> = slugs
        .into_par_iter()
        .map(|slug| {
            let result = repo.get_post(&slug);
            (slug, result)
        })
        .collect();

    let mut loaded = Vec::new();
    let mut skipped = Vec::new();
    for (slug, result) in results {
        match result {
            Ok(post) => loaded.push(post),
            Err(e) => {
                tracing::error!("skipping post {slug}: {e}");
                skipped.push(slug);
            }
        }
    }
    Ok((loaded, skipped))
}

/// Copy the assets directory into the output root. Returns the file count.
fn copy_assets(assets_dir: &Path, output_dir: &Path) -> Result<usize, GenerateError> {
    if !assets_dir.is_dir() {
        return Ok(0);
    }
    let mut copied = 0;
    for entry in WalkDir::new(assets_dir).min_depth(1) {
        let entry = entry.map_err(io::Error::from)?;
        let Ok(rel) = entry.path().strip_prefix(assets_dir) else {
            continue;
        };
        let dest = output_dir.join(rel);
        if entry.file_type().is_dir() {
            fs::create_dir_all(&dest)?;
        } else {
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(entry.path(), &dest)?;
            copied += 1;
        }
    }
    Ok(copied)
}

fn write_page(
    output_dir: &Path,
    route: &str,
    markup: Markup,
    report: &mut GenerateReport,
) -> io::Result<()> {
    let rel = page_file(route);
    let path = output_dir.join(&rel);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    fs::write(&path, markup.into_string())?;
    report.pages.push(rel);
    Ok(())
}

/// Output file for a route: directory routes get an `index.html`.
fn page_file(route: &str) -> PathBuf {
    let trimmed = route.trim_matches('/');
    if route.ends_with('/') {
        Path::new(trimmed).join("index.html")
    } else {
        PathBuf::from(trimmed)
    }
}

/// Home matches only itself; sections match everything below them.
fn is_current(route: &str, href: &str) -> bool {
    if href.matches('/').count() <= 2 {
        route == href
    } else {
        route.starts_with(href)
    }
}

fn locale_href(locale: Locale, rest: &str) -> String {
    format!("/{}/{}", locale.code(), rest)
}

fn category_rest(category: Category) -> String {
    format!("blog/category/{}/", category.as_str())
}

fn post_rest(slug: &str) -> String {
    format!("blog/{slug}/")
}

// ============================================================================
// HTML Components
// ============================================================================

/// Renders the base HTML document structure
fn base_document(ctx: &PageContext, title: Option<&str>, content: Markup) -> Markup {
    let site = &ctx.site.config.site;
    let explicit = match ctx.site.theme {
        Theme::System => None,
        theme => Some(theme.as_str()),
    };
    let base_url = site.base_url.trim_end_matches('/');

    html! {
        (DOCTYPE)
        html lang=(ctx.locale.html_lang()) data-theme=[explicit] data-theme-default=(ctx.site.theme.as_str()) {
            head {
                meta charset="UTF-8";
                meta name="viewport" content="width=device-width, initial-scale=1.0";
                meta name="author" content=(site.author);
                title {
                    @if let Some(title) = title {
                        (title) " | "
                    }
                    (site.title)
                }
                @if !base_url.is_empty() {
                    link rel="canonical" href={ (base_url) (ctx.route) };
                }
                @for &locale in &site.locales {
                    @if locale != ctx.locale {
                        link rel="alternate" hreflang=(locale.html_lang()) href=(i18n::switch_locale_path(&ctx.route, ctx.locale, locale));
                    }
                }
                link rel="stylesheet" href="/style.css";
                script { (PreEscaped(THEME_JS)) }
            }
            body {
                (site_header(ctx))
                main.container {
                    (content)
                }
                (site_footer(ctx))
            }
        }
    }
}

/// Renders the site header: brand, navigation, theme toggle and languages
fn site_header(ctx: &PageContext) -> Markup {
    let t = ctx.t();
    let links = [
        (t.nav_home, ""),
        (t.nav_blog, "blog/"),
        (t.nav_commits, "commits/"),
    ];

    html! {
        header.site-header {
            a.brand href=(ctx.href("")) { (ctx.site.config.site.title) }
            nav.site-nav {
                @for (label, rest) in links {
                    @let href = ctx.href(rest);
                    a class=[is_current(&ctx.route, &href).then_some("current")] href=(href) { (label) }
                }
                button.theme-toggle type="button" data-theme-toggle
                    aria-label={ (t.theme_light) " / " (t.theme_dark) " / " (t.theme_system) } {
                    "◐"
                }
                (language_switcher(ctx))
            }
        }
    }
}

/// Links to the current page in every other supported locale
fn language_switcher(ctx: &PageContext) -> Markup {
    html! {
        span.lang-switch {
            @for &locale in &ctx.site.config.site.locales {
                @if locale == ctx.locale {
                    a href=(ctx.route) aria-current="page" { (locale.native_name()) }
                } @else {
                    " "
                    a href=(i18n::switch_locale_path(&ctx.route, ctx.locale, locale)) hreflang=(locale.html_lang()) {
                        (locale.native_name())
                    }
                }
            }
        }
    }
}

fn site_footer(ctx: &PageContext) -> Markup {
    html! {
        footer.site-footer {
            p {
                "© " (ctx.site.today.year()) " " (ctx.site.config.site.author)
                " · " (ctx.t().footer)
            }
        }
    }
}

fn tag_list(tags: &[String], limit: usize) -> Markup {
    let hidden = tags.len().saturating_sub(limit);
    html! {
        @if !tags.is_empty() {
            ul.tags {
                @for tag in tags.iter().take(limit) {
                    li.tag { "#" (tag) }
                }
                @if hidden > 0 {
                    li.tag { "+" (hidden) }
                }
            }
        }
    }
}

fn category_badge(ctx: &PageContext, category: Category) -> Markup {
    html! {
        a.category href=(ctx.href(&category_rest(category))) {
            (category.icon()) " " (category.label())
        }
    }
}

fn post_meta_line(ctx: &PageContext, post: &PostMeta) -> Markup {
    html! {
        div.post-meta {
            @if !post.date.is_empty() {
                time datetime=(post.date) { (post.date) }
            }
            span { (post.reading_time) " " (ctx.t().blog_reading_time) }
        }
    }
}

fn post_card(ctx: &PageContext, post: &PostMeta) -> Markup {
    let href = ctx.href(&post_rest(&post.slug));
    html! {
        article.card {
            (category_badge(ctx, post.category))
            h3 { a href=(href) { (post.title) } }
            @if !post.excerpt.is_empty() {
                p.muted { (post.excerpt) }
            }
            (tag_list(&post.tags, CARD_TAGS))
            (post_meta_line(ctx, post))
            a href=(href) { (ctx.t().blog_read_more) " →" }
        }
    }
}

fn stat_card(value: usize, label: &str) -> Markup {
    html! {
        div.card {
            div.stat-value { (value) }
            div.muted { (label) }
        }
    }
}

// ============================================================================
// Page Renderers
// ============================================================================

fn render_home(ctx: &PageContext, posts: &[PostMeta], stats: &CommitStats) -> Markup {
    let t = ctx.t();
    let config = ctx.site.config;
    let features = [
        (
            Category::Leetcode.icon(),
            t.home_leetcode,
            t.home_leetcode_desc,
            ctx.href(&category_rest(Category::Leetcode)),
        ),
        (
            Category::General.icon(),
            t.home_tech_learning,
            t.home_tech_learning_desc,
            ctx.href("blog/"),
        ),
        (
            "◆",
            t.home_code_commits,
            t.home_code_commits_desc,
            ctx.href("commits/"),
        ),
    ];

    let content = html! {
        section.hero {
            h1 { (config.site.title) }
            p.muted { (t.home_subtitle) }
            div.cta {
                a.button href=(ctx.href("blog/")) { (t.home_start_reading) }
                a.button href=(config.github.profile_url()) target="_blank" rel="noopener" {
                    (t.home_view_code)
                }
            }
        }
        section.card-grid {
            @for (icon, title, desc, href) in &features {
                a.card href=(href) {
                    div.stat-value { (icon) }
                    h3 { (title) }
                    p.muted { (desc) }
                }
            }
        }
        section.stats {
            (stat_card(posts.len(), t.home_stats_articles))
            (stat_card(stats.total_commits, t.commits_total))
            (stat_card(stats.unique_days, t.commits_active_days))
        }
        @if !posts.is_empty() {
            section {
                h2 { (t.blog_title) }
                div.card-grid {
                    @for post in posts.iter().take(3) {
                        (post_card(ctx, post))
                    }
                }
            }
        }
    };

    base_document(ctx, None, content)
}

/// Renders the blog index, or one category of it when `active` is set
fn render_blog_index(
    ctx: &PageContext,
    posts: &[PostMeta],
    counts: &[(Category, usize)],
    active: Option<Category>,
) -> Markup {
    let t = ctx.t();
    let total: usize = counts.iter().map(|(_, n)| n).sum();

    let content = html! {
        header.post-header {
            h1 { (t.blog_title) }
            p.muted { (t.blog_subtitle) }
        }
        nav.category-filter {
            a class=[active.is_none().then_some("current")] href=(ctx.href("blog/")) {
                (t.blog_all) span.count { (total) }
            }
            @for &(category, count) in counts {
                a class=[(active == Some(category)).then_some("current")] href=(ctx.href(&category_rest(category))) {
                    (category.icon()) " " (category.label()) span.count { (count) }
                }
            }
        }
        @if posts.is_empty() {
            p.empty-state { (t.blog_empty) }
        } @else {
            div.card-grid {
                @for post in posts {
                    (post_card(ctx, post))
                }
            }
        }
    };

    let title = match active {
        Some(category) => format!("{} · {}", category.label(), t.blog_title),
        None => t.blog_title.to_string(),
    };
    base_document(ctx, Some(title.as_str()), content)
}

fn render_post(
    ctx: &PageContext,
    post: &Post,
    newer: Option<&PostMeta>,
    older: Option<&PostMeta>,
) -> Markup {
    let t = ctx.t();
    let meta = &post.meta;

    let content = html! {
        article {
            header.post-header {
                (category_badge(ctx, meta.category))
                h1 { (meta.title) }
                @if !meta.excerpt.is_empty() {
                    p.muted { (meta.excerpt) }
                }
                (post_meta_line(ctx, meta))
                (tag_list(&meta.tags, usize::MAX))
            }
            div.post-body {
                (PreEscaped(post.content.as_str()))
            }
            footer.post-footer {
                p { (t.blog_thanks) }
                a.button href=(ctx.href("blog/")) { (t.blog_view_more) }
                nav.adjacent {
                    @if let Some(newer) = newer {
                        a.newer href=(ctx.href(&post_rest(&newer.slug))) {
                            "← " (t.blog_newer) ": " (newer.title)
                        }
                    } @else {
                        span {}
                    }
                    @if let Some(older) = older {
                        a.older href=(ctx.href(&post_rest(&older.slug))) {
                            (t.blog_older) ": " (older.title) " →"
                        }
                    }
                }
            }
        }
    };

    base_document(ctx, Some(meta.title.as_str()), content)
}

fn render_commits(
    ctx: &PageContext,
    records: &[CommitRecord],
    stats: &CommitStats,
    calendar: &[CalendarDay],
) -> Markup {
    let t = ctx.t();

    let content = html! {
        header.post-header {
            h1 { (t.commits_title) }
            p.muted { (t.commits_subtitle) }
        }
        @if records.is_empty() {
            p.empty-state { (t.commits_empty) }
        } @else {
            section.stats {
                (stat_card(stats.total_commits, t.commits_total))
                (stat_card(stats.unique_days, t.commits_active_days))
                (stat_card(stats.languages.len(), t.commits_tech_stack))
            }
            @if !stats.languages.is_empty() {
                section.card {
                    h2 { (t.commits_tech_distribution) }
                    @for (label, count) in &stats.languages {
                        @let pct = percent(*count, stats.total_commits);
                        div.language {
                            div.post-meta {
                                span { (label) }
                                span { (count) " (" (pct) "%)" }
                            }
                            div.bar {
                                div.bar-fill style={ "width: " (pct) "%" } {}
                            }
                        }
                    }
                }
            }
            section.card {
                h2 { (t.commits_contribution_graph) }
                div.calendar {
                    @for day in calendar {
                        div.calendar-cell data-level=(day.level) title={ (day.date.to_string()) ": " (day.count) } {}
                    }
                }
                div.post-meta {
                    span { (t.commits_less) }
                    span { (t.commits_more) }
                }
            }
            section {
                h2 { (t.commits_recent) }
                ul.commit-list {
                    @for commit in records.iter().take(RECENT_COMMITS) {
                        @let day = commits::commit_day(&commit.author.date);
                        li.card {
                            div { (first_line(&commit.message)) }
                            div.post-meta {
                                a.commit-sha href=(commit_page_url(&commit.url)) target="_blank" rel="noopener" {
                                    (short_sha(&commit.sha))
                                }
                                @if !commit.author.name.is_empty() {
                                    span { (commit.author.name) }
                                }
                                @if !day.is_empty() {
                                    time datetime=(day) { (day) }
                                }
                            }
                        }
                    }
                }
            }
        }
    };

    base_document(ctx, Some(t.commits_title), content)
}

fn render_not_found(ctx: &PageContext) -> Markup {
    let t = ctx.t();
    let content = html! {
        section.empty-state {
            h1 { "404" }
            h2 { (t.not_found_title) }
            p { (t.not_found_body) }
            a.button href=(ctx.href("")) { (t.nav_home) }
        }
    };
    base_document(ctx, Some(t.not_found_title), content)
}

/// Root page forwarding to the default locale.
fn render_redirect(target: &str) -> Markup {
    html! {
        (DOCTYPE)
        html {
            head {
                meta charset="UTF-8";
                meta http-equiv="refresh" content={ "0; url=" (target) };
                link rel="canonical" href=(target);
                title { "Redirecting" }
            }
            body {
                a href=(target) { (target) }
            }
        }
    }
}

fn percent(part: usize, total: usize) -> usize {
    if total == 0 {
        0
    } else {
        (part * 100 + total / 2) / total
    }
}

fn first_line(message: &str) -> &str {
    message.lines().next().unwrap_or_default()
}

fn short_sha(sha: &str) -> &str {
    sha.get(..7).unwrap_or(sha)
}

/// Browser URL for a commit. Feed entries carry the API resource URL.
fn commit_page_url(api_url: &str) -> String {
    api_url
        .replacen("https://api.github.com/repos/", "https://github.com/", 1)
        .replacen("/commits/", "/commit/", 1)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_helpers::*;
    use tempfile::TempDir;

    fn site(config: &SiteConfig, theme: Theme) -> Site<'_> {
        Site {
            config,
            theme,
            today: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        }
    }

    fn ctx<'a>(site: &'a Site<'a>, locale: Locale, rest: &str) -> PageContext<'a> {
        PageContext {
            site,
            locale,
            route: locale_href(locale, rest),
        }
    }

    fn meta(slug: &str, category: Category, tags: &[&str]) -> PostMeta {
        PostMeta {
            slug: slug.to_string(),
            title: format!("Title {slug}"),
            date: "2024-05-01".to_string(),
            excerpt: String::new(),
            category,
            tags: tags.iter().map(|t| t.to_string()).collect(),
            reading_time: 2,
        }
    }

    fn build(commits: &[CommitRecord]) -> (TempDir, TempDir, GenerateReport) {
        let content = setup_fixtures();
        let out = TempDir::new().unwrap();
        let config = config::load_config(content.path()).unwrap();
        let inputs = SiteInputs {
            config: &config,
            source: content.path(),
            commits,
            theme: Theme::System,
            today: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        };
        let report = generate(&inputs, out.path()).unwrap();
        (content, out, report)
    }

    #[test]
    fn page_file_maps_routes() {
        assert_eq!(page_file("/"), PathBuf::from("index.html"));
        assert_eq!(page_file("/zh/blog/"), PathBuf::from("zh/blog/index.html"));
        assert_eq!(page_file("/404.html"), PathBuf::from("404.html"));
    }

    #[test]
    fn base_document_includes_doctype_and_lang() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let doc =
            base_document(&ctx(&site, Locale::En, ""), None, html! { p { "x" } }).into_string();
        assert!(doc.starts_with("<!DOCTYPE html>"));
        assert!(doc.contains(r#"lang="en""#));
        assert!(doc.contains(r#"<link rel="stylesheet" href="/style.css">"#));
    }

    #[test]
    fn system_theme_leaves_data_theme_unset() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let doc = base_document(&ctx(&site, Locale::Zh, ""), None, html! {}).into_string();
        assert!(!doc.contains(r#"data-theme="#));
        assert!(doc.contains(r#"data-theme-default="system""#));
    }

    #[test]
    fn explicit_theme_sets_data_theme() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::Dark);
        let doc = base_document(&ctx(&site, Locale::Zh, ""), None, html! {}).into_string();
        assert!(doc.contains(r#"data-theme="dark""#));
    }

    #[test]
    fn header_links_to_same_page_in_other_locale() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let header = site_header(&ctx(&site, Locale::Zh, "blog/hello/")).into_string();
        assert!(header.contains(r#"href="/en/blog/hello/""#));
        assert!(header.contains(r#"aria-current="page""#));
        assert!(header.contains("data-theme-toggle"));
    }

    #[test]
    fn header_marks_current_section() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let header = site_header(&ctx(&site, Locale::En, "blog/hello/")).into_string();
        assert!(header.contains(r#"<a class="current" href="/en/blog/">Blog</a>"#));
        assert!(!header.contains(r#"<a class="current" href="/en/">"#));
    }

    #[test]
    fn tag_list_collapses_overflow() {
        let tags: Vec<String> = ["a", "b", "c", "d", "e"].iter().map(|s| s.to_string()).collect();
        let html = tag_list(&tags, 3).into_string();
        assert!(html.contains("#c"));
        assert!(!html.contains("#d"));
        assert!(html.contains("+2"));
        assert!(tag_list(&[], 3).into_string().is_empty());
    }

    #[test]
    fn blog_index_marks_active_category() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let posts = vec![meta("a", Category::React, &[])];
        let counts = posts::count_by_category(&posts);
        let html = render_blog_index(
            &ctx(&site, Locale::En, "blog/category/react/"),
            &posts,
            &counts,
            Some(Category::React),
        )
        .into_string();
        assert!(html.contains(r#"class="current" href="/en/blog/category/react/""#));
        assert!(html.contains(r#"href="/en/blog/a/""#));
    }

    #[test]
    fn blog_index_empty_state() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let counts = posts::count_by_category(&[]);
        let html =
            render_blog_index(&ctx(&site, Locale::En, "blog/"), &[], &counts, None).into_string();
        assert!(html.contains(Locale::En.messages().blog_empty));
    }

    #[test]
    fn post_page_links_neighbours() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let post = Post {
            meta: meta("mid", Category::Nodejs, &["node"]),
            content: "<p>Body</p>".to_string(),
        };
        let newer = meta("new", Category::React, &[]);
        let html = render_post(&ctx(&site, Locale::En, "blog/mid/"), &post, Some(&newer), None)
            .into_string();
        assert!(html.contains("<p>Body</p>"));
        assert!(html.contains(r#"href="/en/blog/new/""#));
        assert!(!html.contains("class=\"older\""));
    }

    #[test]
    fn post_page_escapes_metadata() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let mut m = meta("x", Category::General, &[]);
        m.title = "<script>alert(1)</script>".to_string();
        let post = Post {
            meta: m,
            content: String::new(),
        };
        let html = render_post(&ctx(&site, Locale::En, "blog/x/"), &post, None, None).into_string();
        assert!(html.contains("&lt;script&gt;alert(1)&lt;/script&gt;"));
    }

    #[test]
    fn commits_page_empty_state() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let html = render_commits(
            &ctx(&site, Locale::Zh, "commits/"),
            &[],
            &CommitStats::default(),
            &[],
        )
        .into_string();
        assert!(html.contains(Locale::Zh.messages().commits_empty));
        assert!(!html.contains("calendar"));
    }

    #[test]
    fn commits_page_limits_recent_list() {
        let config = SiteConfig::default();
        let site = site(&config, Theme::System);
        let records: Vec<CommitRecord> = (0..25)
            .map(|i| commit(&format!("sha{i:04}xyz"), "react work", "2024-05-01T10:00:00Z"))
            .collect();
        let stats = commits::compute_stats(&records);
        let html = render_commits(&ctx(&site, Locale::En, "commits/"), &records, &stats, &[])
            .into_string();
        assert_eq!(html.matches("class=\"commit-sha\"").count(), RECENT_COMMITS);
        assert!(html.contains("React"));
        assert!(html.contains("width: 100%"));
    }

    #[test]
    fn commit_page_url_maps_api_urls() {
        assert_eq!(
            commit_page_url("https://api.github.com/repos/me/site/commits/abc"),
            "https://github.com/me/site/commit/abc"
        );
        assert_eq!(commit_page_url("https://example.com/x"), "https://example.com/x");
    }

    #[test]
    fn percent_rounds_and_handles_zero() {
        assert_eq!(percent(1, 3), 33);
        assert_eq!(percent(2, 3), 67);
        assert_eq!(percent(0, 0), 0);
    }

    #[test]
    fn generate_writes_every_locale_tree() {
        let (_content, out, report) = build(&[]);
        for locale in ["zh", "en"] {
            assert!(out.path().join(locale).join("index.html").exists());
            assert!(out.path().join(locale).join("blog/index.html").exists());
            assert!(out.path().join(locale).join("commits/index.html").exists());
            for category in Category::ALL {
                assert!(
                    out.path()
                        .join(locale)
                        .join(format!("blog/category/{category}/index.html"))
                        .exists()
                );
            }
            for post in &report.posts {
                assert!(
                    out.path()
                        .join(locale)
                        .join(format!("blog/{}/index.html", post.slug))
                        .exists()
                );
            }
        }
        assert!(out.path().join("index.html").exists());
        assert!(out.path().join("404.html").exists());
        assert!(report.skipped.is_empty());
    }

    #[test]
    fn generate_writes_css_and_copies_assets() {
        let (_content, out, report) = build(&[]);
        let css = fs::read_to_string(out.path().join("style.css")).unwrap();
        assert!(css.contains("--color-bg"));
        assert!(css.contains(".site-header"));
        assert!(out.path().join("favicon.svg").exists());
        assert_eq!(report.assets, 1);
    }

    #[test]
    fn generate_redirects_root_to_default_locale() {
        let (_content, out, _report) = build(&[]);
        let root = fs::read_to_string(out.path().join("index.html")).unwrap();
        assert!(root.contains("url=/zh/"));
    }

    #[test]
    fn generate_renders_commit_stats() {
        let records = vec![
            commit("aaaaaaa1", "fix typescript bug", "2024-05-09T10:00:00Z"),
            commit("bbbbbbb2", "update react component", "2024-05-10T10:00:00Z"),
        ];
        let (_content, out, report) = build(&records);
        assert_eq!(report.commits, 2);
        let page = fs::read_to_string(out.path().join("en/commits/index.html")).unwrap();
        assert!(page.contains("TypeScript"));
        assert!(page.contains("aaaaaaa"));
        assert_eq!(page.matches("calendar-cell").count(), CALENDAR_DAYS);
    }

    #[test]
    fn generate_fails_on_missing_posts_dir() {
        let content = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let config = SiteConfig::default();
        let inputs = SiteInputs {
            config: &config,
            source: content.path(),
            commits: &[],
            theme: Theme::System,
            today: NaiveDate::from_ymd_opt(2024, 5, 10).unwrap(),
        };
        assert!(matches!(
            generate(&inputs, out.path()),
            Err(GenerateError::Content(ContentError::ContentSource { .. }))
        ));
    }
}
