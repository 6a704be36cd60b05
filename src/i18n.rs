//! Locales and UI message catalogs.
//!
//! Every page tree is prefixed with its locale (`/zh/blog/...`, `/en/blog/...`).
//! Switching locale is a plain link to the same route under another prefix,
//! so already-rendered content never needs re-fetching.

use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Locale {
    Zh,
    En,
}

impl Locale {
    pub fn code(self) -> &'static str {
        match self {
            Locale::Zh => "zh",
            Locale::En => "en",
        }
    }

    /// The locale's own name for itself, shown in the language switcher.
    pub fn native_name(self) -> &'static str {
        match self {
            Locale::Zh => "中文",
            Locale::En => "English",
        }
    }

    /// BCP 47 tag for the `<html lang>` attribute.
    pub fn html_lang(self) -> &'static str {
        match self {
            Locale::Zh => "zh-CN",
            Locale::En => "en",
        }
    }

    pub fn from_code(code: &str) -> Option<Locale> {
        match code {
            "zh" => Some(Locale::Zh),
            "en" => Some(Locale::En),
            _ => None,
        }
    }

    pub fn messages(self) -> &'static Messages {
        match self {
            Locale::Zh => &ZH,
            Locale::En => &EN,
        }
    }
}

impl fmt::Display for Locale {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// Rewrite a locale-prefixed route for another locale.
///
/// The `/{from}` prefix is removed only when it is a whole path segment, then
/// `/{to}` is prepended. A bare `/{from}` maps to `/{to}/`.
///
/// ```
/// use folio::i18n::{switch_locale_path, Locale};
/// assert_eq!(switch_locale_path("/zh/blog/hello/", Locale::Zh, Locale::En), "/en/blog/hello/");
/// assert_eq!(switch_locale_path("/zh", Locale::Zh, Locale::En), "/en/");
/// ```
pub fn switch_locale_path(path: &str, from: Locale, to: Locale) -> String {
    let prefix = format!("/{}", from.code());
    let rest = match path.strip_prefix(&prefix) {
        Some(rest) if rest.is_empty() || rest.starts_with('/') => rest,
        _ => path,
    };
    let rest = if rest.is_empty() { "/" } else { rest };
    if rest.starts_with('/') {
        format!("/{}{}", to.code(), rest)
    } else {
        format!("/{}/{}", to.code(), rest)
    }
}

/// UI strings for one locale.
#[derive(Debug)]
pub struct Messages {
    pub nav_home: &'static str,
    pub nav_blog: &'static str,
    pub nav_commits: &'static str,
    pub home_subtitle: &'static str,
    pub home_start_reading: &'static str,
    pub home_view_code: &'static str,
    pub home_leetcode: &'static str,
    pub home_leetcode_desc: &'static str,
    pub home_tech_learning: &'static str,
    pub home_tech_learning_desc: &'static str,
    pub home_code_commits: &'static str,
    pub home_code_commits_desc: &'static str,
    pub home_stats_articles: &'static str,
    pub footer: &'static str,
    pub blog_title: &'static str,
    pub blog_subtitle: &'static str,
    pub blog_all: &'static str,
    pub blog_reading_time: &'static str,
    pub blog_read_more: &'static str,
    pub blog_empty: &'static str,
    pub blog_thanks: &'static str,
    pub blog_view_more: &'static str,
    pub blog_newer: &'static str,
    pub blog_older: &'static str,
    pub commits_title: &'static str,
    pub commits_subtitle: &'static str,
    pub commits_total: &'static str,
    pub commits_active_days: &'static str,
    pub commits_tech_stack: &'static str,
    pub commits_tech_distribution: &'static str,
    pub commits_contribution_graph: &'static str,
    pub commits_recent: &'static str,
    pub commits_less: &'static str,
    pub commits_more: &'static str,
    pub commits_empty: &'static str,
    pub theme_light: &'static str,
    pub theme_dark: &'static str,
    pub theme_system: &'static str,
    pub not_found_title: &'static str,
    pub not_found_body: &'static str,
}

static ZH: Messages = Messages {
    nav_home: "首页",
    nav_blog: "博客",
    nav_commits: "提交",
    home_subtitle: "记录算法练习、前端与 Node.js 的学习笔记",
    home_start_reading: "开始阅读",
    home_view_code: "查看代码",
    home_leetcode: "LeetCode",
    home_leetcode_desc: "算法题解与思路整理",
    home_tech_learning: "技术学习",
    home_tech_learning_desc: "TypeScript、React 与 Node.js 实践",
    home_code_commits: "代码提交",
    home_code_commits_desc: "最近的 GitHub 提交记录",
    home_stats_articles: "篇文章",
    footer: "用心记录每一次成长",
    blog_title: "技术博客",
    blog_subtitle: "分享学习与实践中的点滴",
    blog_all: "全部",
    blog_reading_time: "分钟阅读",
    blog_read_more: "阅读全文",
    blog_empty: "暂无文章",
    blog_thanks: "感谢阅读！",
    blog_view_more: "查看更多文章",
    blog_newer: "较新",
    blog_older: "较早",
    commits_title: "代码 提交",
    commits_subtitle: "最近在 GitHub 上的公开活动",
    commits_total: "总提交数",
    commits_active_days: "活跃天数",
    commits_tech_stack: "技术栈",
    commits_tech_distribution: "技术栈分布",
    commits_contribution_graph: "贡献图",
    commits_recent: "最近提交",
    commits_less: "少",
    commits_more: "多",
    commits_empty: "暂时无法获取提交记录",
    theme_light: "浅色",
    theme_dark: "深色",
    theme_system: "跟随系统",
    not_found_title: "页面不存在",
    not_found_body: "你要找的内容不存在或已被移除。",
};

static EN: Messages = Messages {
    nav_home: "Home",
    nav_blog: "Blog",
    nav_commits: "Commits",
    home_subtitle: "Notes on algorithms, front-end work and Node.js",
    home_start_reading: "Start reading",
    home_view_code: "View code",
    home_leetcode: "LeetCode",
    home_leetcode_desc: "Problem write-ups and solution walkthroughs",
    home_tech_learning: "Tech learning",
    home_tech_learning_desc: "TypeScript, React and Node.js in practice",
    home_code_commits: "Code commits",
    home_code_commits_desc: "Recent public GitHub activity",
    home_stats_articles: "articles",
    footer: "Writing down every step of the way",
    blog_title: "Tech Blog",
    blog_subtitle: "Things learned while building things",
    blog_all: "All",
    blog_reading_time: "min read",
    blog_read_more: "Read more",
    blog_empty: "No posts yet",
    blog_thanks: "Thanks for reading!",
    blog_view_more: "More posts",
    blog_newer: "Newer",
    blog_older: "Older",
    commits_title: "Code Commits",
    commits_subtitle: "Recent public activity on GitHub",
    commits_total: "Total commits",
    commits_active_days: "Active days",
    commits_tech_stack: "Tech stack",
    commits_tech_distribution: "Tech distribution",
    commits_contribution_graph: "Contribution graph",
    commits_recent: "Recent commits",
    commits_less: "Less",
    commits_more: "More",
    commits_empty: "Commit activity is unavailable right now",
    theme_light: "Light",
    theme_dark: "Dark",
    theme_system: "System",
    not_found_title: "Page not found",
    not_found_body: "The page you are looking for does not exist or was removed.",
};
