//! # Folio
//!
//! A localized personal blog and portfolio, built as a static site. Posts are
//! markdown files with YAML front-matter; a public GitHub activity feed
//! supplies the commit statistics page.
//!
//! # Architecture
//!
//! ```text
//! content/posts/*.md ─→ ContentStore ─→ PostRepository ─┐
//!                                                      ├─→ generate ─→ dist/{zh,en}/…
//! GitHub public events ─→ FeedClient ─→ commit stats ───┘
//! ```
//!
//! Nothing is cached between builds. Each run re-reads every source, and a
//! feed that cannot be reached simply produces an empty commits page.
//!
//! # Module Map
//!
//! | Module | Role |
//! |--------|------|
//! | [`content`] | Enumerates and reads `<slug>.md` sources |
//! | [`markdown`] | Front-matter parsing, markdown to HTML, reading time |
//! | [`posts`] | Listing, lookup, category filtering and neighbours |
//! | [`commits`] | Feed client, day grouping, tech-stack stats, contribution calendar |
//! | [`preferences`] | Theme preference (`light`, `dark`, `system`) over injected storage |
//! | [`i18n`] | Locales, UI message catalogs, locale path switching |
//! | [`generate`] | Renders the localized HTML site using Maud |
//! | [`config`] | `config.toml` loading, validation, merging, and CSS generation |
//! | [`types`] | Data shared across modules (`PostMeta`, `CommitRecord`, …) |
//! | [`output`] | CLI output formatting |
//!
//! # Design Decisions
//!
//! ## Closed Category Set
//!
//! Categories are an enum rather than free-form strings. Labels, icons and
//! route segments are exhaustive matches, so a new category cannot ship
//! half-wired. Unknown front-matter values file under `general`.
//!
//! ## Degrading Feed
//!
//! The commit feed is a best-effort decoration. Transport failures, non-2xx
//! statuses and undecodable bodies are logged and turned into an empty list;
//! they never fail a build.
//!
//! ## Injected Preference Storage
//!
//! The theme store owns no global state. It is generic over
//! [`preferences::PreferenceStorage`], a file-backed store in the CLI and an
//! in-memory one in tests. The generated pages carry the same logic in a
//! small inline script against `localStorage`.

pub mod commits;
pub mod config;
pub mod content;
pub mod generate;
pub mod i18n;
pub mod markdown;
pub mod output;
pub mod posts;
pub mod preferences;
pub mod types;

#[cfg(test)]
pub(crate) mod test_helpers;
