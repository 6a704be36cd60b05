//! Post repository: listing, lookup and category filtering over a
//! [`ContentStore`].
//!
//! Nothing is cached. Every call re-reads the sources, so results always
//! reflect the files on disk and repeated calls on unchanged files are
//! identical.
//!
//! ## Ordering
//!
//! Lists are sorted by the front-matter `date` string, newest first. Posts
//! sharing a date are ordered by slug ascending, so the order never depends on
//! directory enumeration or sort stability.

use crate::content::{ContentError, ContentStore};
use crate::markdown::{self, Document};
use crate::types::{Category, Post, PostMeta};
use std::cmp::Ordering;
use std::collections::BTreeSet;
use tracing::warn;

#[derive(Debug, Clone)]
pub struct PostRepository {
    store: ContentStore,
    words_per_minute: u32,
}

impl PostRepository {
    pub fn new(store: ContentStore, words_per_minute: u32) -> Self {
        Self {
            store,
            words_per_minute,
        }
    }

    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Metadata for every post, newest first.
    ///
    /// Only an unreadable content directory fails the listing. A single
    /// source that cannot be read is logged and left out.
    pub fn list_posts(&self) -> Result<Vec<PostMeta>, ContentError> {
        let mut posts = Vec::new();
        for entry in self.store.entries()? {
            let source = match self.store.read(&entry.slug) {
                Ok(source) => source,
                Err(e) => {
                    warn!(slug = %entry.slug, error = %e, "skipping unreadable post");
                    continue;
                }
            };
            let doc = markdown::parse_document(&source);
            posts.push(self.meta(&entry.slug, &doc));
        }
        sort_newest_first(&mut posts);
        Ok(posts)
    }

    /// Every slug in the store, for static route enumeration.
    pub fn list_slugs(&self) -> Result<BTreeSet<String>, ContentError> {
        Ok(self.store.entries()?.into_iter().map(|e| e.slug).collect())
    }

    /// Load and render a single post.
    pub fn get_post(&self, slug: &str) -> Result<Post, ContentError> {
        let source = self.store.read(slug)?;
        let doc = markdown::parse_document(&source);
        let content = markdown::render_html(&doc.body);
        Ok(Post {
            meta: self.meta(slug, &doc),
            content,
        })
    }

    /// Posts whose category is exactly `name`. Unknown names match nothing.
    pub fn list_posts_by_category(&self, name: &str) -> Result<Vec<PostMeta>, ContentError> {
        let Some(category) = Category::parse(name) else {
            return Ok(Vec::new());
        };
        Ok(self
            .list_posts()?
            .into_iter()
            .filter(|p| p.category == category)
            .collect())
    }

    /// Post count for every category, in [`Category::ALL`] order.
    pub fn category_counts(&self) -> Result<Vec<(Category, usize)>, ContentError> {
        let posts = self.list_posts()?;
        Ok(count_by_category(&posts))
    }

    /// `(newer, older)` neighbours of `slug` in list order.
    pub fn adjacent(
        &self,
        slug: &str,
    ) -> Result<(Option<PostMeta>, Option<PostMeta>), ContentError> {
        let posts = self.list_posts()?;
        Ok(adjacent_in(&posts, slug))
    }

    fn meta(&self, slug: &str, doc: &Document) -> PostMeta {
        let fm = &doc.front_matter;
        PostMeta {
            slug: slug.to_string(),
            title: fm.title.clone(),
            date: fm.date.clone(),
            excerpt: fm.excerpt.clone(),
            category: fm.category,
            tags: fm.tags.clone(),
            reading_time: markdown::reading_time(&doc.body, self.words_per_minute),
        }
    }
}

fn newest_first(a: &PostMeta, b: &PostMeta) -> Ordering {
    b.date.cmp(&a.date).then_with(|| a.slug.cmp(&b.slug))
}

/// Sort into listing order: newest date first, slug ascending on ties.
pub fn sort_newest_first(posts: &mut [PostMeta]) {
    posts.sort_by(newest_first);
}

/// Post count for every category over an already-loaded list.
pub fn count_by_category(posts: &[PostMeta]) -> Vec<(Category, usize)> {
    Category::ALL
        .into_iter()
        .map(|c| (c, posts.iter().filter(|p| p.category == c).count()))
        .collect()
}

/// `(newer, older)` neighbours of `slug` within a newest-first list.
pub fn adjacent_in(posts: &[PostMeta], slug: &str) -> (Option<PostMeta>, Option<PostMeta>) {
    match posts.iter().position(|p| p.slug == slug) {
        Some(idx) => (
            idx.checked_sub(1).and_then(|i| posts.get(i)).cloned(),
            posts.get(idx + 1).cloned(),
        ),
        None => (None, None),
    }
}
