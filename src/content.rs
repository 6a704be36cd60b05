//! Markdown content store.
//!
//! A flat directory of `<slug>.md` files. The store only enumerates and reads
//! sources; parsing and rendering live in [`crate::markdown`].

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContentError {
    #[error("content directory unreadable: {path}: {source}")]
    ContentSource {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("post not found: {0}")]
    NotFound(String),
    #[error("failed to render post {slug}: {reason}")]
    Render { slug: String, reason: String },
    #[error("IO error: {0}")]
    Io(#[from] io::Error),
}

/// One markdown source discovered in the store.
#[derive(Debug, Clone, PartialEq)]
pub struct SourceEntry {
    pub slug: String,
    pub path: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ContentStore {
    dir: PathBuf,
}

impl ContentStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// All `.md` files directly inside the store, sorted by file name.
    ///
    /// Only entries that [`read`](Self::read) can open are listed: the
    /// extension must be exactly `md` and the stem must be a valid slug.
    pub fn entries(&self) -> Result<Vec<SourceEntry>, ContentError> {
        let read_dir = fs::read_dir(&self.dir).map_err(|source| ContentError::ContentSource {
            path: self.dir.clone(),
            source,
        })?;

        let mut entries: Vec<SourceEntry> = read_dir
            .filter_map(|e| e.ok())
            .map(|e| e.path())
            .filter(|p| p.is_file() && is_markdown(p))
            .filter_map(|path| {
                let slug = path.file_stem()?.to_str()?.to_string();
                is_valid_slug(&slug).then_some(SourceEntry { slug, path })
            })
            .collect();

        entries.sort_by(|a, b| a.path.cmp(&b.path));
        Ok(entries)
    }

    /// Read the raw source for `slug`.
    ///
    /// Slugs that could address anything outside the store are reported as
    /// not found.
    pub fn read(&self, slug: &str) -> Result<String, ContentError> {
        if !is_valid_slug(slug) {
            return Err(ContentError::NotFound(slug.to_string()));
        }
        let path = self.dir.join(format!("{slug}.md"));
        match fs::read_to_string(&path) {
            Ok(source) => Ok(source),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                Err(ContentError::NotFound(slug.to_string()))
            }
            Err(e) => Err(ContentError::Io(e)),
        }
    }
}

fn is_markdown(path: &Path) -> bool {
    path.extension().is_some_and(|e| e == "md")
}

fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug != "."
        && slug != ".."
        && !slug.contains(['/', '\\'])
        && !slug.contains('\0')
}
