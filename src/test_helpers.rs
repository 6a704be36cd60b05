//! Shared test utilities for the folio test suite.
//!
//! Provides fixture setup, small record builders, and a one-shot HTTP server
//! that stands in for the commit feed.
//!
//! # Usage
//!
//! ```rust
//! use crate::test_helpers::*;
//!
//! let tmp = setup_fixtures();
//! let repo = fixture_repo(tmp.path());
//! assert!(slugs(&repo.list_posts().unwrap()).contains(&"two-sum"));
//!
//! let base = serve_once(200, &push_event_json(3));
//! let commits = FeedClient::new(feed_config(&base)).fetch_recent_commits();
//! assert_eq!(commits.len(), 3);
//! ```

use std::io::{Read, Write};
use std::net::TcpListener;
use std::path::Path;
use std::thread;
use tempfile::TempDir;

use crate::config::GithubConfig;
use crate::content::ContentStore;
use crate::posts::PostRepository;
use crate::types::{CommitAuthor, CommitRecord, PostMeta};

// =========================================================================
// Fixture setup
// =========================================================================

/// Copy `fixtures/content/` to a temp directory and return it.
///
/// Tests get an isolated copy they can mutate without affecting other tests
/// or the source fixtures.
pub fn setup_fixtures() -> TempDir {
    let tmp = TempDir::new().unwrap();
    let fixtures = Path::new(env!("CARGO_MANIFEST_DIR")).join("fixtures/content");
    copy_dir_recursive(&fixtures, tmp.path()).unwrap();
    tmp
}

fn copy_dir_recursive(src: &Path, dst: &Path) -> std::io::Result<()> {
    for entry in std::fs::read_dir(src)? {
        let entry = entry?;
        let src_path = entry.path();
        let dst_path = dst.join(entry.file_name());

        if src_path.is_dir() {
            std::fs::create_dir_all(&dst_path)?;
            copy_dir_recursive(&src_path, &dst_path)?;
        } else {
            std::fs::copy(&src_path, &dst_path)?;
        }
    }
    Ok(())
}

/// Repository over the `posts/` directory of a fixture copy.
pub fn fixture_repo(root: &Path) -> PostRepository {
    PostRepository::new(ContentStore::new(root.join("posts")), 200)
}

// =========================================================================
// Extractors and builders
// =========================================================================

pub fn slugs(posts: &[PostMeta]) -> Vec<&str> {
    posts.iter().map(|p| p.slug.as_str()).collect()
}

pub fn commit(sha: &str, message: &str, date: &str) -> CommitRecord {
    CommitRecord {
        sha: sha.to_string(),
        message: message.to_string(),
        author: CommitAuthor {
            name: "Tester".to_string(),
            email: "tester@example.com".to_string(),
            date: date.to_string(),
        },
        url: format!("https://api.github.com/repos/tester/site/commits/{sha}"),
    }
}

/// Feed settings pointing at `base` with a short timeout.
pub fn feed_config(base: &str) -> GithubConfig {
    GithubConfig {
        username: "tester".to_string(),
        api_base: base.to_string(),
        per_page: 100,
        max_commits: 50,
        revalidate_secs: 3600,
        timeout_secs: 5,
    }
}

/// A feed page holding one push event with `n` commits, `sha0..sha{n-1}`,
/// followed by a non-push event that must be ignored.
pub fn push_event_json(n: usize) -> String {
    let commits: Vec<serde_json::Value> = (0..n)
        .map(|i| {
            serde_json::json!({
                "sha": format!("sha{i}"),
                "message": format!("commit {i}"),
                "author": { "name": "Tester", "email": "tester@example.com" },
                "url": format!("https://api.github.com/repos/tester/site/commits/sha{i}"),
            })
        })
        .collect();
    serde_json::json!([
        {
            "type": "PushEvent",
            "created_at": "2024-05-01T10:00:00Z",
            "payload": { "commits": commits },
        },
        {
            "type": "WatchEvent",
            "created_at": "2024-05-01T09:00:00Z",
            "payload": {},
        },
    ])
    .to_string()
}

// =========================================================================
// Feed stub
// =========================================================================

/// Serve exactly one HTTP response on a random local port.
///
/// Returns the base URL to use as `api_base`. The request itself is read and
/// discarded; any path gets the same response.
pub fn serve_once(status: u16, body: &str) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let response = format!(
        "HTTP/1.1 {status} {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{body}",
        reason_phrase(status),
        body.len(),
    );

    thread::spawn(move || {
        if let Ok((mut stream, _)) = listener.accept() {
            let mut buf = [0u8; 4096];
            let mut request = Vec::new();
            while let Ok(n) = stream.read(&mut buf) {
                if n == 0 {
                    break;
                }
                request.extend_from_slice(&buf[..n]);
                if request.windows(4).any(|w| w == b"\r\n\r\n") {
                    break;
                }
            }
            let _ = stream.write_all(response.as_bytes());
            let _ = stream.flush();
        }
    });

    format!("http://{addr}")
}

fn reason_phrase(status: u16) -> &'static str {
    match status {
        200 => "OK",
        404 => "Not Found",
        500 => "Internal Server Error",
        _ => "Unknown",
    }
}
