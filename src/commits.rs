//! Commit activity from the public GitHub event feed.
//!
//! One request per build: the first page of
//! `/users/{username}/events/public`, filtered to push events and flattened
//! into at most `max_commits` [`CommitRecord`]s in feed order.
//!
//! The feed is best-effort. A transport error, a non-success status, or a
//! body that does not decode all produce an empty list, and the commits page
//! renders its empty state. Callers never see a feed error.
//!
//! ## Statistics
//!
//! [`compute_stats`] tags commits with technology labels by looking for fixed
//! substrings in the lower-cased message. It is a keyword heuristic, nothing
//! more: "tests" counts as TypeScript because it contains "ts".

use crate::config::GithubConfig;
use crate::types::{CommitActivity, CommitAuthor, CommitRecord, CommitStats};
use chrono::{DateTime, NaiveDate, TimeDelta, Utc};
use reqwest::header::{ACCEPT, CACHE_CONTROL};
use serde::Deserialize;
use std::collections::BTreeMap;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FeedError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("feed returned HTTP {0}")]
    Status(u16),
    #[error("undecodable feed body: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Marker substrings per label, checked in this order.
const LANGUAGE_MARKERS: &[(&str, &[&str])] = &[
    ("TypeScript", &["typescript", "ts"]),
    ("React", &["react"]),
    ("Node.js", &["node", "express"]),
    ("Algorithm", &["leetcode", "algorithm"]),
];

const TOP_LANGUAGES: usize = 5;

const USER_AGENT: &str = concat!("folio/", env!("CARGO_PKG_VERSION"));

#[derive(Debug, Clone)]
pub struct FeedClient {
    config: GithubConfig,
}

impl FeedClient {
    pub fn new(config: GithubConfig) -> Self {
        Self { config }
    }

    pub fn events_url(&self) -> String {
        format!(
            "{}/users/{}/events/public?per_page={}",
            self.config.api_base.trim_end_matches('/'),
            self.config.username,
            self.config.per_page
        )
    }

    /// Recent commits, newest feed entries first. Empty when the feed is
    /// unavailable.
    pub fn fetch_recent_commits(&self) -> Vec<CommitRecord> {
        match self.try_fetch() {
            Ok(mut commits) => {
                commits.truncate(self.config.max_commits);
                tracing::debug!("fetched {} commits from {}", commits.len(), self.events_url());
                commits
            }
            Err(e) => {
                tracing::warn!("commit feed unavailable, showing no activity: {e}");
                Vec::new()
            }
        }
    }

    fn try_fetch(&self) -> Result<Vec<CommitRecord>, FeedError> {
        let client = reqwest::blocking::Client::builder()
            .timeout(Duration::from_secs(self.config.timeout_secs))
            .user_agent(USER_AGENT)
            .build()?;

        let response = client
            .get(self.events_url())
            .header(ACCEPT, "application/vnd.github.v3+json")
            .header(
                CACHE_CONTROL,
                format!("max-age={}", self.config.revalidate_secs),
            )
            .send()?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status(status.as_u16()));
        }
        parse_events(&response.text()?)
    }
}

#[derive(Deserialize)]
struct FeedEvent {
    #[serde(rename = "type")]
    kind: String,
    #[serde(default)]
    created_at: String,
    #[serde(default)]
    payload: Option<FeedPayload>,
}

#[derive(Deserialize)]
struct FeedPayload {
    #[serde(default)]
    commits: Option<Vec<FeedCommit>>,
}

#[derive(Deserialize)]
struct FeedCommit {
    sha: String,
    message: String,
    #[serde(default)]
    author: FeedAuthor,
    #[serde(default)]
    url: String,
}

#[derive(Deserialize, Default)]
struct FeedAuthor {
    #[serde(default)]
    name: String,
    #[serde(default)]
    email: String,
    #[serde(default)]
    date: String,
}

/// Decode a feed page into commit records.
///
/// Keeps push events only and flattens their commits in feed order. Events
/// without a commit list contribute nothing.
pub fn parse_events(json: &str) -> Result<Vec<CommitRecord>, FeedError> {
    let events: Vec<FeedEvent> = serde_json::from_str(json)?;
    let mut records = Vec::new();
    for event in events.into_iter().filter(|e| e.kind == "PushEvent") {
        let Some(commits) = event.payload.and_then(|p| p.commits) else {
            continue;
        };
        for c in commits {
            // Push payloads omit the authored time; the push time stands in.
            let date = if c.author.date.is_empty() {
                event.created_at.clone()
            } else {
                c.author.date
            };
            records.push(CommitRecord {
                sha: c.sha,
                message: c.message,
                author: CommitAuthor {
                    name: c.author.name,
                    email: c.author.email,
                    date,
                },
                url: c.url,
            });
        }
    }
    Ok(records)
}

/// UTC calendar day (`YYYY-MM-DD`) of an authored timestamp.
///
/// RFC 3339 timestamps are converted to UTC first; anything else is cut at
/// the first `T`.
pub fn commit_day(timestamp: &str) -> String {
    match DateTime::parse_from_rfc3339(timestamp) {
        Ok(dt) => dt.with_timezone(&Utc).date_naive().to_string(),
        Err(_) => timestamp.split('T').next().unwrap_or_default().to_string(),
    }
}

/// Group commits by authored day, newest day first.
///
/// Commits keep their input order within a day; every input record lands in
/// exactly one group.
pub fn group_by_date(records: &[CommitRecord]) -> Vec<CommitActivity> {
    let mut days: BTreeMap<String, Vec<CommitRecord>> = BTreeMap::new();
    for record in records {
        days.entry(commit_day(&record.author.date))
            .or_default()
            .push(record.clone());
    }
    days.into_iter()
        .rev()
        .map(|(date, commits)| CommitActivity {
            date,
            count: commits.len(),
            commits,
        })
        .collect()
}

pub fn compute_stats(records: &[CommitRecord]) -> CommitStats {
    let unique_days = records
        .iter()
        .map(|r| commit_day(&r.author.date))
        .collect::<std::collections::HashSet<_>>()
        .len();

    // Insertion-ordered so the stable sort below keeps first-seen order on ties.
    let mut languages: Vec<(String, usize)> = Vec::new();
    for record in records {
        let message = record.message.to_lowercase();
        for (label, markers) in LANGUAGE_MARKERS {
            if markers.iter().any(|m| message.contains(*m)) {
                match languages.iter_mut().find(|(l, _)| l.as_str() == *label) {
                    Some((_, count)) => *count += 1,
                    None => languages.push((label.to_string(), 1)),
                }
            }
        }
    }
    languages.sort_by(|a, b| b.1.cmp(&a.1));
    languages.truncate(TOP_LANGUAGES);

    CommitStats {
        total_commits: records.len(),
        unique_days,
        languages,
    }
}

/// One cell of the contribution graph.
#[derive(Debug, Clone, PartialEq)]
pub struct CalendarDay {
    pub date: NaiveDate,
    pub count: usize,
    /// Intensity bucket 0-4.
    pub level: u8,
}

pub fn intensity_level(count: usize) -> u8 {
    match count {
        0 => 0,
        1..=2 => 1,
        3..=4 => 2,
        5..=6 => 3,
        _ => 4,
    }
}

/// `days` consecutive cells ending at `today`, oldest first.
pub fn contribution_calendar(
    activity: &[CommitActivity],
    today: NaiveDate,
    days: usize,
) -> Vec<CalendarDay> {
    let counts: BTreeMap<&str, usize> = activity
        .iter()
        .map(|a| (a.date.as_str(), a.count))
        .collect();

    (0..days)
        .rev()
        .map(|offset| {
            let date = today - TimeDelta::days(offset as i64);
            let count = counts
                .get(date.to_string().as_str())
                .copied()
                .unwrap_or(0);
            CalendarDay {
                date,
                count,
                level: intensity_level(count),
            }
        })
        .collect()
}
