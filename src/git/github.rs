use reqwest::blocking::{Client, Response};
use reqwest::header::ACCEPT;
use serde::Deserialize;

use crate::domain::{CommitRecord, TagRef};
use crate::error::{ReleaseNotesError, Result};

const PAGE_SIZE: usize = 100;

/// Repository hosted on GitHub, read through the REST API
pub struct GithubRepository {
    api_url: String,
    owner: String,
    name: String,
    token: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct Comparison {
    #[serde(default)]
    total_commits: Option<usize>,
    commits: Vec<CompareCommit>,
}

#[derive(Debug, Deserialize)]
struct CompareCommit {
    sha: String,
    commit: CommitBody,
}

#[derive(Debug, Deserialize)]
struct CommitBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct GithubTag {
    name: String,
    commit: TagCommit,
}

#[derive(Debug, Deserialize)]
struct TagCommit {
    sha: String,
}

impl GithubRepository {
    pub fn new(
        api_url: impl Into<String>,
        owner: impl Into<String>,
        name: impl Into<String>,
        token: impl Into<String>,
    ) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("jira-release-notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(GithubRepository {
            api_url: api_url.into(),
            owner: owner.into(),
            name: name.into(),
            token: token.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!(
            "{}/repos/{}/{}/{}",
            self.api_url.trim_end_matches('/'),
            self.owner,
            self.name,
            path
        )
    }

    fn get(&self, url: &str) -> Result<Response> {
        let response = self
            .http
            .get(url)
            .header(ACCEPT, "application/vnd.github+json")
            .bearer_auth(&self.token)
            .send()?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(ReleaseNotesError::repository(format!(
            "GET {} returned {}: {}",
            url, status, body
        )))
    }
}

/// Whether a listing is exhausted after a page of `batch_len` items.
///
/// A short page always ends it; `total` (when the host reports one) ends
/// it as soon as that many items have been collected.
fn is_last_page(batch_len: usize, collected: usize, total: Option<usize>) -> bool {
    batch_len < PAGE_SIZE || total.is_some_and(|total| collected >= total)
}

impl super::Repository for GithubRepository {
    fn compare(&self, base: &str, head: &str) -> Result<Vec<CommitRecord>> {
        let mut commits = Vec::new();
        let mut page = 1;

        loop {
            let comparison: Comparison = self
                .get(&self.url(&format!(
                    "compare/{}...{}?per_page={}&page={}",
                    base, head, PAGE_SIZE, page
                )))?
                .json()?;
            let batch_len = comparison.commits.len();

            commits.extend(
                comparison
                    .commits
                    .into_iter()
                    .map(|c| CommitRecord::new(c.sha, c.commit.message)),
            );

            if is_last_page(batch_len, commits.len(), comparison.total_commits) {
                break;
            }
            page += 1;
        }

        tracing::debug!(repo = %self.name, count = commits.len(), "compared {}...{}", base, head);
        Ok(commits)
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        let mut tags = Vec::new();
        let mut page = 1;

        loop {
            let batch: Vec<GithubTag> = self
                .get(&self.url(&format!("tags?per_page={}&page={}", PAGE_SIZE, page)))?
                .json()?;
            let batch_len = batch.len();

            tags.extend(batch.into_iter().map(|t| TagRef::new(t.name, t.commit.sha)));

            if is_last_page(batch_len, tags.len(), None) {
                break;
            }
            page += 1;
        }

        tracing::debug!(repo = %self.name, count = tags.len(), "listed tags");
        Ok(tags)
    }
}
