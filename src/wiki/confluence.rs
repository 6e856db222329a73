use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ReleaseNotesError, Result};
use crate::wiki::Wiki;

/// Blocking Confluence REST client authenticated with a personal access token
pub struct ConfluenceClient {
    base_url: String,
    token: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct PageVersion {
    version: VersionNumber,
}

#[derive(Debug, Deserialize)]
struct VersionNumber {
    number: u64,
}

/// Body in Confluence storage representation
fn storage(body: &str) -> Value {
    json!({ "storage": { "value": body, "representation": "storage" } })
}

impl ConfluenceClient {
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("jira-release-notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(ConfluenceClient {
            base_url: base_url.into(),
            token: token.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request.bearer_auth(&self.token).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(ReleaseNotesError::wiki(format!(
            "{} returned {}: {}",
            what, status, body
        )))
    }
}

impl Wiki for ConfluenceClient {
    fn create_page(&self, parent_id: &str, title: &str, body: &str, space: &str) -> Result<()> {
        tracing::info!(parent_id, title, space, "creating page");
        self.send(
            self.http.post(self.url("content")).json(&json!({
                "type": "page",
                "title": title,
                "space": { "key": space },
                "ancestors": [{ "id": parent_id }],
                "body": storage(body),
            })),
            "POST content",
        )?;
        Ok(())
    }

    fn update_page(&self, page_id: &str, title: &str, body: &str) -> Result<()> {
        let path = format!("content/{}", page_id);
        let current: PageVersion = self
            .send(
                self.http
                    .get(self.url(&path))
                    .query(&[("expand", "version")]),
                &format!("GET content {}", page_id),
            )?
            .json()?;

        tracing::info!(page_id, title, version = current.version.number + 1, "updating page");
        self.send(
            self.http.put(self.url(&path)).json(&json!({
                "id": page_id,
                "type": "page",
                "title": title,
                "version": { "number": current.version.number + 1 },
                "body": storage(body),
            })),
            &format!("PUT content {}", page_id),
        )?;
        Ok(())
    }
}
