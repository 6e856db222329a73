use reqwest::blocking::{Client, RequestBuilder, Response};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::error::{ReleaseNotesError, Result};
use crate::tracker::{Issue, ProjectVersion, Tracker};

/// Blocking Jira REST (v2) client authenticated with a personal access token
pub struct JiraClient {
    base_url: String,
    token: String,
    http: Client,
}

#[derive(Debug, Deserialize)]
struct Transitions {
    transitions: Vec<Transition>,
}

#[derive(Debug, Deserialize)]
struct Transition {
    id: String,
    name: String,
    #[serde(default)]
    to: Option<TransitionTarget>,
}

#[derive(Debug, Deserialize)]
struct TransitionTarget {
    name: String,
}

impl Transition {
    fn leads_to(&self, status: &str) -> bool {
        self.name.eq_ignore_ascii_case(status)
            || self
                .to
                .as_ref()
                .is_some_and(|to| to.name.eq_ignore_ascii_case(status))
    }
}

impl JiraClient {
    /// Create a client for the Jira instance at `base_url`
    pub fn new(base_url: impl Into<String>, token: impl Into<String>) -> Result<Self> {
        let http = Client::builder()
            .user_agent(concat!("jira-release-notes/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(JiraClient {
            base_url: base_url.into(),
            token: token.into(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/rest/api/2/{}", self.base_url.trim_end_matches('/'), path)
    }

    fn send(&self, request: RequestBuilder, what: &str) -> Result<Response> {
        let response = request.bearer_auth(&self.token).send()?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().unwrap_or_default();
        Err(ReleaseNotesError::tracker(format!(
            "{} returned {}: {}",
            what, status, body
        )))
    }
}

impl Tracker for JiraClient {
    fn get_issue(&self, key: &str) -> Result<Issue> {
        tracing::debug!(ticket = key, "fetching issue");
        let response = self.send(
            self.http.get(self.url(&format!("issue/{}", key))),
            &format!("GET issue {}", key),
        )?;
        Ok(response.json()?)
    }

    fn edit_issue(&self, key: &str, update: &Value) -> Result<()> {
        self.send(
            self.http
                .put(self.url(&format!("issue/{}", key)))
                .json(&json!({ "update": update })),
            &format!("PUT issue {}", key),
        )?;
        Ok(())
    }

    fn transition_issue(&self, key: &str, status: &str) -> Result<()> {
        let path = format!("issue/{}/transitions", key);
        let available: Transitions = self
            .send(self.http.get(self.url(&path)), &format!("GET transitions {}", key))?
            .json()?;

        let transition = available
            .transitions
            .iter()
            .find(|t| t.leads_to(status))
            .ok_or_else(|| {
                ReleaseNotesError::tracker(format!(
                    "No transition to '{}' available for {}",
                    status, key
                ))
            })?;

        self.send(
            self.http
                .post(self.url(&path))
                .json(&json!({ "transition": { "id": transition.id } })),
            &format!("POST transition {}", key),
        )?;
        Ok(())
    }

    fn add_project_version(&self, project: &str, name: &str) -> Result<()> {
        self.send(
            self.http
                .post(self.url("version"))
                .json(&json!({ "name": name, "project": project })),
            &format!("POST version {}", name),
        )?;
        Ok(())
    }

    fn get_project_versions(&self, project: &str) -> Result<Vec<ProjectVersion>> {
        let response = self.send(
            self.http
                .get(self.url(&format!("project/{}/versions", project))),
            &format!("GET versions {}", project),
        )?;
        Ok(response.json()?)
    }

    fn update_version(&self, id: &str, released: bool, release_date: &str) -> Result<()> {
        self.send(
            self.http
                .put(self.url(&format!("version/{}", id)))
                .json(&json!({ "released": released, "releaseDate": release_date })),
            &format!("PUT version {}", id),
        )?;
        Ok(())
    }
}
