//! Issue tracker abstraction layer
//!
//! The note builder only talks to the tracker through the [Tracker] trait.
//! Implementations:
//!
//! - [jira::JiraClient]: blocking client for the Jira REST API (v2)
//! - [mock::MockTracker]: in-memory tracker recording every mutation

pub mod jira;
pub mod mock;

pub use jira::JiraClient;
pub use mock::{MockTracker, TrackerCall};

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::Result;

/// Ticket payload as returned by the tracker
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Issue {
    pub fields: IssueFields,
}

/// The ticket fields used for release notes. Custom fields are kept by id,
/// since their ids differ between tracker instances.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct IssueFields {
    pub summary: String,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub components: Option<Vec<Component>>,

    #[serde(flatten)]
    pub custom: Map<String, Value>,
}

impl IssueFields {
    /// Raw value of a custom field, `None` when absent or null
    pub fn custom_field(&self, id: &str) -> Option<&Value> {
        self.custom.get(id).filter(|value| !value.is_null())
    }

    /// Component display names in tracker order
    pub fn component_names(&self) -> Vec<String> {
        self.components
            .iter()
            .flatten()
            .map(|component| component.name.clone())
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Component {
    pub name: String,
}

/// A release version defined in a tracker project
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ProjectVersion {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub released: bool,
}

/// Operations the release-notes workflows need from an issue tracker
///
/// All implementors must be `Send + Sync`. Every method is a single blocking
/// call; retries and timeouts are the implementation's concern.
pub trait Tracker: Send + Sync {
    /// Fetch one ticket by key
    fn get_issue(&self, key: &str) -> Result<Issue>;

    /// Apply a field update document (Jira `update` syntax) to a ticket
    fn edit_issue(&self, key: &str, update: &Value) -> Result<()>;

    /// Move a ticket to the named status
    fn transition_issue(&self, key: &str, status: &str) -> Result<()>;

    /// Create a version named `name` in `project`
    fn add_project_version(&self, project: &str, name: &str) -> Result<()>;

    /// List all versions of a project
    fn get_project_versions(&self, project: &str) -> Result<Vec<ProjectVersion>>;

    /// Set the released flag and release date (`YYYY-MM-DD`) of a version
    fn update_version(&self, id: &str, released: bool, release_date: &str) -> Result<()>;
}

/// Update document adding `release` to a ticket's fix versions
pub fn fix_version_update(release: &str) -> Value {
    serde_json::json!({
        "fixVersions": [{ "add": { "name": release } }]
    })
}
