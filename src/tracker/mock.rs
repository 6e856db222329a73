use std::collections::{HashMap, HashSet};
use std::sync::Mutex;

use serde_json::Value;

use crate::error::{ReleaseNotesError, Result};
use crate::tracker::{Issue, ProjectVersion, Tracker};

/// A mutation received by [MockTracker]
#[derive(Debug, Clone, PartialEq)]
pub enum TrackerCall {
    EditIssue { key: String, update: Value },
    TransitionIssue { key: String, status: String },
    AddProjectVersion { project: String, name: String },
    UpdateVersion { id: String, released: bool, release_date: String },
}

/// Mock tracker for testing without a Jira instance
pub struct MockTracker {
    issues: HashMap<String, Issue>,
    versions: Vec<ProjectVersion>,
    failing_edits: HashSet<String>,
    failing_transitions: HashSet<String>,
    fail_add_version: bool,
    lookups: Mutex<Vec<String>>,
    calls: Mutex<Vec<TrackerCall>>,
}

impl MockTracker {
    /// Create a new empty mock tracker
    pub fn new() -> Self {
        MockTracker {
            issues: HashMap::new(),
            versions: Vec::new(),
            failing_edits: HashSet::new(),
            failing_transitions: HashSet::new(),
            fail_add_version: false,
            lookups: Mutex::new(Vec::new()),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Add a ticket
    pub fn add_issue(&mut self, key: impl Into<String>, issue: Issue) {
        self.issues.insert(key.into(), issue);
    }

    /// Add a ticket from a raw JSON payload
    pub fn add_issue_json(&mut self, key: impl Into<String>, payload: Value) -> Result<()> {
        let issue: Issue = serde_json::from_value(payload)?;
        self.add_issue(key, issue);
        Ok(())
    }

    /// Add a project version
    pub fn add_version(&mut self, id: impl Into<String>, name: impl Into<String>) {
        self.versions.push(ProjectVersion {
            id: id.into(),
            name: name.into(),
            released: false,
        });
    }

    /// Make `edit_issue` fail for a ticket
    pub fn fail_edit(&mut self, key: impl Into<String>) {
        self.failing_edits.insert(key.into());
    }

    /// Make `transition_issue` fail for a ticket
    pub fn fail_transition(&mut self, key: impl Into<String>) {
        self.failing_transitions.insert(key.into());
    }

    /// Make `add_project_version` fail
    pub fn fail_add_version(&mut self) {
        self.fail_add_version = true;
    }

    /// Keys passed to `get_issue`, in call order
    pub fn lookups(&self) -> Vec<String> {
        self.lookups.lock().map(|l| l.clone()).unwrap_or_default()
    }

    /// Mutations received, in call order
    pub fn calls(&self) -> Vec<TrackerCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: TrackerCall) {
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(call);
        }
    }
}

impl Default for MockTracker {
    fn default() -> Self {
        Self::new()
    }
}

impl Tracker for MockTracker {
    fn get_issue(&self, key: &str) -> Result<Issue> {
        if let Ok(mut lookups) = self.lookups.lock() {
            lookups.push(key.to_string());
        }
        self.issues
            .get(key)
            .cloned()
            .ok_or_else(|| ReleaseNotesError::tracker(format!("Issue does not exist: {}", key)))
    }

    fn edit_issue(&self, key: &str, update: &Value) -> Result<()> {
        self.record(TrackerCall::EditIssue {
            key: key.to_string(),
            update: update.clone(),
        });
        if self.failing_edits.contains(key) {
            return Err(ReleaseNotesError::tracker(format!("Cannot edit {}", key)));
        }
        Ok(())
    }

    fn transition_issue(&self, key: &str, status: &str) -> Result<()> {
        self.record(TrackerCall::TransitionIssue {
            key: key.to_string(),
            status: status.to_string(),
        });
        if self.failing_transitions.contains(key) {
            return Err(ReleaseNotesError::tracker(format!(
                "No transition to '{}' available for {}",
                status, key
            )));
        }
        Ok(())
    }

    fn add_project_version(&self, project: &str, name: &str) -> Result<()> {
        self.record(TrackerCall::AddProjectVersion {
            project: project.to_string(),
            name: name.to_string(),
        });
        if self.fail_add_version {
            return Err(ReleaseNotesError::tracker("Version already exists"));
        }
        Ok(())
    }

    fn get_project_versions(&self, _project: &str) -> Result<Vec<ProjectVersion>> {
        Ok(self.versions.clone())
    }

    fn update_version(&self, id: &str, released: bool, release_date: &str) -> Result<()> {
        self.record(TrackerCall::UpdateVersion {
            id: id.to_string(),
            released,
            release_date: release_date.to_string(),
        });
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_mock_tracker_issue_lookup() {
        let mut tracker = MockTracker::new();
        tracker
            .add_issue_json("AEA-1", json!({"fields": {"summary": "One"}}))
            .unwrap();

        assert_eq!(tracker.get_issue("AEA-1").unwrap().fields.summary, "One");
        assert!(tracker.get_issue("AEA-2").is_err());
        assert_eq!(tracker.lookups(), vec!["AEA-1", "AEA-2"]);
    }

    #[test]
    fn test_mock_tracker_records_mutations() {
        let mut tracker = MockTracker::new();
        tracker.fail_transition("AEA-1");

        tracker.edit_issue("AEA-1", &json!({})).unwrap();
        assert!(tracker.transition_issue("AEA-1", "Done").is_err());

        assert_eq!(tracker.calls().len(), 2);
    }

    #[test]
    fn test_mock_tracker_default() {
        let tracker = MockTracker::default();
        assert!(tracker.get_project_versions("AEA").unwrap().is_empty());
        assert!(tracker.calls().is_empty());
    }
}
