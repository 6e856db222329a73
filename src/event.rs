//! Invocation events for the two workflows.
//!
//! Events arrive as loosely typed JSON. Shape problems (missing fields,
//! wrong types) become [ReleaseNotesError::InvalidEvent] before any
//! external service is contacted.

use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::domain::to_boolean;
use crate::error::{ReleaseNotesError, Result};
use crate::notes::NotesRequest;

fn default_release_candidate() -> Value {
    Value::String("false".to_string())
}

/// Event asking for release notes between two tags
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReleaseNotesEvent {
    pub current_tag: String,
    pub target_tag: String,
    pub repo_name: String,
    pub target_environment: String,
    pub product_name: String,
    pub release_notes_page_id: String,
    pub release_notes_page_title: String,

    /// String boolean, coerced when the run starts
    #[serde(default = "default_release_candidate")]
    pub create_release_candidate: Value,

    #[serde(default)]
    pub release_prefix: Option<String>,

    #[serde(default, rename = "releaseURL")]
    pub release_url: Option<String>,
}

impl ReleaseNotesEvent {
    /// Validate and decode a raw event
    pub fn from_value(raw: Value) -> Result<Self> {
        decode(raw)
    }

    /// Name of the tracker version created for a release candidate
    pub fn release_name(&self) -> String {
        format!(
            "{}{}",
            self.release_prefix.as_deref().unwrap_or_default(),
            self.target_tag
        )
    }

    /// Parameters for the note assembler.
    ///
    /// Fails with `InvalidBooleanLiteral` when `createReleaseCandidate`
    /// is not a recognised flag.
    pub fn to_request(&self) -> Result<NotesRequest> {
        Ok(NotesRequest {
            current_tag: self.current_tag.clone(),
            target_tag: self.target_tag.clone(),
            environment: self.target_environment.clone(),
            product_name: self.product_name.clone(),
            repo_name: self.repo_name.clone(),
            release_candidate: to_boolean(&self.create_release_candidate)?,
            release_name: self.release_name(),
            release_url: self
                .release_url
                .clone()
                .filter(|url| !url.trim().is_empty()),
        })
    }
}

/// Event asking for a tracker version to be marked as released
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloseVersionEvent {
    pub release_version: String,
}

impl CloseVersionEvent {
    /// Validate and decode a raw event
    pub fn from_value(raw: Value) -> Result<Self> {
        decode(raw)
    }
}

fn decode<T: DeserializeOwned>(raw: Value) -> Result<T> {
    if !raw.is_object() {
        return Err(ReleaseNotesError::invalid_event("event must be a JSON object"));
    }
    serde_json::from_value(raw).map_err(|e| ReleaseNotesError::invalid_event(e.to_string()))
}
