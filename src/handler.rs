//! Entry workflows: release-note generation and version closing.
//!
//! Both take a raw event and always answer with a [Response]; errors never
//! escape. External clients are obtained through a [ServiceFactory] only
//! after the event has been validated.

use std::sync::Arc;

use chrono::NaiveDate;
use serde::Serialize;
use serde_json::Value;

use crate::boundary::Reporter;
use crate::config::Config;
use crate::domain::{CommitRecord, TagIndex};
use crate::error::{ReleaseNotesError, Result};
use crate::event::{CloseVersionEvent, ReleaseNotesEvent};
use crate::git::Repository;
use crate::notes::{Document, NoteAssembler};
use crate::tracker::Tracker;
use crate::wiki::Wiki;

/// Status/body pair returned to the caller
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Response {
    pub status_code: u16,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub body: Option<String>,
}

impl Response {
    pub fn ok() -> Self {
        Response {
            status_code: 200,
            status: Some("OK".to_string()),
            body: None,
        }
    }

    pub fn from_error(error: &ReleaseNotesError) -> Self {
        Response {
            status_code: error.status_code(),
            status: None,
            body: Some(error.to_string()),
        }
    }

    pub fn is_success(&self) -> bool {
        self.status_code == 200
    }
}

/// Creates the external clients for one invocation
pub trait ServiceFactory {
    fn tracker(&self) -> Result<Arc<dyn Tracker>>;
    fn repository(&self, repo_name: &str) -> Result<Arc<dyn Repository>>;
    fn wiki(&self) -> Result<Arc<dyn Wiki>>;
}

/// Build release notes for an event and publish them.
///
/// Release candidates get a tracker version and a new child page; other
/// runs overwrite the existing page.
pub fn process_release_notes(
    event: &ReleaseNotesEvent,
    config: &Config,
    tracker: &dyn Tracker,
    repository: &dyn Repository,
    wiki: &dyn Wiki,
    reporter: &dyn Reporter,
) -> Result<Document> {
    let request = event.to_request()?;

    let diff: Vec<CommitRecord> = repository.compare(&request.current_tag, &request.target_tag)?;
    let tags: TagIndex = repository.list_tags()?.into_iter().collect();
    tracing::info!(
        commits = diff.len(),
        tags = tags.len(),
        "fetched diff {}...{}",
        request.current_tag,
        request.target_tag
    );

    if request.release_candidate {
        tracing::info!(release = %request.release_name, "creating release version");
        tracker.add_project_version(&config.jira.project, &request.release_name)?;
    }

    let assembler = NoteAssembler::new(tracker, config, reporter)?;
    let document = assembler.assemble(&request, &diff, &tags);
    let body = document.body();

    if request.release_candidate {
        wiki.create_page(
            &event.release_notes_page_id,
            &event.release_notes_page_title,
            &body,
            &config.confluence.space,
        )?;
    } else {
        wiki.update_page(
            &event.release_notes_page_id,
            &event.release_notes_page_title,
            &body,
        )?;
    }

    Ok(document)
}

/// Release-note generator entry point
pub fn create_release_notes(
    raw: Value,
    config: &Config,
    services: &dyn ServiceFactory,
    reporter: &dyn Reporter,
) -> Response {
    tracing::info!(event = %raw, "release notes requested");

    let result = ReleaseNotesEvent::from_value(raw).and_then(|event| {
        let tracker = services.tracker()?;
        let repository = services.repository(&event.repo_name)?;
        let wiki = services.wiki()?;
        process_release_notes(
            &event,
            config,
            tracker.as_ref(),
            repository.as_ref(),
            wiki.as_ref(),
            reporter,
        )
    });

    respond(result.map(|_| ()))
}

/// Mark the tracker version named in the event as released on `release_date`
pub fn process_close_version(
    event: &CloseVersionEvent,
    config: &Config,
    tracker: &dyn Tracker,
    release_date: NaiveDate,
) -> Result<()> {
    let versions = tracker.get_project_versions(&config.jira.project)?;
    let matching: Vec<_> = versions
        .iter()
        .filter(|version| version.name == event.release_version)
        .collect();

    let [version] = matching.as_slice() else {
        return Err(ReleaseNotesError::VersionNotFound(format!(
            "can not find release version for {}",
            event.release_version
        )));
    };

    tracing::info!(
        "marking {} with id {} as released in Jira",
        version.name,
        version.id
    );
    tracker.update_version(
        &version.id,
        true,
        &release_date.format("%Y-%m-%d").to_string(),
    )
}

/// Version closer entry point
pub fn mark_version_released(
    raw: Value,
    config: &Config,
    services: &dyn ServiceFactory,
) -> Response {
    tracing::info!(event = %raw, "version close requested");

    let result = CloseVersionEvent::from_value(raw).and_then(|event| {
        let tracker = services.tracker()?;
        let today = chrono::Local::now().date_naive();
        process_close_version(&event, config, tracker.as_ref(), today)
    });

    respond(result)
}

fn respond(result: Result<()>) -> Response {
    match result {
        Ok(()) => Response::ok(),
        Err(e) => {
            tracing::error!(status = e.status_code(), "{}", e);
            Response::from_error(&e)
        }
    }
}
