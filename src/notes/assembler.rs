use crate::boundary::Reporter;
use crate::config::Config;
use crate::domain::{resolve_tag, CommitRecord, ReleaseTag, TagIndex, Ticket, TicketPattern};
use crate::error::Result;
use crate::notes::details::TicketDetailExtractor;
use crate::notes::mutations::mark_ticket_for_release;
use crate::notes::render::{self, EntryView, RenderedEntry};
use crate::tracker::Tracker;

/// Parameters of one release-notes run
#[derive(Debug, Clone, PartialEq)]
pub struct NotesRequest {
    /// Tag currently deployed; changes are listed since this tag
    pub current_tag: String,
    /// Tag about to be deployed
    pub target_tag: String,
    pub environment: String,
    pub product_name: String,
    pub repo_name: String,
    /// Also bucket entries and update tracker tickets
    pub release_candidate: bool,
    /// Fix version added to tickets in release-candidate mode
    pub release_name: String,
    /// Pipeline run that produced the release candidate
    pub release_url: Option<String>,
}

/// Assembled release notes, ready to publish
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Document {
    header: Vec<String>,
    release_candidate: bool,
    with_ticket: Vec<RenderedEntry>,
    without_ticket: Vec<RenderedEntry>,
}

impl Document {
    /// Entries of commits that referenced a ticket (release-candidate mode only)
    pub fn with_ticket(&self) -> &[RenderedEntry] {
        &self.with_ticket
    }

    /// All other entries, in diff order
    pub fn without_ticket(&self) -> &[RenderedEntry] {
        &self.without_ticket
    }

    /// Every line of the page, in order
    pub fn lines(&self) -> Vec<String> {
        let mut lines = self.header.clone();

        if self.release_candidate {
            lines.push(render::WITH_TICKET_HEADER.to_string());
            extend_entries(&mut lines, &self.with_ticket);
            lines.push(render::SECTION_SEPARATOR.to_string());
            lines.push(render::WITHOUT_TICKET_HEADER.to_string());
        }
        extend_entries(&mut lines, &self.without_ticket);

        lines
    }

    /// The page body: all lines joined by newlines
    pub fn body(&self) -> String {
        self.lines().join("\n")
    }
}

fn extend_entries(lines: &mut Vec<String>, entries: &[RenderedEntry]) {
    for entry in entries {
        lines.extend(entry.lines().iter().cloned());
    }
}

/// Builds release notes from a commit diff, consulting the tracker per commit
pub struct NoteAssembler<'a> {
    tracker: &'a dyn Tracker,
    config: &'a Config,
    reporter: &'a dyn Reporter,
    pattern: TicketPattern,
    extractor: TicketDetailExtractor,
}

impl<'a> NoteAssembler<'a> {
    pub fn new(
        tracker: &'a dyn Tracker,
        config: &'a Config,
        reporter: &'a dyn Reporter,
    ) -> Result<Self> {
        Ok(NoteAssembler {
            tracker,
            config,
            reporter,
            pattern: TicketPattern::new(&config.jira.project)?,
            extractor: TicketDetailExtractor::new(&config.jira)?,
        })
    }

    /// Build the document for `diff`, processing commits in the given order.
    ///
    /// In release-candidate mode every ticketed commit's ticket is also given
    /// the release as fix version and transitioned to the release status.
    /// Tracker failures are reported, never returned.
    pub fn assemble(
        &self,
        request: &NotesRequest,
        diff: &[CommitRecord],
        tags: &TagIndex,
    ) -> Document {
        let _span = tracing::info_span!(
            "assemble",
            current = %request.current_tag,
            target = %request.target_tag,
            rc = request.release_candidate
        )
        .entered();

        let mut document = Document {
            header: self.header(request),
            release_candidate: request.release_candidate,
            with_ticket: Vec::new(),
            without_ticket: Vec::new(),
        };

        for commit in diff {
            let release_tag = resolve_tag(&commit.id, tags);
            let ticket = self.ticket_for(request, commit.title());
            let entry = self.render(request, commit, &release_tag, &ticket);

            // a matched key counts even when its lookup failed
            if request.release_candidate && ticket.is_referenced() {
                document.with_ticket.push(entry);
            } else {
                document.without_ticket.push(entry);
            }
        }

        tracing::info!(
            commits = diff.len(),
            with_ticket = document.with_ticket.len(),
            without_ticket = document.without_ticket.len(),
            "release notes assembled"
        );
        document
    }

    fn header(&self, request: &NotesRequest) -> Vec<String> {
        let mut header = Vec::new();

        match (&request.release_url, request.release_candidate) {
            (Some(url), true) => header.push(render::run_link_line(url)),
            (_, false) => header.push(render::DISCLAIMER.to_string()),
            (None, true) => {}
        }

        header.push(render::title_line(
            &request.target_tag,
            &request.product_name,
            &request.environment,
        ));
        header.push(render::subtitle_line(
            &request.target_tag,
            &request.current_tag,
        ));
        header
    }

    fn ticket_for(&self, request: &NotesRequest, commit_title: &str) -> Ticket {
        let Some(key) = self.pattern.extract(commit_title) else {
            return Ticket::Unreferenced;
        };

        tracing::debug!(ticket = %key, "commit references ticket");
        let ticket = self
            .extractor
            .get_ticket_details(self.tracker, &key, self.reporter);

        if request.release_candidate {
            mark_ticket_for_release(
                self.tracker,
                &key,
                &request.release_name,
                &self.config.jira.release_status,
                self.reporter,
            );
        }

        ticket
    }

    fn render(
        &self,
        request: &NotesRequest,
        commit: &CommitRecord,
        release_tag: &ReleaseTag,
        ticket: &Ticket,
    ) -> RenderedEntry {
        let github = &self.config.github;
        let github_link = match release_tag {
            ReleaseTag::Tagged(name) => github.release_link(&request.repo_name, name),
            ReleaseTag::Untagged => github.commit_link(&request.repo_name, &commit.id),
        };
        let jira_link = ticket
            .key()
            .map(|key| self.config.jira.browse_link(key.as_str()));
        let details = ticket.details();

        render::render_entry(&EntryView {
            jira_link: jira_link.as_deref(),
            details: &details,
            commit_title: commit.title(),
            release_tag,
            github_link: &github_link,
        })
    }
}
