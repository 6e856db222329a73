//! Fixtures shared by the integration tests.

#![allow(dead_code)]

use std::sync::Arc;

use serde_json::{json, Value};

use jira_release_notes::git::{MockRepository, Repository};
use jira_release_notes::handler::ServiceFactory;
use jira_release_notes::tracker::{MockTracker, Tracker};
use jira_release_notes::wiki::{MockWiki, Wiki};
use jira_release_notes::Result;

pub const REPO: &str = "prescriptionsforpatients";
pub const RUN_URL: &str = "https://github.com/NHSDigital/prescriptionsforpatients/actions/runs/7692810696";

/// Tracker holding AEA-123 (story in description) and AEA-124 (dedicated story field)
pub fn tracker() -> MockTracker {
    let mut tracker = MockTracker::new();
    tracker
        .add_issue_json(
            "AEA-123",
            json!({
                "fields": {
                    "summary": "Ticket one",
                    "description": "User story\n*As a user* I want h3.things\nBackground: context",
                    "components": [{"name": "Api"}, {"name": "Ui"}],
                    "customfield_26905": {"value": "Low"},
                    "customfield_13618": "None"
                }
            }),
        )
        .unwrap();
    tracker
        .add_issue_json(
            "AEA-124",
            json!({
                "fields": {
                    "summary": "Ticket two & more",
                    "description": null,
                    "customfield_26904": "  Story two  "
                }
            }),
        )
        .unwrap();
    tracker
}

/// Three tagged commits: ticketed, unticketed, ticketed
pub fn repository() -> MockRepository {
    let mut repo = MockRepository::new();
    repo.add_commit("c1", "AEA-123 first change\n\nlonger body");
    repo.add_commit("c2", "tidy build");
    repo.add_commit("c3", "aea 124 second change");
    repo.add_tag("tag_1", "c1");
    repo.add_tag("tag_2", "c2");
    repo.add_tag("tag_3", "c3");
    repo
}

pub fn event(release_candidate: &str) -> Value {
    json!({
        "createReleaseCandidate": release_candidate,
        "releasePrefix": "PfP-AWS-",
        "currentTag": "tag_1",
        "targetTag": "tag_3",
        "repoName": REPO,
        "targetEnvironment": "INT",
        "productName": "EPS FHIR API",
        "releaseNotesPageId": "734733361",
        "releaseNotesPageTitle": "TEST PfP-AWS-tag_3 - Deployed to [INT]",
        "releaseURL": RUN_URL
    })
}

pub fn anchor(href: &str) -> String {
    format!("<a class='external-link' href='{}' rel='nofollow'>{}</a>", href, href)
}

fn line(label: &str, value: &str) -> String {
    format!("<br/>{:<23} : {}", label, value)
}

fn entry(
    jira_link: &str,
    title: &str,
    story: &str,
    commit: &str,
    tag: &str,
    components: &str,
    impact: &str,
    business: &str,
) -> Vec<String> {
    vec![
        "<p>***".to_string(),
        line("jira link", jira_link),
        line("jira title", title),
        line("user story", story),
        line("commit title", commit),
        line("release tag", tag),
        line(
            "github release",
            &anchor(&format!(
                "https://github.com/NHSDigital/{}/releases/tag/{}",
                REPO, tag
            )),
        ),
        line("Area affected", components),
        line("Impact", impact),
        line("Business/Service Impact", business),
        "</p>".to_string(),
    ]
}

pub fn first_entry() -> Vec<String> {
    entry(
        &anchor("https://nhsd-jira.digital.nhs.uk/browse/AEA-123"),
        "Ticket one",
        "As a user I want things",
        "AEA-123 first change",
        "tag_1",
        "['Api', 'Ui']",
        "Low",
        "None",
    )
}

pub fn second_entry() -> Vec<String> {
    entry("n/a", "n/a", "n/a", "tidy build", "tag_2", "[]", "n/a", "n/a")
}

pub fn third_entry() -> Vec<String> {
    entry(
        &anchor("https://nhsd-jira.digital.nhs.uk/browse/AEA-124"),
        "Ticket two &amp; more",
        "Story two",
        "aea 124 second change",
        "tag_3",
        "[]",
        "",
        "",
    )
}

pub fn headings() -> Vec<String> {
    vec![
        "<h1 id='Currentreleasenotestag_3-plannedreleasetotagtag_3'>EPS FHIR API planned release to INT of tag tag_3</h1>".to_string(),
        "<h2 id='Currentreleasenotestag_3-Changessincecurrentlyreleasedtagtag_1'>Changes since currently released tag tag_1</h2>".to_string(),
    ]
}

/// Page expected for the fixtures outside release-candidate mode
pub fn expected_plain_page() -> Vec<String> {
    let mut lines =
        vec!["This page is auto generated. Any manual modifications will be lost".to_string()];
    lines.extend(headings());
    lines.extend(first_entry());
    lines.extend(second_entry());
    lines.extend(third_entry());
    lines
}

/// Page expected for the fixtures in release-candidate mode
pub fn expected_candidate_page() -> Vec<String> {
    let mut lines = vec![format!("Azure or github release run URL: {}", anchor(RUN_URL))];
    lines.extend(headings());
    lines.push("<h3 id='jira_changes'>Changes with jira tickets</h3>".to_string());
    lines.extend(first_entry());
    lines.extend(third_entry());
    lines.push("<p>***</p>".to_string());
    lines.push("<h3 id='non_jira_changes'>Changes without jira tickets</h3>".to_string());
    lines.extend(second_entry());
    lines
}

/// Hands out shared mocks so tests can inspect them after a run
pub struct MockServices {
    pub tracker: Arc<MockTracker>,
    pub repository: Arc<MockRepository>,
    pub wiki: Arc<MockWiki>,
}

impl MockServices {
    pub fn new(tracker: MockTracker, repository: MockRepository, wiki: MockWiki) -> Self {
        MockServices {
            tracker: Arc::new(tracker),
            repository: Arc::new(repository),
            wiki: Arc::new(wiki),
        }
    }

    pub fn with_fixtures() -> Self {
        Self::new(tracker(), repository(), MockWiki::new())
    }
}

impl ServiceFactory for MockServices {
    fn tracker(&self) -> Result<Arc<dyn Tracker>> {
        let tracker: Arc<dyn Tracker> = self.tracker.clone();
        Ok(tracker)
    }

    fn repository(&self, _repo_name: &str) -> Result<Arc<dyn Repository>> {
        let repository: Arc<dyn Repository> = self.repository.clone();
        Ok(repository)
    }

    fn wiki(&self) -> Result<Arc<dyn Wiki>> {
        let wiki: Arc<dyn Wiki> = self.wiki.clone();
        Ok(wiki)
    }
}
