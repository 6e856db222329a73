//! HTML fragments making up a release-notes page.

use crate::domain::ticket::NOT_APPLICABLE;
use crate::domain::{ReleaseTag, TicketDetails};

/// Width the field labels of an entry are padded to
const LABEL_WIDTH: usize = 23;

pub const ENTRY_OPEN: &str = "<p>***";
pub const ENTRY_CLOSE: &str = "</p>";
pub const SECTION_SEPARATOR: &str = "<p>***</p>";
pub const DISCLAIMER: &str = "This page is auto generated. Any manual modifications will be lost";
pub const WITH_TICKET_HEADER: &str = "<h3 id='jira_changes'>Changes with jira tickets</h3>";
pub const WITHOUT_TICKET_HEADER: &str =
    "<h3 id='non_jira_changes'>Changes without jira tickets</h3>";

/// Escape text for inclusion in an HTML fragment
pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

/// Link whose text is the URL itself. The URL is escaped in both places.
pub fn external_link(href: &str) -> String {
    let href = escape_html(href);
    format!(
        "<a class='external-link' href='{}' rel='nofollow'>{}</a>",
        href, href
    )
}

/// Line pointing at the pipeline run that produced a release candidate
pub fn run_link_line(release_url: &str) -> String {
    format!(
        "Azure or github release run URL: {}",
        external_link(release_url)
    )
}

/// Page title, anchored on the target tag
pub fn title_line(target_tag: &str, product_name: &str, environment: &str) -> String {
    format!(
        "<h1 id='Currentreleasenotes{t}-plannedreleasetotag{t}'>{} planned release to {} of tag {t}</h1>",
        product_name,
        environment,
        t = target_tag
    )
}

/// Subtitle naming the tag the changes are measured from
pub fn subtitle_line(target_tag: &str, current_tag: &str) -> String {
    format!(
        "<h2 id='Currentreleasenotes{}-Changessincecurrentlyreleasedtag{c}'>Changes since currently released tag {c}</h2>",
        target_tag,
        c = current_tag
    )
}

/// Components in list notation, e.g. `['Api', 'Ui']`
fn component_list(components: &[String]) -> String {
    let quoted: Vec<String> = components.iter().map(|c| format!("'{}'", c)).collect();
    format!("[{}]", quoted.join(", "))
}

fn field(label: &str, value: &str) -> String {
    format!("<br/>{:<width$} : {}", label, value, width = LABEL_WIDTH)
}

/// Everything shown for one commit
#[derive(Debug, Clone)]
pub struct EntryView<'a> {
    /// Tracker link, `None` when the commit references no ticket
    pub jira_link: Option<&'a str>,
    pub details: &'a TicketDetails,
    pub commit_title: &'a str,
    pub release_tag: &'a ReleaseTag,
    pub github_link: &'a str,
}

/// The block of lines rendered for one commit
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedEntry {
    lines: Vec<String>,
}

impl RenderedEntry {
    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Render one commit as a fixed sequence of labelled lines
pub fn render_entry(view: &EntryView<'_>) -> RenderedEntry {
    let details = view.details;
    let jira_link = match view.jira_link {
        Some(link) => external_link(link),
        None => NOT_APPLICABLE.to_string(),
    };

    let lines = vec![
        ENTRY_OPEN.to_string(),
        field("jira link", &jira_link),
        field("jira title", &escape_html(&details.title)),
        field("user story", &escape_html(&details.user_story)),
        field("commit title", &escape_html(view.commit_title)),
        field("release tag", &escape_html(&view.release_tag.to_string())),
        field("github release", &external_link(view.github_link)),
        field("Area affected", &component_list(&details.components)),
        field("Impact", &escape_html(&details.impact)),
        field("Business/Service Impact", &escape_html(&details.business_service_impact)),
        ENTRY_CLOSE.to_string(),
    ];

    RenderedEntry { lines }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_escape_html() {
        assert_eq!(escape_html("a < b & c > d"), "a &lt; b &amp; c &gt; d");
        assert_eq!(escape_html(r#"say "hi" 'now'"#), "say &quot;hi&quot; &#x27;now&#x27;");
    }

    #[test]
    fn test_field_padding() {
        assert_eq!(field("jira link", "x"), "<br/>jira link               : x");
        assert_eq!(
            field("Business/Service Impact", "x"),
            "<br/>Business/Service Impact : x"
        );
    }

    #[test]
    fn test_component_list() {
        assert_eq!(component_list(&[]), "[]");
        assert_eq!(
            component_list(&["A".to_string(), "B".to_string()]),
            "['A', 'B']"
        );
    }

    #[test]
    fn test_heading_anchors() {
        assert_eq!(
            title_line("v2", "EPS FHIR API", "INT"),
            "<h1 id='Currentreleasenotesv2-plannedreleasetotagv2'>EPS FHIR API planned release to INT of tag v2</h1>"
        );
        assert_eq!(
            subtitle_line("v2", "v1"),
            "<h2 id='Currentreleasenotesv2-Changessincecurrentlyreleasedtagv1'>Changes since currently released tag v1</h2>"
        );
    }

    #[test]
    fn test_render_escapes_free_text_only() {
        let details = TicketDetails {
            title: "Fix <script>".to_string(),
            user_story: "A & B".to_string(),
            components: vec!["<Api>".to_string()],
            impact: "High".to_string(),
            business_service_impact: "\"none\"".to_string(),
        };
        let tag = ReleaseTag::Untagged;
        let entry = render_entry(&EntryView {
            jira_link: Some("https://jira/browse/AEA-1"),
            details: &details,
            commit_title: "AEA-1 <b>",
            release_tag: &tag,
            github_link: "https://github.com/o/r/commit/abc",
        });

        assert_eq!(
            entry.lines(),
            &[
                "<p>***",
                "<br/>jira link               : <a class='external-link' href='https://jira/browse/AEA-1' rel='nofollow'>https://jira/browse/AEA-1</a>",
                "<br/>jira title              : Fix &lt;script&gt;",
                "<br/>user story              : A &amp; B",
                "<br/>commit title            : AEA-1 &lt;b&gt;",
                "<br/>release tag             : can not find release tag",
                "<br/>github release          : <a class='external-link' href='https://github.com/o/r/commit/abc' rel='nofollow'>https://github.com/o/r/commit/abc</a>",
                "<br/>Area affected           : ['<Api>']",
                "<br/>Impact                  : High",
                "<br/>Business/Service Impact : &quot;none&quot;",
                "</p>",
            ]
        );
    }

    #[test]
    fn test_links_and_tag_names_are_escaped() {
        assert_eq!(
            external_link("https://github.com/o/r/releases/tag/it's&done"),
            "<a class='external-link' href='https://github.com/o/r/releases/tag/it&#x27;s&amp;done' rel='nofollow'>https://github.com/o/r/releases/tag/it&#x27;s&amp;done</a>"
        );

        let details = TicketDetails::not_applicable();
        let tag = ReleaseTag::Tagged("v1<'rc'>".to_string());
        let entry = render_entry(&EntryView {
            jira_link: None,
            details: &details,
            commit_title: "t",
            release_tag: &tag,
            github_link: "https://github.com/o/r/releases/tag/v1",
        });
        assert_eq!(
            entry.lines()[5],
            "<br/>release tag             : v1&lt;&#x27;rc&#x27;&gt;"
        );
    }

    #[test]
    fn test_render_without_ticket_link() {
        let details = TicketDetails::not_applicable();
        let tag = ReleaseTag::Tagged("tag_2".to_string());
        let entry = render_entry(&EntryView {
            jira_link: None,
            details: &details,
            commit_title: "no jira",
            release_tag: &tag,
            github_link: "https://github.com/o/r/releases/tag/tag_2",
        });

        assert_eq!(entry.lines()[1], "<br/>jira link               : n/a");
        assert_eq!(entry.lines()[5], "<br/>release tag             : tag_2");
        assert_eq!(entry.lines()[7], "<br/>Area affected           : []");
    }
}
