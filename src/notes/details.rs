use regex::{Regex, RegexBuilder};
use serde_json::Value;

use crate::boundary::{BoundaryWarning, Reporter};
use crate::config::JiraConfig;
use crate::domain::{Ticket, TicketDetails, TicketKey};
use crate::error::{ReleaseNotesError, Result};
use crate::tracker::{IssueFields, Tracker};

/// Shown when neither the user story field nor the description has a story
pub const USER_STORY_NOT_FOUND: &str = "can not find user story";

/// Markers stripped from a user story lifted out of a description
const MARKUP: [&str; 2] = ["*", "h3."];

/// Turns tracker tickets into [TicketDetails].
///
/// Older tickets keep the user story inside the free-text description,
/// between a "User story" and a "Background" heading; newer ones have a
/// dedicated field. The dedicated field wins when it holds text.
#[derive(Debug, Clone)]
pub struct TicketDetailExtractor {
    user_story_field: String,
    impact_field: String,
    business_service_impact_field: String,
    story_in_description: Regex,
}

impl TicketDetailExtractor {
    pub fn new(config: &JiraConfig) -> Result<Self> {
        let story_in_description = RegexBuilder::new(r"user story(.*?)background")
            .case_insensitive(true)
            .dot_matches_new_line(true)
            .build()
            .map_err(|e| ReleaseNotesError::config(format!("Invalid user story pattern: {}", e)))?;

        Ok(TicketDetailExtractor {
            user_story_field: config.user_story_field.clone(),
            impact_field: config.impact_field.clone(),
            business_service_impact_field: config.business_service_impact_field.clone(),
            story_in_description,
        })
    }

    /// Look up a ticket and normalize its fields.
    ///
    /// Never fails: any lookup error is reported and turned into
    /// [Ticket::LookupFailed].
    pub fn get_ticket_details(
        &self,
        tracker: &dyn Tracker,
        key: &TicketKey,
        reporter: &dyn Reporter,
    ) -> Ticket {
        match tracker.get_issue(key.as_str()) {
            Ok(issue) => Ticket::Found {
                key: key.clone(),
                details: self.extract(&issue.fields),
            },
            Err(e) => {
                reporter.warn(BoundaryWarning::TicketLookupFailed {
                    key: key.to_string(),
                    reason: e.to_string(),
                });
                Ticket::LookupFailed { key: key.clone() }
            }
        }
    }

    /// Normalize the fields of a fetched ticket
    pub fn extract(&self, fields: &IssueFields) -> TicketDetails {
        TicketDetails {
            title: fields.summary.clone(),
            user_story: self.user_story(fields),
            components: fields.component_names(),
            impact: self.impact(fields),
            business_service_impact: self.business_service_impact(fields),
        }
    }

    fn user_story(&self, fields: &IssueFields) -> String {
        let dedicated = fields
            .custom_field(&self.user_story_field)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|story| !story.is_empty());
        if let Some(story) = dedicated {
            return story.to_string();
        }

        fields
            .description
            .as_deref()
            .and_then(|description| self.story_in_description.captures(description))
            .and_then(|captures| captures.get(1))
            .map(|story| strip_markup(story.as_str()))
            .unwrap_or_else(|| USER_STORY_NOT_FOUND.to_string())
    }

    fn impact(&self, fields: &IssueFields) -> String {
        field_text(fields.custom_field(&self.impact_field))
    }

    fn business_service_impact(&self, fields: &IssueFields) -> String {
        field_text(fields.custom_field(&self.business_service_impact_field))
    }
}

/// Display text of a custom field: plain text as is, select options by
/// their `value`, scalars printed. Anything else is treated as unset.
fn field_text(value: Option<&Value>) -> String {
    match value {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Object(option)) => option
            .get("value")
            .and_then(Value::as_str)
            .unwrap_or_default()
            .to_string(),
        Some(scalar @ (Value::Number(_) | Value::Bool(_))) => scalar.to_string(),
        _ => String::new(),
    }
}

fn strip_markup(text: &str) -> String {
    MARKUP
        .iter()
        .fold(text.to_string(), |acc, marker| acc.replace(marker, ""))
        .trim()
        .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::boundary::RecordingReporter;
    use crate::tracker::MockTracker;
    use serde_json::json;

    fn extractor() -> TicketDetailExtractor {
        TicketDetailExtractor::new(&JiraConfig::default()).unwrap()
    }

    fn fields(payload: Value) -> IssueFields {
        serde_json::from_value(payload).unwrap()
    }

    #[test]
    fn test_full_ticket() {
        let details = extractor().extract(&fields(json!({
            "summary": "Test Summary",
            "description": "User story\nTest User Story\nBackground: Test Background",
            "components": [{"name": "Component1"}, {"name": "Component2"}],
            "customfield_26905": {"value": "High"},
            "customfield_13618": "Service Impact"
        })));

        assert_eq!(
            details,
            TicketDetails {
                title: "Test Summary".to_string(),
                user_story: "Test User Story".to_string(),
                components: vec!["Component1".to_string(), "Component2".to_string()],
                impact: "High".to_string(),
                business_service_impact: "Service Impact".to_string(),
            }
        );
    }

    #[test]
    fn test_dedicated_field_wins_over_description() {
        let details = extractor().extract(&fields(json!({
            "summary": "Test Summary",
            "description": "User story\nOld story\nBackground: x",
            "customfield_26904": "  This is the user story that should be used\nover two lines \n"
        })));

        assert_eq!(
            details.user_story,
            "This is the user story that should be used\nover two lines"
        );
    }

    #[test]
    fn test_blank_dedicated_field_falls_back_to_description() {
        let details = extractor().extract(&fields(json!({
            "summary": "s",
            "description": "USER STORY\n*As a user* I want h3.things\nBACKGROUND\nmore",
            "customfield_26904": "   "
        })));

        assert_eq!(details.user_story, "As a user I want things");
    }

    #[test]
    fn test_story_stops_at_first_background() {
        let details = extractor().extract(&fields(json!({
            "summary": "s",
            "description": "h3. User Story\nstory\nh3. Background\nbg\nbackground again"
        })));

        assert_eq!(details.user_story, "story");
    }

    #[test]
    fn test_no_user_story() {
        let extractor = extractor();
        let without_marker = extractor.extract(&fields(json!({
            "summary": "s",
            "description": "Background: Test Background"
        })));
        let without_description = extractor.extract(&fields(json!({"summary": "s"})));

        assert_eq!(without_marker.user_story, "can not find user story");
        assert_eq!(without_description.user_story, "can not find user story");
    }

    #[test]
    fn test_missing_optional_fields() {
        let details = extractor().extract(&fields(json!({
            "summary": "s",
            "customfield_26905": null
        })));

        assert!(details.components.is_empty());
        assert_eq!(details.impact, "");
        assert_eq!(details.business_service_impact, "");
    }

    #[test]
    fn test_select_options_read_by_value() {
        let details = extractor().extract(&fields(json!({
            "summary": "s",
            "customfield_26905": "Medium",
            "customfield_13618": {"self": "https://jira/option/1", "value": "Outage", "id": "1"}
        })));

        assert_eq!(details.impact, "Medium");
        assert_eq!(details.business_service_impact, "Outage");
    }

    #[test]
    fn test_unexpected_field_shapes() {
        let details = extractor().extract(&fields(json!({
            "summary": "s",
            "customfield_26905": [{"value": "a"}],
            "customfield_13618": 3
        })));

        assert_eq!(details.impact, "");
        assert_eq!(details.business_service_impact, "3");
    }

    #[test]
    fn test_lookup_failure_returns_placeholder() {
        let tracker = MockTracker::new();
        let reporter = RecordingReporter::new();
        let key = TicketKey::new("AEA-999");

        let ticket = extractor().get_ticket_details(&tracker, &key, &reporter);

        assert_eq!(ticket, Ticket::LookupFailed { key: key.clone() });
        let details = ticket.details();
        assert_eq!(details.title, "can not find jira ticket for AEA-999");
        assert_eq!(details.user_story, "");
        assert!(details.components.is_empty());
        assert_eq!(details.impact, "");
        assert_eq!(details.business_service_impact, "");

        let warnings = reporter.warnings();
        assert_eq!(warnings.len(), 1);
        assert!(
            matches!(&warnings[0], BoundaryWarning::TicketLookupFailed { key, .. } if key == "AEA-999")
        );
    }

    #[test]
    fn test_lookup_success() {
        let mut tracker = MockTracker::new();
        tracker
            .add_issue_json("AEA-1", json!({"fields": {"summary": "One"}}))
            .unwrap();
        let reporter = RecordingReporter::new();

        let ticket = extractor().get_ticket_details(&tracker, &TicketKey::new("AEA-1"), &reporter);

        assert!(matches!(ticket, Ticket::Found { ref details, .. } if details.title == "One"));
        assert!(reporter.warnings().is_empty());
    }
}
