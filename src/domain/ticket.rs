use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::{ReleaseNotesError, Result};

/// Title shown when a referenced ticket cannot be fetched
pub const LOOKUP_FAILED_PREFIX: &str = "can not find jira ticket for ";

/// Value used for every field of a commit that references no ticket
pub const NOT_APPLICABLE: &str = "n/a";

/// Canonical, upper-cased tracker key such as `AEA-123`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TicketKey(String);

impl TicketKey {
    pub fn new(key: impl Into<String>) -> Self {
        TicketKey(key.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TicketKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Matches ticket references for one tracker project in commit titles.
///
/// A reference is the project prefix, an optional space or hyphen, then
/// digits, matched case-insensitively anywhere in the text.
#[derive(Debug, Clone)]
pub struct TicketPattern {
    regex: Regex,
}

impl TicketPattern {
    /// Build the pattern for a project prefix (e.g. `"AEA"`)
    pub fn new(project: &str) -> Result<Self> {
        if project.trim().is_empty() {
            return Err(ReleaseNotesError::config("Project prefix must not be empty"));
        }

        let regex = RegexBuilder::new(&format!(r"{}[- ]?\d+", regex::escape(project)))
            .case_insensitive(true)
            .build()
            .map_err(|e| ReleaseNotesError::config(format!("Invalid ticket pattern: {}", e)))?;

        Ok(TicketPattern { regex })
    }

    /// Extract the first ticket key from a commit title, normalized to
    /// `PREFIX-123` form.
    pub fn extract(&self, commit_title: &str) -> Option<TicketKey> {
        self.regex
            .find(commit_title)
            .map(|m| TicketKey(m.as_str().replace(' ', "-").to_uppercase()))
    }
}

/// Normalized fields of one tracker ticket. Every field is always populated.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TicketDetails {
    pub title: String,
    pub user_story: String,
    pub components: Vec<String>,
    pub impact: String,
    pub business_service_impact: String,
}

impl TicketDetails {
    /// Placeholder for a referenced ticket whose lookup failed
    pub fn lookup_failed(key: &TicketKey) -> Self {
        TicketDetails {
            title: format!("{}{}", LOOKUP_FAILED_PREFIX, key),
            ..TicketDetails::default()
        }
    }

    /// Placeholder for a commit that references no ticket
    pub fn not_applicable() -> Self {
        TicketDetails {
            title: NOT_APPLICABLE.to_string(),
            user_story: NOT_APPLICABLE.to_string(),
            components: Vec::new(),
            impact: NOT_APPLICABLE.to_string(),
            business_service_impact: NOT_APPLICABLE.to_string(),
        }
    }
}

/// What is known about the ticket behind one commit.
///
/// The two placeholder cases stay distinct: a commit whose key matched but
/// whose lookup failed is still treated as ticketed when bucketing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Ticket {
    Found {
        key: TicketKey,
        details: TicketDetails,
    },
    LookupFailed {
        key: TicketKey,
    },
    Unreferenced,
}

impl Ticket {
    pub fn key(&self) -> Option<&TicketKey> {
        match self {
            Ticket::Found { key, .. } | Ticket::LookupFailed { key } => Some(key),
            Ticket::Unreferenced => None,
        }
    }

    /// Whether the commit title referenced a ticket, regardless of lookup outcome
    pub fn is_referenced(&self) -> bool {
        self.key().is_some()
    }

    /// Fully populated details, substituting the matching placeholder
    pub fn details(&self) -> TicketDetails {
        match self {
            Ticket::Found { details, .. } => details.clone(),
            Ticket::LookupFailed { key } => TicketDetails::lookup_failed(key),
            Ticket::Unreferenced => TicketDetails::not_applicable(),
        }
    }
}
