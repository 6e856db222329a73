use thiserror::Error;

/// Unified error type for release-notes operations
#[derive(Error, Debug)]
pub enum ReleaseNotesError {
    #[error("Invalid event: {0}")]
    InvalidEvent(String),

    #[error("Invalid boolean literal: {0}")]
    InvalidBooleanLiteral(String),

    #[error("{0}")]
    VersionNotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Tracker operation failed: {0}")]
    Tracker(String),

    #[error("Wiki operation failed: {0}")]
    Wiki(String),

    #[error("Repository operation failed: {0}")]
    Repository(String),

    #[error("Git operation failed: {0}")]
    Git(#[from] git2::Error),

    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration parse error: {0}")]
    ConfigParse(#[from] toml::de::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in jira-release-notes
pub type Result<T> = std::result::Result<T, ReleaseNotesError>;

impl ReleaseNotesError {
    /// Create an invalid event error with context
    pub fn invalid_event(msg: impl Into<String>) -> Self {
        ReleaseNotesError::InvalidEvent(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Config(msg.into())
    }

    /// Create a tracker error with context
    pub fn tracker(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Tracker(msg.into())
    }

    /// Create a wiki error with context
    pub fn wiki(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Wiki(msg.into())
    }

    /// Create a repository error with context
    pub fn repository(msg: impl Into<String>) -> Self {
        ReleaseNotesError::Repository(msg.into())
    }

    /// HTTP-style status code reported at the invocation boundary
    pub fn status_code(&self) -> u16 {
        match self {
            ReleaseNotesError::InvalidEvent(_) => 400,
            ReleaseNotesError::VersionNotFound(_) => 404,
            _ => 500,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ReleaseNotesError::config("missing token");
        assert_eq!(err.to_string(), "Configuration error: missing token");
    }

    #[test]
    fn test_error_from_io() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let err: ReleaseNotesError = io_err.into();
        assert!(err.to_string().contains("I/O error"));
    }

    #[test]
    fn test_version_not_found_message_is_bare() {
        let err = ReleaseNotesError::VersionNotFound(
            "can not find release version for v1".to_string(),
        );
        assert_eq!(err.to_string(), "can not find release version for v1");
    }

    #[test]
    fn test_status_codes() {
        let cases = vec![
            (ReleaseNotesError::invalid_event("x"), 400),
            (ReleaseNotesError::VersionNotFound("x".to_string()), 404),
            (ReleaseNotesError::InvalidBooleanLiteral("x".to_string()), 500),
            (ReleaseNotesError::tracker("x"), 500),
            (ReleaseNotesError::wiki("x"), 500),
            (ReleaseNotesError::repository("x"), 500),
            (ReleaseNotesError::config("x"), 500),
        ];

        for (err, expected) in cases {
            assert_eq!(err.status_code(), expected, "unexpected status for {}", err);
        }
    }

    #[test]
    fn test_error_messages_are_descriptive() {
        let error_pairs = vec![
            (ReleaseNotesError::invalid_event("x"), "Invalid event"),
            (ReleaseNotesError::config("x"), "Configuration error"),
            (ReleaseNotesError::tracker("x"), "Tracker operation failed"),
            (ReleaseNotesError::wiki("x"), "Wiki operation failed"),
            (ReleaseNotesError::repository("x"), "Repository operation failed"),
        ];

        for (err, expected_prefix) in error_pairs {
            let msg = err.to_string();
            assert!(
                msg.starts_with(expected_prefix),
                "Error message should start with '{}', but got '{}'",
                expected_prefix,
                msg
            );
        }
    }
}
