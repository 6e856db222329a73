//! Pure formatting functions for terminal output.
//!
//! Everything here returns a `String` so it can be tested without a
//! terminal. Styling goes through `console`, which drops the escape codes
//! when stderr is not a tty.

use console::style;

use crate::boundary::BoundaryWarning;
use crate::handler::Response;

/// Red `ERROR:` prefix followed by the message
pub fn format_error(message: &str) -> String {
    format!("{} {}", style("ERROR:").red().bold(), message)
}

/// Green checkmark followed by the message
pub fn format_success(message: &str) -> String {
    format!("{} {}", style("✓").green(), message)
}

/// Yellow arrow followed by the message
pub fn format_status(message: &str) -> String {
    format!("{} {}", style("→").yellow(), message)
}

/// Yellow warning sign followed by the recovered failure
pub fn format_boundary_warning(warning: &BoundaryWarning) -> String {
    format!("{} {}", style("⚠ WARNING:").yellow(), warning)
}

/// One-line summary of a workflow response.
///
/// Successful responses read as `<action> (200 OK)`; failures carry the
/// response body.
pub fn format_response_summary(action: &str, response: &Response) -> String {
    if response.is_success() {
        format_success(&format!(
            "{} ({} {})",
            action,
            response.status_code,
            response.status.as_deref().unwrap_or("OK")
        ))
    } else {
        format_error(&format!(
            "{} failed with status {}: {}",
            action,
            response.status_code,
            response.body.as_deref().unwrap_or_default()
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReleaseNotesError;

    fn plain(s: String) -> String {
        console::strip_ansi_codes(&s).into_owned()
    }

    #[test]
    fn test_format_error() {
        assert_eq!(plain(format_error("boom")), "ERROR: boom");
    }

    #[test]
    fn test_format_boundary_warning() {
        let warning = BoundaryWarning::TicketLookupFailed {
            key: "AEA-1".to_string(),
            reason: "404".to_string(),
        };
        assert_eq!(
            plain(format_boundary_warning(&warning)),
            "⚠ WARNING: Cannot find jira ticket 'AEA-1': 404"
        );
    }

    #[test]
    fn test_response_summary() {
        assert_eq!(
            plain(format_response_summary("Release notes published", &Response::ok())),
            "✓ Release notes published (200 OK)"
        );

        let err = ReleaseNotesError::VersionNotFound(
            "can not find release version for v9".to_string(),
        );
        assert_eq!(
            plain(format_response_summary(
                "Version close",
                &Response::from_error(&err)
            )),
            "ERROR: Version close failed with status 404: can not find release version for v9"
        );
    }
}
