use crate::boundary::{BoundaryWarning, Reporter};
use crate::domain::TicketKey;
use crate::tracker::{fix_version_update, Tracker};

/// Mark a ticket as part of a release candidate.
///
/// Adds `release_name` to the ticket's fix versions, then moves it to
/// `status`. Each step is attempted independently; failures are reported
/// and never propagate.
pub fn mark_ticket_for_release(
    tracker: &dyn Tracker,
    key: &TicketKey,
    release_name: &str,
    status: &str,
    reporter: &dyn Reporter,
) {
    if let Err(e) = tracker.edit_issue(key.as_str(), &fix_version_update(release_name)) {
        reporter.warn(BoundaryWarning::FixVersionFailed {
            key: key.to_string(),
            release: release_name.to_string(),
            reason: e.to_string(),
        });
    }

    if let Err(e) = tracker.transition_issue(key.as_str(), status) {
        reporter.warn(BoundaryWarning::TransitionFailed {
            key: key.to_string(),
            status: status.to_string(),
            reason: e.to_string(),
        });
    }
}
