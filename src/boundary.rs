use std::cell::RefCell;
use std::fmt;

/// Failures that are recovered from while building release notes.
/// These never abort a run but should be reported.
#[derive(Debug, Clone, PartialEq)]
pub enum BoundaryWarning {
    /// A referenced ticket could not be fetched or parsed
    TicketLookupFailed { key: String, reason: String },
    /// Adding the release as a fix version to a ticket failed
    FixVersionFailed {
        key: String,
        release: String,
        reason: String,
    },
    /// Moving a ticket to the release status failed
    TransitionFailed {
        key: String,
        status: String,
        reason: String,
    },
}

impl fmt::Display for BoundaryWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BoundaryWarning::TicketLookupFailed { key, reason } => {
                write!(f, "Cannot find jira ticket '{}': {}", key, reason)
            }
            BoundaryWarning::FixVersionFailed {
                key,
                release,
                reason,
            } => {
                write!(
                    f,
                    "Cannot add fix version '{}' to '{}': {}",
                    release, key, reason
                )
            }
            BoundaryWarning::TransitionFailed {
                key,
                status,
                reason,
            } => {
                write!(
                    f,
                    "Cannot transition '{}' to status '{}': {}",
                    key, status, reason
                )
            }
        }
    }
}

/// Receives recovered failures from the note builder.
///
/// Passed explicitly into the extractor and assembler so callers decide
/// where warnings end up.
pub trait Reporter {
    fn warn(&self, warning: BoundaryWarning);
}

/// Forwards warnings to `tracing`
#[derive(Debug, Default, Clone, Copy)]
pub struct TracingReporter;

impl Reporter for TracingReporter {
    fn warn(&self, warning: BoundaryWarning) {
        match &warning {
            BoundaryWarning::TicketLookupFailed { key, .. } => {
                tracing::error!(ticket = %key, "{}", warning)
            }
            BoundaryWarning::FixVersionFailed { key, release, .. } => {
                tracing::error!(ticket = %key, release = %release, "{}", warning)
            }
            BoundaryWarning::TransitionFailed { key, status, .. } => {
                tracing::error!(ticket = %key, status = %status, "{}", warning)
            }
        }
    }
}

/// Keeps warnings in memory, for tests and for summarising a run
#[derive(Debug, Default)]
pub struct RecordingReporter {
    warnings: RefCell<Vec<BoundaryWarning>>,
}

impl RecordingReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<BoundaryWarning> {
        self.warnings.borrow().clone()
    }
}

impl Reporter for RecordingReporter {
    fn warn(&self, warning: BoundaryWarning) {
        self.warnings.borrow_mut().push(warning);
    }
}

/// Logs each warning through `tracing` as it happens and keeps a copy for
/// the end-of-run summary
#[derive(Debug, Default)]
pub struct RunReporter {
    log: TracingReporter,
    recorded: RecordingReporter,
}

impl RunReporter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn warnings(&self) -> Vec<BoundaryWarning> {
        self.recorded.warnings()
    }
}

impl Reporter for RunReporter {
    fn warn(&self, warning: BoundaryWarning) {
        self.log.warn(warning.clone());
        self.recorded.warn(warning);
    }
}
