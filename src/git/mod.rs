//! Source repository abstraction layer
//!
//! The note builder needs two things from the repository host: the commits
//! between two tags and the full tag list. [Repository] captures exactly that.
//!
//! - [github::GithubRepository]: GitHub REST API
//! - [repository::Git2Repository]: a local clone read with the `git2` crate
//! - [mock::MockRepository]: in-memory commits and tags for testing
//!
//! ```rust
//! # use jira_release_notes::git::Repository;
//! # fn example<R: Repository>(repo: &R) -> Result<(), Box<dyn std::error::Error>> {
//! let commits = repo.compare("v1.0.0", "v1.1.0")?;
//! let tags = repo.list_tags()?;
//! # Ok(())
//! # }
//! ```

pub mod github;
pub mod mock;
pub mod repository;

pub use github::GithubRepository;
pub use mock::MockRepository;
pub use repository::Git2Repository;

use crate::domain::{CommitRecord, TagRef};
use crate::error::Result;

/// Common repository operation trait for abstraction
///
/// All implementors must be `Send + Sync`. Errors from the underlying
/// transport are mapped onto [crate::error::ReleaseNotesError].
pub trait Repository: Send + Sync {
    /// Commits reachable from `head` but not from `base`, oldest first
    fn compare(&self, base: &str, head: &str) -> Result<Vec<CommitRecord>>;

    /// All tags with the commit each points at, in the host's listing order
    fn list_tags(&self) -> Result<Vec<TagRef>>;
}
