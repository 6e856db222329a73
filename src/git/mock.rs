use crate::domain::{CommitRecord, TagRef};
use crate::error::{ReleaseNotesError, Result};
use crate::git::Repository;

/// Mock repository for testing without a repository host.
///
/// `compare` returns every added commit in insertion order, whatever the range.
pub struct MockRepository {
    commits: Vec<CommitRecord>,
    tags: Vec<TagRef>,
    unavailable: bool,
}

impl MockRepository {
    /// Create a new empty mock repository
    pub fn new() -> Self {
        MockRepository {
            commits: Vec::new(),
            tags: Vec::new(),
            unavailable: false,
        }
    }

    /// Add a commit to the diff
    pub fn add_commit(&mut self, id: impl Into<String>, message: impl Into<String>) {
        self.commits.push(CommitRecord::new(id, message));
    }

    /// Add a tag pointing to a commit id
    pub fn add_tag(&mut self, name: impl Into<String>, commit_id: impl Into<String>) {
        self.tags.push(TagRef::new(name, commit_id));
    }

    /// Make every call fail, as if the host were down
    pub fn set_unavailable(&mut self) {
        self.unavailable = true;
    }

    fn check(&self) -> Result<()> {
        if self.unavailable {
            return Err(ReleaseNotesError::repository("Repository host unavailable"));
        }
        Ok(())
    }
}

impl Default for MockRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl Repository for MockRepository {
    fn compare(&self, _base: &str, _head: &str) -> Result<Vec<CommitRecord>> {
        self.check()?;
        Ok(self.commits.clone())
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        self.check()?;
        Ok(self.tags.clone())
    }
}
