use std::path::Path;
use std::sync::Mutex;

use git2::{Oid, Repository as Git2Repo, Sort};

use crate::domain::{CommitRecord, TagRef};
use crate::error::{ReleaseNotesError, Result};

/// Wrapper around a local git2::Repository with our trait interface
pub struct Git2Repository {
    repo: Mutex<Git2Repo>,
}

impl Git2Repository {
    /// Open or discover a git repository
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let repo = Git2Repo::discover(path)?;
        Ok(Self::from_git2(repo))
    }

    /// Create from existing git2::Repository
    pub fn from_git2(repo: Git2Repo) -> Self {
        Git2Repository {
            repo: Mutex::new(repo),
        }
    }

    fn with_repo<T>(&self, f: impl FnOnce(&Git2Repo) -> Result<T>) -> Result<T> {
        let repo = self
            .repo
            .lock()
            .map_err(|_| ReleaseNotesError::repository("Repository lock poisoned"))?;
        f(&repo)
    }
}

fn commit_oid(repo: &Git2Repo, spec: &str) -> Result<Oid> {
    let object = repo
        .revparse_single(spec)
        .map_err(|e| ReleaseNotesError::repository(format!("Cannot resolve '{}': {}", spec, e)))?;
    let commit = object
        .peel_to_commit()
        .map_err(|e| ReleaseNotesError::repository(format!("'{}' is not a commit: {}", spec, e)))?;
    Ok(commit.id())
}

impl super::Repository for Git2Repository {
    fn compare(&self, base: &str, head: &str) -> Result<Vec<CommitRecord>> {
        self.with_repo(|repo| {
            let base_oid = commit_oid(repo, base)?;
            let head_oid = commit_oid(repo, head)?;

            let mut revwalk = repo.revwalk()?;
            revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::REVERSE)?;
            revwalk.push(head_oid)?;
            revwalk.hide(base_oid)?;

            let mut commits = Vec::new();
            for oid_result in revwalk {
                let oid = oid_result?;
                let commit = repo.find_commit(oid)?;
                let message = commit.message().unwrap_or("").to_string();
                commits.push(CommitRecord::new(oid.to_string(), message));
            }

            Ok(commits)
        })
    }

    fn list_tags(&self) -> Result<Vec<TagRef>> {
        self.with_repo(|repo| {
            let names = repo.tag_names(None)?;
            let mut tags = Vec::new();

            for name in names.iter().flatten() {
                let reference = repo.find_reference(&format!("refs/tags/{}", name))?;
                match reference.peel_to_commit() {
                    Ok(commit) => tags.push(TagRef::new(name, commit.id().to_string())),
                    // tags on trees or blobs cannot mark a release commit
                    Err(e) => tracing::debug!(tag = name, "skipping non-commit tag: {}", e),
                }
            }

            Ok(tags)
        })
    }
}
