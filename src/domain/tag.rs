use std::fmt;

/// Shown in place of a release tag when no tag points at a commit
pub const TAG_NOT_FOUND: &str = "can not find release tag";

/// A named tag and the commit it points at
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TagRef {
    pub name: String,
    pub commit_id: String,
}

impl TagRef {
    pub fn new(name: impl Into<String>, commit_id: impl Into<String>) -> Self {
        TagRef {
            name: name.into(),
            commit_id: commit_id.into(),
        }
    }
}

/// All tags of a repository, in the order the repository listed them
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TagIndex {
    tags: Vec<TagRef>,
}

impl TagIndex {
    pub fn new(tags: Vec<TagRef>) -> Self {
        TagIndex { tags }
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// First tag (in listing order) pointing at `commit_id`
    pub fn find(&self, commit_id: &str) -> Option<&TagRef> {
        self.tags.iter().find(|tag| tag.commit_id == commit_id)
    }
}

impl FromIterator<TagRef> for TagIndex {
    fn from_iter<I: IntoIterator<Item = TagRef>>(iter: I) -> Self {
        TagIndex::new(iter.into_iter().collect())
    }
}

/// Outcome of resolving a commit against the tag list
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ReleaseTag {
    Tagged(String),
    Untagged,
}

impl fmt::Display for ReleaseTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseTag::Tagged(name) => f.write_str(name),
            ReleaseTag::Untagged => f.write_str(TAG_NOT_FOUND),
        }
    }
}

/// Find the release tag pointing at `commit_id`
pub fn resolve_tag(commit_id: &str, tags: &TagIndex) -> ReleaseTag {
    match tags.find(commit_id) {
        Some(tag) => ReleaseTag::Tagged(tag.name.clone()),
        None => ReleaseTag::Untagged,
    }
}
