/// One commit in the diff between two tags
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRecord {
    /// Commit hash
    pub id: String,
    /// Full commit message
    pub message: String,
}

impl CommitRecord {
    pub fn new(id: impl Into<String>, message: impl Into<String>) -> Self {
        CommitRecord {
            id: id.into(),
            message: message.into(),
        }
    }

    /// First line of the commit message
    pub fn title(&self) -> &str {
        self.message.lines().next().unwrap_or("")
    }
}
