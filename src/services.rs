//! Production wiring of the external clients.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{
    token_from_env, Config, CONFLUENCE_TOKEN_VAR, GITHUB_TOKEN_VAR, JIRA_TOKEN_VAR,
};
use crate::error::Result;
use crate::git::{Git2Repository, GithubRepository, Repository};
use crate::handler::ServiceFactory;
use crate::tracker::{JiraClient, Tracker};
use crate::wiki::{ConfluenceClient, Wiki};

/// Builds real clients from configuration and environment tokens.
///
/// Tokens are read lazily, so the version closer never needs the
/// Confluence or GitHub token. With `repo_path` set, diffs and tags come
/// from a local clone instead of the GitHub API.
pub struct LiveServices {
    config: Config,
    repo_path: Option<PathBuf>,
}

impl LiveServices {
    pub fn new(config: Config, repo_path: Option<PathBuf>) -> Self {
        LiveServices { config, repo_path }
    }
}

impl ServiceFactory for LiveServices {
    fn tracker(&self) -> Result<Arc<dyn Tracker>> {
        let token = token_from_env(JIRA_TOKEN_VAR)?;
        Ok(Arc::new(JiraClient::new(&self.config.jira.url, token)?))
    }

    fn repository(&self, repo_name: &str) -> Result<Arc<dyn Repository>> {
        if let Some(path) = &self.repo_path {
            tracing::debug!(path = %path.display(), "using local repository");
            return Ok(Arc::new(Git2Repository::open(path)?));
        }

        let token = token_from_env(GITHUB_TOKEN_VAR)?;
        let github = &self.config.github;
        Ok(Arc::new(GithubRepository::new(
            &github.api_url,
            &github.owner,
            repo_name,
            token,
        )?))
    }

    fn wiki(&self) -> Result<Arc<dyn Wiki>> {
        let token = token_from_env(CONFLUENCE_TOKEN_VAR)?;
        Ok(Arc::new(ConfluenceClient::new(
            &self.config.confluence.url,
            token,
        )?))
    }
}
