use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::Path;

use crate::error::{ReleaseNotesError, Result};

/// Represents the complete configuration for jira-release-notes.
///
/// Contains the tracker, wiki and repository host settings plus logging options.
#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
pub struct Config {
    #[serde(default)]
    pub jira: JiraConfig,

    #[serde(default)]
    pub confluence: ConfluenceConfig,

    #[serde(default)]
    pub github: GithubConfig,

    #[serde(default)]
    pub logging: LoggingConfig,
}

fn default_jira_url() -> String {
    "https://nhsd-jira.digital.nhs.uk/".to_string()
}

fn default_project() -> String {
    "AEA".to_string()
}

fn default_user_story_field() -> String {
    "customfield_26904".to_string()
}

fn default_impact_field() -> String {
    "customfield_26905".to_string()
}

fn default_business_service_impact_field() -> String {
    "customfield_13618".to_string()
}

fn default_release_status() -> String {
    "Ready for Release".to_string()
}

/// Issue tracker settings.
///
/// `project` doubles as the ticket-key prefix searched for in commit titles
/// and as the project that owns release versions.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct JiraConfig {
    #[serde(default = "default_jira_url")]
    pub url: String,

    #[serde(default = "default_project")]
    pub project: String,

    #[serde(default = "default_user_story_field")]
    pub user_story_field: String,

    #[serde(default = "default_impact_field")]
    pub impact_field: String,

    #[serde(default = "default_business_service_impact_field")]
    pub business_service_impact_field: String,

    /// Status tickets are moved to when a release candidate is created
    #[serde(default = "default_release_status")]
    pub release_status: String,
}

impl JiraConfig {
    /// Browser link for a ticket key
    pub fn browse_link(&self, key: &str) -> String {
        format!("{}/browse/{}", self.url.trim_end_matches('/'), key)
    }
}

impl Default for JiraConfig {
    fn default() -> Self {
        JiraConfig {
            url: default_jira_url(),
            project: default_project(),
            user_story_field: default_user_story_field(),
            impact_field: default_impact_field(),
            business_service_impact_field: default_business_service_impact_field(),
            release_status: default_release_status(),
        }
    }
}

fn default_confluence_url() -> String {
    "https://nhsd-confluence.digital.nhs.uk/".to_string()
}

fn default_space() -> String {
    "APIMC".to_string()
}

/// Wiki settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ConfluenceConfig {
    #[serde(default = "default_confluence_url")]
    pub url: String,

    /// Space new release-candidate pages are created in
    #[serde(default = "default_space")]
    pub space: String,
}

impl Default for ConfluenceConfig {
    fn default() -> Self {
        ConfluenceConfig {
            url: default_confluence_url(),
            space: default_space(),
        }
    }
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

fn default_web_url() -> String {
    "https://github.com".to_string()
}

fn default_owner() -> String {
    "NHSDigital".to_string()
}

/// Repository host settings
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct GithubConfig {
    #[serde(default = "default_api_url")]
    pub api_url: String,

    #[serde(default = "default_web_url")]
    pub web_url: String,

    #[serde(default = "default_owner")]
    pub owner: String,
}

impl GithubConfig {
    /// Link to a release tag page
    pub fn release_link(&self, repo: &str, tag: &str) -> String {
        format!("{}/releases/tag/{}", self.repo_link(repo), tag)
    }

    /// Link to a single commit
    pub fn commit_link(&self, repo: &str, commit_id: &str) -> String {
        format!("{}/commit/{}", self.repo_link(repo), commit_id)
    }

    fn repo_link(&self, repo: &str) -> String {
        format!("{}/{}/{}", self.web_url.trim_end_matches('/'), self.owner, repo)
    }
}

impl Default for GithubConfig {
    fn default() -> Self {
        GithubConfig {
            api_url: default_api_url(),
            web_url: default_web_url(),
            owner: default_owner(),
        }
    }
}

fn default_level() -> String {
    "info".to_string()
}

/// Logging options; `RUST_LOG` takes precedence over `level`.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        LoggingConfig {
            level: default_level(),
        }
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter
/// 2. `releasenotes.toml` in current directory
/// 3. `.releasenotes.toml` in user config directory
/// 4. Default configuration if no file found
///
/// # Arguments
/// * `config_path` - Optional path to custom configuration file
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&str>) -> Result<Config> {
    let config_str = if let Some(path) = config_path {
        fs::read_to_string(path)?
    } else if Path::new("./releasenotes.toml").exists() {
        fs::read_to_string("./releasenotes.toml")?
    } else if let Some(config_dir) = dirs::config_dir() {
        let config_path = config_dir.join(".releasenotes.toml");
        if config_path.exists() {
            fs::read_to_string(config_path)?
        } else {
            return Ok(Config::default());
        }
    } else {
        return Ok(Config::default());
    };

    let config: Config = toml::from_str(&config_str)?;
    Ok(config)
}

pub const JIRA_TOKEN_VAR: &str = "JIRA_TOKEN";
pub const CONFLUENCE_TOKEN_VAR: &str = "CONFLUENCE_TOKEN";
pub const GITHUB_TOKEN_VAR: &str = "GITHUB_TOKEN";

/// Read an API token from the environment; blank values count as missing
pub fn token_from_env(var: &str) -> Result<String> {
    match env::var(var) {
        Ok(token) if !token.trim().is_empty() => Ok(token),
        _ => Err(ReleaseNotesError::config(format!(
            "environment variable {} is not set",
            var
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_browse_link() {
        let jira = JiraConfig::default();
        assert_eq!(
            jira.browse_link("AEA-1"),
            "https://nhsd-jira.digital.nhs.uk/browse/AEA-1"
        );
    }

    #[test]
    fn test_github_links() {
        let github = GithubConfig::default();
        assert_eq!(
            github.release_link("repo", "v1"),
            "https://github.com/NHSDigital/repo/releases/tag/v1"
        );
        assert_eq!(
            github.commit_link("repo", "abc"),
            "https://github.com/NHSDigital/repo/commit/abc"
        );
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str("[jira]\nproject = \"PSU\"\n").unwrap();
        assert_eq!(config.jira.project, "PSU");
        assert_eq!(config.jira.impact_field, "customfield_26905");
        assert_eq!(config.confluence.space, "APIMC");
    }
}
