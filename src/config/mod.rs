//! Application configuration loaded from CLI, environment, and files.
//!
//! This module provides a unified configuration struct that merges values
//! from command-line arguments, environment variables, and configuration
//! files using ortho-config's layered approach.
//!
//! # Precedence
//!
//! Configuration values are loaded with the following precedence (lowest to
//! highest):
//!
//! 1. **Defaults** – Built-in application defaults
//! 2. **Configuration file** – `.gleaner.toml` in current directory, home
//!    directory, or XDG config directory
//! 3. **Environment variables** – `GLEANER_*`, or the legacy service
//!    variables (`GITHUB_TOKEN`, `JIRA_DOMAIN`, …)
//! 4. **Command-line arguments** – the selector flags and credentials
//!
//! # Selectors
//!
//! Exactly one of `--github`, `--google`, `--jira`, or `--page` must be
//! supplied; [`GleanerConfig::operation_mode`] enforces the exclusivity.

use std::env;

use ortho_config::OrthoConfig;
use serde::{Deserialize, Serialize};

use crate::atlassian::AtlassianError;
use crate::error::GleanerError;
use crate::github::GithubError;

/// Operation mode determined by the selector flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperationMode {
    /// Look up a pull request by title or URL.
    PullRequest,
    /// Look up a Google Doc or Sheet by URL.
    GoogleDocument,
    /// Look up a Jira ticket by key.
    JiraTicket,
    /// Look up a Confluence page by URL.
    ConfluencePage,
}

/// Application configuration supporting CLI, environment, and file sources.
///
/// # Environment Variables
///
/// - `GLEANER_GITHUB` or `--github`: pull request title or URL
/// - `GLEANER_GOOGLE` or `--google`: document/sheet URL
/// - `GLEANER_JIRA` or `--jira`: ticket key
/// - `GLEANER_PAGE` or `--page`: Confluence page URL
/// - `GLEANER_GITHUB_TOKEN` or `GITHUB_TOKEN` (legacy): GitHub access token
/// - `GLEANER_GITHUB_OWNER` or `GITHUB_REPO_OWNER` (legacy): repository owner
/// - `GLEANER_GITHUB_REPO` or `GITHUB_REPO` (legacy): repository name
/// - `GLEANER_JIRA_DOMAIN` or `JIRA_DOMAIN` (legacy): workspace domain
/// - `GLEANER_JIRA_EMAIL` or `JIRA_EMAIL` (legacy): workspace account email
/// - `GLEANER_JIRA_TOKEN` or `JIRA_TOKEN` (legacy): workspace API token
#[derive(Debug, Clone, Default, Deserialize, Serialize, OrthoConfig)]
#[serde(default)]
#[ortho_config(
    prefix = "GLEANER",
    discovery(
        dotfile_name = ".gleaner.toml",
        config_file_name = "gleaner.toml",
        app_name = "gleaner"
    )
)]
pub struct GleanerConfig {
    /// GitHub pull request title or URL to look up.
    ///
    /// Can be provided via:
    /// - CLI: `--github <TITLE-OR-URL>` or `-g <TITLE-OR-URL>`
    /// - Environment: `GLEANER_GITHUB`
    /// - Config file: `github = "..."`
    #[ortho_config(cli_short = 'g')]
    pub github: Option<String>,

    /// Google Doc or Sheet URL to look up.
    ///
    /// Can be provided via:
    /// - CLI: `--google <URL>` or `-G <URL>`
    /// - Environment: `GLEANER_GOOGLE`
    /// - Config file: `google = "..."`
    #[ortho_config(cli_short = 'G')]
    pub google: Option<String>,

    /// Jira ticket key to look up (e.g. `PROJ-123`).
    ///
    /// Can be provided via:
    /// - CLI: `--jira <KEY>` or `-j <KEY>`
    /// - Environment: `GLEANER_JIRA`
    /// - Config file: `jira = "..."`
    #[ortho_config(cli_short = 'j')]
    pub jira: Option<String>,

    /// Confluence page URL to look up.
    ///
    /// Can be provided via:
    /// - CLI: `--page <URL>` or `-p <URL>`
    /// - Environment: `GLEANER_PAGE`
    /// - Config file: `page = "..."`
    #[ortho_config(cli_short = 'p')]
    pub page: Option<String>,

    /// Enables diagnostic output on stderr.
    ///
    /// Can be provided via:
    /// - CLI: `--debug` / `-d`
    /// - Config file: `debug = true`
    ///
    /// Note: `ortho_config` does not load boolean values from the
    /// environment.
    #[ortho_config(cli_short = 'd')]
    pub debug: bool,

    /// Personal access token for GitHub API authentication.
    ///
    /// Falls back to the legacy `GITHUB_TOKEN` environment variable.
    #[ortho_config()]
    pub github_token: Option<String>,

    /// Repository owner for by-title pull request scans.
    ///
    /// Falls back to the legacy `GITHUB_REPO_OWNER` environment variable.
    #[ortho_config()]
    pub github_owner: Option<String>,

    /// Repository name for by-title pull request scans.
    ///
    /// Falls back to the legacy `GITHUB_REPO` environment variable.
    #[ortho_config()]
    pub github_repo: Option<String>,

    /// Atlassian workspace domain, e.g. `https://example.atlassian.net`.
    ///
    /// Falls back to the legacy `JIRA_DOMAIN` environment variable.
    #[ortho_config()]
    pub jira_domain: Option<String>,

    /// Atlassian account email for basic auth.
    ///
    /// Falls back to the legacy `JIRA_EMAIL` environment variable.
    #[ortho_config()]
    pub jira_email: Option<String>,

    /// Atlassian API token for basic auth.
    ///
    /// Falls back to the legacy `JIRA_TOKEN` environment variable.
    #[ortho_config()]
    pub jira_token: Option<String>,
}

impl GleanerConfig {
    /// Determines the operation mode from the selector flags.
    ///
    /// # Errors
    ///
    /// Returns [`GleanerError::Configuration`] when no selector or more than
    /// one selector is supplied.
    pub fn operation_mode(&self) -> Result<OperationMode, GleanerError> {
        let selected: Vec<OperationMode> = [
            self.github.as_ref().map(|_| OperationMode::PullRequest),
            self.google.as_ref().map(|_| OperationMode::GoogleDocument),
            self.jira.as_ref().map(|_| OperationMode::JiraTicket),
            self.page.as_ref().map(|_| OperationMode::ConfluencePage),
        ]
        .into_iter()
        .flatten()
        .collect();

        match selected.as_slice() {
            [mode] => Ok(*mode),
            [] => Err(GleanerError::Configuration {
                message: "provide exactly one of --github, --google, --jira, or --page"
                    .to_owned(),
            }),
            _ => Err(GleanerError::Configuration {
                message: "the selector flags --github, --google, --jira, and --page are \
                          mutually exclusive"
                    .to_owned(),
            }),
        }
    }

    /// Resolves the GitHub token, falling back to `GITHUB_TOKEN`.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::MissingToken`] when no source provides one.
    pub fn resolve_github_token(&self) -> Result<String, GithubError> {
        self.github_token
            .clone()
            .or_else(|| env::var("GITHUB_TOKEN").ok())
            .ok_or(GithubError::MissingToken)
    }

    /// Resolves the repository owner and name for by-title scans, falling
    /// back to `GITHUB_REPO_OWNER` and `GITHUB_REPO`.
    ///
    /// # Errors
    ///
    /// Returns [`GithubError::MissingRepository`] when either is absent.
    pub fn resolve_github_repository(&self) -> Result<(String, String), GithubError> {
        let owner = self
            .github_owner
            .clone()
            .or_else(|| env::var("GITHUB_REPO_OWNER").ok())
            .ok_or_else(|| GithubError::MissingRepository {
                message: "repository owner is required (use --github-owner or GITHUB_REPO_OWNER)"
                    .to_owned(),
            })?;
        let repo = self
            .github_repo
            .clone()
            .or_else(|| env::var("GITHUB_REPO").ok())
            .ok_or_else(|| GithubError::MissingRepository {
                message: "repository name is required (use --github-repo or GITHUB_REPO)"
                    .to_owned(),
            })?;
        Ok((owner, repo))
    }

    /// Resolves the Atlassian workspace coordinates, falling back to the
    /// legacy `JIRA_DOMAIN`/`JIRA_EMAIL`/`JIRA_TOKEN` variables.
    ///
    /// # Errors
    ///
    /// Returns [`AtlassianError::MissingConfiguration`] when any value is
    /// absent.
    pub fn resolve_atlassian_workspace(&self) -> Result<(String, String, String), AtlassianError> {
        let domain = self
            .jira_domain
            .clone()
            .or_else(|| env::var("JIRA_DOMAIN").ok())
            .ok_or_else(|| AtlassianError::MissingConfiguration {
                message: "workspace domain is required (set JIRA_DOMAIN)".to_owned(),
            })?;
        let email = self
            .jira_email
            .clone()
            .or_else(|| env::var("JIRA_EMAIL").ok())
            .ok_or_else(|| AtlassianError::MissingConfiguration {
                message: "account email is required (set JIRA_EMAIL)".to_owned(),
            })?;
        let token = self
            .jira_token
            .clone()
            .or_else(|| env::var("JIRA_TOKEN").ok())
            .ok_or_else(|| AtlassianError::MissingConfiguration {
                message: "API token is required (set JIRA_TOKEN)".to_owned(),
            })?;
        Ok((domain, email, token))
    }
}

#[cfg(test)]
mod tests;
