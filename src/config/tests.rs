//! Unit tests for configuration validation.

use rstest::rstest;

use super::{GleanerConfig, OperationMode};
use crate::error::GleanerError;

fn config_with(
    github: Option<&str>,
    google: Option<&str>,
    jira: Option<&str>,
    page: Option<&str>,
) -> GleanerConfig {
    GleanerConfig {
        github: github.map(str::to_owned),
        google: google.map(str::to_owned),
        jira: jira.map(str::to_owned),
        page: page.map(str::to_owned),
        ..GleanerConfig::default()
    }
}

#[rstest]
#[case::github(config_with(Some("Fix bug"), None, None, None), OperationMode::PullRequest)]
#[case::google(
    config_with(None, Some("https://docs.google.com/document/d/x/edit"), None, None),
    OperationMode::GoogleDocument
)]
#[case::jira(config_with(None, None, Some("PROJ-1"), None), OperationMode::JiraTicket)]
#[case::page(
    config_with(None, None, None, Some("https://x.atlassian.net/wiki/spaces/A/pages/1")),
    OperationMode::ConfluencePage
)]
fn single_selector_resolves_its_mode(
    #[case] config: GleanerConfig,
    #[case] expected: OperationMode,
) {
    let mode = config
        .operation_mode()
        .expect("single selector should resolve");
    assert_eq!(mode, expected, "mode mismatch");
}

#[rstest]
fn no_selector_is_a_configuration_error() {
    let config = config_with(None, None, None, None);
    let result = config.operation_mode();
    assert!(
        matches!(
            result,
            Err(GleanerError::Configuration { ref message }) if message.contains("exactly one")
        ),
        "expected Configuration error, got {result:?}"
    );
}

#[rstest]
fn multiple_selectors_are_a_configuration_error() {
    let config = config_with(Some("Fix bug"), None, Some("PROJ-1"), None);
    let result = config.operation_mode();
    assert!(
        matches!(
            result,
            Err(GleanerError::Configuration { ref message })
                if message.contains("mutually exclusive")
        ),
        "expected Configuration error, got {result:?}"
    );
}

#[rstest]
fn explicit_github_settings_win_over_the_environment() {
    let config = GleanerConfig {
        github_token: Some(String::from("configured-token")),
        github_owner: Some(String::from("octo")),
        github_repo: Some(String::from("repo")),
        ..GleanerConfig::default()
    };

    let token = config
        .resolve_github_token()
        .expect("token should resolve from config");
    assert_eq!(token, "configured-token", "token mismatch");

    let (owner, repo) = config
        .resolve_github_repository()
        .expect("repository should resolve from config");
    assert_eq!((owner.as_str(), repo.as_str()), ("octo", "repo"));
}

#[rstest]
fn explicit_atlassian_settings_win_over_the_environment() {
    let config = GleanerConfig {
        jira_domain: Some(String::from("https://test.atlassian.net")),
        jira_email: Some(String::from("user@example.com")),
        jira_token: Some(String::from("api-token")),
        ..GleanerConfig::default()
    };

    let (domain, email, token) = config
        .resolve_atlassian_workspace()
        .expect("workspace should resolve from config");
    assert_eq!(domain, "https://test.atlassian.net", "domain mismatch");
    assert_eq!(email, "user@example.com", "email mismatch");
    assert_eq!(token, "api-token", "token mismatch");
}
