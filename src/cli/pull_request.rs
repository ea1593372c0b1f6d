//! Pull request lookup handler.
//!
//! The `--github` value is either a pull request URL or an exact title.
//! URLs are parsed directly; titles trigger a full scan of the configured
//! repository's pull requests.

use gleaner::github::{
    OctocrabGateway, PersonalAccessToken, PullRequestIntake, PullRequestLocator, RepositoryLocator,
};
use gleaner::{GleanerConfig, GleanerError};

use super::output;

/// Looks up a pull request by URL or title and prints its record.
///
/// # Errors
///
/// Returns [`GleanerError::Configuration`] when the selector value is
/// absent, and propagates locator, gateway, and output failures.
pub async fn run(config: &GleanerConfig) -> Result<(), GleanerError> {
    let input = config
        .github
        .as_deref()
        .ok_or_else(|| GleanerError::Configuration {
            message: "a pull request title or URL is required".to_owned(),
        })?;
    let token = PersonalAccessToken::new(config.resolve_github_token()?)?;

    let record = if input.starts_with("http") {
        let locator = PullRequestLocator::parse(input)?;
        let gateway = OctocrabGateway::for_token(&token, locator.api_base().as_str())?;
        let intake = PullRequestIntake::new(&gateway);
        intake.load(&locator).await?
    } else {
        let (owner, repo) = config.resolve_github_repository()?;
        let repository = RepositoryLocator::from_owner_repo(&owner, &repo)?;
        let gateway = OctocrabGateway::for_token(&token, repository.api_base().as_str())?;
        let intake = PullRequestIntake::new(&gateway);
        intake.find_by_title(&repository, input).await?
    };

    output::write_json(&record)
}
