//! Unit tests for the GitHub lookup module.

use mockall::predicate::always;
use rstest::rstest;

use super::{
    FileChange, GithubError, MockPullRequestGateway, PersonalAccessToken, PullRequestIntake,
    PullRequestLocator, PullRequestMetadata, PullRequestSummary, RepositoryLocator,
};

fn sample_repository() -> RepositoryLocator {
    RepositoryLocator::from_owner_repo("octo", "repo").expect("sample repository should build")
}

fn sample_locator() -> PullRequestLocator {
    PullRequestLocator::parse("https://github.com/octo/repo/pull/4")
        .expect("sample locator should parse")
}

#[rstest]
fn parses_standard_github_url() {
    let locator = PullRequestLocator::parse("https://github.com/o/r/pull/42")
        .expect("should parse standard GitHub URL");
    assert_eq!(locator.owner().as_str(), "o", "owner mismatch");
    assert_eq!(locator.repository().as_str(), "r", "repository mismatch");
    assert_eq!(locator.number().get(), 42_u64, "number mismatch");
    assert_eq!(
        locator.api_base().as_str(),
        "https://api.github.com/",
        "api base mismatch"
    );
}

#[rstest]
fn parses_enterprise_url() {
    let locator = PullRequestLocator::parse("https://ghe.example.com/foo/bar/pull/7")
        .expect("should parse enterprise URL");
    assert_eq!(
        locator.api_base().as_str(),
        "https://ghe.example.com/api/v3",
        "enterprise api base mismatch"
    );
}

#[rstest]
fn rejects_missing_number() {
    let result = PullRequestLocator::parse("https://github.com/octo/repo/pull/");
    assert!(
        matches!(result, Err(GithubError::MissingPathSegments)),
        "expected MissingPathSegments, got {result:?}"
    );
}

#[rstest]
fn rejects_non_numeric_number() {
    let result = PullRequestLocator::parse("https://github.com/octo/repo/pull/not-a-number");
    assert!(
        matches!(result, Err(GithubError::InvalidPullRequestNumber)),
        "expected InvalidPullRequestNumber, got {result:?}"
    );
}

#[rstest]
fn rejects_issues_path() {
    let result = PullRequestLocator::parse("https://github.com/octo/repo/issues/4");
    assert!(
        matches!(result, Err(GithubError::MissingPathSegments)),
        "expected MissingPathSegments for issues path, got {result:?}"
    );
}

#[rstest]
fn rejects_invalid_url() {
    let result = PullRequestLocator::parse("octo/repo/pull/4");
    assert!(
        matches!(result, Err(GithubError::InvalidUrl(_))),
        "expected InvalidUrl for malformed URL, got {result:?}"
    );
}

#[rstest]
fn rejects_empty_token() {
    let result = PersonalAccessToken::new(String::new());
    assert!(
        matches!(result, Err(GithubError::MissingToken)),
        "expected MissingToken, got {result:?}"
    );
}

#[tokio::test]
async fn find_by_title_scans_the_full_listing_before_failing() {
    let repository = sample_repository();
    let mut gateway = MockPullRequestGateway::new();

    gateway
        .expect_list_pull_requests()
        .with(always())
        .times(1)
        .returning(|_| {
            Ok(vec![
                PullRequestSummary {
                    number: 1,
                    title: Some(String::from("first")),
                },
                PullRequestSummary {
                    number: 2,
                    title: Some(String::from("second")),
                },
                PullRequestSummary {
                    number: 3,
                    title: None,
                },
            ])
        });
    // No metadata fetch may happen when nothing matches.
    gateway.expect_pull_request().times(0);

    let intake = PullRequestIntake::new(&gateway);
    let result = intake.find_by_title(&repository, "missing").await;

    assert!(
        matches!(
            result,
            Err(GithubError::NoPullRequestWithTitle { ref title }) if title == "missing"
        ),
        "expected NoPullRequestWithTitle, got {result:?}"
    );
}

#[tokio::test]
async fn find_by_title_loads_the_first_exact_match() {
    let repository = sample_repository();
    let mut gateway = MockPullRequestGateway::new();

    gateway
        .expect_list_pull_requests()
        .with(always())
        .times(1)
        .returning(|_| {
            Ok(vec![
                PullRequestSummary {
                    number: 8,
                    title: Some(String::from("other")),
                },
                PullRequestSummary {
                    number: 9,
                    title: Some(String::from("wanted")),
                },
            ])
        });

    gateway
        .expect_pull_request()
        .withf(|locator| locator.number().get() == 9)
        .times(1)
        .returning(|locator| {
            Ok(PullRequestMetadata {
                number: locator.number().get(),
                title: Some(String::from("wanted")),
                body: Some(String::from("body text")),
            })
        });
    gateway
        .expect_pull_request_comments()
        .times(1)
        .returning(|_| Ok(vec![String::from("looks good")]));
    gateway
        .expect_pull_request_files()
        .times(1)
        .returning(|_| {
            Ok(vec![FileChange {
                file: String::from("src/lib.rs"),
                patch: Some(String::from("@@ -1 +1 @@")),
            }])
        });

    let intake = PullRequestIntake::new(&gateway);
    let record = intake
        .find_by_title(&repository, "wanted")
        .await
        .expect("lookup should succeed");

    assert_eq!(record.number, 9, "number mismatch");
    assert_eq!(record.title, "wanted", "title mismatch");
    assert_eq!(
        record.description,
        Some(String::from("body text")),
        "description mismatch"
    );
    assert_eq!(record.comments, vec![String::from("looks good")]);
}

#[tokio::test]
async fn load_preserves_missing_patches() {
    let locator = sample_locator();
    let mut gateway = MockPullRequestGateway::new();

    gateway.expect_pull_request().times(1).returning(|_| {
        Ok(PullRequestMetadata {
            number: 4,
            title: Some(String::from("demo")),
            body: None,
        })
    });
    gateway
        .expect_pull_request_comments()
        .times(1)
        .returning(|_| Ok(Vec::new()));
    gateway
        .expect_pull_request_files()
        .times(1)
        .returning(|_| {
            Ok(vec![
                FileChange {
                    file: String::from("image.png"),
                    patch: None,
                },
                FileChange {
                    file: String::from("src/main.rs"),
                    patch: Some(String::from("@@ -1,3 +1,4 @@")),
                },
            ])
        });

    let intake = PullRequestIntake::new(&gateway);
    let record = intake.load(&locator).await.expect("load should succeed");

    assert_eq!(record.file_changes.len(), 2, "file change count mismatch");
    assert_eq!(
        record.file_changes.first().map(|change| change.patch.clone()),
        Some(None),
        "binary patch must remain absent, not empty"
    );
    assert_eq!(record.description, None, "description should stay absent");
}

mod gateway_http {
    //! HTTP-level tests exercising the Octocrab gateway against wiremock.

    use rstest::{fixture, rstest};
    use tokio::runtime::Runtime;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::gateway::PullRequestGateway;
    use super::super::{
        GithubError, OctocrabGateway, PersonalAccessToken, PullRequestLocator, RepositoryLocator,
    };

    struct GatewayFixture {
        runtime: Runtime,
        server: MockServer,
        gateway: OctocrabGateway,
    }

    impl GatewayFixture {
        fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
            self.runtime.block_on(future)
        }
    }

    #[fixture]
    fn gateway_fixture() -> GatewayFixture {
        let token = PersonalAccessToken::new("valid-token").expect("token should be valid");
        let runtime = Runtime::new().expect("runtime should start");
        let server = runtime.block_on(MockServer::start());
        let gateway = {
            let _guard = runtime.enter();
            OctocrabGateway::for_token(&token, &format!("{}/api/v3", server.uri()))
                .expect("should create gateway")
        };
        GatewayFixture {
            runtime,
            server,
            gateway,
        }
    }

    #[rstest]
    fn pull_request_queries_the_exact_repo_and_number(gateway_fixture: GatewayFixture) {
        let locator = PullRequestLocator::parse("https://github.com/o/r/pull/42")
            .expect("locator should parse");

        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/api/v3/repos/o/r/pulls/42"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "number": 42,
                    "title": "demo",
                    "body": "text"
                })))
                .expect(1)
                .mount(&gateway_fixture.server)
                .await;

            let metadata = gateway_fixture
                .gateway
                .pull_request(&locator)
                .await
                .expect("fetch should succeed");
            assert_eq!(metadata.number, 42, "number mismatch");
        });
    }

    #[rstest]
    fn listing_requests_every_state(gateway_fixture: GatewayFixture) {
        let repository =
            RepositoryLocator::from_owner_repo("o", "r").expect("repository should build");

        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/api/v3/repos/o/r/pulls"))
                .and(query_param("state", "all"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
                    { "number": 1, "title": "first" }
                ])))
                .expect(1)
                .mount(&gateway_fixture.server)
                .await;

            let summaries = gateway_fixture
                .gateway
                .list_pull_requests(&repository)
                .await
                .expect("listing should succeed");
            assert_eq!(summaries.len(), 1, "summary count mismatch");
        });
    }

    #[rstest]
    fn missing_pull_request_maps_to_not_found(gateway_fixture: GatewayFixture) {
        let locator = PullRequestLocator::parse("https://github.com/o/r/pull/404")
            .expect("locator should parse");

        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/api/v3/repos/o/r/pulls/404"))
                .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                    "message": "Not Found",
                    "documentation_url": "https://docs.github.com"
                })))
                .mount(&gateway_fixture.server)
                .await;

            let result = gateway_fixture.gateway.pull_request(&locator).await;
            assert!(
                matches!(result, Err(GithubError::NotFound { .. })),
                "expected NotFound, got {result:?}"
            );
        });
    }
}
