//! Unit tests for the Jira/Confluence lookup module.

use mockall::predicate::eq;
use rstest::rstest;

use super::{
    AtlassianError, MockAtlassianGateway, PageLookup, PageRecord, TicketAndPageReader,
    TicketRecord, WorkspaceCredentials,
};

fn sample_page() -> PageRecord {
    PageRecord {
        id: String::from("123"),
        title: String::from("Test Page"),
        content: String::from("Test content"),
    }
}

#[rstest]
fn rejects_blank_credentials() {
    let result = WorkspaceCredentials::new("", "token");
    assert!(
        matches!(result, Err(AtlassianError::MissingConfiguration { .. })),
        "expected MissingConfiguration for blank email, got {result:?}"
    );

    let result = WorkspaceCredentials::new("user@example.com", "  ");
    assert!(
        matches!(result, Err(AtlassianError::MissingConfiguration { .. })),
        "expected MissingConfiguration for blank token, got {result:?}"
    );
}

#[tokio::test]
async fn read_ticket_flattens_the_issue() {
    let mut gateway = MockAtlassianGateway::new();
    gateway
        .expect_issue()
        .with(eq("TEST-123"))
        .times(1)
        .returning(|_| {
            Ok(TicketRecord {
                key: String::from("TEST-123"),
                summary: String::from("Test Summary"),
                description: Some(String::from("Test Description")),
                comments: vec![String::from("Test Comment")],
            })
        });

    let reader = TicketAndPageReader::new(gateway);
    let record = reader
        .read_ticket("TEST-123")
        .await
        .expect("lookup should succeed");

    assert_eq!(record.key, "TEST-123", "key mismatch");
    assert_eq!(record.summary, "Test Summary", "summary mismatch");
    assert_eq!(record.comments.len(), 1, "comment count mismatch");
}

#[tokio::test]
async fn ticket_not_found_propagates_as_a_fault() {
    let mut gateway = MockAtlassianGateway::new();
    gateway.expect_issue().times(1).returning(|_| {
        Err(AtlassianError::NotFound {
            message: String::from("fetch issue failed: no such issue"),
        })
    });

    let reader = TicketAndPageReader::new(gateway);
    let result = reader.read_ticket("TEST-404").await;
    assert!(
        matches!(result, Err(AtlassianError::NotFound { .. })),
        "expected NotFound, got {result:?}"
    );
}

#[tokio::test]
async fn connection_probe_reports_the_space_count() {
    let mut gateway = MockAtlassianGateway::new();
    gateway
        .expect_space_count()
        .with(eq(1_u32))
        .times(1)
        .returning(|_| Ok(1));

    let reader = TicketAndPageReader::new(gateway);
    let message = reader.check_connection().await;
    assert!(
        message.contains("Connected successfully") && message.contains("Found 1 spaces"),
        "unexpected probe message: {message}"
    );
}

#[tokio::test]
async fn connection_probe_reports_the_raw_fault() {
    let mut gateway = MockAtlassianGateway::new();
    gateway.expect_space_count().times(1).returning(|_| {
        Err(AtlassianError::Network {
            message: String::from("Connection failed"),
        })
    });

    let reader = TicketAndPageReader::new(gateway);
    let message = reader.check_connection().await;
    assert!(
        message.contains("Connection failed"),
        "unexpected probe message: {message}"
    );
}

#[tokio::test]
async fn page_lookup_without_spaces_segment_makes_no_network_calls() {
    // A mock with no expectations panics on any call.
    let gateway = MockAtlassianGateway::new();
    let reader = TicketAndPageReader::new(gateway);

    let lookup = reader
        .read_page_by_url("https://invalid-url.com/wiki/pages/123")
        .await;

    assert!(
        matches!(
            lookup,
            PageLookup::Failed { ref error } if error.contains("Unable to parse space key")
        ),
        "expected parse failure, got {lookup:?}"
    );
}

#[tokio::test]
async fn unreachable_space_short_circuits_before_any_page_fetch() {
    let mut gateway = MockAtlassianGateway::new();
    gateway
        .expect_space()
        .with(eq("TEST"))
        .times(1)
        .returning(|_| {
            Err(AtlassianError::NotFound {
                message: String::from("Space not found"),
            })
        });
    gateway.expect_page_by_id().times(0);
    gateway.expect_page_by_title().times(0);

    let reader = TicketAndPageReader::new(gateway);
    let lookup = reader
        .read_page_by_url("https://test.atlassian.net/wiki/spaces/TEST/pages/123/Test+Page")
        .await;

    assert!(
        matches!(
            lookup,
            PageLookup::Failed { ref error } if error.contains("Error accessing Confluence space")
        ),
        "expected space access failure, got {lookup:?}"
    );
}

#[tokio::test]
async fn numeric_token_resolves_by_id_first() {
    let mut gateway = MockAtlassianGateway::new();
    gateway.expect_space().times(1).returning(|_| Ok(()));
    gateway
        .expect_page_by_id()
        .with(eq(123_u64))
        .times(1)
        .returning(|_| Ok(sample_page()));
    gateway.expect_page_by_title().times(0);

    let reader = TicketAndPageReader::new(gateway);
    let lookup = reader
        .read_page_by_url("https://test.atlassian.net/wiki/spaces/TEST/pages/456/123")
        .await;

    assert_eq!(lookup, PageLookup::Page(sample_page()), "lookup mismatch");
}

#[tokio::test]
async fn failed_id_lookup_falls_back_to_a_title_lookup() {
    let mut gateway = MockAtlassianGateway::new();
    gateway.expect_space().times(1).returning(|_| Ok(()));
    gateway
        .expect_page_by_id()
        .with(eq(9999_u64))
        .times(1)
        .returning(|_| {
            Err(AtlassianError::NotFound {
                message: String::from("no content with id 9999"),
            })
        });
    gateway
        .expect_page_by_title()
        .with(eq("TEST"), eq("9999"))
        .times(1)
        .returning(|_, _| Ok(sample_page()));

    let reader = TicketAndPageReader::new(gateway);
    let lookup = reader
        .read_page_by_url("https://test.atlassian.net/wiki/spaces/TEST/pages/9999")
        .await;

    assert_eq!(
        lookup,
        PageLookup::Page(sample_page()),
        "title fallback should win after the id attempt fails"
    );
}

#[tokio::test]
async fn title_fallback_resolves_slug_urls() {
    let mut gateway = MockAtlassianGateway::new();
    gateway.expect_space().times(1).returning(|_| Ok(()));
    gateway.expect_page_by_id().times(0);
    gateway
        .expect_page_by_title()
        .with(eq("TEST"), eq("Test Page"))
        .times(1)
        .returning(|_, _| Ok(sample_page()));

    let reader = TicketAndPageReader::new(gateway);
    let lookup = reader
        .read_page_by_url("https://test.atlassian.net/wiki/spaces/TEST/pages/Test+Page")
        .await;

    assert_eq!(lookup, PageLookup::Page(sample_page()), "lookup mismatch");
}

#[tokio::test]
async fn exhausted_strategies_return_the_final_failure() {
    let mut gateway = MockAtlassianGateway::new();
    gateway.expect_space().times(1).returning(|_| Ok(()));
    gateway.expect_page_by_id().times(1).returning(|_| {
        Err(AtlassianError::NotFound {
            message: String::from("no content with id 123"),
        })
    });
    gateway.expect_page_by_title().times(1).returning(|_, _| {
        Err(AtlassianError::NotFound {
            message: String::from("no page titled '123' in space TEST"),
        })
    });

    let reader = TicketAndPageReader::new(gateway);
    let lookup = reader
        .read_page_by_url("https://test.atlassian.net/wiki/spaces/TEST/pages/123")
        .await;

    assert!(
        matches!(
            lookup,
            PageLookup::Failed { ref error }
                if error.contains("Error reading Confluence page")
                    && error.contains("no page titled")
        ),
        "expected final failure, got {lookup:?}"
    );
}

#[rstest]
fn page_lookup_serializes_to_the_error_shape() {
    let failed = PageLookup::failed("Unable to parse space key from URL: x");
    let serialized = serde_json::to_value(&failed).expect("serialization should succeed");
    assert_eq!(
        serialized,
        serde_json::json!({ "error": "Unable to parse space key from URL: x" }),
        "error shape mismatch"
    );

    let page = PageLookup::Page(sample_page());
    let serialized = serde_json::to_value(&page).expect("serialization should succeed");
    assert_eq!(
        serialized,
        serde_json::json!({ "id": "123", "title": "Test Page", "content": "Test content" }),
        "page shape mismatch"
    );
}

mod gateway_http {
    //! HTTP-level tests exercising the reqwest gateway against wiremock.

    use rstest::{fixture, rstest};
    use tokio::runtime::Runtime;
    use wiremock::matchers::{basic_auth, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    use super::super::gateway::{AtlassianGateway, HttpAtlassianGateway, WorkspaceCredentials};
    use super::super::{AtlassianError, PageRecord};

    struct GatewayFixture {
        runtime: Runtime,
        server: MockServer,
        gateway: HttpAtlassianGateway,
    }

    impl GatewayFixture {
        fn block_on<F: std::future::Future>(&self, future: F) -> F::Output {
            self.runtime.block_on(future)
        }
    }

    #[fixture]
    fn gateway_fixture() -> GatewayFixture {
        let runtime = Runtime::new().expect("runtime should start");
        let server = runtime.block_on(MockServer::start());
        let credentials = WorkspaceCredentials::new("user@example.com", "api-token")
            .expect("credentials should build");
        let gateway = {
            let _guard = runtime.enter();
            HttpAtlassianGateway::new(&server.uri(), credentials).expect("gateway should build")
        };
        GatewayFixture {
            runtime,
            server,
            gateway,
        }
    }

    #[rstest]
    fn issue_fetch_authenticates_and_flattens(gateway_fixture: GatewayFixture) {
        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/rest/api/2/issue/TEST-123"))
                .and(basic_auth("user@example.com", "api-token"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "key": "TEST-123",
                    "fields": {
                        "summary": "Test Summary",
                        "description": "Test Description",
                        "comment": { "comments": [ { "body": "Test Comment" } ] }
                    }
                })))
                .expect(1)
                .mount(&gateway_fixture.server)
                .await;

            let ticket = gateway_fixture
                .gateway
                .issue("TEST-123")
                .await
                .expect("fetch should succeed");
            assert_eq!(ticket.key, "TEST-123", "key mismatch");
            assert_eq!(
                ticket.comments,
                vec![String::from("Test Comment")],
                "comments mismatch"
            );
        });
    }

    #[rstest]
    fn missing_issue_maps_to_not_found(gateway_fixture: GatewayFixture) {
        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/rest/api/2/issue/TEST-404"))
                .respond_with(ResponseTemplate::new(404).set_body_json(serde_json::json!({
                    "errorMessages": ["Issue does not exist"]
                })))
                .mount(&gateway_fixture.server)
                .await;

            let result = gateway_fixture.gateway.issue("TEST-404").await;
            assert!(
                matches!(result, Err(AtlassianError::NotFound { .. })),
                "expected NotFound, got {result:?}"
            );
        });
    }

    #[rstest]
    fn page_by_id_expands_the_storage_body(gateway_fixture: GatewayFixture) {
        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/wiki/rest/api/content/123"))
                .and(query_param("expand", "body.storage"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "id": "123",
                    "title": "Test Page",
                    "body": { "storage": { "value": "Test content" } }
                })))
                .expect(1)
                .mount(&gateway_fixture.server)
                .await;

            let page = gateway_fixture
                .gateway
                .page_by_id(123)
                .await
                .expect("fetch should succeed");
            assert_eq!(
                page,
                PageRecord {
                    id: String::from("123"),
                    title: String::from("Test Page"),
                    content: String::from("Test content"),
                },
                "page mismatch"
            );
        });
    }

    #[rstest]
    fn page_by_title_requires_a_non_empty_result_set(gateway_fixture: GatewayFixture) {
        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/wiki/rest/api/content"))
                .and(query_param("spaceKey", "TEST"))
                .and(query_param("title", "Missing Page"))
                .respond_with(
                    ResponseTemplate::new(200)
                        .set_body_json(serde_json::json!({ "results": [] })),
                )
                .mount(&gateway_fixture.server)
                .await;

            let result = gateway_fixture
                .gateway
                .page_by_title("TEST", "Missing Page")
                .await;
            assert!(
                matches!(result, Err(AtlassianError::NotFound { .. })),
                "expected NotFound for empty results, got {result:?}"
            );
        });
    }

    #[rstest]
    fn space_listing_passes_the_limit(gateway_fixture: GatewayFixture) {
        gateway_fixture.block_on(async {
            Mock::given(method("GET"))
                .and(path("/wiki/rest/api/space"))
                .and(query_param("limit", "1"))
                .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                    "results": [ { "key": "TEST" } ]
                })))
                .expect(1)
                .mount(&gateway_fixture.server)
                .await;

            let count = gateway_fixture
                .gateway
                .space_count(1)
                .await
                .expect("listing should succeed");
            assert_eq!(count, 1, "space count mismatch");
        });
    }
}
