//! Request pipeline tests
//!
//! Drives the pipeline and the wired client through a scripted transport.
mod utils;

use async_trait::async_trait;
use marquee_lib::modules::auth::{CredentialProvider, CredentialStore};
use marquee_lib::modules::catalog::{MovieDetailApi, MovieSearchApi};
use marquee_lib::modules::remote::{
    RawResponse, RemoteService, RequestDescriptor, RequestInterceptor, ResponseEnvelope,
    ResponseInterceptor, StatusPolicy, TransportError, TransportRequest,
};
use marquee_lib::shared::utils::init_logger;
use marquee_lib::shared::{ClientConfig, RemoteError, RemoteResult};
use marquee_lib::Marquee;
use std::sync::Arc;
use utils::{fixture, RecordingTransport};

struct TrailMarker(&'static str);

#[async_trait]
impl RequestInterceptor for TrailMarker {
    async fn intercept(&self, request: TransportRequest) -> RemoteResult<TransportRequest> {
        let trail = match request.header("x-trail") {
            Some(trail) => format!("{},{}", trail, self.0),
            None => self.0.to_string(),
        };
        Ok(request.with_header("x-trail", trail))
    }
}

struct BodyMarker(u8);

#[async_trait]
impl ResponseInterceptor for BodyMarker {
    async fn intercept(&self, envelope: ResponseEnvelope) -> RemoteResult<ResponseEnvelope> {
        let mut body = envelope.body().to_vec();
        body.push(self.0);
        Ok(envelope.with_body(body))
    }
}

fn client(transport: Arc<RecordingTransport>, config: ClientConfig) -> Marquee {
    Marquee::with_transport(config, transport)
}

// ================================================================================================
// INTERCEPTOR ORDERING
// ================================================================================================

#[tokio::test]
async fn request_interceptors_run_in_registration_order() {
    let transport = Arc::new(RecordingTransport::new().respond_ok(b"{}".to_vec()));
    let service = RemoteService::builder(transport.clone())
        .request_interceptor(Arc::new(TrailMarker("first")))
        .request_interceptor(Arc::new(TrailMarker("second")))
        .request_interceptor(Arc::new(TrailMarker("third")))
        .build();

    service
        .execute_raw(RequestDescriptor::get("https://api.example.com/items"))
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().header("x-trail"),
        Some("first,second,third")
    );
}

#[tokio::test]
async fn response_interceptors_run_in_registration_order() {
    let transport = Arc::new(RecordingTransport::new().respond_ok(Vec::new()));
    let service = RemoteService::builder(transport)
        .response_interceptor(Arc::new(BodyMarker(b'a')))
        .response_interceptor(Arc::new(BodyMarker(b'b')))
        .response_interceptor(Arc::new(BodyMarker(b'c')))
        .build();

    let envelope = service
        .execute_raw(RequestDescriptor::get("https://api.example.com/items"))
        .await
        .unwrap();

    assert_eq!(envelope.body(), b"abc");
    assert_eq!(envelope.status().code, 200);
    assert!(envelope.status().success);
}

// ================================================================================================
// STATUS AND FAILURE CLASSIFICATION
// ================================================================================================

#[tokio::test]
async fn server_error_carries_reason_and_code() {
    let transport = Arc::new(
        RecordingTransport::new().respond(Ok(RawResponse::new(500, b"oops".to_vec()))),
    );
    let service = RemoteService::builder(transport).build();

    let err = service
        .execute_raw(RequestDescriptor::get("https://api.example.com/items"))
        .await
        .unwrap_err();

    match err {
        RemoteError::ServerError { status, code } => {
            assert_eq!(code, 500);
            assert_eq!(status, "Internal Server Error");
        }
        other => panic!("unexpected error: {:?}", other),
    }
}

#[tokio::test]
async fn legacy_policy_rejects_other_2xx_codes() {
    let transport = Arc::new(
        RecordingTransport::new()
            .respond(Ok(RawResponse::new(204, Vec::new())))
            .respond(Ok(RawResponse::new(204, Vec::new()))),
    );

    let standard = RemoteService::builder(transport.clone()).build();
    assert!(standard
        .execute_raw(RequestDescriptor::get("https://api.example.com/items"))
        .await
        .is_ok());

    let legacy = RemoteService::builder(transport)
        .status_policy(StatusPolicy::Legacy)
        .build();
    assert!(matches!(
        legacy
            .execute_raw(RequestDescriptor::get("https://api.example.com/items"))
            .await,
        Err(RemoteError::ServerError { code: 204, .. })
    ));
}

#[tokio::test]
async fn transport_failures_are_classified() {
    let transport = Arc::new(
        RecordingTransport::new()
            .respond(Err(TransportError::Network(anyhow::anyhow!("timed out"))))
            .respond(Err(TransportError::Other(anyhow::anyhow!("bad builder")))),
    );
    let service = RemoteService::builder(transport).build();

    let network = service
        .execute_raw(RequestDescriptor::get("https://api.example.com/items"))
        .await
        .unwrap_err();
    assert!(network.is_network_related());

    let unknown = service
        .execute_raw(RequestDescriptor::get("https://api.example.com/items"))
        .await
        .unwrap_err();
    assert!(matches!(unknown, RemoteError::UnknownFailure(_)));
}

#[tokio::test]
async fn malformed_url_never_reaches_transport() {
    let transport = Arc::new(RecordingTransport::new());
    let service = RemoteService::builder(transport.clone()).build();

    let err = service
        .execute_raw(RequestDescriptor::get("not a url"))
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::InvalidUrl));
    assert!(transport.requests().is_empty());
}

// ================================================================================================
// WIRED CLIENT
// ================================================================================================

#[tokio::test]
async fn search_sends_credentials_and_maps_results() {
    let transport = Arc::new(RecordingTransport::new().respond_ok(fixture("search_page.json")));
    let client = client(transport.clone(), ClientConfig::default());
    client
        .credentials()
        .save_credentials(Some("user-token".to_string()), None, Some("sid=1".to_string()));

    let movies = client.search_api().search_movies("film").await.unwrap();

    let titles: Vec<&str> = movies.iter().map(|m| m.title.as_str()).collect();
    assert_eq!(titles, vec!["Featured Film", "Other Film"]);

    let request = transport.last_request();
    assert_eq!(request.header("x-hs-usertoken"), Some("user-token"));
    assert_eq!(request.header("x-hs-platform"), Some("web"));
    assert_eq!(request.header("cookie"), Some("sid=1"));
    assert_eq!(request.header("accept"), Some("application/json"));
    assert!(request.header("user-agent").is_some());

    let query = request.url().query().unwrap();
    assert!(query.contains("search_query=film"));
    assert!(query.contains("slug=in&slug=explore"));
    assert!(query.contains("referrer_props="));
}

#[tokio::test]
async fn anonymous_search_omits_user_token() {
    let transport = Arc::new(RecordingTransport::new().respond_ok(fixture("search_empty.json")));
    let client = client(transport.clone(), ClientConfig::default());

    let movies = client.search_api().search_movies("nothing").await.unwrap();

    assert!(movies.is_empty());
    assert!(!client.credentials().is_authenticated());
    assert_eq!(transport.last_request().header("x-hs-usertoken"), None);
}

#[tokio::test]
async fn detail_strips_watch_prefix_and_maps_fields() {
    let transport = Arc::new(RecordingTransport::new().respond_ok(fixture("detail_page.json")));
    let config = ClientConfig {
        detail_base_url: "https://api.example.com/slugs".to_string(),
        ..ClientConfig::default()
    };
    let client = client(transport.clone(), config);

    let detail = client
        .detail_api()
        .fetch_movie_detail("/watch/in/movies/featured-film/1")
        .await
        .unwrap();

    assert_eq!(
        transport.last_request().url().as_str(),
        "https://api.example.com/slugs/in/movies/featured-film/1"
    );
    assert_eq!(detail.title, "Featured Film");
    assert_eq!(detail.subtitle.as_deref(), Some("Actor One, Actor Two"));
    assert_eq!(detail.rating.as_deref(), Some("U/A 13+"));
    assert_eq!(detail.duration.as_deref(), Some("2h 12m"));
}

#[tokio::test]
async fn detail_without_content_is_invalid_response() {
    let transport =
        Arc::new(RecordingTransport::new().respond_ok(fixture("detail_missing_content.json")));
    let client = client(transport, ClientConfig::default());

    let err = client
        .detail_api()
        .fetch_movie_detail("/in/movies/x/1")
        .await
        .unwrap_err();

    assert!(matches!(err, RemoteError::InvalidResponse));
}

#[tokio::test]
async fn undecodable_body_is_decoding_failure() {
    let transport = Arc::new(RecordingTransport::new().respond_ok(b"<html>".to_vec()));
    let client = client(transport, ClientConfig::default());

    let err = client.search_api().search_movies("x").await.unwrap_err();

    assert!(matches!(err, RemoteError::DecodingFailure(_)));
}

#[tokio::test]
async fn concurrent_searches_share_one_pipeline() {
    init_logger();
    let transport = Arc::new(
        RecordingTransport::new()
            .respond_ok(fixture("search_empty.json"))
            .respond_ok(fixture("search_empty.json"))
            .respond_ok(fixture("search_empty.json")),
    );
    let client = client(transport.clone(), ClientConfig::default());
    let api = client.search_api();

    let outcomes =
        futures::future::join_all(["a", "b", "c"].iter().map(|query| api.search_movies(query)))
            .await;

    assert!(outcomes
        .iter()
        .all(|outcome| matches!(outcome, Ok(movies) if movies.is_empty())));
    assert_eq!(transport.requests().len(), 3);
}

#[test]
fn credential_headers_follow_saved_platform() {
    let store = CredentialStore::new("test-agent");
    store.save_credentials(None, Some("android".to_string()), None);

    let headers = tokio_test::block_on(store.auth_headers());

    assert_eq!(headers.get("x-hs-platform").map(String::as_str), Some("android"));
    assert_eq!(headers.get("User-Agent").map(String::as_str), Some("test-agent"));
    assert!(!headers.contains_key("x-hs-usertoken"));
}
