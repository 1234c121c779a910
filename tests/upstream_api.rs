// End-to-end tests: inbound router -> reqwest transport -> fake upstream
use std::{
    sync::{Arc, Mutex},
    time::Duration,
};

use axum::{
    Router,
    body::Body,
    extract::{Request, State},
    http::{HeaderMap, Method, StatusCode, Uri},
    routing::any,
};
use bytes::Bytes;
use cdnbridge::{
    ApiClient, AppState, MappingStore, ReqwestTransport, UpstreamError,
    adapters::RetryPolicy,
    config::RedirectConfig,
    core::services::DomainService,
    router,
};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower::ServiceExt; // for oneshot

#[derive(Debug, Clone)]
struct Captured {
    method: Method,
    path: String,
    token: Option<String>,
    content_type: Option<String>,
    body: String,
}

#[derive(Clone, Default)]
struct Upstream {
    calls: Arc<Mutex<Vec<Captured>>>,
}

impl Upstream {
    fn last(&self) -> Captured {
        self.calls.lock().unwrap().last().cloned().unwrap()
    }
}

/// Fake CDN API: `/fail/...` answers 422, everything else a canned success.
async fn spawn_upstream() -> (String, Upstream) {
    let upstream = Upstream::default();
    let app = Router::new()
        .route(
            "/{*rest}",
            any(
                |State(upstream): State<Upstream>,
                 method: Method,
                 uri: Uri,
                 headers: HeaderMap,
                 body: Bytes| async move {
                    let header = |name: &str| {
                        headers
                            .get(name)
                            .and_then(|v| v.to_str().ok())
                            .map(str::to_string)
                    };
                    upstream.calls.lock().unwrap().push(Captured {
                        method,
                        path: uri.path().to_string(),
                        token: header("gocache-token"),
                        content_type: header("content-type"),
                        body: String::from_utf8_lossy(&body).into_owned(),
                    });

                    if uri.path().contains("/fail/") {
                        (
                            StatusCode::UNPROCESSABLE_ENTITY,
                            r#"{"status_code":0,"response":"invalid record"}"#,
                        )
                    } else if uri.path() == "/v1/domain" {
                        (
                            StatusCode::OK,
                            r#"{"status_code":1,"response":{"domains":["example.com"],"size":1}}"#,
                        )
                    } else {
                        (StatusCode::OK, r#"{"status_code":1,"response":{"records":[]}}"#)
                    }
                },
            ),
        )
        .with_state(upstream.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    (format!("http://{addr}/v1"), upstream)
}

fn client(base_url: &str) -> ApiClient {
    let transport = ReqwestTransport::new(
        Duration::from_secs(5),
        RetryPolicy {
            retries: 1,
            wait: Duration::from_millis(1),
            max_wait: Duration::from_millis(2),
        },
    )
    .unwrap();
    ApiClient::new(base_url, "integration-token", Arc::new(transport)).unwrap()
}

fn app(base_url: &str) -> Router {
    router(
        AppState::new(client(base_url), Arc::new(MappingStore::default())),
        &RedirectConfig::default(),
    )
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn test_dns_create_reaches_upstream_as_form() {
    let (base_url, upstream) = spawn_upstream().await;

    let response = app(&base_url)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/dns/example.com")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "name": "www", "type": "A", "content": "1.2.3.4", "ttl": 3600, "cloud": 1 })
                        .to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);

    let call = upstream.last();
    assert_eq!(call.method, Method::POST);
    assert_eq!(call.path, "/v1/dns/example.com");
    assert_eq!(call.token.as_deref(), Some("integration-token"));
    assert_eq!(
        call.content_type.as_deref(),
        Some("application/x-www-form-urlencoded")
    );
    assert!(call.body.contains("name=www"));
    assert!(call.body.contains("type=A"));
    assert!(call.body.contains("ttl=3600"));
}

#[tokio::test]
async fn test_upstream_rejection_is_passed_through() {
    let (base_url, _upstream) = spawn_upstream().await;

    let response = app(&base_url)
        .oneshot(
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/cache/fail/all")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body_json(response).await["response"], "invalid record");
}

#[tokio::test]
async fn test_cache_purge_sends_indexed_fields() {
    let (base_url, upstream) = spawn_upstream().await;

    let response = app(&base_url)
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/api/v1/cache/purge")
                .header("content-type", "application/json")
                .body(Body::from(
                    json!({ "domain": "example.com", "urls": ["/a.css"] }).to_string(),
                ))
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let call = upstream.last();
    assert_eq!(call.method, Method::DELETE);
    assert_eq!(call.path, "/v1/cache/example.com");
    assert!(call.body.contains("urls%5B0%5D=%2Fa.css"));
}

#[tokio::test]
async fn test_service_decodes_domain_listing() {
    let (base_url, upstream) = spawn_upstream().await;

    let listing = DomainService::new(client(&base_url))
        .list_domains()
        .await
        .unwrap();

    assert_eq!(listing.response.domains, vec!["example.com"]);
    assert_eq!(upstream.last().method, Method::GET);
}

#[tokio::test]
async fn test_unreachable_upstream_is_transport_error() {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let err = DomainService::new(client(&format!("http://{addr}/v1")))
        .list_domains()
        .await
        .unwrap_err();

    match err {
        UpstreamError::Transport { attempts, .. } => assert_eq!(attempts, 2),
        other => panic!("expected transport error, got {other:?}"),
    }
}
