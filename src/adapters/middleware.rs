//! Axum middleware shared by every route.
//!
//! The host redirect runs outermost so that mapped hostnames never reach the
//! REST handlers. Request id and timing layers only decorate the response and
//! the logs.
use std::{sync::Arc, time::Instant};

use axum::{
    extract::{Request, State},
    http::{
        HeaderValue, StatusCode,
        header::{HOST, LOCATION},
    },
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::Instrument;

use crate::{
    core::{
        MappingStore,
        redirect::{resolve, strip_port},
    },
    tracing_setup::create_request_span,
};

pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// State for [`host_redirect_middleware`].
#[derive(Debug, Clone)]
pub struct HostRedirect {
    store: Arc<MappingStore>,
    bypass_prefixes: Arc<[String]>,
}

impl HostRedirect {
    pub fn new(store: Arc<MappingStore>, bypass_prefixes: &[String]) -> Self {
        Self {
            store,
            bypass_prefixes: bypass_prefixes.into(),
        }
    }

    /// Whether `path` is excluded from redirect evaluation.
    pub fn bypasses(&self, path: &str) -> bool {
        self.bypass_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Redirect target for `host` + `path`, if the host is mapped.
    pub fn target_for(&self, host: &str, path: &str) -> Option<String> {
        let destination = self.store.lookup(strip_port(host)).ok()?;
        Some(resolve(&destination, path))
    }
}

/// Answer `301 Moved Permanently` for mapped hostnames; pass everything else on.
pub async fn host_redirect_middleware(
    State(redirect): State<HostRedirect>,
    req: Request,
    next: Next,
) -> Response {
    let path = req.uri().path().to_string();
    if redirect.bypasses(&path) {
        return next.run(req).await;
    }

    let host = req
        .headers()
        .get(HOST)
        .and_then(|value| value.to_str().ok())
        .or_else(|| req.uri().authority().map(|authority| authority.as_str()))
        .map(str::to_string);

    let Some(target) = host
        .as_deref()
        .and_then(|host| redirect.target_for(host, &path))
    else {
        return next.run(req).await;
    };

    match HeaderValue::from_str(&target) {
        Ok(location) => {
            tracing::info!(
                "Redirecting {}{} to {}",
                host.as_deref().unwrap_or_default(),
                path,
                target
            );
            (StatusCode::MOVED_PERMANENTLY, [(LOCATION, location)]).into_response()
        }
        Err(e) => {
            tracing::warn!("Redirect target {} is not a valid header value: {}", target, e);
            next.run(req).await
        }
    }
}

/// Log start/end of a request including latency.
pub async fn request_timing_middleware(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().clone();
    let uri = req.uri().clone();

    tracing::debug!("Started processing {} {}", method, uri);

    let response = next.run(req).await;
    let duration = start.elapsed();

    tracing::Span::current().record("http.status_code", response.status().as_u16());
    tracing::Span::current().record("duration_ms", duration.as_millis() as u64);
    tracing::info!(
        "Completed {} {} - {} in {:?}",
        method,
        uri,
        response.status(),
        duration
    );

    response
}

/// Reuse the caller's `X-Request-ID` or mint a UUID, run the request inside a
/// span carrying it and echo it back on the response.
pub async fn request_id_middleware(req: Request, next: Next) -> Response {
    let request_id = req
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .map(str::to_string)
        .unwrap_or_else(|| uuid::Uuid::new_v4().to_string());

    let span = create_request_span(req.method().as_str(), req.uri().path(), &request_id);
    let mut response = next.run(req).instrument(span).await;

    if let Ok(header_value) = HeaderValue::from_str(&request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, header_value);
    }

    response
}

#[cfg(test)]
mod tests {
    use axum::{Router, body::Body, middleware, routing::get};
    use tower::ServiceExt; // for oneshot

    use super::*;
    use crate::models::Mapping;

    fn redirect_app(bypass: &[&str]) -> Router {
        let store = Arc::new(MappingStore::new([Mapping::new(
            "a.example.com",
            "https://bucket.example/site/",
        )]));
        let bypass: Vec<String> = bypass.iter().map(|p| p.to_string()).collect();
        let state = HostRedirect::new(store, &bypass);

        Router::new()
            .fallback(|| async { "passed through" })
            .layer(middleware::from_fn_with_state(state, host_redirect_middleware))
    }

    fn request(host: &str, path: &str) -> Request {
        Request::builder()
            .uri(path)
            .header(HOST, host)
            .body(Body::empty())
            .unwrap()
    }

    #[tokio::test]
    async fn test_mapped_host_is_redirected() {
        let response = redirect_app(&["/api/"])
            .oneshot(request("a.example.com:8080", "/index.html"))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::MOVED_PERMANENTLY);
        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "https://bucket.example/site/index.html"
        );
    }

    #[tokio::test]
    async fn test_root_path_redirects_to_destination() {
        let response = redirect_app(&[])
            .oneshot(request("a.example.com", "/"))
            .await
            .unwrap();

        assert_eq!(
            response.headers().get(LOCATION).unwrap(),
            "https://bucket.example/site/"
        );
    }

    #[tokio::test]
    async fn test_unmapped_host_passes_through() {
        let response = redirect_app(&[])
            .oneshot(request("b.example.com", "/index.html"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_bypass_prefix_skips_lookup() {
        let response = redirect_app(&["/api/"])
            .oneshot(request("a.example.com", "/api/v1/dns"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[test]
    fn test_target_for_ignores_port() {
        let store = Arc::new(MappingStore::new([Mapping::new("x.test", "https://d.test")]));
        let redirect = HostRedirect::new(store, &[]);
        assert_eq!(
            redirect.target_for("x.test:443", "/a").as_deref(),
            Some("https://d.test/a")
        );
        assert_eq!(redirect.target_for("y.test", "/a"), None);
    }

    #[tokio::test]
    async fn test_request_id_middleware() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_id_middleware));

        let response = app
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();

        let request_id = response
            .headers()
            .get(REQUEST_ID_HEADER)
            .unwrap()
            .to_str()
            .unwrap();
        assert!(uuid::Uuid::parse_str(request_id).is_ok());
    }

    #[tokio::test]
    async fn test_request_id_is_propagated() {
        let app = Router::new()
            .route("/", get(|| async { "ok" }))
            .layer(middleware::from_fn(request_id_middleware));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/")
                    .header(REQUEST_ID_HEADER, "abc-123")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.headers().get(REQUEST_ID_HEADER).unwrap(), "abc-123");
    }
}
