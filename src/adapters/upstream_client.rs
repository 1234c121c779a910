use std::{
    sync::{
        Arc,
        atomic::{AtomicUsize, Ordering},
    },
    time::Duration,
};

use async_trait::async_trait;
use http::{HeaderValue, header};
use tokio_retry::{RetryIf, strategy::ExponentialBackoff};
use tracing::Instrument;

use crate::{
    config::models::UpstreamConfig,
    core::client::ApiClient,
    ports::upstream::{
        RawResponse, UpstreamError, UpstreamRequest, UpstreamResult, UpstreamTransport,
    },
    tracing_setup,
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded";

/// How transport failures are retried.
///
/// The first retry waits `wait`, each following one doubles the previous
/// delay, and no single delay exceeds `max_wait`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RetryPolicy {
    pub retries: usize,
    pub wait: Duration,
    pub max_wait: Duration,
}

impl RetryPolicy {
    pub fn delays(&self) -> impl Iterator<Item = Duration> {
        let factor = (self.wait.as_millis() as u64 / 2).max(1);
        ExponentialBackoff::from_millis(2)
            .factor(factor)
            .max_delay(self.max_wait)
            .take(self.retries)
    }
}

/// Upstream transport backed by `reqwest`.
///
/// Retries only when no response could be obtained (connect errors, timeouts,
/// broken bodies). Any HTTP status, 5xx included, is handed back as-is.
pub struct ReqwestTransport {
    client: reqwest::Client,
    retry: RetryPolicy,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration, retry: RetryPolicy) -> UpstreamResult<Self> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .user_agent(concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| UpstreamError::InvalidConfig(format!("cannot build HTTP client: {e}")))?;

        tracing::debug!(
            "Created upstream transport with timeout {:?} and {} retries",
            timeout,
            retry.retries
        );
        Ok(Self { client, retry })
    }

    pub fn from_config(config: &UpstreamConfig) -> UpstreamResult<Self> {
        let timeout = config
            .timeout()
            .map_err(|e| UpstreamError::InvalidConfig(format!("upstream.timeout: {e}")))?;
        let wait = config
            .retry_wait()
            .map_err(|e| UpstreamError::InvalidConfig(format!("upstream.retry_wait: {e}")))?;
        let max_wait = config
            .retry_max_wait()
            .map_err(|e| UpstreamError::InvalidConfig(format!("upstream.retry_max_wait: {e}")))?;

        Self::new(
            timeout,
            RetryPolicy {
                retries: config.retry_count,
                wait,
                max_wait,
            },
        )
    }

    async fn send_once(&self, request: &UpstreamRequest) -> Result<RawResponse, reqwest::Error> {
        let mut builder = self
            .client
            .request(request.method.clone(), &request.url)
            .headers(request.headers.clone());

        if let Some(form) = &request.form {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(form.iter())
                .finish();
            builder = builder
                .header(header::CONTENT_TYPE, HeaderValue::from_static(FORM_CONTENT_TYPE))
                .body(encoded);
        }

        let response = builder.send().await?;
        let status = response.status();
        let body = response.bytes().await?;
        Ok(RawResponse { status, body })
    }
}

/// Builder errors (bad URL, bad header) will not improve on a second try.
fn is_retryable(error: &reqwest::Error) -> bool {
    !error.is_builder()
}

#[async_trait]
impl UpstreamTransport for ReqwestTransport {
    async fn send(&self, request: UpstreamRequest) -> UpstreamResult<RawResponse> {
        let span = tracing_setup::create_upstream_span(request.method.as_str(), &request.url);
        let attempts = AtomicUsize::new(0);

        tracing::debug!(
            parent: &span,
            headers = ?request.headers,
            form = ?request.form,
            "Sending {} {}",
            request.method,
            request.url
        );

        let outcome = RetryIf::spawn(
            self.retry.delays(),
            || {
                let attempt = attempts.fetch_add(1, Ordering::Relaxed) + 1;
                if attempt > 1 {
                    tracing::warn!("Retrying {} {} (attempt {})", request.method, request.url, attempt);
                }
                self.send_once(&request)
            },
            is_retryable,
        )
        .instrument(span.clone())
        .await;

        let attempts = attempts.load(Ordering::Relaxed);
        span.record("attempts", attempts);

        match outcome {
            Ok(response) => {
                span.record("http.status_code", response.status.as_u16());
                tracing::debug!(
                    parent: &span,
                    body = %String::from_utf8_lossy(&response.body),
                    "{} {} -> {} ({} bytes)",
                    request.method,
                    request.url,
                    response.status,
                    response.body.len()
                );
                Ok(response)
            }
            Err(e) => {
                tracing::error!(
                    parent: &span,
                    "{} {} failed after {} attempt(s): {}",
                    request.method,
                    request.url,
                    attempts,
                    e
                );
                Err(UpstreamError::Transport {
                    method: request.method,
                    url: request.url,
                    attempts,
                    message: e.to_string(),
                })
            }
        }
    }
}

/// Wire the `reqwest` transport and the API client from configuration.
pub fn build_api_client(config: &UpstreamConfig) -> UpstreamResult<ApiClient> {
    let transport = ReqwestTransport::from_config(config)?;
    ApiClient::new(
        config.base_url.clone(),
        config.api_key.clone(),
        Arc::new(transport),
    )
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use axum::{
        Router,
        extract::State,
        http::{HeaderMap, StatusCode},
        routing::any,
    };
    use bytes::Bytes;
    use http::Method;
    use tokio::net::TcpListener;

    use super::*;
    use crate::core::form::FormBody;

    #[derive(Clone, Default)]
    struct Seen {
        hits: Arc<AtomicUsize>,
        last: Arc<Mutex<Option<(HeaderMap, Bytes)>>>,
    }

    async fn spawn_upstream(status: StatusCode) -> (String, Seen) {
        let seen = Seen::default();
        let app = Router::new()
            .route(
                "/{*rest}",
                any(
                    move |State(seen): State<Seen>, headers: HeaderMap, body: Bytes| async move {
                        seen.hits.fetch_add(1, Ordering::SeqCst);
                        *seen.last.lock().unwrap() = Some((headers, body));
                        (status, r#"{"status_code":1}"#)
                    },
                ),
            )
            .with_state(seen.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (format!("http://{addr}"), seen)
    }

    fn quick_policy(retries: usize) -> RetryPolicy {
        RetryPolicy {
            retries,
            wait: Duration::from_millis(1),
            max_wait: Duration::from_millis(5),
        }
    }

    fn request(method: Method, url: String, form: Option<FormBody>) -> UpstreamRequest {
        UpstreamRequest {
            method,
            url,
            headers: HeaderMap::new(),
            form,
        }
    }

    #[test]
    fn test_backoff_doubles_and_caps() {
        let policy = RetryPolicy {
            retries: 4,
            wait: Duration::from_secs(5),
            max_wait: Duration::from_secs(20),
        };
        let delays: Vec<_> = policy.delays().collect();
        assert_eq!(
            delays,
            vec![
                Duration::from_secs(5),
                Duration::from_secs(10),
                Duration::from_secs(20),
                Duration::from_secs(20),
            ]
        );
    }

    #[tokio::test]
    async fn test_form_body_is_url_encoded() {
        let (base, seen) = spawn_upstream(StatusCode::OK).await;
        let transport = ReqwestTransport::new(Duration::from_secs(5), quick_policy(0)).unwrap();

        let mut form = FormBody::new();
        form.insert("urls[0]".into(), "/a b".into());
        form.insert("content-type".into(), "*".into());

        let response = transport
            .send(request(Method::DELETE, format!("{base}/cache/example.com"), Some(form)))
            .await
            .unwrap();
        assert_eq!(response.status, StatusCode::OK);

        let (headers, body) = seen.last.lock().unwrap().clone().unwrap();
        assert_eq!(headers.get(header::CONTENT_TYPE).unwrap(), FORM_CONTENT_TYPE);
        let pairs: FormBody = url::form_urlencoded::parse(&body).into_owned().collect();
        assert_eq!(pairs.get("urls[0]").unwrap(), "/a b");
        assert_eq!(pairs.get("content-type").unwrap(), "*");
    }

    #[tokio::test]
    async fn test_server_errors_are_not_retried() {
        let (base, seen) = spawn_upstream(StatusCode::SERVICE_UNAVAILABLE).await;
        let transport = ReqwestTransport::new(Duration::from_secs(5), quick_policy(3)).unwrap();

        let response = transport
            .send(request(Method::GET, format!("{base}/domain"), None))
            .await
            .unwrap();

        assert_eq!(response.status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(seen.hits.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_connection_failures_are_retried_then_reported() {
        let addr = {
            let probe = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
            probe.local_addr().unwrap()
        };
        let transport = ReqwestTransport::new(Duration::from_secs(2), quick_policy(2)).unwrap();

        let err = transport
            .send(request(Method::GET, format!("http://{addr}/domain"), None))
            .await
            .unwrap_err();

        match err {
            UpstreamError::Transport { attempts, .. } => assert_eq!(attempts, 3),
            other => panic!("expected transport error, got {other:?}"),
        }
    }

    #[derive(Clone, Default)]
    struct CapturedLogs(Arc<Mutex<Vec<u8>>>);

    impl std::io::Write for CapturedLogs {
        fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> std::io::Result<()> {
            Ok(())
        }
    }

    impl CapturedLogs {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    #[tokio::test]
    async fn test_request_form_and_response_body_are_traced() {
        let logs = CapturedLogs::default();
        let writer = logs.clone();
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::DEBUG)
            .with_ansi(false)
            .with_writer(move || writer.clone())
            .finish();
        let _guard = tracing::subscriber::set_default(subscriber);

        let (base, _seen) = spawn_upstream(StatusCode::OK).await;
        let transport = ReqwestTransport::new(Duration::from_secs(5), quick_policy(0)).unwrap();

        let mut form = FormBody::new();
        form.insert("content".into(), "198.51.100.7".into());
        transport
            .send(request(Method::POST, format!("{base}/dns/example.com"), Some(form)))
            .await
            .unwrap();

        let text = logs.text();
        assert!(text.contains("198.51.100.7"), "form missing from logs: {text}");
        assert!(text.contains(r#"{"status_code":1}"#), "response body missing from logs: {text}");
        assert!(text.contains("upstream_request"));
    }

    #[test]
    fn test_from_config_rejects_bad_durations() {
        let config = UpstreamConfig {
            timeout: "soon".into(),
            ..UpstreamConfig::default()
        };
        assert!(matches!(
            ReqwestTransport::from_config(&config),
            Err(UpstreamError::InvalidConfig(_))
        ));
    }

    #[test]
    fn test_build_api_client_requires_key() {
        let config = UpstreamConfig::default();
        assert!(matches!(
            build_api_client(&config),
            Err(UpstreamError::InvalidConfig(_))
        ));
    }
}
