use std::sync::Arc;

use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode, header};
use serde::{Serialize, de::DeserializeOwned};

use crate::{
    core::form::{self, FormBody},
    ports::upstream::{UpstreamError, UpstreamRequest, UpstreamResult, UpstreamTransport},
};

/// Header carrying the API key on every upstream call.
pub const AUTH_HEADER: HeaderName = HeaderName::from_static("gocache-token");

/// An upstream reply with its body decoded into `T` when possible.
///
/// Non-2xx statuses are not errors at this level; callers decide what to do
/// with them. A body that does not fit `T` leaves `decoded` as `Err` while the
/// status and raw bytes stay available.
#[derive(Debug)]
pub struct UpstreamResponse<T> {
    pub status: StatusCode,
    pub body: Bytes,
    pub decoded: Result<T, serde_json::Error>,
}

impl<T> UpstreamResponse<T> {
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Collapse into the decoded value, turning non-2xx replies into
    /// [`UpstreamError::Status`] and shape mismatches into
    /// [`UpstreamError::Decoding`].
    pub fn into_success(self) -> UpstreamResult<T> {
        if !self.status.is_success() {
            return Err(UpstreamError::Status {
                status: self.status,
                body: self.body,
            });
        }

        self.decoded.map_err(|source| UpstreamError::Decoding {
            status: self.status,
            body: self.body,
            source,
        })
    }
}

/// Authenticated client for the CDN REST API.
///
/// Paths are appended verbatim to the base URL. Cloning is cheap and every
/// clone shares the same transport.
#[derive(Clone)]
pub struct ApiClient {
    base_url: String,
    api_key: String,
    transport: Arc<dyn UpstreamTransport>,
}

impl std::fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ApiClient")
            .field("base_url", &self.base_url)
            .field("api_key", &"<redacted>")
            .finish_non_exhaustive()
    }
}

impl ApiClient {
    /// Fails with [`UpstreamError::InvalidConfig`] when `base_url` or
    /// `api_key` is empty. Nothing is sent during construction.
    pub fn new(
        base_url: impl Into<String>,
        api_key: impl Into<String>,
        transport: Arc<dyn UpstreamTransport>,
    ) -> UpstreamResult<Self> {
        let base_url = base_url.into();
        let api_key = api_key.into();

        if base_url.trim().is_empty() {
            return Err(UpstreamError::InvalidConfig("base URL is empty".into()));
        }
        if api_key.trim().is_empty() {
            return Err(UpstreamError::InvalidConfig("API key is empty".into()));
        }
        if HeaderValue::from_str(&api_key).is_err() {
            return Err(UpstreamError::InvalidConfig(
                "API key contains characters not allowed in an HTTP header".into(),
            ));
        }

        Ok(Self {
            base_url,
            api_key,
            transport,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> UpstreamResult<UpstreamResponse<T>> {
        self.execute(Method::GET, path, &[], None).await
    }

    pub async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, &str)],
    ) -> UpstreamResult<UpstreamResponse<T>> {
        self.execute(Method::GET, path, query, None).await
    }

    pub async fn post<T, B>(&self, path: &str, body: &B) -> UpstreamResult<UpstreamResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let form = form::encode(body)?;
        self.execute(Method::POST, path, &[], Some(form)).await
    }

    pub async fn put<T, B>(&self, path: &str, body: &B) -> UpstreamResult<UpstreamResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let form = form::encode(body)?;
        self.execute(Method::PUT, path, &[], Some(form)).await
    }

    pub async fn delete<T, B>(&self, path: &str, body: &B) -> UpstreamResult<UpstreamResponse<T>>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let form = form::encode(body)?;
        self.execute(Method::DELETE, path, &[], Some(form)).await
    }

    pub async fn delete_no_body<T: DeserializeOwned>(
        &self,
        path: &str,
    ) -> UpstreamResult<UpstreamResponse<T>> {
        self.execute(Method::DELETE, path, &[], None).await
    }

    async fn execute<T: DeserializeOwned>(
        &self,
        method: Method,
        path: &str,
        query: &[(&str, &str)],
        form: Option<FormBody>,
    ) -> UpstreamResult<UpstreamResponse<T>> {
        let request = UpstreamRequest {
            method,
            url: self.url_for(path, query),
            headers: self.headers()?,
            form,
        };

        let raw = self.transport.send(request).await?;
        let decoded = serde_json::from_slice(&raw.body);

        Ok(UpstreamResponse {
            status: raw.status,
            body: raw.body,
            decoded,
        })
    }

    fn url_for(&self, path: &str, query: &[(&str, &str)]) -> String {
        let mut url = format!("{}{}", self.base_url, path);
        if !query.is_empty() {
            let encoded = url::form_urlencoded::Serializer::new(String::new())
                .extend_pairs(query)
                .finish();
            url.push(if url.contains('?') { '&' } else { '?' });
            url.push_str(&encoded);
        }
        url
    }

    fn headers(&self) -> UpstreamResult<HeaderMap> {
        let mut token = HeaderValue::from_str(&self.api_key)
            .map_err(|e| UpstreamError::InvalidConfig(e.to_string()))?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(AUTH_HEADER, token);
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        Ok(headers)
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! Recording transport shared by the client and service tests.
    use std::{
        collections::VecDeque,
        sync::{Arc, Mutex},
    };

    use async_trait::async_trait;
    use bytes::Bytes;
    use http::StatusCode;

    use crate::ports::upstream::{
        RawResponse, UpstreamRequest, UpstreamResult, UpstreamTransport,
    };

    #[derive(Default)]
    pub struct RecordingTransport {
        pub requests: Mutex<Vec<UpstreamRequest>>,
        replies: Mutex<VecDeque<RawResponse>>,
    }

    impl RecordingTransport {
        pub fn replying(status: StatusCode, body: &str) -> Arc<Self> {
            let transport = Self::default();
            transport.push_reply(status, body);
            Arc::new(transport)
        }

        pub fn push_reply(&self, status: StatusCode, body: &str) {
            self.replies.lock().unwrap().push_back(RawResponse {
                status,
                body: Bytes::from(body.to_string()),
            });
        }

        pub fn last_request(&self) -> UpstreamRequest {
            self.requests.lock().unwrap().last().cloned().unwrap()
        }

        pub fn request_count(&self) -> usize {
            self.requests.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl UpstreamTransport for RecordingTransport {
        async fn send(&self, request: UpstreamRequest) -> UpstreamResult<RawResponse> {
            self.requests.lock().unwrap().push(request);
            Ok(self.replies.lock().unwrap().pop_front().unwrap_or(RawResponse {
                status: StatusCode::OK,
                body: Bytes::from_static(b"{}"),
            }))
        }
    }
}
