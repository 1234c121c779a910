use crate::{
    core::client::ApiClient,
    models::{CacheInvalidationResponse, CacheStatusResponse, PurgeForm},
    ports::upstream::UpstreamResult,
};

#[derive(Debug, Clone)]
pub struct CacheService {
    client: ApiClient,
}

impl CacheService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn purge_urls(
        &self,
        domain: &str,
        urls: Vec<String>,
    ) -> UpstreamResult<CacheInvalidationResponse> {
        tracing::info!("Purging {} URL(s) from {}", urls.len(), domain);
        self.client
            .delete(&format!("/cache/{domain}"), &PurgeForm::new(urls))
            .await?
            .into_success()
    }

    pub async fn purge_by_prefix(
        &self,
        domain: &str,
        prefix: &str,
    ) -> UpstreamResult<CacheInvalidationResponse> {
        tracing::info!("Purging {} under prefix {}", domain, prefix);
        self.client
            .delete(&format!("/cache/{domain}"), &PurgeForm::for_prefix(prefix))
            .await?
            .into_success()
    }

    pub async fn purge_all(&self, domain: &str) -> UpstreamResult<CacheInvalidationResponse> {
        tracing::info!("Purging the whole cache of {}", domain);
        self.client
            .delete_no_body(&format!("/cache/{domain}/all"))
            .await?
            .into_success()
    }

    pub async fn status(&self, domain: &str) -> UpstreamResult<CacheStatusResponse> {
        self.client
            .get(&format!("/cache/{domain}/status"))
            .await?
            .into_success()
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use http::{Method, StatusCode};

    use super::*;
    use crate::core::client::testing::RecordingTransport;

    fn service(transport: Arc<RecordingTransport>) -> CacheService {
        CacheService::new(ApiClient::new("https://api.test/v1", "key", transport).unwrap())
    }

    #[tokio::test]
    async fn test_purge_urls_sends_indexed_form() {
        let transport = RecordingTransport::replying(
            StatusCode::OK,
            r#"{"status":true,"message":"queued"}"#,
        );
        let result = service(transport.clone())
            .purge_urls("example.com", vec!["/a".into(), "/b".into()])
            .await
            .unwrap();
        assert!(result.status);

        let sent = transport.last_request();
        assert_eq!(sent.method, Method::DELETE);
        assert_eq!(sent.url, "https://api.test/v1/cache/example.com");
        let form = sent.form.unwrap();
        assert_eq!(form.get("content-type").unwrap(), "*");
        assert_eq!(form.get("urls[0]").unwrap(), "/a");
        assert_eq!(form.get("urls[1]").unwrap(), "/b");
    }

    #[tokio::test]
    async fn test_purge_by_prefix_uses_wildcard() {
        let transport = RecordingTransport::replying(StatusCode::OK, r#"{"status":true}"#);
        service(transport.clone())
            .purge_by_prefix("example.com", "/assets/")
            .await
            .unwrap();

        let form = transport.last_request().form.unwrap();
        assert_eq!(form.get("urls[0]").unwrap(), "/assets/*");
    }

    #[tokio::test]
    async fn test_purge_all_and_status_paths() {
        let transport = Arc::new(RecordingTransport::default());
        transport.push_reply(StatusCode::OK, r#"{"status":true}"#);
        transport.push_reply(
            StatusCode::OK,
            r#"{"status":true,"data":{"total":3,"processed":2,"pending":1}}"#,
        );
        let cache = service(transport.clone());

        cache.purge_all("example.com").await.unwrap();
        let sent = transport.last_request();
        assert_eq!(sent.url, "https://api.test/v1/cache/example.com/all");
        assert!(sent.form.is_none());

        let status = cache.status("example.com").await.unwrap();
        assert_eq!(status.data.pending, 1);
        let sent = transport.last_request();
        assert_eq!(sent.method, Method::GET);
        assert_eq!(sent.url, "https://api.test/v1/cache/example.com/status");
    }
}
