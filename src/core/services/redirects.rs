use crate::{
    core::client::ApiClient,
    models::{RedirectAck, RedirectCreateRequest, RedirectListResponse},
    ports::upstream::UpstreamResult,
};

/// Redirect rules configured at the CDN edge.
#[derive(Debug, Clone)]
pub struct RedirectService {
    client: ApiClient,
}

impl RedirectService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn create_rule(&self, request: &RedirectCreateRequest) -> UpstreamResult<RedirectAck> {
        tracing::info!(
            "Creating {} redirect on {}: {} -> {}",
            request.redirect_type,
            request.domain,
            request.source,
            request.destination
        );
        self.client
            .post(&format!("/redirects/{}", request.domain), request)
            .await?
            .into_success()
    }

    pub async fn list_rules(&self, domain: &str) -> UpstreamResult<RedirectListResponse> {
        self.client
            .get(&format!("/redirects/{domain}"))
            .await?
            .into_success()
    }

    pub async fn delete_rule(&self, domain: &str, id: i64) -> UpstreamResult<RedirectAck> {
        tracing::info!("Deleting redirect {} on {}", id, domain);
        self.client
            .delete_no_body(&format!("/redirects/{domain}/{id}"))
            .await?
            .into_success()
    }
}
