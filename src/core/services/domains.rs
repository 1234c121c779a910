use serde_json::Value;

use crate::{
    core::client::ApiClient,
    models::{DomainCreateRequest, DomainListResponse, DomainSettingsForm},
    ports::upstream::UpstreamResult,
};

#[derive(Debug, Clone)]
pub struct DomainService {
    client: ApiClient,
}

impl DomainService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_domains(&self) -> UpstreamResult<DomainListResponse> {
        self.client.get("/domain").await?.into_success()
    }

    /// Register `request.name` with the default cache settings. The origin is
    /// configured separately through DNS.
    pub async fn create_domain(&self, request: &DomainCreateRequest) -> UpstreamResult<Value> {
        tracing::info!("Registering domain {} (origin {})", request.name, request.origin);
        self.client
            .post(
                &format!("/domain/{}", request.name),
                &DomainSettingsForm::default(),
            )
            .await?
            .into_success()
    }

    pub async fn delete_domain(&self, id: i64) -> UpstreamResult<Value> {
        tracing::info!("Deleting domain {}", id);
        self.client
            .delete_no_body(&format!("/domains/{id}"))
            .await?
            .into_success()
    }
}
