use crate::{
    core::client::ApiClient,
    models::{DnsCreateRequest, DnsDeleteResponse, DnsRecordsResponse, DnsUpdateRequest},
    ports::upstream::UpstreamResult,
};

/// DNS record management for zones hosted on the CDN.
#[derive(Debug, Clone)]
pub struct DnsService {
    client: ApiClient,
}

impl DnsService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list_records(&self, domain: &str) -> UpstreamResult<DnsRecordsResponse> {
        tracing::debug!("Listing DNS records for {}", domain);
        self.client
            .get(&format!("/dns/{domain}"))
            .await?
            .into_success()
    }

    pub async fn get_record(&self, id: i64) -> UpstreamResult<DnsRecordsResponse> {
        self.client.get(&format!("/dns/{id}")).await?.into_success()
    }

    /// Create a record in `request.domain`.
    pub async fn create_record(
        &self,
        request: &DnsCreateRequest,
    ) -> UpstreamResult<DnsRecordsResponse> {
        tracing::info!(
            "Creating {} record {} in {}",
            request.record_type,
            request.name,
            request.domain
        );
        self.client
            .post(&format!("/dns/{}", request.domain), request)
            .await?
            .into_success()
    }

    pub async fn update_record(
        &self,
        id: i64,
        request: &DnsUpdateRequest,
    ) -> UpstreamResult<DnsRecordsResponse> {
        tracing::info!("Updating DNS record {}", id);
        self.client
            .put(&format!("/dns/{id}"), request)
            .await?
            .into_success()
    }

    pub async fn delete_record(&self, id: i64) -> UpstreamResult<DnsDeleteResponse> {
        tracing::info!("Deleting DNS record {}", id);
        self.client
            .delete_no_body(&format!("/dns/{id}"))
            .await?
            .into_success()
    }
}
