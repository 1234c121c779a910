use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};
use serde::Deserialize;

use super::{
    AppState,
    error::{ApiError, ApiResult, parse_id},
    extract::JsonOrForm,
};
use crate::models::{
    DnsCreateRequest, DnsDeleteResponse, DnsRecordsResponse, DnsUpdateRequest, Validate,
};

#[derive(Debug, Deserialize)]
pub struct DomainQuery {
    #[serde(default)]
    pub domain: String,
}

/// `GET /dns?domain=`
pub async fn list_records(
    State(state): State<AppState>,
    Query(query): Query<DomainQuery>,
) -> ApiResult<Json<DnsRecordsResponse>> {
    if query.domain.trim().is_empty() {
        return Err(ApiError::Validation("query parameter 'domain' is required".into()));
    }
    Ok(Json(state.dns.list_records(&query.domain).await?))
}

/// `GET /dns/{id}`
pub async fn get_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DnsRecordsResponse>> {
    let id = parse_id(&id)?;
    Ok(Json(state.dns.get_record(id).await?))
}

/// `POST /dns/{domain}`
pub async fn create_record(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    JsonOrForm(mut request): JsonOrForm<DnsCreateRequest>,
) -> ApiResult<(StatusCode, Json<DnsRecordsResponse>)> {
    if domain.trim().is_empty() {
        return Err(ApiError::Validation("zone domain is required".into()));
    }
    request.domain = domain;
    request.validate()?;

    let created = state.dns.create_record(&request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `PUT /dns/{id}`
pub async fn update_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonOrForm(request): JsonOrForm<DnsUpdateRequest>,
) -> ApiResult<Json<DnsRecordsResponse>> {
    let id = parse_id(&id)?;
    request.validate()?;
    Ok(Json(state.dns.update_record(id, &request).await?))
}

/// `DELETE /dns/{id}`
pub async fn delete_record(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<DnsDeleteResponse>> {
    let id = parse_id(&id)?;
    Ok(Json(state.dns.delete_record(id).await?))
}
