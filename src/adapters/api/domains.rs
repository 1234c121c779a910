use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde_json::Value;

use super::{
    AppState,
    error::{ApiResult, parse_id},
    extract::JsonOrForm,
};
use crate::models::{DomainCreateRequest, DomainListResponse, Validate};

pub async fn list_domains(State(state): State<AppState>) -> ApiResult<Json<DomainListResponse>> {
    Ok(Json(state.domains.list_domains().await?))
}

pub async fn create_domain(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<DomainCreateRequest>,
) -> ApiResult<(StatusCode, Json<Value>)> {
    request.validate()?;
    let created = state.domains.create_domain(&request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

pub async fn delete_domain(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> ApiResult<Json<Value>> {
    let id = parse_id(&id)?;
    Ok(Json(state.domains.delete_domain(id).await?))
}
