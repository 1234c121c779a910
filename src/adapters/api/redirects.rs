use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
};

use super::{
    AppState,
    dns::DomainQuery,
    error::{ApiError, ApiResult, parse_id},
    extract::JsonOrForm,
};
use crate::models::{RedirectAck, RedirectCreateRequest, RedirectListResponse, Validate};

pub async fn create_rule(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<RedirectCreateRequest>,
) -> ApiResult<(StatusCode, Json<RedirectAck>)> {
    request.validate()?;
    let created = state.redirects.create_rule(&request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /redirects?domain=`
pub async fn list_rules(
    State(state): State<AppState>,
    Query(query): Query<DomainQuery>,
) -> ApiResult<Json<RedirectListResponse>> {
    if query.domain.trim().is_empty() {
        return Err(ApiError::Validation("query parameter 'domain' is required".into()));
    }
    Ok(Json(state.redirects.list_rules(&query.domain).await?))
}

pub async fn delete_rule(
    State(state): State<AppState>,
    Path((domain, id)): Path<(String, String)>,
) -> ApiResult<Json<RedirectAck>> {
    let id = parse_id(&id)?;
    Ok(Json(state.redirects.delete_rule(&domain, id).await?))
}
