use axum::{
    Json,
    extract::{Path, State},
};

use super::{AppState, error::ApiResult, extract::JsonOrForm};
use crate::models::{
    CacheInvalidationResponse, CachePurgeByPrefixRequest, CachePurgeRequest, CacheStatusResponse,
    Validate,
};

/// `POST /cache/purge`
pub async fn purge_urls(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<CachePurgeRequest>,
) -> ApiResult<Json<CacheInvalidationResponse>> {
    request.validate()?;
    let urls = request
        .urls
        .into_iter()
        .filter(|url| !url.trim().is_empty())
        .collect();
    Ok(Json(state.cache.purge_urls(&request.domain, urls).await?))
}

/// `POST /cache/purge-by-prefix`
pub async fn purge_by_prefix(
    State(state): State<AppState>,
    JsonOrForm(request): JsonOrForm<CachePurgeByPrefixRequest>,
) -> ApiResult<Json<CacheInvalidationResponse>> {
    request.validate()?;
    Ok(Json(
        state
            .cache
            .purge_by_prefix(&request.domain, &request.prefix)
            .await?,
    ))
}

/// `DELETE /cache/{domain}/all`
pub async fn purge_all(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> ApiResult<Json<CacheInvalidationResponse>> {
    Ok(Json(state.cache.purge_all(&domain).await?))
}

/// `GET /cache/status/{domain}`
pub async fn status(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> ApiResult<Json<CacheStatusResponse>> {
    Ok(Json(state.cache.status(&domain).await?))
}
