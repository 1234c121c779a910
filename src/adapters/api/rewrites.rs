use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};

use super::{AppState, error::ApiResult, extract::JsonOrForm};
use crate::models::{
    DomainOption, RewriteCreateResponse, RewriteListResponse, RewriteMessageResponse,
    RewriteRuleRequest, SimplifiedFormResponse, SimplifiedRuleRequest, Validate,
};

/// `POST /rules/settings/{domain}`
pub async fn create_rule(
    State(state): State<AppState>,
    Path(domain): Path<String>,
    JsonOrForm(request): JsonOrForm<RewriteRuleRequest>,
) -> ApiResult<(StatusCode, Json<RewriteCreateResponse>)> {
    let created = state.rewrites.create_rule(&domain, &request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /rules/settings/{domain}`
pub async fn list_rules(
    State(state): State<AppState>,
    Path(domain): Path<String>,
) -> ApiResult<Json<RewriteListResponse>> {
    Ok(Json(state.rewrites.list_rules(&domain).await?))
}

/// `PUT /rules/settings/{domain}/{id}`
pub async fn update_rule(
    State(state): State<AppState>,
    Path((domain, id)): Path<(String, String)>,
    JsonOrForm(request): JsonOrForm<RewriteRuleRequest>,
) -> ApiResult<Json<RewriteMessageResponse>> {
    Ok(Json(state.rewrites.update_rule(&domain, &id, &request).await?))
}

/// `DELETE /rules/settings/{domain}/{id}`
pub async fn delete_rule(
    State(state): State<AppState>,
    Path((domain, id)): Path<(String, String)>,
) -> ApiResult<Json<RewriteMessageResponse>> {
    Ok(Json(state.rewrites.delete_rule(&domain, &id).await?))
}

/// `POST /rules/{domain}/simplified`, where `{domain}` is the parent zone.
pub async fn create_simplified(
    State(state): State<AppState>,
    Path(parent_domain): Path<String>,
    JsonOrForm(mut request): JsonOrForm<SimplifiedRuleRequest>,
) -> ApiResult<(StatusCode, Json<RewriteCreateResponse>)> {
    if !parent_domain.trim().is_empty() {
        request.parent_domain = parent_domain;
    }
    request.validate()?;

    let created = state.rewrites.create_simplified(&request).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

/// `GET /rules/simplified/form`: zones a simplified rule can be attached to.
pub async fn simplified_form(
    State(state): State<AppState>,
) -> ApiResult<Json<SimplifiedFormResponse>> {
    let listing = state.domains.list_domains().await?;
    let domains = listing
        .response
        .domains
        .into_iter()
        .map(|name| DomainOption {
            display_name: name.clone(),
            name,
        })
        .collect();

    Ok(Json(SimplifiedFormResponse { domains }))
}
