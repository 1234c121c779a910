//! Inbound REST surface.
//!
//! Every CDN operation lives under `/api/v1`; `/health` sits outside the
//! prefix. Requests that match no route and no host mapping get a JSON 404.
use std::sync::Arc;

use axum::{
    Json, Router, middleware,
    http::StatusCode,
    response::IntoResponse,
    routing::{delete, get, post, put},
};
use serde_json::json;

use crate::{
    adapters::middleware::{
        HostRedirect, host_redirect_middleware, request_id_middleware, request_timing_middleware,
    },
    config::models::RedirectConfig,
    core::{
        ApiClient, MappingStore,
        services::{CacheService, DnsService, DomainService, RedirectService, RewriteService},
    },
};

pub mod cache;
pub mod dns;
pub mod domains;
pub mod error;
pub mod extract;
pub mod health;
pub mod mappings;
pub mod redirects;
pub mod rewrites;

pub use error::{ApiError, ApiResult};

pub const API_PREFIX: &str = "/api/v1";

/// Shared handler state. Every service wraps the same [`ApiClient`].
#[derive(Debug, Clone)]
pub struct AppState {
    pub dns: DnsService,
    pub domains: DomainService,
    pub cache: CacheService,
    pub redirects: RedirectService,
    pub rewrites: RewriteService,
    pub mappings: Arc<MappingStore>,
}

impl AppState {
    pub fn new(client: ApiClient, mappings: Arc<MappingStore>) -> Self {
        Self {
            dns: DnsService::new(client.clone()),
            domains: DomainService::new(client.clone()),
            cache: CacheService::new(client.clone()),
            redirects: RedirectService::new(client.clone()),
            rewrites: RewriteService::new(client),
            mappings,
        }
    }
}

/// Routes mounted under [`API_PREFIX`].
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/dns", get(dns::list_records))
        .route(
            "/dns/{param}",
            get(dns::get_record)
                .post(dns::create_record)
                .put(dns::update_record)
                .delete(dns::delete_record),
        )
        .route(
            "/domains",
            get(domains::list_domains).post(domains::create_domain),
        )
        .route("/domains/{id}", delete(domains::delete_domain))
        .route("/cache/purge", post(cache::purge_urls))
        .route("/cache/purge-by-prefix", post(cache::purge_by_prefix))
        .route("/cache/status/{domain}", get(cache::status))
        .route("/cache/{domain}/all", delete(cache::purge_all))
        .route(
            "/redirects",
            get(redirects::list_rules).post(redirects::create_rule),
        )
        .route("/redirects/{domain}/{id}", delete(redirects::delete_rule))
        .route(
            "/rules/settings/{domain}",
            get(rewrites::list_rules).post(rewrites::create_rule),
        )
        .route(
            "/rules/settings/{domain}/{id}",
            put(rewrites::update_rule).delete(rewrites::delete_rule),
        )
        .route("/rules/simplified/form", get(rewrites::simplified_form))
        .route("/rules/{domain}/simplified", post(rewrites::create_simplified))
        .route(
            "/proxy/mappings",
            get(mappings::list_mappings).post(mappings::add_mapping),
        )
        .route("/proxy/mappings/{domain}", delete(mappings::remove_mapping))
}

/// Full application router with the host redirect and logging layers applied.
pub fn router(state: AppState, redirect: &RedirectConfig) -> Router {
    let host_redirect = HostRedirect::new(state.mappings.clone(), &redirect.bypass_prefixes);

    Router::new()
        .route("/health", get(health::health))
        .nest(API_PREFIX, api_routes())
        .fallback(not_configured)
        .layer(middleware::from_fn_with_state(
            host_redirect,
            host_redirect_middleware,
        ))
        .layer(middleware::from_fn(request_timing_middleware))
        .layer(middleware::from_fn(request_id_middleware))
        .with_state(state)
}

async fn not_configured() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "domain not configured" })),
    )
}
