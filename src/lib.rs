//! cdnbridge - a backend-for-frontend in front of the GoCache CDN API.
//!
//! cdnbridge exposes a small REST surface for domains, DNS records, cache
//! purges, redirect rules and rewrite rules, and translates each call into the
//! form-encoded requests the upstream CDN API expects. It also keeps an
//! in-memory table of hostname to destination mappings and answers requests
//! for those hostnames with a permanent redirect.
//!
//! # Features
//! - Typed request models with presence validation before any upstream call
//! - A serde-driven form encoder producing `name[index]` style fields
//! - Upstream retries with exponential backoff on transport failures
//! - Upstream error statuses relayed verbatim to the caller
//! - Host based redirects backed by a concurrent mapping store
//! - Layered configuration (file, `CDNBRIDGE__*` variables, legacy variables)
//! - Structured tracing and graceful shutdown
//!
//! # Quick Example
//! ```no_run
//! use std::sync::Arc;
//!
//! use cdnbridge::{AppState, MappingStore, build_api_client, config::load_config, router};
//!
//! # #[tokio::main] async fn main() -> eyre::Result<()> {
//! let config = load_config(Some("cdnbridge.toml")).await?;
//! let client = build_api_client(&config.upstream)?;
//! let store = Arc::new(MappingStore::new(config.mappings.clone()));
//! let app = router(AppState::new(client, store), &config.redirect);
//! let listener = tokio::net::TcpListener::bind(config.listen_addr()).await?;
//! axum::serve(listener, app).await?;
//! # Ok(()) }
//! ```
//!
//! # Architecture
//! The upstream HTTP transport is a **port** (`ports::upstream`) with a
//! reqwest-backed **adapter**; the API client, form encoder, services and
//! mapping store live in `core` and never touch the network directly. The
//! inbound axum layer lives under `adapters::api`.
//!
//! # Error Handling
//! Library code returns domain error types (`UpstreamError`, `MappingError`,
//! `ApiError`). The binary uses `eyre::Result<T>` and attaches context with
//! `WrapErr`.
pub mod config;
pub mod models;
pub mod ports;
pub mod tracing_setup;
pub mod utils;

pub mod adapters;
pub mod core;

// Re-export the specific types needed by the binary crate
pub use crate::{
    adapters::{AppState, ReqwestTransport, build_api_client, router},
    core::{ApiClient, MappingStore},
    ports::upstream::{UpstreamError, UpstreamTransport},
    utils::GracefulShutdown,
};
