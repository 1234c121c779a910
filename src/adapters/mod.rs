pub mod api;
pub mod middleware;
pub mod upstream_client;

/// Re-export commonly used types from adapters
pub use api::{AppState, router};
pub use upstream_client::{ReqwestTransport, RetryPolicy, build_api_client};
