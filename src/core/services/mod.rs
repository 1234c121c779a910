//! One service per upstream resource family. Each turns typed requests into
//! upstream calls through the shared [`ApiClient`](crate::core::client::ApiClient)
//! and collapses replies with
//! [`UpstreamResponse::into_success`](crate::core::client::UpstreamResponse::into_success).

pub mod cache;
pub mod dns;
pub mod domains;
pub mod redirects;
pub mod rewrites;

pub use cache::CacheService;
pub use dns::DnsService;
pub use domains::DomainService;
pub use redirects::RedirectService;
pub use rewrites::RewriteService;
