pub mod client;
pub mod form;
pub mod mapping_store;
pub mod redirect;
pub mod services;

pub use client::{ApiClient, UpstreamResponse};
pub use mapping_store::{MappingError, MappingStore};
