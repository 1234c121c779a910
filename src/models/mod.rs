//! Request and response shapes exchanged with API callers and the upstream CDN.
//!
//! Inbound request types implement [`Validate`] so handlers can reject
//! incomplete payloads before any upstream call is made.

pub mod cache;
pub mod dns;
pub mod domain;
pub mod mapping;
pub mod redirect;
pub mod rewrite;

pub use cache::*;
pub use dns::*;
pub use domain::*;
pub use mapping::*;
pub use redirect::*;
pub use rewrite::*;

/// A required inbound field was missing or blank.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("field '{field}' is required")]
pub struct MissingField {
    pub field: &'static str,
}

/// Presence checks for inbound payloads.
pub trait Validate {
    fn validate(&self) -> Result<(), MissingField>;
}

/// Fail with [`MissingField`] when `value` is blank.
pub(crate) fn require(field: &'static str, value: &str) -> Result<(), MissingField> {
    if value.trim().is_empty() {
        Err(MissingField { field })
    } else {
        Ok(())
    }
}
