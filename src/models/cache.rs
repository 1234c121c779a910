use serde::{Deserialize, Serialize};

use super::{MissingField, Validate, require};

/// Inbound request to purge explicit URLs of a domain.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CachePurgeRequest {
    pub domain: String,
    pub urls: Vec<String>,
}

impl Validate for CachePurgeRequest {
    fn validate(&self) -> Result<(), MissingField> {
        require("domain", &self.domain)?;
        if self.urls.iter().all(|url| url.trim().is_empty()) {
            return Err(MissingField { field: "urls" });
        }
        Ok(())
    }
}

/// Inbound request to purge every URL under a prefix.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct CachePurgeByPrefixRequest {
    pub domain: String,
    pub prefix: String,
}

impl Validate for CachePurgeByPrefixRequest {
    fn validate(&self) -> Result<(), MissingField> {
        require("domain", &self.domain)?;
        require("prefix", &self.prefix)
    }
}

/// Upstream form for URL invalidation.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PurgeForm {
    #[serde(rename = "content-type")]
    pub content_type: String,
    pub urls: Vec<String>,
}

impl PurgeForm {
    pub fn new(urls: Vec<String>) -> Self {
        Self {
            content_type: "*".to_string(),
            urls,
        }
    }

    /// The upstream matches `*` as a wildcard suffix.
    pub fn for_prefix(prefix: &str) -> Self {
        Self::new(vec![format!("{prefix}*")])
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheInvalidationResponse {
    pub status: bool,
    pub message: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct CacheStatus {
    pub total: i64,
    pub processed: i64,
    pub pending: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CacheStatusResponse {
    pub status: bool,
    pub data: CacheStatus,
}
