use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MissingField, Validate, require};

/// A redirect rule managed by the CDN.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RedirectRule {
    pub id: Value,
    pub domain: String,
    pub source: String,
    pub destination: String,
    #[serde(rename = "type")]
    pub redirect_type: u16,
}

/// Inbound payload for a new redirect rule; also the upstream form.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RedirectCreateRequest {
    pub domain: String,
    pub source: String,
    pub destination: String,
    /// 301 (permanent) or 302 (temporary).
    #[serde(rename = "type")]
    pub redirect_type: u16,
}

impl Validate for RedirectCreateRequest {
    fn validate(&self) -> Result<(), MissingField> {
        require("domain", &self.domain)?;
        require("source", &self.source)?;
        require("destination", &self.destination)?;
        if !matches!(self.redirect_type, 301 | 302) {
            return Err(MissingField { field: "type" });
        }
        Ok(())
    }
}

/// Upstream envelope for create and delete, whose payload is free-form.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectAck {
    pub status_code: i64,
    pub response: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RedirectListResponse {
    pub status_code: i64,
    pub response: Vec<RedirectRule>,
}
