use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MissingField, Validate, require};

/// Inbound payload for registering a domain with the CDN.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct DomainCreateRequest {
    pub name: String,
    pub origin: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub enabled: bool,
}

impl Validate for DomainCreateRequest {
    fn validate(&self) -> Result<(), MissingField> {
        require("name", &self.name)?;
        require("origin", &self.origin)
    }
}

/// Settings sent upstream when a domain is created.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct DomainSettingsForm {
    pub cache_ttl: u32,
    pub waf_status: bool,
    pub cdn_mode: String,
}

impl Default for DomainSettingsForm {
    fn default() -> Self {
        Self {
            cache_ttl: 86400,
            waf_status: false,
            cdn_mode: "cname".to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainList {
    pub domains: Vec<String>,
    pub size: i64,
    pub auto_discovery: BTreeMap<String, Value>,
}

/// Upstream envelope for the domain listing.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DomainListResponse {
    pub status_code: i64,
    pub response: DomainList,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form;

    #[test]
    fn test_default_settings_form() {
        let body = form::encode(&DomainSettingsForm::default()).unwrap();

        assert_eq!(body.get("cache_ttl").unwrap(), "86400");
        assert_eq!(body.get("waf_status").unwrap(), "false");
        assert_eq!(body.get("cdn_mode").unwrap(), "cname");
    }

    #[test]
    fn test_create_request_requires_name_and_origin() {
        let request = DomainCreateRequest {
            name: "example.com".into(),
            ..Default::default()
        };
        assert_eq!(request.validate().unwrap_err().field, "origin");
    }
}
