use serde::{Deserialize, Serialize};

use super::{MissingField, Validate, require};

/// Conditions that activate a rewrite rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteMatch {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub request_uri: String,
    /// Older spelling of `request_uri`, used when the latter is blank.
    #[serde(skip_serializing_if = "String::is_empty")]
    pub request: String,
    #[serde(rename = "request_method", skip_serializing_if = "Vec::is_empty")]
    pub request_methods: Vec<String>,
    #[serde(rename = "device_type", skip_serializing_if = "Vec::is_empty")]
    pub device_types: Vec<String>,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub host: String,
}

/// What the CDN does once a rule matches.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteAction {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect_type: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub redirect_to: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rewrite_uri: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub rewrite_host: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub destination: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub cross_origin: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteMetadata {
    #[serde(skip_serializing_if = "String::is_empty")]
    pub status: String,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub updated_on: String,
}

/// A rewrite rule as listed by the upstream API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteRule {
    #[serde(rename = "match")]
    pub matcher: RewriteMatch,
    pub action: RewriteAction,
    #[serde(skip_serializing_if = "String::is_empty")]
    pub id: String,
    pub metadata: RewriteMetadata,
}

/// Inbound payload for creating or replacing a rewrite rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct RewriteRuleRequest {
    #[serde(rename = "match")]
    pub matcher: RewriteMatch,
    pub action: RewriteAction,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteCreated {
    pub id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteCreateResponse {
    pub response: RewriteCreated,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteRules {
    pub rules: Vec<RewriteRule>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteListResponse {
    pub response: RewriteRules,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteMessage {
    pub msg: String,
}

/// Upstream envelope for update and delete.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RewriteMessageResponse {
    pub response: RewriteMessage,
}

/// Shorthand for the common "serve a subdomain from a bucket folder" rule.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct SimplifiedRuleRequest {
    /// Subdomain being served, e.g. `client.sites.example.com`.
    pub domain: String,
    /// Zone already registered with the CDN that owns the subdomain.
    pub parent_domain: String,
    pub bucket_url: String,
    pub account_id: String,
}

impl Validate for SimplifiedRuleRequest {
    fn validate(&self) -> Result<(), MissingField> {
        require("domain", &self.domain)?;
        require("parent_domain", &self.parent_domain)?;
        require("bucket_url", &self.bucket_url)?;
        require("account_id", &self.account_id)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct DomainOption {
    pub name: String,
    pub display_name: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct SimplifiedFormResponse {
    pub domains: Vec<DomainOption>,
}
