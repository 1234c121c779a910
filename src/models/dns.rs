use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::{MissingField, Validate, require};

/// Payload for creating a DNS record under a zone.
///
/// `domain` is taken from the request path and never sent upstream.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DnsCreateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub cloud: i64,
    #[serde(rename = "-", skip_deserializing)]
    pub domain: String,
}

impl Validate for DnsCreateRequest {
    fn validate(&self) -> Result<(), MissingField> {
        validate_record(&self.name, &self.record_type, &self.content, self.ttl)
    }
}

/// Payload for replacing an existing DNS record.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct DnsUpdateRequest {
    #[serde(default)]
    pub name: String,
    #[serde(rename = "type", default)]
    pub record_type: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub ttl: i64,
    #[serde(default)]
    pub cloud: i64,
}

impl Validate for DnsUpdateRequest {
    fn validate(&self) -> Result<(), MissingField> {
        validate_record(&self.name, &self.record_type, &self.content, self.ttl)
    }
}

fn validate_record(name: &str, record_type: &str, content: &str, ttl: i64) -> Result<(), MissingField> {
    require("name", name)?;
    require("type", record_type)?;
    require("content", content)?;
    if ttl <= 0 {
        return Err(MissingField { field: "ttl" });
    }
    Ok(())
}

/// A DNS record as reported by the upstream API. Numeric fields arrive as
/// either strings or numbers, so they are kept as raw JSON values.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecord {
    pub name: String,
    pub content: String,
    #[serde(rename = "type")]
    pub record_type: String,
    pub ttl: Value,
    pub cloud: Value,
    pub record_id: Value,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecords {
    pub records: Vec<DnsRecord>,
}

/// Upstream envelope for list, get, create and update.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsRecordsResponse {
    pub status_code: i64,
    pub response: DnsRecords,
}

/// Upstream envelope for deletions.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DnsDeleteResponse {
    pub status_code: i64,
    pub response: Value,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::form;

    #[test]
    fn test_create_request_form_excludes_domain() {
        let request = DnsCreateRequest {
            name: "www".into(),
            record_type: "CNAME".into(),
            content: "origin.example.net".into(),
            ttl: 3600,
            cloud: 1,
            domain: "example.com".into(),
        };

        let body = form::encode(&request).unwrap();
        assert_eq!(body.get("name").unwrap(), "www");
        assert_eq!(body.get("type").unwrap(), "CNAME");
        assert_eq!(body.get("content").unwrap(), "origin.example.net");
        assert_eq!(body.get("ttl").unwrap(), "3600");
        assert_eq!(body.get("cloud").unwrap(), "1");
        assert_eq!(body.len(), 5);
    }

    #[test]
    fn test_validation_requires_fields() {
        let mut request = DnsUpdateRequest {
            name: "www".into(),
            record_type: "A".into(),
            content: "10.0.0.1".into(),
            ttl: 300,
            cloud: 0,
        };
        assert!(request.validate().is_ok());

        request.content.clear();
        assert_eq!(request.validate().unwrap_err().field, "content");

        request.content = "10.0.0.1".into();
        request.ttl = 0;
        assert_eq!(request.validate().unwrap_err().field, "ttl");
    }

    #[test]
    fn test_record_accepts_string_or_number_ids() {
        let parsed: DnsRecordsResponse = serde_json::from_str(
            r#"{"status_code":1,"response":{"records":[
                {"name":"a","content":"1.1.1.1","type":"A","ttl":"300","cloud":"1","record_id":"42"},
                {"name":"b","content":"2.2.2.2","type":"A","ttl":300,"cloud":0,"record_id":43}
            ]}}"#,
        )
        .unwrap();

        assert_eq!(parsed.response.records.len(), 2);
        assert_eq!(parsed.response.records[0].record_id, Value::from("42"));
        assert_eq!(parsed.response.records[1].record_id, Value::from(43));
    }
}
