use serde::{Deserialize, Serialize};

use super::{MissingField, Validate, require};

/// A host to destination redirect entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Mapping {
    #[serde(rename = "domain", alias = "hostname")]
    pub hostname: String,
    pub destination: String,
}

impl Mapping {
    pub fn new(hostname: impl Into<String>, destination: impl Into<String>) -> Self {
        Self {
            hostname: hostname.into(),
            destination: destination.into(),
        }
    }
}

impl Validate for Mapping {
    fn validate(&self) -> Result<(), MissingField> {
        require("domain", &self.hostname)?;
        require("destination", &self.destination)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingResponse {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mapping: Option<Mapping>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl MappingResponse {
    pub fn ok(mapping: Mapping) -> Self {
        Self {
            success: true,
            mapping: Some(mapping),
            error: None,
        }
    }

    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            mapping: None,
            error: Some(error.into()),
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct MappingListResponse {
    pub success: bool,
    pub mappings: Vec<Mapping>,
    pub total: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wire_shape_and_alias() {
        let mapping = Mapping::new("a.example.com", "https://bucket.example/site/");
        let json = serde_json::to_value(&mapping).unwrap();
        assert_eq!(json["domain"], "a.example.com");
        assert_eq!(json["destination"], "https://bucket.example/site/");

        let aliased: Mapping =
            serde_json::from_str(r#"{"hostname":"b.example.com","destination":"https://b/"}"#)
                .unwrap();
        assert_eq!(aliased.hostname, "b.example.com");
    }

    #[test]
    fn test_missing_destination() {
        let mapping: Mapping = serde_json::from_str(r#"{"domain":"a.example.com"}"#).unwrap();
        assert_eq!(mapping.validate().unwrap_err().field, "destination");
    }
}
