use std::net::SocketAddr;

use url::Url;

use crate::config::models::{RedirectConfig, ServerConfig, UpstreamConfig};

/// Validation result type alias
pub type ValidationResult<T> = Result<T, ValidationError>;

/// Validation error types
#[derive(Debug, thiserror::Error, Clone)]
pub enum ValidationError {
    #[error("Missing required field: {field}")]
    MissingField { field: String },

    #[error("Invalid field '{field}': {message}")]
    InvalidField { field: String, message: String },

    #[error("Invalid listen address '{address}': {reason}")]
    InvalidListenAddress { address: String, reason: String },

    #[error("Validation failed: {message}")]
    ValidationFailed { message: String },
}

/// Server configuration validator
pub struct ServerConfigValidator;

impl ServerConfigValidator {
    /// Validate the entire server configuration, reporting every problem at once.
    pub fn validate(config: &ServerConfig) -> ValidationResult<()> {
        let mut errors = Vec::new();

        if let Err(e) = Self::validate_listen_address(&config.listen_addr()) {
            errors.push(e);
        }

        errors.extend(Self::validate_upstream(&config.upstream));
        errors.extend(Self::validate_redirect(&config.redirect));

        for (i, mapping) in config.mappings.iter().enumerate() {
            if mapping.hostname.trim().is_empty() {
                errors.push(ValidationError::MissingField {
                    field: format!("mappings[{i}].domain"),
                });
            }
            if mapping.destination.trim().is_empty() {
                errors.push(ValidationError::MissingField {
                    field: format!("mappings[{i}].destination"),
                });
            }
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ValidationError::ValidationFailed {
                message: Self::format_multiple_errors(errors),
            })
        }
    }

    fn validate_listen_address(address: &str) -> ValidationResult<()> {
        if address.parse::<SocketAddr>().is_err() {
            return Err(ValidationError::InvalidListenAddress {
                address: address.to_string(),
                reason: "host must be an IP address (e.g., '127.0.0.1' or '0.0.0.0')".to_string(),
            });
        }
        Ok(())
    }

    fn validate_upstream(upstream: &UpstreamConfig) -> Vec<ValidationError> {
        let mut errors = Vec::new();

        if upstream.api_key.trim().is_empty() {
            errors.push(ValidationError::MissingField {
                field: "upstream.api_key (or GOCACHE_API_KEY)".to_string(),
            });
        }

        match Url::parse(&upstream.base_url) {
            Ok(url) if matches!(url.scheme(), "http" | "https") => {}
            Ok(url) => errors.push(ValidationError::InvalidField {
                field: "upstream.base_url".to_string(),
                message: format!("unsupported scheme '{}'", url.scheme()),
            }),
            Err(e) => errors.push(ValidationError::InvalidField {
                field: "upstream.base_url".to_string(),
                message: e.to_string(),
            }),
        }

        let durations = [
            ("upstream.timeout", upstream.timeout()),
            ("upstream.retry_wait", upstream.retry_wait()),
            ("upstream.retry_max_wait", upstream.retry_max_wait()),
        ];
        for (field, parsed) in durations {
            if let Err(e) = parsed {
                errors.push(ValidationError::InvalidField {
                    field: field.to_string(),
                    message: e.to_string(),
                });
            }
        }

        if let (Ok(wait), Ok(max_wait)) = (upstream.retry_wait(), upstream.retry_max_wait()) {
            if max_wait < wait {
                errors.push(ValidationError::InvalidField {
                    field: "upstream.retry_max_wait".to_string(),
                    message: "must not be shorter than retry_wait".to_string(),
                });
            }
        }

        errors
    }

    fn validate_redirect(redirect: &RedirectConfig) -> Vec<ValidationError> {
        redirect
            .bypass_prefixes
            .iter()
            .filter(|prefix| !prefix.starts_with('/'))
            .map(|prefix| ValidationError::InvalidField {
                field: format!("redirect.bypass_prefixes: {prefix}"),
                message: "prefixes must start with '/'".to_string(),
            })
            .collect()
    }

    fn format_multiple_errors(errors: Vec<ValidationError>) -> String {
        if errors.len() == 1 {
            return errors[0].to_string();
        }

        let mut message = format!("Found {} configuration errors:", errors.len());
        for (i, error) in errors.iter().enumerate() {
            message.push_str(&format!("\n  {}. {}", i + 1, error));
        }
        message
    }
}
