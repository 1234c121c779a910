use std::path::Path;

use config::{Config, Environment, File, FileFormat};
use eyre::{Context, Result};

use crate::config::models::ServerConfig;

/// Prefix for structured overrides, e.g. `CDNBRIDGE__UPSTREAM__API_KEY`.
pub const ENV_PREFIX: &str = "CDNBRIDGE";

/// Single-variable overrides kept for existing deployments.
const LEGACY_ENV: [(&str, &str); 3] = [
    ("PORT", "port"),
    ("GOCACHE_API_URL", "upstream.base_url"),
    ("GOCACHE_API_KEY", "upstream.api_key"),
];

/// Load configuration: defaults, then the optional file, then environment.
pub async fn load_config(config_path: Option<&str>) -> Result<ServerConfig> {
    load_config_sync(config_path)
}

/// Load configuration synchronously from the process environment.
pub fn load_config_sync(config_path: Option<&str>) -> Result<ServerConfig> {
    load_config_with_env(config_path, |key| std::env::var(key).ok())
}

/// Load configuration using `lookup` for the legacy environment variables.
pub fn load_config_with_env<F>(config_path: Option<&str>, lookup: F) -> Result<ServerConfig>
where
    F: Fn(&str) -> Option<String>,
{
    let mut builder = Config::builder();

    if let Some(config_path) = config_path {
        let path = Path::new(config_path);

        // Determine file format based on extension
        let format = match path.extension().and_then(|ext| ext.to_str()) {
            Some("yaml") | Some("yml") => FileFormat::Yaml,
            Some("json") => FileFormat::Json,
            _ => FileFormat::Toml,
        };

        builder = builder.add_source(File::new(
            path.to_str()
                .ok_or_else(|| eyre::eyre!("Invalid UTF-8 path: {}", path.display()))?,
            format,
        ));
    }

    builder = builder.add_source(
        Environment::with_prefix(ENV_PREFIX)
            .prefix_separator("__")
            .separator("__")
            .try_parsing(true),
    );

    for (variable, key) in LEGACY_ENV {
        let value = lookup(variable).filter(|v| !v.trim().is_empty());
        builder = builder
            .set_override_option(key, value)
            .with_context(|| format!("Failed to apply {variable}"))?;
    }

    let settings = builder
        .build()
        .with_context(|| match config_path {
            Some(path) => format!("Failed to build config from {path}"),
            None => "Failed to build config from environment".to_string(),
        })?;

    let server_config: ServerConfig = settings
        .try_deserialize()
        .wrap_err("Failed to deserialize configuration")?;

    Ok(server_config)
}

/// Sample configuration written by `cdnbridge init`.
pub const SAMPLE_CONFIG: &str = r#"# cdnbridge configuration
host = "0.0.0.0"
port = 8081

[upstream]
base_url = "https://api.gocache.com.br/v1"
# Prefer CDNBRIDGE__UPSTREAM__API_KEY or GOCACHE_API_KEY over storing the key here.
api_key = ""
timeout = "30s"
retry_count = 3
retry_wait = "5s"
retry_max_wait = "20s"

[redirect]
bypass_prefixes = ["/api/", "/swagger/", "/health"]

[logging]
level = "info"
json = true
include_spans = true

# [[mappings]]
# domain = "landing.example.com"
# destination = "https://bucket.s3-website-us-east-1.amazonaws.com/landing/"
"#;
