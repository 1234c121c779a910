use std::{path::Path, sync::Arc};

use cdnbridge::{
    AppState, MappingStore, build_api_client,
    config::{ServerConfig, ServerConfigValidator, load_config, loader::SAMPLE_CONFIG},
    router, tracing_setup,
    utils::GracefulShutdown,
};
use clap::Parser;
use color_eyre::{Result, eyre::Context};
use tracing::Instrument;

const DEFAULT_CONFIG: &str = "cdnbridge.toml";

#[derive(Parser, Debug)]
#[clap(author, version, about)]
struct Args {
    #[clap(subcommand)]
    command: Option<Commands>,

    /// Optional configuration file; environment variables apply either way
    #[clap(short, long)]
    config: Option<String>,
}

#[derive(Parser, Debug)]
enum Commands {
    /// Validate configuration
    Validate {
        #[clap(short, long)]
        config: Option<String>,
    },
    /// Write a sample configuration file
    Init {
        /// Output path for the new config file
        #[clap(short, long, default_value = DEFAULT_CONFIG)]
        config: String,
    },
    /// Start the server (default)
    Serve {
        #[clap(short, long)]
        config: Option<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    color_eyre::install()?;
    dotenv::dotenv().ok();

    let args = Args::parse();

    match args.command {
        Some(Commands::Validate { config }) => validate_config_command(config.as_deref()).await,
        Some(Commands::Init { config }) => init_config_command(&config),
        Some(Commands::Serve { config }) => serve(config.or(args.config).as_deref()).await,
        None => serve(args.config.as_deref()).await,
    }
}

async fn serve(config_path: Option<&str>) -> Result<()> {
    let config = load_config(config_path)
        .await
        .wrap_err("Failed to load configuration")?;

    tracing_setup::init_tracing(&config.logging)?;
    if let Some(path) = config_path {
        tracing::info!("Loaded configuration from {}", path);
    }

    ServerConfigValidator::validate(&config).wrap_err("Invalid configuration")?;

    let client = build_api_client(&config.upstream).wrap_err("Failed to build upstream client")?;
    let store = Arc::new(MappingStore::new(config.mappings.iter().cloned()));
    tracing::info!(
        "Upstream {} with {} host mapping(s) preloaded",
        client.base_url(),
        store.len()
    );

    let app = router(AppState::new(client, store), &config.redirect);

    let addr = config.listen_addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .with_context(|| format!("Failed to bind to {addr}"))?;

    let graceful_shutdown = GracefulShutdown::new();
    {
        let signal_handler = graceful_shutdown.clone();
        tokio::spawn(
            async move { signal_handler.run_signal_handler().await }
                .instrument(tracing_setup::configure_component_tracing("shutdown")),
        );
    }

    tracing::info!("cdnbridge listening on {}", addr);

    let shutdown = graceful_shutdown.clone();
    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            let reason = shutdown.wait_for_shutdown_signal().await;
            tracing::info!("Shutdown signal received: {:?}", reason);
        })
        .await
        .context("Server error")?;

    tracing::info!("Graceful shutdown completed");
    Ok(())
}

/// Validate configuration and exit
async fn validate_config_command(config_path: Option<&str>) -> Result<()> {
    match config_path {
        Some(path) => println!("🔍 Validating configuration file: {path}"),
        None => println!("🔍 Validating configuration from environment"),
    }

    if let Some(path) = config_path.filter(|path| !Path::new(path).exists()) {
        eprintln!("❌ Error: Configuration file '{path}' not found");
        std::process::exit(1);
    }

    let config = match load_config(config_path).await {
        Ok(config) => {
            println!("✅ Configuration parsing: OK");
            config
        }
        Err(e) => {
            eprintln!("❌ Configuration parsing failed:");
            eprintln!("   {e:#}");
            std::process::exit(1);
        }
    };

    match ServerConfigValidator::validate(&config) {
        Ok(()) => {
            print_summary(&config);
            Ok(())
        }
        Err(e) => {
            eprintln!("❌ Configuration validation failed:");
            eprintln!("{e}");
            println!();
            println!("💡 Common fixes:");
            println!("   • Set GOCACHE_API_KEY or CDNBRIDGE__UPSTREAM__API_KEY");
            println!("   • Ensure upstream.base_url starts with http:// or https://");
            println!("   • Use humantime durations such as '5s' or '1m'");
            std::process::exit(1);
        }
    }
}

fn print_summary(config: &ServerConfig) {
    println!("✅ Configuration validation: OK");
    println!();
    println!("📋 Configuration Summary:");
    println!("   • Listen Address: {}", config.listen_addr());
    println!("   • Upstream: {}", config.upstream.base_url);
    println!(
        "   • Retries: {} (wait {}, max {})",
        config.upstream.retry_count, config.upstream.retry_wait, config.upstream.retry_max_wait
    );
    println!("   • Host Mappings: {}", config.mappings.len());
    println!(
        "   • Redirect Bypass: {}",
        config.redirect.bypass_prefixes.join(", ")
    );
}

/// Initialize a new configuration file
fn init_config_command(config_path: &str) -> Result<()> {
    let path = Path::new(config_path);
    if path.exists() {
        eprintln!("❌ Error: Configuration file '{config_path}' already exists");
        std::process::exit(1);
    }

    std::fs::write(path, SAMPLE_CONFIG)
        .with_context(|| format!("Failed to write {config_path}"))?;

    println!("✅ Created configuration file: {config_path}");
    println!("   Set GOCACHE_API_KEY, then run: cdnbridge serve --config {config_path}");
    Ok(())
}
