//! tfreg server binary.

use anyhow::{Context, Result};
use clap::Parser;
use figment::Figment;
use figment::providers::{Env, Format, Toml};
use tfreg_core::config::AppConfig;
use tfreg_server::{AppState, Server};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// tfreg - A provider registry server
#[derive(Parser, Debug)]
#[command(name = "tfregd")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to configuration file
    #[arg(
        short,
        long,
        env = "TFREG_CONFIG",
        default_value = "config/server.toml"
    )]
    config: String,
}

fn init_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=info".into());
    let json = std::env::var("TFREG_LOG_FORMAT").is_ok_and(|v| v.eq_ignore_ascii_case("json"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn load_config(args: &Args) -> Result<AppConfig> {
    let config_path = std::path::Path::new(&args.config);
    let mut figment = Figment::new();
    let has_config_file = config_path.exists();

    if has_config_file {
        tracing::info!(config_path = %args.config, "Loading configuration from file");
        figment = figment.merge(Toml::file(&args.config));
    } else {
        tracing::debug!("No config file found at {}", args.config);
    }

    // TFREG_CONFIG and TFREG_LOG_FORMAT are not configuration values
    let has_env_config = std::env::vars().any(|(key, _)| {
        key.starts_with("TFREG_") && key != "TFREG_CONFIG" && key != "TFREG_LOG_FORMAT"
    });

    if !has_config_file && !has_env_config {
        anyhow::bail!(
            "No configuration provided.\n\n\
             Provide configuration via one of:\n  \
             1. Config file: tfregd --config /path/to/config.toml\n  \
             2. Environment variables: TFREG_SERVER__BIND=0.0.0.0:8080 \
             TFREG_AUTH__SECRET_KEY=YOUR_UUID_HERE tfregd\n\n\
             See config/server.example.toml for example configuration.\n\
             Set TFREG_CONFIG env var to specify a default config file path."
        );
    }

    if !has_config_file {
        tracing::info!("Using environment variables for configuration");
    }

    let config: AppConfig = figment
        .merge(Env::prefixed("TFREG_").split("__"))
        .extract()
        .context("failed to load configuration")?;
    config.validate().context("invalid configuration")?;
    Ok(config)
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();
    init_tracing();

    tracing::info!("tfreg v{}", env!("CARGO_PKG_VERSION"));

    let config = load_config(&args)?;

    let catalog = tfreg_storage::from_config(&config.catalog)
        .await
        .context("failed to initialize catalog")?;
    tracing::info!(backend = catalog.backend_name(), "Catalog initialized");

    let state = AppState::new(config, catalog);
    let server = Server::build(state)
        .await
        .context("failed to start server")?;
    server.run().await.context("server error")?;

    Ok(())
}
