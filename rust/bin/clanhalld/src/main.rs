//! `clanhalld`: the clan site backend.
//!
//! Usage:
//!   clanhalld [-c <path>] [--listen <addr>]
//!
//! The config file defaults to `clanhall.toml` in the working directory.
//! A missing file means every setting takes its default.

mod bootstrap;
mod routes;

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clanhall_core::{Module, ServerConfig};
use tracing::info;

/// Clan site backend.
#[derive(Parser, Debug)]
#[command(name = "clanhalld", about = "Clan site backend")]
struct Cli {
    /// Path to the TOML config file.
    #[arg(short = 'c', long = "config", default_value = "clanhall.toml")]
    config: PathBuf,

    /// Listen address (overrides `server.listen`).
    #[arg(long = "listen")]
    listen: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .init();

    let cli = Cli::parse();

    // Load server configuration.
    if cli.config.exists() {
        info!("Loading configuration from {}", cli.config.display());
    } else {
        info!("No config at {}, using defaults", cli.config.display());
    }
    let mut server_config = ServerConfig::load(&cli.config)?;
    if let Some(listen) = cli.listen {
        server_config.server.listen = listen;
    }

    bootstrap::verify_config(&server_config)?;

    let kv = bootstrap::open_store(&server_config.storage)?;
    let io_timeout = server_config.storage.io_timeout();

    // Writes the default administrator on first start.
    let auth_config = clanhall_auth::AuthConfig::from(&server_config.auth);
    let auth_module = clanhall_auth::AuthModule::new(kv.clone(), &auth_config, io_timeout)
        .context("failed to bootstrap admin credentials")?;
    info!("Auth module initialized");

    let clan_module = clanhall_clan::ClanModule::new(kv, auth_module.authenticator(), io_timeout);
    info!("Clan module initialized");

    let module_routes = vec![
        (auth_module.name(), auth_module.routes()),
        (clan_module.name(), clan_module.routes()),
    ];

    let app = routes::build_router(&server_config.server.base_path, module_routes);

    // Start server.
    let listen = &server_config.server.listen;
    let listener = tokio::net::TcpListener::bind(listen)
        .await
        .with_context(|| format!("failed to bind {}", listen))?;
    info!("clanhalld listening on {}", listen);
    axum::serve(listener, app).await?;

    Ok(())
}
