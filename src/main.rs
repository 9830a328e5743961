//! Permalink resolution gateway.
//!
//! A small service that sits in front of a headless CMS whose URL layout is
//! decided at runtime: the CMS reports a permalink template for posts plus
//! base prefixes for tag and category listings, and every incoming path is
//! resolved to a tag listing, a category listing, a single post, a single
//! page, or a not-found answer.
//!
//! # Architecture Overview
//!
//! ```text
//!   Incoming path ──▶ http::server ──▶ routing::dispatcher
//!                                          │
//!                              ┌───────────┼─────────────────┐
//!                              ▼           ▼                 ▼
//!                     routing::table  routing::classify  routing::resolver
//!                     (static hits)   (fixed-base?)      (post/page lookups)
//!                                          │                 │
//!                                          ▼                 ▼
//!                                  structure::cache ◀── client::rest ──▶ CMS
//!                                  (one fetch per process, persisted copy)
//! ```

use std::path::PathBuf;

use clap::Parser;
use tokio::net::TcpListener;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use permalink_gateway::config::loader::load_config;
use permalink_gateway::config::GatewayConfig;
use permalink_gateway::HttpServer;

#[derive(Parser)]
#[command(name = "permalink-gateway")]
#[command(about = "Permalink resolution gateway for a headless CMS", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing subscriber
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "permalink_gateway=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("permalink-gateway v0.1.0 starting");

    let cli = Cli::parse();
    let config = match cli.config {
        Some(path) => load_config(&path)?,
        None => GatewayConfig::default(),
    };

    tracing::info!(
        bind_address = %config.listener.bind_address,
        api_base = %config.cms.api_base,
        lookup_timeout_secs = config.timeouts.lookup_secs,
        "Configuration loaded"
    );

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let local_addr = listener.local_addr()?;

    tracing::info!(
        address = %local_addr,
        "Listening for connections"
    );

    let server = HttpServer::new(&config);
    server.run(listener).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
