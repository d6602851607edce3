//! pgDeck - Web Console Binary
//!
//! Serves the pgDeck console and proxies browser actions to a running
//! database administration API.
//!
//! ## Usage
//!
//! ```bash
//! # Start the console (connects to the API at localhost:8000)
//! pgdeck
//!
//! # Connect to a different API server
//! pgdeck --api-url http://db-admin.example.com:8000
//!
//! # Listen on a custom port
//! pgdeck --listen-addr 0.0.0.0:3000
//! ```

use clap::Parser;
use pgdeck::{ConsoleConfig, ConsoleServer};
use std::net::SocketAddr;

/// pgDeck - Web console for a PostgreSQL administration API
#[derive(Parser, Debug)]
#[command(name = "pgdeck")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to listen on for the console
    #[arg(long, default_value = "0.0.0.0:8080", env = "PGDECK_LISTEN_ADDR")]
    listen_addr: SocketAddr,

    /// Base URL of the database administration API
    #[arg(long, default_value = "http://localhost:8000", env = "PGDECK_API_URL")]
    api_url: String,

    /// Backend request timeout in milliseconds
    #[arg(long, default_value = "10000", env = "PGDECK_HTTP_TIMEOUT_MS")]
    http_timeout_ms: u64,

    /// TTL in milliseconds for the table-listing cache
    #[arg(long, default_value = "2000", env = "PGDECK_CACHE_TTL_MS")]
    cache_ttl_ms: u64,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let args = Args::parse();

    tracing::info!("Starting pgDeck v{}", env!("CARGO_PKG_VERSION"));

    let config = ConsoleConfig {
        listen_addr: args.listen_addr,
        api_url: args.api_url,
        http_timeout_ms: args.http_timeout_ms,
        cache_ttl_ms: args.cache_ttl_ms,
    };

    let server = ConsoleServer::new(config)?;
    server.run().await?;

    Ok(())
}
