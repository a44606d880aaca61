//! kcadm - command-line access to the Keycloak admin REST API.
//!
//! Reads the server URL from saved config or `KEYCLOAK_URL` and a bearer
//! token from `KEYCLOAK_TOKEN`, then prints results as JSON.

mod commands;
mod config;

use std::io;

use anyhow::Result;
use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use commands::{parse_args, run};
use config::Config;

/// Initialize the tracing subscriber for logging
fn init_tracing() {
    // Use RUST_LOG env var to control log level (e.g., RUST_LOG=debug)
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(filter)
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if not found)
    let _ = dotenvy::dotenv();

    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let invocation = parse_args(&args)?;
    info!(command = ?invocation.command, "kcadm starting");

    let mut config = Config::load()?;
    run(invocation, &mut config).await
}
