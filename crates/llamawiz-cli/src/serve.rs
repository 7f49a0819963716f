//! `llamawiz serve` — run the browser chat host.
//!
//! Startup sequence:
//! 1. Load config, apply `--host` / `--port`
//! 2. Build the inference client and session store
//! 3. Serve HTTP until Ctrl+C

use std::sync::Arc;

use anyhow::Result;
use tracing::info;

use llamawiz_core::config::load_config;
use llamawiz_web::AppState;

use crate::helpers;

/// Run the web host.
pub async fn run(host: Option<String>, port: Option<u16>) -> Result<()> {
    let mut config = load_config(None);
    if let Some(host) = host {
        config.server.host = host;
    }
    if let Some(port) = port {
        config.server.port = port;
    }

    let service = crate::build_service(&config)?;
    let addr = config.server.bind_addr();

    helpers::print_banner("Serve");
    println!("  Endpoint:  {}", config.inference.completions_url());
    println!("  Model:     {}", config.inference.model);
    println!("  Listening: http://{addr}");
    println!();
    println!("  Ctrl+C to stop");
    println!();

    info!(
        addr = %addr,
        endpoint = %config.inference.completions_url(),
        "starting web host"
    );

    llamawiz_web::run(&addr, AppState::new(Arc::new(service))).await?;

    println!("  Stopped. Goodbye!");
    Ok(())
}
