//! dcast-server - Device Cast backend server
//!
//! REST API over a unix socket, or MCP over stdio with `--mcp`.

use std::path::Path;
use std::sync::Arc;

use tracing::info;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

mod backend;
mod config;
mod mcp;
mod routes;
mod state;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let mcp_mode = std::env::args().any(|a| a == "--mcp");

    // Load configuration
    let config = config::Config::load()?;

    // Initialize logging. In MCP mode stdout carries the JSON-RPC
    // transport, so log lines go to the log file instead.
    let filter = EnvFilter::from_default_env().add_directive("dcast_server=info".parse()?);
    if mcp_mode {
        let log_file = open_log_file(&config.log_file)?;
        tracing_subscriber::registry()
            .with(fmt::layer().with_ansi(false).with_writer(Arc::new(log_file)))
            .with(filter)
            .init();
    } else {
        tracing_subscriber::registry()
            .with(fmt::layer())
            .with(filter)
            .init();
    }

    info!("dcast-server v{}", env!("CARGO_PKG_VERSION"));
    info!("Config loaded from {:?}", config.config_path);

    let state = state::AppState::new(config.clone());

    // MCP mode: speak the protocol over stdio and exit when the client
    // disconnects. No sockets or pid files.
    if mcp_mode {
        info!("Serving MCP over stdio");
        return mcp::McpServer::new(state).serve_stdio().await;
    }

    // Check for existing server
    if config.pid_file.exists() {
        let pid_str = std::fs::read_to_string(&config.pid_file)?;
        let pid: i32 = pid_str.trim().parse()?;

        if process_exists(pid) {
            anyhow::bail!("Server already running with PID {}", pid);
        }

        // Clean up stale files
        info!("Cleaning up stale PID file from previous crash");
        let _ = std::fs::remove_file(&config.pid_file);
        let _ = std::fs::remove_file(&config.api_socket);
    }

    let _ = std::fs::remove_file(&config.api_socket);
    let listener = tokio::net::UnixListener::bind(&config.api_socket)?;
    std::fs::write(&config.pid_file, std::process::id().to_string())?;
    info!("Listening on {:?}", config.api_socket);

    let router = routes::create_router(state);
    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    let _ = std::fs::remove_file(&config.pid_file);
    let _ = std::fs::remove_file(&config.api_socket);
    info!("Server stopped");

    Ok(())
}

async fn shutdown_signal() {
    let _ = tokio::signal::ctrl_c().await;
    info!("Shutting down...");
}

/// Open the MCP-mode log file, appending across runs.
fn open_log_file(path: &Path) -> anyhow::Result<std::fs::File> {
    let file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)?;
    Ok(file)
}

/// Check if a process exists by PID
fn process_exists(pid: i32) -> bool {
    // On Unix, sending signal 0 checks if process exists
    unsafe { libc::kill(pid, 0) == 0 }
}
