//! TaskBridge Server

use std::net::SocketAddr;
use std::time::Duration;

use clap::Parser;
use tokio::net::TcpListener;
use tokio::signal;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use taskbridge_server::http::create_router;
use taskbridge_server::{AppState, Config};

#[derive(Parser, Debug)]
#[command(name = "taskbridge-server")]
#[command(about = "Structures incoming tasks and tracks workflow runs")]
struct Args {
    /// Interface to bind
    #[arg(long, env = "TASKBRIDGE_BIND", default_value = "0.0.0.0")]
    bind: String,

    /// HTTP port
    #[arg(long, env = "PORT", default_value_t = 4100)]
    port: u16,

    /// Model provider credential; structuring is disabled without it
    #[arg(long, env = "OPENAI_API_KEY", hide_env_values = true)]
    model_api_key: Option<String>,

    /// Model name
    #[arg(long, env = "OPENAI_MODEL", default_value = "gpt-4.1-mini")]
    model: String,

    /// Model provider base URL
    #[arg(long, env = "OPENAI_BASE_URL", default_value = "https://api.openai.com/v1")]
    model_base_url: String,

    /// Downstream executor base URL
    #[arg(long, env = "HUETER_BASE_URL", default_value = "http://localhost:4000")]
    downstream_url: String,

    /// Seconds to wait for in-flight forwards on shutdown
    #[arg(long, default_value_t = 10)]
    shutdown_grace_secs: u64,
}

impl From<Args> for Config {
    fn from(args: Args) -> Self {
        Self {
            bind_addr: format!("{}:{}", args.bind, args.port),
            model_api_key: args.model_api_key,
            model: args.model,
            model_base_url: args.model_base_url,
            downstream_url: args.downstream_url,
            shutdown_grace_secs: args.shutdown_grace_secs,
        }
    }
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("taskbridge=info,tower_http=info")),
        )
        .with_target(true)
        .init();

    let config: Config = Args::parse().into();
    let http_addr: SocketAddr = config.bind_addr.parse()?;
    let grace = Duration::from_secs(config.shutdown_grace_secs);

    let state = AppState::from_config(config)?;

    info!(
        http_addr = %http_addr,
        downstream = %state.downstream.base_url(),
        structuring = state.structurer.is_enabled(),
        "Starting TaskBridge"
    );

    let router = create_router(state.clone());
    let listener = TcpListener::bind(http_addr).await?;
    info!("HTTP server listening on {}", http_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    // Let detached forwards finish before exiting
    state.forwards.close();
    let pending = state.forwards.len();
    if pending > 0 {
        info!(pending, "Waiting for in-flight forwards");
        if tokio::time::timeout(grace, state.forwards.wait()).await.is_err() {
            warn!(
                pending = state.forwards.len(),
                "Forwards still running at shutdown, abandoning"
            );
        }
    }

    info!("TaskBridge stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for Ctrl-C");
        return;
    }
    info!("Shutdown requested");
}
