//! FitWell Web Host
//!
//! Run with: cargo run --bin fitwell-serve
//!
//! Serves the built `fitwell-ui` bundle and the public client settings.
//! Settings come from the config file; see `fitwell config` for the
//! environment variables that override it. `RUST_LOG` overrides the log level.

use clap::Parser;
use std::path::PathBuf;

use fitwell::client::ClientConfig;
use fitwell::config::Config;
use fitwell::serve::{serve, ServeState};

#[derive(Parser)]
#[command(name = "fitwell-serve")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Serve the FitWell web app")]
struct Args {
    /// Config file (default: search the standard locations)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Port, overriding the config file
    #[arg(short, long)]
    port: Option<u16>,

    /// Built UI directory, overriding the config file
    #[arg(long)]
    static_dir: Option<String>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let mut config = Config::load_from(args.config.as_deref())?;
    if let Some(port) = args.port {
        config.serve.port = port;
    }
    if let Some(dir) = args.static_dir {
        config.serve.static_dir = dir;
    }

    fitwell::logging::init(&config.logging, "tower_http=debug");

    tracing::info!("Starting FitWell web host v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Static directory: {}", config.serve.static_dir);
    tracing::info!("Backend: {}", config.api.base_url);
    if !config.oauth.provider().is_configured() {
        tracing::warn!("No OAuth client id configured; Kakao sign-in is disabled");
    }

    let state = ServeState::new(ClientConfig::from(&config));
    serve(state, &config.serve).await?;

    tracing::info!("FitWell web host stopped");
    Ok(())
}
