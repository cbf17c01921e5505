use std::path::Path;

use anyhow::Result;
use clap::Parser;
use sts_client::config::guard::IdentityGuard;
use sts_client::config::loader::file_to_config;
use sts_client::server;
use sts_client::sources::http_client::build_client;
use sts_client::utils::logging;
use sts_client::utils::logging::LogLevel;
use tracing::{info, warn};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    #[arg(short, long, env = "CONFIG", default_value = "sts-client.yaml")]
    config: String,
    #[arg(long, env = "LOG_LEVEL", value_enum)]
    log_level: Option<LogLevel>,
}

#[tokio::main]
async fn main() -> Result<()> {
    // -------------------------------
    // 1. Load YAML config, start logging
    // -------------------------------

    let args = Args::parse();
    let service_config = file_to_config(Path::new(&args.config)).await?;
    logging::run(&service_config, args.log_level);

    // -------------------------------
    // 2. Commit identity, start cache sweeper
    // -------------------------------

    let guard = IdentityGuard::new(service_config.settings.cache.sweep_interval());
    let identity = guard.initialize(service_config.identity.clone()).await?;

    // -------------------------------
    // 3. Shared outbound client
    // -------------------------------

    let client = build_client(&service_config.settings.http)?;
    let introspection = identity.introspection_client(client);

    // -------------------------------
    // 4. Serve gated routes until Ctrl-C
    // -------------------------------

    info!("Service starting...");
    let shutdown = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("failed to listen for shutdown signal: {}", e);
            std::future::pending::<()>().await;
        }
        info!("shutting down");
    };
    let served = server::server::start(&service_config.settings, introspection, shutdown).await;

    // -------------------------------
    // 5. Join the sweeper
    // -------------------------------

    guard.shutdown().await;
    served
}
