//! `hbnb-server` entry point.

use std::sync::Arc;

use clap::Parser;
use hbnb_server::config::ServerArgs;
use hbnb_server::logging::init_tracing;
use hbnb_server::network::NetworkModule;
use hbnb_server::storage::Catalog;
use tracing::{error, info};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = ServerArgs::parse();
    init_tracing(args.log_format)?;

    let catalog = Arc::new(Catalog::open(&args.storage_config()).await?);
    info!(stats = ?catalog.stats(), "catalog ready");

    let mut module = NetworkModule::new(args.network_config(), catalog);
    let port = module.start().await?;
    info!(port, "hbnb-server listening");

    module.serve(shutdown_signal()).await?;
    info!("hbnb-server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl+C, shutting down"),
            Err(e) => {
                error!(error = %e, "failed to install Ctrl+C handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        use tokio::signal::unix::{signal, SignalKind};

        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("received SIGTERM, shutting down");
            }
            Err(e) => {
                error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {}
        () = terminate => {}
    }
}
