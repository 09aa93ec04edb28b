use std::error::Error;

use tokio::signal;
use tracing::{error, info};

use server::bootstrap::state::AppState;
use server::config_loader;
use server::observability;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    let config = config_loader::load_config()?;

    observability::tracing::setup_logging(&config)?;

    info!("Starting Photo Reducer");
    info!("Configuration loaded successfully");
    observability::startup_info::print_startup_info(&config);

    let state = AppState::new(&config).await?;

    let result = state.trigger.run(shutdown_signal()).await;

    if let Err(e) = result {
        error!("Trigger error: {}", e);
        return Err(e.into());
    }

    info!("Shutdown completed");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                error!("Failed to install signal handler: {}", e);
            }
        }
    };

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C signal, finishing current sweep...");
        },
        () = terminate => {
            info!("Received terminate signal, finishing current sweep...");
        },
    }
}
