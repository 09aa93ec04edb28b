use std::io::stdout;
use tracing_bunyan_formatter::{BunyanFormattingLayer, JsonStorageLayer};
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use photo_reducer_application::error::{AppError, AppResult};
use photo_reducer_application::infrastructure_config::{Config, LogFormat};

const SERVICE_NAME: &str = "photo-reducer";

/// Installs the global subscriber. `RUST_LOG` wins over the configured level.
pub fn setup_logging(config: &Config) -> AppResult<()> {
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.logging.level))
        .map_err(|e| AppError::ConfigError {
            message: format!("Invalid log level '{}': {e}", config.logging.level),
        })?;

    let installed = match config.logging.format {
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(JsonStorageLayer)
            .with(BunyanFormattingLayer::new(SERVICE_NAME.to_string(), stdout))
            .try_init()
            .map_err(|e| e.to_string()),
        LogFormat::Pretty => {
            let format = fmt::format()
                .with_target(true)
                .with_thread_ids(true)
                .compact();

            tracing_subscriber::fmt()
                .event_format(format)
                .with_env_filter(env_filter)
                .with_file(config.logging.include_location)
                .with_line_number(config.logging.include_location)
                .try_init()
                .map_err(|e| e.to_string())
        }
    };

    installed.map_err(|e| AppError::ConfigError {
        message: format!("Failed to install log subscriber: {e}"),
    })
}
