use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::Duration;

use crate::error::{AppError, AppResult};
use domain::thumbnail::DEFAULT_TARGET_WIDTH;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    pub thumbnail: ThumbnailConfig,
    pub storage: StorageConfig,
    pub trigger: TriggerConfig,
    pub logging: LoggingConfig,
    pub environment: EnvironmentConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThumbnailConfig {
    pub target_width: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StorageConfig {
    pub root: PathBuf,
    pub input_container: String,
    pub output_container: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TriggerConfig {
    pub poll_interval_ms: u64,
    pub max_concurrent_invocations: usize,
}

impl TriggerConfig {
    #[must_use]
    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
    pub format: LogFormat,
    pub include_location: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvironmentConfig {
    pub env: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum LogFormat {
    #[serde(rename = "json")]
    Json,
    #[serde(rename = "pretty")]
    Pretty,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            root: PathBuf::from("storage"),
            input_container: "photos".to_string(),
            output_container: "thumbnails".to_string(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            thumbnail: ThumbnailConfig {
                target_width: DEFAULT_TARGET_WIDTH,
            },
            storage: StorageConfig::default(),
            trigger: TriggerConfig {
                poll_interval_ms: 2000,
                max_concurrent_invocations: 4,
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: LogFormat::Pretty,
                include_location: false,
            },
            environment: EnvironmentConfig {
                env: "development".to_string(),
            },
        }
    }
}

impl Config {
    pub fn validate(&self) -> AppResult<()> {
        if self.thumbnail.target_width == 0 {
            return Err(AppError::ConfigError {
                message: "target_width must be greater than 0".to_string(),
            });
        }

        if self.storage.input_container.trim().is_empty()
            || self.storage.output_container.trim().is_empty()
        {
            return Err(AppError::ConfigError {
                message: "storage container names cannot be empty".to_string(),
            });
        }

        if self.storage.input_container == self.storage.output_container {
            return Err(AppError::ConfigError {
                message: format!(
                    "input and output containers must differ (both are '{}')",
                    self.storage.input_container
                ),
            });
        }

        for container in [&self.storage.input_container, &self.storage.output_container] {
            if container.contains(['/', '\\']) || container == "." || container == ".." {
                return Err(AppError::ConfigError {
                    message: format!("container '{container}' must be a single path segment"),
                });
            }
        }

        if self.trigger.poll_interval_ms == 0 {
            return Err(AppError::ConfigError {
                message: "poll_interval_ms must be greater than 0".to_string(),
            });
        }

        if self.trigger.max_concurrent_invocations == 0 {
            return Err(AppError::ConfigError {
                message: "max_concurrent_invocations must be greater than 0".to_string(),
            });
        }

        Ok(())
    }
}
