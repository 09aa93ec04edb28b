use figment::{
    Figment,
    providers::{Env, Format, Json, Serialized, Toml},
};
use photo_reducer_application::error::{AppError, AppResult};
use photo_reducer_application::infrastructure_config::Config;
use std::path::Path;

pub const ENV_PREFIX: &str = "PHOTO_REDUCER_";

pub fn load_config() -> AppResult<Config> {
    let mut figment = Figment::from(Serialized::defaults(Config::default()));

    if Path::new("config.toml").exists() {
        figment = figment.merge(Toml::file("config.toml"));
    }

    if Path::new("config.json").exists() {
        figment = figment.merge(Json::file("config.json"));
    }

    extract(figment.merge(Env::prefixed(ENV_PREFIX).split("__")))
}

fn extract(figment: Figment) -> AppResult<Config> {
    let config: Config = figment.extract().map_err(|e| AppError::ConfigError {
        message: format!("Failed to load configuration: {e}"),
    })?;

    config.validate()?;
    Ok(config)
}
