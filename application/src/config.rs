use domain::thumbnail::ThumbnailSpec;

use crate::error::AppResult;
use crate::infrastructure_config::ThumbnailConfig;

#[derive(Debug, Clone)]
pub struct ThumbnailSettings {
    pub spec: ThumbnailSpec,
}

impl ThumbnailSettings {
    pub fn from_config(config: &ThumbnailConfig) -> AppResult<Self> {
        Ok(Self {
            spec: ThumbnailSpec::for_width(config.target_width)?,
        })
    }
}

impl Default for ThumbnailSettings {
    fn default() -> Self {
        Self {
            spec: ThumbnailSpec::default(),
        }
    }
}
