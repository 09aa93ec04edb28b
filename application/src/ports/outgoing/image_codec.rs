use crate::error::AppResult;
use domain::{dimensions::Dimensions, raster::RgbaRaster};
use std::sync::Arc;

pub trait ImageCodecPort: Send + Sync {
    /// Fails with `AppError::DecodeError` when the bytes are not a supported image.
    fn decode(&self, encoded: &[u8]) -> AppResult<RgbaRaster>;
    fn resize(&self, raster: &RgbaRaster, target: Dimensions) -> AppResult<RgbaRaster>;
    fn encode_jpeg(&self, raster: &RgbaRaster) -> AppResult<Vec<u8>>;
}

pub type DynImageCodecPort = Arc<dyn ImageCodecPort>;
