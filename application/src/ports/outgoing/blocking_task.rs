use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use crate::error::AppResult;
use domain::raster::RgbaRaster;

pub trait BlockingDecodePort: Send + Sync {
    fn decode(
        &self,
        encoded: Arc<[u8]>,
    ) -> Pin<Box<dyn Future<Output = AppResult<RgbaRaster>> + Send + 'static>>;
}

pub type DynBlockingDecodePort = Arc<dyn BlockingDecodePort>;
