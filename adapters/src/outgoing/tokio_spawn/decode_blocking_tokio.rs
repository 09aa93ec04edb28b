use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use tokio::task::spawn_blocking;

use domain::raster::RgbaRaster;
use photo_reducer_application::{
    error::{AppError, AppResult},
    ports::outgoing::{blocking_task::BlockingDecodePort, image_codec::DynImageCodecPort},
};

/// Runs decoding on tokio's blocking pool so large images do not stall the
/// async workers.
pub struct TokioBlockingDecodeAdapter {
    codec_port: DynImageCodecPort,
}

impl TokioBlockingDecodeAdapter {
    pub fn new(codec_port: DynImageCodecPort) -> Self {
        Self { codec_port }
    }
}

impl BlockingDecodePort for TokioBlockingDecodeAdapter {
    fn decode(
        &self,
        encoded: Arc<[u8]>,
    ) -> Pin<Box<dyn Future<Output = AppResult<RgbaRaster>> + Send + 'static>> {
        let codec = Arc::clone(&self.codec_port);

        Box::pin(async move {
            spawn_blocking(move || codec.decode(&encoded))
                .await
                .map_err(|e| AppError::TaskError {
                    message: format!("Decode task failed: {e}"),
                })?
        })
    }
}
