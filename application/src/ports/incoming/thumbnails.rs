use crate::error::AppResult;
use domain::blob::{ImageBlob, ThumbnailResult};

#[async_trait::async_trait]
pub trait ThumbnailUseCase: Send + Sync {
    /// Decodes `blob`, shrinks it to the configured width and re-encodes it
    /// as JPEG. Failures are logged and returned as-is; nothing is retried.
    async fn process(&self, blob: ImageBlob) -> AppResult<ThumbnailResult>;
}
