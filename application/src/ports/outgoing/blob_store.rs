use crate::error::AppResult;
use domain::blob::{BlobEntry, BlobName};
use std::sync::Arc;

#[async_trait::async_trait]
pub trait BlobStorePort: Send + Sync {
    /// Blobs in `container`, sorted by name, each with the version seen now.
    async fn list(&self, container: &str) -> AppResult<Vec<BlobEntry>>;
    async fn read(&self, container: &str, name: &BlobName) -> AppResult<Vec<u8>>;
    async fn write(&self, container: &str, name: &BlobName, bytes: &[u8]) -> AppResult<()>;
    async fn exists(&self, container: &str, name: &BlobName) -> AppResult<bool>;
}

pub type DynBlobStorePort = Arc<dyn BlobStorePort>;
