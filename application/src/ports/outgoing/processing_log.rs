use crate::error::AppError;
use domain::blob::BlobName;
use std::sync::Arc;

pub trait ProcessingLogPort: Send + Sync {
    fn started(&self, name: &BlobName);
    fn completed(&self, name: &BlobName, input_bytes: usize, output_bytes: usize);
    fn failed(&self, name: &BlobName, error: &AppError);
}

pub type DynProcessingLogPort = Arc<dyn ProcessingLogPort>;
