use domain::blob::BlobName;
use photo_reducer_application::{error::AppError, ports::outgoing::processing_log::ProcessingLogPort};
use tracing::{error, info};

pub struct TracingProcessingLog;

impl TracingProcessingLog {
    pub fn new() -> Self {
        Self
    }
}

impl Default for TracingProcessingLog {
    fn default() -> Self {
        Self::new()
    }
}

impl ProcessingLogPort for TracingProcessingLog {
    fn started(&self, name: &BlobName) {
        info!(blob_name = %name, "Processing blob: {}", name);
    }

    fn completed(&self, name: &BlobName, input_bytes: usize, output_bytes: usize) {
        info!(
            blob_name = %name,
            input_bytes,
            output_bytes,
            "Resize completed for {}. Input size: {} bytes, Output size: {} bytes",
            name,
            input_bytes,
            output_bytes
        );
    }

    fn failed(&self, name: &BlobName, error: &AppError) {
        error!(blob_name = %name, error = %error, "Error processing blob: {}", name);
    }
}
