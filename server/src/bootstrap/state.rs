use std::sync::Arc;

use photo_reducer_adapters::{
    incoming::storage_poll::trigger::{StoragePollPolicy, StoragePollTrigger},
    outgoing::{
        fs_tokio::blob_store_fs::FsBlobStoreAdapter,
        image_rs::jpeg_thumbnail_codec::{JpegThumbnailCodec, JpegThumbnailConfig},
        processing_log::tracing_processing_log::TracingProcessingLog,
        tokio_spawn::decode_blocking_tokio::TokioBlockingDecodeAdapter,
    },
};
use photo_reducer_application::error::AppError;
use photo_reducer_application::infrastructure_config::Config;
use photo_reducer_application::ports::incoming::thumbnails::ThumbnailUseCase;
use photo_reducer_application::ports::outgoing::{
    blob_store::BlobStorePort, image_codec::ImageCodecPort, processing_log::ProcessingLogPort,
};
use photo_reducer_application::{
    config::ThumbnailSettings,
    thumbnails::service::{ThumbnailService, ThumbnailServiceDeps},
};

#[derive(Clone)]
pub struct AppState {
    pub trigger: StoragePollTrigger,
}

impl AppState {
    pub async fn new(config: &Config) -> Result<Self, AppError> {
        let thumbnail_service = Self::create_thumbnail_service(config)?;
        let blob_store = Self::create_blob_store(config).await?;

        let trigger = StoragePollTrigger::new(
            StoragePollPolicy::from_config(&config.storage, &config.trigger),
            blob_store,
            thumbnail_service,
        );

        Ok(Self { trigger })
    }

    fn create_thumbnail_service(config: &Config) -> Result<Arc<dyn ThumbnailUseCase>, AppError> {
        let settings = Arc::new(ThumbnailSettings::from_config(&config.thumbnail)?);

        let codec_port: Arc<dyn ImageCodecPort> =
            Arc::new(JpegThumbnailCodec::new(JpegThumbnailConfig::default()));
        let log_port: Arc<dyn ProcessingLogPort> = Arc::new(TracingProcessingLog::new());

        let service: Arc<dyn ThumbnailUseCase> = ThumbnailService::new(
            &settings,
            ThumbnailServiceDeps {
                codec_port: Arc::clone(&codec_port),
                decode_port: Arc::new(TokioBlockingDecodeAdapter::new(codec_port)),
                log_port,
            },
        );

        Ok(service)
    }

    async fn create_blob_store(config: &Config) -> Result<Arc<dyn BlobStorePort>, AppError> {
        let store = FsBlobStoreAdapter::new(&config.storage.root);
        store
            .ensure_container(&config.storage.input_container)
            .await?;
        store
            .ensure_container(&config.storage.output_container)
            .await?;

        Ok(Arc::new(store))
    }
}
