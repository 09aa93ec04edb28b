use std::sync::Arc;
use tracing::{debug, instrument};

use domain::blob::{ImageBlob, ThumbnailResult};

use crate::{
    config::ThumbnailSettings,
    error::{AppError, AppResult},
    ports::{
        incoming::thumbnails::ThumbnailUseCase,
        outgoing::{
            blocking_task::DynBlockingDecodePort, image_codec::DynImageCodecPort,
            processing_log::DynProcessingLogPort,
        },
    },
};

pub struct ThumbnailServiceDeps {
    pub codec_port: DynImageCodecPort,
    pub decode_port: DynBlockingDecodePort,
    pub log_port: DynProcessingLogPort,
}

/// Stateless decode, resize, encode pipeline. One instance serves any number
/// of concurrent invocations.
pub struct ThumbnailService {
    settings: Arc<ThumbnailSettings>,
    codec_port: DynImageCodecPort,
    decode_port: DynBlockingDecodePort,
    log_port: DynProcessingLogPort,
}

impl ThumbnailService {
    pub fn new(settings: &Arc<ThumbnailSettings>, deps: ThumbnailServiceDeps) -> Arc<Self> {
        Arc::new(Self {
            settings: Arc::clone(settings),
            codec_port: deps.codec_port,
            decode_port: deps.decode_port,
            log_port: deps.log_port,
        })
    }

    async fn run_pipeline(&self, blob: &ImageBlob) -> AppResult<ThumbnailResult> {
        let raster = self.decode_port.decode(Arc::clone(blob.bytes())).await?;
        let source = raster.dimensions();

        let target = self
            .settings
            .spec
            .target_dimensions(source)
            .map_err(|e| AppError::ProcessingError {
                message: format!("Cannot size thumbnail for {source}: {e}"),
            })?;
        debug!(%source, %target, "Resizing decoded image");

        let resized = self.codec_port.resize(&raster, target)?;
        drop(raster);

        let jpeg = self.codec_port.encode_jpeg(&resized)?;
        if jpeg.is_empty() {
            return Err(AppError::ProcessingError {
                message: "JPEG encoding produced empty output".to_string(),
            });
        }

        Ok(ThumbnailResult::new(blob.name().clone(), jpeg, target))
    }
}

#[async_trait::async_trait]
impl ThumbnailUseCase for ThumbnailService {
    #[instrument(skip(self, blob), fields(blob_name = %blob.name()))]
    async fn process(&self, blob: ImageBlob) -> AppResult<ThumbnailResult> {
        self.log_port.started(blob.name());

        match self.run_pipeline(&blob).await {
            Ok(result) => {
                self.log_port
                    .completed(blob.name(), blob.byte_len(), result.byte_len());
                Ok(result)
            }
            Err(e) => {
                self.log_port.failed(blob.name(), &e);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::outgoing::{
        blocking_task::BlockingDecodePort, image_codec::ImageCodecPort,
        processing_log::ProcessingLogPort,
    };
    use domain::{
        blob::BlobName,
        dimensions::Dimensions,
        raster::{RGBA_CHANNELS, RgbaRaster},
    };
    use std::future::Future;
    use std::pin::Pin;
    use std::sync::{Mutex, PoisonError};

    /// Test images are an 8 byte header: little-endian width then height.
    fn fake_image(width: u32, height: u32) -> Vec<u8> {
        let mut bytes = width.to_le_bytes().to_vec();
        bytes.extend_from_slice(&height.to_le_bytes());
        bytes
    }

    fn blank_raster(dims: Dimensions) -> AppResult<RgbaRaster> {
        let len = usize::try_from(dims.pixel_count()).unwrap_or(usize::MAX) * RGBA_CHANNELS;
        Ok(RgbaRaster::from_pixels(dims, vec![0; len])?)
    }

    #[derive(Default)]
    struct FakeCodec {
        resized_to: Mutex<Vec<Dimensions>>,
        fail_encode: bool,
    }

    impl ImageCodecPort for FakeCodec {
        fn decode(&self, encoded: &[u8]) -> AppResult<RgbaRaster> {
            let header: [u8; 8] = encoded
                .try_into()
                .map_err(|_| AppError::DecodeError {
                    message: format!("not a fake image ({} bytes)", encoded.len()),
                })?;
            let (w, h) = header.split_at(4);
            let width = u32::from_le_bytes(w.try_into().unwrap_or_default());
            let height = u32::from_le_bytes(h.try_into().unwrap_or_default());
            blank_raster(Dimensions::new(width, height)?)
        }

        fn resize(&self, _raster: &RgbaRaster, target: Dimensions) -> AppResult<RgbaRaster> {
            self.resized_to
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(target);
            blank_raster(target)
        }

        fn encode_jpeg(&self, raster: &RgbaRaster) -> AppResult<Vec<u8>> {
            if self.fail_encode {
                return Err(AppError::ProcessingError {
                    message: "unsupported color space".to_string(),
                });
            }
            Ok(vec![0xFF; raster.pixels().len() / RGBA_CHANNELS])
        }
    }

    struct InlineDecode {
        codec: Arc<FakeCodec>,
    }

    impl BlockingDecodePort for InlineDecode {
        fn decode(
            &self,
            encoded: Arc<[u8]>,
        ) -> Pin<Box<dyn Future<Output = AppResult<RgbaRaster>> + Send + 'static>> {
            let codec = Arc::clone(&self.codec);
            Box::pin(async move { codec.decode(&encoded) })
        }
    }

    #[derive(Debug, Clone, PartialEq, Eq)]
    enum LogEntry {
        Started(String),
        Completed(String, usize, usize),
        Failed(String, String),
    }

    #[derive(Default)]
    struct RecordingLog {
        entries: Mutex<Vec<LogEntry>>,
    }

    impl RecordingLog {
        fn entries(&self) -> Vec<LogEntry> {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .clone()
        }

        fn push(&self, entry: LogEntry) {
            self.entries
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .push(entry);
        }
    }

    impl ProcessingLogPort for RecordingLog {
        fn started(&self, name: &BlobName) {
            self.push(LogEntry::Started(name.to_string()));
        }

        fn completed(&self, name: &BlobName, input_bytes: usize, output_bytes: usize) {
            self.push(LogEntry::Completed(
                name.to_string(),
                input_bytes,
                output_bytes,
            ));
        }

        fn failed(&self, name: &BlobName, error: &AppError) {
            self.push(LogEntry::Failed(name.to_string(), error.to_string()));
        }
    }

    struct Harness {
        service: Arc<ThumbnailService>,
        codec: Arc<FakeCodec>,
        log: Arc<RecordingLog>,
    }

    fn harness(codec: FakeCodec) -> Harness {
        let codec = Arc::new(codec);
        let log = Arc::new(RecordingLog::default());
        let service = ThumbnailService::new(
            &Arc::new(ThumbnailSettings::default()),
            ThumbnailServiceDeps {
                codec_port: Arc::clone(&codec) as DynImageCodecPort,
                decode_port: Arc::new(InlineDecode {
                    codec: Arc::clone(&codec),
                }),
                log_port: Arc::clone(&log) as DynProcessingLogPort,
            },
        );
        Harness {
            service,
            codec,
            log,
        }
    }

    fn blob(name: &str, bytes: Vec<u8>) -> AppResult<ImageBlob> {
        Ok(ImageBlob::new(BlobName::parse(name)?, bytes))
    }

    #[tokio::test]
    async fn resizes_with_explicit_height_and_logs_sizes() -> AppResult<()> {
        let h = harness(FakeCodec::default());

        let result = h.service.process(blob("a.png", fake_image(300, 200))?).await?;

        assert_eq!(result.name().as_str(), "a.png");
        assert_eq!(result.dimensions(), Dimensions::new(30, 20)?);
        assert_eq!(
            *h.codec
                .resized_to
                .lock()
                .unwrap_or_else(PoisonError::into_inner),
            vec![Dimensions::new(30, 20)?]
        );
        assert_eq!(
            h.log.entries(),
            vec![
                LogEntry::Started("a.png".to_string()),
                LogEntry::Completed("a.png".to_string(), 8, 600),
            ]
        );
        Ok(())
    }

    #[tokio::test]
    async fn upscales_small_square_images() -> AppResult<()> {
        let h = harness(FakeCodec::default());

        let result = h.service.process(blob("b.jpg", fake_image(10, 10))?).await?;

        assert_eq!(result.dimensions(), Dimensions::new(30, 30)?);
        Ok(())
    }

    #[tokio::test]
    async fn exact_half_heights_round_to_even() -> AppResult<()> {
        let h = harness(FakeCodec::default());

        let four_by_three = h.service.process(blob("4x3.png", fake_image(4, 3))?).await?;
        let twenty_by_three = h.service.process(blob("20x3.png", fake_image(20, 3))?).await?;

        assert_eq!(four_by_three.dimensions(), Dimensions::new(30, 22)?);
        assert_eq!(twenty_by_three.dimensions(), Dimensions::new(30, 4)?);
        Ok(())
    }

    #[tokio::test]
    async fn decode_failure_is_logged_and_returned() -> AppResult<()> {
        let h = harness(FakeCodec::default());

        let err = h
            .service
            .process(blob("b.jpg", Vec::new())?)
            .await
            .err()
            .ok_or_else(|| AppError::TaskError {
                message: "expected a decode failure".to_string(),
            })?;

        assert!(err.is_decode());
        let entries = h.log.entries();
        assert_eq!(entries.len(), 2);
        assert!(matches!(
            entries.get(1),
            Some(LogEntry::Failed(name, detail)) if name == "b.jpg" && detail.contains("not a fake image")
        ));
        assert!(
            h.codec
                .resized_to
                .lock()
                .unwrap_or_else(PoisonError::into_inner)
                .is_empty()
        );
        Ok(())
    }

    #[tokio::test]
    async fn encode_failure_propagates_unchanged() -> AppResult<()> {
        let h = harness(FakeCodec {
            fail_encode: true,
            ..FakeCodec::default()
        });

        let result = h.service.process(blob("c.png", fake_image(40, 20))?).await;

        assert!(matches!(
            result,
            Err(AppError::ProcessingError { ref message }) if message == "unsupported color space"
        ));
        assert!(!h
            .log
            .entries()
            .iter()
            .any(|entry| matches!(entry, LogEntry::Completed(..))));
        Ok(())
    }

    #[tokio::test]
    async fn repeated_invocations_agree_on_dimensions() -> AppResult<()> {
        let h = harness(FakeCodec::default());
        let input = fake_image(1, 1000);

        let first = h.service.process(blob("tall.png", input.clone())?).await?;
        let second = h.service.process(blob("tall.png", input)?).await?;

        assert_eq!(first.dimensions(), Dimensions::new(30, 30_000)?);
        assert_eq!(first.dimensions(), second.dimensions());
        Ok(())
    }
}
