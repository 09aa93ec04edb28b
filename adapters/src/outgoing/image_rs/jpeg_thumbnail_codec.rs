use domain::{dimensions::Dimensions, raster::RgbaRaster};
use photo_reducer_application::{
    error::{AppError, AppResult},
    ports::outgoing::image_codec::ImageCodecPort,
};
use image::{
    ImageBuffer, ImageError, ImageFormat, ImageReader, Rgb, Rgba, buffer::ConvertBuffer,
    imageops::{self, FilterType},
};
use std::io::Cursor;
use tracing::{debug, instrument};

#[derive(Copy, Clone)]
pub struct JpegThumbnailConfig {
    pub filter: FilterType,
}

impl Default for JpegThumbnailConfig {
    fn default() -> Self {
        Self {
            filter: FilterType::CatmullRom,
        }
    }
}

/// `image` crate backed codec. Any format the crate can sniff is accepted on
/// input; output is always baseline JPEG at the encoder's default quality.
#[derive(Clone)]
pub struct JpegThumbnailCodec {
    filter: FilterType,
}

impl JpegThumbnailCodec {
    pub fn new(config: JpegThumbnailConfig) -> Self {
        Self {
            filter: config.filter,
        }
    }

    #[instrument(skip(self, encoded), fields(input_bytes = encoded.len()))]
    fn decode_impl(&self, encoded: &[u8]) -> AppResult<RgbaRaster> {
        if encoded.is_empty() {
            return Err(AppError::DecodeError {
                message: "Input is empty".to_string(),
            });
        }

        let reader = ImageReader::new(Cursor::new(encoded))
            .with_guessed_format()
            .map_err(|e| AppError::DecodeError {
                message: format!("Failed to read image header: {}", e),
            })?;

        let Some(format) = reader.format() else {
            return Err(AppError::DecodeError {
                message: "Unrecognized image format".to_string(),
            });
        };

        let img = reader.decode().map_err(|e| match e {
            ImageError::Limits(limits) => AppError::ProcessingError {
                message: format!("Image exceeds decoder limits: {}", limits),
            },
            other => AppError::DecodeError {
                message: format!("Failed to decode {:?}: {}", format, other),
            },
        })?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();
        let dimensions = Dimensions::new(width, height).map_err(|e| AppError::DecodeError {
            message: e.to_string(),
        })?;

        debug!(
            "Decoded {:?}: {} bytes -> {}",
            format,
            encoded.len(),
            dimensions
        );
        Ok(RgbaRaster::from_pixels(dimensions, rgba_img.into_raw())?)
    }

    #[instrument(skip(self, raster), fields(source = %raster.dimensions(), target = %target))]
    fn resize_impl(&self, raster: &RgbaRaster, target: Dimensions) -> AppResult<RgbaRaster> {
        let source = borrowed_buffer(raster)?;
        let resized = imageops::resize(&source, target.width(), target.height(), self.filter);

        Ok(RgbaRaster::from_pixels(target, resized.into_raw())?)
    }

    #[instrument(skip(self, raster), fields(dimensions = %raster.dimensions()))]
    fn encode_jpeg_impl(&self, raster: &RgbaRaster) -> AppResult<Vec<u8>> {
        // JPEG has no alpha channel.
        let rgb: ImageBuffer<Rgb<u8>, Vec<u8>> = borrowed_buffer(raster)?.convert();

        let mut jpeg_bytes = Vec::new();
        rgb.write_to(&mut Cursor::new(&mut jpeg_bytes), ImageFormat::Jpeg)
            .map_err(|e| AppError::ProcessingError {
                message: format!("Failed to encode JPEG: {}", e),
            })?;

        debug!("Encoded JPEG: {} bytes", jpeg_bytes.len());
        Ok(jpeg_bytes)
    }
}

impl Default for JpegThumbnailCodec {
    fn default() -> Self {
        Self::new(JpegThumbnailConfig::default())
    }
}

fn borrowed_buffer(raster: &RgbaRaster) -> AppResult<ImageBuffer<Rgba<u8>, &[u8]>> {
    let dims = raster.dimensions();
    ImageBuffer::from_raw(dims.width(), dims.height(), raster.pixels()).ok_or_else(|| {
        AppError::ProcessingError {
            message: format!("Raster buffer does not match {}", dims),
        }
    })
}

impl ImageCodecPort for JpegThumbnailCodec {
    fn decode(&self, encoded: &[u8]) -> AppResult<RgbaRaster> {
        self.decode_impl(encoded)
    }
    fn resize(&self, raster: &RgbaRaster, target: Dimensions) -> AppResult<RgbaRaster> {
        self.resize_impl(raster, target)
    }
    fn encode_jpeg(&self, raster: &RgbaRaster) -> AppResult<Vec<u8>> {
        self.encode_jpeg_impl(raster)
    }
}
