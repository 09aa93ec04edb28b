use std::fmt;

use crate::dimensions::Dimensions;
use crate::error::{DomainError, DomainResult};

pub const RGBA_CHANNELS: usize = 4;

/// Decoded pixel grid, 8 bits per channel, row-major RGBA.
#[derive(Clone, PartialEq, Eq)]
pub struct RgbaRaster {
    dimensions: Dimensions,
    pixels: Vec<u8>,
}

impl RgbaRaster {
    pub fn from_pixels(dimensions: Dimensions, pixels: Vec<u8>) -> DomainResult<Self> {
        let expected = usize::try_from(dimensions.pixel_count())
            .ok()
            .and_then(|count| count.checked_mul(RGBA_CHANNELS))
            .unwrap_or(usize::MAX);

        if pixels.len() != expected {
            return Err(DomainError::RasterLengthMismatch {
                expected,
                actual: pixels.len(),
            });
        }

        Ok(Self { dimensions, pixels })
    }

    #[must_use]
    pub fn dimensions(&self) -> Dimensions {
        self.dimensions
    }

    #[must_use]
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }
}

impl fmt::Debug for RgbaRaster {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RgbaRaster")
            .field("dimensions", &self.dimensions)
            .field("bytes", &self.pixels.len())
            .finish()
    }
}
