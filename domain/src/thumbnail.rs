use crate::dimensions::Dimensions;
use crate::error::{DomainError, DomainResult};

pub const DEFAULT_TARGET_WIDTH: u32 = 30;

/// Fixed-width thumbnail geometry. The height always follows the source
/// aspect ratio.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ThumbnailSpec {
    target_width: u32,
}

impl ThumbnailSpec {
    pub fn for_width(target_width: u32) -> DomainResult<Self> {
        if target_width == 0 {
            return Err(DomainError::InvalidTargetWidth(target_width));
        }
        Ok(Self { target_width })
    }

    #[must_use]
    pub fn target_width(self) -> u32 {
        self.target_width
    }

    /// `round(source.height * target_width / source.width)`, rounding exact
    /// halves to the even neighbour and never going below one pixel.
    pub fn target_dimensions(self, source: Dimensions) -> DomainResult<Dimensions> {
        let scaled = u128::from(source.height()) * u128::from(self.target_width);
        let width = u128::from(source.width());
        let quotient = scaled / width;
        let twice_remainder = (scaled % width) * 2;

        let rounds_up = twice_remainder > width || (twice_remainder == width && quotient % 2 == 1);
        let rounded = (quotient + u128::from(rounds_up)).max(1);

        let height = u32::try_from(rounded).map_err(|_| DomainError::DimensionOverflow {
            width: source.width(),
            height: source.height(),
        })?;

        Dimensions::new(self.target_width, height)
    }
}

impl Default for ThumbnailSpec {
    fn default() -> Self {
        Self {
            target_width: DEFAULT_TARGET_WIDTH,
        }
    }
}
