use crate::error::{IcoError, Result};
use image::imageops::{self, FilterType};
use image::DynamicImage;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

// Size limits for rasters:
const MIN_WIDTH: u32 = 1;
const MIN_HEIGHT: u32 = 1;

// Filter used whenever a source is scaled to an icon size.
const RESIZE_FILTER: FilterType = FilterType::Lanczos3;

//===========================================================================//

/// An uncompressed image with 8-bit RGBA pixels.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct RgbaImage {
    width: u32,
    height: u32,
    rgba_data: Vec<u8>,
}

impl RgbaImage {
    /// Creates a new image with the given dimensions and RGBA data.  The
    /// `width` and `height` must be nonzero, and `rgba_data` must have `4 *
    /// width * height` bytes and be in row-major order from top to bottom.
    /// Panics if the dimensions are out of range or if `rgba_data` is the
    /// wrong length.
    pub fn from_rgba_data(
        width: u32,
        height: u32,
        rgba_data: Vec<u8>,
    ) -> RgbaImage {
        if width < MIN_WIDTH {
            panic!(
                "Invalid width (was {}, but must be at least {})",
                width, MIN_WIDTH
            );
        }
        if height < MIN_HEIGHT {
            panic!(
                "Invalid height (was {}, but must be at least {})",
                height, MIN_HEIGHT
            );
        }
        let expected_data_len = (width as u64) * (height as u64) * 4;
        if (rgba_data.len() as u64) != expected_data_len {
            panic!(
                "Invalid data length (was {}, but must be {} for {}x{} image)",
                rgba_data.len(),
                expected_data_len,
                width,
                height
            );
        }
        RgbaImage { width, height, rgba_data }
    }

    /// Returns the width of the image, in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the RGBA data for this image, in row-major order from top to
    /// bottom.
    pub fn rgba_data(&self) -> &[u8] {
        &self.rgba_data
    }

    /// Consumes the image, returning its RGBA data.
    pub fn into_rgba_data(self) -> Vec<u8> {
        self.rgba_data
    }

    /// Returns the RGBA value of the pixel at `(x, y)`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        let start = 4 * (y as usize * self.width as usize + x as usize);
        let mut pixel = [0u8; 4];
        pixel.copy_from_slice(&self.rgba_data[start..][..4]);
        pixel
    }
}

impl From<image::RgbaImage> for RgbaImage {
    fn from(buffer: image::RgbaImage) -> RgbaImage {
        let (width, height) = buffer.dimensions();
        RgbaImage::from_rgba_data(width, height, buffer.into_raw())
    }
}

//===========================================================================//

/// Produces square RGBA rasters of a source image at a requested size.
///
/// The encoder calls this once per requested icon size and requires the
/// result to be exactly `size` by `size` pixels.
pub trait Rasterizer {
    /// Renders the source at `size` by `size` pixels.
    fn rasterize(&self, size: u32) -> Result<RgbaImage>;
}

impl Rasterizer for RgbaImage {
    fn rasterize(&self, size: u32) -> Result<RgbaImage> {
        if self.width == size && self.height == size {
            return Ok(self.clone());
        }
        let buffer = match image::RgbaImage::from_raw(
            self.width,
            self.height,
            self.rgba_data.clone(),
        ) {
            Some(buffer) => buffer,
            None => {
                return Err(IcoError::Rasterizer(format!(
                    "RGBA data does not fit a {}x{} image",
                    self.width, self.height
                )));
            }
        };
        buffer.rasterize(size)
    }
}

impl Rasterizer for image::RgbaImage {
    fn rasterize(&self, size: u32) -> Result<RgbaImage> {
        if size == 0 {
            return Err(IcoError::InvalidSize(size));
        }
        Ok(imageops::resize(self, size, size, RESIZE_FILTER).into())
    }
}

impl Rasterizer for DynamicImage {
    fn rasterize(&self, size: u32) -> Result<RgbaImage> {
        if size == 0 {
            return Err(IcoError::InvalidSize(size));
        }
        Ok(self.resize_exact(size, size, RESIZE_FILTER).into_rgba8().into())
    }
}

//===========================================================================//


//===========================================================================//
