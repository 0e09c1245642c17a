use crate::bitmap::decode_bitmap;
use crate::dib::{reconstruct, BMP_FILE_HEADER_LEN};
use crate::entry::{EntryPlacer, ENCODED_BIT_COUNT};
use crate::error::Result;
use crate::icondir::DirectoryEntry;
use crate::pngcodec::{png_bits_per_pixel, PngCodec, StandardPng};
use crate::raster::RgbaImage;
use crate::sniff::PayloadFormat;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//===========================================================================//

/// One image stored in an ICO file.
///
/// The payload is kept in a form that a generic image decoder can read on
/// its own: PNG payloads are stored as-is, and DIB payloads get a
/// BITMAPFILEHEADER in front so they form a complete BMP file.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct IconImage {
    width: u32,
    height: u32,
    bit_depth: u16,
    format: PayloadFormat,
    payload: Vec<u8>,
    // Directory fields as stored in the file, written back on re-export.
    color_count: u8,
    color_planes: u16,
    directory_bit_count: u16,
}

impl IconImage {
    /// Builds an image from a directory entry and the bytes it points at.
    pub(crate) fn from_entry(
        entry: &DirectoryEntry,
        data: &[u8],
    ) -> Result<IconImage> {
        let format = PayloadFormat::sniff(data);
        let (bit_depth, payload) = match format {
            PayloadFormat::Png => {
                // A zero bit count falls back to the IHDR chunk.  A broken
                // IHDR leaves the depth at zero.
                let bit_depth = if entry.bit_count != 0 {
                    entry.bit_count
                } else {
                    png_bits_per_pixel(data).unwrap_or(0)
                };
                (bit_depth, data.to_vec())
            }
            PayloadFormat::Dib => {
                let bitmap = reconstruct(data, entry.bit_count)?;
                (bitmap.bit_depth, bitmap.data)
            }
        };
        Ok(IconImage {
            width: entry.width,
            height: entry.height,
            bit_depth,
            format,
            payload,
            color_count: entry.color_count,
            color_planes: entry.color_planes,
            directory_bit_count: entry.bit_count,
        })
    }

    /// Wraps a freshly encoded square PNG.
    pub(crate) fn encoded(size: u32, png_data: Vec<u8>) -> IconImage {
        IconImage {
            width: size,
            height: size,
            bit_depth: ENCODED_BIT_COUNT,
            format: PayloadFormat::Png,
            payload: png_data,
            color_count: 0,
            color_planes: 1,
            directory_bit_count: ENCODED_BIT_COUNT,
        }
    }

    /// Returns the width of the image, in pixels, as recorded in the ICO
    /// directory.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Returns the height of the image, in pixels, as recorded in the ICO
    /// directory.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Returns the bits-per-pixel (color depth) of the image.
    pub fn bit_depth(&self) -> u16 {
        self.bit_depth
    }

    /// Returns the palette size recorded in the ICO directory (zero for
    /// images without a palette).
    pub fn color_count(&self) -> u8 {
        self.color_count
    }

    /// Returns how the image is stored in the ICO file.
    pub fn format(&self) -> PayloadFormat {
        self.format
    }

    /// Returns true if the image is encoded as a PNG, or false if it is
    /// encoded as a BMP.
    pub fn is_png(&self) -> bool {
        self.format == PayloadFormat::Png
    }

    /// Returns the image as a standalone PNG or BMP file.
    pub fn payload(&self) -> &[u8] {
        &self.payload
    }

    /// Returns the exact bytes stored for this image inside the ICO file.
    /// For BMP images this is the payload without its file header.
    pub fn embedded_data(&self) -> &[u8] {
        match self.format {
            PayloadFormat::Png => &self.payload,
            PayloadFormat::Dib => {
                self.payload.get(BMP_FILE_HEADER_LEN..).unwrap_or_default()
            }
        }
    }

    /// Lays out this image's directory entry with the fields it was decoded
    /// with.
    pub(crate) fn place(
        &self,
        placer: &mut EntryPlacer,
    ) -> Result<DirectoryEntry> {
        let entry = placer.place(
            self.width,
            self.height,
            self.directory_bit_count,
            self.embedded_data().len(),
        )?;
        Ok(DirectoryEntry {
            color_count: self.color_count,
            color_planes: self.color_planes,
            ..entry
        })
    }

    /// Decodes the image's pixels, using the built-in PNG decoder for PNG
    /// payloads.
    pub fn decode_pixels(&self) -> Result<RgbaImage> {
        self.decode_pixels_with(&StandardPng)
    }

    /// Decodes the image's pixels, using `codec` for PNG payloads.
    pub fn decode_pixels_with(
        &self,
        codec: &dyn PngCodec,
    ) -> Result<RgbaImage> {
        match self.format {
            PayloadFormat::Png => codec.decode_png(&self.payload),
            PayloadFormat::Dib => decode_bitmap(&self.payload, self.bit_depth),
        }
    }
}

//===========================================================================//


//===========================================================================//
