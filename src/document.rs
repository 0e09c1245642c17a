use crate::cursor::ByteWriter;
use crate::entry::EntryPlacer;
use crate::error::{IcoError, Result};
use crate::icondir::{self, MAX_DIMENSION};
use crate::image::IconImage;
use crate::pngcodec::{PngCodec, StandardPng};
use crate::raster::Rasterizer;
use std::collections::BTreeSet;
use std::fmt;
use std::io::Write;

//===========================================================================//

/// The sizes Windows commonly asks for, smallest first.
pub const DEFAULT_SIZES: &[u32] = &[16, 24, 32, 48, 64, 128, 256];

//===========================================================================//

/// A directory entry that was dropped while decoding, and why.
#[derive(Debug)]
pub struct DecodeWarning {
    entry_index: usize,
    reason: IcoError,
}

impl DecodeWarning {
    /// Returns the position of the dropped entry in the ICO directory.
    pub fn entry_index(&self) -> usize {
        self.entry_index
    }

    /// Returns the error that caused the entry to be dropped.
    pub fn reason(&self) -> &IcoError {
        &self.reason
    }
}

impl fmt::Display for DecodeWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Skipped ICO entry {}: {}", self.entry_index, self.reason)
    }
}

//===========================================================================//

/// The images of a single ICO file, in directory order.
#[derive(Debug)]
pub struct IconDocument {
    images: Vec<IconImage>,
    warnings: Vec<DecodeWarning>,
}

impl IconDocument {
    /// Decodes an ICO file.
    ///
    /// A bad header is fatal.  A directory entry that is cut off, that
    /// points past the end of `data`, or whose bitmap header is cut off is
    /// dropped and recorded as a warning instead, so that the rest of the
    /// file can still be used.  Fails with [`IcoError::EmptyResult`] if no
    /// entries are left.
    pub fn decode(data: &[u8]) -> Result<IconDocument> {
        let count = icondir::read_header(data)? as usize;
        let mut images = Vec::with_capacity(count);
        let mut warnings = Vec::new();
        for index in 0..count {
            match decode_entry(data, index) {
                Ok(image) => images.push(image),
                Err(reason) => {
                    tracing::warn!(
                        entry = index,
                        %reason,
                        "skipping ICO directory entry"
                    );
                    warnings
                        .push(DecodeWarning { entry_index: index, reason });
                }
            }
        }
        if images.is_empty() {
            return Err(IcoError::EmptyResult);
        }
        tracing::debug!(
            images = images.len(),
            skipped = warnings.len(),
            "decoded ICO file"
        );
        Ok(IconDocument { images, warnings })
    }

    /// Returns the images in this document, in directory order.
    pub fn images(&self) -> &[IconImage] {
        &self.images
    }

    /// Returns the entries that were dropped while decoding.
    pub fn warnings(&self) -> &[DecodeWarning] {
        &self.warnings
    }

    /// Consumes the document, returning its images.
    pub fn into_images(self) -> Vec<IconImage> {
        self.images
    }

    /// Serializes the images back into an ICO file.  Each image keeps the
    /// payload bytes and directory fields it was decoded with; only the
    /// payload offsets are recomputed.
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        write_images(&self.images)
    }

    /// Writes the images out as an ICO file.
    pub fn write<W: Write>(&self, mut writer: W) -> Result<()> {
        writer.write_all(&self.to_bytes()?)?;
        Ok(())
    }
}

fn decode_entry(data: &[u8], index: usize) -> Result<IconImage> {
    let entry = icondir::read_entry(data, index)?;
    let range = match entry.payload_range(data.len()) {
        Some(range) => range,
        None => {
            let offset = entry.offset as usize;
            return Err(IcoError::Truncated {
                offset,
                needed: entry.size as usize,
                available: data.len().saturating_sub(offset),
            });
        }
    };
    IconImage::from_entry(&entry, &data[range])
}

/// Lays out the header, one directory entry per image, and then every
/// image's embedded bytes in the same order.
fn write_images(images: &[IconImage]) -> Result<Vec<u8>> {
    let mut placer = EntryPlacer::new(images.len())?;
    let entries = images
        .iter()
        .map(|image| image.place(&mut placer))
        .collect::<Result<Vec<_>>>()?;
    let total_len = placer.current_offset() as usize;
    let mut writer = ByteWriter::with_capacity(total_len);
    icondir::write_header(&mut writer, images.len() as u16);
    for entry in entries.iter() {
        icondir::write_entry(&mut writer, entry);
    }
    for image in images.iter() {
        writer.write_bytes(image.embedded_data());
    }
    debug_assert_eq!(writer.len(), total_len);
    Ok(writer.into_inner())
}

//===========================================================================//

/// Decodes an ICO file.  See [`IconDocument::decode`].
pub fn decode_ico(data: &[u8]) -> Result<IconDocument> {
    IconDocument::decode(data)
}

/// Renders `source` at each of `sizes` and packs the results, as 32-bit
/// PNGs, into an ICO file.
///
/// Duplicate sizes are dropped and the images are stored smallest first.
/// Every size must be between 1 and 256.
pub fn encode_ico<R: Rasterizer + ?Sized>(
    source: &R,
    sizes: &[u32],
) -> Result<Vec<u8>> {
    encode_ico_with(source, sizes, &StandardPng)
}

/// Like [`encode_ico`], but uses `codec` to produce the PNG payloads.
pub fn encode_ico_with<R: Rasterizer + ?Sized>(
    source: &R,
    sizes: &[u32],
    codec: &dyn PngCodec,
) -> Result<Vec<u8>> {
    if sizes.is_empty() {
        return Err(IcoError::NoSizesRequested);
    }
    if let Some(&size) =
        sizes.iter().find(|&&size| size == 0 || size > MAX_DIMENSION)
    {
        return Err(IcoError::InvalidSize(size));
    }
    let sizes: BTreeSet<u32> = sizes.iter().cloned().collect();
    let mut images = Vec::with_capacity(sizes.len());
    for size in sizes {
        let raster = source.rasterize(size)?;
        if raster.width() != size || raster.height() != size {
            return Err(IcoError::Rasterizer(format!(
                "Expected a {}x{} image, but got {}x{}",
                size,
                size,
                raster.width(),
                raster.height()
            )));
        }
        let png_data = codec.encode_png(&raster)?;
        tracing::trace!(size, bytes = png_data.len(), "encoded icon image");
        images.push(IconImage::encoded(size, png_data));
    }
    let data = write_images(&images)?;
    tracing::debug!(
        images = images.len(),
        bytes = data.len(),
        "encoded ICO file"
    );
    Ok(data)
}

//===========================================================================//


//===========================================================================//
