//! Turns the headerless DIB payloads found inside ICO files into standalone
//! BMP files.
//!
//! A DIB stored in an ICO file starts directly with its BITMAPINFOHEADER; the
//! 14-byte BITMAPFILEHEADER that a BMP file needs (and that tells a decoder
//! where the pixel array begins) is left out.  To hand such a payload to an
//! ordinary bitmap decoder, we work out where the pixel array starts and put
//! a file header in front of it.

use crate::cursor::{ByteReader, ByteWriter};
use crate::error::{IcoError, Result};

//===========================================================================//

/// The size of a BITMAPFILEHEADER struct, in bytes.
pub(crate) const BMP_FILE_HEADER_LEN: usize = 14;

// Field offsets within a BITMAPINFOHEADER:
const BIT_COUNT_OFFSET: usize = 14;
const COLORS_USED_OFFSET: usize = 32;

// Each color table entry is a BGR0 quad.
const PALETTE_ENTRY_LEN: u64 = 4;

//===========================================================================//

/// A DIB payload with a synthesized file header in front of it.
#[derive(Clone, Debug)]
pub(crate) struct ReconstructedBitmap {
    /// The bits-per-pixel used to size the color table.
    pub(crate) bit_depth: u16,
    /// The full BMP file: file header followed by the original payload.
    pub(crate) data: Vec<u8>,
}

/// Returns the number of color table entries a DIB carries.  A zero
/// `colors_used` means "as many as the bit depth can index" for paletted
/// images, and "no color table" otherwise.
pub(crate) fn palette_entries(bit_count: u16, colors_used: u32) -> u64 {
    if colors_used == 0 && bit_count <= 8 {
        1u64 << bit_count
    } else {
        colors_used as u64
    }
}

/// Prepends a BITMAPFILEHEADER to a raw DIB payload.  The `bit_count` from
/// the ICO directory entry is only used when the DIB's own header says zero.
pub(crate) fn reconstruct(
    payload: &[u8],
    directory_bit_count: u16,
) -> Result<ReconstructedBitmap> {
    let mut reader = ByteReader::new(payload);
    let header_size = reader.read_u32_le()?;
    reader.seek(BIT_COUNT_OFFSET);
    let header_bit_count = reader.read_u16_le()?;
    reader.seek(COLORS_USED_OFFSET);
    let colors_used = reader.read_u32_le()?;

    let bit_depth = if header_bit_count != 0 {
        header_bit_count
    } else {
        directory_bit_count
    };
    let palette_len =
        palette_entries(bit_depth, colors_used) * PALETTE_ENTRY_LEN;

    // Everything before the pixel array has to fit in the payload, or the
    // offset we'd write would point past the end of the file.
    let pixel_array_start = header_size as u64 + palette_len;
    if pixel_array_start > payload.len() as u64 {
        let palette_start = header_size as usize;
        return Err(IcoError::Truncated {
            offset: palette_start,
            needed: usize::try_from(palette_len).unwrap_or(usize::MAX),
            available: payload.len().saturating_sub(palette_start),
        });
    }
    let pixel_data_offset = BMP_FILE_HEADER_LEN as u64 + pixel_array_start;
    let file_size = BMP_FILE_HEADER_LEN as u64 + payload.len() as u64;
    let file_size = match u32::try_from(file_size) {
        Ok(size) => size,
        Err(_) => format_error!("DIB payload too large ({} bytes)", file_size),
    };

    let mut writer = ByteWriter::with_capacity(file_size as usize);
    writer.write_bytes(b"BM");
    writer.write_u32_le(file_size);
    writer.write_u16_le(0); // reserved
    writer.write_u16_le(0); // reserved
    writer.write_u32_le(pixel_data_offset as u32);
    debug_assert_eq!(writer.len(), BMP_FILE_HEADER_LEN);
    writer.write_bytes(payload);
    Ok(ReconstructedBitmap { bit_depth, data: writer.into_inner() })
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{palette_entries, reconstruct, BMP_FILE_HEADER_LEN};
    use crate::error::IcoError;

    // A 2x2, 1 bpp icon bitmap: header, 2-entry palette, color rows, mask.
    const DIB_1BPP: &[u8] = b"\
        \x28\x00\x00\x00\x02\x00\x00\x00\x04\x00\x00\x00\
        \x01\x00\x01\x00\x00\x00\x00\x00\x00\x00\x00\x00\
        \x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\x00\
        \x00\x00\x00\x00\
        \
        \x55\x00\x55\x00\xff\xff\xff\x00\
        \
        \xc0\x00\x00\x00\
        \x40\x00\x00\x00\
        \
        \x40\x00\x00\x00\
        \x00\x00\x00\x00";

    fn header_of(data: &[u8]) -> &[u8] {
        &data[..BMP_FILE_HEADER_LEN]
    }

    #[test]
    fn default_palette_sizes() {
        assert_eq!(palette_entries(1, 0), 2);
        assert_eq!(palette_entries(4, 0), 16);
        assert_eq!(palette_entries(8, 0), 256);
        assert_eq!(palette_entries(8, 20), 20);
        assert_eq!(palette_entries(24, 0), 0);
        assert_eq!(palette_entries(32, 3), 3);
    }

    #[test]
    fn reconstruct_1bpp_dib() {
        let bitmap = reconstruct(DIB_1BPP, 0).unwrap();
        assert_eq!(bitmap.bit_depth, 1);
        // File size is 14 + 64 = 78, pixels start at 14 + 40 + 2 * 4 = 62.
        let expected: &[u8] = b"BM\x4e\x00\x00\x00\x00\x00\x00\x00\
                                \x3e\x00\x00\x00";
        assert_eq!(header_of(&bitmap.data), expected);
        assert_eq!(&bitmap.data[BMP_FILE_HEADER_LEN..], DIB_1BPP);
    }

    #[test]
    fn header_bit_count_wins_over_directory() {
        let bitmap = reconstruct(DIB_1BPP, 32).unwrap();
        assert_eq!(bitmap.bit_depth, 1);
    }

    #[test]
    fn directory_bit_count_used_when_header_says_zero() {
        // Same header, but biBitCount = 0 and room for a 16-entry palette.
        let mut payload = DIB_1BPP[..40].to_vec();
        payload[14] = 0;
        payload.resize(40 + 64 + 8, 0);
        let bitmap = reconstruct(&payload, 4).unwrap();
        assert_eq!(bitmap.bit_depth, 4);
        assert_eq!(&bitmap.data[10..14], b"\x76\x00\x00\x00"); // 14+40+64
    }

    #[test]
    fn explicit_colors_used() {
        // 8 bpp with biClrUsed = 3.
        let mut payload = vec![0u8; 40 + 12 + 4];
        payload[0] = 40;
        payload[14] = 8;
        payload[32] = 3;
        let bitmap = reconstruct(&payload, 8).unwrap();
        assert_eq!(&bitmap.data[2..6], b"\x46\x00\x00\x00"); // 14+56
        assert_eq!(&bitmap.data[10..14], b"\x42\x00\x00\x00"); // 14+40+12
    }

    #[test]
    fn v5_header_moves_pixel_array() {
        // A 124-byte BITMAPV5HEADER at 4 bpp with the default 16-entry
        // palette.
        let mut payload = vec![0u8; 124 + 16 * 4 + 8];
        payload[0] = 124;
        payload[14] = 4;
        let bitmap = reconstruct(&payload, 4).unwrap();
        assert_eq!(bitmap.bit_depth, 4);
        assert_eq!(&bitmap.data[10..14], b"\xca\x00\x00\x00"); // 14+124+64
        match reconstruct(&payload[..124 + 63], 4) {
            Err(IcoError::Truncated { offset, needed, available }) => {
                assert_eq!((offset, needed, available), (124, 64, 63));
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn truecolor_has_no_palette() {
        let mut payload = vec![0u8; 40 + 16];
        payload[0] = 40;
        payload[14] = 32;
        let bitmap = reconstruct(&payload, 32).unwrap();
        assert_eq!(&bitmap.data[10..14], b"\x36\x00\x00\x00"); // 14+40
    }

    #[test]
    fn short_dib_header_is_truncated() {
        let result = reconstruct(&DIB_1BPP[..20], 1);
        assert!(result.unwrap_err().is_truncated());
    }

    #[test]
    fn palette_past_end_is_truncated() {
        // Claims 8 bpp with a default 256-entry palette, but is only 64
        // bytes long.
        let mut payload = DIB_1BPP.to_vec();
        payload[14] = 8;
        match reconstruct(&payload, 8) {
            Err(IcoError::Truncated { offset, needed, available }) => {
                assert_eq!(offset, 40);
                assert_eq!(needed, 1024);
                assert_eq!(available, 24);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }
}

//===========================================================================//
