use crate::bmpdepth::BmpDepth;
use crate::cursor::ByteReader;
use crate::dib::{palette_entries, BMP_FILE_HEADER_LEN};
use crate::error::Result;
use crate::icondir::MAX_DIMENSION;
use crate::raster::RgbaImage;

//===========================================================================//

// The size of a BITMAPINFOHEADER struct, in bytes.
const BMP_INFO_HEADER_LEN: u32 = 40;

// Offset of the pixel data offset field within a BITMAPFILEHEADER.
const PIXEL_OFFSET_FIELD: usize = 10;

// The only compression method an icon bitmap may use.
const BI_RGB: u32 = 0;

//===========================================================================//

/// Decodes the pixels of an icon bitmap, given as a complete BMP file (that
/// is, a DIB payload with a synthesized file header in front).
///
/// Icon bitmaps store their height doubled, covering both the color rows
/// and the 1-bit AND mask that follows them.  Masked pixels become fully
/// transparent; 32 bpp bitmaps use their own alpha channel instead.
pub(crate) fn decode_bitmap(
    data: &[u8],
    fallback_bit_count: u16,
) -> Result<RgbaImage> {
    let mut reader = ByteReader::at(data, PIXEL_OFFSET_FIELD);
    let pixel_offset = reader.read_u32_le()? as usize;

    // Read the BITMAPINFOHEADER struct:
    let header_size = reader.read_u32_le()?;
    if header_size < BMP_INFO_HEADER_LEN {
        image_error!(
            "Unsupported BMP header size (was {}, must be at least {})",
            header_size,
            BMP_INFO_HEADER_LEN
        );
    }
    let (width, height) = read_bmp_size(&mut reader)?;
    let _planes = reader.read_u16_le()?;
    let bits_per_pixel = match reader.read_u16_le()? {
        0 => fallback_bit_count,
        bits => bits,
    };
    let compression = reader.read_u32_le()?;
    if compression != BI_RGB {
        image_error!("Unsupported BMP compression ({})", compression);
    }
    let _image_size = reader.read_u32_le()?;
    let _horz_ppm = reader.read_i32_le()?;
    let _vert_ppm = reader.read_i32_le()?;
    let colors_used = reader.read_u32_le()?;
    let _colors_important = reader.read_u32_le()?;

    let depth = match BmpDepth::from_bits_per_pixel(bits_per_pixel) {
        Some(depth) => depth,
        None => {
            image_error!(
                "Unsupported BMP bits-per-pixel ({})",
                bits_per_pixel
            );
        }
    };

    // Read in the color table, which follows the (possibly extended) info
    // header:
    let mut color_table = Vec::<(u8, u8, u8)>::new();
    if depth.is_indexed() {
        let num_colors = palette_entries(bits_per_pixel, colors_used);
        if num_colors > (1u64 << bits_per_pixel) {
            image_error!(
                "Too many BMP palette entries ({} for {} bpp)",
                num_colors,
                bits_per_pixel
            );
        }
        reader.seek(BMP_FILE_HEADER_LEN + header_size as usize);
        for _ in 0..num_colors {
            let blue = reader.read_u8()?;
            let green = reader.read_u8()?;
            let red = reader.read_u8()?;
            let _reserved = reader.read_u8()?;
            color_table.push((red, green, blue));
        }
    }

    // Read in the color data, which is stored row by row, starting from
    // the *bottom* row:
    reader.seek(pixel_offset);
    let mut rgba = vec![u8::MAX; (width * height) as usize * 4];
    let (row_data_size, row_padding_size) = depth.row_layout(width);
    for row in 0..height {
        let mut start = (4 * (height - row - 1) * width) as usize;
        match depth {
            BmpDepth::One | BmpDepth::Four => {
                let bits = depth.bits_per_pixel() as u32;
                let per_byte = 8 / bits;
                let index_mask = (1u8 << bits) - 1;
                let mut col = 0;
                for _ in 0..row_data_size {
                    let byte = reader.read_u8()?;
                    for slot in 0..per_byte {
                        let shift = bits * (per_byte - 1 - slot);
                        let index = (byte >> shift) & index_mask;
                        let (red, green, blue) =
                            palette_color(&color_table, index)?;
                        rgba[start] = red;
                        rgba[start + 1] = green;
                        rgba[start + 2] = blue;
                        col += 1;
                        if col == width {
                            break;
                        }
                        start += 4;
                    }
                }
            }
            BmpDepth::Eight => {
                for _ in 0..width {
                    let index = reader.read_u8()?;
                    let (red, green, blue) =
                        palette_color(&color_table, index)?;
                    rgba[start] = red;
                    rgba[start + 1] = green;
                    rgba[start + 2] = blue;
                    start += 4;
                }
            }
            BmpDepth::Sixteen => {
                for _ in 0..width {
                    let color = reader.read_u16_le()?;
                    let red = (color >> 10) & 0x1f;
                    let green = (color >> 5) & 0x1f;
                    let blue = color & 0x1f;
                    rgba[start] = ((red * 255 + 15) / 31) as u8;
                    rgba[start + 1] = ((green * 255 + 15) / 31) as u8;
                    rgba[start + 2] = ((blue * 255 + 15) / 31) as u8;
                    start += 4;
                }
            }
            BmpDepth::TwentyFour => {
                for _ in 0..width {
                    let blue = reader.read_u8()?;
                    let green = reader.read_u8()?;
                    let red = reader.read_u8()?;
                    rgba[start] = red;
                    rgba[start + 1] = green;
                    rgba[start + 2] = blue;
                    start += 4;
                }
            }
            BmpDepth::ThirtyTwo => {
                for _ in 0..width {
                    let blue = reader.read_u8()?;
                    let green = reader.read_u8()?;
                    let red = reader.read_u8()?;
                    let alpha = reader.read_u8()?;
                    rgba[start] = red;
                    rgba[start + 1] = green;
                    rgba[start + 2] = blue;
                    rgba[start + 3] = alpha;
                    start += 4;
                }
            }
        }
        reader.skip(row_padding_size)?;
    }

    // Read in the alpha mask (1 bit per pixel), which again is stored row
    // by row, starting from the *bottom* row, with each row padded to a
    // multiple of four bytes:
    if !depth.has_alpha_channel() {
        let (row_mask_size, row_padding_size) =
            BmpDepth::One.row_layout(width);
        for row in 0..height {
            let mut start = (4 * (height - row - 1) * width) as usize;
            let mut col = 0;
            for _ in 0..row_mask_size {
                let byte = reader.read_u8()?;
                for bit in 0..8 {
                    if ((byte >> (7 - bit)) & 0x1) == 1 {
                        rgba[start + 3] = 0;
                    }
                    col += 1;
                    if col == width {
                        break;
                    }
                    start += 4;
                }
            }
            reader.skip(row_padding_size)?;
        }
    }

    Ok(RgbaImage::from_rgba_data(width, height, rgba))
}

fn read_bmp_size(reader: &mut ByteReader) -> Result<(u32, u32)> {
    let width = reader.read_i32_le()?;
    if width < 1 || width > MAX_DIMENSION as i32 {
        image_error!(
            "Invalid BMP width (was {}, but must be between 1 and {})",
            width,
            MAX_DIMENSION
        );
    }
    let height = reader.read_i32_le()?;
    if height % 2 != 0 {
        // The height is stored doubled, counting the rows of both the
        // color data and the alpha mask, so it should be divisible by 2.
        image_error!(
            "Invalid height field in BMP header \
             (was {}, but must be divisible by 2)",
            height
        );
    }
    let height = height / 2;
    if height < 1 || height > MAX_DIMENSION as i32 {
        image_error!(
            "Invalid BMP height (was {}, but must be between 1 and {})",
            height,
            MAX_DIMENSION
        );
    }
    Ok((width as u32, height as u32))
}

fn palette_color(
    color_table: &[(u8, u8, u8)],
    index: u8,
) -> Result<(u8, u8, u8)> {
    match color_table.get(index as usize) {
        Some(&color) => Ok(color),
        None => image_error!(
            "BMP palette index out of range ({} of {})",
            index,
            color_table.len()
        ),
    }
}

//===========================================================================//


//===========================================================================//
