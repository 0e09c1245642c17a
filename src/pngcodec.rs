use crate::error::Result;
use crate::raster::RgbaImage;

//===========================================================================//

/// Converts between RGBA rasters and PNG files.
pub trait PngCodec {
    /// Encodes the image as a PNG file.
    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>>;

    /// Decodes a PNG file into RGBA pixels.
    fn decode_png(&self, data: &[u8]) -> Result<RgbaImage>;
}

/// The default [`PngCodec`], built on the `png` crate.  Always writes 8-bit
/// RGBA; reads any PNG and normalizes it to 8-bit RGBA.
#[derive(Clone, Copy, Debug, Default)]
pub struct StandardPng;

impl PngCodec for StandardPng {
    fn encode_png(&self, image: &RgbaImage) -> Result<Vec<u8>> {
        let mut data = Vec::new();
        let mut encoder =
            png::Encoder::new(&mut data, image.width(), image.height());
        encoder.set_color(png::ColorType::Rgba);
        encoder.set_depth(png::BitDepth::Eight);
        let mut writer = encoder.write_header()?;
        writer.write_image_data(image.rgba_data())?;
        writer.finish()?;
        Ok(data)
    }

    fn decode_png(&self, data: &[u8]) -> Result<RgbaImage> {
        let mut decoder = png::Decoder::new(data);
        // Expand palettes and sub-byte samples, and drop 16-bit precision,
        // so that every frame comes out as 8-bit gray, gray+alpha, RGB or
        // RGBA.
        decoder.set_transformations(
            png::Transformations::EXPAND | png::Transformations::STRIP_16,
        );
        let mut png_reader = decoder.read_info()?;
        let mut buffer = vec![0u8; png_reader.output_buffer_size()];
        let frame = png_reader.next_frame(&mut buffer)?;
        buffer.truncate(frame.buffer_size());
        if frame.bit_depth != png::BitDepth::Eight {
            image_error!("Unsupported PNG bit depth: {:?}", frame.bit_depth);
        }
        let rgba_data = match frame.color_type {
            png::ColorType::Rgba => buffer,
            png::ColorType::Rgb => {
                let num_pixels = buffer.len() / 3;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    rgba.extend_from_slice(&buffer[(3 * i)..][..3]);
                    rgba.push(u8::MAX);
                }
                rgba
            }
            png::ColorType::GrayscaleAlpha => {
                let num_pixels = buffer.len() / 2;
                let mut rgba = Vec::with_capacity(num_pixels * 4);
                for i in 0..num_pixels {
                    let gray = buffer[2 * i];
                    let alpha = buffer[2 * i + 1];
                    rgba.extend_from_slice(&[gray, gray, gray, alpha]);
                }
                rgba
            }
            png::ColorType::Grayscale => {
                let mut rgba = Vec::with_capacity(buffer.len() * 4);
                for gray in buffer.into_iter() {
                    rgba.extend_from_slice(&[gray, gray, gray, u8::MAX]);
                }
                rgba
            }
            png::ColorType::Indexed => {
                image_error!("PNG palette was not expanded");
            }
        };
        if frame.width == 0 || frame.height == 0 {
            image_error!("Empty PNG image ({}x{})", frame.width, frame.height);
        }
        Ok(RgbaImage::from_rgba_data(frame.width, frame.height, rgba_data))
    }
}

/// Reads the bits-per-pixel of a PNG file from its IHDR chunk.
pub(crate) fn png_bits_per_pixel(data: &[u8]) -> Result<u16> {
    let png_reader = png::Decoder::new(data).read_info()?;
    let info = png_reader.info();
    Ok(info.bit_depth as u16 * info.color_type.samples() as u16)
}

//===========================================================================//


//===========================================================================//
