use byteorder::{ByteOrder, LittleEndian};
use icokit::{IcoError, PngCodec, Rasterizer, RgbaImage, StandardPng};

//===========================================================================//

/// A 3x3 image with a different color in every pixel.
fn source_image() -> RgbaImage {
    let mut rgba = Vec::new();
    for index in 0..9u8 {
        rgba.extend_from_slice(&[index * 28, 255 - index * 28, 7, 255]);
    }
    RgbaImage::from_rgba_data(3, 3, rgba)
}

/// The (width byte, height byte, bit count, size, offset) of every directory
/// entry in an encoded file.
fn directory(data: &[u8]) -> Vec<(u8, u8, u16, u32, u32)> {
    let count = LittleEndian::read_u16(&data[4..6]) as usize;
    (0..count)
        .map(|index| {
            let entry = &data[6 + 16 * index..][..16];
            (
                entry[0],
                entry[1],
                LittleEndian::read_u16(&entry[6..8]),
                LittleEndian::read_u32(&entry[8..12]),
                LittleEndian::read_u32(&entry[12..16]),
            )
        })
        .collect()
}

//===========================================================================//

#[test]
fn encode_single_16x16_image() {
    let source = source_image();
    let data = icokit::encode_ico(&source, &[16]).unwrap();
    let png = StandardPng.encode_png(&source.rasterize(16).unwrap()).unwrap();
    let png_len = png.len() as u32;

    assert_eq!(&data[..6], b"\x00\x00\x01\x00\x01\x00");
    let mut entry = vec![0x10, 0x10, 0x00, 0x00, 0x01, 0x00, 0x20, 0x00];
    entry.extend_from_slice(&png_len.to_le_bytes());
    entry.extend_from_slice(&22u32.to_le_bytes());
    assert_eq!(&data[6..22], entry.as_slice());
    assert_eq!(&data[22..], png.as_slice());
    assert_eq!(data.len(), 22 + png.len());
}

#[test]
fn encode_256_uses_zero_size_byte() {
    let data = icokit::encode_ico(&source_image(), &[256]).unwrap();
    let entries = directory(&data);
    assert_eq!(entries.len(), 1);
    assert_eq!((entries[0].0, entries[0].1), (0, 0));
    let document = icokit::decode_ico(&data).unwrap();
    assert_eq!(document.images()[0].width(), 256);
    assert_eq!(document.images()[0].height(), 256);
}

#[test]
fn encoded_offsets_are_contiguous() {
    let data =
        icokit::encode_ico(&source_image(), icokit::DEFAULT_SIZES).unwrap();
    let entries = directory(&data);
    assert_eq!(entries.len(), icokit::DEFAULT_SIZES.len());
    assert_eq!(entries[0].4, 6 + 16 * entries.len() as u32);
    for pair in entries.windows(2) {
        assert_eq!(pair[0].4 + pair[0].3, pair[1].4);
    }
    let last = entries[entries.len() - 1];
    assert_eq!((last.4 + last.3) as usize, data.len());
    for entry in entries.iter() {
        assert_eq!(entry.2, 32);
    }
}

#[test]
fn encoded_pixels_survive_decoding() {
    let source = source_image();
    let data = icokit::encode_ico(&source, &[3, 6]).unwrap();
    let document = icokit::decode_ico(&data).unwrap();
    assert_eq!(document.images().len(), 2);
    for image in document.images() {
        assert!(image.is_png());
        assert_eq!(image.bit_depth(), 32);
        let expected = source.rasterize(image.width()).unwrap();
        assert_eq!(image.decode_pixels().unwrap(), expected);
    }
}

#[test]
fn encode_rejects_bad_size_lists() {
    let source = source_image();
    assert!(matches!(
        icokit::encode_ico(&source, &[]),
        Err(IcoError::NoSizesRequested)
    ));
    assert!(matches!(
        icokit::encode_ico(&source, &[16, 512]),
        Err(IcoError::InvalidSize(512))
    ));
    assert!(matches!(
        icokit::encode_ico(&source, &[0]),
        Err(IcoError::InvalidSize(0))
    ));
}

#[test]
fn encode_through_trait_objects() {
    let source: &dyn Rasterizer = &source_image();
    let codec: &dyn PngCodec = &StandardPng;
    let data = icokit::encode_ico_with(source, &[8, 4], codec).unwrap();
    let entries = directory(&data);
    assert_eq!((entries[0].0, entries[1].0), (4, 8));
}

//===========================================================================//
