use crate::cursor::{ByteReader, ByteWriter};
use crate::error::Result;

//===========================================================================//

/// The size of the ICONDIR header, in bytes.
pub(crate) const ICONDIR_LEN: usize = 6;

/// The size of one ICONDIRENTRY record, in bytes.
pub(crate) const ICONDIRENTRY_LEN: usize = 16;

// Values of the ICONDIR resource type field.
const RESOURCE_TYPE_ICON: u16 = 1;
const RESOURCE_TYPE_CURSOR: u16 = 2;

/// The largest width or height an ICO directory entry can describe.
pub(crate) const MAX_DIMENSION: u32 = 256;

//===========================================================================//

/// One ICONDIRENTRY record, as stored on disk.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) struct DirectoryEntry {
    /// Logical width, 1 to 256.
    pub(crate) width: u32,
    /// Logical height, 1 to 256.
    pub(crate) height: u32,
    pub(crate) color_count: u8,
    pub(crate) color_planes: u16,
    pub(crate) bit_count: u16,
    pub(crate) size: u32,
    pub(crate) offset: u32,
}

impl DirectoryEntry {
    /// Returns the byte range of this entry's payload, or `None` if it
    /// doesn't fit inside a buffer of `buffer_len` bytes.
    pub(crate) fn payload_range(
        &self,
        buffer_len: usize,
    ) -> Option<std::ops::Range<usize>> {
        let start = self.offset as usize;
        let end = start.checked_add(self.size as usize)?;
        if end > buffer_len {
            None
        } else {
            Some(start..end)
        }
    }
}

//===========================================================================//

/// Reads the ICONDIR header and returns the number of directory entries.
/// Any problem here is fatal for the whole file.
pub(crate) fn read_header(data: &[u8]) -> Result<u16> {
    let mut reader = ByteReader::new(data);
    let reserved = reader.read_u16_le()?;
    if reserved != 0 {
        format_error!(
            "Invalid reserved field value in ICONDIR \
             (was {}, but must be 0)",
            reserved
        );
    }
    let restype = reader.read_u16_le()?;
    match restype {
        RESOURCE_TYPE_ICON => {}
        RESOURCE_TYPE_CURSOR => {
            format_error!("Cursor resources (type 2) are not supported");
        }
        _ => format_error!("Invalid resource type ({})", restype),
    }
    reader.read_u16_le()
}

/// Reads the `index`th ICONDIRENTRY record.
pub(crate) fn read_entry(data: &[u8], index: usize) -> Result<DirectoryEntry> {
    let mut reader =
        ByteReader::at(data, ICONDIR_LEN + index * ICONDIRENTRY_LEN);
    let width_byte = reader.read_u8()?;
    let height_byte = reader.read_u8()?;
    let color_count = reader.read_u8()?;
    let _reserved = reader.read_u8()?;
    let color_planes = reader.read_u16_le()?;
    let bit_count = reader.read_u16_le()?;
    let size = reader.read_u32_le()?;
    let offset = reader.read_u32_le()?;
    Ok(DirectoryEntry {
        width: dimension_from_byte(width_byte),
        height: dimension_from_byte(height_byte),
        color_count,
        color_planes,
        bit_count,
        size,
        offset,
    })
}

pub(crate) fn write_header(writer: &mut ByteWriter, count: u16) {
    writer.write_u16_le(0); // reserved
    writer.write_u16_le(RESOURCE_TYPE_ICON);
    writer.write_u16_le(count);
}

pub(crate) fn write_entry(writer: &mut ByteWriter, entry: &DirectoryEntry) {
    writer.write_u8(dimension_to_byte(entry.width));
    writer.write_u8(dimension_to_byte(entry.height));
    writer.write_u8(entry.color_count);
    writer.write_u8(0); // reserved
    writer.write_u16_le(entry.color_planes);
    writer.write_u16_le(entry.bit_count);
    writer.write_u32_le(entry.size);
    writer.write_u32_le(entry.offset);
}

// A width/height byte of zero means 256.
fn dimension_from_byte(byte: u8) -> u32 {
    if byte == 0 {
        MAX_DIMENSION
    } else {
        byte as u32
    }
}

fn dimension_to_byte(dimension: u32) -> u8 {
    if dimension >= MAX_DIMENSION {
        0
    } else {
        dimension as u8
    }
}

//===========================================================================//

#[cfg(test)]
mod tests {
    use super::{
        read_entry, read_header, write_entry, write_header, DirectoryEntry,
    };
    use crate::cursor::ByteWriter;
    use crate::error::IcoError;

    #[test]
    fn read_icon_header() {
        let input = b"\x00\x00\x01\x00\x03\x00";
        assert_eq!(read_header(input).unwrap(), 3);
    }

    #[test]
    fn read_header_with_bad_reserved_field() {
        let input = b"\x01\x00\x01\x00\x01\x00";
        match read_header(input) {
            Err(IcoError::Format(message)) => {
                assert!(message.contains("reserved"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn read_cursor_header_is_rejected() {
        let input = b"\x00\x00\x02\x00\x01\x00";
        match read_header(input) {
            Err(IcoError::Format(message)) => {
                assert!(message.contains("Cursor"), "{}", message);
            }
            other => panic!("unexpected result: {:?}", other),
        }
    }

    #[test]
    fn read_header_with_unknown_type() {
        let input = b"\x00\x00\x07\x00\x01\x00";
        assert!(matches!(read_header(input), Err(IcoError::Format(_))));
    }

    #[test]
    fn read_short_header_is_truncated() {
        let input = b"\x00\x00\x01\x00\x01";
        assert!(read_header(input).unwrap_err().is_truncated());
    }

    #[test]
    fn read_entry_with_zero_dimensions() {
        let input: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \x00\x00\x00\x00\x01\x00\x20\x00\
            \x10\x00\x00\x00\x16\x00\x00\x00";
        let entry = read_entry(input, 0).unwrap();
        assert_eq!(entry.width, 256);
        assert_eq!(entry.height, 256);
        assert_eq!(entry.color_planes, 1);
        assert_eq!(entry.bit_count, 32);
        assert_eq!(entry.size, 16);
        assert_eq!(entry.offset, 22);
    }

    #[test]
    fn read_partial_entry_is_truncated() {
        let input: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \x10\x10\x00\x00\x01\x00\x20\x00";
        assert!(read_entry(input, 0).unwrap_err().is_truncated());
    }

    #[test]
    fn payload_range_checks_bounds() {
        let entry = DirectoryEntry {
            width: 16,
            height: 16,
            color_count: 0,
            color_planes: 1,
            bit_count: 32,
            size: 10,
            offset: 22,
        };
        assert_eq!(entry.payload_range(32), Some(22..32));
        assert_eq!(entry.payload_range(31), None);
        let huge =
            DirectoryEntry { size: u32::MAX, offset: u32::MAX, ..entry };
        assert_eq!(huge.payload_range(4096), None);
    }

    #[test]
    fn write_header_and_entry() {
        let mut writer = ByteWriter::with_capacity(22);
        write_header(&mut writer, 1);
        write_entry(
            &mut writer,
            &DirectoryEntry {
                width: 256,
                height: 48,
                color_count: 0,
                color_planes: 1,
                bit_count: 32,
                size: 0x1234,
                offset: 22,
            },
        );
        let expected: &[u8] = b"\
            \x00\x00\x01\x00\x01\x00\
            \x00\x30\x00\x00\x01\x00\x20\x00\
            \x34\x12\x00\x00\x16\x00\x00\x00";
        assert_eq!(writer.into_inner().as_slice(), expected);
    }
}

//===========================================================================//
