use crate::error::{IcoError, Result};
use byteorder::{ByteOrder, LittleEndian};

//===========================================================================//

/// Bounds-checked little-endian reader over a borrowed byte buffer.
pub(crate) struct ByteReader<'a> {
    data: &'a [u8],
    position: usize,
}

impl<'a> ByteReader<'a> {
    pub(crate) fn new(data: &'a [u8]) -> ByteReader<'a> {
        ByteReader { data, position: 0 }
    }

    /// Creates a reader that starts at `position` instead of the beginning.
    /// A position past the end is allowed; the first read will fail.
    pub(crate) fn at(data: &'a [u8], position: usize) -> ByteReader<'a> {
        ByteReader { data, position }
    }

    pub(crate) fn remaining(&self) -> usize {
        self.data.len().saturating_sub(self.position)
    }

    pub(crate) fn seek(&mut self, position: usize) {
        self.position = position;
    }

    pub(crate) fn skip(&mut self, count: usize) -> Result<()> {
        self.take(count).map(|_| ())
    }

    pub(crate) fn read_u8(&mut self) -> Result<u8> {
        Ok(self.take(1)?[0])
    }

    pub(crate) fn read_u16_le(&mut self) -> Result<u16> {
        Ok(LittleEndian::read_u16(self.take(2)?))
    }

    pub(crate) fn read_u32_le(&mut self) -> Result<u32> {
        Ok(LittleEndian::read_u32(self.take(4)?))
    }

    pub(crate) fn read_i32_le(&mut self) -> Result<i32> {
        Ok(LittleEndian::read_i32(self.take(4)?))
    }

    fn take(&mut self, count: usize) -> Result<&'a [u8]> {
        let available = self.remaining();
        if count > available {
            return Err(IcoError::Truncated {
                offset: self.position,
                needed: count,
                available,
            });
        }
        let start = self.position;
        self.position += count;
        Ok(&self.data[start..self.position])
    }
}

//===========================================================================//

/// Little-endian writer appending to a growing buffer.
pub(crate) struct ByteWriter {
    data: Vec<u8>,
}

impl ByteWriter {
    pub(crate) fn with_capacity(capacity: usize) -> ByteWriter {
        ByteWriter { data: Vec::with_capacity(capacity) }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    pub(crate) fn write_u8(&mut self, value: u8) {
        self.data.push(value);
    }

    pub(crate) fn write_u16_le(&mut self, value: u16) {
        let mut buffer = [0u8; 2];
        LittleEndian::write_u16(&mut buffer, value);
        self.data.extend_from_slice(&buffer);
    }

    pub(crate) fn write_u32_le(&mut self, value: u32) {
        let mut buffer = [0u8; 4];
        LittleEndian::write_u32(&mut buffer, value);
        self.data.extend_from_slice(&buffer);
    }

    pub(crate) fn write_bytes(&mut self, bytes: &[u8]) {
        self.data.extend_from_slice(bytes);
    }

    pub(crate) fn into_inner(self) -> Vec<u8> {
        self.data
    }
}

//===========================================================================//


//===========================================================================//
