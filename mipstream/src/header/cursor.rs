//! Bounds-checked little-endian read cursor.
//!
//! All multi-byte header fields are stored little-endian on disk. The
//! cursor reads each field explicitly, so parsing behaves identically on
//! big-endian targets and never relies on in-memory struct layout.

use super::HeaderError;

/// Read cursor over a byte slice.
pub struct ByteReader<'a> {
    buf: &'a [u8],
    pos: usize,
}

impl<'a> ByteReader<'a> {
    /// Create a cursor positioned at the start of `buf`.
    pub fn new(buf: &'a [u8]) -> Self {
        Self { buf, pos: 0 }
    }

    /// Current offset from the start of the buffer.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes left to read.
    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8], HeaderError> {
        if self.remaining() < len {
            return Err(HeaderError::Truncated {
                needed: self.pos + len,
                available: self.buf.len(),
            });
        }
        let slice = &self.buf[self.pos..self.pos + len];
        self.pos += len;
        Ok(slice)
    }

    /// Read a single byte.
    pub fn read_u8(&mut self) -> Result<u8, HeaderError> {
        Ok(self.take(1)?[0])
    }

    /// Read a little-endian u32.
    pub fn read_u32(&mut self) -> Result<u32, HeaderError> {
        let bytes = self.take(4)?;
        Ok(u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]]))
    }

    /// Read a little-endian f32.
    pub fn read_f32(&mut self) -> Result<f32, HeaderError> {
        Ok(f32::from_bits(self.read_u32()?))
    }

    /// Read a fixed-size byte array (tags, reserved blocks).
    pub fn read_bytes<const N: usize>(&mut self) -> Result<[u8; N], HeaderError> {
        let slice = self.take(N)?;
        let mut out = [0u8; N];
        out.copy_from_slice(slice);
        Ok(out)
    }
}
