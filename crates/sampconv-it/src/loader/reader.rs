//! Bounds-checked little-endian field reads.

use byteorder::{ByteOrder, LittleEndian};

use crate::error::{ItError, ItResult};

/// Read-only view over module bytes where every read is range checked.
#[derive(Clone, Copy)]
pub(crate) struct ByteView<'a> {
    data: &'a [u8],
}

impl<'a> ByteView<'a> {
    pub(crate) fn new(data: &'a [u8]) -> Self {
        Self { data }
    }

    pub(crate) fn len(&self) -> usize {
        self.data.len()
    }

    /// Returns `len` bytes at `offset`, or an error naming `what`.
    pub(crate) fn bytes(&self, offset: usize, len: usize, what: &str) -> ItResult<&'a [u8]> {
        offset
            .checked_add(len)
            .and_then(|end| self.data.get(offset..end))
            .ok_or_else(|| {
                ItError::at_offset(
                    format!(
                        "{} extends beyond file: needs {} bytes, file has {}",
                        what,
                        len,
                        self.data.len()
                    ),
                    offset,
                )
            })
    }

    pub(crate) fn u8(&self, offset: usize, what: &str) -> ItResult<u8> {
        Ok(self.bytes(offset, 1, what)?[0])
    }

    pub(crate) fn u16(&self, offset: usize, what: &str) -> ItResult<u16> {
        Ok(LittleEndian::read_u16(self.bytes(offset, 2, what)?))
    }

    pub(crate) fn u32(&self, offset: usize, what: &str) -> ItResult<u32> {
        Ok(LittleEndian::read_u32(self.bytes(offset, 4, what)?))
    }

    /// Reads a fixed-width, NUL-padded text field.
    pub(crate) fn string(&self, offset: usize, len: usize, what: &str) -> ItResult<String> {
        Ok(extract_string(self.bytes(offset, len, what)?))
    }
}

/// Extract a null-terminated string from a byte slice.
pub(crate) fn extract_string(data: &[u8]) -> String {
    let end = data.iter().position(|&b| b == 0).unwrap_or(data.len());
    String::from_utf8_lossy(&data[..end]).trim_end().to_string()
}
