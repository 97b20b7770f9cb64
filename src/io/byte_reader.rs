use bytes::Bytes;

use crate::format::tiff::ByteOrder;

/// Random-access, bounds-checked reads over an immutable byte buffer.
///
/// Wider and signed values are read with [`ByteOrder`] from a slice taken
/// with [`ByteReader::slice_at`], so the bounds check covers the whole value.
///
/// The reader has no cursor: every read names its absolute offset. Reads
/// that would run past the end of the buffer return `None` instead of
/// panicking, so malformed offsets from the file degrade into skipped
/// values rather than aborting the decode.
///
/// Cloning is cheap; the underlying [`Bytes`] is reference-counted.
#[derive(Debug, Clone)]
pub struct ByteReader {
    data: Bytes,
}

impl ByteReader {
    /// Wrap a buffer for reading.
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self { data: data.into() }
    }

    /// Total size of the buffer in bytes.
    #[inline]
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// Whether the buffer is empty.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// The full underlying buffer.
    #[inline]
    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    /// Number of bytes available from `offset` to the end of the buffer.
    #[inline]
    pub fn remaining(&self, offset: usize) -> usize {
        self.data.len().saturating_sub(offset)
    }

    /// Borrow `len` bytes starting at `offset`.
    ///
    /// Returns `None` if the range does not fit in the buffer.
    pub fn slice_at(&self, offset: usize, len: usize) -> Option<&[u8]> {
        let end = offset.checked_add(len)?;
        self.data.get(offset..end)
    }

    /// Read a single byte.
    #[inline]
    pub fn read_u8(&self, offset: usize) -> Option<u8> {
        self.data.get(offset).copied()
    }

    /// Read a u16 in the given byte order.
    #[inline]
    pub fn read_u16(&self, offset: usize, order: ByteOrder) -> Option<u16> {
        self.slice_at(offset, 2).map(|b| order.read_u16(b))
    }

    /// Read a big-endian u16 (JPEG segment lengths are always big-endian).
    #[inline]
    pub fn read_u16_be(&self, offset: usize) -> Option<u16> {
        self.read_u16(offset, ByteOrder::BigEndian)
    }
}

// =============================================================================
// Endian Helper Functions
// =============================================================================
//
// Used by `ByteOrder` once the caller has already sliced the right number of
// bytes out of the buffer.

/// Read a little-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_le(bytes: &[u8]) -> u16 {
    u16::from_le_bytes([bytes[0], bytes[1]])
}

/// Read a big-endian u16 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 2 bytes.
#[inline]
pub fn read_u16_be(bytes: &[u8]) -> u16 {
    u16::from_be_bytes([bytes[0], bytes[1]])
}

/// Read a little-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_le(bytes: &[u8]) -> u32 {
    u32::from_le_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}

/// Read a big-endian u32 from a byte slice.
///
/// # Panics
/// Panics if the slice has fewer than 4 bytes.
#[inline]
pub fn read_u32_be(bytes: &[u8]) -> u32 {
    u32::from_be_bytes([bytes[0], bytes[1], bytes[2], bytes[3]])
}
