//! TIFF header and directory entry parsing.
//!
//! Exif data inside a JPEG is a small classic TIFF file. Its header anchors
//! every offset that follows: IFD pointers and out-of-line values are all
//! relative to the first byte of the header, not to the start of the JPEG.
//!
//! # TIFF Header Structure
//!
//! ```text
//! Bytes 0-1: Byte order (0x4949 = little-endian "II", 0x4D4D = big-endian "MM")
//! Bytes 2-3: Signature (42 = 0x002A)
//! Bytes 4-7: Offset to first IFD (4 bytes, relative to byte 0)
//! ```
//!
//! # IFD Entry Structure (12 bytes)
//!
//! ```text
//! Bytes 0-1:  Tag
//! Bytes 2-3:  Field type
//! Bytes 4-7:  Count (number of values, not bytes)
//! Bytes 8-11: Value (if it fits in 4 bytes) or offset to the value
//! ```

use crate::error::StructuralError;
use crate::io::{read_u16_be, read_u16_le, read_u32_be, read_u32_le, ByteReader};

// =============================================================================
// Constants
// =============================================================================

/// Magic bytes indicating little-endian byte order ("II" for Intel)
const BYTE_ORDER_LITTLE_ENDIAN: u16 = 0x4949;

/// Magic bytes indicating big-endian byte order ("MM" for Motorola)
const BYTE_ORDER_BIG_ENDIAN: u16 = 0x4D4D;

/// TIFF signature that follows the byte order marker
const TIFF_SIGNATURE: u16 = 0x002A;

/// Size of the TIFF header in bytes
pub const TIFF_HEADER_SIZE: usize = 8;

/// Size of an IFD entry in bytes
pub const IFD_ENTRY_SIZE: usize = 12;

/// Size of the entry count field at the start of an IFD
pub const IFD_COUNT_SIZE: usize = 2;

/// Size of the value/offset field of an IFD entry
pub const VALUE_FIELD_SIZE: usize = 4;

// =============================================================================
// ByteOrder
// =============================================================================

/// Byte order (endianness) declared by the TIFF header.
///
/// All multi-byte values inside the Exif container are read in this order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrder {
    /// Little-endian ("II" = Intel)
    LittleEndian,
    /// Big-endian ("MM" = Motorola)
    BigEndian,
}

impl ByteOrder {
    /// Read a u16 from a byte slice using this byte order.
    #[inline]
    pub fn read_u16(self, bytes: &[u8]) -> u16 {
        match self {
            ByteOrder::LittleEndian => read_u16_le(bytes),
            ByteOrder::BigEndian => read_u16_be(bytes),
        }
    }

    /// Read a u32 from a byte slice using this byte order.
    #[inline]
    pub fn read_u32(self, bytes: &[u8]) -> u32 {
        match self {
            ByteOrder::LittleEndian => read_u32_le(bytes),
            ByteOrder::BigEndian => read_u32_be(bytes),
        }
    }

    /// Read an i16 from a byte slice using this byte order.
    #[inline]
    pub fn read_i16(self, bytes: &[u8]) -> i16 {
        self.read_u16(bytes) as i16
    }

    /// Read an i32 from a byte slice using this byte order.
    #[inline]
    pub fn read_i32(self, bytes: &[u8]) -> i32 {
        self.read_u32(bytes) as i32
    }
}

// =============================================================================
// TiffHeader
// =============================================================================

/// Parsed TIFF header of an Exif container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TiffHeader {
    /// Byte order for all multi-byte values in the container
    pub byte_order: ByteOrder,

    /// Absolute buffer offset of the header; every TIFF offset is relative to it
    pub tiff_start: usize,

    /// Offset to IFD0, relative to `tiff_start`
    pub first_ifd_offset: u32,
}

impl TiffHeader {
    /// Parse the TIFF header found at `tiff_start` in `reader`.
    ///
    /// # Errors
    /// - `TruncatedTiffHeader` if fewer than 8 bytes remain at `tiff_start`
    /// - `InvalidByteOrder` if the first two bytes are not II or MM
    /// - `InvalidSignature` if the signature is not 42
    pub fn parse(reader: &ByteReader, tiff_start: usize) -> Result<Self, StructuralError> {
        let bytes = reader
            .slice_at(tiff_start, TIFF_HEADER_SIZE)
            .ok_or(StructuralError::TruncatedTiffHeader { offset: tiff_start })?;

        // The marker is a byte pattern, so its read order does not matter
        let magic = u16::from_be_bytes([bytes[0], bytes[1]]);
        let byte_order = match magic {
            BYTE_ORDER_LITTLE_ENDIAN => ByteOrder::LittleEndian,
            BYTE_ORDER_BIG_ENDIAN => ByteOrder::BigEndian,
            _ => return Err(StructuralError::InvalidByteOrder(magic)),
        };

        let signature = byte_order.read_u16(&bytes[2..4]);
        if signature != TIFF_SIGNATURE {
            return Err(StructuralError::InvalidSignature(signature));
        }

        let first_ifd_offset = byte_order.read_u32(&bytes[4..8]);

        Ok(TiffHeader {
            byte_order,
            tiff_start,
            first_ifd_offset,
        })
    }

    /// Translate an offset relative to the TIFF header into a buffer offset.
    ///
    /// Returns `None` if the addition overflows.
    #[inline]
    pub fn absolute(&self, relative: u32) -> Option<usize> {
        self.tiff_start.checked_add(relative as usize)
    }
}

// =============================================================================
// IfdEntry
// =============================================================================

/// A single 12-byte IFD entry, undecoded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IfdEntry {
    /// Tag ID
    pub tag: u16,

    /// Raw field type code (may be a type this decoder does not support)
    pub field_type: u16,

    /// Number of values (not bytes)
    pub count: u32,

    /// The trailing 4 bytes: inline value or offset to the value
    pub value_field: [u8; VALUE_FIELD_SIZE],

    /// Absolute buffer offset of the entry itself
    pub entry_offset: usize,
}

impl IfdEntry {
    /// Read the entry starting at absolute offset `entry_offset`.
    ///
    /// Returns `None` if the full 12 bytes are not available.
    pub fn read(reader: &ByteReader, entry_offset: usize, byte_order: ByteOrder) -> Option<Self> {
        let bytes = reader.slice_at(entry_offset, IFD_ENTRY_SIZE)?;

        let mut value_field = [0u8; VALUE_FIELD_SIZE];
        value_field.copy_from_slice(&bytes[8..12]);

        Some(IfdEntry {
            tag: byte_order.read_u16(&bytes[0..2]),
            field_type: byte_order.read_u16(&bytes[2..4]),
            count: byte_order.read_u32(&bytes[4..8]),
            value_field,
            entry_offset,
        })
    }

    /// Absolute buffer offset of the inline value field.
    #[inline]
    pub fn value_field_offset(&self) -> usize {
        self.entry_offset + 8
    }

    /// Interpret the value field as an offset (relative to the TIFF header).
    #[inline]
    pub fn value_offset(&self, byte_order: ByteOrder) -> u32 {
        byte_order.read_u32(&self.value_field)
    }
}

// =============================================================================
// Tests
// =============================================================================
