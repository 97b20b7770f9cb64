//! JPEG segment scanning.
//!
//! A JPEG file is a sequence of marker-delimited segments. Exif metadata
//! lives in an APP1 segment whose payload starts with `"Exif\0\0"`, followed
//! immediately by a TIFF container.
//!
//! # Segment Layout
//!
//! ```text
//! FF E1          APP1 marker
//! LL LL          Segment length, big-endian, includes these two bytes
//! 45 78 69 66    "Exif"
//! 00 00          Two NUL bytes
//! ...            TIFF header and directories
//! ```
//!
//! Other APP1 segments (XMP in particular) share the marker, so the
//! identifier has to be checked before a segment is accepted.

use tracing::{debug, trace};

use crate::error::{ExifError, StructuralError};
use crate::io::ByteReader;

// =============================================================================
// JPEG Markers
// =============================================================================

/// Start Of Image marker
pub const SOI: [u8; 2] = [0xFF, 0xD8];

/// End Of Image marker
pub const EOI: [u8; 2] = [0xFF, 0xD9];

/// Start Of Scan marker
pub const SOS: [u8; 2] = [0xFF, 0xDA];

/// Application segment 1 (Exif, XMP) marker
pub const APP1: [u8; 2] = [0xFF, 0xE1];

/// Identifier at the start of an Exif APP1 payload
pub const EXIF_IDENTIFIER: &[u8; 6] = b"Exif\0\0";

/// Distance from an APP1 marker to the TIFF header it carries
/// (marker + length + identifier).
pub const EXIF_TIFF_OFFSET: usize = 10;

/// Smallest buffer that can hold SOI and the start of a segment.
pub const MIN_JPEG_SIZE: usize = 4;

/// Temporary private use marker, which carries no length
const TEM: u8 = 0x01;

// =============================================================================
// Segment Scanning
// =============================================================================

/// Check whether `data` starts with a JPEG start-of-image marker.
pub fn has_soi(data: &[u8]) -> bool {
    data.len() >= 2 && data[0..2] == SOI
}

/// Whether a marker type stands alone, without a length field.
#[inline]
fn is_standalone(marker: u8) -> bool {
    marker == TEM || (0xD0..=0xD8).contains(&marker)
}

/// Locate the TIFF container inside the first Exif APP1 segment.
///
/// Returns the absolute offset of the TIFF header.
///
/// # Errors
/// - `Structural` if the buffer is shorter than 4 bytes or lacks SOI
/// - `NotFound` if scanning reaches SOS, EOI, the end of the data, or a
///   broken segment before any Exif APP1 segment
pub fn find_exif_segment(reader: &ByteReader) -> Result<usize, ExifError> {
    let data = reader.as_bytes();

    if data.len() < MIN_JPEG_SIZE {
        return Err(StructuralError::TooSmall {
            required: MIN_JPEG_SIZE,
            actual: data.len(),
        }
        .into());
    }

    if !has_soi(data) {
        return Err(StructuralError::MissingSoi.into());
    }

    let mut pos = 2;
    loop {
        match reader.read_u8(pos) {
            Some(0xFF) => {}
            Some(_) => {
                return Err(not_found(format!("expected a marker at offset {}", pos)));
            }
            None => return Err(not_found("reached end of data")),
        }

        // Any number of 0xFF fill bytes may precede the marker type
        while reader.read_u8(pos + 1) == Some(0xFF) {
            pos += 1;
        }

        let Some(marker) = reader.read_u8(pos + 1) else {
            return Err(not_found("reached end of data"));
        };

        if [0xFF, marker] == SOS || [0xFF, marker] == EOI {
            return Err(not_found(format!(
                "reached marker 0xFF{:02X} before an Exif segment",
                marker
            )));
        }

        if is_standalone(marker) {
            pos += 2;
            continue;
        }

        let Some(length) = reader.read_u16_be(pos + 2) else {
            return Err(not_found("segment length truncated"));
        };
        if length < 2 {
            return Err(not_found(format!(
                "invalid segment length {} at offset {}",
                length, pos
            )));
        }

        if [0xFF, marker] == APP1 {
            let identifier = reader.slice_at(pos + 4, EXIF_IDENTIFIER.len());
            if identifier == Some(&EXIF_IDENTIFIER[..]) {
                debug!(offset = pos, length, "found Exif APP1 segment");
                return Ok(pos + EXIF_TIFF_OFFSET);
            }
            trace!(offset = pos, length, "skipping non-Exif APP1 segment");
        }

        let next = pos + 2 + length as usize;
        if next > data.len() {
            return Err(not_found(format!(
                "segment at offset {} runs past end of data",
                pos
            )));
        }
        pos = next;
    }
}

fn not_found(reason: impl Into<String>) -> ExifError {
    ExifError::NotFound(reason.into())
}

// =============================================================================
// Tests
// =============================================================================
