//! IFD entry value decoding.
//!
//! Values are stored either inline in the entry's 4-byte value field (when
//! `unit size × count ≤ 4`) or elsewhere in the container, in which case the
//! value field holds an offset relative to the TIFF header.
//!
//! Decoding never fails loudly: an unsupported type, a zero count, or a value
//! that would run past the end of the buffer produces [`DecodedValue::None`]
//! and the caller drops the entry. A zero-count ASCII entry is the exception
//! and decodes to empty text.

use serde::Serialize;
use tracing::trace;

use crate::io::ByteReader;

use super::parser::{IfdEntry, TiffHeader};
use super::tags::FieldType;

// =============================================================================
// DecodedValue
// =============================================================================

/// A typed value decoded from an IFD entry.
///
/// Single-element values collapse to the scalar variants; anything with a
/// count above one stays a list in file order.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DecodedValue {
    /// ASCII text, cut at the first NUL
    Text(String),

    /// A single integer of any TIFF integer type
    Integer(i64),

    /// Several integers, in file order
    IntegerList(Vec<i64>),

    /// A single rational, already divided out
    Rational(f64),

    /// Several rationals, in file order
    RationalList(Vec<f64>),

    /// The entry could not be decoded
    None,
}

impl DecodedValue {
    /// Whether decoding produced nothing.
    #[inline]
    pub fn is_none(&self) -> bool {
        matches!(self, DecodedValue::None)
    }

    /// The scalar integer, if this is one.
    pub fn as_integer(&self) -> Option<i64> {
        match self {
            DecodedValue::Integer(v) => Some(*v),
            _ => None,
        }
    }

    fn from_integers(values: impl Iterator<Item = i64>, count: u32) -> Self {
        let mut values: Vec<i64> = values.collect();
        if count == 1 {
            values.pop().map_or(DecodedValue::None, DecodedValue::Integer)
        } else {
            DecodedValue::IntegerList(values)
        }
    }

    fn from_rationals(values: impl Iterator<Item = f64>, count: u32) -> Self {
        let mut values: Vec<f64> = values.collect();
        if count == 1 {
            values.pop().map_or(DecodedValue::None, DecodedValue::Rational)
        } else {
            DecodedValue::RationalList(values)
        }
    }
}

/// Divide a rational, yielding exactly 0 for a zero denominator.
#[inline]
fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        0.0
    } else {
        numerator / denominator
    }
}

// =============================================================================
// Decoding
// =============================================================================

/// Decode the value of `entry`.
///
/// Returns [`DecodedValue::None`] when the type is unsupported, the count is
/// zero (except for ASCII, which yields empty text), or the value's location
/// plus length falls outside the buffer.
pub fn decode_entry(reader: &ByteReader, header: &TiffHeader, entry: &IfdEntry) -> DecodedValue {
    let Some(field_type) = FieldType::from_u16(entry.field_type) else {
        trace!(
            tag = entry.tag,
            field_type = entry.field_type,
            "skipping entry with unsupported field type"
        );
        return DecodedValue::None;
    };

    if entry.count == 0 {
        // A zero-length string is still a present, blank field
        return match field_type {
            FieldType::Ascii => DecodedValue::Text(String::new()),
            _ => DecodedValue::None,
        };
    }

    let Some(len) = field_type.byte_len(entry.count) else {
        return DecodedValue::None;
    };

    let location = if field_type.fits_inline(entry.count) {
        Some(entry.value_field_offset())
    } else {
        header.absolute(entry.value_offset(header.byte_order))
    };

    let Some(bytes) = location.and_then(|loc| reader.slice_at(loc, len)) else {
        trace!(
            tag = entry.tag,
            len,
            buffer_len = reader.len(),
            "skipping entry whose value lies outside the buffer"
        );
        return DecodedValue::None;
    };

    let order = header.byte_order;
    let count = entry.count;

    match field_type {
        FieldType::Ascii => {
            let end = bytes.iter().position(|&b| b == 0).unwrap_or(bytes.len());
            DecodedValue::Text(String::from_utf8_lossy(&bytes[..end]).into_owned())
        }
        FieldType::Byte | FieldType::Undefined => {
            DecodedValue::from_integers(bytes.iter().map(|&b| b as i64), count)
        }
        FieldType::SByte => DecodedValue::from_integers(bytes.iter().map(|&b| b as i8 as i64), count),
        FieldType::Short => DecodedValue::from_integers(
            bytes.chunks_exact(2).map(|c| order.read_u16(c) as i64),
            count,
        ),
        FieldType::SShort => DecodedValue::from_integers(
            bytes.chunks_exact(2).map(|c| order.read_i16(c) as i64),
            count,
        ),
        FieldType::Long => DecodedValue::from_integers(
            bytes.chunks_exact(4).map(|c| order.read_u32(c) as i64),
            count,
        ),
        FieldType::SLong => DecodedValue::from_integers(
            bytes.chunks_exact(4).map(|c| order.read_i32(c) as i64),
            count,
        ),
        FieldType::Rational => DecodedValue::from_rationals(
            bytes
                .chunks_exact(8)
                .map(|c| ratio(order.read_u32(&c[..4]) as f64, order.read_u32(&c[4..]) as f64)),
            count,
        ),
        FieldType::SRational => DecodedValue::from_rationals(
            bytes
                .chunks_exact(8)
                .map(|c| ratio(order.read_i32(&c[..4]) as f64, order.read_i32(&c[4..]) as f64)),
            count,
        ),
    }
}

// =============================================================================
// Tests
// =============================================================================
