//! Test utilities for integration tests.
//!
//! This module provides builders for synthetic TIFF containers and the JPEG
//! files that carry them, in either byte order.

#![allow(dead_code)]

// =============================================================================
// Byte Order
// =============================================================================

/// Byte order of a synthetic TIFF container.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ByteOrderType {
    LittleEndian,
    BigEndian,
}

impl ByteOrderType {
    fn u16(self, v: u16) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => v.to_le_bytes(),
            ByteOrderType::BigEndian => v.to_be_bytes(),
        }
    }

    fn u32(self, v: u32) -> [u8; 4] {
        match self {
            ByteOrderType::LittleEndian => v.to_le_bytes(),
            ByteOrderType::BigEndian => v.to_be_bytes(),
        }
    }

    fn marker(self) -> [u8; 2] {
        match self {
            ByteOrderType::LittleEndian => *b"II",
            ByteOrderType::BigEndian => *b"MM",
        }
    }
}

// =============================================================================
// Entry Values
// =============================================================================

/// A value to store in a synthetic IFD entry.
#[derive(Debug, Clone)]
pub enum Value {
    /// ASCII text; a NUL terminator is appended
    Ascii(String),
    Byte(Vec<u8>),
    Undefined(Vec<u8>),
    Short(Vec<u16>),
    Long(Vec<u32>),
    Rational(Vec<(u32, u32)>),
    SRational(Vec<(i32, i32)>),
    /// Value field set to an explicit offset, regardless of where data lives.
    /// Used to craft out-of-bounds or otherwise broken entries.
    AtOffset {
        field_type: u16,
        count: u32,
        offset: u32,
    },
}

impl Value {
    pub fn ascii(text: &str) -> Self {
        Value::Ascii(text.to_string())
    }

    fn field_type(&self) -> u16 {
        match self {
            Value::Byte(_) => 1,
            Value::Ascii(_) => 2,
            Value::Short(_) => 3,
            Value::Long(_) => 4,
            Value::Rational(_) => 5,
            Value::Undefined(_) => 7,
            Value::SRational(_) => 10,
            Value::AtOffset { field_type, .. } => *field_type,
        }
    }

    /// Count and encoded bytes of the value.
    fn encode(&self, order: ByteOrderType) -> (u32, Vec<u8>) {
        match self {
            Value::Ascii(text) => {
                let mut bytes = text.as_bytes().to_vec();
                bytes.push(0);
                (bytes.len() as u32, bytes)
            }
            Value::Byte(bytes) | Value::Undefined(bytes) => (bytes.len() as u32, bytes.clone()),
            Value::Short(values) => (
                values.len() as u32,
                values.iter().flat_map(|&v| order.u16(v)).collect(),
            ),
            Value::Long(values) => (
                values.len() as u32,
                values.iter().flat_map(|&v| order.u32(v)).collect(),
            ),
            Value::Rational(values) => (
                values.len() as u32,
                values
                    .iter()
                    .flat_map(|&(n, d)| order.u32(n).into_iter().chain(order.u32(d)))
                    .collect(),
            ),
            Value::SRational(values) => (
                values.len() as u32,
                values
                    .iter()
                    .flat_map(|&(n, d)| {
                        order
                            .u32(n as u32)
                            .into_iter()
                            .chain(order.u32(d as u32))
                    })
                    .collect(),
            ),
            Value::AtOffset { count, .. } => (*count, Vec::new()),
        }
    }
}

// =============================================================================
// TIFF Builder
// =============================================================================

const EXIF_IFD_POINTER: u16 = 0x8769;
const GPS_IFD_POINTER: u16 = 0x8825;

/// Builds a TIFF container with IFD0 and optional Exif and GPS sub-IFDs.
///
/// Layout: header, IFD0, Exif IFD, GPS IFD, then the out-of-line value
/// area. Pointer entries for the sub-IFDs are appended to IFD0 automatically.
#[derive(Debug, Clone)]
pub struct TiffBuilder {
    order: ByteOrderType,
    ifd0: Vec<(u16, Value)>,
    exif: Vec<(u16, Value)>,
    gps: Vec<(u16, Value)>,
}

impl TiffBuilder {
    pub fn new(order: ByteOrderType) -> Self {
        Self {
            order,
            ifd0: Vec::new(),
            exif: Vec::new(),
            gps: Vec::new(),
        }
    }

    pub fn entry(mut self, tag: u16, value: Value) -> Self {
        self.ifd0.push((tag, value));
        self
    }

    pub fn exif_entry(mut self, tag: u16, value: Value) -> Self {
        self.exif.push((tag, value));
        self
    }

    pub fn gps_entry(mut self, tag: u16, value: Value) -> Self {
        self.gps.push((tag, value));
        self
    }

    pub fn build(self) -> Vec<u8> {
        let order = self.order;
        let ifd_size = |n: usize| 2 + 12 * n + 4;

        let mut ifd0 = self.ifd0;
        let ifd0_offset = 8u32;
        let pointer_count = usize::from(!self.exif.is_empty()) + usize::from(!self.gps.is_empty());
        let exif_offset = ifd0_offset + ifd_size(ifd0.len() + pointer_count) as u32;
        let gps_offset = exif_offset
            + if self.exif.is_empty() {
                0
            } else {
                ifd_size(self.exif.len()) as u32
            };

        if !self.exif.is_empty() {
            ifd0.push((EXIF_IFD_POINTER, Value::Long(vec![exif_offset])));
        }
        if !self.gps.is_empty() {
            ifd0.push((GPS_IFD_POINTER, Value::Long(vec![gps_offset])));
        }

        let mut directories: Vec<&[(u16, Value)]> = vec![ifd0.as_slice()];
        if !self.exif.is_empty() {
            directories.push(self.exif.as_slice());
        }
        if !self.gps.is_empty() {
            directories.push(self.gps.as_slice());
        }

        let data_offset = ifd0_offset as usize
            + directories
                .iter()
                .map(|d| ifd_size(d.len()))
                .sum::<usize>();

        let mut out = Vec::new();
        out.extend_from_slice(&order.marker());
        out.extend_from_slice(&order.u16(42));
        out.extend_from_slice(&order.u32(ifd0_offset));

        let mut data_area = Vec::new();
        for directory in directories {
            out.extend_from_slice(&order.u16(directory.len() as u16));
            for (tag, value) in directory {
                let (count, bytes) = value.encode(order);
                out.extend_from_slice(&order.u16(*tag));
                out.extend_from_slice(&order.u16(value.field_type()));
                out.extend_from_slice(&order.u32(count));

                match value {
                    Value::AtOffset { offset, .. } => out.extend_from_slice(&order.u32(*offset)),
                    _ if bytes.len() <= 4 => {
                        let mut field = [0u8; 4];
                        field[..bytes.len()].copy_from_slice(&bytes);
                        out.extend_from_slice(&field);
                    }
                    _ => {
                        let offset = (data_offset + data_area.len()) as u32;
                        out.extend_from_slice(&order.u32(offset));
                        data_area.extend_from_slice(&bytes);
                        if data_area.len() % 2 == 1 {
                            data_area.push(0);
                        }
                    }
                }
            }
            // No next IFD
            out.extend_from_slice(&order.u32(0));
        }

        assert_eq!(out.len(), data_offset);
        out.extend_from_slice(&data_area);
        out
    }
}

// =============================================================================
// JPEG Builders
// =============================================================================

/// Encode one JPEG marker segment.
pub fn segment(marker: u8, payload: &[u8]) -> Vec<u8> {
    let mut out = vec![0xFF, marker];
    out.extend_from_slice(&((payload.len() + 2) as u16).to_be_bytes());
    out.extend_from_slice(payload);
    out
}

/// A JFIF APP0 payload.
pub fn jfif_payload() -> Vec<u8> {
    b"JFIF\0\x01\x01\0\0\x01\0\x01\0\0".to_vec()
}

/// An APP1 payload carrying `tiff` behind the given 6-byte identifier.
pub fn app1_payload(identifier: &[u8; 6], tiff: &[u8]) -> Vec<u8> {
    let mut payload = identifier.to_vec();
    payload.extend_from_slice(tiff);
    payload
}

/// Assemble a JPEG from SOI, the given segments, a short scan and EOI.
pub fn jpeg_with_segments(segments: &[Vec<u8>]) -> Vec<u8> {
    let mut data = vec![0xFF, 0xD8];
    for s in segments {
        data.extend_from_slice(s);
    }
    // Quantization table so the file looks like a real baseline JPEG
    data.extend_from_slice(&segment(0xDB, &[0u8; 65]));
    data.extend_from_slice(&segment(0xDA, &[0x01, 0x01, 0x00, 0x00, 0x3F, 0x00]));
    data.extend_from_slice(&[0x12, 0x34, 0x56, 0x78]);
    data.extend_from_slice(&[0xFF, 0xD9]);
    data
}

/// A JPEG whose Exif segment carries `tiff`, preceded by a JFIF APP0.
pub fn jpeg_with_exif(tiff: &[u8]) -> Vec<u8> {
    jpeg_with_segments(&[
        segment(0xE0, &jfif_payload()),
        segment(0xE1, &app1_payload(b"Exif\0\0", tiff)),
    ])
}

/// A well-formed JPEG without any Exif segment.
pub fn jpeg_without_exif() -> Vec<u8> {
    jpeg_with_segments(&[segment(0xE0, &jfif_payload())])
}

/// A TIFF container with a single `Make` entry.
pub fn make_only_tiff(order: ByteOrderType, make: &str) -> Vec<u8> {
    TiffBuilder::new(order)
        .entry(0x010F, Value::ascii(make))
        .build()
}
