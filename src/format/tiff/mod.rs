//! TIFF container decoding for Exif metadata.
//!
//! Exif stores its metadata as a miniature TIFF file embedded in the JPEG.
//!
//! # Key Concepts
//!
//! - **Byte order**: The TIFF header declares its endianness (II = little-endian,
//!   MM = big-endian). All multi-byte values must be read respecting this order.
//!
//! - **Relative offsets**: Every offset inside the container is relative to the
//!   first byte of the TIFF header, never to the start of the JPEG.
//!
//! - **IFD (Image File Directory)**: A list of 12-byte tagged entries. Exif uses
//!   IFD0 plus optional Exif and GPS sub-IFDs reached through pointer tags.
//!
//! - **Inline vs offset values**: Values of 4 bytes or less are stored inline in
//!   the IFD entry; larger values are stored at an offset pointed to by the entry.

mod parser;
mod tags;
mod values;
mod walker;

pub use parser::{
    ByteOrder, IfdEntry, TiffHeader, IFD_COUNT_SIZE, IFD_ENTRY_SIZE, TIFF_HEADER_SIZE,
    VALUE_FIELD_SIZE,
};
pub use tags::{FieldType, IfdKind, EXIF_IFD_POINTER, GPS_IFD_POINTER};
pub use values::{decode_entry, DecodedValue};
pub use walker::IfdWalker;
