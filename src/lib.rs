//! # exif-inspector
//!
//! A small EXIF decoder for JPEG files.
//!
//! Given the bytes of a JPEG, this library finds the Exif APP1 segment, reads
//! the TIFF container inside it, and returns the camera and image tags as an
//! ordered label → value map. All work happens on an in-memory buffer; no
//! I/O is performed by the decoder itself.
//!
//! ## Architecture
//!
//! - [`io`] - Bounds-checked random-access reads over the input buffer
//! - [`mod@format`] - JPEG segment scanning and TIFF header/IFD/value decoding
//! - [`metadata`] - The ordered [`TagMap`] and value normalization
//! - [`config`] - Decoder options and the CLI configuration
//! - [`error`] - Structural and not-found errors
//!
//! ## Example
//!
//! ```rust,no_run
//! use exif_inspector::{parse_exif, ExifError};
//!
//! let bytes = std::fs::read("photo.jpg").unwrap();
//! match parse_exif(bytes) {
//!     Ok(tags) => {
//!         for (label, value) in tags.iter() {
//!             println!("{}: {}", label, value);
//!         }
//!     }
//!     Err(ExifError::NotFound(_)) => println!("no metadata"),
//!     Err(e) => eprintln!("corrupt file: {}", e),
//! }
//! ```

pub mod config;
pub mod error;
pub mod format;
pub mod io;
pub mod metadata;

use bytes::Bytes;
use tracing::debug;

// Re-export commonly used types
pub use config::{Config, OutputFormat, ParseOptions};
pub use error::{ExifError, StructuralError};
pub use format::jpeg::EXIF_IDENTIFIER;
pub use format::tiff::{
    decode_entry, ByteOrder, DecodedValue, FieldType, IfdEntry, IfdKind, IfdWalker, TiffHeader,
};
pub use format::{find_exif_segment, has_soi};
pub use io::ByteReader;
pub use metadata::{format_decimal, normalize_value, TagMap};

/// Decode the EXIF tags of a JPEG file with default options.
///
/// # Errors
/// - [`ExifError::Structural`] if the data is not a JPEG or the TIFF header
///   is invalid
/// - [`ExifError::NotFound`] if the JPEG carries no Exif APP1 segment
pub fn parse_exif(data: impl Into<Bytes>) -> Result<TagMap, ExifError> {
    parse_exif_with(data, &ParseOptions::default())
}

/// Decode the EXIF tags of a JPEG file.
///
/// Entries that cannot be decoded are skipped; only the container and TIFF
/// header checks can fail the call.
pub fn parse_exif_with(data: impl Into<Bytes>, options: &ParseOptions) -> Result<TagMap, ExifError> {
    let reader = ByteReader::new(data);
    let tiff_start = find_exif_segment(&reader)?;
    decode_container(&reader, tiff_start, options)
}

/// Decode a bare Exif payload: a TIFF container, optionally preceded by the
/// `"Exif\0\0"` identifier as found in an APP1 segment body.
pub fn parse_tiff_payload(
    data: impl Into<Bytes>,
    options: &ParseOptions,
) -> Result<TagMap, ExifError> {
    let reader = ByteReader::new(data);
    let tiff_start = match reader.slice_at(0, EXIF_IDENTIFIER.len()) {
        Some(identifier) if identifier == &EXIF_IDENTIFIER[..] => EXIF_IDENTIFIER.len(),
        _ => 0,
    };
    decode_container(&reader, tiff_start, options)
}

fn decode_container(
    reader: &ByteReader,
    tiff_start: usize,
    options: &ParseOptions,
) -> Result<TagMap, ExifError> {
    let header = TiffHeader::parse(reader, tiff_start)?;
    debug!(
        byte_order = ?header.byte_order,
        tiff_start,
        first_ifd = header.first_ifd_offset,
        "parsed TIFF header"
    );

    let mut walker = IfdWalker::new(reader, header, options);
    walker.walk(header.first_ifd_offset, IfdKind::Primary);
    let tags = walker.into_tags();

    debug!(tags = tags.len(), "decoded Exif container");
    Ok(tags)
}
