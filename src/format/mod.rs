//! Container parsers for Exif metadata.
//!
//! Decoding happens in two layers:
//!
//! - [`jpeg`] walks JPEG markers to find the Exif APP1 segment
//! - [`tiff`] reads the TIFF container inside it: header, directories, values

pub mod jpeg;
pub mod tiff;

pub use jpeg::{find_exif_segment, has_soi};
