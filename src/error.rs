use thiserror::Error;

/// Container or TIFF header violations that abort a decode.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StructuralError {
    /// Buffer is too small to hold a JPEG start-of-image marker and a segment
    #[error("Not a valid JPEG file: need at least {required} bytes, got {actual}")]
    TooSmall { required: usize, actual: usize },

    /// First two bytes are not the JPEG start-of-image marker (FFD8)
    #[error("Not a valid JPEG file: missing start-of-image marker")]
    MissingSoi,

    /// Exif segment ends before a complete TIFF header
    #[error("Invalid TIFF header: truncated at offset {offset}")]
    TruncatedTiffHeader { offset: usize },

    /// Byte order marker is neither II nor MM
    #[error("Invalid TIFF byte order: expected 0x4949 (II) or 0x4D4D (MM), got 0x{0:04X}")]
    InvalidByteOrder(u16),

    /// TIFF signature is not 42
    #[error("Invalid TIFF signature: expected 0x002A, got 0x{0:04X}")]
    InvalidSignature(u16),
}

/// Errors surfaced by the EXIF decoder.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ExifError {
    /// The input is corrupt or not a JPEG at all
    #[error(transparent)]
    Structural(#[from] StructuralError),

    /// The input is a well-formed JPEG without an Exif APP1 segment
    #[error("No EXIF data found: {0}")]
    NotFound(String),
}

impl ExifError {
    /// Whether this error means "no metadata" rather than "broken file".
    pub fn is_not_found(&self) -> bool {
        matches!(self, ExifError::NotFound(_))
    }
}
