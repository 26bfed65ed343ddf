use core::fmt::{self, Display, Formatter};

/// Result alias used throughout the crate.
pub type PngResult<T> = Result<T, PngError>;

/// An error from decoding, editing, or encoding a PNG.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[non_exhaustive]
pub enum PngError {
  /// The byte stream didn't start with the PNG signature.
  BadMagic,
  /// A critical chunk type the decoder doesn't recognize.
  UnknownCriticalChunk { chunk_type: [u8; 4] },
  /// A chunk's declared CRC didn't match the recomputed CRC over
  /// `type ∥ data`.
  CorruptChunk { chunk_type: [u8; 4], offset: usize },
  /// A chunk's data wasn't the length its type requires.
  InvalidLength { chunk_type: [u8; 4] },
  /// A chunk's data was the right length but held an illegal field value.
  InvalidFieldValue { chunk_type: [u8; 4] },
  /// A chunk appeared somewhere the chunk-ordering rules forbid.
  ChunkOrderViolation { chunk_type: [u8; 4] },
  /// A structural feature outside this crate's supported subset of PNG.
  UnsupportedFeature { what: &'static str },
  /// The `IDAT` stream failed to inflate.
  DecompressionError,
  /// The pixel data failed to deflate.
  CompressionError,
  /// A palette would have had more than 256 entries.
  PaletteTooLarge,
  /// A textual keyword was longer than 79 bytes.
  KeywordTooLong,
  /// No color-mode conversion path exists for the requested pair.
  UnsupportedConversion,
  /// `width` or `height` was zero on `create`/`set_dimensions`.
  InvalidDimensions,
  /// An I/O error occurred reading or writing a file.
  #[cfg(feature = "std")]
  IoError,
}

impl Display for PngError {
  fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
    match self {
      Self::BadMagic => write!(f, "missing PNG signature"),
      Self::UnknownCriticalChunk { chunk_type } => {
        write!(f, "unknown critical chunk {:?}", core::str::from_utf8(chunk_type))
      }
      Self::CorruptChunk { chunk_type, offset } => {
        write!(f, "CRC mismatch in {:?} chunk at offset {offset}", core::str::from_utf8(chunk_type))
      }
      Self::InvalidLength { chunk_type } => {
        write!(f, "invalid length for {:?} chunk", core::str::from_utf8(chunk_type))
      }
      Self::InvalidFieldValue { chunk_type } => {
        write!(f, "invalid field value in {:?} chunk", core::str::from_utf8(chunk_type))
      }
      Self::ChunkOrderViolation { chunk_type } => {
        write!(f, "{:?} chunk appeared out of order", core::str::from_utf8(chunk_type))
      }
      Self::UnsupportedFeature { what } => write!(f, "unsupported PNG feature: {what}"),
      Self::DecompressionError => write!(f, "failed to inflate image data"),
      Self::CompressionError => write!(f, "failed to deflate image data"),
      Self::PaletteTooLarge => write!(f, "palette has more than 256 entries"),
      Self::KeywordTooLong => write!(f, "textual keyword is longer than 79 bytes"),
      Self::UnsupportedConversion => write!(f, "no conversion path between these color modes"),
      Self::InvalidDimensions => write!(f, "width and height must both be non-zero"),
      #[cfg(feature = "std")]
      Self::IoError => write!(f, "I/O error"),
    }
  }
}

#[cfg(feature = "std")]
impl std::error::Error for PngError {}

#[cfg(feature = "std")]
impl From<std::io::Error> for PngError {
  #[inline]
  fn from(_: std::io::Error) -> Self {
    Self::IoError
  }
}
