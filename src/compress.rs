//! The compression bridge: a thin adapter around `miniz_oxide`'s DEFLATE
//! implementation, treated as an external collaborator per `spec.md` §1/§4.2.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/mod.rs`'s
//! `decompress_idat_to_temp_storage` for the inflate side; the deflate side
//! is new code (the teacher is decode-only) written against the same crate.

use crate::error::{PngError, PngResult};
use alloc::vec::Vec;
use miniz_oxide::{deflate::compress_to_vec_zlib, inflate::decompress_to_vec_zlib};

/// DEFLATE compression level, clamped to the range `miniz_oxide` supports
/// (`spec.md` §4.2: "Level is clamped to the range supported by the
/// underlying DEFLATE implementation").
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompressionLevel {
  Fast,
  Default,
  Best,
  /// An explicit 0-10 `miniz_oxide` level.
  Level(u8),
}
impl CompressionLevel {
  #[inline]
  fn as_u8(self) -> u8 {
    match self {
      Self::Fast => 1,
      Self::Default => 6,
      Self::Best => 10,
      Self::Level(n) => n.min(10),
    }
  }
}

/// Inflates a zlib stream (the concatenation of every `IDAT` chunk's data,
/// per `spec.md` §4.2's ordering requirement) into its decompressed bytes.
pub fn inflate(input: &[u8]) -> PngResult<Vec<u8>> {
  decompress_to_vec_zlib(input).map_err(|_| PngError::DecompressionError)
}

/// Deflates `input` into a zlib stream at the given compression level.
pub fn deflate(input: &[u8], level: CompressionLevel) -> Vec<u8> {
  compress_to_vec_zlib(input, level.as_u8())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn inflate_of_deflate_round_trips() {
    let data = b"the quick brown fox jumps over the lazy dog, many times over";
    let compressed = deflate(data, CompressionLevel::Default);
    let decompressed = inflate(&compressed).unwrap();
    assert_eq!(decompressed, data);
  }

  #[test]
  fn inflate_rejects_garbage() {
    assert_eq!(inflate(&[1, 2, 3, 4, 5]), Err(PngError::DecompressionError));
  }
}
