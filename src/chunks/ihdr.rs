//! `IHDR`: dimensions, bit depth, and color mode.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/ihdr.rs`'s `IHDR` struct
//! and `PngColorType`, restricted to the two bit depths this crate
//! supports (`SPEC_FULL.md` §9(d)).

use crate::color::{BitDepth, ColorMode};
use crate::error::{PngError, PngResult};
use crate::util::u32_be;
use alloc::vec::Vec;

pub const IHDR_LEN: usize = 13;

/// The decoded `IHDR` fields. `compression`/`filter`/`interlace` aren't
/// stored — the loader rejects anything other than `0` for each and the
/// saver always emits `0`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header {
  pub width: u32,
  pub height: u32,
  pub bit_depth: BitDepth,
  pub color_mode: ColorMode,
}
impl Header {
  #[inline]
  pub const fn bytes_per_pixel(&self) -> usize {
    crate::color::bytes_per_pixel(self.color_mode, self.bit_depth)
  }

  #[inline]
  pub fn pixel_buffer_len(&self) -> usize {
    self.width as usize * self.height as usize * self.bytes_per_pixel()
  }
}

pub fn parse_ihdr(data: &[u8]) -> PngResult<Header> {
  if data.len() != IHDR_LEN {
    return Err(PngError::InvalidLength { chunk_type: *b"IHDR" });
  }
  let width = u32_be(&data[0..4]);
  let height = u32_be(&data[4..8]);
  let bit_depth = BitDepth::try_from(data[8])?;
  let color_mode = ColorMode::try_from(data[9])?;
  let compression = data[10];
  let filter = data[11];
  let interlace = data[12];
  if width == 0 || height == 0 {
    return Err(PngError::InvalidDimensions);
  }
  if compression != 0 {
    return Err(PngError::UnsupportedFeature { what: "compression method other than 0" });
  }
  if filter != 0 {
    return Err(PngError::UnsupportedFeature { what: "filter method other than 0" });
  }
  if interlace != 0 {
    return Err(PngError::UnsupportedFeature { what: "interlaced PNG (Adam7)" });
  }
  Ok(Header { width, height, bit_depth, color_mode })
}

pub fn serialize_ihdr(header: &Header) -> Vec<u8> {
  let mut out = Vec::with_capacity(IHDR_LEN);
  out.extend_from_slice(&header.width.to_be_bytes());
  out.extend_from_slice(&header.height.to_be_bytes());
  out.push(header.bit_depth.as_u8());
  out.push(header.color_mode as u8);
  out.push(0); // compression
  out.push(0); // filter
  out.push(0); // interlace
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_rgba8() {
    let header = Header { width: 2, height: 2, bit_depth: BitDepth::Eight, color_mode: ColorMode::RgbAlpha };
    let bytes = serialize_ihdr(&header);
    assert_eq!(bytes.len(), IHDR_LEN);
    assert_eq!(parse_ihdr(&bytes).unwrap(), header);
  }

  #[test]
  fn zero_dimension_is_invalid() {
    let header = Header { width: 0, height: 2, bit_depth: BitDepth::Eight, color_mode: ColorMode::Rgb };
    let bytes = serialize_ihdr(&header);
    assert_eq!(parse_ihdr(&bytes), Err(PngError::InvalidDimensions));
  }

  #[test]
  fn nonzero_interlace_is_unsupported() {
    let mut bytes = serialize_ihdr(&Header {
      width: 1,
      height: 1,
      bit_depth: BitDepth::Eight,
      color_mode: ColorMode::Grayscale,
    });
    bytes[12] = 1;
    assert!(matches!(parse_ihdr(&bytes), Err(PngError::UnsupportedFeature { .. })));
  }

  #[test]
  fn wrong_length_is_rejected() {
    assert_eq!(parse_ihdr(&[0u8; 12]), Err(PngError::InvalidLength { chunk_type: *b"IHDR" }));
  }
}
