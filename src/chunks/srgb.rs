//! `sRGB`: rendering intent, one byte in `0..=3`.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/srgb.rs`.

use crate::error::{PngError, PngResult};
use alloc::vec::Vec;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SrgbIntent(pub u8);

pub fn parse_srgb(data: &[u8]) -> PngResult<SrgbIntent> {
  if data.len() != 1 {
    return Err(PngError::InvalidLength { chunk_type: *b"sRGB" });
  }
  if data[0] > 3 {
    return Err(PngError::InvalidFieldValue { chunk_type: *b"sRGB" });
  }
  Ok(SrgbIntent(data[0]))
}

pub fn serialize_srgb(intent: SrgbIntent) -> Vec<u8> {
  alloc::vec![intent.0]
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips() {
    let bytes = serialize_srgb(SrgbIntent(2));
    assert_eq!(parse_srgb(&bytes).unwrap(), SrgbIntent(2));
  }

  #[test]
  fn out_of_range_is_rejected() {
    assert_eq!(parse_srgb(&[4]), Err(PngError::InvalidFieldValue { chunk_type: *b"sRGB" }));
  }
}
