//! `sBIT`: significant bits per channel, shaped by color mode.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/sbit.rs`'s `sBIT` struct
//! (one byte per channel of the image's color mode).

use crate::color::ColorMode;
use crate::error::{PngError, PngResult};
use alloc::vec::Vec;

/// One byte per channel of the image's current color mode, in channel
/// order (see `color::ColorMode::channel_count`).
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SignificantBits(pub Vec<u8>);
impl SignificantBits {
  /// `spec.md` §3: "Present iff any byte non-zero."
  #[inline]
  pub fn is_present(&self) -> bool {
    self.0.iter().any(|&b| b != 0)
  }
}

pub fn parse_sbit(data: &[u8], mode: ColorMode) -> PngResult<SignificantBits> {
  if data.len() != mode.channel_count() {
    return Err(PngError::InvalidLength { chunk_type: *b"sBIT" });
  }
  Ok(SignificantBits(data.to_vec()))
}

pub fn serialize_sbit(sbit: &SignificantBits, mode: ColorMode) -> PngResult<Vec<u8>> {
  if sbit.0.len() != mode.channel_count() {
    return Err(PngError::InvalidFieldValue { chunk_type: *b"sBIT" });
  }
  Ok(sbit.0.clone())
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_for_rgba() {
    let sbit = SignificantBits(alloc::vec![5, 5, 5, 8]);
    let bytes = serialize_sbit(&sbit, ColorMode::RgbAlpha).unwrap();
    assert_eq!(parse_sbit(&bytes, ColorMode::RgbAlpha).unwrap(), sbit);
  }

  #[test]
  fn shape_mismatch_is_rejected() {
    assert_eq!(
      parse_sbit(&[1, 2, 3], ColorMode::Grayscale),
      Err(PngError::InvalidLength { chunk_type: *b"sBIT" })
    );
  }

  #[test]
  fn all_zero_is_not_present() {
    assert!(!SignificantBits(alloc::vec![0, 0, 0]).is_present());
  }
}
