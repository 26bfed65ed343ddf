//! `tRNS`: transparency, shaped by color mode.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/trns.rs`'s `tRNS` enum
//! `{ Y, RGB, Index }`, collapsed per `SPEC_FULL.md` §3 into a single `Key`
//! variant used as `(k,k,k)` for grayscale and `(r,g,b)` for RGB — on the
//! wire both are always 2-byte samples regardless of bit depth, so the
//! collapse costs nothing.

use crate::color::ColorMode;
use crate::error::{PngError, PngResult};
use crate::util::u16_be;
use alloc::vec::Vec;

/// `spec.md` §3: "Never present for alpha-bearing modes."
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Transparency {
  /// A single key colour at the native bit depth, used as `(k,k,k)` for
  /// grayscale and `(r,g,b)` for RGB.
  Key(u16, u16, u16),
  /// Per-palette-index alpha bytes, for `Indexed`.
  Alphas(Vec<u8>),
}

pub fn parse_trns(data: &[u8], mode: ColorMode) -> PngResult<Transparency> {
  match mode {
    ColorMode::Grayscale => {
      if data.len() != 2 {
        return Err(PngError::InvalidLength { chunk_type: *b"tRNS" });
      }
      let k = u16_be(&data[0..2]);
      Ok(Transparency::Key(k, k, k))
    }
    ColorMode::Rgb => {
      if data.len() != 6 {
        return Err(PngError::InvalidLength { chunk_type: *b"tRNS" });
      }
      Ok(Transparency::Key(u16_be(&data[0..2]), u16_be(&data[2..4]), u16_be(&data[4..6])))
    }
    ColorMode::Indexed => {
      if data.len() > 256 {
        return Err(PngError::InvalidLength { chunk_type: *b"tRNS" });
      }
      Ok(Transparency::Alphas(data.to_vec()))
    }
    ColorMode::GrayscaleAlpha | ColorMode::RgbAlpha => {
      Err(PngError::ChunkOrderViolation { chunk_type: *b"tRNS" })
    }
  }
}

pub fn serialize_trns(trns: &Transparency, mode: ColorMode) -> PngResult<Vec<u8>> {
  match (trns, mode) {
    (Transparency::Key(k, _, _), ColorMode::Grayscale) => Ok(k.to_be_bytes().to_vec()),
    (Transparency::Key(r, g, b), ColorMode::Rgb) => {
      let mut out = Vec::with_capacity(6);
      out.extend_from_slice(&r.to_be_bytes());
      out.extend_from_slice(&g.to_be_bytes());
      out.extend_from_slice(&b.to_be_bytes());
      Ok(out)
    }
    (Transparency::Alphas(bytes), ColorMode::Indexed) => Ok(bytes.clone()),
    _ => Err(PngError::InvalidFieldValue { chunk_type: *b"tRNS" }),
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn grayscale_key_round_trips() {
    let bytes = [0x12, 0x34];
    let t = parse_trns(&bytes, ColorMode::Grayscale).unwrap();
    assert_eq!(t, Transparency::Key(0x1234, 0x1234, 0x1234));
    assert_eq!(serialize_trns(&t, ColorMode::Grayscale).unwrap(), bytes);
  }

  #[test]
  fn rgb_key_round_trips() {
    let bytes = [0, 1, 0, 2, 0, 3];
    let t = parse_trns(&bytes, ColorMode::Rgb).unwrap();
    assert_eq!(t, Transparency::Key(1, 2, 3));
    assert_eq!(serialize_trns(&t, ColorMode::Rgb).unwrap(), bytes);
  }

  #[test]
  fn indexed_alphas_round_trip() {
    let bytes = [255u8, 0, 128];
    let t = parse_trns(&bytes, ColorMode::Indexed).unwrap();
    assert_eq!(t, Transparency::Alphas(alloc::vec![255, 0, 128]));
    assert_eq!(serialize_trns(&t, ColorMode::Indexed).unwrap(), bytes);
  }

  #[test]
  fn alpha_bearing_modes_reject_trns() {
    assert!(parse_trns(&[0, 0], ColorMode::RgbAlpha).is_err());
  }
}
