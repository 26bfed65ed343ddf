//! `PLTE`: the color palette, up to 256 RGB8 triples.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/plte.rs`'s `PLTE<'b> {
//! entries: &'b [[u8; 3]] }`, made owning since the image model keeps the
//! palette around for the life of the `Image`, not just for one parse pass.

use crate::color::ColorMode;
use crate::error::{PngError, PngResult};
use alloc::vec::Vec;

pub const MAX_ENTRIES: usize = 256;

/// An ordered sequence of up to 256 RGB8 triples.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Palette(pub Vec<[u8; 3]>);
impl Palette {
  /// `PLTE` is mandatory for `Indexed` and optional colour-hinting
  /// otherwise (`spec.md` §3).
  #[inline]
  pub const fn is_required_for(mode: ColorMode) -> bool {
    matches!(mode, ColorMode::Indexed)
  }
}

pub fn parse_plte(data: &[u8]) -> PngResult<Palette> {
  if data.len() > MAX_ENTRIES * 3 {
    return Err(PngError::InvalidLength { chunk_type: *b"PLTE" });
  }
  let entries: &[[u8; 3]] =
    bytemuck::try_cast_slice(data).map_err(|_| PngError::InvalidLength { chunk_type: *b"PLTE" })?;
  Ok(Palette(entries.to_vec()))
}

pub fn serialize_plte(palette: &Palette) -> PngResult<Vec<u8>> {
  if palette.0.len() > MAX_ENTRIES {
    return Err(PngError::PaletteTooLarge);
  }
  let mut out = Vec::with_capacity(palette.0.len() * 3);
  for [r, g, b] in palette.0.iter().copied() {
    out.extend_from_slice(&[r, g, b]);
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips_a_small_palette() {
    let palette = Palette(alloc::vec![[1, 2, 3], [4, 5, 6]]);
    let bytes = serialize_plte(&palette).unwrap();
    assert_eq!(parse_plte(&bytes).unwrap(), palette);
  }

  #[test]
  fn rejects_length_not_divisible_by_three() {
    assert_eq!(parse_plte(&[1, 2]), Err(PngError::InvalidLength { chunk_type: *b"PLTE" }));
  }

  #[test]
  fn rejects_more_than_256_entries_on_write() {
    let palette = Palette(alloc::vec![[0, 0, 0]; 257]);
    assert_eq!(serialize_plte(&palette), Err(PngError::PaletteTooLarge));
  }

  #[test]
  fn indexed_requires_a_palette_but_truecolor_does_not() {
    assert!(Palette::is_required_for(ColorMode::Indexed));
    assert!(!Palette::is_required_for(ColorMode::Rgb));
  }
}
