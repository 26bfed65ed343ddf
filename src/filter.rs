//! The filter/scanline engine: converts between a packed pixel grid and the
//! filtered scanline stream DEFLATE actually compresses.
//!
//! The per-byte reconstruction math is ported from the teacher's
//! `examples/Lokathor-imagine/src/filtering.rs`. Filter type 4 (Paeth) is
//! implemented here even though the teacher's higher-level `unfilter_image`
//! in `png/mod.rs` didn't wire it up — see `SPEC_FULL.md` §9(a).

use crate::error::{PngError, PngResult};
use alloc::vec;
use alloc::vec::Vec;

#[inline]
const fn reconstruct_sub(fx: u8, ra: u8) -> u8 {
  fx.wrapping_add(ra)
}

#[inline]
const fn reconstruct_up(fx: u8, rb: u8) -> u8 {
  fx.wrapping_add(rb)
}

#[inline]
const fn reconstruct_average(fx: u8, ra: u8, rb: u8) -> u8 {
  fx.wrapping_add(((ra as u32 + rb as u32) / 2) as u8)
}

#[inline]
const fn reconstruct_paeth(fx: u8, ra: u8, rb: u8, rc: u8) -> u8 {
  fx.wrapping_add(paeth_predictor(ra, rb, rc))
}

/// The Paeth predictor: picks whichever of the left (`a`), above (`b`), or
/// upper-left (`c`) neighbor is closest to `a + b - c`.
///
/// The PNG spec requires this exact order of comparisons; don't reorder it.
const fn paeth_predictor(a: u8, b: u8, c: u8) -> u8 {
  let a = a as i32;
  let b = b as i32;
  let c = c as i32;
  let p = a.wrapping_add(b).wrapping_sub(c);
  let pa = p.wrapping_sub(a).wrapping_abs();
  let pb = p.wrapping_sub(b).wrapping_abs();
  let pc = p.wrapping_sub(c).wrapping_abs();
  if pa <= pb && pa <= pc {
    a as u8
  } else if pb <= pc {
    b as u8
  } else {
    c as u8
  }
}

/// Reconstructs the packed, unfiltered pixel grid from a filtered scanline
/// stream (`filter-byte ∥ pixel-bytes`, one per row).
///
/// `bpp` is the bytes-per-pixel for the image's current color mode and bit
/// depth; offsets `a`/`c` look back by `bpp` bytes within the row, per
/// `spec.md` §4.5.
pub fn unfilter_scanlines(filtered: &[u8], width: usize, height: usize, bpp: usize) -> PngResult<Vec<u8>> {
  let row_bytes = width * bpp;
  let stride = row_bytes + 1;
  if filtered.len() != stride * height {
    return Err(PngError::InvalidLength { chunk_type: *b"IDAT" });
  }
  let mut out = vec![0u8; row_bytes * height];
  for y in 0..height {
    let filter_ty = filtered[y * stride];
    let row_start = y * row_bytes;
    let prev_start = row_start.wrapping_sub(row_bytes);
    for i in 0..row_bytes {
      let raw = filtered[y * stride + 1 + i];
      let a = if i >= bpp { out[row_start + i - bpp] } else { 0 };
      let b = if y > 0 { out[prev_start + i] } else { 0 };
      let c = if y > 0 && i >= bpp { out[prev_start + i - bpp] } else { 0 };
      out[row_start + i] = match filter_ty {
        0 => raw,
        1 => reconstruct_sub(raw, a),
        2 => reconstruct_up(raw, b),
        3 => reconstruct_average(raw, a, b),
        4 => reconstruct_paeth(raw, a, b, c),
        _ => return Err(PngError::InvalidFieldValue { chunk_type: *b"IDAT" }),
      };
    }
  }
  Ok(out)
}

/// Converts a packed pixel grid into a filtered scanline stream.
///
/// This implementation always writes filter type 0 (None) — adaptive filter
/// selection is a non-goal (`spec.md` §4.5).
pub fn filter_scanlines(pixels: &[u8], width: usize, height: usize, bpp: usize) -> Vec<u8> {
  let row_bytes = width * bpp;
  let stride = row_bytes + 1;
  let mut out = vec![0u8; stride * height];
  for y in 0..height {
    out[y * stride] = 0;
    out[y * stride + 1..y * stride + 1 + row_bytes]
      .copy_from_slice(&pixels[y * row_bytes..y * row_bytes + row_bytes]);
  }
  out
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn sub_filter_reconstructs_by_spec_scenario_6() {
    // spec.md §8 scenario 6: 3x1 RGB8 row, filter=1 (Sub).
    let a = 10u8;
    let b = 20u8;
    let c = 30u8;
    let d = 1u8;
    let e = 2u8;
    let f = 3u8;
    let g = 4u8;
    let h = 5u8;
    let i = 6u8;
    let filtered = vec![1, a, b, c, d, e, f, g, h, i];
    let out = unfilter_scanlines(&filtered, 3, 1, 3).unwrap();
    assert_eq!(
      out,
      vec![
        a,
        b,
        c,
        a.wrapping_add(d),
        b.wrapping_add(e),
        c.wrapping_add(f),
        a.wrapping_add(d).wrapping_add(g),
        b.wrapping_add(e).wrapping_add(h),
        c.wrapping_add(f).wrapping_add(i),
      ]
    );
  }

  #[test]
  fn filter_then_unfilter_round_trips() {
    let width = 4;
    let height = 3;
    let bpp = 4;
    let pixels: Vec<u8> = (0..(width * height * bpp) as u32).map(|n| n as u8).collect();
    let filtered = filter_scanlines(&pixels, width, height, bpp);
    let recovered = unfilter_scanlines(&filtered, width, height, bpp).unwrap();
    assert_eq!(recovered, pixels);
  }

  #[test]
  fn up_filter_has_no_effect_on_first_row() {
    let filtered = vec![2u8, 5, 6, 7];
    let out = unfilter_scanlines(&filtered, 1, 1, 3).unwrap();
    assert_eq!(out, vec![5, 6, 7]);
  }

  #[test]
  fn paeth_filter_round_trips_through_multiple_rows() {
    let width = 2;
    let height = 2;
    let bpp = 1;
    let pixels = vec![10u8, 20, 30, 40];
    let filtered = filter_scanlines(&pixels, width, height, bpp);
    // Force row 1 to use the Paeth filter by hand so we exercise filter type 4.
    let mut filtered = filtered;
    let row_bytes = width * bpp;
    let stride = row_bytes + 1;
    filtered[stride] = 4;
    for i in 0..row_bytes {
      let a = if i >= bpp { pixels[row_bytes + i - bpp] } else { 0 };
      let b = pixels[i];
      let c = if i >= bpp { pixels[i - bpp] } else { 0 };
      let predicted = paeth_predictor(a, b, c);
      filtered[stride + 1 + i] = pixels[row_bytes + i].wrapping_sub(predicted);
    }
    let recovered = unfilter_scanlines(&filtered, width, height, bpp).unwrap();
    assert_eq!(recovered, pixels);
  }
}
