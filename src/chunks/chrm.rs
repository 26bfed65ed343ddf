//! `cHRM`: white point and primary chromaticities, each scaled by 1e5.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/chrm.rs`'s `cHRM` struct.

use crate::error::{PngError, PngResult};
use crate::util::{push_u32_be, u32_be};
use alloc::vec::Vec;

pub const CHRM_LEN: usize = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Chromaticity {
  pub white_x: u32,
  pub white_y: u32,
  pub red_x: u32,
  pub red_y: u32,
  pub green_x: u32,
  pub green_y: u32,
  pub blue_x: u32,
  pub blue_y: u32,
}
impl Chromaticity {
  /// `spec.md` §3: "Present iff any value is non-zero."
  #[inline]
  pub fn is_present(&self) -> bool {
    *self != Self::default()
  }
}

pub fn parse_chrm(data: &[u8]) -> PngResult<Chromaticity> {
  if data.len() != CHRM_LEN {
    return Err(PngError::InvalidLength { chunk_type: *b"cHRM" });
  }
  let field = |i: usize| u32_be(&data[i * 4..i * 4 + 4]);
  Ok(Chromaticity {
    white_x: field(0),
    white_y: field(1),
    red_x: field(2),
    red_y: field(3),
    green_x: field(4),
    green_y: field(5),
    blue_x: field(6),
    blue_y: field(7),
  })
}

pub fn serialize_chrm(c: &Chromaticity) -> Vec<u8> {
  let mut out = Vec::with_capacity(CHRM_LEN);
  for v in [c.white_x, c.white_y, c.red_x, c.red_y, c.green_x, c.green_y, c.blue_x, c.blue_y] {
    push_u32_be(&mut out, v);
  }
  out
}
