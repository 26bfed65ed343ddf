//! `tIME`: last-modification timestamp.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/time.rs`'s `tIME` struct.

use crate::error::{PngError, PngResult};
use crate::util::{push_u16_be, u16_be};
use alloc::vec::Vec;

pub const TIME_LEN: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Timestamp {
  pub year: u16,
  pub month: u8,
  pub day: u8,
  pub hour: u8,
  pub minute: u8,
  pub second: u8,
}
impl Timestamp {
  /// `spec.md` §3: "Present iff any field non-zero."
  #[inline]
  pub fn is_present(&self) -> bool {
    *self != Self::default()
  }
}

pub fn parse_time(data: &[u8]) -> PngResult<Timestamp> {
  if data.len() != TIME_LEN {
    return Err(PngError::InvalidLength { chunk_type: *b"tIME" });
  }
  Ok(Timestamp {
    year: u16_be(&data[0..2]),
    month: data[2],
    day: data[3],
    hour: data[4],
    minute: data[5],
    second: data[6],
  })
}

pub fn serialize_time(t: &Timestamp) -> Vec<u8> {
  let mut out = Vec::with_capacity(TIME_LEN);
  push_u16_be(&mut out, t.year);
  out.extend_from_slice(&[t.month, t.day, t.hour, t.minute, t.second]);
  out
}
