//! `gAMA`: image gamma, scaled by 1e5.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/gama.rs`.

use crate::error::{PngError, PngResult};
use crate::util::u32_be;
use alloc::vec::Vec;

pub const GAMA_LEN: usize = 4;

pub fn parse_gama(data: &[u8]) -> PngResult<u32> {
  if data.len() != GAMA_LEN {
    return Err(PngError::InvalidLength { chunk_type: *b"gAMA" });
  }
  Ok(u32_be(data))
}

pub fn serialize_gama(gamma: u32) -> Vec<u8> {
  gamma.to_be_bytes().to_vec()
}
