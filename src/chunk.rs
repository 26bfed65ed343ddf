//! The chunk codec (L2): reading and writing the framed
//! `length | type | data | crc` units a PNG is built from.
//!
//! Read side grounded on
//! `examples/Lokathor-imagine/src/png/raw_chunk.rs` (`PngRawChunk`,
//! `PngRawChunkIter`). The write side has no teacher counterpart (the
//! teacher is decode-only) and is new code in the same field layout,
//! written in reverse.

use crate::ascii_array::AsciiArray;
use crate::crc32::png_crc;
use crate::error::{PngError, PngResult};
use crate::util::{push_u32_be, u32_be};
use alloc::vec::Vec;

/// An unparsed chunk borrowed straight out of the PNG byte stream.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct RawChunk<'b> {
  pub chunk_type: [u8; 4],
  pub data: &'b [u8],
  pub declared_crc: u32,
}
impl core::fmt::Debug for RawChunk<'_> {
  fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
    f.debug_struct("RawChunk")
      .field("chunk_type", &AsciiArray(self.chunk_type))
      .field("data_len", &self.data.len())
      .field("declared_crc", &self.declared_crc)
      .finish()
  }
}
impl<'b> RawChunk<'b> {
  /// Whether this chunk's type is critical (first letter uppercase).
  #[inline]
  pub const fn is_critical(&self) -> bool {
    self.chunk_type[0].is_ascii_uppercase()
  }

  /// Recomputes the CRC over `type ∥ data` and compares it against
  /// `declared_crc`, per `spec.md` §4.3.
  #[inline]
  pub fn verify_crc(&self) -> bool {
    let actual = png_crc(self.chunk_type.iter().copied().chain(self.data.iter().copied()));
    actual == self.declared_crc
  }
}

/// Iterates the raw chunks of a PNG byte stream, in order.
///
/// `RawChunkIter::new` does not check the PNG signature; callers must strip
/// it (and validate it) first — see `Image::open`.
#[derive(Clone)]
pub struct RawChunkIter<'b> {
  rest: &'b [u8],
}
impl<'b> RawChunkIter<'b> {
  #[inline]
  pub const fn new(bytes_after_signature: &'b [u8]) -> Self {
    Self { rest: bytes_after_signature }
  }

  /// Bytes not yet consumed. Used by callers (see `Image::open`) to turn a
  /// chunk's position in the iteration into a byte offset for error
  /// reporting.
  #[inline]
  pub(crate) fn remaining_len(&self) -> usize {
    self.rest.len()
  }
}
impl<'b> Iterator for RawChunkIter<'b> {
  type Item = RawChunk<'b>;
  fn next(&mut self) -> Option<Self::Item> {
    let (len, rest) = crate::util::try_pull_byte_array::<4>(self.rest)?;
    let length = u32_be(&len) as usize;
    let (chunk_ty, rest) = crate::util::try_pull_byte_array::<4>(rest)?;
    if rest.len() < length {
      self.rest = &[];
      return None;
    }
    let (data, rest) = rest.split_at(length);
    let (crc_bytes, rest) = crate::util::try_pull_byte_array::<4>(rest)?;
    self.rest = rest;
    Some(RawChunk { chunk_type: chunk_ty, data, declared_crc: u32_be(&crc_bytes) })
  }
}

/// Writes one chunk (`length | type | data | crc`) to `out`, computing a
/// fresh CRC over `type ∥ data`.
pub fn write_chunk(out: &mut Vec<u8>, chunk_type: &[u8; 4], data: &[u8]) {
  push_u32_be(out, data.len() as u32);
  out.extend_from_slice(chunk_type);
  out.extend_from_slice(data);
  let crc = png_crc(chunk_type.iter().copied().chain(data.iter().copied()));
  push_u32_be(out, crc);
}

/// Returns `Ok(())` if `raw`'s declared CRC matches its recomputed CRC,
/// otherwise a [`PngError::CorruptChunk`] naming `offset`.
pub fn verify_chunk_crc(raw: &RawChunk<'_>, offset: usize) -> PngResult<()> {
  if raw.verify_crc() {
    Ok(())
  } else {
    Err(PngError::CorruptChunk { chunk_type: raw.chunk_type, offset })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn write_then_iter_round_trips() {
    let mut buf = Vec::new();
    write_chunk(&mut buf, b"tEXt", b"hello");
    write_chunk(&mut buf, b"IEND", b"");
    let mut it = RawChunkIter::new(&buf);
    let first = it.next().unwrap();
    assert_eq!(&first.chunk_type, b"tEXt");
    assert_eq!(first.data, b"hello");
    assert!(first.verify_crc());
    let second = it.next().unwrap();
    assert_eq!(&second.chunk_type, b"IEND");
    assert!(second.data.is_empty());
    assert!(it.next().is_none());
  }

  #[test]
  fn flipped_crc_bit_fails_verification() {
    let mut buf = Vec::new();
    write_chunk(&mut buf, b"IHDR", &[0u8; 13]);
    *buf.last_mut().unwrap() ^= 0x01;
    let raw = RawChunkIter::new(&buf).next().unwrap();
    assert!(!raw.verify_crc());
  }

  #[test]
  fn critical_vs_ancillary_is_by_case_of_first_letter() {
    let mut buf = Vec::new();
    write_chunk(&mut buf, b"IHDR", &[0u8; 13]);
    write_chunk(&mut buf, b"tEXt", b"k\0v");
    let mut it = RawChunkIter::new(&buf);
    assert!(it.next().unwrap().is_critical());
    assert!(!it.next().unwrap().is_critical());
  }

  #[test]
  fn iterator_never_panics_on_random_bytes() {
    // even truncated/garbage input should just stop yielding, never panic.
    let mut buf = vec![5u8; 3];
    buf.extend_from_slice(b"IHDR");
    buf.extend_from_slice(&[0xFFu8; 2]);
    for _ in RawChunkIter::new(&buf) {
      // draining is the whole test
    }
  }
}
