//! Endianness-safe reads and writes.
//!
//! The PNG wire format is big-endian throughout, regardless of host byte
//! order, so every multi-byte field crossing the chunk-codec boundary goes
//! through here.

#![allow(dead_code)]

/// Pulls an `N`-byte array off the front of `bytes`, returning the array and
/// the remaining tail.
#[inline]
pub(crate) fn try_pull_byte_array<const N: usize>(bytes: &[u8]) -> Option<([u8; N], &[u8])> {
  if bytes.len() >= N {
    let (head, tail) = bytes.split_at(N);
    Some((head.try_into().unwrap(), tail))
  } else {
    None
  }
}

#[inline]
#[must_use]
pub(crate) fn u16_be(bytes: &[u8]) -> u16 {
  u16::from_be_bytes(bytes.try_into().unwrap())
}

#[inline]
#[must_use]
pub(crate) fn u32_be(bytes: &[u8]) -> u32 {
  u32::from_be_bytes(bytes.try_into().unwrap())
}

#[inline]
pub(crate) fn push_u16_be(out: &mut alloc::vec::Vec<u8>, v: u16) {
  out.extend_from_slice(&v.to_be_bytes());
}

#[inline]
pub(crate) fn push_u32_be(out: &mut alloc::vec::Vec<u8>, v: u32) {
  out.extend_from_slice(&v.to_be_bytes());
}

/// Interprets each byte as one Latin-1 code point, widening it straight
/// into the matching Unicode scalar (Latin-1 is a subset of Unicode's first
/// 256 code points).
#[inline]
pub(crate) fn latin1_to_string(bytes: &[u8]) -> alloc::string::String {
  bytes.iter().map(|&b| b as char).collect()
}

/// Inverse of [`latin1_to_string`]. Characters outside `0..=0xFF` have no
/// Latin-1 representation and are replaced with `?`.
#[inline]
pub(crate) fn string_to_latin1(s: &str) -> alloc::vec::Vec<u8> {
  s.chars().map(|c| if (c as u32) <= 0xFF { c as u8 } else { b'?' }).collect()
}
