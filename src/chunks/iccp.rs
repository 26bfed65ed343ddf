//! `iCCP`: a named, DEFLATE-compressed ICC colour profile.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/iccp.rs`'s `iCCP` struct,
//! split here into `name` and `compressed_profile` fields rather than one
//! opaque data slice, since the model needs the name on its own for
//! `Image::icc_profile`.

use crate::error::{PngError, PngResult};
use crate::util::latin1_to_string;
use alloc::string::String;
use alloc::vec::Vec;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IccProfile {
  /// Latin-1, at most 80 bytes.
  pub name: String,
  /// DEFLATE-compressed profile bytes, stored exactly as they appear on the
  /// wire (compression-method byte is always `0`, so it isn't stored).
  pub compressed_profile: Vec<u8>,
}
impl IccProfile {
  /// A profile without a name can never be serialized (`serialize_iccp`
  /// requires a non-empty keyword), so presence is keyed on the name alone.
  #[inline]
  pub fn is_present(&self) -> bool {
    !self.name.is_empty()
  }
}

pub fn parse_iccp(data: &[u8]) -> PngResult<IccProfile> {
  let nul = data.iter().position(|&b| b == 0).ok_or(PngError::InvalidLength { chunk_type: *b"iCCP" })?;
  if nul > 80 {
    return Err(PngError::InvalidFieldValue { chunk_type: *b"iCCP" });
  }
  let name = latin1_to_string(&data[..nul]);
  let rest = &data[nul + 1..];
  let (&compression_method, compressed_profile) =
    rest.split_first().ok_or(PngError::InvalidLength { chunk_type: *b"iCCP" })?;
  if compression_method != 0 {
    return Err(PngError::UnsupportedFeature { what: "iCCP compression method other than 0" });
  }
  Ok(IccProfile { name, compressed_profile: compressed_profile.to_vec() })
}

pub fn serialize_iccp(profile: &IccProfile) -> PngResult<Vec<u8>> {
  if profile.name.len() > 80 || profile.name.is_empty() {
    return Err(PngError::InvalidFieldValue { chunk_type: *b"iCCP" });
  }
  let mut out = Vec::with_capacity(profile.name.len() + 2 + profile.compressed_profile.len());
  out.extend(profile.name.bytes());
  out.push(0);
  out.push(0); // compression method
  out.extend_from_slice(&profile.compressed_profile);
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn round_trips() {
    let profile = IccProfile { name: String::from("sRGB"), compressed_profile: alloc::vec![1, 2, 3, 4] };
    let bytes = serialize_iccp(&profile).unwrap();
    assert_eq!(parse_iccp(&bytes).unwrap(), profile);
  }

  #[test]
  fn missing_nul_is_rejected() {
    assert_eq!(parse_iccp(b"no-terminator"), Err(PngError::InvalidLength { chunk_type: *b"iCCP" }));
  }

  #[test]
  fn nonzero_compression_method_is_unsupported() {
    let mut data = alloc::vec![b'a', 0, 1];
    data.extend_from_slice(&[9, 9]);
    assert!(matches!(parse_iccp(&data), Err(PngError::UnsupportedFeature { .. })));
  }
}
