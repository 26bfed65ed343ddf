//! The color engine: color modes, bit depths, decoded pixel values, and
//! conversions between them.
//!
//! Grounded on the teacher's `PngColorType` tagged enum
//! (`examples/Lokathor-imagine/src/png/ihdr.rs`) and its local
//! `pixel_formats` module (`examples/Lokathor-imagine/src/pixel_formats.rs`),
//! extended here to both of this crate's supported bit depths.

use crate::error::{PngError, PngResult};

/// The five color modes PNG supports in this crate's restricted subset.
///
/// The discriminant IS the on-wire color-type byte, so converting to/from the
/// wire is a plain cast rather than a lookup table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[repr(u8)]
pub enum ColorMode {
  Grayscale = 0,
  Rgb = 2,
  Indexed = 3,
  GrayscaleAlpha = 4,
  RgbAlpha = 6,
}
impl ColorMode {
  /// Number of channels a pixel of this mode carries.
  #[inline]
  pub const fn channel_count(self) -> usize {
    match self {
      Self::Grayscale => 1,
      Self::Rgb => 3,
      Self::Indexed => 1,
      Self::GrayscaleAlpha => 2,
      Self::RgbAlpha => 4,
    }
  }

  #[inline]
  pub const fn has_alpha(self) -> bool {
    matches!(self, Self::GrayscaleAlpha | Self::RgbAlpha)
  }
}
impl TryFrom<u8> for ColorMode {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> PngResult<Self> {
    Ok(match value {
      0 => Self::Grayscale,
      2 => Self::Rgb,
      3 => Self::Indexed,
      4 => Self::GrayscaleAlpha,
      6 => Self::RgbAlpha,
      _ => return Err(PngError::InvalidFieldValue { chunk_type: *b"IHDR" }),
    })
  }
}

/// The bit depths this crate supports (PNG also permits 1, 2, and 4 for
/// grayscale/indexed, which this crate declines to support — see
/// `SPEC_FULL.md` §9(d)).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum BitDepth {
  Eight,
  Sixteen,
}
impl BitDepth {
  #[inline]
  pub const fn as_u8(self) -> u8 {
    match self {
      Self::Eight => 8,
      Self::Sixteen => 16,
    }
  }

  #[inline]
  pub const fn bytes_per_sample(self) -> usize {
    match self {
      Self::Eight => 1,
      Self::Sixteen => 2,
    }
  }

  /// The largest representable sample value at this depth.
  #[inline]
  pub const fn max_sample(self) -> u16 {
    match self {
      Self::Eight => 0xFF,
      Self::Sixteen => 0xFFFF,
    }
  }
}
impl TryFrom<u8> for BitDepth {
  type Error = PngError;
  #[inline]
  fn try_from(value: u8) -> PngResult<Self> {
    match value {
      8 => Ok(Self::Eight),
      16 => Ok(Self::Sixteen),
      _ => Err(PngError::UnsupportedFeature { what: "bit depth other than 8 or 16" }),
    }
  }
}

/// Bytes needed to store one pixel of `mode` at `depth`.
#[inline]
pub const fn bytes_per_pixel(mode: ColorMode, depth: BitDepth) -> usize {
  mode.channel_count() * depth.bytes_per_sample()
}

/// A single decoded pixel value, independent of how it's packed on the wire.
///
/// Every channel is widened to `u16` regardless of the image's actual bit
/// depth; at 8-bit depth the value simply never exceeds `0xFF`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
  Grayscale(u16),
  GrayscaleAlpha { y: u16, a: u16 },
  Rgb { r: u16, g: u16, b: u16 },
  RgbAlpha { r: u16, g: u16, b: u16, a: u16 },
  /// A palette index. Always 8-bit, regardless of the image's bit depth.
  Indexed(u8),
}
impl Color {
  #[inline]
  pub const fn mode(self) -> ColorMode {
    match self {
      Self::Grayscale(_) => ColorMode::Grayscale,
      Self::GrayscaleAlpha { .. } => ColorMode::GrayscaleAlpha,
      Self::Rgb { .. } => ColorMode::Rgb,
      Self::RgbAlpha { .. } => ColorMode::RgbAlpha,
      Self::Indexed(_) => ColorMode::Indexed,
    }
  }
}

/// Widens an 8-bit sample to 16 bits by doubling the channel
/// (`spec.md` §4.6: `v16 = (v8 << 8) | v8`).
#[inline]
pub const fn widen_sample(v8: u8) -> u16 {
  (v8 as u16) << 8 | (v8 as u16)
}

/// Narrows a 16-bit sample to 8 bits by taking the high byte. This is the
/// corrected truncation from `spec.md` §9(c) — the reference's `v & 0xFF`
/// (low byte) is wrong.
#[inline]
pub const fn narrow_sample(v16: u16) -> u8 {
  (v16 >> 8) as u8
}

/// Decodes one pixel's worth of bytes (`bytes_per_pixel(mode, depth)` long)
/// into a [`Color`].
pub fn decode_pixel(mode: ColorMode, depth: BitDepth, bytes: &[u8]) -> Color {
  let sample = |i: usize| -> u16 {
    match depth {
      BitDepth::Eight => u16::from(bytes[i]),
      BitDepth::Sixteen => u16::from_be_bytes([bytes[i * 2], bytes[i * 2 + 1]]),
    }
  };
  match mode {
    ColorMode::Grayscale => Color::Grayscale(sample(0)),
    ColorMode::GrayscaleAlpha => Color::GrayscaleAlpha { y: sample(0), a: sample(1) },
    ColorMode::Rgb => Color::Rgb { r: sample(0), g: sample(1), b: sample(2) },
    ColorMode::RgbAlpha => {
      Color::RgbAlpha { r: sample(0), g: sample(1), b: sample(2), a: sample(3) }
    }
    ColorMode::Indexed => Color::Indexed(bytes[0]),
  }
}

/// Encodes a [`Color`] into `out` (which must be exactly
/// `bytes_per_pixel(mode, depth)` long), converting it to `mode` first if
/// it isn't already in that mode.
pub fn encode_pixel(mode: ColorMode, depth: BitDepth, color: Color, out: &mut [u8]) -> PngResult<()> {
  let color = convert_color(mode, color)?;
  let mut put = |i: usize, v: u16| match depth {
    BitDepth::Eight => out[i] = v as u8,
    BitDepth::Sixteen => {
      let [hi, lo] = v.to_be_bytes();
      out[i * 2] = hi;
      out[i * 2 + 1] = lo;
    }
  };
  match color {
    Color::Grayscale(y) => put(0, y),
    Color::GrayscaleAlpha { y, a } => {
      put(0, y);
      put(1, a);
    }
    Color::Rgb { r, g, b } => {
      put(0, r);
      put(1, g);
      put(2, b);
    }
    Color::RgbAlpha { r, g, b, a } => {
      put(0, r);
      put(1, g);
      put(2, b);
      put(3, a);
    }
    Color::Indexed(i) => out[0] = i,
  }
  Ok(())
}

/// Converts `color` to the given `mode`.
///
/// * Greyscale derivation from RGB is a simple average in the channel's own
///   depth domain (`spec.md` §4.6: `Y = (R+G+B)/3`).
/// * RGB derivation from grey replicates the single channel.
/// * Alpha is preserved across conversions that keep it, and defaults to
///   fully opaque (the depth's maximum sample) when the target mode has
///   alpha but the source doesn't.
/// * Converting *to* `Indexed` has no general algorithm (it would require
///   choosing or building a palette) and is not required by the core, so it
///   fails with [`PngError::UnsupportedConversion`] — a non-goal per
///   `spec.md` §4.6.
/// * Converting *from* `Indexed` is the caller's responsibility: an index
///   must first be resolved against the image's palette into an RGB(A)
///   color (see `Image::set_color_mode`), since this function has no
///   palette to consult. Calling this with an `Indexed` source and a
///   non-`Indexed` target therefore fails with `UnsupportedConversion`
///   rather than silently treating the index as a channel value.
pub fn convert_color(mode: ColorMode, color: Color) -> PngResult<Color> {
  if color.mode() == mode {
    return Ok(color);
  }
  if matches!(color, Color::Indexed(_)) {
    return Err(PngError::UnsupportedConversion);
  }
  let max = u16::MAX; // opaque default; callers at a known depth clamp via encode_pixel
  Ok(match mode {
    ColorMode::Grayscale => Color::Grayscale(gray_of(color)),
    ColorMode::GrayscaleAlpha => Color::GrayscaleAlpha { y: gray_of(color), a: alpha_of(color, max) },
    ColorMode::Rgb => {
      let (r, g, b) = rgb_of(color);
      Color::Rgb { r, g, b }
    }
    ColorMode::RgbAlpha => {
      let (r, g, b) = rgb_of(color);
      Color::RgbAlpha { r, g, b, a: alpha_of(color, max) }
    }
    ColorMode::Indexed => return Err(PngError::UnsupportedConversion),
  })
}

/// Callers must have already ruled out `Color::Indexed` (see
/// `convert_color`).
fn gray_of(color: Color) -> u16 {
  match color {
    Color::Grayscale(y) | Color::GrayscaleAlpha { y, .. } => y,
    Color::Rgb { r, g, b } | Color::RgbAlpha { r, g, b, .. } => {
      ((u32::from(r) + u32::from(g) + u32::from(b)) / 3) as u16
    }
    Color::Indexed(_) => unreachable!("convert_color rejects Indexed sources before calling gray_of"),
  }
}

/// Callers must have already ruled out `Color::Indexed` (see
/// `convert_color`).
fn rgb_of(color: Color) -> (u16, u16, u16) {
  match color {
    Color::Rgb { r, g, b } | Color::RgbAlpha { r, g, b, .. } => (r, g, b),
    Color::Grayscale(y) | Color::GrayscaleAlpha { y, .. } => (y, y, y),
    Color::Indexed(_) => unreachable!("convert_color rejects Indexed sources before calling rgb_of"),
  }
}

fn alpha_of(color: Color, default_opaque: u16) -> u16 {
  match color {
    Color::GrayscaleAlpha { a, .. } | Color::RgbAlpha { a, .. } => a,
    _ => default_opaque,
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn wire_discriminants_match_color_type_byte() {
    assert_eq!(ColorMode::Grayscale as u8, 0);
    assert_eq!(ColorMode::Rgb as u8, 2);
    assert_eq!(ColorMode::Indexed as u8, 3);
    assert_eq!(ColorMode::GrayscaleAlpha as u8, 4);
    assert_eq!(ColorMode::RgbAlpha as u8, 6);
  }

  #[test]
  fn rgb8_pixel_round_trips() {
    let c = Color::Rgb { r: 0xFF, g: 0x01, b: 0x01 };
    let mut buf = [0u8; 3];
    encode_pixel(ColorMode::Rgb, BitDepth::Eight, c, &mut buf).unwrap();
    assert_eq!(buf, [0xFF, 0x01, 0x01]);
    assert_eq!(decode_pixel(ColorMode::Rgb, BitDepth::Eight, &buf), c);
  }

  #[test]
  fn rgba16_pixel_round_trips() {
    let c = Color::RgbAlpha { r: 0x1234, g: 0x5678, b: 0x9abc, a: 0xdef0 };
    let mut buf = [0u8; 8];
    encode_pixel(ColorMode::RgbAlpha, BitDepth::Sixteen, c, &mut buf).unwrap();
    assert_eq!(buf, [0x12, 0x34, 0x56, 0x78, 0x9a, 0xbc, 0xde, 0xf0]);
    assert_eq!(decode_pixel(ColorMode::RgbAlpha, BitDepth::Sixteen, &buf), c);
  }

  #[test]
  fn grayscale_derives_from_rgb_by_average() {
    let c = Color::Rgb { r: 9, g: 9, b: 9 };
    assert_eq!(convert_color(ColorMode::Grayscale, c).unwrap(), Color::Grayscale(9));
  }

  #[test]
  fn converting_to_indexed_is_unsupported() {
    let c = Color::Rgb { r: 1, g: 2, b: 3 };
    assert_eq!(convert_color(ColorMode::Indexed, c), Err(PngError::UnsupportedConversion));
  }

  #[test]
  fn widen_then_narrow_recovers_original_byte() {
    for v in 0..=255u8 {
      assert_eq!(narrow_sample(widen_sample(v)), v);
    }
  }
}
