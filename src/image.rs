//! The image model (L6) and public façade (L7): the editable PNG in
//! memory, and the load/save orchestration that turns it into/from bytes.
//!
//! Orchestration grounded on `examples/Lokathor-imagine/src/png/mod.rs`'s
//! decompress-then-unfilter load pipeline; the owned-buffer aggregate shape
//! is grounded on `src/alloc_bitmap.rs`'s `Bitmap` (bounds-checked
//! `get`/`set`, dimensions stored alongside the buffer). The save side has
//! no teacher counterpart (the teacher is decode-only) and is new code
//! written in the same chunk-by-chunk emission style as the loader reads.

use crate::chunk::{verify_chunk_crc, write_chunk, RawChunkIter};
use crate::chunks::ihdr::{parse_ihdr, serialize_ihdr, Header};
use crate::chunks::{
  chrm::{parse_chrm, serialize_chrm, Chromaticity},
  gama::{parse_gama, serialize_gama},
  iccp::{parse_iccp, serialize_iccp, IccProfile},
  plte::{parse_plte, serialize_plte, Palette},
  sbit::{parse_sbit, serialize_sbit, SignificantBits},
  srgb::{parse_srgb, serialize_srgb, SrgbIntent},
  text::{parse_itxt, parse_text, parse_ztxt, serialize_itxt, serialize_text, serialize_ztxt, TextEntry},
  time::{parse_time, serialize_time, Timestamp},
  trns::{parse_trns, serialize_trns, Transparency},
};
use crate::color::{bytes_per_pixel, decode_pixel, encode_pixel, BitDepth, Color, ColorMode};
use crate::compress::{deflate, inflate, CompressionLevel};
use crate::error::{PngError, PngResult};
use crate::filter::{filter_scanlines, unfilter_scanlines};
use crate::trace;
use crate::PNG_SIGNATURE;
use alloc::string::String;
use alloc::vec;
use alloc::vec::Vec;

/// The editable in-memory PNG: header state, ancillary metadata, and a
/// packed, unfiltered pixel grid. See `SPEC_FULL.md` §3 for the full data
/// model this realizes.
#[derive(Debug, Clone, PartialEq)]
pub struct Image {
  header: Header,
  palette: Palette,
  transparency: Option<Transparency>,
  chromaticity: Option<Chromaticity>,
  gamma: Option<u32>,
  icc_profile: Option<IccProfile>,
  sbit: Option<SignificantBits>,
  srgb_intent: Option<SrgbIntent>,
  text: Vec<(String, TextEntry)>,
  timestamp: Option<Timestamp>,
  pixels: Vec<u8>,
}

impl Image {
  /// Creates a new image of the given mode and dimensions, with a
  /// zero-initialised pixel buffer. `spec.md` §4.7/§6: `InvalidDimensions`
  /// if either `w` or `h` is zero.
  pub fn create(mode: ColorMode, width: u32, height: u32) -> PngResult<Self> {
    if width == 0 || height == 0 {
      return Err(PngError::InvalidDimensions);
    }
    let header = Header { width, height, bit_depth: BitDepth::Eight, color_mode: mode };
    let pixels = vec![0u8; header.pixel_buffer_len()];
    Ok(Self {
      header,
      palette: Palette::default(),
      transparency: None,
      chromaticity: None,
      gamma: None,
      icc_profile: None,
      sbit: None,
      srgb_intent: None,
      text: Vec::new(),
      timestamp: None,
      pixels,
    })
  }

  /// Parses a complete PNG byte stream into an image. All-or-nothing:
  /// any structural violation aborts with a specific error and no partial
  /// image is returned (`spec.md` §4.8).
  pub fn open(bytes: &[u8]) -> PngResult<Self> {
    let rest = bytes.strip_prefix(&PNG_SIGNATURE[..]).ok_or(PngError::BadMagic)?;

    let mut header: Option<Header> = None;
    let mut palette = Palette::default();
    let mut transparency = None;
    let mut chromaticity = None;
    let mut gamma = None;
    let mut icc_profile = None;
    let mut sbit = None;
    let mut srgb_intent = None;
    let mut text: Vec<(String, TextEntry)> = Vec::new();
    let mut timestamp = None;
    let mut idat = Vec::new();
    let mut seen_idat = false;
    let mut seen_iend = false;

    let mut iter = RawChunkIter::new(rest);
    let total_len = rest.len();
    loop {
      let before = iter.remaining_len();
      let Some(raw) = iter.next() else { break };
      let offset = 8 + (total_len - before);
      verify_chunk_crc(&raw, offset)?;

      match &raw.chunk_type {
        b"IHDR" => {
          if header.is_some() {
            return Err(PngError::ChunkOrderViolation { chunk_type: *b"IHDR" });
          }
          header = Some(parse_ihdr(raw.data)?);
        }
        other => {
          let Some(h) = header else {
            return Err(PngError::ChunkOrderViolation { chunk_type: *other });
          };
          match other {
            b"PLTE" => {
              if seen_idat {
                return Err(PngError::ChunkOrderViolation { chunk_type: *b"PLTE" });
              }
              palette = parse_plte(raw.data)?;
            }
            b"tRNS" => {
              if seen_idat {
                return Err(PngError::ChunkOrderViolation { chunk_type: *b"tRNS" });
              }
              transparency = Some(parse_trns(raw.data, h.color_mode)?);
            }
            b"cHRM" => {
              if seen_idat {
                return Err(PngError::ChunkOrderViolation { chunk_type: *b"cHRM" });
              }
              chromaticity = Some(parse_chrm(raw.data)?);
            }
            b"gAMA" => {
              if seen_idat {
                return Err(PngError::ChunkOrderViolation { chunk_type: *b"gAMA" });
              }
              gamma = Some(parse_gama(raw.data)?);
            }
            b"iCCP" => {
              if seen_idat {
                return Err(PngError::ChunkOrderViolation { chunk_type: *b"iCCP" });
              }
              icc_profile = Some(parse_iccp(raw.data)?);
            }
            b"sBIT" => {
              if seen_idat {
                return Err(PngError::ChunkOrderViolation { chunk_type: *b"sBIT" });
              }
              sbit = Some(parse_sbit(raw.data, h.color_mode)?);
            }
            b"sRGB" => {
              if seen_idat {
                return Err(PngError::ChunkOrderViolation { chunk_type: *b"sRGB" });
              }
              srgb_intent = Some(parse_srgb(raw.data)?);
            }
            b"tIME" => {
              timestamp = Some(parse_time(raw.data)?);
            }
            b"tEXt" => {
              let (keyword, entry) = parse_text(raw.data)?;
              upsert_text(&mut text, keyword, entry);
            }
            b"zTXt" => {
              let (keyword, entry) = parse_ztxt(raw.data)?;
              upsert_text(&mut text, keyword, entry);
            }
            b"iTXt" => {
              let (keyword, entry) = parse_itxt(raw.data)?;
              upsert_text(&mut text, keyword, entry);
            }
            b"IDAT" => {
              seen_idat = true;
              idat.extend_from_slice(raw.data);
            }
            b"IEND" => {
              seen_iend = true;
              break;
            }
            unknown => {
              if unknown[0].is_ascii_uppercase() {
                trace!("unknown critical chunk {:?}", core::str::from_utf8(unknown));
                return Err(PngError::UnknownCriticalChunk { chunk_type: *unknown });
              }
              trace!("skipping unknown ancillary chunk {:?}", core::str::from_utf8(unknown));
            }
          }
        }
      }
    }

    let header = header.ok_or(PngError::ChunkOrderViolation { chunk_type: *b"IHDR" })?;
    if !seen_iend {
      return Err(PngError::InvalidLength { chunk_type: *b"IEND" });
    }
    if header.color_mode == ColorMode::Indexed && palette.0.is_empty() {
      return Err(PngError::InvalidFieldValue { chunk_type: *b"PLTE" });
    }

    let inflated = inflate(&idat)?;
    let bpp = header.bytes_per_pixel();
    let pixels = unfilter_scanlines(&inflated, header.width as usize, header.height as usize, bpp)?;
    if pixels.len() != header.pixel_buffer_len() {
      return Err(PngError::InvalidLength { chunk_type: *b"IDAT" });
    }

    Ok(Self {
      header,
      palette,
      transparency,
      chromaticity,
      gamma,
      icc_profile,
      sbit,
      srgb_intent,
      text,
      timestamp,
      pixels,
    })
  }

  /// Reads a whole file and parses it as a PNG.
  #[cfg(feature = "std")]
  pub fn open_path(path: impl AsRef<std::path::Path>) -> PngResult<Self> {
    let bytes = std::fs::read(path)?;
    Self::open(&bytes)
  }

  /// Serialises the image to a PNG byte stream (`spec.md` §4.7 Save).
  pub fn to_bytes(&self) -> PngResult<Vec<u8>> {
    let mut out = Vec::new();
    out.extend_from_slice(&PNG_SIGNATURE);
    write_chunk(&mut out, b"IHDR", &serialize_ihdr(&self.header));

    if let Some(c) = &self.chromaticity {
      if c.is_present() {
        write_chunk(&mut out, b"cHRM", &serialize_chrm(c));
      }
    }
    if let Some(g) = self.gamma {
      if g != 0 {
        write_chunk(&mut out, b"gAMA", &serialize_gama(g));
      }
    }
    if let Some(profile) = &self.icc_profile {
      if profile.is_present() {
        write_chunk(&mut out, b"iCCP", &serialize_iccp(profile)?);
      }
    }
    if let Some(s) = &self.sbit {
      if s.is_present() {
        write_chunk(&mut out, b"sBIT", &serialize_sbit(s, self.header.color_mode)?);
      }
    }
    if let Some(intent) = self.srgb_intent {
      write_chunk(&mut out, b"sRGB", &serialize_srgb(intent));
    }
    for (keyword, entry) in &self.text {
      match entry {
        TextEntry::Text(t) => write_chunk(&mut out, b"tEXt", &serialize_text(keyword, t)?),
        TextEntry::Compressed(t) => write_chunk(&mut out, b"zTXt", &serialize_ztxt(keyword, t)?),
        TextEntry::International { lang, translated_keyword, text, compressed } => write_chunk(
          &mut out,
          b"iTXt",
          &serialize_itxt(keyword, lang, translated_keyword, text, *compressed)?,
        ),
      }
    }
    if self.header.color_mode == ColorMode::Indexed && self.palette.0.is_empty() {
      return Err(PngError::InvalidFieldValue { chunk_type: *b"PLTE" });
    }
    if !self.palette.0.is_empty() {
      write_chunk(&mut out, b"PLTE", &serialize_plte(&self.palette)?);
    }
    if let Some(t) = &self.transparency {
      write_chunk(&mut out, b"tRNS", &serialize_trns(t, self.header.color_mode)?);
    }
    if let Some(t) = &self.timestamp {
      if t.is_present() {
        write_chunk(&mut out, b"tIME", &serialize_time(t));
      }
    }

    let bpp = self.header.bytes_per_pixel();
    let filtered =
      filter_scanlines(&self.pixels, self.header.width as usize, self.header.height as usize, bpp);
    let compressed = deflate(&filtered, CompressionLevel::Default);
    write_chunk(&mut out, b"IDAT", &compressed);
    write_chunk(&mut out, b"IEND", &[]);
    Ok(out)
  }

  /// Serialises the image and writes it to `path`.
  #[cfg(feature = "std")]
  pub fn save_path(&self, path: impl AsRef<std::path::Path>) -> PngResult<()> {
    let bytes = self.to_bytes()?;
    std::fs::write(path, bytes)?;
    Ok(())
  }

  #[inline]
  pub const fn width(&self) -> u32 {
    self.header.width
  }

  #[inline]
  pub const fn height(&self) -> u32 {
    self.header.height
  }

  /// Resizes the pixel buffer to `(w, h)`, discarding existing pixel data.
  /// `spec.md` §6: fails with `InvalidDimensions` if either is zero.
  pub fn set_dimensions(&mut self, width: u32, height: u32) -> PngResult<()> {
    if width == 0 || height == 0 {
      return Err(PngError::InvalidDimensions);
    }
    self.header.width = width;
    self.header.height = height;
    self.pixels = vec![0u8; self.header.pixel_buffer_len()];
    Ok(())
  }

  #[inline]
  pub const fn color_mode(&self) -> ColorMode {
    self.header.color_mode
  }

  /// Converts every pixel to `mode` and resizes the pixel buffer
  /// accordingly (`spec.md` §4.7: "snapshot pixels as Color values; mutate
  /// header; resize pixel buffer; write back converted colours").
  pub fn set_color_mode(&mut self, mode: ColorMode) -> PngResult<()> {
    if mode == self.header.color_mode {
      return Ok(());
    }
    let width = self.header.width as usize;
    let height = self.header.height as usize;
    let old_bpp = self.header.bytes_per_pixel();
    let new_bpp = bytes_per_pixel(mode, self.header.bit_depth);
    let mut new_pixels = vec![0u8; width * height * new_bpp];
    for i in 0..(width * height) {
      let old_bytes = &self.pixels[i * old_bpp..i * old_bpp + old_bpp];
      let color = decode_pixel(self.header.color_mode, self.header.bit_depth, old_bytes);
      // `convert_color` has no palette to consult, so an indexed source must
      // be resolved against this image's palette first (`spec.md` §4.6:
      // "conversion from indexed resolves the index").
      let color = match color {
        Color::Indexed(index) => {
          let [r, g, b] = self.palette.0.get(index as usize).copied().unwrap_or([0, 0, 0]);
          Color::Rgb { r: u16::from(r), g: u16::from(g), b: u16::from(b) }
        }
        other => other,
      };
      let converted = crate::color::convert_color(mode, color)?;
      encode_pixel(mode, self.header.bit_depth, converted, &mut new_pixels[i * new_bpp..i * new_bpp + new_bpp])?;
    }
    self.header.color_mode = mode;
    self.pixels = new_pixels;
    Ok(())
  }

  /// Returns the pixel at `(x, y)`, or `None` if out of bounds.
  /// `spec.md` §4.8: out-of-bounds access is a silent no-op.
  pub fn get_pixel(&self, x: u32, y: u32) -> Option<Color> {
    let offset = self.pixel_byte_offset(x, y)?;
    let bpp = self.header.bytes_per_pixel();
    Some(decode_pixel(self.header.color_mode, self.header.bit_depth, &self.pixels[offset..offset + bpp]))
  }

  /// Sets the pixel at `(x, y)`. Silently does nothing if out of bounds
  /// (`spec.md` §4.8).
  pub fn set_pixel(&mut self, x: u32, y: u32, color: Color) -> PngResult<()> {
    let Some(offset) = self.pixel_byte_offset(x, y) else { return Ok(()) };
    let bpp = self.header.bytes_per_pixel();
    encode_pixel(self.header.color_mode, self.header.bit_depth, color, &mut self.pixels[offset..offset + bpp])
  }

  #[inline]
  fn pixel_byte_offset(&self, x: u32, y: u32) -> Option<usize> {
    if x >= self.header.width || y >= self.header.height {
      return None;
    }
    let bpp = self.header.bytes_per_pixel();
    Some((x as usize + y as usize * self.header.width as usize) * bpp)
  }

  #[inline]
  pub const fn gamma(&self) -> Option<u32> {
    self.gamma
  }

  #[inline]
  pub fn set_gamma(&mut self, gamma: Option<u32>) {
    self.gamma = gamma;
  }

  #[inline]
  pub fn sbit(&self) -> Option<&SignificantBits> {
    self.sbit.as_ref()
  }

  #[inline]
  pub fn set_sbit(&mut self, sbit: Option<SignificantBits>) {
    self.sbit = sbit;
  }

  #[inline]
  pub const fn srgb_intent(&self) -> Option<SrgbIntent> {
    self.srgb_intent
  }

  #[inline]
  pub fn set_srgb_intent(&mut self, intent: Option<SrgbIntent>) {
    self.srgb_intent = intent;
  }

  #[inline]
  pub const fn timestamp(&self) -> Option<Timestamp> {
    self.timestamp
  }

  #[inline]
  pub fn set_timestamp(&mut self, timestamp: Option<Timestamp>) {
    self.timestamp = timestamp;
  }

  #[inline]
  pub const fn chromaticity(&self) -> Option<Chromaticity> {
    self.chromaticity
  }

  #[inline]
  pub fn set_chromaticity(&mut self, chromaticity: Option<Chromaticity>) {
    self.chromaticity = chromaticity;
  }

  #[inline]
  pub fn icc_profile(&self) -> Option<&IccProfile> {
    self.icc_profile.as_ref()
  }

  #[inline]
  pub fn set_icc_profile(&mut self, profile: Option<IccProfile>) {
    self.icc_profile = profile;
  }

  #[inline]
  pub fn palette(&self) -> &[[u8; 3]] {
    &self.palette.0
  }

  /// `spec.md` §6: fails with `PaletteTooLarge` if `entries` holds more
  /// than 256 triples.
  pub fn set_palette(&mut self, entries: Vec<[u8; 3]>) -> PngResult<()> {
    if entries.len() > crate::chunks::plte::MAX_ENTRIES {
      return Err(PngError::PaletteTooLarge);
    }
    self.palette = Palette(entries);
    Ok(())
  }

  #[inline]
  pub fn transparency(&self) -> Option<&Transparency> {
    self.transparency.as_ref()
  }

  #[inline]
  pub fn set_transparency(&mut self, transparency: Option<Transparency>) {
    self.transparency = transparency;
  }

  /// Adds or updates (in place) the `tEXt`/`zTXt` record for `keyword`
  /// (`spec.md` §3 I5, §8 P7). `compress` selects `zTXt` over `tEXt`.
  pub fn set_text(&mut self, keyword: &str, value: &str, compress: bool) -> PngResult<()> {
    if keyword.is_empty() || keyword.len() > crate::chunks::text::MAX_KEYWORD_LEN {
      return Err(PngError::KeywordTooLong);
    }
    let entry =
      if compress { TextEntry::Compressed(String::from(value)) } else { TextEntry::Text(String::from(value)) };
    upsert_text(&mut self.text, String::from(keyword), entry);
    Ok(())
  }

  /// Adds or updates (in place) the `iTXt` record for `keyword`.
  pub fn set_itxt(
    &mut self,
    keyword: &str,
    lang: &str,
    translated_keyword: &str,
    text: &str,
    compress: bool,
  ) -> PngResult<()> {
    if keyword.is_empty() || keyword.len() > crate::chunks::text::MAX_KEYWORD_LEN {
      return Err(PngError::KeywordTooLong);
    }
    let entry = TextEntry::International {
      lang: String::from(lang),
      translated_keyword: String::from(translated_keyword),
      text: String::from(text),
      compressed: compress,
    };
    upsert_text(&mut self.text, String::from(keyword), entry);
    Ok(())
  }

  #[inline]
  pub fn get_text(&self, keyword: &str) -> Option<&TextEntry> {
    self.text.iter().find(|(k, _)| k == keyword).map(|(_, v)| v)
  }

  #[inline]
  pub fn keywords(&self) -> impl Iterator<Item = &str> {
    self.text.iter().map(|(k, _)| k.as_str())
  }

  /// Removes the textual record for `keyword`, if any. Returns whether a
  /// record was removed.
  pub fn del_text(&mut self, keyword: &str) -> bool {
    let before = self.text.len();
    self.text.retain(|(k, _)| k != keyword);
    self.text.len() != before
  }
}

fn upsert_text(text: &mut Vec<(String, TextEntry)>, keyword: String, entry: TextEntry) {
  match text.iter_mut().find(|(k, _)| *k == keyword) {
    Some(slot) => slot.1 = entry,
    None => text.push((keyword, entry)),
  }
}
