//! `tEXt`/`zTXt`/`iTXt`: the three textual-record wire shapes, unified into
//! one tagged variant per `SPEC_FULL.md` §3.
//!
//! Grounded on `examples/Lokathor-imagine/src/png/text.rs` and
//! `png/ztxt.rs`, collapsed per the re-architecture hint in `spec.md` §9
//! ("replace the textual-kind union with a single tagged variant carrying
//! per-kind fields").

use crate::compress::{deflate, inflate, CompressionLevel};
use crate::error::{PngError, PngResult};
use crate::util::{latin1_to_string, string_to_latin1};
use alloc::string::String;
use alloc::vec::Vec;

pub const MAX_KEYWORD_LEN: usize = 79;

/// A textual record's payload, independent of its keyword (keywords are
/// kept alongside entries in `Image.text: Vec<(String, TextEntry)>`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TextEntry {
  /// `tEXt`: Latin-1, uncompressed.
  Text(String),
  /// `zTXt`: Latin-1, DEFLATE-compressed on the wire.
  Compressed(String),
  /// `iTXt`: UTF-8, optionally DEFLATE-compressed.
  International { lang: String, translated_keyword: String, text: String, compressed: bool },
}

fn validate_keyword(keyword: &str) -> PngResult<()> {
  if keyword.is_empty() || keyword.len() > MAX_KEYWORD_LEN {
    return Err(PngError::KeywordTooLong);
  }
  Ok(())
}

fn split_on_nul(data: &[u8], chunk_type: [u8; 4]) -> PngResult<(&[u8], &[u8])> {
  let nul = data.iter().position(|&b| b == 0).ok_or(PngError::InvalidLength { chunk_type })?;
  Ok((&data[..nul], &data[nul + 1..]))
}

pub fn parse_text(data: &[u8]) -> PngResult<(String, TextEntry)> {
  let (keyword_bytes, text_bytes) = split_on_nul(data, *b"tEXt")?;
  let keyword = latin1_to_string(keyword_bytes);
  validate_keyword(&keyword)?;
  Ok((keyword, TextEntry::Text(latin1_to_string(text_bytes))))
}

pub fn serialize_text(keyword: &str, text: &str) -> PngResult<Vec<u8>> {
  validate_keyword(keyword)?;
  let mut out = string_to_latin1(keyword);
  out.push(0);
  out.extend(string_to_latin1(text));
  Ok(out)
}

pub fn parse_ztxt(data: &[u8]) -> PngResult<(String, TextEntry)> {
  let (keyword_bytes, rest) = split_on_nul(data, *b"zTXt")?;
  let keyword = latin1_to_string(keyword_bytes);
  validate_keyword(&keyword)?;
  let (&compression_method, compressed) =
    rest.split_first().ok_or(PngError::InvalidLength { chunk_type: *b"zTXt" })?;
  if compression_method != 0 {
    return Err(PngError::UnsupportedFeature { what: "zTXt compression method other than 0" });
  }
  let text = latin1_to_string(&inflate(compressed)?);
  Ok((keyword, TextEntry::Compressed(text)))
}

pub fn serialize_ztxt(keyword: &str, text: &str) -> PngResult<Vec<u8>> {
  validate_keyword(keyword)?;
  let mut out = string_to_latin1(keyword);
  out.push(0);
  out.push(0); // compression method
  out.extend(deflate(&string_to_latin1(text), CompressionLevel::Default));
  Ok(out)
}

pub fn parse_itxt(data: &[u8]) -> PngResult<(String, TextEntry)> {
  let (keyword_bytes, rest) = split_on_nul(data, *b"iTXt")?;
  let keyword = latin1_to_string(keyword_bytes);
  validate_keyword(&keyword)?;
  let (&compression_flag, rest) = rest.split_first().ok_or(PngError::InvalidLength { chunk_type: *b"iTXt" })?;
  let (&compression_method, rest) =
    rest.split_first().ok_or(PngError::InvalidLength { chunk_type: *b"iTXt" })?;
  let (lang_bytes, rest) = split_on_nul(rest, *b"iTXt")?;
  let (translated_bytes, text_bytes) = split_on_nul(rest, *b"iTXt")?;
  let lang = latin1_to_string(lang_bytes);
  let translated_keyword =
    String::from_utf8(translated_bytes.to_vec()).map_err(|_| PngError::InvalidFieldValue { chunk_type: *b"iTXt" })?;
  let compressed = match compression_flag {
    0 => false,
    1 => true,
    _ => return Err(PngError::InvalidFieldValue { chunk_type: *b"iTXt" }),
  };
  let text = if compressed {
    if compression_method != 0 {
      return Err(PngError::UnsupportedFeature { what: "iTXt compression method other than 0" });
    }
    String::from_utf8(inflate(text_bytes)?).map_err(|_| PngError::InvalidFieldValue { chunk_type: *b"iTXt" })?
  } else {
    String::from_utf8(text_bytes.to_vec()).map_err(|_| PngError::InvalidFieldValue { chunk_type: *b"iTXt" })?
  };
  Ok((keyword, TextEntry::International { lang, translated_keyword, text, compressed }))
}

pub fn serialize_itxt(
  keyword: &str,
  lang: &str,
  translated_keyword: &str,
  text: &str,
  compressed: bool,
) -> PngResult<Vec<u8>> {
  validate_keyword(keyword)?;
  let mut out = string_to_latin1(keyword);
  out.push(0);
  out.push(compressed as u8);
  out.push(0); // compression method
  out.extend(string_to_latin1(lang));
  out.push(0);
  out.extend(translated_keyword.bytes());
  out.push(0);
  if compressed {
    out.extend(deflate(text.as_bytes(), CompressionLevel::Default));
  } else {
    out.extend(text.bytes());
  }
  Ok(out)
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn text_round_trips() {
    let bytes = serialize_text("Title", "Hello").unwrap();
    let (keyword, entry) = parse_text(&bytes).unwrap();
    assert_eq!(keyword, "Title");
    assert_eq!(entry, TextEntry::Text(String::from("Hello")));
  }

  #[test]
  fn ztxt_round_trips() {
    let bytes = serialize_ztxt("Title", "World, repeated, repeated, repeated").unwrap();
    let (keyword, entry) = parse_ztxt(&bytes).unwrap();
    assert_eq!(keyword, "Title");
    assert_eq!(entry, TextEntry::Compressed(String::from("World, repeated, repeated, repeated")));
  }

  #[test]
  fn itxt_round_trips_uncompressed() {
    let bytes = serialize_itxt("Title", "en", "Title", "Héllo", false).unwrap();
    let (keyword, entry) = parse_itxt(&bytes).unwrap();
    assert_eq!(keyword, "Title");
    assert_eq!(
      entry,
      TextEntry::International {
        lang: String::from("en"),
        translated_keyword: String::from("Title"),
        text: String::from("Héllo"),
        compressed: false,
      }
    );
  }

  #[test]
  fn itxt_round_trips_compressed() {
    let bytes = serialize_itxt("Title", "en", "Title", "repeated repeated repeated", true).unwrap();
    let (_, entry) = parse_itxt(&bytes).unwrap();
    match entry {
      TextEntry::International { text, compressed, .. } => {
        assert!(compressed);
        assert_eq!(text, "repeated repeated repeated");
      }
      _ => panic!("expected International"),
    }
  }

  #[test]
  fn empty_keyword_is_rejected() {
    assert_eq!(serialize_text("", "x"), Err(PngError::KeywordTooLong));
  }

  #[test]
  fn overlong_keyword_is_rejected() {
    let keyword: String = core::iter::repeat('k').take(80).collect();
    assert_eq!(serialize_text(&keyword, "x"), Err(PngError::KeywordTooLong));
  }
}
