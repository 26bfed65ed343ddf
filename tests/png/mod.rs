use rpng::{write_chunk, Color, ColorMode, Image, PngError};

#[test]
fn create_set_pixel_save_reopen() {
  let mut img = Image::create(ColorMode::RgbAlpha, 2, 2).unwrap();
  img.set_pixel(0, 0, Color::RgbAlpha { r: 0xFF, g: 0x01, b: 0x01, a: 0xFF }).unwrap();
  let bytes = img.to_bytes().unwrap();
  let img2 = Image::open(&bytes).unwrap();
  assert_eq!(img2.get_pixel(0, 0).unwrap(), Color::RgbAlpha { r: 0xFF, g: 0x01, b: 0x01, a: 0xFF });
  for &(x, y) in &[(1, 0), (0, 1), (1, 1)] {
    assert_eq!(img2.get_pixel(x, y).unwrap(), Color::RgbAlpha { r: 0, g: 0, b: 0, a: 0 });
  }
}

#[test]
fn reject_bad_magic() {
  let bytes = [0u8; 8];
  assert_eq!(Image::open(&bytes), Err(PngError::BadMagic));
}

#[test]
fn reject_bad_crc() {
  let img = Image::create(ColorMode::Rgb, 1, 1).unwrap();
  let mut bytes = img.to_bytes().unwrap();
  // IHDR's CRC is the 4 bytes right after its 13-byte body: signature (8) +
  // length (4) + type (4) + data (13), then the CRC.
  let crc_start = 8 + 4 + 4 + 13;
  bytes[crc_start] ^= 0x01;
  assert_eq!(Image::open(&bytes), Err(PngError::CorruptChunk { chunk_type: *b"IHDR", offset: 8 }));
}

#[test]
fn reject_chunk_order_violation() {
  let mut bytes = Vec::new();
  bytes.extend_from_slice(&rpng::PNG_SIGNATURE);
  write_chunk(&mut bytes, b"PLTE", &[0, 0, 0]);
  write_chunk(
    &mut bytes,
    b"IHDR",
    &[0, 0, 0, 1, 0, 0, 0, 1, 8, 2, 0, 0, 0],
  );
  assert_eq!(Image::open(&bytes), Err(PngError::ChunkOrderViolation { chunk_type: *b"PLTE" }));
}

#[test]
fn textual_round_trip_updates_in_place() {
  let mut img = Image::create(ColorMode::Grayscale, 1, 1).unwrap();
  img.set_text("Title", "Hello", false).unwrap();
  let bytes = img.to_bytes().unwrap();
  let mut img2 = Image::open(&bytes).unwrap();
  assert_eq!(img2.get_text("Title"), Some(&rpng::TextEntry::Text(String::from("Hello"))));

  img2.set_text("Title", "World", true).unwrap();
  let bytes2 = img2.to_bytes().unwrap();
  let img3 = Image::open(&bytes2).unwrap();
  assert_eq!(img3.keywords().count(), 1);
  assert_eq!(img3.get_text("Title"), Some(&rpng::TextEntry::Compressed(String::from("World"))));
}

#[test]
fn raw_chunk_iter_never_panics_on_random_bytes() {
  for _ in 0..64 {
    let bytes = crate::rand_bytes(256);
    for raw in rpng::RawChunkIter::new(&bytes) {
      let _ = raw.is_critical();
      let _ = raw.verify_crc();
    }
  }
}

#[test]
fn open_never_panics_on_random_bytes() {
  for _ in 0..64 {
    let bytes = crate::rand_bytes(256);
    let _ = Image::open(&bytes);
  }
}
