#![cfg_attr(not(feature = "std"), no_std)]
#![forbid(unsafe_code)]
//! In-memory reading, editing, and writing of PNG images.
//!
//! The crate is organized bottom-up: byte utilities and CRC-32 ([`crc32`]),
//! a compression bridge over `miniz_oxide` ([`compress`]), the chunk codec
//! ([`chunk`]) and per-type payload codecs ([`chunks`]), the scanline
//! filter engine ([`filter`]), the color engine ([`color`]), and finally
//! [`Image`], the editable model and public façade.

#[cfg(feature = "alloc")]
extern crate alloc;
#[cfg(feature = "std")]
extern crate std;

/// Prints a `file:line>`-prefixed diagnostic when the `trace` feature is
/// enabled; compiles to nothing otherwise. Used at chunk-order and
/// CRC-mismatch decision points in the loader.
#[macro_export]
macro_rules! trace {
  ($($arg:tt)*) => {
    #[cfg(feature = "trace")] {
      ::std::print!("{file}:{line}> ", file = file!(), line = line!());
      ::std::println!($($arg)*);
    }
  }
}

mod ascii_array;
mod chunk;
pub mod chunks;
mod color;
mod compress;
mod crc32;
mod error;
mod filter;
mod image;
mod util;

pub use ascii_array::AsciiArray;
pub use chunk::{verify_chunk_crc, write_chunk, RawChunk, RawChunkIter};
pub use chunks::{
  Chromaticity, IccProfile, Header as IhdrHeader, Palette, SignificantBits, SrgbIntent, TextEntry, Timestamp,
  Transparency,
};
pub use color::{bytes_per_pixel, BitDepth, Color, ColorMode};
pub use compress::{deflate, inflate, CompressionLevel};
pub use error::{PngError, PngResult};
pub use image::Image;

/// The eight magic bytes every PNG byte stream must begin with.
pub const PNG_SIGNATURE: [u8; 8] = [0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
