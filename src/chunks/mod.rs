//! Per-chunk-type payload codecs (L3): one module per PNG chunk type this
//! crate understands, each a `parse_*`/`serialize_*` pair plus the
//! chunk's decoded value type.
//!
//! `IDAT`/`IEND` have no payload codec of their own — `IDAT` is opaque
//! DEFLATE bytes accumulated by the loader (see `image.rs`), and `IEND` is
//! an empty sentinel the loader simply stops on.

pub mod chrm;
pub mod gama;
pub mod iccp;
pub mod ihdr;
pub mod plte;
pub mod sbit;
pub mod srgb;
pub mod text;
pub mod time;
pub mod trns;

pub use chrm::Chromaticity;
pub use gama::GAMA_LEN;
pub use iccp::IccProfile;
pub use ihdr::Header;
pub use plte::Palette;
pub use sbit::SignificantBits;
pub use srgb::SrgbIntent;
pub use text::TextEntry;
pub use time::Timestamp;
pub use trns::Transparency;
