//! Tileset and palette codecs
//!
//! Pixels are 3-bit palette indices packed MSB first; palette colors are 16-bit
//! high colors with 5 bits per channel and a 1-bit alpha flag.

mod color;
mod palette;
mod pixels;
mod tileset;

pub use color::Color;
pub use palette::{decode_palettes, encode_palettes, Palette};
pub use pixels::{compress_pixels, decompress_pixels};
pub use tileset::Tileset;
