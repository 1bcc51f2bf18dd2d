//! levelcodec - binary save formats of a tile-based level editor
//!
//! This crate implements the bit-exact codecs the editor uses to persist game
//! data: a fixed prefix code for level and palette names, 3-bit tileset pixel
//! packing, 16-bit high-color palettes, and the self-describing map format of
//! layers and typed objects. A save file ties them together: the packed
//! tileset followed by one record per level.
//!
//! # Features
//!
//! - Fixed Huffman-style text code with a terminal symbol
//! - 3-bit pixel and 5/5/5/1 color packing, MSB first
//! - Schema-driven map blobs decoded by an explicit state machine
//! - Level records and save-file assembly with blank-level padding
//! - Zero-copy splitting of concatenated map and level data
//!
//! # Example - Level names
//!
//! ```
//! use levelcodec::{decode_text, encode_text};
//!
//! let bytes = encode_text("World 1-1")?;
//! let decoded = decode_text(&bytes)?;
//! assert_eq!(decoded.text, "WORLD 1-1");
//! assert_eq!(decoded.bytes_used, bytes.len());
//! # Ok::<(), levelcodec::LevelCodecError>(())
//! ```
//!
//! # Example - Maps
//!
//! ```
//! use levelcodec::map::{bytes_to_map, map_to_bytes, FieldSpec, Layer, LevelMap, ObjectType, ObjectTypeTable};
//! use levelcodec::WireType;
//!
//! let table = ObjectTypeTable::new(vec![ObjectType::new(
//!     "block",
//!     vec![FieldSpec::new(WireType::Uint16, "x"), FieldSpec::new(WireType::Uint16, "y")],
//! )])?;
//! let block = table.instantiate(0, 2.0, 3.0)?;
//! let map = LevelMap::with_layers(16, 8, vec![Layer::with_objects(1.0, vec![block])]);
//!
//! let bytes = map_to_bytes(&map, &table)?;
//! assert_eq!(bytes_to_map(&bytes, &table)?, map);
//! # Ok::<(), levelcodec::LevelCodecError>(())
//! ```

#![warn(missing_docs)]
#![warn(missing_debug_implementations)]

// Public modules
pub mod common;
pub mod error;
pub mod graphics;
pub mod level;
pub mod map;
pub mod primitives;
pub mod tables;
pub mod text;
pub mod transform;

// Re-export commonly used types
pub use common::{LevelCodecError, Result, SaveFileLayout, LAYER_TERMINATOR, PALETTE_SIZE};
pub use graphics::{
    compress_pixels, decode_palettes, decompress_pixels, encode_palettes, Color, Palette, Tileset,
};
pub use level::{
    decode_levels, encode_levels, load_level_from_data, GameSchema, Goal, Level, SaveFile,
};
pub use map::{bytes_to_map, map_to_bytes, split_maps, LevelMap, ObjectTypeTable};
pub use primitives::{size_of, WireType, WireValue};
pub use text::{decode_text, encode_text, test_characters, DecodedText};
pub use transform::Matrix3;
