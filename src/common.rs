//! Common types and constants for the level editor save formats
//!
//! This module defines the error type, the wire-format constants shared by the
//! map, level and graphics codecs, and the save-file layout configuration.

use thiserror::Error;

/// Error type for codec operations
#[derive(Debug, Error)]
pub enum LevelCodecError {
    /// Wire type name does not match `<Letters><BitWidth>`
    #[error("Invalid wire type name: {0:?}")]
    InvalidType(String),

    /// Color, channel or pixel value outside its bit width
    #[error("Invalid color value: {value} (expected 0..={max})")]
    InvalidColor {
        /// Decoded or supplied value
        value: u32,
        /// Largest value the component can hold
        max: u32,
    },

    /// Pixel stream length is not a whole number of pixels
    #[error("Invalid tileset data: {leftover_bits} leftover bits after unpacking")]
    InvalidTilesetData {
        /// Bits left over after the last whole pixel
        leftover_bits: usize,
    },

    /// Malformed or empty text stream
    #[error("Text decode error: {0}")]
    TextDecode(String),

    /// Character missing from the text code table
    #[error("Unsupported character in text: {0:?}")]
    UnsupportedCharacter(char),

    /// Object type tag not present in the object type table
    #[error("Unknown object type: {0}")]
    UnknownObjectType(u16),

    /// Goal id not present in the goal template list
    #[error("Unknown goal id: {0}")]
    UnknownGoal(u8),

    /// A decode step needs more bytes than remain
    #[error("Buffer underrun: needed {needed} bytes at offset {offset}, {available} available")]
    BufferUnderrun {
        /// Offset of the failed read
        offset: usize,
        /// Bytes the read required
        needed: usize,
        /// Bytes left in the buffer
        available: usize,
    },

    /// Object lacks a field declared by its type
    #[error("Object of type {type_tag} is missing field {key:?}")]
    MissingField {
        /// Type tag of the object
        type_tag: u16,
        /// Field key declared by the schema
        key: String,
    },

    /// Field or option value does not fit its wire type
    #[error("Invalid value {value:?} for field {key:?}")]
    InvalidFieldValue {
        /// Field key or goal option slug
        key: String,
        /// Offending value as text
        value: String,
    },

    /// Count or index outside what the format can represent
    #[error("Value out of range: {0}")]
    ValueOutOfRange(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type alias for codec operations
pub type Result<T> = std::result::Result<T, LevelCodecError>;

// Wire-format constants

/// Type tag value that terminates a layer's object list
pub const LAYER_TERMINATOR: u16 = 0xFFFF;

/// Size of the map header: width, height and layer count
pub const MAP_HEADER_SIZE: usize = 5;

/// Bits per tileset pixel
pub const PIXEL_BITS: usize = 3;

/// Largest pixel color index
pub const MAX_PIXEL_INDEX: u8 = 0x07;

/// Bits per quantized color channel
pub const CHANNEL_BITS: usize = 5;

/// Largest quantized channel value
pub const MAX_CHANNEL_BITS_VALUE: u8 = 0x1F;

/// Colors in a palette, including the implicit transparent entry
pub const PALETTE_SIZE: usize = 8;

/// Colors actually persisted per palette
pub const PERSISTED_PALETTE_COLORS: usize = PALETTE_SIZE - 1;

/// Default tileset width and height in tiles
pub const DEFAULT_TILESET_TILES: u32 = 64;

/// Default tile edge length in pixels
pub const DEFAULT_TILE_SIZE: u32 = 8;

/// Default number of levels in a save file
pub const DEFAULT_LEVEL_COUNT: usize = 32;

/// Shape of a save file that is not stored in the stream itself
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SaveFileLayout {
    /// Tileset width in tiles
    pub tileset_width_tiles: u32,
    /// Tileset height in tiles
    pub tileset_height_tiles: u32,
    /// Tile edge length in pixels
    pub tile_size: u32,
    /// Number of levels the game expects
    pub level_count: usize,
}

impl SaveFileLayout {
    /// Tileset width and height in pixels
    pub fn pixel_dimensions(&self) -> Result<(u32, u32)> {
        let scale = |tiles: u32, what: &str| {
            tiles.checked_mul(self.tile_size).ok_or_else(|| {
                LevelCodecError::ValueOutOfRange(format!(
                    "tileset {what} of {tiles} tiles of {} pixels",
                    self.tile_size
                ))
            })
        };
        Ok((
            scale(self.tileset_width_tiles, "width")?,
            scale(self.tileset_height_tiles, "height")?,
        ))
    }

    /// Number of pixels in the tileset
    pub fn pixel_count(&self) -> Result<usize> {
        let (width, height) = self.pixel_dimensions()?;
        (width as usize)
            .checked_mul(height as usize)
            .filter(|count| count.checked_mul(PIXEL_BITS).is_some())
            .ok_or_else(|| {
                LevelCodecError::ValueOutOfRange(format!("tileset of {width}x{height} pixels"))
            })
    }

    /// Size of the packed tileset at the start of the save file
    pub fn tileset_byte_len(&self) -> Result<usize> {
        Ok((self.pixel_count()? * PIXEL_BITS).div_ceil(8))
    }
}

impl Default for SaveFileLayout {
    fn default() -> Self {
        Self {
            tileset_width_tiles: DEFAULT_TILESET_TILES,
            tileset_height_tiles: DEFAULT_TILESET_TILES,
            tile_size: DEFAULT_TILE_SIZE,
            level_count: DEFAULT_LEVEL_COUNT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout() {
        let layout = SaveFileLayout::default();
        assert_eq!(layout.pixel_dimensions().unwrap(), (512, 512));
        assert_eq!(layout.pixel_count().unwrap(), 64 * 64 * 8 * 8);
        assert_eq!(layout.tileset_byte_len().unwrap(), 64 * 64 * 8 * 8 * 3 / 8);
    }

    #[test]
    fn test_tileset_byte_len_rounds_up() {
        let layout = SaveFileLayout {
            tileset_width_tiles: 1,
            tileset_height_tiles: 1,
            tile_size: 1,
            level_count: 1,
        };
        assert_eq!(layout.pixel_count().unwrap(), 1);
        assert_eq!(layout.tileset_byte_len().unwrap(), 1);
    }

    #[test]
    fn test_oversized_layout() {
        let layout = SaveFileLayout {
            tileset_width_tiles: u32::MAX,
            tileset_height_tiles: u32::MAX,
            tile_size: u32::MAX,
            level_count: 1,
        };
        assert!(matches!(
            layout.pixel_dimensions().unwrap_err(),
            LevelCodecError::ValueOutOfRange(_)
        ));
        assert!(layout.pixel_count().is_err());
        assert!(layout.tileset_byte_len().is_err());

        // Each side fits in u32 but the area's bit count does not fit usize
        let layout = SaveFileLayout {
            tileset_width_tiles: 0xC000_0000,
            tileset_height_tiles: 0xC000_0000,
            tile_size: 1,
            level_count: 1,
        };
        assert!(layout.pixel_dimensions().is_ok());
        if usize::BITS == 64 {
            assert!(matches!(
                layout.tileset_byte_len().unwrap_err(),
                LevelCodecError::ValueOutOfRange(_)
            ));
        }
    }

    #[test]
    fn test_constants() {
        assert_eq!(LAYER_TERMINATOR, 0xFFFF);
        assert_eq!(MAP_HEADER_SIZE, 5);
        assert_eq!(PERSISTED_PALETTE_COLORS, 7);
        assert_eq!(MAX_CHANNEL_BITS_VALUE as usize, (1 << CHANNEL_BITS) - 1);
        assert_eq!(MAX_PIXEL_INDEX as usize, (1 << PIXEL_BITS) - 1);
    }
}
