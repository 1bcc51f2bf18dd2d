//! Tileset graphics
//!
//! A tileset is a grid of square tiles whose pixels are 3-bit palette indices.
//! Pixels are stored row-major over the whole sheet, not tile by tile.

use super::pixels::compress_pixels;
use crate::common::{SaveFileLayout, MAX_PIXEL_INDEX, PIXEL_BITS};
use crate::primitives::BitReader;
use crate::{LevelCodecError, Result};

/// Tile sheet of palette-indexed pixels
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tileset {
    width_tiles: u32,
    height_tiles: u32,
    tile_size: u32,
    pixel_width: u32,
    pixel_height: u32,
    pixels: Vec<u8>,
}

impl Tileset {
    /// A fully transparent tileset with the layout's dimensions
    pub fn blank(layout: &SaveFileLayout) -> Result<Self> {
        Self::from_pixels(layout, vec![0; layout.pixel_count()?])
    }

    /// Wrap existing pixels; the count must match the layout
    pub fn from_pixels(layout: &SaveFileLayout, pixels: Vec<u8>) -> Result<Self> {
        let (pixel_width, pixel_height) = layout.pixel_dimensions()?;
        let pixel_count = layout.pixel_count()?;
        if pixels.len() != pixel_count {
            return Err(LevelCodecError::ValueOutOfRange(format!(
                "{} pixels for a tileset of {}",
                pixels.len(),
                pixel_count
            )));
        }
        if let Some(&pixel) = pixels.iter().find(|&&pixel| pixel > MAX_PIXEL_INDEX) {
            return Err(LevelCodecError::InvalidColor {
                value: pixel as u32,
                max: MAX_PIXEL_INDEX as u32,
            });
        }
        Ok(Self {
            width_tiles: layout.tileset_width_tiles,
            height_tiles: layout.tileset_height_tiles,
            tile_size: layout.tile_size,
            pixel_width,
            pixel_height,
            pixels,
        })
    }

    /// Decode packed tileset bytes
    ///
    /// `data` must be exactly the layout's packed size. Bits after the last
    /// pixel must be zero.
    pub fn from_bytes(layout: &SaveFileLayout, data: &[u8]) -> Result<Self> {
        let pixel_count = layout.pixel_count()?;
        let byte_len = layout.tileset_byte_len()?;
        if data.len() < byte_len {
            return Err(LevelCodecError::BufferUnderrun {
                offset: 0,
                needed: byte_len,
                available: data.len(),
            });
        }
        if data.len() > byte_len {
            return Err(LevelCodecError::ValueOutOfRange(format!(
                "{} bytes of tileset data, expected {}",
                data.len(),
                byte_len
            )));
        }

        let mut reader = BitReader::new(data);
        let mut pixels = Vec::with_capacity(pixel_count);
        while pixels.len() < pixel_count {
            match reader.read_bits(PIXEL_BITS) {
                Some(pixel) => pixels.push(pixel as u8),
                None => {
                    return Err(LevelCodecError::InvalidTilesetData {
                        leftover_bits: reader.bits_remaining(),
                    })
                }
            }
        }

        let leftover_bits = reader.bits_remaining();
        if reader.read_bits(leftover_bits) != Some(0) {
            return Err(LevelCodecError::InvalidTilesetData { leftover_bits });
        }
        Self::from_pixels(layout, pixels)
    }

    /// Pack the pixels
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        compress_pixels(&self.pixels)
    }

    /// Sheet width in pixels
    pub fn pixel_width(&self) -> u32 {
        self.pixel_width
    }

    /// Sheet height in pixels
    pub fn pixel_height(&self) -> u32 {
        self.pixel_height
    }

    /// Tile edge length in pixels
    pub fn tile_size(&self) -> u32 {
        self.tile_size
    }

    /// All pixels, row-major
    pub fn pixels(&self) -> &[u8] {
        &self.pixels
    }

    fn index(&self, x: u32, y: u32) -> Option<usize> {
        if x < self.pixel_width && y < self.pixel_height {
            Some(y as usize * self.pixel_width as usize + x as usize)
        } else {
            None
        }
    }

    /// Palette index at a pixel coordinate
    pub fn pixel(&self, x: u32, y: u32) -> Option<u8> {
        self.index(x, y).map(|index| self.pixels[index])
    }

    /// Copy of this tileset with one pixel changed
    pub fn with_pixel(&self, x: u32, y: u32, value: u8) -> Result<Self> {
        if value > MAX_PIXEL_INDEX {
            return Err(LevelCodecError::InvalidColor {
                value: value as u32,
                max: MAX_PIXEL_INDEX as u32,
            });
        }
        let index = self.index(x, y).ok_or_else(|| {
            LevelCodecError::ValueOutOfRange(format!("pixel ({x}, {y}) outside tileset"))
        })?;
        let mut next = self.clone();
        next.pixels[index] = value;
        Ok(next)
    }

    /// Pixels of one tile, row-major within the tile
    pub fn tile(&self, tile_x: u32, tile_y: u32) -> Option<Vec<u8>> {
        if tile_x >= self.width_tiles || tile_y >= self.height_tiles {
            return None;
        }
        let side = self.tile_size;
        let mut tile = Vec::with_capacity((side * side) as usize);
        for y in 0..side {
            for x in 0..side {
                tile.push(self.pixel(tile_x * side + x, tile_y * side + y)?);
            }
        }
        Some(tile)
    }
}
