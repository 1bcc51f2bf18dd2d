//! Palette block codec
//!
//! Layout: `Uint8 count`, then per palette its encoded name followed by colors
//! 1-7 as 16-bit high colors. Color 0 is always transparent and never stored.

use super::color::Color;
use crate::common::{PALETTE_SIZE, PERSISTED_PALETTE_COLORS};
use crate::primitives::{ByteReader, ByteWriter};
use crate::text::{decode_text, encode_text, test_characters};
use crate::{LevelCodecError, Result};
use log::debug;
use serde::Serialize;

/// A named set of 8 colors
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Palette {
    name: String,
    colors: [Color; PALETTE_SIZE],
}

impl Palette {
    /// Create a palette from its 7 visible colors
    pub fn new(name: &str, colors: [Color; PERSISTED_PALETTE_COLORS]) -> Result<Self> {
        if !test_characters(name) {
            return Err(LevelCodecError::InvalidFieldValue {
                key: "name".to_string(),
                value: name.to_string(),
            });
        }
        let mut all = [Color::TRANSPARENT; PALETTE_SIZE];
        all[1..].copy_from_slice(&colors);
        Ok(Self {
            name: name.to_uppercase(),
            colors: all,
        })
    }

    /// Palette name as stored (uppercase)
    pub fn name(&self) -> &str {
        &self.name
    }

    /// All 8 colors; index 0 is transparent
    pub fn colors(&self) -> &[Color; PALETTE_SIZE] {
        &self.colors
    }

    /// Color at `index`, or `None` past the end
    pub fn color(&self, index: usize) -> Option<Color> {
        self.colors.get(index).copied()
    }

    /// Copy of this palette with one visible color replaced
    pub fn with_color(&self, index: usize, color: Color) -> Result<Self> {
        if index == 0 || index >= PALETTE_SIZE {
            return Err(LevelCodecError::ValueOutOfRange(format!(
                "palette color index {index} (expected 1..{PALETTE_SIZE})"
            )));
        }
        let mut next = self.clone();
        next.colors[index] = color;
        Ok(next)
    }

    /// Copy of this palette under a new name
    pub fn with_name(&self, name: &str) -> Result<Self> {
        let mut visible = [Color::TRANSPARENT; PERSISTED_PALETTE_COLORS];
        visible.copy_from_slice(&self.colors[1..]);
        Self::new(name, visible)
    }
}

/// Encode a list of palettes as a palette block
pub fn encode_palettes(palettes: &[Palette]) -> Result<Vec<u8>> {
    let count = u8::try_from(palettes.len()).map_err(|_| {
        LevelCodecError::ValueOutOfRange(format!("{} palettes (maximum 255)", palettes.len()))
    })?;

    let mut writer = ByteWriter::new();
    writer.write_u8(count);
    for palette in palettes {
        writer.write_bytes(&encode_text(&palette.name)?);
        for color in &palette.colors[1..] {
            writer.write_bytes(&color.to_bytes());
        }
    }
    debug!("encoded {} palettes into {} bytes", count, writer.len());
    Ok(writer.into_inner())
}

/// Decode a palette block, returning the palettes and the bytes after it
pub fn decode_palettes(data: &[u8]) -> Result<(Vec<Palette>, &[u8])> {
    let mut reader = ByteReader::new(data);
    let count = reader.read_u8()?;

    let mut palettes = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let name = decode_text(reader.rest())?;
        reader.take(name.bytes_used)?;

        let mut colors = [Color::TRANSPARENT; PALETTE_SIZE];
        for color in colors.iter_mut().skip(1) {
            *color = Color::from_bits(reader.read_u16()?)?;
        }
        palettes.push(Palette {
            name: name.text,
            colors,
        });
    }

    debug!(
        "decoded {} palettes from {} bytes",
        palettes.len(),
        reader.position()
    );
    Ok((palettes, reader.rest()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample(name: &str) -> Palette {
        Palette::new(
            name,
            [
                Color::opaque(248, 0, 0),
                Color::opaque(0, 248, 0),
                Color::opaque(0, 0, 248),
                Color::opaque(248, 248, 0),
                Color::opaque(0, 248, 248),
                Color::opaque(248, 0, 248),
                Color::new(128, 128, 128, false),
            ],
        )
        .unwrap()
    }

    #[test]
    fn test_color_zero_is_transparent() {
        let palette = sample("Forest");
        assert_eq!(palette.color(0), Some(Color::TRANSPARENT));
        assert_eq!(palette.name(), "FOREST");
        assert!(palette.with_color(0, Color::opaque(8, 8, 8)).is_err());
        assert!(palette.with_color(8, Color::opaque(8, 8, 8)).is_err());
    }

    #[test]
    fn test_invalid_name() {
        assert!(Palette::new("tab\tname", [Color::TRANSPARENT; 7]).is_err());
    }

    #[test]
    fn test_block_layout() {
        let palette = sample("A");
        let bytes = encode_palettes(std::slice::from_ref(&palette)).unwrap();
        // count + name ("A" 0111 + terminal 0100 = 1 byte) + 7 colors
        assert_eq!(bytes.len(), 1 + 1 + 7 * 2);
        assert_eq!(bytes[0], 1);
        assert_eq!(bytes[1], 0b0111_0100);
        assert_eq!(&bytes[2..4], &Color::opaque(248, 0, 0).to_bytes());
    }

    #[test]
    fn test_block_round_trip_with_trailer() {
        let palettes = vec![sample("Forest"), sample("Ice cave").with_name("Lava").unwrap()];
        let mut bytes = encode_palettes(&palettes).unwrap();
        bytes.extend_from_slice(&[0xDE, 0xAD]);

        let (decoded, rest) = decode_palettes(&bytes).unwrap();
        assert_eq!(decoded, palettes);
        assert_eq!(rest, &[0xDE, 0xAD]);
    }

    #[test]
    fn test_truncated_block() {
        let bytes = encode_palettes(&[sample("Forest")]).unwrap();
        let err = decode_palettes(&bytes[..bytes.len() - 1]).unwrap_err();
        assert!(matches!(err, LevelCodecError::BufferUnderrun { .. }));
    }

    #[test]
    fn test_empty_block() {
        assert_eq!(encode_palettes(&[]).unwrap(), vec![0]);
        let (decoded, rest) = decode_palettes(&[0]).unwrap();
        assert!(decoded.is_empty());
        assert!(rest.is_empty());
    }
}
