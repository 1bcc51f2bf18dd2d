//! 3-bit pixel packing
//!
//! Tileset pixels are palette indices 0-7, packed MSB first with no padding
//! between pixels and zero bits after the last one.

use crate::common::{MAX_PIXEL_INDEX, PIXEL_BITS};
use crate::primitives::{BitReader, BitWriter};
use crate::{LevelCodecError, Result};

/// Pack pixel indices into bytes
pub fn compress_pixels(pixels: &[u8]) -> Result<Vec<u8>> {
    let mut writer = BitWriter::new();
    for &pixel in pixels {
        if pixel > MAX_PIXEL_INDEX {
            return Err(LevelCodecError::InvalidColor {
                value: pixel as u32,
                max: MAX_PIXEL_INDEX as u32,
            });
        }
        writer.write_bits(pixel as u32, PIXEL_BITS);
    }
    Ok(writer.finish())
}

/// Unpack every pixel index stored in `data`
///
/// The bit length of `data` must be a whole number of pixels; packed tilesets
/// always are, since their pixel count is a multiple of 8.
pub fn decompress_pixels(data: &[u8]) -> Result<Vec<u8>> {
    let total_bits = data.len() * 8;
    let leftover_bits = total_bits % PIXEL_BITS;
    if leftover_bits != 0 {
        return Err(LevelCodecError::InvalidTilesetData { leftover_bits });
    }

    let mut reader = BitReader::new(data);
    let mut pixels = Vec::with_capacity(total_bits / PIXEL_BITS);
    while let Some(pixel) = reader.read_bits(PIXEL_BITS) {
        pixels.push(pixel as u8);
    }
    Ok(pixels)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty() {
        assert!(compress_pixels(&[]).unwrap().is_empty());
        assert!(decompress_pixels(&[]).unwrap().is_empty());
    }

    #[test]
    fn test_known_packing() {
        // 0..8 as 3-bit fields: 000 001 010 011 100 101 110 111
        let packed = compress_pixels(&[0, 1, 2, 3, 4, 5, 6, 7]).unwrap();
        assert_eq!(packed, vec![0x05, 0x39, 0x77]);
        assert_eq!(
            decompress_pixels(&packed).unwrap(),
            vec![0, 1, 2, 3, 4, 5, 6, 7]
        );
    }

    #[test]
    fn test_final_byte_is_zero_padded() {
        assert_eq!(compress_pixels(&[7]).unwrap(), vec![0b1110_0000]);
        assert_eq!(compress_pixels(&[7, 7, 7]).unwrap(), vec![0xFF, 0b1000_0000]);
    }

    #[test]
    fn test_out_of_range_pixel() {
        assert!(matches!(
            compress_pixels(&[1, 8]).unwrap_err(),
            LevelCodecError::InvalidColor { value: 8, max: 7 }
        ));
    }

    #[test]
    fn test_leftover_bits_rejected() {
        for len in [1usize, 2, 4, 5] {
            let err = decompress_pixels(&vec![0u8; len]).unwrap_err();
            assert!(
                matches!(err, LevelCodecError::InvalidTilesetData { leftover_bits } if leftover_bits == (len * 8) % 3),
                "length {len}"
            );
        }
        assert_eq!(decompress_pixels(&[0u8; 6]).unwrap().len(), 16);
    }
}
